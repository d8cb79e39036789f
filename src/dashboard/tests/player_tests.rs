//! Timer loop tests

use super::sample_dashboard;
use crate::config::DashboardConfig;
use crate::dashboard::player::play_map_animation;
use std::time::Duration;

#[tokio::test]
async fn test_player_runs_to_last_year() {
    let config = DashboardConfig::default().with_animation_interval(Duration::from_millis(1));
    let mut dashboard = sample_dashboard(config);
    let mut years = Vec::new();

    let frames = play_map_animation(&mut dashboard, |d| years.push(d.tabs().map.year()))
        .await
        .unwrap();

    assert_eq!(frames, 3);
    assert_eq!(years, vec![2020, 2021, 2021]);
    assert!(!dashboard.animation().is_running());
}

#[tokio::test]
async fn test_player_from_last_year_finishes_immediately() {
    let config = DashboardConfig::default().with_animation_interval(Duration::from_millis(1));
    let mut dashboard = sample_dashboard(config);
    dashboard
        .handle(crate::dashboard::DashboardEvent::Map(
            crate::dashboard::MapEvent::Year(2021),
        ))
        .unwrap();

    let frames = play_map_animation(&mut dashboard, |_| {}).await.unwrap();

    assert_eq!(frames, 1);
    assert_eq!(dashboard.tabs().map.year(), 2021);
}
