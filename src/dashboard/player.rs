//! Timer loop for the map animation.

use super::{Dashboard, DashboardEvent, Effect, MapEvent};
use crate::error::Result;
use tokio::time::{self, MissedTickBehavior};
use tracing::info;

/// Play the map animation until it stops, calling `on_frame` after every
/// tick. Returns the number of ticks handled.
///
/// Ticks run one at a time; a slow frame delays the next tick instead of
/// queueing a burst.
pub async fn play_map_animation<F>(dashboard: &mut Dashboard, mut on_frame: F) -> Result<usize>
where
    F: FnMut(&Dashboard),
{
    let effects = dashboard.handle(DashboardEvent::Map(MapEvent::Play))?;
    let interval = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::StartTimer { interval } => Some(*interval),
            Effect::CancelTimer => None,
        })
        .unwrap_or_else(|| dashboard.animation().interval());

    info!(
        "Playing map animation {}-{} every {:?}",
        dashboard.tabs().map.year(),
        dashboard.animation().last_year(),
        interval
    );

    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of a tokio interval completes immediately
    ticker.tick().await;

    let mut frames = 0;
    while dashboard.animation().is_running() {
        ticker.tick().await;
        let effects = dashboard.handle(DashboardEvent::Tick)?;
        frames += 1;
        on_frame(&*dashboard);

        if effects.contains(&Effect::CancelTimer) {
            break;
        }
    }

    Ok(frames)
}
