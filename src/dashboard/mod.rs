//! Dashboard shell.
//!
//! Composes the eight tabs over one read-only dataset, dispatches widget
//! events to the tab that owns the widget, owns the map animation and keeps
//! the reset snapshot taken at startup. All recomputation happens
//! synchronously inside [`Dashboard::handle`]; timer work is returned as
//! [`Effect`] values for the event loop to apply.

pub mod player;

#[cfg(test)]
mod tests;

pub use crate::animation::Effect;

use crate::animation::{AnimationState, TickOutcome, YearAnimation};
use crate::binding::ChartBinding;
use crate::config::DashboardConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::geo::Boundaries;
use crate::models::Metric;
use crate::tabs::{
    BoxPlotEvent, BoxPlotTab, GroupedBarEvent, GroupedBarTab, HeatmapEvent, HeatmapTab, MapTab,
    RegionalEvent, RegionalTab, ScatterEvent, ScatterTab, StackedAreaEvent, StackedAreaTab, Tab,
    TabKind, TimeSeriesEvent, TimeSeriesTab,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Every tab of the dashboard
#[derive(Debug, Clone)]
pub struct Tabs {
    pub scatter: ScatterTab,
    pub regional: RegionalTab,
    pub heatmap: HeatmapTab,
    pub time_series: TimeSeriesTab,
    pub grouped_bar: GroupedBarTab,
    pub map: MapTab,
    pub box_plot: BoxPlotTab,
    pub stacked_area: StackedAreaTab,
}

impl Tabs {
    pub fn build(
        dataset: &Dataset,
        config: &DashboardConfig,
        boundaries: Arc<Boundaries>,
    ) -> Result<Self> {
        Ok(Self {
            scatter: ScatterTab::new(dataset, config)?,
            regional: RegionalTab::new(dataset)?,
            heatmap: HeatmapTab::new(dataset)?,
            time_series: TimeSeriesTab::new(dataset, config)?,
            grouped_bar: GroupedBarTab::new(dataset, config)?,
            map: MapTab::new(dataset, boundaries)?,
            box_plot: BoxPlotTab::new(dataset)?,
            stacked_area: StackedAreaTab::new(dataset, config)?,
        })
    }

    /// Tabs in display order
    pub fn all(&self) -> [&dyn Tab; 8] {
        [
            &self.scatter,
            &self.regional,
            &self.heatmap,
            &self.time_series,
            &self.grouped_bar,
            &self.map,
            &self.box_plot,
            &self.stacked_area,
        ]
    }

    pub fn get(&self, kind: TabKind) -> &dyn Tab {
        match kind {
            TabKind::Scatter => &self.scatter,
            TabKind::Regional => &self.regional,
            TabKind::Heatmap => &self.heatmap,
            TabKind::TimeSeries => &self.time_series,
            TabKind::GroupedBar => &self.grouped_bar,
            TabKind::Map => &self.map,
            TabKind::BoxPlot => &self.box_plot,
            TabKind::StackedArea => &self.stacked_area,
        }
    }

    /// Every chart binding, tab by tab
    pub fn bindings(&self) -> Vec<&ChartBinding> {
        self.all().into_iter().flat_map(|tab| tab.bindings()).collect()
    }
}

/// Map tab widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    Metric(Metric),
    Year(i32),
    Play,
    Stop,
    /// Play/Stop button
    TogglePlay,
    ResetAnimation,
}

/// Widget change or timer tick delivered to the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    Scatter(ScatterEvent),
    Regional(RegionalEvent),
    Heatmap(HeatmapEvent),
    TimeSeries(TimeSeriesEvent),
    GroupedBar(GroupedBarEvent),
    Map(MapEvent),
    BoxPlot(BoxPlotEvent),
    StackedArea(StackedAreaEvent),
    /// Animation timer fired
    Tick,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShellState {
    Active,
    Resetting,
}

/// Startup state every reset returns to
#[derive(Debug, Clone)]
pub struct ResetSnapshot {
    tabs: Tabs,
    animation: YearAnimation,
}

impl ResetSnapshot {
    pub fn tabs(&self) -> &Tabs {
        &self.tabs
    }

    pub fn animation(&self) -> &YearAnimation {
        &self.animation
    }
}

pub struct Dashboard {
    dataset: Dataset,
    config: DashboardConfig,
    tabs: Tabs,
    animation: YearAnimation,
    snapshot: ResetSnapshot,
    state: ShellState,
}

impl Dashboard {
    /// Build every tab; without boundaries the map uses the dataset's
    /// countries as shape-less regions
    pub fn new(
        dataset: Dataset,
        config: DashboardConfig,
        boundaries: Option<Boundaries>,
    ) -> Result<Self> {
        config.validate()?;

        let boundaries =
            Arc::new(boundaries.unwrap_or_else(|| Boundaries::from_names(dataset.countries())));
        let tabs = Tabs::build(&dataset, &config, boundaries)?;
        let animation = YearAnimation::new(
            dataset.min_year(),
            dataset.max_year(),
            config.animation_interval(),
        );
        let snapshot = ResetSnapshot {
            tabs: tabs.clone(),
            animation: animation.clone(),
        };

        info!(
            "Dashboard ready: {} tabs, {} charts",
            TabKind::ALL.len(),
            tabs.bindings().len()
        );

        Ok(Self {
            dataset,
            config,
            tabs,
            animation,
            snapshot,
            state: ShellState::Active,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn tabs(&self) -> &Tabs {
        &self.tabs
    }

    pub fn animation(&self) -> &YearAnimation {
        &self.animation
    }

    pub fn snapshot(&self) -> &ResetSnapshot {
        &self.snapshot
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    /// Apply one event and return the timer effects it produced
    pub fn handle(&mut self, event: DashboardEvent) -> Result<Vec<Effect>> {
        debug!("Event: {:?}", event);
        let dataset = &self.dataset;
        let tabs = &mut self.tabs;

        match event {
            DashboardEvent::Scatter(e) => tabs.scatter.apply(dataset, e)?,
            DashboardEvent::Regional(e) => tabs.regional.apply(dataset, e)?,
            DashboardEvent::Heatmap(e) => tabs.heatmap.apply(dataset, e)?,
            DashboardEvent::TimeSeries(e) => tabs.time_series.apply(dataset, e)?,
            DashboardEvent::GroupedBar(e) => tabs.grouped_bar.apply(dataset, e)?,
            DashboardEvent::BoxPlot(e) => tabs.box_plot.apply(dataset, e)?,
            DashboardEvent::StackedArea(e) => tabs.stacked_area.apply(dataset, e)?,
            DashboardEvent::Map(e) => return self.handle_map(e),
            DashboardEvent::Tick => return self.tick(),
            DashboardEvent::Reset => return Ok(self.reset()),
        }
        Ok(Vec::new())
    }

    fn handle_map(&mut self, event: MapEvent) -> Result<Vec<Effect>> {
        let effect = match event {
            MapEvent::Metric(metric) => {
                self.tabs.map.set_metric(&self.dataset, metric)?;
                None
            }
            MapEvent::Year(year) => {
                self.tabs.map.set_year(&self.dataset, year)?;
                None
            }
            MapEvent::Play => self.animation.start(),
            MapEvent::Stop => self.animation.stop(),
            MapEvent::TogglePlay => self.animation.toggle(),
            MapEvent::ResetAnimation => {
                let effect = self.animation.reset();
                self.tabs
                    .map
                    .set_year(&self.dataset, self.animation.first_year())?;
                effect
            }
        };
        Ok(effect.into_iter().collect())
    }

    /// Advance the map year by one animation step
    pub fn tick(&mut self) -> Result<Vec<Effect>> {
        match self.animation.tick(self.tabs.map.year()) {
            TickOutcome::Advanced(year) => {
                self.tabs.map.set_year(&self.dataset, year)?;
                Ok(Vec::new())
            }
            TickOutcome::Finished(_) => Ok(vec![Effect::CancelTimer]),
            TickOutcome::Idle => Ok(Vec::new()),
        }
    }

    /// Restore every tab and the animation from the snapshot in one step
    pub fn reset(&mut self) -> Vec<Effect> {
        self.state = ShellState::Resetting;
        let effects = match self.animation.state() {
            AnimationState::Running => vec![Effect::CancelTimer],
            AnimationState::Stopped => Vec::new(),
        };

        (self.tabs, self.animation) = (self.snapshot.tabs.clone(), self.snapshot.animation.clone());

        self.state = ShellState::Active;
        info!("Dashboard reset to startup state");
        effects
    }

    /// Serializable state of the selected tabs, all tabs when empty
    pub fn view(&self, kinds: &[TabKind]) -> DashboardView<'_> {
        let tabs = self
            .tabs
            .all()
            .into_iter()
            .filter(|tab| kinds.is_empty() || kinds.contains(&tab.kind()))
            .map(|tab| TabView {
                kind: tab.kind(),
                title: tab.kind().title(),
                bindings: tab.bindings(),
            })
            .collect();

        DashboardView {
            state: self.state,
            animation: &self.animation,
            play_button: self.animation.button_label(),
            tabs,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TabView<'a> {
    pub kind: TabKind,
    pub title: &'static str,
    pub bindings: Vec<&'a ChartBinding>,
}

#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    pub state: ShellState,
    pub animation: &'a YearAnimation,
    pub play_button: &'static str,
    pub tabs: Vec<TabView<'a>>,
}
