use crate::config::{DashboardConfig, RankingConfig, TrendConfig};
use crate::data::loader::{load_resource, ResourceFetcher};
use crate::data::model::Dataset;
use crate::data::projection::{distinct_values, ProjectionError};
use crate::view::{
    build_ranking_view, build_trend_view, BarChartView, ChartSlot, TableView, TrendChartView,
    TrendSelection,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Ranking,
    Trends,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,
    /// Dashboard currently shown.
    pub tab: Tab,
    pub ranking: RankingDashboard,
    pub trends: TrendDashboard,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            tab: Tab::Ranking,
            ranking: RankingDashboard::default(),
            trends: TrendDashboard::default(),
        }
    }

    /// Startup load of both dashboards' named resources.
    pub fn load_initial(&mut self, fetcher: &dyn ResourceFetcher) {
        let resource = self.config.ranking.resource.clone();
        match load_resource(fetcher, &resource) {
            Ok(dataset) => self.ranking.set_dataset(dataset, &self.config.ranking),
            Err(e) => self.ranking.load_failed(&resource, &e),
        }

        let resource = self.config.trends.resource.clone();
        match load_resource(fetcher, &resource) {
            Ok(dataset) => self.trends.set_dataset(dataset, &self.config.trends),
            Err(e) => self.trends.load_failed(&resource, &e),
        }
    }

    /// Replace the active dashboard's dataset with a user-picked one.
    pub fn set_active_dataset(&mut self, dataset: Dataset) {
        match self.tab {
            Tab::Ranking => self.ranking.set_dataset(dataset, &self.config.ranking),
            Tab::Trends => self.trends.set_dataset(dataset, &self.config.trends),
        }
    }

    /// Report a failed user-initiated load on the active dashboard.
    pub fn active_load_failed(&mut self, source: &str, error: &anyhow::Error) {
        match self.tab {
            Tab::Ranking => self.ranking.load_failed(source, error),
            Tab::Trends => self.trends.load_failed(source, error),
        }
    }

    /// Re-project the trend chart after a selector change.
    pub fn refresh_trends(&mut self) {
        self.trends.refresh(&self.config.trends);
    }
}

fn load_failure_message(source: &str, error: &anyhow::Error) -> String {
    log::error!("Failed to load {source}: {error:#}");
    format!("Failed to load {source}: {error:#}")
}

// ---------------------------------------------------------------------------
// Ranking dashboard
// ---------------------------------------------------------------------------

/// Canonical dataset plus the bar chart and table derived from it.
pub struct RankingDashboard {
    /// Canonical row sequence; replaced wholesale on load.
    pub dataset: Dataset,
    pub chart: ChartSlot<BarChartView>,
    pub table: Option<TableView>,
    /// Status / error message shown in place of the chart.
    pub status_message: Option<String>,
    /// Whether the initial load has not finished yet.
    pub loading: bool,
}

impl Default for RankingDashboard {
    fn default() -> Self {
        Self {
            dataset: Dataset::default(),
            chart: ChartSlot::new("ranking"),
            table: None,
            status_message: None,
            loading: true,
        }
    }
}

impl RankingDashboard {
    /// Ingest a newly loaded dataset and render chart and table from it.
    pub fn set_dataset(&mut self, dataset: Dataset, config: &RankingConfig) {
        self.chart.dispose();
        self.table = (!dataset.is_empty()).then(|| TableView::from_dataset(&dataset));
        self.dataset = dataset;
        self.loading = false;
        self.render(config);
    }

    pub fn load_failed(&mut self, source: &str, error: &anyhow::Error) {
        self.status_message = Some(load_failure_message(source, error));
        self.loading = false;
    }

    /// Project the ranking; failures leave the chart untouched.
    pub fn render(&mut self, config: &RankingConfig) {
        match build_ranking_view(&self.dataset, config) {
            Ok(view) => {
                log::info!("{}: {} bars", view.title, view.bars.len());
                self.chart.replace(view);
                self.status_message = None;
            }
            Err(e) => self.show_error(e),
        }
    }

    fn show_error(&mut self, error: ProjectionError) {
        log::warn!("Ranking not rendered: {error}");
        self.status_message = Some(error.to_string());
    }
}

// ---------------------------------------------------------------------------
// Trend dashboard
// ---------------------------------------------------------------------------

/// Canonical dataset, selector state and the line chart derived from them.
pub struct TrendDashboard {
    /// Canonical row sequence; replaced wholesale on load.
    pub dataset: Dataset,
    /// Choices offered by both country selectors.
    pub countries: Vec<String>,
    pub selection: TrendSelection,
    pub chart: ChartSlot<TrendChartView>,
    pub status_message: Option<String>,
    pub loading: bool,
}

impl Default for TrendDashboard {
    fn default() -> Self {
        Self {
            dataset: Dataset::default(),
            countries: Vec::new(),
            selection: TrendSelection::default(),
            chart: ChartSlot::new("trends"),
            status_message: None,
            loading: true,
        }
    }
}

impl TrendDashboard {
    /// Ingest a newly loaded dataset: fill selectors, reset the selection.
    pub fn set_dataset(&mut self, dataset: Dataset, config: &TrendConfig) {
        self.chart.dispose();
        self.countries = distinct_values(&dataset, &config.country_field);
        self.selection = TrendSelection::default();
        self.dataset = dataset;
        self.loading = false;
        log::info!("{} countries available for trends", self.countries.len());

        if self.dataset.is_empty() {
            self.status_message = Some(ProjectionError::EmptyDataset.to_string());
        } else {
            self.refresh(config);
        }
    }

    pub fn load_failed(&mut self, source: &str, error: &anyhow::Error) {
        self.status_message = Some(load_failure_message(source, error));
        self.loading = false;
    }

    /// Re-project for the current selection. An incomplete selection only
    /// updates the prompt; the previous chart stays in place.
    pub fn refresh(&mut self, config: &TrendConfig) {
        match build_trend_view(&self.dataset, config, &self.selection) {
            Ok(view) => {
                log::debug!("{}: {} series", view.title, view.series.len());
                self.chart.replace(view);
                self.status_message = None;
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }
}
