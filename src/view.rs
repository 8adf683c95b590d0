//! Presentation-ready view models.
//!
//! Everything here is computed from a [`Dataset`] without touching egui, so
//! the `ui` module only has to draw what it is handed.

use crate::config::{RankingConfig, TrendConfig};
use crate::data::model::Dataset;
use crate::data::projection::{
    country_series, rank_latest_year, ProjectionError, SeriesFields, SeriesPoint,
};

// ---------------------------------------------------------------------------
// Ranking bar chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BarView {
    pub label: String,
    pub value: f64,
    /// Position in the bar palette.
    pub color_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChartView {
    pub title: String,
    pub dataset_label: String,
    pub value_axis_title: String,
    /// Highest ranked first.
    pub bars: Vec<BarView>,
}

pub fn build_ranking_view(
    dataset: &Dataset,
    config: &RankingConfig,
) -> Result<BarChartView, ProjectionError> {
    let ranking = rank_latest_year(dataset, config.top_n)?;
    let year = &ranking.year_column;
    let score = &config.score_label;

    let bars = ranking
        .entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| BarView {
            label: entry.label,
            value: entry.value,
            color_index: i,
        })
        .collect();

    Ok(BarChartView {
        title: format!("Top {} {score} Scores ({year})", config.top_n),
        dataset_label: format!("{score} Score ({year})"),
        value_axis_title: format!("{score} Score"),
        bars,
    })
}

// ---------------------------------------------------------------------------
// Trend line chart
// ---------------------------------------------------------------------------

/// Current choices of the trend selectors. `None` means "not selected".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSelection {
    pub metric: Option<String>,
    pub country1: Option<String>,
    pub country2: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesView {
    pub label: String,
    pub points: Vec<SeriesPoint>,
    /// Position in the line palette (0 for the first country, 1 for the second).
    pub color_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendChartView {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    /// Only countries that have data appear here.
    pub series: Vec<SeriesView>,
}

pub fn build_trend_view(
    dataset: &Dataset,
    config: &TrendConfig,
    selection: &TrendSelection,
) -> Result<TrendChartView, ProjectionError> {
    let (Some(metric), Some(first)) = (&selection.metric, &selection.country1) else {
        return Err(ProjectionError::NoSelection);
    };

    let fields = SeriesFields {
        country: &config.country_field,
        year: &config.year_field,
    };

    let series = [Some(first), selection.country2.as_ref()]
        .into_iter()
        .enumerate()
        .filter_map(|(i, country)| {
            let country = country?;
            let points = country_series(dataset, fields, country, metric);
            if points.is_empty() {
                log::debug!("No {metric} data for {country}");
                return None;
            }
            Some(SeriesView {
                label: country.clone(),
                points,
                color_index: i,
            })
        })
        .collect();

    let (title, y_axis_title) = match config.metric(metric) {
        Some(descriptor) => (descriptor.label.clone(), descriptor.y_title.clone()),
        None => (metric.clone(), metric.clone()),
    };

    Ok(TrendChartView {
        title,
        x_axis_title: "Year".to_string(),
        y_axis_title,
        series,
    })
}

// ---------------------------------------------------------------------------
// Raw data table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<String>,
    /// Cell text per row, aligned with `headers`. Nulls are blank.
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let rows = dataset
            .rows
            .iter()
            .map(|row| {
                dataset
                    .columns
                    .iter()
                    .map(|c| row.get(c).to_string())
                    .collect()
            })
            .collect();
        TableView {
            headers: dataset.columns.clone(),
            rows,
        }
    }
}

// ---------------------------------------------------------------------------
// Chart slot – owns the chart currently bound to one display surface
// ---------------------------------------------------------------------------

/// Holds at most one chart for a surface.
///
/// Replacing drops the previous chart before the new one is stored, and
/// bumps the generation so the plot widget starts from fresh state.
#[derive(Debug)]
pub struct ChartSlot<V> {
    name: &'static str,
    current: Option<V>,
    generation: u64,
}

impl<V> ChartSlot<V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            current: None,
            generation: 0,
        }
    }

    /// Dispose the current chart (if any), then install `chart`.
    pub fn replace(&mut self, chart: V) {
        self.dispose();
        self.generation += 1;
        self.current = Some(chart);
    }

    /// Release the current chart, leaving the surface empty.
    pub fn dispose(&mut self) {
        if let Some(old) = self.current.take() {
            drop(old);
            log::debug!("Disposed {} chart #{}", self.name, self.generation);
        }
    }

    pub fn current(&self) -> Option<&V> {
        self.current.as_ref()
    }

    /// Identifies the chart instance; changes on every `replace`.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
