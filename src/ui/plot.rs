use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{
    palette_color, with_alpha, BAR_FILL_ALPHA, BAR_PALETTE, LINE_FILL_ALPHA, LINE_PALETTE,
};
use crate::state::{RankingDashboard, TrendDashboard};

const CHART_HEIGHT: f32 = 420.0;

// ---------------------------------------------------------------------------
// Shared status line
// ---------------------------------------------------------------------------

/// Loading / status line above a chart. Returns `false` while loading.
fn status_line(ui: &mut Ui, loading: bool, message: Option<&str>) -> bool {
    if loading {
        ui.horizontal(|ui: &mut Ui| {
            ui.spinner();
            ui.label("Loading…");
        });
        return false;
    }
    if let Some(msg) = message {
        ui.label(RichText::new(msg).color(Color32::LIGHT_RED).size(16.0));
    }
    true
}

/// Show only whole-number tick labels.
fn integer_ticks(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    if (mark.value - mark.value.round()).abs() < 1e-6 {
        format!("{:.0}", mark.value)
    } else {
        String::new()
    }
}

/// Hover text of a ranking bar: the bare value.
fn bar_tooltip(bar: &Bar) -> String {
    bar.value.to_string()
}

// ---------------------------------------------------------------------------
// Ranking bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render the horizontal top-N bar chart.
pub fn ranking_chart(ui: &mut Ui, dashboard: &RankingDashboard) {
    if !status_line(ui, dashboard.loading, dashboard.status_message.as_deref()) {
        return;
    }
    let Some(view) = dashboard.chart.current() else {
        return;
    };

    ui.heading(RichText::new(&view.title).strong());

    // Highest rank at the top: bar i sits at y = n - 1 - i.
    let n = view.bars.len();
    let labels: Vec<String> = view.bars.iter().rev().map(|b| b.label.clone()).collect();

    let bars: Vec<Bar> = view
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let color = palette_color(&BAR_PALETTE, bar.color_index);
            Bar::new((n - 1 - i) as f64, bar.value)
                .name(&bar.label)
                .fill(with_alpha(color, BAR_FILL_ALPHA))
                .stroke((2.0, color))
                .width(0.7)
        })
        .collect();

    let chart = BarChart::new(bars)
        .name(&view.dataset_label)
        .horizontal()
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| bar_tooltip(bar)));

    Plot::new(("ranking_chart", dashboard.chart.generation()))
        .height(CHART_HEIGHT)
        .x_axis_label(view.value_axis_title.as_str())
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

// ---------------------------------------------------------------------------
// Trend line chart (central panel)
// ---------------------------------------------------------------------------

/// Render the per-country line chart for the selected metric.
pub fn trend_chart(ui: &mut Ui, dashboard: &TrendDashboard) {
    if !status_line(ui, dashboard.loading, dashboard.status_message.as_deref()) {
        return;
    }
    let Some(view) = dashboard.chart.current() else {
        return;
    };

    ui.heading(RichText::new(&view.title).strong());
    if view.series.is_empty() {
        ui.label("No data for the selected countries.");
    }

    Plot::new(("trend_chart", dashboard.chart.generation()))
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(view.x_axis_title.as_str())
        .y_axis_label(view.y_axis_title.as_str())
        .x_axis_formatter(integer_ticks)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &view.series {
                let color = palette_color(&LINE_PALETTE, series.color_index);
                let points: Vec<[f64; 2]> = series
                    .points
                    .iter()
                    .map(|p| [p.year as f64, p.value])
                    .collect();

                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(&series.label)
                        .color(color)
                        .width(3.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(&series.label)
                        .color(with_alpha(color, LINE_FILL_ALPHA))
                        .radius(4.0),
                );
            }
        });
}
