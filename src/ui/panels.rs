use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – selectors
// ---------------------------------------------------------------------------

/// Render the left panel for the active dashboard.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    match state.tab {
        Tab::Ranking => ranking_summary(ui, state),
        Tab::Trends => trend_selectors(ui, state),
    }
}

fn ranking_summary(ui: &mut Ui, state: &AppState) {
    ui.heading("Hunger Index");
    ui.separator();

    let dashboard = &state.ranking;
    if dashboard.dataset.is_empty() {
        ui.label("No dataset loaded.");
        return;
    }
    ui.label(format!("Source: {}", state.config.ranking.resource));
    ui.label(format!("{} countries", dashboard.dataset.len()));
    ui.label(format!("Showing the top {}", state.config.ranking.top_n));
}

fn trend_selectors(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Trends");
    ui.separator();

    let config = &state.config.trends;
    let dashboard = &mut state.trends;
    let mut changed = false;

    // ---- Metric selector ----
    ui.strong("Metric");
    let metric_text = dashboard
        .selection
        .metric
        .as_deref()
        .and_then(|key| config.metric(key))
        .map(|m| m.label.clone())
        .unwrap_or_else(|| "Select Metric".to_string());
    egui::ComboBox::from_id_salt("metric")
        .selected_text(metric_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for metric in &config.metrics {
                changed |= ui
                    .selectable_value(
                        &mut dashboard.selection.metric,
                        Some(metric.key.clone()),
                        &metric.label,
                    )
                    .changed();
            }
        });
    ui.add_space(8.0);

    // ---- Country selectors ----
    let countries = &dashboard.countries;
    changed |= country_selector(
        ui,
        "country1",
        "Country 1",
        countries,
        &mut dashboard.selection.country1,
    );
    ui.add_space(8.0);
    changed |= country_selector(
        ui,
        "country2",
        "Country 2",
        countries,
        &mut dashboard.selection.country2,
    );

    if changed {
        state.refresh_trends();
    }
}

/// A country dropdown with an empty "Select Country" choice.
/// Returns whether the selection changed.
fn country_selector(
    ui: &mut Ui,
    id: &str,
    heading: &str,
    countries: &[String],
    selected: &mut Option<String>,
) -> bool {
    let mut changed = false;
    ui.strong(heading);
    let current = selected.clone().unwrap_or_else(|| "Select Country".to_string());
    egui::ComboBox::from_id_salt(id)
        .selected_text(current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            changed |= ui.selectable_value(selected, None, "Select Country").changed();
            for country in countries {
                changed |= ui
                    .selectable_value(selected, Some(country.clone()), country)
                    .changed();
            }
        });
    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.tab, Tab::Ranking, "Hunger Index Ranking");
        ui.selectable_value(&mut state.tab, Tab::Trends, "Country Trends");

        ui.separator();

        let rows = match state.tab {
            Tab::Ranking => state.ranking.dataset.len(),
            Tab::Trends => state.trends.dataset.len(),
        };
        ui.label(RichText::new(format!("{rows} rows loaded")).color(Color32::GRAY));
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Pick a CSV file and load it into the active dashboard.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dashboard data")
        .add_filter("CSV", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows with columns {:?} from {}",
                    dataset.len(),
                    dataset.columns,
                    path.display()
                );
                state.set_active_dataset(dataset);
            }
            Err(e) => state.active_load_failed(&path.display().to_string(), &e),
        }
    }
}
