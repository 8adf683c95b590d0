use eframe::egui::{self, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::data::loader::FsFetcher;
use crate::state::{AppState, Tab};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HungerDashApp {
    pub state: AppState,
}

impl HungerDashApp {
    /// Build the app and run the startup load of both dashboards.
    pub fn new(config: DashboardConfig) -> Self {
        let fetcher = FsFetcher::new(config.data_dir.clone());
        let mut state = AppState::new(config);
        state.load_initial(&fetcher);
        Self { state }
    }
}

impl eframe::App for HungerDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + dashboard tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selectors ----
        egui::SidePanel::left("selector_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart (+ table) ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.tab {
            Tab::Ranking => {
                plot::ranking_chart(ui, &self.state.ranking);
                if let Some(view) = &self.state.ranking.table {
                    ui.separator();
                    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
                        table::data_table(ui, view);
                    });
                }
            }
            Tab::Trends => plot::trend_chart(ui, &self.state.trends),
        });
    }
}
