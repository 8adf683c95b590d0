/// egui adapters: draw the view models held in [`crate::state::AppState`].
pub mod panels;
pub mod plot;
pub mod table;
