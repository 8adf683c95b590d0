use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::view::TableView;

const ROW_HEIGHT: f32 = 18.0;

/// Render the full dataset as a striped, scrollable table.
pub fn data_table(ui: &mut Ui, table: &TableView) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0), table.headers.len())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for name in &table.headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, table.rows.len(), |mut row| {
                let cells = &table.rows[row.index()];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
