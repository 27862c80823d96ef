//! Settings panel for server, interface, and export configuration.

use eframe::egui::{self, RichText};

use super::app::App;
use super::components::{colors, panel_header};

/// Show the settings panel.
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut egui::Ui) -> bool {
    let go_back = panel_header(ui, "Settings");

    egui::ScrollArea::vertical().show(ui, |ui| {
        // Server
        ui.group(|ui| {
            ui.heading("Server");
            ui.add_space(5.0);

            egui::Grid::new("server_settings_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Server URL:");
                    if ui
                        .add(
                            egui::TextEdit::singleline(&mut app.config.server.base_url)
                                .desired_width(280.0)
                                .hint_text("http://localhost:8000"),
                        )
                        .changed()
                    {
                        app.config_modified = true;
                        app.server_test_status = None; // Reset status on change
                    }
                    ui.end_row();

                    ui.label("Timeout (seconds):");
                    let mut timeout_str = app.config.server.timeout_secs.to_string();
                    if ui
                        .add(egui::TextEdit::singleline(&mut timeout_str).desired_width(60.0))
                        .changed()
                        && let Ok(timeout) = timeout_str.parse()
                    {
                        app.config.server.timeout_secs = timeout;
                        app.config_modified = true;
                    }
                    ui.end_row();
                });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                if ui.button("Test Connection").clicked() {
                    app.test_server_connection();
                }

                // Inline status indicator
                if app.server_testing {
                    ui.spinner();
                    ui.label("Testing...");
                } else {
                    match &app.server_test_status {
                        Some(Ok(())) => {
                            ui.label(RichText::new("Connected").color(colors::SUCCESS));
                        }
                        Some(Err(e)) => {
                            ui.label(RichText::new(format!("Failed: {e}")).color(colors::ERROR));
                        }
                        None => {}
                    }
                }
            });
        });

        ui.add_space(15.0);

        // Interface
        ui.group(|ui| {
            ui.heading("Interface");
            ui.add_space(5.0);

            if ui
                .checkbox(&mut app.config.ui.start_maximized, "Start maximized")
                .changed()
            {
                app.config_modified = true;
            }

            egui::Grid::new("ui_settings_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Rows per page:");
                    let mut rows_str = app.config.ui.rows_per_page_hint.to_string();
                    if ui
                        .add(egui::TextEdit::singleline(&mut rows_str).desired_width(60.0))
                        .changed()
                        && let Ok(rows) = rows_str.parse()
                    {
                        app.config.ui.rows_per_page_hint = rows;
                        app.config_modified = true;
                    }
                    ui.end_row();
                });
        });

        ui.add_space(15.0);

        // Export
        ui.group(|ui| {
            ui.heading("Export");
            ui.add_space(5.0);

            egui::Grid::new("export_settings_grid")
                .num_columns(3)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Default folder:");
                    if ui
                        .add(
                            egui::TextEdit::singleline(&mut app.config.export.default_dir)
                                .desired_width(280.0),
                        )
                        .changed()
                    {
                        app.config_modified = true;
                    }
                    if ui.button("Browse...").clicked()
                        && let Some(dir) =
                            crate::export::show_folder_dialog(&app.config.export.default_dir)
                    {
                        app.config.export.default_dir = dir.display().to_string();
                        app.config_modified = true;
                    }
                    ui.end_row();
                });

            ui.weak("Save dialogs start in this folder when it is set.");
        });

        ui.add_space(20.0);

        // Action buttons
        ui.horizontal(|ui| {
            let save_btn = egui::Button::new("Save Settings");
            if ui.add_enabled(app.config_modified, save_btn).clicked() {
                match app.config.validate() {
                    Ok(()) => app.save_config(),
                    Err(e) => app.notify_error(e.to_string()),
                }
            }

            if app.config_modified {
                ui.label(RichText::new("(unsaved changes)").color(colors::WARNING).italics());
            }

            if ui.button("Reset to Defaults").clicked() {
                app.config = crate::config::AppConfig::default();
                app.config_modified = true;
                app.server_test_status = None;
            }
        });

        ui.add_space(10.0);
        ui.weak(format!("Config file: {}", app.config_path.display()));
    });

    go_back
}
