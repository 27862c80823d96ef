//! Shared panel for the two catalog collections, departments and job titles.
//! Both carry the same bilingual shape, so one table and one dialog serve
//! either; `CatalogKind` picks the collection.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, MAGNIFYING_GLASS, PENCIL, PLUS, TRASH};

use super::app::{App, CatalogKind, DeleteTarget};
use super::components::{self, colors};
use super::forms::CatalogForm;

struct CatalogRow {
    id: i64,
    name_en: String,
    name_ar: String,
    description: String,
    created: String,
}

/// Render the catalog panel. Returns true when the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui, kind: CatalogKind) -> bool {
    let back = components::panel_header(ui, kind.title());

    show_toolbar(app, ui, kind);
    ui.add_space(10.0);
    show_table(app, ui, kind);
    show_form_dialog(app, ui.ctx(), kind);

    back
}

fn reload(app: &mut App, kind: CatalogKind, page: u32) {
    match kind {
        CatalogKind::Departments => app.load_departments(page),
        CatalogKind::JobTitles => app.load_job_titles(page),
    }
}

fn show_toolbar(app: &mut App, ui: &mut Ui, kind: CatalogKind) {
    ui.horizontal(|ui| {
        let add_label = format!("Add {}", kind.singular());
        if components::primary_button_with_icon(ui, PLUS, &add_label).clicked() {
            app.catalog_form = CatalogForm::open_new();
        }
        if components::styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            let page = match kind {
                CatalogKind::Departments => app.departments.current_page(),
                CatalogKind::JobTitles => app.job_titles.current_page(),
            };
            reload(app, kind, page);
        }

        ui.add_space(10.0);
        ui.label(MAGNIFYING_GLASS);
        let response = match kind {
            CatalogKind::Departments => ui.add(
                egui::TextEdit::singleline(&mut app.department_search)
                    .desired_width(220.0)
                    .hint_text("Search name"),
            ),
            CatalogKind::JobTitles => ui.add(
                egui::TextEdit::singleline(&mut app.job_title_search)
                    .desired_width(220.0)
                    .hint_text("Search name"),
            ),
        };
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if components::styled_button(ui, "Search").clicked() || submitted {
            reload(app, kind, 1);
        }
    });
}

fn show_table(app: &mut App, ui: &mut Ui, kind: CatalogKind) {
    let (loading, rows): (bool, Vec<CatalogRow>) = match kind {
        CatalogKind::Departments => (
            app.departments.loading,
            app.departments
                .rows
                .iter()
                .map(|d| CatalogRow {
                    id: d.id,
                    name_en: d.name_en.clone(),
                    name_ar: d.name_ar.clone(),
                    description: d
                        .description_en
                        .clone()
                        .or_else(|| d.description_ar.clone())
                        .unwrap_or_else(|| "-".to_string()),
                    created: d.created_at.format("%Y-%m-%d").to_string(),
                })
                .collect(),
        ),
        CatalogKind::JobTitles => (
            app.job_titles.loading,
            app.job_titles
                .rows
                .iter()
                .map(|t| CatalogRow {
                    id: t.id,
                    name_en: t.name_en.clone(),
                    name_ar: t.name_ar.clone(),
                    description: t
                        .description_en
                        .clone()
                        .or_else(|| t.description_ar.clone())
                        .unwrap_or_else(|| "-".to_string()),
                    created: t.created_at.format("%Y-%m-%d").to_string(),
                })
                .collect(),
        ),
    };

    if loading && rows.is_empty() {
        components::loading_row(ui, "Loading...");
        return;
    }
    if rows.is_empty() {
        let message = format!("No {} found", kind.title().to_lowercase());
        components::empty_state(ui, &message);
        return;
    }

    let mut edit_id = None;
    let mut delete_target = None;

    ScrollArea::vertical()
        .id_salt("catalog_scroll")
        .show(ui, |ui| {
            egui::Grid::new("catalog_grid")
                .num_columns(5)
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Name (English)");
                    ui.strong("Name (Arabic)");
                    ui.strong("Description");
                    ui.strong("Created");
                    ui.strong("Actions");
                    ui.end_row();

                    for row in &rows {
                        ui.label(&row.name_en);
                        ui.label(&row.name_ar);
                        ui.label(&row.description);
                        ui.label(&row.created);
                        ui.horizontal(|ui| {
                            if components::action_button(ui, PENCIL, "Edit").clicked() {
                                edit_id = Some(row.id);
                            }
                            if components::danger_action_button(ui, TRASH, "Delete").clicked() {
                                delete_target = Some(match kind {
                                    CatalogKind::Departments => {
                                        DeleteTarget::Department(row.id, row.name_en.clone())
                                    }
                                    CatalogKind::JobTitles => {
                                        DeleteTarget::JobTitle(row.id, row.name_en.clone())
                                    }
                                });
                            }
                        });
                        ui.end_row();
                    }
                });
        });

    ui.add_space(8.0);
    let meta = match kind {
        CatalogKind::Departments => app.departments.meta,
        CatalogKind::JobTitles => app.job_titles.meta,
    };
    if let Some(page) = components::pagination_bar(ui, &meta) {
        reload(app, kind, page);
    }

    if let Some(id) = edit_id {
        app.open_catalog_edit(kind, id);
    }
    if let Some(target) = delete_target {
        app.request_delete(target);
    }
}

fn show_form_dialog(app: &mut App, ctx: &egui::Context, kind: CatalogKind) {
    if !app.catalog_form.is_open {
        return;
    }

    let title = if app.catalog_form.is_editing {
        format!("Edit {}", kind.singular())
    } else {
        format!("New {}", kind.singular())
    };
    let mut save_clicked = false;
    let mut cancel_clicked = false;

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .default_width(450.0)
        .max_height(500.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if app.catalog_form.loading {
                components::loading_row(ui, "Loading record...");
                return;
            }
            if app.catalog_form.missing {
                let gone = format!("This {} no longer exists.", kind.singular().to_lowercase());
                ui.colored_label(colors::ERROR, gone);
                ui.add_space(6.0);
                if components::styled_button(ui, "Close").clicked() {
                    cancel_clicked = true;
                }
                return;
            }

            egui::Grid::new("catalog_form_grid")
                .num_columns(2)
                .spacing([12.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Name (English)");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.catalog_form.name_en)
                            .desired_width(260.0),
                    );
                    ui.end_row();

                    ui.label("Name (Arabic)");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.catalog_form.name_ar)
                            .desired_width(260.0),
                    );
                    ui.end_row();

                    ui.label("Description (English)");
                    ui.add(
                        egui::TextEdit::multiline(&mut app.catalog_form.description_en)
                            .desired_width(260.0)
                            .desired_rows(2),
                    );
                    ui.end_row();

                    ui.label("Description (Arabic)");
                    ui.add(
                        egui::TextEdit::multiline(&mut app.catalog_form.description_ar)
                            .desired_width(260.0)
                            .desired_rows(2),
                    );
                    ui.end_row();
                });

            ui.add_space(10.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if components::primary_button_with_icon(ui, "", "Save").clicked() {
                    save_clicked = true;
                }
                if components::styled_button(ui, "Cancel").clicked() {
                    cancel_clicked = true;
                }
            });
        });

    if save_clicked {
        submit_catalog(app, kind);
    }
    if cancel_clicked {
        app.catalog_form.reset();
    }
}

fn submit_catalog(app: &mut App, kind: CatalogKind) {
    match app.catalog_form.validate() {
        Ok(payload) => {
            let id = if app.catalog_form.is_editing {
                app.catalog_form.id
            } else {
                None
            };
            app.save_catalog(kind, id, payload);
        }
        Err(message) => app.notify_error(message),
    }
}
