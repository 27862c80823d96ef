//! Employee roster panel: server-side search and filters, paginated table,
//! and the create/edit dialog.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{
    ARROWS_CLOCKWISE, FILE_XLS, MAGNIFYING_GLASS, PENCIL, PLUS, TRASH,
};

use super::app::{App, DeleteTarget};
use super::components::{self, colors};
use super::forms::EmployeeForm;

/// Render the employees panel. Returns true when the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let back = components::panel_header(ui, "Employees");

    show_toolbar(app, ui);
    ui.add_space(10.0);
    show_table(app, ui);
    show_form_dialog(app, ui.ctx());

    back
}

fn show_toolbar(app: &mut App, ui: &mut Ui) {
    ui.horizontal(|ui| {
        if components::primary_button_with_icon(ui, PLUS, "Add Employee").clicked() {
            app.employee_form = EmployeeForm::open_new();
        }
        if components::styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            let page = app.employees.current_page();
            app.load_employees(page);
        }
        if components::styled_button_with_icon(ui, FILE_XLS, "Export Page").clicked() {
            app.export_employees();
        }
    });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(MAGNIFYING_GLASS);
        let search = ui.add(
            egui::TextEdit::singleline(&mut app.employee_search)
                .desired_width(220.0)
                .hint_text("Search code or name"),
        );
        let submitted = search.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if components::styled_button(ui, "Search").clicked() || submitted {
            app.load_employees(1);
        }

        ui.add_space(10.0);

        let mut filter_changed = false;
        let dept_text = app
            .employee_department_filter
            .and_then(|id| app.department_options.iter().find(|d| d.id == id))
            .map(|d| d.name_en.clone())
            .unwrap_or_else(|| "All Departments".to_string());
        egui::ComboBox::from_id_salt("employee_department_filter")
            .width(170.0)
            .selected_text(dept_text)
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(app.employee_department_filter.is_none(), "All Departments")
                    .clicked()
                {
                    app.employee_department_filter = None;
                    filter_changed = true;
                }
                for dept in &app.department_options {
                    let selected = app.employee_department_filter == Some(dept.id);
                    if ui.selectable_label(selected, &dept.name_en).clicked() {
                        app.employee_department_filter = Some(dept.id);
                        filter_changed = true;
                    }
                }
            });

        let status_text = match app.employee_active_filter {
            None => "All Statuses",
            Some(true) => "Active",
            Some(false) => "Inactive",
        };
        egui::ComboBox::from_id_salt("employee_status_filter")
            .width(110.0)
            .selected_text(status_text)
            .show_ui(ui, |ui| {
                for (value, label) in [
                    (None, "All Statuses"),
                    (Some(true), "Active"),
                    (Some(false), "Inactive"),
                ] {
                    if ui
                        .selectable_label(app.employee_active_filter == value, label)
                        .clicked()
                    {
                        app.employee_active_filter = value;
                        filter_changed = true;
                    }
                }
            });

        if filter_changed {
            app.load_employees(1);
        }
    });
}

fn show_table(app: &mut App, ui: &mut Ui) {
    if app.employees.loading && app.employees.rows.is_empty() {
        components::loading_row(ui, "Loading employees...");
        return;
    }
    if app.employees.rows.is_empty() {
        components::empty_state(ui, "No employees found");
        return;
    }

    let mut edit_id = None;
    let mut delete_target = None;

    ScrollArea::vertical()
        .id_salt("employees_scroll")
        .show(ui, |ui| {
            egui::Grid::new("employees_grid")
                .num_columns(6)
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Code");
                    ui.strong("Name");
                    ui.strong("Job Title");
                    ui.strong("Department");
                    ui.strong("Status");
                    ui.strong("Actions");
                    ui.end_row();

                    for employee in &app.employees.rows {
                        ui.label(&employee.employee_code);
                        ui.label(&employee.name);
                        ui.label(employee.job_title.as_deref().unwrap_or("-"));
                        ui.label(employee.department.as_deref().unwrap_or("-"));
                        if employee.is_active {
                            ui.colored_label(colors::SUCCESS, "Active");
                        } else {
                            ui.colored_label(colors::NEUTRAL, "Inactive");
                        }
                        ui.horizontal(|ui| {
                            if components::action_button(ui, PENCIL, "Edit").clicked() {
                                edit_id = Some(employee.id);
                            }
                            if components::danger_action_button(ui, TRASH, "Delete").clicked() {
                                delete_target = Some(DeleteTarget::Employee(
                                    employee.id,
                                    employee.name.clone(),
                                ));
                            }
                        });
                        ui.end_row();
                    }
                });
        });

    ui.add_space(8.0);
    if let Some(page) = components::pagination_bar(ui, &app.employees.meta) {
        app.load_employees(page);
    }

    if let Some(id) = edit_id {
        app.open_employee_edit(id);
    }
    if let Some(target) = delete_target {
        app.request_delete(target);
    }
}

fn show_form_dialog(app: &mut App, ctx: &egui::Context) {
    if !app.employee_form.is_open {
        return;
    }

    let title = if app.employee_form.is_editing {
        "Edit Employee"
    } else {
        "New Employee"
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
            if app.employee_form.loading {
                components::loading_row(ui, "Loading record...");
                return;
            }
            if app.employee_form.missing {
                ui.colored_label(colors::ERROR, "This employee no longer exists.");
                ui.add_space(6.0);
                if components::styled_button(ui, "Close").clicked() {
                    cancel_clicked = true;
                }
                return;
            }

            egui::Grid::new("employee_form_grid")
                .num_columns(2)
                .spacing([12.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Code");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.employee_form.employee_code)
                            .desired_width(260.0),
                    );
                    ui.end_row();

                    ui.label("Name");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.employee_form.name)
                            .desired_width(260.0),
                    );
                    ui.end_row();

                    ui.label("Department");
                    let dept_text = app
                        .employee_form
                        .department_id
                        .and_then(|id| app.department_options.iter().find(|d| d.id == id))
                        .map(|d| d.name_en.clone())
                        .unwrap_or_else(|| "None".to_string());
                    egui::ComboBox::from_id_salt("employee_form_department")
                        .width(260.0)
                        .selected_text(dept_text)
                        .show_ui(ui, |ui| {
                            if ui
                                .selectable_label(
                                    app.employee_form.department_id.is_none(),
                                    "None",
                                )
                                .clicked()
                            {
                                app.employee_form.department_id = None;
                            }
                            for dept in &app.department_options {
                                let selected =
                                    app.employee_form.department_id == Some(dept.id);
                                if ui.selectable_label(selected, &dept.name_en).clicked() {
                                    app.employee_form.department_id = Some(dept.id);
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Job Title");
                    let title_text = app
                        .employee_form
                        .job_title_id
                        .and_then(|id| app.job_title_options.iter().find(|t| t.id == id))
                        .map(|t| t.name_en.clone())
                        .unwrap_or_else(|| "None".to_string());
                    egui::ComboBox::from_id_salt("employee_form_job_title")
                        .width(260.0)
                        .selected_text(title_text)
                        .show_ui(ui, |ui| {
                            if ui
                                .selectable_label(app.employee_form.job_title_id.is_none(), "None")
                                .clicked()
                            {
                                app.employee_form.job_title_id = None;
                            }
                            for job_title in &app.job_title_options {
                                let selected =
                                    app.employee_form.job_title_id == Some(job_title.id);
                                if ui.selectable_label(selected, &job_title.name_en).clicked() {
                                    app.employee_form.job_title_id = Some(job_title.id);
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Active");
                    ui.checkbox(&mut app.employee_form.is_active, "");
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
        submit_employee(app);
    }
    if cancel_clicked {
        app.employee_form.reset();
    }
}

fn submit_employee(app: &mut App) {
    match app.employee_form.validate() {
        Ok(payload) => {
            let id = if app.employee_form.is_editing {
                app.employee_form.id
            } else {
                None
            };
            app.save_employee(id, payload);
        }
        Err(message) => app.notify_error(message),
    }
}
