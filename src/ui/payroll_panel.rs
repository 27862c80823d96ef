//! Payroll panel with two tabs: salary structures and payslips.
//!
//! Payslips are generated server-side for a whole pay period and only move
//! from Generated to Paid; there is no per-payslip editing or deletion.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CHECK, MAGNIFYING_GLASS, PENCIL, PLUS, TRASH};

use crate::models::payroll::PayslipStatus;

use super::app::{App, DeleteTarget, PayrollTab};
use super::components::{self, colors};
use super::forms::{self, SalaryForm};

/// Render the payroll panel. Returns true when the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let back = components::panel_header(ui, "Payroll");

    ui.horizontal(|ui| {
        if ui
            .selectable_label(app.payroll_tab == PayrollTab::Salaries, "Salaries")
            .clicked()
        {
            app.payroll_tab = PayrollTab::Salaries;
        }
        if ui
            .selectable_label(app.payroll_tab == PayrollTab::Payslips, "Payslips")
            .clicked()
        {
            app.payroll_tab = PayrollTab::Payslips;
        }
    });
    ui.separator();
    ui.add_space(6.0);

    match app.payroll_tab {
        PayrollTab::Salaries => show_salaries_tab(app, ui),
        PayrollTab::Payslips => show_payslips_tab(app, ui),
    }

    show_salary_dialog(app, ui.ctx());
    show_generate_dialog(app, ui.ctx());

    back
}

// ========== Salaries tab ==========

fn show_salaries_tab(app: &mut App, ui: &mut Ui) {
    ui.horizontal(|ui| {
        if components::primary_button_with_icon(ui, PLUS, "Add Salary").clicked() {
            app.salary_form = SalaryForm::open_new();
        }
        if components::styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            let page = app.salaries.current_page();
            app.load_salaries(page);
        }

        ui.add_space(10.0);
        ui.label(MAGNIFYING_GLASS);
        let search = ui.add(
            egui::TextEdit::singleline(&mut app.salary_search)
                .desired_width(180.0)
                .hint_text("Search employee"),
        );
        let submitted = search.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if components::styled_button(ui, "Search").clicked() || submitted {
            app.load_salaries(1);
        }
    });
    ui.add_space(10.0);

    if app.salaries.loading && app.salaries.rows.is_empty() {
        components::loading_row(ui, "Loading salaries...");
        return;
    }
    if app.salaries.rows.is_empty() {
        components::empty_state(ui, "No salary records found");
        return;
    }

    let mut edit_id = None;
    let mut delete_target = None;

    ScrollArea::vertical()
        .id_salt("salaries_scroll")
        .show(ui, |ui| {
            egui::Grid::new("salaries_grid")
                .num_columns(9)
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Employee");
                    ui.strong("Base");
                    ui.strong("Housing");
                    ui.strong("Transport");
                    ui.strong("Insurance");
                    ui.strong("Gross");
                    ui.strong("Net");
                    ui.strong("Effective");
                    ui.strong("Actions");
                    ui.end_row();

                    for salary in &app.salaries.rows {
                        ui.label(&salary.employee_name);
                        ui.label(format!("{:.2}", salary.base_salary));
                        ui.label(format!("{:.2}", salary.housing_allowance));
                        ui.label(format!("{:.2}", salary.transport_allowance));
                        ui.label(format!("{:.2}", salary.social_insurance));
                        ui.label(format!("{:.2}", salary.gross()));
                        ui.strong(format!("{:.2}", salary.net()));
                        ui.label(salary.effective_date.format("%Y-%m-%d").to_string());
                        ui.horizontal(|ui| {
                            if components::action_button(ui, PENCIL, "Edit").clicked() {
                                edit_id = Some(salary.id);
                            }
                            if components::danger_action_button(ui, TRASH, "Delete").clicked() {
                                delete_target = Some(DeleteTarget::Salary(
                                    salary.id,
                                    salary.employee_name.clone(),
                                ));
                            }
                        });
                        ui.end_row();
                    }
                });
        });

    ui.add_space(8.0);
    if let Some(page) = components::pagination_bar(ui, &app.salaries.meta) {
        app.load_salaries(page);
    }

    if let Some(id) = edit_id {
        app.open_salary_edit(id);
    }
    if let Some(target) = delete_target {
        app.request_delete(target);
    }
}

// ========== Payslips tab ==========

fn show_payslips_tab(app: &mut App, ui: &mut Ui) {
    ui.horizontal(|ui| {
        if components::primary_button_with_icon(ui, PLUS, "Generate Payslips").clicked() {
            app.generate_dialog_open = true;
        }
        if components::styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            let page = app.payslips.current_page();
            app.load_payslips(page);
        }

        ui.add_space(10.0);
        ui.label("Period:");
        let period = ui.add(
            egui::TextEdit::singleline(&mut app.payslip_period_filter)
                .desired_width(80.0)
                .hint_text("YYYY-MM"),
        );
        if period.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            app.load_payslips(1);
        }

        let mut filter_changed = false;
        let status_text = app
            .payslip_status_filter
            .map(|s| s.label())
            .unwrap_or("All Statuses");
        egui::ComboBox::from_id_salt("payslip_status_filter")
            .width(120.0)
            .selected_text(status_text)
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(app.payslip_status_filter.is_none(), "All Statuses")
                    .clicked()
                {
                    app.payslip_status_filter = None;
                    filter_changed = true;
                }
                for status in [PayslipStatus::Generated, PayslipStatus::Paid] {
                    if ui
                        .selectable_label(app.payslip_status_filter == Some(status), status.label())
                        .clicked()
                    {
                        app.payslip_status_filter = Some(status);
                        filter_changed = true;
                    }
                }
            });
        if filter_changed {
            app.load_payslips(1);
        }
    });
    ui.add_space(10.0);

    if app.payslips.loading && app.payslips.rows.is_empty() {
        components::loading_row(ui, "Loading payslips...");
        return;
    }
    if app.payslips.rows.is_empty() {
        components::empty_state(ui, "No payslips found");
        return;
    }

    let mut mark_paid_id = None;

    ScrollArea::vertical()
        .id_salt("payslips_scroll")
        .show(ui, |ui| {
            egui::Grid::new("payslips_grid")
                .num_columns(6)
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Employee");
                    ui.strong("Period");
                    ui.strong("Gross");
                    ui.strong("Net");
                    ui.strong("Status");
                    ui.strong("Actions");
                    ui.end_row();

                    for payslip in &app.payslips.rows {
                        ui.label(&payslip.employee_name);
                        ui.label(&payslip.pay_period);
                        ui.label(format!("{:.2}", payslip.gross_salary));
                        ui.strong(format!("{:.2}", payslip.net_salary));
                        match payslip.status {
                            PayslipStatus::Generated => {
                                ui.colored_label(colors::WARNING, "Generated")
                            }
                            PayslipStatus::Paid => ui.colored_label(colors::SUCCESS, "Paid"),
                        };
                        ui.horizontal(|ui| {
                            if payslip.status == PayslipStatus::Generated
                                && components::action_button(ui, CHECK, "Mark as paid").clicked()
                            {
                                mark_paid_id = Some(payslip.id);
                            }
                        });
                        ui.end_row();
                    }
                });
        });

    ui.add_space(8.0);
    if let Some(page) = components::pagination_bar(ui, &app.payslips.meta) {
        app.load_payslips(page);
    }

    if let Some(id) = mark_paid_id {
        app.mark_payslip_paid(id);
    }
}

// ========== Dialogs ==========

fn show_salary_dialog(app: &mut App, ctx: &egui::Context) {
    if !app.salary_form.is_open {
        return;
    }

    let title = if app.salary_form.is_editing {
        "Edit Salary"
    } else {
        "New Salary"
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
            if app.salary_form.loading {
                components::loading_row(ui, "Loading record...");
                return;
            }
            if app.salary_form.missing {
                ui.colored_label(colors::ERROR, "This salary record no longer exists.");
                ui.add_space(6.0);
                if components::styled_button(ui, "Close").clicked() {
                    cancel_clicked = true;
                }
                return;
            }

            egui::Grid::new("salary_form_grid")
                .num_columns(2)
                .spacing([12.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Employee");
                    let selected = app
                        .salary_form
                        .employee_id
                        .and_then(|id| app.employee_options.iter().find(|e| e.id == id))
                        .map(|e| e.name.clone())
                        .unwrap_or_else(|| "Select...".to_string());
                    egui::ComboBox::from_id_salt("salary_form_employee")
                        .width(260.0)
                        .selected_text(selected)
                        .show_ui(ui, |ui| {
                            for employee in &app.employee_options {
                                let is_selected =
                                    app.salary_form.employee_id == Some(employee.id);
                                if ui.selectable_label(is_selected, &employee.name).clicked() {
                                    app.salary_form.employee_id = Some(employee.id);
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Base salary");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.salary_form.base_salary)
                            .desired_width(120.0),
                    );
                    ui.end_row();

                    ui.label("Housing allowance");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.salary_form.housing_allowance)
                            .desired_width(120.0),
                    );
                    ui.end_row();

                    ui.label("Transport allowance");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.salary_form.transport_allowance)
                            .desired_width(120.0),
                    );
                    ui.end_row();

                    ui.label("Social insurance");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.salary_form.social_insurance)
                            .desired_width(120.0),
                    );
                    ui.end_row();

                    ui.label("Effective date");
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.salary_form.effective_date)
                            .id_salt("salary_effective_date"),
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
        match app.salary_form.validate() {
            Ok(payload) => {
                let id = if app.salary_form.is_editing {
                    app.salary_form.id
                } else {
                    None
                };
                app.save_salary(id, payload);
            }
            Err(message) => app.notify_error(message),
        }
    }
    if cancel_clicked {
        app.salary_form.reset();
    }
}

fn show_generate_dialog(app: &mut App, ctx: &egui::Context) {
    if !app.generate_dialog_open {
        return;
    }

    let mut generate_clicked = false;
    let mut cancel_clicked = false;

    egui::Window::new("Generate Payslips")
        .collapsible(false)
        .resizable(false)
        .default_width(450.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Creates one payslip per employee with an active salary for the period.");
            ui.label("Employees already covered for the period are skipped.");
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label("Pay period:");
                ui.add(
                    egui::TextEdit::singleline(&mut app.pay_period_input)
                        .desired_width(80.0)
                        .hint_text("YYYY-MM"),
                );
            });
            ui.add_space(10.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if components::primary_button_with_icon(ui, "", "Generate").clicked() {
                    generate_clicked = true;
                }
                if components::styled_button(ui, "Cancel").clicked() {
                    cancel_clicked = true;
                }
            });
        });

    if generate_clicked {
        match forms::parse_pay_period(&app.pay_period_input) {
            Ok(period) => app.generate_payslips(period),
            Err(message) => app.notify_error(message),
        }
    }
    if cancel_clicked {
        app.generate_dialog_open = false;
        app.pay_period_input.clear();
    }
}
