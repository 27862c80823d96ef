//! Leave panel with two tabs: requests and leave types.
//!
//! Approve and reject are offered only while a request is pending; both
//! states are terminal. Rejection demands a reason, collected in its own
//! dialog. Deletion is available in every state.

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CHECK, MAGNIFYING_GLASS, PENCIL, PLUS, TRASH, X};

use crate::models::leave::LeaveStatus;

use super::app::{App, DeleteTarget, LeaveTab};
use super::components::{self, colors};
use super::forms::{LeaveRequestForm, LeaveTypeForm};

fn status_color(status: LeaveStatus) -> Color32 {
    match status {
        LeaveStatus::Pending => colors::WARNING,
        LeaveStatus::Approved => colors::SUCCESS,
        LeaveStatus::Rejected => colors::ERROR,
    }
}

/// Render the leave panel. Returns true when the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let back = components::panel_header(ui, "Leave");

    ui.horizontal(|ui| {
        if ui
            .selectable_label(app.leave_tab == LeaveTab::Requests, "Requests")
            .clicked()
        {
            app.leave_tab = LeaveTab::Requests;
        }
        if ui
            .selectable_label(app.leave_tab == LeaveTab::Types, "Leave Types")
            .clicked()
        {
            app.leave_tab = LeaveTab::Types;
        }
    });
    ui.separator();
    ui.add_space(6.0);

    match app.leave_tab {
        LeaveTab::Requests => show_requests_tab(app, ui),
        LeaveTab::Types => show_types_tab(app, ui),
    }

    show_request_dialog(app, ui.ctx());
    show_type_dialog(app, ui.ctx());
    show_reject_dialog(app, ui.ctx());

    back
}

// ========== Requests tab ==========

fn show_requests_tab(app: &mut App, ui: &mut Ui) {
    ui.horizontal(|ui| {
        if components::primary_button_with_icon(ui, PLUS, "New Request").clicked() {
            app.leave_request_form = LeaveRequestForm::open_new();
        }
        if components::styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            let page = app.leave_requests.current_page();
            app.load_leave_requests(page);
        }

        ui.add_space(10.0);
        let mut filter_changed = false;
        let status_text = app
            .leave_status_filter
            .map(|s| s.label())
            .unwrap_or("All Statuses");
        egui::ComboBox::from_id_salt("leave_status_filter")
            .width(120.0)
            .selected_text(status_text)
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(app.leave_status_filter.is_none(), "All Statuses")
                    .clicked()
                {
                    app.leave_status_filter = None;
                    filter_changed = true;
                }
                for status in [
                    LeaveStatus::Pending,
                    LeaveStatus::Approved,
                    LeaveStatus::Rejected,
                ] {
                    if ui
                        .selectable_label(app.leave_status_filter == Some(status), status.label())
                        .clicked()
                    {
                        app.leave_status_filter = Some(status);
                        filter_changed = true;
                    }
                }
            });
        if filter_changed {
            app.load_leave_requests(1);
        }

        ui.label(MAGNIFYING_GLASS);
        let search = ui.add(
            egui::TextEdit::singleline(&mut app.leave_search)
                .desired_width(180.0)
                .hint_text("Search employee"),
        );
        let submitted = search.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if components::styled_button(ui, "Search").clicked() || submitted {
            app.load_leave_requests(1);
        }
    });
    ui.add_space(10.0);

    if app.leave_requests.loading && app.leave_requests.rows.is_empty() {
        components::loading_row(ui, "Loading leave requests...");
        return;
    }
    if app.leave_requests.rows.is_empty() {
        components::empty_state(ui, "No leave requests found");
        return;
    }

    let mut edit_id = None;
    let mut approve_id = None;
    let mut reject_target = None;
    let mut delete_target = None;

    ScrollArea::vertical()
        .id_salt("leave_requests_scroll")
        .show(ui, |ui| {
            egui::Grid::new("leave_requests_grid")
                .num_columns(7)
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Employee");
                    ui.strong("Type");
                    ui.strong("From");
                    ui.strong("To");
                    ui.strong("Days");
                    ui.strong("Status");
                    ui.strong("Actions");
                    ui.end_row();

                    for request in &app.leave_requests.rows {
                        ui.label(&request.employee_name);
                        ui.label(&request.leave_type_name);
                        ui.label(request.start_date.format("%Y-%m-%d").to_string());
                        ui.label(request.end_date.format("%Y-%m-%d").to_string());
                        ui.label(request.days().to_string());

                        let status = ui.colored_label(
                            status_color(request.status),
                            request.status.label(),
                        );
                        if let Some(reason) = &request.rejection_reason {
                            status.on_hover_text(format!("Reason: {reason}"));
                        } else if let Some(approver) = &request.approved_by {
                            status.on_hover_text(format!("Approved by {approver}"));
                        }

                        ui.horizontal(|ui| {
                            if request.status == LeaveStatus::Pending {
                                if components::action_button(ui, CHECK, "Approve").clicked() {
                                    approve_id = Some(request.id);
                                }
                                if components::danger_action_button(ui, X, "Reject").clicked() {
                                    reject_target =
                                        Some((request.id, request.employee_name.clone()));
                                }
                                if components::action_button(ui, PENCIL, "Edit").clicked() {
                                    edit_id = Some(request.id);
                                }
                            }
                            if components::danger_action_button(ui, TRASH, "Delete").clicked() {
                                delete_target = Some(DeleteTarget::LeaveRequest(
                                    request.id,
                                    request.employee_name.clone(),
                                ));
                            }
                        });
                        ui.end_row();
                    }
                });
        });

    ui.add_space(8.0);
    if let Some(page) = components::pagination_bar(ui, &app.leave_requests.meta) {
        app.load_leave_requests(page);
    }

    if let Some(id) = approve_id {
        app.approve_leave_request(id);
    }
    if let Some((id, name)) = reject_target {
        app.reject_reason_input.clear();
        app.reject_target = Some((id, name));
    }
    if let Some(id) = edit_id {
        app.open_leave_request_edit(id);
    }
    if let Some(target) = delete_target {
        app.request_delete(target);
    }
}

// ========== Types tab ==========

fn show_types_tab(app: &mut App, ui: &mut Ui) {
    ui.horizontal(|ui| {
        if components::primary_button_with_icon(ui, PLUS, "Add Leave Type").clicked() {
            app.leave_type_form = LeaveTypeForm::open_new();
        }
        if components::styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            let page = app.leave_types.current_page();
            app.load_leave_types(page);
        }
    });
    ui.add_space(10.0);

    if app.leave_types.loading && app.leave_types.rows.is_empty() {
        components::loading_row(ui, "Loading leave types...");
        return;
    }
    if app.leave_types.rows.is_empty() {
        components::empty_state(ui, "No leave types defined");
        return;
    }

    let mut edit_id = None;
    let mut delete_target = None;

    ScrollArea::vertical()
        .id_salt("leave_types_scroll")
        .show(ui, |ui| {
            egui::Grid::new("leave_types_grid")
                .num_columns(4)
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Name");
                    ui.strong("Default Balance");
                    ui.strong("Status");
                    ui.strong("Actions");
                    ui.end_row();

                    for leave_type in &app.leave_types.rows {
                        ui.label(&leave_type.name);
                        ui.label(format!("{} days", leave_type.default_balance));
                        if leave_type.is_active {
                            ui.colored_label(colors::SUCCESS, "Active");
                        } else {
                            ui.colored_label(colors::NEUTRAL, "Inactive");
                        }
                        ui.horizontal(|ui| {
                            if components::action_button(ui, PENCIL, "Edit").clicked() {
                                edit_id = Some(leave_type.id);
                            }
                            if components::danger_action_button(ui, TRASH, "Delete").clicked() {
                                delete_target = Some(DeleteTarget::LeaveType(
                                    leave_type.id,
                                    leave_type.name.clone(),
                                ));
                            }
                        });
                        ui.end_row();
                    }
                });
        });

    ui.add_space(8.0);
    if let Some(page) = components::pagination_bar(ui, &app.leave_types.meta) {
        app.load_leave_types(page);
    }

    if let Some(id) = edit_id {
        app.open_leave_type_edit(id);
    }
    if let Some(target) = delete_target {
        app.request_delete(target);
    }
}

// ========== Dialogs ==========

fn show_request_dialog(app: &mut App, ctx: &egui::Context) {
    if !app.leave_request_form.is_open {
        return;
    }

    let title = if app.leave_request_form.is_editing {
        "Edit Leave Request"
    } else {
        "New Leave Request"
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
            if app.leave_request_form.loading {
                components::loading_row(ui, "Loading record...");
                return;
            }
            if app.leave_request_form.missing {
                ui.colored_label(colors::ERROR, "This leave request no longer exists.");
                ui.add_space(6.0);
                if components::styled_button(ui, "Close").clicked() {
                    cancel_clicked = true;
                }
                return;
            }

            egui::Grid::new("leave_request_form_grid")
                .num_columns(2)
                .spacing([12.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Employee");
                    let selected = app
                        .leave_request_form
                        .employee_id
                        .and_then(|id| app.employee_options.iter().find(|e| e.id == id))
                        .map(|e| e.name.clone())
                        .unwrap_or_else(|| "Select...".to_string());
                    egui::ComboBox::from_id_salt("leave_request_employee")
                        .width(260.0)
                        .selected_text(selected)
                        .show_ui(ui, |ui| {
                            for employee in &app.employee_options {
                                let is_selected =
                                    app.leave_request_form.employee_id == Some(employee.id);
                                if ui.selectable_label(is_selected, &employee.name).clicked() {
                                    app.leave_request_form.employee_id = Some(employee.id);
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Leave type");
                    let selected_type = app
                        .leave_request_form
                        .leave_type_id
                        .and_then(|id| app.leave_type_options.iter().find(|t| t.id == id))
                        .map(|t| t.name.clone())
                        .unwrap_or_else(|| "Select...".to_string());
                    egui::ComboBox::from_id_salt("leave_request_type")
                        .width(260.0)
                        .selected_text(selected_type)
                        .show_ui(ui, |ui| {
                            for leave_type in &app.leave_type_options {
                                let is_selected =
                                    app.leave_request_form.leave_type_id == Some(leave_type.id);
                                if ui.selectable_label(is_selected, &leave_type.name).clicked() {
                                    app.leave_request_form.leave_type_id = Some(leave_type.id);
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("From");
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.leave_request_form.start_date)
                            .id_salt("leave_request_start"),
                    );
                    ui.end_row();

                    ui.label("To");
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut app.leave_request_form.end_date)
                            .id_salt("leave_request_end"),
                    );
                    ui.end_row();

                    ui.label("Days");
                    let span =
                        (app.leave_request_form.end_date - app.leave_request_form.start_date)
                            .num_days()
                            + 1;
                    if span >= 1 {
                        ui.label(span.to_string());
                    } else {
                        ui.colored_label(colors::ERROR, "End date is before start date");
                    }
                    ui.end_row();

                    ui.label("Reason");
                    ui.add(
                        egui::TextEdit::multiline(&mut app.leave_request_form.reason)
                            .desired_width(260.0)
                            .desired_rows(2)
                            .hint_text("Optional"),
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
        match app.leave_request_form.validate() {
            Ok(payload) => {
                let id = if app.leave_request_form.is_editing {
                    app.leave_request_form.id
                } else {
                    None
                };
                app.save_leave_request(id, payload);
            }
            Err(message) => app.notify_error(message),
        }
    }
    if cancel_clicked {
        app.leave_request_form.reset();
    }
}

fn show_type_dialog(app: &mut App, ctx: &egui::Context) {
    if !app.leave_type_form.is_open {
        return;
    }

    let title = if app.leave_type_form.is_editing {
        "Edit Leave Type"
    } else {
        "New Leave Type"
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
            if app.leave_type_form.loading {
                components::loading_row(ui, "Loading record...");
                return;
            }
            if app.leave_type_form.missing {
                ui.colored_label(colors::ERROR, "This leave type no longer exists.");
                ui.add_space(6.0);
                if components::styled_button(ui, "Close").clicked() {
                    cancel_clicked = true;
                }
                return;
            }

            egui::Grid::new("leave_type_form_grid")
                .num_columns(2)
                .spacing([12.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Name");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.leave_type_form.name)
                            .desired_width(260.0),
                    );
                    ui.end_row();

                    ui.label("Default balance (days)");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.leave_type_form.default_balance)
                            .desired_width(80.0),
                    );
                    ui.end_row();

                    ui.label("Active");
                    ui.checkbox(&mut app.leave_type_form.is_active, "");
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
        match app.leave_type_form.validate() {
            Ok(payload) => {
                let id = if app.leave_type_form.is_editing {
                    app.leave_type_form.id
                } else {
                    None
                };
                app.save_leave_type(id, payload);
            }
            Err(message) => app.notify_error(message),
        }
    }
    if cancel_clicked {
        app.leave_type_form.reset();
    }
}

fn show_reject_dialog(app: &mut App, ctx: &egui::Context) {
    let Some((id, name)) = app.reject_target.clone() else {
        return;
    };

    let mut reject_clicked = false;
    let mut cancel_clicked = false;

    egui::Window::new("Reject Leave Request")
        .collapsible(false)
        .resizable(false)
        .default_width(450.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("Rejecting the request from {name}."));
            ui.label(RichText::new("A reason is required.").weak());
            ui.add_space(6.0);
            ui.add(
                egui::TextEdit::multiline(&mut app.reject_reason_input)
                    .desired_width(400.0)
                    .desired_rows(3)
                    .hint_text("Why is this request rejected?"),
            );
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if components::styled_button(ui, "Cancel").clicked() {
                    cancel_clicked = true;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let reject = egui::Button::new(
                        RichText::new("Reject Request").color(Color32::WHITE),
                    )
                    .fill(colors::ERROR);
                    if ui.add(reject).clicked() {
                        reject_clicked = true;
                    }
                });
            });
        });

    if reject_clicked {
        let reason = app.reject_reason_input.trim().to_string();
        if reason.is_empty() {
            app.notify_error("A rejection reason is required");
        } else {
            app.reject_leave_request(id, reason);
        }
    }
    if cancel_clicked {
        app.reject_target = None;
        app.reject_reason_input.clear();
    }
}
