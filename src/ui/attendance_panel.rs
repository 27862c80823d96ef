//! Attendance panel: day view over check-in/check-out records plus the two
//! check dialogs. The server stamps times; the client only picks the
//! employee and an optional note.

use chrono::Local;
use eframe::egui::{self, Color32, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, MAGNIFYING_GLASS, SIGN_IN, SIGN_OUT};

use crate::models::attendance::AttendanceStatus;

use super::app::App;
use super::components::{self, colors};
use super::forms::{self, CheckForm};

fn status_color(status: AttendanceStatus) -> Color32 {
    match status {
        AttendanceStatus::Present => colors::SUCCESS,
        AttendanceStatus::Late => colors::WARNING,
        AttendanceStatus::Absent => colors::ERROR,
    }
}

/// Render the attendance panel. Returns true when the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let back = components::panel_header(ui, "Attendance");

    show_toolbar(app, ui);
    ui.add_space(10.0);
    show_table(app, ui);
    show_check_dialog(app, ui.ctx());

    back
}

fn show_toolbar(app: &mut App, ui: &mut Ui) {
    ui.horizontal(|ui| {
        if components::primary_button_with_icon(ui, SIGN_IN, "Check In").clicked() {
            app.check_form = CheckForm::open(false);
        }
        if components::styled_button_with_icon(ui, SIGN_OUT, "Check Out").clicked() {
            app.check_form = CheckForm::open(true);
        }
        if components::styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            let page = app.attendance.current_page();
            app.load_attendance(page);
        }
    });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label("Date:");
        let valid = app.attendance_date_input.trim().is_empty()
            || forms::parse_flexible_date(&app.attendance_date_input).is_some();
        let text_color = if valid {
            ui.visuals().text_color()
        } else {
            colors::ERROR
        };
        let response = ui.add(
            egui::TextEdit::singleline(&mut app.attendance_date_input)
                .desired_width(110.0)
                .hint_text("YYYY-MM-DD")
                .text_color(text_color),
        );
        if response.lost_focus() {
            if let Some(date) = forms::parse_flexible_date(&app.attendance_date_input) {
                app.attendance_date_input = date.format("%Y-%m-%d").to_string();
            }
            if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                app.load_attendance(1);
            }
        }
        if components::styled_button(ui, "Today").clicked() {
            app.attendance_date_input = Local::now().date_naive().format("%Y-%m-%d").to_string();
            app.load_attendance(1);
        }
        if components::styled_button(ui, "All Dates").clicked() {
            app.attendance_date_input.clear();
            app.load_attendance(1);
        }

        ui.add_space(10.0);
        ui.label(MAGNIFYING_GLASS);
        let search = ui.add(
            egui::TextEdit::singleline(&mut app.attendance_search)
                .desired_width(180.0)
                .hint_text("Search employee"),
        );
        let submitted = search.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if components::styled_button(ui, "Search").clicked() || submitted {
            app.load_attendance(1);
        }
    });
}

fn show_table(app: &mut App, ui: &mut Ui) {
    if app.attendance.loading && app.attendance.rows.is_empty() {
        components::loading_row(ui, "Loading attendance...");
        return;
    }
    if app.attendance.rows.is_empty() {
        components::empty_state(ui, "No attendance records found");
        return;
    }

    ScrollArea::vertical()
        .id_salt("attendance_scroll")
        .show(ui, |ui| {
            egui::Grid::new("attendance_grid")
                .num_columns(6)
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Employee");
                    ui.strong("Date");
                    ui.strong("Check In");
                    ui.strong("Check Out");
                    ui.strong("Status");
                    ui.strong("Notes");
                    ui.end_row();

                    for record in &app.attendance.rows {
                        ui.label(&record.employee_name);
                        ui.label(record.work_date.format("%Y-%m-%d").to_string());
                        ui.label(format_time(record.check_in));
                        ui.label(format_time(record.check_out));
                        ui.colored_label(status_color(record.status), record.status.label());
                        ui.label(format_notes(
                            record.check_in_note.as_deref(),
                            record.check_out_note.as_deref(),
                        ));
                        ui.end_row();
                    }
                });
        });

    ui.add_space(8.0);
    if let Some(page) = components::pagination_bar(ui, &app.attendance.meta) {
        app.load_attendance(page);
    }
}

fn format_time(stamp: Option<chrono::DateTime<chrono::Utc>>) -> String {
    match stamp {
        Some(t) => t.with_timezone(&Local).format("%H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn format_notes(check_in: Option<&str>, check_out: Option<&str>) -> String {
    match (check_in, check_out) {
        (Some(i), Some(o)) => format!("{i} / {o}"),
        (Some(i), None) => i.to_string(),
        (None, Some(o)) => o.to_string(),
        (None, None) => "-".to_string(),
    }
}

fn show_check_dialog(app: &mut App, ctx: &egui::Context) {
    if !app.check_form.is_open {
        return;
    }

    let title = if app.check_form.checking_out {
        "Check Out"
    } else {
        "Check In"
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
            egui::Grid::new("check_form_grid")
                .num_columns(2)
                .spacing([12.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Employee");
                    let selected = app
                        .check_form
                        .employee_id
                        .and_then(|id| app.employee_options.iter().find(|e| e.id == id))
                        .map(|e| e.name.clone())
                        .unwrap_or_else(|| "Select...".to_string());
                    egui::ComboBox::from_id_salt("check_form_employee")
                        .width(260.0)
                        .selected_text(selected)
                        .show_ui(ui, |ui| {
                            for employee in &app.employee_options {
                                let is_selected =
                                    app.check_form.employee_id == Some(employee.id);
                                let label = format!(
                                    "{} ({})",
                                    employee.name, employee.employee_code
                                );
                                if ui.selectable_label(is_selected, label).clicked() {
                                    app.check_form.employee_id = Some(employee.id);
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Note");
                    ui.add(
                        egui::TextEdit::multiline(&mut app.check_form.note)
                            .desired_width(260.0)
                            .desired_rows(2)
                            .hint_text("Optional"),
                    );
                    ui.end_row();
                });

            ui.add_space(10.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if components::primary_button_with_icon(ui, "", title).clicked() {
                    save_clicked = true;
                }
                if components::styled_button(ui, "Cancel").clicked() {
                    cancel_clicked = true;
                }
            });
        });

    if save_clicked {
        match app.check_form.validate() {
            Ok(payload) => {
                let checking_out = app.check_form.checking_out;
                app.submit_check(checking_out, payload);
            }
            Err(message) => app.notify_error(message),
        }
    }
    if cancel_clicked {
        app.check_form.reset();
    }
}
