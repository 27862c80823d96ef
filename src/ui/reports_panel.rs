//! Reports panel: pick a report kind and a date range, generate, export.
//!
//! Rows live only while the panel is open; navigating away clears them so a
//! stale aggregate is never shown next to fresh filters.

use chrono::{Datelike, Duration, Local};
use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{CHART_BAR, FILE_XLS};

use crate::models::report::{ReportData, ReportKind};

use super::app::App;
use super::components::{self, colors};
use super::forms::parse_flexible_date;

/// Render the reports panel. Returns true when the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let back = components::panel_header(ui, "Reports");

    show_controls(app, ui);
    ui.add_space(10.0);
    show_results(app, ui);

    back
}

fn show_controls(app: &mut App, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.label("Report:");
        egui::ComboBox::from_id_salt("report_kind")
            .width(130.0)
            .selected_text(app.report_kind.label())
            .show_ui(ui, |ui| {
                for kind in [ReportKind::Attendance, ReportKind::Leave, ReportKind::Payroll] {
                    if ui
                        .selectable_label(app.report_kind == kind, kind.label())
                        .clicked()
                    {
                        app.report_kind = kind;
                    }
                }
            });

        ui.add_space(10.0);
        ui.label("From:");
        let start_valid = parse_flexible_date(&app.report_filter.start_input).is_some();
        let start_color = if start_valid {
            ui.visuals().text_color()
        } else {
            colors::ERROR
        };
        let start = ui.add(
            egui::TextEdit::singleline(&mut app.report_filter.start_input)
                .desired_width(100.0)
                .hint_text("YYYY-MM-DD")
                .text_color(start_color),
        );
        if start.changed() {
            if let Some(date) = parse_flexible_date(&app.report_filter.start_input) {
                app.report_filter.start_date = date;
            }
        }
        if start.lost_focus() {
            if let Some(date) = parse_flexible_date(&app.report_filter.start_input) {
                app.report_filter.start_input = date.format("%Y-%m-%d").to_string();
            }
        }

        ui.label("To:");
        let end_valid = parse_flexible_date(&app.report_filter.end_input).is_some();
        let end_color = if end_valid {
            ui.visuals().text_color()
        } else {
            colors::ERROR
        };
        let end = ui.add(
            egui::TextEdit::singleline(&mut app.report_filter.end_input)
                .desired_width(100.0)
                .hint_text("YYYY-MM-DD")
                .text_color(end_color),
        );
        if end.changed() {
            if let Some(date) = parse_flexible_date(&app.report_filter.end_input) {
                app.report_filter.end_date = date;
            }
        }
        if end.lost_focus() {
            if let Some(date) = parse_flexible_date(&app.report_filter.end_input) {
                app.report_filter.end_input = date.format("%Y-%m-%d").to_string();
            }
        }
    });

    ui.label(
        egui::RichText::new("Accepts: YYYY-MM-DD, YYYY/M/D, YYYY.M.D")
            .small()
            .weak(),
    );

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label("Quick ranges:");
        let today = Local::now().date_naive();
        if components::styled_button(ui, "Today").clicked() {
            app.report_filter.set_range(today, today);
        }
        if components::styled_button(ui, "This Week").clicked() {
            let weekday = today.weekday().num_days_from_monday();
            app.report_filter
                .set_range(today - Duration::days(weekday as i64), today);
        }
        if components::styled_button(ui, "This Month").clicked() {
            app.report_filter
                .set_range(today.with_day(1).unwrap_or(today), today);
        }
        if components::styled_button(ui, "Last 30 Days").clicked() {
            app.report_filter.set_range(today - Duration::days(30), today);
        }

        ui.add_space(16.0);
        if components::primary_button_with_icon(ui, CHART_BAR, "Generate").clicked() {
            app.generate_report();
        }
        if components::styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
            app.export_report();
        }
    });
}

fn show_results(app: &mut App, ui: &mut Ui) {
    if app.report_loading {
        components::loading_row(ui, "Generating report...");
        return;
    }

    match &app.report_data {
        ReportData::None => {
            components::empty_state(ui, "Pick a range and generate a report");
        }
        ReportData::Attendance(rows) => {
            if rows.is_empty() {
                components::empty_state(ui, "No rows for the selected range");
                return;
            }
            ScrollArea::vertical()
                .id_salt("report_scroll")
                .show(ui, |ui| {
                    egui::Grid::new("attendance_report_grid")
                        .num_columns(7)
                        .striped(true)
                        .min_col_width(60.0)
                        .spacing([12.0, 8.0])
                        .show(ui, |ui| {
                            ui.strong("Code");
                            ui.strong("Employee");
                            ui.strong("Department");
                            ui.strong("Present");
                            ui.strong("Absent");
                            ui.strong("Late");
                            ui.strong("Hours");
                            ui.end_row();

                            for row in rows {
                                ui.label(&row.employee_code);
                                ui.label(&row.employee_name);
                                ui.label(row.department.as_deref().unwrap_or("-"));
                                ui.colored_label(colors::SUCCESS, row.present_days.to_string());
                                ui.colored_label(colors::ERROR, row.absent_days.to_string());
                                ui.colored_label(colors::WARNING, row.late_days.to_string());
                                ui.label(format!("{:.2}", row.total_hours));
                                ui.end_row();
                            }
                        });
                });
        }
        ReportData::Leave(rows) => {
            if rows.is_empty() {
                components::empty_state(ui, "No rows for the selected range");
                return;
            }
            ScrollArea::vertical()
                .id_salt("report_scroll")
                .show(ui, |ui| {
                    egui::Grid::new("leave_report_grid")
                        .num_columns(6)
                        .striped(true)
                        .min_col_width(60.0)
                        .spacing([12.0, 8.0])
                        .show(ui, |ui| {
                            ui.strong("Code");
                            ui.strong("Employee");
                            ui.strong("Leave Type");
                            ui.strong("Approved Requests");
                            ui.strong("Days Taken");
                            ui.strong("Balance Left");
                            ui.end_row();

                            for row in rows {
                                ui.label(&row.employee_code);
                                ui.label(&row.employee_name);
                                ui.label(&row.leave_type);
                                ui.label(row.approved_requests.to_string());
                                ui.label(row.days_taken.to_string());
                                if row.balance_remaining < 0 {
                                    ui.colored_label(
                                        colors::ERROR,
                                        row.balance_remaining.to_string(),
                                    );
                                } else {
                                    ui.label(row.balance_remaining.to_string());
                                }
                                ui.end_row();
                            }
                        });
                });
        }
        ReportData::Payroll(rows) => {
            if rows.is_empty() {
                components::empty_state(ui, "No rows for the selected range");
                return;
            }
            ScrollArea::vertical()
                .id_salt("report_scroll")
                .show(ui, |ui| {
                    egui::Grid::new("payroll_report_grid")
                        .num_columns(6)
                        .striped(true)
                        .min_col_width(60.0)
                        .spacing([12.0, 8.0])
                        .show(ui, |ui| {
                            ui.strong("Code");
                            ui.strong("Employee");
                            ui.strong("Period");
                            ui.strong("Gross");
                            ui.strong("Net");
                            ui.strong("Status");
                            ui.end_row();

                            for row in rows {
                                ui.label(&row.employee_code);
                                ui.label(&row.employee_name);
                                ui.label(&row.pay_period);
                                ui.label(format!("{:.2}", row.gross_salary));
                                ui.strong(format!("{:.2}", row.net_salary));
                                ui.label(row.status.label());
                                ui.end_row();
                            }
                        });
                });
        }
    }
}
