//! Landing panel with headline numbers, navigation cards, quick actions and
//! the recent activity feed.

use eframe::egui::{RichText, ScrollArea, Ui};
use egui_phosphor::regular::{
    AIRPLANE_TAKEOFF, BRIEFCASE, BUILDINGS, CALENDAR_CHECK, CHART_BAR, GEAR, MONEY, PLUS, SIGN_IN,
    USERS,
};

use super::app::{App, Panel};
use super::components::{self, colors};
use super::forms::{CheckForm, EmployeeForm, LeaveRequestForm};

/// Render the dashboard. Returns the panel to switch to when a card or quick
/// action was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut navigate_to = None;

    ScrollArea::vertical()
        .id_salt("dashboard_scroll")
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.heading(RichText::new("HR Desk").size(28.0).strong());
                ui.label(RichText::new("Human resources administration").weak());
            });
            ui.add_space(20.0);

            match app.dashboard_counts {
                Some(counts) => {
                    ui.horizontal(|ui| {
                        components::stat_card(
                            ui,
                            USERS,
                            "Employees",
                            &counts.employees.to_string(),
                            colors::ACCENT,
                        );
                        components::stat_card(
                            ui,
                            CALENDAR_CHECK,
                            "Checked in today",
                            &counts.today_attendance.to_string(),
                            colors::SUCCESS,
                        );
                        let pending_color = if counts.pending_leaves > 0 {
                            colors::WARNING
                        } else {
                            colors::NEUTRAL
                        };
                        components::stat_card(
                            ui,
                            AIRPLANE_TAKEOFF,
                            "Pending leave requests",
                            &counts.pending_leaves.to_string(),
                            pending_color,
                        );
                    });
                }
                None => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading overview...");
                    });
                }
            }

            ui.add_space(20.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if components::dashboard_card(ui, USERS, "Employees", "Manage the roster").clicked()
                {
                    navigate_to = Some(Panel::Employees);
                }
                if components::dashboard_card(ui, BUILDINGS, "Departments", "Organizational units")
                    .clicked()
                {
                    navigate_to = Some(Panel::Departments);
                }
                if components::dashboard_card(ui, BRIEFCASE, "Job Titles", "Position catalog")
                    .clicked()
                {
                    navigate_to = Some(Panel::JobTitles);
                }
                if components::dashboard_card(ui, CALENDAR_CHECK, "Attendance", "Daily check-ins")
                    .clicked()
                {
                    navigate_to = Some(Panel::Attendance);
                }
            });
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if components::dashboard_card(ui, AIRPLANE_TAKEOFF, "Leave", "Requests and types")
                    .clicked()
                {
                    navigate_to = Some(Panel::Leave);
                }
                if components::dashboard_card(ui, MONEY, "Payroll", "Salaries and payslips")
                    .clicked()
                {
                    navigate_to = Some(Panel::Payroll);
                }
                if components::dashboard_card(ui, CHART_BAR, "Reports", "Summaries and export")
                    .clicked()
                {
                    navigate_to = Some(Panel::Reports);
                }
                if components::dashboard_card(ui, GEAR, "Settings", "Server and app options")
                    .clicked()
                {
                    navigate_to = Some(Panel::Settings);
                }
            });

            ui.add_space(20.0);

            ui.horizontal(|ui| {
                ui.strong("Quick actions:");
                if components::styled_button_with_icon(ui, PLUS, "Add Employee").clicked() {
                    app.employee_form = EmployeeForm::open_new();
                    navigate_to = Some(Panel::Employees);
                }
                if components::styled_button_with_icon(ui, SIGN_IN, "Check In").clicked() {
                    app.check_form = CheckForm::open(false);
                    navigate_to = Some(Panel::Attendance);
                }
                if components::styled_button_with_icon(ui, AIRPLANE_TAKEOFF, "New Leave Request")
                    .clicked()
                {
                    app.leave_request_form = LeaveRequestForm::open_new();
                    navigate_to = Some(Panel::Leave);
                }
            });

            ui.add_space(16.0);
            ui.separator();

            ui.strong("Recent activity");
            ui.add_space(4.0);
            ScrollArea::vertical()
                .id_salt("activity_scroll")
                .max_height(160.0)
                .show(ui, |ui| {
                    if app.log_entries.is_empty() {
                        ui.weak("Nothing yet");
                    }
                    for entry in app.log_entries.iter().rev().take(12) {
                        ui.horizontal(|ui| {
                            ui.weak(entry.timestamp.format("%H:%M:%S").to_string());
                            ui.colored_label(entry.level.color(), &entry.message);
                        });
                    }
                });
        });

    navigate_to
}
