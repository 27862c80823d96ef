//! Excel export functionality.

use crate::models::employee::Employee;
use crate::models::report::{AttendanceSummaryRow, LeaveSummaryRow, PayrollSummaryRow, ReportKind};
use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};
use std::path::{Path, PathBuf};

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
}

/// Export the attendance summary report to an Excel file.
/// One row per employee with day counts and total worked hours.
pub fn export_attendance_report_to_excel(data: &[AttendanceSummaryRow], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Attendance Report")?;

    let header_format = header_format();
    let hours_format = Format::new().set_num_format("0.00");

    // Headers
    let headers = [
        "Employee Code",
        "Full Name",
        "Department",
        "Present Days",
        "Absent Days",
        "Late Days",
        "Total Hours",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    // Column widths
    worksheet.set_column_width(0, 15)?; // Employee Code
    worksheet.set_column_width(1, 30)?; // Full Name
    worksheet.set_column_width(2, 25)?; // Department
    worksheet.set_column_width(3, 12)?; // Present Days
    worksheet.set_column_width(4, 12)?; // Absent Days
    worksheet.set_column_width(5, 10)?; // Late Days
    worksheet.set_column_width(6, 12)?; // Total Hours

    // Data rows
    for (idx, record) in data.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, &record.employee_code)?;
        worksheet.write_string(row, 1, &record.employee_name)?;
        worksheet.write_string(row, 2, record.department.as_deref().unwrap_or(""))?;
        worksheet.write_number(row, 3, record.present_days as f64)?;
        worksheet.write_number(row, 4, record.absent_days as f64)?;
        worksheet.write_number(row, 5, record.late_days as f64)?;
        worksheet.write_number_with_format(row, 6, record.total_hours, &hours_format)?;
    }

    // Autofilter
    if !data.is_empty() {
        let last_row = data.len() as u32;
        worksheet.autofilter(0, 0, last_row, 6)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

/// Export the leave summary report to an Excel file.
/// One row per employee and leave type with usage against balance.
pub fn export_leave_report_to_excel(data: &[LeaveSummaryRow], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Leave Report")?;

    let header_format = header_format();

    // Headers
    let headers = [
        "Employee Code",
        "Full Name",
        "Leave Type",
        "Approved Requests",
        "Days Taken",
        "Balance Remaining",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    // Column widths
    worksheet.set_column_width(0, 15)?; // Employee Code
    worksheet.set_column_width(1, 30)?; // Full Name
    worksheet.set_column_width(2, 20)?; // Leave Type
    worksheet.set_column_width(3, 16)?; // Approved Requests
    worksheet.set_column_width(4, 12)?; // Days Taken
    worksheet.set_column_width(5, 16)?; // Balance Remaining

    // Data rows
    for (idx, record) in data.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, &record.employee_code)?;
        worksheet.write_string(row, 1, &record.employee_name)?;
        worksheet.write_string(row, 2, &record.leave_type)?;
        worksheet.write_number(row, 3, record.approved_requests as f64)?;
        worksheet.write_number(row, 4, record.days_taken as f64)?;
        worksheet.write_number(row, 5, record.balance_remaining as f64)?;
    }

    // Autofilter
    if !data.is_empty() {
        let last_row = data.len() as u32;
        worksheet.autofilter(0, 0, last_row, 5)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

/// Export the payroll summary report to an Excel file.
pub fn export_payroll_report_to_excel(data: &[PayrollSummaryRow], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Payroll Report")?;

    let header_format = header_format();
    let money_format = Format::new().set_num_format("#,##0.00");

    // Headers
    let headers = [
        "Employee Code",
        "Full Name",
        "Pay Period",
        "Gross Salary",
        "Net Salary",
        "Status",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    // Column widths
    worksheet.set_column_width(0, 15)?; // Employee Code
    worksheet.set_column_width(1, 30)?; // Full Name
    worksheet.set_column_width(2, 12)?; // Pay Period
    worksheet.set_column_width(3, 14)?; // Gross Salary
    worksheet.set_column_width(4, 14)?; // Net Salary
    worksheet.set_column_width(5, 10)?; // Status

    // Data rows
    for (idx, record) in data.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, &record.employee_code)?;
        worksheet.write_string(row, 1, &record.employee_name)?;
        worksheet.write_string(row, 2, &record.pay_period)?;
        worksheet.write_number_with_format(row, 3, record.gross_salary, &money_format)?;
        worksheet.write_number_with_format(row, 4, record.net_salary, &money_format)?;
        worksheet.write_string(row, 5, record.status.label())?;
    }

    // Autofilter
    if !data.is_empty() {
        let last_row = data.len() as u32;
        worksheet.autofilter(0, 0, last_row, 5)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

/// Export the employee roster to an Excel file.
pub fn export_employees_to_excel(employees: &[Employee], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Employees")?;

    let header_format = header_format();

    // Headers
    let headers = [
        "Employee Code",
        "Full Name",
        "Job Title",
        "Department",
        "Active",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    // Column widths
    worksheet.set_column_width(0, 15)?; // Employee Code
    worksheet.set_column_width(1, 30)?; // Full Name
    worksheet.set_column_width(2, 25)?; // Job Title
    worksheet.set_column_width(3, 25)?; // Department
    worksheet.set_column_width(4, 8)?; // Active

    // Data rows
    for (idx, emp) in employees.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, &emp.employee_code)?;
        worksheet.write_string(row, 1, &emp.name)?;
        worksheet.write_string(row, 2, emp.job_title.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 3, emp.department.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 4, if emp.is_active { "Yes" } else { "No" })?;
    }

    // Autofilter
    if !employees.is_empty() {
        let last_row = employees.len() as u32;
        worksheet.autofilter(0, 0, last_row, 4)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str, default_dir: &str) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel Files", &["xlsx"]);
    if !default_dir.trim().is_empty() {
        dialog = dialog.set_directory(default_dir);
    }
    dialog.save_file()
}

/// Open folder picker and return selected directory.
pub fn show_folder_dialog(current_dir: &str) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new();
    if !current_dir.trim().is_empty() {
        dialog = dialog.set_directory(current_dir);
    }
    dialog.pick_folder()
}

/// Generate default filename for a report export, carrying the report kind
/// and the date range so saved files sort and read naturally.
pub fn generate_report_filename(kind: ReportKind, from: NaiveDate, to: NaiveDate) -> String {
    format!("{slug}_{from}_{to}.xlsx", slug = kind.slug())
}

/// Generate default filename for a plain export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_filename_carries_kind_and_range() {
        let from = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        assert_eq!(
            generate_report_filename(ReportKind::Attendance, from, to),
            "attendance_report_2026-08-01_2026-08-23.xlsx"
        );
        assert_eq!(
            generate_report_filename(ReportKind::Payroll, from, to),
            "payroll_report_2026-08-01_2026-08-23.xlsx"
        );
    }

    #[test]
    fn test_export_filename_has_extension() {
        let name = generate_export_filename("employees");
        assert!(name.starts_with("employees_"));
        assert!(name.ends_with(".xlsx"));
    }

    #[test]
    fn test_attendance_report_writes_workbook() {
        let rows = vec![AttendanceSummaryRow {
            employee_code: "EMP-001".to_string(),
            employee_name: "Ahmed Samir".to_string(),
            department: Some("Engineering".to_string()),
            present_days: 20,
            absent_days: 1,
            late_days: 2,
            total_hours: 168.5,
        }];

        let path = std::env::temp_dir().join("hrdesk_test_attendance_report.xlsx");
        export_attendance_report_to_excel(&rows, &path).unwrap();
        assert!(path.exists());
        let size = std::fs::metadata(&path).unwrap().len();
        assert!(size > 0);
        let _ = std::fs::remove_file(&path);
    }
}
