//! Aggregated report rows served by the reporting endpoints.

use serde::Deserialize;

use super::payroll::PayslipStatus;

/// Which report the reports panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportKind {
    #[default]
    Attendance,
    Leave,
    Payroll,
}

impl ReportKind {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Attendance => "Attendance",
            Self::Leave => "Leave",
            Self::Payroll => "Payroll",
        }
    }

    /// Filename stem for exports.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Attendance => "attendance_report",
            Self::Leave => "leave_report",
            Self::Payroll => "payroll_report",
        }
    }
}

/// One employee's attendance aggregate over the requested range.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceSummaryRow {
    pub employee_code: String,
    pub employee_name: String,
    pub department: Option<String>,
    pub present_days: u32,
    pub absent_days: u32,
    pub late_days: u32,
    pub total_hours: f64,
}

/// One employee+type leave aggregate over the requested range.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveSummaryRow {
    pub employee_code: String,
    pub employee_name: String,
    pub leave_type: String,
    pub approved_requests: u32,
    pub days_taken: u32,
    pub balance_remaining: i32,
}

/// One employee+period payroll aggregate.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollSummaryRow {
    pub employee_code: String,
    pub employee_name: String,
    pub pay_period: String,
    pub gross_salary: f64,
    pub net_salary: f64,
    pub status: PayslipStatus,
}

/// Loaded report rows, cleared whenever the reports panel is left.
#[derive(Debug, Clone, Default)]
pub enum ReportData {
    #[default]
    None,
    Attendance(Vec<AttendanceSummaryRow>),
    Leave(Vec<LeaveSummaryRow>),
    Payroll(Vec<PayrollSummaryRow>),
}

impl ReportData {
    /// Number of loaded rows.
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Attendance(rows) => rows.len(),
            Self::Leave(rows) => rows.len(),
            Self::Payroll(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_data_counts_rows() {
        assert!(ReportData::None.is_empty());

        let data = ReportData::Leave(vec![LeaveSummaryRow {
            employee_code: "EMP-004".to_string(),
            employee_name: "Omar Farouk".to_string(),
            leave_type: "Annual".to_string(),
            approved_requests: 2,
            days_taken: 6,
            balance_remaining: 15,
        }]);

        assert_eq!(data.len(), 1);
        assert!(!data.is_empty());
    }

    #[test]
    fn test_kind_slugs_are_distinct() {
        assert_eq!(ReportKind::Attendance.slug(), "attendance_report");
        assert_eq!(ReportKind::Leave.slug(), "leave_report");
        assert_eq!(ReportKind::Payroll.slug(), "payroll_report");
    }
}
