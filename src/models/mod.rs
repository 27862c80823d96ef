//! Data models for the HR server's resources.

pub mod attendance;
pub mod catalog;
pub mod employee;
pub mod leave;
pub mod payroll;
pub mod report;

pub use attendance::{AttendanceRecord, AttendanceStatus, CheckPayload};
pub use catalog::{CatalogPayload, Department, JobTitle};
pub use employee::{Employee, EmployeePayload};
pub use leave::{LeaveRequest, LeaveRequestPayload, LeaveStatus, LeaveType, LeaveTypePayload};
pub use payroll::{GeneratePayslips, Payslip, PayslipStatus, Salary, SalaryPayload};
pub use report::{AttendanceSummaryRow, LeaveSummaryRow, PayrollSummaryRow, ReportData, ReportKind};
