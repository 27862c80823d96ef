//! Dialog form state for every editable resource.
//!
//! Each form mirrors one entity into editable fields and knows how to turn
//! itself into an API payload. `validate` returns the payload or the first
//! problem as a user-facing message; nothing is dispatched while it fails.
//! Edit dialogs open in a loading state until the fresh record arrives from
//! the server, or in a missing state when it no longer exists.

use chrono::{Local, NaiveDate};

use crate::models::attendance::CheckPayload;
use crate::models::catalog::{CatalogPayload, Department, JobTitle};
use crate::models::employee::{Employee, EmployeePayload};
use crate::models::leave::{LeaveRequest, LeaveRequestPayload, LeaveType, LeaveTypePayload};
use crate::models::payroll::{Salary, SalaryPayload};

/// Trimmed text as an optional payload field; blank becomes `None`.
fn optional_text(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a monetary input field. Blank means zero.
fn parse_money(label: &str, input: &str) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }
    let value: f64 = input
        .parse()
        .map_err(|_| format!("{label} must be a number"))?;
    if value < 0.0 {
        return Err(format!("{label} cannot be negative"));
    }
    Ok(value)
}

/// Parse date input flexibly: "2026-1-9", "2026/1/9", "2026 1 9", "2026.1.9".
pub fn parse_flexible_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    let parts: Vec<&str> = input
        .split(['-', '/', ' ', '.'])
        .filter(|s| !s.is_empty())
        .collect();

    if parts.len() != 3 {
        return None;
    }

    let year: i32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let day: u32 = parts[2].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse and normalize a pay period entered as `YYYY-MM`.
pub fn parse_pay_period(input: &str) -> Result<String, String> {
    let input = input.trim();
    let Some((year, month)) = input.split_once('-') else {
        return Err("Pay period must be in YYYY-MM form".to_string());
    };
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| "Pay period must be in YYYY-MM form".to_string())?;
    let month: u32 = month
        .trim()
        .parse()
        .map_err(|_| "Pay period must be in YYYY-MM form".to_string())?;
    if !(1..=12).contains(&month) {
        return Err("Pay period month must be between 01 and 12".to_string());
    }
    if !(2000..=2100).contains(&year) {
        return Err("Pay period year is out of range".to_string());
    }
    Ok(format!("{year:04}-{month:02}"))
}

/// Form state for employee CRUD.
#[derive(Default, Clone)]
pub struct EmployeeForm {
    pub id: Option<i64>,
    pub employee_code: String,
    pub name: String,
    pub department_id: Option<i64>,
    pub job_title_id: Option<i64>,
    pub is_active: bool,
    pub is_open: bool,
    pub is_editing: bool,
    pub loading: bool,
    pub missing: bool,
}

impl EmployeeForm {
    /// Blank form for creating a new employee.
    pub fn open_new() -> Self {
        Self {
            is_active: true,
            is_open: true,
            ..Default::default()
        }
    }

    /// Edit dialog waiting for the record to arrive.
    pub fn loading(id: i64) -> Self {
        Self {
            id: Some(id),
            is_open: true,
            is_editing: true,
            loading: true,
            ..Default::default()
        }
    }

    /// Seed the fields from the freshly fetched record.
    pub fn fill(&mut self, emp: &Employee) {
        self.employee_code = emp.employee_code.clone();
        self.name = emp.name.clone();
        self.department_id = emp.department_id;
        self.job_title_id = emp.job_title_id;
        self.is_active = emp.is_active;
        self.loading = false;
    }

    /// The record vanished while the dialog was opening.
    pub fn mark_missing(&mut self) {
        self.loading = false;
        self.missing = true;
    }

    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<EmployeePayload, String> {
        let employee_code = self.employee_code.trim();
        if employee_code.is_empty() {
            return Err("Employee code is required".to_string());
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }

        Ok(EmployeePayload {
            employee_code: employee_code.to_string(),
            name: name.to_string(),
            job_title_id: self.job_title_id,
            department_id: self.department_id,
            is_active: self.is_active,
        })
    }
}

/// Form state shared by departments and job titles. Both carry the same
/// bilingual shape, so one form serves either panel.
#[derive(Default, Clone)]
pub struct CatalogForm {
    pub id: Option<i64>,
    pub name_en: String,
    pub name_ar: String,
    pub description_en: String,
    pub description_ar: String,
    pub is_open: bool,
    pub is_editing: bool,
    pub loading: bool,
    pub missing: bool,
}

impl CatalogForm {
    pub fn open_new() -> Self {
        Self {
            is_open: true,
            ..Default::default()
        }
    }

    pub fn loading(id: i64) -> Self {
        Self {
            id: Some(id),
            is_open: true,
            is_editing: true,
            loading: true,
            ..Default::default()
        }
    }

    pub fn fill_department(&mut self, dept: &Department) {
        self.name_en = dept.name_en.clone();
        self.name_ar = dept.name_ar.clone();
        self.description_en = dept.description_en.clone().unwrap_or_default();
        self.description_ar = dept.description_ar.clone().unwrap_or_default();
        self.loading = false;
    }

    pub fn fill_job_title(&mut self, title: &JobTitle) {
        self.name_en = title.name_en.clone();
        self.name_ar = title.name_ar.clone();
        self.description_en = title.description_en.clone().unwrap_or_default();
        self.description_ar = title.description_ar.clone().unwrap_or_default();
        self.loading = false;
    }

    pub fn mark_missing(&mut self) {
        self.loading = false;
        self.missing = true;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<CatalogPayload, String> {
        let name_en = self.name_en.trim();
        if name_en.is_empty() {
            return Err("English name is required".to_string());
        }
        let name_ar = self.name_ar.trim();
        if name_ar.is_empty() {
            return Err("Arabic name is required".to_string());
        }

        Ok(CatalogPayload {
            name_en: name_en.to_string(),
            name_ar: name_ar.to_string(),
            description_en: optional_text(&self.description_en),
            description_ar: optional_text(&self.description_ar),
        })
    }
}

/// Form state for leave type CRUD.
#[derive(Default, Clone)]
pub struct LeaveTypeForm {
    pub id: Option<i64>,
    pub name: String,
    pub default_balance: String,
    pub is_active: bool,
    pub is_open: bool,
    pub is_editing: bool,
    pub loading: bool,
    pub missing: bool,
}

impl LeaveTypeForm {
    pub fn open_new() -> Self {
        Self {
            is_active: true,
            is_open: true,
            ..Default::default()
        }
    }

    pub fn loading(id: i64) -> Self {
        Self {
            id: Some(id),
            is_open: true,
            is_editing: true,
            loading: true,
            ..Default::default()
        }
    }

    pub fn fill(&mut self, leave_type: &LeaveType) {
        self.name = leave_type.name.clone();
        self.default_balance = leave_type.default_balance.to_string();
        self.is_active = leave_type.is_active;
        self.loading = false;
    }

    pub fn mark_missing(&mut self) {
        self.loading = false;
        self.missing = true;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<LeaveTypePayload, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        let default_balance: i32 = self
            .default_balance
            .trim()
            .parse()
            .map_err(|_| "Default balance must be a whole number of days".to_string())?;
        if default_balance < 0 {
            return Err("Default balance cannot be negative".to_string());
        }

        Ok(LeaveTypePayload {
            name: name.to_string(),
            default_balance,
            is_active: self.is_active,
        })
    }
}

/// Form state for leave request CRUD.
#[derive(Clone)]
pub struct LeaveRequestForm {
    pub id: Option<i64>,
    pub employee_id: Option<i64>,
    pub leave_type_id: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub is_open: bool,
    pub is_editing: bool,
    pub loading: bool,
    pub missing: bool,
}

impl Default for LeaveRequestForm {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            id: None,
            employee_id: None,
            leave_type_id: None,
            start_date: today,
            end_date: today,
            reason: String::new(),
            is_open: false,
            is_editing: false,
            loading: false,
            missing: false,
        }
    }
}

impl LeaveRequestForm {
    pub fn open_new() -> Self {
        Self {
            is_open: true,
            ..Default::default()
        }
    }

    pub fn loading(id: i64) -> Self {
        Self {
            id: Some(id),
            is_open: true,
            is_editing: true,
            loading: true,
            ..Default::default()
        }
    }

    pub fn fill(&mut self, request: &LeaveRequest) {
        self.employee_id = Some(request.employee_id);
        self.leave_type_id = Some(request.leave_type_id);
        self.start_date = request.start_date;
        self.end_date = request.end_date;
        self.reason = request.reason.clone().unwrap_or_default();
        self.loading = false;
    }

    pub fn mark_missing(&mut self) {
        self.loading = false;
        self.missing = true;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<LeaveRequestPayload, String> {
        let Some(employee_id) = self.employee_id else {
            return Err("Select an employee".to_string());
        };
        let Some(leave_type_id) = self.leave_type_id else {
            return Err("Select a leave type".to_string());
        };
        if self.end_date < self.start_date {
            return Err("End date must be on or after the start date".to_string());
        }

        Ok(LeaveRequestPayload {
            employee_id,
            leave_type_id,
            start_date: self.start_date,
            end_date: self.end_date,
            reason: optional_text(&self.reason),
        })
    }
}

/// Form state for salary structure CRUD.
#[derive(Clone)]
pub struct SalaryForm {
    pub id: Option<i64>,
    pub employee_id: Option<i64>,
    pub base_salary: String,
    pub housing_allowance: String,
    pub transport_allowance: String,
    pub social_insurance: String,
    pub effective_date: NaiveDate,
    pub is_open: bool,
    pub is_editing: bool,
    pub loading: bool,
    pub missing: bool,
}

impl Default for SalaryForm {
    fn default() -> Self {
        Self {
            id: None,
            employee_id: None,
            base_salary: String::new(),
            housing_allowance: String::new(),
            transport_allowance: String::new(),
            social_insurance: String::new(),
            effective_date: Local::now().date_naive(),
            is_open: false,
            is_editing: false,
            loading: false,
            missing: false,
        }
    }
}

impl SalaryForm {
    pub fn open_new() -> Self {
        Self {
            is_open: true,
            ..Default::default()
        }
    }

    pub fn loading(id: i64) -> Self {
        Self {
            id: Some(id),
            is_open: true,
            is_editing: true,
            loading: true,
            ..Default::default()
        }
    }

    pub fn fill(&mut self, salary: &Salary) {
        self.employee_id = Some(salary.employee_id);
        self.base_salary = salary.base_salary.to_string();
        self.housing_allowance = salary.housing_allowance.to_string();
        self.transport_allowance = salary.transport_allowance.to_string();
        self.social_insurance = salary.social_insurance.to_string();
        self.effective_date = salary.effective_date;
        self.loading = false;
    }

    pub fn mark_missing(&mut self) {
        self.loading = false;
        self.missing = true;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<SalaryPayload, String> {
        let Some(employee_id) = self.employee_id else {
            return Err("Select an employee".to_string());
        };
        if self.base_salary.trim().is_empty() {
            return Err("Base salary is required".to_string());
        }
        let base_salary = parse_money("Base salary", &self.base_salary)?;
        let housing_allowance = parse_money("Housing allowance", &self.housing_allowance)?;
        let transport_allowance = parse_money("Transport allowance", &self.transport_allowance)?;
        let social_insurance = parse_money("Social insurance", &self.social_insurance)?;

        Ok(SalaryPayload {
            employee_id,
            base_salary,
            housing_allowance,
            transport_allowance,
            social_insurance,
            effective_date: self.effective_date,
        })
    }
}

/// Dialog state for the check-in and check-out actions.
#[derive(Default, Clone)]
pub struct CheckForm {
    pub is_open: bool,
    /// False for check-in, true for check-out.
    pub checking_out: bool,
    pub employee_id: Option<i64>,
    pub note: String,
}

impl CheckForm {
    pub fn open(checking_out: bool) -> Self {
        Self {
            is_open: true,
            checking_out,
            ..Default::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<CheckPayload, String> {
        let Some(employee_id) = self.employee_id else {
            return Err("Select an employee".to_string());
        };

        Ok(CheckPayload {
            employee_id,
            note: optional_text(&self.note),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_form_requires_code_and_name() {
        let mut form = EmployeeForm::open_new();
        assert_eq!(form.validate().unwrap_err(), "Employee code is required");

        form.employee_code = "EMP-001".to_string();
        assert_eq!(form.validate().unwrap_err(), "Name is required");

        form.name = "  Ahmed Samir  ".to_string();
        let payload = form.validate().unwrap();
        assert_eq!(payload.name, "Ahmed Samir");
        assert!(payload.is_active);
    }

    #[test]
    fn test_catalog_form_requires_both_names() {
        let mut form = CatalogForm::open_new();
        form.name_en = "Engineering".to_string();
        assert_eq!(form.validate().unwrap_err(), "Arabic name is required");

        form.name_ar = "الهندسة".to_string();
        form.description_en = "   ".to_string();
        let payload = form.validate().unwrap();
        assert!(payload.description_en.is_none());
    }

    #[test]
    fn test_leave_type_balance_must_be_a_non_negative_integer() {
        let mut form = LeaveTypeForm::open_new();
        form.name = "Annual".to_string();

        form.default_balance = "abc".to_string();
        assert!(form.validate().is_err());

        form.default_balance = "-3".to_string();
        assert_eq!(form.validate().unwrap_err(), "Default balance cannot be negative");

        form.default_balance = "21".to_string();
        assert_eq!(form.validate().unwrap().default_balance, 21);
    }

    #[test]
    fn test_leave_request_rejects_reversed_dates() {
        let mut form = LeaveRequestForm::open_new();
        form.employee_id = Some(4);
        form.leave_type_id = Some(2);
        form.start_date = NaiveDate::from_ymd_opt(2026, 8, 12).unwrap();
        form.end_date = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();

        assert_eq!(
            form.validate().unwrap_err(),
            "End date must be on or after the start date"
        );

        form.end_date = form.start_date;
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_leave_request_requires_selections() {
        let form = LeaveRequestForm::open_new();
        assert_eq!(form.validate().unwrap_err(), "Select an employee");
    }

    #[test]
    fn test_salary_form_rejects_negative_money() {
        let mut form = SalaryForm::open_new();
        form.employee_id = Some(9);
        form.base_salary = "9000".to_string();
        form.housing_allowance = "-50".to_string();

        assert_eq!(form.validate().unwrap_err(), "Housing allowance cannot be negative");
    }

    #[test]
    fn test_salary_form_blank_allowances_default_to_zero() {
        let mut form = SalaryForm::open_new();
        form.employee_id = Some(9);
        form.base_salary = "9000".to_string();

        let payload = form.validate().unwrap();
        assert_eq!(payload.base_salary, 9000.0);
        assert_eq!(payload.housing_allowance, 0.0);
        assert_eq!(payload.social_insurance, 0.0);
    }

    #[test]
    fn test_salary_form_requires_base_salary() {
        let mut form = SalaryForm::open_new();
        form.employee_id = Some(9);
        assert_eq!(form.validate().unwrap_err(), "Base salary is required");
    }

    #[test]
    fn test_check_form_requires_employee() {
        let mut form = CheckForm::open(false);
        assert_eq!(form.validate().unwrap_err(), "Select an employee");

        form.employee_id = Some(12);
        form.note = "  ".to_string();
        let payload = form.validate().unwrap();
        assert!(payload.note.is_none());
    }

    #[test]
    fn test_parse_flexible_date_accepts_common_separators() {
        let expected = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
        assert_eq!(parse_flexible_date("2026-1-9"), Some(expected));
        assert_eq!(parse_flexible_date("2026/01/09"), Some(expected));
        assert_eq!(parse_flexible_date("2026 1 9"), Some(expected));
        assert_eq!(parse_flexible_date("2026.1.9"), Some(expected));
        assert_eq!(parse_flexible_date("not a date"), None);
        assert_eq!(parse_flexible_date("2026-13-1"), None);
    }

    #[test]
    fn test_parse_pay_period_normalizes() {
        assert_eq!(parse_pay_period("2026-8").unwrap(), "2026-08");
        assert_eq!(parse_pay_period(" 2026-12 ").unwrap(), "2026-12");
        assert!(parse_pay_period("2026").is_err());
        assert!(parse_pay_period("2026-13").is_err());
        assert!(parse_pay_period("202608").is_err());
    }
}
