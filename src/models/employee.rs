//! Employee record and form payload.

use serde::{Deserialize, Serialize};

use crate::api::Resource;

/// Employee as served by the API.
///
/// `department` and `job_title` are denormalized display names the server
/// includes next to the foreign keys.
#[derive(Debug, Clone, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub employee_code: String,
    pub name: String,
    pub job_title_id: Option<i64>,
    pub job_title: Option<String>,
    pub department_id: Option<i64>,
    pub department: Option<String>,
    pub is_active: bool,
}

impl Resource for Employee {
    const PATH: &'static str = "employees";
    const LABEL: &'static str = "employee";
}

/// Payload for creating or updating an employee.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeePayload {
    pub employee_code: String,
    pub name: String,
    pub job_title_id: Option<i64>,
    pub department_id: Option<i64>,
    pub is_active: bool,
}
