//! Leave types and leave requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::Resource;

/// Leave request lifecycle status.
///
/// `Pending` is the only state that accepts a transition; approval and
/// rejection are both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    /// Wire string, as sent to the status-transition endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Whether no further transition is offered from this state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Leave type as served by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveType {
    pub id: i64,
    pub name: String,
    /// Annual entitlement in days.
    pub default_balance: i32,
    pub is_active: bool,
}

impl Resource for LeaveType {
    const PATH: &'static str = "leave-types";
    const LABEL: &'static str = "leave type";
}

/// Payload for creating or updating a leave type.
#[derive(Debug, Clone, Serialize)]
pub struct LeaveTypePayload {
    pub name: String,
    pub default_balance: i32,
    pub is_active: bool,
}

/// Leave request as served by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveRequest {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub leave_type_id: i64,
    pub leave_type_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    pub rejection_reason: Option<String>,
    pub approved_by: Option<String>,
}

impl LeaveRequest {
    /// Inclusive day span of the request.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

impl Resource for LeaveRequest {
    const PATH: &'static str = "leave-requests";
    const LABEL: &'static str = "leave request";
}

/// Payload for creating or updating a leave request.
#[derive(Debug, Clone, Serialize)]
pub struct LeaveRequestPayload {
    pub employee_id: i64,
    pub leave_type_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_status_wire_strings() {
        assert_eq!(serde_json::to_string(&LeaveStatus::Pending).unwrap(), r#""pending""#);
        let parsed: LeaveStatus = serde_json::from_str(r#""rejected""#).unwrap();
        assert_eq!(parsed, LeaveStatus::Rejected);
        assert_eq!(parsed.as_str(), "rejected");
    }

    #[test]
    fn test_only_pending_accepts_transitions() {
        assert!(!LeaveStatus::Pending.is_terminal());
        assert!(LeaveStatus::Approved.is_terminal());
        assert!(LeaveStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_request_day_span_is_inclusive() {
        let request = LeaveRequest {
            id: 1,
            employee_id: 4,
            employee_name: "Omar Farouk".to_string(),
            leave_type_id: 2,
            leave_type_name: "Annual".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 8, 12).unwrap(),
            reason: None,
            status: LeaveStatus::Pending,
            rejection_reason: None,
            approved_by: None,
        };

        assert_eq!(request.days(), 3);
    }

    #[test]
    fn test_single_day_request() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
        let request = LeaveRequest {
            id: 1,
            employee_id: 4,
            employee_name: "Omar Farouk".to_string(),
            leave_type_id: 2,
            leave_type_name: "Sick".to_string(),
            start_date: date,
            end_date: date,
            reason: Some("clinic appointment".to_string()),
            status: LeaveStatus::Pending,
            rejection_reason: None,
            approved_by: None,
        };

        assert_eq!(request.days(), 1);
    }
}
