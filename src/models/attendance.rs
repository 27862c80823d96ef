//! Attendance records and check-in/check-out payloads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::Resource;

/// Daily attendance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Late => "Late",
        }
    }
}

/// Attendance record as served by the API.
///
/// Check-in and check-out notes are separate fields; a record with a
/// `check_out` time but no `check_in` is possible when the server backfills
/// terminal data.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub work_date: NaiveDate,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub check_in_note: Option<String>,
    pub check_out_note: Option<String>,
    pub status: AttendanceStatus,
}

impl Resource for AttendanceRecord {
    const PATH: &'static str = "attendance";
    const LABEL: &'static str = "attendance record";
}

/// Payload for the check-in and check-out actions.
///
/// The server stamps the time; the client only names the employee and an
/// optional free-text note.
#[derive(Debug, Clone, Serialize)]
pub struct CheckPayload {
    pub employee_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(serde_json::to_string(&AttendanceStatus::Present).unwrap(), r#""present""#);
        assert_eq!(serde_json::to_string(&AttendanceStatus::Late).unwrap(), r#""late""#);

        let parsed: AttendanceStatus = serde_json::from_str(r#""absent""#).unwrap();
        assert_eq!(parsed, AttendanceStatus::Absent);
    }

    #[test]
    fn test_check_payload_omits_empty_note() {
        let payload = CheckPayload {
            employee_id: 12,
            note: None,
        };
        assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"employee_id":12}"#);
    }

    #[test]
    fn test_record_decodes_with_separate_notes() {
        let json = r#"{
            "id": 3,
            "employee_id": 12,
            "employee_name": "Sara Adel",
            "work_date": "2026-08-20",
            "check_in": "2026-08-20T06:02:11Z",
            "check_out": "2026-08-20T14:31:40Z",
            "check_in_note": "arrived early",
            "check_out_note": "left for site visit",
            "status": "present"
        }"#;

        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.check_in_note.as_deref(), Some("arrived early"));
        assert_eq!(record.check_out_note.as_deref(), Some("left for site visit"));
        assert_eq!(record.status, AttendanceStatus::Present);
    }
}
