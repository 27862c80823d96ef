//! Salary structures and payslips.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::Resource;

/// Salary structure as served by the API.
///
/// All monetary amounts are monthly figures in the server's currency.
#[derive(Debug, Clone, Deserialize)]
pub struct Salary {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub base_salary: f64,
    pub housing_allowance: f64,
    pub transport_allowance: f64,
    pub social_insurance: f64,
    pub effective_date: NaiveDate,
}

impl Salary {
    /// Base plus allowances.
    pub fn gross(&self) -> f64 {
        self.base_salary + self.housing_allowance + self.transport_allowance
    }

    /// Gross minus deductions.
    pub fn net(&self) -> f64 {
        self.gross() - self.social_insurance
    }
}

impl Resource for Salary {
    const PATH: &'static str = "salaries";
    const LABEL: &'static str = "salary";
}

/// Payload for creating or updating a salary structure.
#[derive(Debug, Clone, Serialize)]
pub struct SalaryPayload {
    pub employee_id: i64,
    pub base_salary: f64,
    pub housing_allowance: f64,
    pub transport_allowance: f64,
    pub social_insurance: f64,
    pub effective_date: NaiveDate,
}

/// Payslip lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayslipStatus {
    Generated,
    Paid,
}

impl PayslipStatus {
    /// Wire string, as sent to the status-transition endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Paid => "paid",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Generated => "Generated",
            Self::Paid => "Paid",
        }
    }
}

/// Payslip as served by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Payslip {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    /// Pay period in `YYYY-MM` form.
    pub pay_period: String,
    pub gross_salary: f64,
    pub net_salary: f64,
    pub status: PayslipStatus,
}

impl Resource for Payslip {
    const PATH: &'static str = "payslips";
    const LABEL: &'static str = "payslip";
}

/// Payload asking the server to generate payslips for a pay period.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratePayslips {
    /// Pay period in `YYYY-MM` form.
    pub pay_period: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_salary() -> Salary {
        Salary {
            id: 1,
            employee_id: 9,
            employee_name: "Nadia Hassan".to_string(),
            base_salary: 9000.0,
            housing_allowance: 1500.0,
            transport_allowance: 500.0,
            social_insurance: 990.0,
            effective_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_gross_sums_base_and_allowances() {
        assert_eq!(sample_salary().gross(), 11000.0);
    }

    #[test]
    fn test_net_subtracts_deductions() {
        assert_eq!(sample_salary().net(), 10010.0);
    }

    #[test]
    fn test_payslip_status_wire_strings() {
        assert_eq!(serde_json::to_string(&PayslipStatus::Generated).unwrap(), r#""generated""#);
        let parsed: PayslipStatus = serde_json::from_str(r#""paid""#).unwrap();
        assert_eq!(parsed, PayslipStatus::Paid);
        assert_eq!(parsed.as_str(), "paid");
    }
}
