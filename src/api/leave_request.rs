use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{EmployeeId, LeaveStatus};
use crate::utils::date_utils::{calendar_date, parse_calendar_date};

/// Body of `POST /leaves`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeave {
    /// sent as a JSON integer
    pub employee_id: EmployeeId,
    #[serde(with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(with = "calendar_date")]
    pub end_date: NaiveDate,
    pub reason: String,
}

/// Body of `PUT /leaves/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLeaveStatus {
    pub status: LeaveStatus,
}

/// Form buffer for a leave application. `employee_id` holds whatever the
/// employee picker produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveDraft {
    pub employee_id: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveDraftError {
    #[error("Select an employee")]
    MissingEmployee,
    #[error("Employee id {0:?} is not a valid number")]
    EmployeeId(String),
    #[error("Start date must be a valid date (YYYY-MM-DD)")]
    StartDate,
    #[error("End date must be a valid date (YYYY-MM-DD)")]
    EndDate,
}

impl LeaveDraft {
    /// Coerce the draft into a request body. `startDate <= endDate` is left
    /// to the remote store.
    pub fn to_request(&self) -> Result<CreateLeave, LeaveDraftError> {
        let raw_id = self.employee_id.trim();
        if raw_id.is_empty() {
            return Err(LeaveDraftError::MissingEmployee);
        }
        // digits only: `u64::from_str` would also take a leading '+'
        if !raw_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LeaveDraftError::EmployeeId(raw_id.to_string()));
        }
        let employee_id = raw_id
            .parse::<u64>()
            .map(EmployeeId)
            .map_err(|_| LeaveDraftError::EmployeeId(raw_id.to_string()))?;

        let start_date = parse_calendar_date(&self.start_date).ok_or(LeaveDraftError::StartDate)?;
        let end_date = parse_calendar_date(&self.end_date).ok_or(LeaveDraftError::EndDate)?;

        Ok(CreateLeave {
            employee_id,
            start_date,
            end_date,
            reason: self.reason.clone(),
        })
    }
}
