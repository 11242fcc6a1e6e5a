use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::date_utils::{calendar_date, parse_calendar_date};

/// Body of `POST /employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    pub name: String,
    pub email: String,
    pub department: String,
    #[serde(with = "calendar_date")]
    pub joining_date: NaiveDate,
}

/// Form buffer for a new employee. All fields are raw input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub department: String,
    pub joining_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Joining date must be a valid date (YYYY-MM-DD)")]
    JoiningDate,
}

impl EmployeeDraft {
    /// Shape the request body. Only the date needs parsing; content checks
    /// are left to the remote store.
    pub fn to_request(&self) -> Result<CreateEmployee, DraftError> {
        let joining_date =
            parse_calendar_date(&self.joining_date).ok_or(DraftError::JoiningDate)?;

        Ok(CreateEmployee {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            department: self.department.trim().to_string(),
            joining_date,
        })
    }
}
