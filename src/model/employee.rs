use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::date_utils::calendar_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Employee as served by `GET /employees` and `GET /employees/{id}/balance`.
///
/// The bulk list may omit `leaveBalance`; only the balance endpoint is
/// guaranteed to carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,

    pub name: String,

    pub email: String,

    pub department: String,

    #[serde(with = "calendar_date")]
    pub joining_date: NaiveDate,

    /// remaining leave days, authoritative from the remote store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_balance: Option<u32>,
}
