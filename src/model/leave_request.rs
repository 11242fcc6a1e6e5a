use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

use crate::model::employee::EmployeeId;
use crate::utils::date_utils::calendar_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaveId(pub u64);

impl fmt::Display for LeaveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Leave request status. PENDING is the only non-terminal state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// What a reviewer may do with a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusDecision {
    Approve,
    Reject,
}

impl StatusDecision {
    pub fn target(self) -> LeaveStatus {
        match self {
            StatusDecision::Approve => LeaveStatus::Approved,
            StatusDecision::Reject => LeaveStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("leave request is already {from}, cannot {decision:?}")]
pub struct InvalidTransition {
    pub from: LeaveStatus,
    pub decision: StatusDecision,
}

impl LeaveStatus {
    pub fn is_pending(self) -> bool {
        self == LeaveStatus::Pending
    }

    /// PENDING -> APPROVED | REJECTED; both targets are terminal.
    pub(crate) fn apply(self, decision: StatusDecision) -> Result<LeaveStatus, InvalidTransition> {
        match self {
            LeaveStatus::Pending => Ok(decision.target()),
            from => Err(InvalidTransition { from, decision }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: LeaveId,

    /// may point at an employee that no longer exists
    pub employee_id: EmployeeId,

    #[serde(with = "calendar_date")]
    pub start_date: NaiveDate,

    #[serde(with = "calendar_date")]
    pub end_date: NaiveDate,

    #[serde(default)]
    pub reason: String,

    pub status: LeaveStatus,
}
