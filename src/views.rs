//! Dashboard aggregates and table rows, computed from a snapshot.
//!
//! Everything here is a pure function of its arguments and cheap enough to
//! recompute on every render.

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::{Employee, EmployeeId, LeaveRequest, LeaveStatus, Snapshot};

pub const UNKNOWN_EMPLOYEE: &str = "Unknown";
pub const UPCOMING_LIMIT: usize = 5;

pub fn pending_count(snapshot: &Snapshot) -> usize {
    snapshot
        .leaves()
        .iter()
        .filter(|l| l.status == LeaveStatus::Pending)
        .count()
}

pub fn employee_count(snapshot: &Snapshot) -> usize {
    snapshot.employees().len()
}

/// Approved leaves starting today or later, earliest first, at most
/// `UPCOMING_LIMIT`. Equal start dates are ordered by id.
pub fn upcoming_leaves(snapshot: &Snapshot, now: NaiveDateTime) -> Vec<&LeaveRequest> {
    let today: NaiveDate = now.date();

    let mut upcoming: Vec<&LeaveRequest> = snapshot
        .leaves()
        .iter()
        .filter(|l| l.status == LeaveStatus::Approved && l.start_date >= today)
        .collect();
    upcoming.sort_by_key(|l| (l.start_date, l.id));
    upcoming.truncate(UPCOMING_LIMIT);
    upcoming
}

pub fn resolve_employee_name(snapshot: &Snapshot, employee_id: EmployeeId) -> &str {
    snapshot
        .employee(employee_id)
        .map(|e| e.name.as_str())
        .unwrap_or(UNKNOWN_EMPLOYEE)
}

/// A leave joined with its employee's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRow<'a> {
    pub leave: &'a LeaveRequest,
    pub employee_name: &'a str,
    /// approve / reject offered (PENDING only)
    pub actionable: bool,
}

impl<'a> LeaveRow<'a> {
    fn new(snapshot: &'a Snapshot, leave: &'a LeaveRequest) -> Self {
        Self {
            leave,
            employee_name: resolve_employee_name(snapshot, leave.employee_id),
            actionable: leave.status.is_pending(),
        }
    }
}

pub fn leave_rows(snapshot: &Snapshot) -> Vec<LeaveRow<'_>> {
    snapshot
        .leaves()
        .iter()
        .map(|l| LeaveRow::new(snapshot, l))
        .collect()
}

pub fn employee_rows(snapshot: &Snapshot) -> &[Employee] {
    snapshot.employees()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary<'a> {
    pub total_employees: usize,
    pub pending_requests: usize,
    pub upcoming: Vec<LeaveRow<'a>>,
}

pub fn dashboard(snapshot: &Snapshot, now: NaiveDateTime) -> DashboardSummary<'_> {
    DashboardSummary {
        total_employees: employee_count(snapshot),
        pending_requests: pending_count(snapshot),
        upcoming: upcoming_leaves(snapshot, now)
            .into_iter()
            .map(|l| LeaveRow::new(snapshot, l))
            .collect(),
    }
}
