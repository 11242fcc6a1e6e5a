use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::warn;

use crate::model::employee::{Employee, EmployeeId};
use crate::model::leave_request::{LeaveId, LeaveRequest};

/// Employees and leave requests from one fetch cycle.
///
/// Built once by the loader and shared behind an `Arc`; replaced wholesale,
/// never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    employees: Vec<Employee>,
    leaves: Vec<LeaveRequest>,
    employee_index: HashMap<EmployeeId, usize>,
    leave_index: HashMap<LeaveId, usize>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize a fetched pair. Server order is kept; a repeated id keeps
    /// its first occurrence.
    pub fn new(employees: Vec<Employee>, leaves: Vec<LeaveRequest>) -> Self {
        let mut employee_index = HashMap::with_capacity(employees.len());
        let mut kept_employees = Vec::with_capacity(employees.len());
        for employee in employees {
            match employee_index.entry(employee.id) {
                Entry::Occupied(_) => {
                    warn!(employee_id = %employee.id, "Duplicate employee id in fetch, dropped");
                }
                Entry::Vacant(slot) => {
                    slot.insert(kept_employees.len());
                    kept_employees.push(employee);
                }
            }
        }

        let mut leave_index = HashMap::with_capacity(leaves.len());
        let mut kept_leaves = Vec::with_capacity(leaves.len());
        for leave in leaves {
            match leave_index.entry(leave.id) {
                Entry::Occupied(_) => {
                    warn!(leave_id = %leave.id, "Duplicate leave id in fetch, dropped");
                }
                Entry::Vacant(slot) => {
                    slot.insert(kept_leaves.len());
                    kept_leaves.push(leave);
                }
            }
        }

        Self {
            employees: kept_employees,
            leaves: kept_leaves,
            employee_index,
            leave_index,
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn leaves(&self) -> &[LeaveRequest] {
        &self.leaves
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employee_index.get(&id).map(|&i| &self.employees[i])
    }

    pub fn leave(&self, id: LeaveId) -> Option<&LeaveRequest> {
        self.leave_index.get(&id).map(|&i| &self.leaves[i])
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty() && self.leaves.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::leave_request::LeaveStatus;

    pub fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    pub fn employee(id: u64, name: &str) -> Employee {
        Employee {
            id: EmployeeId(id),
            name: name.to_string(),
            email: format!("{}@company.com", name.to_lowercase()),
            department: "Engineering".to_string(),
            joining_date: date("2023-01-01"),
            leave_balance: None,
        }
    }

    pub fn leave(id: u64, employee_id: u64, status: LeaveStatus, start: &str, end: &str) -> LeaveRequest {
        LeaveRequest {
            id: LeaveId(id),
            employee_id: EmployeeId(employee_id),
            start_date: date(start),
            end_date: date(end),
            reason: "Family vacation".to_string(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::model::leave_request::LeaveStatus;

    #[test]
    fn first_occurrence_wins_on_duplicate_ids() {
        let snapshot = Snapshot::new(
            vec![employee(1, "Ann"), employee(2, "Bo"), employee(1, "Impostor")],
            vec![
                leave(10, 1, LeaveStatus::Pending, "2024-01-10", "2024-01-12"),
                leave(10, 2, LeaveStatus::Approved, "2024-02-10", "2024-02-12"),
            ],
        );

        assert_eq!(snapshot.employees().len(), 2);
        assert_eq!(snapshot.employee(EmployeeId(1)).unwrap().name, "Ann");
        assert_eq!(snapshot.leaves().len(), 1);
        assert_eq!(snapshot.leave(LeaveId(10)).unwrap().status, LeaveStatus::Pending);
    }

    #[test]
    fn keeps_server_order() {
        let snapshot = Snapshot::new(vec![employee(3, "Cy"), employee(1, "Ann")], vec![]);
        let ids: Vec<_> = snapshot.employees().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![3, 1]);
        assert!(snapshot.employee(EmployeeId(2)).is_none());
    }

    #[test]
    fn empty_snapshot() {
        assert!(Snapshot::empty().is_empty());
    }
}
