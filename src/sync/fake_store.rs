//! In-memory `RemoteStore` for unit tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::api::{CreateEmployee, CreateLeave, ErrorEnvelope, RemoteError, RemoteStore};
use crate::model::{Employee, EmployeeId, LeaveId, LeaveRequest, LeaveStatus};

pub const DEFAULT_BALANCE: u32 = 20;

#[derive(Default)]
struct Inner {
    employees: Vec<Employee>,
    leaves: Vec<LeaveRequest>,
    fail_employee_list: bool,
    fail_leave_list: bool,
    reject_next: Option<(u16, ErrorEnvelope)>,
    drop_next_echo: bool,
    gates: VecDeque<oneshot::Receiver<()>>,
    calls: Vec<&'static str>,
}

#[derive(Default)]
pub struct FakeStore {
    inner: Mutex<Inner>,
}

fn rejected(status: u16, message: &str) -> RemoteError {
    RemoteError::Rejected {
        status,
        envelope: ErrorEnvelope::new(message),
    }
}

impl FakeStore {
    pub fn seeded(employees: Vec<Employee>, leaves: Vec<LeaveRequest>) -> Self {
        let store = Self::default();
        {
            let mut inner = store.inner.lock();
            inner.employees = employees;
            inner.leaves = leaves;
        }
        store
    }

    pub fn replace_employees(&self, employees: Vec<Employee>) {
        self.inner.lock().employees = employees;
    }

    pub fn replace_leaves(&self, leaves: Vec<LeaveRequest>) {
        self.inner.lock().leaves = leaves;
    }

    pub fn fail_employee_list(&self, fail: bool) {
        self.inner.lock().fail_employee_list = fail;
    }

    pub fn fail_leave_list(&self, fail: bool) {
        self.inner.lock().fail_leave_list = fail;
    }

    /// The next mutation or balance read is rejected with this envelope.
    pub fn reject_next(&self, status: u16, envelope: ErrorEnvelope) {
        self.inner.lock().reject_next = Some((status, envelope));
    }

    /// The next mutation is applied but answers without a readable record.
    pub fn drop_next_echo(&self) {
        self.inner.lock().drop_next_echo = true;
    }

    /// The next `list_employees` call holds its (already computed) result
    /// until the gate fires.
    pub fn push_gate(&self, gate: oneshot::Receiver<()>) {
        self.inner.lock().gates.push_back(gate);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.inner.lock().calls.clone()
    }

    pub fn mutation_calls(&self) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| c.starts_with("POST") || c.starts_with("PUT"))
            .count()
    }

    fn take_rejection(inner: &mut Inner) -> Option<RemoteError> {
        inner.reject_next.take().map(|(status, envelope)| RemoteError::Rejected { status, envelope })
    }

    fn echo<T>(inner: &mut Inner, record: T) -> Option<T> {
        (!std::mem::take(&mut inner.drop_next_echo)).then_some(record)
    }
}

#[async_trait]
impl RemoteStore for FakeStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, RemoteError> {
        let (result, gate) = {
            let mut inner = self.inner.lock();
            inner.calls.push("GET /employees");
            let result = if inner.fail_employee_list {
                Err(rejected(503, "Service unavailable"))
            } else {
                // the bulk list does not carry balances
                Ok(inner
                    .employees
                    .iter()
                    .cloned()
                    .map(|mut e| {
                        e.leave_balance = None;
                        e
                    })
                    .collect())
            };
            (result, inner.gates.pop_front())
        };

        if let Some(gate) = gate {
            let _ = gate.await;
        }
        result
    }

    async fn list_leaves(&self) -> Result<Vec<LeaveRequest>, RemoteError> {
        let mut inner = self.inner.lock();
        inner.calls.push("GET /leaves");
        if inner.fail_leave_list {
            return Err(rejected(503, "Service unavailable"));
        }
        Ok(inner.leaves.clone())
    }

    async fn create_employee(&self, body: &CreateEmployee) -> Result<Option<Employee>, RemoteError> {
        let mut inner = self.inner.lock();
        inner.calls.push("POST /employees");
        if let Some(err) = Self::take_rejection(&mut inner) {
            return Err(err);
        }

        let next_id = inner.employees.iter().map(|e| e.id.0).max().unwrap_or(0) + 1;
        let employee = Employee {
            id: EmployeeId(next_id),
            name: body.name.clone(),
            email: body.email.clone(),
            department: body.department.clone(),
            joining_date: body.joining_date,
            leave_balance: Some(DEFAULT_BALANCE),
        };
        inner.employees.push(employee.clone());
        Ok(Self::echo(&mut inner, employee))
    }

    async fn create_leave(&self, body: &CreateLeave) -> Result<Option<LeaveRequest>, RemoteError> {
        let mut inner = self.inner.lock();
        inner.calls.push("POST /leaves");
        if let Some(err) = Self::take_rejection(&mut inner) {
            return Err(err);
        }
        if !inner.employees.iter().any(|e| e.id == body.employee_id) {
            return Err(rejected(404, "Employee not found"));
        }

        let next_id = inner.leaves.iter().map(|l| l.id.0).max().unwrap_or(0) + 1;
        let leave = LeaveRequest {
            id: LeaveId(next_id),
            employee_id: body.employee_id,
            start_date: body.start_date,
            end_date: body.end_date,
            reason: body.reason.clone(),
            status: LeaveStatus::Pending,
        };
        inner.leaves.push(leave.clone());
        Ok(Self::echo(&mut inner, leave))
    }

    async fn update_leave_status(
        &self,
        leave_id: LeaveId,
        status: LeaveStatus,
    ) -> Result<Option<LeaveRequest>, RemoteError> {
        let mut inner = self.inner.lock();
        inner.calls.push("PUT /leaves/{id}/status");
        if let Some(err) = Self::take_rejection(&mut inner) {
            return Err(err);
        }

        let leave = inner
            .leaves
            .iter_mut()
            .find(|l| l.id == leave_id)
            .ok_or_else(|| rejected(404, "Leave request not found"))?;
        if leave.status != LeaveStatus::Pending {
            return Err(rejected(400, "Leave request already processed"));
        }
        leave.status = status;
        let updated = leave.clone();
        Ok(Self::echo(&mut inner, updated))
    }

    async fn employee_balance(&self, employee_id: EmployeeId) -> Result<Employee, RemoteError> {
        let mut inner = self.inner.lock();
        inner.calls.push("GET /employees/{id}/balance");
        if let Some(err) = Self::take_rejection(&mut inner) {
            return Err(err);
        }

        inner
            .employees
            .iter()
            .find(|e| e.id == employee_id)
            .map(|e| Employee {
                leave_balance: Some(e.leave_balance.unwrap_or(DEFAULT_BALANCE)),
                ..e.clone()
            })
            .ok_or_else(|| rejected(404, "Employee not found"))
    }
}
