pub mod employee;
pub mod leave_request;
pub mod snapshot;

pub use employee::{Employee, EmployeeId};
pub use leave_request::{LeaveId, LeaveRequest, LeaveStatus, StatusDecision};
pub use snapshot::Snapshot;
