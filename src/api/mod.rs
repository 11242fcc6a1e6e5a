pub mod client;
pub mod employee;
pub mod error;
pub mod leave_request;

pub use client::{HttpRemoteStore, RemoteStore};
pub use employee::{CreateEmployee, EmployeeDraft};
pub use error::{ErrorEnvelope, RemoteError};
pub use leave_request::{CreateLeave, LeaveDraft, UpdateLeaveStatus};
