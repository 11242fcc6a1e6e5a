use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::employee::CreateEmployee;
use crate::api::error::{ErrorEnvelope, RemoteError};
use crate::api::leave_request::{CreateLeave, UpdateLeaveStatus};
use crate::model::{Employee, EmployeeId, LeaveId, LeaveRequest, LeaveStatus};

/// The authoritative employee / leave service.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// `GET /employees`
    async fn list_employees(&self) -> Result<Vec<Employee>, RemoteError>;

    /// `GET /leaves`
    async fn list_leaves(&self) -> Result<Vec<LeaveRequest>, RemoteError>;

    // Mutations succeed on any 2xx. The echoed record is `None` when the
    // body is empty or not the expected shape.

    /// `POST /employees`
    async fn create_employee(&self, body: &CreateEmployee) -> Result<Option<Employee>, RemoteError>;

    /// `POST /leaves`
    async fn create_leave(&self, body: &CreateLeave) -> Result<Option<LeaveRequest>, RemoteError>;

    /// `PUT /leaves/{id}/status`
    async fn update_leave_status(
        &self,
        leave_id: LeaveId,
        status: LeaveStatus,
    ) -> Result<Option<LeaveRequest>, RemoteError>;

    /// `GET /employees/{id}/balance`
    async fn employee_balance(&self, employee_id: EmployeeId) -> Result<Employee, RemoteError>;
}

/// JSON-over-HTTP `RemoteStore`.
#[derive(Clone)]
pub struct HttpRemoteStore {
    http: Client,
    base_url: String,
}

impl HttpRemoteStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// No timeout is set unless asked for; the transport default applies.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, RemoteError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Read the body of a 2xx response, or turn anything else into `Rejected`.
async fn accepted_body(response: Response, what: &'static str) -> Result<Vec<u8>, RemoteError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let envelope = ErrorEnvelope::from_body(&body);
        warn!(status = status.as_u16(), message = ?envelope.message, what, "Remote store rejected request");
        return Err(RemoteError::Rejected {
            status: status.as_u16(),
            envelope,
        });
    }
    Ok(body.to_vec())
}

/// Split a response into a decoded body or a `Rejected` error.
async fn decode<T: DeserializeOwned>(response: Response, what: &'static str) -> Result<T, RemoteError> {
    let body = accepted_body(response, what).await?;
    serde_json::from_slice(&body).map_err(|source| RemoteError::Decode { what, source })
}

/// Like `decode`, for mutations: the write already happened once the
/// status is 2xx, so an unreadable echo is not an error.
async fn decode_echo<T: DeserializeOwned>(
    response: Response,
    what: &'static str,
) -> Result<Option<T>, RemoteError> {
    let body = accepted_body(response, what).await?;
    match serde_json::from_slice(&body) {
        Ok(echo) => Ok(Some(echo)),
        Err(e) => {
            warn!(error = %e, what, body_len = body.len(), "Accepted mutation without a readable echo");
            Ok(None)
        }
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, RemoteError> {
        debug!(base_url = %self.base_url, "GET /employees");
        let response = self.http.get(self.url("/employees")).send().await?;
        decode(response, "employee list").await
    }

    async fn list_leaves(&self) -> Result<Vec<LeaveRequest>, RemoteError> {
        debug!(base_url = %self.base_url, "GET /leaves");
        let response = self.http.get(self.url("/leaves")).send().await?;
        decode(response, "leave list").await
    }

    async fn create_employee(&self, body: &CreateEmployee) -> Result<Option<Employee>, RemoteError> {
        debug!(email = %body.email, "POST /employees");
        let response = self
            .http
            .post(self.url("/employees"))
            .json(body)
            .send()
            .await?;
        decode_echo(response, "created employee").await
    }

    async fn create_leave(&self, body: &CreateLeave) -> Result<Option<LeaveRequest>, RemoteError> {
        debug!(employee_id = %body.employee_id, "POST /leaves");
        let response = self.http.post(self.url("/leaves")).json(body).send().await?;
        decode_echo(response, "created leave").await
    }

    async fn update_leave_status(
        &self,
        leave_id: LeaveId,
        status: LeaveStatus,
    ) -> Result<Option<LeaveRequest>, RemoteError> {
        debug!(%leave_id, %status, "PUT /leaves/{{id}}/status");
        let response = self
            .http
            .put(self.url(&format!("/leaves/{leave_id}/status")))
            .json(&UpdateLeaveStatus { status })
            .send()
            .await?;
        decode_echo(response, "updated leave").await
    }

    async fn employee_balance(&self, employee_id: EmployeeId) -> Result<Employee, RemoteError> {
        debug!(%employee_id, "GET /employees/{{id}}/balance");
        let response = self
            .http
            .get(self.url(&format!("/employees/{employee_id}/balance")))
            .send()
            .await?;
        decode(response, "employee balance").await
    }
}
