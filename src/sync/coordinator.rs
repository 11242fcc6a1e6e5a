use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::api::{EmployeeDraft, LeaveDraft, RemoteStore};
use crate::error::{
    ADD_EMPLOYEE_FAILED, APPLY_LEAVE_FAILED, DETAIL_FAILED, SyncError, UPDATE_STATUS_FAILED,
};
use crate::model::{Employee, EmployeeId, LeaveId, LeaveRequest, StatusDecision};
use crate::sync::loader::SnapshotLoader;

/// Sends mutations to the remote store and resyncs on success.
///
/// Nothing here edits the snapshot: the post-mutation state always comes
/// from a fresh load.
pub struct MutationCoordinator {
    store: Arc<dyn RemoteStore>,
    loader: Arc<SnapshotLoader>,
}

impl MutationCoordinator {
    pub fn new(store: Arc<dyn RemoteStore>, loader: Arc<SnapshotLoader>) -> Self {
        Self { store, loader }
    }

    pub fn loader(&self) -> &Arc<SnapshotLoader> {
        &self.loader
    }

    /// A failing resync does not undo the mutation; the loader keeps the
    /// refresh error for display.
    async fn resync(&self) {
        if let Err(e) = self.loader.load().await {
            warn!(error = %e, "Resync after mutation failed");
        }
    }

    /// `Ok(None)` means the store accepted the employee but did not echo a
    /// readable record; the resync still runs.
    #[instrument(name = "create_employee", skip(self, draft), fields(email = %draft.email))]
    pub async fn create_employee(&self, draft: &EmployeeDraft) -> Result<Option<Employee>, SyncError> {
        let body = draft
            .to_request()
            .map_err(|e| SyncError::validation(e.to_string()))?;

        let created = self.store.create_employee(&body).await.map_err(|e| {
            error!(error = %e, "Failed to create employee");
            SyncError::validation(e.user_message(ADD_EMPLOYEE_FAILED))
        })?;

        info!(employee_id = ?created.as_ref().map(|e| e.id), "Employee created");
        self.resync().await;
        Ok(created)
    }

    #[instrument(name = "apply_leave", skip(self, draft), fields(employee_id = %draft.employee_id))]
    pub async fn apply_leave(&self, draft: &LeaveDraft) -> Result<Option<LeaveRequest>, SyncError> {
        // built before any network call; a bad id never leaves the client
        let body = draft.to_request().map_err(|e| {
            warn!(error = %e, "Leave request could not be built");
            SyncError::validation(e.to_string())
        })?;

        let created = self.store.create_leave(&body).await.map_err(|e| {
            error!(error = %e, "Failed to apply for leave");
            SyncError::validation(e.user_message(APPLY_LEAVE_FAILED))
        })?;

        info!(leave_id = ?created.as_ref().map(|l| l.id), "Leave request submitted");
        self.resync().await;
        Ok(created)
    }

    /// Approve or reject a request that is PENDING in the committed
    /// snapshot. The new status only becomes visible after the resync.
    #[instrument(name = "set_leave_status", skip(self))]
    pub async fn set_leave_status(
        &self,
        leave_id: LeaveId,
        decision: StatusDecision,
    ) -> Result<Option<LeaveRequest>, SyncError> {
        let snapshot = self.loader.snapshot();
        let current = snapshot
            .leave(leave_id)
            .ok_or_else(|| SyncError::action(format!("Leave request {leave_id} not found")))?;
        let target = current.status.apply(decision).map_err(|e| {
            warn!(error = %e, "Refusing status change");
            SyncError::action(format!("Leave request {leave_id} is already {}", e.from))
        })?;

        let updated = self
            .store
            .update_leave_status(leave_id, target)
            .await
            .map_err(|e| {
                error!(error = %e, "Leave status update failed");
                SyncError::action(e.user_message(UPDATE_STATUS_FAILED))
            })?;

        info!(%leave_id, status = %target, "Leave status updated");
        self.resync().await;
        Ok(updated)
    }

    /// Always a network read: the snapshot may be stale and the bulk list
    /// may not carry `leaveBalance`.
    #[instrument(name = "fetch_employee_detail", skip(self))]
    pub async fn fetch_employee_detail(&self, employee_id: EmployeeId) -> Result<Employee, SyncError> {
        self.store.employee_balance(employee_id).await.map_err(|e| {
            error!(error = %e, "Failed to fetch employee detail");
            SyncError::action(DETAIL_FAILED)
        })
    }
}
