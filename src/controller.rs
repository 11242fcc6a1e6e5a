use std::sync::Arc;

use strum::{AsRefStr, Display, EnumString};
use tracing::debug;

use crate::api::{EmployeeDraft, LeaveDraft};
use crate::error::{ErrorKind, SyncError};
use crate::model::{Employee, EmployeeId, LeaveId, LeaveRequest, Snapshot, StatusDecision};
use crate::sync::{MutationCoordinator, SnapshotLoader};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Dashboard,
    Employees,
    Leaves,
}

/// What the whole window shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// no snapshot yet, first load pending
    Loading,
    /// first load failed; nothing to show
    ConnectionError(String),
    Ready,
}

/// Transient, non-authoritative UI state.
///
/// Holds the active view, form drafts, modal flags and the last message to
/// show. Reads the committed snapshot from the loader and never writes it.
pub struct InteractionController {
    coordinator: Arc<MutationCoordinator>,
    view: ActiveView,
    employee_form_open: bool,
    employee_draft: EmployeeDraft,
    leave_form_open: bool,
    leave_draft: LeaveDraft,
    form_error: Option<String>,
    detail: Option<Employee>,
    notice: Option<String>,
}

impl InteractionController {
    pub fn new(coordinator: Arc<MutationCoordinator>) -> Self {
        Self {
            coordinator,
            view: ActiveView::default(),
            employee_form_open: false,
            employee_draft: EmployeeDraft::default(),
            leave_form_open: false,
            leave_draft: LeaveDraft::default(),
            form_error: None,
            detail: None,
            notice: None,
        }
    }

    fn loader(&self) -> &Arc<SnapshotLoader> {
        self.coordinator.loader()
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.loader().snapshot()
    }

    pub fn screen(&self) -> Screen {
        let loader = self.loader();
        if loader.has_committed() {
            return Screen::Ready;
        }
        match loader.last_error() {
            Some(err) if err.kind == ErrorKind::Connectivity => Screen::ConnectionError(err.message),
            _ => Screen::Loading,
        }
    }

    /// Manual refresh. A refresh failure over an existing snapshot becomes a
    /// notice; an initial failure is reported through `screen()`.
    pub async fn refresh(&mut self) -> Result<(), SyncError> {
        match self.loader().load().await {
            Ok(outcome) => {
                debug!(?outcome, "Refresh finished");
                Ok(())
            }
            Err(err) => {
                if err.kind == ErrorKind::Refresh {
                    self.notice = Some(err.message.clone());
                }
                Err(err)
            }
        }
    }

    /// A successful mutation whose resync failed still shows stale data;
    /// say so.
    fn surface_resync_error(&mut self) {
        if let Some(err) = self.loader().last_error() {
            if err.kind == ErrorKind::Refresh {
                self.notice = Some(err.message);
            }
        }
    }

    pub fn active_view(&self) -> ActiveView {
        self.view
    }

    pub fn select_view(&mut self, view: ActiveView) {
        self.view = view;
    }

    // ---------- employee form ----------

    pub fn open_employee_form(&mut self) {
        self.employee_form_open = true;
    }

    pub fn close_employee_form(&mut self) {
        self.employee_form_open = false;
        self.employee_draft = EmployeeDraft::default();
        self.form_error = None;
    }

    pub fn is_employee_form_open(&self) -> bool {
        self.employee_form_open
    }

    pub fn employee_draft(&self) -> &EmployeeDraft {
        &self.employee_draft
    }

    pub fn employee_draft_mut(&mut self) -> &mut EmployeeDraft {
        &mut self.employee_draft
    }

    /// On success the draft is cleared and the form closed; on failure the
    /// form stays open with the draft intact and the message inline.
    pub async fn submit_employee(&mut self) -> Result<Option<Employee>, SyncError> {
        self.form_error = None;
        match self.coordinator.create_employee(&self.employee_draft).await {
            Ok(created) => {
                self.close_employee_form();
                self.surface_resync_error();
                Ok(created)
            }
            Err(err) => {
                self.form_error = Some(err.message.clone());
                Err(err)
            }
        }
    }

    // ---------- leave form ----------

    pub fn open_leave_form(&mut self) {
        self.leave_form_open = true;
    }

    pub fn close_leave_form(&mut self) {
        self.leave_form_open = false;
        self.leave_draft = LeaveDraft::default();
        self.form_error = None;
    }

    pub fn is_leave_form_open(&self) -> bool {
        self.leave_form_open
    }

    pub fn leave_draft(&self) -> &LeaveDraft {
        &self.leave_draft
    }

    pub fn leave_draft_mut(&mut self) -> &mut LeaveDraft {
        &mut self.leave_draft
    }

    pub async fn submit_leave(&mut self) -> Result<Option<LeaveRequest>, SyncError> {
        self.form_error = None;
        match self.coordinator.apply_leave(&self.leave_draft).await {
            Ok(created) => {
                self.close_leave_form();
                self.surface_resync_error();
                Ok(created)
            }
            Err(err) => {
                self.form_error = Some(err.message.clone());
                Err(err)
            }
        }
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    // ---------- leave actions ----------

    pub async fn decide_leave(
        &mut self,
        leave_id: LeaveId,
        decision: StatusDecision,
    ) -> Result<Option<LeaveRequest>, SyncError> {
        match self.coordinator.set_leave_status(leave_id, decision).await {
            Ok(updated) => {
                self.surface_resync_error();
                Ok(updated)
            }
            Err(err) => {
                self.notice = Some(err.message.clone());
                Err(err)
            }
        }
    }

    // ---------- employee detail ----------

    pub async fn show_employee_detail(&mut self, employee_id: EmployeeId) -> Result<&Employee, SyncError> {
        match self.coordinator.fetch_employee_detail(employee_id).await {
            Ok(employee) => Ok(&*self.detail.insert(employee)),
            Err(err) => {
                self.notice = Some(err.message.clone());
                Err(err)
            }
        }
    }

    pub fn employee_detail(&self) -> Option<&Employee> {
        self.detail.as_ref()
    }

    pub fn close_employee_detail(&mut self) {
        self.detail = None;
    }

    // ---------- notices ----------

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        self.loader().clear_error();
    }
}
