use std::sync::Arc;

use anyhow::{Result, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::info;

use leavesys::api::{EmployeeDraft, HttpRemoteStore, LeaveDraft};
use leavesys::config::Config;
use leavesys::controller::{ActiveView, InteractionController, Screen};
use leavesys::logging;
use leavesys::model::{EmployeeId, LeaveId, StatusDecision};
use leavesys::sync::{MutationCoordinator, SnapshotLoader};
use leavesys::views;

#[derive(Parser, Debug)]
#[command(name = "leavesys", about = "Employees and leave requests from the terminal")]
struct Args {
    /// overrides API_URL
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Totals, pending requests and the next approved leaves
    Dashboard,
    /// Employee list
    Employees,
    /// All leave requests
    Leaves,
    /// Employee details with the current leave balance
    Employee { id: u64 },
    AddEmployee {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        department: String,
        /// YYYY-MM-DD
        #[arg(long)]
        joining_date: String,
    },
    ApplyLeave {
        #[arg(long)]
        employee_id: String,
        #[arg(long)]
        start_date: String,
        #[arg(long)]
        end_date: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
    Approve { id: u64 },
    Reject { id: u64 },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env_with(args.api_url.clone())?;

    let _guard = logging::init(&config);
    info!(api_url = %config.api_url, command = ?args.command, "leavesys starting");

    let store = Arc::new(HttpRemoteStore::with_timeout(&config.api_url, config.request_timeout)?);
    let loader = Arc::new(SnapshotLoader::new(store.clone()));
    let coordinator = Arc::new(MutationCoordinator::new(store, loader));
    let mut ui = InteractionController::new(coordinator);

    let _ = ui.refresh().await;
    if let Screen::ConnectionError(message) = ui.screen() {
        return Err(anyhow!("Connection Error: {message}"));
    }

    match args.command {
        Command::Dashboard => {
            ui.select_view(ActiveView::Dashboard);
            print_view(&ui);
        }
        Command::Employees => {
            ui.select_view(ActiveView::Employees);
            print_view(&ui);
        }
        Command::Leaves => {
            ui.select_view(ActiveView::Leaves);
            print_view(&ui);
        }
        Command::Employee { id } => {
            let employee = ui.show_employee_detail(EmployeeId(id)).await?;
            println!("{} ({})", employee.name, employee.department);
            println!("  email:   {}", employee.email);
            println!("  joined:  {}", employee.joining_date);
            println!("  balance: {}", balance_label(employee.leave_balance));
        }
        Command::AddEmployee {
            name,
            email,
            department,
            joining_date,
        } => {
            ui.open_employee_form();
            *ui.employee_draft_mut() = EmployeeDraft {
                name,
                email,
                department,
                joining_date,
            };
            match ui.submit_employee().await? {
                Some(created) => println!("Added employee #{} {}", created.id, created.name),
                None => println!("Employee added"),
            }
            ui.select_view(ActiveView::Employees);
            print_view(&ui);
        }
        Command::ApplyLeave {
            employee_id,
            start_date,
            end_date,
            reason,
        } => {
            ui.open_leave_form();
            *ui.leave_draft_mut() = LeaveDraft {
                employee_id,
                start_date,
                end_date,
                reason,
            };
            match ui.submit_leave().await? {
                Some(created) => println!("Leave request #{} submitted ({})", created.id, created.status),
                None => println!("Leave request submitted"),
            }
            ui.select_view(ActiveView::Leaves);
            print_view(&ui);
        }
        Command::Approve { id } => decide(&mut ui, LeaveId(id), StatusDecision::Approve).await?,
        Command::Reject { id } => decide(&mut ui, LeaveId(id), StatusDecision::Reject).await?,
    }

    if let Some(notice) = ui.notice() {
        eprintln!("note: {notice}");
    }
    Ok(())
}

async fn decide(ui: &mut InteractionController, id: LeaveId, decision: StatusDecision) -> Result<()> {
    match ui.decide_leave(id, decision).await? {
        Some(updated) => println!("Leave request #{} is now {}", updated.id, updated.status),
        None => println!("Leave request #{id} updated"),
    }
    ui.select_view(ActiveView::Leaves);
    print_view(ui);
    Ok(())
}

fn print_view(ui: &InteractionController) {
    let snapshot = ui.snapshot();

    match ui.active_view() {
        ActiveView::Dashboard => {
            let summary = views::dashboard(&snapshot, Local::now().naive_local());
            println!("Total Employees:  {}", summary.total_employees);
            println!("Pending Requests: {}", summary.pending_requests);
            println!("Upcoming Leaves:  {}", summary.upcoming.len());
            if summary.upcoming.is_empty() {
                println!("\nNo upcoming approved leaves.");
            }
            for row in &summary.upcoming {
                println!(
                    "  {:<20} {} -> {}  {}",
                    row.employee_name, row.leave.start_date, row.leave.end_date, row.leave.reason
                );
            }
        }
        ActiveView::Employees => {
            println!("{:<6} {:<20} {:<16} {:<12} {}", "ID", "NAME", "DEPARTMENT", "JOINED", "BALANCE");
            for e in views::employee_rows(&snapshot) {
                println!(
                    "{:<6} {:<20} {:<16} {:<12} {}",
                    e.id,
                    e.name,
                    e.department,
                    e.joining_date,
                    balance_label(e.leave_balance)
                );
            }
        }
        ActiveView::Leaves => {
            println!("{:<6} {:<20} {:<25} {:<10} {}", "ID", "EMPLOYEE", "DATES", "STATUS", "REASON");
            for row in views::leave_rows(&snapshot) {
                let dates = format!("{} - {}", row.leave.start_date, row.leave.end_date);
                let marker = if row.actionable { "*" } else { " " };
                println!(
                    "{:<6} {:<20} {:<25} {:<10} {}{}",
                    row.leave.id, row.employee_name, dates, row.leave.status.as_ref(), marker, row.leave.reason
                );
            }
        }
    }
}

/// The balance only ever comes from the store; absent means unknown.
fn balance_label(balance: Option<u32>) -> String {
    match balance {
        Some(days) => format!("{days} days"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_balance_is_not_zero() {
        assert_eq!(balance_label(None), "-");
        assert_eq!(balance_label(Some(0)), "0 days");
        assert_eq!(balance_label(Some(18)), "18 days");
    }
}
