pub mod coordinator;
pub mod loader;

#[cfg(test)]
pub(crate) mod fake_store;

pub use coordinator::MutationCoordinator;
pub use loader::{LoadOutcome, SnapshotLoader};
