//! Client-side sync and derived-view engine for a remote employee / leave
//! request store.
//!
//! [`sync::SnapshotLoader`] keeps one immutable [`model::Snapshot`],
//! [`sync::MutationCoordinator`] sends mutations and resyncs, [`views`]
//! derives dashboard data, and [`controller::InteractionController`] holds
//! the transient UI state on top.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod sync;
pub mod utils;
pub mod views;

pub use error::{ErrorKind, SyncError};
