#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for pkgweb
//!
//! This crate provides the values exchanged between the package daemon
//! client, the operation state tracker and the response layer: raw package
//! snapshots, change/task records and the UI-facing package state.

pub mod change;
pub mod package;
pub mod state;

// Re-export commonly used types
pub use change::{Change, Task, TaskProgress, TaskStatus};
pub use package::{PackageType, RawSnapshot, RawStatus};
pub use state::{Operation, SnapState, UiStatus};
