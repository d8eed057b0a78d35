#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Operation state tracking for pkgweb
//!
//! The package daemon only reports steady states (installed, active,
//! available, ...). While an install/remove/enable/disable request is
//! outstanding the UI wants to show "installing..." and friends. The
//! [`StateTracker`] remembers one outstanding operation per package and
//! folds it into every status query until the daemon reports the target
//! state, the entry's deadline passes, or the caller cancels it.
//!
//! Expiry is evaluated lazily when a package is queried; there is no
//! background sweeper.

mod entry;
mod progress;
mod tracker;
mod translate;

pub use entry::TrackedOperation;
pub use progress::ChangeSource;
pub use tracker::{StateTracker, TrackOutcome, DEFAULT_TRACKER_DURATION};
pub use translate::{has_operation_completed, is_noop, translate_status};
