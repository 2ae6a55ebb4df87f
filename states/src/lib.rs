//! Application-state container shared by the business layer and the UI.
//!
//! - `State`: plain values owned by the UI thread (inputs, config, screen state).
//! - `Compute`: caches written only through an [`Updater`] by async commands.
//! - `Command`: manual-only async work (network IO), dispatched through [`StateCtx`].
//!
//! Commands never touch the context directly. They receive a [`CommandSnapshot`] taken
//! at enqueue time and report results through an updater; the UI thread applies those
//! results with [`StateCtx::sync_computes`].

mod command;
mod ctx;
mod error;
mod snapshot;
mod state;
mod task;
mod time;
mod updater;

pub use command::{Command, CommandFuture};
pub use ctx::StateCtx;
pub use error::Error;
pub use snapshot::CommandSnapshot;
pub use state::{Compute, State};
pub use task::{TaskHandle, TaskId};
pub use time::Time;
pub use updater::{LatestOnlyUpdater, Updater};
