use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, LatestOnlyUpdater};

pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Manual-only async work.
///
/// A command is dispatched explicitly by the UI (never implicitly by a compute), runs
/// against the snapshot captured at enqueue time, and reports through the updater.
pub trait Command: Send + Sync + 'static {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture;

    /// When true, a new dispatch cancels the previous run of the same command and
    /// discards whatever that run still reports.
    ///
    /// Mutations return false: every run must be allowed to report its own outcome.
    fn latest_only(&self) -> bool {
        true
    }
}
