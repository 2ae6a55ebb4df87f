use std::any::Any;

/// A value stored in [`crate::StateCtx`] and owned by the UI thread.
///
/// `Clone` is required so commands can run against a snapshot.
pub trait State: Any + Send + Clone {}

/// A compute-shaped cache.
///
/// Computes are read by the UI through `StateCtx::cached` and written by commands through
/// an `Updater`. They never perform side effects themselves.
pub trait Compute: Any + Send + Clone {}
