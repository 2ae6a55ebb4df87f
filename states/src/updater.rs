use std::any::{Any, TypeId, type_name};

use flume::Sender;

use crate::Compute;

pub(crate) type Mutator = Box<dyn FnOnce(&mut (dyn Any + Send)) + Send>;

pub(crate) enum Payload {
    Replace(Box<dyn Any + Send>),
    Modify(Mutator),
}

/// Which dispatch produced an update; `None` for updates sent from the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Origin {
    pub(crate) command: TypeId,
    pub(crate) generation: u64,
}

pub(crate) struct Update {
    pub(crate) target: TypeId,
    pub(crate) target_name: &'static str,
    pub(crate) origin: Option<Origin>,
    pub(crate) payload: Payload,
}

/// Sends compute updates back to the owning `StateCtx`.
///
/// Updates are queued and applied on the next `StateCtx::sync_computes`.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
    origin: Option<Origin>,
}

impl std::fmt::Debug for Updater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("origin", &self.origin)
            .finish()
    }
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self { send, origin: None }
    }

    fn push(&self, update: Update) {
        if self.send.send(update).is_err() {
            log::warn!("StateCtx dropped before an update could be delivered");
        }
    }

    /// Replace the whole compute value.
    pub fn set<T: Compute>(&self, value: T) {
        self.push(Update {
            target: TypeId::of::<T>(),
            target_name: type_name::<T>(),
            origin: self.origin,
            payload: Payload::Replace(Box::new(value)),
        });
    }

    /// Edit the compute in place once the update is applied.
    ///
    /// Use this when several in-flight commands append to the same cache and a
    /// whole-value `set` would lose one of them.
    pub fn update<T: Compute>(&self, f: impl FnOnce(&mut T) + Send + 'static) {
        let mutator: Mutator = Box::new(move |any: &mut (dyn Any + Send)| {
            if let Some(value) = any.downcast_mut::<T>() {
                f(value);
            }
        });
        self.push(Update {
            target: TypeId::of::<T>(),
            target_name: type_name::<T>(),
            origin: self.origin,
            payload: Payload::Modify(mutator),
        });
    }
}

/// Updater handed to a command run.
///
/// For commands that are latest-only, updates from a run that has since been superseded
/// by a newer dispatch of the same command are discarded when synced.
#[derive(Clone, Debug)]
pub struct LatestOnlyUpdater {
    inner: Updater,
    generation: u64,
}

impl LatestOnlyUpdater {
    pub(crate) fn new(send: Sender<Update>, command: TypeId, generation: u64) -> Self {
        Self {
            inner: Updater {
                send,
                origin: Some(Origin {
                    command,
                    generation,
                }),
            },
            generation,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set<T: Compute>(&self, value: T) {
        self.inner.set(value);
    }

    pub fn update<T: Compute>(&self, f: impl FnOnce(&mut T) + Send + 'static) {
        self.inner.update(f);
    }
}
