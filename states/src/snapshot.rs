use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

use crate::{Compute, Error, State};

/// Cloned states and computes handed to a command when it is enqueued.
#[derive(Default)]
pub struct CommandSnapshot {
    states: BTreeMap<TypeId, Box<dyn Any + Send>>,
    computes: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl std::fmt::Debug for CommandSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSnapshot")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .finish()
    }
}

impl CommandSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_state(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.states.insert(id, value);
    }

    pub(crate) fn insert_compute(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.computes.insert(id, value);
    }

    /// Builder used by tests that exercise a command without a full context.
    pub fn with_state<T: State>(mut self, value: T) -> Self {
        self.states.insert(TypeId::of::<T>(), Box::new(value));
        self
    }

    pub fn with_compute<T: Compute>(mut self, value: T) -> Self {
        self.computes.insert(TypeId::of::<T>(), Box::new(value));
        self
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .ok_or_else(Error::state_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was not registered in the context the snapshot was taken from.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>()
            .unwrap_or_else(|_| panic!("State snapshot for {} is missing", type_name::<T>()))
    }

    pub fn try_compute<T: Compute>(&self) -> Result<&T, Error> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .ok_or_else(Error::compute_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was not recorded in the context the snapshot was taken from.
    pub fn compute<T: Compute>(&self) -> &T {
        self.try_compute::<T>()
            .unwrap_or_else(|_| panic!("Compute snapshot for {} is missing", type_name::<T>()))
    }
}
