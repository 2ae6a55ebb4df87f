//! Bookkeeping for running command tasks.
//!
//! Every dispatch gets a [`TaskId`] made of the command's `TypeId` and a per-command
//! generation. The context keeps one [`TaskHandle`] per latest-only command so the
//! previous run can be cancelled cooperatively when a newer one is spawned.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    command: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(command: TypeId, generation: u64) -> Self {
        Self {
            command,
            generation,
        }
    }

    pub fn command(&self) -> TypeId {
        self.command
    }

    /// Higher means more recently dispatched.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when `other` is a later dispatch of the same command.
    pub fn is_superseded_by(&self, other: &TaskId) -> bool {
        self.command == other.command && other.generation > self.generation
    }
}

/// A spawned run plus the token it watches for cancellation.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Signals the run to stop. It does not abort it; the command has to observe
    /// `cancelled()` itself.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_generation_supersedes_same_command() {
        let first = TaskId::new(TypeId::of::<String>(), 1);
        let second = TaskId::new(TypeId::of::<String>(), 2);
        let other = TaskId::new(TypeId::of::<u8>(), 5);

        assert!(first.is_superseded_by(&second));
        assert!(!second.is_superseded_by(&first));
        assert!(!first.is_superseded_by(&other));
    }

    #[test]
    fn cancelling_a_handle_cancels_every_clone_of_its_token() {
        let handle = TaskHandle::new(
            TaskId::new(TypeId::of::<String>(), 1),
            CancellationToken::new(),
        );
        let token = handle.cancellation_token();
        let cloned = handle.clone();

        assert!(!token.is_cancelled());
        cloned.cancel();
        assert!(handle.is_cancelled());
        assert!(token.is_cancelled());
    }
}
