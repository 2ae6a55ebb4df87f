use std::any::{Any, TypeId, type_name};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use flume::{Receiver, Sender};
use tokio_util::sync::CancellationToken;

use crate::updater::{Origin, Payload, Update};
use crate::{
    Command, CommandSnapshot, Compute, Error, LatestOnlyUpdater, State, TaskHandle, TaskId,
    Updater,
};

type CloneFn = fn(&(dyn Any + Send)) -> Option<Box<dyn Any + Send>>;

fn clone_boxed<T: Any + Send + Clone>(value: &(dyn Any + Send)) -> Option<Box<dyn Any + Send>> {
    value
        .downcast_ref::<T>()
        .map(|v| Box::new(v.clone()) as Box<dyn Any + Send>)
}

struct Slot {
    value: Box<dyn Any + Send>,
    clone: CloneFn,
}

struct RecordedCommand {
    name: &'static str,
    command: Arc<dyn Command>,
}

struct Pending {
    command: TypeId,
    snapshot: CommandSnapshot,
}

/// The application-state container.
///
/// Owned by the composition root and passed by `&mut` to every screen. All reads and
/// writes happen on the UI thread; commands only see snapshots.
pub struct StateCtx {
    states: BTreeMap<TypeId, Slot>,
    computes: BTreeMap<TypeId, Slot>,
    commands: BTreeMap<TypeId, RecordedCommand>,
    queue: VecDeque<Pending>,
    generations: BTreeMap<TypeId, u64>,
    running: BTreeMap<TypeId, TaskHandle>,
    send: Sender<Update>,
    recv: Receiver<Update>,
    #[cfg(not(target_arch = "wasm32"))]
    tasks: tokio::task::JoinSet<()>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("queued", &self.queue.len())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            queue: VecDeque::new(),
            generations: BTreeMap::new(),
            running: BTreeMap::new(),
            send,
            recv,
            #[cfg(not(target_arch = "wasm32"))]
            tasks: tokio::task::JoinSet::new(),
        }
    }

    // =====================
    // Registration
    // =====================

    pub fn add_state<T: State>(&mut self, state: T) {
        self.states.insert(
            TypeId::of::<T>(),
            Slot {
                value: Box::new(state),
                clone: clone_boxed::<T>,
            },
        );
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        self.computes.insert(
            TypeId::of::<T>(),
            Slot {
                value: Box::new(compute),
                clone: clone_boxed::<T>,
            },
        );
    }

    pub fn record_command<C: Command>(&mut self, command: C) {
        self.commands.insert(
            TypeId::of::<C>(),
            RecordedCommand {
                name: type_name::<C>(),
                command: Arc::new(command),
            },
        );
    }

    // =====================
    // Access
    // =====================

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.downcast_ref::<T>())
            .ok_or_else(Error::state_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was never added; registration happens once at startup.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>()
            .unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_state_mut<T: State>(&mut self) -> Result<&mut T, Error> {
        self.states
            .get_mut(&TypeId::of::<T>())
            .and_then(|slot| slot.value.downcast_mut::<T>())
            .ok_or_else(Error::state_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was never added.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.try_state_mut::<T>()
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Edit a state in place.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was never recorded.
    pub fn compute<T: Compute>(&self) -> &T {
        self.cached::<T>()
            .unwrap_or_else(|| panic!("{}", Error::compute_not_found::<T>()))
    }

    /// Mutable access for the UI thread, used to consume queued outcomes.
    pub fn cached_mut<T: Compute>(&mut self) -> Option<&mut T> {
        self.computes
            .get_mut(&TypeId::of::<T>())
            .and_then(|slot| slot.value.downcast_mut::<T>())
    }

    /// An updater that is never gated; for updates originating on the UI thread.
    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, slot) in &self.states {
            if let Some(value) = (slot.clone)(slot.value.as_ref()) {
                snap.insert_state(*id, value);
            }
        }
        for (id, slot) in &self.computes {
            if let Some(value) = (slot.clone)(slot.value.as_ref()) {
                snap.insert_compute(*id, value);
            }
        }
        snap
    }

    // =====================
    // Commands
    // =====================

    /// Queue a command against the current state. Inputs are captured now, so the caller
    /// may change them again before the queue is flushed.
    pub fn enqueue_command<C: Command>(&mut self) {
        let id = TypeId::of::<C>();
        if !self.commands.contains_key(&id) {
            log::error!("{}", Error::command_not_found::<C>());
            return;
        }
        let snapshot = self.snapshot();
        self.queue.push_back(Pending {
            command: id,
            snapshot,
        });
    }

    /// Spawn every queued command.
    pub fn flush_commands(&mut self) {
        while let Some(Pending { command, snapshot }) = self.queue.pop_front() {
            let Some(recorded) = self.commands.get(&command) else {
                continue;
            };
            let name = recorded.name;
            let runner = Arc::clone(&recorded.command);

            let generation = self.generations.entry(command).or_default();
            *generation += 1;
            let generation = *generation;

            let token = CancellationToken::new();
            if runner.latest_only() {
                let handle = TaskHandle::new(TaskId::new(command, generation), token.clone());
                if let Some(previous) = self.running.insert(command, handle) {
                    log::debug!(
                        "cancelling {name} generation {}",
                        previous.id().generation()
                    );
                    previous.cancel();
                }
            }

            log::debug!("dispatching {name} generation {generation}");
            let updater = LatestOnlyUpdater::new(self.send.clone(), command, generation);
            let future = runner.run(snapshot, updater, token);
            self.spawn(future);
        }
    }

    /// Enqueue and flush in one step.
    pub fn dispatch<C: Command>(&mut self) {
        self.enqueue_command::<C>();
        self.flush_commands();
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn(&mut self, future: crate::CommandFuture) {
        self.tasks.spawn(future);
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn(&mut self, future: crate::CommandFuture) {
        wasm_bindgen_futures::spawn_local(future);
    }

    fn is_stale(&self, origin: Origin) -> bool {
        let latest_only = self
            .commands
            .get(&origin.command)
            .is_some_and(|recorded| recorded.command.latest_only());
        latest_only
            && self
                .generations
                .get(&origin.command)
                .is_some_and(|latest| *latest > origin.generation)
    }

    /// Apply every update received since the last call. Returns how many were applied.
    pub fn sync_computes(&mut self) -> usize {
        #[cfg(not(target_arch = "wasm32"))]
        self.reap_finished();

        let mut applied = 0;
        while let Ok(update) = self.recv.try_recv() {
            if let Some(origin) = update.origin
                && self.is_stale(origin)
            {
                log::debug!(
                    "dropping stale update for {} from generation {}",
                    update.target_name,
                    origin.generation
                );
                continue;
            }
            let Some(slot) = self.computes.get_mut(&update.target) else {
                log::warn!("update for unrecorded compute {}", update.target_name);
                continue;
            };
            match update.payload {
                Payload::Replace(value) => slot.value = value,
                Payload::Modify(mutate) => mutate(slot.value.as_mut()),
            }
            applied += 1;
        }
        applied
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn reap_finished(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(err) = result {
                log::error!("command task failed: {err}");
            }
        }
    }

    /// Number of spawned tasks that have not been reaped yet (always 0 on wasm).
    pub fn task_count(&self) -> usize {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.tasks.len()
        }
        #[cfg(target_arch = "wasm32")]
        {
            0
        }
    }

    /// Flush the queue and wait for every task, syncing after each completes.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn run_until_idle(&mut self) {
        self.sync_computes();
        self.flush_commands();
        while let Some(result) = self.tasks.join_next().await {
            if let Err(err) = result {
                log::error!("command task failed: {err}");
            }
            self.sync_computes();
        }
        self.sync_computes();
    }

    /// Cancel every running command.
    pub async fn shutdown(&mut self) {
        for handle in self.running.values() {
            handle.cancel();
        }
        self.running.clear();
        self.queue.clear();
        #[cfg(not(target_arch = "wasm32"))]
        self.tasks.shutdown().await;
    }
}
