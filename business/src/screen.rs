//! Per-resource screen state and the fetcher loop that drives it.
//!
//! The UI calls [`ResourceScreen::tick`] once per frame for the visible screen, then
//! flushes the command queue. Everything a screen reacts to (fetched rows, mutation
//! outcomes, bulk-insert results) arrives through computes applied by
//! `StateCtx::sync_computes`.

use crate::BusinessConfig;
use crate::form::EditForm;
use crate::import::{
    BulkInsertCommand, BulkInsertCompute, BulkInsertInput, BulkInsertStatus, ImportBatch,
    Importable, export_rows, to_tsv,
};
use crate::mutation::{MutateRowCommand, MutationInput, MutationOutcome, RowActionCompute};
use crate::notifications::Notifications;
use crate::resource::{
    FetchResourceCommand, FetchStatus, Resource, ResourceCompute, ResourceQuery,
};
use crate::route::Route;
use crate::table::{DataTable, Dispatch, FetchGate, RowAction};
use estate_states::{State, StateCtx, Time};

/// States every screen shares: clock, toasts, route, edit form and config.
pub fn register_shared(ctx: &mut StateCtx, config: BusinessConfig) {
    ctx.add_state(config);
    ctx.add_state(Time::default());
    ctx.add_state(Notifications::default());
    ctx.add_state(Route::default());
    ctx.add_state(EditForm::default());
}

#[derive(Debug)]
pub struct ResourceScreen<R: Resource> {
    table: DataTable<R>,
    gate: FetchGate<R::Query>,
    seen_version: u64,
    mounts: u64,
}

impl<R: Resource> Default for ResourceScreen<R> {
    fn default() -> Self {
        Self {
            table: DataTable::new(R::TABLE),
            gate: FetchGate::default(),
            seen_version: 0,
            mounts: 0,
        }
    }
}

impl<R: Resource> Clone for ResourceScreen<R> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            gate: self.gate.clone(),
            seen_version: self.seen_version,
            mounts: self.mounts,
        }
    }
}

impl<R: Resource> State for ResourceScreen<R> {}

impl<R: Resource> ResourceScreen<R> {
    pub fn register(ctx: &mut StateCtx) {
        ctx.add_state(Self::default());
        ctx.add_state(ResourceQuery::<R>::default());
        ctx.add_state(MutationInput::<R>::default());
        ctx.record_compute(ResourceCompute::<R>::default());
        ctx.record_compute(RowActionCompute::<R>::default());
        ctx.record_command(FetchResourceCommand::<R>::default());
        ctx.record_command(MutateRowCommand::<R>::default());
    }

    pub fn table(&self) -> &DataTable<R> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DataTable<R> {
        &mut self.table
    }

    /// Changes on every mount. Widgets salt their ids with it so drafts held in
    /// UI memory do not outlive the visit they were typed in.
    pub fn mount_generation(&self) -> u64 {
        self.mounts
    }

    /// The screen became visible: rows and filters start empty and the next tick fetches.
    pub fn mount(ctx: &mut StateCtx) {
        log::debug!("mounting {} screen", R::KIND.title());
        ctx.update::<Self>(|screen| {
            screen.table = DataTable::new(R::TABLE);
            screen.gate.reset();
            screen.mounts += 1;
        });
        if let Some(compute) = ctx.cached_mut::<ResourceCompute<R>>() {
            compute.rows.clear();
            compute.status = FetchStatus::Idle;
        }
    }

    /// One pass of the fetcher loop. Returns whether a fetch was enqueued.
    pub fn tick(ctx: &mut StateCtx) -> bool {
        let outcomes = ctx
            .cached_mut::<RowActionCompute<R>>()
            .map(RowActionCompute::take)
            .unwrap_or_default();
        for outcome in outcomes {
            Self::apply_outcome(ctx, outcome);
        }

        let version = ctx
            .cached::<ResourceCompute<R>>()
            .map_or(0, |compute| compute.version);
        if version != ctx.state::<Self>().seen_version {
            let rows = ctx.compute::<ResourceCompute<R>>().rows.clone();
            ctx.update::<Self>(|screen| {
                screen.seen_version = version;
                screen.table.on_data_refreshed(&rows);
            });
        }

        let query = ctx.state::<ResourceQuery<R>>().query.clone();
        if !R::query_ready(&query) {
            return false;
        }
        let trigger = ctx.state::<Self>().table.refresh_trigger();
        let due = ctx.state_mut::<Self>().gate.poll(query, trigger);
        if due {
            ctx.enqueue_command::<FetchResourceCommand<R>>();
        }
        due
    }

    fn apply_outcome(ctx: &mut StateCtx, outcome: MutationOutcome) {
        let now = ctx.state::<Time>().now();
        match outcome.result {
            Ok(message) => {
                ctx.update::<Notifications>(|notes| notes.success(message, now));
                ctx.update::<Self>(|screen| {
                    screen.table.menu_mut().close();
                    screen.table.request_refresh();
                });
                if outcome.kind.is_form_submission()
                    && *ctx.state::<Route>() == Route::Edit(R::KIND)
                {
                    *ctx.state_mut::<Route>() = Route::Screen(R::KIND);
                }
            }
            Err(message) => {
                ctx.update::<Notifications>(|notes| notes.error(message, now));
            }
        }
    }

    /// Handle a row action picked from the menu.
    ///
    /// Returns the URL to open when the action leads off-site; opening it is up to the UI.
    pub fn run_action(ctx: &mut StateCtx, record: &R, action: RowAction) -> Option<String> {
        let now = ctx.state::<Time>().now();
        let dispatch = action.resolve(record, &ctx.state::<BusinessConfig>().site_url);
        log::debug!("{} {:?} -> {:?}", R::KIND.singular(), record.row_id(), action);

        if !matches!(dispatch, Dispatch::Mutate(_)) {
            ctx.update::<Self>(|screen| screen.table.menu_mut().close());
        }
        match dispatch {
            Dispatch::Mutate(mutation) => {
                ctx.update::<MutationInput<R>>(|input| {
                    input.target = Some(record.clone());
                    input.mutation = Some(mutation);
                });
                ctx.enqueue_command::<MutateRowCommand<R>>();
            }
            Dispatch::Navigate(record) => match EditForm::edit(&record) {
                Ok(form) => {
                    *ctx.state_mut::<EditForm>() = form;
                    *ctx.state_mut::<Route>() = Route::Edit(R::KIND);
                }
                Err(err) => {
                    log::error!("cannot open {} for editing: {err}", R::KIND.singular());
                    ctx.update::<Notifications>(|notes| {
                        notes.error("This record cannot be edited", now);
                    });
                }
            },
            Dispatch::ShowInvoice(invoice) => {
                *ctx.state_mut::<Route>() = Route::Invoice {
                    back: R::KIND,
                    invoice: Some(invoice),
                };
            }
            Dispatch::OpenUrl(url) => return Some(url),
            Dispatch::Unavailable(reason) => {
                ctx.update::<Notifications>(|notes| notes.error(reason, now));
            }
        }
        None
    }

    /// Open a blank form for a new record.
    pub fn open_create(ctx: &mut StateCtx) {
        *ctx.state_mut::<EditForm>() = EditForm::create::<R>();
        *ctx.state_mut::<Route>() = Route::Edit(R::KIND);
    }

    /// Validate the open form and enqueue its mutation. False when validation failed.
    pub fn submit_form(ctx: &mut StateCtx) -> bool {
        let Some((target, mutation)) = ctx.state_mut::<EditForm>().submission::<R>() else {
            return false;
        };
        ctx.update::<MutationInput<R>>(|input| {
            input.target = target;
            input.mutation = Some(mutation);
        });
        ctx.enqueue_command::<MutateRowCommand<R>>();
        true
    }
}

impl<R: Importable> ResourceScreen<R> {
    pub fn register_import(ctx: &mut StateCtx) {
        ctx.add_state(BulkInsertInput::<R>::default());
        ctx.record_compute(BulkInsertCompute::<R>::default());
        ctx.record_command(BulkInsertCommand::<R>::default());
    }

    /// Enqueue a bulk insert of `batch`. False when no row survived validation.
    pub fn start_import(ctx: &mut StateCtx, batch: ImportBatch) -> bool {
        let now = ctx.state::<Time>().now();
        if batch.is_empty() {
            let message = format!("Nothing to import ({} incomplete rows)", batch.dropped);
            ctx.update::<Notifications>(|notes| notes.error(message, now));
            return false;
        }
        let message = if batch.dropped > 0 {
            format!(
                "Importing {} rows, skipped {} incomplete",
                batch.accepted, batch.dropped
            )
        } else {
            format!("Importing {} rows", batch.accepted)
        };
        ctx.update::<Notifications>(|notes| notes.info(message, now));
        *ctx.state_mut::<BulkInsertInput<R>>() = BulkInsertInput::new(batch);
        ctx.enqueue_command::<BulkInsertCommand<R>>();
        true
    }

    /// Report a finished bulk insert once. Any inserted row refreshes the table.
    pub fn drain_import(ctx: &mut StateCtx) -> Option<(usize, usize)> {
        let compute = ctx.cached_mut::<BulkInsertCompute<R>>()?;
        let BulkInsertStatus::Done { inserted, failed } = compute.status else {
            return None;
        };
        compute.status = BulkInsertStatus::Idle;

        let now = ctx.state::<Time>().now();
        ctx.update::<Notifications>(|notes| {
            if failed == 0 {
                notes.success(format!("Imported {inserted} rows"), now);
            } else {
                notes.error(format!("Imported {inserted} rows, {failed} failed"), now);
            }
        });
        if inserted > 0 {
            ctx.update::<Self>(|screen| screen.table.request_refresh());
        }
        Some((inserted, failed))
    }

    pub fn is_importing(ctx: &StateCtx) -> bool {
        ctx.cached::<BulkInsertCompute<R>>()
            .is_some_and(|compute| matches!(compute.status, BulkInsertStatus::Running { .. }))
    }

    /// The rows passing the current filters, as tab-separated text with a header.
    pub fn export_tsv(ctx: &StateCtx) -> String {
        let rows = &ctx.compute::<ResourceCompute<R>>().rows;
        let filtered = ctx.state::<Self>().table.filter().apply(rows);
        to_tsv(&export_rows(filtered))
    }
}
