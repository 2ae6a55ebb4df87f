//! The list screen every resource shares.

use egui::{Id, RichText, Ui};
use estate_business::import::ImportBatch;
use estate_business::{
    FetchStatus, Importable, Notifications, ResourceCompute, ResourceQuery, ResourceScreen,
};
use estate_states::{StateCtx, Time};

use super::columns::Columns;
use crate::widgets::{self, ImportRequest, TableEvent};

/// Renders the list screen for `R` and runs one pass of its fetcher loop.
pub fn resource_page<R: Columns>(ctx: &mut StateCtx, ui: &mut Ui) {
    page::<R>(ctx, ui, |_, _| {});
}

/// [`resource_page`] plus the paste-to-import and export panel.
pub fn importable_page<R: Columns + Importable>(ctx: &mut StateCtx, ui: &mut Ui) {
    ResourceScreen::<R>::drain_import(ctx);
    page::<R>(ctx, ui, import_tools::<R>);
}

fn page<R: Columns>(ctx: &mut StateCtx, ui: &mut Ui, tools: impl FnOnce(&mut StateCtx, &mut Ui)) {
    ResourceScreen::<R>::tick(ctx);
    let id = Id::new(("resource-page", R::KIND.title()));

    ui.horizontal(|ui| {
        ui.heading(R::KIND.title());
        if R::INSERT_PATH.is_some() && ui.button(format!("Add {}", R::KIND.singular())).clicked() {
            ResourceScreen::<R>::open_create(ctx);
        }
    });
    ui.add_space(4.0);

    let mut query = ctx.state::<ResourceQuery<R>>().query.clone();
    if ui.horizontal_wrapped(|ui| R::query_bar(ui, &mut query)).inner {
        log::debug!("{} query changed: {query:?}", R::KIND.title());
        ctx.state_mut::<ResourceQuery<R>>().query = query.clone();
    }

    let screen = ctx.state::<ResourceScreen<R>>();
    let generation = screen.mount_generation();
    let mut table = screen.table().clone();
    let rejected = widgets::filter_bar(
        ui,
        id.with(("filters", generation)),
        &mut table,
        R::CATEGORY_TITLE,
        &R::categories(),
    );
    *ctx.state_mut::<ResourceScreen<R>>().table_mut() = table;
    if let Some(err) = rejected {
        let now = ctx.state::<Time>().now();
        ctx.update::<Notifications>(|notes| notes.error(err.to_string(), now));
    }

    tools(ctx, ui);
    ui.separator();

    let compute = ctx
        .cached::<ResourceCompute<R>>()
        .cloned()
        .unwrap_or_default();
    match &compute.status {
        FetchStatus::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading…");
            });
        }
        FetchStatus::Error(message) => {
            ui.colored_label(ui.visuals().error_fg_color, message);
        }
        FetchStatus::Idle if !R::query_ready(&query) => {
            ui.label(RichText::new("Fill in the query above to load records").weak());
        }
        FetchStatus::Idle | FetchStatus::Loaded => {}
    }

    let screen = ctx.state::<ResourceScreen<R>>();
    let view = screen.table().view(&compute.rows);
    let menu = *screen.table().menu();

    let requested_page = ui
        .horizontal(|ui| {
            ui.label(format!("{} records", view.total_filtered));
            ui.separator();
            widgets::pagination(ui, &view.page_items, view.current_page, view.total_pages)
        })
        .inner;
    let events = widgets::data_table(ui, &view, &menu);

    if let Some(page) = requested_page {
        ctx.update::<ResourceScreen<R>>(|screen| {
            screen.table_mut().go_to_page(page, &compute.rows);
        });
    }
    for event in events {
        match event {
            TableEvent::ToggleMenu(row) => {
                ctx.update::<ResourceScreen<R>>(|screen| screen.table_mut().menu_mut().toggle(row));
            }
            TableEvent::CloseMenu => {
                ctx.update::<ResourceScreen<R>>(|screen| screen.table_mut().menu_mut().close());
            }
            TableEvent::Action(record, action) => {
                if let Some(url) = ResourceScreen::<R>::run_action(ctx, &record, action) {
                    ui.ctx().open_url(egui::OpenUrl::new_tab(url));
                }
            }
        }
    }
}

fn import_tools<R: Columns + Importable>(ctx: &mut StateCtx, ui: &mut Ui) {
    let busy = ResourceScreen::<R>::is_importing(ctx);
    let id = Id::new(("import", R::KIND.title()));
    match widgets::import_panel(ui, id, R::COLUMNS, busy) {
        Some(ImportRequest::Import(text)) => {
            let batch = ImportBatch::from_delimited(R::COLUMNS, &text);
            ResourceScreen::<R>::start_import(ctx, batch);
        }
        Some(ImportRequest::Export) => {
            let text = ResourceScreen::<R>::export_tsv(ctx);
            let rows = text.lines().count().saturating_sub(1);
            ui.ctx().copy_text(text);
            let now = ctx.state::<Time>().now();
            ctx.update::<Notifications>(|notes| {
                notes.info(format!("Copied {rows} rows to the clipboard"), now);
            });
        }
        None => {}
    }
}
