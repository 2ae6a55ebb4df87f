use std::time::Duration;

use chrono::Utc;
use estate_business::models::{Lead, Listing, Media, Place, PropertyLink, Subscription};
use estate_business::{BusinessConfig, Notifications, Resource, ResourceKind, ResourceScreen, Route};
use estate_states::{StateCtx, Time};

use crate::{pages, state::State, widgets};

pub struct EstateApp {
    pub state: State,
    /// The list screen that was visible last frame. Leaving it (even for its own edit
    /// form) clears this, so coming back starts from fresh filters and a fresh fetch.
    mounted: Option<ResourceKind>,
}

impl EstateApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self {
            state,
            mounted: None,
        }
    }
}

impl eframe::App for EstateApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Utc::now();
        let state_ctx = &mut self.state.ctx;
        state_ctx.state_mut::<Time>().set(now);
        state_ctx.sync_computes();
        state_ctx.update::<Notifications>(|notes| notes.expire(now));

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("Estate Admin");
                ui.separator();
                ui.weak(state_ctx.state::<BusinessConfig>().env.label());
            });
        });

        egui::SidePanel::left("nav_panel")
            .resizable(false)
            .default_width(160.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                let current = state_ctx.state::<Route>().kind();
                for kind in ResourceKind::ALL {
                    if ui.selectable_label(current == kind, kind.title()).clicked() {
                        *state_ctx.state_mut::<Route>() = Route::Screen(kind);
                    }
                }
            });

        let route = state_ctx.state::<Route>().clone();
        match &route {
            Route::Screen(kind) if self.mounted != Some(*kind) => {
                mount(*kind, state_ctx);
                self.mounted = Some(*kind);
            }
            Route::Screen(_) => {}
            Route::Edit(_) | Route::Invoice { .. } => self.mounted = None,
        }

        egui::CentralPanel::default().show(ctx, |ui| match route {
            Route::Screen(kind) => screen(kind, state_ctx, ui),
            Route::Edit(kind) => edit(kind, state_ctx, ui),
            Route::Invoice { .. } => pages::invoice_page(state_ctx, ui),
        });

        if let Some(index) = widgets::toasts(ctx, state_ctx.state::<Notifications>()) {
            state_ctx.update::<Notifications>(|notes| notes.dismiss(index));
        }

        // Run background jobs
        state_ctx.flush_commands();

        let waiting = state_ctx.task_count() > 0 || cfg!(target_arch = "wasm32");
        if waiting || !state_ctx.state::<Notifications>().is_empty() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

fn mount(kind: ResourceKind, ctx: &mut StateCtx) {
    match kind {
        ResourceKind::Listings => ResourceScreen::<Listing>::mount(ctx),
        ResourceKind::Leads => ResourceScreen::<Lead>::mount(ctx),
        ResourceKind::Subscriptions => ResourceScreen::<Subscription>::mount(ctx),
        ResourceKind::PropertyLinks => ResourceScreen::<PropertyLink>::mount(ctx),
        ResourceKind::Places => ResourceScreen::<Place>::mount(ctx),
        ResourceKind::Media => ResourceScreen::<Media>::mount(ctx),
    }
}

fn screen(kind: ResourceKind, ctx: &mut StateCtx, ui: &mut egui::Ui) {
    match kind {
        ResourceKind::Listings => pages::resource_page::<Listing>(ctx, ui),
        ResourceKind::Leads => pages::resource_page::<Lead>(ctx, ui),
        ResourceKind::Subscriptions => pages::resource_page::<Subscription>(ctx, ui),
        ResourceKind::PropertyLinks => pages::importable_page::<PropertyLink>(ctx, ui),
        ResourceKind::Places => pages::importable_page::<Place>(ctx, ui),
        ResourceKind::Media => pages::resource_page::<Media>(ctx, ui),
    }
}

/// The screen keeps ticking under its form so the save outcome is picked up.
fn edit(kind: ResourceKind, ctx: &mut StateCtx, ui: &mut egui::Ui) {
    fn form<R: Resource>(ctx: &mut StateCtx, ui: &mut egui::Ui) {
        ResourceScreen::<R>::tick(ctx);
        pages::edit_page::<R>(ctx, ui);
    }
    match kind {
        ResourceKind::Listings => form::<Listing>(ctx, ui),
        ResourceKind::Leads => form::<Lead>(ctx, ui),
        ResourceKind::Subscriptions => form::<Subscription>(ctx, ui),
        ResourceKind::PropertyLinks => form::<PropertyLink>(ctx, ui),
        ResourceKind::Places => form::<Place>(ctx, ui),
        ResourceKind::Media => form::<Media>(ctx, ui),
    }
}
