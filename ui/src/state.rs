use estate_business::models::{Lead, Listing, Media, Place, PropertyLink, Subscription};
use estate_business::{BusinessConfig, ResourceScreen, register_shared};
use estate_states::StateCtx;

/// The main application state: the one `StateCtx` every page borrows.
pub struct State {
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        let config = BusinessConfig::from_env().unwrap_or_else(|err| {
            log::warn!("ignoring environment overrides: {err}");
            BusinessConfig::default()
        });
        Self::with_config(config)
    }
}

impl State {
    pub fn with_config(config: BusinessConfig) -> Self {
        log::info!(
            "api {} ({})",
            if config.api_base_url.is_empty() {
                "<same origin>"
            } else {
                config.api_base_url.as_str()
            },
            config.env.label()
        );

        let mut ctx = StateCtx::new();
        register_shared(&mut ctx, config);

        ResourceScreen::<Listing>::register(&mut ctx);
        ResourceScreen::<Lead>::register(&mut ctx);
        ResourceScreen::<Subscription>::register(&mut ctx);
        ResourceScreen::<PropertyLink>::register(&mut ctx);
        ResourceScreen::<PropertyLink>::register_import(&mut ctx);
        ResourceScreen::<Place>::register(&mut ctx);
        ResourceScreen::<Place>::register_import(&mut ctx);
        ResourceScreen::<Media>::register(&mut ctx);

        Self { ctx }
    }

    pub fn test(base_url: String) -> Self {
        Self::with_config(BusinessConfig::new(base_url))
    }
}
