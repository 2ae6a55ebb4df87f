use estate_states::State;
use serde::Deserialize;
use thiserror::Error;

/// Which deployment the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    #[default]
    Prod,
    Test,
    Internal,
    Nightly,
    Pr,
    Local,
}

impl AppEnv {
    /// Environment picked by cargo features.
    pub const fn from_features() -> Self {
        if cfg!(feature = "env_test") {
            Self::Test
        } else if cfg!(feature = "env_internal") {
            Self::Internal
        } else if cfg!(feature = "env_nightly") {
            Self::Nightly
        } else if cfg!(feature = "env_pr") {
            Self::Pr
        } else {
            Self::Prod
        }
    }

    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Prod => "https://api.estate-admin.in",
            Self::Test => "https://api-test.estate-admin.in",
            Self::Internal => "https://api-internal.estate-admin.in",
            Self::Nightly => "https://api-nightly.estate-admin.in",
            Self::Pr => "https://api-pr.estate-admin.in",
            Self::Local => "http://localhost:8080",
        }
    }

    /// Public website that property pages live on.
    pub const fn site_url(self) -> &'static str {
        match self {
            Self::Prod => "https://estate-admin.in",
            Self::Test => "https://test.estate-admin.in",
            Self::Internal => "https://internal.estate-admin.in",
            Self::Nightly => "https://nightly.estate-admin.in",
            Self::Pr => "https://pr.estate-admin.in",
            Self::Local => "http://localhost:3000",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Prod => "prod",
            Self::Test => "test",
            Self::Internal => "internal",
            Self::Nightly => "nightly",
            Self::Pr => "pr",
            Self::Local => "local",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration from environment: {0}")]
    Env(#[from] serde_env::Error),
}

#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    estate_api_base_url: Option<String>,
    estate_api_token: Option<String>,
    estate_site_url: Option<String>,
    estate_env: Option<AppEnv>,
}

/// Where and as whom the API client connects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    /// Base URL without trailing slash. Empty means same-origin (the wasm build).
    pub api_base_url: String,
    /// Bearer token sent with every request when present.
    pub auth_token: Option<String>,
    /// Public site used by "View Property", without trailing slash.
    pub site_url: String,
    pub env: AppEnv,
}

impl State for BusinessConfig {}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let env = AppEnv::from_features();
        Self {
            api_base_url: base_url.into().trim_end_matches('/').to_owned(),
            auth_token: None,
            site_url: env.site_url().to_owned(),
            env,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Defaults overridden by `ESTATE_ENV`, `ESTATE_API_BASE_URL`, `ESTATE_API_TOKEN`
    /// and `ESTATE_SITE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, S>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let overrides: EnvOverrides = serde_env::from_iter(vars)?;
        Ok(Self::default().with_overrides(overrides))
    }

    fn with_overrides(mut self, overrides: EnvOverrides) -> Self {
        if let Some(env) = overrides.estate_env {
            self.env = env;
            self.api_base_url = env.default_base_url().to_owned();
            self.site_url = env.site_url().to_owned();
        }
        if let Some(url) = overrides.estate_api_base_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().trim_end_matches('/').to_owned();
        }
        if let Some(site) = overrides.estate_site_url.filter(|u| !u.trim().is_empty()) {
            self.site_url = site.trim().trim_end_matches('/').to_owned();
        }
        if let Some(token) = overrides.estate_api_token.filter(|t| !t.is_empty()) {
            self.auth_token = Some(token);
        }
        self
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        let env = AppEnv::from_features();
        Self {
            api_base_url: if cfg!(target_arch = "wasm32") {
                String::new()
            } else {
                env.default_base_url().to_owned()
            },
            auth_token: None,
            site_url: env.site_url().to_owned(),
            env,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_urls() {
        let config = BusinessConfig::default();

        if cfg!(target_arch = "wasm32") {
            assert_eq!(config.api_base_url, "");
        } else if cfg!(feature = "env_test") {
            assert_eq!(config.api_base_url, "https://api-test.estate-admin.in");
        } else if cfg!(feature = "env_internal") {
            assert_eq!(config.api_base_url, "https://api-internal.estate-admin.in");
        } else if cfg!(feature = "env_nightly") {
            assert_eq!(config.api_base_url, "https://api-nightly.estate-admin.in");
        } else if cfg!(feature = "env_pr") {
            assert_eq!(config.api_base_url, "https://api-pr.estate-admin.in");
        } else {
            assert_eq!(config.api_base_url, "https://api.estate-admin.in");
        }
    }

    #[test]
    fn new_trims_trailing_slash() {
        let config = BusinessConfig::new("http://127.0.0.1:9000/");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.auth_token, None);
    }

    #[test]
    fn overrides_take_precedence() {
        let config = BusinessConfig::default().with_overrides(EnvOverrides {
            estate_api_base_url: Some("http://localhost:3000/".to_owned()),
            estate_api_token: Some("secret".to_owned()),
            estate_site_url: Some("https://staging.example/".to_owned()),
            estate_env: Some(AppEnv::Local),
        });
        assert_eq!(config.site_url, "https://staging.example");
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.env, AppEnv::Local);
    }

    #[test]
    fn env_alone_selects_its_default_url() {
        let config = BusinessConfig::default().with_overrides(EnvOverrides {
            estate_env: Some(AppEnv::Test),
            ..EnvOverrides::default()
        });
        assert_eq!(config.api_base_url, AppEnv::Test.default_base_url());
        assert_eq!(config.site_url, AppEnv::Test.site_url());
    }

    #[test]
    fn reads_overrides_from_variables() {
        let config = BusinessConfig::from_vars(vec![
            ("ESTATE_API_BASE_URL", "http://127.0.0.1:4000"),
            ("ESTATE_API_TOKEN", "abc"),
            ("ESTATE_ENV", "local"),
            ("UNRELATED", "ignored"),
        ])
        .expect("config should deserialize");
        assert_eq!(config.api_base_url, "http://127.0.0.1:4000");
        assert_eq!(config.auth_token.as_deref(), Some("abc"));
        assert_eq!(config.env, AppEnv::Local);
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let before = BusinessConfig::default();
        let after = before.clone().with_overrides(EnvOverrides {
            estate_api_base_url: Some("  ".to_owned()),
            estate_api_token: Some(String::new()),
            estate_site_url: None,
            estate_env: None,
        });
        assert_eq!(before, after);
    }
}
