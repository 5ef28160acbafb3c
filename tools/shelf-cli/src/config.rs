//! CLI configuration.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use shelf_auth::{DEFAULT_SESSION_MINUTES, MAX_SESSION_MINUTES};
use shelf_commerce::catalog::SIDEBAR_CATEGORY_LIMIT;
use shelf_commerce::cart::TotalsPolicy;
use shelf_commerce::search::DEFAULT_PAGE_SIZE;
use shelf_data::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// File names looked up in the working directory and its parents.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shelf.toml", ".shelf.toml", "shelf.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShelfConfig {
    /// Store API settings.
    #[serde(default)]
    pub api: ApiSection,

    /// Login settings.
    #[serde(default)]
    pub auth: AuthSection,

    /// Catalog view settings.
    #[serde(default)]
    pub catalog: CatalogSection,

    /// Cart view settings.
    #[serde(default)]
    pub cart: CartSection,
}

impl ShelfConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config text; JSON when the path says so, TOML otherwise.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        let config: Self = if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };
        config.validate().with_context(|| format!("Invalid config: {}", path))?;
        Ok(config)
    }

    /// Reject values the storefront cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            bail!("api.base_url must be an http(s) URL, got '{}'", self.api.base_url);
        }
        if self.api.timeout_secs == 0 {
            bail!("api.timeout_secs must be greater than 0");
        }
        if !(1..=MAX_SESSION_MINUTES).contains(&self.auth.session_minutes) {
            bail!(
                "auth.session_minutes must be between 1 and {}, got {}",
                MAX_SESSION_MINUTES,
                self.auth.session_minutes
            );
        }
        if self.catalog.page_size == 0 {
            bail!("catalog.page_size must be greater than 0");
        }
        Ok(())
    }
}

/// Store API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSection {
    /// API origin.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiSection {
    /// Client settings for the store API.
    pub fn to_api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Login settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSection {
    /// Username used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Requested token lifetime.
    #[serde(default = "default_session_minutes")]
    pub session_minutes: i64,
}

fn default_session_minutes() -> i64 {
    DEFAULT_SESSION_MINUTES
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            session_minutes: default_session_minutes(),
        }
    }
}

/// Catalog view settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogSection {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,

    /// Categories shown in the sidebar.
    #[serde(default = "default_category_limit")]
    pub category_limit: usize,
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_category_limit() -> usize {
    SIDEBAR_CATEGORY_LIMIT
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            category_limit: default_category_limit(),
        }
    }
}

/// Cart view settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartSection {
    /// Recompute the order summary from the line items instead of showing
    /// the totals reported by the API.
    #[serde(default)]
    pub recompute_totals: bool,
}

impl CartSection {
    /// The configured summary policy.
    pub fn totals_policy(&self) -> TotalsPolicy {
        if self.recompute_totals {
            TotalsPolicy::Recompute
        } else {
            TotalsPolicy::Remote
        }
    }
}

/// Generate a default shelf.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Shelf storefront configuration

[api]
base_url = "{base_url}"
timeout_secs = {timeout}

[auth]
# username = "emilys"
# password may be omitted; you will be prompted
session_minutes = {session}

[catalog]
page_size = {page_size}
category_limit = {category_limit}

[cart]
recompute_totals = false
"#,
        base_url = DEFAULT_BASE_URL,
        timeout = DEFAULT_TIMEOUT_SECS,
        session = DEFAULT_SESSION_MINUTES,
        page_size = DEFAULT_PAGE_SIZE,
        category_limit = SIDEBAR_CATEGORY_LIMIT,
    )
}
