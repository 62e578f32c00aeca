//! Storefront configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use dental_data::{FirebaseSettings, StripeSettings};
use dental_observability::LoggingConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, from the working directory upward.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["dental.toml", ".dental.toml", "dental.json"];

/// Storefront configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub site: SiteConfig,

    /// Firebase project used for the catalog and callable functions.
    #[serde(default)]
    pub firebase: FirebaseSettings,

    #[serde(default)]
    pub stripe: StripeSettings,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are JSON, anything else TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content, is_json(path))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Check required settings. Returns `(errors, warnings)`.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let local_catalog = self.catalog.products_file.is_some();
        if self.firebase.project_id.trim().is_empty() {
            if local_catalog {
                warnings.push(
                    "firebase.project_id is empty; checkout and contact commands will fail"
                        .to_string(),
                );
            } else {
                errors.push("firebase.project_id is required".to_string());
            }
        }

        if !is_http_url(&self.site.origin) {
            errors.push(format!(
                "site.origin '{}' must be an http(s) URL",
                self.site.origin
            ));
        } else if self.site.origin.ends_with('/') {
            warnings.push("site.origin should not end with '/'".to_string());
        }

        if let Some(url) = &self.firebase.functions_url {
            if !is_http_url(url) {
                errors.push(format!("firebase.functions_url '{}' must be an http(s) URL", url));
            }
        }

        match &self.stripe.portal_login_url {
            Some(url) if !url.starts_with("https://") => {
                errors.push(format!("stripe.portal_login_url '{}' must use https", url));
            }
            None => warnings.push(
                "stripe.portal_login_url is not set; the account page has no billing link"
                    .to_string(),
            ),
            _ => {}
        }

        if let Some(key) = &self.stripe.publishable_key {
            if !key.starts_with("pk_") {
                warnings.push("stripe.publishable_key does not look like a publishable key".to_string());
            }
        }

        if self.catalog.retry_attempts == 0 {
            errors.push("catalog.retry_attempts must be at least 1".to_string());
        }
        if !(1..=100).contains(&self.catalog.per_page) {
            errors.push("catalog.per_page must be between 1 and 100".to_string());
        }

        (errors, warnings)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}

fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty())
}

/// Public site settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    /// Store name shown in the header.
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Public origin, used for checkout return URLs.
    #[serde(default = "default_origin")]
    pub origin: String,
}

fn default_site_name() -> String {
    "Dental Supply Co.".to_string()
}

fn default_origin() -> String {
    "http://localhost:3000".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            origin: default_origin(),
        }
    }
}

/// Catalog loading settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Read products from this JSON file instead of Firestore.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products_file: Option<String>,

    /// Attempts for the category load.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Listing page size.
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_per_page() -> i64 {
    24
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            products_file: None,
            retry_attempts: default_retry_attempts(),
            per_page: default_per_page(),
        }
    }
}

/// Generate a default dental.toml.
pub fn generate_default_config(project_id: &str) -> String {
    format!(
        r#"# Dental supply storefront configuration

[site]
name = "Dental Supply Co."
origin = "http://localhost:3000"

[firebase]
project_id = "{project_id}"
# api_key = ""
functions_region = "us-central1"
# functions_url = "http://127.0.0.1:5001/{project_id}/us-central1"

[stripe]
# publishable_key = "pk_test_..."
# portal_login_url = "https://billing.stripe.com/p/login/..."

[catalog]
# products_file = "products.json"
retry_attempts = 3
per_page = 24

[logging]
level = "info"
format = "human"
"#,
        project_id = project_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dental_observability::{LogFormat, LogLevel};

    #[test]
    fn test_default_config_parses() {
        let config = StorefrontConfig::parse(&generate_default_config("dental-demo"), false).unwrap();
        assert_eq!(config.firebase.project_id, "dental-demo");
        assert_eq!(config.firebase.database, "(default)");
        assert_eq!(config.catalog.retry_attempts, 3);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.format, LogFormat::Human);

        let (errors, warnings) = config.validate();
        assert!(errors.is_empty(), "{:?}", errors);
        assert!(warnings.iter().any(|w| w.contains("portal_login_url")));
    }

    #[test]
    fn test_json_config() {
        let config = StorefrontConfig::parse(
            r#"{"firebase": {"project_id": "p"}, "catalog": {"products_file": "p.json"}}"#,
            true,
        )
        .unwrap();
        assert_eq!(config.catalog.products_file.as_deref(), Some("p.json"));
        assert_eq!(config.catalog.per_page, 24);
        assert_eq!(config.site, SiteConfig::default());
    }

    #[test]
    fn test_validate_errors() {
        let mut config = StorefrontConfig::default();
        config.site.origin = "shop.example".into();
        config.stripe.portal_login_url = Some("http://billing.example".into());
        config.catalog.retry_attempts = 0;

        let (errors, _) = config.validate();
        assert!(errors.iter().any(|e| e.contains("project_id")));
        assert!(errors.iter().any(|e| e.contains("site.origin")));
        assert!(errors.iter().any(|e| e.contains("https")));
        assert!(errors.iter().any(|e| e.contains("retry_attempts")));
    }

    #[test]
    fn test_local_catalog_downgrades_project_id() {
        let mut config = StorefrontConfig::default();
        config.catalog.products_file = Some("products.json".into());
        let (errors, warnings) = config.validate();
        assert!(errors.is_empty(), "{:?}", errors);
        assert!(warnings.iter().any(|w| w.contains("project_id")));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("dental-cli-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dental.toml");

        let mut config = StorefrontConfig::default();
        config.firebase.project_id = "saved".into();
        config.save(&path).unwrap();
        assert_eq!(StorefrontConfig::load(&path).unwrap(), config);

        std::fs::remove_dir_all(&dir).ok();
    }
}
