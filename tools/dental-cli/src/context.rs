//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use dental_data::{
    CallableClient, CheckoutClient, ContactClient, FetchClient, FirestoreCatalog, InMemoryCatalog,
    ProductCatalog, RetryPolicy,
};

use crate::config::{StorefrontConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    pub config: StorefrontConfig,
    /// File the config was read from, if any.
    pub config_path: Option<PathBuf>,
    pub output: Output,
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config path or the nearest config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (StorefrontConfig::load(&path)?, Some(path))
            }
            None => match find_config_file(&cwd) {
                Some(path) => (StorefrontConfig::load(&path)?, Some(path)),
                None => (StorefrontConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }

    /// The product catalog: a local products file when configured,
    /// Firestore otherwise.
    pub fn catalog(&self) -> Result<Arc<dyn ProductCatalog>> {
        if let Some(file) = &self.config.catalog.products_file {
            let path = self.resolve_path(file);
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read products file: {}", path.display()))?;
            let catalog = InMemoryCatalog::from_json(&text)
                .with_context(|| format!("Failed to parse products file: {}", path.display()))?;
            tracing::debug!(products = catalog.products().len(), "Using local catalog");
            return Ok(Arc::new(catalog));
        }

        let catalog = FirestoreCatalog::new(FetchClient::new(), self.config.firebase.clone())
            .context("Firestore catalog is not configured (set firebase.project_id)")?;
        Ok(Arc::new(catalog))
    }

    /// Retry policy for the category load.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.config.catalog.retry_attempts)
    }

    fn callable(&self) -> Result<CallableClient> {
        if self.config.firebase.project_id.trim().is_empty() {
            bail!("firebase.project_id is required to call cloud functions");
        }
        Ok(CallableClient::new(FetchClient::new(), &self.config.firebase))
    }

    pub fn checkout_client(&self) -> Result<CheckoutClient> {
        Ok(CheckoutClient::new(self.callable()?, self.config.stripe.clone()))
    }

    pub fn contact_client(&self) -> Result<ContactClient> {
        Ok(ContactClient::new(self.callable()?))
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Find the nearest config file, walking up from `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dental-cli-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = temp_dir("find");
        let nested = root.join("apps").join("storefront");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join(".dental.toml"), "").unwrap();

        assert_eq!(find_config_file(&nested), Some(root.join(".dental.toml")));

        std::fs::write(nested.join("dental.json"), "{}").unwrap();
        assert_eq!(find_config_file(&nested), Some(nested.join("dental.json")));

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_local_catalog() {
        let root = temp_dir("catalog");
        std::fs::write(
            root.join("products.json"),
            r#"[{"id": "p1", "itemNumber": "GL-100", "name": "Nitrile Gloves",
                 "price": {"amount_cents": 1299, "currency": "USD"}, "category": "Gloves"}]"#,
        )
        .unwrap();

        let mut config = StorefrontConfig::default();
        config.catalog.products_file = Some("products.json".into());
        let ctx = Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: root.clone(),
        };

        assert!(ctx.catalog().is_ok());
        assert!(ctx.checkout_client().is_err());
        assert_eq!(ctx.retry_policy(), RetryPolicy::new(3));

        std::fs::remove_dir_all(&root).ok();
    }
}
