//! Product catalog access.

use crate::retry::RetryPolicy;
use crate::FetchError;
use async_trait::async_trait;
use dental_commerce::catalog::{Category, CategoryTree, Product};

/// Read access to products and categories.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ProductCatalog: Send + Sync {
    /// Every product, in database order.
    async fn get_all_products(&self) -> Result<Vec<Product>, FetchError>;

    /// Products whose leaf or parent category is `name`.
    async fn get_products_by_category(&self, name: &str) -> Result<Vec<Product>, FetchError>;

    /// Products matching a free-text term. A blank term matches everything.
    async fn search_products(&self, term: &str) -> Result<Vec<Product>, FetchError> {
        let products = self.get_all_products().await?;
        Ok(products.into_iter().filter(|p| p.matches_text(term)).collect())
    }

    /// Category records, ordered by display order then name. Unordered
    /// categories come last.
    async fn get_categories(&self) -> Result<Vec<Category>, FetchError>;

    /// Look up a product by item number.
    async fn get_product(&self, item_number: &str) -> Result<Option<Product>, FetchError>;
}

/// Load categories, retrying transient failures under `policy`.
///
/// On exhaustion the error is [`FetchError::RetriesExhausted`]; callers show
/// a message rather than reloading.
pub async fn load_categories(
    catalog: &dyn ProductCatalog,
    policy: &RetryPolicy,
) -> Result<Vec<Category>, FetchError> {
    policy.run(|| catalog.get_categories()).await
}

/// Category tree from live categories, or the built-in tree when the
/// database has none.
pub async fn load_category_tree(
    catalog: &dyn ProductCatalog,
    policy: &RetryPolicy,
) -> Result<CategoryTree, FetchError> {
    let categories = load_categories(catalog, policy).await?;
    if categories.is_empty() {
        return Ok(CategoryTree::standard());
    }
    Ok(CategoryTree::from_categories(&categories))
}

pub(crate) fn sort_categories(categories: &mut [Category]) {
    categories.sort_by(|a, b| a.display_cmp(b));
}

/// A fixed product list, for tests and offline use.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            categories: Vec::new(),
        }
    }

    pub fn with_categories(mut self, mut categories: Vec<Category>) -> Self {
        sort_categories(&mut categories);
        self.categories = categories;
        self
    }

    /// Load products from a JSON array of product records.
    pub fn from_json(text: &str) -> Result<Self, FetchError> {
        let products: Vec<Product> = serde_json::from_str(text)?;
        Ok(Self::new(products))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ProductCatalog for InMemoryCatalog {
    async fn get_all_products(&self) -> Result<Vec<Product>, FetchError> {
        Ok(self.products.clone())
    }

    async fn get_products_by_category(&self, name: &str) -> Result<Vec<Product>, FetchError> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.in_category(name))
            .cloned()
            .collect())
    }

    async fn get_categories(&self) -> Result<Vec<Category>, FetchError> {
        Ok(self.categories.clone())
    }

    async fn get_product(&self, item_number: &str) -> Result<Option<Product>, FetchError> {
        Ok(self
            .products
            .iter()
            .find(|p| p.item_number.as_str() == item_number)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::BackoffStrategy;
    use dental_commerce::money::{Currency, Money};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            Product::new("p1", "GL-100", "Nitrile Exam Gloves", Money::new(1299, Currency::USD))
                .with_category("Gloves", Some("Supplies"))
                .with_manufacturer("Medline"),
            Product::new("p2", "DC-1200", "Patient Chair", Money::new(1249900, Currency::USD))
                .with_category("Dental Chairs", Some("Equipment"))
                .with_manufacturer("A-dec"),
        ])
        .with_categories(vec![
            Category::new("c2", "Gloves", Some("Supplies")),
            Category::new("c1", "Supplies", None),
        ])
    }

    #[tokio::test]
    async fn test_in_memory_queries() {
        let catalog = catalog();
        assert_eq!(catalog.get_all_products().await.unwrap().len(), 2);
        assert_eq!(catalog.get_products_by_category("supplies").await.unwrap().len(), 1);
        assert_eq!(catalog.search_products("chair").await.unwrap()[0].id.as_str(), "p2");
        assert_eq!(catalog.search_products("  ").await.unwrap().len(), 2);
        assert!(catalog.get_product("GL-100").await.unwrap().is_some());
        assert!(catalog.get_product("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_category_tree_from_records() {
        let tree = load_category_tree(&catalog(), &RetryPolicy::none()).await.unwrap();
        assert_eq!(tree.resolve_pair("supplies", "gloves"), Some(("Supplies", "Gloves")));
    }

    #[tokio::test]
    async fn test_empty_categories_use_builtin_tree() {
        let tree = load_category_tree(&InMemoryCatalog::default(), &RetryPolicy::none())
            .await
            .unwrap();
        assert_eq!(tree, CategoryTree::standard());
    }

    struct Flaky {
        failures: AtomicU32,
    }

    #[async_trait]
    impl ProductCatalog for Flaky {
        async fn get_all_products(&self) -> Result<Vec<Product>, FetchError> {
            Ok(Vec::new())
        }

        async fn get_products_by_category(&self, _: &str) -> Result<Vec<Product>, FetchError> {
            Ok(Vec::new())
        }

        async fn get_categories(&self) -> Result<Vec<Category>, FetchError> {
            if self.failures.load(Ordering::SeqCst) > 0 {
                self.failures.fetch_sub(1, Ordering::SeqCst);
                return Err(FetchError::Timeout);
            }
            Ok(vec![Category::new("c1", "Imaging", None)])
        }

        async fn get_product(&self, _: &str) -> Result<Option<Product>, FetchError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_category_load_retries() {
        let policy = RetryPolicy::category_load().with_backoff(BackoffStrategy::None);

        let flaky = Flaky {
            failures: AtomicU32::new(2),
        };
        assert_eq!(load_categories(&flaky, &policy).await.unwrap().len(), 1);

        let down = Flaky {
            failures: AtomicU32::new(10),
        };
        let err = load_categories(&down, &policy).await.unwrap_err();
        assert!(matches!(err, FetchError::RetriesExhausted { attempts: 3, .. }));
    }
}
