//! Firestore REST adapter.
//!
//! Documents come back with typed values (`{"stringValue": "..."}`,
//! `{"integerValue": "12"}`, ...). They are flattened to plain JSON first and
//! then deserialized with serde. Prices are stored as decimal dollars and are
//! converted to cents here, once.

use crate::catalog::{sort_categories, ProductCatalog};
use crate::{FetchClient, FetchError};
use async_trait::async_trait;
use dental_commerce::catalog::{Category, Product};
use dental_commerce::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

const FIRESTORE_ROOT: &str = "https://firestore.googleapis.com/v1";
const PAGE_SIZE: &str = "300";

/// Firebase project settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FirebaseSettings {
    pub project_id: String,
    /// Web API key, sent as the `key` query parameter.
    pub api_key: Option<String>,
    pub database: String,
    pub products_collection: String,
    pub categories_collection: String,
    /// Region of the callable functions.
    pub functions_region: String,
    /// Overrides the functions origin, e.g. a local emulator.
    pub functions_url: Option<String>,
}

impl Default for FirebaseSettings {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: None,
            database: "(default)".to_string(),
            products_collection: "products".to_string(),
            categories_collection: "categories".to_string(),
            functions_region: "us-central1".to_string(),
            functions_url: None,
        }
    }
}

impl FirebaseSettings {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Self::default()
        }
    }

    /// `.../projects/{p}/databases/{db}/documents`
    pub fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents",
            FIRESTORE_ROOT, self.project_id, self.database
        )
    }

    /// Origin of the callable functions.
    pub fn functions_origin(&self) -> String {
        match &self.functions_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "https://{}-{}.cloudfunctions.net",
                self.functions_region, self.project_id
            ),
        }
    }
}

/// Flatten a Firestore typed value into plain JSON.
pub fn decode_value(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = obj.iter().next() else {
        return Value::Null;
    };
    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => inner.clone(),
        "integerValue" => match inner {
            Value::String(s) => s.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
            other => other.clone(),
        },
        "doubleValue" => inner.clone(),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "geoPointValue" => inner.clone(),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|vals| vals.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => decode_fields(inner.get("fields")),
        _ => Value::Null,
    }
}

fn decode_fields(fields: Option<&Value>) -> Value {
    let mut out = Map::new();
    if let Some(fields) = fields.and_then(Value::as_object) {
        for (key, value) in fields {
            out.insert(key.clone(), decode_value(value));
        }
    }
    Value::Object(out)
}

/// Flatten a document, adding its id (last path segment of `name`) as `id`
/// unless the document has its own.
pub fn decode_document(document: &Value) -> Value {
    let mut flat = decode_fields(document.get("fields"));
    if let (Some(obj), Some(name)) = (
        flat.as_object_mut(),
        document.get("name").and_then(Value::as_str),
    ) {
        let id = name.rsplit('/').next().unwrap_or(name);
        obj.entry("id").or_insert_with(|| Value::String(id.to_string()));
    }
    flat
}

/// Product record as stored in the product database.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductDocument {
    id: String,
    #[serde(default)]
    item_number: Option<String>,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    sale_price: Option<f64>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    parent_category: Option<String>,
    #[serde(default)]
    manufacturer: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    on_promotion: bool,
    #[serde(default)]
    in_stock: Option<bool>,
}

impl ProductDocument {
    fn into_product(self) -> Product {
        let item_number = self.item_number.unwrap_or_else(|| self.id.clone());
        let mut product = Product::new(
            self.id,
            item_number,
            self.name,
            Money::from_decimal(self.price, Currency::USD),
        )
        .with_category(self.category, self.parent_category.as_deref())
        .with_manufacturer(self.manufacturer);

        if let Some(sale) = self.sale_price.filter(|s| *s > 0.0) {
            product = product.with_sale_price(Money::from_decimal(sale, Currency::USD));
        }
        product.images = self.images;
        if let Some(image) = self.image {
            if !product.images.contains(&image) {
                product.images.push(image);
            }
        }
        product.description = self.description;
        product.tags = self.tags;
        product.on_promotion = self.on_promotion;
        product.in_stock = self.in_stock.unwrap_or(true);
        product
    }
}

/// Decode a product document. Malformed documents are skipped with a warning.
fn product_from_document(document: &Value) -> Option<Product> {
    match serde_json::from_value::<ProductDocument>(decode_document(document)) {
        Ok(doc) => Some(doc.into_product()),
        Err(e) => {
            let name = document.get("name").and_then(Value::as_str).unwrap_or("?");
            tracing::warn!(
                name,
                error = %e,
                "Skipping malformed product document"
            );
            None
        }
    }
}

fn category_from_document(document: &Value) -> Option<Category> {
    match serde_json::from_value::<Category>(decode_document(document)) {
        Ok(category) => Some(category),
        Err(e) => {
            tracing::warn!(error = %e, "Skipping malformed category document");
            None
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Value>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Product catalog backed by Firestore.
#[derive(Debug, Clone)]
pub struct FirestoreCatalog {
    client: FetchClient,
    settings: FirebaseSettings,
}

impl FirestoreCatalog {
    pub fn new(client: FetchClient, settings: FirebaseSettings) -> Result<Self, FetchError> {
        if settings.project_id.trim().is_empty() {
            return Err(FetchError::InvalidUrl(
                "Firebase project id is not configured".to_string(),
            ));
        }
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &FirebaseSettings {
        &self.settings
    }

    /// Every document in a collection, following page tokens.
    async fn list_documents(&self, collection: &str) -> Result<Vec<Value>, FetchError> {
        let url = format!("{}/{}", self.settings.documents_url(), collection);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page: ListDocumentsResponse = self
                .client
                .get(url.as_str())
                .query("pageSize", PAGE_SIZE)
                .query_opt("pageToken", page_token.as_deref())
                .query_opt("key", self.settings.api_key.as_deref())
                .send_json()
                .await?;
            documents.extend(page.documents);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(collection, count = documents.len(), "Listed documents");
        Ok(documents)
    }

    /// Documents in the products collection where `field == value`.
    async fn query_products(&self, field: &str, value: &str) -> Result<Vec<Value>, FetchError> {
        let url = format!("{}:runQuery", self.settings.documents_url());
        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": self.settings.products_collection }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": field },
                        "op": "EQUAL",
                        "value": { "stringValue": value }
                    }
                }
            }
        });

        let rows: Vec<Value> = self
            .client
            .post(url)
            .query_opt("key", self.settings.api_key.as_deref())
            .json(&body)?
            .send_json()
            .await?;

        // rows without a document only carry a read time
        Ok(rows
            .into_iter()
            .filter_map(|mut row| row.get_mut("document").map(Value::take))
            .collect())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ProductCatalog for FirestoreCatalog {
    async fn get_all_products(&self) -> Result<Vec<Product>, FetchError> {
        let docs = self
            .list_documents(&self.settings.products_collection)
            .await?;
        Ok(docs.iter().filter_map(product_from_document).collect())
    }

    async fn get_products_by_category(&self, name: &str) -> Result<Vec<Product>, FetchError> {
        let mut products: Vec<Product> = self
            .query_products("category", name)
            .await?
            .iter()
            .filter_map(product_from_document)
            .collect();

        for product in self
            .query_products("parentCategory", name)
            .await?
            .iter()
            .filter_map(product_from_document)
        {
            if !products.iter().any(|p| p.id == product.id) {
                products.push(product);
            }
        }
        Ok(products)
    }

    async fn get_categories(&self) -> Result<Vec<Category>, FetchError> {
        let docs = self
            .list_documents(&self.settings.categories_collection)
            .await?;
        let mut categories: Vec<Category> =
            docs.iter().filter_map(category_from_document).collect();
        sort_categories(&mut categories);
        Ok(categories)
    }

    async fn get_product(&self, item_number: &str) -> Result<Option<Product>, FetchError> {
        let docs = self.query_products("itemNumber", item_number).await?;
        Ok(docs.iter().find_map(product_from_document))
    }
}
