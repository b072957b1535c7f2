//! Product catalog
//!
//! The product list is a static JSON asset fetched once at startup.
//! After loading it is never mutated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog loading failures
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request itself failed (network, CORS, no window)
    #[error("catalog fetch failed: {0}")]
    Fetch(String),
    /// The server answered with a non-success status
    #[error("catalog request returned HTTP {0}")]
    Status(u16),
    /// Body was not a valid product list
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two products share an id
    #[error("duplicate product id {0}")]
    DuplicateId(u32),
}

/// A product record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    /// Price in whole currency units
    pub price: u32,
    /// Units available; caps the cart quantity
    pub stock: u32,
    pub emoji: String,
    /// Two CSS colors for the card background gradient
    pub gradient: [String; 2],
    /// Decorative glyphs floating over the card visual
    #[serde(default)]
    pub icons: Vec<String>,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub description: String,
}

/// Ordered, read-only product list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        for (i, product) in products.iter().enumerate() {
            if products[..i].iter().any(|p| p.id == product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Parse the JSON product list
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Look up a product by id
    pub fn find(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Fetch and parse the catalog (WASM only). No retry: a failure aborts startup.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_catalog(url: &str) -> Result<Catalog, CatalogError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| CatalogError::Fetch("no window".to_string()))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| CatalogError::Fetch(format!("{:?}", e)))?;
    let resp: web_sys::Response = resp
        .dyn_into()
        .map_err(|_| CatalogError::Fetch("not a Response".to_string()))?;
    if !resp.ok() {
        return Err(CatalogError::Status(resp.status()));
    }

    let text_promise = resp.text().map_err(|e| CatalogError::Fetch(format!("{:?}", e)))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| CatalogError::Fetch(format!("{:?}", e)))?
        .as_string()
        .ok_or_else(|| CatalogError::Fetch("body is not text".to_string()))?;

    let catalog = Catalog::from_json(&text)?;
    log::info!("Loaded {} products from {}", catalog.len(), url);
    Ok(catalog)
}


#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"[
        {"id": 1, "name": "Glitter Bomb", "price": 50, "stock": 2, "emoji": "💣",
         "gradient": ["#ff006e", "#8338ec"], "icons": ["✨", "⭐"], "tag": "Hot",
         "description": "Goes off with a sparkle"},
        {"id": 7, "name": "Candy Cloud", "price": 120, "stock": 0, "emoji": "☁️",
         "gradient": ["#fff", "#ff85a1"]}
    ]"##;

    #[test]
    fn test_parse_catalog_preserves_order() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);
        let ids: Vec<u32> = catalog.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 7]);

        let bomb = catalog.find(1).unwrap();
        assert_eq!(bomb.icons.len(), 2);
        assert_eq!(bomb.gradient[1], "#8338ec");

        // Optional fields default
        let cloud = catalog.find(7).unwrap();
        assert!(cloud.icons.is_empty());
        assert_eq!(cloud.tag, "");
    }

    #[test]
    fn test_find_missing() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert!(catalog.find(99).is_none());
    }

    #[test]
    fn test_malformed_catalog() {
        assert!(matches!(Catalog::from_json("{\"id\": 1}"), Err(CatalogError::Parse(_))));
        // Negative price does not fit u32
        let negative = r#"[{"id": 1, "name": "x", "price": -5, "stock": 1, "emoji": "x", "gradient": ["a", "b"]}]"#;
        assert!(matches!(Catalog::from_json(negative), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let dup = vec![fixtures::product(4, 1, 1), fixtures::product(4, 2, 2)];
        assert!(matches!(Catalog::new(dup), Err(CatalogError::DuplicateId(4))));
    }
}
