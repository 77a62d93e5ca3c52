use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use glovehub_core::{CatalogError, CatalogResult, ProductId};

/// One catalog record, exactly as it appears in the data file.
///
/// `details` may carry markup; it is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub rank: u32,
    pub title: String,
    pub summary: String,
    pub details: String,
    pub image: String,
    pub buy_link: String,
    /// Category labels, in display order. Never empty.
    pub positions: Vec<String>,
    pub attributes: Vec<String>,
    /// Free-form tags in data-file order. Repeats are dropped on decode.
    #[serde(deserialize_with = "distinct_tags")]
    pub tags: Vec<String>,
}

impl Product {
    pub fn has_position(&self, position: &str) -> bool {
        self.positions.iter().any(|p| p == position)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Positions joined the way cards and the details view print them.
    pub fn positions_text(&self) -> String {
        self.positions.join(" / ")
    }
}

/// The immutable, ordered product list for one session.
///
/// Cloning is cheap (shared slice). There are no mutators: once built, the
/// order and content never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl Catalog {
    pub fn empty() -> Self {
        Self {
            products: Arc::from(Vec::new()),
        }
    }

    /// Build a catalog from already-decoded records, enforcing the record
    /// invariants (non-empty positions, unique ids).
    pub fn from_products(products: Vec<Product>) -> CatalogResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if product.positions.is_empty() {
                return Err(CatalogError::schema(format!(
                    "product {} has no positions",
                    product.id
                )));
            }
            if !seen.insert(product.id) {
                return Err(CatalogError::schema(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
        }

        Ok(Self {
            products: Arc::from(products),
        })
    }

    /// Decode the data file payload (a JSON array of records).
    pub fn from_json(payload: &str) -> CatalogResult<Self> {
        let products: Vec<Product> = serde_json::from_str(payload)?;
        Self::from_products(products)
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

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct positions in first-appearance order.
    pub fn positions(&self) -> Vec<&str> {
        distinct(self.products.iter().flat_map(|p| p.positions.iter()))
    }

    /// Distinct tags in first-appearance order.
    pub fn tags(&self) -> Vec<&str> {
        distinct(self.products.iter().flat_map(|p| p.tags.iter()))
    }
}

fn distinct_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    let mut seen = HashSet::with_capacity(raw.len());
    Ok(raw.into_iter().filter(|t| seen.insert(t.clone())).collect())
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values
        .map(String::as_str)
        .filter(|v| seen.insert(*v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_GLOVES: &str = r#"[
        {
            "id": 1,
            "rank": 1,
            "title": "Pro Pitcher 12\"",
            "summary": "Closed web",
            "details": "<p>Kip leather</p>",
            "image": "img/1.jpg",
            "buyLink": "https://example.com/1",
            "positions": ["Pitcher"],
            "attributes": ["Deep pocket"],
            "tags": ["leather"]
        },
        {
            "id": 2,
            "rank": 2,
            "title": "Catcher Mitt",
            "summary": "33.5 inch",
            "details": "",
            "image": "img/2.jpg",
            "buyLink": "https://example.com/2",
            "positions": ["Catcher", "First Base"],
            "attributes": [],
            "tags": ["youth", "leather"]
        }
    ]"#;

    #[test]
    fn decodes_records_in_file_order() {
        let catalog = Catalog::from_json(TWO_GLOVES).unwrap();
        let ids: Vec<u64> = catalog.products().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(catalog.products()[0].buy_link, "https://example.com/1");
        assert_eq!(catalog.products()[1].positions_text(), "Catcher / First Base");
    }

    #[test]
    fn positions_and_tags_are_distinct_in_first_appearance_order() {
        let catalog = Catalog::from_json(TWO_GLOVES).unwrap();
        assert_eq!(catalog.positions(), vec!["Pitcher", "Catcher", "First Base"]);
        assert_eq!(catalog.tags(), vec!["leather", "youth"]);
    }

    #[test]
    fn tags_keep_file_order_and_drop_repeats() {
        let payload = r#"[{"id": 7, "rank": 1, "title": "Youth Glove", "summary": "",
            "details": "", "image": "", "buyLink": "", "positions": ["Outfield"],
            "attributes": [], "tags": ["youth", "leather", "youth"]}]"#;
        let catalog = Catalog::from_json(payload).unwrap();
        assert_eq!(catalog.products()[0].tags, vec!["youth", "leather"]);
        assert_eq!(catalog.tags(), vec!["youth", "leather"]);

        let encoded = serde_json::to_value(&catalog.products()[0]).unwrap();
        assert_eq!(encoded["tags"], serde_json::json!(["youth", "leather"]));
    }

    #[test]
    fn missing_field_is_malformed() {
        let err = Catalog::from_json(r#"[{"id": 1, "rank": 1}]"#).unwrap_err();
        match err {
            CatalogError::Malformed(msg) if msg.contains("missing field") => {}
            other => panic!("expected malformed payload, got {other:?}"),
        }
    }

    #[test]
    fn non_array_payload_is_malformed() {
        let err = Catalog::from_json(r#"{"products": []}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[test]
    fn empty_positions_violate_schema() {
        let payload = TWO_GLOVES.replace(r#"["Pitcher"]"#, "[]");
        let err = Catalog::from_json(&payload).unwrap_err();
        match err {
            CatalogError::Schema(msg) if msg.contains("no positions") => {}
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_ids_violate_schema() {
        let payload = TWO_GLOVES.replace(r#""id": 2"#, r#""id": 1"#);
        let err = Catalog::from_json(&payload).unwrap_err();
        match err {
            CatalogError::Schema(msg) if msg.contains("duplicate") => {}
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn empty_array_is_an_empty_catalog() {
        let catalog = Catalog::from_json("[]").unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog, Catalog::empty());
    }
}
