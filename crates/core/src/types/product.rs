//! Canonical product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as loaded from the catalog service.
///
/// Identity is the `id` field. Records are immutable once loaded into a
/// session; a catalog reload replaces the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Non-empty product id. Records without a usable id never survive
    /// normalization.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unit price, always `>= 0`.
    pub price: Decimal,
    /// Image URL, if the backend provided one.
    pub image: Option<String>,
    /// Category ids or names this product belongs to, in backend order.
    pub category_tags: Vec<String>,
    /// Featured in the campaign pseudo-category.
    pub is_campaign: bool,
    /// Marked as discounted by the backend.
    pub is_discounted: bool,
}

impl Product {
    /// Whether this product belongs to a category, matching either the
    /// category id or its display name against the product's tags.
    ///
    /// Backends are inconsistent about whether `category` carries ids or
    /// names, so both are accepted.
    #[must_use]
    pub fn matches_category(&self, category_id: &str, category_name: &str) -> bool {
        self.category_tags
            .iter()
            .any(|tag| tag == category_id || tag == category_name)
    }
}
