//! Tolerant normalization of catalog service responses.
//!
//! The backend has shipped list endpoints in three shapes over time: a
//! bare array, `{"data": [...]}`, and `{"data": {"data": [...]}}`.
//! Everything here is a pure function from an untyped
//! [`serde_json::Value`] to canonical records; unrecognized shapes
//! yield an empty list rather than an error.

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;

use corner_market_core::{Category, Product};

/// Name substituted for products the backend shipped without one.
const PLACEHOLDER_PRODUCT_NAME: &str = "Unnamed product";

/// Keys tried in order when resolving a record id.
const ID_KEYS: &[&str] = &["id", "_id", "clientId"];

// =============================================================================
// Response Shape Extraction
// =============================================================================

/// Extract the record list from any of the accepted response shapes.
///
/// Accepts a bare array, `{"data": [...]}`, or `{"data": {"data":
/// [...]}}`. Any other shape yields an empty slice.
#[must_use]
pub fn record_list(response: &Value) -> &[Value] {
    if let Some(list) = response.as_array() {
        return list;
    }
    if let Some(list) = response.get("data").and_then(Value::as_array) {
        return list;
    }
    if let Some(list) = response
        .get("data")
        .and_then(|data| data.get("data"))
        .and_then(Value::as_array)
    {
        return list;
    }
    &[]
}

// =============================================================================
// Field Coercions
// =============================================================================

/// Resolve a record id from the first present id key, coerced to a
/// string. Non-string, non-number values coerce to an empty string,
/// which callers treat as "no id".
fn record_id(record: &Value) -> String {
    for key in ID_KEYS {
        match record.get(*key) {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            Some(_) => return String::new(),
        }
    }
    String::new()
}

/// Coerce a raw price to a non-negative decimal. Accepts a JSON number
/// or a numeric string; anything else coerces to zero, never NaN.
fn coerce_price(value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::Number(n)) => {
            if let Some(int) = n.as_i64() {
                Some(Decimal::from(int))
            } else {
                n.as_f64().and_then(|float| Decimal::try_from(float).ok())
            }
        }
        Some(Value::String(s)) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    parsed.unwrap_or(Decimal::ZERO).max(Decimal::ZERO)
}

/// Coerce a raw flag to a bool: missing or falsy values are `false`.
fn coerce_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}

/// Normalize a raw `category` field into a tag list. Accepts a single
/// string or a list of strings/numbers; anything else yields no tags.
fn coerce_tags(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn string_field(record: &Value, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(ToString::to_string)
}

// =============================================================================
// Record Normalization
// =============================================================================

/// Normalize a products response into canonical [`Product`] records.
///
/// Records whose resolved id is empty are dropped; all other fields
/// fill in defaults rather than failing.
#[must_use]
pub fn normalize_products(response: &Value) -> Vec<Product> {
    record_list(response)
        .iter()
        .filter_map(|record| {
            let id = record_id(record);
            if id.is_empty() {
                return None;
            }
            Some(Product {
                id,
                name: string_field(record, "name")
                    .unwrap_or_else(|| PLACEHOLDER_PRODUCT_NAME.to_string()),
                price: coerce_price(record.get("price")),
                image: string_field(record, "image").or_else(|| string_field(record, "imageUrl")),
                category_tags: coerce_tags(record.get("category")),
                is_campaign: coerce_flag(record.get("isCampaign")),
                is_discounted: coerce_flag(record.get("isDiscounted")),
            })
        })
        .collect()
}

/// Normalize a categories response into canonical [`Category`] records.
///
/// Inactive categories are kept here; filtering them out is the
/// caller's responsibility before display.
#[must_use]
pub fn normalize_categories(response: &Value) -> Vec<Category> {
    record_list(response)
        .iter()
        .filter_map(|record| {
            let id = record_id(record);
            if id.is_empty() {
                return None;
            }
            Some(Category {
                id,
                name: string_field(record, "name").unwrap_or_default(),
                is_active: coerce_flag(record.get("isActive")),
                created_at: string_field(record, "createdAt").unwrap_or_default(),
            })
        })
        .collect()
}

/// Inject the synthetic campaign category at the head of the list,
/// stripping any server-provided entry that collides with its id or
/// name, so exactly one campaign pseudo-category exists per session.
///
/// Applied after normalization and the active-only filter, on every
/// successful or fallback category load.
#[must_use]
pub fn ensure_campaign_category(categories: Vec<Category>) -> Vec<Category> {
    let mut result = vec![Category::campaign(Utc::now().to_rfc3339())];
    result.extend(
        categories
            .into_iter()
            .filter(|category| !category.collides_with_campaign()),
    );
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use corner_market_core::{CAMPAIGN_CATEGORY_ID, CAMPAIGN_CATEGORY_NAME};
    use serde_json::json;

    #[test]
    fn test_record_list_shape_invariance() {
        let records = json!([{"id": "a"}, {"id": "b"}]);
        let bare = records.clone();
        let wrapped = json!({"data": records.clone()});
        let double_wrapped = json!({"data": {"data": records, "pagination": {"page": 1}}});

        assert_eq!(normalize_products(&bare), normalize_products(&wrapped));
        assert_eq!(
            normalize_products(&wrapped),
            normalize_products(&double_wrapped)
        );
        assert_eq!(normalize_products(&bare).len(), 2);
    }

    #[test]
    fn test_record_list_unrecognized_shapes() {
        assert!(record_list(&json!({"items": []})).is_empty());
        assert!(record_list(&json!({"data": {"records": []}})).is_empty());
        assert!(record_list(&json!("oops")).is_empty());
        assert!(record_list(&json!(null)).is_empty());
        assert!(record_list(&json!(42)).is_empty());
    }

    #[test]
    fn test_product_id_fallback_chain() {
        let products = normalize_products(&json!([
            {"id": "primary"},
            {"_id": "mongo"},
            {"clientId": 1234},
        ]));
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["primary", "mongo", "1234"]);
    }

    #[test]
    fn test_product_without_id_dropped() {
        let products = normalize_products(&json!([
            {"name": "no id at all"},
            {"id": "", "name": "empty id"},
            {"id": "kept"},
        ]));
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "kept");
    }

    #[test]
    fn test_price_numeric_string_coercion() {
        let products = normalize_products(&json!([
            {"id": "a", "price": "12.5"},
            {"id": "b", "price": "abc"},
            {"id": "c", "price": 7},
            {"id": "d", "price": 3.25},
            {"id": "e"},
        ]));
        assert_eq!(products[0].price, Decimal::new(125, 1));
        assert_eq!(products[1].price, Decimal::ZERO);
        assert_eq!(products[2].price, Decimal::from(7));
        assert_eq!(products[3].price, Decimal::new(325, 2));
        assert_eq!(products[4].price, Decimal::ZERO);
    }

    #[test]
    fn test_price_negative_clamped_to_zero() {
        let products = normalize_products(&json!([{"id": "a", "price": -5}]));
        assert_eq!(products[0].price, Decimal::ZERO);
    }

    #[test]
    fn test_name_placeholder_when_absent() {
        let products = normalize_products(&json!([{"id": "a"}, {"id": "b", "name": "Bread"}]));
        assert_eq!(products[0].name, PLACEHOLDER_PRODUCT_NAME);
        assert_eq!(products[1].name, "Bread");
    }

    #[test]
    fn test_category_tags_single_string_normalized_to_list() {
        let products = normalize_products(&json!([
            {"id": "a", "category": "Beverages"},
            {"id": "b", "category": ["Beverages", "Staples"]},
            {"id": "c"},
        ]));
        assert_eq!(products[0].category_tags, vec!["Beverages"]);
        assert_eq!(products[1].category_tags, vec!["Beverages", "Staples"]);
        assert!(products[2].category_tags.is_empty());
    }

    #[test]
    fn test_flag_coercion() {
        let products = normalize_products(&json!([
            {"id": "a", "isCampaign": true, "isDiscounted": false},
            {"id": "b", "isCampaign": 1},
            {"id": "c", "isCampaign": null},
            {"id": "d"},
        ]));
        assert!(products[0].is_campaign);
        assert!(!products[0].is_discounted);
        assert!(products[1].is_campaign);
        assert!(!products[2].is_campaign);
        assert!(!products[3].is_campaign);
    }

    #[test]
    fn test_image_url_fallback() {
        let products = normalize_products(&json!([
            {"id": "a", "image": "https://cdn/a.png"},
            {"id": "b", "imageUrl": "https://cdn/b.png"},
            {"id": "c"},
        ]));
        assert_eq!(products[0].image.as_deref(), Some("https://cdn/a.png"));
        assert_eq!(products[1].image.as_deref(), Some("https://cdn/b.png"));
        assert!(products[2].image.is_none());
    }

    #[test]
    fn test_normalize_categories_passthrough() {
        let categories = normalize_categories(&json!({"data": [
            {"id": "produce", "name": "Produce", "isActive": true, "createdAt": "2024-01-01"},
            {"id": "legacy", "name": "Legacy", "isActive": false, "createdAt": ""},
        ]}));
        assert_eq!(categories.len(), 2);
        assert!(categories[0].is_active);
        // Inactive entries survive normalization; filtering is the caller's job.
        assert!(!categories[1].is_active);
    }

    #[test]
    fn test_campaign_injected_exactly_once_first() {
        let categories = vec![
            Category {
                id: CAMPAIGN_CATEGORY_ID.to_string(),
                name: "Server campaign".to_string(),
                is_active: true,
                created_at: String::new(),
            },
            Category {
                id: "x".to_string(),
                name: CAMPAIGN_CATEGORY_NAME.to_string(),
                is_active: true,
                created_at: String::new(),
            },
            Category {
                id: "produce".to_string(),
                name: "Produce".to_string(),
                is_active: true,
                created_at: String::new(),
            },
        ];

        let result = ensure_campaign_category(categories);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, CAMPAIGN_CATEGORY_ID);
        assert_eq!(result[0].name, CAMPAIGN_CATEGORY_NAME);
        assert_eq!(result[1].id, "produce");

        // Re-applying keeps the invariant.
        let again = ensure_campaign_category(result);
        assert_eq!(again.iter().filter(|c| c.id == CAMPAIGN_CATEGORY_ID).count(), 1);
        assert_eq!(again[0].id, CAMPAIGN_CATEGORY_ID);
    }

    #[test]
    fn test_campaign_injected_on_empty_list() {
        let result = ensure_campaign_category(Vec::new());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, CAMPAIGN_CATEGORY_ID);
    }
}
