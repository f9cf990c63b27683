//! Canonical category record and the synthetic campaign category.

use serde::{Deserialize, Serialize};

/// Fixed id of the synthetic campaign pseudo-category.
pub const CAMPAIGN_CATEGORY_ID: &str = "campaign";

/// Display name of the campaign pseudo-category.
pub const CAMPAIGN_CATEGORY_NAME: &str = "Deals";

/// A category as loaded from the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    /// Backend creation timestamp, passed through verbatim.
    pub created_at: String,
}

impl Category {
    /// The synthetic campaign category injected at the head of every
    /// materialized category list.
    #[must_use]
    pub fn campaign(created_at: String) -> Self {
        Self {
            id: CAMPAIGN_CATEGORY_ID.to_string(),
            name: CAMPAIGN_CATEGORY_NAME.to_string(),
            is_active: true,
            created_at,
        }
    }

    /// Whether this entry collides with the campaign pseudo-category,
    /// by id or by name.
    #[must_use]
    pub fn collides_with_campaign(&self) -> bool {
        self.id == CAMPAIGN_CATEGORY_ID || self.name == CAMPAIGN_CATEGORY_NAME
    }
}
