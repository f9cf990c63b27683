//! Saved delivery address.

use serde::{Deserialize, Serialize};

/// A delivery address saved during the session.
///
/// Created client-side with a freshly generated unique id; never edited
/// in place, only added and deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    /// Short label, e.g. "Home".
    pub title: String,
    /// Street-level detail.
    pub detail: String,
    /// Courier note, e.g. "don't ring the bell".
    pub note: Option<String>,
}
