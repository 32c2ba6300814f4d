//! Short link entity.

use chrono::{DateTime, Utc};

/// The stable short slug of a recipe.
///
/// `slug` is the stored key and already contains the configured path prefix
/// (for example `s/AbCdEf`), so it can be appended to the public base URL as is.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortLink {
    pub id: i64,
    pub recipe_id: i64,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}
