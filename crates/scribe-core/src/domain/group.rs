use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Group entity - a topical category posts may be filed under.
///
/// Groups are created administratively and never deleted by the
/// request handlers; the `slug` doubles as the URL identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
}

impl Group {
    pub fn new(slug: String, title: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            slug,
            title,
            description,
        }
    }
}
