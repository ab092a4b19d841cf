use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category - A named classification scoped to one group
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub group_id: String,
    pub created_at: String,
}

/// Body of `POST /groups/{id}/categories`. The client never picks an icon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub icon: Option<String>,
}

impl NewCategory {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}
