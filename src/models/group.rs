use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Group - A shared budget with its member list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Group {
    /// Find a member by user id.
    pub fn member(&self, user_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == user_id)
    }
}

// ---------------------------------------------------------------------------
// Member - A user as listed inside a group
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGroup {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupRole {
    Admin,
    Member,
}

impl GroupRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupRole::Admin => "admin",
            GroupRole::Member => "member",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMember {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<GroupRole>,
}

/// Membership record returned when a user joins a group or changes role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub id: String,
    pub user_id: String,
    pub group_id: String,
    pub role: GroupRole,
    pub joined_at: String,
}
