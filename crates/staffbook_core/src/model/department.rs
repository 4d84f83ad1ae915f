//! Department entity.

use super::EntityId;

/// Organizational unit that owns posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: EntityId,
    pub name: String,
    /// Display name of the department head.
    pub manager: Option<String>,
    pub code: Option<String>,
    pub organization_id: Option<EntityId>,
}
