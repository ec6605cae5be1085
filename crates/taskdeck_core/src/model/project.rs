//! Project domain model.
//!
//! # Invariants
//! - Every project belongs to exactly one user.
//! - `name` is non-empty after trimming and at most 50 characters.
//! - `color` and `icon` are members of their fixed token sets.

use crate::auth::UserId;
use crate::model::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum project name length in characters (after trimming).
pub const NAME_MAX_CHARS: usize = 50;

/// Fixed color palette offered by the project form.
pub const PROJECT_COLORS: [&str; 6] = [
    "#8B5CF6", "#EC4899", "#F59E0B", "#10B981", "#3B82F6", "#6366F1",
];

/// Fixed glyph set offered by the project form.
pub const PROJECT_ICONS: [&str; 10] = [
    "\u{1F4C1}", // 📁
    "\u{1F4BC}", // 💼
    "\u{1F3AF}", // 🎯
    "\u{1F680}", // 🚀
    "\u{1F4A1}", // 💡
    "\u{1F4CA}", // 📊
    "\u{1F3A8}", // 🎨
    "\u{1F527}", // 🔧
    "\u{1F4F1}", // 📱
    "\u{1F3E0}", // 🏠
];

/// Stable identifier for a project row.
pub type ProjectId = Uuid;

/// Canonical project record as stored in the `projects` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable id assigned by the gateway at insert.
    pub id: ProjectId,
    pub name: String,
    /// Color token from [`PROJECT_COLORS`].
    pub color: String,
    /// Glyph token from [`PROJECT_ICONS`].
    pub icon: String,
    /// Owning user; set at creation, immutable.
    pub owner_id: UserId,
    /// Epoch milliseconds, assigned by the store.
    pub created_at: i64,
}

impl Project {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_tokens(&self.color, &self.icon)
    }
}

/// Insert model for a project; the store assigns id and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub color: String,
    pub icon: String,
    pub owner_id: UserId,
}

impl NewProject {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_tokens(&self.color, &self.icon)
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let length = name.chars().count();
    if length > NAME_MAX_CHARS {
        return Err(ValidationError::NameTooLong {
            length,
            max: NAME_MAX_CHARS,
        });
    }
    Ok(())
}

fn validate_tokens(color: &str, icon: &str) -> Result<(), ValidationError> {
    if !PROJECT_COLORS.contains(&color) {
        return Err(ValidationError::UnknownColor(color.to_string()));
    }
    if !PROJECT_ICONS.contains(&icon) {
        return Err(ValidationError::UnknownIcon(icon.to_string()));
    }
    Ok(())
}
