//! User models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Language;

/// Achievement markers shown on the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Badge {
    /// Registered a first crop batch
    FirstHarvest,
}

/// A farmer account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub badges: Vec<Badge>,
}

impl User {
    pub fn has_badge(&self, badge: Badge) -> bool {
        self.badges.contains(&badge)
    }

    /// Grant a badge once. Returns `true` if it was newly granted.
    pub fn grant_badge(&mut self, badge: Badge) -> bool {
        if self.has_badge(badge) {
            return false;
        }
        self.badges.push(badge);
        true
    }
}
