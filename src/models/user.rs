// ABOUTME: Current-user boundary model used for role-based wizard gating

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::section::SectionCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Client,
    Viewer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub registration_date: DateTime<Utc>,
}

impl CurrentUser {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Viewers and inactive accounts can edit a draft but never publish it
    pub fn can_publish(&self) -> bool {
        self.is_active() && matches!(self.role, UserRole::Admin | UserRole::Client)
    }

    pub fn can_use_category(&self, category: SectionCategory) -> bool {
        match category {
            SectionCategory::Commerce => matches!(self.role, UserRole::Admin | UserRole::Client),
            _ => true,
        }
    }
}
