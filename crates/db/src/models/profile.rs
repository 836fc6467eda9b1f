//! Member profile model and DTOs.

use atelier_core::profile::{ProfileSections, Role};
use atelier_core::types::{Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `profiles` table.
///
/// Role-specific columns are `NULL` (or empty arrays) for other roles.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub user_id: UserId,
    pub role: Option<String>,
    pub full_name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub contact_email: Option<String>,
    pub languages: Vec<String>,
    pub visibility: String,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub website_url: Option<String>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub industry: Option<String>,
    pub stage: Option<String>,
    pub expertise: Vec<String>,
    pub availability: Option<String>,
    pub years_experience: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Profile {
    /// The parsed role tag. Unknown values read as "no role".
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }

    pub fn sections(&self) -> ProfileSections {
        ProfileSections::for_role(self.role())
    }
}

/// DTO for the profile created alongside an account.
#[derive(Debug)]
pub struct CreateProfile {
    pub full_name: String,
    pub role: Option<Role>,
    pub languages: Vec<String>,
}
