//! Repository for the `profiles` table.

use atelier_core::profile::{ProfileChanges, Role};
use atelier_core::types::UserId;
use sqlx::PgPool;

use crate::models::profile::Profile;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    user_id, role, full_name, bio, location, phone, contact_email, languages, \
    visibility, linkedin_url, twitter_url, website_url, company_name, \
    company_website, industry, stage, expertise, availability, years_experience, \
    created_at, updated_at";

/// Provides read and update operations for member profiles.
///
/// Profiles are inserted with their account (see
/// [`UserRepo::create_with_profile`](super::UserRepo::create_with_profile))
/// and removed by cascade.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find the profile of a user.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every editable column with `changes`. The role is untouched.
    ///
    /// Returns `None` if the user has no profile row.
    pub async fn update(
        pool: &PgPool,
        user_id: UserId,
        changes: &ProfileChanges,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                full_name = $2,
                bio = $3,
                location = $4,
                phone = $5,
                contact_email = $6,
                languages = $7,
                visibility = $8,
                linkedin_url = $9,
                twitter_url = $10,
                website_url = $11,
                company_name = $12,
                company_website = $13,
                industry = $14,
                stage = $15,
                expertise = $16,
                availability = $17,
                years_experience = $18
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&changes.full_name)
            .bind(&changes.bio)
            .bind(&changes.location)
            .bind(&changes.phone)
            .bind(&changes.contact_email)
            .bind(&changes.languages)
            .bind(&changes.visibility)
            .bind(&changes.linkedin_url)
            .bind(&changes.twitter_url)
            .bind(&changes.website_url)
            .bind(&changes.company_name)
            .bind(&changes.company_website)
            .bind(&changes.industry)
            .bind(&changes.stage)
            .bind(&changes.expertise)
            .bind(&changes.availability)
            .bind(changes.years_experience)
            .fetch_optional(pool)
            .await
    }

    /// Set the role of a profile that does not have one yet.
    ///
    /// Returns `None` if there is no profile or its role is already set.
    pub async fn set_role_if_unset(
        pool: &PgPool,
        user_id: UserId,
        role: Role,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET role = $2
             WHERE user_id = $1 AND role IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(role.as_str())
            .fetch_optional(pool)
            .await
    }
}
