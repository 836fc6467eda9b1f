//! Member profile schema (roles, enumerated values, form validation).
//!
//! Role-specific fields live on one flat record tagged by [`Role`]. The
//! forms here are validated with `validator`; the first failing field in
//! form order decides the [`Message`] shown to the member.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidateUrl, ValidationError, ValidationErrors};

use crate::messages::Message;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of the display name in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of the bio in characters.
pub const MAX_BIO_LENGTH: usize = 500;

/// Maximum length of short free-text fields (location, company, ...).
pub const MAX_SHORT_FIELD_LENGTH: usize = 200;

/// Maximum number of expertise tags a mentor can list.
pub const MAX_EXPERTISE_ITEMS: usize = 10;

/// Minimum password length for signup and password changes.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum years of experience a mentor can declare.
pub const MAX_YEARS_EXPERIENCE: i32 = 60;

/// Text the member must type to confirm account deletion.
pub const DELETE_CONFIRMATION: &str = "DELETE";

pub const STAGE_IDEA: &str = "idea";
pub const STAGE_MVP: &str = "mvp";
pub const STAGE_EARLY_REVENUE: &str = "early_revenue";
pub const STAGE_GROWTH: &str = "growth";
pub const STAGE_SCALE: &str = "scale";

/// Company stages an entrepreneur can pick.
pub const VALID_STAGES: &[&str] = &[
    STAGE_IDEA,
    STAGE_MVP,
    STAGE_EARLY_REVENUE,
    STAGE_GROWTH,
    STAGE_SCALE,
];

/// Mentor availability values.
pub const VALID_AVAILABILITIES: &[&str] = &["available", "limited", "unavailable"];

pub const VISIBILITY_PUBLIC: &str = "public";
pub const VISIBILITY_MEMBERS: &str = "members";
pub const VISIBILITY_PRIVATE: &str = "private";

/// Who can see a profile.
pub const VALID_VISIBILITIES: &[&str] = &[VISIBILITY_PUBLIC, VISIBILITY_MEMBERS, VISIBILITY_PRIVATE];

/// Languages a member can declare.
pub const VALID_LANGUAGES: &[&str] = &["en", "fr"];

/// Profile form fields in display order. The first failing field in this
/// order provides the error message.
const PROFILE_FIELD_ORDER: &[&str] = &[
    "full_name",
    "bio",
    "location",
    "phone",
    "contact_email",
    "languages",
    "visibility",
    "linkedin_url",
    "twitter_url",
    "website_url",
    "company_name",
    "company_website",
    "industry",
    "stage",
    "expertise",
    "availability",
    "years_experience",
];

const SIGNUP_FIELD_ORDER: &[&str] = &["email", "password", "full_name", "role"];

const PASSWORD_FIELD_ORDER: &[&str] = &["new_password"];

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// The kind of member a profile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Entrepreneur,
    Mentor,
    CommunityMember,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Entrepreneur => "entrepreneur",
            Role::Mentor => "mentor",
            Role::CommunityMember => "community_member",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "entrepreneur" => Some(Role::Entrepreneur),
            "mentor" => Some(Role::Mentor),
            "community_member" => Some(Role::CommunityMember),
            _ => None,
        }
    }
}

/// Which field groups a profile form or page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileSections {
    pub company: bool,
    pub mentoring: bool,
}

impl ProfileSections {
    pub fn for_role(role: Option<Role>) -> Self {
        Self {
            company: role == Some(Role::Entrepreneur),
            mentoring: role == Some(Role::Mentor),
        }
    }
}

/// Dashboard variant shown to a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardKind {
    /// No role chosen yet.
    Onboarding,
    Entrepreneur,
    Mentor,
    Community,
}

impl DashboardKind {
    pub fn for_role(role: Option<Role>) -> Self {
        match role {
            None => DashboardKind::Onboarding,
            Some(Role::Entrepreneur) => DashboardKind::Entrepreneur,
            Some(Role::Mentor) => DashboardKind::Mentor,
            Some(Role::CommunityMember) => DashboardKind::Community,
        }
    }
}

// ---------------------------------------------------------------------------
// Field validators
// ---------------------------------------------------------------------------

fn error(code: &'static str) -> ValidationError {
    ValidationError::new(code)
}

fn validate_name(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error("name_required"));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(error("name_too_long"));
    }
    Ok(())
}

fn validate_bio(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_BIO_LENGTH {
        return Err(error("bio_too_long"));
    }
    Ok(())
}

fn validate_short_field(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_SHORT_FIELD_LENGTH {
        return Err(error("field_too_long"));
    }
    Ok(())
}

/// An empty string is accepted; anything else must be an absolute
/// `http(s)` URL with a host.
fn validate_url_or_empty(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    if !value.validate_url() {
        return Err(error("invalid_url"));
    }
    let has_web_scheme = value.starts_with("https://") || value.starts_with("http://");
    if !has_web_scheme || value.chars().count() > MAX_SHORT_FIELD_LENGTH {
        return Err(error("invalid_url"));
    }
    Ok(())
}

fn validate_email_or_empty(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_email() {
        Ok(())
    } else {
        Err(error("invalid_email"))
    }
}

fn validate_email_required(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if !value.is_empty() && value.validate_email() {
        Ok(())
    } else {
        Err(error("invalid_email"))
    }
}

fn validate_password_length(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(error("password_too_short"));
    }
    Ok(())
}

fn validate_one_of(
    value: &str,
    allowed: &[&str],
    code: &'static str,
    allow_empty: bool,
) -> Result<(), ValidationError> {
    if (allow_empty && value.is_empty()) || allowed.contains(&value) {
        Ok(())
    } else {
        Err(error(code))
    }
}

fn validate_stage(value: &str) -> Result<(), ValidationError> {
    validate_one_of(value, VALID_STAGES, "invalid_stage", true)
}

fn validate_availability(value: &str) -> Result<(), ValidationError> {
    validate_one_of(value, VALID_AVAILABILITIES, "invalid_availability", true)
}

fn validate_visibility(value: &str) -> Result<(), ValidationError> {
    validate_one_of(value, VALID_VISIBILITIES, "invalid_visibility", false)
}

fn validate_role_or_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || Role::parse(value).is_some() {
        Ok(())
    } else {
        Err(error("invalid_role"))
    }
}

fn validate_languages(values: &[String]) -> Result<(), ValidationError> {
    if values.is_empty() {
        return Err(error("languages_required"));
    }
    if values.iter().any(|l| !VALID_LANGUAGES.contains(&l.as_str())) {
        return Err(error("invalid_language"));
    }
    Ok(())
}

fn validate_expertise(values: &[String]) -> Result<(), ValidationError> {
    if values.len() > MAX_EXPERTISE_ITEMS {
        return Err(error("too_many_expertise"));
    }
    if values.iter().any(|v| v.chars().count() > MAX_SHORT_FIELD_LENGTH) {
        return Err(error("field_too_long"));
    }
    Ok(())
}

/// Map the first failing field (in `order`) to its message.
///
/// Codes without a dedicated message map to [`Message::InvalidSubmission`].
pub fn first_error(errors: &ValidationErrors, order: &[&str]) -> Message {
    let field_errors = errors.field_errors();
    order
        .iter()
        .find_map(|field| field_errors.get(*field).and_then(|errs| errs.first()))
        .or_else(|| field_errors.values().find_map(|errs| errs.first()))
        .and_then(|err| Message::from_code(&err.code))
        .unwrap_or(Message::InvalidSubmission)
}

fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Profile form
// ---------------------------------------------------------------------------

/// A profile edit submission. Blank strings mean "not set".
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProfileForm {
    #[validate(custom(function = "validate_name"))]
    pub full_name: String,
    #[validate(custom(function = "validate_bio"))]
    pub bio: String,
    #[validate(custom(function = "validate_short_field"))]
    pub location: String,
    #[validate(custom(function = "validate_short_field"))]
    pub phone: String,
    #[validate(custom(function = "validate_email_or_empty"))]
    pub contact_email: String,
    #[validate(custom(function = "validate_languages"))]
    pub languages: Vec<String>,
    #[validate(custom(function = "validate_visibility"))]
    pub visibility: String,
    #[validate(custom(function = "validate_url_or_empty"))]
    pub linkedin_url: String,
    #[validate(custom(function = "validate_url_or_empty"))]
    pub twitter_url: String,
    #[validate(custom(function = "validate_url_or_empty"))]
    pub website_url: String,

    // Entrepreneur
    #[validate(custom(function = "validate_short_field"))]
    pub company_name: String,
    #[validate(custom(function = "validate_url_or_empty"))]
    pub company_website: String,
    #[validate(custom(function = "validate_short_field"))]
    pub industry: String,
    #[validate(custom(function = "validate_stage"))]
    pub stage: String,

    // Mentor
    #[validate(custom(function = "validate_expertise"))]
    pub expertise: Vec<String>,
    #[validate(custom(function = "validate_availability"))]
    pub availability: String,
    pub years_experience: Option<i32>,
}

/// The normalized profile record written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileChanges {
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
}

impl ProfileForm {
    /// Validate the form and normalize it for `role`.
    ///
    /// Fields that do not belong to `role` are cleared, blank strings become
    /// `None`, and duplicate languages/expertise entries are dropped.
    pub fn into_changes(self, role: Option<Role>) -> Result<ProfileChanges, Message> {
        self.validate()
            .map_err(|errors| first_error(&errors, PROFILE_FIELD_ORDER))?;
        if self
            .years_experience
            .is_some_and(|y| !(0..=MAX_YEARS_EXPERIENCE).contains(&y))
        {
            return Err(Message::InvalidYearsExperience);
        }

        let sections = ProfileSections::for_role(role);
        let mut languages: Vec<String> = Vec::with_capacity(self.languages.len());
        for lang in self.languages {
            if !languages.contains(&lang) {
                languages.push(lang);
            }
        }

        let mut expertise: Vec<String> = Vec::new();
        if sections.mentoring {
            for item in &self.expertise {
                if let Some(item) = none_if_blank(item) {
                    if !expertise.contains(&item) {
                        expertise.push(item);
                    }
                }
            }
        }

        let company = |value: &str| sections.company.then(|| none_if_blank(value)).flatten();
        let mentoring = |value: &str| sections.mentoring.then(|| none_if_blank(value)).flatten();

        Ok(ProfileChanges {
            full_name: self.full_name.trim().to_string(),
            bio: none_if_blank(&self.bio),
            location: none_if_blank(&self.location),
            phone: none_if_blank(&self.phone),
            contact_email: none_if_blank(&self.contact_email),
            languages,
            visibility: self.visibility,
            linkedin_url: none_if_blank(&self.linkedin_url),
            twitter_url: none_if_blank(&self.twitter_url),
            website_url: none_if_blank(&self.website_url),
            company_name: company(&self.company_name),
            company_website: company(&self.company_website),
            industry: company(&self.industry),
            stage: company(&self.stage),
            expertise,
            availability: mentoring(&self.availability),
            years_experience: if sections.mentoring {
                self.years_experience
            } else {
                None
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Account forms
// ---------------------------------------------------------------------------

/// Signup submission. `role` may be blank and chosen later.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SignupForm {
    #[validate(custom(function = "validate_email_required"))]
    pub email: String,
    #[validate(custom(function = "validate_password_length"))]
    pub password: String,
    #[validate(custom(function = "validate_name"))]
    pub full_name: String,
    #[validate(custom(function = "validate_role_or_empty"))]
    pub role: String,
}

impl SignupForm {
    /// Validate and return the chosen role, if any.
    pub fn check(&self) -> Result<Option<Role>, Message> {
        self.validate()
            .map_err(|errors| first_error(&errors, SIGNUP_FIELD_ORDER))?;
        Ok(Role::parse(&self.role))
    }

    /// Emails are compared case-insensitively.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

/// Password change submission.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PasswordChangeForm {
    pub current_password: String,
    #[validate(custom(function = "validate_password_length"))]
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChangeForm {
    pub fn check(&self) -> Result<(), Message> {
        self.validate()
            .map_err(|errors| first_error(&errors, PASSWORD_FIELD_ORDER))?;
        if self.new_password != self.confirm_password {
            return Err(Message::PasswordMismatch);
        }
        Ok(())
    }
}

/// Account deletion submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeleteAccountForm {
    pub confirmation: String,
}

impl DeleteAccountForm {
    pub fn check(&self) -> Result<(), Message> {
        if self.confirmation.trim() == DELETE_CONFIRMATION {
            Ok(())
        } else {
            Err(Message::DeleteConfirmationMismatch)
        }
    }
}

/// Onboarding role choice.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoleSelectionForm {
    pub role: String,
}

impl RoleSelectionForm {
    pub fn check(&self) -> Result<Role, Message> {
        Role::parse(&self.role).ok_or(Message::InvalidRole)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
