//! Locale-resolved page models.
//!
//! Handlers fetch raw CMS records and map them through [`resolve`] into the
//! typed cards below. Every page carries a [`PageMeta`] with its title and
//! the same page's address in each published locale.

use atelier_cms::fetch::HomeContent;
use atelier_cms::image::ImageUrlBuilder;
use atelier_core::locale::{Locale, ALL_LOCALES};
use atelier_core::localized::{plain_str, resolve, resolve_opt};
use atelier_core::messages::Message;
use atelier_core::profile::{DashboardKind, ProfileSections, Role, DELETE_CONFIRMATION};
use atelier_db::models::profile::Profile;
use serde::Serialize;
use serde_json::Value;

/// Width requested for card thumbnails.
const CARD_IMAGE_WIDTH: u32 = 640;

/// Width requested for detail-page hero images.
const HERO_IMAGE_WIDTH: u32 = 1600;

// ---------------------------------------------------------------------------
// Page framing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleLink {
    pub locale: Locale,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub locale: Locale,
    pub title: String,
    pub alternates: Vec<LocaleLink>,
}

/// Path of `suffix` under the `locale` prefix (`/fr` + `/blog`).
pub fn localized_path(locale: Locale, suffix: &str) -> String {
    format!("/{}{suffix}", locale.code())
}

impl PageMeta {
    pub fn new(locale: Locale, title: impl Into<String>, suffix: &str) -> Self {
        Self {
            locale,
            title: title.into(),
            alternates: ALL_LOCALES
                .iter()
                .map(|&l| LocaleLink {
                    locale: l,
                    href: localized_path(l, suffix),
                })
                .collect(),
        }
    }

    pub fn from_message(locale: Locale, title: Message, suffix: &str) -> Self {
        Self::new(locale, title.text(locale), suffix)
    }
}

/// A list page. `empty_state` is set exactly when `items` is empty.
#[derive(Debug, Serialize)]
pub struct ListPage<T: Serialize> {
    pub meta: PageMeta,
    pub items: Vec<T>,
    pub empty_state: Option<&'static str>,
}

impl<T: Serialize> ListPage<T> {
    pub fn new(meta: PageMeta, items: Vec<T>, empty: Message) -> Self {
        let empty_state = items.is_empty().then(|| empty.text(meta.locale));
        Self {
            meta,
            items,
            empty_state,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DetailPage<T: Serialize> {
    pub meta: PageMeta,
    pub item: T,
}

/// Shared inputs for mapping CMS records to cards.
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub locale: Locale,
    pub images: &'a ImageUrlBuilder,
}

impl ViewContext<'_> {
    fn text(&self, record: &Value, field: &str) -> String {
        resolve(Some(record), field, self.locale)
    }

    fn text_opt(&self, record: &Value, field: &str) -> Option<String> {
        resolve_opt(Some(record), field, self.locale)
    }

    fn image(&self, record: &Value, field: &str, width: u32) -> Option<String> {
        plain_str(record, field).and_then(|r| self.images.url(&r, Some(width)))
    }

    fn href(&self, section: &str, record: &Value) -> Option<String> {
        plain_str(record, "slug").map(|slug| localized_path(self.locale, &format!("/{section}/{slug}")))
    }
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct VentureCard {
    pub title: String,
    pub tagline: String,
    pub href: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VentureDetail {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub impact: Option<String>,
    pub website: Option<String>,
    pub founded_year: Option<i64>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseStudyCard {
    pub title: String,
    pub summary: String,
    pub outcome: Option<String>,
    pub published_at: Option<String>,
    pub venture_href: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgramCard {
    pub title: String,
    pub description: String,
    pub audience: Option<String>,
    pub apply_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventCard {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub date: Option<String>,
    pub registration_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamMemberCard {
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    pub linkedin: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub title: String,
    pub excerpt: String,
    pub href: Option<String>,
    pub published_at: Option<String>,
    pub author: Option<String>,
    pub cover_url: Option<String>,
}

/// A post with its rich-text body in the page locale.
///
/// The body is served as stored; a post without a body in this locale has
/// a `null` body.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub card: PostCard,
    pub body: Value,
}

pub fn venture_card(ctx: ViewContext<'_>, record: &Value) -> VentureCard {
    VentureCard {
        title: ctx.text(record, "title"),
        tagline: ctx.text(record, "tagline"),
        href: ctx.href("ventures", record),
        website: plain_str(record, "website"),
        logo_url: ctx.image(record, "logo", CARD_IMAGE_WIDTH),
    }
}

pub fn venture_detail(ctx: ViewContext<'_>, record: &Value) -> VentureDetail {
    VentureDetail {
        title: ctx.text(record, "title"),
        tagline: ctx.text(record, "tagline"),
        description: ctx.text(record, "description"),
        impact: ctx.text_opt(record, "impact"),
        website: plain_str(record, "website"),
        founded_year: record.get("foundedYear").and_then(Value::as_i64),
        logo_url: ctx.image(record, "logo", HERO_IMAGE_WIDTH),
    }
}

pub fn case_study_card(ctx: ViewContext<'_>, record: &Value) -> CaseStudyCard {
    CaseStudyCard {
        title: ctx.text(record, "title"),
        summary: ctx.text(record, "summary"),
        outcome: ctx.text_opt(record, "outcome"),
        published_at: plain_str(record, "publishedAt"),
        venture_href: plain_str(record, "venture")
            .map(|slug| localized_path(ctx.locale, &format!("/ventures/{slug}"))),
        image_url: ctx.image(record, "image", CARD_IMAGE_WIDTH),
    }
}

pub fn program_card(ctx: ViewContext<'_>, record: &Value) -> ProgramCard {
    ProgramCard {
        title: ctx.text(record, "title"),
        description: ctx.text(record, "description"),
        audience: ctx.text_opt(record, "audience"),
        apply_url: plain_str(record, "applyUrl"),
    }
}

pub fn event_card(ctx: ViewContext<'_>, record: &Value) -> EventCard {
    EventCard {
        title: ctx.text(record, "title"),
        description: ctx.text(record, "description"),
        location: ctx.text_opt(record, "location"),
        date: plain_str(record, "date"),
        registration_url: plain_str(record, "registrationUrl"),
    }
}

pub fn team_member_card(ctx: ViewContext<'_>, record: &Value) -> TeamMemberCard {
    TeamMemberCard {
        name: plain_str(record, "name").unwrap_or_default(),
        role: ctx.text(record, "role"),
        bio: ctx.text_opt(record, "bio"),
        linkedin: plain_str(record, "linkedin"),
        photo_url: ctx.image(record, "photo", CARD_IMAGE_WIDTH),
    }
}

pub fn post_card(ctx: ViewContext<'_>, record: &Value) -> PostCard {
    PostCard {
        title: ctx.text(record, "title"),
        excerpt: ctx.text(record, "excerpt"),
        href: ctx.href("blog", record),
        published_at: plain_str(record, "publishedAt"),
        author: plain_str(record, "author"),
        cover_url: ctx.image(record, "cover", CARD_IMAGE_WIDTH),
    }
}

pub fn post_detail(ctx: ViewContext<'_>, record: &Value) -> PostDetail {
    PostDetail {
        card: PostCard {
            cover_url: ctx.image(record, "cover", HERO_IMAGE_WIDTH),
            ..post_card(ctx, record)
        },
        body: record.get("body").cloned().unwrap_or(Value::Null),
    }
}

/// Map every record with `f`.
pub fn cards<T>(
    ctx: ViewContext<'_>,
    records: &[Value],
    f: impl Fn(ViewContext<'_>, &Value) -> T,
) -> Vec<T> {
    records.iter().map(|r| f(ctx, r)).collect()
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub meta: PageMeta,
    pub ventures: Vec<VentureCard>,
    pub events: Vec<EventCard>,
    pub posts: Vec<PostCard>,
}

pub fn home_page(ctx: ViewContext<'_>, content: &HomeContent) -> HomePage {
    HomePage {
        meta: PageMeta::from_message(ctx.locale, Message::HomeTitle, ""),
        ventures: cards(ctx, &content.ventures, venture_card),
        events: cards(ctx, &content.events, event_card),
        posts: cards(ctx, &content.posts, post_card),
    }
}

// ---------------------------------------------------------------------------
// Member area
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub meta: PageMeta,
    pub profile: Profile,
    pub sections: ProfileSections,
    pub completeness: u8,
}

#[derive(Debug, Serialize)]
pub struct SettingsPage {
    pub meta: PageMeta,
    pub email: String,
    pub visibility: String,
    pub languages: Vec<String>,
    /// Text to type when deleting the account.
    pub delete_confirmation: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub meta: PageMeta,
    pub kind: DashboardKind,
    pub full_name: String,
    pub completeness: u8,
    /// Roles offered while onboarding; empty once a role is chosen.
    pub role_choices: Vec<Role>,
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub meta: PageMeta,
    pub login_endpoint: &'static str,
    pub signup_endpoint: &'static str,
}

/// Share of the fields shown for the profile's role that are filled in,
/// as a percentage.
pub fn profile_completeness(profile: &Profile) -> u8 {
    let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
    let has_social = filled(&profile.linkedin_url)
        || filled(&profile.twitter_url)
        || filled(&profile.website_url);

    let mut checks = vec![
        !profile.full_name.trim().is_empty(),
        filled(&profile.bio),
        filled(&profile.location),
        !profile.languages.is_empty(),
        has_social,
    ];

    let sections = profile.sections();
    if sections.company {
        checks.extend([
            filled(&profile.company_name),
            filled(&profile.company_website),
            filled(&profile.industry),
            filled(&profile.stage),
        ]);
    }
    if sections.mentoring {
        checks.extend([
            !profile.expertise.is_empty(),
            filled(&profile.availability),
            profile.years_experience.is_some(),
        ]);
    }

    let done = checks.iter().filter(|c| **c).count();
    ((done * 100) / checks.len()) as u8
}

pub fn profile_page(locale: Locale, profile: Profile) -> ProfilePage {
    ProfilePage {
        meta: PageMeta::from_message(locale, Message::ProfileTitle, "/profile"),
        sections: profile.sections(),
        completeness: profile_completeness(&profile),
        profile,
    }
}

pub fn settings_page(locale: Locale, email: String, profile: Profile) -> SettingsPage {
    SettingsPage {
        meta: PageMeta::from_message(locale, Message::SettingsTitle, "/settings"),
        email,
        visibility: profile.visibility,
        languages: profile.languages,
        delete_confirmation: DELETE_CONFIRMATION,
    }
}

pub fn dashboard_page(locale: Locale, profile: &Profile) -> DashboardPage {
    let kind = DashboardKind::for_role(profile.role());
    let role_choices = match kind {
        DashboardKind::Onboarding => vec![Role::Entrepreneur, Role::Mentor, Role::CommunityMember],
        _ => Vec::new(),
    };
    DashboardPage {
        meta: PageMeta::from_message(locale, Message::DashboardTitle, "/dashboard"),
        kind,
        full_name: profile.full_name.clone(),
        completeness: profile_completeness(profile),
        role_choices,
    }
}

pub fn login_page(locale: Locale) -> LoginPage {
    LoginPage {
        meta: PageMeta::from_message(locale, Message::LoginTitle, "/login"),
        login_endpoint: "/api/v1/auth/login",
        signup_endpoint: "/api/v1/auth/signup",
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    fn images() -> ImageUrlBuilder {
        ImageUrlBuilder::new("proj", "production")
    }

    fn profile(role: Option<Role>) -> Profile {
        Profile {
            user_id: Uuid::new_v4(),
            role: role.map(|r| r.as_str().to_string()),
            full_name: "Amina Diallo".to_string(),
            bio: None,
            location: None,
            phone: None,
            contact_email: None,
            languages: vec!["fr".to_string()],
            visibility: "members".to_string(),
            linkedin_url: None,
            twitter_url: None,
            website_url: None,
            company_name: None,
            company_website: None,
            industry: None,
            stage: None,
            expertise: Vec::new(),
            availability: None,
            years_experience: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn alternates_cover_every_locale() {
        let meta = PageMeta::from_message(Locale::Fr, Message::BlogTitle, "/blog");
        assert_eq!(meta.title, "Blogue");
        assert_eq!(
            meta.alternates,
            vec![
                LocaleLink { locale: Locale::En, href: "/en/blog".to_string() },
                LocaleLink { locale: Locale::Fr, href: "/fr/blog".to_string() },
            ]
        );
    }

    #[test]
    fn empty_list_carries_empty_state() {
        let meta = PageMeta::from_message(Locale::En, Message::VenturesTitle, "/ventures");
        let page: ListPage<VentureCard> = ListPage::new(meta, Vec::new(), Message::NoVentures);
        assert_eq!(page.empty_state, Some("No ventures published yet. Check back soon."));
    }

    #[test]
    fn non_empty_list_has_no_empty_state() {
        let images = images();
        let ctx = ViewContext { locale: Locale::En, images: &images };
        let items = cards(ctx, &[json!({ "titleEn": "Harbour" })], venture_card);
        let meta = PageMeta::from_message(Locale::En, Message::VenturesTitle, "/ventures");
        let page = ListPage::new(meta, items, Message::NoVentures);
        assert_eq!(page.empty_state, None);
    }

    #[test]
    fn venture_card_falls_back_to_english() {
        let images = images();
        let ctx = ViewContext { locale: Locale::Fr, images: &images };
        let card = venture_card(
            ctx,
            &json!({
                "slug": "harbour",
                "titleEn": "Harbour",
                "titleFr": "",
                "taglineFr": "Le marché des pêcheurs",
                "logo": "image-abc-100x100-png",
            }),
        );
        assert_eq!(card.title, "Harbour");
        assert_eq!(card.tagline, "Le marché des pêcheurs");
        assert_eq!(card.href.as_deref(), Some("/fr/ventures/harbour"));
        assert!(card.logo_url.unwrap().ends_with("abc-100x100.png?w=640&auto=format"));
    }

    #[test]
    fn case_study_links_to_its_venture() {
        let images = images();
        let ctx = ViewContext { locale: Locale::En, images: &images };
        let card = case_study_card(ctx, &json!({ "titleEn": "Scaling", "venture": "harbour" }));
        assert_eq!(card.venture_href.as_deref(), Some("/en/ventures/harbour"));
        assert_eq!(card.outcome, None);
    }

    #[test]
    fn post_detail_keeps_body_as_stored() {
        let images = images();
        let ctx = ViewContext { locale: Locale::Fr, images: &images };
        let body = json!([{ "_type": "block", "children": [{ "text": "Bonjour" }] }]);
        let detail = post_detail(ctx, &json!({ "slug": "hello", "titleEn": "Hello", "body": body }));
        assert_eq!(detail.card.title, "Hello");
        assert_eq!(detail.body, body);

        let without_body = post_detail(ctx, &json!({ "slug": "hello" }));
        assert_eq!(without_body.body, Value::Null);
    }

    #[test]
    fn completeness_counts_only_role_fields() {
        let mut p = profile(None);
        // name and languages out of five shared checks
        assert_eq!(profile_completeness(&p), 40);

        p.role = Some("mentor".to_string());
        p.expertise = vec!["finance".to_string()];
        p.availability = Some("limited".to_string());
        p.years_experience = Some(5);
        assert_eq!(profile_completeness(&p), 62);

        p.company_name = Some("Ignored".to_string());
        assert_eq!(profile_completeness(&p), 62);
    }

    #[test]
    fn onboarding_dashboard_offers_roles() {
        let page = dashboard_page(Locale::En, &profile(None));
        assert_eq!(page.kind, DashboardKind::Onboarding);
        assert_eq!(page.role_choices.len(), 3);

        let page = dashboard_page(Locale::En, &profile(Some(Role::Entrepreneur)));
        assert_eq!(page.kind, DashboardKind::Entrepreneur);
        assert!(page.role_choices.is_empty());
    }
}
