//! GROQ query text for each page.
//!
//! Every query selects exactly the fields its page renders and carries an
//! explicit sort. Bilingual fields are projected with
//! [`dual_projection`] so the page can fall back between languages.

use atelier_core::locale::Locale;
use atelier_core::projection::{aliased_projection, dual_projection};

/// Number of items per section on the home page.
pub const HOME_SECTION_SIZE: usize = 3;

pub const VENTURE_FIELDS: &[&str] = &["title", "tagline"];
pub const VENTURE_DETAIL_FIELDS: &[&str] = &["title", "tagline", "description", "impact"];
pub const CASE_STUDY_FIELDS: &[&str] = &["title", "summary", "outcome"];
pub const PROGRAM_FIELDS: &[&str] = &["title", "description", "audience"];
pub const EVENT_FIELDS: &[&str] = &["title", "description", "location"];
pub const TEAM_FIELDS: &[&str] = &["role", "bio"];
pub const POST_FIELDS: &[&str] = &["title", "excerpt"];

/// Cheapest query that still proves the dataset answers.
pub const PROBE: &str = "count(*[_type == \"venture\"][0...1])";

/// Rich-text fields served in a single language.
pub const POST_BODY_FIELDS: &[&str] = &["body"];

fn venture_card() -> String {
    format!(
        r#"_id, "slug": slug.current, {}, website, "logo": logo.asset._ref"#,
        dual_projection(VENTURE_FIELDS)
    )
}

fn event_card() -> String {
    format!(
        r#"_id, {}, date, registrationUrl"#,
        dual_projection(EVENT_FIELDS)
    )
}

fn post_card() -> String {
    format!(
        r#"_id, "slug": slug.current, {}, publishedAt, "author": author->name, "cover": mainImage.asset._ref"#,
        dual_projection(POST_FIELDS)
    )
}

/// All ventures in display order.
pub fn ventures() -> String {
    format!(
        r#"*[_type == "venture"] | order(order asc) {{ {} }}"#,
        venture_card()
    )
}

/// One venture by `$slug`.
pub fn venture_by_slug() -> String {
    format!(
        r#"*[_type == "venture" && slug.current == $slug][0] {{ _id, "slug": slug.current, {}, website, foundedYear, "logo": logo.asset._ref }}"#,
        dual_projection(VENTURE_DETAIL_FIELDS)
    )
}

/// Case studies, newest first.
pub fn case_studies() -> String {
    format!(
        r#"*[_type == "caseStudy"] | order(publishedAt desc) {{ _id, "slug": slug.current, {}, publishedAt, "venture": venture->slug.current, "image": mainImage.asset._ref }}"#,
        dual_projection(CASE_STUDY_FIELDS)
    )
}

/// Programs in display order.
pub fn programs() -> String {
    format!(
        r#"*[_type == "program"] | order(order asc) {{ _id, {}, applyUrl }}"#,
        dual_projection(PROGRAM_FIELDS)
    )
}

/// Events that have not started yet, soonest first.
pub fn upcoming_events() -> String {
    format!(
        r#"*[_type == "event" && date >= now()] | order(date asc) {{ {} }}"#,
        event_card()
    )
}

/// Team members in display order.
pub fn team() -> String {
    format!(
        r#"*[_type == "teamMember"] | order(order asc) {{ _id, name, {}, linkedin, "photo": photo.asset._ref }}"#,
        dual_projection(TEAM_FIELDS)
    )
}

/// Blog posts, newest first.
pub fn posts() -> String {
    format!(
        r#"*[_type == "post"] | order(publishedAt desc) {{ {} }}"#,
        post_card()
    )
}

/// One post by `$slug`, with its body in `locale`.
pub fn post_by_slug(locale: Locale) -> String {
    format!(
        r#"*[_type == "post" && slug.current == $slug][0] {{ {}, {} }}"#,
        post_card(),
        aliased_projection(POST_BODY_FIELDS, locale)
    )
}

/// Featured ventures, upcoming events and latest posts in one round trip.
pub fn home() -> String {
    let n = HOME_SECTION_SIZE;
    format!(
        r#"{{ "ventures": *[_type == "venture" && featured == true] | order(order asc)[0...{n}] {{ {} }}, "events": *[_type == "event" && date >= now()] | order(date asc)[0...{n}] {{ {} }}, "posts": *[_type == "post"] | order(publishedAt desc)[0...{n}] {{ {} }} }}"#,
        venture_card(),
        event_card(),
        post_card()
    )
}
