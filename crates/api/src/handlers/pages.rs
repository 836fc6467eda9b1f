//! Public marketing pages.
//!
//! Each handler issues one CMS fetch and maps the records through the
//! locale resolver. An empty collection renders the page's empty state; a
//! missing detail record is a 404.

use atelier_cms::fetch;
use atelier_core::error::CoreError;
use atelier_core::locale::Locale;
use atelier_core::messages::Message;
use axum::extract::{Path, State};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::HeaderMap;
use axum::response::Redirect;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::locale::SiteLocale;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::{
    self, CaseStudyCard, DetailPage, EventCard, HomePage, ListPage, LoginPage, PageMeta,
    PostCard, PostDetail, ProgramCard, TeamMemberCard, VentureCard, VentureDetail, ViewContext,
};

fn context(state: &AppState, locale: Locale) -> ViewContext<'_> {
    ViewContext {
        locale,
        images: &state.images,
    }
}

/// GET /
///
/// Redirect (303) to the locale negotiated from `Accept-Language`.
pub async fn root(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    let locale = Locale::negotiate(
        headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()),
        state.config.default_locale,
    );
    Redirect::to(&views::localized_path(locale, ""))
}

/// GET /{locale}
pub async fn home(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
) -> AppResult<Json<DataResponse<HomePage>>> {
    let content = fetch::fetch_home(state.cms.as_ref()).await?;
    let page = views::home_page(context(&state, locale), &content);
    Ok(Json(DataResponse { data: page }))
}

/// GET /{locale}/ventures
pub async fn ventures(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
) -> AppResult<Json<DataResponse<ListPage<VentureCard>>>> {
    let records = fetch::fetch_ventures(state.cms.as_ref()).await?;
    let items = views::cards(context(&state, locale), &records, views::venture_card);
    let meta = PageMeta::from_message(locale, Message::VenturesTitle, "/ventures");
    Ok(Json(DataResponse {
        data: ListPage::new(meta, items, Message::NoVentures),
    }))
}

/// GET /{locale}/ventures/{slug}
pub async fn venture(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
    Path((_, slug)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<DetailPage<VentureDetail>>>> {
    let record = fetch::fetch_venture(state.cms.as_ref(), &slug)
        .await?
        .ok_or_else(|| not_found("Venture", &slug))?;

    let item = views::venture_detail(context(&state, locale), &record);
    let meta = PageMeta::new(locale, item.title.clone(), &format!("/ventures/{slug}"));
    Ok(Json(DataResponse {
        data: DetailPage { meta, item },
    }))
}

/// GET /{locale}/case-studies
pub async fn case_studies(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
) -> AppResult<Json<DataResponse<ListPage<CaseStudyCard>>>> {
    let records = fetch::fetch_case_studies(state.cms.as_ref()).await?;
    let items = views::cards(context(&state, locale), &records, views::case_study_card);
    let meta = PageMeta::from_message(locale, Message::CaseStudiesTitle, "/case-studies");
    Ok(Json(DataResponse {
        data: ListPage::new(meta, items, Message::NoCaseStudies),
    }))
}

/// GET /{locale}/programs
pub async fn programs(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
) -> AppResult<Json<DataResponse<ListPage<ProgramCard>>>> {
    let records = fetch::fetch_programs(state.cms.as_ref()).await?;
    let items = views::cards(context(&state, locale), &records, views::program_card);
    let meta = PageMeta::from_message(locale, Message::ProgramsTitle, "/programs");
    Ok(Json(DataResponse {
        data: ListPage::new(meta, items, Message::NoPrograms),
    }))
}

/// GET /{locale}/events
pub async fn events(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
) -> AppResult<Json<DataResponse<ListPage<EventCard>>>> {
    let records = fetch::fetch_events(state.cms.as_ref()).await?;
    let items = views::cards(context(&state, locale), &records, views::event_card);
    let meta = PageMeta::from_message(locale, Message::EventsTitle, "/events");
    Ok(Json(DataResponse {
        data: ListPage::new(meta, items, Message::NoEvents),
    }))
}

/// GET /{locale}/team
pub async fn team(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
) -> AppResult<Json<DataResponse<ListPage<TeamMemberCard>>>> {
    let records = fetch::fetch_team(state.cms.as_ref()).await?;
    let items = views::cards(context(&state, locale), &records, views::team_member_card);
    let meta = PageMeta::from_message(locale, Message::TeamTitle, "/team");
    Ok(Json(DataResponse {
        data: ListPage::new(meta, items, Message::NoTeamMembers),
    }))
}

/// GET /{locale}/blog
pub async fn blog(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
) -> AppResult<Json<DataResponse<ListPage<PostCard>>>> {
    let records = fetch::fetch_posts(state.cms.as_ref()).await?;
    let items = views::cards(context(&state, locale), &records, views::post_card);
    let meta = PageMeta::from_message(locale, Message::BlogTitle, "/blog");
    Ok(Json(DataResponse {
        data: ListPage::new(meta, items, Message::NoPosts),
    }))
}

/// GET /{locale}/blog/{slug}
pub async fn post(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
    Path((_, slug)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<DetailPage<PostDetail>>>> {
    let record = fetch::fetch_post(state.cms.as_ref(), &slug, locale)
        .await?
        .ok_or_else(|| not_found("Post", &slug))?;

    let item = views::post_detail(context(&state, locale), &record);
    let meta = PageMeta::new(locale, item.card.title.clone(), &format!("/blog/{slug}"));
    Ok(Json(DataResponse {
        data: DetailPage { meta, item },
    }))
}

/// GET /{locale}/login
pub async fn login(SiteLocale(locale): SiteLocale) -> Json<DataResponse<LoginPage>> {
    Json(DataResponse {
        data: views::login_page(locale),
    })
}

fn not_found(entity: &'static str, slug: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity,
        id: slug.to_string(),
    })
}
