use std::sync::Arc;

use axum::{
    Router,
    extract::{Form, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use cookie::{Cookie, SameSite};
use serde::Deserialize;
use tracing::warn;

use crate::{
    AppState, CookieKey,
    catalog::TRENDING_RAIL_LEN,
    error::{AdminError, AppResult},
    filter::{FilterCriteria, FilterParams, filter_movies},
    models::{Category, MovieId, MovieRecord, NewMovie, Quality},
    notice::Notice,
    session::{AdminSession, SessionGate},
    templates::{self, AdminTab, AdminView, HomeView},
};

const SESSION_COOKIE: &str = "marquee_admin";
const NOTICE_COOKIE: &str = "marquee_notice";

type AdminJar = PrivateCookieJar<CookieKey>;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/slider/next", post(slide_next))
        .route("/slider/prev", post(slide_prev))
        .route("/slider/{index}", post(slide_to))
        .route("/admin", get(admin))
        .route("/admin/login", post(login))
        .route("/admin/logout", post(logout))
        .route("/admin/password", post(change_password))
        .route("/admin/refresh", post(refresh))
        .route("/admin/movies", post(create_movie))
        .route("/admin/movies/{id}", post(update_movie))
        .route("/admin/movies/{id}/edit", get(edit_movie))
        .route("/admin/movies/{id}/delete", post(delete_movie))
        .route("/admin/movies/{id}/featured", post(toggle_featured))
        .route("/admin/movies/{id}/trending", post(toggle_trending))
        .with_state(state)
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Html<String> {
    let criteria = FilterCriteria::from(params);
    let catalog = state.catalog.read().await;

    let featured = catalog.featured();
    let current = state.slider.lock().await.current_for(featured.len());
    let trending = catalog.trending(TRENDING_RAIL_LEN);
    let results = filter_movies(catalog.movies(), &criteria);

    Html(templates::home_page(&HomeView {
        slide: current.map(|i| (i, featured.as_slice())),
        trending: &trending,
        results: &results,
        criteria: &criteria,
    }))
}

pub async fn slide_next(State(state): State<Arc<AppState>>) -> Redirect {
    let len = state.catalog.read().await.featured().len();
    state.slider.lock().await.advance(len);
    Redirect::to("/")
}

pub async fn slide_prev(State(state): State<Arc<AppState>>) -> Redirect {
    let len = state.catalog.read().await.featured().len();
    state.slider.lock().await.retreat(len);
    Redirect::to("/")
}

pub async fn slide_to(State(state): State<Arc<AppState>>, Path(index): Path<usize>) -> Redirect {
    let len = state.catalog.read().await.featured().len();
    state.slider.lock().await.jump(index, len);
    Redirect::to("/")
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    tab: Option<String>,
}

pub async fn admin(
    State(state): State<Arc<AppState>>,
    jar: AdminJar,
    Query(q): Query<AdminQuery>,
) -> Html<String> {
    let notice = notice_of(&jar);
    if !session_of(&jar).is_authenticated() {
        return Html(templates::login_page(notice.as_ref()));
    }

    render_admin(&state, AdminTab::parse(q.tab.as_deref()), notice.as_ref(), None).await
}

async fn render_admin(
    state: &AppState,
    tab: AdminTab,
    notice: Option<&Notice>,
    draft: Option<&NewMovie>,
) -> Html<String> {
    let catalog = state.catalog.read().await;
    Html(templates::admin_page(&AdminView {
        tab,
        movies: catalog.movies(),
        stats: catalog.stats(),
        notice,
        draft,
    }))
}

#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: AdminJar,
    Form(form): Form<PasswordForm>,
) -> (AdminJar, Redirect) {
    let mut session = session_of(&jar);
    let result = state.gate.read().await.login(&mut session, &form.password);
    match result {
        Ok(()) => {
            let jar = flash(jar.add(session_cookie()), &state.notices.success("Successfully logged in!"));
            (jar, Redirect::to("/admin"))
        },
        Err(err) => {
            warn!(error = %err, "admin login rejected");
            (flash(jar, &state.notices.error(err.notice_message())), Redirect::to("/admin"))
        },
    }
}

pub async fn logout(jar: AdminJar) -> (AdminJar, Redirect) {
    let mut session = session_of(&jar);
    SessionGate::logout(&mut session);
    (jar.remove(Cookie::build(SESSION_COOKIE).path("/admin")), Redirect::to("/admin"))
}

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    jar: AdminJar,
    Form(form): Form<PasswordForm>,
) -> (AdminJar, Redirect) {
    if !session_of(&jar).is_authenticated() {
        return (jar, Redirect::to("/admin"));
    }

    let result = state.gate.write().await.change_secret(&form.password).await;
    let jar = report(&state, jar, result.map(|_| "Password updated successfully!"));
    (jar, Redirect::to("/admin?tab=settings"))
}

pub async fn refresh(State(state): State<Arc<AppState>>, jar: AdminJar) -> (AdminJar, Redirect) {
    if !session_of(&jar).is_authenticated() {
        return (jar, Redirect::to("/admin"));
    }

    match state.admin.refresh().await {
        Ok(_) => (jar, Redirect::to("/admin")),
        Err(err) => (flash(jar, &state.notices.error(err.notice_message())), Redirect::to("/admin")),
    }
}

/// The add/edit movie form. Unchecked checkboxes are simply absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MovieForm {
    title: String,
    thumbnail: String,
    url: String,
    genre: String,
    year: String,
    rating: String,
    duration: String,
    quality: String,
    description: String,
    views: String,
    cast: String,
    director: String,
    trailer: String,
    language: String,
    size: String,
    is_featured: Option<String>,
    is_trending: Option<String>,
    category: String,
}

impl From<MovieForm> for NewMovie {
    fn from(f: MovieForm) -> Self {
        let defaults = NewMovie::default();
        Self {
            title: f.title,
            thumbnail: f.thumbnail,
            url: f.url,
            genre: f.genre,
            year: f.year,
            rating: f.rating,
            duration: f.duration,
            quality: if f.quality.is_empty() { defaults.quality } else { Quality::from(f.quality) },
            description: f.description,
            views: if f.views.is_empty() { defaults.views } else { f.views },
            cast: f.cast,
            director: f.director,
            trailer: f.trailer,
            language: f.language,
            size: f.size,
            is_featured: f.is_featured.is_some(),
            is_trending: f.is_trending.is_some(),
            category: if f.category.is_empty() {
                defaults.category
            } else {
                Category::from(f.category)
            },
        }
    }
}

/// A rejected submit re-renders the add tab with the admin's input instead of
/// redirecting to a blank form.
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    jar: AdminJar,
    Form(form): Form<MovieForm>,
) -> Response {
    if !session_of(&jar).is_authenticated() {
        return Redirect::to("/admin").into_response();
    }

    let movie = NewMovie::from(form);
    match state.admin.create(movie.clone()).await {
        Ok(_) => {
            let jar = flash(jar, &state.notices.success("Movie added successfully!"));
            (jar, Redirect::to("/admin?tab=movies")).into_response()
        },
        Err(err) => {
            let notice = state.notices.error(err.notice_message());
            render_admin(&state, AdminTab::Add, Some(&notice), Some(&movie)).await.into_response()
        },
    }
}

pub async fn edit_movie(
    State(state): State<Arc<AppState>>,
    jar: AdminJar,
    Path(id): Path<String>,
) -> AppResult<Response> {
    if !session_of(&jar).is_authenticated() {
        return Ok(Redirect::to("/admin").into_response());
    }

    let id = MovieId::new(id);
    let catalog = state.catalog.read().await;
    let movie = catalog.get(&id).ok_or_else(|| AdminError::UnknownMovie(id.clone()))?;
    let notice = notice_of(&jar);
    Ok(Html(templates::edit_page(movie, notice.as_ref())).into_response())
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    jar: AdminJar,
    Path(id): Path<String>,
    Form(form): Form<MovieForm>,
) -> Response {
    if !session_of(&jar).is_authenticated() {
        return Redirect::to("/admin").into_response();
    }

    let id = MovieId::new(id);
    let movie = NewMovie::from(form);
    match state.admin.update(&id, movie.clone()).await {
        Ok(_) => {
            let jar = flash(jar, &state.notices.success("Movie updated successfully!"));
            (jar, Redirect::to("/admin")).into_response()
        },
        Err(err) => {
            let notice = state.notices.error(err.notice_message());
            let draft = MovieRecord { id, fields: movie };
            Html(templates::edit_page(&draft, Some(&notice))).into_response()
        },
    }
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    jar: AdminJar,
    Path(id): Path<String>,
) -> (AdminJar, Redirect) {
    if !session_of(&jar).is_authenticated() {
        return (jar, Redirect::to("/admin"));
    }

    let result = state.admin.delete(&MovieId::new(id)).await;
    (report(&state, jar, result.map(|_| "Movie deleted successfully!")), Redirect::to("/admin"))
}

pub async fn toggle_featured(
    State(state): State<Arc<AppState>>,
    jar: AdminJar,
    Path(id): Path<String>,
) -> (AdminJar, Redirect) {
    if !session_of(&jar).is_authenticated() {
        return (jar, Redirect::to("/admin"));
    }

    let result = state.admin.toggle_featured(&MovieId::new(id)).await;
    (report(&state, jar, result.map(|_| "Movie featured status updated!")), Redirect::to("/admin"))
}

pub async fn toggle_trending(
    State(state): State<Arc<AppState>>,
    jar: AdminJar,
    Path(id): Path<String>,
) -> (AdminJar, Redirect) {
    if !session_of(&jar).is_authenticated() {
        return (jar, Redirect::to("/admin"));
    }

    let result = state.admin.toggle_trending(&MovieId::new(id)).await;
    (report(&state, jar, result.map(|_| "Movie trending status updated!")), Redirect::to("/admin"))
}

fn report(state: &AppState, jar: AdminJar, result: Result<&'static str, AdminError>) -> AdminJar {
    let notice = match result {
        Ok(message) => state.notices.success(message),
        Err(err) => state.notices.error(err.notice_message()),
    };
    flash(jar, &notice)
}

fn flash(jar: AdminJar, notice: &Notice) -> AdminJar {
    jar.add(
        Cookie::build((NOTICE_COOKIE, notice.encode()))
            .path("/admin")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    )
}

fn notice_of(jar: &AdminJar) -> Option<Notice> {
    jar.get(NOTICE_COOKIE).and_then(|c| Notice::decode(c.value()))
}

fn session_of(jar: &AdminJar) -> AdminSession {
    match jar.get(SESSION_COOKIE) {
        Some(c) if c.value() == "1" => AdminSession::Authenticated,
        _ => AdminSession::Unauthenticated,
    }
}

fn session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "1"))
        .path("/admin")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
