use maud::{DOCTYPE, Markup, html};

use crate::{
    filter::{FilterCriteria, GENRE_CHOICES, QUALITY_CHOICES},
    models::{
        CatalogStats, Category, FEATURED_SOFT_LIMIT, MovieId, MovieRecord, NewMovie, Quality,
        first_part,
    },
    notice::{Notice, NoticeKind},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
const PLACEHOLDER_IMG: &str = "/placeholder.svg";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AdminTab {
    #[default]
    Movies,
    Featured,
    Add,
    Settings,
}

impl AdminTab {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("featured") => AdminTab::Featured,
            Some("add") => AdminTab::Add,
            Some("settings") => AdminTab::Settings,
            _ => AdminTab::Movies,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            AdminTab::Movies => "movies",
            AdminTab::Featured => "featured",
            AdminTab::Add => "add",
            AdminTab::Settings => "settings",
        }
    }

    fn label(self) -> &'static str {
        match self {
            AdminTab::Movies => "All Movies",
            AdminTab::Featured => "Banner Control",
            AdminTab::Add => "Add Movie",
            AdminTab::Settings => "Settings",
        }
    }
}

/// Everything the public page needs, already derived from the catalog.
pub struct HomeView<'a> {
    pub slide: Option<(usize, &'a [&'a MovieRecord])>,
    pub trending: &'a [&'a MovieRecord],
    pub results: &'a [&'a MovieRecord],
    pub criteria: &'a FilterCriteria,
}

pub fn home_page(view: &HomeView<'_>) -> String {
    page(
        "Marquee · HD Movies",
        html! {
            div class="w-full min-h-screen bg-gradient-to-br from-gray-900 via-black to-gray-900" {
                header class="w-full bg-black/80 border-b border-red-500/20 sticky top-0 z-50" {
                    div class="max-w-7xl mx-auto px-4 py-4 flex items-center justify-between" {
                        h1 class="text-3xl font-bold text-white" {
                            span class="text-red-500" { "Mar" }
                            span class="text-orange-500" { "quee" }
                        }
                        a class="rounded border border-red-500/30 px-3 py-1 text-sm text-red-400" href="/admin" { "Admin Panel" }
                    }
                }

                @if let Some((current, featured)) = view.slide {
                    (banner(current, featured))
                }

                main class="max-w-7xl mx-auto px-4 py-8 space-y-10" {
                    (search_form(view.criteria))

                    @if !view.trending.is_empty() {
                        section {
                            h3 class="text-2xl font-bold text-white mb-4" { "Trending Now" }
                            div class="grid grid-cols-2 md:grid-cols-6 gap-4" {
                                @for movie in view.trending {
                                    (trending_card(movie))
                                }
                            }
                        }
                    }

                    section {
                        h3 class="text-2xl font-bold text-white mb-4" {
                            "Latest Movies "
                            span class="text-gray-400 text-base" { "(" (view.results.len()) ")" }
                        }
                        @if view.results.is_empty() {
                            p class="text-gray-400" { "No movies found. Try a different search or filter." }
                        } @else {
                            div class="grid md:grid-cols-2 lg:grid-cols-3 gap-6" {
                                @for movie in view.results {
                                    (movie_card(movie))
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn banner(current: usize, featured: &[&MovieRecord]) -> Markup {
    let Some(movie) = featured.get(current) else {
        return html! {};
    };
    let m = &movie.fields;

    html! {
        section class="relative w-full h-[70vh] overflow-hidden" {
            img class="absolute inset-0 w-full h-full object-cover" src=(thumbnail(movie)) alt=(m.title);
            div class="absolute inset-0 bg-gradient-to-r from-black via-black/50 to-transparent" {}
            div class="relative z-10 max-w-7xl mx-auto px-4 h-full flex items-center" {
                div class="max-w-2xl" {
                    span class="mb-4 inline-block rounded bg-red-500 px-2 py-1 text-white text-sm" { "Featured Movie" }
                    h2 class="text-5xl font-bold text-white mb-4" { (m.title) }
                    div class="flex gap-4 mb-4 text-white/80" {
                        span { "★ " (m.rating) }
                        span { (m.year) }
                        span { (m.duration) }
                        span class="border border-white/30 px-2" { (m.quality.as_str()) }
                    }
                    p class="text-lg text-white/90 mb-6" { (m.description) }
                    div class="flex gap-4" {
                        a class="rounded bg-red-500 px-6 py-3 text-white" href=(m.url) target="_blank" rel="noopener noreferrer" { "Watch Now" }
                        @if !m.trailer.is_empty() {
                            a class="rounded border border-white/30 px-6 py-3 text-white" href=(m.trailer) target="_blank" rel="noopener noreferrer" { "Trailer" }
                        }
                    }
                }
            }
            div class="absolute inset-x-0 bottom-6 z-20 flex items-center justify-center gap-3" {
                form method="post" action="/slider/prev" {
                    button class="rounded-full bg-black/50 px-3 py-1 text-white" type="submit" { "‹" }
                }
                @for index in 0..featured.len() {
                    form method="post" action=(format!("/slider/{index}")) {
                        button
                            class=(if index == current { "h-3 w-3 rounded-full bg-red-500" } else { "h-3 w-3 rounded-full bg-white/50" })
                            type="submit"
                            aria-label=(format!("Slide {}", index + 1)) {}
                    }
                }
                form method="post" action="/slider/next" {
                    button class="rounded-full bg-black/50 px-3 py-1 text-white" type="submit" { "›" }
                }
            }
        }
    }
}

fn search_form(criteria: &FilterCriteria) -> Markup {
    html! {
        form class="flex flex-col md:flex-row gap-4" method="get" action="/" {
            input class="flex-1 rounded bg-gray-800 border border-gray-700 px-4 py-2 text-white" type="search" name="q" placeholder="Search movies, actors, genres..." value=(criteria.query);
            select class="rounded bg-gray-800 border border-gray-700 px-3 py-2 text-white" name="genre" {
                @for genre in GENRE_CHOICES {
                    option value=(genre) selected[criteria.genre.as_str() == genre] { (capitalize(genre)) }
                }
            }
            select class="rounded bg-gray-800 border border-gray-700 px-3 py-2 text-white" name="quality" {
                @for quality in QUALITY_CHOICES {
                    option value=(quality) selected[criteria.quality.as_str() == quality] {
                        @if quality == "all" { "All Quality" } @else { (quality) }
                    }
                }
            }
            button class="rounded bg-red-500 px-6 py-2 text-white" type="submit" { "Filter" }
        }
    }
}

fn trending_card(movie: &MovieRecord) -> Markup {
    let m = &movie.fields;
    html! {
        a class="block rounded-lg bg-gray-800/50 overflow-hidden" href=(m.url) target="_blank" rel="noopener noreferrer" {
            img class="w-full aspect-[2/3] object-cover" src=(thumbnail(movie)) alt=(m.title);
            div class="p-2" {
                h4 class="text-sm font-semibold text-white truncate" { (m.title) }
                div class="flex justify-between text-xs text-gray-400" {
                    span { (m.year) }
                    span { "★ " (m.rating) }
                }
            }
        }
    }
}

fn movie_card(movie: &MovieRecord) -> Markup {
    let m = &movie.fields;
    let cast = if m.cast.contains(',') {
        format!("{}, …", first_part(&m.cast))
    } else {
        first_part(&m.cast).to_string()
    };

    html! {
        article class="rounded-lg bg-gray-800/50 border border-gray-700 overflow-hidden" {
            div class="relative" {
                img class="w-full h-64 object-cover" src=(thumbnail(movie)) alt=(m.title);
                div class="absolute top-2 left-2 flex gap-2" {
                    span class="rounded bg-red-500 px-2 text-xs text-white" { (m.quality.as_str()) }
                    @if m.is_trending {
                        span class="rounded bg-orange-500 px-2 text-xs text-white" { "Trending" }
                    }
                }
                @if !m.size.is_empty() {
                    span class="absolute top-2 right-2 rounded bg-black/70 px-2 text-xs text-white" { (m.size) }
                }
            }
            div class="p-4 space-y-2" {
                h4 class="text-lg font-semibold text-white truncate" { (m.title) }
                div class="flex gap-4 text-sm text-gray-400" {
                    span { "★ " (m.rating) }
                    span { (m.year) }
                    span { (m.duration) }
                }
                p class="text-gray-300 text-sm" { (m.description) }
                p class="text-xs text-gray-400" { span class="text-white" { "Cast: " } (cast) }
                p class="text-xs text-gray-400" { span class="text-white" { "Director: " } (m.director) }
                p class="text-xs text-gray-400" { span class="text-white" { "Language: " } (m.language) }
                div class="flex justify-between text-xs text-gray-400" {
                    span { (first_part(&m.genre)) }
                    span { (m.views) " views" }
                }
                a class="block rounded bg-red-500 py-2 text-center text-white" href=(m.url) target="_blank" rel="noopener noreferrer" { "Download / Watch" }
            }
        }
    }
}

pub fn login_page(notice: Option<&Notice>) -> String {
    page(
        "Admin Login",
        html! {
            div class="min-h-screen bg-gray-900 flex items-center justify-center p-4" {
                div class="w-full max-w-md rounded-lg bg-gray-800/50 border border-gray-700 p-8 space-y-4" {
                    h1 class="text-2xl text-white text-center" { "Marquee Admin" }
                    p class="text-gray-400 text-center" { "Enter password to access admin panel" }
                    (notice_banner(notice))
                    form class="space-y-4" method="post" action="/admin/login" {
                        label class="block text-white" for="password" { "Password" }
                        input class="w-full rounded bg-gray-700 border border-gray-600 px-3 py-2 text-white" type="password" name="password" id="password" placeholder="Enter admin password" required;
                        button class="w-full rounded bg-red-500 py-2 text-white" type="submit" { "Login to Admin Panel" }
                    }
                    a class="block text-center text-sm text-red-400" href="/" { "← Back to Website" }
                }
            }
        },
    )
}

pub struct AdminView<'a> {
    pub tab: AdminTab,
    pub movies: &'a [MovieRecord],
    pub stats: CatalogStats,
    pub notice: Option<&'a Notice>,
    /// Form input to put back into the add tab after a rejected submit.
    pub draft: Option<&'a NewMovie>,
}

pub fn admin_page(view: &AdminView<'_>) -> String {
    page(
        "Admin Panel",
        html! {
            div class="min-h-screen bg-gray-900 p-4" {
                div class="container mx-auto space-y-6" {
                    div class="flex items-center justify-between" {
                        div {
                            h1 class="text-3xl font-bold text-red-500" { "Marquee Admin Panel" }
                            p class="text-gray-400" { "Manage your movie website" }
                        }
                        div class="flex gap-4" {
                            a class="rounded border border-gray-600 px-4 py-2 text-gray-300" href="/" { "View Website" }
                            form method="post" action="/admin/refresh" {
                                button class="rounded border border-gray-600 px-4 py-2 text-gray-300" type="submit" { "Reload" }
                            }
                            form method="post" action="/admin/logout" {
                                button class="rounded border border-red-500/30 px-4 py-2 text-red-400" type="submit" { "Logout" }
                            }
                        }
                    }

                    (notice_banner(view.notice))
                    (stats_cards(&view.stats))

                    nav class="flex gap-2" {
                        @for tab in [AdminTab::Movies, AdminTab::Featured, AdminTab::Add, AdminTab::Settings] {
                            a class=(if tab == view.tab { "rounded bg-red-500 px-4 py-2 text-white" } else { "rounded bg-gray-800 px-4 py-2 text-gray-300" })
                                href=(format!("/admin?tab={}", tab.slug())) { (tab.label()) }
                        }
                    }

                    @match view.tab {
                        AdminTab::Movies => { (movies_tab(view.movies)) }
                        AdminTab::Featured => { (featured_tab(view.movies, view.stats.featured)) }
                        AdminTab::Add => { (add_tab(view.draft)) }
                        AdminTab::Settings => { (settings_tab(&view.stats)) }
                    }
                }
            }
        },
    )
}

fn stats_cards(stats: &CatalogStats) -> Markup {
    let cards = [
        ("Total Movies", stats.total.to_string()),
        ("Featured Movies", stats.featured.to_string()),
        ("Trending Movies", stats.trending.to_string()),
        ("Total Views", format!("{}K", stats.total_views)),
    ];
    html! {
        div class="grid md:grid-cols-4 gap-6" {
            @for (label, value) in &cards {
                div class="rounded-lg bg-gray-800/50 border border-gray-700 p-6" {
                    p class="text-gray-400 text-sm" { (label) }
                    p class="text-3xl font-bold text-white" { (value) }
                }
            }
        }
    }
}

fn movies_tab(movies: &[MovieRecord]) -> Markup {
    html! {
        section class="rounded-lg bg-gray-800/50 border border-gray-700 p-6 space-y-4" {
            h2 class="text-white text-xl" { "Manage All Movies (" (movies.len()) ")" }
            @for movie in movies {
                div class="flex items-center gap-4 rounded bg-gray-700/50 p-4" {
                    img class="w-16 h-20 object-cover rounded" src=(thumbnail(movie)) alt=(movie.title());
                    div class="flex-1" {
                        h3 class="text-white font-semibold" { (movie.title()) }
                        p class="text-sm text-gray-400" {
                            (first_part(&movie.fields.genre)) " · " (movie.fields.year) " · " (movie.fields.quality.as_str())
                        }
                        div class="flex gap-2 mt-1" {
                            @if movie.fields.is_featured {
                                span class="rounded bg-yellow-500 px-2 text-xs text-black" { "Featured" }
                            }
                            @if movie.fields.is_trending {
                                span class="rounded bg-orange-500 px-2 text-xs text-white" { "Trending" }
                            }
                        }
                    }
                    (flag_button(&movie.id, "featured", movie.fields.is_featured, "Featured"))
                    (flag_button(&movie.id, "trending", movie.fields.is_trending, "Trending"))
                    a class="rounded border border-blue-500/30 px-3 py-1 text-blue-400" href=(format!("/admin/movies/{}/edit", enc(&movie.id))) { "Edit" }
                    form method="post" action=(format!("/admin/movies/{}/delete", enc(&movie.id))) {
                        button class="rounded border border-red-500/30 px-3 py-1 text-red-400" type="submit" { "Delete" }
                    }
                }
            }
        }
    }
}

fn featured_tab(movies: &[MovieRecord], featured: usize) -> Markup {
    html! {
        section class="rounded-lg bg-gray-800/50 border border-gray-700 p-6 space-y-4" {
            h2 class="text-white text-xl" { "Banner Slider Control (" (featured) "/" (FEATURED_SOFT_LIMIT) ")" }
            p class="text-gray-400" { "Choose which movies appear in the homepage banner." }
            div class="grid md:grid-cols-3 gap-4" {
                @for movie in movies {
                    div class="rounded bg-gray-700/50 p-4 space-y-2" {
                        img class="w-full h-40 object-cover rounded" src=(thumbnail(movie)) alt=(movie.title());
                        h3 class="text-white" { (movie.title()) }
                        @if movie.fields.is_featured {
                            span class="rounded bg-yellow-500 px-2 text-xs text-black" { "Featured" }
                        }
                        (flag_button(&movie.id, "featured", movie.fields.is_featured, if movie.fields.is_featured { "Remove from Banner" } else { "Add to Banner" }))
                    }
                }
            }
        }
    }
}

fn add_tab(draft: Option<&NewMovie>) -> Markup {
    let blank = NewMovie::default();
    html! {
        section class="rounded-lg bg-gray-800/50 border border-gray-700 p-6 space-y-4" {
            h2 class="text-white text-xl" { "Add New Movie" }
            (movie_form("/admin/movies", draft.unwrap_or(&blank), "Add Movie"))
        }
    }
}

fn settings_tab(stats: &CatalogStats) -> Markup {
    html! {
        section class="grid md:grid-cols-2 gap-6" {
            div class="rounded-lg bg-gray-800/50 border border-gray-700 p-6 space-y-4" {
                h2 class="text-white text-xl" { "Admin Settings" }
                form class="space-y-2" method="post" action="/admin/password" {
                    label class="block text-white" for="new-password" { "Change Admin Password" }
                    input class="w-full rounded bg-gray-700 border border-gray-600 px-3 py-2 text-white" type="password" name="password" id="new-password" placeholder="Enter new password";
                    button class="rounded bg-blue-500 px-4 py-2 text-white" type="submit" { "Update Password" }
                }
            }
            div class="rounded-lg bg-gray-800/50 border border-gray-700 p-6 space-y-4" {
                h2 class="text-white text-xl" { "Website Statistics" }
                div class="grid grid-cols-2 gap-4 text-center" {
                    div { div class="text-2xl font-bold text-blue-500" { (stats.total) } div class="text-gray-400" { "Total Movies" } }
                    div { div class="text-2xl font-bold text-yellow-500" { (stats.featured) } div class="text-gray-400" { "Featured Movies" } }
                    div { div class="text-2xl font-bold text-orange-500" { (stats.trending) } div class="text-gray-400" { "Trending Movies" } }
                    div { div class="text-2xl font-bold text-green-500" { (stats.total_views) "K" } div class="text-gray-400" { "Total Views" } }
                }
                div class="flex gap-2" {
                    button class="rounded border border-gray-600 px-3 py-1 text-gray-500" type="button" disabled { "Clear All Featured" }
                    button class="rounded border border-gray-600 px-3 py-1 text-gray-500" type="button" disabled { "Clear All Trending" }
                }
            }
        }
    }
}

pub fn edit_page(movie: &MovieRecord, notice: Option<&Notice>) -> String {
    page(
        "Edit Movie",
        html! {
            div class="min-h-screen bg-gray-900 p-4" {
                div class="max-w-3xl mx-auto rounded-lg bg-gray-800 border border-gray-700 p-6 space-y-4" {
                    h1 class="text-white text-2xl" { "Edit Movie" }
                    (notice_banner(notice))
                    (movie_form(&format!("/admin/movies/{}", enc(&movie.id)), &movie.fields, "Update Movie"))
                    a class="block text-center text-gray-300" href="/admin" { "Cancel" }
                }
            }
        },
    )
}

fn movie_form(action: &str, m: &NewMovie, submit: &str) -> Markup {
    let text_fields: [(&str, &str, &str, &str); 12] = [
        ("title", "Movie Title *", m.title.as_str(), "Enter movie title"),
        ("thumbnail", "Thumbnail URL *", m.thumbnail.as_str(), "https://example.com/image.jpg"),
        ("url", "Download/Watch URL *", m.url.as_str(), "https://example.com/movie"),
        ("trailer", "Trailer URL", m.trailer.as_str(), "https://youtube.com/watch?v=..."),
        ("genre", "Genre", m.genre.as_str(), "Action, Drama"),
        ("year", "Year", m.year.as_str(), "2024"),
        ("rating", "Rating", m.rating.as_str(), "8.5"),
        ("duration", "Duration", m.duration.as_str(), "2h 30m"),
        ("language", "Language", m.language.as_str(), "Hindi"),
        ("size", "File Size", m.size.as_str(), "1.5 GB"),
        ("cast", "Cast", m.cast.as_str(), "Actor 1, Actor 2"),
        ("director", "Director", m.director.as_str(), "Director name"),
    ];

    html! {
        form class="space-y-4" method="post" action=(action) {
            div class="grid md:grid-cols-2 gap-4" {
                @for (name, label, value, placeholder) in text_fields {
                    div {
                        label class="block text-white" for=(name) { (label) }
                        input class="w-full rounded bg-gray-700 border border-gray-600 px-3 py-2 text-white" name=(name) id=(name) value=(value) placeholder=(placeholder);
                    }
                }
                div {
                    label class="block text-white" for="quality" { "Quality" }
                    select class="w-full rounded bg-gray-700 border border-gray-600 px-3 py-2 text-white" name="quality" id="quality" {
                        @for q in Quality::CHOICES.iter() {
                            option value=(q.as_str()) selected[*q == m.quality] { (q.as_str()) }
                        }
                    }
                }
                div {
                    label class="block text-white" for="category" { "Category" }
                    select class="w-full rounded bg-gray-700 border border-gray-600 px-3 py-2 text-white" name="category" id="category" {
                        @for c in Category::CHOICES.iter() {
                            option value=(c.as_str()) selected[*c == m.category] { (c.as_str()) }
                        }
                    }
                }
            }
            div {
                label class="block text-white" for="description" { "Description" }
                textarea class="w-full rounded bg-gray-700 border border-gray-600 px-3 py-2 text-white" name="description" id="description" rows="4" { (m.description) }
            }
            input type="hidden" name="views" value=(m.views);
            div class="flex gap-6" {
                label class="text-white" {
                    input type="checkbox" name="is_featured" checked[m.is_featured];
                    " Featured in Banner"
                }
                label class="text-white" {
                    input type="checkbox" name="is_trending" checked[m.is_trending];
                    " Mark as Trending"
                }
            }
            button class="w-full rounded bg-red-500 py-3 text-white" type="submit" { (submit) }
        }
    }
}

fn flag_button(id: &MovieId, flag: &str, on: bool, label: &str) -> Markup {
    html! {
        form method="post" action=(format!("/admin/movies/{}/{}", enc(id), flag)) {
            button class=(if on { "rounded border border-yellow-500 px-3 py-1 text-yellow-400" } else { "rounded border border-gray-600 px-3 py-1 text-gray-400" }) type="submit" { (label) }
        }
    }
}

fn notice_banner(notice: Option<&Notice>) -> Markup {
    html! {
        @if let Some(notice) = notice {
            div class=(notice_class(notice.kind)) role="status" { (notice.message) }
        }
    }
}

fn notice_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Error => "rounded border border-red-500 bg-red-500/10 px-4 py-2 text-red-400",
        NoticeKind::Success => "rounded border border-green-500 bg-green-500/10 px-4 py-2 text-green-400",
    }
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-900 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="rounded-lg bg-gray-800 p-8" {
                        h1 class="text-2xl font-bold text-white" { "Error" }
                        p class="mt-4 text-gray-300" { (message) }
                        a class="mt-6 inline-block text-red-400" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn thumbnail(movie: &MovieRecord) -> &str {
    if movie.fields.thumbnail.is_empty() { PLACEHOLDER_IMG } else { movie.fields.thumbnail.as_str() }
}

fn enc(id: &MovieId) -> String {
    urlencoding::encode(id.as_str()).into_owned()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
