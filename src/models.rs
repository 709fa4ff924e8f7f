use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Banner slots shown in the admin panel; informational only.
pub const FEATURED_SOFT_LIMIT: usize = 5;

/// Store-assigned identifier. The hosted table may hand back text or an integer.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => MovieId(s),
            Raw::Int(n) => MovieId(n.to_string()),
        })
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Quality {
    Uhd4k,
    #[default]
    Hd,
    HdRip,
    Cam,
    Other(String),
}

impl Quality {
    pub const CHOICES: [Quality; 4] = [Quality::Uhd4k, Quality::Hd, Quality::HdRip, Quality::Cam];

    pub fn as_str(&self) -> &str {
        match self {
            Quality::Uhd4k => "4K UHD",
            Quality::Hd => "HD",
            Quality::HdRip => "HDRip",
            Quality::Cam => "CAM",
            Quality::Other(label) => label,
        }
    }
}

impl From<String> for Quality {
    fn from(label: String) -> Self {
        match label.as_str() {
            "4K UHD" => Quality::Uhd4k,
            "HD" => Quality::Hd,
            "HDRip" => Quality::HdRip,
            "CAM" => Quality::Cam,
            _ => Quality::Other(label),
        }
    }
}

impl From<Quality> for String {
    fn from(q: Quality) -> Self {
        match q {
            Quality::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Bollywood,
    Hollywood,
    SouthIndian,
    WebSeries,
    Other(String),
}

impl Category {
    pub const CHOICES: [Category; 4] =
        [Category::Bollywood, Category::Hollywood, Category::SouthIndian, Category::WebSeries];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Bollywood => "Bollywood",
            Category::Hollywood => "Hollywood",
            Category::SouthIndian => "South Indian",
            Category::WebSeries => "Web Series",
            Category::Other(label) => label,
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Bollywood" => Category::Bollywood,
            "Hollywood" => Category::Hollywood,
            "South Indian" => Category::SouthIndian,
            "Web Series" => Category::WebSeries,
            _ => Category::Other(label),
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        match c {
            Category::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// A row of the hosted `movies` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    #[serde(flatten)]
    pub fields: NewMovie,
}

impl MovieRecord {
    pub fn title(&self) -> &str {
        &self.fields.title
    }
}

/// Everything about a movie except its identifier: the insert and full-update payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewMovie {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub genre: String,
    #[serde(deserialize_with = "null_as_default")]
    pub year: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rating: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quality: Quality,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub views: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cast: String,
    #[serde(deserialize_with = "null_as_default")]
    pub director: String,
    #[serde(deserialize_with = "null_as_default")]
    pub trailer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_featured: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_trending: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub category: Category,
}

impl Default for NewMovie {
    fn default() -> Self {
        Self {
            title: String::new(),
            thumbnail: String::new(),
            url: String::new(),
            genre: String::new(),
            year: String::new(),
            rating: String::new(),
            duration: String::new(),
            quality: Quality::Hd,
            description: String::new(),
            views: "0".to_string(),
            cast: String::new(),
            director: String::new(),
            trailer: String::new(),
            language: "Hindi".to_string(),
            size: String::new(),
            is_featured: false,
            is_trending: false,
            category: Category::Bollywood,
        }
    }
}

impl NewMovie {
    pub fn has_required_fields(&self) -> bool {
        !self.title.is_empty() && !self.thumbnail.is_empty() && !self.url.is_empty()
    }
}

/// Partial update touching only the banner/rail flags.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_trending: Option<bool>,
}

impl MoviePatch {
    pub fn featured(value: bool) -> Self {
        Self { is_featured: Some(value), ..Self::default() }
    }

    pub fn trending(value: bool) -> Self {
        Self { is_trending: Some(value), ..Self::default() }
    }

    pub fn apply(&self, movie: &mut NewMovie) {
        if let Some(v) = self.is_featured {
            movie.is_featured = v;
        }
        if let Some(v) = self.is_trending {
            movie.is_trending = v;
        }
    }
}

/// Nullable columns read as the field's default: empty text, `false`, or the first choice.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// First comma-separated segment, or `N/A` when there is nothing to show.
pub fn first_part(value: &str) -> &str {
    match value.split(',').next() {
        Some(s) if !s.is_empty() => s,
        _ => "N/A",
    }
}

/// View counts are free text ("12.5K", "1,200"); only the digits count.
pub fn parse_views(views: &str) -> u64 {
    let digits: String = views.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CatalogStats {
    pub total: usize,
    pub featured: usize,
    pub trending: usize,
    pub total_views: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_numeric_ids_and_null_fields() {
        let raw = r#"{
            "id": 42,
            "title": "Pathaan",
            "genre": null,
            "quality": "4K UHD",
            "isFeatured": true,
            "category": "South Indian"
        }"#;
        let movie: MovieRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(movie.id.as_str(), "42");
        assert_eq!(movie.fields.genre, "");
        assert_eq!(movie.fields.cast, "");
        assert_eq!(movie.fields.quality, Quality::Uhd4k);
        assert_eq!(movie.fields.category, Category::SouthIndian);
        assert!(movie.fields.is_featured);
        assert!(!movie.fields.is_trending);
    }

    #[test]
    fn null_columns_do_not_sink_the_listing() {
        let raw = r#"[
            {"id": 1, "title": "A", "quality": "HD"},
            {"id": 2, "title": "B", "quality": null, "category": null, "isFeatured": null, "isTrending": null}
        ]"#;
        let movies: Vec<MovieRecord> = serde_json::from_str(raw).unwrap();
        assert_eq!(movies.len(), 2);

        let b = &movies[1].fields;
        assert_eq!(b.title, "B");
        assert_eq!(b.quality, Quality::Hd);
        assert_eq!(b.category, Category::Bollywood);
        assert!(!b.is_featured);
        assert!(!b.is_trending);
    }

    #[test]
    fn unknown_labels_survive() {
        let movie: MovieRecord =
            serde_json::from_str(r#"{"id":"a","title":"x","quality":"720p"}"#).unwrap();
        assert_eq!(movie.fields.quality.as_str(), "720p");

        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["quality"], "720p");
        assert_eq!(json["isTrending"], false);
    }

    #[test]
    fn patch_only_carries_the_flag() {
        let json = serde_json::to_value(MoviePatch::featured(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "isFeatured": true }));
    }

    #[test]
    fn views_strip_non_digits() {
        assert_eq!(parse_views("12.5K"), 125);
        assert_eq!(parse_views("1,200"), 1200);
        assert_eq!(parse_views(""), 0);
        assert_eq!(parse_views("n/a"), 0);
    }

    #[test]
    fn first_part_falls_back() {
        assert_eq!(first_part("Action, Drama"), "Action");
        assert_eq!(first_part(""), "N/A");
        assert_eq!(first_part(",Drama"), "N/A");
    }
}
