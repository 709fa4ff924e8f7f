use serde::Deserialize;

use crate::models::MovieRecord;

pub const GENRE_CHOICES: [&str; 8] =
    ["all", "action", "drama", "comedy", "thriller", "horror", "romance", "sci-fi"];
pub const QUALITY_CHOICES: [&str; 5] = ["all", "HD", "4K UHD", "CAM", "HDRip"];

/// A single-valued filter dimension. `"all"` turns it off.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Facet {
    #[default]
    All,
    Only(String),
}

impl Facet {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some("all") => Facet::All,
            Some(value) => Facet::Only(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Facet::All => "all",
            Facet::Only(value) => value,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterCriteria {
    pub query: String,
    pub genre: Facet,
    pub quality: Facet,
}

/// Query string of the public page.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub q: Option<String>,
    pub genre: Option<String>,
    pub quality: Option<String>,
}

impl From<FilterParams> for FilterCriteria {
    fn from(params: FilterParams) -> Self {
        Self {
            query: params.q.unwrap_or_default(),
            genre: Facet::parse(params.genre.as_deref()),
            quality: Facet::parse(params.quality.as_deref()),
        }
    }
}

impl FilterCriteria {
    pub fn matches(&self, movie: &MovieRecord) -> bool {
        let fields = &movie.fields;
        let query = self.query.to_lowercase();
        let genre = fields.genre.to_lowercase();

        let text_hit = fields.title.to_lowercase().contains(&query)
            || genre.contains(&query)
            || fields.cast.to_lowercase().contains(&query);
        if !text_hit {
            return false;
        }

        if let Facet::Only(wanted) = &self.genre {
            if !genre.contains(&wanted.to_lowercase()) {
                return false;
            }
        }

        match &self.quality {
            Facet::All => true,
            Facet::Only(wanted) => fields.quality.as_str() == wanted,
        }
    }
}

/// Matching records in cache order. An empty result is a normal outcome.
pub fn filter_movies<'a>(movies: &'a [MovieRecord], criteria: &FilterCriteria) -> Vec<&'a MovieRecord> {
    movies.iter().filter(|m| criteria.matches(m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MovieId, NewMovie, Quality};

    fn movie(id: &str, title: &str, genre: &str, cast: &str, quality: Quality) -> MovieRecord {
        MovieRecord {
            id: MovieId::new(id),
            fields: NewMovie {
                title: title.to_string(),
                genre: genre.to_string(),
                cast: cast.to_string(),
                quality,
                ..NewMovie::default()
            },
        }
    }

    fn catalog() -> Vec<MovieRecord> {
        vec![
            movie("1", "Jawan", "Action, Thriller", "Shah Rukh Khan, Nayanthara", Quality::Hd),
            movie("2", "Stree 2", "Horror, Comedy", "Rajkummar Rao", Quality::HdRip),
            movie("3", "Kalki 2898 AD", "Sci-Fi", "Prabhas, Deepika", Quality::Uhd4k),
            movie("4", "Dunki", "Drama", "", Quality::Cam),
        ]
    }

    fn ids(movies: &[&MovieRecord]) -> Vec<String> {
        movies.iter().map(|m| m.id.to_string()).collect()
    }

    fn query(q: &str) -> FilterCriteria {
        FilterCriteria { query: q.to_string(), ..FilterCriteria::default() }
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let movies = catalog();
        assert_eq!(ids(&filter_movies(&movies, &query(""))), ["1", "2", "3", "4"]);
    }

    #[test]
    fn query_hits_title_genre_or_cast() {
        let movies = catalog();
        assert_eq!(ids(&filter_movies(&movies, &query("JAWAN"))), ["1"]);
        assert_eq!(ids(&filter_movies(&movies, &query("comedy"))), ["2"]);
        assert_eq!(ids(&filter_movies(&movies, &query("prabhas"))), ["3"]);
        assert!(filter_movies(&movies, &query("nothing like this")).is_empty());
    }

    #[test]
    fn subset_matches_manual_scan() {
        let movies = catalog();
        for q in ["a", "ra", "sh", "2", "x"] {
            let expected: Vec<String> = movies
                .iter()
                .filter(|m| {
                    [&m.fields.title, &m.fields.genre, &m.fields.cast]
                        .iter()
                        .any(|f| f.to_lowercase().contains(q))
                })
                .map(|m| m.id.to_string())
                .collect();
            assert_eq!(ids(&filter_movies(&movies, &query(q))), expected, "query {q:?}");
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let movies = catalog();
        let criteria = FilterCriteria {
            query: "a".to_string(),
            genre: Facet::Only("action".to_string()),
            quality: Facet::All,
        };
        let once: Vec<MovieRecord> =
            filter_movies(&movies, &criteria).into_iter().cloned().collect();
        let twice: Vec<MovieRecord> =
            filter_movies(&once, &criteria).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn genre_facet_is_case_insensitive_substring() {
        let movies = catalog();
        let criteria =
            FilterCriteria { genre: Facet::Only("sci-fi".to_string()), ..FilterCriteria::default() };
        assert_eq!(ids(&filter_movies(&movies, &criteria)), ["3"]);
    }

    #[test]
    fn quality_facet_is_exact() {
        let movies = catalog();
        let exact =
            FilterCriteria { quality: Facet::Only("HD".to_string()), ..FilterCriteria::default() };
        assert_eq!(ids(&filter_movies(&movies, &exact)), ["1"]);

        let lower =
            FilterCriteria { quality: Facet::Only("hd".to_string()), ..FilterCriteria::default() };
        assert!(filter_movies(&movies, &lower).is_empty());
    }

    #[test]
    fn single_record_scenario() {
        let movies = vec![movie("1", "Test", "Action", "", Quality::Hd)];
        let mut criteria = query("test");
        assert_eq!(ids(&filter_movies(&movies, &criteria)), ["1"]);

        criteria.quality = Facet::Only("4K UHD".to_string());
        assert!(filter_movies(&movies, &criteria).is_empty());
    }

    #[test]
    fn facet_parsing() {
        assert_eq!(Facet::parse(None), Facet::All);
        assert_eq!(Facet::parse(Some("all")), Facet::All);
        assert_eq!(Facet::parse(Some("")), Facet::All);
        assert_eq!(Facet::parse(Some("drama")), Facet::Only("drama".to_string()));
    }
}
