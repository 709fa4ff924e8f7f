use crate::models::{CatalogStats, MovieId, MovieRecord, parse_views};

/// Movies shown in the public trending rail.
pub const TRENDING_RAIL_LEN: usize = 6;

/// In-memory mirror of the hosted table, in store order.
#[derive(Clone, Debug, Default)]
pub struct CatalogCache {
    movies: Vec<MovieRecord>,
}

impl CatalogCache {
    #[cfg(test)]
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        Self { movies }
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn get(&self, id: &MovieId) -> Option<&MovieRecord> {
        self.movies.iter().find(|m| &m.id == id)
    }

    pub fn reload(&mut self, movies: Vec<MovieRecord>) {
        self.movies = movies;
    }

    pub fn append(&mut self, movie: MovieRecord) {
        self.movies.push(movie);
    }

    /// Swaps in the store's version of a record. Returns whether it was present.
    pub fn replace(&mut self, movie: MovieRecord) -> bool {
        match self.movies.iter_mut().find(|m| m.id == movie.id) {
            Some(slot) => {
                *slot = movie;
                true
            },
            None => false,
        }
    }

    pub fn remove(&mut self, id: &MovieId) -> Option<MovieRecord> {
        let pos = self.movies.iter().position(|m| &m.id == id)?;
        Some(self.movies.remove(pos))
    }

    pub fn featured(&self) -> Vec<&MovieRecord> {
        self.movies.iter().filter(|m| m.fields.is_featured).collect()
    }

    pub fn trending(&self, limit: usize) -> Vec<&MovieRecord> {
        self.movies.iter().filter(|m| m.fields.is_trending).take(limit).collect()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total: self.movies.len(),
            featured: self.movies.iter().filter(|m| m.fields.is_featured).count(),
            trending: self.movies.iter().filter(|m| m.fields.is_trending).count(),
            total_views: self
                .movies
                .iter()
                .map(|m| parse_views(&m.fields.views))
                .fold(0u64, u64::saturating_add),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewMovie;

    fn record(id: &str, featured: bool, trending: bool, views: &str) -> MovieRecord {
        MovieRecord {
            id: MovieId::new(id),
            fields: NewMovie {
                title: format!("Movie {id}"),
                is_featured: featured,
                is_trending: trending,
                views: views.to_string(),
                ..NewMovie::default()
            },
        }
    }

    #[test]
    fn replace_and_remove_by_id() {
        let mut cache = CatalogCache::new(vec![record("1", false, false, "0"), record("2", false, false, "0")]);

        let mut changed = record("2", true, false, "0");
        changed.fields.title = "Renamed".to_string();
        assert!(cache.replace(changed));
        assert_eq!(cache.get(&MovieId::new("2")).unwrap().title(), "Renamed");
        assert!(!cache.replace(record("3", false, false, "0")));

        assert!(cache.remove(&MovieId::new("1")).is_some());
        assert!(cache.remove(&MovieId::new("1")).is_none());
        assert_eq!(cache.movies().len(), 1);
    }

    #[test]
    fn derived_views() {
        let mut movies: Vec<MovieRecord> =
            (1..=8).map(|i| record(&i.to_string(), i % 2 == 0, true, "1.5K")).collect();
        movies.push(record("9", false, false, "abc"));
        let cache = CatalogCache::new(movies);

        assert_eq!(cache.featured().len(), 4);
        assert_eq!(cache.trending(TRENDING_RAIL_LEN).len(), 6);
        assert_eq!(cache.trending(TRENDING_RAIL_LEN)[0].id.as_str(), "1");

        let stats = cache.stats();
        assert_eq!(stats.total, 9);
        assert_eq!(stats.featured, 4);
        assert_eq!(stats.trending, 8);
        assert_eq!(stats.total_views, 8 * 15);
    }
}
