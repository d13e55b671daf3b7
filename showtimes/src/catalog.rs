//! Movie and room display data.
//!
//! The catalog is only consulted to annotate showtimes with names and running
//! time after a fetch. Filtering never asks it anything; search reads the
//! annotations it leaves behind.

use crate::types::{MovieRef, RoomRef, Showtime};
use std::collections::HashMap;
use std::sync::Arc;

/// Display data for a movie
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovieSummary {
    /// Title
    pub name: String,
    /// Running time in minutes
    pub duration_minutes: u32,
}

/// Display data for a room
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomSummary {
    /// Room name
    pub name: String,
}

/// Movie/room lookup
pub trait CatalogDirectory: Send + Sync {
    /// Resolves a movie reference
    fn movie(&self, movie: MovieRef) -> Option<MovieSummary>;

    /// Resolves a room reference
    fn room(&self, room: RoomRef) -> Option<RoomSummary>;
}

/// Fills the display fields of every showtime
///
/// References the catalog cannot resolve leave the field empty. Returns how
/// many showtimes had at least one unresolved reference.
pub fn enrich(showtimes: &mut [Showtime], catalog: &dyn CatalogDirectory) -> usize {
    let mut unresolved = 0;
    for showtime in showtimes.iter_mut() {
        let movie = catalog.movie(showtime.movie);
        let room = catalog.room(showtime.room);
        if movie.is_none() || room.is_none() {
            unresolved += 1;
        }
        showtime.movie_name = movie.as_ref().map(|m| m.name.clone());
        showtime.movie_duration = movie.map(|m| m.duration_minutes);
        showtime.room_name = room.map(|r| r.name);
    }
    if unresolved > 0 {
        tracing::debug!(unresolved, "Catalog could not resolve some showtime references");
    }
    unresolved
}

/// Catalog backed by in-memory maps
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    movies: HashMap<MovieRef, MovieSummary>,
    rooms: HashMap<RoomRef, RoomSummary>,
}

impl InMemoryCatalog {
    /// Empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a movie
    #[must_use]
    pub fn with_movie(
        mut self,
        movie: MovieRef,
        name: impl Into<String>,
        duration_minutes: u32,
    ) -> Self {
        self.movies.insert(
            movie,
            MovieSummary {
                name: name.into(),
                duration_minutes,
            },
        );
        self
    }

    /// Adds a room
    #[must_use]
    pub fn with_room(mut self, room: RoomRef, name: impl Into<String>) -> Self {
        self.rooms.insert(room, RoomSummary { name: name.into() });
        self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(self) -> Arc<dyn CatalogDirectory> {
        Arc::new(self)
    }
}

impl CatalogDirectory for InMemoryCatalog {
    fn movie(&self, movie: MovieRef) -> Option<MovieSummary> {
        self.movies.get(&movie).cloned()
    }

    fn room(&self, room: RoomRef) -> Option<RoomSummary> {
        self.rooms.get(&room).cloned()
    }
}
