//! In-memory movie store
//!
//! An ordered sequence of movies behind a single `RwLock`. Every mutation,
//! including the list snapshot returned after it, happens under one write
//! lock so concurrent requests never observe a half-applied change.

use tokio::sync::RwLock;

use super::error::StoreError;
use super::id::IdGenerator;
use super::types::{seed_movies, Movie};
use crate::config::StoreConfig;
use crate::logger;

#[derive(Debug)]
pub struct MovieStore {
    movies: RwLock<Vec<Movie>>,
    ids: IdGenerator,
    update_moves_to_end: bool,
}

impl MovieStore {
    pub fn new(ids: IdGenerator, update_moves_to_end: bool) -> Self {
        Self {
            movies: RwLock::new(Vec::new()),
            ids,
            update_moves_to_end,
        }
    }

    /// Build the store described by configuration, seeding it if enabled
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let ids = IdGenerator::new(config.id_strategy, config.random_id_bound);
        let initial = if config.seed { seed_movies() } else { Vec::new() };
        Self::with_movies(initial, ids, config.update_moves_to_end)
    }

    /// Build a store holding `movies` in order
    pub fn with_movies(
        movies: Vec<Movie>,
        ids: IdGenerator,
        update_moves_to_end: bool,
    ) -> Result<Self, StoreError> {
        let mut stored: Vec<Movie> = Vec::with_capacity(movies.len());
        for movie in movies {
            push_checked(&mut stored, &ids, movie)?;
        }
        Ok(Self {
            movies: RwLock::new(stored),
            ids,
            update_moves_to_end,
        })
    }

    /// All records in current order
    pub async fn list(&self) -> Vec<Movie> {
        self.movies.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.movies.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.movies.read().await.is_empty()
    }

    /// First record whose id equals `id`
    pub async fn find_by_id(&self, id: &str) -> Option<Movie> {
        self.movies.read().await.iter().find(|m| m.id == id).cloned()
    }

    /// Append a record whose id is already assigned
    pub async fn insert(&self, movie: Movie) -> Result<(), StoreError> {
        let mut movies = self.movies.write().await;
        push_checked(&mut movies, &self.ids, movie)
    }

    /// Assign a fresh id to `movie` and append it
    ///
    /// Any id on the incoming record is discarded; the generated id differs
    /// from it and from every stored id.
    pub async fn create(&self, movie: Movie) -> Result<Movie, StoreError> {
        let mut movies = self.movies.write().await;
        let id = self
            .ids
            .generate(|candidate| candidate == movie.id || contains_id(&movies, candidate))?;
        let movie = movie.with_id(&id);
        push_checked(&mut movies, &self.ids, movie.clone())?;
        drop(movies);
        logger::log_debug(&format!("[Store] Created movie {id}"));
        Ok(movie)
    }

    /// Replace the record with `id` by `movie`, keeping `id`
    ///
    /// Returns whether a record was replaced, and the full list afterwards.
    /// Unknown ids leave the store untouched.
    pub async fn replace_by_id(&self, id: &str, movie: Movie) -> (bool, Vec<Movie>) {
        let mut movies = self.movies.write().await;
        let replaced = match movies.iter().position(|m| m.id == id) {
            Some(index) => {
                let movie = movie.with_id(id);
                if self.update_moves_to_end {
                    movies.remove(index);
                    movies.push(movie);
                } else {
                    movies[index] = movie;
                }
                true
            }
            None => false,
        };
        let snapshot = movies.clone();
        drop(movies);
        if replaced {
            logger::log_debug(&format!("[Store] Replaced movie {id}"));
        }
        (replaced, snapshot)
    }

    /// Remove the record with `id`
    ///
    /// Returns whether a record was removed, and the full list afterwards.
    pub async fn delete_by_id(&self, id: &str) -> (bool, Vec<Movie>) {
        let mut movies = self.movies.write().await;
        let removed = match movies.iter().position(|m| m.id == id) {
            Some(index) => {
                movies.remove(index);
                true
            }
            None => false,
        };
        let snapshot = movies.clone();
        drop(movies);
        if removed {
            logger::log_debug(&format!("[Store] Deleted movie {id}"));
        }
        (removed, snapshot)
    }
}

fn contains_id(movies: &[Movie], id: &str) -> bool {
    movies.iter().any(|m| m.id == id)
}

/// Append `movie` if its id is set and unused; every insert path goes here
fn push_checked(
    movies: &mut Vec<Movie>,
    ids: &IdGenerator,
    movie: Movie,
) -> Result<(), StoreError> {
    if movie.id.is_empty() {
        return Err(StoreError::EmptyId);
    }
    if contains_id(movies, &movie.id) {
        return Err(StoreError::DuplicateId { id: movie.id });
    }
    ids.observe(&movie.id);
    movies.push(movie);
    Ok(())
}
