//! Movie resource module
//!
//! Record types, the shared in-memory store and id generation.

mod error;
mod id;
mod store;
mod types;

pub use error::StoreError;
pub use id::{IdGenerator, IdStrategy};
pub use store::MovieStore;
pub use types::{seed_movies, Director, Movie};
