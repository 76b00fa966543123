//! Repository implementations over the SQLite pool.

pub mod user;

pub use user::{SqlxUserRepository, UserFilter, UserRepository};
