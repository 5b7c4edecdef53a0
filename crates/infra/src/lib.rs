//! Infrastructure layer: user storage and the accessor handlers go through.

pub mod accessor;
pub mod database;
pub mod store;

pub use accessor::{AccessorError, UserAccessor};
pub use database::Database;
pub use store::{InMemoryUserStore, UserStore};
