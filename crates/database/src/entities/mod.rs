//! Domain entities persisted by the database layer

pub mod user;

pub use user::{NewUser, User, UserChanges};
