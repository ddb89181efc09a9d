//! # Jackfruit Users Crate
//!
//! Registration and self-service profile management on top of the
//! [`UserStore`](jackfruit_database::UserStore) seam.
//!
//! ## Architecture
//!
//! - **Validation**: field rules and the [`Validate`] trait
//! - **Types**: request payloads and the public [`UserRepresentation`]
//! - **Service**: [`UserService`], the business logic used by HTTP and CLI

mod error;
mod service;

pub mod types;
pub mod validation;

pub use error::{UserError, UserResult};
pub use service::UserService;
pub use types::{ProfileUpdateRequest, RegisterRequest, UserRepresentation, ValidRegistration};
pub use validation::{FieldErrors, Validate};
