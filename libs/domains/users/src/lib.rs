//! Users Domain
//!
//! Account storage and credential verification for the catalog API.
//! Users exist so that API tokens can be minted; request authorization
//! itself is out of scope here.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, AuthState};
pub use models::{CreateUser, TokenRequest, TokenResponse, User, UserResponse};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
