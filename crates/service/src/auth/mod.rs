//! Auth module: JWT issue/verify and login/logout workflows.
//!
//! Access tokens are JWTs carrying the pet id; refresh tokens are opaque and
//! cached server-side under `RT:{login_id}`.

pub mod domain;
pub mod errors;
pub mod service;
pub mod token;

pub use service::AuthService;
pub use token::TokenProvider;
