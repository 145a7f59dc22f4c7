//! Post module: creation of posts with image attachments.
//!
//! Ownership is checked against the token-derived caller id before any
//! database or storage work happens.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::PostService;
