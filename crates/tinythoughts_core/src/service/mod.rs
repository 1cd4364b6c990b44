//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into feed and editor level APIs.
//! - Keep UI/FFI layers decoupled from wire and pagination details.

pub mod editor_service;
pub mod feed_service;
