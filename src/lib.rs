//! Bastion API Library
//!
//! This library resolves the listing criteria (paging, sorting and
//! filtering) of collection endpoints from raw query parameters, and ships
//! the axum middleware, extractor and error responder that expose it.

pub mod api;
pub mod config;
pub mod domain;
