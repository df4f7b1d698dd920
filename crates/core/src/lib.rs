//! MyMovieList Core - Shared domain types.
//!
//! This crate provides the types shared by every MyMovieList component:
//! - `client` - Request client, session model and page view-models
//! - `cli` - Terminal front end (`mml`)
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O and no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, identities, movie records, comments and ratings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
