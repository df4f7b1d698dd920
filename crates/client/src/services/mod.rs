//! Business services built on the request client.

pub mod auth;
