//! Award certificate generation service.
//!
//! A small axum service around one real component: the rendering engine in
//! [`engine`], which composes a verified student's certificate PDF from a
//! background template and an embedded typeface. The [`roster`] supplies
//! verified records; [`routes`] translates engine errors into HTTP.

pub mod config;
pub mod engine;
pub mod roster;
pub mod routes;
pub mod state;
pub mod templates;
