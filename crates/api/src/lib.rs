//! HTTP API for the tour-ops show service.
//!
//! Exposes the list/filter and detail/edit contract over axum: show CRUD
//! with field-level patches, attachment upload, contract extraction, and
//! demo seeding. All store access goes through the gateways injected via
//! [`state::AppState`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;
