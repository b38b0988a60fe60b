//! Domain model for the tour-ops show service.
//!
//! This crate is pure: the canonical typed shape of a show record, the
//! untyped-to-typed [`show::Show::normalize`] boundary, the field-patch
//! value type, the list-view status filter, and the contract-extraction
//! candidate mapping. No I/O lives here.

pub mod error;
pub mod extraction;
pub mod filter;
pub mod patch;
pub mod show;
pub mod time;
pub mod types;
