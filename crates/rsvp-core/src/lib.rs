//! Core types and the admin view state machine for RSVP submissions.
//!
//! This crate has no HTTP or terminal dependencies. Storage backends implement
//! [`store::SubmissionStore`]; front-ends drive an [`admin::AdminView`] and
//! render whatever [`admin::AdminView::view`] reports.

pub mod admin;
pub mod error;
pub mod in_flight;
pub mod memory;
pub mod store;
pub mod submission;
pub mod tally;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
