//! Engagement listing and scheduling toolkit
//!
//! Building blocks for a public-consultation platform's staff tools: a
//! generic sortable, filterable, paginated [`table`], the legal
//! [`interval`] day calculator, and the [`session`] that carries an
//! engagement form across editor tabs.

pub mod error;
pub mod interval;
pub mod model;
pub mod session;
pub mod table;

pub use error::Error;
