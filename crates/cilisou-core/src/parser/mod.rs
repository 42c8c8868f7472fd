//! HTML parsers for the magnet index
//!
//! Contains the listing-page parser; field-level failures degrade to
//! the "unknown" sentinel instead of erroring.

pub mod listing;

pub use listing::parse_listing;
