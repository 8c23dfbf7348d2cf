//! Storage is organized through [json_store::JsonStore].
//!  The basic idea is:
//!   - There is one JSON file holding every tracked domain, see [document::Document].
//!   - A command loads the whole document, changes it in memory and writes it back in full.
//!   - A missing or unreadable file is treated as an empty document.

pub mod document;
pub mod json_store;
