//! Small self-care tracker for the terminal. Focus sessions, moods, water, a medication pill
//! counter and a substance journal all live in one JSON file that every command reads, changes
//! and writes back.
//!

pub mod cli;
pub mod error;
pub mod store;
pub mod timer;
pub mod tracker;
pub mod utils;
