//! Core library: settings, presentation-file scanning, listing and filtering.

pub mod config;
pub mod models;
pub mod scanner;
pub mod search;
