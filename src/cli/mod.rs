//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `migrate` - Database migrations
//! - `movies` - Movie lookups, listings and edits
//! - `actors` - Actor lookups and renames
//! - `stats` - Catalog statistics

pub mod args;

pub use args::{Cli, Commands};
