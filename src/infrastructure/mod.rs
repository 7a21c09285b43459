//! Infrastructure layer for filesystem and environment interactions.
//!
//! Inside the Zellij sandbox the host filesystem is mounted under `/host`;
//! everything here deals with mapping user-facing paths onto that mount.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
