//! # learnpath_core
//!
//! Core domain logic for Learnpath.

pub mod auth;
pub mod db;
pub mod migrate;
pub mod models;
pub mod roadmap;
pub mod video;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
