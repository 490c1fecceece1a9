//! API end-to-end test suite.
//!
//! Drives the full Actix app against a fresh in-memory SQLite database per
//! test, migrated with the production migrator.
//!
//! Run with: cargo test --test api_e2e


mod test_auth;
mod test_projects;
mod test_reviews;
mod test_uploads;
