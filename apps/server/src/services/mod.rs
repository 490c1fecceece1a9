//! Business logic services.

pub mod accounts;
pub mod aggregation;
pub mod normalizer;
pub mod projects;
pub mod report_files;
pub mod review_ledger;
