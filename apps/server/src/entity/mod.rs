//! SeaORM entity definitions.

pub mod project;
pub mod report_file;
pub mod review;
pub mod test_result;
pub mod user;
