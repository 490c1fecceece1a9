//! Test Review Hub library.
//!
//! Report ingestion and normalization, report-file versioning, and the
//! review/aggregation subsystem, exposed over an Actix-web API.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
