pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod observability;
pub mod registry;
