// src/lib.rs

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repositories;
pub mod retrieval;
pub mod utils;

// Re-export the retrieval entry points for convenience
pub use retrieval::{get_best_submission, get_last_submission, get_submission};
