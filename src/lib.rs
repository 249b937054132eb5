//! # Matchbook
//!
//! A personal match tracker for a collectible card game.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (matches, archetypes, classes)
//! - **stats**: Pure statistics engine (win rates, matchup matrix, rankings)
//! - **storage**: Local JSONL collections, namespaced per user
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod models;
pub mod stats;
pub mod storage;

pub use models::*;
