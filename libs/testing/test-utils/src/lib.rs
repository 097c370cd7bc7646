//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure:
//! - `TestDatabase`: PostgreSQL container with the workspace migrations
//!   applied and automatic cleanup
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::TestDatabase;
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! // Use db.connection() to create your repository
//! # }
//! ```

mod postgres;

pub use postgres::TestDatabase;
