//! Integration test crate for the hunt workspace.
//!
//! This crate has no library code — it only contains integration tests
//! that exercise end-to-end event flows across multiple workspace crates.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p hunt-integration-tests
//! ```
