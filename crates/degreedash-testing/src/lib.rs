//! Test helpers shared by DegreeDash crates.

pub mod auth;
pub mod db;
