//! Session auth shared by DegreeDash binaries.
//!
//! Provides session-token issue/validation, cookie builders, and the
//! `SessionUser` extractor.

pub mod cookie;
pub mod session;
pub mod token;
