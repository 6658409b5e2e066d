//! sea-orm entities for the DegreeDash store.
//!
//! Tables are owned by `degreedash-api-migration`. The `course_details`,
//! `user_enrollments` and `alumni_directory` entities map read-only views.

pub mod alumni_directory;
pub mod alumni_profiles;
pub mod course_details;
pub mod course_professors;
pub mod courses;
pub mod enrollments;
pub mod professors;
pub mod reviews;
pub mod user_enrollments;
pub mod users;
