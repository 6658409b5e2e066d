pub mod auth;
pub mod course;
pub mod enrollment;
pub mod professor;
pub mod review;
pub mod user;

#[cfg(test)]
pub(crate) mod mock;
