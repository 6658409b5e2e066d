pub mod alumni;
pub mod auth;
pub mod course;
pub mod enrollment;
pub mod health;
pub mod professor;
pub mod review;
pub mod user;
