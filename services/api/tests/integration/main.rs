mod course_test;
mod enrollment_test;
mod helpers;
mod professor_test;
mod review_test;
mod seed_test;
mod user_test;
