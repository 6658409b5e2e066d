use sea_orm::DatabaseConnection;

use degreedash_api::config::ApiConfig;
use degreedash_api::domain::repository::{CourseRepository, ProfessorRepository, UserRepository};
use degreedash_api::domain::types::{
    Course, CourseInput, ExternalProfile, Professor, ProfessorInput, User,
};
use degreedash_api::infra::db::{
    DbCourseRepository, DbEnrollmentRepository, DbProfessorRepository, DbReviewRepository,
    DbUserRepository,
};
use degreedash_api::state::AppState;
use degreedash_testing::auth::TEST_SESSION_SECRET;

pub const ADMIN_EMAIL: &str = "admin@umanitoba.ca";

pub struct Repos {
    pub courses: DbCourseRepository,
    pub professors: DbProfessorRepository,
    pub users: DbUserRepository,
    pub enrollments: DbEnrollmentRepository,
    pub reviews: DbReviewRepository,
}

pub fn repos(db: &DatabaseConnection) -> Repos {
    Repos {
        courses: DbCourseRepository { db: db.clone() },
        professors: DbProfessorRepository { db: db.clone() },
        users: DbUserRepository { db: db.clone() },
        enrollments: DbEnrollmentRepository { db: db.clone() },
        reviews: DbReviewRepository { db: db.clone() },
    }
}

pub fn course_input(code: &str, capacity: i32) -> CourseInput {
    CourseInput {
        course_code: code.to_owned(),
        course_name: format!("{code} lecture"),
        department: "Computer Science".to_owned(),
        credits: Some(3),
        semester: Some("Fall".to_owned()),
        year: Some(2024),
        capacity: Some(capacity),
        ..Default::default()
    }
}

pub async fn create_course(db: &DatabaseConnection, code: &str, capacity: i32) -> Course {
    repos(db)
        .courses
        .create(&course_input(code, capacity), &[])
        .await
        .unwrap()
}

pub async fn create_professor(db: &DatabaseConnection, name: &str) -> Professor {
    repos(db)
        .professors
        .create(&ProfessorInput {
            name: name.to_owned(),
            department: Some("Computer Science".to_owned()),
            ..Default::default()
        })
        .await
        .unwrap()
}

pub async fn create_user(db: &DatabaseConnection, n: i32) -> User {
    repos(db)
        .users
        .create(&ExternalProfile {
            id: format!("ms-{n}"),
            email: format!("student{n}@myumanitoba.ca"),
            display_name: format!("Student {n}"),
            avatar_url: None,
        })
        .await
        .unwrap()
}

pub async fn enrolled_count(db: &DatabaseConnection, course_id: i32) -> i32 {
    repos(db)
        .courses
        .find_by_id(course_id)
        .await
        .unwrap()
        .unwrap()
        .course
        .enrolled
}

pub fn test_state(db: DatabaseConnection) -> AppState {
    let config = ApiConfig {
        database_url: "sqlite::memory:".to_owned(),
        port: 0,
        frontend_url: "http://localhost:3000".to_owned(),
        session_secret: TEST_SESSION_SECRET.to_owned(),
        cookie_secure: false,
        admin_emails: vec![ADMIN_EMAIL.to_owned()],
        microsoft_client_id: "test-client".to_owned(),
        microsoft_client_secret: "test-secret".to_owned(),
        microsoft_callback_url: "http://localhost:5050/auth/microsoft/callback".to_owned(),
        microsoft_tenant: "common".to_owned(),
    };
    AppState::new(db, &config)
}
