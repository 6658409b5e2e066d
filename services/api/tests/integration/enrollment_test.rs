use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use degreedash_api::domain::repository::EnrollmentRepository;
use degreedash_api::domain::types::{DropOutcome, EnrollOutcome};
use degreedash_api::error::ApiError;
use degreedash_testing::db::{file_db, test_db};

use crate::helpers::{create_course, create_user, enrolled_count, repos};

async fn enrollment_rows(db: &DatabaseConnection, course_id: i32) -> i64 {
    let row = db
        .query_one(Statement::from_sql_and_values(
            db.get_database_backend(),
            "SELECT COUNT(*) AS n FROM enrollments WHERE course_id = ?",
            [course_id.into()],
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}

#[tokio::test]
async fn should_fill_course_then_reject_then_reopen_after_drop() {
    let db = test_db().await;
    let repo = repos(&db).enrollments;
    let course = create_course(&db, "COMP 1010", 2).await;
    let a = create_user(&db, 1).await;
    let b = create_user(&db, 2).await;
    let c = create_user(&db, 3).await;

    assert_eq!(repo.enroll(a.id, course.id).await.unwrap(), EnrollOutcome::Enrolled);
    assert_eq!(repo.enroll(b.id, course.id).await.unwrap(), EnrollOutcome::Enrolled);
    assert_eq!(enrolled_count(&db, course.id).await, 2);

    assert_eq!(repo.enroll(c.id, course.id).await.unwrap(), EnrollOutcome::CourseFull);
    assert!(!repo.is_enrolled(c.id, course.id).await.unwrap());
    assert_eq!(enrolled_count(&db, course.id).await, 2);

    assert_eq!(repo.drop_course(a.id, course.id).await.unwrap(), DropOutcome::Dropped);
    assert_eq!(enrolled_count(&db, course.id).await, 1);

    assert_eq!(repo.enroll(c.id, course.id).await.unwrap(), EnrollOutcome::Enrolled);
    assert_eq!(enrolled_count(&db, course.id).await, 2);
}

#[tokio::test]
async fn should_report_already_enrolled_without_counting_twice() {
    let db = test_db().await;
    let repo = repos(&db).enrollments;
    let course = create_course(&db, "COMP 1010", 10).await;
    let user = create_user(&db, 1).await;

    repo.enroll(user.id, course.id).await.unwrap();
    let again = repo.enroll(user.id, course.id).await.unwrap();

    assert_eq!(again, EnrollOutcome::AlreadyEnrolled);
    assert!(!again.success());
    assert_eq!(enrolled_count(&db, course.id).await, 1);
}

#[tokio::test]
async fn should_report_not_enrolled_on_drop() {
    let db = test_db().await;
    let repo = repos(&db).enrollments;
    let course = create_course(&db, "COMP 1010", 10).await;
    let user = create_user(&db, 1).await;

    let outcome = repo.drop_course(user.id, course.id).await.unwrap();

    assert_eq!(outcome, DropOutcome::NotEnrolled);
    assert_eq!(outcome.message(), "Not enrolled in this course");
    assert_eq!(enrolled_count(&db, course.id).await, 0);
}

#[tokio::test]
async fn should_fail_enroll_for_missing_course() {
    let db = test_db().await;
    let user = create_user(&db, 1).await;

    let result = repos(&db).enrollments.enroll(user.id, 404).await;

    assert!(matches!(result, Err(ApiError::CourseNotFound)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_admit_at_most_one_racing_enrollment_for_last_seat() {
    let file = file_db(8).await;
    let db = &file.db;
    let repo = repos(db).enrollments;
    let course = create_course(db, "COMP 2140", 3).await;
    let early = create_user(db, 1).await;
    let late = create_user(db, 2).await;
    repo.enroll(early.id, course.id).await.unwrap();
    repo.enroll(late.id, course.id).await.unwrap();

    let mut racers = Vec::new();
    for n in 10..18 {
        racers.push(create_user(db, n).await);
    }
    let handles: Vec<_> = racers
        .iter()
        .map(|u| {
            let repo = repo.clone();
            let (user_id, course_id) = (u.id, course.id);
            tokio::spawn(async move { repo.enroll(user_id, course_id).await })
        })
        .collect();
    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap());
    }

    // A writer that loses the database lock gets an error back, never a seat.
    assert!(outcomes.iter().all(|o| matches!(
        o,
        Ok(EnrollOutcome::Enrolled | EnrollOutcome::CourseFull) | Err(_)
    )));
    let admitted = outcomes
        .iter()
        .filter(|o| matches!(o, Ok(EnrollOutcome::Enrolled)))
        .count();
    assert!(admitted <= 1);
    let enrolled = enrolled_count(db, course.id).await;
    assert_eq!(enrolled, 2 + admitted as i32);
    assert!(enrolled <= course.capacity);
    assert_eq!(enrollment_rows(db, course.id).await, i64::from(enrolled));
}

#[tokio::test]
async fn should_refuse_seat_taken_between_capacity_check_and_increment() {
    let db = test_db().await;
    let repo = repos(&db).enrollments;
    let course = create_course(&db, "COMP 2150", 3).await;
    let first = create_user(&db, 1).await;
    let second = create_user(&db, 2).await;
    repo.enroll(first.id, course.id).await.unwrap();
    // Another writer fills the course after the capacity read but before the
    // counter moves.
    db.execute_unprepared(
        "CREATE TRIGGER fill_course BEFORE INSERT ON enrollments \
         BEGIN UPDATE courses SET enrolled = capacity WHERE id = NEW.course_id; END",
    )
    .await
    .unwrap();

    let outcome = repo.enroll(second.id, course.id).await.unwrap();

    assert_eq!(outcome, EnrollOutcome::CourseFull);
    assert!(!repo.is_enrolled(second.id, course.id).await.unwrap());
    assert_eq!(enrolled_count(&db, course.id).await, 1);
    assert_eq!(enrollment_rows(&db, course.id).await, 1);
}

#[tokio::test]
async fn should_report_already_enrolled_when_insert_loses_to_same_student() {
    let db = test_db().await;
    let repo = repos(&db).enrollments;
    let course = create_course(&db, "COMP 2160", 3).await;
    let user = create_user(&db, 1).await;
    // The same student's other request lands its row first.
    db.execute_unprepared(
        "CREATE TRIGGER same_student BEFORE INSERT ON enrollments \
         BEGIN INSERT INTO enrollments (user_id, course_id, enrolled_at, status) \
         VALUES (NEW.user_id, NEW.course_id, NEW.enrolled_at, 'enrolled'); END",
    )
    .await
    .unwrap();

    let outcome = repo.enroll(user.id, course.id).await.unwrap();

    assert_eq!(outcome, EnrollOutcome::AlreadyEnrolled);
    assert_eq!(enrolled_count(&db, course.id).await, 0);
    assert_eq!(enrollment_rows(&db, course.id).await, 0);
}

#[tokio::test]
async fn should_list_enrolled_courses_newest_first() {
    let db = test_db().await;
    let repo = repos(&db).enrollments;
    let first = create_course(&db, "COMP 1010", 10).await;
    let second = create_course(&db, "COMP 1020", 10).await;
    let user = create_user(&db, 1).await;

    repo.enroll(user.id, first.id).await.unwrap();
    repo.enroll(user.id, second.id).await.unwrap();

    let listed = repo.enrolled_courses(user.id).await.unwrap();
    let codes: Vec<_> = listed.iter().map(|e| e.course.course_code.as_str()).collect();
    assert_eq!(codes, ["COMP 1020", "COMP 1010"]);
    assert!(repo.is_enrolled(user.id, first.id).await.unwrap());
    assert!(listed.iter().all(|e| e.grade.is_none()));
}
