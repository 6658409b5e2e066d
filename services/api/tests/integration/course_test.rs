use sea_orm::{EntityTrait, PaginatorTrait};

use degreedash_api::domain::repository::{
    CourseRepository, EnrollmentRepository, ReviewRepository,
};
use degreedash_api::domain::types::{CourseFilter, CourseProfessor, NewReview};
use degreedash_api::error::ApiError;
use degreedash_api_schema::{course_professors, reviews};
use degreedash_domain::course::InstructorRole;
use degreedash_testing::db::test_db;

use crate::helpers::{
    course_input, create_course, create_professor, create_user, enrolled_count, repos,
};

fn ids_and_roles(list: &[CourseProfessor]) -> Vec<(i32, InstructorRole)> {
    let mut v: Vec<_> = list
        .iter()
        .map(|cp| (cp.professor.id, cp.role.clone()))
        .collect();
    v.sort_by_key(|(id, _)| *id);
    v
}

// ── create / update links ────────────────────────────────────────────────────

#[tokio::test]
async fn should_link_professors_as_instructor_and_replace_on_update() {
    let db = test_db().await;
    let repo = repos(&db).courses;
    let p1 = create_professor(&db, "Dr. Michael Chen").await;
    let p2 = create_professor(&db, "Dr. Lisa Martinez").await;
    let p3 = create_professor(&db, "Dr. Robert Wilson").await;

    let course = repo
        .create(&course_input("COMP 2140", 50), &[p1.id, p2.id])
        .await
        .unwrap();
    assert_eq!(course.enrolled, 0);
    assert_eq!(
        ids_and_roles(&repo.professors(course.id).await.unwrap()),
        vec![
            (p1.id, InstructorRole::Instructor),
            (p2.id, InstructorRole::Instructor)
        ]
    );

    repo.update(course.id, &course_input("COMP 2140", 50), Some(&[p2.id, p3.id]))
        .await
        .unwrap();
    assert_eq!(
        ids_and_roles(&repo.professors(course.id).await.unwrap()),
        vec![
            (p2.id, InstructorRole::Instructor),
            (p3.id, InstructorRole::Instructor)
        ]
    );
}

#[tokio::test]
async fn should_keep_links_when_update_omits_professor_ids() {
    let db = test_db().await;
    let repo = repos(&db).courses;
    let p1 = create_professor(&db, "Dr. Michael Chen").await;
    let course = repo
        .create(&course_input("COMP 2140", 50), &[p1.id])
        .await
        .unwrap();

    let mut input = course_input("COMP 2140", 60);
    input.course_name = "Data Structures and Algorithms".into();
    let updated = repo.update(course.id, &input, None).await.unwrap();

    assert_eq!(updated.course_name, "Data Structures and Algorithms");
    assert_eq!(updated.capacity, 60);
    assert_eq!(repo.professors(course.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_roll_back_course_when_a_professor_link_fails() {
    let db = test_db().await;
    let repo = repos(&db).courses;
    let p1 = create_professor(&db, "Dr. Michael Chen").await;

    let result = repo
        .create(&course_input("COMP 2140", 50), &[p1.id, 9999])
        .await;

    assert!(matches!(result, Err(ApiError::ProfessorNotFound)));
    assert!(repo.find_by_code("COMP 2140").await.unwrap().is_none());
    assert_eq!(course_professors::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn should_reject_duplicate_course_code() {
    let db = test_db().await;
    let repo = repos(&db).courses;
    create_course(&db, "COMP 1010", 60).await;

    let result = repo.create(&course_input("COMP 1010", 10), &[]).await;
    assert!(matches!(result, Err(ApiError::Duplicate(_))));
}

#[tokio::test]
async fn should_reject_capacity_below_enrolled() {
    let db = test_db().await;
    let r = repos(&db);
    let course = create_course(&db, "COMP 1010", 5).await;
    let u1 = create_user(&db, 1).await;
    let u2 = create_user(&db, 2).await;
    r.enrollments.enroll(u1.id, course.id).await.unwrap();
    r.enrollments.enroll(u2.id, course.id).await.unwrap();

    let result = r
        .courses
        .update(course.id, &course_input("COMP 1010", 1), None)
        .await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
    let stored = r.courses.find_by_id(course.id).await.unwrap().unwrap();
    assert_eq!(stored.course.capacity, 5);
    assert_eq!(stored.course.enrolled, 2);
}

// ── delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_refuse_to_delete_course_with_enrollments() {
    let db = test_db().await;
    let r = repos(&db);
    let p = create_professor(&db, "Stephane Durocher").await;
    let course = r
        .courses
        .create(&course_input("COMP 3030", 45), &[p.id])
        .await
        .unwrap();
    let user = create_user(&db, 1).await;
    r.enrollments.enroll(user.id, course.id).await.unwrap();

    let result = r.courses.delete(course.id).await;

    assert!(matches!(result, Err(ApiError::CourseHasEnrollments(1))));
    assert!(r.courses.find_by_id(course.id).await.unwrap().is_some());
    assert_eq!(r.courses.professors(course.id).await.unwrap().len(), 1);
    assert_eq!(enrolled_count(&db, course.id).await, 1);
}

#[tokio::test]
async fn should_cascade_links_and_reviews_on_delete() {
    let db = test_db().await;
    let r = repos(&db);
    let p = create_professor(&db, "Stephane Durocher").await;
    let course = r
        .courses
        .create(&course_input("COMP 3030", 45), &[p.id])
        .await
        .unwrap();
    let user = create_user(&db, 1).await;
    r.reviews
        .create(
            user.id,
            &NewReview {
                course_id: course.id,
                professor_id: Some(p.id),
                semester_taken: Some("Fall".into()),
                year_taken: Some(2024),
                rating: 5,
                difficulty: 4,
                comment: None,
                would_recommend: true,
            },
        )
        .await
        .unwrap();

    r.courses.delete(course.id).await.unwrap();

    assert!(r.courses.find_by_id(course.id).await.unwrap().is_none());
    assert_eq!(course_professors::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(reviews::Entity::find().count(&db).await.unwrap(), 0);
    assert!(r.reviews.list_for_user(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_return_not_found_when_deleting_missing_course() {
    let db = test_db().await;
    let result = repos(&db).courses.delete(404).await;
    assert!(matches!(result, Err(ApiError::CourseNotFound)));
}

// ── capacity guard ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_guard_increment_and_decrement() {
    let db = test_db().await;
    let repo = repos(&db).courses;
    let course = create_course(&db, "COMP 1010", 1).await;

    assert!(repo.has_available_seats(course.id).await.unwrap());
    repo.increment_enrolled(course.id).await.unwrap();
    assert!(!repo.has_available_seats(course.id).await.unwrap());
    assert!(matches!(
        repo.increment_enrolled(course.id).await,
        Err(ApiError::CourseFull)
    ));
    assert_eq!(enrolled_count(&db, course.id).await, 1);

    repo.decrement_enrolled(course.id).await.unwrap();
    assert!(matches!(
        repo.decrement_enrolled(course.id).await,
        Err(ApiError::NoEnrollments)
    ));
    assert_eq!(enrolled_count(&db, course.id).await, 0);

    assert!(matches!(
        repo.increment_enrolled(404).await,
        Err(ApiError::CourseNotFound)
    ));
}

// ── catalogue queries ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_filter_courses_conjunctively_in_code_order() {
    let db = test_db().await;
    let repo = repos(&db).courses;
    let mut ai = course_input("COMP 3190", 50);
    ai.description = Some("Search algorithms and Machine Learning.".into());
    ai.semester = Some("Winter".into());
    ai.year = Some(2025);
    repo.create(&ai, &[]).await.unwrap();
    create_course(&db, "COMP 1010", 60).await;
    let mut math = course_input("MATH 1240", 80);
    math.department = "Mathematics".into();
    repo.create(&math, &[]).await.unwrap();

    let all = repo.list(&CourseFilter::default()).await.unwrap();
    let codes: Vec<_> = all.iter().map(|c| c.course.course_code.as_str()).collect();
    assert_eq!(codes, ["COMP 1010", "COMP 3190", "MATH 1240"]);

    let search = repo
        .list(&CourseFilter {
            search: Some("machine learning".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(search.len(), 1);
    assert_eq!(search[0].course.course_code, "COMP 3190");

    let by_code = repo
        .list(&CourseFilter {
            search: Some("comp".into()),
            department: Some("Computer Science".into()),
            semester: Some("Fall".into()),
            year: Some(2024),
        })
        .await
        .unwrap();
    assert_eq!(by_code.len(), 1);
    assert_eq!(by_code[0].course.course_code, "COMP 1010");
}

#[tokio::test]
async fn should_match_search_wildcards_literally() {
    let db = test_db().await;
    let repo = repos(&db).courses;
    create_course(&db, "COMP 3030", 45).await;
    let mut online = course_input("COMP 1012", 120);
    online.description = Some("Taught 100% online.".into());
    repo.create(&online, &[]).await.unwrap();

    let search = |term: &str| CourseFilter {
        search: Some(term.into()),
        ..Default::default()
    };
    assert!(repo.list(&search("3_30")).await.unwrap().is_empty());
    assert_eq!(repo.list(&search("3030")).await.unwrap().len(), 1);

    let percent = repo.list(&search("%")).await.unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].course.course_code, "COMP 1012");
}

#[tokio::test]
async fn should_annotate_courses_with_ranked_instructors() {
    let db = test_db().await;
    let repo = repos(&db).courses;
    let durocher = create_professor(&db, "Stephane Durocher").await;
    let anderson = create_professor(&db, "Dr. James Anderson").await;
    let johnson = create_professor(&db, "Dr. Sarah Johnson").await;
    let course = create_course(&db, "COMP 3030", 45).await;
    repo.add_professor(course.id, johnson.id, &InstructorRole::GuestLecturer)
        .await
        .unwrap();
    repo.add_professor(course.id, anderson.id, &InstructorRole::TeachingAssistant)
        .await
        .unwrap();
    repo.add_professor(course.id, durocher.id, &InstructorRole::PrimaryInstructor)
        .await
        .unwrap();

    let summary = repo.find_by_id(course.id).await.unwrap().unwrap();
    assert_eq!(
        summary.instructors.as_deref(),
        Some("Stephane Durocher, Dr. James Anderson, Dr. Sarah Johnson")
    );
    assert_eq!(summary.instructor_count, 3);
    assert_eq!(summary.seats_available, 45);
    assert_eq!(summary.review_count, 0);
    assert_eq!(summary.avg_rating, None);

    let names: Vec<_> = repo
        .professors(course.id)
        .await
        .unwrap()
        .into_iter()
        .map(|cp| cp.professor.name)
        .collect();
    assert_eq!(
        names,
        ["Stephane Durocher", "Dr. James Anderson", "Dr. Sarah Johnson"]
    );
}

#[tokio::test]
async fn should_manage_single_links() {
    let db = test_db().await;
    let repo = repos(&db).courses;
    let p = create_professor(&db, "Dr. Emily Brown").await;
    let course = create_course(&db, "STAT 1150", 75).await;

    repo.add_professor(course.id, p.id, &InstructorRole::PrimaryInstructor)
        .await
        .unwrap();
    // Re-adding leaves the existing role untouched.
    repo.add_professor(course.id, p.id, &InstructorRole::TeachingAssistant)
        .await
        .unwrap();
    let list = repo.professors(course.id).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].role, InstructorRole::PrimaryInstructor);

    assert!(
        repo.update_professor_role(course.id, p.id, &InstructorRole::from("Lab Coordinator"))
            .await
            .unwrap()
    );
    let list = repo.professors(course.id).await.unwrap();
    assert_eq!(list[0].role, InstructorRole::Other("Lab Coordinator".into()));

    assert!(repo.remove_professor(course.id, p.id).await.unwrap());
    assert!(!repo.remove_professor(course.id, p.id).await.unwrap());
    assert!(
        !repo
            .update_professor_role(course.id, p.id, &InstructorRole::Instructor)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn should_list_facets_and_stats() {
    let db = test_db().await;
    let repo = repos(&db).courses;
    let p = create_professor(&db, "Dr. Robert Wilson").await;
    let mut winter = course_input("COMP 1020", 50);
    winter.semester = Some("Winter".into());
    winter.year = Some(2025);
    repo.create(&winter, &[p.id]).await.unwrap();
    let mut math = course_input("MATH 1240", 50);
    math.department = "Mathematics".into();
    repo.create(&math, &[]).await.unwrap();

    let facets = repo.facets().await.unwrap();
    assert_eq!(facets.departments, ["Computer Science", "Mathematics"]);
    assert_eq!(facets.semesters, ["Fall", "Winter"]);
    assert_eq!(facets.years, [2025, 2024]);

    let stats = repo.stats().await.unwrap();
    assert_eq!(stats.total_courses, 2);
    assert_eq!(stats.departments, 2);
    assert_eq!(stats.total_capacity, 100);
    assert_eq!(stats.total_enrolled, 0);
    assert_eq!(stats.avg_fill_percentage, Some(0.0));
    assert_eq!(stats.courses_with_professors, 1);
    assert_eq!(stats.avg_professors_per_course, Some(1.0));
    assert_eq!(stats.total_reviews, 0);
}

#[tokio::test]
async fn should_list_roster_newest_first() {
    let db = test_db().await;
    let r = repos(&db);
    let course = create_course(&db, "COMP 1010", 10).await;
    let u1 = create_user(&db, 1).await;
    let u2 = create_user(&db, 2).await;
    r.enrollments.enroll(u1.id, course.id).await.unwrap();
    r.enrollments.enroll(u2.id, course.id).await.unwrap();

    let roster = r.courses.roster(course.id).await.unwrap();
    assert_eq!(roster.len(), 2);
    assert!(roster[0].enrolled_at >= roster[1].enrolled_at);
    assert!(roster.iter().any(|e| e.email == u1.email));
}
