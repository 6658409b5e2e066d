use degreedash_api::domain::repository::{CourseRepository, ProfessorRepository, ReviewRepository};
use degreedash_api::domain::types::NewReview;
use degreedash_api::error::ApiError;
use degreedash_api::usecase::course::GetCourseDetailsUseCase;
use degreedash_testing::db::test_db;

use crate::helpers::{course_input, create_course, create_professor, create_user, repos};

fn review(course_id: i32, professor_id: Option<i32>, rating: i32, difficulty: i32) -> NewReview {
    NewReview {
        course_id,
        professor_id,
        semester_taken: Some("Fall".into()),
        year_taken: Some(2024),
        rating,
        difficulty,
        comment: Some("Challenging but rewarding.".into()),
        would_recommend: true,
    }
}

#[tokio::test]
async fn should_reject_second_review_for_same_course_professor_and_term() {
    let db = test_db().await;
    let r = repos(&db);
    let course = create_course(&db, "COMP 3030", 45).await;
    let p = create_professor(&db, "Stephane Durocher").await;
    let user = create_user(&db, 1).await;

    r.reviews
        .create(user.id, &review(course.id, Some(p.id), 5, 4))
        .await
        .unwrap();
    let again = r
        .reviews
        .create(user.id, &review(course.id, Some(p.id), 3, 3))
        .await;
    assert!(matches!(again, Err(ApiError::Duplicate(_))));

    let mut other_term = review(course.id, Some(p.id), 4, 3);
    other_term.semester_taken = Some("Winter".into());
    r.reviews.create(user.id, &other_term).await.unwrap();

    assert_eq!(r.reviews.list_for_course(course.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn should_keep_review_when_professor_is_deleted() {
    let db = test_db().await;
    let r = repos(&db);
    let p = create_professor(&db, "Dr. Sarah Johnson").await;
    let course = r
        .courses
        .create(&course_input("COMP 1010", 60), &[p.id])
        .await
        .unwrap();
    let user = create_user(&db, 1).await;
    let created = r
        .reviews
        .create(user.id, &review(course.id, Some(p.id), 4, 2))
        .await
        .unwrap();
    assert_eq!(created.professor_name.as_deref(), Some("Dr. Sarah Johnson"));

    assert!(r.courses.remove_professor(course.id, p.id).await.unwrap());
    r.professors.delete(p.id).await.unwrap();

    let listed = r.reviews.list_for_course(course.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].professor_id, None);
    assert_eq!(listed[0].professor_name, None);
    assert_eq!(listed[0].rating, 4);
}

#[tokio::test]
async fn should_reject_second_review_without_professor_or_term() {
    let db = test_db().await;
    let r = repos(&db);
    let course = create_course(&db, "COMP 3380", 40).await;
    let user = create_user(&db, 1).await;
    let mut anonymous = review(course.id, None, 4, 3);
    anonymous.semester_taken = None;
    anonymous.year_taken = None;

    r.reviews.create(user.id, &anonymous).await.unwrap();
    let again = r.reviews.create(user.id, &anonymous).await;

    assert!(matches!(again, Err(ApiError::Duplicate(_))));
    assert_eq!(r.reviews.list_for_course(course.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_refuse_professor_delete_that_would_merge_reviews() {
    let db = test_db().await;
    let r = repos(&db);
    let course = create_course(&db, "COMP 3430", 40).await;
    let p = create_professor(&db, "Dr. Robert Guderian").await;
    let user = create_user(&db, 1).await;
    r.reviews
        .create(user.id, &review(course.id, Some(p.id), 4, 3))
        .await
        .unwrap();
    r.reviews
        .create(user.id, &review(course.id, None, 3, 3))
        .await
        .unwrap();

    let result = r.professors.delete(p.id).await;

    assert!(matches!(result, Err(ApiError::Duplicate(_))));
    assert!(r.professors.find_by_id(p.id).await.unwrap().is_some());
    assert_eq!(r.reviews.list_for_course(course.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn should_list_reviews_newest_first_and_by_professor() {
    let db = test_db().await;
    let r = repos(&db);
    let course = create_course(&db, "COMP 2140", 50).await;
    let chen = create_professor(&db, "Dr. Michael Chen").await;
    let a = create_user(&db, 1).await;
    let b = create_user(&db, 2).await;

    let first = r
        .reviews
        .create(a.id, &review(course.id, Some(chen.id), 5, 4))
        .await
        .unwrap();
    let second = r
        .reviews
        .create(b.id, &review(course.id, None, 3, 5))
        .await
        .unwrap();

    let ids: Vec<_> = r
        .reviews
        .list_for_course(course.id)
        .await
        .unwrap()
        .iter()
        .map(|v| v.id)
        .collect();
    assert_eq!(ids, [second.id, first.id]);

    let by_chen = r.reviews.list_for_professor(chen.id).await.unwrap();
    assert_eq!(by_chen.len(), 1);
    assert_eq!(by_chen[0].user_id, a.id);
    assert_eq!(r.reviews.list_for_user(b.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_aggregate_scores_on_course_page() {
    let db = test_db().await;
    let r = repos(&db);
    let course = create_course(&db, "COMP 3030", 45).await;
    for (n, rating, difficulty) in [(1, 5, 4), (2, 5, 3), (3, 4, 4)] {
        let user = create_user(&db, n).await;
        r.reviews
            .create(user.id, &review(course.id, None, rating, difficulty))
            .await
            .unwrap();
    }

    let details = GetCourseDetailsUseCase {
        courses: r.courses.clone(),
        reviews: r.reviews.clone(),
    }
    .execute(course.id)
    .await
    .unwrap();

    assert_eq!(details.reviews.len(), 3);
    assert_eq!(details.average_rating, Some(4.7));
    assert_eq!(details.average_difficulty, Some(3.7));
    assert_eq!(details.course.review_count, 3);
    assert_eq!(details.course.recommend_rate, Some(100.0));
}
