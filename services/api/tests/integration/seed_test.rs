use degreedash_api::domain::repository::{CourseRepository, ProfessorRepository};
use degreedash_api::domain::types::CourseFilter;
use degreedash_api::seed::{SeedReport, seed_catalogue};
use degreedash_testing::db::test_db;

use crate::helpers::repos;

#[tokio::test]
async fn should_seed_catalogue_once() {
    let db = test_db().await;

    let first = seed_catalogue(&db).await.unwrap();
    assert_eq!(
        first,
        SeedReport {
            professors: 7,
            courses: 7,
            reviews: 3,
        }
    );

    let second = seed_catalogue(&db).await.unwrap();
    assert_eq!(second, SeedReport::default());

    let r = repos(&db);
    assert_eq!(r.courses.list(&CourseFilter::default()).await.unwrap().len(), 7);
    assert_eq!(r.professors.stats().await.unwrap().total_professors, 7);
}

#[tokio::test]
async fn should_seed_ranked_staff_and_reviews_for_automata() {
    let db = test_db().await;
    seed_catalogue(&db).await.unwrap();
    let r = repos(&db);

    let course = r.courses.find_by_code("COMP 3030").await.unwrap().unwrap();

    assert_eq!(
        course.instructors.as_deref(),
        Some("Stephane Durocher, Dr. James Anderson, Dr. Sarah Johnson")
    );
    assert_eq!(course.review_count, 3);
    assert_eq!(course.avg_rating, Some(5.0));
}
