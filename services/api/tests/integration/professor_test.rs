use degreedash_api::domain::repository::{CourseRepository, ProfessorRepository};
use degreedash_api::domain::types::{ProfessorFilter, ProfessorInput};
use degreedash_api::error::ApiError;
use degreedash_domain::course::InstructorRole;
use degreedash_testing::db::test_db;

use crate::helpers::{course_input, create_professor, repos};

#[tokio::test]
async fn should_refuse_to_delete_linked_professor() {
    let db = test_db().await;
    let r = repos(&db);
    let p = create_professor(&db, "Dr. Sarah Johnson").await;
    r.courses
        .create(&course_input("COMP 1010", 60), &[p.id])
        .await
        .unwrap();

    let result = r.professors.delete(p.id).await;

    assert!(matches!(result, Err(ApiError::ProfessorHasCourses(1))));
    assert!(r.professors.find_by_id(p.id).await.unwrap().is_some());
}

#[tokio::test]
async fn should_delete_unlinked_professor() {
    let db = test_db().await;
    let repo = repos(&db).professors;
    let p = create_professor(&db, "Dr. Sarah Johnson").await;

    repo.delete(p.id).await.unwrap();

    assert!(repo.find_by_id(p.id).await.unwrap().is_none());
    assert!(matches!(
        repo.delete(p.id).await,
        Err(ApiError::ProfessorNotFound)
    ));
}

#[tokio::test]
async fn should_reject_same_name_in_same_department() {
    let db = test_db().await;
    let repo = repos(&db).professors;
    create_professor(&db, "Dr. Emily Brown").await;

    let same = repo
        .create(&ProfessorInput {
            name: "Dr. Emily Brown".into(),
            department: Some("Computer Science".into()),
            ..Default::default()
        })
        .await;
    assert!(matches!(same, Err(ApiError::Duplicate(_))));

    let other_department = repo
        .create(&ProfessorInput {
            name: "Dr. Emily Brown".into(),
            department: Some("Statistics".into()),
            ..Default::default()
        })
        .await;
    assert!(other_department.is_ok());
}

#[tokio::test]
async fn should_list_taught_courses_newest_year_first() {
    let db = test_db().await;
    let r = repos(&db);
    let p = create_professor(&db, "Dr. Robert Wilson").await;
    let mut winter = course_input("COMP 1020", 50);
    winter.semester = Some("Winter".into());
    winter.year = Some(2025);
    r.courses.create(&winter, &[p.id]).await.unwrap();
    r.courses
        .create(&course_input("COMP 2140", 50), &[p.id])
        .await
        .unwrap();
    let ta = r
        .courses
        .create(&course_input("COMP 1010", 50), &[])
        .await
        .unwrap();
    r.courses
        .add_professor(ta.id, p.id, &InstructorRole::TeachingAssistant)
        .await
        .unwrap();

    let taught = r.professors.courses(p.id).await.unwrap();
    let listed: Vec<_> = taught
        .iter()
        .map(|t| (t.course.course_code.as_str(), t.role.as_str()))
        .collect();
    assert_eq!(
        listed,
        [
            ("COMP 1020", "Instructor"),
            ("COMP 1010", "Teaching Assistant"),
            ("COMP 2140", "Instructor"),
        ]
    );
}

#[tokio::test]
async fn should_filter_professors_by_department_and_search() {
    let db = test_db().await;
    let repo = repos(&db).professors;
    create_professor(&db, "Dr. Michael Chen").await;
    create_professor(&db, "Dr. Lisa Martinez").await;
    repo.create(&ProfessorInput {
        name: "Dr. Emily Brown".into(),
        department: Some("Statistics".into()),
        ..Default::default()
    })
    .await
    .unwrap();

    let cs = repo
        .list(&ProfessorFilter {
            department: Some("Computer Science".into()),
            search: None,
        })
        .await
        .unwrap();
    let names: Vec<_> = cs.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Dr. Lisa Martinez", "Dr. Michael Chen"]);

    let found = repo
        .list(&ProfessorFilter {
            department: None,
            search: Some("brown".into()),
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].department.as_deref(), Some("Statistics"));
}

#[tokio::test]
async fn should_compute_professor_stats() {
    let db = test_db().await;
    let r = repos(&db);
    let busy = create_professor(&db, "Dr. Michael Chen").await;
    create_professor(&db, "Dr. Lisa Martinez").await;
    r.courses
        .create(&course_input("COMP 1010", 50), &[busy.id])
        .await
        .unwrap();
    r.courses
        .create(&course_input("COMP 1020", 50), &[busy.id])
        .await
        .unwrap();

    let stats = r.professors.stats().await.unwrap();

    assert_eq!(stats.total_professors, 2);
    assert_eq!(stats.departments, 1);
    assert_eq!(stats.avg_courses_per_professor, Some(1.0));
}
