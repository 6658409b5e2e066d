use degreedash_api::domain::repository::{EnrollmentRepository, UserRepository};
use degreedash_api::domain::types::{AlumniProfileInput, ExternalProfile, ProfileUpdate};
use degreedash_api::error::ApiError;
use degreedash_api::usecase::user::{FindOrCreateUserUseCase, UpsertAlumniProfileUseCase};
use degreedash_domain::user::UserType;
use degreedash_testing::db::test_db;

use crate::helpers::{create_course, create_user, repos};

fn profile() -> ExternalProfile {
    ExternalProfile {
        id: "ms-graph-42".into(),
        email: "jane.doe@myumanitoba.ca".into(),
        display_name: "Jane Doe".into(),
        avatar_url: None,
    }
}

fn to_alumni(year: i32) -> ProfileUpdate {
    ProfileUpdate {
        user_type: Some(UserType::Alumni),
        graduation_year: Some(year),
        major: Some("Computer Science".into()),
    }
}

#[tokio::test]
async fn should_find_or_create_same_user_on_repeat_login() {
    let db = test_db().await;
    let usecase = FindOrCreateUserUseCase {
        repo: repos(&db).users,
    };

    let first = usecase.execute(&profile()).await.unwrap();
    assert_eq!(first.user_type, UserType::Current);
    assert_eq!(first.last_login, None);

    let second = usecase.execute(&profile()).await.unwrap();
    assert_eq!(second.id, first.id);
    assert!(second.last_login.is_some());
    assert_eq!(usecase.repo.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_second_account_with_same_email() {
    let db = test_db().await;
    let repo = repos(&db).users;
    repo.create(&profile()).await.unwrap();

    let mut other = profile();
    other.id = "ms-graph-43".into();
    let result = repo.create(&other).await;

    assert!(matches!(result, Err(ApiError::Duplicate(_))));
}

#[tokio::test]
async fn should_remove_alumni_profile_when_switching_back_to_current() {
    let db = test_db().await;
    let repo = repos(&db).users;
    let user = create_user(&db, 1).await;
    repo.update_profile(user.id, &to_alumni(2020)).await.unwrap();
    repo.upsert_alumni_profile(
        user.id,
        &AlumniProfileInput {
            employer: Some("Shopify".into()),
            mentorship_available: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(repo.alumni_profile(user.id).await.unwrap().is_some());

    let updated = repo
        .update_profile(
            user.id,
            &ProfileUpdate {
                user_type: Some(UserType::Current),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.user_type, UserType::Current);
    assert_eq!(updated.graduation_year, Some(2020));
    assert!(repo.alumni_profile(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn should_overwrite_alumni_profile_on_second_save() {
    let db = test_db().await;
    let repo = repos(&db).users;
    let user = create_user(&db, 1).await;
    repo.update_profile(user.id, &to_alumni(2019)).await.unwrap();
    let usecase = UpsertAlumniProfileUseCase { repo: repo.clone() };

    usecase
        .execute(
            user.id,
            AlumniProfileInput {
                employer: Some("Shopify".into()),
                title: Some("Developer".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let saved = usecase
        .execute(
            user.id,
            AlumniProfileInput {
                employer: Some("Varian".into()),
                title: None,
                industry: Some("Healthcare".into()),
                mentorship_available: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(saved.employer.as_deref(), Some("Varian"));
    assert_eq!(saved.title, None);
    assert!(saved.mentorship_available);
}

#[tokio::test]
async fn should_refuse_alumni_profile_for_current_student() {
    let db = test_db().await;
    let user = create_user(&db, 1).await;
    let usecase = UpsertAlumniProfileUseCase {
        repo: repos(&db).users,
    };

    let result = usecase
        .execute(user.id, AlumniProfileInput::default())
        .await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn should_refuse_alumni_profile_in_repository_after_switch_to_current() {
    let db = test_db().await;
    let repo = repos(&db).users;
    let user = create_user(&db, 1).await;
    repo.update_profile(user.id, &to_alumni(2020)).await.unwrap();
    repo.update_profile(
        user.id,
        &ProfileUpdate {
            user_type: Some(UserType::Current),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let result = repo
        .upsert_alumni_profile(user.id, &AlumniProfileInput::default())
        .await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
    assert!(repo.alumni_profile(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn should_report_missing_user_when_saving_alumni_profile() {
    let db = test_db().await;

    let result = repos(&db)
        .users
        .upsert_alumni_profile(404, &AlumniProfileInput::default())
        .await;

    assert!(matches!(result, Err(ApiError::UserNotFound)));
}

#[tokio::test]
async fn should_filter_alumni_directory_by_mentorship() {
    let db = test_db().await;
    let repo = repos(&db).users;
    let mentor = create_user(&db, 1).await;
    let quiet = create_user(&db, 2).await;
    create_user(&db, 3).await;
    for (user, mentoring) in [(&mentor, true), (&quiet, false)] {
        repo.update_profile(user.id, &to_alumni(2021)).await.unwrap();
        repo.upsert_alumni_profile(
            user.id,
            &AlumniProfileInput {
                mentorship_available: mentoring,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    let all = repo.list_alumni(false).await.unwrap();
    assert_eq!(all.len(), 2);
    let mentors = repo.list_alumni(true).await.unwrap();
    assert_eq!(mentors.len(), 1);
    assert_eq!(mentors[0].user_id, mentor.id);
}

#[tokio::test]
async fn should_count_users_by_type() {
    let db = test_db().await;
    let r = repos(&db);
    let alum = create_user(&db, 1).await;
    let student = create_user(&db, 2).await;
    r.users.update_profile(alum.id, &to_alumni(2018)).await.unwrap();
    r.users
        .upsert_alumni_profile(
            alum.id,
            &AlumniProfileInput {
                mentorship_available: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let course = create_course(&db, "COMP 1010", 10).await;
    r.enrollments.enroll(student.id, course.id).await.unwrap();

    let stats = r.users.stats().await.unwrap();

    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.current_students, 1);
    assert_eq!(stats.alumni, 1);
    assert_eq!(stats.mentors_available, 1);
    assert_eq!(stats.total_enrollments, 1);
    assert_eq!(stats.total_reviews, 0);
}
