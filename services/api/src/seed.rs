//! Sample catalogue: the University of Manitoba courses the frontend is demoed with.
//!
//! Every step goes through the same use cases as the HTTP API and skips what
//! already exists, so seeding twice leaves the store unchanged.

use sea_orm::DatabaseConnection;
use tracing::info;

use degreedash_domain::course::InstructorRole;

use crate::domain::repository::{CourseRepository, ProfessorRepository};
use crate::domain::types::{CourseInput, ExternalProfile, ProfessorInput};
use crate::error::ApiError;
use crate::infra::db::{
    DbCourseRepository, DbProfessorRepository, DbReviewRepository, DbUserRepository,
};
use crate::usecase::course::{AddCourseProfessorUseCase, CreateCourseUseCase};
use crate::usecase::professor::CreateProfessorUseCase;
use crate::usecase::review::{CreateReviewInput, CreateReviewUseCase};
use crate::usecase::user::FindOrCreateUserUseCase;

const PROFESSORS: &[(&str, &str, &str, &str)] = &[
    ("Stephane Durocher", "Computer Science", "durocher@cs.umanitoba.ca", "EITC 456"),
    ("Dr. James Anderson", "Computer Science", "anderson@cs.umanitoba.ca", "EITC 457"),
    ("Dr. Sarah Johnson", "Computer Science", "johnson@cs.umanitoba.ca", "EITC 458"),
    ("Dr. Michael Chen", "Computer Science", "chen@cs.umanitoba.ca", "EITC 459"),
    ("Dr. Lisa Martinez", "Computer Science", "martinez@cs.umanitoba.ca", "EITC 460"),
    ("Dr. Robert Wilson", "Mathematics", "wilson@math.umanitoba.ca", "Machray 345"),
    ("Dr. Emily Brown", "Statistics", "brown@stat.umanitoba.ca", "Machray 346"),
];

struct SeedCourse {
    code: &'static str,
    name: &'static str,
    department: &'static str,
    description: &'static str,
    prerequisites: &'static str,
    schedule: &'static str,
    semester: &'static str,
    year: i32,
    capacity: i32,
}

const COURSES: &[SeedCourse] = &[
    SeedCourse {
        code: "COMP 1010",
        name: "Introduction to Computer Science I",
        department: "Computer Science",
        description: "An introduction to programming using Python.",
        prerequisites: "None",
        schedule: "MWF 10:00-11:15",
        semester: "Fall",
        year: 2024,
        capacity: 60,
    },
    SeedCourse {
        code: "COMP 1020",
        name: "Introduction to Computer Science II",
        department: "Computer Science",
        description: "Object-oriented programming using Java.",
        prerequisites: "COMP 1010",
        schedule: "TR 13:00-14:30",
        semester: "Winter",
        year: 2025,
        capacity: 55,
    },
    SeedCourse {
        code: "COMP 2140",
        name: "Data Structures and Algorithms",
        department: "Computer Science",
        description: "Trees, graphs, hash tables, and algorithm analysis.",
        prerequisites: "COMP 1020",
        schedule: "MWF 11:30-12:45",
        semester: "Fall",
        year: 2024,
        capacity: 50,
    },
    SeedCourse {
        code: "COMP 3030",
        name: "Algorithm Design and Analysis",
        department: "Computer Science",
        description: "Design and analysis of efficient algorithms.",
        prerequisites: "COMP 2140",
        schedule: "TR 11:30-13:00",
        semester: "Fall",
        year: 2024,
        capacity: 45,
    },
    SeedCourse {
        code: "COMP 3190",
        name: "Introduction to Artificial Intelligence",
        department: "Computer Science",
        description: "Search algorithms, knowledge representation, and machine learning.",
        prerequisites: "COMP 2140",
        schedule: "MWF 09:00-10:15",
        semester: "Winter",
        year: 2025,
        capacity: 50,
    },
    SeedCourse {
        code: "MATH 1240",
        name: "Elementary Discrete Mathematics",
        department: "Mathematics",
        description: "Logic, set theory, combinatorics, and graph theory.",
        prerequisites: "None",
        schedule: "MWF 13:00-14:15",
        semester: "Fall",
        year: 2024,
        capacity: 80,
    },
    SeedCourse {
        code: "STAT 1150",
        name: "Introduction to Statistics",
        department: "Statistics",
        description: "Descriptive statistics, probability, and hypothesis testing.",
        prerequisites: "None",
        schedule: "TR 10:00-11:30",
        semester: "Fall",
        year: 2024,
        capacity: 75,
    },
];

const LINKS: &[(&str, &str, InstructorRole)] = &[
    ("COMP 3030", "Stephane Durocher", InstructorRole::PrimaryInstructor),
    ("COMP 3030", "Dr. James Anderson", InstructorRole::TeachingAssistant),
    ("COMP 3030", "Dr. Sarah Johnson", InstructorRole::GuestLecturer),
    ("COMP 1010", "Dr. James Anderson", InstructorRole::PrimaryInstructor),
    ("COMP 1020", "Dr. Sarah Johnson", InstructorRole::PrimaryInstructor),
    ("COMP 2140", "Dr. Michael Chen", InstructorRole::PrimaryInstructor),
    ("COMP 3190", "Dr. Lisa Martinez", InstructorRole::PrimaryInstructor),
    ("MATH 1240", "Dr. Robert Wilson", InstructorRole::PrimaryInstructor),
    ("STAT 1150", "Dr. Emily Brown", InstructorRole::PrimaryInstructor),
];

/// (rating, difficulty, semester, year, comment). Terms differ so that each
/// review has its own natural key.
const REVIEWS: &[(i32, i32, &str, i32, &str)] = &[
    (
        5,
        4,
        "Fall",
        2024,
        "Stephane Durocher is absolutely the best professor at University of Manitoba! His teaching style is incredibly clear.",
    ),
    (
        5,
        3,
        "Winter",
        2024,
        "Dr. Durocher is a gem! His lectures are engaging and he uses great examples.",
    ),
    (
        5,
        4,
        "Fall",
        2023,
        "Took this course last year and it was fantastic. Durocher is known as one of the best profs in the department.",
    ),
];

/// Rows actually inserted by one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub professors: usize,
    pub courses: usize,
    pub reviews: usize,
}

pub async fn seed_catalogue(db: &DatabaseConnection) -> Result<SeedReport, ApiError> {
    let courses = DbCourseRepository { db: db.clone() };
    let professors = DbProfessorRepository { db: db.clone() };
    let mut report = SeedReport::default();

    for &(name, department, email, office) in PROFESSORS {
        if professors.find_by_name(name).await?.is_some() {
            continue;
        }
        CreateProfessorUseCase {
            repo: professors.clone(),
        }
        .execute(ProfessorInput {
            name: name.to_owned(),
            department: Some(department.to_owned()),
            email: Some(email.to_owned()),
            office: Some(office.to_owned()),
        })
        .await?;
        report.professors += 1;
    }

    for c in COURSES {
        if courses.find_by_code(c.code).await?.is_some() {
            continue;
        }
        CreateCourseUseCase {
            repo: courses.clone(),
        }
        .execute(
            CourseInput {
                course_code: c.code.to_owned(),
                course_name: c.name.to_owned(),
                department: c.department.to_owned(),
                credits: Some(3),
                description: Some(c.description.to_owned()),
                prerequisites: Some(c.prerequisites.to_owned()),
                schedule: Some(c.schedule.to_owned()),
                semester: Some(c.semester.to_owned()),
                year: Some(c.year),
                capacity: Some(c.capacity),
            },
            vec![],
        )
        .await?;
        report.courses += 1;
    }

    let link = AddCourseProfessorUseCase {
        courses: courses.clone(),
        professors: professors.clone(),
    };
    for (code, name, role) in LINKS {
        let course_id = course_id(&courses, code).await?;
        let professor_id = professor_id(&professors, name).await?;
        link.execute(course_id, professor_id, Some(role.clone()))
            .await?;
    }

    let user = FindOrCreateUserUseCase {
        repo: DbUserRepository { db: db.clone() },
    }
    .execute(&ExternalProfile {
        id: "test123".into(),
        email: "test@example.com".into(),
        display_name: "Test User".into(),
        avatar_url: Some("https://example.com/avatar.jpg".into()),
    })
    .await?;

    let reviews = CreateReviewUseCase {
        reviews: DbReviewRepository { db: db.clone() },
        courses: courses.clone(),
        professors: professors.clone(),
    };
    let comp3030 = course_id(&courses, "COMP 3030").await?;
    let durocher = professor_id(&professors, "Stephane Durocher").await?;
    for &(rating, difficulty, semester, year, comment) in REVIEWS {
        let result = reviews
            .execute(
                user.id,
                CreateReviewInput {
                    course_id: comp3030,
                    professor_id: Some(durocher),
                    semester_taken: Some(semester.to_owned()),
                    year_taken: Some(year),
                    rating,
                    difficulty,
                    comment: Some(comment.to_owned()),
                    would_recommend: Some(true),
                },
            )
            .await;
        match result {
            Ok(_) => report.reviews += 1,
            Err(ApiError::Duplicate(_)) => {}
            Err(e) => return Err(e),
        }
    }

    info!(
        professors = report.professors,
        courses = report.courses,
        reviews = report.reviews,
        "seed complete"
    );
    Ok(report)
}

async fn course_id(repo: &DbCourseRepository, code: &str) -> Result<i32, ApiError> {
    repo.find_by_code(code)
        .await?
        .map(|c| c.course.id)
        .ok_or(ApiError::CourseNotFound)
}

async fn professor_id(repo: &DbProfessorRepository, name: &str) -> Result<i32, ApiError> {
    repo.find_by_name(name)
        .await?
        .map(|p| p.id)
        .ok_or(ApiError::ProfessorNotFound)
}
