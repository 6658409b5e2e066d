//! Hand-written repository doubles shared by the use-case tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::Utc;

use degreedash_domain::course::InstructorRole;
use degreedash_domain::user::UserType;

use crate::domain::repository::{
    CourseRepository, ProfessorRepository, ReviewRepository, UserRepository,
};
use crate::domain::types::*;
use crate::error::ApiError;

pub fn course(id: i32, code: &str) -> CourseSummary {
    CourseSummary {
        course: Course {
            id,
            course_code: code.into(),
            course_name: format!("{code} course"),
            department: "Computer Science".into(),
            credits: 3,
            description: None,
            prerequisites: None,
            schedule: None,
            semester: Some("Fall".into()),
            year: Some(2024),
            capacity: 30,
            enrolled: 0,
            created_at: Utc::now(),
        },
        seats_available: 30,
        instructors: None,
        instructor_count: 0,
        review_count: 0,
        avg_rating: None,
        avg_difficulty: None,
        recommend_rate: None,
    }
}

pub fn professor(id: i32, name: &str) -> Professor {
    Professor {
        id,
        name: name.into(),
        department: Some("Computer Science".into()),
        email: None,
        office: None,
    }
}

pub fn user(id: i32, user_type: UserType) -> User {
    User {
        id,
        external_id: format!("ext-{id}"),
        email: format!("user{id}@example.com"),
        name: format!("User {id}"),
        avatar_url: None,
        user_type,
        graduation_year: None,
        major: None,
        created_at: Utc::now(),
        last_login: None,
    }
}

pub fn review(id: i32, rating: i32, difficulty: i32) -> Review {
    Review {
        id,
        user_id: 1,
        course_id: 1,
        professor_id: None,
        professor_name: None,
        semester_taken: None,
        year_taken: None,
        rating,
        difficulty,
        comment: None,
        would_recommend: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// ── Courses ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockCourseRepo {
    pub course: Option<CourseSummary>,
    pub professors: Vec<CourseProfessor>,
    pub link_exists: bool,
    pub created_with: Mutex<Option<Vec<i32>>>,
    pub added_role: Mutex<Option<InstructorRole>>,
}

impl MockCourseRepo {
    pub fn with(course: CourseSummary) -> Self {
        Self {
            course: Some(course),
            ..Default::default()
        }
    }
}

impl CourseRepository for MockCourseRepo {
    async fn list(&self, _filter: &CourseFilter) -> Result<Vec<CourseSummary>, ApiError> {
        Ok(self.course.clone().into_iter().collect())
    }
    async fn find_by_id(&self, _id: i32) -> Result<Option<CourseSummary>, ApiError> {
        Ok(self.course.clone())
    }
    async fn find_by_code(&self, _code: &str) -> Result<Option<CourseSummary>, ApiError> {
        Ok(self.course.clone())
    }
    async fn create(
        &self,
        _input: &CourseInput,
        professor_ids: &[i32],
    ) -> Result<Course, ApiError> {
        *self.created_with.lock().unwrap() = Some(professor_ids.to_vec());
        Ok(course(1, "COMP 1010").course)
    }
    async fn update(
        &self,
        id: i32,
        _input: &CourseInput,
        _professor_ids: Option<&[i32]>,
    ) -> Result<Course, ApiError> {
        self.course
            .clone()
            .map(|c| c.course)
            .filter(|c| c.id == id)
            .ok_or(ApiError::CourseNotFound)
    }
    async fn delete(&self, _id: i32) -> Result<(), ApiError> {
        Ok(())
    }
    async fn increment_enrolled(&self, _id: i32) -> Result<(), ApiError> {
        Ok(())
    }
    async fn decrement_enrolled(&self, _id: i32) -> Result<(), ApiError> {
        Ok(())
    }
    async fn has_available_seats(&self, _id: i32) -> Result<bool, ApiError> {
        Ok(true)
    }
    async fn professors(&self, _course_id: i32) -> Result<Vec<CourseProfessor>, ApiError> {
        Ok(self.professors.clone())
    }
    async fn add_professor(
        &self,
        _course_id: i32,
        _professor_id: i32,
        role: &InstructorRole,
    ) -> Result<(), ApiError> {
        *self.added_role.lock().unwrap() = Some(role.clone());
        Ok(())
    }
    async fn remove_professor(
        &self,
        _course_id: i32,
        _professor_id: i32,
    ) -> Result<bool, ApiError> {
        Ok(self.link_exists)
    }
    async fn update_professor_role(
        &self,
        _course_id: i32,
        _professor_id: i32,
        _role: &InstructorRole,
    ) -> Result<bool, ApiError> {
        Ok(self.link_exists)
    }
    async fn facets(&self) -> Result<CourseFacets, ApiError> {
        Ok(CourseFacets::default())
    }
    async fn stats(&self) -> Result<CourseStats, ApiError> {
        Ok(CourseStats::default())
    }
    async fn roster(&self, _course_id: i32) -> Result<Vec<RosterEntry>, ApiError> {
        Ok(vec![])
    }
}

// ── Professors ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockProfessorRepo {
    pub professor: Option<Professor>,
    pub courses: Vec<TaughtCourse>,
}

impl MockProfessorRepo {
    pub fn with(professor: Professor) -> Self {
        Self {
            professor: Some(professor),
            ..Default::default()
        }
    }
}

impl ProfessorRepository for MockProfessorRepo {
    async fn list(&self, _filter: &ProfessorFilter) -> Result<Vec<Professor>, ApiError> {
        Ok(self.professor.clone().into_iter().collect())
    }
    async fn find_by_id(&self, _id: i32) -> Result<Option<Professor>, ApiError> {
        Ok(self.professor.clone())
    }
    async fn find_by_name(&self, _name: &str) -> Result<Option<Professor>, ApiError> {
        Ok(self.professor.clone())
    }
    async fn create(&self, input: &ProfessorInput) -> Result<Professor, ApiError> {
        Ok(professor(1, &input.name))
    }
    async fn update(&self, id: i32, input: &ProfessorInput) -> Result<Professor, ApiError> {
        Ok(professor(id, &input.name))
    }
    async fn delete(&self, _id: i32) -> Result<(), ApiError> {
        Ok(())
    }
    async fn courses(&self, _professor_id: i32) -> Result<Vec<TaughtCourse>, ApiError> {
        Ok(self.courses.clone())
    }
    async fn stats(&self) -> Result<ProfessorStats, ApiError> {
        Ok(ProfessorStats::default())
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockUserRepo {
    pub user: Option<User>,
    /// Successive results of `find_by_external_id`; `None` once drained.
    pub external_lookups: Mutex<VecDeque<Option<User>>>,
    pub create_conflicts: bool,
    pub created: Mutex<Option<ExternalProfile>>,
    pub last_login_updated: Mutex<Option<i32>>,
    pub alumni: Option<AlumniProfile>,
}

impl MockUserRepo {
    pub fn with(user: User) -> Self {
        Self {
            user: Some(user),
            ..Default::default()
        }
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, _id: i32) -> Result<Option<User>, ApiError> {
        Ok(self.user.clone())
    }
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, ApiError> {
        Ok(self.user.clone())
    }
    async fn find_by_external_id(&self, _external_id: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .external_lookups
            .lock()
            .unwrap()
            .pop_front()
            .flatten())
    }
    async fn create(&self, profile: &ExternalProfile) -> Result<User, ApiError> {
        if self.create_conflicts {
            return Err(ApiError::Duplicate("user already exists".into()));
        }
        *self.created.lock().unwrap() = Some(profile.clone());
        let mut created = user(7, UserType::Current);
        created.external_id = profile.id.clone();
        created.email = profile.email.clone();
        created.name = profile.display_name.clone();
        Ok(created)
    }
    async fn update_last_login(&self, id: i32) -> Result<(), ApiError> {
        *self.last_login_updated.lock().unwrap() = Some(id);
        Ok(())
    }
    async fn list_all(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.user.clone().into_iter().collect())
    }
    async fn update_profile(&self, _id: i32, update: &ProfileUpdate) -> Result<User, ApiError> {
        let mut user = self.user.clone().ok_or(ApiError::UserNotFound)?;
        if let Some(user_type) = update.user_type {
            user.user_type = user_type;
        }
        Ok(user)
    }
    async fn alumni_profile(&self, _user_id: i32) -> Result<Option<AlumniProfile>, ApiError> {
        Ok(self.alumni.clone())
    }
    async fn upsert_alumni_profile(
        &self,
        user_id: i32,
        input: &AlumniProfileInput,
    ) -> Result<AlumniProfile, ApiError> {
        let user = self.user.as_ref().ok_or(ApiError::UserNotFound)?;
        if user.user_type != UserType::Alumni {
            return Err(ApiError::validation("only alumni can have an alumni profile"));
        }
        Ok(AlumniProfile {
            user_id,
            employer: input.employer.clone(),
            title: input.title.clone(),
            industry: input.industry.clone(),
            mentorship_available: input.mentorship_available,
            updated_at: Utc::now(),
        })
    }
    async fn list_alumni(&self, _mentorship_only: bool) -> Result<Vec<AlumniEntry>, ApiError> {
        Ok(vec![])
    }
    async fn stats(&self) -> Result<UserStats, ApiError> {
        Ok(UserStats::default())
    }
}

// ── Reviews ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockReviewRepo {
    pub reviews: Vec<Review>,
    pub created: Mutex<Option<NewReview>>,
}

impl ReviewRepository for MockReviewRepo {
    async fn create(&self, user_id: i32, new: &NewReview) -> Result<Review, ApiError> {
        *self.created.lock().unwrap() = Some(new.clone());
        let mut created = review(1, new.rating, new.difficulty);
        created.user_id = user_id;
        created.course_id = new.course_id;
        created.professor_id = new.professor_id;
        created.would_recommend = new.would_recommend;
        Ok(created)
    }
    async fn list_for_course(&self, _course_id: i32) -> Result<Vec<Review>, ApiError> {
        Ok(self.reviews.clone())
    }
    async fn list_for_user(&self, _user_id: i32) -> Result<Vec<Review>, ApiError> {
        Ok(self.reviews.clone())
    }
    async fn list_for_professor(&self, _professor_id: i32) -> Result<Vec<Review>, ApiError> {
        Ok(self.reviews.clone())
    }
}
