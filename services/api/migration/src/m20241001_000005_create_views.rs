use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// Correlated subqueries keep the instructor list from fanning out across reviews.
const COURSE_DETAILS: &str = r#"
CREATE VIEW IF NOT EXISTS course_details AS
SELECT
    c.id,
    c.course_code,
    c.course_name,
    c.department,
    c.credits,
    c.description,
    c.prerequisites,
    c.schedule,
    c.semester,
    c.year,
    c.capacity,
    c.enrolled,
    c.created_at,
    c.capacity - c.enrolled AS seats_available,
    (SELECT GROUP_CONCAT(p.name, ', ' ORDER BY
            CASE cp.role
                WHEN 'Primary Instructor' THEN 1
                WHEN 'Instructor' THEN 2
                WHEN 'Teaching Assistant' THEN 3
                ELSE 4
            END,
            p.name)
        FROM course_professors cp
        JOIN professors p ON p.id = cp.professor_id
        WHERE cp.course_id = c.id) AS instructors,
    (SELECT COUNT(*) FROM course_professors cp WHERE cp.course_id = c.id) AS instructor_count,
    (SELECT COUNT(*) FROM reviews r WHERE r.course_id = c.id) AS review_count,
    (SELECT ROUND(AVG(r.rating), 1) FROM reviews r WHERE r.course_id = c.id) AS avg_rating,
    (SELECT ROUND(AVG(r.difficulty), 1) FROM reviews r WHERE r.course_id = c.id) AS avg_difficulty,
    (SELECT ROUND(100.0 * SUM(r.would_recommend) / COUNT(*), 1)
        FROM reviews r WHERE r.course_id = c.id) AS recommend_rate
FROM courses c
"#;

const USER_ENROLLMENTS: &str = r#"
CREATE VIEW IF NOT EXISTS user_enrollments AS
SELECT
    u.id AS user_id,
    u.email,
    u.name,
    c.id AS course_id,
    c.course_code,
    c.course_name,
    c.department,
    e.enrolled_at,
    e.status,
    e.grade
FROM enrollments e
JOIN users u ON u.id = e.user_id
JOIN courses c ON c.id = e.course_id
"#;

const ALUMNI_DIRECTORY: &str = r#"
CREATE VIEW IF NOT EXISTS alumni_directory AS
SELECT
    u.id AS user_id,
    u.name,
    u.email,
    u.avatar_url,
    u.graduation_year,
    u.major,
    ap.employer,
    ap.title,
    ap.industry,
    COALESCE(ap.mentorship_available, 0) AS mentorship_available
FROM users u
LEFT JOIN alumni_profiles ap ON ap.user_id = u.id
WHERE u.user_type = 'alumni'
"#;

const USER_STATS: &str = r#"
CREATE VIEW IF NOT EXISTS user_stats AS
SELECT
    (SELECT COUNT(*) FROM users) AS total_users,
    (SELECT COUNT(*) FROM users WHERE user_type = 'current') AS current_students,
    (SELECT COUNT(*) FROM users WHERE user_type = 'alumni') AS alumni,
    (SELECT COUNT(*) FROM alumni_profiles WHERE mentorship_available = 1) AS mentors_available,
    (SELECT COUNT(*) FROM enrollments) AS total_enrollments,
    (SELECT COUNT(*) FROM reviews) AS total_reviews
"#;

const VIEWS: [&str; 4] = ["course_details", "user_enrollments", "alumni_directory", "user_stats"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for sql in [COURSE_DETAILS, USER_ENROLLMENTS, ALUMNI_DIRECTORY, USER_STATS] {
            db.execute_unprepared(sql).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for view in VIEWS {
            db.execute_unprepared(&format!("DROP VIEW IF EXISTS {view}"))
                .await?;
        }
        Ok(())
    }
}
