use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, FromQueryResult, IntoActiveModel as _, QueryFilter, QueryOrder, Statement,
    TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use tracing::info;

use degreedash_api_schema::{alumni_directory, alumni_profiles, users};
use degreedash_domain::user::UserType;

use super::user_type_from_str;
use crate::domain::repository::UserRepository;
use crate::domain::types::{
    AlumniEntry, AlumniProfile, AlumniProfileInput, ExternalProfile, ProfileUpdate, User,
    UserStats,
};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::ExternalId.eq(external_id))
            .one(&self.db)
            .await
            .context("find user by external id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, profile: &ExternalProfile) -> Result<User, ApiError> {
        let now = Utc::now();
        let model = users::ActiveModel {
            external_id: Set(profile.id.clone()),
            email: Set(profile.email.clone()),
            name: Set(profile.display_name.clone()),
            avatar_url: Set(profile.avatar_url.clone()),
            user_type: Set(UserType::Current.to_string()),
            graduation_year: Set(None),
            major: Set(None),
            created_at: Set(now),
            last_login: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| ApiError::from_write(e, "insert user", "user already exists"))?;
        info!(user_id = model.id, "user created");
        Ok(user_from_model(model))
    }

    async fn update_last_login(&self, id: i32) -> Result<(), ApiError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::LastLogin, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update last login")?;
        if result.rows_affected == 0 {
            return Err(ApiError::UserNotFound);
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, ApiError> {
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .order_by_desc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn update_profile(&self, id: i32, update: &ProfileUpdate) -> Result<User, ApiError> {
        let model = self
            .db
            .transaction::<_, users::Model, ApiError>(|txn| {
                let update = update.clone();
                Box::pin(async move {
                    let existing = users::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .context("find user for profile update")?
                        .ok_or(ApiError::UserNotFound)?;
                    let mut am = existing.into_active_model();
                    if let Some(user_type) = update.user_type {
                        am.user_type = Set(user_type.to_string());
                    }
                    if let Some(year) = update.graduation_year {
                        am.graduation_year = Set(Some(year));
                    }
                    if let Some(major) = update.major {
                        am.major = Set(Some(major));
                    }
                    let user = am.update(txn).await.context("update user profile")?;

                    // Alumni profiles exist only for alumni.
                    if update.user_type == Some(UserType::Current) {
                        alumni_profiles::Entity::delete_many()
                            .filter(alumni_profiles::Column::UserId.eq(id))
                            .exec(txn)
                            .await
                            .context("delete alumni profile")?;
                    }
                    Ok(user)
                })
            })
            .await
            .map_err(ApiError::from_txn)?;
        info!(user_id = id, user_type = %model.user_type, "user profile updated");
        Ok(user_from_model(model))
    }

    async fn alumni_profile(&self, user_id: i32) -> Result<Option<AlumniProfile>, ApiError> {
        let model = alumni_profiles::Entity::find()
            .filter(alumni_profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find alumni profile")?;
        Ok(model.map(alumni_profile_from_model))
    }

    async fn upsert_alumni_profile(
        &self,
        user_id: i32,
        input: &AlumniProfileInput,
    ) -> Result<AlumniProfile, ApiError> {
        let model = self
            .db
            .transaction::<_, alumni_profiles::Model, ApiError>(|txn| {
                let input = input.clone();
                Box::pin(async move {
                    // Checked under the same transaction as the write so a
                    // concurrent switch back to `current` cannot slip in between.
                    let user = users::Entity::find_by_id(user_id)
                        .one(txn)
                        .await
                        .context("find user for alumni profile")?
                        .ok_or(ApiError::UserNotFound)?;
                    if user_type_from_str(&user.user_type) != UserType::Alumni {
                        return Err(ApiError::validation(
                            "only alumni can have an alumni profile",
                        ));
                    }

                    let profile = alumni_profiles::ActiveModel {
                        user_id: Set(user_id),
                        employer: Set(input.employer),
                        title: Set(input.title),
                        industry: Set(input.industry),
                        mentorship_available: Set(input.mentorship_available),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    };
                    alumni_profiles::Entity::insert(profile)
                        .on_conflict(
                            OnConflict::column(alumni_profiles::Column::UserId)
                                .update_columns([
                                    alumni_profiles::Column::Employer,
                                    alumni_profiles::Column::Title,
                                    alumni_profiles::Column::Industry,
                                    alumni_profiles::Column::MentorshipAvailable,
                                    alumni_profiles::Column::UpdatedAt,
                                ])
                                .to_owned(),
                        )
                        .exec_without_returning(txn)
                        .await
                        .map_err(|e| {
                            ApiError::from_write(e, "upsert alumni profile", "duplicate profile")
                        })?;

                    alumni_profiles::Entity::find()
                        .filter(alumni_profiles::Column::UserId.eq(user_id))
                        .one(txn)
                        .await
                        .context("read saved alumni profile")?
                        .ok_or(ApiError::AlumniProfileNotFound)
                })
            })
            .await
            .map_err(ApiError::from_txn)?;
        info!(user_id, "alumni profile saved");
        Ok(alumni_profile_from_model(model))
    }

    async fn list_alumni(&self, mentorship_only: bool) -> Result<Vec<AlumniEntry>, ApiError> {
        let mut query = alumni_directory::Entity::find();
        if mentorship_only {
            query = query.filter(alumni_directory::Column::MentorshipAvailable.eq(true));
        }
        let models = query
            .order_by_asc(alumni_directory::Column::Name)
            .order_by_asc(alumni_directory::Column::UserId)
            .all(&self.db)
            .await
            .context("list alumni")?;
        Ok(models
            .into_iter()
            .map(|m| AlumniEntry {
                user_id: m.user_id,
                name: m.name,
                email: m.email,
                avatar_url: m.avatar_url,
                graduation_year: m.graduation_year,
                major: m.major,
                employer: m.employer,
                title: m.title,
                industry: m.industry,
                mentorship_available: m.mentorship_available,
            })
            .collect())
    }

    async fn stats(&self) -> Result<UserStats, ApiError> {
        let row = UserStatsRow::find_by_statement(Statement::from_string(
            self.db.get_database_backend(),
            "SELECT * FROM user_stats",
        ))
        .one(&self.db)
        .await
        .context("user stats")?
        .unwrap_or_default();
        Ok(UserStats {
            total_users: row.total_users,
            current_students: row.current_students,
            alumni: row.alumni,
            mentors_available: row.mentors_available,
            total_enrollments: row.total_enrollments,
            total_reviews: row.total_reviews,
        })
    }
}

#[derive(Debug, Default, FromQueryResult)]
struct UserStatsRow {
    total_users: i64,
    current_students: i64,
    alumni: i64,
    mentors_available: i64,
    total_enrollments: i64,
    total_reviews: i64,
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        external_id: model.external_id,
        email: model.email,
        name: model.name,
        avatar_url: model.avatar_url,
        user_type: user_type_from_str(&model.user_type),
        graduation_year: model.graduation_year,
        major: model.major,
        created_at: model.created_at,
        last_login: model.last_login,
    }
}

fn alumni_profile_from_model(model: alumni_profiles::Model) -> AlumniProfile {
    AlumniProfile {
        user_id: model.user_id,
        employer: model.employer,
        title: model.title,
        industry: model.industry,
        mentorship_available: model.mentorship_available,
        updated_at: model.updated_at,
    }
}
