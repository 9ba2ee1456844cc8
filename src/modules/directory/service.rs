use chrono::NaiveDateTime;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::CallerContext;
use crate::db::models::{NewSchool, NewUser, School, User};
use crate::db::repositories::{SchoolRepository, UserRepository};
use crate::db::DocumentStore;
use crate::error::{AppError, AppResult};
use crate::modules::non_blank;

pub async fn create_school(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    input: NewSchool,
    now: NaiveDateTime,
) -> AppResult<School> {
    caller.require_admin()?;
    input.validate()?;

    let school = School {
        id: Uuid::new_v4(),
        name: input.name.trim().to_string(),
        city: non_blank(input.city.as_deref()).map(str::to_string),
        created_at: now,
    };
    SchoolRepository::create_school(store, &school).await?;

    info!(school_id = %school.id, "School created");
    Ok(school)
}

/// Alphabetical by name.
pub async fn list_schools(store: &dyn DocumentStore) -> AppResult<Vec<School>> {
    let mut schools = SchoolRepository::list_all(store).await?;
    schools.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(schools)
}

/// Registers a user record. Credentials are issued elsewhere.
pub async fn create_user(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    input: NewUser,
    now: NaiveDateTime,
) -> AppResult<User> {
    caller.require_admin()?;
    input.validate()?;

    let email = input.email.trim().to_lowercase();
    if UserRepository::get_user_by_email(store, &email).await?.is_some() {
        return Err(AppError::BadRequest(
            "A user with this email already exists".to_string(),
        ));
    }
    if let Some(school_id) = input.school_id {
        if SchoolRepository::get_school_by_id(store, school_id).await?.is_none() {
            return Err(AppError::NotFound("School not found".to_string()));
        }
    }

    let user = User {
        id: Uuid::new_v4(),
        name: input.name.trim().to_string(),
        email,
        role: input.role,
        school_id: input.school_id,
        created_at: now,
    };
    UserRepository::create_user(store, &user).await?;

    info!(user_id = %user.id, role = user.role.as_str(), "User created");
    Ok(user)
}

pub async fn list_users(store: &dyn DocumentStore, caller: &CallerContext) -> AppResult<Vec<User>> {
    caller.require_admin()?;
    let mut users = UserRepository::list_all(store).await?;
    users.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(users)
}
