use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::auth::CallerContext;
use crate::db::models::{School, User, UserRole};
use crate::db::repositories::{SchoolRepository, UserRepository};
use crate::db::InMemoryDocumentStore;

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub struct World {
    pub store: InMemoryDocumentStore,
    pub school: School,
    pub admin: CallerContext,
    pub trainer: CallerContext,
    pub teacher: CallerContext,
}

pub async fn add_school(store: &InMemoryDocumentStore, name: &str) -> School {
    let school = School {
        id: Uuid::new_v4(),
        name: name.to_string(),
        city: Some("Pune".to_string()),
        created_at: ts("2025-01-01T08:00:00"),
    };
    SchoolRepository::create_school(store, &school).await.unwrap();
    school
}

pub async fn add_user(
    store: &InMemoryDocumentStore,
    name: &str,
    role: UserRole,
    school_id: Option<Uuid>,
) -> CallerContext {
    let user = User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@school.test", name.split(' ').next().unwrap_or(name).to_lowercase()),
        role,
        school_id,
        created_at: ts("2025-01-01T08:00:00"),
    };
    UserRepository::create_user(store, &user).await.unwrap();
    CallerContext::from_user(&user)
}

/// One school with an admin, a trainer and a teacher.
pub async fn world() -> World {
    let store = InMemoryDocumentStore::new();
    let school = add_school(&store, "Green Valley School").await;
    let admin = add_user(&store, "Asha Menon", UserRole::Admin, None).await;
    let trainer =
        add_user(&store, "Priya Raman", UserRole::TrainerRobochamps, Some(school.id)).await;
    let teacher = add_user(&store, "Ravi Kulkarni", UserRole::Teacher, Some(school.id)).await;
    World {
        store,
        school,
        admin,
        trainer,
        teacher,
    }
}
