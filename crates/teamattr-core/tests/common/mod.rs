//! Shared fixtures: an in-memory database with teams, users and memberships

#![allow(dead_code)]

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use teamattr_db::entities::{team, team_member, team_member::MembershipRole, user};
use uuid::Uuid;

pub async fn setup_test_db() -> DatabaseConnection {
    let db = teamattr_db::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    teamattr_db::migrate(&db)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn insert_team(db: &DatabaseConnection, id: i32, name: &str, is_private: bool) {
    team::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        slug: Set(Some(format!("{}-{}", name.to_lowercase(), id))),
        is_private: Set(is_private),
        is_organization: Set(false),
        parent_id: Set(None),
        invite_token: Set(Some(format!("invite-{}", id))),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("Failed to insert team");
}

pub async fn insert_organization(db: &DatabaseConnection, id: i32, name: &str) {
    team::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        slug: Set(Some(name.to_lowercase())),
        is_private: Set(false),
        is_organization: Set(true),
        parent_id: Set(None),
        invite_token: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("Failed to insert organization");
}

pub async fn insert_user(db: &DatabaseConnection, email: &str, organization_id: Option<i32>) -> Uuid {
    let id = Uuid::new_v4();
    user::ActiveModel {
        id: Set(id),
        email: Set(email.to_string()),
        full_name: Set(None),
        organization_id: Set(organization_id),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("Failed to insert user");
    id
}

pub async fn add_member(
    db: &DatabaseConnection,
    team_id: i32,
    user_id: Uuid,
    role: MembershipRole,
    accepted: bool,
) {
    team_member::ActiveModel {
        team_id: Set(team_id),
        user_id: Set(user_id),
        role: Set(role),
        accepted: Set(accepted),
        joined_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("Failed to insert membership");
}

/// Team 7 with an admin and a plain member
pub struct TeamSeven {
    pub db: DatabaseConnection,
    pub admin: Uuid,
    pub member: Uuid,
}

pub async fn team_seven() -> TeamSeven {
    let db = setup_test_db().await;
    insert_team(&db, 7, "Engineering", false).await;

    let admin = insert_user(&db, "admin@example.com", None).await;
    let member = insert_user(&db, "member@example.com", None).await;
    add_member(&db, 7, admin, MembershipRole::Admin, true).await;
    add_member(&db, 7, member, MembershipRole::Member, true).await;

    TeamSeven { db, admin, member }
}
