//! Fixtures shared by the view tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use teamattr_core::{
    ActingUser, Attribute, AttributeError, AttributeKind, AttributeOption, AttributeService,
    CreateAttribute, Membership, MembershipRole, OptionList, TeamAttributes, TeamView,
    UpdateAttribute,
};
use teamattr_db::entities::{team, team_member, user};
use teamattr_views::TeamQueryCache;

mock! {
    pub Service {}

    #[async_trait]
    impl AttributeService for Service {
        async fn get_team(&self, actor: &ActingUser, team_id: i32) -> Result<TeamView, AttributeError>;

        async fn list_attributes(
            &self,
            actor: &ActingUser,
            team_id: i32,
        ) -> Result<Vec<Attribute>, AttributeError>;

        async fn create_attribute(
            &self,
            actor: &ActingUser,
            request: CreateAttribute,
        ) -> Result<Attribute, AttributeError>;

        async fn update_attribute(
            &self,
            actor: &ActingUser,
            request: UpdateAttribute,
        ) -> Result<Attribute, AttributeError>;

        async fn delete_attribute(
            &self,
            actor: &ActingUser,
            team_id: i32,
            attribute_id: i32,
        ) -> Result<(), AttributeError>;
    }
}

pub fn skills_attribute() -> Attribute {
    let options = OptionList::parse(vec![AttributeOption::new("a", "Go")])
        .expect("valid options");

    Attribute {
        id: 1,
        team_id: 7,
        name: "Skills".to_string(),
        kind: AttributeKind::SingleSelect(options),
        hidden: false,
        allow_edit: false,
    }
}

/// Team 7 as its admin sees it, holding [`skills_attribute`]
pub fn admin_team_view() -> TeamView {
    TeamView {
        id: 7,
        name: "Engineering".to_string(),
        slug: Some("engineering".to_string()),
        is_private: false,
        membership: Membership {
            role: MembershipRole::Admin,
        },
        members: Vec::new(),
        attributes: vec![skills_attribute()],
        invite_token: None,
    }
}

pub fn mock_cache(service: MockService) -> Arc<TeamQueryCache> {
    Arc::new(TeamQueryCache::new(
        Arc::new(service),
        ActingUser::new(Uuid::new_v4()),
    ))
}

/// Team 7 backed by an in-memory database
pub struct Fixture {
    pub db: DatabaseConnection,
    pub admin: Uuid,
    pub member: Uuid,
}

impl Fixture {
    pub async fn new() -> Self {
        let db = teamattr_db::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");
        teamattr_db::migrate(&db)
            .await
            .expect("Failed to run migrations");

        let fixture = Self {
            admin: insert_user(&db, "admin@example.com").await,
            member: insert_user(&db, "member@example.com").await,
            db,
        };
        fixture.add_team(7, "Engineering", false).await;
        fixture
    }

    /// Team with the fixture's admin as ADMIN and member as MEMBER
    pub async fn add_team(&self, id: i32, name: &str, is_private: bool) {
        team::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            slug: Set(None),
            is_private: Set(is_private),
            is_organization: Set(false),
            parent_id: Set(None),
            invite_token: Set(None),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .expect("Failed to insert team");

        for (user_id, role) in [
            (self.admin, MembershipRole::Admin),
            (self.member, MembershipRole::Member),
        ] {
            team_member::ActiveModel {
                team_id: Set(id),
                user_id: Set(user_id),
                role: Set(role),
                accepted: Set(true),
                joined_at: Set(Utc::now()),
            }
            .insert(&self.db)
            .await
            .expect("Failed to insert membership");
        }
    }

    pub fn service(&self) -> TeamAttributes {
        TeamAttributes::new(self.db.clone())
    }

    pub fn cache_for(&self, user_id: Uuid) -> Arc<TeamQueryCache> {
        Arc::new(TeamQueryCache::new(
            Arc::new(self.service()),
            ActingUser::new(user_id),
        ))
    }
}

async fn insert_user(db: &DatabaseConnection, email: &str) -> Uuid {
    let id = Uuid::new_v4();
    user::ActiveModel {
        id: Set(id),
        email: Set(email.to_string()),
        full_name: Set(None),
        organization_id: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("Failed to insert user");
    id
}
