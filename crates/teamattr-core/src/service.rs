//! Remote operations on team attributes
//!
//! [`AttributeService`] is the seam the API handlers and the presentation
//! layer talk to. [`TeamAttributes`] implements it on top of the database:
//! every mutation is one authorization check followed by one row write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;
use uuid::Uuid;

use teamattr_db::entities::{team, team_member, team_member::MembershipRole, user};

use crate::authz::{ensure_can_manage, ActingUser, DbMembershipLookup, MembershipLookup};
use crate::error::AttributeError;
use crate::schema::AttributeInput;
use crate::store::{Attribute, AttributeStore};

/// `createAttribute` payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAttribute {
    pub team_id: i32,
    pub input: AttributeInput,
}

/// `updateAttribute` payload; the input replaces every field it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAttribute {
    pub team_id: i32,
    pub attribute_id: i32,
    pub input: AttributeInput,
}

/// The acting user's standing in a team
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership {
    pub role: MembershipRole,
}

impl Membership {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMemberView {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: MembershipRole,
    pub accepted: bool,
    pub joined_at: DateTime<Utc>,
}

/// Team aggregate as seen by one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamView {
    pub id: i32,
    pub name: String,
    pub slug: Option<String>,
    pub is_private: bool,
    pub membership: Membership,
    /// Empty for non-admins of private teams
    pub members: Vec<TeamMemberView>,
    pub attributes: Vec<Attribute>,
    /// Only present for admins
    pub invite_token: Option<String>,
}

impl TeamView {
    pub fn attribute(&self, attribute_id: i32) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id == attribute_id)
    }
}

#[async_trait]
pub trait AttributeService: Send + Sync {
    /// `getTeam`: the team aggregate including its attributes
    async fn get_team(&self, actor: &ActingUser, team_id: i32) -> Result<TeamView, AttributeError>;

    /// Attributes of a team in insertion order
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

/// Database-backed [`AttributeService`]
#[derive(Clone)]
pub struct TeamAttributes {
    db: DatabaseConnection,
    store: AttributeStore,
    memberships: DbMembershipLookup,
}

impl TeamAttributes {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            store: AttributeStore::new(db.clone()),
            memberships: DbMembershipLookup::new(db.clone()),
            db,
        }
    }

    pub fn store(&self) -> &AttributeStore {
        &self.store
    }

    /// Role the actor sees the team with. Org admins without a membership
    /// read as ADMIN; everyone else outside the team gets `NotFound`.
    async fn viewer_membership(
        &self,
        actor: &ActingUser,
        team_id: i32,
    ) -> Result<Membership, AttributeError> {
        match self.memberships.role_for(actor.id, team_id).await? {
            Some(role) => Ok(Membership { role }),
            None if actor.is_org_admin() => Ok(Membership {
                role: MembershipRole::Admin,
            }),
            None => Err(AttributeError::team_not_found(team_id)),
        }
    }

    async fn members_of(&self, team_id: i32) -> Result<Vec<TeamMemberView>, AttributeError> {
        let rows = team_member::Entity::find()
            .filter(team_member::Column::TeamId.eq(team_id))
            .order_by_asc(team_member::Column::JoinedAt)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(membership, user)| {
                user.map(|user| TeamMemberView {
                    user_id: user.id,
                    email: user.email,
                    full_name: user.full_name,
                    role: membership.role,
                    accepted: membership.accepted,
                    joined_at: membership.joined_at,
                })
            })
            .collect())
    }
}

#[async_trait]
impl AttributeService for TeamAttributes {
    async fn get_team(&self, actor: &ActingUser, team_id: i32) -> Result<TeamView, AttributeError> {
        debug!("Fetching team {} for user {}", team_id, actor.id);

        let team = team::Entity::find_by_id(team_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AttributeError::team_not_found(team_id))?;

        let membership = self.viewer_membership(actor, team_id).await?;
        let is_admin = membership.is_admin();

        let members = if team.is_private && !is_admin {
            Vec::new()
        } else {
            self.members_of(team_id).await?
        };

        Ok(TeamView {
            id: team.id,
            name: team.name,
            slug: team.slug,
            is_private: team.is_private,
            membership,
            members,
            attributes: self.store.list(team_id).await?,
            invite_token: if is_admin { team.invite_token } else { None },
        })
    }

    async fn list_attributes(
        &self,
        actor: &ActingUser,
        team_id: i32,
    ) -> Result<Vec<Attribute>, AttributeError> {
        if team::Entity::find_by_id(team_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(AttributeError::team_not_found(team_id));
        }
        self.viewer_membership(actor, team_id).await?;

        self.store.list(team_id).await
    }

    async fn create_attribute(
        &self,
        actor: &ActingUser,
        request: CreateAttribute,
    ) -> Result<Attribute, AttributeError> {
        ensure_can_manage(&self.memberships, actor, request.team_id).await?;
        let draft = request.input.validate()?;

        self.store.insert(request.team_id, draft).await
    }

    async fn update_attribute(
        &self,
        actor: &ActingUser,
        request: UpdateAttribute,
    ) -> Result<Attribute, AttributeError> {
        ensure_can_manage(&self.memberships, actor, request.team_id).await?;
        let draft = request.input.validate_update()?;

        self.store
            .replace(request.team_id, request.attribute_id, draft)
            .await
    }

    async fn delete_attribute(
        &self,
        actor: &ActingUser,
        team_id: i32,
        attribute_id: i32,
    ) -> Result<(), AttributeError> {
        ensure_can_manage(&self.memberships, actor, team_id).await?;

        self.store.remove(team_id, attribute_id).await
    }
}
