//! Who may manage a team's attributes
//!
//! Organization admins may manage every team's attributes. Everyone else
//! needs an accepted OWNER or ADMIN membership on the team itself.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::{debug, warn};
use uuid::Uuid;

use teamattr_db::entities::{team_member, team_member::MembershipRole, user};

use crate::error::AttributeError;

/// Organization the acting user belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrganizationContext {
    pub id: i32,
    pub is_org_admin: bool,
}

/// User performing an operation, as resolved from the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingUser {
    pub id: Uuid,
    pub organization: Option<OrganizationContext>,
}

impl ActingUser {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            organization: None,
        }
    }

    pub fn with_organization(mut self, id: i32, is_org_admin: bool) -> Self {
        self.organization = Some(OrganizationContext { id, is_org_admin });
        self
    }

    pub fn is_org_admin(&self) -> bool {
        self.organization.is_some_and(|org| org.is_org_admin)
    }
}

/// Read access to team memberships
#[async_trait]
pub trait MembershipLookup: Send + Sync {
    /// Role of an accepted membership, `None` when the user is not a member
    async fn role_for(
        &self,
        user_id: Uuid,
        team_id: i32,
    ) -> Result<Option<MembershipRole>, AttributeError>;
}

/// Membership lookup backed by the `team_members` table
#[derive(Clone)]
pub struct DbMembershipLookup {
    db: DatabaseConnection,
}

impl DbMembershipLookup {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MembershipLookup for DbMembershipLookup {
    async fn role_for(
        &self,
        user_id: Uuid,
        team_id: i32,
    ) -> Result<Option<MembershipRole>, AttributeError> {
        let membership = team_member::Entity::find_by_id((team_id, user_id))
            .one(&self.db)
            .await?;

        Ok(membership.filter(|m| m.accepted).map(|m| m.role))
    }
}

/// Pure authorization rule
pub fn may_manage(is_org_admin: bool, role: Option<MembershipRole>) -> bool {
    is_org_admin || role.is_some_and(|r| r.is_admin())
}

/// Whether `actor` may create, update or delete attributes of `team_id`
pub async fn can_manage_attributes<L>(
    lookup: &L,
    actor: &ActingUser,
    team_id: i32,
) -> Result<bool, AttributeError>
where
    L: MembershipLookup + ?Sized,
{
    if actor.is_org_admin() {
        return Ok(true);
    }

    let role = lookup.role_for(actor.id, team_id).await?;
    Ok(may_manage(false, role))
}

/// Fails with `Unauthorized` unless [`can_manage_attributes`] holds
pub async fn ensure_can_manage<L>(
    lookup: &L,
    actor: &ActingUser,
    team_id: i32,
) -> Result<(), AttributeError>
where
    L: MembershipLookup + ?Sized,
{
    if can_manage_attributes(lookup, actor, team_id).await? {
        Ok(())
    } else {
        warn!(
            "User {} denied attribute management on team {}",
            actor.id, team_id
        );
        Err(AttributeError::Unauthorized)
    }
}

/// Load the session user and work out whether they administer their
/// organization
pub async fn resolve_acting_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<ActingUser, AttributeError> {
    let user = user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(AttributeError::Unauthenticated(user_id))?;

    let mut actor = ActingUser::new(user.id);

    if let Some(org_id) = user.organization_id {
        let role = DbMembershipLookup::new(db.clone())
            .role_for(user.id, org_id)
            .await?;
        actor = actor.with_organization(org_id, may_manage(false, role));
    }

    debug!(
        "Resolved acting user {} (org admin: {})",
        actor.id,
        actor.is_org_admin()
    );

    Ok(actor)
}
