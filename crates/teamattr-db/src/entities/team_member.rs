//! TeamMember entity for team membership and roles

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role of a team member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipRole {
    /// Team owner with full access
    #[sea_orm(string_value = "OWNER")]
    Owner,

    /// Team admin with elevated permissions
    #[sea_orm(string_value = "ADMIN")]
    Admin,

    /// Regular team member
    #[sea_orm(string_value = "MEMBER")]
    Member,
}

impl MembershipRole {
    /// Owners and admins administer the team
    pub fn is_admin(&self) -> bool {
        matches!(self, MembershipRole::Owner | MembershipRole::Admin)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_members")]
pub struct Model {
    /// Team ID (composite primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub team_id: i32,

    /// User UUID (composite primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,

    /// Role of the user in this team
    pub role: MembershipRole,

    /// Pending invitations are stored with `accepted = false`
    pub accepted: bool,

    /// When the user joined the team
    pub joined_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Team member belongs to a team
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Team,

    /// Team member belongs to a user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
