//! User entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User UUID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// User email (unique)
    #[sea_orm(unique)]
    pub email: String,

    /// User's full name (optional)
    pub full_name: Option<String>,

    /// Organization (team with `is_organization`) the user belongs to
    pub organization_id: Option<i32>,

    /// When the user account was created
    pub created_at: ChronoDateTimeUtc,

    /// When the user last updated their profile
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// User belongs to an organization
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::OrganizationId",
        to = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Organization,

    /// User is a member of teams
    #[sea_orm(has_many = "super::team_member::Entity")]
    TeamMemberships,
}

impl Related<super::team_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMemberships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
