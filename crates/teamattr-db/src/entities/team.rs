//! Team entity. Organizations are teams with `is_organization` set.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    /// Team ID (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name
    pub name: String,

    /// Team slug (unique, URL-friendly)
    #[sea_orm(unique)]
    pub slug: Option<String>,

    /// Private teams hide their members from non-admins
    pub is_private: bool,

    /// Whether this team is an organization
    pub is_organization: bool,

    /// Organization this team belongs to
    pub parent_id: Option<i32>,

    /// Shareable invite token, only exposed to team admins
    pub invite_token: Option<String>,

    /// When the team was created
    pub created_at: ChronoDateTimeUtc,

    /// When the team was last updated
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Team has members
    #[sea_orm(has_many = "super::team_member::Entity")]
    Members,

    /// Team owns attributes
    #[sea_orm(has_many = "super::attribute::Entity")]
    Attributes,
}

impl Related<super::team_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::attribute::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attributes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
