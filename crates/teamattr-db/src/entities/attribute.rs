//! Attribute entity: a custom field owned by a team

use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of value an attribute holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeType {
    /// Free text
    #[sea_orm(string_value = "TEXT")]
    Text,

    /// Exactly one value from the option list
    #[sea_orm(string_value = "SINGLE_SELECT")]
    SingleSelect,

    /// Any number of values from the option list
    #[sea_orm(string_value = "MULTI_SELECT")]
    MultiSelect,

    /// Reference to people
    #[sea_orm(string_value = "RELATIONSHIP_PEOPLE")]
    RelationshipPeople,

    /// Reference to teams
    #[sea_orm(string_value = "RELATIONSHIP_TEAM")]
    RelationshipTeam,
}

impl AttributeType {
    pub const ALL: [AttributeType; 5] = [
        AttributeType::Text,
        AttributeType::SingleSelect,
        AttributeType::MultiSelect,
        AttributeType::RelationshipPeople,
        AttributeType::RelationshipTeam,
    ];

    /// Wire name, e.g. `SINGLE_SELECT`
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Text => "TEXT",
            AttributeType::SingleSelect => "SINGLE_SELECT",
            AttributeType::MultiSelect => "MULTI_SELECT",
            AttributeType::RelationshipPeople => "RELATIONSHIP_PEOPLE",
            AttributeType::RelationshipTeam => "RELATIONSHIP_TEAM",
        }
    }

    /// Selection kinds are the only ones carrying options
    pub fn is_selection(&self) -> bool {
        matches!(self, AttributeType::SingleSelect | AttributeType::MultiSelect)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the five wire names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown attribute type '{0}'")]
pub struct UnknownAttributeType(pub String);

impl FromStr for AttributeType {
    type Err = UnknownAttributeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttributeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownAttributeType(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attributes")]
pub struct Model {
    /// Attribute ID (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning team
    pub team_id: i32,

    /// Label shown on profiles
    pub name: String,

    pub attribute_type: AttributeType,

    /// Options as a JSON array of `{"id", "label"}` objects
    #[sea_orm(column_type = "Text")]
    pub options: String,

    /// Hidden from profile display
    pub hidden: bool,

    /// Whether members may edit their own value
    pub allow_edit: bool,

    pub created_at: ChronoDateTimeUtc,

    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Attribute belongs to a team
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Team,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_type_parses_wire_names() {
        for ty in AttributeType::ALL {
            assert_eq!(ty.as_str().parse::<AttributeType>(), Ok(ty));
        }
    }

    #[test]
    fn test_attribute_type_rejects_unknown() {
        assert!("BOOLEAN".parse::<AttributeType>().is_err());
        assert!("text".parse::<AttributeType>().is_err());

        let err = "EMOJI".parse::<AttributeType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown attribute type 'EMOJI'");
    }

    #[test]
    fn test_only_select_kinds_are_selection() {
        let selection: Vec<_> = AttributeType::ALL
            .into_iter()
            .filter(AttributeType::is_selection)
            .collect();
        assert_eq!(
            selection,
            vec![AttributeType::SingleSelect, AttributeType::MultiSelect]
        );
    }
}
