use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use teamattr_core as domain;

/// Kind of value an attribute holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeType {
    /// Free text
    Text,
    /// Exactly one value from the option list
    SingleSelect,
    /// Any number of values from the option list
    MultiSelect,
    /// Reference to people
    RelationshipPeople,
    /// Reference to teams
    RelationshipTeam,
}

impl From<domain::AttributeType> for AttributeType {
    fn from(ty: domain::AttributeType) -> Self {
        match ty {
            domain::AttributeType::Text => AttributeType::Text,
            domain::AttributeType::SingleSelect => AttributeType::SingleSelect,
            domain::AttributeType::MultiSelect => AttributeType::MultiSelect,
            domain::AttributeType::RelationshipPeople => AttributeType::RelationshipPeople,
            domain::AttributeType::RelationshipTeam => AttributeType::RelationshipTeam,
        }
    }
}

/// Selectable value of a selection attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttributeOption {
    /// Stable option identifier
    pub id: String,
    /// Display label
    pub label: String,
}

impl From<&domain::AttributeOption> for AttributeOption {
    fn from(option: &domain::AttributeOption) -> Self {
        Self {
            id: option.id.clone(),
            label: option.label.clone(),
        }
    }
}

impl From<AttributeOption> for domain::AttributeOption {
    fn from(option: AttributeOption) -> Self {
        domain::AttributeOption::new(option.id, option.label)
    }
}

/// Team attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Attribute {
    /// Attribute ID
    pub id: i32,
    /// Owning team
    pub team_id: i32,
    /// Display name
    pub name: String,
    /// Attribute type
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    /// Options, empty unless the type is a selection kind
    pub options: Vec<AttributeOption>,
    /// Hidden from non-admin views
    pub hidden: bool,
    /// Members may edit their own value
    pub allow_edit: bool,
}

impl From<&domain::Attribute> for Attribute {
    fn from(attribute: &domain::Attribute) -> Self {
        Self {
            id: attribute.id,
            team_id: attribute.team_id,
            name: attribute.name.clone(),
            attribute_type: attribute.attribute_type().into(),
            options: attribute.options().iter().map(Into::into).collect(),
            hidden: attribute.hidden,
            allow_edit: attribute.allow_edit,
        }
    }
}

/// List of attributes of one team
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttributeList {
    /// Attributes in creation order
    pub attributes: Vec<Attribute>,
    /// Total count
    pub total: usize,
}

/// Request to create an attribute
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAttributeRequest {
    /// Display name
    pub name: String,
    /// One of TEXT, SINGLE_SELECT, MULTI_SELECT, RELATIONSHIP_PEOPLE, RELATIONSHIP_TEAM
    #[serde(rename = "type")]
    pub attribute_type: String,
    /// Options for selection types
    #[serde(default)]
    pub options: Option<Vec<AttributeOption>>,
    /// Defaults to false
    #[serde(default)]
    pub hidden: Option<bool>,
    /// Defaults to false
    #[serde(default)]
    pub allow_edit: Option<bool>,
}

impl From<CreateAttributeRequest> for domain::AttributeInput {
    fn from(req: CreateAttributeRequest) -> Self {
        domain::AttributeInput {
            name: req.name,
            attribute_type: req.attribute_type,
            options: req
                .options
                .map(|options| options.into_iter().map(Into::into).collect()),
            hidden: req.hidden,
            allow_edit: req.allow_edit,
        }
    }
}

/// Request to replace an attribute
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateAttributeRequest {
    /// Display name
    pub name: String,
    /// New attribute type
    #[serde(rename = "type")]
    pub attribute_type: String,
    /// Replaces the stored options; required for selection types
    #[serde(default)]
    pub options: Option<Vec<AttributeOption>>,
    /// Keeps the stored value when omitted
    #[serde(default)]
    pub hidden: Option<bool>,
    /// Keeps the stored value when omitted
    #[serde(default)]
    pub allow_edit: Option<bool>,
}

impl From<UpdateAttributeRequest> for domain::AttributeInput {
    fn from(req: UpdateAttributeRequest) -> Self {
        domain::AttributeInput {
            name: req.name,
            attribute_type: req.attribute_type,
            options: req
                .options
                .map(|options| options.into_iter().map(Into::into).collect()),
            hidden: req.hidden,
            allow_edit: req.allow_edit,
        }
    }
}

/// Role within a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipRole {
    Owner,
    Admin,
    Member,
}

impl From<domain::MembershipRole> for MembershipRole {
    fn from(role: domain::MembershipRole) -> Self {
        match role {
            domain::MembershipRole::Owner => MembershipRole::Owner,
            domain::MembershipRole::Admin => MembershipRole::Admin,
            domain::MembershipRole::Member => MembershipRole::Member,
        }
    }
}

/// The caller's standing in the team
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Membership {
    /// Organization admins without a membership appear as ADMIN
    pub role: MembershipRole,
}

/// Team member information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamMember {
    /// User ID
    pub user_id: Uuid,
    /// User email
    pub email: String,
    /// Full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Role in team
    pub role: MembershipRole,
    /// Whether the invite was accepted
    pub accepted: bool,
    /// Join timestamp
    pub joined_at: DateTime<Utc>,
}

impl From<&domain::TeamMemberView> for TeamMember {
    fn from(member: &domain::TeamMemberView) -> Self {
        Self {
            user_id: member.user_id,
            email: member.email.clone(),
            full_name: member.full_name.clone(),
            role: member.role.into(),
            accepted: member.accepted,
            joined_at: member.joined_at,
        }
    }
}

/// Team with its attributes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Team {
    /// Team ID
    pub id: i32,
    /// Team name
    pub name: String,
    /// URL slug
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Private teams hide their members from non-admins
    pub is_private: bool,
    /// The caller's membership
    pub membership: Membership,
    /// Team members
    pub members: Vec<TeamMember>,
    /// Team attributes in creation order
    pub attributes: Vec<Attribute>,
    /// Invite token, admins only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_token: Option<String>,
}

impl From<&domain::TeamView> for Team {
    fn from(team: &domain::TeamView) -> Self {
        Self {
            id: team.id,
            name: team.name.clone(),
            slug: team.slug.clone(),
            is_private: team.is_private,
            membership: Membership {
                role: team.membership.role.into(),
            },
            members: team.members.iter().map(Into::into).collect(),
            attributes: team.attributes.iter().map(Into::into).collect(),
            invite_token: team.invite_token.clone(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Offending field of a validation error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: Some(code.to_string()),
            field: None,
        }
    }
}
