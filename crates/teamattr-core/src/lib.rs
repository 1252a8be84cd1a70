//! Team attributes: validation, authorization and persistence
//!
//! An attribute is a custom field (text, selection or relationship) owned by
//! a team. Mutations go through [`AttributeService`], which checks that the
//! acting user may manage the team's attributes before touching the
//! [`AttributeStore`].

pub mod authz;
pub mod error;
pub mod schema;
pub mod service;
pub mod store;

pub use authz::{
    can_manage_attributes, ensure_can_manage, may_manage, resolve_acting_user, ActingUser,
    DbMembershipLookup, MembershipLookup, OrganizationContext,
};
pub use error::AttributeError;
pub use schema::{
    normalize_name, AttributeDraft, AttributeInput, AttributeKind, AttributeOption, OptionList,
    ValidationError,
};
pub use service::{
    AttributeService, CreateAttribute, Membership, TeamAttributes, TeamMemberView, TeamView,
    UpdateAttribute,
};
pub use store::{Attribute, AttributeStore};
pub use teamattr_db::entities::{attribute::AttributeType, team_member::MembershipRole};
