//! Database entities

pub mod attribute;
pub mod team;
pub mod team_member;
pub mod user;

pub use attribute::Entity as Attribute;
pub use team::Entity as Team;
pub use team_member::Entity as TeamMember;
pub use user::Entity as User;

pub mod prelude {
    pub use super::attribute::Entity as Attribute;
    pub use super::team::Entity as Team;
    pub use super::team_member::Entity as TeamMember;
    pub use super::user::Entity as User;
}
