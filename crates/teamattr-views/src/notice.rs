//! Transient messages and navigation requests emitted by the views

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A toast-style message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Where a view asks the shell to go next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The settings page listing the user's teams
    TeamList,
    /// Attribute list of one team
    AttributeList { team_id: i32 },
}

impl Navigation {
    pub fn path(&self) -> String {
        match self {
            Navigation::TeamList => "/settings/teams".to_string(),
            Navigation::AttributeList { team_id } => {
                format!("/settings/teams/{}/attributes", team_id)
            }
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
