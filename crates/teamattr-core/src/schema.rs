//! Attribute payload validation
//!
//! Raw input arrives with the type as a string and options as a plain list.
//! [`AttributeInput::validate`] turns it into an [`AttributeDraft`] whose
//! [`AttributeKind`] only carries options for the selection kinds.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use teamattr_db::entities::attribute::{AttributeType, UnknownAttributeType};

/// Longest accepted attribute name, in characters
pub const MAX_NAME_LEN: usize = 255;

/// A payload field failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field (`name`, `type` or `options`)
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// One selectable value of a selection attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeOption {
    pub id: String,
    pub label: String,
}

impl AttributeOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Ordered option list with unique, non-blank ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionList(Vec<AttributeOption>);

impl OptionList {
    pub fn parse(options: Vec<AttributeOption>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(options.len());

        for (index, option) in options.iter().enumerate() {
            if option.id.trim().is_empty() {
                return Err(ValidationError::new(
                    "options",
                    format!("option {} has an empty id", index),
                ));
            }
            if option.label.trim().is_empty() {
                return Err(ValidationError::new(
                    "options",
                    format!("option '{}' has an empty label", option.id),
                ));
            }
            if !seen.insert(option.id.as_str()) {
                return Err(ValidationError::new(
                    "options",
                    format!("duplicate option id '{}'", option.id),
                ));
            }
        }

        Ok(Self(options))
    }

    pub fn as_slice(&self) -> &[AttributeOption] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<AttributeOption> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Attribute type together with the data only some types carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    Text,
    SingleSelect(OptionList),
    MultiSelect(OptionList),
    RelationshipPeople,
    RelationshipTeam,
}

impl AttributeKind {
    /// Build a kind from a type and submitted options.
    ///
    /// Non-selection types must not carry options.
    pub fn new(attribute_type: AttributeType, options: OptionList) -> Result<Self, ValidationError> {
        if !attribute_type.is_selection() && !options.is_empty() {
            return Err(ValidationError::new(
                "options",
                format!("{} attributes do not take options", attribute_type),
            ));
        }

        Ok(Self::from_stored(attribute_type, options))
    }

    /// Build a kind from stored columns, dropping options a non-selection
    /// row should not have.
    pub fn from_stored(attribute_type: AttributeType, options: OptionList) -> Self {
        match attribute_type {
            AttributeType::Text => AttributeKind::Text,
            AttributeType::SingleSelect => AttributeKind::SingleSelect(options),
            AttributeType::MultiSelect => AttributeKind::MultiSelect(options),
            AttributeType::RelationshipPeople => AttributeKind::RelationshipPeople,
            AttributeType::RelationshipTeam => AttributeKind::RelationshipTeam,
        }
    }

    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeKind::Text => AttributeType::Text,
            AttributeKind::SingleSelect(_) => AttributeType::SingleSelect,
            AttributeKind::MultiSelect(_) => AttributeType::MultiSelect,
            AttributeKind::RelationshipPeople => AttributeType::RelationshipPeople,
            AttributeKind::RelationshipTeam => AttributeType::RelationshipTeam,
        }
    }

    /// Options of a selection kind, empty for every other kind
    pub fn options(&self) -> &[AttributeOption] {
        match self {
            AttributeKind::SingleSelect(options) | AttributeKind::MultiSelect(options) => {
                options.as_slice()
            }
            _ => &[],
        }
    }
}

/// Unvalidated create/update payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeInput {
    pub name: String,
    /// Wire name of the type, e.g. `SINGLE_SELECT`
    pub attribute_type: String,
    pub options: Option<Vec<AttributeOption>>,
    pub hidden: Option<bool>,
    pub allow_edit: Option<bool>,
}

impl AttributeInput {
    pub fn new(name: impl Into<String>, attribute_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_type: attribute_type.into(),
            ..Default::default()
        }
    }

    pub fn with_options(mut self, options: Vec<AttributeOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }

    pub fn with_allow_edit(mut self, allow_edit: bool) -> Self {
        self.allow_edit = Some(allow_edit);
        self
    }

    pub fn validate(self) -> Result<AttributeDraft, ValidationError> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new("name", "name must not be empty"));
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::new(
                "name",
                format!("name must be at most {} characters", MAX_NAME_LEN),
            ));
        }

        let attribute_type: AttributeType = self
            .attribute_type
            .parse()
            .map_err(|e: UnknownAttributeType| ValidationError::new("type", e.to_string()))?;

        let options = OptionList::parse(self.options.unwrap_or_default())?;
        let kind = AttributeKind::new(attribute_type, options)?;

        Ok(AttributeDraft {
            name: self.name,
            kind,
            hidden: self.hidden,
            allow_edit: self.allow_edit,
        })
    }

    /// Validate an update payload.
    ///
    /// An update replaces the stored options, so a selection type must
    /// submit its list explicitly. An empty list clears it.
    pub fn validate_update(self) -> Result<AttributeDraft, ValidationError> {
        let options_missing = self.options.is_none();
        let draft = self.validate()?;

        let attribute_type = draft.kind.attribute_type();
        if options_missing && attribute_type.is_selection() {
            return Err(ValidationError::new(
                "options",
                format!("{} attributes must submit their options", attribute_type),
            ));
        }

        Ok(draft)
    }
}

/// Validated payload ready for the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDraft {
    pub name: String,
    pub kind: AttributeKind,
    /// `None` means "default" on create and "unchanged" on update
    pub hidden: Option<bool>,
    pub allow_edit: Option<bool>,
}

/// Creation-form normalization: trim and lower-case.
///
/// Applied by the creation dialog only; the server stores names as given.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}
