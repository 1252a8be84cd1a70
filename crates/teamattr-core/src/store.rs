//! Attribute persistence: one row per attribute, keyed by `(team_id, id)`
//!
//! The store does not authorize; callers go through the service.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use tracing::{debug, info};

use teamattr_db::entities::{attribute, attribute::AttributeType, team};

use crate::error::AttributeError;
use crate::schema::{AttributeDraft, AttributeKind, AttributeOption, OptionList};

/// Stored attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub id: i32,
    pub team_id: i32,
    pub name: String,
    pub kind: AttributeKind,
    pub hidden: bool,
    pub allow_edit: bool,
}

impl Attribute {
    pub fn attribute_type(&self) -> AttributeType {
        self.kind.attribute_type()
    }

    pub fn options(&self) -> &[AttributeOption] {
        self.kind.options()
    }
}

impl TryFrom<attribute::Model> for Attribute {
    type Error = AttributeError;

    fn try_from(model: attribute::Model) -> Result<Self, Self::Error> {
        let options: Vec<AttributeOption> =
            serde_json::from_str(&model.options).map_err(|e| AttributeError::Corrupt {
                id: model.id,
                reason: e.to_string(),
            })?;
        let options = OptionList::parse(options).map_err(|e| AttributeError::Corrupt {
            id: model.id,
            reason: e.to_string(),
        })?;

        Ok(Attribute {
            id: model.id,
            team_id: model.team_id,
            name: model.name,
            kind: AttributeKind::from_stored(model.attribute_type, options),
            hidden: model.hidden,
            allow_edit: model.allow_edit,
        })
    }
}

fn encode_options(kind: &AttributeKind) -> Result<String, AttributeError> {
    Ok(serde_json::to_string(kind.options())?)
}

/// Attribute rows of every team
#[derive(Clone)]
pub struct AttributeStore {
    db: DatabaseConnection,
}

/// A row deleted between the read and the write surfaces as not found
fn update_error(err: DbErr, attribute_id: i32) -> AttributeError {
    match err {
        DbErr::RecordNotUpdated => AttributeError::attribute_not_found(attribute_id),
        other => AttributeError::Database(other),
    }
}

impl AttributeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new attribute for an existing team
    pub async fn insert(
        &self,
        team_id: i32,
        draft: AttributeDraft,
    ) -> Result<Attribute, AttributeError> {
        if team::Entity::find_by_id(team_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(AttributeError::team_not_found(team_id));
        }

        let now = Utc::now();
        let row = attribute::ActiveModel {
            team_id: Set(team_id),
            name: Set(draft.name),
            attribute_type: Set(draft.kind.attribute_type()),
            options: Set(encode_options(&draft.kind)?),
            hidden: Set(draft.hidden.unwrap_or(false)),
            allow_edit: Set(draft.allow_edit.unwrap_or(false)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(
            "Created attribute {} ({}) on team {}",
            row.id, row.attribute_type, team_id
        );

        Attribute::try_from(row)
    }

    /// Replace name, type and options. Flags left as `None` keep their
    /// stored value.
    pub async fn replace(
        &self,
        team_id: i32,
        attribute_id: i32,
        draft: AttributeDraft,
    ) -> Result<Attribute, AttributeError> {
        let existing = self
            .find_row(team_id, attribute_id)
            .await?
            .ok_or_else(|| AttributeError::attribute_not_found(attribute_id))?;

        let mut active: attribute::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.attribute_type = Set(draft.kind.attribute_type());
        active.options = Set(encode_options(&draft.kind)?);
        if let Some(hidden) = draft.hidden {
            active.hidden = Set(hidden);
        }
        if let Some(allow_edit) = draft.allow_edit {
            active.allow_edit = Set(allow_edit);
        }
        active.updated_at = Set(Utc::now());

        let row = active
            .update(&self.db)
            .await
            .map_err(|e| update_error(e, attribute_id))?;
        info!("Updated attribute {} on team {}", attribute_id, team_id);

        Attribute::try_from(row)
    }

    pub async fn remove(&self, team_id: i32, attribute_id: i32) -> Result<(), AttributeError> {
        let result = attribute::Entity::delete_many()
            .filter(attribute::Column::TeamId.eq(team_id))
            .filter(attribute::Column::Id.eq(attribute_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AttributeError::attribute_not_found(attribute_id));
        }

        info!("Deleted attribute {} from team {}", attribute_id, team_id);
        Ok(())
    }

    pub async fn find(
        &self,
        team_id: i32,
        attribute_id: i32,
    ) -> Result<Option<Attribute>, AttributeError> {
        self.find_row(team_id, attribute_id)
            .await?
            .map(Attribute::try_from)
            .transpose()
    }

    /// Attributes of a team in insertion order
    pub async fn list(&self, team_id: i32) -> Result<Vec<Attribute>, AttributeError> {
        debug!("Listing attributes of team {}", team_id);

        attribute::Entity::find()
            .filter(attribute::Column::TeamId.eq(team_id))
            .order_by_asc(attribute::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Attribute::try_from)
            .collect()
    }

    async fn find_row(
        &self,
        team_id: i32,
        attribute_id: i32,
    ) -> Result<Option<attribute::Model>, AttributeError> {
        Ok(attribute::Entity::find_by_id(attribute_id)
            .filter(attribute::Column::TeamId.eq(team_id))
            .one(&self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vanished_row_is_not_found() {
        let err = update_error(DbErr::RecordNotUpdated, 42);
        assert!(err.is_not_found());
    }

    #[test]
    fn test_other_update_errors_stay_database_errors() {
        let err = update_error(DbErr::Custom("disk full".to_string()), 42);
        assert!(matches!(err, AttributeError::Database(_)));
    }
}
