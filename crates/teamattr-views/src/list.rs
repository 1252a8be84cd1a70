//! Attribute list page of one team

use std::sync::Arc;

use tracing::{debug, warn};

use teamattr_core::{
    normalize_name, Attribute, AttributeInput, AttributeType, CreateAttribute, TeamView,
    UpdateAttribute,
};

use crate::cache::TeamQueryCache;
use crate::notice::{Navigation, Notice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Loaded(TeamView),
    Error(String),
}

/// "Add attribute" dialog: a name and a type, nothing else
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDialog {
    pub open: bool,
    pub name: String,
    pub attribute_type: AttributeType,
    /// A create request is in flight
    pub pending: bool,
}

impl Default for CreateDialog {
    fn default() -> Self {
        Self {
            open: false,
            name: String::new(),
            attribute_type: AttributeType::Text,
            pending: false,
        }
    }
}

impl CreateDialog {
    /// Names typed into the dialog are trimmed and lower-cased
    pub fn set_name(&mut self, raw: &str) {
        self.name = normalize_name(raw);
    }

    pub fn set_type(&mut self, attribute_type: AttributeType) {
        self.attribute_type = attribute_type;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub struct AttributeListView {
    cache: Arc<TeamQueryCache>,
    team_id: i32,
    state: ListState,
    dialog: CreateDialog,
    notices: Vec<Notice>,
    navigation: Option<Navigation>,
}

impl AttributeListView {
    pub fn new(cache: Arc<TeamQueryCache>, team_id: i32) -> Self {
        Self {
            cache,
            team_id,
            state: ListState::Loading,
            dialog: CreateDialog::default(),
            notices: Vec::new(),
            navigation: None,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn team(&self) -> Option<&TeamView> {
        match &self.state {
            ListState::Loaded(team) => Some(team),
            _ => None,
        }
    }

    /// Fetch the team. A failure redirects to the team list.
    pub async fn load(&mut self) {
        self.state = ListState::Loading;

        match self.cache.get(self.team_id).await {
            Ok(team) => {
                debug!(
                    "Loaded {} attributes for team {}",
                    team.attributes.len(),
                    self.team_id
                );
                self.state = ListState::Loaded(team);
            }
            Err(e) => {
                warn!("Failed to load team {}: {}", self.team_id, e);
                self.state = ListState::Error(e.to_string());
                self.navigation = Some(Navigation::TeamList);
            }
        }
    }

    pub fn is_admin(&self) -> bool {
        self.team().is_some_and(|team| team.membership.is_admin())
    }

    /// Attributes to render. Private teams show nothing to non-admins.
    pub fn visible_attributes(&self) -> &[Attribute] {
        match self.team() {
            Some(team) if !team.is_private || team.membership.is_admin() => &team.attributes,
            _ => &[],
        }
    }

    pub fn dialog(&self) -> &CreateDialog {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut CreateDialog {
        &mut self.dialog
    }

    /// Only admins of a loaded team get the dialog
    pub fn open_create_dialog(&mut self) -> bool {
        if !self.is_admin() {
            return false;
        }
        self.dialog.open = true;
        true
    }

    pub fn close_create_dialog(&mut self) {
        self.dialog.reset();
    }

    pub async fn submit_create(&mut self) {
        if !self.dialog.open || self.dialog.pending {
            return;
        }
        self.dialog.pending = true;

        let request = CreateAttribute {
            team_id: self.team_id,
            input: AttributeInput::new(
                self.dialog.name.clone(),
                self.dialog.attribute_type.as_str(),
            ),
        };

        let result = self
            .cache
            .service()
            .create_attribute(self.cache.actor(), request)
            .await;

        match result {
            Ok(attribute) => {
                self.cache.invalidate(self.team_id).await;
                self.load().await;
                self.dialog.reset();
                self.notices
                    .push(Notice::success(format!("Attribute '{}' created", attribute.name)));
            }
            Err(e) => {
                self.dialog.pending = false;
                self.notices.push(Notice::error(e.to_string()));
            }
        }
    }

    /// Flip the `hidden` flag of one attribute, keeping everything else
    pub async fn toggle_hidden(&mut self, attribute_id: i32) {
        let Some(attribute) = self
            .team()
            .and_then(|team| team.attribute(attribute_id))
            .cloned()
        else {
            return;
        };

        let input = AttributeInput::new(attribute.name.clone(), attribute.attribute_type().as_str())
            .with_hidden(!attribute.hidden);
        let input = if attribute.attribute_type().is_selection() {
            input.with_options(attribute.options().to_vec())
        } else {
            input
        };

        let request = UpdateAttribute {
            team_id: self.team_id,
            attribute_id,
            input,
        };

        let result = self
            .cache
            .service()
            .update_attribute(self.cache.actor(), request)
            .await;

        match result {
            Ok(updated) => {
                self.cache.invalidate(self.team_id).await;
                self.load().await;
                let message = if updated.hidden {
                    "Attribute hidden"
                } else {
                    "Attribute visible"
                };
                self.notices.push(Notice::success(message));
            }
            Err(e) => self.notices.push(Notice::error(e.to_string())),
        }
    }

    pub async fn remove_attribute(&mut self, attribute_id: i32) {
        let result = self
            .cache
            .service()
            .delete_attribute(self.cache.actor(), self.team_id, attribute_id)
            .await;

        match result {
            Ok(()) => {
                self.cache.invalidate(self.team_id).await;
                self.load().await;
                self.notices.push(Notice::success("Attribute deleted"));
            }
            Err(e) => self.notices.push(Notice::error(e.to_string())),
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn take_navigation(&mut self) -> Option<Navigation> {
        self.navigation.take()
    }
}
