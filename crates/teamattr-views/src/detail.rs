//! Edit page of a single attribute
//!
//! The form keeps its option buffer regardless of the selected type.
//! Options are shown, and submitted, only while the type is a selection
//! kind, so switching `TEXT -> SINGLE_SELECT -> TEXT` loses nothing until
//! a save goes through.

use std::sync::Arc;

use tracing::{debug, warn};

use teamattr_core::{
    Attribute, AttributeError, AttributeInput, AttributeOption, AttributeType, UpdateAttribute,
};

use crate::cache::TeamQueryCache;
use crate::notice::{Navigation, Notice};

/// Editable fields of an attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeForm {
    pub name: String,
    pub attribute_type: AttributeType,
    pub allow_edit: bool,
    pub options: Vec<AttributeOption>,
}

impl AttributeForm {
    pub fn options_visible(&self) -> bool {
        self.attribute_type.is_selection()
    }

    fn to_input(&self) -> AttributeInput {
        let input = AttributeInput::new(self.name.clone(), self.attribute_type.as_str())
            .with_allow_edit(self.allow_edit);

        if self.options_visible() {
            input.with_options(self.options.clone())
        } else {
            input
        }
    }
}

impl From<&Attribute> for AttributeForm {
    fn from(attribute: &Attribute) -> Self {
        Self {
            name: attribute.name.clone(),
            attribute_type: attribute.attribute_type(),
            allow_edit: attribute.allow_edit,
            options: attribute.options().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Loaded {
        baseline: AttributeForm,
        form: AttributeForm,
    },
    NotFound,
    Error(String),
}

pub struct AttributeDetailView {
    cache: Arc<TeamQueryCache>,
    team_id: i32,
    attribute_id: i32,
    state: DetailState,
    saving: bool,
    notices: Vec<Notice>,
    navigation: Option<Navigation>,
}

impl AttributeDetailView {
    pub fn new(cache: Arc<TeamQueryCache>, team_id: i32, attribute_id: i32) -> Self {
        Self {
            cache,
            team_id,
            attribute_id,
            state: DetailState::Loading,
            saving: false,
            notices: Vec::new(),
            navigation: None,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn form(&self) -> Option<&AttributeForm> {
        match &self.state {
            DetailState::Loaded { form, .. } => Some(form),
            _ => None,
        }
    }

    pub async fn load(&mut self) {
        self.state = DetailState::Loading;

        let result = self.cache.get(self.team_id).await;
        let team = match result {
            Ok(team) => team,
            Err(e) => return self.fail_load(e),
        };

        match team.attribute(self.attribute_id) {
            Some(attribute) => {
                let form = AttributeForm::from(attribute);
                self.state = DetailState::Loaded {
                    baseline: form.clone(),
                    form,
                };
            }
            None => self.fail_load(AttributeError::attribute_not_found(self.attribute_id)),
        }
    }

    fn fail_load(&mut self, error: AttributeError) {
        warn!(
            "Failed to load attribute {} of team {}: {}",
            self.attribute_id, self.team_id, error
        );

        if error.is_not_found() {
            self.state = DetailState::NotFound;
            self.navigation = Some(Navigation::AttributeList {
                team_id: self.team_id,
            });
        } else {
            self.state = DetailState::Error(error.to_string());
        }
    }

    /// Dirty when saving would submit something other than the baseline.
    /// Edits to the hidden option buffer of a non-selection type do not count.
    pub fn is_dirty(&self) -> bool {
        match &self.state {
            DetailState::Loaded { baseline, form } => baseline.to_input() != form.to_input(),
            _ => false,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn can_save(&self) -> bool {
        self.is_dirty() && !self.saving
    }

    fn form_mut(&mut self) -> Option<&mut AttributeForm> {
        match &mut self.state {
            DetailState::Loaded { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if let Some(form) = self.form_mut() {
            form.name = name.into();
        }
    }

    /// Changes the type only; the option buffer stays as it is
    pub fn set_type(&mut self, attribute_type: AttributeType) {
        if let Some(form) = self.form_mut() {
            form.attribute_type = attribute_type;
        }
    }

    pub fn set_allow_edit(&mut self, allow_edit: bool) {
        if let Some(form) = self.form_mut() {
            form.allow_edit = allow_edit;
        }
    }

    pub fn add_option(&mut self, option: AttributeOption) {
        if let Some(form) = self.form_mut() {
            form.options.push(option);
        }
    }

    pub fn remove_option(&mut self, option_id: &str) {
        if let Some(form) = self.form_mut() {
            form.options.retain(|o| o.id != option_id);
        }
    }

    pub fn set_option_label(&mut self, option_id: &str, label: impl Into<String>) {
        if let Some(option) = self
            .form_mut()
            .and_then(|form| form.options.iter_mut().find(|o| o.id == option_id))
        {
            option.label = label.into();
        }
    }

    /// Start a save: `None` while clean or already saving. The caller must
    /// hand the outcome to [`finish_save`](Self::finish_save).
    pub fn begin_save(&mut self) -> Option<UpdateAttribute> {
        if !self.can_save() {
            return None;
        }
        let input = self.form()?.to_input();

        self.saving = true;
        Some(UpdateAttribute {
            team_id: self.team_id,
            attribute_id: self.attribute_id,
            input,
        })
    }

    pub async fn finish_save(&mut self, result: Result<Attribute, AttributeError>) {
        self.saving = false;

        match result {
            Ok(attribute) => {
                self.cache.invalidate(self.team_id).await;
                let saved = AttributeForm::from(&attribute);
                self.state = DetailState::Loaded {
                    baseline: saved.clone(),
                    form: saved,
                };
                debug!("Attribute {} saved", attribute.id);
                self.notices.push(Notice::success("Attribute updated"));
            }
            Err(e) if e.is_not_found() => {
                self.notices.push(Notice::error(e.to_string()));
                self.navigation = Some(Navigation::AttributeList {
                    team_id: self.team_id,
                });
            }
            Err(e) => self.notices.push(Notice::error(e.to_string())),
        }
    }

    pub async fn save(&mut self) {
        let Some(request) = self.begin_save() else {
            return;
        };

        let result = self
            .cache
            .service()
            .update_attribute(self.cache.actor(), request)
            .await;

        self.finish_save(result).await;
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn take_navigation(&mut self) -> Option<Navigation> {
        self.navigation.take()
    }
}
