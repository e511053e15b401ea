//! Form decoding and validation.
//!
//! Raw `application/x-www-form-urlencoded` fields arrive as [`FormFields`] and
//! are turned into validated inputs here, before anything touches storage.
//! Text fields are trimmed, must be non-empty and are bounded in length.
//!
//! The detail page carries four forms. Which one was submitted is decided by
//! [`Control::submitted`]: a control counts as submitted when a field with its
//! name is present (`<button name="update">`) or when the `action` field
//! carries its name (`<button name="action" value="update">`). Controls are
//! checked in the fixed order `update`, `delete`, `add`, `tag`.

use crate::libs::messages::Message;
use serde::Serialize;
use std::collections::BTreeMap;

pub const DESCRIPTION_MAX_LEN: usize = 255;
pub const BODY_MAX_LEN: usize = 2000;
pub const TAG_NAME_MAX_LEN: usize = 50;

/// Field carrying an explicit control name.
pub const ACTION_FIELD: &str = "action";

/// Submitted form fields in request order. Repeated names are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(key, _)| key == name)
    }
}

impl From<Vec<(String, String)>> for FormFields {
    fn from(fields: Vec<(String, String)>) -> Self {
        Self(fields)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }
}

/// Validation errors keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl ToString) {
        self.0.entry(field.to_string()).or_default().push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

fn clean_text(fields: &FormFields, name: &str, max_len: usize) -> Result<String, FormErrors> {
    let value = fields.get(name).unwrap_or_default().trim();
    let mut errors = FormErrors::default();

    let len = value.chars().count();
    if len == 0 {
        errors.add(name, Message::FieldRequired);
    } else if len > max_len {
        errors.add(name, Message::FieldTooLong(max_len, len));
    }

    if errors.is_empty() {
        Ok(value.to_string())
    } else {
        Err(errors)
    }
}

/// Create/update input for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub description: String,
}

impl TaskForm {
    pub const FIELD: &'static str = "description";

    pub fn parse(fields: &FormFields) -> Result<Self, FormErrors> {
        let description = clean_text(fields, Self::FIELD, DESCRIPTION_MAX_LEN)?;
        Ok(Self { description })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentForm {
    pub body: String,
}

impl CommentForm {
    pub const FIELD: &'static str = "body";

    pub fn parse(fields: &FormFields) -> Result<Self, FormErrors> {
        let body = clean_text(fields, Self::FIELD, BODY_MAX_LEN)?;
        Ok(Self { body })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagForm {
    pub name: String,
}

impl TagForm {
    pub const FIELD: &'static str = "name";

    pub fn parse(fields: &FormFields) -> Result<Self, FormErrors> {
        let name = clean_text(fields, Self::FIELD, TAG_NAME_MAX_LEN)?;
        Ok(Self { name })
    }
}

/// Submit controls of the detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Update,
    Delete,
    Add,
    Tag,
}

impl Control {
    pub const PRIORITY: [Control; 4] = [Control::Update, Control::Delete, Control::Add, Control::Tag];

    pub fn name(self) -> &'static str {
        match self {
            Control::Update => "update",
            Control::Delete => "delete",
            Control::Add => "add",
            Control::Tag => "tag",
        }
    }

    /// Highest-priority control present in `fields`, if any.
    pub fn submitted(fields: &FormFields) -> Option<Control> {
        let action = fields.get(ACTION_FIELD);
        Self::PRIORITY
            .into_iter()
            .find(|control| fields.contains(control.name()) || action == Some(control.name()))
    }
}

/// A decoded, validated detail-page submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
    Update(TaskForm),
    Delete,
    AddComment(CommentForm),
    AddTag(TagForm),
}

/// The submitted control was recognised but its fields did not validate.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidAction {
    pub control: Control,
    pub errors: FormErrors,
}

impl DetailAction {
    /// Decodes a detail-page submission.
    ///
    /// `Ok(None)` means no known control was submitted.
    pub fn decode(fields: &FormFields) -> Result<Option<DetailAction>, InvalidAction> {
        let Some(control) = Control::submitted(fields) else {
            return Ok(None);
        };

        let action = match control {
            Control::Update => TaskForm::parse(fields).map(DetailAction::Update),
            Control::Delete => Ok(DetailAction::Delete),
            Control::Add => CommentForm::parse(fields).map(DetailAction::AddComment),
            Control::Tag => TagForm::parse(fields).map(DetailAction::AddTag),
        };

        action.map(Some).map_err(|errors| InvalidAction { control, errors })
    }
}
