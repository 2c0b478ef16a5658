use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};
use thiserror::Error;
use zeroize::Zeroize;

use crate::config::ApiConfig;
use crate::validation;

/// The four independent user interactions on the panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    Create,
    Read,
    Update,
    Delete,
}

impl Flow {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Prefix used when a failure of this flow is surfaced as the status message.
    #[must_use]
    pub const fn failure_prefix(self) -> &'static str {
        match self {
            Self::Create => "Error creating user",
            Self::Read => "Error fetching user",
            Self::Update => "Error updating user",
            Self::Delete => "Error deleting user",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Email,
    FirstName,
    LastName,
    PasswordHash,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Password,
}

impl Field {
    /// Wire name, also used as the input's `name`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::PasswordHash => "password_hash",
        }
    }

    #[must_use]
    pub fn display_name(self) -> String {
        self.as_str().replace('_', " ")
    }

    #[must_use]
    pub const fn input_kind(self) -> InputKind {
        match self {
            Self::PasswordHash => InputKind::Password,
            _ => InputKind::Text,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("field '{field}' does not belong to the {flow} form")]
    UnknownField { flow: Flow, field: Field },
}

/// Common behaviour of the per-flow form records.
pub trait UserForm {
    const FLOW: Flow;

    /// Fields in display order, paired with their current values.
    fn fields(&self) -> Vec<(Field, &str)>;

    fn slot_mut(&mut self, field: Field) -> Option<&mut String>;

    fn set(&mut self, field: Field, value: String) -> Result<(), FormError> {
        let slot = self.slot_mut(field).ok_or(FormError::UnknownField {
            flow: Self::FLOW,
            field,
        })?;
        *slot = value;
        Ok(())
    }

    fn reset(&mut self);
}

#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Plaintext until submit; replaced by its hash on the wire.
    pub password_hash: String,
}

// Redact debug output: the password field holds plaintext.
impl fmt::Debug for CreateForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateForm")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password_present", &!self.password_hash.is_empty())
            .finish()
    }
}

impl UserForm for CreateForm {
    const FLOW: Flow = Flow::Create;

    fn fields(&self) -> Vec<(Field, &str)> {
        vec![
            (Field::Email, self.email.as_str()),
            (Field::FirstName, self.first_name.as_str()),
            (Field::LastName, self.last_name.as_str()),
            (Field::PasswordHash, self.password_hash.as_str()),
        ]
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Email => Some(&mut self.email),
            Field::FirstName => Some(&mut self.first_name),
            Field::LastName => Some(&mut self.last_name),
            Field::PasswordHash => Some(&mut self.password_hash),
        }
    }

    fn set(&mut self, field: Field, value: String) -> Result<(), FormError> {
        if field == Field::PasswordHash {
            self.password_hash.zeroize();
        }
        let slot = self.slot_mut(field).ok_or(FormError::UnknownField {
            flow: Self::FLOW,
            field,
        })?;
        *slot = value;
        Ok(())
    }

    fn reset(&mut self) {
        self.password_hash.zeroize();
        *self = Self::default();
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchForm {
    pub email: String,
}

impl UserForm for FetchForm {
    const FLOW: Flow = Flow::Read;

    fn fields(&self) -> Vec<(Field, &str)> {
        vec![(Field::Email, self.email.as_str())]
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Email => Some(&mut self.email),
            _ => None,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserForm for UpdateForm {
    const FLOW: Flow = Flow::Update;

    fn fields(&self) -> Vec<(Field, &str)> {
        vec![
            (Field::Email, self.email.as_str()),
            (Field::FirstName, self.first_name.as_str()),
            (Field::LastName, self.last_name.as_str()),
        ]
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Email => Some(&mut self.email),
            Field::FirstName => Some(&mut self.first_name),
            Field::LastName => Some(&mut self.last_name),
            Field::PasswordHash => None,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteForm {
    pub email: String,
}

impl UserForm for DeleteForm {
    const FLOW: Flow = Flow::Delete;

    fn fields(&self) -> Vec<(Field, &str)> {
        vec![(Field::Email, self.email.as_str())]
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Email => Some(&mut self.email),
            _ => None,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Forms {
    pub create: CreateForm,
    pub fetch: FetchForm,
    pub update: UpdateForm,
    pub delete: DeleteForm,
}

impl Forms {
    pub fn set(&mut self, flow: Flow, field: Field, value: String) -> Result<(), FormError> {
        match flow {
            Flow::Create => self.create.set(field, value),
            Flow::Read => self.fetch.set(field, value),
            Flow::Update => self.update.set(field, value),
            Flow::Delete => self.delete.set(field, value),
        }
    }

    pub fn fields(&self, flow: Flow) -> Vec<(Field, &str)> {
        match flow {
            Flow::Create => self.create.fields(),
            Flow::Read => self.fetch.fields(),
            Flow::Update => self.update.fields(),
            Flow::Delete => self.delete.fields(),
        }
    }

    pub fn reset(&mut self, flow: Flow) {
        match flow {
            Flow::Create => self.create.reset(),
            Flow::Read => self.fetch.reset(),
            Flow::Update => self.update.reset(),
            Flow::Delete => self.delete.reset(),
        }
    }
}

/// Per-field validation messages for one form.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: String) {
        self.0.insert(field, message);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub create: FieldErrors,
    pub fetch: FieldErrors,
    pub update: FieldErrors,
    pub delete: FieldErrors,
}

impl ValidationErrors {
    pub fn for_flow(&self, flow: Flow) -> &FieldErrors {
        match flow {
            Flow::Create => &self.create,
            Flow::Read => &self.fetch,
            Flow::Update => &self.update,
            Flow::Delete => &self.delete,
        }
    }

    fn for_flow_mut(&mut self, flow: Flow) -> &mut FieldErrors {
        match flow {
            Flow::Create => &mut self.create,
            Flow::Read => &mut self.fetch,
            Flow::Update => &mut self.update,
            Flow::Delete => &mut self.delete,
        }
    }
}

/// Record returned by a successful lookup. Unknown server fields are ignored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FetchedUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

/// One-shot message for the shell to show until dismissed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn new(message: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Model {
    pub config: ApiConfig,

    pub forms: Forms,
    pub errors: ValidationErrors,

    // Read flow result
    pub fetched_user: Option<FetchedUser>,

    pub notice: Option<Notice>,
    pub status_message: Option<String>,
}

impl Model {
    /// Recomputes the stored errors for `flow` and reports whether the form
    /// may be submitted.
    pub fn validate(&mut self, flow: Flow) -> bool {
        let errors = validation::validate(self.forms.fields(flow));
        let valid = errors.is_empty();
        *self.errors.for_flow_mut(flow) = errors;
        valid
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn show_notice(&mut self, message: impl Into<String>, kind: NoticeKind) {
        self.notice = Some(Notice::new(message, kind));
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
