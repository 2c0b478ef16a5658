use serde::{Deserialize, Serialize};

use crate::model::{Field, FieldErrors, FetchedUser, Flow, InputKind, Model, Notice, NoticeKind};

pub const PANEL_TITLE: &str = "User CRUD Operations";
pub const USER_INFO_TITLE: &str = "User Information";

/// One labeled input. Edits come back as `Event::FieldChanged { flow, field, .. }`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputView {
    pub flow: Flow,
    pub field: Field,
    pub label: String,
    pub name: String,
    pub kind: InputKind,
    pub value: String,
    pub error: Option<String>,
    pub required: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormView {
    pub flow: Flow,
    pub title: String,
    pub submit_label: String,
    pub inputs: Vec<InputView>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserView {
    pub title: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&FetchedUser> for UserView {
    fn from(user: &FetchedUser) -> Self {
        Self {
            title: USER_INFO_TITLE.to_string(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeView {
    pub message: String,
    pub kind: NoticeKind,
}

impl From<&Notice> for NoticeView {
    fn from(n: &Notice) -> Self {
        Self {
            message: n.message.clone(),
            kind: n.kind,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub title: String,
    pub create: FormView,
    pub read: FormView,
    pub fetched_user: Option<UserView>,
    pub update: FormView,
    pub delete: FormView,
    pub notice: Option<NoticeView>,
    pub status_message: Option<String>,
}

/// Label shown next to `field` on the form for `flow`.
///
/// The single-field lookup forms use a plain title-case label; the record
/// forms shout the display name.
pub fn label_for(flow: Flow, field: Field) -> String {
    match (flow, field) {
        (Flow::Read | Flow::Delete, Field::Email) => "Email".to_string(),
        _ => field.display_name().to_uppercase(),
    }
}

fn section_titles(flow: Flow) -> (&'static str, &'static str) {
    match flow {
        Flow::Create => ("Create User", "Create User"),
        Flow::Read => ("Read User", "Fetch User"),
        Flow::Update => ("Update User", "Update User"),
        Flow::Delete => ("Delete User", "Delete User"),
    }
}

fn form_view(flow: Flow, fields: Vec<(Field, &str)>, errors: &FieldErrors) -> FormView {
    let (title, submit_label) = section_titles(flow);
    let inputs = fields
        .into_iter()
        .map(|(field, value)| InputView {
            flow,
            field,
            label: label_for(flow, field),
            name: field.as_str().to_string(),
            kind: field.input_kind(),
            value: value.to_string(),
            error: errors.get(field).map(str::to_string),
            required: true,
        })
        .collect();

    FormView {
        flow,
        title: title.to_string(),
        submit_label: submit_label.to_string(),
        inputs,
    }
}

impl ViewModel {
    pub fn from_model(model: &Model) -> Self {
        let form = |flow: Flow| form_view(flow, model.forms.fields(flow), model.errors.for_flow(flow));

        Self {
            title: PANEL_TITLE.to_string(),
            create: form(Flow::Create),
            read: form(Flow::Read),
            fetched_user: model.fetched_user.as_ref().map(UserView::from),
            update: form(Flow::Update),
            delete: form(Flow::Delete),
            notice: model.notice.as_ref().map(NoticeView::from),
            status_message: model.status_message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(label_for(Flow::Create, Field::FirstName), "FIRST NAME");
        assert_eq!(label_for(Flow::Create, Field::PasswordHash), "PASSWORD HASH");
        assert_eq!(label_for(Flow::Update, Field::Email), "EMAIL");
        assert_eq!(label_for(Flow::Read, Field::Email), "Email");
        assert_eq!(label_for(Flow::Delete, Field::Email), "Email");
    }

    #[test]
    fn test_empty_model_view() {
        let view = ViewModel::from_model(&Model::default());

        assert_eq!(view.title, PANEL_TITLE);
        assert_eq!(view.create.inputs.len(), 4);
        assert_eq!(view.read.inputs.len(), 1);
        assert_eq!(view.update.inputs.len(), 3);
        assert_eq!(view.delete.inputs.len(), 1);
        assert_eq!(view.read.submit_label, "Fetch User");
        assert!(view.fetched_user.is_none());
        assert!(view.notice.is_none());
        assert!(view.status_message.is_none());
        assert!(view.create.inputs.iter().all(|i| i.required && i.error.is_none()));
    }

    #[test]
    fn test_password_input_kind_and_errors() {
        let mut model = Model::default();
        model.validate(Flow::Create);
        let view = ViewModel::from_model(&model);

        let password = view
            .create
            .inputs
            .iter()
            .find(|i| i.field == Field::PasswordHash)
            .unwrap();
        assert_eq!(password.kind, InputKind::Password);
        assert_eq!(password.name, "password_hash");
        assert_eq!(password.error.as_deref(), Some("password hash is required."));
        assert!(view.update.inputs.iter().all(|i| i.error.is_none()));
    }
}
