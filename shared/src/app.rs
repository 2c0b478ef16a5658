use tracing::{debug, info, warn};

use crate::api::{self, ApiMessage, CreateUserRequest, FetchUserResponse, FlowError, UpdateUserRequest};
use crate::capabilities::{Capabilities, HttpError, HttpRequest, HttpResult};
use crate::config::ApiConfig;
use crate::event::Event;
use crate::model::{Flow, Model, NoticeKind};
use crate::password;
use crate::view::ViewModel;

pub const USER_CREATED_MESSAGE: &str = "User created successfully.";
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found.";
pub const INVALID_ENDPOINT_PREFIX: &str = "Invalid API endpoint";

#[derive(Default)]
pub struct App;

impl App {
    fn fail(model: &mut Model, flow: Flow, error: &FlowError) {
        warn!(%flow, error = %error, "user flow failed");
        model.set_status(error.status_message(flow));
    }

    fn send(
        model: &mut Model,
        caps: &Capabilities,
        flow: Flow,
        request: Result<HttpRequest, HttpError>,
        callback: fn(Box<HttpResult>) -> Event,
    ) {
        match request {
            Ok(request) => {
                debug!(%flow, method = request.method().as_str(), request_id = request.request_id(), "sending request");
                caps.http.execute(request, move |result| callback(Box::new(result)));
            }
            Err(e) => Self::fail(model, flow, &FlowError::from(e)),
        }
    }

    fn check(model: &mut Model, flow: Flow) -> bool {
        let valid = model.validate(flow);
        if !valid {
            debug!(%flow, error_count = model.errors.for_flow(flow).len(), "submit rejected by validation");
        }
        valid
    }

    fn submit_create(model: &mut Model, caps: &Capabilities) {
        if !Self::check(model, Flow::Create) {
            return;
        }

        let hashed = match password::hash_password(&model.forms.create.password_hash) {
            Ok(hash) => hash,
            Err(e) => {
                Self::fail(model, Flow::Create, &FlowError::from(e));
                return;
            }
        };

        let form = &model.forms.create;
        let body = CreateUserRequest {
            email: form.email.clone(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            password_hash: hashed,
        };
        let request = api::create_user(&model.config, &body);

        Self::send(model, caps, Flow::Create, request, Event::CreateResponse);
    }

    fn submit_fetch(model: &mut Model, caps: &Capabilities) {
        if !Self::check(model, Flow::Read) {
            return;
        }
        let request = api::fetch_user(&model.config, &model.forms.fetch.email);
        Self::send(model, caps, Flow::Read, request, Event::FetchResponse);
    }

    fn submit_update(model: &mut Model, caps: &Capabilities) {
        if !Self::check(model, Flow::Update) {
            return;
        }
        let form = &model.forms.update;
        let body = UpdateUserRequest {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
        };
        let request = api::update_user(&model.config, &form.email, &body);
        Self::send(model, caps, Flow::Update, request, Event::UpdateResponse);
    }

    fn submit_delete(model: &mut Model, caps: &Capabilities) {
        if !Self::check(model, Flow::Delete) {
            return;
        }
        let request = api::delete_user(&model.config, &model.forms.delete.email);
        Self::send(model, caps, Flow::Delete, request, Event::DeleteResponse);
    }

    fn on_created(model: &mut Model, result: HttpResult) {
        match result.map_err(FlowError::from).and_then(api::expect_success) {
            Ok(_) => {
                info!(flow = %Flow::Create, "user created");
                model.show_notice(USER_CREATED_MESSAGE, NoticeKind::Success);
                model.forms.reset(Flow::Create);
            }
            Err(e) => Self::fail(model, Flow::Create, &e),
        }
    }

    fn on_fetched(model: &mut Model, result: HttpResult) {
        let response = match result {
            Ok(response) if response.status() == 404 => {
                info!(flow = %Flow::Read, "user not found");
                model.fetched_user = None;
                model.show_notice(USER_NOT_FOUND_MESSAGE, NoticeKind::Warning);
                return;
            }
            Ok(response) => response,
            Err(e) => {
                Self::fail(model, Flow::Read, &FlowError::from(e));
                return;
            }
        };

        let parsed = api::expect_success(response)
            .and_then(|r| r.json::<FetchUserResponse>().map_err(FlowError::from));
        match parsed {
            Ok(body) => {
                info!(flow = %Flow::Read, found = body.user.is_some(), "user fetched");
                model.fetched_user = body.user;
            }
            Err(e) => Self::fail(model, Flow::Read, &e),
        }
    }

    /// Shared completion for update and delete: the server's `{message}` or
    /// `{error}` is shown and the form resets either way.
    fn on_message(model: &mut Model, flow: Flow, result: HttpResult) {
        let parsed = result
            .map_err(FlowError::from)
            .and_then(api::expect_success)
            .and_then(|r| r.json::<ApiMessage>().map_err(FlowError::from));

        match parsed {
            Ok(body) => {
                let (message, kind) = body.notice();
                info!(%flow, ?kind, "user flow completed");
                model.show_notice(message, kind);
                model.forms.reset(flow);
            }
            Err(e) => Self::fail(model, flow, &e),
        }
    }

    fn configure(model: &mut Model, base_url: String) {
        match ApiConfig::new(base_url) {
            Ok(config) => {
                info!(base_url = %config.base_url, "api endpoint configured");
                model.config = config;
            }
            Err(e) => {
                warn!(error = %e, "rejected api endpoint");
                model.set_status(format!("{INVALID_ENDPOINT_PREFIX}: {e}"));
            }
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        debug!(event = event.name(), user_initiated = event.is_user_initiated(), "handling event");

        match event {
            Event::Configure { base_url } => Self::configure(model, base_url),

            Event::FieldChanged { flow, field, value } => {
                if let Err(e) = model.forms.set(flow, field, value) {
                    warn!(error = %e, "ignored field edit");
                }
            }

            Event::CreateRequested => Self::submit_create(model, caps),
            Event::FetchRequested => Self::submit_fetch(model, caps),
            Event::UpdateRequested => Self::submit_update(model, caps),
            Event::DeleteRequested => Self::submit_delete(model, caps),

            Event::DismissNotice => model.clear_notice(),

            Event::CreateResponse(result) => Self::on_created(model, *result),
            Event::FetchResponse(result) => Self::on_fetched(model, *result),
            Event::UpdateResponse(result) => Self::on_message(model, Flow::Update, *result),
            Event::DeleteResponse(result) => Self::on_message(model, Flow::Delete, *result),
        }

        caps.render.render();
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::from_model(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;
    use crux_core::testing::AppTester;

    use crate::capabilities::{HttpHeaders, HttpResponse};
    use crate::Effect;

    fn response(status: u16, body: &str) -> HttpResult {
        Ok(HttpResponse::new(status, HttpHeaders::new(), body.as_bytes().to_vec()))
    }

    #[test]
    fn test_field_change_renders() {
        let app = AppTester::<App, Effect>::default();
        let mut model = Model::default();

        let update = app.update(
            Event::FieldChanged {
                flow: Flow::Read,
                field: Field::Email,
                value: "a@b.com".into(),
            },
            &mut model,
        );

        assert_eq!(model.forms.fetch.email, "a@b.com");
        assert!(update.effects.iter().any(|e| matches!(e, Effect::Render(_))));
    }

    #[test]
    fn test_fetch_404_after_success_clears_user() {
        let mut model = Model::default();
        App::on_fetched(
            &mut model,
            response(200, r#"{"user":{"email":"a@b.com","first_name":"A","last_name":"B"}}"#),
        );
        assert!(model.fetched_user.is_some());

        App::on_fetched(&mut model, response(404, r#"{"error":"User not found."}"#));
        assert!(model.fetched_user.is_none());
        assert_eq!(model.notice.as_ref().map(|n| n.message.as_str()), Some(USER_NOT_FOUND_MESSAGE));
        assert!(model.status_message.is_none());
    }

    #[test]
    fn test_fetch_malformed_body_keeps_previous_user() {
        let mut model = Model::default();
        App::on_fetched(
            &mut model,
            response(200, r#"{"user":{"email":"a@b.com","first_name":"A","last_name":"B"}}"#),
        );
        App::on_fetched(&mut model, response(200, r#"{"nope":true}"#));

        assert_eq!(model.fetched_user.as_ref().map(|u| u.email.as_str()), Some("a@b.com"));
        let status = model.status_message.unwrap();
        assert!(status.starts_with("Error fetching user: invalid response:"), "{status}");
    }

    #[test]
    fn test_fetch_null_user_clears_without_status() {
        let mut model = Model::default();
        App::on_fetched(
            &mut model,
            response(200, r#"{"user":{"email":"a@b.com","first_name":"A","last_name":"B"}}"#),
        );
        App::on_fetched(&mut model, response(200, r#"{"user":null}"#));

        assert!(model.fetched_user.is_none());
        assert!(model.status_message.is_none());
        assert!(model.notice.is_none());
    }

    #[test]
    fn test_create_server_error_keeps_form() {
        let mut model = Model::default();
        model.forms.create.email = "a@b.com".into();

        App::on_created(&mut model, response(500, r#"{"error":"An error occurred while creating the user."}"#));

        assert_eq!(model.forms.create.email, "a@b.com");
        assert_eq!(
            model.status_message.as_deref(),
            Some("Error creating user: Request failed with status code 500")
        );
        assert!(model.notice.is_none());
    }

    #[test]
    fn test_configure_rejects_invalid_endpoint() {
        let mut model = Model::default();
        App::configure(&mut model, "ftp://files.example.com".into());

        assert_eq!(model.config, ApiConfig::default());
        assert!(model
            .status_message
            .as_deref()
            .is_some_and(|s| s.starts_with(INVALID_ENDPOINT_PREFIX)));
    }
}
