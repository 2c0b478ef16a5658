mod http;

pub use self::http::{
    Http, HttpError, HttpHeaders, HttpMethod, HttpOperation, HttpOutput, HttpRequest,
    HttpResponse, HttpResult, ValidatedUrl, MAX_URL_LENGTH,
};

// Crux's built-in Render capability covers everything the panel needs
// to trigger view updates.
pub use crux_core::render::Render;

use crate::event::Event;
use crate::App;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
}
