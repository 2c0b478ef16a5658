use serde::{Deserialize, Serialize};

use crate::capabilities::HttpResult;
use crate::model::{Field, Flow};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Configure {
        base_url: String,
    },

    FieldChanged {
        flow: Flow,
        field: Field,
        value: String,
    },

    CreateRequested,
    FetchRequested,
    UpdateRequested,
    DeleteRequested,

    DismissNotice,

    // Resolved effects; the shell never sends these.
    #[serde(skip)]
    CreateResponse(Box<HttpResult>),
    #[serde(skip)]
    FetchResponse(Box<HttpResult>),
    #[serde(skip)]
    UpdateResponse(Box<HttpResult>),
    #[serde(skip)]
    DeleteResponse(Box<HttpResult>),
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Configure { .. } => "configure",
            Self::FieldChanged { .. } => "field_changed",
            Self::CreateRequested => "create_requested",
            Self::FetchRequested => "fetch_requested",
            Self::UpdateRequested => "update_requested",
            Self::DeleteRequested => "delete_requested",
            Self::DismissNotice => "dismiss_notice",
            Self::CreateResponse(_) => "create_response",
            Self::FetchResponse(_) => "fetch_response",
            Self::UpdateResponse(_) => "update_response",
            Self::DeleteResponse(_) => "delete_response",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        !matches!(
            self,
            Self::CreateResponse(_)
                | Self::FetchResponse(_)
                | Self::UpdateResponse(_)
                | Self::DeleteResponse(_)
        )
    }

    /// The submit event that starts `flow`.
    #[must_use]
    pub const fn submit(flow: Flow) -> Self {
        match flow {
            Flow::Create => Self::CreateRequested,
            Flow::Read => Self::FetchRequested,
            Flow::Update => Self::UpdateRequested,
            Flow::Delete => Self::DeleteRequested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_events_deserialize() {
        let event: Event = serde_json::from_str(
            r#"{"FieldChanged":{"flow":"read","field":"email","value":"a@b.co"}}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            Event::FieldChanged {
                flow: Flow::Read,
                field: Field::Email,
                value: "a@b.co".into(),
            }
        );

        let event: Event = serde_json::from_str(r#""DeleteRequested""#).unwrap();
        assert_eq!(event, Event::DeleteRequested);
    }

    #[test]
    fn test_response_events_are_not_user_initiated() {
        let response = Event::FetchResponse(Box::new(Err(crate::capabilities::HttpError::Cancelled)));
        assert!(!response.is_user_initiated());
        assert!(Event::submit(Flow::Update).is_user_initiated());
        assert_eq!(Event::submit(Flow::Read).name(), "fetch_requested");
    }
}
