// lib.rs - user forms panel core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod app;
pub mod capabilities;
pub mod config;
pub mod event;
pub mod model;
pub mod password;
pub mod validation;
pub mod view;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::{ApiConfig, DEFAULT_API_BASE_URL};
pub use crux_core::{render::Render, App as CruxApp};
pub use event::Event;
pub use model::{Field, FetchedUser, Flow, InputKind, Model, Notice, NoticeKind};
pub use password::PASSWORD_HASH_COST;
pub use view::{FormView, InputView, NoticeView, UserView, ViewModel};
