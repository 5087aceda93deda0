//! Client-side synchronization layer for a remote todo collection.
//!
//! # Overview
//! `TodoSyncStore` keeps a local list of todos consistent with a REST
//! backend (`GET/POST /todos`, `PUT/DELETE /todos/{id}`). Local state is only
//! ever changed by a confirmed server response; failures are logged and
//! absorbed.
//!
//! # Design
//! - `TodoClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse` (host-does-IO pattern).
//! - `Transport` is the only place I/O happens; `ReqwestTransport` is the
//!   production implementation.
//! - `view` renders a store as text with localizable labels.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use config::Config;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{Outcome, TodoSyncStore};
pub use transport::{ReqwestTransport, Transport};
pub use types::{CreateTodo, Todo, UpdateTodo};
pub use view::{render, Locale, Strings};
