//! Client-side cache of the remote todo collection.
//!
//! # Design
//! `TodoSyncStore` owns the displayed list, the draft input and the pending
//! flag. Every mutation is a round trip: local state changes only after the
//! server has answered with a 2xx, and only with what the server returned.
//!
//! Each operation comes in two halves, mirroring `TodoClient`:
//! `begin_*` checks preconditions and yields the request to send (or `None`
//! when no request may be issued), `finish_*` consumes the transport result.
//! The async methods (`load`, `create`, ...) just run both halves around a
//! [`Transport`]. Failures are logged and reported as [`Outcome::Failed`];
//! nothing propagates to the caller.

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{CreateTodo, Todo, UpdateTodo};

/// What an operation did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server confirmed the change and local state now reflects it.
    Applied,
    /// A precondition failed; no request was issued.
    Rejected,
    /// The round trip failed; local state is unchanged.
    Failed,
}

/// In-memory todo list kept consistent with the server, one confirmed
/// response at a time.
#[derive(Debug, Clone)]
pub struct TodoSyncStore {
    client: TodoClient,
    todos: Vec<Todo>,
    draft: String,
    pending: bool,
}

impl TodoSyncStore {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
            draft: String::new(),
            pending: false,
        }
    }

    /// Todos in server order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// True while a create request is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    // -----------------------------------------------------------------------
    // load
    // -----------------------------------------------------------------------

    pub fn begin_load(&self) -> HttpRequest {
        self.client.build_list_todos()
    }

    /// Replaces the whole collection on success.
    pub fn finish_load(&mut self, result: Result<HttpResponse, ApiError>) -> Outcome {
        match result.and_then(|r| self.client.parse_list_todos(r)) {
            Ok(todos) => {
                debug!(count = todos.len(), "loaded todos");
                self.todos = todos;
                Outcome::Applied
            }
            Err(e) => failed("load", &e),
        }
    }

    // -----------------------------------------------------------------------
    // create
    // -----------------------------------------------------------------------

    /// Returns `None` while another create is pending or when `title` is
    /// blank after trimming. Otherwise marks the store pending.
    pub fn begin_create(&mut self, title: &str) -> Option<HttpRequest> {
        if self.pending {
            debug!("create ignored: another create is pending");
            return None;
        }
        let title = title.trim();
        if title.is_empty() {
            debug!("create ignored: blank title");
            return None;
        }

        let input = CreateTodo {
            title: title.to_string(),
        };
        match self.client.build_create_todo(&input) {
            Ok(request) => {
                self.pending = true;
                Some(request)
            }
            Err(e) => {
                warn!(operation = "create", error = %e, "failed to build request");
                None
            }
        }
    }

    /// Clears the pending flag unconditionally. On success appends the
    /// server's todo and clears the draft; on failure the draft is kept.
    pub fn finish_create(&mut self, result: Result<HttpResponse, ApiError>) -> Outcome {
        self.pending = false;
        match result.and_then(|r| self.client.parse_create_todo(r)) {
            Ok(todo) => {
                debug!(id = %todo.id, "created todo");
                self.todos.push(todo);
                self.draft.clear();
                Outcome::Applied
            }
            Err(e) => failed("create", &e),
        }
    }

    // -----------------------------------------------------------------------
    // toggle
    // -----------------------------------------------------------------------

    /// Builds an update carrying the inverse of the current completed flag.
    /// Returns `None` for ids that are not in the local collection.
    pub fn begin_toggle(&self, id: &str) -> Option<HttpRequest> {
        let Some(todo) = self.get(id) else {
            debug!(id, "toggle ignored: unknown id");
            return None;
        };
        let input = UpdateTodo::completed(!todo.completed);
        match self.client.build_update_todo(id, &input) {
            Ok(request) => Some(request),
            Err(e) => {
                warn!(operation = "toggle", id, error = %e, "failed to build request");
                None
            }
        }
    }

    /// Replaces the item with the server's representation verbatim.
    pub fn finish_toggle(&mut self, id: &str, result: Result<HttpResponse, ApiError>) -> Outcome {
        match result.and_then(|r| self.client.parse_update_todo(r)) {
            Ok(updated) => {
                match self.todos.iter_mut().find(|t| t.id == id) {
                    Some(slot) => *slot = updated,
                    None => debug!(id, "updated todo is no longer listed"),
                }
                Outcome::Applied
            }
            Err(e) => failed("toggle", &e),
        }
    }

    // -----------------------------------------------------------------------
    // remove
    // -----------------------------------------------------------------------

    pub fn begin_remove(&self, id: &str) -> HttpRequest {
        self.client.build_delete_todo(id)
    }

    /// Drops the item with `id`; the others keep their relative order.
    pub fn finish_remove(&mut self, id: &str, result: Result<HttpResponse, ApiError>) -> Outcome {
        match result.and_then(|r| self.client.parse_delete_todo(r)) {
            Ok(()) => {
                debug!(id, "removed todo");
                self.todos.retain(|t| t.id != id);
                Outcome::Applied
            }
            Err(e) => failed("remove", &e),
        }
    }

    // -----------------------------------------------------------------------
    // round trips
    // -----------------------------------------------------------------------

    pub async fn load<T: Transport + ?Sized>(&mut self, transport: &T) -> Outcome {
        let request = self.begin_load();
        let result = transport.execute(request).await;
        self.finish_load(result)
    }

    pub async fn create<T: Transport + ?Sized>(&mut self, transport: &T, title: &str) -> Outcome {
        let Some(request) = self.begin_create(title) else {
            return Outcome::Rejected;
        };
        let result = transport.execute(request).await;
        self.finish_create(result)
    }

    /// Creates a todo from the current draft.
    pub async fn submit<T: Transport + ?Sized>(&mut self, transport: &T) -> Outcome {
        let title = self.draft.clone();
        self.create(transport, &title).await
    }

    pub async fn toggle_completion<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        id: &str,
    ) -> Outcome {
        let Some(request) = self.begin_toggle(id) else {
            return Outcome::Rejected;
        };
        let result = transport.execute(request).await;
        self.finish_toggle(id, result)
    }

    pub async fn remove<T: Transport + ?Sized>(&mut self, transport: &T, id: &str) -> Outcome {
        let request = self.begin_remove(id);
        let result = transport.execute(request).await;
        self.finish_remove(id, result)
    }
}

fn failed(operation: &'static str, error: &ApiError) -> Outcome {
    let kind = if error.is_application() {
        "application"
    } else {
        "transport"
    };
    warn!(operation, kind, error = %error, "todo request failed");
    Outcome::Failed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TodoSyncStore {
        TodoSyncStore::new(TodoClient::new("http://localhost:8000"))
    }

    fn ok(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn loaded(body: &str) -> TodoSyncStore {
        let mut s = store();
        assert_eq!(s.finish_load(ok(200, body)), Outcome::Applied);
        s
    }

    const TWO: &str = r#"[
        {"id":"1","title":"Buy milk","completed":false},
        {"id":"2","title":"Walk dog","completed":true}
    ]"#;

    #[test]
    fn load_empty_collection() {
        let s = loaded("[]");
        assert!(s.is_empty());
    }

    #[test]
    fn failed_load_keeps_existing_collection() {
        let mut s = loaded(TWO);
        let before = s.todos().to_vec();
        assert_eq!(s.finish_load(ok(500, "boom")), Outcome::Failed);
        assert_eq!(
            s.finish_load(Err(ApiError::Transport("refused".to_string()))),
            Outcome::Failed
        );
        assert_eq!(s.todos(), before.as_slice());
    }

    #[test]
    fn blank_titles_are_rejected_without_a_request() {
        let mut s = store();
        assert!(s.begin_create("").is_none());
        assert!(s.begin_create("   ").is_none());
        assert!(!s.is_pending());
    }

    #[test]
    fn create_sends_trimmed_title_and_sets_pending() {
        let mut s = store();
        let req = s.begin_create("  Buy milk ").unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "title": "Buy milk" }));
        assert!(s.is_pending());
    }

    #[test]
    fn second_create_is_rejected_while_pending() {
        let mut s = store();
        assert!(s.begin_create("first").is_some());
        assert!(s.begin_create("second").is_none());
        assert_eq!(
            s.finish_create(ok(201, r#"{"id":"1","title":"first","completed":false}"#)),
            Outcome::Applied
        );
        assert!(s.begin_create("second").is_some());
    }

    #[test]
    fn successful_create_appends_and_clears_draft() {
        let mut s = loaded(TWO);
        s.set_draft("Buy eggs");
        s.begin_create("Buy eggs").unwrap();
        let outcome = s.finish_create(ok(201, r#"{"id":"3","title":"Buy eggs","completed":false}"#));
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(s.todos().len(), 3);
        assert_eq!(s.todos()[2].id, "3");
        assert_eq!(s.draft(), "");
        assert!(!s.is_pending());
    }

    #[test]
    fn failed_create_keeps_draft_and_releases_pending() {
        let mut s = loaded(TWO);
        s.set_draft("Buy eggs");
        s.begin_create("Buy eggs").unwrap();
        assert_eq!(s.finish_create(ok(400, "bad")), Outcome::Failed);
        assert_eq!(s.todos().len(), 2);
        assert_eq!(s.draft(), "Buy eggs");
        assert!(!s.is_pending());
    }

    #[test]
    fn toggle_sends_inverted_flag() {
        let s = loaded(TWO);
        let req = s.begin_toggle("2").unwrap();
        assert_eq!(req.path, "http://localhost:8000/todos/2");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "completed": false }));
    }

    #[test]
    fn toggle_of_unknown_id_is_a_no_op() {
        let s = loaded(TWO);
        assert!(s.begin_toggle("missing").is_none());
    }

    #[test]
    fn toggle_takes_the_server_representation() {
        let mut s = loaded(TWO);
        let outcome = s.finish_toggle(
            "1",
            ok(200, r#"{"id":"1","title":"Buy oat milk","completed":true}"#),
        );
        assert_eq!(outcome, Outcome::Applied);
        let todo = s.get("1").unwrap();
        assert_eq!(todo.title, "Buy oat milk");
        assert!(todo.completed);
        assert_eq!(s.todos()[1].id, "2");
    }

    #[test]
    fn failed_toggle_leaves_item_as_it_was() {
        let mut s = loaded(TWO);
        assert_eq!(s.finish_toggle("1", ok(404, "")), Outcome::Failed);
        assert!(!s.get("1").unwrap().completed);
    }

    #[test]
    fn remove_keeps_others_in_order() {
        let mut s = loaded(
            r#"[
                {"id":"a","title":"A","completed":false},
                {"id":"b","title":"B","completed":false},
                {"id":"c","title":"C","completed":false}
            ]"#,
        );
        assert_eq!(s.finish_remove("b", ok(204, "")), Outcome::Applied);
        let ids: Vec<&str> = s.todos().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn failed_remove_keeps_item() {
        let mut s = loaded(TWO);
        let result = Err(ApiError::Transport("reset".to_string()));
        assert_eq!(s.finish_remove("1", result), Outcome::Failed);
        assert!(s.get("1").is_some());
    }
}
