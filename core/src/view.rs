//! Plain-text rendering of a `TodoSyncStore`, with localizable labels.

use std::str::FromStr;

use thiserror::Error;

use crate::store::TodoSyncStore;

/// Built-in label sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Ja,
}

#[derive(Debug, Error)]
#[error("unsupported locale '{0}' (expected 'en' or 'ja')")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ja" => Ok(Locale::Ja),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

/// User-facing text. Nothing in the store depends on these values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strings {
    pub app_title: &'static str,
    pub placeholder: &'static str,
    pub submit: &'static str,
    pub submitting: &'static str,
    pub delete: &'static str,
    pub empty: &'static str,
}

impl Strings {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self {
                app_title: "Todo App",
                placeholder: "Enter a new todo...",
                submit: "Add",
                submitting: "Adding...",
                delete: "Delete",
                empty: "No todos",
            },
            Locale::Ja => Self {
                app_title: "Todo App",
                placeholder: "新しいTODOを入力...",
                submit: "追加",
                submitting: "追加中...",
                delete: "削除",
                empty: "TODOがありません",
            },
        }
    }
}

impl Default for Strings {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

/// Renders the form line and the list, one todo per line.
pub fn render(store: &TodoSyncStore, strings: &Strings) -> String {
    let input = if store.draft().is_empty() {
        strings.placeholder
    } else {
        store.draft()
    };
    let button = if store.is_pending() {
        strings.submitting
    } else {
        strings.submit
    };

    let mut lines = vec![
        strings.app_title.to_string(),
        format!("> {input} [{button}]"),
    ];
    if store.is_empty() {
        lines.push(strings.empty.to_string());
    }
    lines.extend(store.todos().iter().map(|todo| {
        let mark = if todo.completed { 'x' } else { ' ' };
        format!("[{mark}] {}  ({})  [{}]", todo.title, todo.id, strings.delete)
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::TodoClient;
    use crate::http::HttpResponse;

    fn store_with(body: &str) -> TodoSyncStore {
        let mut store = TodoSyncStore::new(TodoClient::new("http://localhost:8000"));
        store.finish_load(Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }));
        store
    }

    #[test]
    fn empty_collection_shows_empty_message() {
        let out = render(&store_with("[]"), &Strings::default());
        assert_eq!(out, "Todo App\n> Enter a new todo... [Add]\nNo todos\n");
    }

    #[test]
    fn items_render_in_order_with_marks() {
        let store = store_with(
            r#"[{"id":"1","title":"Buy milk","completed":false},
                {"id":"2","title":"Walk dog","completed":true}]"#,
        );
        let out = render(&store, &Strings::for_locale(Locale::Ja));
        let lines: Vec<&str> = out.lines().skip(2).collect();
        assert_eq!(lines, ["[ ] Buy milk  (1)  [削除]", "[x] Walk dog  (2)  [削除]"]);
    }

    #[test]
    fn pending_create_changes_the_button_label() {
        let mut store = store_with("[]");
        store.set_draft("Buy milk");
        store.begin_create("Buy milk");
        let out = render(&store, &Strings::default());
        assert!(out.contains("> Buy milk [Adding...]"));
    }

    #[test]
    fn every_line_ends_with_a_newline() {
        let store = store_with(r#"[{"id":"1","title":"Buy milk","completed":true}]"#);
        let out = render(&store, &Strings::default());
        assert_eq!(
            out,
            "Todo App\n> Enter a new todo... [Add]\n[x] Buy milk  (1)  [Delete]\n"
        );
    }

    #[test]
    fn locale_parses_case_insensitively() {
        assert_eq!("JA".parse::<Locale>().unwrap(), Locale::Ja);
        assert!("fr".parse::<Locale>().is_err());
    }
}
