//! Intent planner
//!
//! Maps the latest user message to at most one Firebase tool call. Matching is
//! keyword based and case-insensitive; identifiers keep their original case.
//! A trailing JSON object in the message is taken as document data.

use serde_json::{json, Map, Value};

use crate::tools::names;

/// Words that end the conversation when sent on their own
const EXIT_WORDS: [&str; 5] = ["exit", "quit", "bye", "goodbye", "done"];

/// Words that never name a collection, document or file
const STOP_WORDS: [&str; 8] = ["with", "in", "from", "to", "of", "and", "using", "into"];

/// Words that point at Firestore or Storage rather than Authentication
const DATA_WORDS: [&str; 8] = [
    "document",
    "documents",
    "doc",
    "docs",
    "file",
    "files",
    "collection",
    "collections",
];

/// What the agent should do with a user message
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    /// The user wants to stop
    Finish,

    /// Run one tool
    Call(PlannedCall),

    /// A tool was recognized but a required value is missing
    Incomplete {
        tool: &'static str,
        missing: &'static str,
    },

    /// No tool matches
    Unrecognized,
}

/// A tool call chosen by the planner
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCall {
    pub tool: &'static str,
    pub arguments: Value,
}

impl PlannedCall {
    fn new(tool: &'static str, arguments: Value) -> Plan {
        Plan::Call(Self { tool, arguments })
    }
}

/// Plan the response to one user message
pub fn plan(input: &str) -> Plan {
    let (text, data) = split_data(input);
    let words = Words::new(text);

    if words.len() == 1 && EXIT_WORDS.contains(&words.lower[0].as_str()) {
        return Plan::Finish;
    }

    if words.has("verify") && words.has("token") {
        return match words.value_after(&["token"], &[]) {
            Some(token) => PlannedCall::new(names::AUTH_VERIFY_TOKEN, json!({ "id_token": token })),
            None => incomplete(names::AUTH_VERIFY_TOKEN, "id_token"),
        };
    }

    if words.has("user") && !words.has_any(&DATA_WORDS) {
        return plan_auth(&words);
    }

    if words.has("collections") {
        return PlannedCall::new(names::FIRESTORE_LIST_COLLECTIONS, json!({}));
    }

    if words.has_any(&["file", "files"]) {
        return plan_storage(&words);
    }

    if words.has_any(&["document", "documents", "doc", "docs"]) {
        return plan_firestore(&words, data);
    }

    Plan::Unrecognized
}

fn plan_auth(words: &Words) -> Plan {
    let uid = || words.value_after(&["user"], &["id", "uid", "with"]);

    if words.has_any(&["create", "add", "register", "new"]) {
        let Some(email) = words.find(|w| w.contains('@')) else {
            return incomplete(names::AUTH_CREATE_USER, "email");
        };
        let mut arguments = Map::new();
        arguments.insert("email".to_string(), Value::String(email));
        if let Some(password) = words.value_after(&["password"], &[]) {
            arguments.insert("password".to_string(), Value::String(password));
        }
        if let Some(name) = words.value_after(&["named", "called"], &[]) {
            arguments.insert("display_name".to_string(), Value::String(name));
        }
        return PlannedCall::new(names::AUTH_CREATE_USER, Value::Object(arguments));
    }

    if words.has_any(&["delete", "remove"]) {
        return match uid() {
            Some(uid) => PlannedCall::new(names::AUTH_DELETE_USER, json!({ "uid": uid })),
            None => incomplete(names::AUTH_DELETE_USER, "uid"),
        };
    }

    match uid() {
        Some(uid) => PlannedCall::new(names::AUTH_GET_USER, json!({ "uid": uid })),
        None if words.has_any(&["get", "show", "find", "lookup", "fetch", "who"]) => {
            incomplete(names::AUTH_GET_USER, "uid")
        }
        None => Plan::Unrecognized,
    }
}

fn plan_storage(words: &Words) -> Plan {
    let file_path = || words.value_after(&["file"], &["at", "path", "called", "named"]);

    if words.has("download") {
        return match file_path() {
            Some(path) => PlannedCall::new(names::STORAGE_DOWNLOAD_FILE, json!({ "file_path": path })),
            None => incomplete(names::STORAGE_DOWNLOAD_FILE, "file_path"),
        };
    }

    if words.has_any(&["delete", "remove"]) {
        return match file_path() {
            Some(path) => PlannedCall::new(names::STORAGE_DELETE_FILE, json!({ "file_path": path })),
            None => incomplete(names::STORAGE_DELETE_FILE, "file_path"),
        };
    }

    if words.has_any(&["list", "show", "what"]) {
        let mut arguments = Map::new();
        if let Some(prefix) = words.value_after(&["in", "under"], &["the", "folder", "directory", "prefix"]) {
            arguments.insert("prefix".to_string(), Value::String(prefix));
        }
        return PlannedCall::new(names::STORAGE_LIST_FILES, Value::Object(arguments));
    }

    Plan::Unrecognized
}

fn plan_firestore(words: &Words, data: Option<Map<String, Value>>) -> Plan {
    let (collection, document_id) = target(words);

    if words.has_any(&["add", "create", "insert"]) {
        return match collection {
            Some(collection) => PlannedCall::new(
                names::FIRESTORE_CREATE_DOCUMENT,
                json!({ "collection": collection, "data": data.unwrap_or_default() }),
            ),
            None => incomplete(names::FIRESTORE_CREATE_DOCUMENT, "collection"),
        };
    }

    if words.has_any(&["update", "set", "modify"]) {
        return match (collection, document_id, data) {
            (Some(collection), Some(document_id), Some(data)) => PlannedCall::new(
                names::FIRESTORE_UPDATE_DOCUMENT,
                json!({ "collection": collection, "document_id": document_id, "data": data }),
            ),
            (None, _, _) => incomplete(names::FIRESTORE_UPDATE_DOCUMENT, "collection"),
            (_, None, _) => incomplete(names::FIRESTORE_UPDATE_DOCUMENT, "document_id"),
            (_, _, None) => incomplete(names::FIRESTORE_UPDATE_DOCUMENT, "data"),
        };
    }

    if words.has_any(&["delete", "remove"]) {
        return document_call(names::FIRESTORE_DELETE_DOCUMENT, collection, document_id);
    }

    if words.has_any(&["documents", "docs"]) && words.has_any(&["list", "show", "what"]) {
        return match collection {
            Some(collection) => {
                PlannedCall::new(names::FIRESTORE_LIST_DOCUMENTS, json!({ "collection": collection }))
            }
            None => incomplete(names::FIRESTORE_LIST_DOCUMENTS, "collection"),
        };
    }

    if words.has_any(&["get", "read", "show", "fetch", "open"]) {
        return document_call(names::FIRESTORE_GET_DOCUMENT, collection, document_id);
    }

    Plan::Unrecognized
}

fn document_call(tool: &'static str, collection: Option<String>, document_id: Option<String>) -> Plan {
    match (collection, document_id) {
        (Some(collection), Some(document_id)) => PlannedCall::new(
            tool,
            json!({ "collection": collection, "document_id": document_id }),
        ),
        (None, _) => incomplete(tool, "collection"),
        (_, None) => incomplete(tool, "document_id"),
    }
}

/// Collection and document named in the message; `users/alice` names both
fn target(words: &Words) -> (Option<String>, Option<String>) {
    let collection = words
        .value_after(&["collection"], &["called", "named"])
        .or_else(|| words.value_after(&["in", "from", "to", "of", "into"], &["a", "an", "the"]));
    let document_id = words.value_after(&["document", "doc"], &["called", "named", "with", "id"]);

    match (collection, document_id) {
        (None, Some(path)) if path.contains('/') => split_path(&path),
        (collection, document_id) => (collection, document_id),
    }
}

fn split_path(path: &str) -> (Option<String>, Option<String>) {
    match path.rsplit_once('/') {
        Some((collection, id)) if !collection.is_empty() && !id.is_empty() => {
            (Some(collection.to_string()), Some(id.to_string()))
        }
        _ => (None, Some(path.to_string())),
    }
}

fn incomplete(tool: &'static str, missing: &'static str) -> Plan {
    Plan::Incomplete { tool, missing }
}

/// Split off a trailing JSON object, returning the remaining text and the object
fn split_data(input: &str) -> (&str, Option<Map<String, Value>>) {
    let (Some(start), Some(end)) = (input.find('{'), input.rfind('}')) else {
        return (input, None);
    };
    if end < start {
        return (input, None);
    }

    match serde_json::from_str::<Map<String, Value>>(&input[start..=end]) {
        Ok(data) => (&input[..start], Some(data)),
        Err(_) => (input, None),
    }
}

/// Message words, original and lower-cased
struct Words {
    original: Vec<String>,
    lower: Vec<String>,
}

impl Words {
    fn new(text: &str) -> Self {
        let original: Vec<String> = text
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| matches!(c, '\'' | '"' | '`' | ',' | '.' | '?' | '!' | ':' | ';'))
                    .to_string()
            })
            .filter(|w| !w.is_empty())
            .collect();
        let lower = original.iter().map(|w| w.to_lowercase()).collect();
        Self { original, lower }
    }

    fn len(&self) -> usize {
        self.original.len()
    }

    fn has(&self, word: &str) -> bool {
        self.lower.iter().any(|w| w == word)
    }

    fn has_any(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.has(w))
    }

    /// First word, in its original case, matching `predicate`
    fn find(&self, predicate: impl Fn(&str) -> bool) -> Option<String> {
        self.original.iter().find(|w| predicate(w)).cloned()
    }

    /// First word after any of `keys`, skipping `fillers`; stop words end the search
    fn value_after(&self, keys: &[&str], fillers: &[&str]) -> Option<String> {
        let start = self.lower.iter().position(|w| keys.contains(&w.as_str()))?;

        self.lower
            .iter()
            .enumerate()
            .skip(start + 1)
            .find(|(_, w)| !fillers.contains(&w.as_str()))
            .filter(|(_, w)| !STOP_WORDS.contains(&w.as_str()))
            .map(|(i, _)| self.original[i].clone())
    }
}
