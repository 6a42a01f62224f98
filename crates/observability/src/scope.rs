//! Request-level context attached to reported errors.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Identity hint for the user behind a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub email: Option<String>,
}

impl User {
    pub fn with_email(email: Option<String>) -> Self {
        Self { email }
    }
}

/// Context collected while a request is handled.
///
/// Cloning a scope and adding to the clone gives a child scope: the extra
/// context applies to whatever is captured with the clone and leaves the
/// request scope as it was.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scope {
    user: Option<User>,
    tags: BTreeMap<String, String>,
    extra: BTreeMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    pub fn set_extra(&mut self, key: impl Into<String>, value: Value) {
        self.extra.insert(key.into(), value);
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }
}
