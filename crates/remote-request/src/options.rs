use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// HTTP method used by the request helper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Head,
    Get,
    Post,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Head => "HEAD",
            Verb::Get => "GET",
            Verb::Post => "POST",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Verb> for reqwest::Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Head => reqwest::Method::HEAD,
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
        }
    }
}

/// Per-call request options; unset fields fall back to the handler defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Option<Verb>,
    pub timeout: Option<Duration>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, verb: Verb) -> Self {
        self.method = Some(verb);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Fill unset fields from the defaults
    pub fn resolve(
        self,
        url: &str,
        default_verb: Verb,
        default_timeout: Duration,
    ) -> ResolvedRequest {
        ResolvedRequest {
            url: url.to_string(),
            method: self.method.unwrap_or(default_verb),
            timeout: self.timeout.unwrap_or(default_timeout),
            headers: self.headers,
            body: self.body,
        }
    }
}

/// A fully specified request, ready for a [`Transport`](crate::Transport)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub url: String,
    pub method: Verb,
    pub timeout: Duration,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}
