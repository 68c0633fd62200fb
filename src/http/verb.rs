//! HTTP verbs the dispatcher can issue.

use std::fmt;
use std::str::FromStr;

use reqwest::Method;

use crate::dispatch::error::DispatchError;

/// The four supported request verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    /// Upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }

    /// Whether a JSON body is sent for this verb (POST and PUT only).
    pub fn carries_body(&self) -> bool {
        matches!(self, Verb::Post | Verb::Put)
    }

    pub fn method(&self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = DispatchError;

    /// Parses `GET`, `post`, `Put`, ... ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "DELETE" => Ok(Verb::Delete),
            _ => Err(DispatchError::UnsupportedVerb(s.to_string())),
        }
    }
}

impl TryFrom<Method> for Verb {
    type Error = DispatchError;

    fn try_from(method: Method) -> Result<Self, Self::Error> {
        match method {
            Method::GET => Ok(Verb::Get),
            Method::POST => Ok(Verb::Post),
            Method::PUT => Ok(Verb::Put),
            Method::DELETE => Ok(Verb::Delete),
            other => Err(DispatchError::UnsupportedVerb(other.to_string())),
        }
    }
}

impl From<Verb> for Method {
    fn from(verb: Verb) -> Self {
        verb.method()
    }
}
