//! Per-call request description and result.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::dispatch::error::{DispatchError, DispatchResult};
use crate::http::verb::Verb;

/// Optional knobs for one call. Every field is independently omittable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecuteOptions {
    /// `{key}` → value bindings, applied first.
    pub parameters: HashMap<String, String>,
    /// Values for `{0}`, `{1}`, ..., applied after named parameters.
    pub args: Vec<String>,
    /// Deadline for this call only.
    pub timeout: Option<Duration>,
}

impl ExecuteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(values.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Everything needed to run one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub request_name: String,
    pub verb: Verb,
    /// JSON payload; `None` and `Value::Null` both mean no body.
    pub body: Option<Value>,
    pub options: ExecuteOptions,
}

impl RequestSpec {
    pub fn new(request_name: impl Into<String>, verb: Verb) -> Self {
        Self {
            request_name: request_name.into(),
            verb,
            body: None,
            options: ExecuteOptions::default(),
        }
    }

    pub fn get(request_name: impl Into<String>) -> Self {
        Self::new(request_name, Verb::Get)
    }

    pub fn post(request_name: impl Into<String>) -> Self {
        Self::new(request_name, Verb::Post)
    }

    pub fn put(request_name: impl Into<String>) -> Self {
        Self::new(request_name, Verb::Put)
    }

    pub fn delete(request_name: impl Into<String>) -> Self {
        Self::new(request_name, Verb::Delete)
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach any serializable body.
    pub fn try_json<B: Serialize + ?Sized>(mut self, body: &B) -> DispatchResult<Self> {
        self.body = Some(serde_json::to_value(body).map_err(DispatchError::Serialization)?);
        Ok(self)
    }

    #[must_use]
    pub fn options(mut self, options: ExecuteOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options = self.options.param(key, value);
        self
    }

    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.options = self.options.arg(value);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.timeout(timeout);
        self
    }
}

/// Typed payload plus the HTTP status it arrived with.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    pub data: T,
    pub status: StatusCode,
}

impl<T> ApiResult<T> {
    pub fn new(data: T, status: StatusCode) -> Self {
        Self { data, status }
    }

    pub fn into_data(self) -> T {
        self.data
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResult<U> {
        ApiResult {
            data: f(self.data),
            status: self.status,
        }
    }
}
