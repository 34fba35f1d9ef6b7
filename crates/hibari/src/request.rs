use reqwest::{Client, Method, Request};

use crate::error::Error;
use crate::fields::Fields;

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.myanimelist.net/v2";

/// Immutable description of one API request.
///
/// Query builders accumulate state here; execution takes a snapshot and
/// feeds it to [`build`]. Re-building a request from the same spec is safe
/// and yields an identical request.
#[derive(Debug, Clone)]
pub(crate) struct QuerySpec {
    pub method: Method,
    pub path: String,
    pub fields: Fields,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Complete page URL returned by the API. Once set it supersedes
    /// offset and every other query parameter.
    pub cursor: Option<String>,
    pub params: Vec<(&'static str, String)>,
    pub form: Vec<(&'static str, String)>,
}

impl QuerySpec {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            fields: Fields::new(),
            limit: None,
            offset: None,
            cursor: None,
            params: Vec::new(),
            form: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Clamp to the endpoint's maximum page size; the API rejects larger
    /// values outright.
    pub fn set_limit(&mut self, limit: u32, max: u32) {
        self.limit = Some(limit.min(max));
    }

    pub fn set_offset(&mut self, offset: u32) {
        self.offset = Some(offset);
    }

    pub fn set_cursor(&mut self, cursor: impl Into<String>) {
        self.cursor = Some(cursor.into());
        self.offset = None;
    }

    /// Set a query parameter, replacing any earlier value for the key.
    pub fn set_param(&mut self, key: &'static str, value: String) {
        self.params.retain(|(k, _)| *k != key);
        self.params.push((key, value));
    }

    /// Set a form body field, replacing any earlier value for the key.
    pub fn set_form(&mut self, key: &'static str, value: String) {
        self.form.retain(|(k, _)| *k != key);
        self.form.push((key, value));
    }
}

/// Compose an authenticated `reqwest::Request` from a spec snapshot.
///
/// No client-side validation happens here beyond what `QuerySpec` already
/// encodes; a well-formed request is produced even for values the API will
/// reject.
pub(crate) fn build(
    http: &Client,
    base_url: &str,
    spec: &QuerySpec,
    token: &str,
) -> Result<Request, Error> {
    let mut builder = if let Some(cursor) = &spec.cursor {
        // Cursors are complete URLs; they already carry every query
        // parameter of the originating request.
        http.request(spec.method.clone(), cursor.as_str())
    } else {
        let url = format!("{}/{}", base_url.trim_end_matches('/'), spec.path);
        let mut query: Vec<(&str, String)> = Vec::new();
        if !spec.fields.is_empty() {
            query.push(("fields", spec.fields.encode()));
        }
        if let Some(limit) = spec.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = spec.offset {
            query.push(("offset", offset.to_string()));
        }
        for (key, value) in &spec.params {
            query.push((key, value.clone()));
        }

        let mut builder = http.request(spec.method.clone(), url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder
    };

    builder = builder.bearer_auth(token);
    if !spec.form.is_empty() {
        builder = builder.form(&spec.form);
    }
    builder.build().map_err(Error::from)
}
