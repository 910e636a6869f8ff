//! Per-call request description.

use serde_json::{Map as JsonMap, Value as JsonValue};
use strum_macros::IntoStaticStr;
use url::form_urlencoded;

/// HTTP verbs used by the DMARC API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    /// Gets the string representation of the verb.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Description of a single outbound API request.
///
/// Built fresh for every call and handed to a
/// [`Transport`](crate::transport::Transport) for dispatch.
#[derive(Clone, Debug)]
pub struct RequestSpec {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<JsonMap<String, JsonValue>>,
}

impl RequestSpec {
    /// Creates a new spec for the given verb and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Adds the given header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Adds the given key-value pair to the JSON body.
    pub fn field<T: Into<JsonValue>>(mut self, key: &str, value: T) -> Self {
        self.body
            .get_or_insert_with(JsonMap::new)
            .insert(key.to_string(), value.into());
        self
    }

    /// In the case that `value` is non-empty, adds it as a query parameter.
    pub fn query_if_nonempty(mut self, key: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.query.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> Option<&JsonMap<String, JsonValue>> {
        self.body.as_ref()
    }

    /// Renders the path, appending the URL-encoded query string if there is
    /// one.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish();

        format!("{}?{query}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_strings() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }

    #[test]
    fn path_without_query() {
        let spec = RequestSpec::new(Method::Get, "/records/my");
        assert_eq!(spec.path_and_query(), "/records/my");
    }

    #[test]
    fn path_with_query() {
        let spec = RequestSpec::new(Method::Get, "/records/my/reports")
            .query_if_nonempty("from_date", "2020-01-01")
            .query_if_nonempty("limit", "10");
        assert_eq!(
            spec.path_and_query(),
            "/records/my/reports?from_date=2020-01-01&limit=10"
        );
    }

    #[test]
    fn empty_query_values_are_skipped() {
        let spec = RequestSpec::new(Method::Get, "/records/my/reports")
            .query_if_nonempty("from_date", "")
            .query_if_nonempty("after", "abc");
        assert_eq!(spec.path_and_query(), "/records/my/reports?after=abc");
    }

    #[test]
    fn query_values_are_encoded() {
        let spec = RequestSpec::new(Method::Get, "/records/my/reports")
            .query_if_nonempty("after", "a value&more");
        assert_eq!(
            spec.path_and_query(),
            "/records/my/reports?after=a+value%26more"
        );
    }

    #[test]
    fn body_fields_accumulate() {
        let spec = RequestSpec::new(Method::Post, "/records")
            .field("email", "a@b.com")
            .field("domain", "b.com");
        let body = spec.body().unwrap();
        assert_eq!(body.get("email").unwrap(), "a@b.com");
        assert_eq!(body.get("domain").unwrap(), "b.com");
    }
}
