//! Dispatch of request specs over HTTP.

use log::debug;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::request::{Method, RequestSpec};
use crate::{ApiError, ClientError};

/// Raw response to a dispatched request.
///
/// The client hands responses back without interpreting them; callers decode
/// the body themselves, e.g. with [`Response::json`].
#[derive(Clone, Debug)]
pub struct Response {
    status: StatusCode,
    body: String,
}

impl Response {
    /// Creates a response from its parts.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The response body as text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Deserializes the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Performs the actual network call for a [`RequestSpec`].
///
/// The default implementation is [`ReqwestTransport`]; tests and embedders
/// can supply their own.
pub trait Transport {
    fn send(&self, spec: &RequestSpec) -> Result<Response, ClientError>;
}

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Transport backed by a blocking [`reqwest`] client.
pub struct ReqwestTransport {
    endpoint: Url,
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates a transport that resolves paths against the given endpoint.
    pub fn new(endpoint: &Url) -> Self {
        Self {
            endpoint: endpoint.clone(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Creates a [Url] from the endpoint and the spec's path and query.
    fn build_url(&self, spec: &RequestSpec) -> Result<Url, url::ParseError> {
        self.endpoint.join(&spec.path_and_query())
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, spec: &RequestSpec) -> Result<Response, ClientError> {
        let url = self.build_url(spec)?;
        debug!("{} {url}", spec.method().as_str());

        let mut req = self.client.request(spec.method().into(), url);
        for (key, value) in spec.headers() {
            req = req.header(key.as_str(), value.as_str());
        }
        if let Some(body) = spec.body() {
            req = req.json(body);
        }

        let resp = req.send()?;
        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            return Err(ClientError::Postmark(ApiError::from_body(status, &text)));
        }

        Ok(Response::new(status, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(&"https://dmarc.postmarkapp.com".parse().unwrap())
    }

    #[test]
    fn builds_url_from_endpoint_and_path() {
        let spec = RequestSpec::new(Method::Get, "/records/my");
        assert_eq!(
            transport().build_url(&spec).unwrap().as_str(),
            "https://dmarc.postmarkapp.com/records/my"
        );
    }

    #[test]
    fn builds_url_with_query() {
        let spec = RequestSpec::new(Method::Get, "/records/my/reports")
            .query_if_nonempty("limit", "5");
        assert_eq!(
            transport().build_url(&spec).unwrap().as_str(),
            "https://dmarc.postmarkapp.com/records/my/reports?limit=5"
        );
    }

    #[test]
    fn response_accessors() {
        let resp = Response::new(StatusCode::OK, r#"{"verified":true}"#);
        assert!(resp.is_success());
        assert_eq!(resp.status(), StatusCode::OK);

        let decoded: serde_json::Value = resp.json().unwrap();
        assert_eq!(decoded["verified"], true);
    }

    #[test]
    fn response_failure_status() {
        let resp = Response::new(StatusCode::UNPROCESSABLE_ENTITY, "");
        assert!(!resp.is_success());
    }
}
