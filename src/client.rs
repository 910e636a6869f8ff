use url::Url;

use crate::request::{Method, RequestSpec};
use crate::transport::{ReqwestTransport, Response, Transport};
use crate::{ClientBuilderError, ClientError};

/// Builder for a [Client] that handles default values.
pub struct ClientBuilder {
    endpoint: Option<Url>,
    account_token: Option<String>,
}

impl ClientBuilder {
    fn new() -> Self {
        Self {
            endpoint: None,
            account_token: None,
        }
    }

    /// Sets the API endpoint to the one given.
    pub fn endpoint(mut self, endpoint: &Url) -> Self {
        self.endpoint = Some(endpoint.clone());
        self
    }

    /// In the case that `endpoint` is the Some variant, sets the API endpoint to it.
    pub fn endpoint_if_some(mut self, endpoint: Option<&Url>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = Some(endpoint.clone());
        }
        self
    }

    /// Sets the account token to the one given.
    ///
    /// Without a token (or with an empty one) requests go out without the
    /// `X-Api-Token` header.
    pub fn account_token(mut self, account_token: &str) -> Self {
        self.account_token = Some(account_token.to_string());
        self
    }

    /// Builds a [Client] from the builder.
    ///
    /// In the case that no API endpoint is set, the default endpoint of
    /// `https://dmarc.postmarkapp.com` is used.
    ///
    /// # Errors
    /// - `UrlParse` if the default API endpoint fails to parse. This shouldn't happen.
    pub fn build(self) -> Result<Client, ClientBuilderError> {
        let endpoint = match self.endpoint {
            Some(endpoint) => endpoint,
            None => "https://dmarc.postmarkapp.com".parse()?,
        };

        Ok(Client::new(&endpoint, self.account_token.as_deref()))
    }
}

/// API client.
pub struct Client {
    account_token: Option<String>,
    transport: Box<dyn Transport>,
}

impl Client {
    /// Creates a new Client against the given endpoint.
    pub fn new(endpoint: &Url, account_token: Option<&str>) -> Self {
        Self::with_transport(ReqwestTransport::new(endpoint), account_token)
    }

    /// Creates a new Client that dispatches through the given transport.
    pub fn with_transport<T: Transport + 'static>(
        transport: T,
        account_token: Option<&str>,
    ) -> Self {
        Self {
            account_token: account_token.map(str::to_string),
            transport: Box::new(transport),
        }
    }

    /// Returns a builder for a Client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns a spec for a request to the DMARC API.
    ///
    /// The spec already carries the JSON content headers, and the account
    /// token when a non-empty one is configured.
    fn spec(&self, method: Method, path: &str) -> RequestSpec {
        let spec = RequestSpec::new(method, path)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json");

        match self.account_token.as_deref() {
            Some(token) if !token.is_empty() => spec.header("X-Api-Token", token),
            _ => spec,
        }
    }

    /// Creates a DMARC record for the given domain, owned by `email`.
    pub fn create_record(&self, email: &str, domain: &str) -> Result<Response, ClientError> {
        let spec = self
            .spec(Method::Post, "/records")
            .field("email", email)
            .field("domain", domain);

        self.transport.send(&spec)
    }

    /// Gets the record associated with the configured account token.
    pub fn get_record(&self) -> Result<Response, ClientError> {
        self.transport.send(&self.spec(Method::Get, "/records/my"))
    }

    /// Gets the DNS snippet for this account.
    pub fn get_dns_snippet(&self) -> Result<Response, ClientError> {
        self.transport
            .send(&self.spec(Method::Get, "/records/my/dns"))
    }

    /// Verifies the DNS records.
    pub fn verify_dns(&self) -> Result<Response, ClientError> {
        self.transport
            .send(&self.spec(Method::Post, "/records/my/verify"))
    }

    /// Deletes the record.
    pub fn delete_record(&self) -> Result<Response, ClientError> {
        self.transport
            .send(&self.spec(Method::Delete, "/records/my"))
    }

    /// Builds the path for listing DMARC reports, with optional filters.
    ///
    /// Arguments that are empty strings are left out of the query string.
    /// Note that unlike the other operations this performs no request; it
    /// only returns the path.
    // TODO: dispatch through the transport like the sibling report calls.
    // That changes the return type, so check nothing depends on the path
    // string first.
    pub fn list_dmarc_reports(
        &self,
        from_date: &str,
        to_date: &str,
        limit: &str,
        after: &str,
    ) -> String {
        if from_date.is_empty() && to_date.is_empty() && limit.is_empty() && after.is_empty() {
            return "/records/my/reports".to_string();
        }

        RequestSpec::new(Method::Get, "/records/my/reports")
            .query_if_nonempty("from_date", from_date)
            .query_if_nonempty("to_date", to_date)
            .query_if_nonempty("limit", limit)
            .query_if_nonempty("after", after)
            .path_and_query()
    }

    /// Gets a single DMARC report.
    ///
    /// The id is appended to `/records/my/reports` as-is, without a path
    /// separator.
    pub fn get_dmarc_report(&self, dmarc_report_id: &str) -> Result<Response, ClientError> {
        let path = format!("/records/my/reports{dmarc_report_id}");

        self.transport.send(&self.spec(Method::Get, &path))
    }

    /// Recovers the API token for the given owner.
    pub fn recover_api_token(&self, owner: &str) -> Result<Response, ClientError> {
        let spec = self
            .spec(Method::Post, "/tokens/recover")
            .field("owner", owner);

        self.transport.send(&spec)
    }

    /// Rotates the API token.
    pub fn rotate_api_token(&self) -> Result<Response, ClientError> {
        self.transport
            .send(&self.spec(Method::Post, "/records/my/token/rotate"))
    }
}
