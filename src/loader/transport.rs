use std::time::Duration;

use reqwest::{
    blocking::Client,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use tracing::debug;

use crate::{
    domain::payload::BusinessCustomerPayload,
    error::{ConfigError, TransportError},
};

/// Status and raw body of an HTTP response
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Sends a single create-customer request. Implementations must not retry.
pub trait CustomerTransport {
    fn post_json(
        &self,
        url: &str,
        payload: &BusinessCustomerPayload,
    ) -> Result<TransportResponse, TransportError>;
}

impl<T: CustomerTransport + ?Sized> CustomerTransport for &T {
    fn post_json(
        &self,
        url: &str,
        payload: &BusinessCustomerPayload,
    ) -> Result<TransportResponse, TransportError> {
        (**self).post_json(url, payload)
    }
}

/// Parses `Name: value` into a header pair
pub fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), ConfigError> {
    let invalid = || ConfigError::InvalidAuthHeader(raw.to_owned());

    let (name, value) = raw.split_once(':').ok_or_else(invalid)?;
    let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| invalid())?;
    let value = HeaderValue::from_str(value.trim()).map_err(|_| invalid())?;

    Ok((name, value))
}

/// [`CustomerTransport`] over a blocking `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(
        timeout: Duration,
        auth_header: Option<(HeaderName, HeaderValue)>,
    ) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some((name, value)) = auth_header {
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

impl CustomerTransport for HttpTransport {
    fn post_json(
        &self,
        url: &str,
        payload: &BusinessCustomerPayload,
    ) -> Result<TransportResponse, TransportError> {
        debug!(url, business_name = ?payload.business_name, "posting customer");

        let response = self.client.post(url).json(payload).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(TransportResponse { status, body })
    }
}
