use std::io::Write;

use serde_json::Value;
use tracing::{info, warn};

use crate::{
    LoaderOptions,
    common::cell::{is_truthy, stringify},
    domain::{
        customer_document::CustomerDocument,
        outcome::{DocumentOutcome, LoadSummary, Outcome},
        payload::BusinessCustomerPayload,
    },
    error::ConfigError,
    loader::transport::{CustomerTransport, HttpTransport, TransportResponse, parse_header},
};

pub mod transport;

pub const BUSINESS_CUSTOMERS_PATH: &str = "/api/customers/business";

/// Everything a load run produced, in document order
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub outcomes: Vec<DocumentOutcome>,
    pub summary: LoadSummary,
}

/// Submits customer documents one at a time to the business customers endpoint.
pub struct CustomerLoader<T> {
    endpoint: String,
    transport: T,
}

impl CustomerLoader<HttpTransport> {
    /// Builds a loader backed by a real HTTP client
    ///
    /// # Errors
    ///
    /// Invalid auth header or the client couldn't be built
    pub fn from_options(options: &LoaderOptions) -> Result<Self, ConfigError> {
        let auth_header = options.auth_header.as_deref().map(parse_header).transpose()?;
        let transport = HttpTransport::new(options.timeout(), auth_header)?;
        Ok(Self::new(options, transport))
    }
}

impl<T: CustomerTransport> CustomerLoader<T> {
    pub fn new(options: &LoaderOptions, transport: T) -> Self {
        Self {
            endpoint: format!(
                "{}{BUSINESS_CUSTOMERS_PATH}",
                options.base_url.trim_end_matches('/')
            ),
            transport,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Maps a single document to its payload, sends it and classifies the answer.
    pub fn submit(&self, document: CustomerDocument) -> Outcome {
        let payload = BusinessCustomerPayload::from(document);
        match self.transport.post_json(&self.endpoint, &payload) {
            Ok(response) => classify(response),
            Err(err) => Outcome::TransportFailure(err.detail),
        }
    }

    /// Like [`Self::submit`] but for a raw artifact element. A document that doesn't have the
    /// canonical shape becomes [`Outcome::Malformed`] without being sent.
    pub fn load_document(&self, index: usize, raw: Value) -> DocumentOutcome {
        let business_name = raw
            .get("business_name")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let outcome = match serde_json::from_value::<CustomerDocument>(raw) {
            Ok(document) => self.submit(document),
            Err(err) => Outcome::Malformed(err.to_string()),
        };

        if !matches!(outcome, Outcome::Created) {
            warn!(index, business_name = ?business_name, outcome = ?outcome, "customer not created");
        }

        DocumentOutcome {
            index,
            business_name,
            outcome,
        }
    }

    /// Loads every document in order and writes one report line per document, followed by a
    /// summary line. A failing document never stops the ones after it.
    ///
    /// # Errors
    ///
    /// Only failing to write to `report`
    pub fn load<W: Write>(
        &self,
        documents: Vec<Value>,
        mut report: W,
    ) -> std::io::Result<LoadReport> {
        info!(documents = documents.len(), endpoint = %self.endpoint, "loading customers");

        let mut outcomes = Vec::with_capacity(documents.len());
        let mut summary = LoadSummary::default();

        for (index, raw) in documents.into_iter().enumerate() {
            let outcome = self.load_document(index, raw);
            writeln!(report, "{}", outcome.report_line())?;
            summary.record(&outcome.outcome);
            outcomes.push(outcome);
        }

        writeln!(report, "{summary}")?;
        report.flush()?;
        info!(
            created = summary.created,
            rejected = summary.rejected,
            transport_failed = summary.transport_failed,
            malformed = summary.malformed,
            "finished loading customers"
        );

        Ok(LoadReport { outcomes, summary })
    }
}

/// Turns an HTTP answer into an [`Outcome`].
///
/// Only 200 can be a success, and only when the body's `success` field is truthy.
pub fn classify(response: TransportResponse) -> Outcome {
    let TransportResponse { status, body } = response;

    if status != 200 {
        return Outcome::ApplicationRejected {
            status,
            reason: format!("{status} {body}"),
        };
    }

    let body: Value = match serde_json::from_str(&body) {
        Ok(body) => body,
        Err(err) => return Outcome::TransportFailure(format!("invalid response body: {err}")),
    };

    if body.get("success").is_some_and(is_truthy) {
        Outcome::Created
    } else {
        let reason = body
            .get("error")
            .filter(|err| !err.is_null())
            .map_or_else(|| "unknown error".to_owned(), stringify);
        Outcome::ApplicationRejected { status, reason }
    }
}
