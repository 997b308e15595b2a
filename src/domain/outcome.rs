use serde::Serialize;
use strum::{EnumDiscriminants, IntoDiscriminant};

/// Result of submitting a single document
#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(OutcomeKind), derive(Serialize), serde(rename_all = "kebab-case"))]
pub enum Outcome {
    Created,
    /// The API answered but refused the customer. `status` is the HTTP status, `reason` is
    /// either the `error` field of a 200 response or `"<status> <body>"` for any other status.
    ApplicationRejected { status: u16, reason: String },
    TransportFailure(String),
    /// The document couldn't be mapped to a payload, nothing was sent
    Malformed(String),
}

serde_plain::derive_display_from_serialize!(OutcomeKind);

/// An [`Outcome`] together with the document it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOutcome {
    /// Zero based position in the artifact
    pub index: usize,
    pub business_name: Option<String>,
    pub outcome: Outcome,
}

impl DocumentOutcome {
    /// The human readable report line for this outcome
    pub fn report_line(&self) -> String {
        let name = self
            .business_name
            .clone()
            .unwrap_or_else(|| format!("document #{}", self.index + 1));

        match &self.outcome {
            Outcome::Created => format!("Successfully created customer: {name}"),
            Outcome::ApplicationRejected {
                status: 200,
                reason,
            } => format!("Error creating customer {name}: {reason}"),
            Outcome::ApplicationRejected { reason, .. } => {
                format!("Request failed for {name}: {reason}")
            }
            Outcome::TransportFailure(detail) => {
                format!("Error sending request for {name}: {detail}")
            }
            Outcome::Malformed(reason) => {
                format!("Skipping malformed customer {name}: {reason}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub created: usize,
    pub rejected: usize,
    pub transport_failed: usize,
    pub malformed: usize,
}

impl LoadSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome.discriminant() {
            OutcomeKind::Created => self.created += 1,
            OutcomeKind::ApplicationRejected => self.rejected += 1,
            OutcomeKind::TransportFailure => self.transport_failed += 1,
            OutcomeKind::Malformed => self.malformed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.created + self.rejected + self.transport_failed + self.malformed
    }
}

impl<'a> FromIterator<&'a Outcome> for LoadSummary {
    fn from_iter<I: IntoIterator<Item = &'a Outcome>>(iter: I) -> Self {
        let mut summary = Self::default();
        for outcome in iter {
            summary.record(outcome);
        }
        summary
    }
}

impl std::fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Processed {} customers: {} created, {} rejected, {} transport failures, {} malformed",
            self.total(),
            self.created,
            self.rejected,
            self.transport_failed,
            self.malformed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_outcome(outcome: Outcome) -> DocumentOutcome {
        DocumentOutcome {
            index: 2,
            business_name: Some("Acme Co".into()),
            outcome,
        }
    }

    #[test]
    fn test_report_lines() {
        assert_eq!(
            make_outcome(Outcome::Created).report_line(),
            "Successfully created customer: Acme Co"
        );
        assert_eq!(
            make_outcome(Outcome::ApplicationRejected {
                status: 200,
                reason: "dup".into()
            })
            .report_line(),
            "Error creating customer Acme Co: dup"
        );
        assert_eq!(
            make_outcome(Outcome::ApplicationRejected {
                status: 422,
                reason: "422 bad".into()
            })
            .report_line(),
            "Request failed for Acme Co: 422 bad"
        );
        assert_eq!(
            make_outcome(Outcome::TransportFailure("refused".into())).report_line(),
            "Error sending request for Acme Co: refused"
        );
        assert_eq!(
            make_outcome(Outcome::Malformed("missing field".into())).report_line(),
            "Skipping malformed customer Acme Co: missing field"
        );
    }

    #[test]
    fn test_report_line_without_name() {
        let outcome = DocumentOutcome {
            index: 0,
            business_name: None,
            outcome: Outcome::TransportFailure("timeout".into()),
        };

        assert_eq!(
            outcome.report_line(),
            "Error sending request for document #1: timeout"
        );

        let outcome = DocumentOutcome {
            index: 4,
            business_name: None,
            outcome: Outcome::Malformed("missing field `contacts`".into()),
        };

        assert_eq!(
            outcome.report_line(),
            "Skipping malformed customer document #5: missing field `contacts`"
        );
    }

    #[test]
    fn test_summary() {
        let outcomes = [
            Outcome::Created,
            Outcome::Created,
            Outcome::ApplicationRejected {
                status: 500,
                reason: "500 oops".into(),
            },
            Outcome::TransportFailure("refused".into()),
            Outcome::Malformed("bad".into()),
        ];

        let summary: LoadSummary = outcomes.iter().collect();
        assert_eq!(
            summary,
            LoadSummary {
                created: 2,
                rejected: 1,
                transport_failed: 1,
                malformed: 1,
            }
        );
        assert_eq!(
            summary.to_string(),
            "Processed 5 customers: 2 created, 1 rejected, 1 transport failures, 1 malformed"
        );
    }

    #[test]
    fn test_outcome_kind_display() {
        assert_eq!(
            OutcomeKind::ApplicationRejected.to_string(),
            "application-rejected"
        );
        assert_eq!(
            Outcome::TransportFailure("x".into()).discriminant(),
            OutcomeKind::TransportFailure
        );
    }
}
