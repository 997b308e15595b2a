use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    common::cell::{infer_cell, non_empty, text_cell},
    domain::source_record::SourceRecord,
};

/// The nested document the normalizer produces and the loader consumes. This is the shape
/// persisted in the handoff artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDocument {
    /// `null` when the cell was empty, but the key itself is required
    #[serde(deserialize_with = "required_nullable")]
    pub country: Option<String>,
    #[serde(deserialize_with = "required_nullable")]
    pub business_name: Option<String>,
    pub is_tax_registered: Value,
    pub tax_number: Value,
    pub address: Address,
    /// Documents produced elsewhere may omit contacts entirely
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub address_1: Value,
    pub address_2: Value,
    pub city: Value,
    pub postal_code: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "type")]
    pub kind: ContactKind,
    pub value: Value,
}

/// The contact types the customers API knows about. The normalizer only emits `Email` and
/// `Mobile`; any other text read back from a document is kept verbatim in `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactKind {
    Email,
    Mobile,
    Landline,
    Other,
    #[serde(untagged)]
    Unrecognized(String),
}

serde_plain::derive_display_from_serialize!(ContactKind);

fn required_nullable<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Option::<String>::deserialize(d)
}

impl From<&SourceRecord> for CustomerDocument {
    fn from(record: &SourceRecord) -> Self {
        Self {
            country: non_empty(&record.country),
            business_name: non_empty(&record.business_name),
            is_tax_registered: infer_cell(&record.is_tax_registered),
            tax_number: infer_cell(&record.tax_number),
            address: Address {
                address_1: text_cell(&record.address_1),
                address_2: text_cell(&record.address_2),
                city: text_cell(&record.city),
                postal_code: text_cell(&record.postal_code),
            },
            // always both entries, in this order, even when a value is empty
            contacts: vec![
                Contact {
                    kind: ContactKind::Email,
                    value: infer_cell(&record.email),
                },
                Contact {
                    kind: ContactKind::Mobile,
                    value: infer_cell(&record.mobile),
                },
            ],
        }
    }
}
