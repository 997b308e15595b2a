use serde::Serialize;
use serde_json::Value;

use crate::{
    common::cell::stringify,
    domain::customer_document::{ContactKind, CustomerDocument},
};

/// Request body of `POST /api/customers/business`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessCustomerPayload {
    pub country: Option<String>,
    pub business_name: Option<String>,
    pub is_tax_registered: Value,
    pub tax_number: String,
    pub address: PayloadAddress,
    pub contacts: Vec<PayloadContact>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadAddress {
    #[serde(rename = "address1")]
    pub address_1: Value,
    #[serde(rename = "address2")]
    pub address_2: Value,
    pub city: Value,
    pub postal_code: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadContact {
    pub contact_type: ContactKind,
    pub contact_value: String,
}

impl From<CustomerDocument> for BusinessCustomerPayload {
    fn from(doc: CustomerDocument) -> Self {
        Self {
            country: doc.country,
            business_name: doc.business_name,
            is_tax_registered: doc.is_tax_registered,
            tax_number: stringify(&doc.tax_number),
            address: PayloadAddress {
                address_1: doc.address.address_1,
                address_2: doc.address.address_2,
                city: doc.address.city,
                postal_code: doc.address.postal_code,
            },
            contacts: doc
                .contacts
                .into_iter()
                .map(|contact| PayloadContact {
                    contact_type: contact.kind,
                    contact_value: stringify(&contact.value),
                })
                .collect(),
        }
    }
}
