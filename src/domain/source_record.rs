use fake::Dummy;
use serde::Deserialize;

/// Column names the tabular source has to provide, in canonical order.
pub const SOURCE_COLUMNS: [&str; 10] = [
    "country",
    "business_name",
    "is_tax_registered",
    "tax_number",
    "address_1",
    "address_2",
    "city",
    "postal_code",
    "email",
    "mobile",
];

/// One flat row of the tabular source. Cells are kept raw; typing happens when the row is
/// placed into a [`CustomerDocument`](crate::domain::customer_document::CustomerDocument).
#[derive(Debug, Clone, PartialEq, Deserialize, Dummy)]
pub struct SourceRecord {
    pub country: String,
    pub business_name: String,
    pub is_tax_registered: String,
    pub tax_number: String,
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    pub postal_code: String,
    pub email: String,
    pub mobile: String,
}
