pub mod customer_document;
pub mod outcome;
pub mod payload;
pub mod source_record;
