use std::{fs::File, io::Write, path::Path};

use tempfile::NamedTempFile;
use tracing::info;

use crate::{
    NormalizeOptions,
    domain::{customer_document::CustomerDocument, source_record::SourceRecord},
    error::ExtractError,
    parsers::csv_parser::read_source_records,
    utils::write_customer_documents,
};

/// One document per record, in input order. Values are placed, not validated.
pub fn normalize<'a, I>(records: I) -> Vec<CustomerDocument>
where
    I: IntoIterator<Item = &'a SourceRecord>,
{
    records.into_iter().map(CustomerDocument::from).collect()
}

/// Reads the csv at `input`, normalizes every row and replaces `output` with the resulting
/// documents.
///
/// # Errors
///
/// Any extraction failure aborts before `output` is touched.
pub fn normalize_csv_file(
    input: &Path,
    output: &Path,
    options: &NormalizeOptions,
) -> Result<Vec<CustomerDocument>, ExtractError> {
    let file = File::open(input).map_err(|source| ExtractError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    let records = read_source_records(file, options)?;
    info!(records = records.len(), input = %input.display(), "read source records");

    let documents = normalize(&records);

    let mut buf = Vec::new();
    write_customer_documents(&documents, &mut buf)?;
    replace_file(output, &buf).map_err(|source| ExtractError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    info!(documents = documents.len(), output = %output.display(), "wrote customer documents");

    Ok(documents)
}

/// Writes a sibling temp file and renames it over `path`, the old content stays in place until
/// the new one is complete.
fn replace_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use fake::{Fake, Faker};

    use super::*;
    use crate::domain::customer_document::ContactKind;

    const HEADER: &str =
        "country,business_name,is_tax_registered,tax_number,address_1,address_2,city,postal_code,email,mobile";

    #[test]
    fn test_normalize_preserves_length_order_and_contacts() {
        let records: Vec<SourceRecord> = (0..50).map(|_| Faker.fake()).collect();

        let documents = normalize(&records);

        assert_eq!(documents.len(), records.len());
        for (record, doc) in records.iter().zip(&documents) {
            assert_eq!(doc.business_name.as_deref().unwrap_or_default(), record.business_name);
            assert_eq!(doc.country.as_deref().unwrap_or_default(), record.country);
            let kinds: Vec<_> = doc.contacts.iter().map(|c| c.kind.clone()).collect();
            assert_eq!(kinds, [ContactKind::Email, ContactKind::Mobile]);
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let records: Vec<SourceRecord> = (0..10).map(|_| Faker.fake()).collect();
        assert_eq!(normalize(&records), normalize(&records));
    }

    #[test]
    fn test_normalize_csv_file_overwrites_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("output.json");

        std::fs::write(
            &input,
            format!("{HEADER}\nDE,Acme Co,True,12345,Main St 1,,Berlin,10115,a@b.com,555-1234\n"),
        )
        .unwrap();
        std::fs::write(&output, "stale content that is much longer than nothing").unwrap();

        let documents =
            normalize_csv_file(&input, &output, &NormalizeOptions::default()).unwrap();
        assert_eq!(documents.len(), 1);

        let written: Vec<CustomerDocument> =
            serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(written, documents);
    }

    #[test]
    fn test_normalize_csv_file_missing_column_leaves_output_alone() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("output.json");

        std::fs::write(&input, "country,business_name\nDE,Acme\n").unwrap();
        std::fs::write(&output, "previous run").unwrap();

        let res = normalize_csv_file(&input, &output, &NormalizeOptions::default());
        assert!(matches!(
            res,
            Err(ExtractError::MissingColumn("is_tax_registered"))
        ));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous run");
    }

    #[test]
    fn test_normalize_csv_file_failed_write_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        // a directory can't be replaced by a file
        let output = dir.path().join("output.json");
        std::fs::create_dir(&output).unwrap();
        std::fs::write(output.join("keep"), "x").unwrap();
        std::fs::write(
            &input,
            format!("{HEADER}\nDE,Acme Co,True,12345,Main St 1,,Berlin,10115,a@b.com,555-1234\n"),
        )
        .unwrap();

        let res = normalize_csv_file(&input, &output, &NormalizeOptions::default());
        assert!(matches!(res, Err(ExtractError::Write { .. })));

        let mut entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        entries.sort();
        assert_eq!(entries, ["data.csv", "output.json"]);
        assert!(output.is_dir());
    }

    #[test]
    fn test_replace_file_overwrites_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("output.json");
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        replace_file(&output, b"[]").unwrap();
        replace_file(&output, b"[1]").unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), b"[1]");
        assert_eq!(
            std::fs::read_dir(dir.path().join("nested")).unwrap().count(),
            1
        );
    }

    #[test]
    fn test_normalize_csv_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.json");

        let res = normalize_csv_file(
            &dir.path().join("nope.csv"),
            &output,
            &NormalizeOptions::default(),
        );
        assert!(matches!(res, Err(ExtractError::Io { .. })));
        assert!(!output.exists());
    }
}
