use crate::{error::JobError, paths::enriched_path};
use connectors::sheets::client::SheetClient;
use csv::{ByteRecord, ReaderBuilder, Terminator, WriterBuilder};
use engine_config::defaults::ROW_NUMBER_COLUMN;
use model::core::identifiers::SheetId;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prepends the service-assigned row number to every row of a CSV export.
///
/// Rows are paired with row numbers by position: the n-th data row gets the
/// n-th number the service reports. Both sides must have the same length.
pub struct RowEnricher<'a> {
    client: &'a dyn SheetClient,
}

impl<'a> RowEnricher<'a> {
    pub fn new(client: &'a dyn SheetClient) -> Self {
        Self { client }
    }

    /// Writes `{sheet_id}_enriched.csv` next to `csv_path` and returns its
    /// path. `row_count` overrides the page size of the row query, which
    /// otherwise equals the number of data rows in the export.
    pub async fn enrich(
        &self,
        csv_path: &Path,
        sheet_id: &SheetId,
        row_count: Option<usize>,
    ) -> Result<PathBuf, JobError> {
        let raw = tokio::fs::read(csv_path)
            .await
            .map_err(JobError::io(csv_path))?;
        let (header, rows) = read_export(&raw, csv_path)?;

        let ordinals = if rows.is_empty() {
            debug!("Sheet {} export has no data rows", sheet_id);
            Vec::new()
        } else {
            let page_size = row_count.unwrap_or(rows.len());
            self.client
                .get_sheet(sheet_id, page_size)
                .await?
                .row_numbers()
        };

        if ordinals.len() != rows.len() {
            return Err(JobError::RowCountMismatch {
                sheet_id: sheet_id.clone(),
                expected: rows.len(),
                actual: ordinals.len(),
            });
        }

        let output_dir = csv_path.parent().unwrap_or_else(|| Path::new(""));
        let target = enriched_path(output_dir, sheet_id);
        let body = write_enriched(&header, &rows, &ordinals, &target)?;
        tokio::fs::write(&target, body)
            .await
            .map_err(JobError::io(&target))?;

        info!(
            "Enriched {} rows of sheet {} into {}",
            rows.len(),
            sheet_id,
            target.display()
        );
        Ok(target)
    }
}

fn read_export(raw: &[u8], path: &Path) -> Result<(ByteRecord, Vec<ByteRecord>), JobError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw);

    let mut records = reader.byte_records();
    let header = match records.next() {
        Some(record) => record.map_err(JobError::csv(path))?,
        None => {
            return Err(JobError::InvalidExport {
                path: path.to_path_buf(),
                reason: "export has no header row".to_string(),
            });
        }
    };

    let rows = records
        .collect::<Result<Vec<_>, _>>()
        .map_err(JobError::csv(path))?;
    Ok((header, rows))
}

fn write_enriched(
    header: &ByteRecord,
    rows: &[ByteRecord],
    ordinals: &[i64],
    target: &Path,
) -> Result<Vec<u8>, JobError> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut out = ByteRecord::new();
    out.push_field(ROW_NUMBER_COLUMN.as_bytes());
    out.extend(header.iter());
    writer.write_byte_record(&out).map_err(JobError::csv(target))?;

    for (ordinal, row) in ordinals.iter().zip(rows) {
        out.clear();
        out.push_field(ordinal.to_string().as_bytes());
        out.extend(row.iter());
        writer.write_byte_record(&out).map_err(JobError::csv(target))?;
    }

    writer.into_inner().map_err(|err| JobError::Io {
        path: target.to_path_buf(),
        source: err.into_error(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeSheets;

    async fn write_export(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("42.csv");
        tokio::fs::write(&path, body).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_enrich_prepends_row_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let export = write_export(
            dir.path(),
            "Item,Amount\r\nRent,100\r\nFood,\"1,200\"\r\nTravel,30\r\n",
        )
        .await;
        let sheets = FakeSheets::new("").with_row_numbers(&[101, 102, 103]);

        let enriched = RowEnricher::new(&sheets)
            .enrich(&export, &SheetId::from("42"), None)
            .await
            .unwrap();

        assert_eq!(enriched, dir.path().join("42_enriched.csv"));
        assert_eq!(
            std::fs::read_to_string(&enriched).unwrap(),
            "RowNumber,Item,Amount\n101,Rent,100\n102,Food,\"1,200\"\n103,Travel,30\n"
        );
        assert_eq!(sheets.counts.row_queries(), 1);
        assert_eq!(sheets.counts.last_page_size(), 3);
    }

    #[tokio::test]
    async fn test_row_count_overrides_page_size() {
        let dir = tempfile::tempdir().unwrap();
        let export = write_export(dir.path(), "Item\nRent\n").await;
        let sheets = FakeSheets::new("").with_row_numbers(&[7]);

        RowEnricher::new(&sheets)
            .enrich(&export, &SheetId::from("42"), Some(500))
            .await
            .unwrap();
        assert_eq!(sheets.counts.last_page_size(), 500);
    }

    #[tokio::test]
    async fn test_count_mismatch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let export = write_export(dir.path(), "Item\nRent\nFood\nTravel\n").await;
        let sheets = FakeSheets::new("").with_row_numbers(&[1, 2]);

        let err = RowEnricher::new(&sheets)
            .enrich(&export, &SheetId::from("42"), None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            JobError::RowCountMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));
        assert!(!dir.path().join("42_enriched.csv").exists());
    }

    #[tokio::test]
    async fn test_header_only_export_skips_row_query() {
        let dir = tempfile::tempdir().unwrap();
        let export = write_export(dir.path(), "Item,Amount\n").await;
        let sheets = FakeSheets::new("");

        let enriched = RowEnricher::new(&sheets)
            .enrich(&export, &SheetId::from("42"), None)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(enriched).unwrap(),
            "RowNumber,Item,Amount\n"
        );
        assert_eq!(sheets.counts.row_queries(), 0);
    }

    #[tokio::test]
    async fn test_empty_export_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let export = write_export(dir.path(), "").await;
        let sheets = FakeSheets::new("");

        let err = RowEnricher::new(&sheets)
            .enrich(&export, &SheetId::from("42"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, JobError::InvalidExport { .. }));
    }
}
