//! Tabular datasets shown by data slides.
//!
//! Supports reading CSV and Parquet files into Arrow record batches.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use arrow_csv::ReaderBuilder as CsvReaderBuilder;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::SlideError;
use crate::view::TableView;

/// Rows sampled when inferring a CSV schema
const SCHEMA_INFERENCE_ROWS: usize = 100;

/// An in-memory table loaded from disk.
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl Dataset {
    /// Build a dataset from record batches sharing `schema`.
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.schema.fields().iter().map(|f| f.name().clone()).collect()
    }

    /// Format every cell for display. Nulls render as empty strings.
    pub fn to_table_view(&self) -> TableView {
        let options = FormatOptions::default().with_null("");
        let mut rows = Vec::with_capacity(self.num_rows());

        for batch in &self.batches {
            let formatters: Vec<Option<ArrayFormatter<'_>>> = batch
                .columns()
                .iter()
                .map(|column| ArrayFormatter::try_new(column.as_ref(), &options).ok())
                .collect();

            for row in 0..batch.num_rows() {
                rows.push(
                    formatters
                        .iter()
                        .map(|formatter| {
                            formatter
                                .as_ref()
                                .map(|f| f.value(row).to_string())
                                .unwrap_or_default()
                        })
                        .collect(),
                );
            }
        }

        TableView {
            columns: self.column_names(),
            rows,
        }
    }
}

/// Read a CSV file with a header row.
///
/// # Errors
/// Returns error if the file cannot be opened or is not valid CSV
pub fn read_csv(path: &Path) -> Result<Dataset, SlideError> {
    let open = || {
        File::open(path)
            .map(BufReader::new)
            .map_err(|e| data_error(path, format!("failed to open file: {e}")))
    };

    let (schema, _) = arrow_csv::reader::Format::default()
        .with_header(true)
        .infer_schema(open()?, Some(SCHEMA_INFERENCE_ROWS))
        .map_err(|e| data_error(path, format!("failed to infer schema: {e}")))?;

    let schema_ref: SchemaRef = Arc::new(schema);

    let reader = CsvReaderBuilder::new(schema_ref.clone())
        .with_header(true)
        .build(open()?)
        .map_err(|e| data_error(path, format!("failed to build CSV reader: {e}")))?;

    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| data_error(path, format!("failed to read CSV batches: {e}")))?;

    Ok(Dataset::new(schema_ref, batches))
}

/// Read a Parquet file.
///
/// # Errors
/// Returns error if the file cannot be opened or is not valid Parquet
pub fn read_parquet(path: &Path) -> Result<Dataset, SlideError> {
    let file = File::open(path).map_err(|e| data_error(path, format!("failed to open file: {e}")))?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| data_error(path, format!("failed to read parquet: {e}")))?;

    let schema = builder.schema().clone();
    let reader = builder
        .build()
        .map_err(|e| data_error(path, format!("failed to build reader: {e}")))?;

    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| data_error(path, format!("failed to read batches: {e}")))?;

    Ok(Dataset::new(schema, batches))
}

fn data_error(path: &Path, message: String) -> SlideError {
    SlideError::Data {
        path: path.to_path_buf(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    #[test]
    fn read_csv_infers_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.csv");
        std::fs::write(&path, "name,age\nAlice,25\nBob,\n").unwrap();

        let data = read_csv(&path).unwrap();
        assert_eq!(data.num_rows(), 2);
        assert_eq!(data.column_names(), vec!["name", "age"]);

        let table = data.to_table_view();
        assert_eq!(table.rows[0], vec!["Alice", "25"]);
        assert_eq!(table.rows[1], vec!["Bob", ""]);
    }

    #[test]
    fn read_parquet_written_by_arrow() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("player", DataType::Utf8, false),
            Field::new("score", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["ada", "grace"])),
                Arc::new(Int64Array::from(vec![10, 20])),
            ],
        )
        .unwrap();
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let data = read_parquet(&path).unwrap();
        assert_eq!(data.num_rows(), 2);
        assert_eq!(data.num_columns(), 2);
        assert_eq!(data.to_table_view().rows[1], vec!["grace", "20"]);
    }

    #[test]
    fn read_csv_reports_missing_file() {
        let err = read_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, SlideError::Data { .. }));
    }
}
