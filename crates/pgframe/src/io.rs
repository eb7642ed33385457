//! Table files for the command line: Arrow IPC and CSV.

use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::ipc::reader::FileReader;
use arrow::ipc::writer::FileWriter;
use arrow_array::RecordBatch;

use crate::{Error, Result};

/// Rows sampled when inferring a CSV schema.
const CSV_INFER_ROWS: usize = 1000;

/// On-disk table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Arrow IPC file (`.arrow`, `.ipc`, `.feather`).
    Ipc,
    /// Comma-separated values with a header row.
    Csv,
}

impl TableFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "arrow" | "ipc" | "feather" => Ok(Self::Ipc),
            "csv" => Ok(Self::Csv),
            _ => Err(Error::config(format!(
                "unsupported table file {}: expected .arrow, .ipc, .feather or .csv",
                path.display()
            ))),
        }
    }
}

/// Load a whole file into one table.
pub fn load_table(path: &Path) -> Result<RecordBatch> {
    match TableFormat::from_path(path)? {
        TableFormat::Ipc => load_ipc(path),
        TableFormat::Csv => load_csv(path),
    }
}

fn load_ipc(path: &Path) -> Result<RecordBatch> {
    let reader = FileReader::try_new(File::open(path)?, None)?;
    let schema = reader.schema();
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

fn load_csv(path: &Path) -> Result<RecordBatch> {
    let mut file = File::open(path)?;
    let format = Format::default().with_header(true);
    let (schema, _) = format.infer_schema(&mut file, Some(CSV_INFER_ROWS))?;
    file.seek(SeekFrom::Start(0))?;

    let schema = Arc::new(schema);
    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_format(format)
        .build(file)?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

/// Write a table as an Arrow IPC file.
pub fn save_ipc(table: &RecordBatch, path: &Path) -> Result<()> {
    let mut writer = FileWriter::try_new(File::create(path)?, &table.schema())?;
    writer.write(table)?;
    writer.finish()?;
    Ok(())
}

/// Render a table as an ASCII grid.
pub fn pretty(table: &RecordBatch) -> Result<String> {
    Ok(arrow::util::pretty::pretty_format_batches(std::slice::from_ref(table))?.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow_array::cast::AsArray;
    use arrow_array::types::{Float64Type, Int64Type};
    use arrow_array::{Int32Array, StringArray};
    use arrow_schema::{DataType, Field, Schema};

    use super::*;

    fn sample() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int32, false),
            Field::new("name", DataType::Utf8, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![1, 2])),
                Arc::new(StringArray::from(vec![Some("Loft"), None])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            TableFormat::from_path(Path::new("a.arrow")).unwrap(),
            TableFormat::Ipc
        );
        assert_eq!(
            TableFormat::from_path(Path::new("a.FEATHER")).unwrap(),
            TableFormat::Ipc
        );
        assert_eq!(
            TableFormat::from_path(Path::new("dir/a.csv")).unwrap(),
            TableFormat::Csv
        );
        assert!(TableFormat::from_path(Path::new("a.parquet")).unwrap_err().is_config());
        assert!(TableFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_ipc_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.arrow");
        let table = sample();

        save_ipc(&table, &path).unwrap();
        let loaded = load_table(&path).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_csv_load_infers_types() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "id,price,name,available").unwrap();
        writeln!(file, "1,10.5,Loft,true").unwrap();
        writeln!(file, "2,99,Studio,false").unwrap();
        file.flush().unwrap();

        let table = load_table(file.path()).unwrap();
        assert_eq!(table.num_rows(), 2);

        let schema = table.schema();
        assert_eq!(schema.field(0).data_type(), &DataType::Int64);
        assert_eq!(schema.field(1).data_type(), &DataType::Float64);
        assert_eq!(schema.field(2).data_type(), &DataType::Utf8);
        assert_eq!(schema.field(3).data_type(), &DataType::Boolean);

        assert_eq!(table.column(0).as_primitive::<Int64Type>().value(1), 2);
        assert!((table.column(1).as_primitive::<Float64Type>().value(1) - 99.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_pretty() {
        let out = pretty(&sample()).unwrap();
        assert!(out.contains("| id | name |"));
        assert!(out.contains("Loft"));
    }
}
