use std::io::Write;
use std::path::Path;

use super::model::{CellValue, Table};
use super::DataError;

/// Write `table` as comma-separated text with a header row.
///
/// Floats keep a decimal point (`1.0`, not `1`) so that reloading the output
/// infers the same column types. Nulls are written as empty fields.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<(), DataError> {
    let csv_err = |source| DataError::Csv {
        origin: "CSV export".to_string(),
        source,
    };

    let mut out = csv::Writer::from_writer(writer);
    out.write_record(&table.columns).map_err(csv_err)?;
    for row in &table.rows {
        out.write_record(row.iter().map(cell_to_field)).map_err(csv_err)?;
    }
    out.flush().map_err(|source| DataError::Io {
        path: "<csv export>".into(),
        source,
    })
}

/// Write `table` to `path`, replacing any existing file.
pub fn save_csv(table: &Table, path: &Path) -> Result<(), DataError> {
    let file = std::fs::File::create(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(table, std::io::BufWriter::new(file))
}

fn cell_to_field(cell: &CellValue) -> String {
    match cell {
        CellValue::String(s) => s.clone(),
        CellValue::Integer(i) => i.to_string(),
        CellValue::Float(f) => format!("{f:?}"),
        CellValue::Bool(b) => if *b { "True" } else { "False" }.to_string(),
        CellValue::Null => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bytes;

    #[test]
    fn reload_yields_same_table() {
        let table = Table::new(
            vec!["season".into(), "team".into(), "units".into(), "won".into()],
            vec![
                vec![
                    CellValue::Integer(2024),
                    CellValue::String("Kansas City, MO".into()),
                    CellValue::Float(1.0),
                    CellValue::Bool(true),
                ],
                vec![
                    CellValue::Integer(2023),
                    CellValue::String("Buffalo".into()),
                    CellValue::Null,
                    CellValue::Bool(false),
                ],
            ],
        )
        .unwrap();

        let mut buf = Vec::new();
        write_csv(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("season,team,units,won\n2024,\"Kansas City, MO\",1.0,True\n"));

        let reloaded = load_bytes("export.csv", &buf, "export").unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn header_only_export() {
        let table = Table::new(vec!["a".into(), "b".into()], Vec::new()).unwrap();
        let mut buf = Vec::new();
        write_csv(&table, &mut buf).unwrap();
        assert_eq!(buf, b"a,b\n");
    }
}
