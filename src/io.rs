//! Чтение и запись CSV таблиц

use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use ndarray::Array2;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::types::PASSENGER_ID;

/// Читает типизированные строки. Сначала проверяет наличие обязательных колонок,
/// остальные колонки файла игнорируются.
pub fn read_records<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| Error::csv(path, e))?;

    let headers = reader.headers().map_err(|e| Error::csv(path, e))?.clone();
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(Error::MissingColumn {
                column: column.to_string(),
                available: headers.iter().map(str::to_string).collect(),
            });
        }
    }

    let mut records = Vec::new();
    for result in reader.deserialize() {
        records.push(result.map_err(|e| Error::csv(path, e))?);
    }

    tracing::debug!("Read {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Строки таблицы, в которой первая колонка - идентификатор
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedRecords<T> {
    /// Исходный заголовок первой колонки
    pub index_name: String,
    pub records: Vec<T>,
}

/// Читает таблицу, где идентификатор берётся из первой колонки по позиции
/// (как текст) и отдаётся в поле `PassengerId`. Остальные колонки - по имени.
pub fn read_keyed_records<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<KeyedRecords<T>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| Error::csv(path, e))?;

    let headers = reader.headers().map_err(|e| Error::csv(path, e))?.clone();
    let index_name = headers.get(0).map(str::to_string).ok_or_else(|| Error::MissingColumn {
        column: "index".to_string(),
        available: Vec::new(),
    })?;

    let rest: Vec<&str> = headers.iter().skip(1).collect();
    for column in required {
        if !rest.contains(column) {
            return Err(Error::MissingColumn {
                column: column.to_string(),
                available: headers.iter().map(str::to_string).collect(),
            });
        }
    }

    // Одноимённая колонка дальше по строке не должна спорить с индексом
    let keyed: StringRecord = std::iter::once(PASSENGER_ID)
        .chain(rest.iter().map(|h| if *h == PASSENGER_ID { "" } else { *h }))
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| Error::csv(path, e))?;
        records.push(record.deserialize(Some(&keyed)).map_err(|e| Error::csv(path, e))?);
    }

    tracing::debug!("Read {} rows keyed by '{}' from {}", records.len(), index_name, path.display());
    Ok(KeyedRecords { index_name, records })
}

/// Пишет строки под явно заданным заголовком (порядок колонок как у полей `T`)
pub fn write_records_with_header<T: Serialize>(path: &Path, header: &[&str], records: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| Error::csv(path, e))?;
    writer.write_record(header).map_err(|e| Error::csv(path, e))?;
    for record in records {
        writer.serialize(record).map_err(|e| Error::csv(path, e))?;
    }
    writer.flush().map_err(|e| Error::io(path, e))?;

    tracing::debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| Error::csv(path, e))?;
    for record in records {
        writer.serialize(record).map_err(|e| Error::csv(path, e))?;
    }
    writer.flush().map_err(|e| Error::io(path, e))?;

    tracing::debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Читает числовую таблицу: первая колонка - индекс, остальные - f64.
/// Пустые ячейки становятся NaN.
pub fn read_frame(path: &Path) -> Result<Frame> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| Error::csv(path, e))?;

    let headers = reader.headers().map_err(|e| Error::csv(path, e))?.clone();
    let mut names = headers.iter().map(str::to_string);
    let index_name = names.next().ok_or_else(|| Error::MissingColumn {
        column: "index".to_string(),
        available: Vec::new(),
    })?;
    let columns: Vec<String> = names.collect();

    let mut index = Vec::new();
    let mut data = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| Error::csv(path, e))?;
        let mut fields = record.iter();
        index.push(fields.next().unwrap_or_default().to_string());

        for (column, field) in columns.iter().zip(fields) {
            data.push(parse_cell(field, column, row)?);
        }
    }

    let values = Array2::from_shape_vec((index.len(), columns.len()), data)?;
    tracing::debug!(
        "Read frame {}x{} from {}",
        values.nrows(),
        values.ncols(),
        path.display()
    );

    Frame::new(index_name, index, columns, values)
}

fn parse_cell(field: &str, column: &str, row: usize) -> Result<f64> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(f64::NAN);
    }
    field.parse::<f64>().map_err(|_| Error::InvalidNumber {
        column: column.to_string(),
        row,
        value: field.to_string(),
    })
}

pub fn write_frame(path: &Path, frame: &Frame) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| Error::csv(path, e))?;

    let header = std::iter::once(frame.index_name.as_str())
        .chain(frame.columns.iter().map(String::as_str));
    writer.write_record(header).map_err(|e| Error::csv(path, e))?;

    for (id, row) in frame.index.iter().zip(frame.values.rows()) {
        let fields = std::iter::once(id.clone()).chain(row.iter().map(|v| format_cell(*v)));
        writer.write_record(fields).map_err(|e| Error::csv(path, e))?;
    }
    writer.flush().map_err(|e| Error::io(path, e))?;

    tracing::debug!("Wrote frame {}x{} to {}", frame.nrows(), frame.ncols(), path.display());
    Ok(())
}

fn format_cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    serde_json::to_writer(std::io::BufWriter::new(file), value)?;
    Ok(())
}
