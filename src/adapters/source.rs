use crate::core::{ConfigProvider, Record, RecordSource, Storage};
use crate::utils::error::{QueryError, Result};
use crate::utils::validation::{input_extension, Validate};
use async_trait::async_trait;

/// Loads records from the input files named by the config.
pub struct FileRecordSource<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> FileRecordSource<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait]
impl<S: Storage, C: ConfigProvider> RecordSource for FileRecordSource<S, C> {
    async fn load(&self) -> Result<Vec<Record>> {
        let mut records = Vec::new();

        for file in self.config.input_files() {
            let data = self
                .storage
                .read_file(file)
                .await
                .map_err(|e| e.in_file(file))?;
            let decoded = decode_records(file, &data)?;
            tracing::debug!("Decoded {} records from {}", decoded.len(), file);
            records.extend(decoded);
        }

        Ok(records)
    }
}

/// 依副檔名選擇解析方式，並逐筆驗證
pub fn decode_records(file: &str, data: &[u8]) -> Result<Vec<Record>> {
    let records = match input_extension(file) {
        Some("csv") => decode_csv(data).map_err(|e| e.in_file(file))?,
        Some("json") => serde_json::from_slice::<Vec<Record>>(data)
            .map_err(|e| QueryError::from(e).in_file(file))?,
        Some("jsonl") => decode_json_lines(file, data)?,
        _ => {
            return Err(QueryError::UnsupportedFormatError {
                path: file.to_string(),
            })
        }
    };

    for (index, record) in records.iter().enumerate() {
        record
            .validate()
            .map_err(|e| QueryError::InvalidRecordError {
                file: file.to_string(),
                record: index + 1,
                reason: e.to_string(),
            })?;
    }

    Ok(records)
}

fn decode_csv(data: &[u8]) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut records = Vec::new();
    for row in reader.deserialize::<Record>() {
        records.push(row?);
    }
    Ok(records)
}

fn decode_json_lines(file: &str, data: &[u8]) -> Result<Vec<Record>> {
    let invalid = |record: usize, reason: String| QueryError::InvalidRecordError {
        file: file.to_string(),
        record,
        reason,
    };

    data.split(|byte| *byte == b'\n')
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .enumerate()
        .map(|(index, line)| {
            let line = std::str::from_utf8(line)
                .map_err(|e| invalid(index + 1, format!("not valid UTF-8: {}", e)))?;
            serde_json::from_str::<Record>(line).map_err(|e| invalid(index + 1, e.to_string()))
        })
        .collect()
}
