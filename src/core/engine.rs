use crate::core::aggregate::mean;
use crate::core::filter::RecordFilter;
use crate::core::store::RecordStore;
use crate::core::{ConfigProvider, QueryReport, RecordSource};
use crate::utils::error::Result;
use chrono::Utc;

#[derive(Debug, Clone, Default)]
pub struct QueryRequest {
    pub find: Option<String>,
    pub filter: RecordFilter,
}

impl QueryRequest {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            find: config.find_key().map(str::to_string),
            filter: config.filter(),
        }
    }
}

/// Human-readable summary of what a query run would do, for `--dry-run`.
pub fn describe_plan<C: ConfigProvider>(config: &C, base_dir: &str) -> String {
    let mut lines = vec!["📋 Query plan:".to_string()];
    lines.push(format!("  Base dir: {}", base_dir));
    for file in config.input_files() {
        lines.push(format!("  Input: {}", file));
    }
    if let Some(key) = config.find_key() {
        lines.push(format!("  Find: {}", key));
    }
    lines.push(format!("  Filter: {}", config.filter()));
    lines.push(format!("  Format: {:?}", config.output_format()));
    lines.push(format!(
        "  Output: {}",
        config.output_path().unwrap_or("stdout")
    ));
    lines.join("\n")
}

pub struct QueryEngine<S: RecordSource> {
    source: S,
}

impl<S: RecordSource> QueryEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn load_store(&self) -> Result<RecordStore> {
        tracing::info!("📥 Loading records...");
        let records = self.source.load().await?;
        let store: RecordStore = records.into_iter().collect();
        tracing::info!("Loaded {} records", store.count());
        Ok(store)
    }

    pub async fn run(&self, request: &QueryRequest) -> Result<QueryReport> {
        let store = self.load_store().await?;

        let found = match &request.find {
            Some(key) => {
                let found = store.find_by_key(key);
                match &found {
                    Some(record) => tracing::debug!("Found {} for key {}", record.name(), key),
                    None => tracing::info!("No record with key {}", key),
                }
                found
            }
            None => None,
        };

        let matched = store.filter_by(|record| request.filter.matches(record));
        tracing::info!("🔎 {} of {} records matched", matched.len(), store.count());

        // 只對有年齡的記錄取平均，沒有資料時不呼叫 mean
        let ages: Vec<f64> = matched
            .iter()
            .filter_map(|record| record.age())
            .map(f64::from)
            .collect();
        let mean_age = if ages.is_empty() {
            None
        } else {
            Some(mean(&ages)?)
        };

        Ok(QueryReport {
            generated_at: Utc::now(),
            total: store.count(),
            adult_count: store.adults().len(),
            found: found.map(|record| (*record).clone()),
            matched: matched.iter().map(|record| (**record).clone()).collect(),
            mean_age,
        })
    }
}
