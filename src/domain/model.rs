use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// 成年年齡門檻
pub const ADULT_AGE: u32 = 18;

/// An immutable person record keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: String,
    email: String,
    #[serde(default)]
    age: Option<u32>,
}

impl Record {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age: None,
        }
    }

    pub fn with_age(name: impl Into<String>, email: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age: Some(age),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// `None` means the age is unknown, not zero.
    pub fn age(&self) -> Option<u32> {
        self.age
    }

    pub fn greeting(&self) -> String {
        format!("Hello, {}!", self.name)
    }

    pub fn is_adult(&self) -> bool {
        matches!(self.age, Some(age) if age >= ADULT_AGE)
    }
}

impl Validate for Record {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_non_empty_string("email", &self.email)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryReport {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub adult_count: usize,
    pub found: Option<Record>,
    pub matched: Vec<Record>,
    pub mean_age: Option<f64>,
}

impl QueryReport {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => Ok(self.to_text()),
        }
    }

    fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Records: {} ({} adults)", self.total, self.adult_count);

        if let Some(found) = &self.found {
            let _ = writeln!(out, "Found: {}", describe(found));
        }

        let _ = writeln!(out, "Matched: {}", self.matched.len());
        for record in &self.matched {
            let _ = writeln!(out, "  - {}", describe(record));
        }

        match self.mean_age {
            Some(mean) => {
                let _ = writeln!(out, "Mean age: {:.2}", mean);
            }
            None => {
                let _ = writeln!(out, "Mean age: n/a");
            }
        }
        out
    }
}

fn describe(record: &Record) -> String {
    match record.age() {
        Some(age) => format!("{} <{}> age {}", record.name(), record.email(), age),
        None => format!("{} <{}> age unknown", record.name(), record.email()),
    }
}
