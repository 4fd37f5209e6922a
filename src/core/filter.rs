use crate::domain::model::Record;
use crate::utils::error::{QueryError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declarative record predicate, loadable from TOML or CLI flags.
///
/// All set criteria must hold. Records with an unknown age never satisfy an
/// age criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordFilter {
    pub adults_only: Option<bool>,
    pub require_age: Option<bool>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub email_domain: Option<String>,
    pub name_contains: Option<String>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        *self == RecordFilter::default()
    }

    pub fn matches(&self, record: &Record) -> bool {
        if self.adults_only.unwrap_or(false) && !record.is_adult() {
            return false;
        }

        if self.require_age.unwrap_or(false) && record.age().is_none() {
            return false;
        }

        if let Some(min) = self.min_age {
            if !matches!(record.age(), Some(age) if age >= min) {
                return false;
            }
        }

        if let Some(max) = self.max_age {
            if !matches!(record.age(), Some(age) if age <= max) {
                return false;
            }
        }

        if let Some(domain) = &self.email_domain {
            let record_domain = record.email().rsplit_once('@').map(|(_, d)| d);
            if !record_domain.is_some_and(|d| d.eq_ignore_ascii_case(domain)) {
                return false;
            }
        }

        if let Some(needle) = &self.name_contains {
            if !record.name().contains(needle.as_str()) {
                return false;
            }
        }

        true
    }

    /// 以 CLI 參數覆蓋目前設定（只覆蓋有給值的欄位）
    pub fn merge(&mut self, overrides: &RecordFilter) {
        if overrides.adults_only.is_some() {
            self.adults_only = overrides.adults_only;
        }
        if overrides.require_age.is_some() {
            self.require_age = overrides.require_age;
        }
        if overrides.min_age.is_some() {
            self.min_age = overrides.min_age;
        }
        if overrides.max_age.is_some() {
            self.max_age = overrides.max_age;
        }
        if overrides.email_domain.is_some() {
            self.email_domain = overrides.email_domain.clone();
        }
        if overrides.name_contains.is_some() {
            self.name_contains = overrides.name_contains.clone();
        }
    }
}

/// Lists only the criteria that narrow the match, e.g. `adults_only, min_age >= 21`.
impl fmt::Display for RecordFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.adults_only.unwrap_or(false) {
            parts.push("adults_only".to_string());
        }
        if self.require_age.unwrap_or(false) {
            parts.push("require_age".to_string());
        }
        if let Some(min) = self.min_age {
            parts.push(format!("min_age >= {}", min));
        }
        if let Some(max) = self.max_age {
            parts.push(format!("max_age <= {}", max));
        }
        if let Some(domain) = &self.email_domain {
            parts.push(format!("email_domain = {}", domain));
        }
        if let Some(needle) = &self.name_contains {
            parts.push(format!("name_contains = {:?}", needle));
        }

        if parts.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

impl Validate for RecordFilter {
    fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_age, self.max_age) {
            if min > max {
                return Err(QueryError::InvalidConfigValueError {
                    field: "filter.min_age".to_string(),
                    value: min.to_string(),
                    reason: format!("min_age must not exceed max_age ({})", max),
                });
            }
        }

        if let Some(domain) = &self.email_domain {
            validate_non_empty_string("filter.email_domain", domain)?;
        }

        if let Some(needle) = &self.name_contains {
            validate_non_empty_string("filter.name_contains", needle)?;
        }

        Ok(())
    }
}

pub fn both<A, B>(a: A, b: B) -> impl Fn(&Record) -> bool
where
    A: Fn(&Record) -> bool,
    B: Fn(&Record) -> bool,
{
    move |record: &Record| a(record) && b(record)
}

pub fn either<A, B>(a: A, b: B) -> impl Fn(&Record) -> bool
where
    A: Fn(&Record) -> bool,
    B: Fn(&Record) -> bool,
{
    move |record: &Record| a(record) || b(record)
}

pub fn negate<A>(a: A) -> impl Fn(&Record) -> bool
where
    A: Fn(&Record) -> bool,
{
    move |record: &Record| !a(record)
}
