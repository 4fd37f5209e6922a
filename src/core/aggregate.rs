use crate::utils::error::{QueryError, Result};

/// Arithmetic mean of `numbers`.
///
/// Empty input is an error rather than `0.0`.
pub fn mean(numbers: &[f64]) -> Result<f64> {
    if numbers.is_empty() {
        return Err(QueryError::EmptyInput);
    }

    let sum: f64 = numbers.iter().sum();
    Ok(sum / numbers.len() as f64)
}
