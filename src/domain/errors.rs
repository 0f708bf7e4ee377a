use thiserror::Error;

/// Errors raised while loading training data, fitting or querying the forecaster
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Training data unavailable at {source_name}: {reason}")]
    DataUnavailable { source_name: String, reason: String },

    #[error("Schema mismatch: missing columns {missing:?}, expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
        missing: Vec<String>,
    },

    #[error("Training failed: {reason}")]
    Training { reason: String },

    #[error("Prediction failed: {reason}")]
    Prediction { reason: String },
}

impl ForecastError {
    pub fn data_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        ForecastError::DataUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Builds a `SchemaMismatch` from the canonical header and the header actually seen.
    pub fn schema_mismatch(expected: &[&str], found: &[String]) -> Self {
        let missing = expected
            .iter()
            .filter(|col| !found.iter().any(|f| f == *col))
            .map(|col| col.to_string())
            .collect();

        ForecastError::SchemaMismatch {
            expected: expected.iter().map(|c| c.to_string()).collect(),
            found: found.to_vec(),
            missing,
        }
    }
}

/// Errors related to the synthetic series configuration
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Invalid generator parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_lists_missing_columns() {
        let found = vec!["Day".to_string(), "Base_Demand".to_string()];
        let error = ForecastError::schema_mismatch(&["Day", "Base_Demand", "Geopolitical_Risk"], &found);

        match &error {
            ForecastError::SchemaMismatch { missing, .. } => {
                assert_eq!(missing, &vec!["Geopolitical_Risk".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(error.to_string().contains("Geopolitical_Risk"));
    }

    #[test]
    fn test_data_unavailable_formatting() {
        let error = ForecastError::data_unavailable("data/supply_logs.csv", "file not found");
        let msg = error.to_string();
        assert!(msg.contains("data/supply_logs.csv"));
        assert!(msg.contains("file not found"));
    }
}
