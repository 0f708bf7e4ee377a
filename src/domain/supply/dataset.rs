use crate::domain::errors::ForecastError;
use crate::domain::ml::feature_registry::{
    DATASET_COLUMNS, DAY_NAME, FEATURE_NAMES, TARGET_NAME, column_index,
};
use crate::domain::supply::types::HistoricalRecord;

/// Flat numeric training table: an ordered header plus one row per day.
///
/// This is the shape the schema contract is enforced on. Rows are kept as raw
/// numbers so that tables read from disk can be validated before any typed
/// record is built from them.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandDataset {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl DemandDataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        Self { columns, rows }
    }

    pub fn from_records(records: &[HistoricalRecord]) -> Self {
        let columns = DATASET_COLUMNS.iter().map(|c| c.to_string()).collect();
        let rows = records
            .iter()
            .map(|r| {
                vec![
                    r.day as f64,
                    r.base_demand,
                    r.tech_trend_multiplier,
                    r.geopolitical_risk,
                    r.retail_orders,
                    r.wafer_orders,
                ]
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Checks the header is exactly the canonical six-column header, in order.
    pub fn validate_schema(&self) -> Result<(), ForecastError> {
        let matches = self.columns.len() == DATASET_COLUMNS.len()
            && self
                .columns
                .iter()
                .zip(DATASET_COLUMNS.iter())
                .all(|(found, expected)| found == expected);

        if matches {
            Ok(())
        } else {
            Err(ForecastError::schema_mismatch(DATASET_COLUMNS, &self.columns))
        }
    }

    /// Checks every row against the header: one value per column, all finite,
    /// and a `Day` that is a whole number of at least 1.
    pub fn validate_rows(&self) -> Result<(), ForecastError> {
        let invalid = |line: usize, reason: String| {
            ForecastError::data_unavailable("training dataset", format!("row {}: {}", line, reason))
        };
        let day_idx = column_index(&self.columns, DAY_NAME);

        for (i, row) in self.rows.iter().enumerate() {
            let line = i + 1;
            if row.len() != self.columns.len() {
                return Err(invalid(
                    line,
                    format!("expected {} values, found {}", self.columns.len(), row.len()),
                ));
            }
            if let Some((column, value)) = self
                .columns
                .iter()
                .zip(row.iter())
                .find(|(_, v)| !v.is_finite())
            {
                return Err(invalid(line, format!("{} is not finite ({})", column, value)));
            }
            if let Some(day) = day_idx.map(|idx| row[idx]) {
                if day < 1.0 || day.fract() != 0.0 || day > u32::MAX as f64 {
                    return Err(invalid(line, format!("{} must be a whole number >= 1, got {}", DAY_NAME, day)));
                }
            }
        }
        Ok(())
    }

    /// Schema and row checks together.
    pub fn validate(&self) -> Result<(), ForecastError> {
        self.validate_schema()?;
        self.validate_rows()
    }

    /// Splits the table into the feature matrix (FEATURE_NAMES order) and target vector.
    pub fn features_and_target(&self) -> Result<(Vec<Vec<f64>>, Vec<f64>), ForecastError> {
        self.validate()?;

        let mut feature_idx = Vec::with_capacity(FEATURE_NAMES.len());
        for name in FEATURE_NAMES {
            let idx = column_index(&self.columns, name)
                .ok_or_else(|| ForecastError::schema_mismatch(DATASET_COLUMNS, &self.columns))?;
            feature_idx.push(idx);
        }
        let target_idx = column_index(&self.columns, TARGET_NAME)
            .ok_or_else(|| ForecastError::schema_mismatch(DATASET_COLUMNS, &self.columns))?;

        let mut x = Vec::with_capacity(self.rows.len());
        let mut y = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            x.push(feature_idx.iter().map(|&i| row[i]).collect());
            y.push(row[target_idx]);
        }
        Ok((x, y))
    }

    /// Typed view of the rows. Requires a valid schema and valid rows.
    pub fn records(&self) -> Result<Vec<HistoricalRecord>, ForecastError> {
        self.validate()?;
        Ok(self
            .rows
            .iter()
            .map(|row| HistoricalRecord {
                day: row[0] as u32,
                base_demand: row[1],
                tech_trend_multiplier: row[2],
                geopolitical_risk: row[3],
                retail_orders: row[4],
                wafer_orders: row[5],
            })
            .collect())
    }

    /// Returns a new table keeping only the rows at `indices`.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }

    /// Removes a column, producing a table that no longer honours the contract.
    pub fn without_column(&self, name: &str) -> Self {
        match column_index(&self.columns, name) {
            Some(idx) => Self {
                columns: self
                    .columns
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != idx)
                    .map(|(_, c)| c.clone())
                    .collect(),
                rows: self
                    .rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .enumerate()
                            .filter(|(i, _)| *i != idx)
                            .map(|(_, v)| *v)
                            .collect()
                    })
                    .collect(),
            },
            None => self.clone(),
        }
    }
}
