use crate::domain::errors::ForecastError;
use crate::domain::supply::dataset::DemandDataset;
use crate::domain::supply::types::HistoricalRecord;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

/// Flat CSV file holding the training table (one header row, one row per day).
pub struct CsvDatasetRepository {
    path: PathBuf,
}

impl CsvDatasetRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads and validates the table. The header is checked before any row is parsed.
    pub fn load(&self) -> Result<DemandDataset, ForecastError> {
        let source = self.path.display().to_string();
        let unavailable = |reason: String| ForecastError::data_unavailable(source.clone(), reason);

        if !self.path.exists() {
            return Err(unavailable("file not found".to_string()));
        }

        let file = File::open(&self.path).map_err(|e| unavailable(e.to_string()))?;
        let mut rdr = csv::Reader::from_reader(BufReader::new(file));

        let columns: Vec<String> = rdr
            .headers()
            .map_err(|e| unavailable(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if columns.is_empty() {
            return Err(unavailable("file is empty".to_string()));
        }

        let header_only = DemandDataset::new(columns.clone(), Vec::new());
        header_only.validate_schema()?;

        let mut rows = Vec::new();
        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| unavailable(e.to_string()))?;
            let mut row = Vec::with_capacity(columns.len());
            for (column, field) in columns.iter().zip(record.iter()) {
                let value = field
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| unavailable(format!("row {}, {}: {}", line + 1, column, e)))?;
                // `parse` accepts "NaN" and "inf"
                if !value.is_finite() {
                    return Err(unavailable(format!(
                        "row {}, {}: non-finite value {:?}",
                        line + 1,
                        column,
                        field.trim()
                    )));
                }
                row.push(value);
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(unavailable("no data rows".to_string()));
        }

        let dataset = DemandDataset::new(columns, rows);
        dataset.validate_rows().map_err(|e| match e {
            ForecastError::DataUnavailable { reason, .. } => unavailable(reason),
            other => other,
        })?;

        info!("Loaded {} rows of supply history from {:?}", dataset.len(), self.path);
        Ok(dataset)
    }

    pub fn save(&self, records: &[HistoricalRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {:?}", parent))?;
            }
        }

        let mut wtr = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to open {:?} for writing", self.path))?;
        for record in records {
            wtr.serialize(record)
                .context("Failed to serialize supply record")?;
        }
        wtr.flush().context("Failed to flush CSV writer")?;

        info!("Saved {} rows of supply history to {:?}", records.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generator::SyntheticSeriesGenerator;

    const HEADER: &str =
        "Day,Base_Demand,Tech_Trend_Multiplier,Geopolitical_Risk,Retail_Orders,MediaTek_Wafer_Orders";

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> CsvDatasetRepository {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        CsvDatasetRepository::new(path)
    }

    #[test]
    fn test_saved_dataset_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let repo = CsvDatasetRepository::new(dir.path().join("data").join("supply_logs.csv"));
        let records = SyntheticSeriesGenerator::with_seed(42).unwrap().generate(25).unwrap();

        repo.save(&records).unwrap();
        let loaded = repo.load().unwrap();

        assert_eq!(loaded.records().unwrap(), records);
    }

    #[test]
    fn test_saved_header_is_canonical() {
        let dir = tempfile::tempdir().unwrap();
        let repo = CsvDatasetRepository::new(dir.path().join("supply_logs.csv"));
        repo.save(&SyntheticSeriesGenerator::with_seed(1).unwrap().generate(2).unwrap())
            .unwrap();

        let contents = std::fs::read_to_string(repo.path()).unwrap();
        assert_eq!(contents.lines().next(), Some(HEADER));
    }

    #[test]
    fn test_missing_file_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let repo = CsvDatasetRepository::new(dir.path().join("absent.csv"));
        assert!(matches!(
            repo.load(),
            Err(ForecastError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_empty_file_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let repo = write(&dir, "empty.csv", "");
        assert!(matches!(
            repo.load(),
            Err(ForecastError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_header_only_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let repo = write(&dir, "header.csv", &format!("{}\n", HEADER));
        let err = repo.load().unwrap_err();
        assert!(err.to_string().contains("no data rows"));
    }

    #[test]
    fn test_missing_column_is_schema_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let repo = write(
            &dir,
            "no_risk.csv",
            "Day,Base_Demand,Tech_Trend_Multiplier,Retail_Orders,MediaTek_Wafer_Orders\n1,100.34,1.0,101,140\n",
        );
        match repo.load() {
            Err(ForecastError::SchemaMismatch { missing, .. }) => {
                assert_eq!(missing, vec!["Geopolitical_Risk".to_string()]);
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_cell_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let repo = write(
            &dir,
            "bad.csv",
            &format!("{}\n1,100.34,1.0,0.12,abc,140\n", HEADER),
        );
        let err = repo.load().unwrap_err();
        assert!(matches!(err, ForecastError::DataUnavailable { .. }));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_non_finite_cell_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        for cell in ["NaN", "inf", "-inf"] {
            let repo = write(
                &dir,
                "non_finite.csv",
                &format!("{}\n1,100.34,1.0,0.12,101,140\n2,100.69,1.0,0.08,99,{}\n", HEADER, cell),
            );
            let err = repo.load().unwrap_err();
            assert!(matches!(err, ForecastError::DataUnavailable { .. }), "{} accepted", cell);
            let msg = err.to_string();
            assert!(msg.contains("row 2"));
            assert!(msg.contains("MediaTek_Wafer_Orders"));
        }
    }

    #[test]
    fn test_fractional_day_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let repo = write(
            &dir,
            "bad_day.csv",
            &format!("{}\n1.5,100.34,1.0,0.12,101,140\n", HEADER),
        );
        assert!(matches!(
            repo.load(),
            Err(ForecastError::DataUnavailable { .. })
        ));
    }
}
