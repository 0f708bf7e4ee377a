use crate::domain::supply::types::FeatureVector;

/// Ordered list of predictor input columns.
/// This order MUST match the column order of the training matrix.
/// Any change here is a breaking change for the dataset contract.
pub const FEATURE_NAMES: &[&str] = &[
    "Base_Demand",
    "Tech_Trend_Multiplier",
    "Geopolitical_Risk",
    "Retail_Orders",
];

/// Regression target column.
pub const TARGET_NAME: &str = "MediaTek_Wafer_Orders";

/// Day index column, present in the dataset but never fed to the model.
pub const DAY_NAME: &str = "Day";

/// Full header of the flat training table, in order.
pub const DATASET_COLUMNS: &[&str] = &[
    DAY_NAME,
    "Base_Demand",
    "Tech_Trend_Multiplier",
    "Geopolitical_Risk",
    "Retail_Orders",
    TARGET_NAME,
];

/// Converts a feature vector into the model's input row.
pub fn features_to_f64_vector(fv: &FeatureVector) -> Vec<f64> {
    vec![
        fv.base_demand,
        fv.tech_trend_multiplier,
        fv.geopolitical_risk,
        fv.retail_orders,
    ]
}

/// Position of `name` in the dataset header, if present.
pub fn column_index(columns: &[String], name: &str) -> Option<usize> {
    columns.iter().position(|c| c == name)
}
