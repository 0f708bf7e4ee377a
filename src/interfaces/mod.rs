pub mod report;

pub use report::ScenarioReport;
