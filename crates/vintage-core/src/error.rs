use thiserror::Error;

#[derive(Debug, Error)]
pub enum VintageError {
    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Unparseable month '{value}' in column {column} (expected e.g. \"Jan 2024\")")]
    DateParse { column: String, value: String },

    #[error("Pipeline state error: {attempted} requires {required} to have run first")]
    PipelineState {
        attempted: &'static str,
        required: &'static str,
    },

    #[error("No matching cohorts: none of the requested book months ({requested}) are present in the vintage table")]
    NoMatchingCohorts { requested: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}

impl From<csv::Error> for VintageError {
    fn from(e: csv::Error) -> Self {
        VintageError::DataSource(e.to_string())
    }
}
