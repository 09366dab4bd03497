use thiserror::Error;

/// Errors raised while loading and normalizing the sales dataset
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: cannot parse {column} value '{value}' as a date")]
    Parse {
        row: usize,
        column: String,
        value: String,
    },

    #[error("schema error{}: column {column} {reason}", at_row(.row))]
    Schema {
        /// 1-based data row; `None` for header-level problems
        row: Option<usize>,
        column: String,
        reason: String,
    },
}

impl LoadError {
    pub fn missing_column(column: &str) -> Self {
        LoadError::Schema {
            row: None,
            column: column.to_string(),
            reason: "is missing".to_string(),
        }
    }

    pub fn schema(row: usize, column: &str, reason: impl Into<String>) -> Self {
        LoadError::Schema {
            row: Some(row),
            column: column.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, LoadError::Parse { .. })
    }

    pub fn is_schema_error(&self) -> bool {
        matches!(self, LoadError::Schema { .. })
    }
}

fn at_row(row: &Option<usize>) -> String {
    match row {
        Some(r) => format!(" at row {}", r),
        None => String::new(),
    }
}
