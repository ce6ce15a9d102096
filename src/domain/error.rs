//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for stockviz.
#[derive(Debug, thiserror::Error)]
pub enum StockvizError {
    #[error("CSV parse error: {reason}")]
    Csv { reason: String },

    #[error("missing {column} column in header")]
    MissingColumn { column: String },

    #[error("invalid date on row {row}: {value:?}")]
    InvalidDate { row: usize, value: String },

    #[error("invalid close price on row {row}: {value:?}")]
    InvalidPrice { row: usize, value: String },

    #[error("duplicate date {date} in price series")]
    DuplicateDate { date: NaiveDate },

    #[error("price series is empty")]
    EmptySeries,

    #[error("invalid {name} window size {size}")]
    InvalidWindow { name: String, size: usize },

    #[error("failed to display chart: {reason}")]
    Display { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for StockvizError {
    fn from(err: csv::Error) -> Self {
        let reason = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => StockvizError::Io(e),
            _ => StockvizError::Csv { reason },
        }
    }
}

impl From<&StockvizError> for std::process::ExitCode {
    fn from(err: &StockvizError) -> Self {
        let code: u8 = match err {
            StockvizError::Io(_) => 1,
            StockvizError::InvalidWindow { .. } => 2,
            StockvizError::Csv { .. }
            | StockvizError::MissingColumn { .. }
            | StockvizError::InvalidDate { .. }
            | StockvizError::InvalidPrice { .. }
            | StockvizError::DuplicateDate { .. } => 3,
            StockvizError::EmptySeries => 5,
            StockvizError::Display { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::ExitCode;

    #[test]
    fn display_messages_name_the_row() {
        let err = StockvizError::InvalidDate {
            row: 4,
            value: "2024-13-01".into(),
        };
        assert_eq!(err.to_string(), "invalid date on row 4: \"2024-13-01\"");

        let err = StockvizError::MissingColumn {
            column: "close".into(),
        };
        assert_eq!(err.to_string(), "missing close column in header");
    }

    fn same_code(a: ExitCode, b: ExitCode) -> bool {
        format!("{:?}", a) == format!("{:?}", b)
    }

    #[test]
    fn exit_codes_by_category() {
        let io = StockvizError::Io(std::io::Error::other("boom"));
        assert!(same_code(ExitCode::from(&io), ExitCode::from(1)));
        assert!(same_code(
            ExitCode::from(&StockvizError::EmptySeries),
            ExitCode::from(5)
        ));
        let price = StockvizError::InvalidPrice {
            row: 1,
            value: "abc".into(),
        };
        assert!(same_code(ExitCode::from(&price), ExitCode::from(3)));
        assert!(!same_code(ExitCode::from(&price), ExitCode::from(5)));
    }

    #[test]
    fn csv_io_errors_become_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StockvizError = csv::Error::from(io).into();
        assert!(matches!(err, StockvizError::Io(_)));
    }
}
