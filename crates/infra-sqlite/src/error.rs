// sqlx::Error -> AppError mapping

use pingpoll_core::error::AppError;
use sqlx::error::ErrorKind;

/// Convert sqlx::Error to AppError with structured information
///
/// Constraint failures become `IntegrityViolation`: rows are pre-filtered
/// against `hosts`, so hitting one means the filtering is broken.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.to_string()).unwrap_or_default();

            match db_err.kind() {
                ErrorKind::ForeignKeyViolation => AppError::IntegrityViolation(format!(
                    "Foreign key constraint violation: {} ({})",
                    db_err.message(),
                    code
                )),
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                    AppError::IntegrityViolation(format!(
                        "Domain constraint violation: {} ({})",
                        db_err.message(),
                        code
                    ))
                }
                ErrorKind::UniqueViolation => AppError::IntegrityViolation(format!(
                    "Unique constraint violation: {} ({})",
                    db_err.message(),
                    code
                )),
                // SQLite error codes: https://www.sqlite.org/rescode.html
                _ => match code.as_str() {
                    "5" => AppError::Database(format!(
                        "Database locked (SQLITE_BUSY): {}",
                        db_err.message()
                    )),
                    "13" => AppError::Database(format!("Database full: {}", db_err.message())),
                    "26" => AppError::InvalidDatabase(db_err.message().to_string()),
                    _ => AppError::Database(format!(
                        "Database error [{}]: {}",
                        code,
                        db_err.message()
                    )),
                },
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => AppError::Database(format!("Column not found: {}", col)),
        sqlx::Error::Io(io) => AppError::Database(format!("I/O error: {}", io)),
        _ => {
            // Connection, pool, protocol errors
            AppError::Database(err.to_string())
        }
    }
}
