//! Error types and normalization
//!
//! All failures reaching a route boundary are one of three categories:
//! application-raised [`AppError::Domain`] values carrying their own HTTP
//! status, store-raised [`PersistenceError`]s classified through a fixed
//! code table, and everything else (wrapped as 500). [`normalize`] maps any
//! of them to the single [`ErrorBody`] shape serialized to clients.
//!
//! The `From<sqlx::Error>` boundary conversion is gated behind the `sqlx`
//! feature; with `default-features = false` the taxonomy still exists but
//! persistence errors must be constructed directly.

use std::collections::BTreeMap;

use crate::config::Environment;
use crate::response::{ErrorBody, ErrorDebug};

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for missing records and other recoverable lookups
    Warn,
    /// Error level - for store failures and unexpected errors
    Error,
}

/// Closed enumeration of store failure kinds.
///
/// Defined once and shared between the store-client boundary
/// (`From<sqlx::Error>`) and the classifier so the two cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceErrorKind {
    UniqueViolation,
    RecordNotFound,
    ForeignKeyViolation,
    TableMissing,
    ConnectionTimeout,
    MissingRequiredField,
    InvalidValue,
    RelatedRecordMissing,
    /// Any store failure not covered above.
    Other,
}

impl PersistenceErrorKind {
    /// Map a PostgreSQL SQLSTATE to a kind. Unrecognized states fall through
    /// to [`PersistenceErrorKind::Other`].
    pub fn from_sqlstate(code: &str) -> Self {
        match code {
            "23505" => Self::UniqueViolation,
            "23503" => Self::ForeignKeyViolation,
            "23502" => Self::MissingRequiredField,
            "42P01" => Self::TableMissing,
            "22P02" | "22007" | "22003" => Self::InvalidValue,
            _ => Self::Other,
        }
    }

    /// Store-specific short code, surfaced in debug payloads and logs.
    pub fn code(self) -> &'static str {
        match self {
            Self::UniqueViolation => "unique-violation",
            Self::RecordNotFound => "record-not-found",
            Self::ForeignKeyViolation => "foreign-key-violation",
            Self::TableMissing => "table-missing",
            Self::ConnectionTimeout => "connection-timeout",
            Self::MissingRequiredField => "missing-required-field",
            Self::InvalidValue => "invalid-value",
            Self::RelatedRecordMissing => "related-record-missing",
            Self::Other => "database-error",
        }
    }

    /// The fixed (status, message) classification table.
    pub fn status_and_message(self) -> (u16, &'static str) {
        match self {
            Self::UniqueViolation => (409, "A record with this value already exists"),
            Self::RecordNotFound => (404, "Record not found"),
            Self::ForeignKeyViolation => (400, "Foreign key constraint failed"),
            Self::TableMissing => (500, "Database table does not exist"),
            Self::ConnectionTimeout => (408, "Database connection timeout"),
            Self::MissingRequiredField => (400, "Required field is missing"),
            Self::InvalidValue => (400, "Invalid value provided for field"),
            Self::RelatedRecordMissing => (404, "Required related record not found"),
            Self::Other => (500, "Database error occurred"),
        }
    }

    /// Machine-readable code attached to the response envelope.
    pub fn error_code(self) -> &'static str {
        match self {
            Self::UniqueViolation => "UNIQUE_CONSTRAINT_VIOLATION",
            _ => "DATABASE_ERROR",
        }
    }
}

/// Failure surfaced by the data-store client. Not constructed by application
/// logic; produced at the sqlx boundary and passed through unchanged.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct PersistenceError {
    pub kind: PersistenceErrorKind,
    /// Context fields reported by the store: `code` (raw SQLSTATE), `model`
    /// (table), `constraint`, and the derived `fields` / `field` columns.
    pub meta: BTreeMap<String, String>,
    /// Raw driver diagnostic text.
    pub message: String,
}

impl PersistenceError {
    pub fn new(
        kind: PersistenceErrorKind,
        meta: BTreeMap<String, String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            meta,
            message: message.into(),
        }
    }

    pub fn bare(kind: PersistenceErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind, BTreeMap::new(), message)
    }

    /// Client-facing message: the table entry for this kind, augmented with
    /// the implicated model/fields when the store reported them.
    pub fn client_message(&self) -> String {
        let (_, base) = self.kind.status_and_message();
        match self.kind {
            PersistenceErrorKind::UniqueViolation => match self.meta.get("fields") {
                Some(fields) => {
                    let model = self.meta.get("model").map(String::as_str).unwrap_or("record");
                    format!("{} with this {} already exists", model, fields)
                }
                None => base.to_string(),
            },
            PersistenceErrorKind::ForeignKeyViolation => match self.meta.get("field") {
                Some(field) => format!("Invalid reference: {}", field),
                None => base.to_string(),
            },
            PersistenceErrorKind::RecordNotFound => match self.meta.get("cause") {
                Some(cause) => format!("Record not found: {}", cause),
                None => base.to_string(),
            },
            _ => base.to_string(),
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self.kind {
            PersistenceErrorKind::UniqueViolation => Some(
                "Check if you're sending duplicate values or if your database sequence is out of sync",
            ),
            PersistenceErrorKind::ForeignKeyViolation => {
                Some("Ensure the referenced record exists in the related table")
            }
            _ => None,
        }
    }

    pub fn affected_fields(&self) -> Option<String> {
        match self.kind {
            PersistenceErrorKind::UniqueViolation => self.meta.get("fields").cloned(),
            PersistenceErrorKind::ForeignKeyViolation => self.meta.get("field").cloned(),
            _ => None,
        }
    }
}

/// Unified application error.
///
/// The variant order is the classification order: a domain error is used
/// verbatim, a persistence error dispatches through the code table, anything
/// else is reported as an internal failure.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Application-raised failure with an explicit status, used for
    /// pre-flight validation (e.g. a referenced user that does not exist).
    #[error("{message}")]
    Domain {
        status_code: u16,
        message: String,
        error_code: Option<&'static str>,
    },

    /// Store-raised failure, classified by its code.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Internal failure with a caller-supplied, client-safe message.
    #[error("{0}")]
    Internal(String),

    /// Internal failure wrapping an unexpected source error.
    #[error("{message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn domain(status_code: u16, message: impl Into<String>) -> Self {
        Self::Domain {
            status_code,
            message: message.into(),
            error_code: None,
        }
    }

    pub fn domain_with_code(
        status_code: u16,
        message: impl Into<String>,
        error_code: &'static str,
    ) -> Self {
        Self::Domain {
            status_code,
            message: message.into(),
            error_code: Some(error_code),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::domain(400, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::domain(404, message)
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            Self::Domain { .. } => LogLevel::Debug,
            Self::Persistence(err) => match err.kind {
                PersistenceErrorKind::RecordNotFound
                | PersistenceErrorKind::RelatedRecordMissing => LogLevel::Warn,
                _ => LogLevel::Error,
            },
            Self::Internal(_) | Self::InternalWithSource { .. } => LogLevel::Error,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Persistence(err.into())
    }
}

/// Derive the column(s) behind a default-named PostgreSQL constraint
/// (`<table>_<columns>_key` / `_fkey` / `_idx`).
#[cfg(feature = "sqlx")]
fn constraint_columns(table: Option<&str>, constraint: &str) -> Option<String> {
    let rest = constraint.strip_prefix(table?)?.strip_prefix('_')?;
    let columns = rest
        .strip_suffix("_key")
        .or_else(|| rest.strip_suffix("_fkey"))
        .or_else(|| rest.strip_suffix("_idx"))?;
    if columns.is_empty() {
        None
    } else {
        Some(columns.to_string())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::bare(
                PersistenceErrorKind::RecordNotFound,
                "no rows returned by a query that expected to return at least one row",
            ),
            sqlx::Error::PoolTimedOut => Self::bare(
                PersistenceErrorKind::ConnectionTimeout,
                "pool timed out while waiting for an open connection",
            ),
            sqlx::Error::Database(dbe) => {
                let kind = dbe
                    .code()
                    .map(|code| PersistenceErrorKind::from_sqlstate(&code))
                    .unwrap_or(PersistenceErrorKind::Other);

                let mut meta = BTreeMap::new();
                if let Some(code) = dbe.code() {
                    meta.insert("code".to_string(), code.into_owned());
                }
                if let Some(table) = dbe.table() {
                    meta.insert("model".to_string(), table.to_string());
                }
                if let Some(constraint) = dbe.constraint() {
                    meta.insert("constraint".to_string(), constraint.to_string());
                    if let Some(columns) = constraint_columns(dbe.table(), constraint) {
                        match kind {
                            PersistenceErrorKind::UniqueViolation => {
                                meta.insert("fields".to_string(), columns);
                            }
                            PersistenceErrorKind::ForeignKeyViolation => {
                                meta.insert("field".to_string(), columns);
                            }
                            _ => {}
                        }
                    }
                }

                Self {
                    kind,
                    meta,
                    message: dbe.message().to_string(),
                }
            }
            other => Self::bare(PersistenceErrorKind::Other, other.to_string()),
        }
    }
}

/// Map any failure to the normalized response shape.
///
/// Pure function of (failure, environment): classification picks the status
/// and message, the environment decides whether the `debug` block exists at
/// all. Logging is the emitter's job, not this function's.
pub fn normalize(error: &AppError, environment: Environment) -> ErrorBody {
    match error {
        AppError::Domain {
            status_code,
            message,
            error_code,
        } => ErrorBody {
            success: false,
            message: message.clone(),
            status_code: *status_code,
            error_code: error_code.map(str::to_string),
            debug: None,
        },
        AppError::Persistence(err) => {
            let (status_code, _) = err.kind.status_and_message();
            let debug = match environment {
                Environment::Production => None,
                Environment::Development => Some(ErrorDebug {
                    code: Some(err.kind.code().to_string()),
                    meta: err.meta.clone(),
                    original_message: err.message.clone(),
                    hint: err.hint().map(str::to_string),
                    affected_fields: err.affected_fields(),
                }),
            };
            ErrorBody {
                success: false,
                message: err.client_message(),
                status_code,
                error_code: Some(err.kind.error_code().to_string()),
                debug,
            }
        }
        AppError::Internal(message) => ErrorBody {
            success: false,
            message: message.clone(),
            status_code: 500,
            error_code: None,
            debug: None,
        },
        AppError::InternalWithSource { source, .. } => ErrorBody {
            success: false,
            message: "An unexpected error occurred".to_string(),
            status_code: 500,
            error_code: None,
            debug: match environment {
                Environment::Production => None,
                Environment::Development => Some(ErrorDebug {
                    code: None,
                    meta: BTreeMap::new(),
                    original_message: format!("{:#}", source),
                    hint: None,
                    affected_fields: None,
                }),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_classification_table_is_exact() {
        let expected = [
            (
                PersistenceErrorKind::UniqueViolation,
                409,
                "A record with this value already exists",
            ),
            (PersistenceErrorKind::RecordNotFound, 404, "Record not found"),
            (
                PersistenceErrorKind::ForeignKeyViolation,
                400,
                "Foreign key constraint failed",
            ),
            (
                PersistenceErrorKind::TableMissing,
                500,
                "Database table does not exist",
            ),
            (
                PersistenceErrorKind::ConnectionTimeout,
                408,
                "Database connection timeout",
            ),
            (
                PersistenceErrorKind::MissingRequiredField,
                400,
                "Required field is missing",
            ),
            (
                PersistenceErrorKind::InvalidValue,
                400,
                "Invalid value provided for field",
            ),
            (
                PersistenceErrorKind::RelatedRecordMissing,
                404,
                "Required related record not found",
            ),
            (PersistenceErrorKind::Other, 500, "Database error occurred"),
        ];

        for (kind, status, message) in expected {
            assert_eq!(kind.status_and_message(), (status, message));

            let err = AppError::Persistence(PersistenceError::bare(kind, "driver text"));
            let body = normalize(&err, Environment::Production);
            assert_eq!(body.status_code, status);
            assert_eq!(body.message, message);
            assert!(!body.success);
        }
    }

    #[test]
    fn test_unrecognized_sqlstate_maps_to_generic_database_error() {
        assert_eq!(
            PersistenceErrorKind::from_sqlstate("P9999"),
            PersistenceErrorKind::Other
        );
        assert_eq!(
            PersistenceErrorKind::from_sqlstate("40001"),
            PersistenceErrorKind::Other
        );

        let err = AppError::Persistence(PersistenceError::bare(
            PersistenceErrorKind::Other,
            "deadlock detected",
        ));
        let body = normalize(&err, Environment::Development);
        assert_eq!(body.status_code, 500);
        assert_eq!(body.message, "Database error occurred");
    }

    #[test]
    fn test_sqlstate_mapping() {
        assert_eq!(
            PersistenceErrorKind::from_sqlstate("23505"),
            PersistenceErrorKind::UniqueViolation
        );
        assert_eq!(
            PersistenceErrorKind::from_sqlstate("23503"),
            PersistenceErrorKind::ForeignKeyViolation
        );
        assert_eq!(
            PersistenceErrorKind::from_sqlstate("23502"),
            PersistenceErrorKind::MissingRequiredField
        );
        assert_eq!(
            PersistenceErrorKind::from_sqlstate("42P01"),
            PersistenceErrorKind::TableMissing
        );
        assert_eq!(
            PersistenceErrorKind::from_sqlstate("22P02"),
            PersistenceErrorKind::InvalidValue
        );
    }

    #[test]
    fn test_domain_error_passes_through_verbatim() {
        let err = AppError::bad_request("Author with userId 42 does not exist");
        let body = normalize(&err, Environment::Development);
        assert_eq!(body.status_code, 400);
        assert_eq!(body.message, "Author with userId 42 does not exist");
        assert!(body.error_code.is_none());
        assert!(body.debug.is_none());

        // The serialized response is exactly {success, message, statusCode}.
        let json = serde_json::to_value(&body).expect("serialize");
        let mut keys: Vec<&str> = json
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["message", "statusCode", "success"]);
    }

    #[test]
    fn test_domain_error_code_is_carried_when_set() {
        let err = AppError::domain_with_code(403, "Forbidden", "FORBIDDEN");
        let body = normalize(&err, Environment::Production);
        assert_eq!(body.error_code.as_deref(), Some("FORBIDDEN"));
    }

    #[test]
    fn test_production_responses_never_contain_debug() {
        let persistence = AppError::Persistence(PersistenceError::new(
            PersistenceErrorKind::UniqueViolation,
            meta(&[("model", "users"), ("fields", "username")]),
            "duplicate key value violates unique constraint",
        ));
        let unknown = AppError::from(anyhow::anyhow!("connection reset by peer"));
        let domain = AppError::bad_request("nope");

        for err in [&persistence, &unknown, &domain] {
            let body = normalize(err, Environment::Production);
            assert!(body.debug.is_none());
            let json = serde_json::to_value(&body).expect("serialize");
            assert!(json.get("debug").is_none());
        }

        // Raw driver text never leaks into the production message.
        let body = normalize(&unknown, Environment::Production);
        assert_eq!(body.message, "An unexpected error occurred");
    }

    #[test]
    fn test_development_unique_violation_names_fields() {
        let err = AppError::Persistence(PersistenceError::new(
            PersistenceErrorKind::UniqueViolation,
            meta(&[
                ("model", "users"),
                ("fields", "username"),
                ("constraint", "users_username_key"),
                ("code", "23505"),
            ]),
            "duplicate key value violates unique constraint \"users_username_key\"",
        ));
        let body = normalize(&err, Environment::Development);

        assert_eq!(body.status_code, 409);
        assert_eq!(body.message, "users with this username already exists");
        assert_eq!(
            body.error_code.as_deref(),
            Some("UNIQUE_CONSTRAINT_VIOLATION")
        );

        let debug = body.debug.expect("debug block outside production");
        assert_eq!(debug.code.as_deref(), Some("unique-violation"));
        assert_eq!(debug.affected_fields.as_deref(), Some("username"));
        assert!(debug.hint.is_some());
        assert_eq!(debug.meta.get("constraint").unwrap(), "users_username_key");
        assert!(debug.original_message.contains("users_username_key"));
    }

    #[test]
    fn test_unique_violation_without_meta_uses_base_message() {
        let err = AppError::Persistence(PersistenceError::bare(
            PersistenceErrorKind::UniqueViolation,
            "duplicate key",
        ));
        let body = normalize(&err, Environment::Development);
        assert_eq!(body.message, "A record with this value already exists");
        assert!(body.debug.expect("debug").affected_fields.is_none());
    }

    #[test]
    fn test_foreign_key_violation_names_field() {
        let err = AppError::Persistence(PersistenceError::new(
            PersistenceErrorKind::ForeignKeyViolation,
            meta(&[("model", "tasks"), ("field", "author_user_id")]),
            "insert or update on table \"tasks\" violates foreign key constraint",
        ));
        let body = normalize(&err, Environment::Development);
        assert_eq!(body.status_code, 400);
        assert_eq!(body.message, "Invalid reference: author_user_id");
        let debug = body.debug.expect("debug");
        assert_eq!(debug.affected_fields.as_deref(), Some("author_user_id"));
    }

    #[test]
    fn test_record_not_found_includes_cause_when_present() {
        let err = AppError::Persistence(PersistenceError::new(
            PersistenceErrorKind::RecordNotFound,
            meta(&[("cause", "Task to update not found")]),
            "no rows",
        ));
        let body = normalize(&err, Environment::Production);
        assert_eq!(body.status_code, 404);
        assert_eq!(body.message, "Record not found: Task to update not found");
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_constraint_columns_derivation() {
        assert_eq!(
            constraint_columns(Some("users"), "users_cognito_id_key"),
            Some("cognito_id".to_string())
        );
        assert_eq!(
            constraint_columns(Some("tasks"), "tasks_author_user_id_fkey"),
            Some("author_user_id".to_string())
        );
        assert_eq!(constraint_columns(Some("teams"), "users_username_key"), None);
        assert_eq!(constraint_columns(None, "users_username_key"), None);
        assert_eq!(constraint_columns(Some("users"), "users_pkey"), None);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_row_not_found_converts_at_the_boundary() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        match &err {
            AppError::Persistence(p) => {
                assert_eq!(p.kind, PersistenceErrorKind::RecordNotFound)
            }
            other => panic!("expected Persistence, got {:?}", other),
        }
        let body = normalize(&err, Environment::Production);
        assert_eq!(body.status_code, 404);
        assert_eq!(body.message, "Record not found");
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_pool_timeout_converts_at_the_boundary() {
        let err = PersistenceError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind, PersistenceErrorKind::ConnectionTimeout);
        assert_eq!(err.kind.status_and_message().0, 408);
    }

    #[test]
    fn test_internal_error_uses_caller_message() {
        let err = AppError::Internal("Search is temporarily unavailable".to_string());
        let body = normalize(&err, Environment::Production);
        assert_eq!(body.status_code, 500);
        assert_eq!(body.message, "Search is temporarily unavailable");
    }

    #[test]
    fn test_unknown_error_exposes_source_only_in_development() {
        let err = AppError::from(anyhow::anyhow!("socket closed"));
        let body = normalize(&err, Environment::Development);
        assert_eq!(body.status_code, 500);
        assert_eq!(body.message, "An unexpected error occurred");
        let debug = body.debug.expect("debug");
        assert!(debug.original_message.contains("socket closed"));
        assert!(debug.code.is_none());
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(AppError::bad_request("x").log_level(), LogLevel::Debug);
        assert_eq!(
            AppError::Persistence(PersistenceError::bare(
                PersistenceErrorKind::RecordNotFound,
                "x"
            ))
            .log_level(),
            LogLevel::Warn
        );
        assert_eq!(
            AppError::Persistence(PersistenceError::bare(
                PersistenceErrorKind::UniqueViolation,
                "x"
            ))
            .log_level(),
            LogLevel::Error
        );
        assert_eq!(
            AppError::Internal("x".to_string()).log_level(),
            LogLevel::Error
        );
    }
}
