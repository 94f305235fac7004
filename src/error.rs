use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

/// HTTP method type, re-exported for use with error inspection.
pub use reqwest::Method;
/// HTTP status code type, re-exported for use with error inspection.
pub use reqwest::StatusCode;

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Missing or malformed process configuration
    Config,
    /// The venue client was used before `initialize` completed
    NotInitialized,
    /// Tool arguments failed validation
    Validation,
    /// A mutating operation was attempted while readonly mode is on
    Readonly,
    /// Error related to non-successful HTTP call
    Status,
    /// Internal error from dependencies
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    backtrace: Backtrace,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            backtrace: Backtrace::capture(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    #[must_use]
    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let e = self.source.as_deref()?;
        e.downcast_ref::<E>()
    }

    /// `true` when this is an upstream HTTP 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.downcast_ref::<Status>()
            .is_some_and(|status| status.status_code == StatusCode::NOT_FOUND)
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Validation {
            reason: message.into(),
        }
        .into()
    }

    pub fn status<S: Into<String>>(
        status_code: StatusCode,
        method: Method,
        path: String,
        message: S,
    ) -> Self {
        Status {
            status_code,
            method,
            path,
            message: message.into(),
        }
        .into()
    }

    #[must_use]
    pub fn missing_credential(variable: &'static str) -> Self {
        Config::Missing { variable }.into()
    }

    pub fn invalid_config<S: Into<String>>(variable: &'static str, reason: S) -> Self {
        Config::Invalid {
            variable,
            reason: reason.into(),
        }
        .into()
    }

    #[must_use]
    pub fn readonly() -> Self {
        ReadonlyMode.into()
    }

    #[must_use]
    pub fn not_initialized() -> Self {
        NotInitialized.into()
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Internal {
            message: message.into(),
        }
        .into()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{:?}: {}", self.kind, src),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

#[non_exhaustive]
#[derive(Debug)]
pub struct Status {
    pub status_code: StatusCode,
    pub method: Method,
    pub path: String,
    pub message: String,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error({}) making {} call to {} with {}",
            self.status_code, self.method, self.path, self.message
        )
    }
}

impl StdError for Status {}

#[non_exhaustive]
#[derive(Debug)]
pub struct Validation {
    pub reason: String,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid: {}", self.reason)
    }
}

impl StdError for Validation {}

#[non_exhaustive]
#[derive(Debug)]
pub enum Config {
    Missing {
        variable: &'static str,
    },
    Invalid {
        variable: &'static str,
        reason: String,
    },
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Config::Missing { variable } => {
                write!(f, "missing credential: {variable} must be set")
            }
            Config::Invalid { variable, reason } => {
                write!(f, "invalid value for {variable}: {reason}")
            }
        }
    }
}

impl StdError for Config {}

#[non_exhaustive]
#[derive(Debug)]
pub struct ReadonlyMode;

impl fmt::Display for ReadonlyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "write operations are disabled: the server is running with POLYMARKET_READONLY=true"
        )
    }
}

impl StdError for ReadonlyMode {}

#[non_exhaustive]
#[derive(Debug)]
pub struct NotInitialized;

impl fmt::Display for NotInitialized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "venue client is not initialized, call initialize() first")
    }
}

impl StdError for NotInitialized {}

#[non_exhaustive]
#[derive(Debug)]
pub struct Internal {
    pub message: String,
}

impl fmt::Display for Internal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Internal {}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<polymarket_client_sdk::error::Error> for Error {
    fn from(e: polymarket_client_sdk::error::Error) -> Self {
        Error::with_source(Kind::Status, e)
    }
}

impl From<Validation> for Error {
    fn from(err: Validation) -> Self {
        Error::with_source(Kind::Validation, err)
    }
}

impl From<Status> for Error {
    fn from(err: Status) -> Self {
        Error::with_source(Kind::Status, err)
    }
}

impl From<Config> for Error {
    fn from(err: Config) -> Self {
        Error::with_source(Kind::Config, err)
    }
}

impl From<ReadonlyMode> for Error {
    fn from(err: ReadonlyMode) -> Self {
        Error::with_source(Kind::Readonly, err)
    }
}

impl From<NotInitialized> for Error {
    fn from(err: NotInitialized) -> Self {
        Error::with_source(Kind::NotInitialized, err)
    }
}

impl From<Internal> for Error {
    fn from(err: Internal) -> Self {
        Error::with_source(Kind::Internal, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_should_include_code_and_path() {
        let error = Error::status(
            StatusCode::INTERNAL_SERVER_ERROR,
            Method::GET,
            "/markets".to_owned(),
            "boom",
        );

        assert_eq!(error.kind(), Kind::Status);
        assert_eq!(
            error.to_string(),
            "Status: error(500 Internal Server Error) making GET call to /markets with boom"
        );
        assert!(!error.is_not_found(), "500 is not a not-found");
    }

    #[test]
    fn not_found_should_be_detected() {
        let error = Error::status(
            StatusCode::NOT_FOUND,
            Method::GET,
            "/markets/slug/x".to_owned(),
            "",
        );

        assert!(error.is_not_found(), "404 should be a not-found");
    }

    #[test]
    fn missing_credential_should_name_variable() {
        let error = Error::missing_credential("POLYMARKET_PRIVATE_KEY");

        assert_eq!(error.kind(), Kind::Config);
        assert!(error.to_string().contains("POLYMARKET_PRIVATE_KEY"));
    }

    #[test]
    fn readonly_should_mention_flag() {
        let error = Error::readonly();

        assert_eq!(error.kind(), Kind::Readonly);
        assert!(error.to_string().contains("POLYMARKET_READONLY"));
    }
}
