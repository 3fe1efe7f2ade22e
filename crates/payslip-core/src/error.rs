use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PayslipError {
    #[error("XML parse failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed layout document: {0}")]
    Structure(String),

    #[error("value not a bounding box: {value:?}")]
    InvalidBBox { value: String },

    #[error("document has no pages")]
    EmptyDocument,

    #[error("not a singleton text line: found {count}: {lines:?}")]
    NotSingleton { count: usize, lines: Vec<String> },

    #[error("no amount left in the value column for row {row:?}")]
    MissingAmount { row: String },

    #[error("invalid amount {raw:?}: {reason}")]
    Amount { raw: String, reason: String },

    #[error("unparseable date: {0:?}")]
    Date(String),

    #[error("{ledger}ByName: not found: {label:?} to place amount {amount}")]
    UnknownCategory {
        ledger: crate::ledger::Ledger,
        label: String,
        amount: crate::model::Usd,
    },

    #[error("failed to load accounts from {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{context}")]
    Context {
        context: String,
        #[source]
        source: Box<PayslipError>,
    },
}

impl PayslipError {
    /// Wraps `self` with a description of the step that was running.
    pub fn context(self, context: impl Into<String>) -> Self {
        PayslipError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error of a context chain.
    pub fn root_cause(&self) -> &PayslipError {
        match self {
            PayslipError::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Adds context to any result whose error converts into `PayslipError`.
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T, PayslipError>;

    fn with_context<C, F>(self, f: F) -> Result<T, PayslipError>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E: Into<PayslipError>> ResultExt<T> for Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T, PayslipError> {
        self.map_err(|e| e.into().context(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, PayslipError>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().context(f()))
    }
}
