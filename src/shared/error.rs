use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the BOM was fetched and exported
    Success = 0,
    /// Application error (authentication, missing product/BOM, network, file I/O, etc.)
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific errors for BOM fetching and export.
///
/// `CircularReference` and `LookupInconsistency` are never returned from a fetch;
/// the walker reports them as warnings and keeps going. They live here so the
/// message text is defined in one place.
#[derive(Debug, Error)]
pub enum BomError {
    #[error("Authentication failed for user '{username}' on database '{db}' at {url}\n\n💡 Hint: Please check your API key")]
    AuthenticationFailure {
        url: String,
        db: String,
        username: String,
    },

    #[error("API key is required\n\n💡 Hint: Set it via --api-key, the ODOO_API_KEY environment variable, or a --credentials file")]
    MissingCredential,

    #[error("Credentials file '{path}' not found")]
    CredentialsFileNotFound { path: PathBuf },

    #[error("Product with reference '{reference}' not found")]
    ProductNotFound { reference: String },

    #[error("No active BOM found for product '{reference}'")]
    BomNotFound { reference: String },

    #[error("Circular reference detected for BOM ID {bom_id}, skipping")]
    CircularReference { bom_id: i64 },

    #[error("Product ID {product_id} referenced by BOM ID {bom_id} has no catalog record, skipping line")]
    LookupInconsistency { product_id: i64, bom_id: i64 },

    #[error("Odoo RPC call '{method}' failed\nDetails: {details}")]
    RpcError { method: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },
}
