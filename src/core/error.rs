use thiserror::Error;

/// Centralized error types for the application
///
/// All errors in the application are converted to this enum for consistent
/// error handling. Uses `thiserror` for automatic error conversion and
/// display formatting.
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// File download errors
    #[error("Download error: {0}")]
    Download(#[from] teloxide::DownloadError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Webhook URL construction errors
    #[error("Invalid webhook URL: {0}")]
    WebhookUrl(#[from] url::ParseError),

    /// Startup configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}
