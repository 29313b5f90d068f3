use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Configuration constants for the bot
/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Public base URL Telegram delivers webhook updates to
/// Read from WEBHOOK_HOST environment variable
/// Example: https://your-app.onrender.com
/// The bot refuses to start serving when this is unset
pub static WEBHOOK_HOST: Lazy<Option<String>> = Lazy::new(|| env::var("WEBHOOK_HOST").ok());

/// Port the webhook server listens on
/// Read from PORT environment variable (hosting platforms set it)
/// Default: 10000
pub static PORT: Lazy<u16> =
    Lazy::new(|| env::var("PORT").ok().and_then(|s| s.parse().ok()).unwrap_or(10000));

/// Administrator configuration
pub mod admin {
    use once_cell::sync::Lazy;
    use std::env;

    /// Chat id submissions are relayed to
    /// Read from ADMIN_ID environment variable
    pub static ADMIN_CHAT_ID: Lazy<i64> = Lazy::new(|| {
        env::var("ADMIN_ID")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(7_302_972_623)
    });
}

/// Screen configuration
pub mod screen {
    use once_cell::sync::Lazy;
    use std::env;
    use url::Url;

    /// Source of the static image shown on every screen of the flow
    pub const DEFAULT_WELCOME_PHOTO_URL: &str = "https://i.ibb.co/034TBXY/1.jpg";

    /// Welcome photo URL, overridable via WELCOME_PHOTO_URL
    pub static WELCOME_PHOTO_URL: Lazy<Url> = Lazy::new(|| {
        env::var("WELCOME_PHOTO_URL")
            .ok()
            .and_then(|s| Url::parse(&s).ok())
            .unwrap_or_else(|| {
                Url::parse(DEFAULT_WELCOME_PHOTO_URL).expect("default welcome photo URL is valid")
            })
    });

    /// Landing page offered from the main menu for downloading the client
    /// that produces account exports
    pub static DOWNLOAD_APP_URL: Lazy<Url> =
        Lazy::new(|| Url::parse("https://nicegram.app/").expect("download app URL is valid"));
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for HTTP requests (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}
