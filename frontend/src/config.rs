#[cfg(debug_assertions)]
pub fn get_telegram_api_base() -> &'static str {
    // Lets a local mock of the Bot API stand in during development
    match option_env!("TELEGRAM_API_BASE") {
        Some(base) if !base.is_empty() => base,
        _ => "https://api.telegram.org",
    }
}

#[cfg(not(debug_assertions))]
pub fn get_telegram_api_base() -> &'static str {
    "https://api.telegram.org"
}

/// Bot credentials are baked in at build time from the environment
/// (`TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID`). A build without them still
/// renders the page; submissions then fail with a missing-credentials error.
#[derive(Clone, Debug, PartialEq)]
pub struct TelegramConfig {
    pub api_base: String,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

impl TelegramConfig {
    pub fn from_build_env() -> Self {
        Self {
            api_base: get_telegram_api_base().to_string(),
            bot_token: non_empty(option_env!("TELEGRAM_BOT_TOKEN")),
            chat_id: non_empty(option_env!("TELEGRAM_CHAT_ID")),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
