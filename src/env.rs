use crate::formatter::FormatterOptions;

/// Environment variable names used by this crate for convenient
/// configuration of the formatter from test environments.
///
/// These are purely helpers; the core formatter types remain decoupled from
/// environment access.

/// chrono strftime timestamp prefix, e.g. `%H:%M:%S `. Unset disables the
/// prefix entirely.
pub const LOG_TIMESTAMP_FORMAT_ENV: &str = "TEST_LOG_TIMESTAMP_FORMAT";

/// Set to `1`/`true`/`yes` to collapse each record onto a single line.
pub const LOG_SINGLE_LINE_ENV: &str = "TEST_LOG_SINGLE_LINE";

/// Set to `1`/`true`/`yes` to render the active scope chain.
pub const LOG_INCLUDE_SCOPES_ENV: &str = "TEST_LOG_INCLUDE_SCOPES";

/// Set to `1`/`true`/`yes` to format the timestamp in UTC instead of local
/// time.
pub const LOG_UTC_TIMESTAMP_ENV: &str = "TEST_LOG_UTC_TIMESTAMP";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_flag(key: &str) -> bool {
    matches!(env_or(key, "").as_str(), "1" | "true" | "yes")
}

/// Build [`FormatterOptions`] from the environment variables above.
pub fn options_from_env() -> FormatterOptions {
    FormatterOptions {
        timestamp_format: std::env::var(LOG_TIMESTAMP_FORMAT_ENV).ok(),
        single_line: env_flag(LOG_SINGLE_LINE_ENV),
        include_scopes: env_flag(LOG_INCLUDE_SCOPES_ENV),
        use_utc_timestamp: env_flag(LOG_UTC_TIMESTAMP_ENV),
    }
}
