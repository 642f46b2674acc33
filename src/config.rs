//! # config — Dashboard settings from environment variables

use std::time::Duration;

use anyhow::{bail, Context};

use crate::i18n::Language;

/// Everything the dashboard host needs to start a session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL.  `None` → offline demo backend.
    pub api_url:                Option<String>,
    /// Language selected at page load
    pub language:               Language,
    /// Per-request timeout for backend calls
    pub http_timeout:           Duration,
    /// Raise an error notification when a startup fetch fails
    pub notify_fetch_errors:    bool,
    /// Reset the credential draft after a successful connect
    pub clear_draft_on_success: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url:                None,
            language:               Language::En,
            http_timeout:           Duration::from_secs(10),
            notify_fetch_errors:    true,
            clear_draft_on_success: false,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("ARESA_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        if let Some(url) = &api_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("ARESA_API_URL must start with http:// or https:// (got '{url}')");
            }
        }

        let http_timeout = match lookup("ARESA_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .context("ARESA_HTTP_TIMEOUT_SECS must be a number")?,
            ),
            None => defaults.http_timeout,
        };

        Ok(Self {
            api_url,
            language: lookup("ARESA_LANG")
                .map(|code| Language::parse(&code))
                .unwrap_or(defaults.language),
            http_timeout,
            notify_fetch_errors: flag(lookup("ARESA_NOTIFY_FETCH_ERRORS"), defaults.notify_fetch_errors),
            clear_draft_on_success: flag(lookup("ARESA_CLEAR_DRAFT_ON_SUCCESS"), defaults.clear_draft_on_success),
        })
    }
}

fn flag(raw: Option<String>, default: bool) -> bool {
    raw.map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no" | "off"))
        .unwrap_or(default)
}
