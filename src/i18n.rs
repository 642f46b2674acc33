//! # i18n — Localization Table
//!
//! Static display strings for the two supported languages.  Lookups are by
//! [`Language`]; an unknown language code falls back to English.

use serde::{Deserialize, Serialize};
use tracing::debug;

// ─── Language ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Id,
}

impl Language {
    /// Lenient parse used for toggles and config; anything unknown is `En`.
    pub fn parse(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "eng" => Language::En,
            "id" | "ind" => Language::Id,
            other => {
                debug!(code = other, "Unknown language code — falling back to en");
                Language::En
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Id => "id",
        }
    }

    /// Label on the header toggle button.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Language::En => "ENG",
            Language::Id => "IND",
        }
    }

    #[inline]
    pub fn texts(&self) -> &'static Texts {
        texts(*self)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ─── Texts ────────────────────────────────────────────────────────────────────

/// Every string the dashboard displays for one language.
///
/// Swapping the language swaps the whole `&'static Texts`, so a view never
/// mixes strings from two languages.
#[derive(Debug, PartialEq, Eq)]
pub struct Texts {
    // ── Section labels ────────────────────────────────────────────────────────
    pub title:            &'static str,
    pub manual_mode:      &'static str,
    pub connect_exchange: &'static str,
    pub trade_history:    &'static str,

    // ── Token cards ───────────────────────────────────────────────────────────
    pub symbol_label: &'static str,
    pub price_label:  &'static str,
    pub signal_label: &'static str,
    pub loading:      &'static str,
    pub unavailable:  &'static str,

    // ── Trade table ───────────────────────────────────────────────────────────
    pub col_time:     &'static str,
    pub col_action:   &'static str,
    pub col_token:    &'static str,
    pub col_quantity: &'static str,
    pub col_price:    &'static str,
    pub no_trades:    &'static str,

    // ── Connect form ──────────────────────────────────────────────────────────
    pub exchange_label:         &'static str,
    pub select_exchange:        &'static str,
    pub api_key_label:          &'static str,
    pub api_key_placeholder:    &'static str,
    pub secret_key_label:       &'static str,
    pub secret_key_placeholder: &'static str,
    pub connect_button:         &'static str,
    pub connecting:             &'static str,

    // ── Profile panel ─────────────────────────────────────────────────────────
    pub profile_title:      &'static str,
    pub profile_name:       &'static str,
    pub profile_exchange:   &'static str,
    pub profile_last_login: &'static str,
    pub profile_pnl:        &'static str,
    pub last_login_value:   &'static str,

    // ── Notifications ─────────────────────────────────────────────────────────
    pub connect_success:     &'static str,
    pub connect_rejected:    &'static str,
    pub connect_unreachable: &'static str,
    pub tokens_unavailable:  &'static str,
    pub history_unavailable: &'static str,

    pub footer: &'static str,
}

static EN: Texts = Texts {
    title:            "Aresa Crypto Trading",
    manual_mode:      "Manual Trading Mode",
    connect_exchange: "Connect Exchange",
    trade_history:    "Trade History",

    symbol_label: "Symbol",
    price_label:  "Price",
    signal_label: "Signal",
    loading:      "Loading...",
    unavailable:  "Data unavailable.",

    col_time:     "Time",
    col_action:   "Action",
    col_token:    "Token",
    col_quantity: "Quantity",
    col_price:    "Price",
    no_trades:    "No transactions yet.",

    exchange_label:         "Exchange",
    select_exchange:        "Select Exchange",
    api_key_label:          "API Key",
    api_key_placeholder:    "Enter API Key",
    secret_key_label:       "Secret Key",
    secret_key_placeholder: "Enter Secret Key",
    connect_button:         "Connect",
    connecting:             "Connecting...",

    profile_title:      "User Profile",
    profile_name:       "Name",
    profile_exchange:   "Connected Exchange",
    profile_last_login: "Last Login",
    profile_pnl:        "Total Profit/Loss",
    last_login_value:   "2 minutes ago",

    connect_success:     "Successfully connected to exchange.",
    connect_rejected:    "Failed to connect to exchange.",
    connect_unreachable: "Connection to exchange failed.",
    tokens_unavailable:  "Failed to load tokens.",
    history_unavailable: "Failed to load trade history.",

    footer: "© 2025 Aresa Crypto Trading. All rights reserved.",
};

static ID: Texts = Texts {
    title:            "Aresa Crypto Trading",
    manual_mode:      "Trading Manual",
    connect_exchange: "Hubungkan Exchange",
    trade_history:    "Riwayat Transaksi",

    symbol_label: "Symbol",
    price_label:  "Harga",
    signal_label: "Signal",
    loading:      "Memuat...",
    unavailable:  "Data tidak tersedia.",

    col_time:     "Waktu",
    col_action:   "Aksi",
    col_token:    "Token",
    col_quantity: "Jumlah",
    col_price:    "Harga",
    no_trades:    "Belum ada transaksi.",

    exchange_label:         "Exchange",
    select_exchange:        "Pilih Exchange",
    api_key_label:          "API Key",
    api_key_placeholder:    "Masukkan API Key",
    secret_key_label:       "Secret Key",
    secret_key_placeholder: "Masukkan Secret Key",
    connect_button:         "Hubungkan",
    connecting:             "Menghubungkan...",

    profile_title:      "Profil Pengguna",
    profile_name:       "Nama",
    profile_exchange:   "Exchange Terhubung",
    profile_last_login: "Login Terakhir",
    profile_pnl:        "Total Profit/Loss",
    last_login_value:   "2 menit lalu",

    connect_success:     "Berhasil terhubung ke exchange.",
    connect_rejected:    "Gagal terhubung ke exchange.",
    connect_unreachable: "Koneksi ke exchange gagal.",
    tokens_unavailable:  "Gagal ambil token.",
    history_unavailable: "Gagal ambil riwayat transaksi.",

    footer: "© 2025 Aresa Crypto Trading. All rights reserved.",
};

/// Look up the table for `language`.
pub fn texts(language: Language) -> &'static Texts {
    match language {
        Language::En => &EN,
        Language::Id => &ID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_code_falls_back_to_english() {
        assert_eq!(Language::parse("fr"), Language::En);
        assert!(std::ptr::eq(Language::parse("xx").texts(), texts(Language::En)));
        assert_eq!(Language::parse(" ID "), Language::Id);
    }

    #[test]
    fn test_section_labels() {
        let en = texts(Language::En);
        let id = texts(Language::Id);
        assert_eq!(en.manual_mode, "Manual Trading Mode");
        assert_eq!(id.manual_mode, "Trading Manual");
        assert_eq!(id.connect_exchange, "Hubungkan Exchange");
        assert_eq!(id.trade_history, "Riwayat Transaksi");
        assert_eq!(en.title, id.title);
    }

    #[test]
    fn test_connect_failures_have_distinct_messages() {
        for lang in [Language::En, Language::Id] {
            let t = texts(lang);
            assert_ne!(t.connect_rejected, t.connect_unreachable);
        }
    }
}
