//! # view — View Composer
//!
//! Pure derivation of everything the dashboard page displays.  Nothing here
//! mutates controller state; [`compose`] reads a [`Dashboard`] and returns a
//! [`DashboardView`], and [`render_text`] turns that into the console page.
//!
//! ## Page layout
//! ```text
//! header   title + ENG/IND toggle
//! toast    current notification, if any
//! profile  static user panel
//! tokens   first 5 token cards, coloured by signal
//! form     exchange connect form
//! trades   trade history table (placeholder row when empty)
//! footer
//! ```

use std::fmt::Write as _;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;

use crate::controllers::{LoadState, Severity};
use crate::dashboard::Dashboard;
use crate::i18n::{Language, Texts};
use crate::models::{Exchange, Signal, TokenSignal, TradeAction, TradeRecord};

/// Token cards shown in the manual-mode grid.
pub const MAX_TOKEN_CARDS: usize = 5;

/// Placeholder for a token without a quote.
pub const MISSING_PRICE: &str = "N/A";

// ─── Signal classification ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStyle {
    Buy,
    Sell,
    Neutral,
}

impl SignalStyle {
    /// Card colour classes (green / red / yellow).
    pub fn classes(&self) -> &'static str {
        match self {
            SignalStyle::Buy => "bg-green-100 text-green-800",
            SignalStyle::Sell => "bg-red-100 text-red-800",
            SignalStyle::Neutral => "bg-yellow-100 text-yellow-800",
        }
    }
}

impl From<Signal> for SignalStyle {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Buy => SignalStyle::Buy,
            Signal::Sell => SignalStyle::Sell,
            Signal::Hold | Signal::Unrecognized(_) => SignalStyle::Neutral,
        }
    }
}

/// BUY → buy, SELL → sell, anything else (HOLD, missing, unknown) → neutral.
pub fn classify_signal(signal: Option<&str>) -> SignalStyle {
    Signal::from_raw(signal).into()
}

// ─── Number / time formatting ─────────────────────────────────────────────────

/// `1234567.891` → `1,234,567.891`.  At most three fraction digits, trailing
/// zeros dropped.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 && (int_part != "0" || !frac.is_empty()) {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `$`-prefixed price, or [`MISSING_PRICE`].
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("${}", format_number(p)),
        None => MISSING_PRICE.to_string(),
    }
}

/// Trade timestamp in the viewer's local timezone.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    format_timestamp_in(ts, &Local)
}

/// `M/D/YYYY, h:mm:ss AM`, in `tz`.
pub fn format_timestamp_in<Tz>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    ts.with_timezone(tz).format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

// ─── View model ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Labels {
    pub title:            &'static str,
    pub manual_mode:      &'static str,
    pub connect_exchange: &'static str,
    pub trade_history:    &'static str,
}

impl Labels {
    pub fn from_texts(t: &Texts) -> Self {
        Self {
            title:            t.title,
            manual_mode:      t.manual_mode,
            connect_exchange: t.connect_exchange,
            trade_history:    t.trade_history,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastView {
    pub message:  String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCard {
    pub name:   String,
    pub symbol: String,
    pub price:  String,
    pub signal: String,
    pub style:  SignalStyle,
    pub classes: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "items", rename_all = "snake_case")]
pub enum TokenSection {
    Loading,
    Unavailable,
    Cards(Vec<TokenCard>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeRow {
    pub time:     String,
    pub action:   TradeAction,
    pub style:    SignalStyle,
    pub symbol:   String,
    pub quantity: String,
    pub price:    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "items", rename_all = "snake_case")]
pub enum TradeSection {
    Loading,
    Unavailable,
    /// Loaded and empty: a single placeholder row.
    Empty(&'static str),
    Rows(Vec<TradeRow>),
}

/// Connect form as displayed.  Key values are never echoed, only whether
/// something has been typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub exchange:          Option<Exchange>,
    pub api_key_filled:    bool,
    pub secret_key_filled: bool,
    pub submitting:        bool,
    pub button:            &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub language: Language,
    pub labels:   Labels,
    pub toast:    Option<ToastView>,
    pub tokens:   TokenSection,
    pub form:     FormView,
    pub trades:   TradeSection,
}

// ─── Composition ──────────────────────────────────────────────────────────────

pub fn compose(dashboard: &Dashboard) -> DashboardView {
    let texts = dashboard.texts();
    let form = dashboard.form();

    DashboardView {
        language: dashboard.language(),
        labels:   Labels::from_texts(texts),
        toast:    dashboard.notification().map(|n| ToastView {
            message:  n.message.clone(),
            severity: n.severity,
        }),
        tokens: token_section(dashboard.data().tokens().state()),
        form: FormView {
            exchange:          form.draft().exchange.parse().ok(),
            api_key_filled:    !form.draft().api_key.is_empty(),
            secret_key_filled: !form.draft().secret_key.is_empty(),
            submitting:        form.is_in_flight(),
            button:            if form.is_in_flight() { texts.connecting } else { texts.connect_button },
        },
        trades: trade_section(dashboard.data().trades().state(), texts),
    }
}

pub fn token_section(state: LoadState<'_, TokenSignal>) -> TokenSection {
    match state {
        LoadState::NotLoaded | LoadState::Loading => TokenSection::Loading,
        LoadState::Failed(_) => TokenSection::Unavailable,
        LoadState::Loaded(tokens) => TokenSection::Cards(token_cards(tokens)),
    }
}

/// First [`MAX_TOKEN_CARDS`] tokens, in the order received.
pub fn token_cards(tokens: &[TokenSignal]) -> Vec<TokenCard> {
    tokens
        .iter()
        .take(MAX_TOKEN_CARDS)
        .map(|t| {
            let style = SignalStyle::from(t.signal());
            TokenCard {
                name:    t.name.clone(),
                symbol:  t.symbol.to_uppercase(),
                price:   format_price(t.current_price),
                signal:  t.signal_label().to_string(),
                style,
                classes: style.classes(),
            }
        })
        .collect()
}

pub fn trade_section(state: LoadState<'_, TradeRecord>, texts: &Texts) -> TradeSection {
    match state {
        LoadState::NotLoaded | LoadState::Loading => TradeSection::Loading,
        LoadState::Failed(_) => TradeSection::Unavailable,
        LoadState::Loaded([]) => TradeSection::Empty(texts.no_trades),
        LoadState::Loaded(trades) => TradeSection::Rows(trades.iter().map(trade_row).collect()),
    }
}

fn trade_row(trade: &TradeRecord) -> TradeRow {
    TradeRow {
        time:     format_timestamp(&trade.timestamp),
        action:   trade.action.clone(),
        style:    if trade.action.is_buy() { SignalStyle::Buy } else { SignalStyle::Sell },
        symbol:   trade.symbol.clone(),
        quantity: trade.quantity.to_string(),
        price:    format_price(Some(trade.price)),
    }
}

// ─── Text rendering (console host) ────────────────────────────────────────────

pub fn render_text(view: &DashboardView) -> String {
    let t = view.language.texts();
    let mut out = String::new();

    // writeln! into a String cannot fail.
    let _ = writeln!(out, "📘 {}    [{} | {}]", view.labels.title, Language::En.toggle_label(), Language::Id.toggle_label());

    if let Some(toast) = &view.toast {
        let tag = match toast.severity {
            Severity::Success => "✅",
            Severity::Error => "❌",
        };
        let _ = writeln!(out, "{tag} {}", toast.message);
    }

    let _ = writeln!(out, "\n👤 {}", t.profile_title);
    let _ = writeln!(out, "  {}: Rahadhyan", t.profile_name);
    let _ = writeln!(out, "  {}: MeXC", t.profile_exchange);
    let _ = writeln!(out, "  {}: {}", t.profile_last_login, t.last_login_value);
    let _ = writeln!(out, "  {}: +$2,500", t.profile_pnl);

    let _ = writeln!(out, "\n== {} ==", view.labels.manual_mode);
    match &view.tokens {
        TokenSection::Loading => {
            let _ = writeln!(out, "  {}", t.loading);
        }
        TokenSection::Unavailable => {
            let _ = writeln!(out, "  {}", t.unavailable);
        }
        TokenSection::Cards(cards) => {
            for card in cards {
                let _ = writeln!(
                    out,
                    "  [{:<7}] {} | {}: {} | {}: {} | {}: {}",
                    format!("{:?}", card.style).to_lowercase(),
                    card.name,
                    t.symbol_label,
                    card.symbol,
                    t.price_label,
                    card.price,
                    t.signal_label,
                    card.signal,
                );
            }
        }
    }

    let _ = writeln!(out, "\n== {} ==", view.labels.connect_exchange);
    let exchange = view
        .form
        .exchange
        .map(|e| e.display_name())
        .unwrap_or(t.select_exchange);
    let masked = |filled: bool, placeholder: &'static str| if filled { "●●●●●●" } else { placeholder };
    let _ = writeln!(out, "  {}: {}", t.exchange_label, exchange);
    let _ = writeln!(out, "  {}: {}", t.api_key_label, masked(view.form.api_key_filled, t.api_key_placeholder));
    let _ = writeln!(out, "  {}: {}", t.secret_key_label, masked(view.form.secret_key_filled, t.secret_key_placeholder));
    let _ = writeln!(out, "  [ {} ]", view.form.button);

    let _ = writeln!(out, "\n== {} ==", view.labels.trade_history);
    let _ = writeln!(
        out,
        "  {:<24} {:<6} {:<8} {:>10} {:>14}",
        t.col_time, t.col_action, t.col_token, t.col_quantity, t.col_price
    );
    match &view.trades {
        TradeSection::Loading => {
            let _ = writeln!(out, "  {}", t.loading);
        }
        TradeSection::Unavailable => {
            let _ = writeln!(out, "  {}", t.unavailable);
        }
        TradeSection::Empty(placeholder) => {
            let _ = writeln!(out, "  {placeholder}");
        }
        TradeSection::Rows(rows) => {
            for row in rows {
                let _ = writeln!(
                    out,
                    "  {:<24} {:<6} {:<8} {:>10} {:>14}",
                    row.time, row.action, row.symbol, row.quantity, row.price
                );
            }
        }
    }

    let _ = writeln!(out, "\n{}", t.footer);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::i18n::texts;

    fn token(symbol: &str, signal: Option<&str>, price: Option<f64>) -> TokenSignal {
        TokenSignal {
            name:          format!("{symbol} coin"),
            symbol:        symbol.to_string(),
            current_price: price,
            signal:        signal.map(str::to_string),
        }
    }

    #[test]
    fn test_classify_signal_is_total() {
        assert_eq!(classify_signal(Some("BUY")), SignalStyle::Buy);
        assert_eq!(classify_signal(Some("SELL")), SignalStyle::Sell);
        for other in [Some("HOLD"), None, Some(""), Some("sell"), Some("MOON")] {
            assert_eq!(classify_signal(other), SignalStyle::Neutral, "{other:?}");
        }
    }

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(67012.5), "67,012.5");
        assert_eq!(format_number(1_234_567.25), "1,234,567.25");
        assert_eq!(format_number(0.1523), "0.152");
        assert_eq!(format_number(-2500.0), "-2,500");
        assert_eq!(format_number(-0.0001), "0");
    }

    #[test]
    fn test_missing_price_is_placeholder_not_zero() {
        assert_eq!(format_price(None), "N/A");
        assert_eq!(format_price(Some(0.0)), "$0");
        assert_eq!(format_price(Some(3150.25)), "$3,150.25");
    }

    #[test]
    fn test_timestamp_format() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 14, 5, 9).unwrap();
        assert_eq!(format_timestamp_in(&ts, &Utc), "3/1/2025, 2:05:09 PM");
        let offset = chrono::FixedOffset::east_opt(7 * 3600).unwrap();
        assert_eq!(format_timestamp_in(&ts, &offset), "3/1/2025, 9:05:09 PM");
    }

    #[test]
    fn test_token_cards_capped_at_five_in_order() {
        let tokens: Vec<_> = (0..8).map(|i| token(&format!("t{i}"), Some("BUY"), Some(1.0))).collect();
        let cards = token_cards(&tokens);
        assert_eq!(cards.len(), 5);
        let symbols: Vec<_> = cards.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, ["T0", "T1", "T2", "T3", "T4"]);

        let few = token_cards(&tokens[..3]);
        assert_eq!(few.len(), 3);
    }

    #[test]
    fn test_token_card_fields() {
        let cards = token_cards(&[token("btc", None, None), token("eth", Some("SELL"), Some(3150.0))]);
        assert_eq!(cards[0].symbol, "BTC");
        assert_eq!(cards[0].signal, "HOLD");
        assert_eq!(cards[0].price, "N/A");
        assert_eq!(cards[0].style, SignalStyle::Neutral);
        assert_eq!(cards[0].classes, "bg-yellow-100 text-yellow-800");
        assert_eq!(cards[1].style, SignalStyle::Sell);
        assert_eq!(cards[1].classes, "bg-red-100 text-red-800");
        assert_eq!(cards[1].price, "$3,150");
    }

    #[test]
    fn test_empty_token_list_renders_zero_cards() {
        assert_eq!(token_section(LoadState::Loaded(&[])), TokenSection::Cards(vec![]));
        let err = ApiError::Transport("down".into());
        assert_eq!(token_section(LoadState::Failed(&err)), TokenSection::Unavailable);
        assert_eq!(token_section(LoadState::Loading), TokenSection::Loading);
    }

    #[test]
    fn test_empty_trade_history_renders_placeholder() {
        let id = texts(Language::Id);
        let en = texts(Language::En);
        assert_eq!(trade_section(LoadState::Loaded(&[]), id), TradeSection::Empty("Belum ada transaksi."));
        assert_eq!(trade_section(LoadState::Loaded(&[]), en), TradeSection::Empty("No transactions yet."));
    }

    #[test]
    fn test_trade_rows_keep_order() {
        let at = |h| Utc.with_ymd_and_hms(2025, 1, 1, h, 0, 0).unwrap();
        let trades = vec![
            TradeRecord { timestamp: at(12), action: TradeAction::Sell, symbol: "ETH".into(), quantity: 2.0, price: 3000.0 },
            TradeRecord { timestamp: at(9), action: TradeAction::Buy, symbol: "BTC".into(), quantity: 0.5, price: 67000.0 },
        ];
        match trade_section(LoadState::Loaded(&trades[..]), texts(Language::En)) {
            TradeSection::Rows(rows) => {
                assert_eq!(rows[0].symbol, "ETH");
                assert_eq!(rows[0].style, SignalStyle::Sell);
                assert_eq!(rows[1].quantity, "0.5");
                assert_eq!(rows[1].price, "$67,000");
            }
            other => panic!("expected rows, got {other:?}"),
        }
    }

    #[test]
    fn test_non_buy_actions_are_styled_as_sell() {
        let trade = TradeRecord {
            timestamp: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            action:    TradeAction::Other("buy".into()),
            symbol:    "BTC".into(),
            quantity:  1.0,
            price:     1.0,
        };
        let row = trade_row(&trade);
        assert_eq!(row.style, SignalStyle::Sell);
        assert_eq!(row.action.as_str(), "buy");
    }
}
