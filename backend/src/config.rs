use std::str::FromStr;
use std::time::Duration;

use chrono::FixedOffset;

use market::SignalRules;
use market::indicator::IndicatorParams;
use market::types::{BarInterval, ContractKind};
use notifier::DEFAULT_MAX_MESSAGE_LEN;
use notifier::telegram::DEFAULT_TELEGRAM_ENDPOINT;
use scheduler::{ScanConfig, UniverseFilter};

use crate::bingx::DEFAULT_BINGX_ENDPOINT;
use crate::error::AppError;

const DEFAULT_SYMBOLS: &str = "BTC-USDT,ETH-USDT,SOL-USDT,BNB-USDT,XRP-USDT,DOGE-USDT";

#[derive(Clone)]
pub struct AppConfig {
    // =========================
    // Exchange
    // =========================
    pub bingx_api_key: String,

    /// Loaded and checked at startup; kline reads are public and unsigned.
    pub bingx_secret_key: String,

    pub bingx_http_endpoint: String,

    // =========================
    // Chat delivery
    // =========================
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub telegram_http_endpoint: String,

    // =========================
    // Scan configuration
    // =========================
    /// Symbols making up the scan universe, in scan order.
    pub symbols: Vec<String>,

    /// Only perpetuals settled in this currency are scanned.
    pub settlement: String,

    pub interval: BarInterval,

    /// Bars requested per instrument. Must cover the indicator warm-up.
    pub bar_limit: usize,

    /// Hours east of UTC of the zone bar boundaries are aligned to.
    pub utc_offset: FixedOffset,

    /// When false, the SAR position is ignored by the classifier.
    pub require_reversal: bool,

    pub fetch_concurrency: usize,

    /// JSON logs when true (`APP_ENV=production`).
    pub is_production: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bingx_http_endpoint", &self.bingx_http_endpoint)
            .field("telegram_http_endpoint", &self.telegram_http_endpoint)
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("symbols", &self.symbols)
            .field("settlement", &self.settlement)
            .field("interval", &self.interval)
            .field("bar_limit", &self.bar_limit)
            .field("utc_offset", &self.utc_offset)
            .field("require_reversal", &self.require_reversal)
            .field("fetch_concurrency", &self.fetch_concurrency)
            .field("is_production", &self.is_production)
            .finish_non_exhaustive()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, AppError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| get(key).ok_or(AppError::MissingEnv(key));

        let symbols = parse_symbols(
            &get("SCAN_SYMBOLS").unwrap_or_else(|| DEFAULT_SYMBOLS.to_string()),
        )?;

        let bar_limit: usize = parse_or("SCAN_BAR_LIMIT", get("SCAN_BAR_LIMIT"), 50)?;
        let min_bars = IndicatorParams::default().min_bars;
        if bar_limit < min_bars {
            return Err(AppError::InvalidEnv {
                key: "SCAN_BAR_LIMIT",
                value: bar_limit.to_string(),
            });
        }

        let offset_hours: i32 = parse_or("SCAN_UTC_OFFSET_HOURS", get("SCAN_UTC_OFFSET_HOURS"), 8)?;
        let utc_offset = FixedOffset::east_opt(offset_hours.saturating_mul(3_600)).ok_or(
            AppError::InvalidEnv {
                key: "SCAN_UTC_OFFSET_HOURS",
                value: offset_hours.to_string(),
            },
        )?;

        let fetch_concurrency: usize =
            parse_or("SCAN_FETCH_CONCURRENCY", get("SCAN_FETCH_CONCURRENCY"), 1)?;
        if fetch_concurrency == 0 {
            return Err(AppError::InvalidEnv {
                key: "SCAN_FETCH_CONCURRENCY",
                value: "0".into(),
            });
        }

        Ok(Self {
            bingx_api_key: required("BINGX_API_KEY")?,
            bingx_secret_key: required("BINGX_SECRET_KEY")?,
            bingx_http_endpoint: get("BINGX_HTTP_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_BINGX_ENDPOINT.to_string()),

            telegram_bot_token: required("TELEGRAM_BOT_TOKEN")?,
            telegram_chat_id: required("TELEGRAM_CHAT_ID")?,
            telegram_http_endpoint: get("TELEGRAM_HTTP_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_ENDPOINT.to_string()),

            symbols,
            settlement: get("SCAN_SETTLEMENT")
                .unwrap_or_else(|| "USDT".to_string())
                .to_ascii_uppercase(),
            interval: parse_or("SCAN_INTERVAL", get("SCAN_INTERVAL"), BarInterval::OneHour)?,
            bar_limit,
            utc_offset,
            require_reversal: parse_bool("SCAN_REQUIRE_SAR", get("SCAN_REQUIRE_SAR"), true)?,
            fetch_concurrency,
            is_production: get("APP_ENV").is_some_and(|v| v == "production"),
        })
    }

    /// Engine settings derived from this configuration.
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            interval: self.interval,
            bar_limit: self.bar_limit,
            params: IndicatorParams::default(),
            rules: SignalRules {
                require_reversal: self.require_reversal,
                ..SignalRules::default()
            },
            filter: UniverseFilter {
                kind: Some(ContractKind::Perpetual),
                settlement: Some(self.settlement.clone()),
            },
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
            utc_offset: self.utc_offset,
            fetch_concurrency: self.fetch_concurrency,
            slow_fetch: Duration::from_secs(5),
        }
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, AppError> {
    match raw {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| AppError::InvalidEnv { key, value: v }),
    }
}

fn parse_bool(key: &'static str, raw: Option<String>, default: bool) -> Result<bool, AppError> {
    let Some(value) = raw else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::InvalidEnv { key, value }),
    }
}

fn parse_symbols(raw: &str) -> Result<Vec<String>, AppError> {
    let mut symbols: Vec<String> = Vec::new();
    for s in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let s = s.to_ascii_uppercase();
        if !symbols.contains(&s) {
            symbols.push(s);
        }
    }

    if symbols.is_empty() {
        return Err(AppError::InvalidEnv {
            key: "SCAN_SYMBOLS",
            value: raw.to_string(),
        });
    }
    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    const REQUIRED: [(&str, &str); 4] = [
        ("BINGX_API_KEY", "key"),
        ("BINGX_SECRET_KEY", "secret"),
        ("TELEGRAM_BOT_TOKEN", "123:abc"),
        ("TELEGRAM_CHAT_ID", "-100200300"),
    ];

    fn with(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
        let mut all = REQUIRED.to_vec();
        all.extend_from_slice(extra);
        all
    }

    #[test]
    fn defaults_apply_when_only_required_keys_are_set() {
        let cfg = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(cfg.bingx_http_endpoint, DEFAULT_BINGX_ENDPOINT);
        assert_eq!(cfg.telegram_http_endpoint, DEFAULT_TELEGRAM_ENDPOINT);
        assert_eq!(cfg.settlement, "USDT");
        assert_eq!(cfg.interval, BarInterval::OneHour);
        assert_eq!(cfg.bar_limit, 50);
        assert_eq!(cfg.utc_offset.local_minus_utc(), 8 * 3_600);
        assert!(cfg.require_reversal);
        assert_eq!(cfg.fetch_concurrency, 1);
        assert!(!cfg.is_production);
        assert_eq!(cfg.symbols.first().map(String::as_str), Some("BTC-USDT"));
    }

    #[test]
    fn each_missing_required_key_is_reported() {
        for (missing, _) in REQUIRED {
            let partial: Vec<_> = REQUIRED.iter().copied().filter(|(k, _)| *k != missing).collect();
            let err = AppConfig::from_lookup(lookup(&partial)).unwrap_err();
            assert_eq!(err, AppError::MissingEnv(missing));
        }
    }

    #[test]
    fn blank_required_value_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs[2] = ("TELEGRAM_BOT_TOKEN", "   ");
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert_eq!(err, AppError::MissingEnv("TELEGRAM_BOT_TOKEN"));
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = AppConfig::from_lookup(lookup(&with(&[
            ("SCAN_SYMBOLS", " eth-usdt, btc-usdt ,,ETH-USDT"),
            ("SCAN_SETTLEMENT", "usdc"),
            ("SCAN_INTERVAL", "4h"),
            ("SCAN_BAR_LIMIT", "200"),
            ("SCAN_UTC_OFFSET_HOURS", "-5"),
            ("SCAN_REQUIRE_SAR", "off"),
            ("SCAN_FETCH_CONCURRENCY", "4"),
            ("APP_ENV", "production"),
        ])))
        .unwrap();

        assert_eq!(cfg.symbols, ["ETH-USDT", "BTC-USDT"]);
        assert_eq!(cfg.settlement, "USDC");
        assert_eq!(cfg.interval, BarInterval::FourHours);
        assert_eq!(cfg.bar_limit, 200);
        assert_eq!(cfg.utc_offset.local_minus_utc(), -5 * 3_600);
        assert!(!cfg.require_reversal);
        assert_eq!(cfg.fetch_concurrency, 4);
        assert!(cfg.is_production);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let cases: [(&'static str, &'static str); 6] = [
            ("SCAN_INTERVAL", "2h"),
            ("SCAN_BAR_LIMIT", "lots"),
            ("SCAN_BAR_LIMIT", "20"),
            ("SCAN_UTC_OFFSET_HOURS", "30"),
            ("SCAN_REQUIRE_SAR", "maybe"),
            ("SCAN_FETCH_CONCURRENCY", "0"),
        ];

        for (key, value) in cases {
            let err = AppConfig::from_lookup(lookup(&with(&[(key, value)]))).unwrap_err();
            assert!(
                matches!(err, AppError::InvalidEnv { key: k, .. } if k == key),
                "{key}={value} gave {err:?}"
            );
        }
    }

    #[test]
    fn empty_symbol_list_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&with(&[("SCAN_SYMBOLS", " , ,")]))).unwrap_err();
        assert!(matches!(err, AppError::InvalidEnv { key: "SCAN_SYMBOLS", .. }));
    }

    #[test]
    fn scan_config_carries_filter_and_rules() {
        let cfg = AppConfig::from_lookup(lookup(&with(&[("SCAN_REQUIRE_SAR", "false")]))).unwrap();
        let scan = cfg.scan_config();

        assert!(!scan.rules.require_reversal);
        assert_eq!(scan.filter.settlement.as_deref(), Some("USDT"));
        assert_eq!(scan.filter.kind, Some(ContractKind::Perpetual));
        assert_eq!(scan.bar_limit, 50);
        assert_eq!(scan.utc_offset, cfg.utc_offset);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let cfg = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("secret"));
        assert!(!dbg.contains("123:abc"));
    }
}
