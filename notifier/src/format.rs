use market::indicator::IndicatorParams;
use market::{ScanEntry, ScanResultSet, Signal};

/// Sent instead of an empty report.
pub const NO_SIGNALS_TEXT: &str = "No contract signals this cycle.";

const HEADER: &str = "Contract signals (all results):";
const SEPARATOR: &str = "------------------------";

/// Renders the Bullish section, then the Bearish section, then a footer with
/// the indicator settings the scan used.
///
/// Indicator values use 2 decimals; prices (SAR, close) use 4.
pub fn render(results: &ScanResultSet, params: &IndicatorParams) -> String {
    if results.is_empty() {
        return NO_SIGNALS_TEXT.to_string();
    }

    let mut out = String::from(HEADER);
    out.push('\n');

    for signal in [Signal::Bullish, Signal::Bearish] {
        out.push_str(&format!("\n{signal} signals:\n"));
        for entry in results.entries(signal) {
            render_entry(&mut out, entry);
        }
    }

    out.push('\n');
    out.push_str(&filter_parameters(params));
    out
}

fn render_entry(out: &mut String, entry: &ScanEntry) {
    let row = &entry.row;
    out.push_str(&format!("Pair: {}\n", entry.symbol));
    out.push_str(&format!("RSI: {}\n", fixed(row.rsi, 2)));
    out.push_str(&format!("EMA short: {}\n", fixed(row.ema_short, 2)));
    out.push_str(&format!("EMA long: {}\n", fixed(row.ema_long, 2)));
    out.push_str(&format!("MACD: {}\n", fixed(row.macd, 2)));
    out.push_str(&format!("MACD signal: {}\n", fixed(row.macd_signal, 2)));
    out.push_str(&format!("MACD hist: {}\n", fixed(row.macd_hist, 2)));
    out.push_str(&format!("SAR: {}\n", fixed(row.sar, 4)));
    out.push_str(&format!("Close: {}\n", fixed(Some(row.close), 4)));
    out.push_str(SEPARATOR);
    out.push('\n');
}

fn fixed(v: Option<f64>, decimals: usize) -> String {
    match v.filter(|x| x.is_finite()) {
        Some(x) => format!("{x:.decimals$}"),
        None => "n/a".to_string(),
    }
}

fn filter_parameters(p: &IndicatorParams) -> String {
    format!(
        "Filter parameters:\n\
         - RSI period: {}\n\
         - EMA short: {}\n\
         - EMA long: {}\n\
         - MACD fast: {}\n\
         - MACD slow: {}\n\
         - MACD signal: {}\n\
         - SAR acceleration: {}, maximum: {}",
        p.rsi_period,
        p.ema_short,
        p.ema_long,
        p.macd_fast,
        p.macd_slow,
        p.macd_signal,
        p.sar_step,
        p.sar_cap,
    )
}
