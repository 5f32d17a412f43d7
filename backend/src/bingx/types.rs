use serde::Deserialize;

use market::types::Bar;

use crate::bingx::errors::{BingxError, CODE_UNKNOWN_SYMBOL};

/// Every BingX response is wrapped in `{code, msg, data}`; `code == 0` is success.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwraps `data`, translating non-zero codes. `symbol` names the
    /// instrument the request was about, if any.
    pub fn into_data(self, symbol: Option<&str>) -> Result<T, BingxError> {
        if self.code != 0 {
            return Err(match symbol {
                Some(s) if self.code == CODE_UNKNOWN_SYMBOL => BingxError::UnknownSymbol(s.to_string()),
                _ => BingxError::Api {
                    code: self.code,
                    msg: self.msg,
                },
            });
        }
        self.data
            .ok_or_else(|| BingxError::InvalidResponse("missing data".into()))
    }
}

/// Prices arrive as strings on most endpoints and as numbers on a few.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Decimal {
    Num(f64),
    Text(String),
}

impl Decimal {
    fn to_f64(&self, field: &'static str) -> Result<f64, BingxError> {
        let v = match self {
            Decimal::Num(n) => *n,
            Decimal::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| BingxError::InvalidResponse(format!("{field}: {s:?}")))?,
        };
        if v.is_finite() {
            Ok(v)
        } else {
            Err(BingxError::InvalidResponse(format!("{field}: not finite")))
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Kline {
    pub open: Decimal,
    pub close: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub volume: Decimal,
    /// Bar open time, epoch milliseconds.
    pub time: u64,
}

impl Kline {
    pub fn to_bar(&self) -> Result<Bar, BingxError> {
        Ok(Bar {
            ts_ms: self.time,
            open: self.open.to_f64("open")?,
            high: self.high.to_f64("high")?,
            low: self.low.to_f64("low")?,
            close: self.close.to_f64("close")?,
            volume: self.volume.to_f64("volume")?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    pub server_time: u64,
}

/// Converts raw klines into bars ordered oldest first.
///
/// BingX returns the newest bar first. Duplicate timestamps keep the first
/// occurrence.
pub fn into_bars(klines: &[Kline]) -> Result<Vec<Bar>, BingxError> {
    let mut bars = klines
        .iter()
        .map(Kline::to_bar)
        .collect::<Result<Vec<_>, _>>()?;

    bars.sort_by_key(|b| b.ts_ms);
    bars.dedup_by_key(|b| b.ts_ms);
    Ok(bars)
}
