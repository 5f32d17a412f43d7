use async_trait::async_trait;

use market::types::{ContractKind, Instrument};
use market::{InstrumentUniverse, MarketError};

/// Fixed instrument list taken from configuration.
///
/// Every symbol is a perpetual. Its settlement currency is the quote part of
/// the symbol (`BTC-USDT` → `USDT`), falling back to `default_settlement`
/// when the symbol has no separator.
#[derive(Debug, Clone)]
pub struct StaticUniverse {
    instruments: Vec<Instrument>,
}

impl StaticUniverse {
    pub fn perpetuals(symbols: &[String], default_settlement: &str) -> Self {
        let instruments = symbols
            .iter()
            .map(|symbol| {
                let settlement = symbol
                    .rsplit_once('-')
                    .map(|(_, quote)| quote)
                    .filter(|quote| !quote.is_empty())
                    .unwrap_or(default_settlement);
                Instrument::new(symbol.as_str(), ContractKind::Perpetual, settlement)
            })
            .collect();

        Self { instruments }
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

#[async_trait]
impl InstrumentUniverse for StaticUniverse {
    async fn instruments(&self) -> Result<Vec<Instrument>, MarketError> {
        Ok(self.instruments.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn settlement_comes_from_the_quote_leg() {
        let symbols = vec!["BTC-USDT".to_string(), "ETH-USDC".to_string(), "SOLUSDT".to_string()];
        let universe = StaticUniverse::perpetuals(&symbols, "USDT");

        let listed = universe.instruments().await.unwrap();
        let settlements: Vec<&str> = listed.iter().map(|i| i.settlement.as_str()).collect();

        assert_eq!(settlements, ["USDT", "USDC", "USDT"]);
        assert!(listed.iter().all(|i| i.kind == ContractKind::Perpetual));
        assert_eq!(listed[1].symbol, "ETH-USDC");
    }
}
