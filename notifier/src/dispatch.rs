use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::errors::DeliveryError;

/// Hard payload limit of the chat transport, in characters.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 4096;

/// Outbound notification channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one message. `text` never exceeds the transport limit.
    async fn send(&self, text: &str) -> Result<(), DeliveryError>;
}

/// Splits `text` into pieces of at most `max_chars` characters.
///
/// Splits land on character boundaries only; entries may be cut mid-line.
/// Concatenating the pieces yields `text` exactly.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub chunks: usize,
    pub delivered: usize,
}

impl DispatchReport {
    pub fn is_complete(&self) -> bool {
        self.delivered == self.chunks
    }
}

/// Sends `text` in order, chunk by chunk.
///
/// The first delivery failure is logged and stops the remaining chunks.
/// Nothing is retried and no error escapes.
#[instrument(skip(notifier, text), fields(len = text.len()))]
pub async fn dispatch<N>(notifier: &N, text: &str, max_chars: usize) -> DispatchReport
where
    N: Notifier + ?Sized,
{
    let chunks = chunk_text(text, max_chars);
    let mut report = DispatchReport {
        chunks: chunks.len(),
        delivered: 0,
    };

    for (i, chunk) in chunks.iter().enumerate() {
        if let Err(e) = notifier.send(chunk).await {
            error!(error = %e, chunk = i, total = report.chunks, "notification delivery failed");
            return report;
        }
        report.delivered += 1;
    }

    info!(chunks = report.chunks, "notification delivered");
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(chunk_text("hello", 4096), vec!["hello"]);
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(chunk_text("", 10).is_empty());
    }

    #[test]
    fn splits_on_hard_boundaries() {
        assert_eq!(chunk_text("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(chunk_text("abcdef", 3), vec!["abc", "def"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "多方空方信號";
        let chunks = chunk_text(text, 4);
        assert_eq!(chunks, vec!["多方空方", "信號"]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn zero_limit_degrades_to_single_characters() {
        assert_eq!(chunk_text("ab", 0), vec!["a", "b"]);
    }
}
