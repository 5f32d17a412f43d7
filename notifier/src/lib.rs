//! Rendering and delivery of scan results.
//!
//! Flow: `ScanResultSet` → [`format::render`] → [`dispatch::chunk_text`] →
//! [`Notifier::send`] per chunk.

pub mod dispatch;
pub mod errors;
pub mod format;
pub mod telegram;

pub use dispatch::{DEFAULT_MAX_MESSAGE_LEN, DispatchReport, Notifier, chunk_text, dispatch};
pub use errors::DeliveryError;
pub use format::{NO_SIGNALS_TEXT, render};
pub use telegram::TelegramClient;
