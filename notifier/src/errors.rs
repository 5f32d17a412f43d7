use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport reachable but refused the message.
    #[error("rejected by transport: {0}")]
    Rejected(String),
}
