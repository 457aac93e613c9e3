use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid token payload: {0}")]
    Token(#[source] serde_json::Error),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Malformed gateway reply: {0}")]
    MalformedReply(String),
}
