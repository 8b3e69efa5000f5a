use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to send the api request")]
    RequestError(#[from] reqwest::Error),

    #[error("failed to parse the api response")]
    ParseError(#[from] serde_json::Error),

    #[error("invalid header value")]
    HeaderValueError(#[from] reqwest::header::InvalidHeaderValue),

    #[error("failed to parse url")]
    UrlParseError(#[from] url::ParseError),

    #[error("invalid timeframe {:?}", .0)]
    InvalidTimeframe(String),

    #[error(
        "api key and secret key must be provided or set via ALPACA_API_KEY and ALPACA_SECRET_KEY"
    )]
    MissingCredentials,

    #[error("api request failed with status {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("bracket order requires at least one of take_profit or stop_loss")]
    BracketLegMissing,

    #[error("stop_loss is required when using stop_loss_limit")]
    StopLossRequired,

    #[error("qty and percentage may not both be set when closing a position")]
    AmbiguousCloseAmount,
}
