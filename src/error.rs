/// Shape violations in the status API response body.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("malformed response: not an object")]
    NotAnObject,

    #[error("missing homeworks key")]
    MissingHomeworks,

    #[error("homeworks is not a list")]
    HomeworksNotAList,
}

/// Problems with a single homework record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("missing key {0:?} in homework record")]
    MissingKey(&'static str),

    #[error("key {0:?} in homework record is not a string")]
    InvalidField(&'static str),

    #[error("unknown homework status {0:?}")]
    UnknownStatus(String),
}

/// Anything that can go wrong between sending the poll request and
/// producing a notification text. Every variant is recoverable: the loop
/// reports it and tries again on the next cycle.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error("endpoint unavailable: {0}")]
    Connectivity(#[from] reqwest::Error),

    #[error("unexpected status code {0} from endpoint")]
    Protocol(u16),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Failure to hand a message to the messaging channel.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("message is {len} characters long, telegram accepts at most {limit}")]
    TooLong { len: usize, limit: usize },
}

/// Fatal startup problems. The process exits instead of entering the loop.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
}
