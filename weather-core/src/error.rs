use thiserror::Error;

pub const EMPTY_INPUT_MESSAGE: &str = "City is required";
pub const NOT_FOUND_MESSAGE: &str = "City not found";
pub const INVALID_DATA_MESSAGE: &str = "Invalid weather data received";

/// Why a single fetch attempt failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("city name is empty")]
    EmptyInput,

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Body was not valid JSON.
    #[error("failed to decode response body: {0}")]
    Decode(String),

    /// Body was JSON but not a current-weather object.
    #[error("response does not match weather schema: {0}")]
    Schema(String),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("provider responded with HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Network(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    EmptyInput,
    Transport,
    Decode,
    Schema,
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::EmptyInput => FailureKind::EmptyInput,
            FetchError::Transport(_) => FailureKind::Transport,
            FetchError::Decode(_) => FailureKind::Decode,
            FetchError::Schema(_) => FailureKind::Schema,
        }
    }

    /// Message shown to the user. Schema details are never included.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::EmptyInput => EMPTY_INPUT_MESSAGE.to_string(),
            FetchError::Transport(TransportError::Status(_)) => NOT_FOUND_MESSAGE.to_string(),
            FetchError::Transport(TransportError::Network(msg)) => msg.clone(),
            FetchError::Decode(msg) => msg.clone(),
            FetchError::Schema(_) => INVALID_DATA_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    /// The request URL carries the API key, so it is stripped from the message.
    fn from(err: reqwest::Error) -> Self {
        TransportError::Network(err.without_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_failures_collapse_to_not_found() {
        for code in [400, 401, 404, 500, 503] {
            let err = FetchError::from(TransportError::Status(code));
            assert_eq!(err.user_message(), "City not found");
            assert_eq!(err.kind(), FailureKind::Transport);
        }
    }

    #[test]
    fn schema_detail_is_not_leaked() {
        let err = FetchError::Schema("missing field `temp` at line 1".into());
        assert_eq!(err.user_message(), "Invalid weather data received");
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn decode_and_network_surface_their_message() {
        let err = FetchError::Decode("expected value at line 1 column 1".into());
        assert_eq!(err.user_message(), "expected value at line 1 column 1");
        assert_eq!(err.kind(), FailureKind::Decode);

        let err = FetchError::from(TransportError::Network("connection refused".into()));
        assert_eq!(err.user_message(), "connection refused");
    }

    #[test]
    fn empty_input_message() {
        assert_eq!(FetchError::EmptyInput.user_message(), "City is required");
        assert_eq!(FetchError::EmptyInput.kind(), FailureKind::EmptyInput);
    }
}
