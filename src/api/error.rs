use thiserror::Error;

/// Errors surfaced by the remote service client.
///
/// Every failure mode collapses into one of two variants: the request never
/// completed (`Network`), or the server answered with a non-2xx status
/// (`Server`). A 2xx response whose body fails to decode is a `Network`
/// failure as well, since the response never yielded a usable value.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },

    #[error("server responded with status {status}")]
    Server { status: u16 },
}

impl ApiError {
    pub(crate) fn network(source: reqwest::Error) -> Self {
        Self::Network { source }
    }
}
