use thiserror::Error;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Errors that can occur while retrieving and decoding the Atlassian IP Ranges. Every error is
/// fatal to the read that produced it; no partial results are returned.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure reaching the IP Ranges URL or reading the response body.
    #[error(transparent)]
    Fetch(#[from] reqwest::Error),

    /// The IP Ranges URL responded with `404 Not Found`.
    #[error("IP ranges address list not found")]
    NotFound,

    /// The response body is not a well-formed IP Ranges document.
    #[error("failed to decode IP ranges JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Transport failures may succeed on a later attempt; a missing list or a malformed
    /// document will not.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Fetch(_))
    }
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
