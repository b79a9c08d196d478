//! Error types

use std::error;
use std::fmt::{self, Display, Formatter};
use std::io;

/// A boxed error from a response body.
pub type BoxError = Box<dyn error::Error + Send + Sync>;

/// An error occurred while making a request to the API.
///
/// A response carrying a non-OK `Status` is not an error. It is returned as data.
#[derive(Debug)]
pub enum Error<E> {
    /// An error from the underlying HTTP client.
    Service(E),
    /// An error occured while reading the response body.
    Body(BoxError),
    /// An error occured while decoding gzip stream from the server.
    Gzip(io::Error),
    /// The server returned a malformed JSON document.
    Json(serde_json::Error),
    /// The request could not be built from the parameters.
    Uri(http::Error),
    /// The client is missing credentials or is otherwise misconfigured.
    Config(String),
}

impl<E> Error<E> {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

impl<E: error::Error + 'static> error::Error for Error<E> {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use Error::*;

        match *self {
            Service(ref e) => Some(e),
            Body(ref e) => Some(&**e),
            Gzip(ref e) => Some(e),
            Json(ref e) => Some(e),
            Uri(ref e) => Some(e),
            Config(_) => None,
        }
    }
}

impl<E: Display> Display for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Error::*;

        match *self {
            Service(ref e) => Display::fmt(e, f),
            Body(ref e) => Display::fmt(e, f),
            Gzip(ref e) => Display::fmt(e, f),
            Json(ref e) => Display::fmt(e, f),
            Uri(ref e) => Display::fmt(e, f),
            Config(ref msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl<E> From<serde_json::Error> for Error<E> {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl<E> From<http::Error> for Error<E> {
    fn from(e: http::Error) -> Self {
        Error::Uri(e)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display() {
        let e = Error::<Infallible>::config("missing server key");
        assert_eq!(e.to_string(), "invalid configuration: missing server key");
        assert!(e.source().is_none());

        let json = serde_json::from_str::<u32>("x").unwrap_err();
        let e = Error::<Infallible>::from(json);
        assert!(e.source().is_some());
    }
}
