//! Type aliases for use with `hyper` crate's HTTP client.

use hyper_pkg::client::HttpConnector;
use hyper_tls::HttpsConnector;

use crate::{Config, Token};

pub type HttpClient = hyper_pkg::Client<HttpsConnector<HttpConnector>>;
pub type Client = crate::Client<HttpClient, hyper_pkg::Body>;
pub type Error = crate::Error<hyper_pkg::Error>;
pub type Image = crate::Image<hyper_pkg::Body>;

impl Client {
    /// Creates a client over a fresh `hyper` HTTPS client.
    ///
    /// # Panics
    ///
    /// This will panic if the underlying HTTPS connector failed to initialize.
    pub fn new(token: Token, config: Config) -> Self {
        let conn = HttpsConnector::new();
        crate::Client::with_service(
            hyper_pkg::Client::builder().build::<_, hyper_pkg::Body>(conn),
            token,
            config,
        )
    }

    /// Reads the `Token` and `Config` from the environment.
    ///
    /// # Panics
    ///
    /// Same as `new`.
    pub fn from_env() -> Result<Self, Error> {
        let token = Token::from_env::<hyper_pkg::Error>()?;
        let config = Config::from_env::<hyper_pkg::Error>()?;
        Ok(Client::new(token, config))
    }
}
