//! Client configuration.

use std::env;
use std::time::Duration;

use http::Uri;

use crate::error::Error;
use crate::token::Token;

/// The host of the public Google Maps web services.
pub const DEFAULT_BASE_URI: &str = "https://maps.googleapis.com";
/// How long to wait before retrying a search whose page token was not valid yet.
pub const DEFAULT_PAGE_TOKEN_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Settings of a `Client` other than its credentials.
#[derive(Clone, Debug)]
pub struct Config {
    /// Scheme and authority (and an optional path prefix) to send the requests to.
    pub base_uri: Uri,
    /// Delay before the single retry of a paged search.
    pub page_token_retry_delay: Duration,
    /// Whether to ask for gzip-encoded responses.
    pub gzip: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_uri: Uri::from_static(DEFAULT_BASE_URI),
            page_token_retry_delay: DEFAULT_PAGE_TOKEN_RETRY_DELAY,
            gzip: cfg!(feature = "gzip"),
        }
    }
}

impl Config {
    /// Starts from the defaults and applies `PLACES_API_BASE_URI` and `PLACES_API_RETRY_DELAY_MS`
    /// if they are set.
    pub fn from_env<E>() -> Result<Self, Error<E>> {
        Self::from_vars(|name| env::var(name).ok())
    }

    pub(crate) fn from_vars<E, F>(var: F) -> Result<Self, Error<E>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(uri) = var("PLACES_API_BASE_URI") {
            config.base_uri = uri
                .parse()
                .map_err(|e| Error::config(format!("PLACES_API_BASE_URI: {}", e)))?;
        }
        if let Some(ms) = var("PLACES_API_RETRY_DELAY_MS") {
            let ms = ms
                .trim()
                .parse()
                .map_err(|e| Error::config(format!("PLACES_API_RETRY_DELAY_MS: {}", e)))?;
            config.page_token_retry_delay = Duration::from_millis(ms);
        }

        config.validate(None)?;
        Ok(config)
    }

    /// Checks that the base URI is an absolute `http` or `https` URI and, if a token is given,
    /// that it has a server key.
    pub fn validate<E>(&self, token: Option<&Token>) -> Result<(), Error<E>> {
        match self.base_uri.scheme_str() {
            Some("http") | Some("https") => {}
            _ => {
                return Err(Error::config(format!(
                    "base URI must be http or https: {}",
                    self.base_uri
                )))
            }
        }
        if self.base_uri.authority().is_none() {
            return Err(Error::config(format!("base URI has no host: {}", self.base_uri)));
        }
        if let Some(token) = token {
            if token.server_key.is_empty() {
                return Err(Error::config("empty server key"));
            }
        }
        Ok(())
    }

    /// Builds the absolute URI string for `path` and an encoded `query`.
    ///
    /// Returns the URI and the part of it that gets signed.
    pub(crate) fn uri(&self, path: &str, query: &str) -> (String, String) {
        let prefix = self.base_uri.path().trim_end_matches('/');
        let path_and_query = format!("{}{}?{}", prefix, path, query);
        let uri = format!(
            "{}://{}{}",
            self.base_uri.scheme_str().unwrap_or("https"),
            self.base_uri.authority().map_or("", |a| a.as_str()),
            path_and_query,
        );
        (uri, path_and_query)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::convert::Infallible;

    use super::*;

    fn from(vars: &[(&str, &str)]) -> Result<Config, Error<Infallible>> {
        let vars: HashMap<_, _> = vars.iter().copied().collect();
        Config::from_vars(|k| vars.get(k).map(|v| v.to_string()))
    }

    #[test]
    fn defaults() {
        let config = from(&[]).unwrap();
        assert_eq!(config.base_uri.host(), Some("maps.googleapis.com"));
        assert_eq!(config.page_token_retry_delay, Duration::from_secs(2));
    }

    #[test]
    fn overrides() {
        let config = from(&[
            ("PLACES_API_BASE_URI", "http://localhost:8080/proxy/"),
            ("PLACES_API_RETRY_DELAY_MS", "150"),
        ])
        .unwrap();
        assert_eq!(config.page_token_retry_delay, Duration::from_millis(150));

        let (uri, signed) = config.uri("/maps/api/place/details/json", "placeid=x");
        assert_eq!(uri, "http://localhost:8080/proxy/maps/api/place/details/json?placeid=x");
        assert_eq!(signed, "/proxy/maps/api/place/details/json?placeid=x");
    }

    #[test]
    fn invalid() {
        assert!(from(&[("PLACES_API_BASE_URI", "ftp://example.com")]).is_err());
        assert!(from(&[("PLACES_API_BASE_URI", "/relative")]).is_err());
        assert!(from(&[("PLACES_API_RETRY_DELAY_MS", "soon")]).is_err());

        let config = Config::default();
        assert!(config.validate::<Infallible>(Some(&Token::new(""))).is_err());
        assert!(config.validate::<Infallible>(Some(&Token::new("k"))).is_ok());
    }

    #[test]
    fn default_uri() {
        let (uri, signed) = Config::default().uri("/maps/api/streetview", "size=600x300");
        assert_eq!(uri, "https://maps.googleapis.com/maps/api/streetview?size=600x300");
        assert_eq!(signed, "/maps/api/streetview?size=600x300");
    }
}
