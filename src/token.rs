use std::env;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::Error;

type HmacSha1 = Hmac<Sha1>;

/// API keys used to authorize requests.
#[derive(Clone, Debug, Default)]
pub struct Token {
    /// Key for the web service endpoints.
    pub server_key: String,
    /// Key for the image endpoints. Falls back to `server_key` if absent.
    pub browser_key: Option<String>,
    /// URL-safe base64 encoded secret for signing request URLs.
    pub signing_secret: Option<String>,
}

impl Token {
    pub fn new(server_key: impl Into<String>) -> Self {
        Token {
            server_key: server_key.into(),
            browser_key: None,
            signing_secret: None,
        }
    }

    pub fn browser_key(mut self, key: impl Into<String>) -> Self {
        self.browser_key = Some(key.into());
        self
    }

    pub fn signing_secret(mut self, secret: impl Into<String>) -> Self {
        self.signing_secret = Some(secret.into());
        self
    }

    /// Reads the token from `PLACES_API_SERVER_KEY`, `PLACES_API_BROWSER_KEY` and
    /// `PLACES_API_SIGNING_SECRET`. Only the server key is required.
    pub fn from_env<E>() -> Result<Self, Error<E>> {
        Self::from_vars(|name| env::var(name).ok())
    }

    pub(crate) fn from_vars<E, F>(var: F) -> Result<Self, Error<E>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_key = var("PLACES_API_SERVER_KEY")
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::config("PLACES_API_SERVER_KEY is not set"))?;
        Ok(Token {
            server_key,
            browser_key: var("PLACES_API_BROWSER_KEY").filter(|k| !k.is_empty()),
            signing_secret: var("PLACES_API_SIGNING_SECRET").filter(|k| !k.is_empty()),
        })
    }

    /// The key to send to an image endpoint.
    pub(crate) fn image_key(&self) -> &str {
        self.browser_key.as_deref().unwrap_or(&self.server_key)
    }

    /// Computes the `signature` parameter for `path_and_query`, or `None` without a secret.
    pub(crate) fn sign<E>(&self, path_and_query: &str) -> Result<Option<String>, Error<E>> {
        let secret = match self.signing_secret {
            Some(ref secret) => secret,
            None => return Ok(None),
        };
        let key = URL_SAFE
            .decode(secret)
            .map_err(|e| Error::config(format!("malformed signing secret: {}", e)))?;
        let mut mac = HmacSha1::new_from_slice(&key)
            .map_err(|e| Error::config(format!("unusable signing secret: {}", e)))?;
        mac.update(path_and_query.as_bytes());
        Ok(Some(URL_SAFE.encode(mac.finalize().into_bytes())))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::convert::Infallible;

    use super::*;

    #[test]
    fn from_vars() {
        let vars: HashMap<&str, &str> = [
            ("PLACES_API_SERVER_KEY", "server"),
            ("PLACES_API_BROWSER_KEY", ""),
        ]
        .iter()
        .copied()
        .collect();
        let token = Token::from_vars::<Infallible, _>(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(token.server_key, "server");
        assert_eq!(token.browser_key, None);
        assert_eq!(token.image_key(), "server");

        match Token::from_vars::<Infallible, _>(|_| None) {
            Err(Error::Config(_)) => {}
            r => panic!("{:?}", r),
        }
    }

    #[test]
    fn sign() {
        // Example taken from Google's URL signing documentation.
        let token = Token::new("k").signing_secret("vNIXE0xscrmjlyV-12Nj_BvUPaw=");
        let sig = token
            .sign::<Infallible>("/maps/api/geocode/json?address=New+York&client=clientID")
            .unwrap();
        assert_eq!(sig.as_deref(), Some("chaRF2hTJKOScPr-RQCEhZbSzIE="));

        assert_eq!(Token::new("k").sign::<Infallible>("/").unwrap(), None);
    }

    #[test]
    fn bad_secret() {
        let token = Token::new("k").signing_secret("not base64!");
        assert!(token.sign::<Infallible>("/").is_err());
    }
}
