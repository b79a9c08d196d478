//! Response envelope

use std::fmt;

use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};

use crate::key::Key;
use crate::status::Status;
use crate::util::Strings;

/// A decoded API response.
///
/// A non-OK `status` is not an error on the Rust side: the caller is expected to branch on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Response<T> {
    pub status: Status,
    pub error_message: Option<String>,
    /// The payload. `None` if the response carried none, e.g. on most error statuses.
    pub result: Option<T>,
    /// Attributions that must be displayed along with the result, as HTML snippets.
    pub html_attributions: Vec<String>,
    /// Token for requesting the next page of search results.
    pub next_page_token: Option<String>,
    /// Validator of a downloaded image, from the `ETag` header.
    pub etag: Option<String>,
}

impl<T> Response<T> {
    pub fn new(status: Status) -> Self {
        Response {
            status,
            error_message: None,
            result: None,
            html_attributions: Vec::new(),
            next_page_token: None,
            etag: None,
        }
    }

    /// Maps the payload while keeping the rest of the envelope.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Response<U> {
        Response {
            status: self.status,
            error_message: self.error_message,
            result: self.result.map(f),
            html_attributions: self.html_attributions,
            next_page_token: self.next_page_token,
            etag: self.etag,
        }
    }
}

impl<T> Default for Response<T> {
    fn default() -> Self {
        Response::new(Status::default())
    }
}

/// Decodes a response envelope, running `payload` on the value of the `key` member.
///
/// The payload seed is used at most once. A repeated payload member is skipped.
pub struct ResponseSeed<P> {
    payload: P,
    key: Key,
}

impl<P> ResponseSeed<P> {
    pub fn new(key: Key, payload: P) -> Self {
        ResponseSeed { payload, key }
    }
}

impl<'de, P: DeserializeSeed<'de>> DeserializeSeed<'de> for ResponseSeed<P> {
    type Value = Response<P::Value>;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_map(self)
    }
}

impl<'de, P: DeserializeSeed<'de>> Visitor<'de> for ResponseSeed<P> {
    type Value = Response<P::Value>;

    fn visit_map<A: MapAccess<'de>>(self, mut a: A) -> Result<Self::Value, A::Error> {
        let payload_key = self.key;
        let mut payload = Some(self.payload);
        let mut ret = Response::default();

        while let Some(key) = a.next_key::<Key>()? {
            if key == payload_key {
                match payload.take() {
                    Some(seed) => ret.result = Some(a.next_value_seed(seed)?),
                    None => {
                        a.next_value::<IgnoredAny>()?;
                    }
                }
                continue;
            }

            match key {
                Key::Status => ret.status = a.next_value()?,
                Key::ErrorMessage => ret.error_message = a.next_value()?,
                Key::HtmlAttributions => ret.html_attributions = a.next_value_seed(Strings)?,
                Key::NextPageToken => ret.next_page_token = a.next_value()?,
                _ => {
                    a.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(ret)
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a response object")
    }
}
