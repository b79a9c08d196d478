#![doc(html_root_url = "https://docs.rs/places-api/0.1.0")]

/*!
# Places API

An asynchronous client for the Google Places and Street View APIs.

Responses are decoded by [`places-api-message`](places_api_message), which builds only the
fields the caller asks for and skips the rest of the document.

## Overview

Here is a basic example that prints the names of cafés around a location that are open now:

```rust,no_run
use places_api::request::{Location, NearbySearch};
use places_api::{DecodeOptions, Fields, Token};

# #[tokio::main(flavor = "current_thread")]
# async fn main() {
let mut client = places_api::hyper::Client::new(Token::new("server_key"), Default::default());

let req = NearbySearch {
    types: &["cafe"],
    ..NearbySearch::new(Location::new(-33.8670522, 151.1957362), 500)
};
let options = DecodeOptions::new(Fields::NAME | Fields::OPEN_NOW);
let mut open = |place: &places_api::Place| place.open_now == Some(true);

let res = client.nearby_search(&req, options, Some(&mut open)).await.unwrap();
for place in res.result.unwrap_or_default() {
    println!("{}", place.name.unwrap_or_default());
}
# }
```

API-level failures such as `ZERO_RESULTS` or `OVER_QUERY_LIMIT` are reported through
[`Response::status`] rather than as an `Err`.
*/

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod util;

pub mod config;
pub mod error;
#[cfg(feature = "hyper")]
#[cfg_attr(docsrs, doc(cfg(feature = "hyper")))]
pub mod hyper;
pub mod image;
pub mod request;

mod gzip;
mod token;

pub use places_api_message as message;
pub use places_api_message::{DecodeOptions, Fields, Place, Prediction, Response, Status, StreetView};

pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::image::Image;
pub use crate::token::Token;

use std::fmt;
use std::marker::PhantomData;

use bytes::Bytes;
use futures_util::future::poll_fn;
use http::header::{HeaderValue, ACCEPT_ENCODING, IF_NONE_MATCH};
use http_body::Body;
use tower_service::Service;
use tracing::{debug, warn};

use crate::error::BoxError;
use crate::request::{
    Autocomplete, Details, Endpoint, NearbySearch, Photo, StreetViewImage, StreetViewMetadata,
    TextSearch,
};
use crate::util::reborrow;

/// A client for the Places and Street View APIs over an HTTP `Service`.
///
/// `S` is the transport and `B` the request body type it accepts. Any
/// `tower_service::Service<http::Request<B>>` works, e.g. a `hyper::Client`.
pub struct Client<S, B> {
    service: S,
    token: Token,
    config: Config,
    marker: PhantomData<fn() -> B>,
}

impl<S, B> Client<S, B> {
    /// Creates a client that sends its requests through `service`.
    pub fn with_service(service: S, token: Token, config: Config) -> Self {
        Client {
            service,
            token,
            config,
            marker: PhantomData,
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    pub fn into_service(self) -> S {
        self.service
    }
}

impl<S, B, R> Client<S, B>
where
    S: Service<http::Request<B>, Response = http::Response<R>>,
    B: Default,
    R: Body,
    R::Error: Into<BoxError>,
{
    /// Nearby Search.
    ///
    /// Places for which `filter` returns `false` are dropped while decoding. If `req` carries a
    /// page token and the server answers `INVALID_REQUEST`, the request is retried once after
    /// `Config::page_token_retry_delay`.
    pub async fn nearby_search(
        &mut self,
        req: &NearbySearch<'_>,
        options: DecodeOptions,
        filter: Option<&mut (dyn FnMut(&Place) -> bool + Send)>,
    ) -> Result<Response<Vec<Place>>, Error<S::Error>> {
        self.search(req, options, filter).await
    }

    /// Text Search. Same as `nearby_search` otherwise.
    pub async fn text_search(
        &mut self,
        req: &TextSearch<'_>,
        options: DecodeOptions,
        filter: Option<&mut (dyn FnMut(&Place) -> bool + Send)>,
    ) -> Result<Response<Vec<Place>>, Error<S::Error>> {
        self.search(req, options, filter).await
    }

    /// Place Details.
    pub async fn details(
        &mut self,
        req: &Details<'_>,
        fields: Fields,
    ) -> Result<Response<Place>, Error<S::Error>> {
        let body = self.fetch_json(req).await?;
        Ok(places_api_message::details(&body[..], fields)?)
    }

    /// Place Autocomplete.
    pub async fn autocomplete(
        &mut self,
        req: &Autocomplete<'_>,
        options: DecodeOptions,
        filter: Option<&mut (dyn FnMut(&Prediction) -> bool + Send)>,
    ) -> Result<Response<Vec<Prediction>>, Error<S::Error>> {
        let body = self.fetch_json(req).await?;
        let filter = filter.map(|f| f as &mut dyn FnMut(&Prediction) -> bool);
        Ok(places_api_message::autocomplete(&body[..], options, filter)?)
    }

    /// Place Photo.
    ///
    /// The status comes from the HTTP status code. The image body is returned unread for `Ok`
    /// and `OverQueryLimit` and is released when the `Image` is dropped.
    pub async fn photo(&mut self, req: &Photo<'_>) -> Result<Response<Image<R>>, Error<S::Error>> {
        let res = self.send(req).await?;
        Ok(image::response(res))
    }

    /// Street View Image. Same as `photo` otherwise.
    pub async fn street_view_image(
        &mut self,
        req: &StreetViewImage<'_>,
    ) -> Result<Response<Image<R>>, Error<S::Error>> {
        let res = self.send(req).await?;
        Ok(image::response(res))
    }

    /// Street View Image Metadata.
    pub async fn street_view_metadata(
        &mut self,
        req: &StreetViewMetadata<'_>,
    ) -> Result<Response<StreetView>, Error<S::Error>> {
        let body = self.fetch_json(req).await?;
        Ok(places_api_message::street_view_metadata(&body[..])?)
    }

    async fn search<Q: Endpoint>(
        &mut self,
        req: &Q,
        options: DecodeOptions,
        mut filter: Option<&mut (dyn FnMut(&Place) -> bool + Send)>,
    ) -> Result<Response<Vec<Place>>, Error<S::Error>> {
        let body = self.fetch_json(req).await?;
        let res = places_api_message::search(&body[..], options, reborrow(&mut filter))?;

        let paged = req.page_token().map_or(false, |t| !t.is_empty());
        if !paged || res.status != Status::InvalidRequest {
            return Ok(res);
        }

        let delay = self.config.page_token_retry_delay;
        warn!(path = Q::PATH, ?delay, "page token not ready, retrying once");
        tokio::time::sleep(delay).await;

        let body = self.fetch_json(req).await?;
        let filter = filter.map(|f| f as &mut dyn FnMut(&Place) -> bool);
        Ok(places_api_message::search(&body[..], options, filter)?)
    }

    async fn fetch_json<Q: Endpoint>(&mut self, req: &Q) -> Result<Bytes, Error<S::Error>> {
        let res = self.send(req).await?;
        gzip::read_body(res).await
    }

    async fn send<Q: Endpoint>(&mut self, req: &Q) -> Result<http::Response<R>, Error<S::Error>> {
        self.config.validate::<S::Error>(Some(&self.token))?;

        let key = if Q::IMAGE {
            self.token.image_key()
        } else {
            self.token.server_key.as_str()
        };
        let query = query_string::<Q, S::Error>(req, key)?;
        let (mut uri, signed) = self.config.uri(Q::PATH, &query);
        if let Some(signature) = self.token.sign::<S::Error>(&signed)? {
            uri.push_str("&signature=");
            uri.push_str(&signature);
        }

        let mut builder = http::Request::get(uri);
        if self.config.gzip && !Q::IMAGE {
            builder = builder.header(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
        }
        if let Some(etag) = req.etag() {
            builder = builder.header(IF_NONE_MATCH, etag);
        }
        let request = builder.body(B::default())?;

        debug!(path = Q::PATH, "sending request");
        poll_fn(|cx| self.service.poll_ready(cx))
            .await
            .map_err(Error::Service)?;
        let res = self.service.call(request).await.map_err(Error::Service)?;
        debug!(path = Q::PATH, status = %res.status(), "received response");

        Ok(res)
    }
}

impl<S: Clone, B> Clone for Client<S, B> {
    fn clone(&self) -> Self {
        Client::with_service(self.service.clone(), self.token.clone(), self.config.clone())
    }
}

impl<S: fmt::Debug, B> fmt::Debug for Client<S, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("service", &self.service)
            .field("config", &self.config)
            .finish()
    }
}

/// Serializes `req` and appends the API key.
fn query_string<Q: Endpoint, E>(req: &Q, key: &str) -> Result<String, Error<E>> {
    let mut query = serde_urlencoded::to_string(req).map_err(|e| Error::config(e.to_string()))?;
    let key = serde_urlencoded::to_string(&[("key", key)]).map_err(|e| Error::config(e.to_string()))?;
    if !query.is_empty() {
        query.push('&');
    }
    query.push_str(&key);
    Ok(query)
}
