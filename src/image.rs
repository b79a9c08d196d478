//! Responses of the image endpoints.

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE, ETAG};
use http::StatusCode;
use http_body::Body;
use places_api_message::{Response, Status};

use crate::error::BoxError;
use crate::util::concat;

/// An image returned by Place Photo or Street View Image.
#[derive(Debug)]
pub struct Image<B> {
    body: B,
    content_type: Option<HeaderValue>,
}

impl<B> Image<B> {
    /// The `Content-Type` of the image, e.g. `image/jpeg`.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_ref().and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn into_body(self) -> B {
        self.body
    }
}

impl<B> Image<B>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    /// Reads the whole image into memory.
    pub async fn bytes(self) -> Result<Bytes, BoxError> {
        concat(self.body).await
    }
}

/// Maps the HTTP status of an image endpoint to an API status.
pub(crate) fn status(code: StatusCode) -> Status {
    match code {
        StatusCode::OK => Status::Ok,
        StatusCode::NOT_MODIFIED => Status::NotModified,
        StatusCode::BAD_REQUEST => Status::InvalidRequest,
        StatusCode::FORBIDDEN => Status::OverQueryLimit,
        _ => Status::UnknownError,
    }
}

/// Wraps an image endpoint response.
///
/// The body is kept for `Ok` and for `OverQueryLimit`, where the server sends a placeholder
/// image. Any other body is dropped unread.
pub(crate) fn response<B>(res: http::Response<B>) -> Response<Image<B>> {
    let (parts, body) = res.into_parts();
    let mut ret = Response::new(status(parts.status));
    ret.etag = parts
        .headers
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    if let Status::Ok | Status::OverQueryLimit = ret.status {
        ret.result = Some(Image {
            body,
            content_type: parts.headers.get(CONTENT_TYPE).cloned(),
        });
    }

    ret
}

#[cfg(test)]
mod tests {
    use hyper_pkg::Body;

    use super::*;

    fn image(code: u16) -> Response<Image<Body>> {
        response(
            http::Response::builder()
                .status(code)
                .header(CONTENT_TYPE, "image/jpeg")
                .header(ETAG, "\"v1\"")
                .body(Body::from(&b"\xff\xd8\xff"[..]))
                .unwrap(),
        )
    }

    #[test]
    fn statuses() {
        assert_eq!(status(StatusCode::OK), Status::Ok);
        assert_eq!(status(StatusCode::NOT_MODIFIED), Status::NotModified);
        assert_eq!(status(StatusCode::BAD_REQUEST), Status::InvalidRequest);
        assert_eq!(status(StatusCode::FORBIDDEN), Status::OverQueryLimit);
        assert_eq!(status(StatusCode::NOT_FOUND), Status::UnknownError);
        assert_eq!(status(StatusCode::INTERNAL_SERVER_ERROR), Status::UnknownError);
    }

    #[tokio::test]
    async fn ok() {
        let res = image(200);
        assert_eq!(res.status, Status::Ok);
        assert_eq!(res.etag.as_deref(), Some("\"v1\""));

        let img = res.result.unwrap();
        assert_eq!(img.content_type(), Some("image/jpeg"));
        assert_eq!(&img.bytes().await.unwrap()[..], b"\xff\xd8\xff");
    }

    #[test]
    fn bodies() {
        assert!(image(403).result.is_some());
        assert!(image(304).result.is_none());
        assert!(image(400).result.is_none());
        assert!(image(500).result.is_none());
    }
}
