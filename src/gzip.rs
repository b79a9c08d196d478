use bytes::Bytes;
use http::header::CONTENT_ENCODING;
use http::Response;
use http_body::Body;

use crate::error::{BoxError, Error};
use crate::util::concat;

/// Reads the whole body of `res`, inflating it if the server sent it gzip-encoded.
pub async fn read_body<R, E>(res: Response<R>) -> Result<Bytes, Error<E>>
where
    R: Body,
    R::Error: Into<BoxError>,
{
    let gzip = res
        .headers()
        .get_all(CONTENT_ENCODING)
        .iter()
        .any(|e| e == "gzip");
    let body = res.into_body();

    if gzip {
        imp::gunzip(body).await
    } else {
        concat(body).await.map_err(Error::Body)
    }
}

#[cfg(feature = "gzip")]
mod imp {
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use async_compression::tokio::bufread::GzipDecoder;
    use bytes::Bytes;
    use futures_core::{Stream, TryStream};
    use futures_util::ready;
    use http_body::Body;
    use pin_project_lite::pin_project;
    use tokio::io::AsyncReadExt;
    use tokio_util::io::StreamReader;

    use crate::error::{BoxError, Error};
    use crate::util::HttpBodyAsStream;

    pin_project! {
        // Keeps the body error so that it is not reported as a gzip error.
        struct Adapter<S>
        where
            S: TryStream,
        {
            #[pin]
            inner: S,
            error: Option<S::Error>,
        }
    }

    impl<S: TryStream> Stream for Adapter<S> {
        type Item = io::Result<S::Ok>;

        fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
            let mut this = self.project();
            match ready!(this.inner.as_mut().try_poll_next(cx)) {
                Some(result) => Poll::Ready(Some(result.map_err(|e| {
                    *this.error = Some(e);
                    io::Error::new(io::ErrorKind::Other, "response body failed")
                }))),
                None => Poll::Ready(None),
            }
        }
    }

    pub async fn gunzip<B, E>(body: B) -> Result<Bytes, Error<E>>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let adapter = Adapter {
            inner: HttpBodyAsStream::new(body),
            error: None,
        };
        let decoder = GzipDecoder::new(StreamReader::new(adapter));
        futures_util::pin_mut!(decoder);

        let mut buf = Vec::new();
        let result = decoder.as_mut().read_to_end(&mut buf).await;
        match result {
            Ok(_) => Ok(buf.into()),
            Err(e) => Err(decoder
                .get_pin_mut()
                .get_pin_mut()
                .project()
                .error
                .take()
                .map_or(Error::Gzip(e), Error::Body)),
        }
    }
}

#[cfg(not(feature = "gzip"))]
mod imp {
    use std::io;

    use bytes::Bytes;

    use crate::error::Error;

    pub async fn gunzip<B, E>(_: B) -> Result<Bytes, Error<E>> {
        Err(Error::Gzip(io::Error::new(
            io::ErrorKind::Other,
            "received a gzip-encoded body without the `gzip` feature",
        )))
    }
}

#[cfg(all(test, feature = "gzip"))]
mod tests {
    use std::convert::Infallible;

    use async_compression::tokio::bufread::GzipEncoder;
    use hyper_pkg::Body;
    use tokio::io::AsyncReadExt;

    use super::*;

    async fn compress(data: &[u8]) -> Vec<u8> {
        let mut ret = Vec::new();
        GzipEncoder::new(data).read_to_end(&mut ret).await.unwrap();
        ret
    }

    #[tokio::test]
    async fn gzip_body() {
        let json = br#"{"status":"OK"}"#;
        let res = Response::builder()
            .header(CONTENT_ENCODING, "gzip")
            .body(Body::from(compress(json).await))
            .unwrap();
        let body = read_body::<_, Infallible>(res).await.unwrap();
        assert_eq!(&body[..], &json[..]);
    }

    #[tokio::test]
    async fn identity_body() {
        let res = Response::new(Body::from("plain"));
        let body = read_body::<_, Infallible>(res).await.unwrap();
        assert_eq!(&body[..], b"plain");
    }

    #[tokio::test]
    async fn corrupt_gzip() {
        let res = Response::builder()
            .header(CONTENT_ENCODING, "gzip")
            .body(Body::from("not gzip"))
            .unwrap();
        match read_body::<_, Infallible>(res).await {
            Err(Error::Gzip(_)) => {}
            r => panic!("{:?}", r),
        }
    }
}
