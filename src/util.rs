use std::fmt::{self, Display, Formatter};
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Buf, Bytes, BytesMut};
use futures_core::Stream;
use futures_util::TryStreamExt;
use http_body::Body;
use pin_project_lite::pin_project;
use serde::Serializer;

use crate::error::BoxError;

/// Creates an enum with `AsRef<str>`, `Display` and `Serialize` impls.
macro_rules! str_enum {
    (
        $(#[$attr:meta])*
        pub enum $E:ident {
            $(
                $(#[$v_attr:meta])*
                $V:ident = $by:expr
            ),*$(,)?
        }
    ) => {
        $(#[$attr])*
        pub enum $E {
            $(
                $(#[$v_attr])*
                $V,
            )*
        }

        impl std::convert::AsRef<str> for $E {
            fn as_ref(&self) -> &str {
                match *self {
                    $($E::$V => $by,)*
                }
            }
        }

        impl std::fmt::Display for $E {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl serde::Serialize for $E {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(self.as_ref())
            }
        }
    }
}

pin_project! {
    /// Wraps `http_body::Body` to make it a `Stream`.
    pub struct HttpBodyAsStream<B> {
        #[pin]
        pub inner: B,
    }
}

impl<B: Body> HttpBodyAsStream<B> {
    pub fn new(inner: B) -> Self {
        HttpBodyAsStream { inner }
    }
}

impl<B> Stream for HttpBodyAsStream<B>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    type Item = Result<Bytes, BoxError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_data(cx).map(|opt| {
            opt.map(|result| {
                result
                    .map(|mut buf| buf.copy_to_bytes(buf.remaining()))
                    .map_err(Into::into)
            })
        })
    }
}

/// Reads a whole body into memory.
pub async fn concat<B>(body: B) -> Result<Bytes, BoxError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let stream = HttpBodyAsStream::new(body);
    futures_util::pin_mut!(stream);

    let mut buf = BytesMut::new();
    while let Some(chunk) = stream.try_next().await? {
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

pub fn fmt_join<T: Display>(t: &[T], sep: &str, f: &mut Formatter<'_>) -> fmt::Result {
    let mut iter = t.iter();
    if let Some(t) = iter.next() {
        Display::fmt(t, f)?;
        for t in iter {
            write!(f, "{}{}", sep, t)?;
        }
    }
    Ok(())
}

/// Serializes a list as a single `|`-separated query value.
pub fn pipe_separated<T: Display, S: Serializer>(t: &[T], s: S) -> Result<S::Ok, S::Error> {
    struct Join<'a, T>(&'a [T]);

    impl<'a, T: Display> Display for Join<'a, T> {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            fmt_join(self.0, "|", f)
        }
    }

    s.collect_str(&Join(t))
}

/// Reborrows an optional filter for another decode pass.
pub fn reborrow<'a, T>(
    filter: &'a mut Option<&mut (dyn FnMut(&T) -> bool + Send)>,
) -> Option<&'a mut dyn FnMut(&T) -> bool> {
    match *filter {
        Some(ref mut f) => Some(&mut **f as &mut dyn FnMut(&T) -> bool),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipes() {
        #[derive(serde::Serialize)]
        struct Q<'a> {
            #[serde(serialize_with = "pipe_separated")]
            types: &'a [&'a str],
        }

        let q = serde_urlencoded::to_string(Q {
            types: &["cafe", "bakery"],
        })
        .unwrap();
        assert_eq!(q, "types=cafe%7Cbakery");
    }

    #[test]
    fn reborrow_twice() {
        let mut seen = 0;
        let mut count = |_: &u32| {
            seen += 1;
            true
        };
        let mut filter: Option<&mut (dyn FnMut(&u32) -> bool + Send)> = Some(&mut count);

        for _ in 0..2 {
            if let Some(f) = reborrow(&mut filter) {
                assert!(f(&1));
            }
        }
        drop(filter);
        assert_eq!(seen, 2);
    }

    #[test]
    fn concat_chunks() {
        let body = hyper_pkg::Body::wrap_stream(futures::stream::iter(vec![
            Ok::<_, std::io::Error>("{\"a\":"),
            Ok("1}"),
        ]));
        let bytes = futures::executor::block_on(concat(body)).unwrap();
        assert_eq!(&bytes[..], b"{\"a\":1}");
    }
}
