//! Reviews

use std::fmt;

use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};

use crate::key::Key;
use crate::util::{Int, ListSeed};

/// A user review of a place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Review {
    pub aspects: Vec<Aspect>,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    /// IETF language code of the review text.
    pub language: Option<String>,
    /// Overall rating, from 1 to 5.
    pub rating: Option<i32>,
    pub text: Option<String>,
    /// Time of the review, in seconds since the UNIX epoch.
    pub time: Option<i64>,
}

/// A rating of a single attribute of a place, e.g. `"food"` or `"service"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Aspect {
    pub kind: Option<String>,
    /// From 0 to 3.
    pub rating: Option<i32>,
}

#[derive(Clone, Copy)]
pub(crate) struct ReviewSeed;

impl<'de> DeserializeSeed<'de> for ReviewSeed {
    type Value = Review;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Review, D::Error> {
        d.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for ReviewSeed {
    type Value = Review;

    fn visit_map<A: MapAccess<'de>>(self, mut a: A) -> Result<Review, A::Error> {
        let mut ret = Review::default();

        while let Some(key) = a.next_key::<Key>()? {
            match key {
                Key::Aspects => ret.aspects = a.next_value_seed(ListSeed::new(AspectSeed, 4, 0))?,
                Key::AuthorName => ret.author_name = a.next_value()?,
                Key::AuthorUrl => ret.author_url = a.next_value()?,
                Key::Language => ret.language = a.next_value()?,
                Key::Rating => ret.rating = a.next_value::<Int>()?.to_i32(),
                Key::Text => ret.text = a.next_value()?,
                Key::Time => ret.time = a.next_value::<Int>()?.0,
                _ => {
                    a.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(ret)
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a review object")
    }
}

#[derive(Clone, Copy)]
struct AspectSeed;

impl<'de> DeserializeSeed<'de> for AspectSeed {
    type Value = Aspect;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Aspect, D::Error> {
        d.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for AspectSeed {
    type Value = Aspect;

    fn visit_map<A: MapAccess<'de>>(self, mut a: A) -> Result<Aspect, A::Error> {
        let mut ret = Aspect::default();

        while let Some(key) = a.next_key::<Key>()? {
            match key {
                Key::Type => ret.kind = a.next_value()?,
                Key::Rating => ret.rating = a.next_value::<Int>()?.to_i32(),
                _ => {
                    a.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(ret)
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an aspect rating")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode() {
        let mut de = serde_json::Deserializer::from_str(
            r#"{
                "aspects": [{"rating": 3, "type": "quality"}, {"type": "service"}],
                "author_name": "Simon Bengtsson",
                "author_url": "https://plus.google.com/104675092887960962573",
                "language": "en",
                "profile_photo_url": "https://lh3.googleusercontent.com/photo.jpg",
                "rating": 5,
                "relative_time_description": "a month ago",
                "text": "Just went inside to have a look at Google. Amazing.",
                "time": 1338440552
            }"#,
        );
        let review = ReviewSeed.deserialize(&mut de).unwrap();

        assert_eq!(review.aspects.len(), 2);
        assert_eq!(review.aspects[0].kind.as_deref(), Some("quality"));
        assert_eq!(review.aspects[0].rating, Some(3));
        assert_eq!(review.aspects[1].rating, None);
        assert_eq!(review.author_name.as_deref(), Some("Simon Bengtsson"));
        assert_eq!(review.language.as_deref(), Some("en"));
        assert_eq!(review.rating, Some(5));
        assert_eq!(review.time, Some(1_338_440_552));
    }
}
