//! Photo references

use std::fmt;

use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};

use crate::key::Key;
use crate::util::{Int, Strings};

/// A photo of a place. The image itself is fetched separately with `reference`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Photo {
    pub reference: Option<String>,
    /// Maximum width of the original image, in pixels.
    pub width: Option<i32>,
    /// Maximum height of the original image, in pixels.
    pub height: Option<i32>,
    /// Attributions that must be displayed along with the photo, as HTML snippets.
    pub html_attributions: Vec<String>,
}

#[derive(Clone, Copy)]
pub(crate) struct PhotoSeed;

impl<'de> DeserializeSeed<'de> for PhotoSeed {
    type Value = Photo;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Photo, D::Error> {
        d.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for PhotoSeed {
    type Value = Photo;

    fn visit_map<A: MapAccess<'de>>(self, mut a: A) -> Result<Photo, A::Error> {
        let mut ret = Photo::default();

        while let Some(key) = a.next_key::<Key>()? {
            match key {
                Key::PhotoReference => ret.reference = a.next_value()?,
                Key::Width => ret.width = a.next_value::<Int>()?.to_i32(),
                Key::Height => ret.height = a.next_value::<Int>()?.to_i32(),
                Key::HtmlAttributions => {
                    ret.html_attributions = a.next_value_seed(Strings)?;
                }
                _ => {
                    a.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(ret)
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a photo object")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode() {
        let mut de = serde_json::Deserializer::from_str(
            r#"{
                "height": 1365,
                "html_attributions": ["<a href=\"https://maps.google.com/maps/contrib/1\">A</a>"],
                "photo_reference": "CnRvAAAAwMpdHeWlXl",
                "width": 2048
            }"#,
        );
        let photo = PhotoSeed.deserialize(&mut de).unwrap();

        assert_eq!(photo.reference.as_deref(), Some("CnRvAAAAwMpdHeWlXl"));
        assert_eq!(photo.width, Some(2048));
        assert_eq!(photo.height, Some(1365));
        assert_eq!(photo.html_attributions.len(), 1);
    }

    #[test]
    fn null_attributions() {
        let mut de = serde_json::Deserializer::from_str(r#"{"html_attributions":null}"#);
        let photo = PhotoSeed.deserialize(&mut de).unwrap();
        assert!(photo.html_attributions.is_empty());
    }
}
