//! Geometry object
//!
//! Only `geometry.location` is kept, flattened to a latitude/longitude pair on the containing
//! entity. `viewport` is always skipped.

use std::fmt;

use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};

use crate::fields::Fields;
use crate::key::Key;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LatLng {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Decodes a `geometry` object into its `location`.
#[derive(Clone, Copy)]
pub(crate) struct GeometrySeed {
    pub fields: Fields,
}

impl<'de> DeserializeSeed<'de> for GeometrySeed {
    type Value = LatLng;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<LatLng, D::Error> {
        d.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for GeometrySeed {
    type Value = LatLng;

    fn visit_map<V: MapAccess<'de>>(self, mut v: V) -> Result<LatLng, V::Error> {
        let mut ret = LatLng::default();

        while let Some(k) = v.next_key::<Key>()? {
            match k {
                Key::Location => {
                    ret = v.next_value_seed(LocationSeed {
                        fields: self.fields,
                    })?
                }
                _ => {
                    v.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(ret)
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a map with a `location` field")
    }
}

/// Decodes a `{"lat": .., "lng": ..}` object.
#[derive(Clone, Copy)]
pub(crate) struct LocationSeed {
    pub fields: Fields,
}

impl<'de> DeserializeSeed<'de> for LocationSeed {
    type Value = LatLng;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<LatLng, D::Error> {
        d.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for LocationSeed {
    type Value = LatLng;

    fn visit_map<V: MapAccess<'de>>(self, mut v: V) -> Result<LatLng, V::Error> {
        let mut ret = LatLng::default();

        while let Some(k) = v.next_key::<Key>()? {
            if !self.fields.wants(k) {
                v.next_value::<IgnoredAny>()?;
                continue;
            }
            match k {
                Key::Lat => ret.lat = v.next_value()?,
                Key::Lng => ret.lng = v.next_value()?,
                _ => {
                    v.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(ret)
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a map with `lat` and `lng` fields")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(json: &str, fields: Fields) -> LatLng {
        let mut de = serde_json::Deserializer::from_str(json);
        GeometrySeed { fields }.deserialize(&mut de).unwrap()
    }

    #[test]
    fn unwraps_location() {
        let json = r#"{
            "viewport": {
                "northeast": {"lat": -33.8653, "lng": 151.1969},
                "southwest": {"lat": -33.8680, "lng": 151.1942}
            },
            "location": {"lat": -33.866651, "lng": 151.195827}
        }"#;

        assert_eq!(
            geometry(json, Fields::empty()),
            LatLng {
                lat: Some(-33.866651),
                lng: Some(151.195827),
            }
        );
        assert_eq!(
            geometry(json, Fields::LONGITUDE),
            LatLng {
                lat: None,
                lng: Some(151.195827),
            }
        );
    }

    #[test]
    fn integer_coordinates() {
        let ll = geometry(r#"{"location":{"lat":0,"lng":-1}}"#, Fields::empty());
        assert_eq!(ll.lat, Some(0.0));
        assert_eq!(ll.lng, Some(-1.0));
    }

    #[test]
    fn deserialize_fail() {
        macro_rules! assert_fail {
            ($json:expr) => {{
                serde_json::from_str::<IgnoredAny>($json).expect("invalid JSON: this is a test bug");
                let mut de = serde_json::Deserializer::from_str($json);
                GeometrySeed {
                    fields: Fields::empty(),
                }
                .deserialize(&mut de)
                .unwrap_err();
            }};
        }

        assert_fail!("[0,1]");
        assert_fail!(r#"{"location":[1,2]}"#);
        assert_fail!(r#"{"location":{"lat":"north"}}"#);
    }
}
