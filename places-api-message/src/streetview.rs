//! Street View image metadata

use std::fmt;

use chrono::NaiveDate;
use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};

use crate::fields::Fields;
use crate::geometry::LocationSeed;
use crate::key::Key;
use crate::response::Response;
use crate::status::Status;

/// Metadata of the panorama nearest to a requested location.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StreetView {
    pub copyright: Option<String>,
    /// Capture month, as `YYYY-MM`.
    pub date: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub pano_id: Option<String>,
}

impl StreetView {
    /// The first day of the capture month.
    pub fn date(&self) -> Option<NaiveDate> {
        let date = self.date.as_deref()?;
        NaiveDate::parse_from_str(&format!("{}-01", date), "%Y-%m-%d").ok()
    }
}

/// Decodes a metadata response. Unlike the Places responses, the metadata members sit directly
/// in the envelope, so `result` is only set when the status is OK.
#[derive(Clone, Copy, Debug, Default)]
pub struct StreetViewSeed;

impl<'de> DeserializeSeed<'de> for StreetViewSeed {
    type Value = Response<StreetView>;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for StreetViewSeed {
    type Value = Response<StreetView>;

    fn visit_map<A: MapAccess<'de>>(self, mut a: A) -> Result<Self::Value, A::Error> {
        let mut ret = Response::default();
        let mut sv = StreetView::default();

        while let Some(key) = a.next_key::<Key>()? {
            match key {
                Key::Status => ret.status = a.next_value()?,
                Key::ErrorMessage => ret.error_message = a.next_value()?,
                Key::Copyright => sv.copyright = a.next_value()?,
                Key::Date => sv.date = a.next_value()?,
                Key::Location => {
                    let location = a.next_value_seed(LocationSeed {
                        fields: Fields::empty(),
                    })?;
                    sv.latitude = location.lat;
                    sv.longitude = location.lng;
                }
                Key::PanoId => sv.pano_id = a.next_value()?,
                _ => {
                    a.next_value::<IgnoredAny>()?;
                }
            }
        }

        if ret.status == Status::Ok {
            ret.result = Some(sv);
        }

        Ok(ret)
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a Street View metadata object")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Response<StreetView> {
        let mut de = serde_json::Deserializer::from_str(json);
        StreetViewSeed.deserialize(&mut de).unwrap()
    }

    #[test]
    fn metadata() {
        let res = decode(include_str!("test_assets/streetview.json"));
        assert_eq!(res.status, Status::Ok);

        let sv = res.result.unwrap();
        assert_eq!(sv.copyright.as_deref(), Some("© Google"));
        assert_eq!(sv.date(), NaiveDate::from_ymd_opt(2016, 5, 1));
        assert_eq!(sv.latitude, Some(48.85783227207914));
        assert_eq!(sv.longitude, Some(2.295226175151347));
        assert_eq!(sv.pano_id.as_deref(), Some("tu510ie_z4ptBZYo2BGEJg"));
    }

    #[test]
    fn zero_results() {
        let res = decode(r#"{"status":"ZERO_RESULTS"}"#);
        assert_eq!(res.status, Status::ZeroResults);
        assert_eq!(res.result, None);
    }

    #[test]
    fn bad_date() {
        let sv = StreetView {
            date: Some("May 2016".to_owned()),
            ..StreetView::default()
        };
        assert_eq!(sv.date(), None);
    }
}
