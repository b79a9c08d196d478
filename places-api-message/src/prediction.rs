//! Autocomplete predictions

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};

use crate::fields::Fields;
use crate::key::Key;
use crate::place::Id;
use crate::substring::{Substring, SubstringSeed};
use crate::util::{Int, ListSeed, Strings};

/// A place suggested for a partial query by the Autocomplete API.
///
/// Like `Place`, equality and hashing only consider `place_id`.
#[derive(Clone, Debug, Default)]
pub struct Prediction {
    pub id: Option<Id>,
    /// Deprecated `id` token.
    pub legacy_id: Option<String>,
    /// Deprecated `reference` token.
    pub reference: Option<String>,
    /// Human-readable name of the predicted place.
    pub description: Option<String>,
    /// Parts of `description`, from most to least specific.
    pub terms: Vec<Substring>,
    /// Parts of `description` that matched the input.
    pub matched_substrings: Vec<Substring>,
    pub types: Vec<String>,
    /// Straight-line distance from the request's origin, in meters.
    pub distance_meters: Option<i64>,
}

impl Prediction {
    pub fn place_id(&self) -> Option<&str> {
        self.id.as_ref().and_then(|id| id.place_id.as_deref())
    }
}

impl PartialEq for Prediction {
    fn eq(&self, other: &Prediction) -> bool {
        self.place_id() == other.place_id()
    }
}

impl Eq for Prediction {}

impl Hash for Prediction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.place_id().hash(state)
    }
}

/// Decodes one prediction object.
#[derive(Clone, Copy, Debug, Default)]
pub struct PredictionSeed {
    pub fields: Fields,
}

impl PredictionSeed {
    pub fn new(fields: Fields) -> Self {
        PredictionSeed { fields }
    }
}

impl<'de> DeserializeSeed<'de> for PredictionSeed {
    type Value = Prediction;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Prediction, D::Error> {
        d.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for PredictionSeed {
    type Value = Prediction;

    fn visit_map<A: MapAccess<'de>>(self, mut a: A) -> Result<Prediction, A::Error> {
        let mut place_id: Option<String> = None;
        let mut scope: Option<String> = None;
        let mut ret = Prediction::default();

        while let Some(key) = a.next_key::<Key>()? {
            if !self.fields.wants(key) {
                a.next_value::<IgnoredAny>()?;
                continue;
            }

            match key {
                Key::PlaceId => place_id = a.next_value()?,
                Key::Scope => scope = a.next_value()?,
                Key::Id => ret.legacy_id = a.next_value()?,
                Key::Reference => ret.reference = a.next_value()?,
                Key::Description => ret.description = a.next_value()?,
                Key::Terms => ret.terms = a.next_value_seed(ListSeed::new(SubstringSeed, 5, 0))?,
                Key::MatchedSubstrings => {
                    ret.matched_substrings =
                        a.next_value_seed(ListSeed::new(SubstringSeed, 2, 0))?;
                }
                Key::Types => ret.types = a.next_value_seed(Strings)?,
                Key::DistanceMeters => ret.distance_meters = a.next_value::<Int>()?.0,
                _ => {
                    a.next_value::<IgnoredAny>()?;
                }
            }
        }

        if place_id.is_some() || scope.is_some() {
            ret.id = Some(Id { place_id, scope });
        }

        // The description may come after the spans that refer to it.
        if let Some(ref description) = ret.description {
            let sup: Arc<str> = Arc::from(description.as_str());
            for sub in ret.terms.iter_mut().chain(&mut ret.matched_substrings) {
                *sub = std::mem::take(sub).with_superstring(sup.clone());
            }
        }

        Ok(ret)
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a prediction object")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREDICTION: &str = r#"{
        "description": "Paris, France",
        "distance_meters": 8030004,
        "id": "691b237b0322f28988f3ce03e321ff72a12167fd",
        "matched_substrings": [{"length": 5, "offset": 0}],
        "place_id": "ChIJD7fiBh9u5kcRYJSMaMOCCwQ",
        "reference": "CjQlAAAA_KB6EEceSTfkteSSF6U0pvumHCoLUboRcDlAH05N1pZJLmOQbYmboEi0SwXBSoI2EhAhj249tFDCVh4R-PXZkPK8GhTBmp_6_lWljaf1joVs1SH2ttB_tw",
        "terms": [
            {"offset": 0, "value": "Paris"},
            {"value": "France"}
        ],
        "types": ["locality", "political", "geocode"]
    }"#;

    fn decode(json: &str, fields: Fields) -> Prediction {
        let mut de = serde_json::Deserializer::from_str(json);
        PredictionSeed::new(fields).deserialize(&mut de).unwrap()
    }

    #[test]
    fn decode_all() {
        let p = decode(PREDICTION, Fields::empty());

        assert_eq!(p.place_id(), Some("ChIJD7fiBh9u5kcRYJSMaMOCCwQ"));
        assert_eq!(p.description.as_deref(), Some("Paris, France"));
        assert_eq!(p.distance_meters, Some(8_030_004));
        assert_eq!(p.types, ["locality", "political", "geocode"]);

        assert_eq!(p.terms.len(), 2);
        assert_eq!(p.terms[0].offset(), 0);
        assert_eq!(p.terms[0].value().as_deref(), Some("Paris"));
        // Offset derived from the description.
        assert_eq!(p.terms[1].offset(), 7);
        assert_eq!(p.terms[1].superstring(), Some("Paris, France"));

        let matched = &p.matched_substrings[0];
        assert_eq!(matched.offset(), 0);
        assert_eq!(matched.length(), 5);
        assert_eq!(matched.value().as_deref(), Some("Paris"));
    }

    #[test]
    fn selected_fields() {
        let p = decode(PREDICTION, Fields::DESCRIPTION);

        assert_eq!(p.place_id(), Some("ChIJD7fiBh9u5kcRYJSMaMOCCwQ"));
        assert_eq!(p.description.as_deref(), Some("Paris, France"));
        assert!(p.terms.is_empty());
        assert!(p.matched_substrings.is_empty());
        assert!(p.types.is_empty());
        assert_eq!(p.distance_meters, None);
        assert_eq!(p.reference, None);
    }

    #[test]
    fn equality_by_place_id() {
        let a = decode(r#"{"place_id":"p","description":"A"}"#, Fields::empty());
        let b = decode(r#"{"description":"B","place_id":"p"}"#, Fields::empty());
        let c = decode(r#"{"place_id":"q","description":"A"}"#, Fields::empty());

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
