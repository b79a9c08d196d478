/*!
# Places API Message

Field-selective decoders for JSON responses of the Google Places API and the Street View Image
Metadata API.

The decoders walk the response in one pass. Members that were not requested through a
[`Fields`] set are consumed without being materialized, and unknown members are always skipped.

```
use places_api_message::{DecodeOptions, Fields, Status};

let json = r#"{
    "results": [
        {"place_id": "a", "name": "Cafe", "rating": 4.1, "vicinity": "1 Main St"},
        {"place_id": "b", "name": "Bar", "rating": 3.2, "vicinity": "2 Main St"}
    ],
    "status": "OK"
}"#;

let options = DecodeOptions::new(Fields::NAME | Fields::RATING);
let mut good = |p: &places_api_message::Place| p.rating.map_or(false, |r| r >= 4.0);
let res = places_api_message::search(json.as_bytes(), options, Some(&mut good)).unwrap();

assert_eq!(res.status, Status::Ok);
let places = res.result.unwrap();
assert_eq!(places.len(), 1);
assert_eq!(places[0].name.as_deref(), Some("Cafe"));
assert_eq!(places[0].vicinity, None);
```
*/

#[macro_use]
mod util;

pub mod address;
pub mod event;
pub mod fields;
pub mod geometry;
pub mod key;
pub mod opening_hours;
pub mod photo;
pub mod place;
pub mod prediction;
pub mod response;
pub mod review;
pub mod status;
pub mod streetview;
pub mod substring;

pub use crate::address::{Address, AddressType, Component};
pub use crate::event::Event;
pub use crate::fields::{wanted, DecodeOptions, Fields};
pub use crate::geometry::LatLng;
pub use crate::key::Key;
pub use crate::opening_hours::OpeningHours;
pub use crate::photo::Photo;
pub use crate::place::{Id, Place, PlaceSeed};
pub use crate::prediction::{Prediction, PredictionSeed};
pub use crate::response::{Response, ResponseSeed};
pub use crate::review::{Aspect, Review};
pub use crate::status::Status;
pub use crate::streetview::{StreetView, StreetViewSeed};
pub use crate::substring::Substring;
pub use serde_json::Error;
pub use serde_json::Result;

use std::io;

use serde::de::DeserializeSeed;

use crate::util::ListSeed;

/// Initial capacity of a page of search results. The API returns at most 20 per page.
pub const SEARCH_CAPACITY: usize = 20;
/// Initial capacity of a list of autocomplete predictions. The API returns at most five.
pub const PREDICTIONS_CAPACITY: usize = 5;

/// Decodes a Place Details response.
pub fn details<R: io::Read>(rdr: R, fields: Fields) -> Result<Response<Place>> {
    decode(rdr, ResponseSeed::new(Key::Result, PlaceSeed::new(DecodeOptions::new(fields))))
}

/// Decodes a Nearby Search or Text Search response.
///
/// Places for which `filter` returns `false` are dropped. Once `options.max_results` places
/// (if non-zero) have been accepted, the rest of the page is skipped. The same cap applies to
/// the review, event and photo lists of each place.
pub fn search<R: io::Read>(
    rdr: R,
    options: DecodeOptions,
    filter: Option<&mut dyn FnMut(&Place) -> bool>,
) -> Result<Response<Vec<Place>>> {
    let list = ListSeed::new(PlaceSeed::new(options), SEARCH_CAPACITY, options.max_results)
        .filter(filter);
    decode(rdr, ResponseSeed::new(Key::Results, list))
}

/// Decodes a Place Autocomplete or Query Autocomplete response.
pub fn autocomplete<R: io::Read>(
    rdr: R,
    options: DecodeOptions,
    filter: Option<&mut dyn FnMut(&Prediction) -> bool>,
) -> Result<Response<Vec<Prediction>>> {
    let list = ListSeed::new(
        PredictionSeed::new(options.fields),
        PREDICTIONS_CAPACITY,
        options.max_results,
    )
    .filter(filter);
    decode(rdr, ResponseSeed::new(Key::Predictions, list))
}

/// Decodes a Street View Image Metadata response.
pub fn street_view_metadata<R: io::Read>(rdr: R) -> Result<Response<StreetView>> {
    decode(rdr, StreetViewSeed)
}

fn decode<R, S, T>(rdr: R, seed: S) -> Result<T>
where
    R: io::Read,
    S: for<'de> DeserializeSeed<'de, Value = T>,
{
    let mut de = serde_json::Deserializer::from_reader(rdr);
    let value = seed.deserialize(&mut de)?;
    de.end()?;
    Ok(value)
}
