//! Place

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};

use crate::address::{Address, AddressSeed};
use crate::event::{Event, EventSeed};
use crate::fields::DecodeOptions;
use crate::geometry::GeometrySeed;
use crate::key::Key;
use crate::opening_hours::{OpeningHours, OpeningHoursSeed};
use crate::photo::{Photo, PhotoSeed};
use crate::review::{Review, ReviewSeed};
use crate::util::{Int, ListSeed, Strings};

/// Initial capacity of a place's review list. The API returns at most five.
pub const REVIEWS_CAPACITY: usize = 5;
/// Initial capacity of a place's event list.
pub const EVENTS_CAPACITY: usize = 10;
/// Initial capacity of a place's photo list. The API returns at most ten.
pub const PHOTOS_CAPACITY: usize = 10;

/// Identifier of a place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Id {
    pub place_id: Option<String>,
    /// `"GOOGLE"` for public places, `"APP"` for places only visible to the adding application.
    pub scope: Option<String>,
}

/// Represents a place returned from the Places API.
///
/// Two places are equal iff their `place_id`s are equal. The remaining fields take no part
/// in equality or hashing.
#[derive(Clone, Debug, Default)]
pub struct Place {
    pub id: Option<Id>,
    /// Deprecated `id` token.
    pub legacy_id: Option<String>,
    /// Deprecated `reference` token.
    pub reference: Option<String>,
    pub icon: Option<String>,
    /// URL of the official Google page for the place.
    pub url: Option<String>,
    pub name: Option<String>,
    pub address: Option<Address>,
    pub formatted_address: Option<String>,
    pub vicinity: Option<String>,
    pub international_phone_number: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
    pub types: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Offset from UTC of the place's current timezone, in minutes.
    pub utc_offset: Option<i32>,
    pub rating: Option<f64>,
    /// From 0 (free) to 4 (very expensive).
    pub price_level: Option<i32>,
    pub permanently_closed: Option<bool>,
    pub open_now: Option<bool>,
    pub opening_hours: Vec<OpeningHours>,
    pub events: Vec<Event>,
    pub reviews: Vec<Review>,
    pub photos: Vec<Photo>,
}

impl Place {
    pub fn place_id(&self) -> Option<&str> {
        self.id.as_ref().and_then(|id| id.place_id.as_deref())
    }
}

impl PartialEq for Place {
    fn eq(&self, other: &Place) -> bool {
        self.place_id() == other.place_id()
    }
}

impl Eq for Place {}

impl Hash for Place {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.place_id().hash(state)
    }
}

/// Decodes one place object.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceSeed {
    pub options: DecodeOptions,
}

impl PlaceSeed {
    pub fn new(options: DecodeOptions) -> Self {
        PlaceSeed { options }
    }
}

/// Collects the fields of a place while its object is being walked.
#[derive(Default)]
struct PlaceBuilder {
    place_id: Option<String>,
    scope: Option<String>,
    place: Place,
}

impl PlaceBuilder {
    fn build(self) -> Place {
        let PlaceBuilder {
            place_id,
            scope,
            mut place,
        } = self;
        if place_id.is_some() || scope.is_some() {
            place.id = Some(Id { place_id, scope });
        }
        place
    }
}

impl<'de> DeserializeSeed<'de> for PlaceSeed {
    type Value = Place;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Place, D::Error> {
        d.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for PlaceSeed {
    type Value = Place;

    fn visit_map<A: MapAccess<'de>>(self, mut a: A) -> Result<Place, A::Error> {
        let DecodeOptions {
            fields,
            max_results,
        } = self.options;
        let mut b = PlaceBuilder::default();
        let p = &mut b.place;

        while let Some(key) = a.next_key::<Key>()? {
            if !fields.wants(key) {
                a.next_value::<IgnoredAny>()?;
                continue;
            }

            match key {
                Key::PlaceId => b.place_id = a.next_value()?,
                Key::Scope => b.scope = a.next_value()?,
                Key::Id => p.legacy_id = a.next_value()?,
                Key::Reference => p.reference = a.next_value()?,
                Key::Icon => p.icon = a.next_value()?,
                Key::Url => p.url = a.next_value()?,
                Key::Name => p.name = a.next_value()?,
                Key::AddressComponents => p.address = a.next_value_seed(AddressSeed { fields })?,
                Key::FormattedAddress => p.formatted_address = a.next_value()?,
                Key::Vicinity => p.vicinity = a.next_value()?,
                Key::InternationalPhoneNumber => p.international_phone_number = a.next_value()?,
                Key::FormattedPhoneNumber => p.formatted_phone_number = a.next_value()?,
                Key::Website => p.website = a.next_value()?,
                Key::Types => p.types = a.next_value_seed(Strings)?,
                Key::Geometry => {
                    let location = a.next_value_seed(GeometrySeed { fields })?;
                    p.latitude = location.lat;
                    p.longitude = location.lng;
                }
                Key::UtcOffset => p.utc_offset = a.next_value::<Int>()?.to_i32(),
                Key::Rating => p.rating = a.next_value()?,
                Key::PriceLevel => p.price_level = a.next_value::<Int>()?.to_i32(),
                Key::PermanentlyClosed => p.permanently_closed = a.next_value()?,
                Key::OpeningHours => {
                    let hours = a.next_value_seed(OpeningHoursSeed { fields })?;
                    p.open_now = hours.open_now;
                    p.opening_hours = hours.periods;
                }
                Key::Events => {
                    p.events =
                        a.next_value_seed(ListSeed::new(EventSeed, EVENTS_CAPACITY, max_results))?;
                }
                Key::Reviews => {
                    p.reviews = a.next_value_seed(ListSeed::new(
                        ReviewSeed,
                        REVIEWS_CAPACITY,
                        max_results,
                    ))?;
                }
                Key::Photos => {
                    p.photos =
                        a.next_value_seed(ListSeed::new(PhotoSeed, PHOTOS_CAPACITY, max_results))?;
                }
                _ => {
                    a.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(b.build())
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a place object")
    }
}
