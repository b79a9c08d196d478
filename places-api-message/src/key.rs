//! Wire field names understood by the decoders.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::de::{Deserialize, Deserializer, Visitor};

use crate::fields::Fields;

macro_rules! keys {
    (
        $(
            $(#[$v_attr:meta])*
            $V:ident = $name:expr $(=> $F:ident)?,
        )*
    ) => {
        /// A JSON object key known to either the Places or the Street View schema.
        ///
        /// Any other name maps to `Key::Unknown`, whose value is always skipped.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum Key {
            $(
                $(#[$v_attr])*
                $V,
            )*
            /// A name not known to this library.
            Unknown,
        }

        static TABLE: Lazy<HashMap<&'static str, Key>> = Lazy::new(|| {
            let entries: &[(&'static str, Key)] = &[$(($name, Key::$V)),*];
            entries.iter().copied().collect()
        });

        impl Key {
            /// The field group that has to be requested for this key to be decoded, or `None`
            /// for keys that are always traversed.
            pub fn field(self) -> Option<Fields> {
                match self {
                    $(Key::$V => keys!(@field $($F)?),)*
                    Key::Unknown => None,
                }
            }

            /// The wire name of the key. `Key::Unknown` has an empty name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Key::$V => $name,)*
                    Key::Unknown => "",
                }
            }
        }
    };
    (@field) => { None };
    (@field $F:ident) => { Some(Fields::$F) };
}

keys! {
    // Envelope
    Status = "status",
    ErrorMessage = "error_message",
    HtmlAttributions = "html_attributions",
    NextPageToken = "next_page_token",
    Result = "result",
    Results = "results",
    Predictions = "predictions",

    // Place
    PlaceId = "place_id",
    Scope = "scope",
    Id = "id" => REFERENCE,
    Reference = "reference" => REFERENCE,
    Icon = "icon" => ICON,
    Url = "url" => URL,
    Name = "name" => NAME,
    AddressComponents = "address_components",
    LongName = "long_name" => ADDRESS,
    ShortName = "short_name" => ADDRESS,
    Types = "types" => TYPES,
    FormattedAddress = "formatted_address" => FORMATTED_ADDRESS,
    Vicinity = "vicinity" => VICINITY,
    InternationalPhoneNumber = "international_phone_number" => INTL_PHONE_NUMBER,
    FormattedPhoneNumber = "formatted_phone_number" => FORMATTED_PHONE_NUMBER,
    Website = "website" => WEBSITE,
    Geometry = "geometry",
    Location = "location",
    Lat = "lat" => LATITUDE,
    Lng = "lng" => LONGITUDE,
    Viewport = "viewport",
    UtcOffset = "utc_offset" => UTC_OFFSET,
    Rating = "rating" => RATING,
    PriceLevel = "price_level" => PRICE_LEVEL,
    PermanentlyClosed = "permanently_closed" => PERMANENTLY_CLOSED,

    // Opening hours
    OpeningHours = "opening_hours",
    OpenNow = "open_now" => OPEN_NOW,
    Periods = "periods" => OPENING_HOURS,
    Open = "open",
    Close = "close",
    Day = "day",
    Time = "time",

    // Events
    Events = "events" => EVENTS,
    EventId = "event_id",
    Summary = "summary",
    StartTime = "start_time",

    // Reviews
    Reviews = "reviews" => REVIEWS,
    Aspects = "aspects",
    Type = "type",
    AuthorName = "author_name",
    AuthorUrl = "author_url",
    Language = "language",
    Text = "text",

    // Photos
    Photos = "photos" => PHOTOS,
    PhotoReference = "photo_reference",
    Width = "width",
    Height = "height",

    // Predictions
    Description = "description" => DESCRIPTION,
    Terms = "terms" => TERMS,
    Value = "value",
    Offset = "offset",
    MatchedSubstrings = "matched_substrings" => MATCHED_SUBSTRINGS,
    Length = "length",
    DistanceMeters = "distance_meters" => DISTANCE,

    // Street View
    Copyright = "copyright",
    Date = "date",
    PanoId = "pano_id",
}

impl Key {
    /// Looks up the key for a wire name, falling back to `Key::Unknown`.
    ///
    /// ```
    /// use places_api_message::Key;
    ///
    /// assert_eq!(Key::lookup("place_id"), Key::PlaceId);
    /// assert_eq!(Key::lookup("curbside_pickup"), Key::Unknown);
    /// ```
    pub fn lookup(name: &str) -> Key {
        TABLE.get(name).copied().unwrap_or(Key::Unknown)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = Key;

            fn visit_str<E>(self, s: &str) -> Result<Key, E> {
                let key = Key::lookup(s);
                if key == Key::Unknown {
                    tracing::trace!(key = s, "skipping unrecognized key");
                }
                Ok(key)
            }

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "an object key")
            }
        }

        d.deserialize_identifier(KeyVisitor)
    }
}
