//! Selection of the optional field groups to decode.

use bitflags::bitflags;

use crate::key::Key;

bitflags! {
    /// A set of optional field groups requested by the caller.
    ///
    /// The empty set means "decode everything". When the set is not empty, a value whose key
    /// belongs to a group outside the set is consumed from the input without being materialized.
    /// Structural keys (`geometry`, `opening_hours`, `address_components`, ...) and the place
    /// identifier are not part of any group and are always decoded.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Fields: u32 {
        /// Legacy `id` and `reference` tokens.
        const REFERENCE = 1 << 0;
        const ICON = 1 << 1;
        const URL = 1 << 2;
        const NAME = 1 << 3;
        /// The structured address built from `address_components`.
        const ADDRESS = 1 << 4;
        const FORMATTED_ADDRESS = 1 << 5;
        const VICINITY = 1 << 6;
        const INTL_PHONE_NUMBER = 1 << 7;
        const FORMATTED_PHONE_NUMBER = 1 << 8;
        const WEBSITE = 1 << 9;
        const TYPES = 1 << 10;
        const LATITUDE = 1 << 11;
        const LONGITUDE = 1 << 12;
        const UTC_OFFSET = 1 << 13;
        const RATING = 1 << 14;
        const PRICE_LEVEL = 1 << 15;
        const PERMANENTLY_CLOSED = 1 << 16;
        const OPEN_NOW = 1 << 17;
        /// Opening periods.
        const OPENING_HOURS = 1 << 18;
        const EVENTS = 1 << 19;
        const REVIEWS = 1 << 20;
        const PHOTOS = 1 << 21;
        /// Autocomplete prediction text.
        const DESCRIPTION = 1 << 22;
        const TERMS = 1 << 23;
        const MATCHED_SUBSTRINGS = 1 << 24;
        const DISTANCE = 1 << 25;
    }
}

impl Default for Fields {
    fn default() -> Self {
        Fields::empty()
    }
}

impl Fields {
    /// Returns whether a value under `key` should be decoded.
    ///
    /// ```
    /// use places_api_message::{Fields, Key};
    ///
    /// assert!(Fields::empty().wants(Key::Rating));
    /// assert!(Fields::RATING.wants(Key::Rating));
    /// assert!(!Fields::NAME.wants(Key::Rating));
    /// // Structural keys are always traversed.
    /// assert!(Fields::NAME.wants(Key::Geometry));
    /// ```
    pub fn wants(self, key: Key) -> bool {
        match key.field() {
            Some(field) => self.is_empty() || self.intersects(field),
            None => true,
        }
    }
}

/// Same as `Fields::from_bits_retain(bitmask).wants(key)`.
///
/// Unknown bits are kept, so a non-zero bitmask never selects everything.
pub fn wanted(bitmask: u32, key: Key) -> bool {
    Fields::from_bits_retain(bitmask).wants(key)
}

/// Parameters shared by all decoder entry points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Field groups to decode. Empty means all of them.
    pub fields: Fields,
    /// Maximum number of elements to materialize for list-valued results and for the reviews,
    /// events and photos of each place. `0` means no limit.
    pub max_results: usize,
}

impl DecodeOptions {
    pub fn new(fields: Fields) -> Self {
        DecodeOptions {
            fields,
            max_results: 0,
        }
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}
