//! Parameters of the API endpoints.
//!
//! Each type serializes to the query string of its endpoint. `key` and `signature` are appended
//! by the `Client`.

use std::fmt::{self, Display, Formatter};

use serde::{Serialize, Serializer};

use crate::util::pipe_separated;

/// An endpoint and its query parameters.
pub trait Endpoint: Serialize {
    /// Path of the endpoint below the base URI.
    const PATH: &'static str;
    /// Whether the endpoint returns an image rather than a JSON document.
    const IMAGE: bool = false;

    /// Validator of a previously downloaded image, sent as `If-None-Match`.
    fn etag(&self) -> Option<&str> {
        None
    }

    fn page_token(&self) -> Option<&str> {
        None
    }
}

/// A latitude/longitude pair, serialized as `lat,lng`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Location { lat, lng }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// Image dimensions in pixels, serialized as `{width}x{height}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Serialize for Size {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

str_enum! {
    /// Order of Nearby Search results.
    #[derive(Clone, Copy, Debug, PartialEq, Hash, Eq)]
    pub enum RankBy {
        Prominence = "prominence",
        /// Requires one of `keyword`, `name` or `types`, and no `radius`.
        Distance = "distance",
    }
}

/// Nearby Search: places within an area.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NearbySearch<'a> {
    pub location: Option<Location>,
    /// In meters.
    pub radius: Option<u32>,
    #[serde(rename = "rankby")]
    pub rank_by: Option<RankBy>,
    pub keyword: Option<&'a str>,
    pub name: Option<&'a str>,
    #[serde(serialize_with = "pipe_separated", skip_serializing_if = "<[_]>::is_empty")]
    pub types: &'a [&'a str],
    pub language: Option<&'a str>,
    #[serde(rename = "minprice")]
    pub min_price: Option<u8>,
    #[serde(rename = "maxprice")]
    pub max_price: Option<u8>,
    #[serde(rename = "opennow", skip_serializing_if = "not")]
    pub open_now: bool,
    /// `next_page_token` of the previous page. The other parameters are ignored by the server
    /// when this is set.
    #[serde(rename = "pagetoken")]
    pub page_token: Option<&'a str>,
}

impl<'a> NearbySearch<'a> {
    pub fn new(location: Location, radius: u32) -> Self {
        NearbySearch {
            location: Some(location),
            radius: Some(radius),
            ..NearbySearch::default()
        }
    }

    /// A request for the page following the one that returned `page_token`.
    pub fn next_page(page_token: &'a str) -> Self {
        NearbySearch {
            page_token: Some(page_token),
            ..NearbySearch::default()
        }
    }
}

impl<'a> Endpoint for NearbySearch<'a> {
    const PATH: &'static str = "/maps/api/place/nearbysearch/json";

    fn page_token(&self) -> Option<&str> {
        self.page_token
    }
}

/// Text Search: places matching a free-form query such as "pizza in New York".
#[derive(Clone, Debug, Default, Serialize)]
pub struct TextSearch<'a> {
    pub query: &'a str,
    pub location: Option<Location>,
    pub radius: Option<u32>,
    pub language: Option<&'a str>,
    #[serde(serialize_with = "pipe_separated", skip_serializing_if = "<[_]>::is_empty")]
    pub types: &'a [&'a str],
    #[serde(rename = "minprice")]
    pub min_price: Option<u8>,
    #[serde(rename = "maxprice")]
    pub max_price: Option<u8>,
    #[serde(rename = "opennow", skip_serializing_if = "not")]
    pub open_now: bool,
    #[serde(rename = "pagetoken")]
    pub page_token: Option<&'a str>,
}

impl<'a> TextSearch<'a> {
    pub fn new(query: &'a str) -> Self {
        TextSearch {
            query,
            ..TextSearch::default()
        }
    }
}

impl<'a> Endpoint for TextSearch<'a> {
    const PATH: &'static str = "/maps/api/place/textsearch/json";

    fn page_token(&self) -> Option<&str> {
        self.page_token
    }
}

/// Place Details.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Details<'a> {
    #[serde(rename = "placeid")]
    pub place_id: &'a str,
    pub language: Option<&'a str>,
    /// E.g. `review_summary`.
    pub extensions: Option<&'a str>,
}

impl<'a> Details<'a> {
    pub fn new(place_id: &'a str) -> Self {
        Details {
            place_id,
            ..Details::default()
        }
    }
}

impl<'a> Endpoint for Details<'a> {
    const PATH: &'static str = "/maps/api/place/details/json";
}

/// Place Autocomplete.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Autocomplete<'a> {
    pub input: &'a str,
    /// Position of the last character of `input` that the service uses for matching.
    pub offset: Option<u32>,
    pub location: Option<Location>,
    pub radius: Option<u32>,
    pub language: Option<&'a str>,
    #[serde(serialize_with = "pipe_separated", skip_serializing_if = "<[_]>::is_empty")]
    pub types: &'a [&'a str],
    /// Restrictions such as `country:fr`.
    #[serde(serialize_with = "pipe_separated", skip_serializing_if = "<[_]>::is_empty")]
    pub components: &'a [&'a str],
}

impl<'a> Autocomplete<'a> {
    pub fn new(input: &'a str) -> Self {
        Autocomplete {
            input,
            ..Autocomplete::default()
        }
    }
}

impl<'a> Endpoint for Autocomplete<'a> {
    const PATH: &'static str = "/maps/api/place/autocomplete/json";
}

/// Place Photo. At least one of `max_width` and `max_height` is required by the server.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Photo<'a> {
    #[serde(rename = "photoreference")]
    pub photo_reference: &'a str,
    #[serde(rename = "maxwidth")]
    pub max_width: Option<u32>,
    #[serde(rename = "maxheight")]
    pub max_height: Option<u32>,
    #[serde(skip)]
    pub etag: Option<&'a str>,
}

impl<'a> Photo<'a> {
    pub fn new(photo_reference: &'a str, max_width: u32) -> Self {
        Photo {
            photo_reference,
            max_width: Some(max_width),
            ..Photo::default()
        }
    }
}

impl<'a> Endpoint for Photo<'a> {
    const PATH: &'static str = "/maps/api/place/photo";
    const IMAGE: bool = true;

    fn etag(&self) -> Option<&str> {
        self.etag
    }
}

/// Street View Image. Either `location` or `pano` must be set.
#[derive(Clone, Debug, Serialize)]
pub struct StreetViewImage<'a> {
    pub size: Size,
    pub location: Option<Location>,
    pub pano: Option<&'a str>,
    /// Compass heading of the camera, in degrees.
    pub heading: Option<f64>,
    /// Horizontal field of view, in degrees.
    pub fov: Option<f64>,
    pub pitch: Option<f64>,
    #[serde(skip)]
    pub etag: Option<&'a str>,
}

impl<'a> StreetViewImage<'a> {
    pub fn new(size: Size, location: Location) -> Self {
        StreetViewImage {
            size,
            location: Some(location),
            pano: None,
            heading: None,
            fov: None,
            pitch: None,
            etag: None,
        }
    }
}

impl<'a> Endpoint for StreetViewImage<'a> {
    const PATH: &'static str = "/maps/api/streetview";
    const IMAGE: bool = true;

    fn etag(&self) -> Option<&str> {
        self.etag
    }
}

/// Street View Image Metadata. Either `location` or `pano` must be set.
#[derive(Clone, Debug, Default, Serialize)]
pub struct StreetViewMetadata<'a> {
    pub location: Option<Location>,
    pub pano: Option<&'a str>,
}

impl<'a> Endpoint for StreetViewMetadata<'a> {
    const PATH: &'static str = "/maps/api/streetview/metadata";
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn not(p: &bool) -> bool {
    !p
}
