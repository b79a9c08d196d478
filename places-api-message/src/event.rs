//! Events (deprecated by the Places API, still present in older payloads)

use std::fmt;

use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};

use crate::key::Key;
use crate::util::Int;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Event {
    pub id: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
    /// Start of the event, in seconds since the UNIX epoch.
    pub start_time: Option<i64>,
}

#[derive(Clone, Copy)]
pub(crate) struct EventSeed;

impl<'de> DeserializeSeed<'de> for EventSeed {
    type Value = Event;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Event, D::Error> {
        d.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for EventSeed {
    type Value = Event;

    fn visit_map<A: MapAccess<'de>>(self, mut a: A) -> Result<Event, A::Error> {
        let mut ret = Event::default();

        while let Some(key) = a.next_key::<Key>()? {
            match key {
                Key::EventId => ret.id = a.next_value()?,
                Key::Summary => ret.summary = a.next_value()?,
                Key::Url => ret.url = a.next_value()?,
                Key::StartTime => ret.start_time = a.next_value::<Int>()?.0,
                _ => {
                    a.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(ret)
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an event object")
    }
}
