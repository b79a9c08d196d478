//! Spans of a prediction's description

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};

use crate::key::Key;
use crate::util::{self, Int};

/// A span of text inside a containing string (the "superstring").
///
/// Offsets and lengths count `char`s. Either the value or the offset may be missing from the
/// wire, in which case it is derived from the other and the superstring. A derived offset or
/// length that cannot be computed is `-1`.
#[derive(Clone, Debug, Default)]
pub struct Substring {
    value: Option<String>,
    offset: i32,
    length: i32,
    superstring: Option<Arc<str>>,
}

impl Substring {
    pub fn new(value: Option<String>, offset: i32, length: i32) -> Self {
        Substring {
            value,
            offset,
            length,
            superstring: None,
        }
    }

    pub fn with_superstring(mut self, superstring: Arc<str>) -> Self {
        self.superstring = Some(superstring);
        self
    }

    pub fn superstring(&self) -> Option<&str> {
        self.superstring.as_deref()
    }

    /// Falls back to the first occurrence of the value in the superstring.
    pub fn offset(&self) -> i32 {
        if self.offset >= 0 {
            return self.offset;
        }
        match (self.value.as_deref(), self.superstring.as_deref()) {
            (Some(value), Some(sup)) => sup
                .find(value)
                .map_or(-1, |byte| util::char_index(sup, byte) as i32),
            _ => -1,
        }
    }

    pub fn length(&self) -> i32 {
        if self.length >= 0 {
            return self.length;
        }
        self.value
            .as_deref()
            .map_or(-1, |value| value.chars().count() as i32)
    }

    /// Falls back to slicing the superstring with the offset and length.
    pub fn value(&self) -> Option<Cow<'_, str>> {
        if let Some(ref value) = self.value {
            return Some(Cow::Borrowed(value));
        }
        let sup = self.superstring.as_deref()?;
        if self.offset < 0 || self.length < 0 {
            return None;
        }
        let (offset, length) = (self.offset as usize, self.length as usize);
        if offset + length > sup.chars().count() {
            return None;
        }
        Some(Cow::Owned(sup.chars().skip(offset).take(length).collect()))
    }
}

impl PartialEq for Substring {
    fn eq(&self, other: &Substring) -> bool {
        self.offset() == other.offset()
            && self.length() == other.length()
            && self.value() == other.value()
    }
}

impl Eq for Substring {}

#[derive(Clone, Copy)]
pub(crate) struct SubstringSeed;

impl<'de> DeserializeSeed<'de> for SubstringSeed {
    type Value = Substring;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Substring, D::Error> {
        d.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for SubstringSeed {
    type Value = Substring;

    fn visit_map<A: MapAccess<'de>>(self, mut a: A) -> Result<Substring, A::Error> {
        let mut ret = Substring::new(None, -1, -1);

        while let Some(key) = a.next_key::<Key>()? {
            match key {
                Key::Value => ret.value = a.next_value()?,
                Key::Offset => ret.offset = a.next_value::<Int>()?.to_i32().unwrap_or(-1),
                Key::Length => ret.length = a.next_value::<Int>()?.to_i32().unwrap_or(-1),
                _ => {
                    a.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(ret)
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a substring object")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_from_superstring() {
        let sub = Substring::new(Some("Paris".to_owned()), -1, -1)
            .with_superstring("Café de Paris, Rome".into());
        assert_eq!(sub.offset(), 8);
        assert_eq!(sub.length(), 5);
    }

    #[test]
    fn offset_without_superstring() {
        let sub = Substring::new(Some("Paris".to_owned()), -1, -1);
        assert_eq!(sub.offset(), -1);

        let sub = Substring::new(Some("Oslo".to_owned()), -1, -1).with_superstring("Paris".into());
        assert_eq!(sub.offset(), -1);
    }

    #[test]
    fn value_from_superstring() {
        let sub = Substring::new(None, 5, 5).with_superstring("Café Paris".into());
        assert_eq!(sub.value().as_deref(), Some("Paris"));

        let sub = Substring::new(None, 8, 5).with_superstring("Café Paris".into());
        assert_eq!(sub.value(), None);

        assert_eq!(Substring::new(None, 0, 3).value(), None);
    }

    #[test]
    fn explicit_offset_wins() {
        let sub = Substring::new(Some("a".to_owned()), 2, 1).with_superstring("aba".into());
        assert_eq!(sub.offset(), 2);
    }
}
