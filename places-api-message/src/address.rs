//! Structured address

use std::fmt;

use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

use crate::fields::Fields;
use crate::key::Key;

/// The full and abbreviated forms of one address component.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Component {
    pub long_name: Option<String>,
    pub short_name: Option<String>,
}

/// Address of a place, flattened from its `address_components` array.
///
/// Each component is routed to at most one slot: the first of its `types` that names a slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Address {
    pub country: Option<Component>,
    pub administrative_area_level_1: Option<Component>,
    pub administrative_area_level_2: Option<Component>,
    pub locality: Option<Component>,
    pub sublocality: Option<Component>,
    pub postal_code: Option<Component>,
    pub postal_town: Option<Component>,
    pub route: Option<Component>,
    pub street_number: Option<Component>,
}

string_enums! {
    /// Type of an address component.
    #[derive(Clone, Debug)]
    pub enum AddressType {
        :Country("country"),
        :AdministrativeAreaLevel1("administrative_area_level_1"),
        :AdministrativeAreaLevel2("administrative_area_level_2"),
        :Locality("locality"),
        :Sublocality("sublocality"),
        :PostalCode("postal_code"),
        :PostalTown("postal_town"),
        :Route("route"),
        :StreetNumber("street_number");
        :Other(_),
    }
}

impl Address {
    fn slot_mut(&mut self, t: &AddressType) -> Option<&mut Option<Component>> {
        Some(match *t {
            AddressType::Country => &mut self.country,
            AddressType::AdministrativeAreaLevel1 => &mut self.administrative_area_level_1,
            AddressType::AdministrativeAreaLevel2 => &mut self.administrative_area_level_2,
            AddressType::Locality => &mut self.locality,
            AddressType::Sublocality => &mut self.sublocality,
            AddressType::PostalCode => &mut self.postal_code,
            AddressType::PostalTown => &mut self.postal_town,
            AddressType::Route => &mut self.route,
            AddressType::StreetNumber => &mut self.street_number,
            AddressType::Other(_) => return None,
        })
    }

    /// Returns the component stored under `t`, if any.
    pub fn get(&self, t: &AddressType) -> Option<&Component> {
        match *t {
            AddressType::Country => self.country.as_ref(),
            AddressType::AdministrativeAreaLevel1 => self.administrative_area_level_1.as_ref(),
            AddressType::AdministrativeAreaLevel2 => self.administrative_area_level_2.as_ref(),
            AddressType::Locality => self.locality.as_ref(),
            AddressType::Sublocality => self.sublocality.as_ref(),
            AddressType::PostalCode => self.postal_code.as_ref(),
            AddressType::PostalTown => self.postal_town.as_ref(),
            AddressType::Route => self.route.as_ref(),
            AddressType::StreetNumber => self.street_number.as_ref(),
            AddressType::Other(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Address::default()
    }
}

/// Decodes an `address_components` array. Yields `None` when no component landed in a slot.
#[derive(Clone, Copy)]
pub(crate) struct AddressSeed {
    pub fields: Fields,
}

impl<'de> DeserializeSeed<'de> for AddressSeed {
    type Value = Option<Address>;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for AddressSeed {
    type Value = Option<Address>;

    fn visit_seq<A: SeqAccess<'de>>(self, mut a: A) -> Result<Self::Value, A::Error> {
        let mut address = Address::default();

        while let Some((t, component)) = a.next_element_seed(ComponentSeed {
            fields: self.fields,
        })? {
            if let (Some(t), Some(component)) = (t, component) {
                if let Some(slot) = address.slot_mut(&t) {
                    *slot = Some(component);
                }
            }
        }

        Ok(if address.is_empty() {
            None
        } else {
            Some(address)
        })
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an array of address components")
    }
}

#[derive(Clone, Copy)]
struct ComponentSeed {
    fields: Fields,
}

impl<'de> DeserializeSeed<'de> for ComponentSeed {
    type Value = (Option<AddressType>, Option<Component>);

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for ComponentSeed {
    type Value = (Option<AddressType>, Option<Component>);

    fn visit_map<A: MapAccess<'de>>(self, mut a: A) -> Result<Self::Value, A::Error> {
        let mut t = None;
        let mut component = Component::default();

        while let Some(key) = a.next_key::<Key>()? {
            match key {
                Key::LongName | Key::ShortName if !self.fields.wants(key) => {
                    a.next_value::<IgnoredAny>()?;
                }
                Key::LongName => component.long_name = a.next_value()?,
                Key::ShortName => component.short_name = a.next_value()?,
                Key::Types => t = a.next_value_seed(FirstTypeSeed)?,
                _ => {
                    a.next_value::<IgnoredAny>()?;
                }
            }
        }

        let component = if component == Component::default() {
            None
        } else {
            Some(component)
        };
        Ok((t, component))
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an address component")
    }
}

/// Picks the first recognized type out of a `types` array and discards the rest.
#[derive(Clone, Copy)]
struct FirstTypeSeed;

impl<'de> DeserializeSeed<'de> for FirstTypeSeed {
    type Value = Option<AddressType>;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for FirstTypeSeed {
    type Value = Option<AddressType>;

    fn visit_seq<A: SeqAccess<'de>>(self, mut a: A) -> Result<Self::Value, A::Error> {
        let mut ret = None;

        while let Some(t) = a.next_element::<AddressType>()? {
            if ret.is_none() {
                if let AddressType::Other(_) = t {
                    continue;
                }
                ret = Some(t);
            }
        }

        Ok(ret)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an array of strings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(json: &str, fields: Fields) -> Option<Address> {
        let mut de = serde_json::Deserializer::from_str(json);
        AddressSeed { fields }.deserialize(&mut de).unwrap()
    }

    #[test]
    fn routes_components() {
        let address = address(
            r#"[
                {"long_name":"48","short_name":"48","types":["street_number"]},
                {"long_name":"Pirrama Road","short_name":"Pirrama Rd","types":["route"]},
                {"long_name":"Pyrmont","short_name":"Pyrmont","types":["locality","political"]},
                {"long_name":"New South Wales","short_name":"NSW",
                 "types":["administrative_area_level_1","political"]},
                {"long_name":"Australia","short_name":"AU","types":["country","political"]},
                {"long_name":"2009","short_name":"2009","types":["postal_code"]}
            ]"#,
            Fields::empty(),
        )
        .unwrap();

        assert_eq!(address.street_number.unwrap().long_name.unwrap(), "48");
        assert_eq!(address.route.unwrap().short_name.unwrap(), "Pirrama Rd");
        assert_eq!(address.locality.unwrap().long_name.unwrap(), "Pyrmont");
        let state = address.administrative_area_level_1.unwrap();
        assert_eq!(state.long_name.unwrap(), "New South Wales");
        assert_eq!(state.short_name.unwrap(), "NSW");
        assert_eq!(address.country.unwrap().short_name.unwrap(), "AU");
        assert_eq!(address.postal_code.unwrap().long_name.unwrap(), "2009");
        assert_eq!(address.administrative_area_level_2, None);
    }

    #[test]
    fn first_type_wins() {
        let address = address(
            r#"[{"long_name":"Reading","short_name":"Reading","types":["postal_town","locality"]}]"#,
            Fields::empty(),
        )
        .unwrap();

        assert_eq!(address.postal_town.unwrap().long_name.unwrap(), "Reading");
        assert_eq!(address.locality, None);
    }

    #[test]
    fn first_recognized_type_wins() {
        let address = address(
            r#"[{"types":["political","sublocality_level_1","sublocality"],"long_name":"Brooklyn"}]"#,
            Fields::empty(),
        )
        .unwrap();

        assert_eq!(address.sublocality.unwrap().long_name.unwrap(), "Brooklyn");
    }

    #[test]
    fn unrecognized_types_are_ignored() {
        assert_eq!(
            address(
                r#"[{"long_name":"Floor 3","types":["floor"]},{"long_name":"x","types":[]}]"#,
                Fields::empty(),
            ),
            None
        );
    }

    #[test]
    fn address_not_requested() {
        let json = r#"[{"long_name":"Australia","short_name":"AU","types":["country"]}]"#;
        assert_eq!(address(json, Fields::NAME), None);
        assert!(address(json, Fields::ADDRESS).is_some());
    }
}
