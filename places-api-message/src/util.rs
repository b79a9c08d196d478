use std::convert::TryFrom;
use std::fmt;
#[cfg(test)]
use std::marker::PhantomData;

use serde::de::{Deserialize, DeserializeSeed, Deserializer, IgnoredAny, SeqAccess, Visitor};

/// Creates a string-valued enum whose unrecognized values fall into a catch-all variant
/// instead of failing deserialization.
macro_rules! string_enums {
    (
        $(
            $(#[$attr:meta])*
            pub enum $E:ident {
                $(
                    $(#[$v_attr:meta])*
                    :$V:ident($by:expr) // The leading (ugly) colon is to suppress local ambiguity error.
                ),*;
                $(#[$u_attr:meta])*
                :$U:ident(_),
            }
        )*
    ) => {
        $(
            $(#[$attr])*
            pub enum $E {
                $(
                    $(#[$v_attr])*
                    $V,
                )*
                $(#[$u_attr])*
                $U(String),
            }

            impl $E {
                pub fn from_wire(s: &str) -> Self {
                    match s {
                        $($by => $E::$V,)*
                        _ => $E::$U(s.to_owned()),
                    }
                }
            }

            impl<'de> ::serde::Deserialize<'de> for $E {
                fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> ::std::result::Result<Self, D::Error> {
                    struct V;

                    impl<'de> ::serde::de::Visitor<'de> for V {
                        type Value = $E;

                        fn visit_str<E>(self, s: &str) -> ::std::result::Result<$E, E> {
                            Ok($E::from_wire(s))
                        }

                        fn visit_string<E>(self, s: String) -> ::std::result::Result<$E, E> {
                            match s.as_str() {
                                $($by => Ok($E::$V),)*
                                _ => Ok($E::$U(s)),
                            }
                        }

                        fn expecting(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                            write!(f, "a string")
                        }
                    }

                    d.deserialize_str(V)
                }
            }

            impl ::std::convert::AsRef<str> for $E {
                fn as_ref(&self) -> &str {
                    match *self {
                        $($E::$V => $by,)*
                        $E::$U(ref s) => s,
                    }
                }
            }

            impl ::std::fmt::Display for $E {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str(self.as_ref())
                }
            }

            impl ::std::cmp::PartialEq for $E {
                fn eq(&self, other: &$E) -> bool {
                    self.as_ref() == other.as_ref()
                }
            }

            impl ::std::hash::Hash for $E {
                fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                    self.as_ref().hash(state)
                }
            }

            impl ::std::cmp::Eq for $E {}
        )*
    }
}

/// An integer that tolerates the loose encodings seen on the wire: JSON numbers (floats are
/// truncated), numeric strings such as `"0930"`, and `null`.
///
/// A string that is not a number decodes to `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Int(pub Option<i64>);

impl<'de> Deserialize<'de> for Int {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct IntVisitor;

        impl<'de> Visitor<'de> for IntVisitor {
            type Value = Int;

            fn visit_i64<E>(self, v: i64) -> Result<Int, E> {
                Ok(Int(Some(v)))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Int, E> {
                Ok(Int(i64::try_from(v).ok()))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Int, E> {
                Ok(Int(Some(v as i64)))
            }

            fn visit_str<E>(self, s: &str) -> Result<Int, E> {
                let parsed = s.trim().parse().ok();
                if parsed.is_none() {
                    tracing::trace!(value = s, "non-numeric string in integer field");
                }
                Ok(Int(parsed))
            }

            fn visit_unit<E>(self) -> Result<Int, E> {
                Ok(Int(None))
            }

            fn visit_none<E>(self) -> Result<Int, E> {
                Ok(Int(None))
            }

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "an integer or a numeric string")
            }
        }

        d.deserialize_any(IntVisitor)
    }
}

impl Int {
    pub fn to_i32(self) -> Option<i32> {
        self.0.and_then(|v| i32::try_from(v).ok())
    }
}

/// Decodes a JSON array by running `seed` on each element.
///
/// Once `max_results` elements (if non-zero) have passed `filter`, the remaining elements are
/// still consumed from the input but never materialized. `capacity` only sizes the initial
/// allocation.
pub struct ListSeed<'f, S, T> {
    seed: S,
    capacity: usize,
    max_results: usize,
    filter: Option<&'f mut dyn FnMut(&T) -> bool>,
}

impl<'f, S, T> ListSeed<'f, S, T> {
    pub fn new(seed: S, capacity: usize, max_results: usize) -> Self {
        ListSeed {
            seed,
            capacity,
            max_results,
            filter: None,
        }
    }

    pub fn filter(mut self, filter: Option<&'f mut dyn FnMut(&T) -> bool>) -> Self {
        self.filter = filter;
        self
    }

    fn initial_capacity(&self) -> usize {
        if self.max_results > 0 {
            self.capacity.min(self.max_results)
        } else {
            self.capacity
        }
    }
}

impl<'de, 'f, S, T> DeserializeSeed<'de> for ListSeed<'f, S, T>
where
    S: DeserializeSeed<'de, Value = T> + Copy,
{
    type Value = Vec<T>;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Vec<T>, D::Error> {
        d.deserialize_any(self)
    }
}

impl<'de, 'f, S, T> Visitor<'de> for ListSeed<'f, S, T>
where
    S: DeserializeSeed<'de, Value = T> + Copy,
{
    type Value = Vec<T>;

    fn visit_seq<A: SeqAccess<'de>>(mut self, mut a: A) -> Result<Vec<T>, A::Error> {
        let mut ret = Vec::with_capacity(self.initial_capacity());

        loop {
            if self.max_results > 0 && ret.len() >= self.max_results {
                if a.next_element::<IgnoredAny>()?.is_none() {
                    break;
                }
                continue;
            }

            match a.next_element_seed(self.seed)? {
                Some(t) => {
                    let keep = match self.filter {
                        Some(ref mut f) => (**f)(&t),
                        None => true,
                    };
                    if keep {
                        ret.push(t);
                    }
                }
                None => break,
            }
        }

        Ok(ret)
    }

    fn visit_unit<E>(self) -> Result<Vec<T>, E> {
        Ok(Vec::new())
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an array")
    }
}

/// A `DeserializeSeed` for any plain `Deserialize` type, so it can go through `ListSeed`.
#[cfg(test)]
pub struct Plain<T>(PhantomData<fn() -> T>);

#[cfg(test)]
impl<T> Plain<T> {
    pub fn new() -> Self {
        Plain(PhantomData)
    }
}

#[cfg(test)]
impl<T> Clone for Plain<T> {
    fn clone(&self) -> Self {
        *self
    }
}

#[cfg(test)]
impl<T> Copy for Plain<T> {}

#[cfg(test)]
impl<'de, T: Deserialize<'de>> DeserializeSeed<'de> for Plain<T> {
    type Value = T;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<T, D::Error> {
        T::deserialize(d)
    }
}

/// Deserializes a nullable array of strings into a `Vec`, treating `null` as empty.
pub fn strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Option::<Vec<String>>::deserialize(d).map(Option::unwrap_or_default)
}

/// `strings` as a `DeserializeSeed`.
#[derive(Clone, Copy)]
pub struct Strings;

impl<'de> DeserializeSeed<'de> for Strings {
    type Value = Vec<String>;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Vec<String>, D::Error> {
        strings(d)
    }
}

/// Counts `s` in `char`s up to the byte index `byte`.
pub fn char_index(s: &str, byte: usize) -> usize {
    s[..byte].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_int() {
        let parse = |s: &str| serde_json::from_str::<Int>(s).unwrap().0;

        assert_eq!(parse("12"), Some(12));
        assert_eq!(parse("-1"), Some(-1));
        assert_eq!(parse("4.7"), Some(4));
        assert_eq!(parse("\"0930\""), Some(930));
        assert_eq!(parse("\"abc\""), None);
        assert_eq!(parse("null"), None);
        assert_eq!(parse("18446744073709551615"), None);
        assert_eq!(Int(Some(4_294_967_296)).to_i32(), None);
        assert_eq!(Int(Some(-7)).to_i32(), Some(-7));
        serde_json::from_str::<Int>("[1]").unwrap_err();
    }

    #[test]
    fn list_truncates_but_consumes() {
        #[derive(Debug)]
        struct Wrapper(Vec<u32>, bool);

        impl<'de> Deserialize<'de> for Wrapper {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                struct WV;

                impl<'de> Visitor<'de> for WV {
                    type Value = Wrapper;

                    fn visit_seq<A: SeqAccess<'de>>(self, mut a: A) -> Result<Wrapper, A::Error> {
                        let list = a
                            .next_element_seed(ListSeed::new(Plain::<u32>::new(), 5, 2))?
                            .unwrap_or_default();
                        let tail = a.next_element::<bool>()?.unwrap_or(false);
                        Ok(Wrapper(list, tail))
                    }

                    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                        write!(f, "a pair")
                    }
                }

                d.deserialize_seq(WV)
            }
        }

        let w: Wrapper = serde_json::from_str("[[1,2,3,{\"a\":[4]}],true]").unwrap();
        assert_eq!(w.0, [1, 2]);
        assert!(w.1);
    }

    #[test]
    fn list_filter() {
        let mut odd = |n: &u32| n % 2 == 1;
        let seed = ListSeed::<_, u32>::new(Plain::new(), 10, 2).filter(Some(&mut odd));
        let mut de = serde_json::Deserializer::from_str("[2,3,4,5,6,7]");
        let list = seed.deserialize(&mut de).unwrap();
        assert_eq!(list, [3, 5]);
    }

    #[test]
    fn null_list_is_empty() {
        let mut de = serde_json::Deserializer::from_str("null");
        let list = ListSeed::new(Plain::<u32>::new(), 10, 0)
            .deserialize(&mut de)
            .unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn char_indices() {
        assert_eq!(char_index("café bar", 6), 5);
        assert_eq!(char_index("abc", 0), 0);
    }
}
