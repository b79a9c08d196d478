//! Opening hours

use std::fmt;

use chrono::{NaiveTime, Weekday};
use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};

use crate::fields::Fields;
use crate::key::Key;
use crate::util::{Int, ListSeed};

/// Days of the week as the decoded ordering sees them, starting on Monday.
const MONDAY_FIRST: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// One opening period of a place.
///
/// Times are packed `HHMM` integers, `-1` when absent. A period without a close time
/// (e.g. a place that is always open) keeps `close_time == -1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OpeningHours {
    pub open_day: Option<Weekday>,
    pub open_time: i32,
    pub close_day: Option<Weekday>,
    pub close_time: i32,
}

impl Default for OpeningHours {
    fn default() -> Self {
        OpeningHours {
            open_day: None,
            open_time: -1,
            close_day: None,
            close_time: -1,
        }
    }
}

impl OpeningHours {
    pub fn open_hour(&self) -> i32 {
        hour(self.open_time)
    }

    pub fn open_minute(&self) -> i32 {
        self.open_time % 100
    }

    /// Milliseconds since midnight at which the period opens, or `-1`.
    pub fn open_millis(&self) -> i64 {
        millis(self.open_time)
    }

    pub fn open_naive_time(&self) -> Option<NaiveTime> {
        naive_time(self.open_time)
    }

    pub fn close_hour(&self) -> i32 {
        hour(self.close_time)
    }

    pub fn close_minute(&self) -> i32 {
        self.close_time % 100
    }

    /// Milliseconds since midnight at which the period closes, or `-1`.
    pub fn close_millis(&self) -> i64 {
        millis(self.close_time)
    }

    pub fn close_naive_time(&self) -> Option<NaiveTime> {
        naive_time(self.close_time)
    }
}

fn hour(time: i32) -> i32 {
    if time < 0 {
        -1
    } else {
        time / 100
    }
}

fn millis(time: i32) -> i64 {
    if time < 0 {
        -1
    } else {
        i64::from(time / 100) * 3_600_000 + i64::from(time % 100) * 60_000
    }
}

fn naive_time(time: i32) -> Option<NaiveTime> {
    if time < 0 {
        return None;
    }
    NaiveTime::from_hms_opt((time / 100) as u32, (time % 100) as u32, 0)
}

/// Maps a wire day (Sunday = 0 through Saturday = 6) onto the Monday-first ordering.
///
/// Out-of-range values roll over rather than being rejected.
pub fn weekday(day: i64) -> Weekday {
    MONDAY_FIRST[(day - 1).rem_euclid(7) as usize]
}

/// The `opening_hours` object of a place.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct OpeningHoursObject {
    pub open_now: Option<bool>,
    pub periods: Vec<OpeningHours>,
}

#[derive(Clone, Copy)]
pub(crate) struct OpeningHoursSeed {
    pub fields: Fields,
}

impl<'de> DeserializeSeed<'de> for OpeningHoursSeed {
    type Value = OpeningHoursObject;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for OpeningHoursSeed {
    type Value = OpeningHoursObject;

    fn visit_map<A: MapAccess<'de>>(self, mut a: A) -> Result<Self::Value, A::Error> {
        let mut ret = OpeningHoursObject::default();

        while let Some(key) = a.next_key::<Key>()? {
            if !self.fields.wants(key) {
                a.next_value::<IgnoredAny>()?;
                continue;
            }
            match key {
                Key::OpenNow => ret.open_now = a.next_value()?,
                Key::Periods => {
                    ret.periods = a.next_value_seed(ListSeed::new(PeriodSeed, 7, 0))?;
                }
                _ => {
                    a.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(ret)
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an opening hours object")
    }
}

#[derive(Clone, Copy)]
struct PeriodSeed;

impl<'de> DeserializeSeed<'de> for PeriodSeed {
    type Value = OpeningHours;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<OpeningHours, D::Error> {
        d.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for PeriodSeed {
    type Value = OpeningHours;

    fn visit_map<A: MapAccess<'de>>(self, mut a: A) -> Result<OpeningHours, A::Error> {
        let mut ret = OpeningHours::default();

        while let Some(key) = a.next_key::<Key>()? {
            match key {
                Key::Open => {
                    let DayTime { day, time } = a.next_value_seed(DayTimeSeed)?;
                    ret.open_day = day;
                    ret.open_time = time;
                }
                Key::Close => {
                    let DayTime { day, time } = a.next_value_seed(DayTimeSeed)?;
                    ret.close_day = day;
                    ret.close_time = time;
                }
                _ => {
                    a.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(ret)
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an opening period")
    }
}

struct DayTime {
    day: Option<Weekday>,
    time: i32,
}

#[derive(Clone, Copy)]
struct DayTimeSeed;

impl<'de> DeserializeSeed<'de> for DayTimeSeed {
    type Value = DayTime;

    fn deserialize<D: Deserializer<'de>>(self, d: D) -> Result<DayTime, D::Error> {
        d.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for DayTimeSeed {
    type Value = DayTime;

    fn visit_map<A: MapAccess<'de>>(self, mut a: A) -> Result<DayTime, A::Error> {
        let mut ret = DayTime { day: None, time: -1 };

        while let Some(key) = a.next_key::<Key>()? {
            match key {
                Key::Day => ret.day = a.next_value::<Int>()?.0.map(weekday),
                Key::Time => ret.time = a.next_value::<Int>()?.to_i32().unwrap_or(-1),
                _ => {
                    a.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(ret)
    }

    fn visit_unit<E>(self) -> Result<DayTime, E> {
        Ok(DayTime { day: None, time: -1 })
    }

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an object with `day` and `time` fields")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn periods(json: &str) -> OpeningHoursObject {
        let mut de = serde_json::Deserializer::from_str(json);
        OpeningHoursSeed {
            fields: Fields::empty(),
        }
        .deserialize(&mut de)
        .unwrap()
    }

    #[test]
    fn day_rollover() {
        assert_eq!(weekday(0), Weekday::Sun);
        assert_eq!(weekday(1), Weekday::Mon);
        assert_eq!(weekday(6), Weekday::Sat);
        assert_eq!(weekday(7), Weekday::Sun);
        assert_eq!(weekday(-1), Weekday::Sat);
        assert_eq!(weekday(0), *MONDAY_FIRST.last().unwrap());
        assert_eq!(weekday(1), MONDAY_FIRST[0]);
    }

    #[test]
    fn decode_periods() {
        let hours = periods(
            r#"{
                "open_now": true,
                "periods": [
                    {"close": {"day": 1, "time": "1730"}, "open": {"day": 1, "time": "0900"}},
                    {"open": {"day": 0, "time": "0000"}}
                ],
                "weekday_text": ["Monday: 9:00 AM – 5:30 PM"]
            }"#,
        );

        assert_eq!(hours.open_now, Some(true));
        assert_eq!(hours.periods.len(), 2);

        let monday = hours.periods[0];
        assert_eq!(monday.open_day, Some(Weekday::Mon));
        assert_eq!(monday.open_time, 900);
        assert_eq!(monday.open_hour(), 9);
        assert_eq!(monday.open_minute(), 0);
        assert_eq!(monday.open_millis(), 9 * 3_600_000);
        assert_eq!(monday.close_hour(), 17);
        assert_eq!(monday.close_minute(), 30);
        assert_eq!(monday.close_millis(), 17 * 3_600_000 + 30 * 60_000);
        assert_eq!(monday.close_naive_time(), NaiveTime::from_hms_opt(17, 30, 0));

        let always = hours.periods[1];
        assert_eq!(always.open_day, Some(Weekday::Sun));
        assert_eq!(always.open_time, 0);
        assert_eq!(always.open_hour(), 0);
    }

    #[test]
    fn missing_close_time() {
        let hours = periods(r#"{"periods":[{"open":{"day":3,"time":"0800"}}]}"#);
        let period = hours.periods[0];

        assert_eq!(period.close_day, None);
        assert_eq!(period.close_time, -1);
        assert_eq!(period.close_hour(), -1);
        assert_eq!(period.close_minute(), -1);
        assert_eq!(period.close_millis(), -1);
        assert_eq!(period.close_naive_time(), None);
    }

    #[test]
    fn unparsable_values_degrade() {
        let hours = periods(r#"{"periods":[{"open":{"day":"someday","time":"noon"}}]}"#);
        let period = hours.periods[0];

        assert_eq!(period.open_day, None);
        assert_eq!(period.open_time, -1);
    }

    #[test]
    fn periods_not_requested() {
        let mut de = serde_json::Deserializer::from_str(
            r#"{"open_now":false,"periods":[{"open":{"day":1,"time":"0900"}}]}"#,
        );
        let hours = OpeningHoursSeed {
            fields: Fields::OPEN_NOW,
        }
        .deserialize(&mut de)
        .unwrap();

        assert_eq!(hours.open_now, Some(false));
        assert!(hours.periods.is_empty());
    }
}
