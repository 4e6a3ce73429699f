//! Request bodies of the paralympics JSON API.
//!
//! Responses are the entity models themselves, which already serialize with
//! the public field names (`NOC`, `type`, ...).

use sea_orm::Set;
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use crate::constants::RE_NOC;
use entity::{event, region};

const EVENT_TYPES: [&str; 2] = ["summer", "winter"];

/// Tell an absent field (`None`) apart from an explicit `null` (`Some(None)`).
/// Pair with `#[serde(default)]`.
fn nullable<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}

/// Accept a count either as a JSON number or as a numeric string (`"57"`).
fn de_count<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    use serde::de::Error;
    match serde_json::Value::deserialize(d)? {
        serde_json::Value::Number(n) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| Error::custom(format!("invalid count {}", n))),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i32>()
            .map_err(|_| Error::custom(format!("cannot parse '{}' as a count", s))),
        _ => Err(Error::custom("expected number or string")),
    }
}

fn de_count_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
    match Option::<serde_json::Value>::deserialize(d)? {
        None => Ok(None),
        Some(v) => de_count(v)
            .map(Some)
            .map_err(|e| <D::Error as serde::de::Error>::custom(e)),
    }
}

fn validate_event_type(value: &str) -> Result<(), ValidationError> {
    if EVENT_TYPES.contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("event_type");
        err.message = Some("Must be either summer or winter.".into());
        Err(err)
    }
}

/// The body of a `POST /noc` request.
#[derive(Debug, Clone, Validate, Deserialize)]
pub struct NewRegion {
    #[serde(rename = "NOC")]
    #[validate(regex(path = "RE_NOC", message = "Must be a three letter upper case code."))]
    pub noc: String,
    #[validate(length(min = 1, message = "Must not be empty."))]
    pub region: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewRegion {
    pub fn into_active_model(self) -> region::ActiveModel {
        region::ActiveModel {
            noc: Set(self.noc),
            region: Set(self.region),
            notes: Set(self.notes),
        }
    }
}

/// The body of a `PATCH /noc/:code` request. Absent fields are left alone,
/// `"notes": null` clears the notes.
#[derive(Debug, Clone, Default, Validate, Deserialize)]
pub struct RegionChanges {
    #[validate(length(min = 1, message = "Must not be empty."))]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

impl RegionChanges {
    pub fn apply(self, model: &mut region::ActiveModel) {
        if let Some(region) = self.region {
            model.region = Set(region);
        }
        if let Some(notes) = self.notes {
            model.notes = Set(notes);
        }
    }
}

/// The body of a `POST /event` request.
#[derive(Debug, Clone, Validate, Deserialize)]
pub struct NewEvent {
    #[serde(rename = "type")]
    #[validate(custom = "validate_event_type")]
    pub event_type: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[validate(length(min = 1, message = "Must not be empty."))]
    pub location: String,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
    #[serde(rename = "NOC")]
    #[validate(regex(path = "RE_NOC", message = "Must be a three letter upper case code."))]
    pub noc: String,
    #[validate(length(min = 1, message = "Must not be empty."))]
    pub start: String,
    #[validate(length(min = 1, message = "Must not be empty."))]
    pub end: String,
    pub disabilities_included: String,
    #[serde(deserialize_with = "de_count")]
    #[validate(range(min = 0))]
    pub events: i32,
    #[serde(deserialize_with = "de_count")]
    #[validate(range(min = 0))]
    pub sports: i32,
    #[validate(range(min = 0))]
    pub countries: i32,
    #[validate(range(min = 0))]
    pub male: i32,
    #[validate(range(min = 0))]
    pub female: i32,
    #[validate(range(min = 0))]
    pub participants: i32,
    #[serde(default)]
    pub highlights: Option<String>,
}

impl NewEvent {
    pub fn into_active_model(self) -> event::ActiveModel {
        let input = self;
        event::ActiveModel {
            event_type: Set(input.event_type),
            year: Set(input.year),
            location: Set(input.location),
            lat: Set(input.lat),
            lon: Set(input.lon),
            noc: Set(input.noc),
            start: Set(input.start),
            end: Set(input.end),
            disabilities_included: Set(input.disabilities_included),
            events: Set(input.events),
            sports: Set(input.sports),
            countries: Set(input.countries),
            male: Set(input.male),
            female: Set(input.female),
            participants: Set(input.participants),
            highlights: Set(input.highlights),
            ..Default::default()
        }
    }
}

/// The body of a `PATCH /event/:id` request. Absent fields are left alone,
/// `null` clears `lat`, `lon` and `highlights`.
#[derive(Debug, Clone, Default, Validate, Deserialize)]
pub struct EventChanges {
    #[serde(rename = "type")]
    #[validate(custom = "validate_event_type")]
    pub event_type: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,
    #[validate(length(min = 1, message = "Must not be empty."))]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub lat: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub lon: Option<Option<String>>,
    #[serde(rename = "NOC")]
    #[validate(regex(path = "RE_NOC", message = "Must be a three letter upper case code."))]
    pub noc: Option<String>,
    #[validate(length(min = 1, message = "Must not be empty."))]
    pub start: Option<String>,
    #[validate(length(min = 1, message = "Must not be empty."))]
    pub end: Option<String>,
    pub disabilities_included: Option<String>,
    #[serde(default, deserialize_with = "de_count_opt")]
    #[validate(range(min = 0))]
    pub events: Option<i32>,
    #[serde(default, deserialize_with = "de_count_opt")]
    #[validate(range(min = 0))]
    pub sports: Option<i32>,
    #[validate(range(min = 0))]
    pub countries: Option<i32>,
    #[validate(range(min = 0))]
    pub male: Option<i32>,
    #[validate(range(min = 0))]
    pub female: Option<i32>,
    #[validate(range(min = 0))]
    pub participants: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub highlights: Option<Option<String>>,
}

macro_rules! set_if_some {
    ($model:ident, $changes:ident, $($field:ident),+) => {
        $(
            if let Some(value) = $changes.$field {
                $model.$field = Set(value);
            }
        )+
    };
}

impl EventChanges {
    pub fn apply(self, model: &mut event::ActiveModel) {
        let changes = self;
        set_if_some!(
            model,
            changes,
            event_type,
            year,
            location,
            noc,
            start,
            end,
            disabilities_included,
            events,
            sports,
            countries,
            male,
            female,
            participants,
            lat,
            lon,
            highlights
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;
    use serde_json::json;

    fn new_event_json() -> serde_json::Value {
        json!({
            "type": "summer",
            "year": 2024,
            "location": "Paris",
            "lat": "48.86",
            "lon": "2.35",
            "NOC": "FRA",
            "start": "28/08/2024",
            "end": "08/09/2024",
            "disabilities_included": "Spinal injury",
            "events": 549,
            "sports": 22,
            "countries": 168,
            "male": 2400,
            "female": 2000,
            "participants": 4400
        })
    }

    #[test]
    fn region_uses_original_field_names() {
        let r: NewRegion =
            serde_json::from_value(json!({"NOC": "NEW", "region": "New Region"})).unwrap();
        assert_eq!(r.noc, "NEW");
        assert!(r.notes.is_none());
        assert!(r.validate().is_ok());
    }

    #[test]
    fn region_code_must_be_three_capitals() {
        for code in ["GB", "gbr", "GBRX", ""] {
            let r = NewRegion {
                noc: code.into(),
                region: "UK".into(),
                notes: None,
            };
            assert!(r.validate().is_err(), "{}", code);
        }
    }

    #[test]
    fn new_event_validates() {
        let ev: NewEvent = serde_json::from_value(new_event_json()).unwrap();
        assert!(ev.validate().is_ok());
        assert!(ev.highlights.is_none());

        let mut bad = ev.clone();
        bad.event_type = "autumn".into();
        bad.male = -1;
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("type"));
        assert!(errors.field_errors().contains_key("male"));
    }

    #[test]
    fn event_changes_only_touch_present_fields() {
        let changes: EventChanges =
            serde_json::from_value(json!({"highlights": "Record crowds", "year": 2025})).unwrap();
        assert!(changes.validate().is_ok());

        let mut model = event::ActiveModel::default();
        changes.apply(&mut model);
        assert_eq!(model.year, ActiveValue::Set(2025));
        assert_eq!(
            model.highlights,
            ActiveValue::Set(Some("Record crowds".to_string()))
        );
        assert_eq!(model.location, ActiveValue::NotSet);
        assert_eq!(model.lat, ActiveValue::NotSet);
    }

    #[test]
    fn null_clears_nullable_fields() {
        let changes: EventChanges =
            serde_json::from_value(json!({"highlights": null, "lat": "1.0"})).unwrap();
        let mut model = event::ActiveModel::default();
        changes.apply(&mut model);
        assert_eq!(model.highlights, ActiveValue::Set(None));
        assert_eq!(model.lat, ActiveValue::Set(Some("1.0".to_string())));
        assert_eq!(model.lon, ActiveValue::NotSet);

        let changes: RegionChanges = serde_json::from_value(json!({"notes": null})).unwrap();
        let mut model = region::ActiveModel::default();
        changes.apply(&mut model);
        assert_eq!(model.notes, ActiveValue::Set(None));
        assert_eq!(model.region, ActiveValue::NotSet);

        let changes: RegionChanges = serde_json::from_value(json!({})).unwrap();
        assert!(changes.notes.is_none());
    }

    #[test]
    fn counts_accept_numeric_strings() {
        let mut body = new_event_json();
        body["events"] = json!("57");
        body["sports"] = json!(" 9 ");
        let ev: NewEvent = serde_json::from_value(body.clone()).unwrap();
        assert_eq!((ev.events, ev.sports), (57, 9));

        body["events"] = json!("many");
        assert!(serde_json::from_value::<NewEvent>(body).is_err());

        let changes: EventChanges = serde_json::from_value(json!({"sports": "12"})).unwrap();
        assert_eq!(changes.sports, Some(12));
        let changes: EventChanges = serde_json::from_value(json!({})).unwrap();
        assert_eq!(changes.events, None);
    }
}
