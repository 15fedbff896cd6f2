use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const LOCAL_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub full_name: String,
    pub whatsapp_number: String,
    pub student_id: Option<String>,
    pub device_type: DeviceType,
    pub brand_model: Option<String>,
    pub service_requested: ServiceRequested,
    pub pickup_or_dropoff: Logistics,
    pub preferred_time: Option<PreferredTime>,
    pub notes: Option<String>,
    pub consent_photos_and_terms: bool,
    pub classification: Classification,
    pub priority: bool,
    pub created_at: NaiveDateTime,
}

/// A validated submission that has not been classified or stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub full_name: String,
    pub whatsapp_number: String,
    pub student_id: Option<String>,
    pub device_type: DeviceType,
    pub brand_model: Option<String>,
    pub service_requested: ServiceRequested,
    pub pickup_or_dropoff: Logistics,
    pub preferred_time: Option<PreferredTime>,
    pub notes: Option<String>,
    pub consent_photos_and_terms: bool,
}

/// Everything the store needs to write a row. The store assigns `id` and
/// `created_at` itself.
#[derive(Debug, Clone)]
pub struct BookingRecord {
    pub booking: NewBooking,
    pub classification: Classification,
    pub priority: bool,
}

/// Exact-match listing constraints; `None` fields impose nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub device_type: Option<String>,
    pub service_requested: Option<String>,
    pub priority: Option<bool>,
}

impl BookingFilter {
    pub fn is_empty(&self) -> bool {
        self.device_type.is_none() && self.service_requested.is_none() && self.priority.is_none()
    }
}

/// Customer's preferred slot.
///
/// Input that carries an offset is pinned to UTC and rendered with a `Z`
/// suffix. `datetime-local` input has no offset and stays a wall-clock time.
/// Fractional seconds survive both forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredTime {
    Utc(DateTime<Utc>),
    Local(NaiveDateTime),
}

impl PreferredTime {
    pub fn parse(raw: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(PreferredTime::Utc(dt.with_timezone(&Utc)));
        }
        LOCAL_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(PreferredTime::Local)
    }
}

impl fmt::Display for PreferredTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferredTime::Utc(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            PreferredTime::Local(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

impl Serialize for PreferredTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PreferredTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PreferredTime::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("not a valid date-time: {raw}")))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeviceType {
    Laptop,
    Phone,
}

impl DeviceType {
    pub const ALL: [DeviceType; 2] = [DeviceType::Laptop, DeviceType::Phone];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Laptop => "Laptop",
            DeviceType::Phone => "Phone",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ServiceRequested {
    #[serde(rename = "Laptop Basic")]
    LaptopBasic,
    #[serde(rename = "Laptop Deep")]
    LaptopDeep,
    #[serde(rename = "Phone Basic")]
    PhoneBasic,
    #[serde(rename = "Phone Deep")]
    PhoneDeep,
}

impl ServiceRequested {
    pub const ALL: [ServiceRequested; 4] = [
        ServiceRequested::LaptopBasic,
        ServiceRequested::LaptopDeep,
        ServiceRequested::PhoneBasic,
        ServiceRequested::PhoneDeep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceRequested::LaptopBasic => "Laptop Basic",
            ServiceRequested::LaptopDeep => "Laptop Deep",
            ServiceRequested::PhoneBasic => "Phone Basic",
            ServiceRequested::PhoneDeep => "Phone Deep",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Logistics {
    #[serde(rename = "Drop-off")]
    DropOff,
    Pickup,
}

impl Logistics {
    pub const ALL: [Logistics; 2] = [Logistics::DropOff, Logistics::Pickup];

    pub fn as_str(&self) -> &'static str {
        match self {
            Logistics::DropOff => "Drop-off",
            Logistics::Pickup => "Pickup",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Classification {
    #[serde(rename = "Laptop-Deep")]
    LaptopDeep,
    #[serde(rename = "Laptop-Basic")]
    LaptopBasic,
    #[serde(rename = "Phone-Deep")]
    PhoneDeep,
    #[serde(rename = "Phone-Basic")]
    PhoneBasic,
}

impl Classification {
    pub const ALL: [Classification; 4] = [
        Classification::LaptopDeep,
        Classification::LaptopBasic,
        Classification::PhoneDeep,
        Classification::PhoneBasic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::LaptopDeep => "Laptop-Deep",
            Classification::LaptopBasic => "Laptop-Basic",
            Classification::PhoneDeep => "Phone-Deep",
            Classification::PhoneBasic => "Phone-Basic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_text_matches_serde() {
        for s in ServiceRequested::ALL {
            let json = serde_json::to_string(&s).unwrap();
            assert_eq!(json, format!("\"{}\"", s.as_str()));
        }
        for c in Classification::ALL {
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(json, format!("\"{}\"", c.as_str()));
        }
        assert_eq!(serde_json::to_string(&Logistics::DropOff).unwrap(), "\"Drop-off\"");
        assert_eq!(serde_json::to_string(&DeviceType::Phone).unwrap(), "\"Phone\"");
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(DeviceType::parse("Laptop"), Some(DeviceType::Laptop));
        assert_eq!(DeviceType::parse("laptop"), None);
        assert_eq!(ServiceRequested::parse("Phone Deep"), Some(ServiceRequested::PhoneDeep));
        assert_eq!(Logistics::parse("Drop-off"), Some(Logistics::DropOff));
        assert_eq!(Logistics::parse("Dropoff"), None);
        assert_eq!(Classification::parse("Laptop-Basic"), Some(Classification::LaptopBasic));
    }

    fn naive(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").unwrap()
    }

    #[test]
    fn test_preferred_time_forms() {
        let local = PreferredTime::Local(naive("2025-06-15 14:00:00"));
        assert_eq!(PreferredTime::parse("2025-06-15T14:00"), Some(local));
        assert_eq!(PreferredTime::parse("2025-06-15T14:00:00"), Some(local));
        assert_eq!(PreferredTime::parse("2025-06-15 14:00:00"), Some(local));
        assert_eq!(PreferredTime::parse("2025-06-15 14:00"), Some(local));

        let utc = PreferredTime::Utc(naive("2025-06-15 14:00:00").and_utc());
        assert_eq!(PreferredTime::parse("2025-06-15T14:00:00Z"), Some(utc));
        assert_eq!(PreferredTime::parse("2025-06-15T16:00:00+02:00"), Some(utc));

        assert_eq!(PreferredTime::parse("15/06/2025"), None);
        assert_eq!(PreferredTime::parse("next tuesday"), None);
    }

    #[test]
    fn test_preferred_time_display_distinguishes_utc() {
        assert_eq!(
            PreferredTime::parse("2025-06-15T16:00:00+02:00").unwrap().to_string(),
            "2025-06-15T14:00:00Z"
        );
        assert_eq!(
            PreferredTime::parse("2025-06-15T14:00").unwrap().to_string(),
            "2025-06-15T14:00:00"
        );
    }

    #[test]
    fn test_preferred_time_keeps_fractional_seconds() {
        for raw in ["2025-06-15T14:00:00.750", "2025-06-15T14:00:00.750Z"] {
            let parsed = PreferredTime::parse(raw).unwrap();
            assert_eq!(parsed.to_string(), raw);
            assert_eq!(PreferredTime::parse(&parsed.to_string()), Some(parsed));
        }
        let json = serde_json::to_string(&PreferredTime::parse("2025-06-15T14:00:00.5").unwrap()).unwrap();
        assert_eq!(json, "\"2025-06-15T14:00:00.500\"");
    }
}
