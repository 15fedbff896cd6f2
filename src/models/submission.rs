use serde::Deserialize;
use serde_json::Value;

use crate::errors::ValidationErrors;
use crate::models::{DeviceType, Logistics, NewBooking, PreferredTime, ServiceRequested};

/// Booking form as posted by the web front end.
///
/// Fields are held as loose JSON values so that [`BookingSubmission::validate`]
/// can report every missing, mistyped or out-of-range field at once instead of
/// the deserializer stopping at the first one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingSubmission {
    pub full_name: Option<Value>,
    pub whatsapp_number: Option<Value>,
    pub student_id: Option<Value>,
    pub device_type: Option<Value>,
    pub brand_model: Option<Value>,
    pub service_requested: Option<Value>,
    pub pickup_or_dropoff: Option<Value>,
    pub preferred_time: Option<Value>,
    pub notes: Option<Value>,
    pub consent_photos_and_terms: Option<Value>,
}

impl BookingSubmission {
    pub fn validate(self) -> Result<NewBooking, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let full_name = required(&mut errors, "full_name", self.full_name);
        let whatsapp_number = required(&mut errors, "whatsapp_number", self.whatsapp_number);
        let student_id = optional(&mut errors, "student_id", self.student_id);
        let device_type = one_of(
            &mut errors,
            "device_type",
            self.device_type,
            DeviceType::parse,
            &DeviceType::ALL.map(|v| v.as_str()),
        );
        let brand_model = optional(&mut errors, "brand_model", self.brand_model);
        let service_requested = one_of(
            &mut errors,
            "service_requested",
            self.service_requested,
            ServiceRequested::parse,
            &ServiceRequested::ALL.map(|v| v.as_str()),
        );
        let pickup_or_dropoff = one_of(
            &mut errors,
            "pickup_or_dropoff",
            self.pickup_or_dropoff,
            Logistics::parse,
            &Logistics::ALL.map(|v| v.as_str()),
        );

        let preferred_time = optional(&mut errors, "preferred_time", self.preferred_time)
            .and_then(|raw| {
                let parsed = PreferredTime::parse(&raw);
                if parsed.is_none() {
                    errors.push("preferred_time", format!("not a valid date-time: {raw}"));
                }
                parsed
            });

        let notes = optional(&mut errors, "notes", self.notes);

        let consent_photos_and_terms = match self.consent_photos_and_terms {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => b,
            Some(other) => {
                errors.push(
                    "consent_photos_and_terms",
                    format!("must be a boolean, got {}", type_name(&other)),
                );
                false
            }
        };

        match (full_name, whatsapp_number, device_type, service_requested, pickup_or_dropoff) {
            (
                Some(full_name),
                Some(whatsapp_number),
                Some(device_type),
                Some(service_requested),
                Some(pickup_or_dropoff),
            ) => errors.into_result(NewBooking {
                full_name,
                whatsapp_number,
                student_id,
                device_type,
                brand_model,
                service_requested,
                pickup_or_dropoff,
                preferred_time,
                notes,
                consent_photos_and_terms,
            }),
            _ => Err(errors),
        }
    }
}

/// The raw string, or the type mismatch to report. `null` counts as absent.
fn text(value: Option<Value>) -> Result<Option<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(format!("must be a string, got {}", type_name(&other))),
    }
}

/// Trimmed text; blank strings are treated as absent.
fn optional(errors: &mut ValidationErrors, field: &'static str, value: Option<Value>) -> Option<String> {
    match text(value) {
        Ok(v) => v.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
        Err(message) => {
            errors.push(field, message);
            None
        }
    }
}

fn required(errors: &mut ValidationErrors, field: &'static str, value: Option<Value>) -> Option<String> {
    match text(value) {
        Ok(v) => {
            let v = v.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
            if v.is_none() {
                errors.push(field, "field is required");
            }
            v
        }
        Err(message) => {
            errors.push(field, message);
            None
        }
    }
}

/// Enum values are matched exactly, without trimming or case folding.
fn one_of<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<Value>,
    parse: fn(&str) -> Option<T>,
    allowed: &[&str],
) -> Option<T> {
    let raw = match text(value) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => {
            errors.push(field, "field is required");
            return None;
        }
        Err(message) => {
            errors.push(field, message);
            return None;
        }
    };
    let parsed = parse(&raw);
    if parsed.is_none() {
        errors.push(field, format!("must be one of: {}", allowed.join(", ")));
    }
    parsed
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
