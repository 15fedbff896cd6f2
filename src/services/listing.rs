use serde::Deserialize;

use crate::db::BookingStore;
use crate::errors::{AppError, ValidationErrors};
use crate::models::{Booking, BookingFilter};

pub const DEFAULT_LIMIT: u32 = 100;
pub const MAX_LIMIT: u32 = 500;

/// Query string accepted by the listing endpoint.
///
/// Values are kept as text and checked in [`ListQuery::validate`], so a bad
/// `priority` and a bad `limit` are reported together.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub device_type: Option<String>,
    pub service_requested: Option<String>,
    pub priority: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    /// Splits the query into a store filter and a checked limit.
    ///
    /// Blank values are dropped rather than matched literally.
    pub fn validate(self) -> Result<(BookingFilter, u32), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let priority = match non_blank(self.priority).as_deref() {
            None => None,
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(other) => {
                errors.push("priority", format!("must be true or false, got {other}"));
                None
            }
        };

        let limit = match non_blank(self.limit) {
            None => DEFAULT_LIMIT,
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) if (1..=i64::from(MAX_LIMIT)).contains(&n) => n as u32,
                Ok(n) => {
                    errors.push("limit", format!("must be between 1 and {MAX_LIMIT}, got {n}"));
                    DEFAULT_LIMIT
                }
                Err(_) => {
                    errors.push("limit", format!("must be an integer, got {raw}"));
                    DEFAULT_LIMIT
                }
            },
        };

        let filter = BookingFilter {
            device_type: non_blank(self.device_type),
            service_requested: non_blank(self.service_requested),
            priority,
        };

        errors.into_result((filter, limit))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub async fn list_bookings(store: &dyn BookingStore, query: ListQuery) -> Result<Vec<Booking>, AppError> {
    let (filter, limit) = query.validate()?;
    let bookings = store.list(&filter, limit).await.map_err(AppError::Store)?;
    tracing::debug!(count = bookings.len(), ?filter, limit, "listed bookings");
    Ok(bookings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_limit(limit: &str) -> ListQuery {
        ListQuery {
            limit: Some(limit.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_limit() {
        let (filter, limit) = ListQuery::default().validate().unwrap();
        assert_eq!(limit, 100);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_limit_bounds() {
        assert!(with_limit("0").validate().unwrap_err().contains("limit"));
        assert!(with_limit("501").validate().unwrap_err().contains("limit"));
        assert!(with_limit("-3").validate().is_err());
        assert!(with_limit("ten").validate().unwrap_err().contains("limit"));
        assert_eq!(with_limit("1").validate().unwrap().1, 1);
        assert_eq!(with_limit("500").validate().unwrap().1, 500);
        assert_eq!(with_limit("").validate().unwrap().1, 100);
    }

    #[test]
    fn test_priority_parsing() {
        let query = |p: &str| ListQuery {
            priority: Some(p.to_string()),
            ..Default::default()
        };
        assert_eq!(query("true").validate().unwrap().0.priority, Some(true));
        assert_eq!(query("false").validate().unwrap().0.priority, Some(false));
        assert_eq!(query("").validate().unwrap().0.priority, None);
        assert!(query("yes").validate().unwrap_err().contains("priority"));
    }

    #[test]
    fn test_bad_priority_and_limit_reported_together() {
        let query = ListQuery {
            priority: Some("yes".to_string()),
            limit: Some("0".to_string()),
            ..Default::default()
        };
        let errors = query.validate().unwrap_err();
        let fields: Vec<&str> = errors.fields.iter().map(|f| f.field).collect();
        assert_eq!(fields, vec!["priority", "limit"]);
    }

    #[test]
    fn test_blank_filters_ignored() {
        let query = ListQuery {
            device_type: Some("".to_string()),
            service_requested: Some("Phone Deep".to_string()),
            priority: Some("false".to_string()),
            limit: None,
        };
        let (filter, _) = query.validate().unwrap();
        assert_eq!(filter.device_type, None);
        assert_eq!(filter.service_requested.as_deref(), Some("Phone Deep"));
        assert_eq!(filter.priority, Some(false));
    }
}
