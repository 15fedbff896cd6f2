use std::env;

use crate::services::confirmation::CONTACT_PLACEHOLDER;

const DEFAULT_DATABASE_PATH: &str = "campusclean.db";

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub port: u16,
    pub business_whatsapp_number: Option<String>,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            business_whatsapp_number: non_empty_var("BUSINESS_WHATSAPP_NUMBER"),
            database_url: non_empty_var("DATABASE_URL"),
            database_name: non_empty_var("DATABASE_NAME"),
        }
    }

    /// Number used in WhatsApp links; a placeholder until one is configured.
    pub fn whatsapp_contact(&self) -> &str {
        self.business_whatsapp_number
            .as_deref()
            .unwrap_or(CONTACT_PLACEHOLDER)
    }

    pub fn database_path(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_PATH)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::default();
        assert_eq!(config.whatsapp_contact(), "<your-number>");
        assert_eq!(config.database_path(), "campusclean.db");
    }

    #[test]
    fn test_configured_values_win() {
        let config = AppConfig {
            port: 8080,
            business_whatsapp_number: Some("233201234567".to_string()),
            database_url: Some("/var/lib/campusclean/bookings.db".to_string()),
            database_name: Some("campusclean".to_string()),
        };
        assert_eq!(config.whatsapp_contact(), "233201234567");
        assert_eq!(config.database_path(), "/var/lib/campusclean/bookings.db");
    }
}
