use crate::config::AppConfig;
use crate::db::BookingStore;

pub struct AppState {
    pub store: Box<dyn BookingStore>,
    pub config: AppConfig,
}
