use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::identity::IdentityProvider;
use crate::services::notify::NotificationSink;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub identity: Box<dyn IdentityProvider>,
    pub notifier: Box<dyn NotificationSink>,
}
