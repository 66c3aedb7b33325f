use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub admin_token: String,
    /// Days of the month on which no slots are bookable.
    pub maintenance_days: Vec<u32>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "slotbook.db".to_string()),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            maintenance_days: env::var("MAINTENANCE_DAYS")
                .map(|v| parse_days(&v))
                .unwrap_or_else(|_| vec![22, 23]),
        }
    }
}

fn parse_days(raw: &str) -> Vec<u32> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<u32>().ok())
        .filter(|day| (1..=31).contains(day))
        .collect()
}
