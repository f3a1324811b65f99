use std::env;

// Top-level configuration container for the client
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub payment: PaymentConfig,
}

// Backend REST collaborator settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub page_size: u32,
}

// Presentation parameters forwarded to the payment widget
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub display_name: String,
    pub theme_color: String,
}

impl Config {
    /// Loads `.env` if one is present, then reads the environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Config {
            api: ApiConfig {
                base_url: env::var("STALLS_API_BASE_URL")
                    .unwrap_or_else(|_| "https://srs-stalls-backend-1.onrender.com/api".to_string()),
                timeout_seconds: env::var("STALLS_API_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .expect("STALLS_API_TIMEOUT_SECONDS must be a valid number"),
                page_size: env::var("STALLS_PAGE_SIZE")
                    .unwrap_or_else(|_| "12".to_string())
                    .parse()
                    .expect("STALLS_PAGE_SIZE must be a valid number"),
            },
            payment: PaymentConfig {
                display_name: env::var("PAYMENT_DISPLAY_NAME")
                    .unwrap_or_else(|_| "SRS Stall Booking".to_string()),
                theme_color: env::var("PAYMENT_THEME_COLOR")
                    .unwrap_or_else(|_| "#F97316".to_string()),
            },
        }
    }
}
