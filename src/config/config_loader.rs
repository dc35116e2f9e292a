use anyhow::Result;

use super::config_model::{DEFAULT_API_ENDPOINT, QuickPayConfig};

pub fn load() -> Result<QuickPayConfig> {
    dotenvy::dotenv().ok();

    Ok(QuickPayConfig {
        apikey: std::env::var("QUICKPAY_API_KEY").expect("QUICKPAY_API_KEY is invalid"),
        privatekey: std::env::var("QUICKPAY_PRIVATE_KEY").expect("QUICKPAY_PRIVATE_KEY is invalid"),
        payment_methods: std::env::var("QUICKPAY_PAYMENT_METHODS").unwrap_or_default(),
        auto_capture: std::env::var("QUICKPAY_AUTO_CAPTURE")
            .unwrap_or_else(|_| "false".to_string())
            .parse()?,
        order_prefix: std::env::var("QUICKPAY_ORDER_PREFIX").unwrap_or_default(),
        endpoint: std::env::var("QUICKPAY_API_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_API_ENDPOINT.to_string()),
    })
}
