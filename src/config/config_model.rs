pub const DEFAULT_API_ENDPOINT: &str = "https://api.quickpay.net";

#[derive(Debug, Clone)]
pub struct QuickPayConfig {
    pub apikey: String,
    pub privatekey: String,
    pub payment_methods: String,
    pub auto_capture: bool,
    pub order_prefix: String,
    pub endpoint: String,
}

impl QuickPayConfig {
    pub fn new(apikey: impl Into<String>, privatekey: impl Into<String>) -> Self {
        Self {
            apikey: apikey.into(),
            privatekey: privatekey.into(),
            payment_methods: String::new(),
            auto_capture: false,
            order_prefix: String::new(),
            endpoint: DEFAULT_API_ENDPOINT.to_string(),
        }
    }
}
