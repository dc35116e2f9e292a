use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use sha2::Sha256;
use tracing::{error, warn};

use crate::config::config_model::QuickPayConfig;
use crate::domain::errors::ApiError;
use crate::domain::gateway::QuickPayGateway;
use crate::domain::value_objects::params::{PaymentParams, RequestParams};
use crate::domain::value_objects::payments::{QuickPayPayment, QuickPayPaymentLink};

type HmacSha256 = Hmac<Sha256>;

pub const API_VERSION: &str = "v10";

/// Response integrity header. Emission depends on the merchant's gateway
/// configuration, so its absence is not an error.
pub const CHECKSUM_HEADER: &str = "QuickPay-Checksum-Sha256";

/// QuickPay API client built on reqwest. Stateless aside from read-only
/// configuration; safe to share across concurrent callers.
pub struct QuickPayClient {
    http: reqwest::Client,
    config: QuickPayConfig,
}

impl QuickPayClient {
    pub fn new(config: QuickPayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn authorization_header(&self) -> String {
        // QuickPay Basic auth: empty user, API key as password.
        format!(
            "Basic {}",
            BASE64.encode(format!(":{}", self.config.apikey))
        )
    }

    async fn do_request(
        &self,
        method: Method,
        path: &str,
        params: &RequestParams,
    ) -> Result<Vec<u8>, ApiError> {
        let url = format!(
            "{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let request_body = serde_json::to_vec(params).map_err(ApiError::Serialization)?;

        let response = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, self.authorization_header())
            .header("Accept-Version", API_VERSION)
            .header(CONTENT_TYPE, "application/json")
            .body(request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(text) if !text.is_empty() => text,
                Ok(_) => "<empty response body>".to_string(),
                Err(err) => format!("<failed to read response body: {err}>"),
            };
            error!(
                status = %status,
                response_body = %body,
                path = %path,
                "quickpay api request failed"
            );
            return Err(ApiError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let checksum_header = match response.headers().get(CHECKSUM_HEADER) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| ApiError::Integrity)?
                    .to_string(),
            ),
            None => None,
        };

        let body = response.bytes().await?;
        verify_integrity(&body, checksum_header.as_deref(), &self.config.privatekey)?;

        Ok(body.to_vec())
    }

    async fn payment_action(
        &self,
        payment: &QuickPayPayment,
        action: &str,
        params: &RequestParams,
    ) -> Result<QuickPayPayment, ApiError> {
        let body = self
            .do_request(
                Method::POST,
                &format!("payments/{}/{}", payment.id, action),
                params,
            )
            .await?;
        parse_payment(&body)
    }
}

/// HMAC-SHA256 of the raw response body, lowercase hex, keyed with the
/// account's private key.
pub fn checksum(body: &[u8], private_key: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(private_key.as_bytes())
        .expect("hmac-sha256 accepts keys of any length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Rejects a response whose checksum header does not match the recomputed
/// HMAC over the raw body. A missing header is accepted as-is.
pub fn verify_integrity(
    body: &[u8],
    checksum_header: Option<&str>,
    private_key: &str,
) -> Result<(), ApiError> {
    let Some(expected) = checksum_header else {
        return Ok(());
    };

    let computed = checksum(body, private_key);
    if computed != expected {
        warn!(header = %expected, "quickpay response checksum mismatch, discarding body");
        return Err(ApiError::Integrity);
    }

    Ok(())
}

fn parse_payment(body: &[u8]) -> Result<QuickPayPayment, ApiError> {
    serde_json::from_slice(body).map_err(ApiError::protocol)
}

fn encode_query(query: &RequestParams) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in query.iter() {
        match value {
            Value::String(text) => serializer.append_pair(key, text),
            other => serializer.append_pair(key, &other.to_string()),
        };
    }
    serializer.finish()
}

#[async_trait]
impl QuickPayGateway for QuickPayClient {
    async fn fetch_or_create_payment(
        &self,
        params: &PaymentParams,
        create: bool,
    ) -> Result<QuickPayPayment, ApiError> {
        if let Some(payment) = &params.payment {
            return Ok(payment.clone());
        }

        if let Some(payment_id) = params.payment_id {
            let body = self
                .do_request(
                    Method::GET,
                    &format!("payments/{payment_id}"),
                    &RequestParams::new(),
                )
                .await?;
            return parse_payment(&body);
        }

        if !create {
            return Err(ApiError::Logic("payment does not exist".to_string()));
        }

        let mut missing = Vec::new();
        if params.order_number.is_none() {
            missing.push("order_number".to_string());
        }
        if params.currency.is_none() {
            missing.push("currency".to_string());
        }
        if !missing.is_empty() {
            return Err(ApiError::InvalidArgument { missing });
        }

        let order_number = params.order_number.as_deref().unwrap_or_default();
        let currency = params.currency.as_deref().unwrap_or_default();
        let create_params = RequestParams::new()
            .with(
                "order_id",
                format!("{}{}", self.config.order_prefix, order_number),
            )
            .with("currency", currency);

        let body = self
            .do_request(Method::POST, "payments", &create_params)
            .await?;
        parse_payment(&body)
    }

    async fn list_payments(
        &self,
        query: &RequestParams,
    ) -> Result<Vec<QuickPayPayment>, ApiError> {
        let encoded = encode_query(query);
        let path = if encoded.is_empty() {
            "payments".to_string()
        } else {
            format!("payments?{encoded}")
        };

        let body = self
            .do_request(Method::GET, &path, &RequestParams::new())
            .await?;
        serde_json::from_slice(&body).map_err(ApiError::protocol)
    }

    async fn create_payment_link(
        &self,
        payment: &QuickPayPayment,
        params: &RequestParams,
    ) -> Result<QuickPayPaymentLink, ApiError> {
        params.require(&["continue_url", "cancel_url", "callback_url", "amount"])?;

        let mut link_params = params.clone();
        link_params.merge_default("payment_methods", self.config.payment_methods.clone());
        link_params.merge_default("auto_capture", self.config.auto_capture);

        let body = self
            .do_request(
                Method::PUT,
                &format!("payments/{}/link", payment.id),
                &link_params,
            )
            .await?;
        serde_json::from_slice(&body).map_err(ApiError::protocol)
    }

    async fn authorize_payment(
        &self,
        payment: &QuickPayPayment,
        params: &RequestParams,
    ) -> Result<QuickPayPayment, ApiError> {
        params.require(&["card", "amount"])?;
        self.payment_action(payment, "authorize", params).await
    }

    async fn capture_payment(
        &self,
        payment: &QuickPayPayment,
        params: &RequestParams,
    ) -> Result<QuickPayPayment, ApiError> {
        params.require(&["amount"])?;
        self.payment_action(payment, "capture", params).await
    }

    async fn refund_payment(
        &self,
        payment: &QuickPayPayment,
        params: &RequestParams,
    ) -> Result<QuickPayPayment, ApiError> {
        params.require(&["amount"])?;
        self.payment_action(payment, "refund", params).await
    }

    async fn cancel_payment(
        &self,
        payment: &QuickPayPayment,
        params: &RequestParams,
    ) -> Result<QuickPayPayment, ApiError> {
        params.require(&["amount"])?;
        self.payment_action(payment, "cancel", params).await
    }
}
