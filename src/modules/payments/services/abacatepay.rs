use std::time::Duration;

use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::GatewayConfig;
use crate::core::money::to_cents;
use crate::core::{AppError, Result};

/// Charge lifetime handed to the gateway, in seconds
const CHARGE_EXPIRY_SECS: u32 = 3600;

/// Gateway limit on the charge description length
const DESCRIPTION_MAX_CHARS: usize = 37;

/// Upstream error bodies are cut to this length before reaching clients
const ERROR_BODY_MAX_CHARS: usize = 300;

/// AbacatePay PIX QR code client
#[derive(Clone)]
pub struct AbacatePayClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AbacatePayClient {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a PIX QR code charge for one installment.
    ///
    /// The installment id travels as `metadata.externalId` and comes back in
    /// the webhook, which is how a confirmation finds its way to the sale
    /// row.
    pub async fn create_qr_code(&self, installment_id: &str, amount: Decimal) -> Result<PixCharge> {
        let cents = to_cents(amount)
            .ok_or_else(|| AppError::validation(format!("Amount out of range: {}", amount)))?;

        let url = format!("{}/v1/pixQrCode/create", self.base_url);
        let request = CreatePixQrCodeRequest {
            amount: cents,
            expires_in: CHARGE_EXPIRY_SECS,
            description: charge_description(installment_id),
            metadata: ChargeMetadata {
                external_id: installment_id.to_string(),
            },
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Check the current status of a charge
    pub async fn check_status(&self, charge_id: &str) -> Result<ChargeStatus> {
        let url = format!("{}/v1/pixQrCode/check", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("id", charge_id)])
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Trigger a sandbox payment of a charge (dev mode only)
    pub async fn simulate_payment(&self, charge_id: &str) -> Result<serde_json::Value> {
        let url = format!("{}/v1/pixQrCode/simulate-payment", self.base_url);

        let response = self
            .client
            .post(&url)
            .query(&[("id", charge_id)])
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "metadata": {} }))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(status = %status, body = %body, "AbacatePay request failed");
            return Err(AppError::gateway(format!(
                "AbacatePay error {}: {}",
                status,
                truncate(&body, ERROR_BODY_MAX_CHARS)
            )));
        }

        let value: serde_json::Value = serde_json::from_str(&body)?;
        Ok(serde_json::from_value(unwrap_data_envelope(value))?)
    }
}

/// Request body for `POST /v1/pixQrCode/create`
#[derive(Debug, Serialize)]
struct CreatePixQrCodeRequest {
    amount: i64,
    #[serde(rename = "expiresIn")]
    expires_in: u32,
    description: String,
    metadata: ChargeMetadata,
}

#[derive(Debug, Serialize)]
struct ChargeMetadata {
    #[serde(rename = "externalId")]
    external_id: String,
}

/// Issued PIX QR code charge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PixCharge {
    pub id: String,
    #[serde(rename = "brCode")]
    pub br_code: Option<String>,
    #[serde(rename = "brCodeBase64")]
    pub br_code_base64: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "expiresAt")]
    pub expires_at: Option<String>,
}

/// Current state of a charge as reported by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeStatus {
    pub status: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: Option<String>,
}

/// Gateway responses arrive either wrapped in a `data` envelope or flat
fn unwrap_data_envelope(value: serde_json::Value) -> serde_json::Value {
    match value.get("data") {
        Some(data) if !data.is_null() => data.clone(),
        _ => value,
    }
}

fn charge_description(installment_id: &str) -> String {
    format!("Parcela {}", installment_id)
        .chars()
        .take(DESCRIPTION_MAX_CHARS)
        .collect()
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
