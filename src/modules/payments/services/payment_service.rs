use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::core::money::validate_amount;
use crate::core::{AppError, Result};
use crate::modules::installments::models::InstallmentId;
use crate::modules::installments::repositories::SaleRepository;
use crate::modules::payments::models::{BillingPaid, Payment, WebhookEvent};
use crate::modules::payments::repositories::PaymentRepository;
use crate::modules::payments::services::abacatepay::{AbacatePayClient, ChargeStatus, PixCharge};

/// Orchestrates charges, gateway calls and the paid-marker write-back
pub struct PaymentService {
    payments: PaymentRepository,
    sales: SaleRepository,
    gateway: AbacatePayClient,
}

/// What the webhook receiver did with an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Event type is not acted on; acknowledged so the gateway stops retrying
    Ignored { event: Option<String> },
    /// Payment confirmed and reconciled
    Processed,
    /// A `billing.paid` event carrying neither payload shape
    Unrecognized,
}

impl PaymentService {
    pub fn new(pool: PgPool, gateway: AbacatePayClient) -> Self {
        Self {
            payments: PaymentRepository::new(pool.clone()),
            sales: SaleRepository::new(pool),
            gateway,
        }
    }

    /// Issue a PIX QR code for one installment and record the pending
    /// payment keyed by the gateway charge id.
    pub async fn create_charge(&self, installment_id: &str, amount: Decimal) -> Result<PixCharge> {
        validate_amount(amount).map_err(AppError::validation)?;

        let reference: InstallmentId = installment_id
            .parse()
            .map_err(AppError::validation)?;

        let charge = self
            .gateway
            .create_qr_code(&reference.to_string(), amount)
            .await?;

        let payment = Payment::new(reference.to_string(), amount, charge.id.clone());
        self.payments.insert(&payment).await?;

        info!(
            installment_id = %reference,
            charge_id = %charge.id,
            amount = %amount,
            "PIX charge created"
        );

        Ok(charge)
    }

    /// Current gateway-side status of a charge
    pub async fn charge_status(&self, charge_id: &str) -> Result<ChargeStatus> {
        self.gateway.check_status(charge_id).await
    }

    /// Sandbox payment of a charge (dev mode only)
    pub async fn simulate_payment(&self, charge_id: &str) -> Result<serde_json::Value> {
        self.gateway.simulate_payment(charge_id).await
    }

    /// Manually confirm a charge, optionally settling a known installment.
    ///
    /// Returns how many payment records transitioned to paid.
    pub async fn mark_paid(
        &self,
        charge_id: &str,
        installment: Option<InstallmentId>,
    ) -> Result<u64> {
        let updated = self.payments.mark_paid_by_provider(charge_id).await?;

        info!(charge_id, updated, "Payment marked paid");

        if let Some(id) = installment {
            self.settle_installment(id).await?;
        }

        Ok(updated)
    }

    /// Reconcile one gateway webhook event
    pub async fn process_webhook(&self, event: WebhookEvent) -> Result<WebhookOutcome> {
        if !event.is_billing_paid() {
            return Ok(WebhookOutcome::Ignored { event: event.event });
        }

        if let Some(pix) = event.data.pix_qr_code {
            self.confirm_pix_payment(&pix.id).await?;
            Ok(WebhookOutcome::Processed)
        } else if let Some(billing) = event.data.billing {
            self.confirm_billing_payment(&billing).await?;
            Ok(WebhookOutcome::Processed)
        } else {
            warn!("billing.paid event carried neither pixQrCode nor billing data");
            Ok(WebhookOutcome::Unrecognized)
        }
    }

    /// PIX QR flow: flip the payment record, then settle the installment it
    /// was created for.
    async fn confirm_pix_payment(&self, charge_id: &str) -> Result<()> {
        let updated = self.payments.mark_paid_by_provider(charge_id).await?;
        if updated == 0 {
            warn!(charge_id, "no pending payment for confirmed charge");
        }

        match self.payments.installment_for_provider(charge_id).await? {
            Some(installment_id) => match installment_id.parse::<InstallmentId>() {
                Ok(id) => self.settle_installment(id).await?,
                Err(e) => warn!(
                    installment_id = %installment_id,
                    error = %e,
                    "stored installment id is malformed"
                ),
            },
            None => warn!(charge_id, "confirmed charge has no payment record"),
        }

        Ok(())
    }

    /// Billing flow: the payload itself names the installments via product
    /// `externalId` references.
    async fn confirm_billing_payment(&self, billing: &BillingPaid) -> Result<()> {
        self.payments.mark_paid_by_provider(&billing.id).await?;

        for product in &billing.products {
            let Some(external_id) = product.external_id.as_deref() else {
                continue;
            };

            match external_id.parse::<InstallmentId>() {
                Ok(id) => self.settle_installment(id).await?,
                Err(e) => warn!(
                    external_id,
                    error = %e,
                    "skipping malformed product reference"
                ),
            }
        }

        Ok(())
    }

    async fn settle_installment(&self, id: InstallmentId) -> Result<()> {
        let rows = self.sales.mark_paid(id.sale_id, id.seq).await?;

        if rows == 0 {
            warn!(installment_id = %id, "paid marker matched no sale row");
        } else {
            info!(installment_id = %id, "installment settled");
        }

        Ok(())
    }
}
