use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::ApiError;
use crate::models::Booking;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderRequest<'a> {
    stall_ids: &'a [String],
    event_id: &'a str,
}

/// Payment order issued by the backend for a set of locked stalls.
/// `amount` is in whole rupees; the widget expects paise.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
    pub booking_id: String,
}

/// Provider identifiers handed back by the widget, submitted verbatim for
/// backend-side signature verification.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentVerification {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    #[serde(rename = "bookingId")]
    pub booking_id: String,
}

#[derive(Debug, Deserialize)]
struct VerifyEnvelope {
    booking: Booking,
}

impl ApiClient {
    pub async fn create_order(
        &self,
        stall_ids: &[String],
        event_id: &str,
    ) -> Result<PaymentOrder, ApiError> {
        self.post(
            "/payments/create-order",
            &CreateOrderRequest { stall_ids, event_id },
        )
        .await
    }

    pub async fn verify_payment(
        &self,
        verification: &PaymentVerification,
    ) -> Result<Booking, ApiError> {
        let envelope: VerifyEnvelope = self
            .post("/payments/verify-payment", verification)
            .await?;
        Ok(envelope.booking)
    }
}
