//! Checkout: turns an active hold into a paid booking.
//!
//! The flow talks to two collaborators: the backend (order creation and
//! payment verification) and an external payment widget behind the
//! [`PaymentGateway`] trait. The hold keeps counting down the whole time;
//! the owning view reacts to the store's Expired notice and navigates back
//! to stall selection if the timer wins the race.

use thiserror::Error;
use tracing::{error, info};

use crate::api::payments::PaymentVerification;
use crate::api::ApiClient;
use crate::config::PaymentConfig;
use crate::error::ApiError;
use crate::models::Booking;
use crate::store::BookingStore;

pub const GST_RATE_PERCENT: i64 = 18;

/// Order parameters handed to the external payment widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOrder {
    pub key_id: String,
    pub order_id: String,
    /// Minor currency units, the widget's convention.
    pub amount_paise: i64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub theme_color: String,
    pub prefill: Prefill,
}

/// Billing details pre-filled into the widget, all optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prefill {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

/// Transaction identifiers the widget reports on a completed payment.
#[derive(Debug, Clone)]
pub struct ProviderReceipt {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

#[derive(Debug, Clone)]
pub enum PaymentOutcome {
    Completed(ProviderReceipt),
    /// The user closed the widget without paying.
    Dismissed,
}

/// The widget could not be loaded or opened.
#[derive(Debug, Error)]
#[error("payment gateway unavailable: {0}")]
pub struct GatewayError(pub String);

/// External payment widget, loaded on demand by the embedding application.
pub trait PaymentGateway {
    fn open(
        &self,
        order: CheckoutOrder,
    ) -> impl std::future::Future<Output = Result<PaymentOutcome, GatewayError>> + Send;
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Terminal states of one checkout attempt. None of them is fatal: every
/// variant maps to a view the user can continue from.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// Payment verified; the store has been reset and the booking is ready
    /// to display.
    Confirmed(Booking),
    /// Widget dismissed; the hold is untouched and still counting down.
    Cancelled,
    /// The provider reported success but verification failed. The payment
    /// may have been captured, so it is never resubmitted automatically;
    /// the user is told to contact support with the booking id.
    VerificationFailed { booking_id: String },
    /// The hold ran out while the widget was open.
    Expired,
    /// Guard: checkout was entered without a hold. Redirect to browsing.
    NoActiveHold,
}

/// Runs one checkout attempt end to end.
pub async fn run_checkout<G: PaymentGateway>(
    api: &ApiClient,
    store: &BookingStore,
    gateway: &G,
    payment: &PaymentConfig,
    event_id: &str,
    event_name: &str,
    prefill: Prefill,
) -> Result<CheckoutOutcome, CheckoutError> {
    let Some(hold) = store.hold_snapshot() else {
        info!("checkout entered without an active hold, redirecting");
        return Ok(CheckoutOutcome::NoActiveHold);
    };

    let order = api.create_order(&hold.stall_ids, event_id).await?;
    info!(
        "created payment order {} for booking {} ({} stalls)",
        order.order_id,
        order.booking_id,
        hold.stall_ids.len()
    );

    let request = CheckoutOrder {
        key_id: order.key_id.clone(),
        order_id: order.order_id.clone(),
        amount_paise: order.amount * 100,
        currency: order.currency.clone(),
        name: payment.display_name.clone(),
        description: format!("Stall booking for {event_name}"),
        theme_color: payment.theme_color.clone(),
        prefill,
    };

    match gateway.open(request).await? {
        PaymentOutcome::Dismissed => {
            if store.has_active_hold() {
                info!("payment cancelled, hold kept for booking {}", order.booking_id);
                Ok(CheckoutOutcome::Cancelled)
            } else {
                Ok(CheckoutOutcome::Expired)
            }
        }
        PaymentOutcome::Completed(receipt) => {
            let verification = PaymentVerification {
                razorpay_order_id: receipt.order_id,
                razorpay_payment_id: receipt.payment_id,
                razorpay_signature: receipt.signature,
                booking_id: order.booking_id.clone(),
            };
            match api.verify_payment(&verification).await {
                Ok(booking) => {
                    store.finish_checkout();
                    info!("booking {} confirmed", booking.booking_id);
                    Ok(CheckoutOutcome::Confirmed(booking))
                }
                Err(err) => {
                    error!(
                        "payment verification failed for booking {}: {err}",
                        order.booking_id
                    );
                    Ok(CheckoutOutcome::VerificationFailed {
                        booking_id: order.booking_id,
                    })
                }
            }
        }
    }
}

/// The figures the checkout screen shows. Integer rupees throughout; GST
/// is rounded half up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentSummary {
    pub subtotal: i64,
    pub platform_fee: i64,
    pub gst: i64,
    pub grand_total: i64,
}

impl PaymentSummary {
    pub fn for_amount(subtotal: i64) -> Self {
        let gst = (subtotal * GST_RATE_PERCENT + 50) / 100;
        PaymentSummary {
            subtotal,
            platform_fee: 0,
            gst,
            grand_total: subtotal + gst,
        }
    }
}
