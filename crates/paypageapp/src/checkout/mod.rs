//! # Checkout
//!
//! The customer-facing side of a composed page: the payment form rendered
//! next to the blocks. It gathers the buyer's choices and hands them to an
//! external payment callback. Card tokenisation and PIX settlement happen
//! behind that callback, never here.
//!
//! ```text
//!   Idle ──submit()──▶ Processing ──callback settles──▶ Idle
//!          │
//!          └─ terms not accepted: TermsNotAccepted, stays Idle
//! ```
//!
//! The status lives in a [`tokio::sync::watch`] channel so a view can show
//! the spinner while the callback is in flight.

pub mod countries;
pub mod customer;

use std::future::Future;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::{PaypageError, Result};
pub use countries::{default_countries, find_country, Country};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Pix,
    CardPix,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Idle,
    Processing,
}

/// What the payment callback receives.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub payment_method: PaymentMethod,
    pub selected_country: Country,
    pub save_data: bool,
    pub accept_terms: bool,
    pub customer_name: String,
}

#[derive(Debug)]
pub struct CheckoutForm {
    pub country: Country,
    pub method: PaymentMethod,
    pub save_data: bool,
    pub accept_terms: bool,
    pub customer_name: String,
    status: watch::Sender<PaymentStatus>,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            country: Country::default(),
            method: PaymentMethod::default(),
            save_data: false,
            accept_terms: false,
            customer_name: String::new(),
            status: watch::Sender::new(PaymentStatus::Idle),
        }
    }
}

// Puts the form back to Idle however the callback ends, including when the
// submit future is dropped mid-flight.
struct Settle<'a>(&'a watch::Sender<PaymentStatus>);

impl Drop for Settle<'_> {
    fn drop(&mut self) {
        self.0.send_replace(PaymentStatus::Idle);
    }
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> PaymentStatus {
        *self.status.borrow()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<PaymentStatus> {
        self.status.subscribe()
    }

    pub fn is_processing(&self) -> bool {
        self.status() == PaymentStatus::Processing
    }

    /// The pay button is enabled only with accepted terms and nothing in flight.
    pub fn can_submit(&self) -> bool {
        self.accept_terms && !self.is_processing()
    }

    pub fn request(&self) -> PaymentRequest {
        PaymentRequest {
            payment_method: self.method,
            selected_country: self.country,
            save_data: self.save_data,
            accept_terms: self.accept_terms,
            customer_name: self.customer_name.clone(),
        }
    }

    /// Hands the current choices to `on_payment` and reflects the in-flight
    /// state around it. The callback's error is returned unchanged.
    pub async fn submit<F, Fut>(&self, on_payment: F) -> Result<()>
    where
        F: FnOnce(PaymentRequest) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        if !self.accept_terms {
            debug!("payment refused: terms not accepted");
            return Err(PaypageError::TermsNotAccepted);
        }
        if self.is_processing() {
            return Err(PaypageError::Payment("a payment is already in progress".into()));
        }

        self.status.send_replace(PaymentStatus::Processing);
        let _settle = Settle(&self.status);
        let request = self.request();
        debug!(
            method = ?request.payment_method,
            country = request.selected_country.code,
            "submitting payment"
        );

        on_payment(request).await.inspect_err(|e| {
            warn!(error = %e, "payment callback failed");
        })
    }
}
