use secrecy::{ExposeSecret, SecretString};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::Tier,
};

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// A subscription as reported by the billing provider, reduced to the fields
/// the upgrade path needs.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub id: String,
    pub status: String,
    pub item_id: String,
    pub price_id: String,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.status == "active" || self.status == "trialing"
    }
}

/// Billing events this service reacts to; everything else is acknowledged
/// and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingEvent {
    CheckoutCompleted {
        user_id: String,
        tier: Tier,
        customer_id: String,
        subscription_id: String,
    },
    SubscriptionDeleted {
        customer_id: String,
    },
    Ignored,
}

/// Drives the hosted payment provider over its form-encoded REST API.
/// The subscription state machine lives entirely with the provider; this
/// service creates sessions and mirrors outcomes into the user record.
pub struct BillingService {
    http: reqwest::Client,
    secret_key: SecretString,
    price_id_pro: String,
    price_id_business: String,
    base_url: String,
}

impl BillingService {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key: config.stripe_secret_key.clone(),
            price_id_pro: config.stripe_price_id_pro.clone(),
            price_id_business: config.stripe_price_id_business.clone(),
            base_url: config.base_url.clone(),
        }
    }

    pub fn price_for_tier(&self, tier: Tier) -> AppResult<&str> {
        match tier {
            Tier::Pro => Ok(&self.price_id_pro),
            Tier::Business => Ok(&self.price_id_business),
            Tier::Free => Err(AppError::ValidationError(
                "The free tier has no billing price".to_string(),
            )),
        }
    }

    pub async fn create_customer(&self, email: &str, user_id: &str) -> AppResult<String> {
        let body = self
            .post_form(
                "customers",
                &[("email", email), ("metadata[user_id]", user_id)],
            )
            .await?;

        string_field(&body, &["id"])
            .ok_or_else(|| AppError::PaymentError("Stripe returned no customer id".to_string()))
    }

    pub async fn retrieve_subscription(&self, subscription_id: &str) -> AppResult<Subscription> {
        let response = self
            .http
            .get(format!("{}/subscriptions/{}", STRIPE_API_BASE, subscription_id))
            .bearer_auth(self.secret_key.expose_secret())
            .send()
            .await
            .map_err(|e| AppError::PaymentError(format!("Stripe request failed: {}", e)))?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::PaymentError(format!("Invalid Stripe response: {}", e)))?;

        if !status.is_success() {
            return Err(stripe_error(&body));
        }

        parse_subscription(&body)
    }

    /// Moves an existing subscription to a new price in place, invoicing the
    /// proration immediately.
    pub async fn switch_subscription_price(
        &self,
        subscription: &Subscription,
        price_id: &str,
        user_id: &str,
        tier: Tier,
    ) -> AppResult<()> {
        self.post_form(
            &format!("subscriptions/{}", subscription.id),
            &[
                ("items[0][id]", subscription.item_id.as_str()),
                ("items[0][price]", price_id),
                ("proration_behavior", "always_invoice"),
                ("metadata[user_id]", user_id),
                ("metadata[tier]", tier.as_str()),
            ],
        )
        .await?;
        Ok(())
    }

    pub async fn create_checkout_session(
        &self,
        customer_id: &str,
        price_id: &str,
        user_id: &str,
        tier: Tier,
    ) -> AppResult<String> {
        let success_url = format!("{}/app?success=true", self.base_url);
        let cancel_url = format!("{}/pro?canceled=true", self.base_url);

        let body = self
            .post_form(
                "checkout/sessions",
                &[
                    ("customer", customer_id),
                    ("mode", "subscription"),
                    ("payment_method_types[0]", "card"),
                    ("line_items[0][price]", price_id),
                    ("line_items[0][quantity]", "1"),
                    ("success_url", &success_url),
                    ("cancel_url", &cancel_url),
                    ("metadata[user_id]", user_id),
                    ("metadata[tier]", tier.as_str()),
                ],
            )
            .await?;

        string_field(&body, &["url"]).ok_or_else(|| {
            AppError::PaymentError("Stripe returned no checkout session URL".to_string())
        })
    }

    pub async fn create_portal_session(&self, customer_id: &str) -> AppResult<String> {
        let return_url = format!("{}/app", self.base_url);

        let body = self
            .post_form(
                "billing_portal/sessions",
                &[("customer", customer_id), ("return_url", &return_url)],
            )
            .await?;

        string_field(&body, &["url"]).ok_or_else(|| {
            AppError::PaymentError("Stripe returned no portal session URL".to_string())
        })
    }

    async fn post_form(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<serde_json::Value> {
        let response = self
            .http
            .post(format!("{}/{}", STRIPE_API_BASE, path))
            .bearer_auth(self.secret_key.expose_secret())
            .form(params)
            .send()
            .await
            .map_err(|e| AppError::PaymentError(format!("Stripe request failed: {}", e)))?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::PaymentError(format!("Invalid Stripe response: {}", e)))?;

        if !status.is_success() {
            return Err(stripe_error(&body));
        }

        Ok(body)
    }
}

/// Parses a webhook payload into a billing event. The `Stripe-Signature`
/// header must be present; cryptographic verification of it is handled at
/// the deployment edge.
pub fn parse_webhook_event(payload: &[u8], signature: Option<&str>) -> AppResult<BillingEvent> {
    if signature.is_none_or(str::is_empty) {
        return Err(AppError::ValidationError(
            "Missing Stripe-Signature header".to_string(),
        ));
    }

    let event: serde_json::Value = serde_json::from_slice(payload)
        .map_err(|e| AppError::ValidationError(format!("Invalid webhook payload: {}", e)))?;

    let event_type = event.get("type").and_then(|v| v.as_str()).unwrap_or("");
    let object = event
        .get("data")
        .and_then(|d| d.get("object"))
        .cloned()
        .unwrap_or(serde_json::Value::Null);

    match event_type {
        "checkout.session.completed" => {
            let user_id = string_field(&object, &["metadata", "user_id"]).ok_or_else(|| {
                AppError::ValidationError("Checkout event missing user_id metadata".to_string())
            })?;
            // Default preserved for sessions created before tiers existed
            let tier = string_field(&object, &["metadata", "tier"])
                .and_then(|t| Tier::parse_paid(&t))
                .unwrap_or(Tier::Pro);
            let customer_id = string_field(&object, &["customer"]).ok_or_else(|| {
                AppError::ValidationError("Checkout event missing customer".to_string())
            })?;
            let subscription_id = string_field(&object, &["subscription"]).ok_or_else(|| {
                AppError::ValidationError("Checkout event missing subscription".to_string())
            })?;

            Ok(BillingEvent::CheckoutCompleted {
                user_id,
                tier,
                customer_id,
                subscription_id,
            })
        }
        "customer.subscription.deleted" => {
            let customer_id = string_field(&object, &["customer"]).ok_or_else(|| {
                AppError::ValidationError("Subscription event missing customer".to_string())
            })?;
            Ok(BillingEvent::SubscriptionDeleted { customer_id })
        }
        _ => Ok(BillingEvent::Ignored),
    }
}

fn parse_subscription(body: &serde_json::Value) -> AppResult<Subscription> {
    let item = body
        .get("items")
        .and_then(|i| i.get("data"))
        .and_then(|d| d.get(0));

    let parsed = (|| {
        Some(Subscription {
            id: string_field(body, &["id"])?,
            status: string_field(body, &["status"])?,
            item_id: item.and_then(|i| string_field(i, &["id"]))?,
            price_id: item.and_then(|i| string_field(i, &["price", "id"]))?,
        })
    })();

    parsed.ok_or_else(|| {
        AppError::PaymentError("Stripe subscription response missing fields".to_string())
    })
}

fn string_field(value: &serde_json::Value, path: &[&str]) -> Option<String> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    current.as_str().map(str::to_string)
}

fn stripe_error(body: &serde_json::Value) -> AppError {
    let message = string_field(body, &["error", "message"])
        .unwrap_or_else(|| "unknown billing provider error".to_string());
    AppError::PaymentError(format!("Stripe error: {}", message))
}
