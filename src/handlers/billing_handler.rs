use std::sync::Arc;

use actix_web::{post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::Tier,
        dto::{
            request::CheckoutParams,
            response::{CheckoutResponse, PortalResponse, WebhookAck},
        },
    },
    services::billing_service::{parse_webhook_event, BillingEvent},
};

#[post("/api/billing/checkout-session")]
async fn create_checkout_session(
    state: web::Data<Arc<AppState>>,
    params: web::Query<CheckoutParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.get_or_create_from_claims(&auth.0).await?;

    let tier = Tier::parse_paid(&params.tier).ok_or_else(|| {
        AppError::ValidationError(format!("Unknown subscription tier: {}", params.tier))
    })?;
    let price_id = state.billing_service.price_for_tier(tier)?.to_string();

    // An active subscription is switched in place instead of opening a
    // second checkout.
    if let Some(subscription_id) = &user.stripe_subscription_id {
        let subscription = state
            .billing_service
            .retrieve_subscription(subscription_id)
            .await?;

        if subscription.is_active() {
            if subscription.price_id == price_id {
                return Ok(HttpResponse::Ok().json(CheckoutResponse {
                    checkout_url: None,
                    message: Some(format!("You are already on the {} plan", tier.as_str())),
                }));
            }

            state
                .billing_service
                .switch_subscription_price(&subscription, &price_id, &user.user_id, tier)
                .await?;
            state
                .user_service
                .change_tier(&user.user_id, tier, &price_id)
                .await?;

            log::info!("Switched user {} to the {} plan", user.user_id, tier.as_str());
            return Ok(HttpResponse::Ok().json(CheckoutResponse {
                checkout_url: None,
                message: Some(format!(
                    "Your subscription has been updated to the {} plan",
                    tier.as_str()
                )),
            }));
        }
    }

    let customer_id = match &user.stripe_customer_id {
        Some(id) => id.clone(),
        None => {
            let id = state
                .billing_service
                .create_customer(&user.email, &user.user_id)
                .await?;
            state
                .user_service
                .set_stripe_customer(&user.user_id, &id)
                .await?;
            id
        }
    };

    let checkout_url = state
        .billing_service
        .create_checkout_session(&customer_id, &price_id, &user.user_id, tier)
        .await?;

    Ok(HttpResponse::Ok().json(CheckoutResponse {
        checkout_url: Some(checkout_url),
        message: None,
    }))
}

#[post("/api/billing/customer-portal")]
async fn create_customer_portal(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.get_or_create_from_claims(&auth.0).await?;

    let customer_id = user.stripe_customer_id.ok_or_else(|| {
        AppError::NotFound("No billing account exists for this user".to_string())
    })?;

    let portal_url = state
        .billing_service
        .create_portal_session(&customer_id)
        .await?;

    Ok(HttpResponse::Ok().json(PortalResponse { portal_url }))
}

#[post("/api/billing/webhook")]
async fn stripe_webhook(
    state: web::Data<Arc<AppState>>,
    request: HttpRequest,
    payload: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let signature = request
        .headers()
        .get("Stripe-Signature")
        .and_then(|h| h.to_str().ok());

    match parse_webhook_event(&payload, signature)? {
        BillingEvent::CheckoutCompleted {
            user_id,
            tier,
            customer_id,
            subscription_id,
        } => {
            let subscription = state
                .billing_service
                .retrieve_subscription(&subscription_id)
                .await?;

            state
                .user_service
                .apply_subscription(
                    &user_id,
                    tier,
                    &customer_id,
                    &subscription_id,
                    &subscription.price_id,
                )
                .await?;

            log::info!("Activated {} subscription for user {}", tier.as_str(), user_id);
        }
        BillingEvent::SubscriptionDeleted { customer_id } => {
            state.user_service.cancel_subscription(&customer_id).await?;
            log::info!("Cleared subscription for customer {}", customer_id);
        }
        BillingEvent::Ignored => {}
    }

    Ok(HttpResponse::Ok().json(WebhookAck {
        status: "ok".to_string(),
    }))
}
