use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{LoginRequest, RegisterRequest},
        response::{AuthTokenResponse, RegistrationPendingResponse, UsageResponse},
    },
};

#[post("/api/auth/register")]
async fn register(
    state: web::Data<Arc<AppState>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let outcome = state
        .identity_service
        .sign_up(&request.email, &request.password)
        .await?;

    state
        .user_service
        .create_user(
            &outcome.user_id,
            &request.username,
            &request.email,
            outcome.email_verified,
        )
        .await?;

    log::info!("Registered new user {}", request.username);

    match outcome.access_token {
        Some(access_token) => Ok(HttpResponse::Created().json(AuthTokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            message: None,
        })),
        None => Ok(HttpResponse::Created().json(RegistrationPendingResponse {
            message: "Registration successful. Please confirm your email address to sign in."
                .to_string(),
            email_confirmation_required: true,
        })),
    }
}

#[post("/api/auth/login")]
async fn login(
    state: web::Data<Arc<AppState>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let access_token = state
        .identity_service
        .sign_in(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(AuthTokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        message: None,
    }))
}

#[get("/api/users/usage")]
async fn get_usage(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.get_or_create_from_claims(&auth.0).await?;
    Ok(HttpResponse::Ok().json(UsageResponse::from(&user)))
}
