use std::sync::Arc;

use actix_web::{
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    post, web, HttpResponse,
};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::{AppError, AppResult},
    models::{domain::User, dto::request::GenerateTestRequest},
    services::{csv_export, distribution},
};

#[post("/api/generator/generate")]
async fn generate_test(
    state: web::Data<Arc<AppState>>,
    request: web::Json<GenerateTestRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let user = state.user_service.get_or_create_from_claims(&auth.0).await?;
    check_usage_limits(&user, request.num_questions)?;

    let distribution = distribution::distribute(&request.question_formats, request.num_questions);
    let questions = state
        .generator_service
        .generate_questions(&request, &distribution)
        .await?;

    // The questions already exist at this point, so usage accounting must
    // not fail the download.
    state
        .user_service
        .record_question_usage(&user, questions.len() as u32)
        .await;

    let csv = csv_export::to_udemy_csv(&questions)?;
    let filename = csv_export::csv_filename(&request.working_title);

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(csv))
}

/// Enforces the per-test cap (400) and the monthly quota (429) for the
/// user's tier.
fn check_usage_limits(user: &User, num_questions: u32) -> AppResult<()> {
    let per_test_cap = user.tier.max_questions_per_test();
    if num_questions > per_test_cap {
        return Err(AppError::ValidationError(format!(
            "The {} tier allows at most {} questions per test",
            user.tier.as_str(),
            per_test_cap
        )));
    }

    let monthly_limit = user.tier.monthly_question_limit();
    if user.monthly_chars_used + i64::from(num_questions) > monthly_limit {
        return Err(AppError::UsageLimitReached(format!(
            "This request would exceed your monthly limit of {} questions ({} already used)",
            monthly_limit, user.monthly_chars_used
        )));
    }

    Ok(())
}
