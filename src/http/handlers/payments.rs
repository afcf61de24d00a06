use crate::domain::payment::{FieldError, PaymentForm, SubmissionOutcome};
use crate::error::PaymentError;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;

pub async fn home() -> Redirect {
    Redirect::to("/payment")
}

pub async fn show_payment_form(State(state): State<AppState>) -> Response {
    let key = state.payment_service.generate_idempotency_key();
    render_form(&state, StatusCode::OK, None, &key, &[])
}

pub async fn process_payment(
    State(state): State<AppState>,
    Form(form): Form<PaymentForm>,
) -> Response {
    let submitted_amount = form.amount.clone();
    let key = form
        .idempotency_key
        .clone()
        .unwrap_or_else(|| state.payment_service.generate_idempotency_key());

    let req = match form.into_request() {
        Ok(req) => req,
        Err(errors) => {
            tracing::warn!("payment form validation failed: {:?}", errors);
            return render_form(
                &state,
                StatusCode::UNPROCESSABLE_ENTITY,
                submitted_amount.as_deref(),
                &key,
                &errors,
            );
        }
    };

    match state.payment_service.submit(req).await {
        Ok(SubmissionOutcome::Redirect(url)) => Redirect::to(&url).into_response(),
        Ok(SubmissionOutcome::Invalid(errors)) => render_form(
            &state,
            StatusCode::UNPROCESSABLE_ENTITY,
            submitted_amount.as_deref(),
            &key,
            &errors,
        ),
        Err(e) => render_error(&state, &e),
    }
}

fn render_form(
    state: &AppState,
    status: StatusCode,
    amount: Option<&str>,
    key: &str,
    errors: &[FieldError],
) -> Response {
    match state.views.payment_form(amount, key, errors) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => template_failure(e),
    }
}

fn render_error(state: &AppState, err: &PaymentError) -> Response {
    let status = match err {
        PaymentError::DuplicatePayment(_) => StatusCode::CONFLICT,
        PaymentError::ProcessingFailed(_) => StatusCode::BAD_GATEWAY,
        PaymentError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::error!("payment exception occurred: {}", err);
    if let Some(body) = err.response_body() {
        tracing::error!("payment API response body: {}", body);
    }

    let message = match err {
        PaymentError::DuplicatePayment(_) => "Payment with this key has already been processed",
        PaymentError::ProcessingFailed(_) => "Payment processing failed",
        PaymentError::Store(_) => "Unexpected error occurred",
    };
    match state.views.payment_error(err.code(), message) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => template_failure(e),
    }
}

fn template_failure(e: tera::Error) -> Response {
    tracing::error!("template rendering failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
}
