use axum::extract::State;
use axum::Json;

use crate::app_state::AppState;
use crate::services::payments::{self, PaymentSummary};

/// GET /api/v1/payments/summary — payment totals by month and by service.
pub async fn payment_summary(State(state): State<AppState>) -> Json<PaymentSummary> {
    let snapshot = state.store.snapshot().await;
    Json(payments::summarize_payments(&snapshot.jobs))
}
