//! Saleor webhook handlers.
//!
//! Every delivery that passes verification is acknowledged with
//! `200 {"message":"event handled"}`, including deliveries with nothing to
//! send and messages the provider refused. Only a body that does not match
//! the event schema, or a failed provider request, answers 500.
//!
//! # Endpoints
//!
//! - `POST /checkout-fully-paid` – `CHECKOUT_FULLY_PAID` → payment confirmation
//! - `POST /order-fulfilled`     – `ORDER_FULFILLED` → shipment notification

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use salwa_core::processors::{ProcessError, ProcessOutcome, checkout_paid, order_fulfilled};
use salwa_sdk::objects::EventResponse;
use salwa_sdk::objects::events::{
    CheckoutFullyPaidPayload, EventPayload, OrderFulfilledPayload, SaleorEvent,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::api::extractors::VerifiedEvent;
use crate::state::AppState;

/// Build the webhook router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkout-fully-paid", post(handle_checkout_fully_paid))
        .route("/order-fulfilled", post(handle_order_fulfilled))
}

fn delivery_span(event: SaleorEvent) -> tracing::Span {
    tracing::info_span!("webhook", event = %event, delivery_id = %Uuid::now_v7())
}

fn parse<P: EventPayload>(event: &VerifiedEvent<P>) -> Result<P, WebhookApiError> {
    event.payload().map_err(|e| WebhookApiError::Payload {
        event: P::EVENT,
        source: e,
    })
}

fn acknowledge(outcome: ProcessOutcome) -> Json<EventResponse> {
    match outcome {
        ProcessOutcome::Skipped(reason) => {
            tracing::debug!(skipped = %reason, "Event handled");
        }
        ProcessOutcome::Dispatched(delivery) => {
            tracing::debug!(delivery = delivery.as_str(), "Event handled");
        }
    }
    Json(EventResponse::handled())
}

/// `POST /checkout-fully-paid`
async fn handle_checkout_fully_paid(
    State(state): State<AppState>,
    event: VerifiedEvent<CheckoutFullyPaidPayload>,
) -> Result<Json<EventResponse>, WebhookApiError> {
    let span = delivery_span(SaleorEvent::CheckoutFullyPaid);
    async move {
        let payload = parse(&event)?;
        let settings = state.config.checkout_paid.read().await.clone();
        let whatsapp = state.config.whatsapp.read().await.clone();

        let outcome =
            checkout_paid::process(&payload, &settings, &whatsapp, state.dispatcher.as_ref())
                .await?;
        Ok::<_, WebhookApiError>(acknowledge(outcome))
    }
    .instrument(span)
    .await
}

/// `POST /order-fulfilled`
async fn handle_order_fulfilled(
    State(state): State<AppState>,
    event: VerifiedEvent<OrderFulfilledPayload>,
) -> Result<Json<EventResponse>, WebhookApiError> {
    let span = delivery_span(SaleorEvent::OrderFulfilled);
    async move {
        let payload = parse(&event)?;
        let settings = state.config.order_fulfilled.read().await.clone();
        let whatsapp = state.config.whatsapp.read().await.clone();

        let outcome =
            order_fulfilled::process(&payload, &settings, &whatsapp, state.dispatcher.as_ref())
                .await?;
        Ok::<_, WebhookApiError>(acknowledge(outcome))
    }
    .instrument(span)
    .await
}

/// Errors that end a webhook delivery with 500.
#[derive(Debug, thiserror::Error)]
enum WebhookApiError {
    #[error("invalid {event} payload: {source}")]
    Payload {
        event: SaleorEvent,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Webhook handler failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(EventResponse::error(self.to_string())),
        )
            .into_response()
    }
}
