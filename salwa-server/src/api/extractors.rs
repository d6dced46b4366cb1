//! Custom Axum extractors for request authentication.
//!
//! Provides `VerifiedEvent<P>`, which authenticates a Saleor webhook delivery
//! before the body is parsed. All cryptographic operations are delegated to
//! [`salwa_sdk::signature`].

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use salwa_sdk::objects::EventResponse;
use salwa_sdk::objects::events::EventPayload;
use salwa_sdk::signature::{self, API_URL_HEADER, EVENT_HEADER, SIGNATURE_HEADER};
use std::marker::PhantomData;

use crate::state::AppState;

/// Maximum accepted webhook body size.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// An Axum extractor that authenticates a Saleor webhook delivery for the
/// event bound to payload type `P`.
///
/// # Checks
///
/// 1. `Saleor-Event` names `P::EVENT`.
/// 2. `Saleor-Api-Url` has the configured origin (when one is configured).
/// 3. `Saleor-Signature` is `hex(HMAC-SHA256(body, webhook_secret))`.
///
/// The body is kept as raw bytes; call [`payload`](Self::payload) to parse it.
pub struct VerifiedEvent<P> {
    body: Bytes,
    _payload: PhantomData<fn() -> P>,
}

impl<P: EventPayload> VerifiedEvent<P> {
    /// Deserialize the authenticated body.
    pub fn payload(&self) -> Result<P, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Errors that can occur during webhook verification.
#[derive(Debug, thiserror::Error)]
pub enum VerifiedEventError {
    #[error("missing Saleor-Signature header")]
    MissingSignature,
    #[error("missing Saleor-Event header")]
    MissingEvent,
    #[error("unexpected Saleor-Event {0:?}")]
    UnexpectedEvent(String),
    #[error("missing Saleor-Api-Url header")]
    MissingApiUrl,
    #[error("delivery from unknown Saleor instance")]
    UnknownInstance,
    #[error("invalid header format")]
    InvalidHeader,
    #[error("failed to read request body")]
    BodyReadError,
    #[error("signature verification failed")]
    VerificationFailed,
}

impl IntoResponse for VerifiedEventError {
    fn into_response(self) -> Response {
        let status = match self {
            VerifiedEventError::MissingSignature | VerifiedEventError::VerificationFailed => {
                StatusCode::UNAUTHORIZED
            }
            VerifiedEventError::UnknownInstance => StatusCode::FORBIDDEN,
            VerifiedEventError::MissingEvent
            | VerifiedEventError::UnexpectedEvent(_)
            | VerifiedEventError::MissingApiUrl
            | VerifiedEventError::InvalidHeader
            | VerifiedEventError::BodyReadError => StatusCode::BAD_REQUEST,
        };
        tracing::warn!(status = status.as_u16(), reason = %self, "Rejected webhook delivery");
        (status, Json(EventResponse::error(self.to_string()))).into_response()
    }
}

fn header_str<'a>(
    headers: &'a HeaderMap,
    name: &str,
) -> Result<Option<&'a str>, VerifiedEventError> {
    headers
        .get(name)
        .map(|value| value.to_str().map_err(|_| VerifiedEventError::InvalidHeader))
        .transpose()
}

impl<P: EventPayload> FromRequest<AppState> for VerifiedEvent<P> {
    type Rejection = VerifiedEventError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let headers = req.headers();

        let event = header_str(headers, EVENT_HEADER)?.ok_or(VerifiedEventError::MissingEvent)?;
        if !P::EVENT.matches_header(event) {
            return Err(VerifiedEventError::UnexpectedEvent(event.to_owned()));
        }

        let signature = header_str(headers, SIGNATURE_HEADER)?
            .ok_or(VerifiedEventError::MissingSignature)?
            .to_owned();
        let api_url = header_str(headers, API_URL_HEADER)?.map(str::to_owned);

        let body = axum::body::to_bytes(req.into_body(), MAX_BODY_SIZE)
            .await
            .map_err(|_| VerifiedEventError::BodyReadError)?;

        let saleor = state.config.saleor.read().await;
        if saleor.api_url.is_some() {
            let api_url = api_url.ok_or(VerifiedEventError::MissingApiUrl)?;
            if !saleor.accepts_api_url(&api_url) {
                return Err(VerifiedEventError::UnknownInstance);
            }
        }
        signature::verify_payload(&signature, &body, saleor.secret_bytes())
            .map_err(|_| VerifiedEventError::VerificationFailed)?;
        drop(saleor);

        Ok(VerifiedEvent {
            body,
            _payload: PhantomData,
        })
    }
}
