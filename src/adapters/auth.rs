use {
    crate::{
        adapters::api_errors::ApiError,
        domain::{error::SyncError, id::CustomerId},
    },
    axum::{extract::FromRequestParts, http::request::Parts},
};

/// Header carrying the customer context established by the fronting auth
/// layer.
pub const CUSTOMER_HEADER: &str = "x-customer-id";

/// Extractor for the authenticated customer. Requests without a usable
/// customer context are rejected before the handler body runs.
#[derive(Debug, Clone)]
pub struct AuthedCustomer(pub CustomerId);

impl<S: Send + Sync> FromRequestParts<S> for AuthedCustomer {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(CUSTOMER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ApiError(SyncError::Unauthorized))?;

        let customer_id = CustomerId::new(value).map_err(|_| ApiError(SyncError::Unauthorized))?;
        Ok(Self(customer_id))
    }
}
