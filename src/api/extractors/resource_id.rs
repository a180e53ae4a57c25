//! Numeric path id extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::errors::AppError;

/// Primary key taken from the `{id}` path segment.
///
/// Anything that is not an integer cannot name a resource, so it is reported
/// as not found rather than as a malformed request.
#[derive(Debug, Clone, Copy)]
pub struct ResourceId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;

        raw.parse().map(ResourceId).map_err(|_| AppError::NotFound)
    }
}
