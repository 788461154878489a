//! Integer path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::str::FromStr;

/// Single path parameter parsed as an integer id (`i32` unless stated).
///
/// A segment that is not an integer is answered with [`AppError::InvalidId`]
/// instead of axum's plain-text rejection. An integer too large for `T`
/// cannot name a stored row and is answered with [`AppError::NotFound`].
///
/// ```ignore
/// async fn get_item(IdPath(id): IdPath) -> String {
///     format!("Item {id}")
/// }
///
/// let app = Router::new().route("/items/{id}", get(get_item));
/// ```
pub struct IdPath<T = i32>(pub T);

impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: FromStr,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidId(e.body_text()))?;

        match raw.parse::<T>() {
            Ok(id) => Ok(IdPath(id)),
            Err(_) if is_integer_literal(&raw) => {
                Err(AppError::NotFound(format!("No resource with id {raw}")))
            }
            Err(_) => Err(AppError::InvalidId(raw)),
        }
    }
}

/// Optional sign followed by one or more ASCII digits
fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
