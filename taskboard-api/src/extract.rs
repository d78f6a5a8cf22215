/// Request extractors that reject with [`ApiError`]
///
/// axum's built-in extractors answer malformed input with plain-text bodies
/// and a mix of 400/415/422 statuses. These wrappers route every rejection
/// through `ApiError` so clients always get the JSON error format with 422.
///
/// - [`Json`] / [`Path`] / [`Query`]: axum's extractors with the rejection
///   swapped
/// - [`ValidatedJson`] / [`ValidatedQuery`]: additionally run the `validator`
///   rules declared on the target type

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

/// JSON body that must pass its `Validate` rules
///
/// # Example
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateProjectRequest {
///     #[validate(length(min = 1, max = 100))]
///     name: String,
/// }
///
/// async fn create(ValidatedJson(body): ValidatedJson<CreateProjectRequest>) { .. }
/// ```
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

/// Query string that must pass its `Validate` rules
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state).await?;
        data.validate()?;
        Ok(ValidatedQuery(data))
    }
}
