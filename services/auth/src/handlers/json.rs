use axum::extract::FromRequest;

use crate::error::AuthServiceError;

/// `axum::Json` whose rejections (bad JSON, wrong content type) become `InvalidInput` 400s.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AuthServiceError))]
pub struct JsonBody<T>(pub T);
