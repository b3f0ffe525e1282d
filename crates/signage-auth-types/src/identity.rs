//! Admin identity extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;

use crate::token::SessionInfo;

/// Verified session placed in request extensions by the session gate.
///
/// Returns 401 if no gate ran in front of the handler. Role enforcement (403) is
/// the gate's job, so a present identity is always an admin.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub SessionInfo);

impl<S> FromRequestParts<S> for AdminIdentity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract synchronously and return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let session = parts.extensions.get::<SessionInfo>().cloned();

        async move {
            let session = session.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self(session))
        }
    }
}
