use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;

/// Best-effort caller origin, used as the rate-limiting key.
///
/// Takes the first hop of `X-Forwarded-For` (the service runs behind a
/// reverse proxy in production), falls back to the socket peer address,
/// and degrades to the literal `"unknown"`. The unknown bucket is shared,
/// so an identity-detection failure tightens limiting rather than
/// bypassing it. Recomputed per request, never persisted.
pub struct ClientIdentity(pub String);

impl<S> FromRequestParts<S> for ClientIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded {
            return Ok(ClientIdentity(ip.to_string()));
        }

        if let Some(ConnectInfo(addr)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
            return Ok(ClientIdentity(addr.ip().to_string()));
        }

        Ok(ClientIdentity("unknown".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> String {
        let (mut parts, _) = request.into_parts();
        let ClientIdentity(identity) = ClientIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        identity
    }

    #[tokio::test]
    async fn forwarded_for_takes_the_first_hop() {
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, "203.0.113.7");
    }

    #[tokio::test]
    async fn peer_address_is_the_fallback() {
        let mut request = Request::builder().body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo::<SocketAddr>("192.0.2.4:51234".parse().unwrap()));
        assert_eq!(extract(request).await, "192.0.2.4");
    }

    #[tokio::test]
    async fn no_origin_information_degrades_to_unknown() {
        let request = Request::builder().body(()).unwrap();
        assert_eq!(extract(request).await, "unknown");
    }

    #[tokio::test]
    async fn blank_forwarded_header_is_ignored() {
        let mut request = Request::builder()
            .header("x-forwarded-for", "  ")
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo::<SocketAddr>("192.0.2.4:51234".parse().unwrap()));
        assert_eq!(extract(request).await, "192.0.2.4");
    }
}
