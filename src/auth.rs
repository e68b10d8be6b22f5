use std::future::{ready, Ready};
use std::sync::Arc;

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{http::header, web, FromRequest, HttpMessage, HttpRequest};
use anyhow::anyhow;
use thiserror::Error;

use crate::routes::ApiError;
use crate::{entities, ports};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(authorization: Option<&str>) -> Option<&str> {
    let (scheme, token) = authorization?.trim().split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

pub struct Authenticator {
    provider: Arc<dyn ports::IdentityProvider>,
    #[cfg(any(test, feature = "dev-bypass"))]
    dev_bypass: bool,
}

impl Authenticator {
    pub fn new(provider: Arc<dyn ports::IdentityProvider>) -> Self {
        Self {
            provider,
            #[cfg(any(test, feature = "dev-bypass"))]
            dev_bypass: false,
        }
    }

    #[cfg(any(test, feature = "dev-bypass"))]
    pub fn with_dev_bypass(mut self, enabled: bool) -> Self {
        self.dev_bypass = enabled;
        self
    }

    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
    ) -> Result<entities::AuthUser, AuthError> {
        let token = bearer_token(authorization).ok_or(AuthError::MissingToken)?;

        #[cfg(any(test, feature = "dev-bypass"))]
        {
            if self.dev_bypass {
                if let Some(user) = crate::dev_bypass::resolve(token) {
                    log::debug!("dev bypass token accepted");
                    return Ok(user);
                }
            }
        }

        self.provider.verify(token).await.map_err(|e| {
            log::info!("verify token error: {:#}", e);
            AuthError::InvalidToken
        })
    }
}

/// Rejects the request before any handler runs unless the bearer token verifies.
/// Rejections are answered here, so outer middleware sees a normal response.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<EitherBody<impl MessageBody>>, actix_web::Error> {
    let Some(authenticator) = req.app_data::<web::Data<Authenticator>>().cloned() else {
        let err = ApiError::Internal(anyhow!("authenticator is not configured"));
        return Ok(req.error_response(err).map_into_right_body());
    };
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    match authenticator.authenticate(authorization.as_deref()).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(next.call(req).await?.map_into_left_body())
        }
        Err(e) => Ok(req.error_response(ApiError::from(e)).map_into_right_body()),
    }
}

/// The identity attached by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub entities::AuthUser);

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<entities::AuthUser>()
                .cloned()
                .map(CurrentUser)
                .ok_or(ApiError::Unauthorized(AuthError::MissingToken)),
        )
    }
}
