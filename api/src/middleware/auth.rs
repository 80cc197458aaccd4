//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the bearer token from the Authorization header,
//! verifies it with the `TokenService` registered as app data, and injects
//! an `AuthContext` into the request extensions.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};
use uuid::Uuid;

use onboard_core::{
    domain::entities::token::Claims,
    errors::{DomainError, TokenError},
    services::token::TokenService,
};

use crate::dto::ErrorResponse;

/// Customer authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Customer ID extracted from JWT claims
    pub customer_id: Uuid,
    /// Email the token was issued for
    pub email: String,
    /// JWT ID for tracking
    pub jti: String,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let customer_id = claims
            .customer_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;
        Ok(Self {
            customer_id,
            email: claims.email,
            jti: claims.jti,
        })
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let auth_context = match authenticate(&req) {
                Ok(context) => context,
                Err(error) => {
                    tracing::debug!(
                        path = %req.path(),
                        code = error.code(),
                        "Rejected unauthenticated request"
                    );
                    let response = unauthorized(&error);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            req.extensions_mut().insert(auth_context);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn authenticate(req: &ServiceRequest) -> Result<AuthContext, DomainError> {
    let token = extract_bearer_token(req).ok_or(TokenError::MissingToken)?;

    let token_service = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| DomainError::internal("token service not configured"))?;

    let claims = token_service.verify_access_token(&token)?;
    AuthContext::from_claims(claims)
}

fn unauthorized(error: &DomainError) -> HttpResponse {
    let message = match error {
        DomainError::Token(TokenError::MissingToken) => "Authentication required",
        DomainError::Token(TokenError::TokenExpired) => "Token has expired",
        DomainError::Token(_) => "Invalid token",
        _ => return HttpResponse::InternalServerError()
            .json(ErrorResponse::new("SERVER_ERROR", "Authentication unavailable")),
    };
    HttpResponse::Unauthorized().json(ErrorResponse::new(error.code(), message))
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result: Result<Self, Error> = req.extensions().get::<AuthContext>().cloned().ok_or_else(|| {
            actix_web::error::InternalError::from_response(
                "missing auth context",
                HttpResponse::Unauthorized().json(ErrorResponse::new(
                    TokenError::MissingToken.code(),
                    "Authentication required",
                )),
            )
            .into()
        });

        ready(result)
    }
}
