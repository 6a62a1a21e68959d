//! Bearer-token gate for the admin API.
//!
//! Tokens are the ones issued by `POST /api/admin/verify`. Requests without a
//! valid, unexpired token are answered with 401 before reaching a handler.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage, ResponseError,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use std::rc::Rc;
use tracing::debug;

use atelier_core::session::SessionSigner;

use crate::errors::AppError;

pub struct AdminAuth {
    signer: Option<SessionSigner>,
}

impl AdminAuth {
    pub fn new(signer: Option<SessionSigner>) -> Self {
        Self { signer }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AdminAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AdminAuthService {
            service: Rc::new(service),
            signer: self.signer.clone(),
        })
    }
}

pub struct AdminAuthService<S> {
    service: Rc<S>,
    signer: Option<SessionSigner>,
}

/// Expiry of the session that authorized the request, in epoch millis.
#[derive(Debug, Clone, Copy)]
pub struct AdminSessionExpiry(pub i64);

impl<S, B> Service<ServiceRequest> for AdminAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim);

        let verified = match (&self.signer, token) {
            (Some(signer), Some(token)) => signer
                .verify(token)
                .inspect_err(|e| debug!(path = req.path(), error = %e, "admin token refused"))
                .ok(),
            _ => None,
        };

        let Some(expires_at) = verified else {
            let response = AppError::Unauthorized.error_response();
            let res = req.into_response(response).map_into_right_body();
            return Box::pin(async move { Ok(res) });
        };

        req.extensions_mut().insert(AdminSessionExpiry(expires_at));
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}
