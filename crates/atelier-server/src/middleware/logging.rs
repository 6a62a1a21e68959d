//! Access log for the storefront. Each request is tagged with the area it
//! hit so admin traffic can be filtered apart from shopper traffic.

use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use tracing::{info, warn};

/// Coarse section of the site a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteArea {
    Admin,
    Storefront,
    Media,
    Other,
}

impl RouteArea {
    pub fn of(path: &str) -> Self {
        let under = |prefix: &str| {
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        };
        if under("/api/admin") {
            RouteArea::Admin
        } else if under("/api") {
            RouteArea::Storefront
        } else if under("/media") {
            RouteArea::Media
        } else {
            RouteArea::Other
        }
    }
}

impl fmt::Display for RouteArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RouteArea::Admin => "admin",
            RouteArea::Storefront => "storefront",
            RouteArea::Media => "media",
            RouteArea::Other => "other",
        })
    }
}

struct AccessEntry {
    method: String,
    path: String,
    area: RouteArea,
    started: Instant,
}

impl AccessEntry {
    fn begin(req: &ServiceRequest) -> Self {
        let path = req.path().to_string();
        Self {
            method: req.method().to_string(),
            area: RouteArea::of(&path),
            path,
            started: Instant::now(),
        }
    }

    fn finish<B>(self, outcome: &Result<ServiceResponse<B>, Error>) {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        let Self { method, path, area, .. } = self;
        match outcome {
            Ok(res) if res.status().is_client_error() || res.status().is_server_error() => {
                let status = res.status().as_u16();
                warn!(%area, %method, %path, status, elapsed_ms, "rejected");
            }
            Ok(res) => {
                let status = res.status().as_u16();
                info!(%area, %method, %path, status, elapsed_ms, "served");
            }
            Err(e) => {
                warn!(%area, %method, %path, error = %e, elapsed_ms, "handler error");
            }
        }
    }
}

pub struct LoggingMiddleware;

impl<S, B> Transform<S, ServiceRequest> for LoggingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AccessLogService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AccessLogService {
            inner: Rc::new(service),
        })
    }
}

pub struct AccessLogService<S> {
    inner: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AccessLogService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(inner);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let inner = Rc::clone(&self.inner);
        let entry = AccessEntry::begin(&req);

        Box::pin(async move {
            let outcome = inner.call(req).await;
            entry.finish(&outcome);
            outcome
        })
    }
}
