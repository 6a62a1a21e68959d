//! Checkout and the customer order lookup.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use atelier_core::services::CheckoutRequest;

use crate::errors::AppResult;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/orders")
            .service(submit_order)
            .service(lookup_orders),
    );
}

#[derive(Deserialize)]
pub(crate) struct EmailQuery {
    #[serde(default)]
    pub email: String,
}

#[post("")]
async fn submit_order(
    state: web::Data<AppState>,
    body: web::Json<CheckoutRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    let order = state.run(move |s| s.submit_order(request)).await?;
    Ok(HttpResponse::Created().json(order))
}

/// Orders placed with the given email, newest first.
#[get("")]
async fn lookup_orders(
    state: web::Data<AppState>,
    query: web::Query<EmailQuery>,
) -> AppResult<HttpResponse> {
    let email = query.into_inner().email;
    let orders = state.run(move |s| s.customer_orders(&email)).await?;
    Ok(HttpResponse::Ok().json(orders))
}
