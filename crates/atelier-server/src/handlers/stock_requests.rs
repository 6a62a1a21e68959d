use actix_web::{post, web, HttpResponse};

use atelier_core::models::StockRequestForm;

use crate::errors::AppResult;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(request_stock);
}

/// Ask to be told when an out-of-stock product is back.
#[post("/api/stock-requests")]
async fn request_stock(
    state: web::Data<AppState>,
    body: web::Json<StockRequestForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    let request = state.run(move |s| s.request_stock(&form)).await?;
    Ok(HttpResponse::Created().json(request))
}
