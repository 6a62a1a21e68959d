//! Commission requests and their customer lookup.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use atelier_core::models::{CustomOrderForm, EncodedImage, ImageUpload};
use atelier_core::StorefrontResult;

use super::orders::EmailQuery;
use crate::errors::AppResult;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/custom-orders")
            .service(submit_custom_order)
            .service(lookup_custom_orders),
    );
}

#[derive(Deserialize)]
struct CustomOrderRequest {
    #[serde(flatten)]
    form: CustomOrderForm,
    #[serde(default)]
    images: Vec<EncodedImage>,
}

#[post("")]
async fn submit_custom_order(
    state: web::Data<AppState>,
    body: web::Json<CustomOrderRequest>,
) -> AppResult<HttpResponse> {
    let CustomOrderRequest { form, images } = body.into_inner();
    let order = state
        .run(move |s| {
            let uploads = images
                .iter()
                .map(EncodedImage::decode)
                .collect::<StorefrontResult<Vec<ImageUpload>>>()?;
            s.submit_custom_order(form, &uploads)
        })
        .await?;
    Ok(HttpResponse::Created().json(order))
}

#[get("")]
async fn lookup_custom_orders(
    state: web::Data<AppState>,
    query: web::Query<EmailQuery>,
) -> AppResult<HttpResponse> {
    let email = query.into_inner().email;
    let orders = state.run(move |s| s.customer_custom_orders(&email)).await?;
    Ok(HttpResponse::Ok().json(orders))
}
