//! Public catalog routes.

use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use atelier_core::models::ProductCategory;

use crate::errors::AppResult;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/products")
            .service(list_products)
            .service(bestsellers)
            .service(get_product),
    );
}

#[derive(Deserialize)]
struct CatalogQuery {
    category: Option<ProductCategory>,
}

/// Active products, newest first, optionally for one category.
#[get("")]
async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<CatalogQuery>,
) -> AppResult<HttpResponse> {
    let category = query.category;
    let products = state.run(move |s| s.active_products(category)).await?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/bestsellers")]
async fn bestsellers(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let products = state.run(|s| s.bestsellers()).await?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/{id}")]
async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let product = state.run(move |s| s.catalog_product(&id)).await?;
    Ok(HttpResponse::Ok().json(product))
}
