//! Admin panel API.
//!
//! `POST /api/admin/verify` is public and trades the shared admin password
//! for a signed session token. Everything else under `/api/admin` sits behind
//! [`AdminAuth`] and expects `Authorization: Bearer <token>`.

use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use atelier_core::models::{
    EncodedImage, OrderWithItems, ProductForm, ProductUpdateForm,
};
use atelier_core::session::{verify_password, SessionSigner};
use atelier_core::workflow::{
    CustomOrderAction, CustomOrderStatus, OrderAction, OrderStatus, StockRequestAction,
};

use super::status_filter;
use crate::errors::AppResult;
use crate::middleware::admin_auth::AdminSessionExpiry;
use crate::middleware::AdminAuth;
use crate::state::AppState;

/// Register the verify endpoint and the guarded admin scope. The verify
/// resource has to be registered first so the scope does not swallow it.
pub fn configure(cfg: &mut web::ServiceConfig, signer: Option<SessionSigner>) {
    cfg.service(web::resource("/api/admin/verify").route(web::post().to(verify)))
        .service(
            web::scope("/api/admin")
                .wrap(AdminAuth::new(signer))
                .service(session)
                .service(list_products)
                .service(create_product)
                .service(update_product)
                .service(deactivate_product)
                .service(delete_product)
                .service(set_stock)
                .service(list_orders)
                .service(get_order)
                .service(transition_order)
                .service(list_custom_orders)
                .service(transition_custom_order)
                .service(list_stock_requests)
                .service(transition_stock_request)
                .service(dashboard),
        );
}

// ----- verification -----

#[derive(Deserialize)]
struct VerifyRequest {
    #[serde(default)]
    password: String,
}

#[derive(Serialize, Default)]
struct VerifyResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<i64>,
}

/// Compare the submitted password with the configured secret.
///
/// The body is parsed by hand so every outcome, including a malformed body,
/// answers with the same `{success}` shape.
async fn verify(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let Ok(request) = serde_json::from_slice::<VerifyRequest>(&body) else {
        return HttpResponse::BadRequest().json(VerifyResponse::default());
    };
    let Some(expected) = state.admin_password.as_deref() else {
        error!("admin password not configured");
        return HttpResponse::InternalServerError().json(VerifyResponse::default());
    };

    if !verify_password(&request.password, expected) {
        warn!("admin verification failed");
        return HttpResponse::Ok().json(VerifyResponse::default());
    }

    let issued = state.signer.as_ref().map(SessionSigner::issue);
    info!("admin verified");
    HttpResponse::Ok().json(VerifyResponse {
        success: true,
        expires_at: issued.as_ref().map(|t| t.expires_at),
        token: issued.map(|t| t.token),
    })
}

#[derive(Serialize)]
struct SessionInfo {
    expires_at: i64,
}

/// Expiry of the presented token; lets the admin shell check its session.
#[get("/session")]
async fn session(expiry: web::ReqData<AdminSessionExpiry>) -> HttpResponse {
    HttpResponse::Ok().json(SessionInfo {
        expires_at: expiry.into_inner().0,
    })
}

// ----- products -----

#[derive(Deserialize)]
struct CreateProductRequest {
    #[serde(flatten)]
    form: ProductForm,
    #[serde(default)]
    image: Option<EncodedImage>,
}

#[derive(Deserialize)]
struct UpdateProductRequest {
    #[serde(flatten)]
    form: ProductUpdateForm,
    #[serde(default)]
    image: Option<EncodedImage>,
}

#[derive(Deserialize)]
struct StockUpdate {
    stock: i64,
}

#[get("/products")]
async fn list_products(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let products = state.run(|s| s.all_products()).await?;
    Ok(HttpResponse::Ok().json(products))
}

#[post("/products")]
async fn create_product(
    state: web::Data<AppState>,
    body: web::Json<CreateProductRequest>,
) -> AppResult<HttpResponse> {
    let CreateProductRequest { form, image } = body.into_inner();
    let product = state
        .run(move |s| {
            let image = image.as_ref().map(EncodedImage::decode).transpose()?;
            s.create_product(form, image.as_ref())
        })
        .await?;
    Ok(HttpResponse::Created().json(product))
}

#[patch("/products/{id}")]
async fn update_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateProductRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let UpdateProductRequest { form, image } = body.into_inner();
    let product = state
        .run(move |s| {
            let image = image.as_ref().map(EncodedImage::decode).transpose()?;
            s.update_product(&id, form, image.as_ref())
        })
        .await?;
    Ok(HttpResponse::Ok().json(product))
}

/// Soft delete: the product disappears from the storefront only.
#[delete("/products/{id}")]
async fn deactivate_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let product = state.run(move |s| s.deactivate_product(&id)).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[delete("/products/{id}/hard")]
async fn delete_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.run(move |s| s.delete_product(&id)).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/products/{id}/stock")]
async fn set_stock(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<StockUpdate>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let stock = body.stock;
    let product = state.run(move |s| s.set_stock(&id, stock)).await?;
    Ok(HttpResponse::Ok().json(product))
}

// ----- orders -----

#[derive(Deserialize)]
struct StatusQuery {
    status: Option<String>,
}

/// Order detail with what the admin can do next.
#[derive(Serialize)]
struct OrderDetail {
    #[serde(flatten)]
    detail: OrderWithItems,
    status_label: &'static str,
    available_actions: Vec<&'static str>,
}

impl From<OrderWithItems> for OrderDetail {
    fn from(detail: OrderWithItems) -> Self {
        let status = detail.order.status;
        Self {
            detail,
            status_label: status.admin_label(),
            available_actions: status.available_actions(),
        }
    }
}

#[get("/orders")]
async fn list_orders(
    state: web::Data<AppState>,
    query: web::Query<StatusQuery>,
) -> AppResult<HttpResponse> {
    let status = status_filter::<OrderStatus>(query.status.as_deref())?;
    let orders = state.run(move |s| s.list_orders(status)).await?;
    Ok(HttpResponse::Ok().json(orders))
}

#[get("/orders/{id}")]
async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let detail = state.run(move |s| s.order_with_items(&id)).await?;
    Ok(HttpResponse::Ok().json(OrderDetail::from(detail)))
}

#[post("/orders/{id}/transition")]
async fn transition_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<OrderAction>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let action = body.into_inner();
    let order = state.run(move |s| s.transition_order(&id, &action)).await?;
    Ok(HttpResponse::Ok().json(order))
}

// ----- custom orders -----

#[get("/custom-orders")]
async fn list_custom_orders(
    state: web::Data<AppState>,
    query: web::Query<StatusQuery>,
) -> AppResult<HttpResponse> {
    let status = status_filter::<CustomOrderStatus>(query.status.as_deref())?;
    let orders = state.run(move |s| s.list_custom_orders(status)).await?;
    Ok(HttpResponse::Ok().json(orders))
}

#[post("/custom-orders/{id}/transition")]
async fn transition_custom_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CustomOrderAction>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let action = body.into_inner();
    let order = state
        .run(move |s| s.transition_custom_order(&id, &action))
        .await?;
    Ok(HttpResponse::Ok().json(order))
}

// ----- stock requests -----

#[get("/stock-requests")]
async fn list_stock_requests(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let requests = state.run(|s| s.stock_requests()).await?;
    Ok(HttpResponse::Ok().json(requests))
}

#[post("/stock-requests/{id}/transition")]
async fn transition_stock_request(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<StockRequestAction>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let action = body.into_inner();
    let request = state
        .run(move |s| s.advance_stock_request(&id, action))
        .await?;
    Ok(HttpResponse::Ok().json(request))
}

#[get("/dashboard")]
async fn dashboard(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let stats = state.run(|s| s.dashboard()).await?;
    Ok(HttpResponse::Ok().json(stats))
}
