//! Serves uploaded images out of the blob store.

use actix_web::http::header::{self, CacheControl, CacheDirective};
use actix_web::{get, web, HttpResponse};
use tracing::debug;

use atelier_core::errors::StorageError;
use atelier_core::traits::IBlobStorage;
use atelier_core::StorefrontError;

use crate::errors::{AppError, AppResult};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_media);
}

#[get("/media/{path:.*}")]
async fn get_media(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let path = path.into_inner();
    let blobs = state.blobs.clone();
    let lookup = path.clone();
    let bytes = web::block(move || blobs.get(&lookup))
        .await
        .map_err(|e| AppError::Blocking(e.to_string()))?;

    let bytes = match bytes {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Err(StorefrontError::not_found("media", path).into()),
        Err(StorageError::BlobError { message, .. }) => {
            debug!(%path, %message, "media path refused");
            return Err(StorefrontError::not_found("media", path).into());
        }
        Err(e) => return Err(StorefrontError::from(e).into()),
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type(&path)))
        .insert_header(CacheControl(vec![
            CacheDirective::Public,
            CacheDirective::MaxAge(86_400),
        ]))
        .body(bytes))
}

fn content_type(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type("products/1-abc.PNG"), "image/png");
        assert_eq!(content_type("custom-orders/1-abc.jpeg"), "image/jpeg");
        assert_eq!(content_type("products/1-abc.swirl"), "application/octet-stream");
    }
}
