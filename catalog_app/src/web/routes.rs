// catalog_app/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{product_handlers, upload_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .service(
      web::scope("/api/v1")
        .route("/health", web::get().to(health_check_handler))
        .service(
          web::scope("/products")
            .route("", web::post().to(product_handlers::create_product_handler))
            .route("", web::get().to(product_handlers::list_products_handler))
            .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
            .route("/{product_id}", web::put().to(product_handlers::update_product_handler))
            .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler)),
        ),
    )
    .route("/uploads/{filename}", web::get().to(upload_handlers::serve_upload_handler));
}
