// service/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{index_handlers, item_handlers, shopcart_handlers};

// This function will be called in `main.rs` (and by the route tests) to
// configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/", web::get().to(index_handlers::index_handler))
    .route("/health", web::get().to(index_handlers::health_check_handler))
    // Shopcart collection
    .service(
      web::resource("/shopcarts")
        .name("shopcarts")
        .route(web::get().to(shopcart_handlers::list_shopcarts_handler))
        .route(web::post().to(shopcart_handlers::create_shopcart_handler))
        .default_service(web::to(index_handlers::method_not_allowed_handler)),
    )
    .service(
      web::resource("/shopcarts/{shopcart_id}")
        .name("shopcart")
        .route(web::get().to(shopcart_handlers::get_shopcart_handler))
        .route(web::put().to(shopcart_handlers::update_shopcart_handler))
        .route(web::delete().to(shopcart_handlers::delete_shopcart_handler))
        .default_service(web::to(index_handlers::method_not_allowed_handler)),
    )
    .service(
      web::resource("/shopcarts/{shopcart_id}/clear")
        .route(web::put().to(shopcart_handlers::clear_shopcart_handler))
        .default_service(web::to(index_handlers::method_not_allowed_handler)),
    )
    // Items of one shopcart
    .service(
      web::resource("/shopcarts/{shopcart_id}/items")
        .name("items")
        .route(web::get().to(item_handlers::list_items_handler))
        .route(web::post().to(item_handlers::create_item_handler))
        .default_service(web::to(index_handlers::method_not_allowed_handler)),
    )
    .service(
      web::resource("/shopcarts/{shopcart_id}/items/{item_id}")
        .name("item")
        .route(web::get().to(item_handlers::get_item_handler))
        .route(web::put().to(item_handlers::update_item_handler))
        .route(web::delete().to(item_handlers::delete_item_handler))
        .default_service(web::to(index_handlers::method_not_allowed_handler)),
    )
    .default_service(web::to(index_handlers::not_found_handler));
}
