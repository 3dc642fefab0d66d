// service/tests/item_routes_tests.rs
#[macro_use]
mod common;
use common::*;

use actix_web::http::header::{CONTENT_TYPE, LOCATION};
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

// Creates a cart through the API and yields its id.
macro_rules! create_cart {
  ($app:expr, $name:expr) => {{
    let req = test::TestRequest::post()
      .uri("/shopcarts")
      .set_json(json!({ "name": $name }))
      .to_request();
    let created: Value = test::call_and_read_body_json($app, req).await;
    created["id"].as_i64().unwrap()
  }};
}

#[actix_web::test]
async fn test_add_item() {
  setup_tracing();
  let (_, state) = memory_state();
  let app = init_app!(state);
  let cart_id = create_cart!(&app, "Alice");

  let req = test::TestRequest::post()
    .uri(&format!("/shopcarts/{}/items", cart_id))
    .set_json(item_body(" Pen ", json!(1), json!(1.5)))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let location = resp.headers().get(LOCATION).unwrap().to_str().unwrap().to_string();

  let item: Value = test::read_body_json(resp).await;
  let item_id = item["id"].as_i64().unwrap();
  assert_eq!(item["shopcart_id"], cart_id);
  assert_eq!(item["name"], "Pen");
  assert_eq!(item["quantity"], 1);
  assert_eq!(item["price"], 1.5);
  assert!(location.ends_with(&format!("/shopcarts/{}/items/{}", cart_id, item_id)));

  let req = test::TestRequest::get().uri(&format!("/shopcarts/{}", cart_id)).to_request();
  let cart: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(cart["items"], json!([item]));
}

#[actix_web::test]
async fn test_add_item_without_shopcart_id() {
  setup_tracing();
  let (_, state) = memory_state();
  let app = init_app!(state);
  let cart_id = create_cart!(&app, "Alice");
  let uri = format!("/shopcarts/{}/items", cart_id);

  let bodies = [
    json!({"name": "Pen", "quantity": 1, "price": 1.5}),
    json!({"shopcart_id": null, "name": "Pen", "quantity": 1, "price": 1.5}),
    json!({"shopcart_id": 999, "name": "Pen", "quantity": 1, "price": 1.5}),
  ];
  for body in bodies {
    let req = test::TestRequest::post().uri(&uri).set_json(&body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "body {}", body);
    let item: Value = test::read_body_json(resp).await;
    assert_eq!(item["shopcart_id"], cart_id);
  }

  let req = test::TestRequest::get().uri(&uri).to_request();
  let items: Vec<Value> = test::call_and_read_body_json(&app, req).await;
  assert_eq!(items.len(), 3);
}

#[actix_web::test]
async fn test_update_item_without_shopcart_id_keeps_owner() {
  setup_tracing();
  let (_, state) = memory_state();
  let app = init_app!(state);
  let cart_id = create_cart!(&app, "Alice");

  let req = test::TestRequest::post()
    .uri(&format!("/shopcarts/{}/items", cart_id))
    .set_json(json!({"name": "Pen", "quantity": 1, "price": 1.5}))
    .to_request();
  let item: Value = test::call_and_read_body_json(&app, req).await;

  let req = test::TestRequest::put()
    .uri(&format!("/shopcarts/{}/items/{}", cart_id, item["id"]))
    .set_json(json!({"shopcart_id": null, "name": "Pen", "quantity": 2, "price": 1.5}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let updated: Value = test::read_body_json(resp).await;
  assert_eq!(updated["shopcart_id"], cart_id);
  assert_eq!(updated["quantity"], 2);
}

#[actix_web::test]
async fn test_add_item_quantity_and_price_rules() {
  setup_tracing();
  let (_, state) = memory_state();
  let app = init_app!(state);
  let cart_id = create_cart!(&app, "Alice");
  let uri = format!("/shopcarts/{}/items", cart_id);

  let rejected = [
    item_body("Pen", json!(2), json!(1.0)),
    item_body("Pen", json!(0), json!(1.0)),
    item_body("Pen", json!(1.2), json!(1.0)),
    item_body("Pen", json!(1), json!(-0.5)),
    item_body("Pen", json!(1), json!("free")),
    item_body("", json!(1), json!(1.0)),
    json!({}),
  ];
  for payload in rejected {
    let req = test::TestRequest::post().uri(&uri).set_json(&payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {}", payload);
  }

  for payload in [
    item_body("Pen", json!(1), json!(0.0)),
    item_body("Pen", json!(1.0), json!(3)),
  ] {
    let req = test::TestRequest::post().uri(&uri).set_json(&payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "payload {}", payload);
  }

  let req = test::TestRequest::get().uri(&uri).to_request();
  let items: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(items.as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_add_item_to_missing_cart_or_wrong_content_type() {
  setup_tracing();
  let (_, state) = memory_state();
  let app = init_app!(state);

  let req = test::TestRequest::post()
    .uri("/shopcarts/42/items")
    .set_json(item_body("Pen", json!(1), json!(1.0)))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

  let cart_id = create_cart!(&app, "Alice");
  let req = test::TestRequest::post()
    .uri(&format!("/shopcarts/{}/items", cart_id))
    .insert_header((CONTENT_TYPE, "application/xml"))
    .set_payload(item_body("Pen", json!(1), json!(1.0)).to_string())
    .to_request();
  assert_eq!(
    test::call_service(&app, req).await.status(),
    StatusCode::UNSUPPORTED_MEDIA_TYPE
  );
}

#[actix_web::test]
async fn test_list_items_and_filter_by_name() {
  setup_tracing();
  let (_, state) = memory_state();
  let app = init_app!(state);
  let cart_id = create_cart!(&app, "Alice");

  let req = test::TestRequest::get().uri(&format!("/shopcarts/{}/items", cart_id)).to_request();
  let empty: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(empty, json!([]));

  for name in ["Air Pods", "iPhone SE", "Air Pods"] {
    let req = test::TestRequest::post()
      .uri(&format!("/shopcarts/{}/items", cart_id))
      .set_json(item_body(name, json!(1), json!(99.0)))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
  }

  let req = test::TestRequest::get().uri(&format!("/shopcarts/{}/items", cart_id)).to_request();
  let all: Value = test::call_and_read_body_json(&app, req).await;
  let names: Vec<&str> = all.as_array().unwrap().iter().map(|i| i["name"].as_str().unwrap()).collect();
  assert_eq!(names, vec!["Air Pods", "iPhone SE", "Air Pods"]);

  let req = test::TestRequest::get()
    .uri(&format!("/shopcarts/{}/items?name=Air%20Pods", cart_id))
    .to_request();
  let filtered: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(filtered.as_array().unwrap().len(), 2);

  let req = test::TestRequest::get().uri("/shopcarts/777/items").to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_get_item_checks_ownership() {
  setup_tracing();
  let (_, state) = memory_state();
  let app = init_app!(state);
  let alice = create_cart!(&app, "Alice");
  let bob = create_cart!(&app, "Bob");

  let req = test::TestRequest::post()
    .uri(&format!("/shopcarts/{}/items", alice))
    .set_json(item_body("Pen", json!(1), json!(1.0)))
    .to_request();
  let item: Value = test::call_and_read_body_json(&app, req).await;
  let item_id = item["id"].as_i64().unwrap();

  let req = test::TestRequest::get()
    .uri(&format!("/shopcarts/{}/items/{}", alice, item_id))
    .to_request();
  let fetched: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(fetched, item);

  for uri in [
    format!("/shopcarts/{}/items/{}", bob, item_id),
    format!("/shopcarts/{}/items/{}", alice, item_id + 100),
    format!("/shopcarts/{}/items/{}", 999, item_id),
  ] {
    let req = test::TestRequest::get().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND, "{}", uri);
  }
}

#[actix_web::test]
async fn test_update_item_rules() {
  setup_tracing();
  let (_, state) = memory_state();
  let app = init_app!(state);
  let cart_id = create_cart!(&app, "Alice");

  let req = test::TestRequest::post()
    .uri(&format!("/shopcarts/{}/items", cart_id))
    .set_json(item_body("Pen", json!(1), json!(1.0)))
    .to_request();
  let item: Value = test::call_and_read_body_json(&app, req).await;
  let uri = format!("/shopcarts/{}/items/{}", cart_id, item["id"]);

  let update = |quantity: Value, price: Value| {
    json!({"shopcart_id": cart_id, "name": "Pen", "quantity": quantity, "price": price})
  };

  for payload in [update(json!(0), json!(1.0)), update(json!(2), json!(-1.0)), update(json!(1.2), json!(1.0))] {
    let req = test::TestRequest::put().uri(&uri).set_json(&payload).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST, "{}", payload);
  }

  for quantity in [1, 5] {
    let req = test::TestRequest::put().uri(&uri).set_json(update(json!(quantity), json!(0))).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["quantity"], quantity);
    assert_eq!(body["id"], item["id"]);
  }

  let req = test::TestRequest::put()
    .uri(&format!("/shopcarts/{}/items/9999", cart_id))
    .set_json(update(json!(1), json!(1.0)))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_item_can_move_to_existing_cart_only() {
  setup_tracing();
  let (_, state) = memory_state();
  let app = init_app!(state);
  let from = create_cart!(&app, "From");
  let to = create_cart!(&app, "To");

  let req = test::TestRequest::post()
    .uri(&format!("/shopcarts/{}/items", from))
    .set_json(item_body("Pen", json!(1), json!(1.0)))
    .to_request();
  let item: Value = test::call_and_read_body_json(&app, req).await;
  let uri = format!("/shopcarts/{}/items/{}", from, item["id"]);

  let req = test::TestRequest::put()
    .uri(&uri)
    .set_json(json!({"shopcart_id": 5000, "name": "Pen", "quantity": 1, "price": 1.0}))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

  let req = test::TestRequest::put()
    .uri(&uri)
    .set_json(json!({"shopcart_id": to, "name": "Pen", "quantity": 1, "price": 1.0}))
    .to_request();
  let moved: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(moved["shopcart_id"], to);

  let req = test::TestRequest::get().uri(&format!("/shopcarts/{}/items", to)).to_request();
  let items: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(items.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_delete_item_is_idempotent() {
  setup_tracing();
  let (_, state) = memory_state();
  let app = init_app!(state);
  let cart_id = create_cart!(&app, "Alice");

  let req = test::TestRequest::post()
    .uri(&format!("/shopcarts/{}/items", cart_id))
    .set_json(item_body("Pen", json!(1), json!(1.0)))
    .to_request();
  let item: Value = test::call_and_read_body_json(&app, req).await;
  let uri = format!("/shopcarts/{}/items/{}", cart_id, item["id"]);

  for _ in 0..2 {
    let req = test::TestRequest::delete().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
  }
  let req = test::TestRequest::get().uri(&uri).to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

  let req = test::TestRequest::delete().uri("/shopcarts/123/items/456").to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn test_shopcart_lifecycle_scenario() {
  setup_tracing();
  let (_, state) = memory_state();
  let app = init_app!(state);

  // Create the cart.
  let req = test::TestRequest::post()
    .uri("/shopcarts")
    .set_json(json!({"name": "Alice"}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let cart: Value = test::read_body_json(resp).await;
  let cart_id = cart["id"].as_i64().unwrap();
  assert_eq!(cart["items"], json!([]));

  // Add one pen.
  let req = test::TestRequest::post()
    .uri(&format!("/shopcarts/{}/items", cart_id))
    .set_json(json!({"name": "Pen", "quantity": 1, "price": 1.5}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let item: Value = test::read_body_json(resp).await;
  assert_eq!(item["shopcart_id"], cart_id);

  // Buy three instead.
  let req = test::TestRequest::put()
    .uri(&format!("/shopcarts/{}/items/{}", cart_id, item["id"]))
    .set_json(json!({"quantity": 3, "price": 3.0, "name": "Pen"}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let updated: Value = test::read_body_json(resp).await;
  assert_eq!(updated["shopcart_id"], cart_id);
  assert_eq!(updated["quantity"], 3);
  assert_eq!(updated["price"], 3.0);

  // Empty the cart; it stays around.
  let req = test::TestRequest::put().uri(&format!("/shopcarts/{}/clear", cart_id)).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let cleared: Value = test::read_body_json(resp).await;
  assert_eq!(cleared["items"], json!([]));
  let req = test::TestRequest::get().uri(&format!("/shopcarts/{}", cart_id)).to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

  // Delete it.
  let req = test::TestRequest::delete().uri(&format!("/shopcarts/{}", cart_id)).to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
  let req = test::TestRequest::get().uri(&format!("/shopcarts/{}", cart_id)).to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}
