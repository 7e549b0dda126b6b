use actix_web::{App, HttpServer, test, web};
use serde_json::{Value, json};
use std::net::TcpListener;
use std::sync::Arc;

use invoicer::{
  adapters::http::{
    InvoiceUseCases, RequestIdMiddleware, TemplateEngine, configure_invoice_routes,
    configure_web_routes,
  },
  infrastructure::{
    backend::BackendClient, config::BackendConfig,
    persistence::memory::InMemoryInvoiceRepository,
  },
};

/// Starts the invoice API on an ephemeral port and returns its base URL
fn spawn_api() -> String {
  let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
  let port = listener.local_addr().unwrap().port();

  let use_cases = InvoiceUseCases::from_repository(Arc::new(InMemoryInvoiceRepository::new()));

  let server = HttpServer::new(move || {
    let use_cases = use_cases.clone();
    App::new()
      .wrap(RequestIdMiddleware::new())
      .service(web::scope("/invoices").configure(|cfg| configure_invoice_routes(cfg, use_cases)))
  })
  .workers(1)
  .listen(listener)
  .expect("Failed to listen")
  .run();

  actix_web::rt::spawn(server);
  format!("http://127.0.0.1:{}", port)
}

fn backend(base_url: String) -> BackendClient {
  BackendClient::new(BackendConfig {
    base_url,
    timeout_seconds: 5,
  })
  .expect("Failed to build backend client")
}

fn templates() -> TemplateEngine {
  TemplateEngine::new("templates/**/*.html.tera").expect("Failed to load templates")
}

macro_rules! init_web {
  ($backend:expr) => {
    test::init_service(App::new().wrap(RequestIdMiddleware::new()).configure(|cfg| {
      configure_web_routes(cfg, templates(), $backend, "./static")
    }))
    .await
  };
}

#[actix_web::test]
async fn test_proxy_round_trip() {
  let app = init_web!(backend(spawn_api()));

  // String amounts are coerced before reaching the API
  let req = test::TestRequest::post()
    .uri("/api/invoices")
    .set_json(json!({
      "customerName": "Acme",
      "invoiceNumber": "INV-1",
      "totalAmount": "150.25",
      "paymentStatus": "paid",
      "files": [{"fileName": "a.pdf", "filePath": "/files/a.pdf"}]
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 201);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["data"]["totalAmount"], 150.25);
  let id = body["data"]["id"].as_i64().unwrap();

  let req = test::TestRequest::post()
    .uri("/api/invoices")
    .set_json(json!({
      "customerName": "Globex",
      "invoiceNumber": "INV-2",
      "totalAmount": 10,
      "paymentStatus": "unpaid"
    }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), 201);

  // Blank parameters are dropped by the filter proxy
  let req = test::TestRequest::get()
    .uri("/api/invoices/filter?paymentStatus=paid&startDate=&endDate=")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 200);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["data"].as_array().unwrap().len(), 1);
  assert_eq!(body["data"][0]["id"], id);

  let req = test::TestRequest::patch()
    .uri(&format!("/api/invoices/{}", id))
    .set_json(json!({"files": []}))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert!(body["data"]["files"].as_array().unwrap().is_empty());

  let req = test::TestRequest::delete()
    .uri(&format!("/api/invoices/{}", id))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), 200);

  // Backend errors pass through unchanged
  let req = test::TestRequest::get()
    .uri(&format!("/api/invoices/{}", id))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 404);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "not_found");

  let req = test::TestRequest::get().uri("/api/invoices").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_dashboard_forms() {
  let app = init_web!(backend(spawn_api()));

  let req = test::TestRequest::post()
    .uri("/invoices")
    .set_form([
      ("customer_name", "Initech"),
      ("invoice_number", "INV-9"),
      ("total_amount", "99.90"),
      ("payment_status", "unpaid"),
      ("files", "report.pdf | /files/report.pdf"),
    ])
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 303);
  assert_eq!(resp.headers().get("location").unwrap(), "/");

  let req = test::TestRequest::get().uri("/").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 200);
  let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
  assert!(html.contains("Initech"));
  assert!(html.contains("href=\"&#x2F;files&#x2F;report.pdf\""));

  let req = test::TestRequest::get().uri("/api/invoices").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  let id = body["data"][0]["id"].as_i64().unwrap();

  let req = test::TestRequest::post()
    .uri(&format!("/invoices/{}/edit", id))
    .set_form([("payment_status", "paid"), ("customer_name", "")])
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), 303);

  let req = test::TestRequest::get()
    .uri(&format!("/api/invoices/{}", id))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["data"]["paymentStatus"], "paid");
  assert_eq!(body["data"]["customerName"], "Initech");
  assert_eq!(body["data"]["files"].as_array().unwrap().len(), 1);

  let req = test::TestRequest::get()
    .uri("/?paymentStatus=unpaid")
    .to_request();
  let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
  assert!(html.contains("No invoices yet"));

  let req = test::TestRequest::post()
    .uri(&format!("/invoices/{}/delete", id))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), 303);

  let req = test::TestRequest::get().uri("/api/invoices").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert!(body["data"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_dashboard_counters_ignore_active_filter() {
  let app = init_web!(backend(spawn_api()));

  for (number, status) in [("INV-1", "paid"), ("INV-2", "unpaid"), ("INV-3", "unpaid")] {
    let req = test::TestRequest::post()
      .uri("/api/invoices")
      .set_json(json!({
        "customerName": "Acme",
        "invoiceNumber": number,
        "totalAmount": 10,
        "paymentStatus": status
      }))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);
  }

  for uri in ["/", "/?paymentStatus=paid", "/?startDate=2000-01-01&endDate=2000-01-02"] {
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();

    assert!(html.contains("<p>Total Invoices</p><h2>3</h2>"), "{}", uri);
    assert!(html.contains("<p>Paid Invoices</p><h2>1</h2>"), "{}", uri);
    assert!(html.contains("<p>Unpaid Invoices</p><h2>2</h2>"), "{}", uri);
  }

  // The grid still follows the filter
  let req = test::TestRequest::get()
    .uri("/?paymentStatus=paid")
    .to_request();
  let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
  assert!(html.contains("INV-1"));
  assert!(!html.contains("INV-2"));
}

#[actix_web::test]
async fn test_unreachable_backend_is_bad_gateway() {
  let app = init_web!(backend("http://127.0.0.1:1".to_string()));

  let req = test::TestRequest::get().uri("/api/invoices").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 502);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "bad_gateway");

  let req = test::TestRequest::get().uri("/").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 502);
  let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
  assert!(html.contains("Could not load invoices"));
}
