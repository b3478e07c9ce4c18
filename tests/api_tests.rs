use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use parking_reservation::config::EnvironmentConfig;
use parking_reservation::repositories::MemoryParkingRepository;
use parking_reservation::routes::create_app;
use parking_reservation::state::AppState;

// Función helper para crear la app de test
fn create_test_app() -> axum::Router {
    let state = AppState::new(
        Arc::new(MemoryParkingRepository::new()),
        EnvironmentConfig::default(),
    );
    create_app(state)
}

/// Enviar un request y devolver (status, cuerpo JSON)
async fn send(app: &axum::Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn booking_body() -> Value {
    json!({
        "spot_id": 1,
        "name": "Bob",
        "car_number": "XYZ123",
        "start_time": "2024-01-01T10:00:00Z",
        "duration": 60
    })
}

async fn create_spot(app: &axum::Router, spot_number: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/parking-spots",
        Some(json!({ "spot_number": spot_number })),
    )
    .await
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_create_then_list_spot() {
    let app = create_test_app();

    let (status, body) = create_spot(&app, "A1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Parking spot created successfully");
    assert_eq!(body["data"]["id"], 1);

    let (status, body) = send(&app, Method::GET, "/parking-spots", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "id": 1, "spot_number": "A1", "is_occupied": false }])
    );
}

#[tokio::test]
async fn test_create_spot_validation() {
    let app = create_test_app();

    let (status, body) = create_spot(&app, "   ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::POST, "/parking-spots", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid input");

    let (status, _) = send(&app, Method::GET, "/parking-spots", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_spot_number_length_limit() {
    let app = create_test_app();

    let (status, body) = create_spot(&app, &"B".repeat(51)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = create_spot(&app, &"B".repeat(50)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/parking-spots/1",
        Some(json!({ "spot_number": "C".repeat(60) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, spots) = send(&app, Method::GET, "/parking-spots", None).await;
    assert_eq!(
        spots,
        json!([{ "id": 1, "spot_number": "B".repeat(50), "is_occupied": false }])
    );
}

#[tokio::test]
async fn test_duplicate_spot_number_is_rejected() {
    let app = create_test_app();
    create_spot(&app, "A1").await;

    let (status, body) = create_spot(&app, "A1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_book_and_double_book() {
    let app = create_test_app();
    let (status, _) = create_spot(&app, "A1").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/book-spot", Some(booking_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Parking spot reserved successfully");
    assert_eq!(body["data"]["start_time"], "2024-01-01 10:00:00");

    let (_, spots) = send(&app, Method::GET, "/parking-spots", None).await;
    assert_eq!(spots[0]["is_occupied"], true);

    let (status, body) = send(&app, Method::POST, "/book-spot", Some(booking_body())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Parking spot is already occupied");
    assert_eq!(body["code"], "CONFLICT");

    let (_, reservations) = send(&app, Method::GET, "/reservations", None).await;
    assert_eq!(reservations.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_book_unknown_spot() {
    let app = create_test_app();

    let (status, body) = send(&app, Method::POST, "/book-spot", Some(booking_body())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_book_with_malformed_start_time() {
    let app = create_test_app();
    create_spot(&app, "A1").await;

    let mut body = booking_body();
    body["start_time"] = json!("01/01/2024 10:00");
    let (status, body) = send(&app, Method::POST, "/book-spot", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid start_time format");

    let (_, spots) = send(&app, Method::GET, "/parking-spots", None).await;
    assert_eq!(spots[0]["is_occupied"], false);
}

#[tokio::test]
async fn test_book_field_length_limits() {
    let app = create_test_app();
    create_spot(&app, "A1").await;

    let mut body = booking_body();
    body["car_number"] = json!("X".repeat(60));
    let (status, body) = send(&app, Method::POST, "/book-spot", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let mut body = booking_body();
    body["car_number"] = json!("");
    let (status, _) = send(&app, Method::POST, "/book-spot", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = booking_body();
    body["name"] = json!("N".repeat(256));
    let (status, body) = send(&app, Method::POST, "/book-spot", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, spots) = send(&app, Method::GET, "/parking-spots", None).await;
    assert_eq!(spots[0]["is_occupied"], false);
    let (_, reservations) = send(&app, Method::GET, "/reservations", None).await;
    assert_eq!(reservations, json!([]));

    let mut body = booking_body();
    body["name"] = json!("N".repeat(255));
    body["car_number"] = json!("X".repeat(50));
    let (status, _) = send(&app, Method::POST, "/book-spot", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_reservations_normalizes_start_time() {
    let app = create_test_app();
    create_spot(&app, "A1").await;

    let mut body = booking_body();
    body["start_time"] = json!("2024-06-15T18:45:30+02:00");
    send(&app, Method::POST, "/book-spot", Some(body)).await;

    let (status, reservations) = send(&app, Method::GET, "/reservations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        reservations,
        json!([{
            "id": 1,
            "name": "Bob",
            "car_number": "XYZ123",
            "spot_id": 1,
            "start_time": "2024-06-15 18:45:30",
            "duration": 60
        }])
    );
}

#[tokio::test]
async fn test_delete_reservation_frees_spot() {
    let app = create_test_app();
    create_spot(&app, "A1").await;
    send(&app, Method::POST, "/book-spot", Some(booking_body())).await;

    let (status, body) = send(&app, Method::DELETE, "/reservation/delete/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Reservation deleted successfully");

    let (_, spots) = send(&app, Method::GET, "/parking-spots", None).await;
    assert_eq!(spots[0]["is_occupied"], false);

    let (status, _) = send(&app, Method::DELETE, "/reservation/delete/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_reservation() {
    let app = create_test_app();
    create_spot(&app, "A1").await;
    create_spot(&app, "A2").await;
    send(&app, Method::POST, "/book-spot", Some(booking_body())).await;

    let edit = json!({
        "id": 1,
        "spot_id": 2,
        "name": "Alice",
        "car_number": "ABC987",
        "start_time": "2024-01-02T09:15:00Z",
        "duration": 120
    });
    let (status, body) = send(&app, Method::PUT, "/reservation/edit", Some(edit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Reservation updated successfully");
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["start_time"], "2024-01-02 09:15:00");

    let (_, spots) = send(&app, Method::GET, "/parking-spots", None).await;
    assert_eq!(spots[0]["is_occupied"], false);
    assert_eq!(spots[1]["is_occupied"], true);

    let missing = json!({
        "id": 99,
        "spot_id": 2,
        "name": "Alice",
        "car_number": "ABC987",
        "start_time": "2024-01-02T09:15:00Z",
        "duration": 120
    });
    let (status, _) = send(&app, Method::PUT, "/reservation/edit", Some(missing)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_reservation_rejects_bad_input_without_changes() {
    let app = create_test_app();
    create_spot(&app, "A1").await;
    create_spot(&app, "A2").await;
    send(&app, Method::POST, "/book-spot", Some(booking_body())).await;
    let (_, before) = send(&app, Method::GET, "/reservations", None).await;

    let edit = json!({
        "id": 1,
        "spot_id": 2,
        "name": "Alice",
        "car_number": "ABC987",
        "start_time": "02/01/2024 09:15",
        "duration": 120
    });
    let (status, body) = send(&app, Method::PUT, "/reservation/edit", Some(edit)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid start_time format");

    let edit = json!({
        "id": 1,
        "spot_id": 2,
        "name": "Alice",
        "car_number": "X".repeat(60),
        "start_time": "2024-01-02T09:15:00Z",
        "duration": 120
    });
    let (status, body) = send(&app, Method::PUT, "/reservation/edit", Some(edit)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let edit = json!({
        "id": 1,
        "spot_id": 99,
        "name": "Alice",
        "car_number": "ABC987",
        "start_time": "2024-01-02T09:15:00Z",
        "duration": 120
    });
    let (status, _) = send(&app, Method::PUT, "/reservation/edit", Some(edit)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, after) = send(&app, Method::GET, "/reservations", None).await;
    assert_eq!(after, before);
    let (_, spots) = send(&app, Method::GET, "/parking-spots", None).await;
    assert_eq!(spots[0]["is_occupied"], true);
    assert_eq!(spots[1]["is_occupied"], false);
}

#[tokio::test]
async fn test_edit_spot() {
    let app = create_test_app();
    create_spot(&app, "A1").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/parking-spots/1",
        Some(json!({ "spot_number": "B2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["spot_number"], "B2");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/parking-spots/1",
        Some(json!({ "spot_number": "B2", "is_occupied": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CONFLICT");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/parking-spots/9",
        Some(json!({ "spot_number": "C3" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/parking-spots/abc",
        Some(json!({ "spot_number": "C3" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid id");
}

#[tokio::test]
async fn test_delete_spot() {
    let app = create_test_app();
    create_spot(&app, "A1").await;
    send(&app, Method::POST, "/book-spot", Some(booking_body())).await;

    let (status, _) = send(&app, Method::DELETE, "/parking-spots/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(&app, Method::DELETE, "/reservation/delete/1", None).await;
    let (status, body) = send(&app, Method::DELETE, "/parking-spots/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Parking spot deleted successfully");

    let (status, _) = send(&app, Method::DELETE, "/parking-spots/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, spots) = send(&app, Method::GET, "/parking-spots", None).await;
    assert_eq!(spots, json!([]));
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/parking-spots")
                .header("origin", "http://frontend.test")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
