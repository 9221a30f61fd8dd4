//! End-to-end HTTP scenario over the in-memory repository.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};
use user_service::Trace;
use user_service::domain::{UserService, slugify};
use user_service::inbound::http::state::HttpState;
use user_service::inbound::http::users::user_scope;
use user_service::outbound::memory::InMemoryUserRepository;

fn state() -> web::Data<HttpState> {
    let service = UserService::new(Arc::new(InMemoryUserRepository::default()));
    web::Data::new(HttpState::from_service(Arc::new(service)))
}

#[rstest]
#[actix_web::test]
async fn create_list_update_delete_scenario() {
    let app = test::init_service(
        App::new()
            .wrap(Trace)
            .app_data(state())
            .service(user_scope()),
    )
    .await;

    let create = test::TestRequest::post()
        .uri("/user/create")
        .set_json(json!({"username": "jane_doe", "firstname": "Jane", "lastname": "Doe", "age": 30}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, create).await;
    assert_eq!(created["slug"], json!(slugify("jane_doe")));
    assert_eq!(created["slug"], json!("jane-doe"));
    let id = created["id"].as_i64().expect("numeric id");

    let list = test::TestRequest::get().uri("/user/").to_request();
    let users: Vec<Value> = test::call_and_read_body_json(&app, list).await;
    assert_eq!(users, vec![created.clone()]);

    let update = test::TestRequest::put()
        .uri(&format!("/user/update?user_id={id}"))
        .set_json(json!({"age": 31}))
        .to_request();
    let ack: Value = test::call_and_read_body_json(&app, update).await;
    assert_eq!(
        ack,
        json!({"statusCode": 200, "transaction": "User update is successful!"})
    );

    let get = test::TestRequest::get()
        .uri(&format!("/user/{id}"))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, get).await;
    assert_eq!(fetched["age"], json!(31));
    assert_eq!(fetched["slug"], json!("jane-doe"));

    let rename = test::TestRequest::put()
        .uri(&format!("/user/update?user_id={id}"))
        .set_json(json!({"username": "Jane Smith"}))
        .to_request();
    assert_eq!(test::call_service(&app, rename).await.status(), StatusCode::OK);
    let get = test::TestRequest::get()
        .uri(&format!("/user/{id}"))
        .to_request();
    let renamed: Value = test::call_and_read_body_json(&app, get).await;
    assert_eq!(renamed["username"], json!("Jane Smith"));
    assert_eq!(renamed["slug"], json!("jane-doe"));

    let empty = test::TestRequest::put()
        .uri(&format!("/user/update?user_id={id}"))
        .set_json(json!({}))
        .to_request();
    assert_eq!(test::call_service(&app, empty).await.status(), StatusCode::OK);

    let delete = test::TestRequest::delete()
        .uri(&format!("/user/delete?user_id={id}"))
        .to_request();
    let ack: Value = test::call_and_read_body_json(&app, delete).await;
    assert_eq!(
        ack,
        json!({"statusCode": 200, "transaction": "User deletion is successful!"})
    );

    let get = test::TestRequest::get()
        .uri(&format!("/user/{id}"))
        .to_request();
    let response = test::call_service(&app, get).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], json!("not_found"));
    assert_eq!(body["message"], json!("User was not found"));
    assert!(body["traceId"].is_string());
}

#[rstest]
#[actix_web::test]
async fn every_response_carries_a_trace_id() {
    let app = test::init_service(
        App::new()
            .wrap(Trace)
            .app_data(state())
            .service(user_scope()),
    )
    .await;

    for request in [
        test::TestRequest::get().uri("/user/").to_request(),
        test::TestRequest::get().uri("/user/1").to_request(),
        test::TestRequest::delete().uri("/user/delete?user_id=x").to_request(),
    ] {
        let response = test::call_service(&app, request).await;
        assert!(response.headers().contains_key("trace-id"));
    }
}
