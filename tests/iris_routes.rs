mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use common::{get_text, iris_app, post_form};
use entity::user_account;
use iris_paralympics::error::ServerError;

#[tokio::test]
async fn index_renders_form() {
    let app = iris_app().await;
    let (status, html) = get_text(&app.router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Iris Home</title>"));
    assert!(html.contains("name=\"sepal_length\""));
}

#[tokio::test]
async fn prediction_when_form_submitted() {
    let app = iris_app().await;
    let (status, html) = post_form(
        &app.router,
        "/",
        "sepal_length=5.0&sepal_width=3.3&petal_length=1.4&petal_width=0.2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Predicted Iris type: iris-setosa"));
}

#[tokio::test]
async fn non_positive_measurement_redisplays_form() {
    let app = iris_app().await;
    let (status, html) = post_form(
        &app.router,
        "/",
        "sepal_length=0&sepal_width=3.3&petal_length=1.4&petal_width=0.2",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("Must be a positive number."));
    assert!(!html.contains("Predicted Iris type"));
}

#[tokio::test]
async fn non_numeric_measurement_is_bad_request() {
    let app = iris_app().await;
    let (status, body) = post_form(
        &app.router,
        "/",
        "sepal_length=abc&sepal_width=3.3&petal_length=1.4&petal_width=0.2",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn predict_endpoint_returns_label() {
    let app = iris_app().await;
    let (status, label) = get_text(
        &app.router,
        "/predict?sep-len=7.0&sep-wid=3.2&pet-len=4.7&pet-wid=1.4",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(label, "iris-versicolor");

    let (status, _) = get_text(&app.router, "/predict?sep-len=7.0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn iris_page_contains_table() {
    let app = iris_app().await;
    let (status, html) = get_text(&app.router, "/iris").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<table>"));
    assert!(html.contains("</table>"));
    assert!(html.contains("iris-virginica"));
}

#[tokio::test]
async fn new_user_created_when_form_submitted() {
    let app = iris_app().await;
    let (status, html) = get_text(&app.router, "/register").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("name=\"email\""));

    let (status, html) = post_form(
        &app.router,
        "/register",
        "email=joshuany%40jamble.com&password=birthday",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("You are registered!"));
    assert!(html.contains("joshuany@jamble.com"));

    let user = user_account::Entity::find()
        .filter(user_account::Column::Email.eq("joshuany@jamble.com"))
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(user.password, "birthday");

    // the same email a second time conflicts
    let (status, _) = post_form(
        &app.router,
        "/register",
        "email=joshuany%40jamble.com&password=another",
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_email_is_rejected_before_persistence() {
    let app = iris_app().await;
    let (status, html) = post_form(&app.router, "/register", "email=james&password=secret").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("Must be a valid email address."));

    let users = user_account::Entity::find().count(&app.db).await.unwrap();
    assert_eq!(users, 0);
}

#[tokio::test]
async fn missing_email_field_is_bad_request() {
    let app = iris_app().await;
    let (status, _) = post_form(&app.router, "/register", "username=james&password=secret").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let users = user_account::Entity::find().count(&app.db).await.unwrap();
    assert_eq!(users, 0);
}

#[tokio::test]
async fn overlong_password_redisplays_form_with_length_message() {
    let app = iris_app().await;
    let form = format!("email=joshuany%40jamble.com&password={}", "x".repeat(200));
    let (status, html) = post_form(&app.router, "/register", &form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("Must be at most 128 characters."));
    assert!(!html.contains("This field is required."));

    let users = user_account::Entity::find().count(&app.db).await.unwrap();
    assert_eq!(users, 0);
}

#[tokio::test]
async fn duplicate_email_insert_is_a_conflict() {
    let app = iris_app().await;
    let user = |password: &str| user_account::ActiveModel {
        email: Set("joshuany@jamble.com".to_owned()),
        password: Set(password.to_owned()),
        ..Default::default()
    };
    user("first").insert(&app.db).await.unwrap();

    // a concurrent registration that slipped past the lookup
    let err = user("second").insert(&app.db).await.unwrap_err();
    let err = ServerError::conflict_on_duplicate(err, "A user with this email already exists.");
    assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
}
