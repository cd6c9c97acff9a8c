mod common;

use auth::Claims;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

async fn create_notice(app: &TestApp, token: &str, title: &str) -> serde_json::Value {
    let response = app
        .post_authenticated("/api/notices", token)
        .json(&json!({
            "title": title,
            "content": format!("Body of {}", title)
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

async fn list_notices(app: &TestApp, token: &str) -> serde_json::Value {
    let response = app
        .get_authenticated("/api/notices", token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_create_notice_with_defaults() {
    let app = TestApp::spawn().await;
    let token = app
        .register_for_token("Grace Hopper", "grace@school.edu", "pass_word!", "TEACHER")
        .await;

    let body = create_notice(&app, &token, "Exam schedule").await;

    assert_eq!(body["data"]["title"], "Exam schedule");
    assert_eq!(body["data"]["priority"], "MEDIUM");
    assert!(body["data"]["expires_at"].is_null());
    assert_eq!(body["data"]["author"]["name"], "Grace Hopper");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
}

#[tokio::test]
async fn test_create_notice_with_priority_and_expiry() {
    let app = TestApp::spawn().await;
    let token = app
        .register_for_token("Grace Hopper", "grace@school.edu", "pass_word!", "TEACHER")
        .await;

    let response = app
        .post_authenticated("/api/notices", &token)
        .json(&json!({
            "title": "Fire drill",
            "content": "Assemble in the yard at noon.",
            "priority": "high",
            "expires_at": "2027-06-30T12:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["priority"], "HIGH");
    assert!(body["data"]["expires_at"].as_str().unwrap().starts_with("2027-06-30"));
}

#[tokio::test]
async fn test_create_notice_rejects_blank_title_and_content() {
    let app = TestApp::spawn().await;
    let token = app
        .register_for_token("Grace Hopper", "grace@school.edu", "pass_word!", "TEACHER")
        .await;

    for payload in [
        json!({"title": "  ", "content": "Body"}),
        json!({"title": "Title", "content": ""}),
    ] {
        let response = app
            .post_authenticated("/api/notices", &token)
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // Nothing slipped through
    let listed = list_notices(&app, &token).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_student_cannot_create_notice() {
    let app = TestApp::spawn().await;
    let student_token = app
        .register_for_token("Sam Student", "sam@school.edu", "pass_word!", "STUDENT")
        .await;

    let response = app
        .post_authenticated("/api/notices", &student_token)
        .json(&json!({
            "title": "Skip classes",
            "content": "Please?"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // No record was created
    let listed = list_notices(&app, &student_token).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_newest_first_and_stable() {
    let app = TestApp::spawn().await;
    let token = app
        .register_for_token("Grace Hopper", "grace@school.edu", "pass_word!", "TEACHER")
        .await;

    create_notice(&app, &token, "First").await;
    create_notice(&app, &token, "Second").await;
    create_notice(&app, &token, "Third").await;

    let first_listing = list_notices(&app, &token).await;
    let titles: Vec<&str> = first_listing["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);

    // Identical ordered results when nothing changed in between
    let second_listing = list_notices(&app, &token).await;
    assert_eq!(first_listing["data"], second_listing["data"]);
}

#[tokio::test]
async fn test_teacher_deletes_only_own_notices() {
    let app = TestApp::spawn().await;
    let author_token = app
        .register_for_token("Grace Hopper", "grace@school.edu", "pass_word!", "TEACHER")
        .await;
    let other_token = app
        .register_for_token("Alan Turing", "alan@school.edu", "pass_word!", "TEACHER")
        .await;

    let created = create_notice(&app, &author_token, "Mine").await;
    let notice_id = created["data"]["id"].as_str().unwrap();

    // Another teacher cannot delete it
    let response = app
        .delete_authenticated(&format!("/api/notices/{}", notice_id), &other_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["message"],
        "Not authorized to delete this notice"
    );

    // Still listed
    let listed = list_notices(&app, &other_token).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    // The author can delete it
    let response = app
        .delete_authenticated(&format!("/api/notices/{}", notice_id), &author_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let listed = list_notices(&app, &author_token).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_admin_deletes_any_notice() {
    let app = TestApp::spawn().await;
    let teacher_token = app
        .register_for_token("Grace Hopper", "grace@school.edu", "pass_word!", "TEACHER")
        .await;
    let admin_token = app.admin_token().await;

    let created = create_notice(&app, &teacher_token, "Teacher's notice").await;
    let notice_id = created["data"]["id"].as_str().unwrap();

    let response = app
        .delete_authenticated(&format!("/api/notices/{}", notice_id), &admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let listed = list_notices(&app, &admin_token).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_delete_missing_notice() {
    let app = TestApp::spawn().await;
    let token = app
        .register_for_token("Grace Hopper", "grace@school.edu", "pass_word!", "TEACHER")
        .await;

    let response = app
        .delete_authenticated(
            "/api/notices/00000000-0000-4000-8000-000000000000",
            &token,
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Notice not found");
}

#[tokio::test]
async fn test_missing_and_invalid_tokens() {
    let app = TestApp::spawn().await;

    // Absent header
    let response = app
        .get("/api/notices")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Access denied. No token provided.");

    // Garbage token
    let response = app
        .get_authenticated("/api/notices", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid token.");

    // Properly signed but expired token
    let mut claims = Claims::for_user(
        "00000000-0000-4000-8000-000000000000",
        "ghost@school.edu",
        "TEACHER",
        24,
    );
    claims.iat -= 48 * 60 * 60;
    claims.exp = claims.iat + 60 * 60;
    let expired_token = app.jwt_handler.encode(&claims).expect("encode");

    let response = app
        .get_authenticated("/api/notices", &expired_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// End to end: a teacher posts, a student reads but cannot delete.
#[tokio::test]
async fn test_student_sees_but_cannot_delete() {
    let app = TestApp::spawn().await;

    let teacher_token = app
        .register_for_token("Grace Hopper", "t@x.edu", "pw1", "TEACHER")
        .await;
    let created = create_notice(&app, &teacher_token, "Exam schedule").await;
    let notice_id = created["data"]["id"].as_str().unwrap();

    app.register_for_token("Sam Student", "sam@school.edu", "pw2", "STUDENT")
        .await;
    let response = app
        .post("/api/auth/login")
        .json(&json!({"email": "sam@school.edu", "password": "pw2"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let login_body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let student_token = login_body["data"]["token"].as_str().unwrap().to_string();

    // Student sees the notice with the author's name
    let listed = list_notices(&app, &student_token).await;
    let notices = listed["data"].as_array().unwrap();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0]["id"].as_str().unwrap(), notice_id);
    assert_eq!(notices[0]["author"]["name"], "Grace Hopper");

    // ...but cannot delete it
    let response = app
        .delete_authenticated(&format!("/api/notices/{}", notice_id), &student_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The notice survived
    let listed = list_notices(&app, &student_token).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}
