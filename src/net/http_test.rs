use super::*;

#[test]
fn constructors_set_method_and_url() {
    assert_eq!(ApiRequest::get("/api/session").method, Method::Get);
    assert_eq!(ApiRequest::post("/a").method, Method::Post);
    assert_eq!(ApiRequest::put("/a").method, Method::Put);
    let req = ApiRequest::delete("/api/user/1");
    assert_eq!(req.method, Method::Delete);
    assert_eq!(req.url, "/api/user/1");
    assert!(req.headers.is_empty());
    assert!(req.body.is_none());
}

#[test]
fn json_sets_body_and_content_type() {
    let req = ApiRequest::post("/api/auth/login")
        .json(&serde_json::json!({ "email": "a@b.c" }))
        .unwrap();
    assert_eq!(req.body.as_deref(), Some(r#"{"email":"a@b.c"}"#));
    assert_eq!(req.header("content-type"), Some("application/json"));
}

#[test]
fn with_header_replaces_case_insensitively() {
    let req = ApiRequest::get("/x")
        .with_header("authorization", "Bearer old")
        .with_header("Authorization", "Bearer new");
    assert_eq!(req.headers.len(), 1);
    assert_eq!(req.header("AUTHORIZATION"), Some("Bearer new"));
}

#[test]
fn header_lookup_misses_return_none() {
    assert_eq!(ApiRequest::get("/x").header("Authorization"), None);
}

#[test]
fn response_ok_covers_2xx_only() {
    let make = |status| ApiResponse { status, body: String::new() };
    assert!(make(200).is_success());
    assert!(make(204).is_success());
    assert!(!make(199).is_success());
    assert!(!make(302).is_success());
    assert!(!make(401).is_success());
}

#[test]
fn method_names_are_uppercase() {
    assert_eq!(Method::Get.as_str(), "GET");
    assert_eq!(Method::Delete.as_str(), "DELETE");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_transport_is_unavailable_natively() {
    let result = futures::executor::block_on(BrowserTransport.send(&ApiRequest::get("/api/session")));
    assert_eq!(result, Err(ApiError::Unavailable));
}
