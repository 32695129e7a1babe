use super::*;
use crate::state::test_helpers;
use axum::extract::FromRequestParts;
use catalog::Role;

async fn extract(state: &AppState, cookie: Option<&str>) -> Result<AuthUser, StatusCode> {
    let mut builder = axum::http::Request::builder().uri("/api/auth/me");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    let (mut parts, ()) = builder.body(()).unwrap().into_parts();
    AuthUser::from_request_parts(&mut parts, state).await
}

fn auth_for(user: User) -> AuthUser {
    AuthUser { user, token: "t".into() }
}

// =============================================================================
// extractor
// =============================================================================

#[tokio::test]
async fn extractor_without_cookie_is_unauthorized() {
    let state = test_helpers::test_app_state();
    assert_eq!(extract(&state, None).await.err(), Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn extractor_with_unknown_token_is_unauthorized() {
    let state = test_helpers::test_app_state();
    let result = extract(&state, Some("session_token=deadbeef")).await;
    assert_eq!(result.err(), Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn extractor_resolves_session_user() {
    let state = test_helpers::test_app_state();
    let admin = test_helpers::seed_admin(&state).await;
    let token = session::create_session(&state, &admin.id).await;

    let auth = extract(&state, Some(&format!("theme=dark; session_token={token}")))
        .await
        .expect("authenticated");
    assert_eq!(auth.user.id, admin.id);
    assert_eq!(auth.token, token);
}

// =============================================================================
// role guards
// =============================================================================

#[tokio::test]
async fn role_guards() {
    let state = test_helpers::test_app_state();
    let student = auth_for(test_helpers::seed_user(&state, "s", Role::Student).await);
    let creator = auth_for(test_helpers::seed_user(&state, "c", Role::ContentCreator).await);
    let admin = auth_for(test_helpers::seed_admin(&state).await);

    assert_eq!(require_admin(&student), Err(StatusCode::FORBIDDEN));
    assert_eq!(require_admin(&creator), Err(StatusCode::FORBIDDEN));
    assert_eq!(require_admin(&admin), Ok(()));

    assert_eq!(require_publisher(&student), Err(StatusCode::FORBIDDEN));
    assert_eq!(require_publisher(&creator), Ok(()));
    assert_eq!(require_publisher(&admin), Ok(()));
}

// =============================================================================
// handlers
// =============================================================================

#[tokio::test]
async fn login_sets_http_only_cookie() {
    let state = test_helpers::test_app_state();
    let (jar, Json(user)) = login(
        State(state.clone()),
        Json(LoginRequest { email: "admin@knix.lk".into(), name: None }),
    )
    .await
    .expect("login ok");
    assert_eq!(user.role, Role::Admin);

    let cookie = jar.get(COOKIE_NAME).expect("session cookie set");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert!(session::validate_session(&state, cookie.value()).await.is_some());
}

#[tokio::test]
async fn login_invalid_email_is_bad_request() {
    let state = test_helpers::test_app_state();
    let result = login(State(state), Json(LoginRequest { email: "nope".into(), name: None })).await;
    assert_eq!(result.err(), Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn logout_invalidates_session_and_expires_cookie() {
    let state = test_helpers::test_app_state();
    let admin = test_helpers::seed_admin(&state).await;
    let token = session::create_session(&state, &admin.id).await;

    let response = logout(State(state.clone()), AuthUser { user: admin, token: token.clone() })
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let set_cookie = response
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(set_cookie.contains("Max-Age=0"));
    assert!(session::validate_session(&state, &token).await.is_none());
}
