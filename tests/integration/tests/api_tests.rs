//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, SESSION_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use dte_core::{
    NewNotification, NotificationCategory, NotificationKind, NotificationRepository, Role,
    UserRepository,
};
use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::{header::SET_COOKIE, StatusCode};
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let body: Envelope<UserResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(body.data.username.as_deref(), Some(request.username.as_str()));
    assert_eq!(body.data.email, request.email);
    assert_eq!(body.data.role, "demo");
    assert_eq!(body.data.login_method, "local");
    assert!(body.data.is_active);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let first = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &first).await.unwrap();

    // Same username, different email
    let mut second = RegisterRequest::unique();
    second.username = first.username.clone();

    let response = server.post("/api/v1/auth/register", &second).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(err.error.code, "DUPLICATE_USERNAME");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let first = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &first).await.unwrap();

    // Same email, different username
    let mut second = RegisterRequest::unique();
    second.email = first.email.clone();

    let response = server.post("/api/v1/auth/register", &second).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(err.error.code, "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn test_register_rejects_invalid_payloads() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Password below the 6 character policy
    let mut weak = RegisterRequest::unique();
    weak.password = "12345".to_string();
    let response = server.post("/api/v1/auth/register", &weak).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.code, "VALIDATION_ERROR");

    // Malformed email
    let mut bad_email = RegisterRequest::unique();
    bad_email.email = "not-an-email".to_string();
    let response = server.post("/api/v1/auth/register", &bad_email).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.code, "VALIDATION_ERROR");
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_sets_session_cookie() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.contains("dte_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    let body: Envelope<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.username.as_deref(), Some(register_req.username.as_str()));

    // Cookie authenticates subsequent requests
    let response = server.get("/api/v1/auth/me").await.unwrap();
    let me: Envelope<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.data.id, body.data.id);
    assert!(me.data.last_signed_in.is_some());
}

#[tokio::test]
async fn test_login_with_email_identifier() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();

    let login_req = LoginRequest {
        identifier: register_req.email.clone(),
        password: register_req.password.clone(),
    };
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let body: Envelope<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.email, register_req.email);
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();

    let login_req = LoginRequest {
        identifier: register_req.username.clone(),
        password: "wrong-password".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(err.error.code, "WRONG_PASSWORD");
    assert_eq!(err.error.message, "Senha incorreta");
}

#[tokio::test]
async fn test_login_unknown_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        identifier: format!("ghost{}", unique_suffix()),
        password: "irrelevant".to_string(),
    };

    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(err.error.code, "USER_NOT_FOUND");
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_me_requires_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/auth/me").await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(err.error.code, "NOT_AUTHENTICATED");
}

#[tokio::test]
async fn test_logout_clears_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    let response = server.get("/api/v1/auth/me").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.post("/api/v1/auth/logout", &()).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // The expired cookie is dropped by the client, so the session is gone
    let response = server.get("/api/v1/auth/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_without_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post("/api/v1/auth/logout", &()).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_session_reflects_role_change_without_relogin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &register_req).await.unwrap();
    let created: Envelope<UserResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    server
        .context()
        .user_repo()
        .set_role(created.data.id, Role::Gestor)
        .await
        .unwrap();

    // The session token carries identity only; each request reads fresh state
    let response = server.get("/api/v1/auth/me").await.unwrap();
    let me: Envelope<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.data.role, "gestor");
}

#[tokio::test]
async fn test_session_ends_when_account_deactivated() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &register_req).await.unwrap();
    let created: Envelope<UserResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    server
        .context()
        .user_repo()
        .set_active(created.data.id, false)
        .await
        .unwrap();

    // The cookie is still in the jar but no longer resolves to a session
    let response = server.get("/api/v1/auth/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Password Tests
// ============================================================================

#[tokio::test]
async fn test_change_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    let change_req = ChangePasswordRequest {
        current_password: Some(register_req.password.clone()),
        new_password: "NewPass456!".to_string(),
    };
    let response = server.post("/api/v1/auth/password", &change_req).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    server.post("/api/v1/auth/logout", &()).await.unwrap();

    // Old password no longer works
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // New password does
    let new_login = LoginRequest {
        identifier: register_req.username.clone(),
        password: "NewPass456!".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &new_login).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_change_password_wrong_current() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    let change_req = ChangePasswordRequest {
        current_password: Some("not-the-password".to_string()),
        new_password: "NewPass456!".to_string(),
    };
    let response = server.post("/api/v1/auth/password", &change_req).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(err.error.code, "WRONG_CURRENT_PASSWORD");
    assert_eq!(err.error.message, "Senha atual incorreta");
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_update_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    let update_req = UpdateProfileRequest {
        name: "Novo Nome".to_string(),
        email: format!("renamed{}@example.com", unique_suffix()),
    };
    let response = server.patch("/api/v1/users/@me", &update_req).await.unwrap();
    let updated: Envelope<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.data.name, "Novo Nome");
    assert_eq!(updated.data.email, update_req.email);

    let response = server.get("/api/v1/users/@me").await.unwrap();
    let fetched: Envelope<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.data.name, "Novo Nome");
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_routes_reject_regular_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Without a session
    let response = server.get("/api/v1/admin/users").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // With a demo session
    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    let response = server.get("/api/v1/admin/users").await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(err.error.code, "ADMIN_REQUIRED");
}

#[tokio::test]
async fn test_admin_list_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &register_req).await.unwrap();
    let created: Envelope<UserResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();
    server.promote_to_admin(created.data.id).await.unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    let response = server.get("/api/v1/admin/users").await.unwrap();
    let users: Envelope<Vec<UserResponse>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(users.data.iter().any(|u| u.id == created.data.id));
}

#[tokio::test]
async fn test_admin_set_role() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let target_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &target_req).await.unwrap();
    let target: Envelope<UserResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();

    let admin_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &admin_req).await.unwrap();
    let admin: Envelope<UserResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();
    server.promote_to_admin(admin.data.id).await.unwrap();
    let login_req = LoginRequest::from_register(&admin_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    let response = server
        .patch(
            &format!("/api/v1/admin/users/{}/role", target.data.id),
            &json!({"role": "gestor"}),
        )
        .await
        .unwrap();
    let updated: Envelope<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.data.role, "gestor");
}

#[tokio::test]
async fn test_admin_deactivate_blocks_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let target_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &target_req).await.unwrap();
    let target: Envelope<UserResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();

    let admin_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &admin_req).await.unwrap();
    let admin: Envelope<UserResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();
    server.promote_to_admin(admin.data.id).await.unwrap();
    let login_req = LoginRequest::from_register(&admin_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    let response = server
        .patch(
            &format!("/api/v1/admin/users/{}/active", target.data.id),
            &json!({"is_active": false}),
        )
        .await
        .unwrap();
    let updated: Envelope<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!updated.data.is_active);

    let target_login = LoginRequest::from_register(&target_req);
    let response = server.post("/api/v1/auth/login", &target_login).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(err.error.code, "ACCOUNT_DISABLED");
}

#[tokio::test]
async fn test_admin_password_reset() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let target_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &target_req).await.unwrap();
    let target: Envelope<UserResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();

    let admin_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &admin_req).await.unwrap();
    let admin: Envelope<UserResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();
    server.promote_to_admin(admin.data.id).await.unwrap();
    let login_req = LoginRequest::from_register(&admin_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    let response = server
        .put(
            &format!("/api/v1/admin/users/{}/password", target.data.id),
            &json!({"new_password": "ResetPass789!"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let target_login = LoginRequest {
        identifier: target_req.username.clone(),
        password: "ResetPass789!".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &target_login).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Activity Log Tests
// ============================================================================

#[tokio::test]
async fn test_admin_activity_log() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &register_req).await.unwrap();
    let created: Envelope<UserResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();
    server.promote_to_admin(created.data.id).await.unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    // Registration and login both left audit records
    let response = server
        .get(&format!("/api/v1/admin/activities?user_id={}", created.data.id))
        .await
        .unwrap();
    let activities: Envelope<Vec<ActivityResponse>> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!activities.data.is_empty());
    assert!(activities.data.iter().all(|a| a.user_id == Some(created.data.id)));
    assert!(activities.data.iter().any(|a| a.activity_type == "login"));

    // Type filter narrows the listing
    let response = server
        .get("/api/v1/admin/activities?activity_type=register")
        .await
        .unwrap();
    let filtered: Envelope<Vec<ActivityResponse>> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert!(filtered.data.iter().all(|a| a.activity_type == "register"));

    let response = server.get("/api/v1/admin/activities/types").await.unwrap();
    let types: Envelope<Vec<String>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(types.data.iter().any(|t| t == "login"));
    assert!(types.data.iter().any(|t| t == "register"));
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_notifications_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let target_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &target_req).await.unwrap();
    let target: Envelope<UserResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();

    let admin_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &admin_req).await.unwrap();
    let admin: Envelope<UserResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();
    server.promote_to_admin(admin.data.id).await.unwrap();
    let login_req = LoginRequest::from_register(&admin_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    // The role change notifies the affected account
    server
        .patch(
            &format!("/api/v1/admin/users/{}/role", target.data.id),
            &json!({"role": "politico"}),
        )
        .await
        .unwrap();

    // Logging in as the target replaces the admin session cookie
    let target_login = LoginRequest::from_register(&target_req);
    server.post("/api/v1/auth/login", &target_login).await.unwrap();

    let response = server.get("/api/v1/notifications").await.unwrap();
    let list: Envelope<Vec<NotificationResponse>> =
        assert_json(response, StatusCode::OK).await.unwrap();
    let notification = list
        .data
        .iter()
        .find(|n| n.title == "Função atualizada")
        .expect("role change notification missing");
    assert!(!notification.is_read);
    assert_eq!(notification.user_id, Some(target.data.id));
    assert_eq!(notification.category, "security");

    let response = server.get("/api/v1/notifications/unread-count").await.unwrap();
    let count: Envelope<UnreadCountResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.data.count, 1);

    let response = server
        .post(&format!("/api/v1/notifications/{}/read", notification.id), &())
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get("/api/v1/notifications/unread-count").await.unwrap();
    let count: Envelope<UnreadCountResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.data.count, 0);

    let response = server
        .delete(&format!("/api/v1/notifications/{}", notification.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get("/api/v1/notifications").await.unwrap();
    let list: Envelope<Vec<NotificationResponse>> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert!(list.data.iter().all(|n| n.id != notification.id));
}

#[tokio::test]
async fn test_notifications_scoped_to_recipient() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let other_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &other_req).await.unwrap();
    let other: Envelope<UserResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();

    // A notification addressed to someone else
    let foreign = server
        .context()
        .notification_repo()
        .create(&NewNotification::targeted(
            other.data.id,
            "Privada",
            "Somente para o destinatário",
            NotificationKind::Info,
            NotificationCategory::System,
        ))
        .await
        .unwrap();

    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    let response = server
        .post(&format!("/api/v1/notifications/{}/read", foreign.id), &())
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(err.error.code, "UNKNOWN_NOTIFICATION");
}

#[tokio::test]
async fn test_mark_all_read() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &register_req).await.unwrap();
    let created: Envelope<UserResponse> = assert_json(response, StatusCode::CREATED).await.unwrap();

    for n in 0..3 {
        server
            .context()
            .notification_repo()
            .create(&NewNotification::targeted(
                created.data.id,
                format!("Aviso {n}"),
                "mensagem",
                NotificationKind::Info,
                NotificationCategory::System,
            ))
            .await
            .unwrap();
    }

    let login_req = LoginRequest::from_register(&register_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    let response = server.get("/api/v1/notifications/unread-count").await.unwrap();
    let count: Envelope<UnreadCountResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.data.count, 3);

    let response = server.post("/api/v1/notifications/read-all", &()).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get("/api/v1/notifications/unread-count").await.unwrap();
    let count: Envelope<UnreadCountResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.data.count, 0);
}

// ============================================================================
// Request Parsing Tests
// ============================================================================

#[tokio::test]
async fn test_non_numeric_id_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    server.post("/api/v1/auth/login", &login_req).await.unwrap();

    let response = server.post("/api/v1/notifications/abc/read", &()).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.code, "INVALID_PATH_PARAMETER");
}
