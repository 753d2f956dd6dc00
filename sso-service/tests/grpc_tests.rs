mod common;

use common::TestApp;
use common::TEST_APP_ID;
use sso_service::proto::auth_server::Auth;
use sso_service::proto::IsAdminRequest;
use sso_service::proto::LoginRequest;
use sso_service::proto::LogoutRequest;
use sso_service::proto::RegisterRequest;
use sso_service::proto::ValidateTokenRequest;
use tonic::Code;
use tonic::Request;

const EMAIL: &str = "alice@example.com";
const PASSWORD: &str = "correct horse battery";

async fn register(app: &TestApp, email: &str, password: &str) -> i64 {
    app.grpc
        .register(Request::new(RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        }))
        .await
        .expect("registration should succeed")
        .into_inner()
        .user_id
}

async fn login(app: &TestApp, email: &str, password: &str) -> String {
    app.grpc
        .login(Request::new(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            app_id: TEST_APP_ID,
        }))
        .await
        .expect("login should succeed")
        .into_inner()
        .token
}

#[tokio::test]
async fn test_register_login_validate_logout_flow() {
    let app = TestApp::spawn().await;

    let user_id = register(&app, EMAIL, PASSWORD).await;
    assert!(user_id > 0);

    let token = login(&app, EMAIL, PASSWORD).await;
    assert!(!token.is_empty());

    let claims = app
        .grpc
        .validate_token(Request::new(ValidateTokenRequest {
            token: token.clone(),
        }))
        .await
        .expect("fresh token should validate")
        .into_inner();
    assert_eq!(claims.user_id, user_id);
    assert_eq!(claims.email, EMAIL);
    assert_eq!(claims.app_id, TEST_APP_ID);
    assert!(claims.expires_at > 0);

    let logout = app
        .grpc
        .logout(Request::new(LogoutRequest {
            token: token.clone(),
        }))
        .await
        .expect("logout should succeed")
        .into_inner();
    assert!(logout.success);

    let status = app
        .grpc
        .validate_token(Request::new(ValidateTokenRequest { token }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Unauthenticated);
}

#[tokio::test]
async fn test_logout_only_revokes_presented_token() {
    let app = TestApp::spawn().await;
    register(&app, EMAIL, PASSWORD).await;

    let first = login(&app, EMAIL, PASSWORD).await;
    let second = login(&app, EMAIL, PASSWORD).await;
    assert_ne!(first, second);

    app.grpc
        .logout(Request::new(LogoutRequest { token: first }))
        .await
        .unwrap();

    let result = app
        .grpc
        .validate_token(Request::new(ValidateTokenRequest { token: second }))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let app = TestApp::spawn().await;
    register(&app, EMAIL, PASSWORD).await;
    let token = login(&app, EMAIL, PASSWORD).await;

    for _ in 0..2 {
        let response = app
            .grpc
            .logout(Request::new(LogoutRequest {
                token: token.clone(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert!(response.success);
    }
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let app = TestApp::spawn().await;
    register(&app, EMAIL, PASSWORD).await;

    let token = login(&app, "Alice@Example.COM", PASSWORD).await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    register(&app, EMAIL, PASSWORD).await;

    let wrong_password = app
        .grpc
        .login(Request::new(LoginRequest {
            email: EMAIL.to_string(),
            password: "not the password".to_string(),
            app_id: TEST_APP_ID,
        }))
        .await
        .unwrap_err();
    let ghost = app
        .grpc
        .login(Request::new(LoginRequest {
            email: "ghost@example.com".to_string(),
            password: PASSWORD.to_string(),
            app_id: TEST_APP_ID,
        }))
        .await
        .unwrap_err();

    assert_eq!(wrong_password.code(), Code::InvalidArgument);
    assert_eq!(ghost.code(), Code::InvalidArgument);
    assert_eq!(wrong_password.message(), ghost.message());
}

#[tokio::test]
async fn test_login_unknown_application() {
    let app = TestApp::spawn().await;
    register(&app, EMAIL, PASSWORD).await;

    let status = app
        .grpc
        .login(Request::new(LoginRequest {
            email: EMAIL.to_string(),
            password: PASSWORD.to_string(),
            app_id: 7,
        }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "unknown application");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    register(&app, EMAIL, PASSWORD).await;

    let status = app
        .grpc
        .register(Request::new(RegisterRequest {
            email: "ALICE@example.com".to_string(),
            password: "another password".to_string(),
        }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::AlreadyExists);
    assert_eq!(app.repository.user_count().await, 1);
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = TestApp::spawn().await;

    let cases = [
        ("", PASSWORD, "email is required"),
        ("not-an-email", PASSWORD, "invalid email format"),
        (EMAIL, "", "password is required"),
        (EMAIL, "short", "password is too short"),
    ];

    for (email, password, message) in cases {
        let status = app
            .grpc
            .register(Request::new(RegisterRequest {
                email: email.to_string(),
                password: password.to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), message);
    }

    assert_eq!(app.repository.user_count().await, 0);
}

#[tokio::test]
async fn test_login_requires_app_id() {
    let app = TestApp::spawn().await;

    let status = app
        .grpc
        .login(Request::new(LoginRequest {
            email: EMAIL.to_string(),
            password: PASSWORD.to_string(),
            app_id: 0,
        }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "app_id is required");
}

#[tokio::test]
async fn test_is_admin() {
    let app = TestApp::spawn().await;
    let regular = register(&app, EMAIL, PASSWORD).await;
    let admin = register(&app, "root@example.com", PASSWORD).await;
    app.repository.grant_admin(admin).await;

    let is_admin = |user_id| {
        app.grpc
            .is_admin(Request::new(IsAdminRequest { user_id }))
    };

    assert!(!is_admin(regular).await.unwrap().into_inner().is_admin);
    assert!(is_admin(admin).await.unwrap().into_inner().is_admin);
    assert_eq!(is_admin(999).await.unwrap_err().code(), Code::NotFound);
    assert_eq!(is_admin(0).await.unwrap_err().code(), Code::InvalidArgument);
}

#[tokio::test]
async fn test_token_requests_require_token() {
    let app = TestApp::spawn().await;

    let logout = app
        .grpc
        .logout(Request::new(LogoutRequest {
            token: String::new(),
        }))
        .await
        .unwrap_err();
    let validate = app
        .grpc
        .validate_token(Request::new(ValidateTokenRequest {
            token: String::new(),
        }))
        .await
        .unwrap_err();

    assert_eq!(logout.message(), "token is required");
    assert_eq!(validate.message(), "token is required");
}

#[tokio::test]
async fn test_malformed_token() {
    let app = TestApp::spawn().await;

    let status = app
        .grpc
        .logout(Request::new(LogoutRequest {
            token: "definitely.not.a-jwt".to_string(),
        }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "malformed token");
}
