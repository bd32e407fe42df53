//! Account registration and credential authentication.
//!
//! Run with: cargo test -p mercantile-integration-tests

#![allow(clippy::unwrap_used)]

use mercantile_integration_tests::TestContext;
use mercantile_storefront::models::UserForm;
use mercantile_storefront::services::{AuthError, AuthService};

fn john(email: &str) -> UserForm {
    UserForm::new(email, "password", "John", "Doe")
}

fn messages(err: AuthError) -> Vec<String> {
    match err {
        AuthError::Validation(errors) => errors.full_messages(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ============================================================================
// Validations
// ============================================================================

#[tokio::test]
async fn test_valid_attributes_register() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store, &ctx.hasher);

    let user = auth.register(&john("test@example.com")).await.unwrap();
    assert_eq!(user.email.as_str(), "test@example.com");
    assert_eq!(user.full_name(), "John Doe");
}

#[tokio::test]
async fn test_mismatched_confirmation_is_invalid() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store, &ctx.hasher);

    let form = john("test@example.com").with_confirmation(Some("differentpassword"));
    let err = auth.register(&form).await.unwrap_err();

    assert!(messages(err).contains(&"Password confirmation doesn't match Password".to_owned()));
}

#[tokio::test]
async fn test_required_fields() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store, &ctx.hasher);

    let all = messages(auth.register(&UserForm::default()).await.unwrap_err());
    for expected in [
        "Email can't be blank",
        "Password can't be blank",
        "First name can't be blank",
        "Last name can't be blank",
    ] {
        assert!(all.contains(&expected.to_owned()), "missing {expected:?}");
    }
}

#[tokio::test]
async fn test_email_uniqueness_ignores_case() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store, &ctx.hasher);
    auth.register(&john("test@example.com")).await.unwrap();

    let jane = UserForm::new("TEST@example.com", "password", "Jane", "Doe");
    let err = auth.register(&jane).await.unwrap_err();

    assert!(messages(err).contains(&"Email has already been taken".to_owned()));
}

#[tokio::test]
async fn test_email_uniqueness_ignores_surrounding_whitespace() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store, &ctx.hasher);
    auth.register(&john("test@example.com")).await.unwrap();

    let err = auth.register(&john("  test@example.com ")).await.unwrap_err();
    assert_eq!(messages(err), vec!["Email has already been taken"]);
}

// ============================================================================
// authenticate_with_credentials
// ============================================================================

#[tokio::test]
async fn test_returns_user_for_valid_credentials() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store, &ctx.hasher);
    let user = auth.register(&john("test@example.com")).await.unwrap();

    let authenticated = auth
        .authenticate_with_credentials("test@example.com", "password")
        .await
        .unwrap();
    assert_eq!(authenticated, Some(user));
}

#[tokio::test]
async fn test_returns_none_for_unknown_email() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store, &ctx.hasher);

    let authenticated = auth
        .authenticate_with_credentials("nonexistent@example.com", "password")
        .await
        .unwrap();
    assert!(authenticated.is_none());
}

#[tokio::test]
async fn test_returns_none_for_wrong_password() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store, &ctx.hasher);
    auth.register(&john("test@example.com")).await.unwrap();

    let authenticated = auth
        .authenticate_with_credentials("test@example.com", "wrongpassword")
        .await
        .unwrap();
    assert!(authenticated.is_none());
}

#[tokio::test]
async fn test_email_with_surrounding_spaces() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store, &ctx.hasher);
    let user = auth.register(&john("test@example.com")).await.unwrap();

    let authenticated = auth
        .authenticate_with_credentials("  test@example.com  ", "password")
        .await
        .unwrap();
    assert_eq!(authenticated, Some(user));
}

#[tokio::test]
async fn test_email_in_different_case() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store, &ctx.hasher);
    let user = auth.register(&john("test@example.com")).await.unwrap();

    let authenticated = auth
        .authenticate_with_credentials("TEST@example.com", "password")
        .await
        .unwrap();
    assert_eq!(authenticated, Some(user));
}

#[tokio::test]
async fn test_registered_casing_is_preserved() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store, &ctx.hasher);
    let user = auth.register(&john("Test@Example.com")).await.unwrap();

    let authenticated = auth
        .authenticate_with_credentials("test@example.com", "password")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(authenticated.id, user.id);
    assert_eq!(authenticated.email.as_str(), "Test@Example.com");
}

#[tokio::test]
async fn test_password_is_not_normalized() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store, &ctx.hasher);
    auth.register(&john("test@example.com")).await.unwrap();

    for attempt in [" password", "password ", "PASSWORD", ""] {
        let authenticated = auth
            .authenticate_with_credentials("test@example.com", attempt)
            .await
            .unwrap();
        assert!(authenticated.is_none(), "{attempt:?} should not authenticate");
    }
}

// ============================================================================
// Updates
// ============================================================================

#[tokio::test]
async fn test_update_without_password_keeps_old_one() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store, &ctx.hasher);
    let user = auth.register(&john("test@example.com")).await.unwrap();

    let mut change = john("test@example.com");
    change.password = None;
    change.password_confirmation = None;
    change.last_name = Some("Smith".to_owned());
    auth.update(user.id, &change).await.unwrap();

    let authenticated = auth
        .authenticate_with_credentials("test@example.com", "password")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(authenticated.last_name, "Smith");
}

#[tokio::test]
async fn test_update_with_new_password_replaces_old_one() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store, &ctx.hasher);
    let user = auth.register(&john("test@example.com")).await.unwrap();

    let change = UserForm::new("test@example.com", "new-password", "John", "Doe");
    auth.update(user.id, &change).await.unwrap();

    assert!(
        auth.authenticate_with_credentials("test@example.com", "password")
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(
        auth.authenticate_with_credentials("test@example.com", "new-password")
            .await
            .unwrap()
            .map(|u| u.id),
        Some(user.id)
    );
}

#[tokio::test]
async fn test_update_cannot_take_another_users_email() {
    let ctx = TestContext::new();
    let auth = AuthService::new(&ctx.store, &ctx.hasher);
    auth.register(&john("first@example.com")).await.unwrap();
    let second = auth.register(&john("second@example.com")).await.unwrap();

    let err = auth
        .update(second.id, &john("FIRST@example.com"))
        .await
        .unwrap_err();
    assert_eq!(messages(err), vec!["Email has already been taken"]);
}
