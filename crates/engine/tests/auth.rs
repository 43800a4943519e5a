use engine::{EngineError, LoginUserCmd, RegisterUserCmd};

mod common;

#[tokio::test]
async fn register_returns_identity_and_token() {
    let engine = common::engine_with_db().await;

    let outcome = engine
        .register_user(
            RegisterUserCmd::new("alice@example.com", "Passw0rd")
                .first_name("Alice")
                .last_name("Doe"),
        )
        .await
        .unwrap();

    assert!(!outcome.user_id.is_nil());
    assert_eq!(outcome.email, "alice@example.com");
    assert_eq!(outcome.first_name.as_deref(), Some("Alice"));
    assert_eq!(outcome.last_name.as_deref(), Some("Doe"));
    assert!(outcome.token.contains(&outcome.user_id.to_string()));
}

#[tokio::test]
async fn register_rejects_duplicate_email_case_insensitively() {
    let engine = common::engine_with_db().await;
    common::register(&engine, "alice@example.com").await;

    for email in ["alice@example.com", "ALICE@Example.COM", " alice@example.com "] {
        let err = engine
            .register_user(RegisterUserCmd::new(email, "Passw0rd"))
            .await
            .unwrap_err();
        let EngineError::Validation(errors) = err else {
            panic!("expected validation failure for {email}, got {err:?}");
        };
        assert_eq!(errors.messages("email"), ["Email already exists."]);
    }
}

#[tokio::test]
async fn register_reports_every_violated_field_at_once() {
    let engine = common::engine_with_db().await;

    let err = engine
        .register_user(
            RegisterUserCmd::new("not-an-email", "weak").first_name("x".repeat(101)),
        )
        .await
        .unwrap_err();

    let EngineError::Validation(errors) = err else {
        panic!("expected validation failure, got {err:?}");
    };
    assert!(errors.contains("email"));
    assert!(errors.contains("password"));
    assert!(errors.contains("first_name"));
    // weak: too short, no uppercase, no digit
    assert_eq!(errors.messages("password").len(), 3);
}

#[tokio::test]
async fn login_round_trips_registered_credentials() {
    let engine = common::engine_with_db().await;
    let user_id = common::register(&engine, "alice@example.com").await;

    let outcome = engine
        .login_user(LoginUserCmd::new("Alice@Example.com", "Passw0rd"))
        .await
        .unwrap();
    assert_eq!(outcome.user_id, user_id);
    assert_eq!(outcome.email, "alice@example.com");
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_email_alike() {
    let engine = common::engine_with_db().await;
    common::register(&engine, "alice@example.com").await;

    let wrong_password = engine
        .login_user(LoginUserCmd::new("alice@example.com", "Wrong0pass"))
        .await
        .unwrap_err();
    let unknown_email = engine
        .login_user(LoginUserCmd::new("nobody@example.com", "Passw0rd"))
        .await
        .unwrap_err();

    assert_eq!(
        wrong_password,
        EngineError::Unauthenticated("invalid email or password".to_string())
    );
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn login_requires_both_fields() {
    let engine = common::engine_with_db().await;

    let err = engine
        .login_user(LoginUserCmd::new("", ""))
        .await
        .unwrap_err();
    let EngineError::Validation(errors) = err else {
        panic!("expected validation failure, got {err:?}");
    };
    assert!(errors.contains("email"));
    assert!(errors.contains("password"));
}
