//! End-to-end account lifecycle tests over the in-memory store.

use roster_users::{
    AccountService, MockUserRepository, ProfileSelector, ProfileUpdate, TokenIssuer, UserError,
};

fn service() -> AccountService<MockUserRepository> {
    let tokens = TokenIssuer::new("integration_test_secret_0123456789abcdef").unwrap();
    AccountService::with_store(MockUserRepository::new(), tokens)
}

#[tokio::test]
async fn account_lifecycle() {
    let service = service();

    // Register.
    let registered = service
        .register("Ann", "ann@x.com", "secret1")
        .await
        .unwrap();
    assert!(!registered.id.is_empty());
    assert_eq!(registered.name, "Ann");
    assert_eq!(registered.email, "ann@x.com");

    // Login with the right password yields the same user and a token.
    let (user, token) = service.login("ann@x.com", "secret1").await.unwrap();
    assert_eq!(user, registered);
    assert!(!token.is_empty());
    assert_eq!(service.verify_token(&token).unwrap(), registered.id);

    // Wrong password is rejected with the uninformative message.
    let err = service.login("ann@x.com", "wrong").await.unwrap_err();
    assert!(matches!(err, UserError::InvalidCredentials));
    assert_eq!(err.to_string(), "Invalid email or password");

    // Delete, then the account is gone.
    service.delete_user_by_email("ann@x.com").await.unwrap();
    assert!(matches!(
        service.get_user_by_name("Ann").await,
        Err(UserError::UserNotFound)
    ));
}

#[tokio::test]
async fn rename_then_old_name_no_longer_matches() {
    let service = service();

    service
        .register("Ann", "ann@x.com", "secret1")
        .await
        .unwrap();

    service
        .update_profile(
            ProfileSelector::Name("ann"),
            ProfileUpdate {
                name: Some("Anne".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(service.get_user_by_name("anne").await.is_ok());
    assert!(matches!(
        service.get_user_by_name("Ann").await,
        Err(UserError::UserNotFound)
    ));
}

#[tokio::test]
async fn duplicate_registration_leaves_first_account_intact() {
    let service = service();

    service
        .register("Ann", "ann@x.com", "secret1")
        .await
        .unwrap();
    let err = service
        .register("Impostor", "ann@x.com", "hunter2")
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::EmailAlreadyExists));

    // Original credentials still work; the impostor's never did.
    assert!(service.login("ann@x.com", "secret1").await.is_ok());
    assert!(service.login("ann@x.com", "hunter2").await.is_err());
}
