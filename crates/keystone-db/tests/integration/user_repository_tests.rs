use keystone_core::error::AppError;
use keystone_core::models::{NewUser, Role};
use keystone_core::traits::UserStore;

use crate::integration::common::setup_test_db;

fn new_user(email: &str, role: Role) -> NewUser {
    NewUser {
        name: "Jane".into(),
        email: email.into(),
        password_hash: "$2b$04$abcdefghijklmnopqrstuu5xHfS0tBEtl0QWpZpQqcnpTRsb1yq2y".into(),
        role,
    }
}

#[tokio::test]
async fn create_and_find_user() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();

    let created = repo.create(&new_user("jane@x.com", Role::User)).await.unwrap();
    assert!(!created.id.is_nil());
    assert_eq!(created.role, Role::User);

    let found = repo
        .find_by_email("jane@x.com")
        .await
        .unwrap()
        .expect("Should find the user");

    assert_eq!(found.id, created.id);
    assert_eq!(found.name, "Jane");
    assert_eq!(found.password_hash, created.password_hash);
}

#[tokio::test]
async fn find_unknown_email_returns_none() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();

    assert!(repo.find_by_email("nobody@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn email_lookup_is_case_sensitive() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();

    repo.create(&new_user("jane@x.com", Role::User)).await.unwrap();
    assert!(repo.find_by_email("JANE@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();

    repo.create(&new_user("jane@x.com", Role::User)).await.unwrap();
    let second = repo.create(&new_user("jane@x.com", Role::Admin)).await;

    assert!(matches!(second, Err(AppError::Conflict(_))));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn concurrent_duplicate_inserts_store_one_row() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();

    let a = repo.clone();
    let b = repo.clone();
    let (first, second) = tokio::join!(
        async move { a.create(&new_user("race@x.com", Role::User)).await },
        async move { b.create(&new_user("race@x.com", Role::User)).await },
    );

    assert!(first.is_ok() ^ second.is_ok());
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn admin_role_round_trips() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();

    repo.create(&new_user("root@x.com", Role::Admin)).await.unwrap();
    let found = UserStore::find_by_email(&repo, "root@x.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.role, Role::Admin);
}

#[tokio::test]
async fn health_check_succeeds() {
    let (db, _container) = setup_test_db().await;
    db.user_repo().health_check().await.unwrap();
}
