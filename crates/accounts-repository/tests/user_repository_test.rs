//! Integration tests for MySqlUserRepository.
//!
//! These tests run against a real MySQL database using testcontainers and
//! are ignored by default. Run with `--ignored` when Docker is available.

mod common;

use accounts_core::{AccountsError, NewUser, UserId, UserRole};
use accounts_repository::{MySqlUserRepository, UserRepository};
use common::TestDatabase;

fn new_user(name: &str, email: &str) -> NewUser {
    NewUser::new(name, email, "h".repeat(118))
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_health_check() {
    let db = TestDatabase::new().await;
    db.pool().health_check().await.expect("Health check failed");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_and_find_by_id() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let input = new_user("Ada", "ada@example.com");
    repo.insert(&input).await.expect("Failed to insert user");

    let found = repo
        .find_by_id(&input.id)
        .await
        .expect("Query failed")
        .expect("User not found");

    assert_eq!(found.id, input.id);
    assert_eq!(found.name, "Ada");
    assert_eq!(found.password.len(), 118);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_applies_column_defaults() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    repo.insert(&new_user("Ada", "a@b.com")).await.expect("Failed to insert user");

    let found = repo
        .find_by_email("a@b.com")
        .await
        .expect("Query failed")
        .expect("User not found");

    assert_eq!(found.role, UserRole::User);
    assert!(!found.is_activated);
    assert!(!found.is_banned);
    assert!(found.image.is_none());
    assert!(found.activation_id.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_by_id_not_found() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let result = repo.find_by_id(&UserId::generate()).await.expect("Query failed");
    assert!(result.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_email_violates_unique_index() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    repo.insert(&new_user("Ada", "dup@example.com")).await.expect("Failed to insert user");
    let err = repo
        .insert(&new_user("Other", "dup@example.com"))
        .await
        .expect_err("Duplicate email accepted");

    assert!(matches!(err, AccountsError::Database(ref m) if m.contains("Unique")));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_all() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    assert!(repo.find_all().await.expect("Query failed").is_empty());

    repo.insert(&new_user("One", "one@example.com")).await.expect("Failed to insert user");
    repo.insert(&new_user("Two", "two@example.com")).await.expect("Failed to insert user");

    let users = repo.find_all().await.expect("Query failed");
    assert_eq!(users.len(), 2);
    assert_eq!(repo.count().await.expect("Count failed"), 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_role() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let input = new_user("Ada", "role@example.com");
    repo.insert(&input).await.expect("Failed to insert user");

    let affected = repo
        .update_role(&input.id, UserRole::Admin)
        .await
        .expect("Update failed");
    assert_eq!(affected, 1);

    let found = repo
        .find_by_id(&input.id)
        .await
        .expect("Query failed")
        .expect("User not found");
    assert_eq!(found.role, UserRole::Admin);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_user() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let input = new_user("Ada", "delete@example.com");
    repo.insert(&input).await.expect("Failed to insert user");

    assert_eq!(repo.delete(&input.id).await.expect("Delete failed"), 1);
    assert!(repo.find_by_id(&input.id).await.expect("Query failed").is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_nonexistent_user() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    assert_eq!(repo.delete(&UserId::generate()).await.expect("Delete failed"), 0);
}
