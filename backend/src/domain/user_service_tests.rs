//! Tests for the user service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{ErrorCode, FieldUpdate, UserDraft};

fn stored_user(id: i32, username: &str, age: i32) -> User {
    User::new(UserDraft {
        id: UserId::new(id),
        username: username.to_owned(),
        firstname: "Jane".to_owned(),
        lastname: "Doe".to_owned(),
        age,
        slug: Slug::from_username(username),
    })
}

#[fixture]
fn new_jane() -> NewUser {
    NewUser {
        username: "jane_doe".to_owned(),
        firstname: "Jane".to_owned(),
        lastname: "Doe".to_owned(),
        age: 30,
    }
}

fn service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo))
}

#[rstest]
#[tokio::test]
async fn create_user_inserts_with_generated_slug(new_jane: NewUser) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .withf(|username| username == "jane_doe")
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert()
        .withf(|user, slug| user.username == "jane_doe" && slug.as_str() == "jane-doe")
        .times(1)
        .returning(|user, slug| {
            Ok(User::new(UserDraft {
                id: UserId::new(1),
                username: user.username.clone(),
                firstname: user.firstname.clone(),
                lastname: user.lastname.clone(),
                age: user.age,
                slug: slug.clone(),
            }))
        });

    let created = service(repo)
        .create_user(new_jane)
        .await
        .expect("create succeeds");

    assert_eq!(created.id(), UserId::new(1));
    assert_eq!(created.slug().as_str(), "jane-doe");
}

#[rstest]
#[tokio::test]
async fn create_user_rejects_taken_username_without_writing(new_jane: NewUser) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .times(1)
        .return_once(|_| Ok(Some(stored_user(1, "jane_doe", 30))));
    repo.expect_insert().times(0);

    let error = service(repo)
        .create_user(new_jane)
        .await
        .expect_err("duplicate username");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), USERNAME_TAKEN_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn create_user_maps_storage_conflict_from_a_lost_race(new_jane: NewUser) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .return_once(|_, _| Err(UserPersistenceError::conflict("users_username_key")));

    let error = service(repo)
        .create_user(new_jane)
        .await
        .expect_err("conflict");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), USERNAME_TAKEN_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn get_user_returns_not_found_for_unknown_id() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = service(repo)
        .get_user(UserId::new(42))
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), USER_NOT_FOUND_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn list_users_passes_repository_order_through() {
    let users = vec![stored_user(1, "a", 1), stored_user(2, "b", 2)];
    let expected = users.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_list().times(1).return_once(move || Ok(users));

    let listed = service(repo).list_users().await.expect("list succeeds");

    assert_eq!(listed, expected);
}

#[rstest]
#[tokio::test]
async fn update_user_applies_partial_changes() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user(3, "jane_doe", 30))));
    repo.expect_update()
        .withf(|id, changes| {
            *id == UserId::new(3)
                && changes.age == FieldUpdate::Set(0)
                && changes.username == FieldUpdate::Unchanged
        })
        .times(1)
        .returning(|_, changes| Ok(Some(stored_user(3, "jane_doe", 30).with_changes(changes))));

    let changes = UserChanges {
        age: FieldUpdate::Set(0),
        ..UserChanges::default()
    };
    let updated = service(repo)
        .update_user(UserId::new(3), changes)
        .await
        .expect("update succeeds");

    assert_eq!(updated.age(), 0);
    assert_eq!(updated.slug().as_str(), "jane-doe");
}

#[rstest]
#[tokio::test]
async fn update_user_with_empty_changes_issues_no_statement() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user(3, "jane_doe", 30))));
    repo.expect_update().times(0);

    let unchanged = service(repo)
        .update_user(UserId::new(3), UserChanges::default())
        .await
        .expect("empty update succeeds");

    assert_eq!(unchanged, stored_user(3, "jane_doe", 30));
}

#[rstest]
#[tokio::test]
async fn update_user_returns_not_found_without_mutation() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_update().times(0);

    let changes = UserChanges {
        age: FieldUpdate::Set(31),
        ..UserChanges::default()
    };
    let error = service(repo)
        .update_user(UserId::new(9), changes)
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_user_reports_not_found_when_row_disappears() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user(3, "jane_doe", 30))));
    repo.expect_update().times(1).return_once(|_, _| Ok(None));

    let changes = UserChanges {
        firstname: FieldUpdate::Set("Janet".to_owned()),
        ..UserChanges::default()
    };
    let error = service(repo)
        .update_user(UserId::new(3), changes)
        .await
        .expect_err("row deleted concurrently");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_user_maps_username_collision_to_conflict() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user(3, "jane_doe", 30))));
    repo.expect_update()
        .times(1)
        .return_once(|_, _| Err(UserPersistenceError::conflict("users_username_key")));

    let changes = UserChanges {
        username: FieldUpdate::Set("john".to_owned()),
        ..UserChanges::default()
    };
    let error = service(repo)
        .update_user(UserId::new(3), changes)
        .await
        .expect_err("conflict");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn delete_user_removes_existing_row() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user(4, "gone", 50))));
    repo.expect_delete()
        .withf(|id| *id == UserId::new(4))
        .times(1)
        .return_once(|_| Ok(true));

    service(repo)
        .delete_user(UserId::new(4))
        .await
        .expect("delete succeeds");
}

#[rstest]
#[tokio::test]
async fn delete_user_returns_not_found_without_mutation() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_delete().times(0);

    let error = service(repo)
        .delete_user(UserId::new(4))
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_user_reports_not_found_when_row_disappears() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user(4, "gone", 50))));
    repo.expect_delete().times(1).return_once(|_| Ok(false));

    let error = service(repo)
        .delete_user(UserId::new(4))
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(UserPersistenceError::connection("pool timed out"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax error"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_failures_map_to_domain_errors(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_list().times(1).return_once(move || Err(failure));

    let error = service(repo).list_users().await.expect_err("failure");

    assert_eq!(error.code(), expected);
}
