use chrono::NaiveDate;
use uuid::Uuid;

use engine::{
    CreateCategoryCmd, CreateTransactionCmd, DeleteCategoryCmd, DeleteTransactionCmd, EngineError,
    EntryKind, GetCategoryQuery, ListCategoriesQuery, UpdateCategoryCmd,
};

mod common;

#[tokio::test]
async fn create_then_get_round_trips() {
    let engine = common::engine_with_db().await;
    let alice = common::register(&engine, "alice@example.com").await;

    let created = engine
        .create_category(CreateCategoryCmd::new(alice, "Salary", EntryKind::Income))
        .await
        .unwrap();

    let fetched = engine
        .category(GetCategoryQuery::new(created.id, alice))
        .await
        .unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Salary");
    assert_eq!(fetched.kind, EntryKind::Income);
}

#[tokio::test]
async fn list_orders_by_name_ascending() {
    let engine = common::engine_with_db().await;
    let alice = common::register(&engine, "alice@example.com").await;
    let bob = common::register(&engine, "bob@example.com").await;

    for name in ["Rent", "Food", "Salary"] {
        engine
            .create_category(CreateCategoryCmd::new(alice, name, EntryKind::Expense))
            .await
            .unwrap();
    }
    engine
        .create_category(CreateCategoryCmd::new(bob, "Bob stuff", EntryKind::Expense))
        .await
        .unwrap();

    let listed = engine
        .list_categories(ListCategoriesQuery::new(alice))
        .await
        .unwrap();
    let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Food", "Rent", "Salary"]);
}

#[tokio::test]
async fn update_replaces_name_and_kind() {
    let engine = common::engine_with_db().await;
    let alice = common::register(&engine, "alice@example.com").await;

    let created = engine
        .create_category(CreateCategoryCmd::new(alice, "Salry", EntryKind::Expense))
        .await
        .unwrap();

    let updated = engine
        .update_category(UpdateCategoryCmd::new(
            created.id,
            alice,
            "Salary",
            EntryKind::Income,
        ))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Salary");
    assert_eq!(updated.kind, EntryKind::Income);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn cross_user_access_is_forbidden_regardless_of_operation() {
    let engine = common::engine_with_db().await;
    let alice = common::register(&engine, "alice@example.com").await;
    let bob = common::register(&engine, "bob@example.com").await;

    let category = engine
        .create_category(CreateCategoryCmd::new(alice, "Salary", EntryKind::Income))
        .await
        .unwrap();

    let get = engine
        .category(GetCategoryQuery::new(category.id, bob))
        .await
        .unwrap_err();
    let update = engine
        .update_category(UpdateCategoryCmd::new(category.id, bob, "X", EntryKind::Income))
        .await
        .unwrap_err();
    let delete = engine
        .delete_category(DeleteCategoryCmd::new(category.id, bob))
        .await
        .unwrap_err();

    for err in [get, update, delete] {
        assert!(matches!(err, EngineError::Forbidden(_)), "got {err:?}");
    }
}

#[tokio::test]
async fn missing_category_is_not_found() {
    let engine = common::engine_with_db().await;
    let alice = common::register(&engine, "alice@example.com").await;

    let id = Uuid::new_v4();
    let err = engine
        .category(GetCategoryQuery::new(id, alice))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::NotFound {
            entity: "category",
            id,
        }
    );
}

#[tokio::test]
async fn delete_removes_the_category() {
    let engine = common::engine_with_db().await;
    let alice = common::register(&engine, "alice@example.com").await;

    let category = engine
        .create_category(CreateCategoryCmd::new(alice, "Salary", EntryKind::Income))
        .await
        .unwrap();

    engine
        .delete_category(DeleteCategoryCmd::new(category.id, alice))
        .await
        .unwrap();

    let err = engine
        .category(GetCategoryQuery::new(category.id, alice))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));
}

#[tokio::test]
async fn delete_is_refused_while_transactions_reference_the_category() {
    let engine = common::engine_with_db().await;
    let alice = common::register(&engine, "alice@example.com").await;

    let category = engine
        .create_category(CreateCategoryCmd::new(alice, "Salary", EntryKind::Income))
        .await
        .unwrap();
    let tx = engine
        .create_transaction(
            CreateTransactionCmd::new(
                alice,
                100_000,
                EntryKind::Income,
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            )
            .category_id(category.id),
        )
        .await
        .unwrap();

    let err = engine
        .delete_category(DeleteCategoryCmd::new(category.id, alice))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Conflict(_)), "got {err:?}");

    // Once the transaction is gone the category can be deleted.
    engine
        .delete_transaction(DeleteTransactionCmd::new(tx.id, alice))
        .await
        .unwrap();
    engine
        .delete_category(DeleteCategoryCmd::new(category.id, alice))
        .await
        .unwrap();
}

#[tokio::test]
async fn create_rejects_blank_and_overlong_names() {
    let engine = common::engine_with_db().await;
    let alice = common::register(&engine, "alice@example.com").await;

    for name in ["   ".to_string(), "x".repeat(101)] {
        let err = engine
            .create_category(CreateCategoryCmd::new(alice, name, EntryKind::Expense))
            .await
            .unwrap_err();
        let EngineError::Validation(errors) = err else {
            panic!("expected validation failure, got {err:?}");
        };
        assert!(errors.contains("name"));
    }
}
