use expenses_backend::models::{
    CreateCategoryRequest, CreateTransactionRequest, UpdateTransactionRequest,
};
use expenses_backend::services::{AggregationService, CategoryService, LedgerService};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

fn tx(amount: i64, description: &str, date: &str) -> CreateTransactionRequest {
    CreateTransactionRequest {
        category_id: None,
        amount,
        running_balance: None,
        description: description.to_string(),
        date: date.to_string(),
    }
}

async fn category(db: &DatabaseConnection, name: &str) -> i64 {
    CategoryService::new(db.clone())
        .create(CreateCategoryRequest {
            name: name.to_string(),
            color: "#cccccc".to_string(),
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn first_transaction_balance_is_negated_amount() {
    let db = setup().await;
    let ledger = LedgerService::new(db);

    let created = ledger.create(tx(500, "Coffee", "2026-01-05")).await.unwrap();
    assert_eq!(created.running_balance, -500);
}

#[tokio::test]
async fn running_balance_chains_across_creates() {
    let db = setup().await;
    let ledger = LedgerService::new(db);

    let a = ledger.create(tx(500, "Coffee", "2026-01-05")).await.unwrap();
    let b = ledger.create(tx(200, "Bus", "2026-01-06")).await.unwrap();
    let c = ledger
        .create(tx(-100, "Refund", "2026-01-07"))
        .await
        .unwrap();

    assert_eq!(a.running_balance, -500);
    assert_eq!(b.running_balance, -700);
    assert_eq!(c.running_balance, -600);
}

#[tokio::test]
async fn balance_override_is_stored_verbatim_and_chained_from() {
    let db = setup().await;
    let ledger = LedgerService::new(db);

    let seed = ledger
        .create(CreateTransactionRequest {
            running_balance: Some(10_000),
            ..tx(0, "Opening balance", "2026-01-01")
        })
        .await
        .unwrap();
    assert_eq!(seed.running_balance, 10_000);

    let next = ledger
        .create(tx(1500, "Groceries", "2026-01-02"))
        .await
        .unwrap();
    assert_eq!(next.running_balance, 8500);
}

#[tokio::test]
async fn empty_description_is_rejected() {
    let db = setup().await;
    let ledger = LedgerService::new(db);

    let err = ledger.create(tx(100, "   ", "2026-01-05")).await;
    assert!(matches!(
        err,
        Err(expenses_backend::AppError::ValidationError(_))
    ));
}

#[tokio::test]
async fn amount_update_cascades_delta_onto_later_rows() {
    let db = setup().await;
    let ledger = LedgerService::new(db);

    let a = ledger
        .create(CreateTransactionRequest {
            running_balance: Some(5000),
            ..tx(1000, "Rent", "2026-01-01")
        })
        .await
        .unwrap();
    let b = ledger
        .create(tx(500, "Groceries", "2026-01-02"))
        .await
        .unwrap();
    let c = ledger.create(tx(300, "Fuel", "2026-01-03")).await.unwrap();
    assert_eq!(b.running_balance, 4500);
    assert_eq!(c.running_balance, 4200);

    let mut merged = ledger.get_by_id(a.id).await.unwrap();
    let old_amount = merged.amount;
    let payload: UpdateTransactionRequest = serde_json::from_str(r#"{"amount": 1500}"#).unwrap();
    payload.apply_to(&mut merged);
    ledger.update_with_cascade(merged, old_amount).await.unwrap();

    assert_eq!(ledger.get_by_id(a.id).await.unwrap().running_balance, 4500);
    assert_eq!(ledger.get_by_id(b.id).await.unwrap().running_balance, 4000);
    assert_eq!(ledger.get_by_id(c.id).await.unwrap().running_balance, 3700);
}

#[tokio::test]
async fn description_only_update_leaves_all_balances_untouched() {
    let db = setup().await;
    let ledger = LedgerService::new(db);

    let a = ledger.create(tx(1000, "Rent", "2026-01-01")).await.unwrap();
    let b = ledger
        .create(tx(500, "Groceries", "2026-01-02"))
        .await
        .unwrap();

    let mut merged = ledger.get_by_id(a.id).await.unwrap();
    let old_amount = merged.amount;
    let payload: UpdateTransactionRequest =
        serde_json::from_str(r#"{"description": "January rent"}"#).unwrap();
    payload.apply_to(&mut merged);
    ledger.update_with_cascade(merged, old_amount).await.unwrap();

    let a_after = ledger.get_by_id(a.id).await.unwrap();
    assert_eq!(a_after.description, "January rent");
    assert_eq!(a_after.running_balance, -1000);
    assert_eq!(ledger.get_by_id(b.id).await.unwrap().running_balance, -1500);
}

#[tokio::test]
async fn updating_newest_row_cascades_nothing() {
    let db = setup().await;
    let ledger = LedgerService::new(db);

    let a = ledger.create(tx(1000, "Rent", "2026-01-01")).await.unwrap();
    let b = ledger
        .create(tx(500, "Groceries", "2026-01-02"))
        .await
        .unwrap();

    let mut merged = ledger.get_by_id(b.id).await.unwrap();
    let old_amount = merged.amount;
    let payload: UpdateTransactionRequest = serde_json::from_str(r#"{"amount": 800}"#).unwrap();
    payload.apply_to(&mut merged);
    ledger.update_with_cascade(merged, old_amount).await.unwrap();

    assert_eq!(ledger.get_by_id(a.id).await.unwrap().running_balance, -1000);
    assert_eq!(ledger.get_by_id(b.id).await.unwrap().running_balance, -1800);
}

#[tokio::test]
async fn update_missing_transaction_is_not_found() {
    let db = setup().await;
    let ledger = LedgerService::new(db);

    let ghost = expenses_backend::entities::transaction_entity::Model {
        id: 999,
        category_id: None,
        amount: 100,
        running_balance: -100,
        description: "Ghost".to_string(),
        date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        created_at: None,
        updated_at: None,
    };
    let err = ledger.update_with_cascade(ghost, 100).await;
    assert!(matches!(err, Err(expenses_backend::AppError::NotFound(_))));
}

#[tokio::test]
async fn delete_does_not_cascade() {
    let db = setup().await;
    let ledger = LedgerService::new(db);

    let a = ledger.create(tx(1000, "Rent", "2026-01-01")).await.unwrap();
    let b = ledger
        .create(tx(500, "Groceries", "2026-01-02"))
        .await
        .unwrap();

    ledger.delete(a.id).await.unwrap();

    assert!(matches!(
        ledger.get_by_id(a.id).await,
        Err(expenses_backend::AppError::NotFound(_))
    ));
    // Later balances still reflect the deleted row.
    assert_eq!(ledger.get_by_id(b.id).await.unwrap().running_balance, -1500);
}

#[tokio::test]
async fn delete_missing_transaction_is_not_found() {
    let db = setup().await;
    let ledger = LedgerService::new(db);

    let err = ledger.delete(42).await;
    assert!(matches!(err, Err(expenses_backend::AppError::NotFound(_))));
}

#[tokio::test]
async fn index_joins_category_and_orders_newest_first() {
    let db = setup().await;
    let groceries = category(&db, "Groceries").await;
    let ledger = LedgerService::new(db);

    ledger
        .create(CreateTransactionRequest {
            category_id: Some(groceries),
            ..tx(500, "Market", "2026-01-02")
        })
        .await
        .unwrap();
    ledger
        .create(tx(200, "Uncategorized", "2026-01-03"))
        .await
        .unwrap();

    let rows = ledger.index().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].description, "Uncategorized");
    assert_eq!(rows[0].category_name, None);
    assert_eq!(rows[1].category_name.as_deref(), Some("Groceries"));
}

#[tokio::test]
async fn category_id_zero_means_uncategorized() {
    let db = setup().await;
    let ledger = LedgerService::new(db);

    let created = ledger
        .create(CreateTransactionRequest {
            category_id: Some(0),
            ..tx(100, "No category", "2026-01-05")
        })
        .await
        .unwrap();
    assert_eq!(created.category_id, None);
}

#[tokio::test]
async fn monthly_sum_excludes_income_and_uncategorized() {
    let db = setup().await;
    let groceries = category(&db, "Groceries").await;
    let income = category(&db, "Gajian").await;
    let ledger = LedgerService::new(db.clone());
    let aggregation = AggregationService::new(db);

    ledger
        .create(CreateTransactionRequest {
            category_id: Some(groceries),
            ..tx(750, "Market", "2026-01-10")
        })
        .await
        .unwrap();
    ledger
        .create(CreateTransactionRequest {
            category_id: Some(groceries),
            ..tx(250, "Market again", "2026-01-20")
        })
        .await
        .unwrap();
    // Income and uncategorized rows stay out of the sum.
    ledger
        .create(CreateTransactionRequest {
            category_id: Some(income),
            ..tx(-50_000, "Payday", "2026-01-25")
        })
        .await
        .unwrap();
    ledger
        .create(tx(999, "No category", "2026-01-15"))
        .await
        .unwrap();
    // Outside the month window.
    ledger
        .create(CreateTransactionRequest {
            category_id: Some(groceries),
            ..tx(400, "February", "2026-02-01")
        })
        .await
        .unwrap();

    let total = aggregation.expenses_by_month("2026-01-17").await.unwrap();
    assert_eq!(total, 1000);
}

#[tokio::test]
async fn monthly_sum_is_zero_when_nothing_matches() {
    let db = setup().await;
    let aggregation = AggregationService::new(db);

    assert_eq!(aggregation.expenses_by_month("2026-01-01").await.unwrap(), 0);
}

#[tokio::test]
async fn category_breakdown_uses_trailing_window() {
    let db = setup().await;
    let groceries = category(&db, "Groceries").await;
    let transport = category(&db, "Transport").await;
    let ledger = LedgerService::new(db.clone());
    let aggregation = AggregationService::new(db);

    // Window for 2026-01-17 is (2025-12-02, 2026-01-01].
    ledger
        .create(CreateTransactionRequest {
            category_id: Some(groceries),
            ..tx(600, "December market", "2025-12-20")
        })
        .await
        .unwrap();
    ledger
        .create(CreateTransactionRequest {
            category_id: Some(transport),
            ..tx(150, "New year taxi", "2026-01-01")
        })
        .await
        .unwrap();
    // One day past the window end.
    ledger
        .create(CreateTransactionRequest {
            category_id: Some(groceries),
            ..tx(999, "January market", "2026-01-02")
        })
        .await
        .unwrap();

    let mut rows = aggregation
        .expenses_by_month_category("2026-01-17")
        .await
        .unwrap();
    rows.sort_by_key(|r| r.id);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Groceries");
    assert_eq!(rows[0].amount, 600);
    assert_eq!(rows[1].name, "Transport");
    assert_eq!(rows[1].amount, 150);
}

#[tokio::test]
async fn balance_by_date_picks_latest_row_on_or_before() {
    let db = setup().await;
    let ledger = LedgerService::new(db.clone());
    let aggregation = AggregationService::new(db);

    ledger.create(tx(500, "Coffee", "2026-01-05")).await.unwrap();
    ledger.create(tx(200, "Bus", "2026-01-05")).await.unwrap();
    ledger.create(tx(300, "Lunch", "2026-01-10")).await.unwrap();

    // Same-date tie resolves to the higher id.
    assert_eq!(aggregation.balance_by_date("2026-01-05").await.unwrap(), -700);
    assert_eq!(aggregation.balance_by_date("2026-01-07").await.unwrap(), -700);
    assert_eq!(aggregation.balance_by_date("2026-02-01").await.unwrap(), -1000);
}

#[tokio::test]
async fn balance_by_date_is_zero_before_any_transaction() {
    let db = setup().await;
    let aggregation = AggregationService::new(db);

    assert_eq!(aggregation.balance_by_date("2020-01-01").await.unwrap(), 0);
}

#[tokio::test]
async fn invalid_date_is_a_validation_error() {
    let db = setup().await;
    let ledger = LedgerService::new(db.clone());
    let aggregation = AggregationService::new(db);

    assert!(matches!(
        ledger.create(tx(100, "Bad date", "05-01-2026")).await,
        Err(expenses_backend::AppError::ValidationError(_))
    ));
    assert!(matches!(
        aggregation.balance_by_date("not-a-date").await,
        Err(expenses_backend::AppError::ValidationError(_))
    ));
}
