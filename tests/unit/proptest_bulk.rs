//! Property-based tests for the bulk executor
//!
//! Uses proptest to verify the report invariants for arbitrary mixes of
//! missing, failing, and healthy assets.

use assetkeeper::core::models::{AssetStatus, BulkOperation};
use proptest::prelude::*;

use crate::common::{FakeBackend, executor};

/// How one generated asset behaves
#[derive(Debug, Clone, Copy)]
enum Item {
    Healthy,
    Missing,
    Failing,
}

fn item() -> impl Strategy<Value = Item> {
    prop_oneof![Just(Item::Healthy), Just(Item::Missing), Just(Item::Failing)]
}

fn operation() -> impl Strategy<Value = BulkOperation> {
    prop_oneof![
        Just(BulkOperation::Delete),
        Just(BulkOperation::SetStatus {
            status: AssetStatus::Maintenance
        }),
        "[a-z]{1,8}".prop_map(|department_id| BulkOperation::Transfer { department_id }),
        "[A-Z][a-z]{1,8}".prop_map(|location| BulkOperation::SetLocation { location }),
    ]
}

fn run(
    items: &[Item],
    batch_available: bool,
    operation: &BulkOperation,
) -> assetkeeper::core::models::BulkOperationResult {
    let mut backend = FakeBackend::new();
    let mut ids = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let id = format!("A{i}");
        backend = match item {
            Item::Healthy => backend.with_asset(&id, AssetStatus::Available),
            Item::Missing => backend,
            Item::Failing => backend.with_asset(&id, AssetStatus::Available).failing_item(&id),
        };
        ids.push(id);
    }
    if !batch_available {
        backend = backend.batch_unavailable();
    }
    let backend = backend.into_arc();

    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(executor(&backend).execute(operation, &ids)).unwrap()
}

proptest! {
    /// Every id is either processed or failed, never both or neither
    #[test]
    fn counts_cover_every_id(
        items in prop::collection::vec(item(), 1..20),
        batch_available in any::<bool>(),
        op in operation(),
    ) {
        let result = run(&items, batch_available, &op);
        prop_assert_eq!(result.processed_count + result.error_count, items.len());
        prop_assert_eq!(result.errors.len(), result.error_count);
    }

    /// Success means zero errors
    #[test]
    fn success_iff_no_errors(
        items in prop::collection::vec(item(), 1..20),
        batch_available in any::<bool>(),
        op in operation(),
    ) {
        let result = run(&items, batch_available, &op);
        prop_assert_eq!(result.success, result.error_count == 0);
    }

    /// Per-item fallback fails exactly the missing and failing ids
    #[test]
    fn fallback_errors_match_bad_items(
        items in prop::collection::vec(item(), 1..20),
        op in operation(),
    ) {
        let result = run(&items, false, &op);
        let bad = items.iter().filter(|i| !matches!(i, Item::Healthy)).count();
        prop_assert_eq!(result.error_count, bad);
    }

    /// Setting a status on healthy assets never fails, whichever strategy runs
    #[test]
    fn set_status_on_healthy_assets_is_clean(count in 1usize..10, batch_available in any::<bool>()) {
        let items = vec![Item::Healthy; count];
        let op = BulkOperation::SetStatus { status: AssetStatus::Retired };
        let result = run(&items, batch_available, &op);
        prop_assert!(result.success);
        prop_assert_eq!(result.processed_count, count);
    }
}
