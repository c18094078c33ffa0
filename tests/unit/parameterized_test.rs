//! Parameterized tests using test-case
//!
//! These tests use test-case to run the same test logic with different inputs.

use assetkeeper::core::models::{AssetStatus, AssignmentStatus, BulkOperation};
use assetkeeper::core::services::{LifecycleTrigger, derived_asset_status, expected_status};
use assetkeeper::core::{Error, ErrorKind};
use test_case::test_case;

use crate::common::{FakeBackend, synchronizer};

// =============================================================================
// Status Parsing Tests
// =============================================================================

#[test_case("available", AssetStatus::Available ; "lowercase")]
#[test_case("ASSIGNED", AssetStatus::Assigned ; "uppercase")]
#[test_case("Damaged", AssetStatus::Damaged ; "canonical")]
#[test_case("maintenance", AssetStatus::Maintenance ; "maintenance")]
#[test_case("retired", AssetStatus::Retired ; "retired")]
fn test_asset_status_parsing(input: &str, expected: AssetStatus) {
    assert_eq!(input.parse::<AssetStatus>().unwrap(), expected);
}

#[test_case("returned", AssignmentStatus::Returned ; "returned")]
#[test_case("cancelled", AssignmentStatus::Cancelled ; "british spelling")]
#[test_case("canceled", AssignmentStatus::Cancelled ; "american spelling")]
#[test_case("LOST", AssignmentStatus::Lost ; "uppercase")]
fn test_assignment_status_parsing(input: &str, expected: AssignmentStatus) {
    assert_eq!(input.parse::<AssignmentStatus>().unwrap(), expected);
}

#[test_case("lost" ; "assignment status is not an asset status")]
#[test_case("" ; "empty")]
#[test_case("in repair" ; "free text")]
fn test_invalid_asset_status(input: &str) {
    assert!(input.parse::<AssetStatus>().is_err());
}

// =============================================================================
// Lifecycle Mapping Tests
// =============================================================================

#[test_case(AssignmentStatus::Returned, Some(AssetStatus::Available) ; "returned frees")]
#[test_case(AssignmentStatus::Cancelled, Some(AssetStatus::Available) ; "cancelled frees")]
#[test_case(AssignmentStatus::Lost, Some(AssetStatus::Damaged) ; "lost damages")]
#[test_case(AssignmentStatus::Damaged, Some(AssetStatus::Damaged) ; "damaged damages")]
#[test_case(AssignmentStatus::Active, None ; "active writes nothing")]
fn test_update_from_active(next: AssignmentStatus, expected: Option<AssetStatus>) {
    let trigger = LifecycleTrigger::Updated {
        previous: AssignmentStatus::Active,
    };
    assert_eq!(derived_asset_status(trigger, next), expected);
}

#[test_case(AssignmentStatus::Returned, AssetStatus::Available ; "returned")]
#[test_case(AssignmentStatus::Cancelled, AssetStatus::Available ; "cancelled")]
#[test_case(AssignmentStatus::Lost, AssetStatus::Damaged ; "lost")]
#[test_case(AssignmentStatus::Damaged, AssetStatus::Damaged ; "damaged")]
#[tokio::test]
async fn test_closing_assignment_sets_asset(next: AssignmentStatus, expected: AssetStatus) {
    let backend = FakeBackend::new()
        .with_asset("A1", AssetStatus::Assigned)
        .with_assignment("ASN-1", "A1", AssignmentStatus::Active)
        .into_arc();

    synchronizer(&backend).transition("ASN-1", next).await.unwrap();

    assert_eq!(backend.asset_status("A1"), Some(expected));
}

#[test_case(AssetStatus::Assigned, 0, AssetStatus::Available ; "orphaned assigned is freed")]
#[test_case(AssetStatus::Available, 1, AssetStatus::Assigned ; "held asset is assigned")]
#[test_case(AssetStatus::Retired, 0, AssetStatus::Retired ; "retired kept")]
#[test_case(AssetStatus::Damaged, 2, AssetStatus::Assigned ; "duplicates still assigned")]
fn test_expected_status(current: AssetStatus, active: usize, expected: AssetStatus) {
    assert_eq!(expected_status(current, active), expected);
}

// =============================================================================
// Error Classification Tests
// =============================================================================

#[test_case(Error::validation("x"), ErrorKind::Validation, 400 ; "validation")]
#[test_case(Error::assignment_not_found("ASN-1"), ErrorKind::NotFound, 404 ; "not found")]
#[test_case(Error::remote(Some(503), "down"), ErrorKind::Remote, 502 ; "remote")]
fn test_error_kinds(error: Error, kind: ErrorKind, status: u16) {
    assert_eq!(error.kind(), kind);
    assert_eq!(kind.status_code(), status);
}

// =============================================================================
// Operation Naming Tests
// =============================================================================

#[test_case(BulkOperation::Delete, "delete", true ; "delete")]
#[test_case(BulkOperation::SetStatus { status: AssetStatus::Retired }, "setStatus", true ; "set status")]
#[test_case(BulkOperation::Transfer { department_id: "ops".to_string() }, "transfer", false ; "transfer")]
#[test_case(BulkOperation::SetLocation { location: "Bay 2".to_string() }, "setLocation", false ; "set location")]
fn test_operation_names(op: BulkOperation, name: &str, touches_assignments: bool) {
    assert_eq!(op.name(), name);
    assert_eq!(op.touches_assignments(), touches_assignments);
}
