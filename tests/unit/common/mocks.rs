//! In-memory backend implementing every port
//!
//! Behaves like the REST backend: assignment writes never touch asset
//! status, and every call is recorded so tests can assert on traffic.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use assetkeeper::core::models::{
    Asset, AssetPatch, AssetStatus, Assignment, AssignmentFilter, AssignmentPatch,
    AssignmentStatus, BulkOperation, NewAssignment,
};
use assetkeeper::core::ports::{AssetApi, AssignmentApi, BatchApi};
use assetkeeper::core::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;

/// HTTP 500 as the adapter would report it
pub fn server_error() -> Error {
    Error::remote(Some(500), "internal server error")
}

fn apply_asset_patch(patch: &AssetPatch, asset: &mut Asset) {
    if let Some(department) = &patch.department_id {
        asset.department_id = Some(department.clone());
    }
    if let Some(location) = &patch.location {
        asset.location = Some(location.clone());
    }
    if let Some(category) = &patch.category_id {
        asset.category_id = Some(category.clone());
    }
}

fn apply_assignment_patch(patch: &AssignmentPatch, assignment: &mut Assignment) {
    if let Some(status) = patch.status {
        assignment.status = status;
    }
    if let Some(date) = patch.return_date {
        assignment.return_date = Some(date);
    }
    if let Some(notes) = &patch.notes {
        assignment.notes = Some(notes.clone());
    }
    if let Some(urgent) = patch.is_urgent {
        assignment.is_urgent = urgent;
    }
}

fn filter_matches(filter: &AssignmentFilter, assignment: &Assignment) -> bool {
    filter.asset_id.as_ref().is_none_or(|id| *id == assignment.asset_id)
        && filter.assigned_to_id.as_ref().is_none_or(|id| *id == assignment.assigned_to_id)
        && filter.status.is_none_or(|status| status == assignment.status)
}

#[derive(Default)]
struct State {
    assets: BTreeMap<String, Asset>,
    assignments: BTreeMap<String, Assignment>,
    next_assignment: usize,
    calls: Vec<String>,
    failing_items: HashSet<String>,
    failing_status_writes: HashSet<String>,
    failing_assignment_writes: HashSet<String>,
    batch_error: Option<Error>,
    list_fails: bool,
    failing_lists: HashSet<String>,
    cascade_delete: bool,
}

impl State {
    fn insert_assignment(&mut self, new: &NewAssignment) -> Assignment {
        self.next_assignment += 1;
        let assignment = Assignment {
            id: format!("ASN-{}", self.next_assignment),
            asset_id: new.asset_id.clone(),
            assigned_to_id: new.assigned_to_id.clone(),
            assigned_by: new.assigned_by.clone(),
            assignment_date: new.assignment_date,
            return_date: None,
            status: new.status,
            is_urgent: new.is_urgent,
            is_automatic_approval: new.is_automatic_approval,
            notes: new.notes.clone(),
        };
        self.assignments.insert(assignment.id.clone(), assignment.clone());
        assignment
    }

    fn remove_asset(&mut self, id: &str) -> bool {
        let removed = self.assets.remove(id).is_some();
        if removed && self.cascade_delete {
            self.assignments.retain(|_, a| a.asset_id != id);
        }
        removed
    }
}

/// Fake backend with failure injection
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn with_asset(self, id: &str, status: AssetStatus) -> Self {
        self.lock().assets.insert(id.to_string(), Asset::new(id, status));
        self
    }

    /// Seed an assignment without touching the asset
    pub fn with_assignment(self, id: &str, asset_id: &str, status: AssignmentStatus) -> Self {
        let assignment = Assignment {
            id: id.to_string(),
            asset_id: asset_id.to_string(),
            assigned_to_id: "u-1".to_string(),
            assigned_by: "admin".to_string(),
            assignment_date: Utc::now(),
            return_date: None,
            status,
            is_urgent: false,
            is_automatic_approval: false,
            notes: None,
        };
        self.lock().assignments.insert(id.to_string(), assignment);
        self
    }

    /// Per-item writes on this asset fail with HTTP 500
    pub fn failing_item(self, asset_id: &str) -> Self {
        self.lock().failing_items.insert(asset_id.to_string());
        self
    }

    /// Status writes on this asset fail with HTTP 500
    pub fn failing_status_write(self, asset_id: &str) -> Self {
        self.lock().failing_status_writes.insert(asset_id.to_string());
        self
    }

    /// Updates of this assignment fail with HTTP 500
    pub fn failing_assignment_write(self, assignment_id: &str) -> Self {
        self.lock().failing_assignment_writes.insert(assignment_id.to_string());
        self
    }

    /// The batch endpoints answer 404
    pub fn batch_unavailable(self) -> Self {
        self.with_batch_error(Error::NotFound {
            entity: "batch endpoint",
            id: "delete".to_string(),
        })
    }

    pub fn with_batch_error(self, error: Error) -> Self {
        self.lock().batch_error = Some(error);
        self
    }

    /// Listing assignments fails with HTTP 500
    pub fn failing_list(self) -> Self {
        self.lock().list_fails = true;
        self
    }

    /// Listing assignments of this asset fails with HTTP 500
    pub fn failing_list_for(self, asset_id: &str) -> Self {
        self.lock().failing_lists.insert(asset_id.to_string());
        self
    }

    /// Deleting an asset removes its assignments too
    pub fn cascade_delete(self) -> Self {
        self.lock().cascade_delete = true;
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn asset_status(&self, id: &str) -> Option<AssetStatus> {
        self.lock().assets.get(id).map(|a| a.status)
    }

    pub fn asset(&self, id: &str) -> Option<Asset> {
        self.lock().assets.get(id).cloned()
    }

    pub fn assignment(&self, id: &str) -> Option<Assignment> {
        self.lock().assignments.get(id).cloned()
    }

    pub fn assignments_of(&self, asset_id: &str) -> Vec<Assignment> {
        self.lock().assignments.values().filter(|a| a.asset_id == asset_id).cloned().collect()
    }

    /// Every call so far, e.g. `"update_asset_status A1 Assigned"`
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Number of calls to one port method
    pub fn call_count(&self, method: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.split_whitespace().next() == Some(method))
            .count()
    }

    fn record(&self, call: String) -> MutexGuard<'_, State> {
        let mut state = self.lock();
        state.calls.push(call);
        state
    }
}

#[async_trait]
impl AssetApi for FakeBackend {
    async fn get_asset(&self, id: &str) -> Result<Asset> {
        let state = self.record(format!("get_asset {id}"));
        state.assets.get(id).cloned().ok_or_else(|| Error::asset_not_found(id))
    }

    async fn update_asset_status(&self, id: &str, status: AssetStatus) -> Result<()> {
        let mut state = self.record(format!("update_asset_status {id} {status}"));
        if state.failing_items.contains(id) || state.failing_status_writes.contains(id) {
            return Err(server_error());
        }
        let asset = state.assets.get_mut(id).ok_or_else(|| Error::asset_not_found(id))?;
        asset.status = status;
        Ok(())
    }

    async fn update_asset(&self, id: &str, patch: &AssetPatch) -> Result<()> {
        let mut state = self.record(format!("update_asset {id}"));
        if state.failing_items.contains(id) {
            return Err(server_error());
        }
        let asset = state.assets.get_mut(id).ok_or_else(|| Error::asset_not_found(id))?;
        apply_asset_patch(patch, asset);
        Ok(())
    }

    async fn delete_asset(&self, id: &str) -> Result<()> {
        let mut state = self.record(format!("delete_asset {id}"));
        if state.failing_items.contains(id) {
            return Err(server_error());
        }
        if state.remove_asset(id) {
            Ok(())
        } else {
            Err(Error::asset_not_found(id))
        }
    }
}

#[async_trait]
impl AssignmentApi for FakeBackend {
    async fn create_assignment(&self, new: &NewAssignment) -> Result<Assignment> {
        let mut state = self.record(format!("create_assignment {}", new.asset_id));
        if state.failing_items.contains(&new.asset_id) {
            return Err(server_error());
        }
        Ok(state.insert_assignment(new))
    }

    async fn get_assignment(&self, id: &str) -> Result<Assignment> {
        let state = self.record(format!("get_assignment {id}"));
        state.assignments.get(id).cloned().ok_or_else(|| Error::assignment_not_found(id))
    }

    async fn update_assignment(&self, id: &str, patch: &AssignmentPatch) -> Result<Assignment> {
        let mut state = self.record(format!("update_assignment {id}"));
        if state.failing_assignment_writes.contains(id) {
            return Err(server_error());
        }
        let assignment =
            state.assignments.get_mut(id).ok_or_else(|| Error::assignment_not_found(id))?;
        apply_assignment_patch(patch, assignment);
        Ok(assignment.clone())
    }

    async fn delete_assignment(&self, id: &str) -> Result<()> {
        let mut state = self.record(format!("delete_assignment {id}"));
        state.assignments.remove(id).map(|_| ()).ok_or_else(|| Error::assignment_not_found(id))
    }

    async fn list_assignments(&self, filter: &AssignmentFilter) -> Result<Vec<Assignment>> {
        let state = self.record("list_assignments".to_string());
        let asset_fails =
            filter.asset_id.as_ref().is_some_and(|id| state.failing_lists.contains(id));
        if state.list_fails || asset_fails {
            return Err(server_error());
        }
        Ok(state.assignments.values().filter(|a| filter_matches(filter, a)).cloned().collect())
    }
}

#[async_trait]
impl BatchApi for FakeBackend {
    async fn execute_batch(&self, operation: &BulkOperation, ids: &[String]) -> Result<()> {
        let mut state = self.record(format!("execute_batch {}", operation.name()));
        if let Some(error) = &state.batch_error {
            return Err(error.clone());
        }
        if let Some(missing) = ids.iter().find(|id| !state.assets.contains_key(*id)) {
            return Err(Error::remote(Some(400), format!("unknown asset {missing}")));
        }

        for id in ids {
            match operation {
                BulkOperation::Delete => {
                    state.remove_asset(id);
                },
                BulkOperation::SetStatus { status } => {
                    if let Some(asset) = state.assets.get_mut(id) {
                        asset.status = *status;
                    }
                },
                BulkOperation::Assign {
                    assigned_to_id,
                    assigned_by,
                } => {
                    let new = NewAssignment::new(id.as_str(), assigned_to_id.as_str(), assigned_by.as_str());
                    state.insert_assignment(&new);
                },
                BulkOperation::Transfer { department_id } => {
                    if let Some(asset) = state.assets.get_mut(id) {
                        asset.department_id = Some(department_id.clone());
                    }
                },
                BulkOperation::SetLocation { location } => {
                    if let Some(asset) = state.assets.get_mut(id) {
                        asset.location = Some(location.clone());
                    }
                },
                BulkOperation::SetCategory { category_id } => {
                    if let Some(asset) = state.assets.get_mut(id) {
                        asset.category_id = Some(category_id.clone());
                    }
                },
            }
        }
        Ok(())
    }
}
