//! In-memory record stores.
//!
//! Each store wraps its records in a [`RwLock`] so it can be shared between
//! request handlers behind an `Arc`. Locks are held only for a single lookup
//! or mutation.

mod attendance;
mod catalog;
mod employees;
mod payroll;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{EngineError, EngineResult};

pub use attendance::{AbsenceSource, AttendanceStore};
pub use catalog::ProductCatalog;
pub use employees::EmployeeStore;
pub use payroll::{PayrollFilter, PayrollStore};

pub(crate) fn read_lock<'a, T>(lock: &'a RwLock<T>, store: &str) -> EngineResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| EngineError::StoreUnavailable {
        store: store.to_string(),
    })
}

pub(crate) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    store: &str,
) -> EngineResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| EngineError::StoreUnavailable {
        store: store.to_string(),
    })
}

pub(crate) fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}
