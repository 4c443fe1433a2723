use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use pocket_domain::{Profile, ProfileBook, ProfileData};
use uuid::Uuid;

use crate::CoreError;

/// Describes a persisted backup artifact for the profile book.
#[derive(Debug, Clone)]
pub struct BookBackupInfo {
    pub id: String,
    pub created_at: String,
    pub path: PathBuf,
}

/// Abstraction over persistence backends capable of storing the profile book and backups.
pub trait ProfileStorage: Send + Sync {
    fn save_book(&self, book: &ProfileBook) -> Result<(), CoreError>;
    /// Loads the persisted book, or an empty one when nothing was saved yet.
    fn load_book(&self) -> Result<ProfileBook, CoreError>;
    fn backup_book(
        &self,
        book: &ProfileBook,
        note: Option<&str>,
    ) -> Result<BookBackupInfo, CoreError>;
    fn list_backups(&self) -> Result<Vec<BookBackupInfo>, CoreError>;
    fn restore_backup(&self, backup: &BookBackupInfo) -> Result<ProfileBook, CoreError>;
    fn export_profile(&self, profile: &Profile, path: &Path) -> Result<(), CoreError>;
    /// Adds the profile stored at `path` to `book`, returning the id it was stored under.
    fn import_profile(&self, book: &mut ProfileBook, path: &Path) -> Result<Uuid, CoreError>;
}

/// Detects dangling references and other anomalies within a profile snapshot.
pub fn profile_warnings(data: &ProfileData) -> Vec<String> {
    let category_ids: HashSet<_> = data.categories.iter().map(|c| c.id).collect();
    let mut warnings = Vec::new();

    for txn in &data.transactions {
        if !data.knows_method(txn.payment_method) {
            warnings.push(format!(
                "transaction {} references unknown payment method {}",
                txn.id, txn.payment_method
            ));
        }
        if let Some(category) = txn.category_id {
            if !category_ids.contains(&category) {
                warnings.push(format!(
                    "transaction {} references missing category {}",
                    txn.id, category
                ));
            }
        }
        if let Some(transfer_id) = txn.linkage.transfer_id() {
            let legs = data
                .transactions
                .iter()
                .filter(|other| other.linkage.transfer_id() == Some(transfer_id))
                .count();
            if legs != 2 {
                warnings.push(format!(
                    "transfer {} has {} leg(s) instead of 2",
                    transfer_id, legs
                ));
            }
        }
        if let Some(patrimony_id) = txn.linkage.patrimony_id() {
            let known = data.asset(patrimony_id).is_some()
                || data.liability(patrimony_id).is_some()
                || data.loan(patrimony_id).is_some();
            if !known {
                warnings.push(format!(
                    "transaction {} is linked to missing {} {}",
                    txn.id,
                    txn.linkage.label(),
                    patrimony_id
                ));
            }
        }
    }
    for liability in &data.liabilities {
        if liability.amount > liability.original_amount + f64::EPSILON {
            warnings.push(format!(
                "liability {} outstanding {:.2} exceeds original {:.2}",
                liability.id, liability.amount, liability.original_amount
            ));
        }
    }
    warnings
}
