use std::path::Path;

use tracing::{info, warn};
use uuid::Uuid;

use pocket_config::Config;
use pocket_core::{
    storage::{BookBackupInfo, ProfileStorage},
    Balances, Clock, NetWorth, PeriodStats, ProfileService, ServiceResult, SummaryService,
    SystemClock,
};
use pocket_domain::{Profile, ProfileBook, ProfileData};
use pocket_storage_json::{JsonProfileStorage, StoragePaths};

use crate::Result;

/// Facade that owns the profile book and persists it after every committed change.
///
/// A mutation is only kept in memory when it was also written to storage; a
/// failed write rolls the book back to the previous snapshot.
pub struct LedgerSession {
    book: ProfileBook,
    storage: Box<dyn ProfileStorage>,
    clock: Box<dyn Clock>,
}

impl LedgerSession {
    /// Loads the persisted book (or starts empty) from `storage`.
    pub fn open(storage: Box<dyn ProfileStorage>) -> Result<Self> {
        Self::open_with_clock(storage, Box::new(SystemClock))
    }

    pub fn open_with_clock(
        storage: Box<dyn ProfileStorage>,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        let book = storage.load_book()?;
        info!(profiles = book.profiles.len(), "profile book loaded");
        Ok(Self {
            book,
            storage,
            clock,
        })
    }

    /// Opens JSON storage at the locations configured in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let paths = StoragePaths {
            data_root: config.resolve_data_root(),
            backup_root: config.resolve_backup_root(),
        };
        let storage = JsonProfileStorage::with_retention(paths, config.backup_retention)?;
        Self::open(Box::new(storage))
    }

    pub fn book(&self) -> &ProfileBook {
        &self.book
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn active(&self) -> Option<&Profile> {
        self.book.active()
    }

    pub fn active_data(&self) -> Result<&ProfileData> {
        Ok(ProfileService::active_data(&self.book)?)
    }

    pub fn create_profile(
        &mut self,
        name: &str,
        country_code: &str,
        currency: &str,
    ) -> Result<Uuid> {
        self.mutate_book(|book| {
            ProfileService::create_profile(book, name, country_code, currency)
        })
    }

    /// Creates a profile using the configured default country and currency.
    pub fn create_default_profile(&mut self, name: &str, config: &Config) -> Result<Uuid> {
        self.create_profile(name, &config.default_country_code, &config.default_currency)
    }

    pub fn delete_profile(&mut self, id: Uuid) -> Result<()> {
        self.mutate_book(|book| ProfileService::delete_profile(book, id))
    }

    pub fn select_profile(&mut self, id: Uuid) -> Result<()> {
        self.mutate_book(|book| ProfileService::select_profile(book, id))
    }

    /// Runs a ledger operation against the active profile and persists the result.
    ///
    /// ```ignore
    /// session.apply(|data| TransactionService::add(data, draft))?;
    /// ```
    pub fn apply<F>(&mut self, operation: F) -> Result<()>
    where
        F: FnOnce(&ProfileData) -> ServiceResult<ProfileData>,
    {
        self.mutate_book(|book| ProfileService::apply(book, operation))
    }

    pub fn balances(&self) -> Result<Balances> {
        let data = self.active_data()?;
        Ok(pocket_core::compute_balances(
            &data.transactions,
            &data.bank_accounts,
        ))
    }

    pub fn monthly_stats(&self) -> Result<PeriodStats> {
        Ok(SummaryService::monthly_stats(
            self.active_data()?,
            self.clock.as_ref(),
        ))
    }

    pub fn net_worth(&self) -> Result<NetWorth> {
        Ok(SummaryService::net_worth(self.active_data()?))
    }

    pub fn backup(&self, note: Option<&str>) -> Result<BookBackupInfo> {
        Ok(self.storage.backup_book(&self.book, note)?)
    }

    pub fn list_backups(&self) -> Result<Vec<BookBackupInfo>> {
        Ok(self.storage.list_backups()?)
    }

    /// Replaces the in-memory book with the contents of `backup`.
    pub fn restore_backup(&mut self, backup: &BookBackupInfo) -> Result<()> {
        self.book = self.storage.restore_backup(backup)?;
        info!(backup = %backup.id, "session restored from backup");
        Ok(())
    }

    pub fn export_active(&self, path: &Path) -> Result<()> {
        let profile = self
            .book
            .active()
            .ok_or(pocket_core::CoreError::NoActiveProfile)?;
        Ok(self.storage.export_profile(profile, path)?)
    }

    pub fn import_profile(&mut self, path: &Path) -> Result<Uuid> {
        let previous = self.book.clone();
        let id = self.storage.import_profile(&mut self.book, path)?;
        self.persist_or_rollback(previous)?;
        Ok(id)
    }

    fn mutate_book<T, F>(&mut self, change: F) -> Result<T>
    where
        F: FnOnce(&mut ProfileBook) -> ServiceResult<T>,
    {
        let previous = self.book.clone();
        let value = change(&mut self.book)?;
        self.persist_or_rollback(previous)?;
        Ok(value)
    }

    fn persist_or_rollback(&mut self, previous: ProfileBook) -> Result<()> {
        if let Err(err) = self.storage.save_book(&self.book) {
            warn!(error = %err, "persisting the profile book failed, rolling back");
            self.book = previous;
            return Err(err.into());
        }
        Ok(())
    }
}
