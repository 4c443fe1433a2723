//! Bank account registry with an in-use guard on deletion.

use tracing::info;
use uuid::Uuid;

use pocket_domain::{BankAccount, PaymentMethod, ProfileData};

use crate::{validation::require_text, CoreError, ServiceResult};

pub struct BankAccountService;

impl BankAccountService {
    pub fn add(data: &ProfileData, name: &str, color: &str) -> ServiceResult<ProfileData> {
        let name = require_text(name, "bank name")?;
        let account = BankAccount::new(name, color.trim());
        let mut candidate = data.clone();
        info!(bank_id = %account.id, "bank account added");
        candidate.bank_accounts.push(account);
        Ok(candidate)
    }

    pub fn update(
        data: &ProfileData,
        id: Uuid,
        name: &str,
        color: &str,
    ) -> ServiceResult<ProfileData> {
        let name = require_text(name, "bank name")?;
        let mut candidate = data.clone();
        let account = candidate
            .bank_accounts
            .iter_mut()
            .find(|account| account.id == id)
            .ok_or(CoreError::NotFound("Bank account", id))?;
        account.name = name;
        account.color = color.trim().to_string();
        Ok(candidate)
    }

    /// Refuses while any transaction still moves money through the account.
    pub fn delete(data: &ProfileData, id: Uuid) -> ServiceResult<ProfileData> {
        let account = data
            .bank_account(id)
            .ok_or(CoreError::NotFound("Bank account", id))?;
        let method = PaymentMethod::Bank(id);
        let uses = data
            .transactions
            .iter()
            .filter(|txn| txn.payment_method == method)
            .count();
        if uses > 0 {
            return Err(CoreError::InUse(
                "Bank account",
                format!("`{}` is used by {} transaction(s)", account.name, uses),
            ));
        }
        let mut candidate = data.clone();
        candidate.bank_accounts.retain(|account| account.id != id);
        info!(bank_id = %id, "bank account deleted");
        Ok(candidate)
    }
}
