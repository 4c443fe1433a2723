//! Fixed and quick expense templates.

use tracing::info;
use uuid::Uuid;

use pocket_domain::{FixedExpense, ProfileData, QuickExpense};

use crate::{
    validation::{require_category, require_positive, require_text},
    CoreError, ServiceResult,
};

/// Editable fields shared by both template kinds.
#[derive(Debug, Clone)]
pub struct TemplateDraft {
    pub name: String,
    pub amount: f64,
    pub category_id: Option<Uuid>,
    pub icon: Option<String>,
}

impl TemplateDraft {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
            category_id: None,
            icon: None,
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    fn checked(self, data: &ProfileData) -> ServiceResult<Self> {
        let name = require_text(&self.name, "name")?;
        require_positive(self.amount, "amount")?;
        require_category(data, self.category_id)?;
        Ok(Self { name, ..self })
    }
}

pub struct ExpenseTemplateService;

impl ExpenseTemplateService {
    pub fn add_fixed(data: &ProfileData, draft: TemplateDraft) -> ServiceResult<ProfileData> {
        let draft = draft.checked(data)?;
        let mut expense = FixedExpense::new(draft.name, draft.amount, draft.category_id);
        expense.icon = draft.icon;
        let mut candidate = data.clone();
        info!(fixed_expense_id = %expense.id, "fixed expense added");
        candidate.fixed_expenses.push(expense);
        Ok(candidate)
    }

    pub fn update_fixed(
        data: &ProfileData,
        id: Uuid,
        draft: TemplateDraft,
    ) -> ServiceResult<ProfileData> {
        let draft = draft.checked(data)?;
        let mut candidate = data.clone();
        let expense = candidate
            .fixed_expenses
            .iter_mut()
            .find(|expense| expense.id == id)
            .ok_or(CoreError::NotFound("Fixed expense", id))?;
        expense.name = draft.name;
        expense.amount = draft.amount;
        expense.category_id = draft.category_id;
        expense.icon = draft.icon;
        Ok(candidate)
    }

    /// Removes the template; past payments keep their description but lose the link.
    pub fn delete_fixed(data: &ProfileData, id: Uuid) -> ServiceResult<ProfileData> {
        if data.fixed_expense(id).is_none() {
            return Err(CoreError::NotFound("Fixed expense", id));
        }
        let mut candidate = data.clone();
        candidate.fixed_expenses.retain(|expense| expense.id != id);
        for txn in candidate
            .transactions
            .iter_mut()
            .filter(|txn| txn.fixed_expense_id == Some(id))
        {
            txn.fixed_expense_id = None;
        }
        info!(fixed_expense_id = %id, "fixed expense deleted");
        Ok(candidate)
    }

    pub fn add_quick(data: &ProfileData, draft: TemplateDraft) -> ServiceResult<ProfileData> {
        let draft = draft.checked(data)?;
        let icon = draft.icon.unwrap_or_default();
        let expense = QuickExpense::new(draft.name, draft.amount, draft.category_id, icon);
        let mut candidate = data.clone();
        info!(quick_expense_id = %expense.id, "quick expense added");
        candidate.quick_expenses.push(expense);
        Ok(candidate)
    }

    pub fn update_quick(
        data: &ProfileData,
        id: Uuid,
        draft: TemplateDraft,
    ) -> ServiceResult<ProfileData> {
        let draft = draft.checked(data)?;
        let mut candidate = data.clone();
        let expense = candidate
            .quick_expenses
            .iter_mut()
            .find(|expense| expense.id == id)
            .ok_or(CoreError::NotFound("Quick expense", id))?;
        expense.name = draft.name;
        expense.amount = draft.amount;
        expense.category_id = draft.category_id;
        expense.icon = draft.icon;
        Ok(candidate)
    }

    pub fn delete_quick(data: &ProfileData, id: Uuid) -> ServiceResult<ProfileData> {
        if data.quick_expense(id).is_none() {
            return Err(CoreError::NotFound("Quick expense", id));
        }
        let mut candidate = data.clone();
        candidate.quick_expenses.retain(|expense| expense.id != id);
        Ok(candidate)
    }
}
