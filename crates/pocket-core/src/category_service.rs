//! Category registry with an in-use guard on deletion.

use std::collections::HashSet;

use tracing::info;
use uuid::Uuid;

use pocket_domain::{Category, ProfileData};

use crate::{validation::require_text, CoreError, ServiceResult};

pub struct CategoryService;

impl CategoryService {
    pub fn add(
        data: &ProfileData,
        name: &str,
        icon: &str,
        color: Option<&str>,
    ) -> ServiceResult<ProfileData> {
        let name = require_text(name, "category name")?;
        if data.category_named(&name).is_some() {
            return Err(CoreError::InvalidInput(format!(
                "category `{name}` already exists"
            )));
        }
        let mut category = Category::new(name, icon.trim());
        category.color = color.map(str::to_string);

        let mut candidate = data.clone();
        info!(category_id = %category.id, "category added");
        candidate.categories.push(category);
        Ok(candidate)
    }

    pub fn update(
        data: &ProfileData,
        id: Uuid,
        name: &str,
        icon: &str,
        color: Option<&str>,
    ) -> ServiceResult<ProfileData> {
        let name = require_text(name, "category name")?;
        if data
            .categories
            .iter()
            .any(|category| category.id != id && category.is_named(&name))
        {
            return Err(CoreError::InvalidInput(format!(
                "category `{name}` already exists"
            )));
        }
        let mut candidate = data.clone();
        let category = candidate
            .categories
            .iter_mut()
            .find(|category| category.id == id)
            .ok_or(CoreError::NotFound("Category", id))?;
        category.name = name;
        category.icon = icon.trim().to_string();
        category.color = color.map(str::to_string);
        Ok(candidate)
    }

    /// Refuses while any transaction still references the category.
    pub fn delete(data: &ProfileData, id: Uuid) -> ServiceResult<ProfileData> {
        let category = data.category(id).ok_or(CoreError::NotFound("Category", id))?;
        let uses = data
            .transactions
            .iter()
            .filter(|txn| txn.category_id == Some(id))
            .count();
        if uses > 0 {
            return Err(CoreError::InUse(
                "Category",
                format!("`{}` is used by {} transaction(s)", category.name, uses),
            ));
        }
        let mut candidate = data.clone();
        candidate.categories.retain(|category| category.id != id);
        info!(category_id = %id, "category deleted");
        Ok(candidate)
    }

    /// Reorders categories; `order` must list every existing id exactly once.
    pub fn reorder(data: &ProfileData, order: &[Uuid]) -> ServiceResult<ProfileData> {
        let existing: HashSet<Uuid> = data.categories.iter().map(|c| c.id).collect();
        let requested: HashSet<Uuid> = order.iter().copied().collect();
        if order.len() != data.categories.len() || requested != existing {
            return Err(CoreError::InvalidInput(
                "new order must be a permutation of the existing categories".into(),
            ));
        }
        let mut candidate = data.clone();
        candidate.categories = order
            .iter()
            .filter_map(|id| data.category(*id).cloned())
            .collect();
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pocket_domain::{PaymentMethod, Transaction};

    use super::*;

    #[test]
    fn category_in_use_cannot_be_deleted() {
        let data = CategoryService::add(&ProfileData::default(), "Mascotas", "🐶", None)
            .expect("added");
        let id = data.categories[0].id;
        let mut used = data.clone();
        used.transactions.push(
            Transaction::expense(
                "Pienso",
                12.0,
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                PaymentMethod::Cash,
            )
            .with_category(Some(id)),
        );

        let err = CategoryService::delete(&used, id).unwrap_err();
        assert!(matches!(err, CoreError::InUse("Category", _)));
        assert!(CategoryService::delete(&data, id).expect("deleted").categories.is_empty());
    }

    #[test]
    fn reorder_requires_a_permutation() {
        let data = CategoryService::add(&ProfileData::default(), "A", "a", None).expect("a");
        let data = CategoryService::add(&data, "B", "b", Some("#123456")).expect("b");
        let (a, b) = (data.categories[0].id, data.categories[1].id);

        let reordered = CategoryService::reorder(&data, &[b, a]).expect("reordered");
        assert_eq!(reordered.categories[0].id, b);
        assert!(CategoryService::reorder(&data, &[a, a]).is_err());
        assert!(CategoryService::reorder(&data, &[a]).is_err());
    }
}
