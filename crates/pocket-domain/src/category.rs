//! Domain types representing expense categories.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Name of the category auto-assigned to uncategorised expenses when present.
pub const GENERAL_CATEGORY_NAME: &str = "General";

/// Name of the category used for savings movements.
pub const SAVINGS_CATEGORY_NAME: &str = "Ahorro";

/// Categorises expenses for reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: icon.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Case-insensitive, whitespace-tolerant name comparison.
    pub fn is_named(&self, candidate: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(candidate.trim())
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} {}", self.icon, self.name)
    }
}

/// The category set seeded into every new profile.
pub fn default_categories() -> Vec<Category> {
    [
        ("Comida", "🍔"),
        ("Transporte", "🚗"),
        ("Compras", "🛒"),
        ("Hogar", "🏠"),
        ("Facturas", "📄"),
        ("Salud", "💊"),
        ("Educación", "🎓"),
        ("Ocio", "🍿"),
        ("Otros", "🏷️"),
        (SAVINGS_CATEGORY_NAME, "💰"),
    ]
    .into_iter()
    .map(|(name, icon)| Category::new(name, icon))
    .collect()
}
