//! Packing progress read model.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{PackingCategory, PackingList, PackingSection};
use crate::domain::foundation::percentage_of;

/// Progress of one category, counted in quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryProgress {
    pub name: PackingCategory,
    pub total_items: u64,
    pub packed_items: u64,
    pub progress_percentage: Decimal,
}

impl From<&PackingSection> for CategoryProgress {
    fn from(section: &PackingSection) -> Self {
        let total_items: u64 = section.items.iter().map(|i| u64::from(i.quantity)).sum();
        let packed_items: u64 = section
            .items
            .iter()
            .filter(|i| i.is_packed)
            .map(|i| u64::from(i.quantity))
            .sum();
        Self {
            name: section.name,
            total_items,
            packed_items,
            progress_percentage: percentage_of(packed_items.into(), total_items.into()),
        }
    }
}

/// Overall packing progress. An empty list is 0% packed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackingProgress {
    pub total_items: u64,
    pub packed_items: u64,
    pub progress_percentage: Decimal,
    pub per_category: Vec<CategoryProgress>,
}

impl PackingProgress {
    pub fn of(list: &PackingList) -> Self {
        let per_category: Vec<CategoryProgress> =
            list.sections().iter().map(CategoryProgress::from).collect();
        let total_items = per_category.iter().map(|c| c.total_items).sum::<u64>();
        let packed_items = per_category.iter().map(|c| c.packed_items).sum::<u64>();
        Self {
            total_items,
            packed_items,
            progress_percentage: percentage_of(packed_items.into(), total_items.into()),
            per_category,
        }
    }
}
