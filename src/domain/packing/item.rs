//! Packing items.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PackingItemId, ValidationError};

/// How important it is to pack an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Essential,
    #[default]
    Important,
    Optional,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Essential, Priority::Important, Priority::Optional];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Essential => "essential",
            Priority::Important => "important",
            Priority::Optional => "optional",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("priority", format!("unknown priority '{}'", s))
            })
    }
}

/// Input for adding an item to a packing list.
#[derive(Debug, Clone)]
pub struct NewPackingItem {
    pub name: String,
    pub quantity: u32,
    pub notes: Option<String>,
    pub priority: Priority,
}

/// One thing to pack. Its id is stable across toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingItem {
    pub id: PackingItemId,
    pub name: String,
    pub quantity: u32,
    pub is_packed: bool,
    pub notes: Option<String>,
    pub priority: Priority,
}

impl PackingItem {
    /// Validates input and creates an unpacked item.
    pub fn create(input: NewPackingItem) -> Result<Self, ValidationError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if input.quantity == 0 {
            return Err(ValidationError::out_of_range(
                "quantity",
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        Ok(Self {
            id: PackingItemId::new(),
            name: name.to_string(),
            quantity: input.quantity,
            is_packed: false,
            notes: input
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            priority: input.priority,
        })
    }
}
