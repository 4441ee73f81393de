//! Category domain model

use serde::{Deserialize, Serialize};

use super::transaction::FlowKind;

/// A transaction category with display metadata.
///
/// Categories come from a fixed default set; there is no user-facing
/// create or edit flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Icon reference understood by the rendering layer.
    pub icon: String,
    /// Color token understood by the rendering layer.
    pub color: String,
    #[serde(rename = "type")]
    pub kind: FlowKind,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
        kind: FlowKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
            kind,
        }
    }

    /// Whether a transaction of the given direction may use this category.
    pub fn allows(&self, kind: FlowKind) -> bool {
        self.kind == kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_restriction() {
        let dining = Category::new("4", "Dining", "fa-utensils", "bg-orange-500", FlowKind::Expense);
        assert!(dining.allows(FlowKind::Expense));
        assert!(!dining.allows(FlowKind::Income));
    }
}
