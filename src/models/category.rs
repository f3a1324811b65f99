use serde::{Deserialize, Serialize};

/// Pricing/visual tier applied to stalls. Prices are whole rupees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub name: String,
    pub price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A stall's category on the wire: either a full value snapshot taken at
/// assignment time, or a bare id referencing the event's category list.
/// Which shape arrives depends on how the admin set the event up, so both
/// must be tolerated and resolved into one canonical [`Category`] before
/// anything downstream sees the stall.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryField {
    Embedded(Category),
    Ref(String),
}

impl CategoryField {
    pub fn resolve(self, catalog: &[Category]) -> Option<Category> {
        match self {
            CategoryField::Embedded(category) => Some(category),
            CategoryField::Ref(id) => catalog
                .iter()
                .find(|c| c.id.as_deref() == Some(id.as_str()))
                .cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Vec<Category> {
        vec![Category {
            id: Some("cat-1".to_string()),
            name: "Premium".to_string(),
            price: 5000,
            color: Some("#EF4444".to_string()),
            description: None,
        }]
    }

    #[test]
    fn embedded_snapshot_is_used_as_is() {
        let field: CategoryField =
            serde_json::from_value(json!({"name": "Standard", "price": 3000, "color": "#3B82F6"}))
                .unwrap();
        let resolved = field.resolve(&catalog()).unwrap();
        assert_eq!(resolved.name, "Standard");
        assert_eq!(resolved.price, 3000);
        assert!(resolved.id.is_none());
    }

    #[test]
    fn reference_resolves_against_event_catalog() {
        let field: CategoryField = serde_json::from_value(json!("cat-1")).unwrap();
        let resolved = field.resolve(&catalog()).unwrap();
        assert_eq!(resolved.name, "Premium");
        assert_eq!(resolved.price, 5000);
    }

    #[test]
    fn dangling_reference_resolves_to_none() {
        let field: CategoryField = serde_json::from_value(json!("cat-unknown")).unwrap();
        assert!(field.resolve(&catalog()).is_none());
    }
}
