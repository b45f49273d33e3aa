use serde::{Deserialize, Serialize};

/// Declares a transparent string identifier issued by the platform.
macro_rules! platform_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

platform_id!(
    /// Token of a Bitable app (the multi-dimensional table "base").
    AppToken
);
platform_id!(
    /// Identifier of one data table inside an app.
    TableId
);
platform_id!(
    /// Identifier of one record (row) of a table.
    RecordId
);
platform_id!(
    /// Identifier of a Docx cloud document.
    DocumentId
);
platform_id!(
    /// Identifier of a block inside a document. The page block shares the
    /// document's id.
    BlockId
);

impl DocumentId {
    /// The root page block of this document.
    pub fn page_block(&self) -> BlockId {
        BlockId(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = RecordId::new("recA1b2C3");
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("recA1b2C3"));

        let back: RecordId = serde_json::from_str("\"recZ\"").unwrap();
        assert_eq!(back.as_str(), "recZ");
    }

    #[test]
    fn test_page_block_shares_document_id() {
        let doc = DocumentId::from("doxcnABC");
        assert_eq!(doc.page_block().to_string(), "doxcnABC");
    }
}
