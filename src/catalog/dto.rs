use serde::{Deserialize, Serialize};
use crate::books::domain::model::Book;

// ImportStatus is the per-isbn verdict of a batch import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    Added,
    Duplicate,
    NotFound,
    Invalid,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub isbn: String,
    pub status: ImportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<Book>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ImportOutcome {
    pub fn added(book: Book) -> Self {
        Self {
            isbn: book.isbn.clone(),
            status: ImportStatus::Added,
            book: Some(book),
            message: None,
        }
    }

    pub fn rejected(isbn: &str, status: ImportStatus, message: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
            status,
            book: None,
            message: Some(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::books::domain::model::Book;
    use crate::catalog::dto::{ImportOutcome, ImportStatus};

    #[tokio::test]
    async fn test_should_serialize_outcomes() {
        let added = serde_json::to_value(ImportOutcome::added(Book::new("Dune", "Herbert", "111")))
            .expect("should serialize");
        assert_eq!(json!({
            "isbn": "111",
            "status": "added",
            "book": {"title": "Dune", "author": "Herbert", "isbn": "111"}
        }), added);

        let missing = serde_json::to_value(ImportOutcome::rejected("222", ImportStatus::NotFound, "no record"))
            .expect("should serialize");
        assert_eq!(json!({"isbn": "222", "status": "not_found", "message": "no record"}), missing);
    }
}
