//! Repository record and request body types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A repository record as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Assigned at creation, never changes.
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub techs: Vec<String>,
    /// Only the like operation changes this.
    pub likes: u64,
}

/// Body accepted by create and update.
///
/// Missing fields default to empty values; unknown fields (including `id`
/// and `likes`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryInput {
    pub title: String,
    pub url: String,
    pub techs: Vec<String>,
}

impl Repository {
    /// Build a new record with zero likes.
    pub fn new(id: Uuid, input: RepositoryInput) -> Self {
        Self {
            id,
            title: input.title,
            url: input.url,
            techs: input.techs,
            likes: 0,
        }
    }

    /// Replace the editable fields, keeping `id` and `likes`.
    pub(crate) fn apply(&mut self, input: RepositoryInput) {
        self.title = input.title;
        self.url = input.url;
        self.techs = input.techs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialized_shape() {
        let id = Uuid::new_v4();
        let repo = Repository::new(
            id,
            RepositoryInput {
                title: "repo1".into(),
                url: "http://x".into(),
                techs: vec!["go".into()],
            },
        );

        let value = serde_json::to_value(&repo).unwrap();
        assert_eq!(
            value,
            json!({
                "id": id.to_string(),
                "title": "repo1",
                "url": "http://x",
                "techs": ["go"],
                "likes": 0
            })
        );
    }

    #[test]
    fn test_input_is_permissive() {
        let input: RepositoryInput = serde_json::from_value(json!({})).unwrap();
        assert_eq!(input, RepositoryInput::default());

        let input: RepositoryInput =
            serde_json::from_value(json!({ "title": "t", "likes": 99, "id": "x" })).unwrap();
        assert_eq!(input.title, "t");
        assert!(input.url.is_empty());
        assert!(input.techs.is_empty());
    }

    #[test]
    fn test_apply_keeps_id_and_likes() {
        let id = Uuid::new_v4();
        let mut repo = Repository::new(id, RepositoryInput::default());
        repo.likes = 7;

        repo.apply(RepositoryInput {
            title: "new".into(),
            url: "http://new".into(),
            techs: vec!["rust".into(), "axum".into()],
        });

        assert_eq!(repo.id, id);
        assert_eq!(repo.likes, 7);
        assert_eq!(repo.title, "new");
        assert_eq!(repo.techs, vec!["rust", "axum"]);
    }
}
