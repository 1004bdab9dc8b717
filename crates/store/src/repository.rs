//! Session and document repository collaborators
//!
//! The export pipeline reads the caller's identity and the project's
//! documentation through these traits. In-memory implementations back the
//! CLI and the tests.

use crate::error::RepositoryError;
use doc_model::Section;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }
}

/// A project owned by a single user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub user_id: String,
    pub name: String,
}

/// Stored documentation section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub order_index: Option<i64>,
}

impl DocumentRecord {
    /// Section view used by the layout engine
    pub fn to_section(&self) -> Section {
        Section {
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }
}

/// Sort records by `order_index` ascending with unordered records last.
///
/// The sort is stable, so records with equal or missing indices keep their
/// insertion order.
pub fn sort_by_order_index(records: &mut [DocumentRecord]) {
    records.sort_by_key(|record| (record.order_index.is_none(), record.order_index));
}

/// Source of the authenticated caller
#[trait_variant::make(Send)]
pub trait SessionProvider: Send + Sync {
    /// The current user, or `None` when the caller is anonymous
    async fn current_user(&self) -> Result<Option<User>, RepositoryError>;
}

/// Read access to projects and their documentation
#[trait_variant::make(Send)]
pub trait DocumentRepository: Send + Sync {
    /// Find a project by id, only if `user_id` owns it
    async fn find_project(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<Option<Project>, RepositoryError>;

    /// All documents of a project, ordered by `order_index` with nulls last
    async fn list_documents(&self, project_id: &str)
        -> Result<Vec<DocumentRecord>, RepositoryError>;
}

/// Session provider with a fixed user
#[derive(Debug, Default)]
pub struct InMemorySessionProvider {
    user: RwLock<Option<User>>,
    failure: RwLock<Option<String>>,
}

impl InMemorySessionProvider {
    /// Provider with no signed-in user
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Provider signed in as `user`
    pub fn signed_in(user: User) -> Self {
        Self {
            user: RwLock::new(Some(user)),
            failure: RwLock::new(None),
        }
    }

    pub async fn set_user(&self, user: Option<User>) {
        *self.user.write().await = user;
    }

    /// Make every following lookup fail with `message`
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().await = Some(message.into());
    }
}

impl SessionProvider for InMemorySessionProvider {
    async fn current_user(&self) -> Result<Option<User>, RepositoryError> {
        if let Some(message) = self.failure.read().await.as_ref() {
            return Err(RepositoryError::new(message.clone()));
        }
        Ok(self.user.read().await.clone())
    }
}

#[derive(Debug, Default)]
struct RepositoryState {
    projects: HashMap<String, Project>,
    documents: HashMap<String, Vec<DocumentRecord>>,
    failure: Option<String>,
}

/// Document repository held in memory
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    state: RwLock<RepositoryState>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a project for `user_id` and return it
    pub async fn create_project(&self, user_id: &str, name: impl Into<String>) -> Project {
        let project = Project {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.into(),
        };
        self.insert_project(project.clone()).await;
        project
    }

    pub async fn insert_project(&self, project: Project) {
        let mut state = self.state.write().await;
        state.documents.entry(project.id.clone()).or_default();
        state.projects.insert(project.id.clone(), project);
    }

    /// Add a document to a project and return the stored record
    pub async fn add_document(
        &self,
        project_id: &str,
        title: impl Into<String>,
        content: Option<String>,
        order_index: Option<i64>,
    ) -> DocumentRecord {
        let record = DocumentRecord {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: project_id.to_string(),
            title: title.into(),
            content,
            order_index,
        };
        self.state
            .write()
            .await
            .documents
            .entry(project_id.to_string())
            .or_default()
            .push(record.clone());
        record
    }

    /// Make every following query fail with `message`
    pub async fn fail_with(&self, message: impl Into<String>) {
        self.state.write().await.failure = Some(message.into());
    }

    fn check(state: &RepositoryState) -> Result<(), RepositoryError> {
        match &state.failure {
            Some(message) => Err(RepositoryError::new(message.clone())),
            None => Ok(()),
        }
    }
}

impl DocumentRepository for InMemoryDocumentRepository {
    async fn find_project(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<Option<Project>, RepositoryError> {
        let state = self.state.read().await;
        Self::check(&state)?;
        Ok(state
            .projects
            .get(project_id)
            .filter(|project| project.user_id == user_id)
            .cloned())
    }

    async fn list_documents(
        &self,
        project_id: &str,
    ) -> Result<Vec<DocumentRecord>, RepositoryError> {
        let state = self.state.read().await;
        Self::check(&state)?;
        let mut records = state.documents.get(project_id).cloned().unwrap_or_default();
        sort_by_order_index(&mut records);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(title: &str, order_index: Option<i64>) -> DocumentRecord {
        DocumentRecord {
            id: title.to_string(),
            project_id: "p".to_string(),
            title: title.to_string(),
            content: None,
            order_index,
        }
    }

    #[test]
    fn test_sort_nulls_last() {
        let mut records = vec![
            record("c", None),
            record("b", Some(2)),
            record("d", None),
            record("a", Some(-1)),
            record("e", Some(2)),
        ];
        sort_by_order_index(&mut records);
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "e", "c", "d"]);
    }

    #[test]
    fn test_record_to_section() {
        let mut rec = record("Install", Some(0));
        rec.content = Some("- step".to_string());
        let section = rec.to_section();
        assert_eq!(section.title, "Install");
        assert_eq!(section.content.as_deref(), Some("- step"));
    }

    #[test]
    fn test_record_json_is_camel_case() {
        let json = r#"{"id":"1","projectId":"p","title":"T","orderIndex":3}"#;
        let rec: DocumentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.order_index, Some(3));
        assert_eq!(rec.content, None);
    }

    #[tokio::test]
    async fn test_session_provider() {
        let session = InMemorySessionProvider::anonymous();
        assert_eq!(session.current_user().await.unwrap(), None);

        session.set_user(Some(User::new("u1"))).await;
        assert_eq!(session.current_user().await.unwrap(), Some(User::new("u1")));

        session.fail_with("session store offline").await;
        assert!(session.current_user().await.is_err());
    }

    #[tokio::test]
    async fn test_find_project_checks_owner() {
        let repo = InMemoryDocumentRepository::new();
        let project = repo.create_project("owner", "Acme").await;

        assert_eq!(
            repo.find_project(&project.id, "owner").await.unwrap(),
            Some(project.clone())
        );
        assert_eq!(repo.find_project(&project.id, "intruder").await.unwrap(), None);
        assert_eq!(repo.find_project("missing", "owner").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_documents_ordered() {
        let repo = InMemoryDocumentRepository::new();
        let project = repo.create_project("owner", "Acme").await;
        repo.add_document(&project.id, "Later", None, None).await;
        repo.add_document(&project.id, "Second", None, Some(1)).await;
        repo.add_document(&project.id, "First", None, Some(0)).await;

        let docs = repo.list_documents(&project.id).await.unwrap();
        let titles: Vec<_> = docs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Later"]);

        assert!(repo.list_documents("other").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let repo = InMemoryDocumentRepository::new();
        let project = repo.create_project("owner", "Acme").await;
        repo.fail_with("connection reset").await;

        let err = repo.list_documents(&project.id).await.unwrap_err();
        assert_eq!(err.to_string(), "connection reset");
    }

    proptest! {
        #[test]
        fn sort_is_ordered_and_stable(
            indices in proptest::collection::vec(proptest::option::of(-5i64..5), 0..40)
        ) {
            let mut records: Vec<DocumentRecord> = indices
                .iter()
                .enumerate()
                .map(|(i, index)| record(&i.to_string(), *index))
                .collect();
            sort_by_order_index(&mut records);

            prop_assert_eq!(records.len(), indices.len());
            for pair in records.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                match (a.order_index, b.order_index) {
                    (Some(x), Some(y)) => prop_assert!(x <= y),
                    (None, Some(_)) => prop_assert!(false, "unordered record before ordered one"),
                    _ => {}
                }
                if a.order_index == b.order_index {
                    let (ai, bi): (usize, usize) = (a.id.parse().unwrap(), b.id.parse().unwrap());
                    prop_assert!(ai < bi);
                }
            }
        }
    }
}
