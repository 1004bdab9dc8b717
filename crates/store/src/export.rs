//! Project documentation export
//!
//! Resolves the caller, loads the project's sections, renders them to PDF,
//! uploads the result and returns a signed download URL.

use crate::artifact::{ArtifactStore, UploadRequest};
use crate::error::{ExportError, StorageError};
use crate::pdf::{render_sections, PdfExportOptions, RenderedPdf};
use crate::repository::{DocumentRepository, SessionProvider};
use crate::settings::ExportSettings;
use chrono::{DateTime, SecondsFormat, Utc};
use doc_model::Section;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

/// Content type of exported artifacts
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Export request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(default)]
    pub project_id: Option<String>,
}

impl ExportRequest {
    pub fn for_project(project_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
        }
    }
}

/// Successful export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResponse {
    pub success: bool,
    /// Signed download URL
    pub url: String,
    /// Object path inside the bucket
    pub path: String,
}

/// Object path of a project export generated at `generated_at`
pub fn artifact_path(user_id: &str, project_id: &str, generated_at: DateTime<Utc>) -> String {
    format!(
        "users/{user_id}/projects/{project_id}/project-{project_id}-{}.pdf",
        generated_at.timestamp_millis()
    )
}

/// Export pipeline over its three collaborators
pub struct ExportService<S, R, A> {
    session: S,
    repository: R,
    artifacts: A,
    settings: ExportSettings,
}

impl<S, R, A> ExportService<S, R, A>
where
    S: SessionProvider,
    R: DocumentRepository,
    A: ArtifactStore,
{
    pub fn new(session: S, repository: R, artifacts: A, settings: ExportSettings) -> Self {
        Self {
            session,
            repository,
            artifacts,
            settings,
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn artifacts(&self) -> &A {
        &self.artifacts
    }

    /// Export the requested project as a PDF
    pub async fn export_pdf(&self, request: ExportRequest) -> Result<ExportResponse, ExportError> {
        let span = tracing::info_span!(
            "export_pdf",
            project_id = request.project_id.as_deref().unwrap_or("")
        );
        let result = self.run(request).instrument(span.clone()).await;
        if let Err(e) = &result {
            span.in_scope(|| tracing::warn!("Export failed ({}): {}", e.code(), e));
        }
        result
    }

    async fn run(&self, request: ExportRequest) -> Result<ExportResponse, ExportError> {
        let user = self
            .session
            .current_user()
            .await
            .map_err(|e| {
                tracing::warn!("Session lookup failed: {}", e);
                ExportError::Unauthorized
            })?
            .ok_or(ExportError::Unauthorized)?;

        let project_id = request
            .project_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(ExportError::missing_project_id)?;

        let project = self
            .repository
            .find_project(project_id, &user.id)
            .await?
            .ok_or(ExportError::NotFound)?;

        let documents = self.repository.list_documents(&project.id).await?;
        let sections: Vec<Section> = documents.iter().map(|d| d.to_section()).collect();

        let rendered = self.render(&project.name, &sections)?;
        if rendered.bytes.len() as u64 > self.settings.max_artifact_bytes {
            return Err(StorageError::file_too_large(self.settings.max_artifact_bytes).into());
        }

        let generated_at = Utc::now();
        let path = artifact_path(&user.id, &project.id, generated_at);
        let size = rendered.bytes.len();
        let upload = UploadRequest::new(&self.settings.bucket, &path, rendered.bytes)
            .with_content_type(PDF_CONTENT_TYPE)
            .with_metadata("projectId", &project.id)
            .with_metadata(
                "generatedAt",
                generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            );
        let stored = self.artifacts.upload(upload).await?;

        let url = self
            .artifacts
            .signed_url(&self.settings.bucket, &stored.path, self.settings.signed_url_ttl_secs)
            .await?;

        tracing::info!(
            "Exported {} section(s) to {} ({} page(s), {} bytes)",
            sections.len(),
            stored.path,
            rendered.page_count,
            size
        );

        Ok(ExportResponse {
            success: true,
            url,
            path: stored.path,
        })
    }

    fn render(&self, project_name: &str, sections: &[Section]) -> Result<RenderedPdf, ExportError> {
        let options = PdfExportOptions::new().with_compression(self.settings.compress);
        Ok(render_sections(
            Some(project_name),
            sections,
            &self.settings.layout,
            &options,
        )?)
    }
}
