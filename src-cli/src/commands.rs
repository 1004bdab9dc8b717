//! Subcommand implementations

use anyhow::{bail, Context};
use doc_model::Manual;
use std::path::Path;
use store::{
    render_manual, ExportRequest, ExportResponse, ExportService, ExportSettings, FsArtifactStore,
    InMemoryDocumentRepository, InMemorySessionProvider, PdfExportOptions, SettingsManager, User,
};

/// Result of a `render` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub page_count: usize,
    pub size: usize,
}

fn load_manual(path: &Path) -> anyhow::Result<Manual> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manual {}", path.display()))?;
    Manual::from_json(&json).with_context(|| format!("Invalid manual {}", path.display()))
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<ExportSettings> {
    let settings = match path {
        Some(path) => {
            let mut manager = SettingsManager::new(path);
            manager
                .load_sync()
                .with_context(|| format!("Failed to read settings {}", path.display()))?
                .clone()
        }
        None => ExportSettings::default(),
    };
    settings.validate().context("Invalid export settings")?;
    Ok(settings)
}

/// Lay out a manual and write it as a PDF file
pub fn render(
    input: &Path,
    output: &Path,
    config: Option<&Path>,
    no_compress: bool,
    title: Option<String>,
) -> anyhow::Result<RenderSummary> {
    let manual = load_manual(input)?;
    let settings = load_settings(config)?;

    let mut options = PdfExportOptions::new().with_compression(settings.compress && !no_compress);
    if let Some(title) = title {
        options = options.with_title(title);
    }

    let rendered = render_manual(&manual, &settings.layout, &options).context("PDF generation failed")?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(output, &rendered.bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(
        "Rendered {} section(s) into {} page(s)",
        manual.sections.len(),
        rendered.page_count
    );
    Ok(RenderSummary {
        page_count: rendered.page_count,
        size: rendered.bytes.len(),
    })
}

/// Run the export pipeline for a manual, storing the PDF under `root`
pub async fn export(
    input: &Path,
    root: &Path,
    config: Option<&Path>,
    user: &str,
) -> anyhow::Result<ExportResponse> {
    let manual = load_manual(input)?;
    let settings = load_settings(config)?;

    let project_name = manual
        .project_name
        .clone()
        .or_else(|| input.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_default();

    let repository = InMemoryDocumentRepository::new();
    let project = repository.create_project(user, project_name).await;
    for (index, section) in manual.sections.iter().enumerate() {
        repository
            .add_document(
                &project.id,
                section.title.clone(),
                section.content.clone(),
                Some(index as i64),
            )
            .await;
    }

    let service = ExportService::new(
        InMemorySessionProvider::signed_in(User::new(user)),
        repository,
        FsArtifactStore::new(root),
        settings,
    );

    match service.export_pdf(ExportRequest::for_project(project.id)).await {
        Ok(response) => Ok(response),
        Err(e) => bail!("Export failed with status {} ({}): {}", e.status(), e.code(), e),
    }
}
