//! Folder-batch extraction service.
//!
//! Walks the invoices root one subfolder at a time, in sorted name order,
//! and processes every PDF of a folder in sorted filename order; the
//! ordering keeps outputs deterministic and reproducible. A failing
//! document is logged and skipped; it never aborts its folder.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::coords::CoordinateRegistry;
use crate::error::{InvexError, Result};
use crate::invoice::InvoiceAccumulator;
use crate::models::config::InvexConfig;
use crate::models::invoice::InvoiceRecord;
use crate::output::{write_folder_csv, write_folder_json, FolderResult};
use crate::pdf::PdfReader;

/// Counts reported by a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Folders for which a JSON/CSV pair was written.
    pub folders_written: usize,
    /// Documents extracted successfully.
    pub documents_ok: usize,
    /// Documents skipped after an extraction failure.
    pub documents_failed: usize,
}

/// Drives the whole pipeline for one invoices root.
pub struct ExtractorService {
    config: InvexConfig,
    registry: CoordinateRegistry,
}

impl ExtractorService {
    /// Build a service from configuration. A missing coordinates file
    /// degrades to whole-page extraction with a warning.
    pub fn new(config: InvexConfig) -> Self {
        let registry = CoordinateRegistry::load(&config.paths.coordinates_file);
        Self { config, registry }
    }

    /// Build a service with an already-parsed registry.
    pub fn with_registry(config: InvexConfig, registry: CoordinateRegistry) -> Self {
        Self { config, registry }
    }

    /// Process every batch subfolder without progress reporting.
    pub fn run(&self) -> Result<RunSummary> {
        self.run_with_progress(&mut |_, _| {})
    }

    /// Process every batch subfolder. `progress(current, total)` is invoked
    /// once per attempted document (success or failure) with a 1-indexed
    /// `current`, serially, in processing order.
    pub fn run_with_progress(
        &self,
        progress: &mut dyn FnMut(usize, usize),
    ) -> Result<RunSummary> {
        let root = &self.config.paths.invoices_dir;
        if !root.is_dir() {
            return Err(InvexError::Config(format!(
                "invoices folder {} not found",
                root.display()
            )));
        }

        let json_dir = self.config.paths.outputs_dir.join("json");
        let csv_dir = self.config.paths.outputs_dir.join("csv");
        if self.config.output.json {
            fs::create_dir_all(&json_dir)?;
        }
        if self.config.output.csv {
            fs::create_dir_all(&csv_dir)?;
        }

        let mut batches: Vec<(PathBuf, Vec<PathBuf>)> = Vec::new();
        for folder in sorted_subfolders(root)? {
            let pdfs = sorted_pdfs(&folder)?;
            batches.push((folder, pdfs));
        }
        let total: usize = batches.iter().map(|(_, pdfs)| pdfs.len()).sum();
        info!(total, "starting invoice processing");

        let mut summary = RunSummary::default();
        let mut current = 0usize;

        for (folder, pdfs) in &batches {
            if pdfs.is_empty() {
                debug!("skipping {}: no PDF files", folder.display());
                continue;
            }

            let mut documents = FolderResult::new();
            for pdf in pdfs {
                current += 1;
                match self.process_document(pdf) {
                    Ok(record) => {
                        let filename = pdf
                            .file_name()
                            .map(|name| name.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        documents.insert(filename, record);
                        summary.documents_ok += 1;
                    }
                    Err(err) => {
                        warn!("failed to process {}: {}", pdf.display(), err);
                        summary.documents_failed += 1;
                    }
                }
                progress(current, total);
            }

            if documents.is_empty() {
                debug!("no documents extracted from {}", folder.display());
                continue;
            }

            let name = folder
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            if self.config.output.json {
                write_folder_json(&json_dir.join(format!("{name}.json")), &documents)?;
            }
            if self.config.output.csv {
                write_folder_csv(&csv_dir.join(format!("{name}.csv")), &documents)?;
            }
            info!("processed folder '{}': {} invoice(s)", name, documents.len());
            summary.folders_written += 1;
        }

        info!(
            ok = summary.documents_ok,
            failed = summary.documents_failed,
            "processing complete"
        );
        Ok(summary)
    }

    /// Extract one document. The PDF handle lives only for the duration of
    /// this call and is released on every exit path.
    pub fn process_document(&self, path: &Path) -> Result<InvoiceRecord> {
        let reader = PdfReader::open(path)?;
        let mut accumulator = InvoiceAccumulator::new(&self.registry);
        for (index, page) in reader.pages().iter().enumerate() {
            accumulator.ingest_page(page, index);
        }
        Ok(accumulator.finish())
    }
}

fn sorted_subfolders(root: &Path) -> Result<Vec<PathBuf>> {
    let mut folders: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    folders.sort();
    Ok(folders)
}

fn sorted_pdfs(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs: Vec<PathBuf> = fs::read_dir(folder)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    pdfs.sort();
    Ok(pdfs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config_for(root: &Path) -> InvexConfig {
        let mut config = InvexConfig::default();
        config.paths.invoices_dir = root.join("invoices");
        config.paths.coordinates_file = root.join("coordinates.txt");
        config.paths.outputs_dir = root.join("outputs");
        config
    }

    #[test]
    fn test_missing_root_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let service = ExtractorService::new(config_for(dir.path()));
        assert!(matches!(service.run(), Err(InvexError::Config(_))));
    }

    #[test]
    fn test_folder_without_pdfs_produces_no_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let batch = dir.path().join("invoices/batch1");
        fs::create_dir_all(&batch).unwrap();
        fs::write(batch.join("notes.txt"), "not a pdf").unwrap();

        let service = ExtractorService::new(config_for(dir.path()));
        let summary = service.run().unwrap();

        assert_eq!(summary, RunSummary::default());
        assert!(!dir.path().join("outputs/json/batch1.json").exists());
        assert!(!dir.path().join("outputs/csv/batch1.csv").exists());
    }

    #[test]
    fn test_unreadable_pdf_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let batch = dir.path().join("invoices/batch1");
        fs::create_dir_all(&batch).unwrap();
        fs::write(batch.join("broken.pdf"), "not really a pdf").unwrap();

        let service = ExtractorService::new(config_for(dir.path()));
        let mut calls = Vec::new();
        let summary = service
            .run_with_progress(&mut |current, total| calls.push((current, total)))
            .unwrap();

        assert_eq!(summary.documents_failed, 1);
        assert_eq!(summary.documents_ok, 0);
        assert_eq!(summary.folders_written, 0);
        // the callback still fires for the failed attempt, 1-indexed
        assert_eq!(calls, vec![(1, 1)]);
        assert!(!dir.path().join("outputs/json/batch1.json").exists());
    }
}
