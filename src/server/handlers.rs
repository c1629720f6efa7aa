//! Multipart upload handling for the matching endpoint

use crate::error::ResumeMatcherError;
use crate::input::is_valid_pdf;
use crate::matching::normalize::normalize_scores;
use crate::matching::similarity::{round2, SectionScores};
use crate::server::{ApiError, AppState};
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

/// One ranked entry in the per-job result list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub resume: String,
    pub match_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_percent: Option<f64>,
    pub section_scores: SectionScores,
    pub explanation: String,
}

struct Upload {
    filename: String,
    data: Bytes,
}

/// `POST /match/`: multipart batches of resume and job PDFs, scored pairwise.
///
/// Response maps each job filename to its resumes sorted descending by match
/// percent. Validation failures on a file abort the request with 400; scoring
/// failures on a single pair only zero out that pair.
pub async fn match_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<HashMap<String, Vec<MatchEntry>>>, ApiError> {
    let mut resumes: Vec<Upload> = Vec::new();
    let mut jobs: Vec<Upload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart request: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;

        match name.as_str() {
            "resumes" => resumes.push(Upload { filename, data }),
            "jobs" => jobs.push(Upload { filename, data }),
            other => log::warn!("Ignoring unexpected multipart field: {}", other),
        }
    }

    if resumes.is_empty() || jobs.is_empty() {
        return Err(ApiError::BadRequest(
            "Must provide at least one resume and one job description".to_string(),
        ));
    }

    // Temp files auto-delete on drop, at the end of the request.
    let mut resume_files: Vec<(String, NamedTempFile)> = Vec::new();
    for upload in &resumes {
        if !is_pdf_filename(&upload.filename) {
            log::warn!("Skipping non-PDF resume file: {}", upload.filename);
            continue;
        }
        let file = persist_upload(upload, state.min_upload_bytes, "Resume")?;
        resume_files.push((upload.filename.clone(), file));
    }

    let mut results: HashMap<String, Vec<MatchEntry>> = HashMap::new();

    for upload in &jobs {
        if !is_pdf_filename(&upload.filename) {
            log::warn!("Skipping non-PDF job file: {}", upload.filename);
            continue;
        }
        let job_file = persist_upload(upload, state.min_upload_bytes, "Job")?;

        let mut job_scores: Vec<MatchEntry> = Vec::new();
        for (resume_name, resume_file) in &resume_files {
            let result = state.scorer.score_pair(resume_file.path(), job_file.path());
            job_scores.push(MatchEntry {
                resume: resume_name.clone(),
                match_percent: result.score,
                normalized_percent: None,
                section_scores: result.section_scores,
                explanation: result.explanation,
            });
        }

        job_scores.sort_by(|a, b| {
            b.match_percent
                .partial_cmp(&a.match_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let raw: Vec<f64> = job_scores.iter().map(|e| e.match_percent).collect();
        for (entry, normalized) in job_scores.iter_mut().zip(normalize_scores(&raw)) {
            entry.normalized_percent = Some(round2(normalized));
        }

        results.insert(upload.filename.clone(), job_scores);
    }

    Ok(Json(results))
}

fn is_pdf_filename(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}

/// Validate an upload and land it in a temp file for the extraction pipeline.
fn persist_upload(
    upload: &Upload,
    min_upload_bytes: usize,
    kind: &str,
) -> Result<NamedTempFile, ApiError> {
    if upload.data.len() < min_upload_bytes {
        return Err(ApiError::BadRequest(format!(
            "{} file appears empty or corrupted: {}",
            kind, upload.filename
        )));
    }

    let mut file = tempfile::Builder::new()
        .suffix(".pdf")
        .tempfile()
        .map_err(|e| ApiError::Internal(format!("Failed to create temp file: {}", e)))?;
    file.write_all(&upload.data)
        .map_err(|e| ApiError::Internal(format!("Failed to write upload: {}", e)))?;
    file.flush()
        .map_err(|e| ApiError::Internal(format!("Failed to flush upload: {}", e)))?;

    if !is_valid_pdf(file.path()) {
        return Err(ResumeMatcherError::InvalidDocument(format!(
            "Invalid PDF file: {}",
            upload.filename
        ))
        .into());
    }

    Ok(file)
}
