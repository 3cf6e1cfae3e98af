use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{run_search, SearchParams, SearchResponse, DEFAULT_LOCATION};
use crate::errors::AppError;
use crate::matching::salary::{label_or_unavailable, SalaryEstimate};
use crate::models::skills::SkillSet;
use crate::resume::{extract_resume_text, parse_resume_text};
use crate::state::AppState;

/// Upper bound for the multipart body of a résumé upload.
pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct ManualSearchRequest {
    /// Comma-separated, e.g. `"python, react"`.
    pub skills: String,
    pub location: Option<String>,
    pub min_score: Option<f64>,
    pub keyword: Option<String>,
    pub limit: Option<usize>,
}

/// POST /api/v1/search
pub async fn handle_manual_search(
    State(state): State<AppState>,
    Json(req): Json<ManualSearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let skills = SkillSet::from_csv(&req.skills);
    if skills.is_empty() {
        return Err(AppError::Validation(
            "Please enter at least one skill".to_string(),
        ));
    }

    let location = req
        .location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LOCATION.to_string());
    let params = SearchParams::resolve(&state, req.min_score, req.keyword, req.limit)?;

    let response = run_search(&state, skills, location, None, params).await?;
    Ok(Json(response))
}

#[derive(Default)]
struct ResumeForm {
    resume: Option<Bytes>,
    min_score: Option<f64>,
    keyword: Option<String>,
    limit: Option<usize>,
}

async fn read_resume_form(mut multipart: Multipart) -> Result<ResumeForm, AppError> {
    let mut form = ResumeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                form.resume = Some(data);
            }
            "min_score" | "keyword" | "limit" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))?;
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                match name.as_str() {
                    "min_score" => {
                        form.min_score = Some(text.parse().map_err(|_| {
                            AppError::Validation(format!("min_score is not a number: {text}"))
                        })?)
                    }
                    "limit" => {
                        form.limit = Some(text.parse().map_err(|_| {
                            AppError::Validation(format!("limit is not a whole number: {text}"))
                        })?)
                    }
                    _ => form.keyword = Some(text.to_string()),
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// POST /api/v1/search/resume
/// Multipart fields: `resume` (PDF), optional `min_score`, `keyword`, `limit`.
pub async fn handle_resume_search(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SearchResponse>, AppError> {
    let form = read_resume_form(multipart).await?;
    let resume = form
        .resume
        .ok_or_else(|| AppError::Validation("Missing 'resume' file field".to_string()))?;
    let params = SearchParams::resolve(&state, form.min_score, form.keyword, form.limit)?;

    // Unreadable PDFs still search, with the default skill.
    let text = match extract_resume_text(resume).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Resume text extraction failed: {e}");
            String::new()
        }
    };

    let profile = parse_resume_text(&text, &state.reference);
    let skills = profile.skills.or_default(&state.reference.default_skill);

    let response = run_search(
        &state,
        skills,
        profile.location,
        profile.experience_years,
        params,
    )
    .await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct SalaryQuery {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct SalaryResponse {
    pub title: String,
    pub estimated_salary: String,
    /// The canonical title the estimate is anchored on.
    pub anchor: Option<SalaryEstimate>,
}

/// GET /api/v1/salary?title=
pub async fn handle_salary(
    State(state): State<AppState>,
    Query(query): Query<SalaryQuery>,
) -> Json<SalaryResponse> {
    let anchor = state.matcher.salary_estimate(&query.title);
    Json(SalaryResponse {
        estimated_salary: label_or_unavailable(anchor.as_ref()),
        anchor,
        title: query.title,
    })
}
