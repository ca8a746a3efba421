use crate::admin::{AdminResponse, TenderRequest};
use crate::config::ResolvedConfig;
use crate::constants::{ADMIN_PATH, GENERATE_PATH, QUESTIONS_PATH};
use crate::errors::{AppError, AppResult};
use crate::technical::{GenerationResponse, QuestionSet, TechnicalAnswers};
use crate::utils::{endpoint, format_duration};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// HTTP client for the administrative and technical generation services.
///
/// Every call is a single request: no retries, no backoff. A timeout applies only when
/// one is configured.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    admin_base_url: String,
    technical_base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    respuestas: &'a TechnicalAnswers,
}

impl ApiClient {
    pub fn new(config: &ResolvedConfig) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            admin_base_url: config.admin_base_url.clone(),
            technical_base_url: config.technical_base_url.clone(),
        })
    }

    /// Submits an administrative tender request.
    ///
    /// # Errors
    ///
    /// - `NetworkError` if the request cannot be sent
    /// - `HttpStatus` for a non-2xx answer with a JSON error body
    /// - `ParseError` if either the success or the error body is not valid JSON
    pub async fn generate_administrative(&self, request: &TenderRequest) -> AppResult<AdminResponse> {
        let url = endpoint(&self.admin_base_url, ADMIN_PATH);
        info!(endpoint = %url, objeto = %request.objeto_contrato, "Submitting administrative tender");
        let started = Instant::now();

        let response = self.http.post(&url).json(request).send().await?;
        let result: AdminResponse = read_json(response).await?;

        info!(
            elapsed = %format_duration(started.elapsed()),
            chars = result.pliego_final.chars().count(),
            "Administrative pliego received"
        );
        Ok(result)
    }

    /// Fetches the technical question list.
    pub async fn fetch_questions(&self) -> AppResult<QuestionSet> {
        let url = endpoint(&self.technical_base_url, QUESTIONS_PATH);
        info!(endpoint = %url, "Fetching technical questions");

        let response = self.http.get(&url).send().await?;
        let questions: QuestionSet = read_json(response).await?;

        info!(
            sections = questions.len(),
            questions = questions.question_count(),
            "Technical questions loaded"
        );
        Ok(questions)
    }

    /// Submits technical answers wrapped as `{"respuestas": ...}`.
    pub async fn generate_technical(
        &self,
        answers: &TechnicalAnswers,
    ) -> AppResult<GenerationResponse> {
        let url = endpoint(&self.technical_base_url, GENERATE_PATH);
        info!(endpoint = %url, sections = answers.len(), "Submitting technical answers");
        let started = Instant::now();

        let response = self
            .http
            .post(&url)
            .json(&GenerateRequest {
                respuestas: answers,
            })
            .send()
            .await?;
        let result: GenerationResponse = read_json(response).await?;

        info!(
            elapsed = %format_duration(started.elapsed()),
            sections = result.secciones.len(),
            "Technical pliego received"
        );
        Ok(result)
    }
}

/// Reads a JSON body, turning non-2xx answers into `HttpStatus` errors.
///
/// The error body is itself parsed as JSON and embedded compactly in the error. When it
/// is not JSON the parse failure is returned instead.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let error_body: serde_json::Value = serde_json::from_slice(&body)?;
        warn!(status = status.as_u16(), body = %error_body, "Server returned an error");
        return Err(AppError::HttpStatus {
            status: status.as_u16(),
            body: error_body.to_string(),
        });
    }

    debug!(status = status.as_u16(), bytes = body.len(), "Response received");
    Ok(serde_json::from_slice(&body)?)
}
