//! Question-bank loader.
//!
//! Client side of the bank endpoints: fetches the whole flat-file pool plus
//! any per-subject structured sets, resolves which source each subject uses,
//! shuffles uniformly and truncates to the configured counts. Re-fetches on
//! every exam start; nothing is cached across calls.

use std::collections::HashMap;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{BankResponse, ExamType, Question};

/// Which source a subject's pool came from. Logged per subject so the
/// fallback chain stays auditable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolSource {
    /// Per-subject structured JSON set
    Structured,
    /// Flat CSV pool filtered by subject-name substring
    FlatFile,
}

/// Loaded pools for one exam start.
pub struct SubjectPools {
    pub exam_type: ExamType,
    pub pools: HashMap<String, Vec<Question>>,
    pub sources: HashMap<String, PoolSource>,
}

impl SubjectPools {
    pub fn total_questions(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }
}

/// Question-bank HTTP client.
pub struct BankLoader {
    http: reqwest::Client,
    base_url: String,
}

impl BankLoader {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.backend_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Loads and composes the per-subject question pools for an exam type.
    ///
    /// Fails with `BankUnavailable` when the flat-file pool cannot be
    /// fetched or holds no questions; per-subject structured fetches are
    /// non-fatal and fall back to filtering the flat pool.
    pub async fn load(&self, exam_type: ExamType) -> AppResult<SubjectPools> {
        let flat_pool = self.fetch_flat_pool(exam_type).await?;
        if flat_pool.is_empty() {
            return Err(AppError::bank_unavailable(
                exam_type.name(),
                "havuz boş döndü",
            ));
        }
        info!(
            "{} düz havuzu yüklendi: {} soru",
            exam_type,
            flat_pool.len()
        );

        // fetch every subject's structured set concurrently; a miss is the
        // normal case, not an error
        let subjects = exam_type.subjects();
        let structured_sets = join_all(
            subjects
                .iter()
                .map(|subject| self.fetch_structured_subject(exam_type, subject)),
        )
        .await;

        let mut pools = HashMap::new();
        let mut sources = HashMap::new();

        for (subject, structured) in subjects.iter().zip(structured_sets) {
            let spec = exam_type
                .subject_spec(subject)
                .expect("catalog subject must have a spec");

            let (pool, source) = build_subject_pool(
                spec.question_count,
                subject,
                &flat_pool,
                structured,
                &mut rand::thread_rng(),
            );
            info!(
                "{} / {}: {} kaynağından {} soru",
                exam_type,
                subject,
                match source {
                    PoolSource::Structured => "JSON",
                    PoolSource::FlatFile => "CSV",
                },
                pool.len()
            );

            pools.insert(subject.to_string(), pool);
            sources.insert(subject.to_string(), source);
        }

        Ok(SubjectPools {
            exam_type,
            pools,
            sources,
        })
    }

    async fn fetch_flat_pool(&self, exam_type: ExamType) -> AppResult<Vec<Question>> {
        let url = format!("{}/api/questions/{}", self.base_url, exam_type.name());
        debug!("düz havuz isteniyor: {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::bank_unavailable(exam_type.name(), e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::bank_unavailable(
                exam_type.name(),
                format!("HTTP {}", response.status()),
            ));
        }

        let envelope: BankResponse = response
            .json()
            .await
            .map_err(|e| AppError::bank_unavailable(exam_type.name(), e.to_string()))?;

        match envelope.data {
            Some(data) if envelope.success => Ok(data.questions),
            _ => Err(AppError::bank_unavailable(
                exam_type.name(),
                envelope.error.unwrap_or_else(|| "bilinmeyen hata".to_string()),
            )),
        }
    }

    /// Structured per-subject fetch. Any failure is logged and treated as
    /// "no structured set", so one broken file never blocks the exam.
    async fn fetch_structured_subject(
        &self,
        exam_type: ExamType,
        subject: &str,
    ) -> Vec<Question> {
        let url = format!(
            "{}/api/questions/{}/{}",
            self.base_url,
            exam_type.name(),
            subject
        );

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("{} / {} JSON kaynağına ulaşılamadı: {}", exam_type, subject, e);
                return Vec::new();
            }
        };
        if !response.status().is_success() {
            debug!(
                "{} / {} için JSON kaynağı yok (HTTP {})",
                exam_type,
                subject,
                response.status()
            );
            return Vec::new();
        }

        match response.json::<BankResponse>().await {
            Ok(envelope) if envelope.success => envelope
                .data
                .map(|data| data.questions)
                .unwrap_or_default(),
            Ok(_) => Vec::new(),
            Err(e) => {
                warn!("{} / {} JSON yanıtı çözümlenemedi: {}", exam_type, subject, e);
                Vec::new()
            }
        }
    }
}

/// Resolve, shuffle uniformly, truncate to the configured count. Yields at
/// most `count` questions, the whole pool when it is smaller.
fn build_subject_pool<R: rand::Rng>(
    count: usize,
    subject: &str,
    flat_pool: &[Question],
    structured: Vec<Question>,
    rng: &mut R,
) -> (Vec<Question>, PoolSource) {
    let (mut pool, source) = resolve_subject_pool(subject, flat_pool, structured);
    crate::bank::shuffle_questions(&mut pool, rng);
    pool.truncate(count);
    (pool, source)
}

/// Two-stage resolver: a non-empty structured set wins outright, otherwise
/// the flat pool is filtered by case-insensitive subject-name substring.
fn resolve_subject_pool(
    subject: &str,
    flat_pool: &[Question],
    structured: Vec<Question>,
) -> (Vec<Question>, PoolSource) {
    if !structured.is_empty() {
        return (structured, PoolSource::Structured);
    }

    let needle = subject.to_lowercase();
    let filtered: Vec<Question> = flat_pool
        .iter()
        .filter(|q| q.subject.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    (filtered, PoolSource::FlatFile)
}
