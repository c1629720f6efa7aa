//! Per-section embedding similarity and weighted aggregation

use crate::config::SectionWeights;
use crate::embedding::EmbeddingProvider;
use crate::error::{Result, ResumeMatcherError};
use crate::matching::extractor::{JobSections, ResumeSections};
use serde::{Deserialize, Serialize};

/// The fields compared between a resume and a job posting, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Skills,
    Experience,
    Education,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Title,
        Field::Skills,
        Field::Experience,
        Field::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Skills => "skills",
            Field::Experience => "experience",
            Field::Education => "education",
        }
    }

    /// Human-readable label used in explanations.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "название должности",
            Field::Skills => "навыки и требования",
            Field::Experience => "опыт и обязанности",
            Field::Education => "образование",
        }
    }
}

/// Similarity per compared field, each in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionScores {
    pub title: f64,
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

impl SectionScores {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Title => self.title,
            Field::Skills => self.skills,
            Field::Experience => self.experience,
            Field::Education => self.education,
        }
    }

    pub fn set(&mut self, field: Field, score: f64) {
        match field {
            Field::Title => self.title = score,
            Field::Skills => self.skills = score,
            Field::Experience => self.experience = score,
            Field::Education => self.education = score,
        }
    }

    /// Iterate fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, f64)> + '_ {
        Field::ALL.iter().map(move |f| (*f, self.get(*f)))
    }
}

pub struct SimilarityEngine {
    weights: SectionWeights,
}

impl SimilarityEngine {
    pub fn new(weights: SectionWeights) -> Self {
        Self { weights }
    }

    /// Score the fixed comparison pairs between a resume and a job posting and
    /// combine them into a weighted aggregate in [0, 100].
    pub fn score_sections(
        &self,
        resume: &ResumeSections,
        job: &JobSections,
        provider: &dyn EmbeddingProvider,
    ) -> Result<(f64, SectionScores)> {
        // Skills and experience carry the about text as combined signal.
        let resume_skills = join_texts(&resume.skills, &resume.about);
        let resume_experience = join_texts(&resume.experience, &resume.about);

        let pairs = [
            (Field::Title, resume.position.as_str(), job.title.as_str()),
            (Field::Skills, resume_skills.as_str(), job.requirements.as_str()),
            (
                Field::Experience,
                resume_experience.as_str(),
                job.responsibilities.as_str(),
            ),
            (
                Field::Education,
                resume.education.as_str(),
                job.education.as_str(),
            ),
        ];

        let mut scores = SectionScores::default();
        for (field, resume_text, job_text) in pairs {
            let score = self.field_score(resume_text, job_text, provider)?;
            scores.set(field, score);
        }

        let total = round2(
            scores
                .iter()
                .map(|(field, score)| score * self.weight(field))
                .sum(),
        );

        Ok((total, scores))
    }

    /// Similarity of one comparison pair as a percentage, rounded to two
    /// decimals. Empty text on either side scores 0.0 without an embedding
    /// call.
    fn field_score(
        &self,
        resume_text: &str,
        job_text: &str,
        provider: &dyn EmbeddingProvider,
    ) -> Result<f64> {
        if resume_text.trim().is_empty() || job_text.trim().is_empty() {
            return Ok(0.0);
        }

        let resume_emb = provider.embed(&[resume_text.to_string()])?;
        let job_emb = provider.embed(&[job_text.to_string()])?;

        let (Some(resume_vec), Some(job_vec)) = (resume_emb.first(), job_emb.first()) else {
            return Err(ResumeMatcherError::Embedding(
                "Provider returned no vectors".to_string(),
            ));
        };

        let similarity = cosine_similarity(resume_vec, job_vec)?.clamp(0.0, 1.0);
        Ok(round2(similarity as f64 * 100.0))
    }

    fn weight(&self, field: Field) -> f64 {
        match field {
            Field::Title => self.weights.title,
            Field::Skills => self.weights.skills,
            Field::Experience => self.weights.experience,
            Field::Education => self.weights.education,
        }
    }
}

/// Cosine similarity on L2-normalized vectors. Normalization happens here
/// regardless of whether the provider already normalizes, so the score range
/// stays correct even if the provider contract is violated.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(ResumeMatcherError::Embedding(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot_product / (norm_a * norm_b))
}

fn join_texts(first: &str, second: &str) -> String {
    format!("{}\n{}", first, second).trim().to_string()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
