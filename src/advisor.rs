//! AI academic advisor: course recommendations and learning insights.
//!
//! Both retrievals swallow every failure. The caller always gets a value it
//! can render, and `Retrieval` records whether that value is a fallback.

use crate::catalog::{find_course, Course};
use crate::gemini::{GenerationRequest, TextGenerator};
use crate::user::User;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};

pub const INSIGHT_FALLBACK: &str =
    "Keep up the great work! Consistency is key to mastering any subject.";

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("no API key configured for the text-generation service")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service returned HTTP {status}: {message}")]
    Service { status: u16, message: String },
    #[error("service returned no text")]
    EmptyResponse,
    #[error("malformed reply: {0}")]
    Malformed(String),
}

/// Outcome of a retrieval that never fails outright.
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieval<T> {
    Fresh(T),
    Fallback { value: T, reason: String },
}

impl<T> Retrieval<T> {
    fn from_result(result: Result<T, AdvisorError>, fallback: impl FnOnce() -> T) -> Self {
        match result {
            Ok(value) => Retrieval::Fresh(value),
            Err(e) => Retrieval::Fallback {
                value: fallback(),
                reason: e.to_string(),
            },
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Retrieval::Fresh(v) => v,
            Retrieval::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Retrieval::Fallback { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub course_id: String,
    /// Empty when the model leaves it out.
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize)]
struct RecommendationReply {
    #[serde(default)]
    recommendations: Vec<Recommendation>,
}

/// Both dashboard retrievals, produced together.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardAdvice {
    pub recommendations: Retrieval<Vec<Recommendation>>,
    pub insight: Retrieval<String>,
}

#[derive(Serialize)]
struct CourseBrief<'a> {
    id: &'a str,
    title: &'a str,
    category: &'a str,
}

pub fn recommendation_prompt(user: &User, catalog: &[Course]) -> String {
    let briefs: Vec<CourseBrief<'_>> = catalog
        .iter()
        .map(|c| CourseBrief {
            id: &c.id,
            title: &c.title,
            category: &c.category,
        })
        .collect();
    let courses = serde_json::to_string(&briefs).unwrap_or_else(|_| "[]".to_string());
    format!(
        "You are the academic advisor of an e-learning platform. Study the student profile \
         and recommend the 3 most relevant courses.\n\n\
         Student profile:\n\
         - Interests: {interests}\n\
         - Current enrollments: {enrolled}\n\n\
         Available courses:\n{courses}\n\n\
         Reply in JSON with each course id and a short explanation of why it fits.",
        interests = user.interests.join(", "),
        enrolled = user.enrolled_courses.join(", "),
    )
}

/// `{ recommendations: [ { courseId, reason } ] }`
pub fn recommendation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recommendations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "courseId": { "type": "STRING" },
                        "reason": { "type": "STRING" }
                    },
                    "required": ["courseId", "reason"]
                }
            }
        }
    })
}

pub fn parse_recommendations(text: &str) -> Result<Vec<Recommendation>, AdvisorError> {
    serde_json::from_str::<RecommendationReply>(text.trim())
        .map(|r| r.recommendations)
        .map_err(|e| AdvisorError::Malformed(e.to_string()))
}

pub fn insight_prompt(user: &User) -> String {
    let progress = json!({
        "enrollments": user.enrolled_courses,
        "interests": user.interests,
    });
    format!(
        "Based on the following learning progress: {progress}, provide 3 motivational and \
         strategic insights to help the student improve."
    )
}

pub async fn fetch_recommendations<G: TextGenerator>(
    generator: &G,
    user: &User,
    catalog: &[Course],
) -> Retrieval<Vec<Recommendation>> {
    let request = GenerationRequest::json(
        recommendation_prompt(user, catalog),
        recommendation_schema(),
    );
    let result = match generator.generate(&request).await {
        Ok(text) => parse_recommendations(&text),
        Err(e) => Err(e),
    };
    if let Err(e) = &result {
        warn!(user = %user.id, error = %e, "AI recommendation failed; showing none");
    }
    Retrieval::from_result(result, Vec::new)
}

pub async fn fetch_insight<G: TextGenerator>(generator: &G, user: &User) -> Retrieval<String> {
    let request = GenerationRequest::text(insight_prompt(user));
    let result = generator.generate(&request).await.map(|t| t.trim().to_string());
    if let Err(e) = &result {
        warn!(user = %user.id, error = %e, "AI insight failed; using fallback text");
    }
    Retrieval::from_result(result, || INSIGHT_FALLBACK.to_string())
}

/// Issues both retrievals at once and waits for both.
pub async fn fetch_dashboard_advice<G: TextGenerator>(
    generator: &G,
    user: &User,
    catalog: &[Course],
) -> DashboardAdvice {
    let (recommendations, insight) = tokio::join!(
        fetch_recommendations(generator, user, catalog),
        fetch_insight(generator, user),
    );
    info!(
        user = %user.id,
        recommendations = recommendations.value().len(),
        fallback = recommendations.is_fallback() || insight.is_fallback(),
        "dashboard advice ready"
    );
    DashboardAdvice {
        recommendations,
        insight,
    }
}

/// Pairs recommendations with their courses. Ids missing from the catalog
/// are skipped.
pub fn resolve_recommendations<'a>(
    recommendations: &'a [Recommendation],
    catalog: &'a [Course],
) -> Vec<(&'a Course, &'a str)> {
    recommendations
        .iter()
        .filter_map(|r| find_course(catalog, &r.course_id).map(|c| (c, r.reason.as_str())))
        .collect()
}
