//! Roadmap generation — prompt construction, model call, schema validation.
//!
//! The day-count and topic-breakdown policy is delegated to the external
//! model through the prompt; the only contract enforced locally is the
//! *shape* of the reply (a non-empty array of strings). Length matching
//! against the requested time commitment is advisory only.

pub mod gemini;

use std::sync::Arc;

use async_trait::async_trait;
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Days per week used by the prompt's day-count rule.
const DAYS_PER_WEEK: usize = 7;

/// Days per month used by the prompt's day-count rule.
const DAYS_PER_MONTH: usize = 28;

/// Roadmap generation errors.
#[derive(Debug, Error)]
pub enum RoadmapError {
    /// The model reply parsed, but does not match the declared schema.
    #[error("Schema validation failed: {0}")]
    Schema(String),

    /// The model call itself failed (transport, quota, malformed reply).
    #[error("Model request failed: {0}")]
    Model(String),
}

/// Day-wise learning roadmap; each element names the topic of study for one
/// calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Roadmap(pub Vec<String>);

/// External text-generation model constrained to a declared output schema.
///
/// The model is inherently non-deterministic, so it is consumed through this
/// trait and substituted with a stub in tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Request a completion for `prompt`, constrained to `response_schema`.
    /// Returns the raw reply text, expected to encode a JSON value.
    async fn generate(
        &self,
        prompt: &str,
        response_schema: &Value,
    ) -> Result<String, RoadmapError>;
}

/// JSON Schema sent to the model to constrain its reply.
pub fn roadmap_schema() -> Value {
    schema_for!(Roadmap).to_value()
}

/// Derive the day count a time commitment resolves to ("2 weeks" → 14,
/// "3 months" → 84). Returns `None` when the string doesn't follow the
/// `<amount> <unit>` form.
pub fn expected_day_count(time_commitment: &str) -> Option<usize> {
    let lower = time_commitment.to_lowercase();
    let mut parts = lower.split_whitespace();
    let amount: usize = parts.next()?.parse().ok()?;
    let unit = parts.next()?;
    if unit.starts_with("month") {
        Some(amount * DAYS_PER_MONTH)
    } else if unit.starts_with("week") {
        Some(amount * DAYS_PER_WEEK)
    } else if unit.starts_with("day") {
        Some(amount)
    } else {
        None
    }
}

/// Build the study-planner prompt for a topic and time commitment.
fn build_prompt(topic: &str, time_commitment: &str) -> String {
    format!(
        "You are an expert study planner. Your sole task is to create a detailed \
         learning roadmap for a given topic. Return an array of strings, where each \
         string is the topic to cover on one day, sized to the time the user can give \
         in a day. If a particular topic requires more time, break it down across \
         multiple consecutive days. If the topic is studied over multiple months, the \
         number of days is months * 28. Each week has 7 days. Cover all important \
         sub-topics of the main topic, and keep the roadmap practical and achievable \
         within the given time frame.\n\n\
         Topic: {topic}\n\
         Time Commitment: {time_commitment}\n\n\
         Return the roadmap as an array of strings, one per day."
    )
}

/// Parse and validate a model reply against the roadmap schema.
fn validate_roadmap(text: &str) -> Result<Vec<String>, RoadmapError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| RoadmapError::Schema(format!("model reply is not valid JSON: {e}")))?;
    let Roadmap(days) = serde_json::from_value(value).map_err(|e| {
        RoadmapError::Schema(format!("model reply does not match the roadmap schema: {e}"))
    })?;
    if days.is_empty() {
        return Err(RoadmapError::Schema("model reply is an empty roadmap".into()));
    }
    Ok(days)
}

/// Roadmap generation service: one model call, schema-validated pass-through.
///
/// No retries, no fallback roadmap: a failed or out-of-shape reply is a
/// failed call.
pub struct RoadmapPlanner {
    generator: Arc<dyn TextGenerator>,
}

impl RoadmapPlanner {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generate a day-wise roadmap for `topic` within `time_commitment`.
    pub async fn generate(
        &self,
        topic: &str,
        time_commitment: &str,
    ) -> Result<Vec<String>, RoadmapError> {
        let prompt = build_prompt(topic, time_commitment);
        let schema = roadmap_schema();
        let text = self.generator.generate(&prompt, &schema).await?;
        let days = validate_roadmap(&text)?;

        // Length matching is advisory only: log mismatches, do not fail.
        if let Some(expected) = expected_day_count(time_commitment)
            && expected != days.len()
        {
            warn!(
                expected,
                actual = days.len(),
                time_commitment,
                "roadmap length differs from the requested time commitment"
            );
        }

        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stub model returning a canned reply.
    struct StubGenerator(String);

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, _: &str, _: &Value) -> Result<String, RoadmapError> {
            Ok(self.0.clone())
        }
    }

    /// Stub model that always fails.
    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _: &str, _: &Value) -> Result<String, RoadmapError> {
            Err(RoadmapError::Model("quota exceeded".into()))
        }
    }

    fn planner_with_reply(reply: &str) -> RoadmapPlanner {
        RoadmapPlanner::new(Arc::new(StubGenerator(reply.to_string())))
    }

    fn days_json(n: usize) -> String {
        let days: Vec<String> = (1..=n).map(|d| format!("Day {d}: practice")).collect();
        serde_json::to_string(&days).unwrap()
    }

    #[test]
    fn schema_declares_an_array_of_strings() {
        let schema = roadmap_schema();
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["type"], "string");
    }

    #[test]
    fn day_count_weeks_and_months() {
        assert_eq!(expected_day_count("2 weeks"), Some(14));
        assert_eq!(expected_day_count("1 week"), Some(7));
        assert_eq!(expected_day_count("3 months"), Some(84));
        assert_eq!(expected_day_count("10 days"), Some(10));
        assert_eq!(expected_day_count("2 WEEKS"), Some(14));
    }

    #[test]
    fn day_count_rejects_unparseable_input() {
        assert_eq!(expected_day_count("a fortnight"), None);
        assert_eq!(expected_day_count("weeks"), None);
        assert_eq!(expected_day_count("2"), None);
        assert_eq!(expected_day_count(""), None);
        assert_eq!(expected_day_count("2 sprints"), None);
    }

    #[test]
    fn prompt_carries_topic_and_commitment() {
        let prompt = build_prompt("Linear Algebra", "2 weeks");
        assert!(prompt.contains("Topic: Linear Algebra"));
        assert!(prompt.contains("Time Commitment: 2 weeks"));
    }

    #[test]
    fn valid_array_of_strings_passes() {
        let days = validate_roadmap(&days_json(14)).unwrap();
        assert_eq!(days.len(), 14);
    }

    #[test]
    fn single_string_fails_schema() {
        assert!(matches!(
            validate_roadmap("\"just one topic\""),
            Err(RoadmapError::Schema(_))
        ));
    }

    #[test]
    fn array_with_a_number_fails_schema() {
        assert!(matches!(
            validate_roadmap(r#"["Day 1", 2, "Day 3"]"#),
            Err(RoadmapError::Schema(_))
        ));
    }

    #[test]
    fn empty_array_fails_schema() {
        assert!(matches!(
            validate_roadmap("[]"),
            Err(RoadmapError::Schema(_))
        ));
    }

    #[test]
    fn non_json_fails_schema() {
        assert!(matches!(
            validate_roadmap("here is your roadmap:"),
            Err(RoadmapError::Schema(_))
        ));
    }

    #[tokio::test]
    async fn planner_returns_the_validated_sequence() {
        let planner = planner_with_reply(&days_json(14));
        let days = planner.generate("Linear Algebra", "2 weeks").await.unwrap();
        assert_eq!(days.len(), 14);
    }

    #[tokio::test]
    async fn length_mismatch_is_advisory() {
        // 10 entries against "2 weeks" (14 days): logged, not rejected.
        let planner = planner_with_reply(&days_json(10));
        let days = planner.generate("Linear Algebra", "2 weeks").await.unwrap();
        assert_eq!(days.len(), 10);
    }

    #[tokio::test]
    async fn out_of_shape_reply_is_a_schema_error() {
        let planner = planner_with_reply(r#"{"roadmap": ["Day 1"]}"#);
        let err = planner
            .generate("Linear Algebra", "2 weeks")
            .await
            .unwrap_err();
        assert!(matches!(err, RoadmapError::Schema(_)));
    }

    #[tokio::test]
    async fn model_failure_propagates_unchanged() {
        let planner = RoadmapPlanner::new(Arc::new(FailingGenerator));
        let err = planner
            .generate("Linear Algebra", "2 weeks")
            .await
            .unwrap_err();
        assert!(matches!(err, RoadmapError::Model(_)));
    }
}
