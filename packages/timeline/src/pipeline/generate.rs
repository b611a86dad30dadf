//! `EventGenerator` backed by a `LanguageModel`.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::pipeline::prompts::{parse_events_response, timeline_prompt};
use crate::traits::generator::{EventGenerator, LanguageModel};
use crate::types::{best_effort::BestEffort, event::Event};

/// Generates timeline events by prompting a language model.
///
/// Model failures and unparseable output degrade to an empty event list.
pub struct TimelineGenerator<M: LanguageModel> {
    model: M,
}

impl<M: LanguageModel> TimelineGenerator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

#[async_trait]
impl<M: LanguageModel> EventGenerator for TimelineGenerator<M> {
    fn name(&self) -> &str {
        self.model.name()
    }

    async fn generate_events(&self, text: &str) -> BestEffort<Vec<Event>> {
        let prompt = timeline_prompt(text);

        let raw = match self.model.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(model = self.model.name(), error = %e, "Event generation failed");
                return BestEffort::degraded(e);
            }
        };

        match parse_events_response(&raw) {
            Ok(events) => {
                debug!(count = events.len(), "Parsed generated events");
                BestEffort::Ok(events)
            }
            Err(e) => {
                warn!(
                    model = self.model.name(),
                    error = %e,
                    response_len = raw.len(),
                    "Could not parse events from model response"
                );
                BestEffort::degraded(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockLanguageModel;

    #[tokio::test]
    async fn test_generates_from_model_output() {
        let model = MockLanguageModel::new()
            .with_response(r#"[{"date":"44 BC","summary":"Caesar assassinated"}]"#);
        let generator = TimelineGenerator::new(model);

        let events = generator.generate_events("Julius Caesar...").await;
        assert_eq!(
            events,
            BestEffort::Ok(vec![Event::new("44 BC", "Caesar assassinated")])
        );

        let prompts = generator.model().prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Julius Caesar..."));
    }

    #[tokio::test]
    async fn test_non_json_output_degrades() {
        let model = MockLanguageModel::new().with_response("Sorry, I can't help with that.");
        let generator = TimelineGenerator::new(model);

        let events = generator.generate_events("text").await;
        assert!(events.is_degraded());
        assert!(events.into_value().is_empty());
    }

    #[tokio::test]
    async fn test_model_error_degrades() {
        let generator = TimelineGenerator::new(MockLanguageModel::failing("quota exceeded"));

        let events = generator.generate_events("text").await;
        assert!(events.reason().unwrap().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_name_comes_from_model() {
        let generator = TimelineGenerator::new(MockLanguageModel::new());
        assert_eq!(generator.name(), "mock-model");
    }
}
