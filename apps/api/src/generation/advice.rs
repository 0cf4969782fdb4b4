// Per-step advice — a short personalized pep talk plus focus techniques for
// the roadmap step the user is currently on.

use serde::{Deserialize, Serialize};

use crate::generation::prompts::{ADVICE_PROMPT_TEMPLATE, ADVICE_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAdviceInput {
    pub roadmap_step: String,
    pub user_skills: String,
    pub goal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAdviceOutput {
    pub advice: String,
    pub focus_techniques: Vec<String>,
}

/// Generates advice for one roadmap step via the LLM.
pub async fn generate_advice(
    llm: &LlmClient,
    input: &GenerateAdviceInput,
) -> Result<GenerateAdviceOutput, LlmError> {
    let prompt = ADVICE_PROMPT_TEMPLATE
        .replace("{roadmap_step}", &input.roadmap_step)
        .replace("{user_skills}", &input.user_skills)
        .replace("{goal}", &input.goal);

    llm.call_json::<GenerateAdviceOutput>(&prompt, ADVICE_SYSTEM)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_advice_renders_all_placeholders() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_body(mockito::Matcher::Regex(
                "(?s)Master SQL Joins.*I know basic Python.*Become a data engineer".to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "content": [{"type": "text", "text": r#"{"advice": "Practice on real tables.", "focusTechniques": ["Write one join per day", "Sketch the tables first"]}"#}],
                    "usage": {"input_tokens": 10, "output_tokens": 20}
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let llm = LlmClient::with_base_url("test-key".to_string(), server.url());
        let input = GenerateAdviceInput {
            roadmap_step: "Master SQL Joins".to_string(),
            user_skills: "I know basic Python".to_string(),
            goal: "Become a data engineer".to_string(),
        };
        let output = generate_advice(&llm, &input).await.unwrap();

        assert_eq!(output.advice, "Practice on real tables.");
        assert_eq!(output.focus_techniques.len(), 2);
        mock.assert_async().await;
    }

    #[test]
    fn test_deserialize_model_output() {
        let json = r#"{
            "advice": "You already know Python, so lean on that while the SQL syntax settles in.",
            "focusTechniques": [
                "Write one query from memory before looking anything up",
                "Keep a running cheatsheet of joins you actually used"
            ]
        }"#;

        let output: GenerateAdviceOutput = serde_json::from_str(json).unwrap();
        assert!(output.advice.starts_with("You already know Python"));
        assert_eq!(output.focus_techniques.len(), 2);
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let output = GenerateAdviceOutput {
            advice: "Keep going.".to_string(),
            focus_techniques: vec!["Pomodoro".to_string()],
        };

        let value = serde_json::to_value(&output).unwrap();
        assert!(value.get("focusTechniques").is_some());
        assert!(value.get("focus_techniques").is_none());
    }
}
