use super::*;
use std::sync::Mutex;

// =========================================================================
// MockModel
// =========================================================================

struct MockModel {
    responses: Mutex<Vec<Result<GenerateContentResponse, ChatError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockModel {
    fn new(responses: Vec<Result<GenerateContentResponse, ChatError>>) -> Self {
        Self { responses: Mutex::new(responses), prompts: Mutex::new(Vec::new()) }
    }
}

#[async_trait::async_trait]
impl GenerativeModel for MockModel {
    fn model(&self) -> &str {
        "mock"
    }

    async fn generate_content(&self, prompt: &str) -> Result<GenerateContentResponse, ChatError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.responses.lock().unwrap().remove(0)
    }
}

#[tokio::test]
async fn relay_returns_first_candidate_text() {
    let model = MockModel::new(vec![Ok(GenerateContentResponse::with_text("hi"))]);
    let reply = relay(&model, "hello").await.unwrap();
    assert_eq!(reply, "hi");
    assert_eq!(model.prompts.lock().unwrap().as_slice(), ["hello".to_owned()]);
}

#[tokio::test]
async fn relay_falls_back_on_empty_candidates() {
    let model = MockModel::new(vec![Ok(GenerateContentResponse::default())]);
    assert_eq!(relay(&model, "hello").await.unwrap(), FALLBACK_REPLY);
}

#[tokio::test]
async fn relay_falls_back_on_empty_text() {
    let model = MockModel::new(vec![Ok(GenerateContentResponse::with_text(""))]);
    assert_eq!(relay(&model, "hello").await.unwrap(), "No valid response from Gemini.");
}

#[tokio::test]
async fn relay_propagates_model_errors() {
    let model = MockModel::new(vec![Err(ChatError::ApiResponse { status: 503, body: "overloaded".into() })]);
    let err = relay(&model, "hello").await.unwrap_err();
    assert_eq!(err.to_string(), "API response error: status 503: overloaded");
}
