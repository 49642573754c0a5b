use super::*;
use crate::chat::gemini::GenerateContentResponse;

struct EchoModel;

#[async_trait::async_trait]
impl GenerativeModel for EchoModel {
    fn model(&self) -> &str {
        "echo"
    }

    async fn generate_content(&self, prompt: &str) -> Result<GenerateContentResponse, ChatError> {
        Ok(GenerateContentResponse::with_text(prompt))
    }
}

#[test]
fn chat_backend_from_ok_is_ready() {
    let backend = ChatBackend::from_result(Ok::<_, ChatError>(EchoModel));
    assert!(matches!(backend, ChatBackend::Ready(ref m) if m.model() == "echo"));
}

#[test]
fn chat_backend_from_err_keeps_message() {
    let backend = ChatBackend::from_result::<EchoModel>(Err(ChatError::MissingApiKey { var: "GEMINI_API_KEY".into() }));
    match backend {
        ChatBackend::Unavailable(msg) => assert_eq!(&*msg, "missing API key: env var GEMINI_API_KEY not set"),
        ChatBackend::Ready(_) => panic!("expected unavailable backend"),
    }
}

#[tokio::test]
async fn app_state_clones_share_campus() {
    let state = test_helpers::test_app_state();
    let clone = state.clone();
    state.campus.write().await.catalog.books[0].qty = 0;
    assert_eq!(clone.campus.read().await.catalog.books[0].qty, 0);
}
