use crate::modules::llm::{CompletionRequest, GenerationError, LlmCapability};
use async_trait::async_trait;
use std::sync::Mutex;

pub struct MockLlm {
    default_response: Result<String, String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlm {
    pub fn new() -> Self {
        Self {
            default_response: Ok("Indeed.".to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, text: &str) -> Self {
        self.default_response = Ok(text.to_string());
        self
    }

    pub fn failing() -> Self {
        let mut mock = Self::new();
        mock.default_response = Err("Mock error".to_string());
        mock
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmCapability for MockLlm {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        self.default_response
            .clone()
            .map_err(GenerationError::MalformedPayload)
    }
}
