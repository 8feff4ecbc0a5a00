use async_trait::async_trait;
use persona_chat::modules::llm::{CompletionRequest, GenerationError, LlmCapability};
use std::collections::VecDeque;
use std::sync::Mutex;

pub struct MockLlm {
    queued: Mutex<VecDeque<Result<String, String>>>,
    default_response: Result<String, String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlm {
    pub fn new() -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            default_response: Ok("Indeed.".to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, text: &str) -> Self {
        self.default_response = Ok(text.to_string());
        self
    }

    /// Served once, in order, before falling back to the default response.
    pub fn then(self, response: Result<&str, &str>) -> Self {
        self.queued
            .lock()
            .unwrap()
            .push_back(response.map(str::to_string).map_err(str::to_string));
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
        let response = self
            .queued
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default_response.clone());
        response.map_err(|e| GenerationError::Api { status: 500, body: e })
    }
}
