use std::sync::Arc;

use cappy_context::{
    build_selector, ContextPipeline, ContextSelector, CorpusLoader, Persona, PromptComposer,
    SelectorConfig, DEFAULT_CORPUS,
};
use cappy_llm::{resolve_model, ChatClient, GenerateOptions};

use crate::assistant::Assistant;

/// Builder for [`Assistant`]
///
/// # Example
///
/// ```rust
/// use cappy_chat::AssistantBuilder;
///
/// let assistant = AssistantBuilder::new()
///     .corpus("CapServ offers digital loans. Our platform is secure.")
///     .build();
/// assert!(!assistant.has_client());
/// ```
pub struct AssistantBuilder {
    corpus: Option<String>,
    selector: Option<Arc<dyn ContextSelector>>,
    selector_config: SelectorConfig,
    persona: Persona,
    client: Option<Arc<dyn ChatClient>>,
    model: Option<String>,
    options: GenerateOptions,
}

impl Default for AssistantBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AssistantBuilder {
    pub fn new() -> Self {
        Self {
            corpus: None,
            selector: None,
            selector_config: SelectorConfig::default(),
            persona: Persona::default(),
            client: None,
            model: None,
            options: GenerateOptions::default(),
        }
    }

    /// Set the corpus text (default: built-in company description)
    pub fn corpus(mut self, corpus: impl Into<String>) -> Self {
        self.corpus = Some(corpus.into());
        self
    }

    /// Load the corpus from a loader
    pub fn corpus_from(mut self, loader: &dyn CorpusLoader) -> Self {
        self.corpus = Some(loader.load_corpus());
        self
    }

    /// Use a specific selector instead of building one from config
    pub fn selector(mut self, selector: Arc<dyn ContextSelector>) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn selector_config(mut self, config: SelectorConfig) -> Self {
        self.selector_config = config;
        self
    }

    pub fn persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }

    pub fn client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the client only when one is available
    pub fn maybe_client(mut self, client: Option<Arc<dyn ChatClient>>) -> Self {
        self.client = client;
        self
    }

    /// Set model (default: first preferred Gemini model)
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Assistant {
        let corpus: Arc<str> = self
            .corpus
            .unwrap_or_else(|| DEFAULT_CORPUS.to_string())
            .into();
        let selector = self
            .selector
            .unwrap_or_else(|| build_selector(&self.selector_config));
        let pipeline = ContextPipeline::new(selector, PromptComposer::new(self.persona));

        Assistant::new(
            corpus,
            pipeline,
            self.client,
            resolve_model(self.model.as_deref()),
            self.options,
        )
    }
}
