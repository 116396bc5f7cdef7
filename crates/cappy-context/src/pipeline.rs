use std::sync::Arc;

use crate::lexical::LexicalSelector;
use crate::prompt::PromptComposer;
use crate::strategy::ContextSelector;

/// Selector and composer run back to back for one user turn
#[derive(Clone)]
pub struct ContextPipeline {
    selector: Arc<dyn ContextSelector>,
    composer: PromptComposer,
}

impl Default for ContextPipeline {
    fn default() -> Self {
        Self::new(Arc::new(LexicalSelector::default()), PromptComposer::default())
    }
}

impl ContextPipeline {
    pub fn new(selector: Arc<dyn ContextSelector>, composer: PromptComposer) -> Self {
        Self { selector, composer }
    }

    pub fn selector(&self) -> &dyn ContextSelector {
        self.selector.as_ref()
    }

    pub fn composer(&self) -> &PromptComposer {
        &self.composer
    }

    /// Select context for `query` and wrap both in the instruction template
    pub fn build_prompt(&self, query: &str, corpus: &str) -> String {
        let context = self.selector.select(query, corpus);
        self.composer.compose(query, &context)
    }
}
