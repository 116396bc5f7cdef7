use cappy_context::{
    build_selector, fallback_snippet, ContextPipeline, ContextSelector, LexicalSelector,
    SelectorConfig, SelectorStrategy, TfIdfSelector, TfIdfSettings,
};
use std::sync::Arc;

const CORPUS: &str = "CapServ Digital Lending is a cutting-edge platform. \
    Borrowers can compare loan offers from many lenders! \
    Our credit scoring engine evaluates applications in minutes. \
    Is my data safe? Every account is protected with bank-grade encryption. \
    Lenders pay a small commission for each funded loan.";

fn selectors() -> Vec<Arc<dyn ContextSelector>> {
    vec![
        build_selector(&SelectorConfig::default()),
        build_selector(&SelectorConfig {
            strategy: SelectorStrategy::TfIdf,
            ..Default::default()
        }),
    ]
}

#[test]
fn test_non_empty_for_any_query() {
    let queries = ["", "?!", "loans", "What is the weather on Mars?", "encryption", "ÜBER ünïcödé"];
    for selector in selectors() {
        for query in queries {
            assert!(
                !selector.select(query, CORPUS).is_empty(),
                "{} returned empty for {query:?}",
                selector.name()
            );
        }
    }
}

#[test]
fn test_no_shared_tokens_returns_prefix() {
    let long_corpus = CORPUS.repeat(10);
    for selector in selectors() {
        assert_eq!(selector.select("zebra giraffe", CORPUS), CORPUS);
        assert_eq!(
            selector.select("zebra giraffe", &long_corpus),
            fallback_snippet(&long_corpus, 1000)
        );
    }
}

#[test]
fn test_single_matching_sentence_is_the_only_one() {
    let selected = LexicalSelector::default().select("bank-grade encryption", CORPUS);
    assert_eq!(selected, "Every account is protected with bank-grade encryption");
}

#[test]
fn test_deterministic() {
    for selector in selectors() {
        let first = selector.select("credit scoring loans", CORPUS);
        for _ in 0..10 {
            assert_eq!(selector.select("credit scoring loans", CORPUS), first);
        }
    }
}

#[test]
fn test_empty_query_falls_back() {
    assert_eq!(LexicalSelector::default().select("", CORPUS), CORPUS);
}

#[test]
fn test_tfidf_large_corpus_picks_relevant_window() {
    let filler = "harvest orchard tractor barn fields ".repeat(120);
    let corpus = format!("{filler} mortgage refinancing rates explained clearly {filler}");
    let selector = TfIdfSelector::new(3).with_settings(TfIdfSettings {
        chunk_size: 20,
        chunk_overlap: 5,
        ..Default::default()
    });
    let selected = selector.select("mortgage refinancing", &corpus);

    assert!(selected.contains("mortgage refinancing"));
    assert!(selected.split_whitespace().count() <= 3 * 20);
}

#[test]
fn test_pipeline_builds_prompt_with_selected_context() {
    let pipeline = ContextPipeline::default();
    let prompt = pipeline.build_prompt("How is my data protected?", CORPUS);

    assert!(prompt.contains("Company Context:\n"));
    assert!(prompt.contains("User Question: How is my data protected?"));
    assert!(prompt.ends_with("Response:"));
    assert_eq!(pipeline.selector().name(), "lexical");
}
