//! End-to-end pipeline tests: search hits in, structured answer out.

use quanta_core::SearchHit;
use quanta_engine::{
    create_provider, AnswerSynthesizer, EmbeddingConfig, RelevanceIndex, DEFAULT_TOP_K,
};

#[tokio::test]
async fn single_document_without_credential_uses_template_path() {
    let provider = create_provider(&EmbeddingConfig::default()).await.unwrap();
    let mut index = RelevanceIndex::new(provider);

    let hits = vec![SearchHit::new(
        "Qubit",
        "A qubit is the basic unit of quantum information",
        "https://en.wikipedia.org/wiki/Qubit",
        "Wikipedia",
    )];
    index.index(&hits).await.unwrap();

    let docs = index
        .retrieve("what is a qubit", DEFAULT_TOP_K)
        .await
        .unwrap();
    assert_eq!(docs.len(), 1);

    let synthesizer = AnswerSynthesizer::new(None, "llama-3.3-70b-versatile");
    let answer = synthesizer.generate_answer("what is a qubit", &docs).await;

    assert_eq!(answer.generated_by, "template (fallback)");
    let main = answer.main.expect("single document yields a main passage");
    assert_eq!(main.source_title, "Qubit");
    assert!(main.content.starts_with("Qubit. A qubit is the basic unit"));
    assert!(answer.properties.is_empty());
    assert_eq!(answer.sources.len(), 1);
}

#[tokio::test]
async fn no_documents_yields_well_formed_empty_answer() {
    let provider = create_provider(&EmbeddingConfig::default()).await.unwrap();
    let index = RelevanceIndex::new(provider);

    let docs = index.retrieve("what is a qubit", DEFAULT_TOP_K).await.unwrap();
    assert!(docs.is_empty());

    let synthesizer = AnswerSynthesizer::new(None, "llama-3.3-70b-versatile");
    let answer = synthesizer.generate_answer("what is a qubit", &docs).await;

    assert!(answer.main.is_none());
    assert!(answer.properties.is_empty());
    assert!(answer.sources.is_empty());
    assert_eq!(answer.confidence, 0.0);
    assert_eq!(answer.generated_by, "template");
}

#[tokio::test]
async fn answer_serializes_with_type_field_on_sources() {
    let provider = create_provider(&EmbeddingConfig::default()).await.unwrap();
    let mut index = RelevanceIndex::new(provider);

    index
        .index(&[SearchHit::new(
            "Quantum entanglement",
            "Quantum entanglement is a correlation between quantum systems",
            "https://en.wikipedia.org/wiki/Quantum_entanglement",
            "Wikipedia",
        )])
        .await
        .unwrap();

    let docs = index.retrieve("entanglement", DEFAULT_TOP_K).await.unwrap();
    let synthesizer = AnswerSynthesizer::new(None, "llama-3.3-70b-versatile");
    let answer = synthesizer.generate_answer("entanglement", &docs).await;

    let json = serde_json::to_value(&answer).unwrap();
    assert_eq!(json["sources"][0]["type"], "Wikipedia");
    assert_eq!(json["generated_by"], "template (fallback)");
}
