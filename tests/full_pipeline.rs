use docdrift::{
    DiscrepancyKind, DocdriftConfig, MatchStatus, Pipeline, RawDocument, compare_texts,
};

const SOURCE_HTML: &str = "<article>\
    <p>The sky is blue.[1] Water boils at 100 degrees Celsius.[citation needed]</p>\
    </article>";

// The gibberish leads: a terminator only ends a sentence before an uppercase
// letter, so it could not follow another sentence.
const TARGET_TEXT: &str = "!!!! ???? .... The sky is blue. The sky is very blue today. \
    Water boils at one hundred degrees Celsius. Cats purr loudly at night.";

fn source() -> RawDocument {
    RawDocument::new("Facts", "https://source.example/facts", SOURCE_HTML)
}

fn target() -> RawDocument {
    RawDocument::new("Claims", "https://target.example/claims", TARGET_TEXT)
}

#[tokio::test]
async fn raw_texts_are_split_embedded_and_classified() {
    let result = compare_texts(source(), target(), &DocdriftConfig::default())
        .await
        .expect("compare");

    assert_eq!(result.topic, "Claims");
    assert_eq!(result.source_document.len(), 2);
    assert_eq!(result.target_document.len(), 5);
    assert_eq!(result.alignments.len(), 5);

    let first = &result.alignments[1];
    assert_eq!(first.status, MatchStatus::Match);
    assert!((first.similarity - 1.0).abs() < 1e-5);
    assert_eq!(
        first.best_match.as_ref().map(|b| b.source_sentence.index),
        Some(0)
    );

    let boils = &result.alignments[3];
    assert_eq!(boils.status, MatchStatus::Match);
    assert_eq!(
        boils.best_match.as_ref().map(|b| b.source_sentence.index),
        Some(1)
    );

    let summary = &result.summary;
    assert_eq!(summary.total_target_sentences, 5);
    assert_eq!(
        summary.matches + summary.paraphrases + summary.unique + summary.missing,
        5
    );
    assert_eq!(summary.missing, 0);
    assert!(
        summary
            .potential_hallucinations
            .iter()
            .any(|a| a.target_sentence.text == "!!!! ???? ....")
    );
}

#[tokio::test]
async fn every_alignment_carries_its_similarity() {
    let result = compare_texts(source(), target(), &DocdriftConfig::default())
        .await
        .unwrap();

    for alignment in &result.alignments {
        assert!((0.0..=1.0 + 1e-5).contains(&alignment.similarity));
        match &alignment.best_match {
            Some(best) => assert_eq!(best.similarity, alignment.similarity),
            None => assert_eq!(alignment.similarity, 0.0),
        }
    }
    for flagged in &result.summary.potential_hallucinations {
        assert_eq!(flagged.status, MatchStatus::Unique);
        assert!(flagged.similarity < 0.3);
    }
}

#[tokio::test]
async fn report_points_back_at_both_documents() {
    let pipeline = Pipeline::new(DocdriftConfig::default()).unwrap();
    let result = pipeline.compare_texts(source(), target()).await.unwrap();
    let report = pipeline.report(&result);

    assert_eq!(report.topic, "Claims");
    assert!(!report.discrepancies.is_empty());
    assert_eq!(
        report.potential_hallucinations,
        result.summary.potential_hallucinations.len()
    );
    for (n, discrepancy) in report.discrepancies.iter().enumerate() {
        assert_eq!(discrepancy.id, format!("d{}", n + 1));
        assert_eq!(
            discrepancy.evidence,
            vec![
                "https://source.example/facts".to_string(),
                "https://target.example/claims".to_string()
            ]
        );
    }

    let gibberish = report
        .discrepancies
        .iter()
        .find(|d| d.target_sentence == "!!!! ???? ....")
        .expect("gibberish is reported");
    assert_eq!(gibberish.kind, DiscrepancyKind::Hallucination);
    assert!(report.summary.starts_with(&format!(
        "Auto-detected {} discrepancies",
        report.discrepancies.len()
    )));
}

#[tokio::test]
async fn serialized_result_uses_lowercase_statuses() {
    let mut result = compare_texts(source(), target(), &DocdriftConfig::default())
        .await
        .unwrap();
    result.strip_embeddings();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["alignments"][1]["status"], "match");
    assert!(!json.to_string().contains("\"embedding\""));
}
