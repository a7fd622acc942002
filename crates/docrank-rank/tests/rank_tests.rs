use std::fs;

use tempfile::TempDir;

use docrank_core::config::{FlatCohortPolicy, RankingSettings};
use docrank_core::types::{Corpus, DocumentId, ExtractedText, ExtractionOutcome, SkipReason};
use docrank_core::ExtractionError;
use docrank_rank::{Normalization, Pipeline, Ranker, RankingResult};

fn corpus(texts: &[(&str, &str)]) -> Corpus {
    Corpus::from_texts(texts.iter().map(|(id, t)| (DocumentId::new(*id), *t)))
}

fn ranked(result: RankingResult) -> docrank_rank::Ranking {
    match result {
        RankingResult::Ranked(r) => r,
        other => panic!("expected a ranking, got {other:?}"),
    }
}

#[test]
fn empty_corpus_has_no_rankable_documents() {
    assert_eq!(Ranker::default().rank(&Corpus::default()), RankingResult::NoRankableDocuments);
    let all_blank = corpus(&[("a.txt", "  "), ("b.txt", "\n")]);
    assert_eq!(Ranker::default().rank(&all_blank), RankingResult::NoRankableDocuments);
}

#[test]
fn single_document_reports_word_count() {
    let result = Ranker::default().rank(&corpus(&[("solo.txt", "hello world hello")]));
    assert_eq!(result, RankingResult::SingleDocument { id: DocumentId::new("solo.txt"), word_count: 3 });
}

#[test]
fn identical_pair_scores_exactly_one() {
    let result = Ranker::default().rank(&corpus(&[("a", "the cat sat on the mat"), ("b", "the cat sat on the mat")]));
    match result {
        RankingResult::Pair { first, second, similarity } => {
            assert_eq!(first.as_str(), "a");
            assert_eq!(second.as_str(), "b");
            assert_eq!(similarity, 1.0);
        }
        other => panic!("expected a pair, got {other:?}"),
    }
}

#[test]
fn identical_pair_without_surviving_terms_still_scores_one() {
    for text in ["to be or not to be", "x y z"] {
        match Ranker::default().rank(&corpus(&[("a", text), ("b", text)])) {
            RankingResult::Pair { similarity, .. } => assert_eq!(similarity, 1.0, "text {text:?}"),
            other => panic!("expected a pair, got {other:?}"),
        }
    }
}

#[test]
fn different_texts_without_surviving_terms_score_zero() {
    match Ranker::default().rank(&corpus(&[("a", "to be or not to be"), ("b", "x y z")])) {
        RankingResult::Pair { similarity, .. } => assert_eq!(similarity, 0.0),
        other => panic!("expected a pair, got {other:?}"),
    }
}

#[test]
fn identical_stop_word_cohort_scores_full() {
    let ranking = ranked(Ranker::default().rank(&corpus(&[("a", "to be or not"), ("b", "to be or not"), ("c", "to be or not")])));
    assert_eq!(ranking.normalization, Normalization::Flat { policy: FlatCohortPolicy::RawSimilarity });
    assert!(ranking.entries.iter().all(|e| e.raw_average_similarity == 1.0 && e.normalized_score == 100.0));
}

#[test]
fn duplicate_pair_ties_on_top_and_outlier_is_last() {
    let ranking = ranked(Ranker::default().rank(&corpus(&[("a", "cat dog"), ("b", "cat dog"), ("c", "fish boat")])));
    let ids: Vec<&str> = ranking.entries.iter().map(|e| e.document_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(ranking.entries[0].normalized_score, 100.0);
    assert_eq!(ranking.entries[1].normalized_score, 100.0);
    assert_eq!(ranking.entries[2].normalized_score, 0.0);
    assert_eq!(ranking.entries[0].raw_average_similarity, 0.5);
    assert_eq!(ranking.normalization, Normalization::MinMax { min: 0.0, max: 0.5 });
    assert_eq!(ranking.corpus_size, 3);
    assert!(ranking.similarity_matrix.is_none());
}

#[test]
fn ties_keep_corpus_order() {
    let ranking = ranked(Ranker::default().rank(&corpus(&[("z", "fish boat"), ("y", "cat dog"), ("x", "cat dog")])));
    let ids: Vec<&str> = ranking.entries.iter().map(|e| e.document_id.as_str()).collect();
    assert_eq!(ids, vec!["y", "x", "z"]);
}

const DISJOINT: &[(&str, &str)] = &[("a", "apple banana"), ("b", "car engine"), ("c", "river stone"), ("d", "violin cello")];

#[test]
fn disjoint_cohort_takes_flat_path_for_every_policy() {
    for (policy, expected) in [(FlatCohortPolicy::RawSimilarity, 0.0), (FlatCohortPolicy::Zero, 0.0), (FlatCohortPolicy::Midpoint, 50.0)] {
        let settings = RankingSettings { flat_cohort: policy, ..RankingSettings::default() };
        let ranking = ranked(Ranker::new(&settings).rank(&corpus(DISJOINT)));
        assert_eq!(ranking.normalization, Normalization::Flat { policy });
        assert!(ranking.entries.iter().all(|e| e.normalized_score == expected));
        let ids: Vec<&str> = ranking.entries.iter().map(|e| e.document_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }
}

#[test]
fn identical_cohort_scores_full_under_raw_similarity() {
    let ranking = ranked(Ranker::default().rank(&corpus(&[("a", "solar power"), ("b", "solar power"), ("c", "solar power")])));
    assert!(matches!(ranking.normalization, Normalization::Flat { .. }));
    assert!(ranking.entries.iter().all(|e| e.normalized_score == 100.0));
}

#[test]
fn ranking_is_bounded_permutation_and_idempotent() {
    let texts = [
        ("a", "rust ownership borrowing lifetimes"),
        ("b", "rust traits generics lifetimes"),
        ("c", "sourdough bread flour water"),
        ("d", "bread flour yeast oven"),
        ("e", "rust async tokio runtime"),
    ];
    let settings = RankingSettings { include_matrix: true, ..RankingSettings::default() };
    let ranker = Ranker::new(&settings);
    let first = ranker.rank(&corpus(&texts));
    let second = ranker.rank(&corpus(&texts));
    assert_eq!(first, second);

    let ranking = ranked(first);
    let mut ids: Vec<&str> = ranking.entries.iter().map(|e| e.document_id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    for pair in ranking.entries.windows(2) {
        assert!(pair[0].normalized_score >= pair[1].normalized_score);
    }
    for e in &ranking.entries {
        assert!((0.0..=1.0).contains(&e.raw_average_similarity));
        assert!((0.0..=100.0).contains(&e.normalized_score));
    }
    let matrix = ranking.similarity_matrix.expect("matrix requested");
    assert_eq!(matrix.size(), 5);
}

#[test]
fn failed_and_blank_outcomes_are_skipped() {
    let outcomes = vec![
        ExtractionOutcome::ok(DocumentId::new("a.txt"), ExtractedText::new("cat dog").unwrap()),
        ExtractionOutcome::failed(DocumentId::new("b.png"), ExtractionError::EngineFailure("ocr".into())),
        ExtractionOutcome::failed(DocumentId::new("c.txt"), ExtractionError::EmptyExtraction),
    ];
    let report = Ranker::default().rank_outcomes(outcomes);
    assert_eq!(report.result, RankingResult::SingleDocument { id: DocumentId::new("a.txt"), word_count: 2 });
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[1].reason, SkipReason::Failed(ExtractionError::EmptyExtraction));
}

#[test]
fn report_renders_each_result_shape() {
    let none = Ranker::default().rank_outcomes(Vec::new());
    assert_eq!(none.to_string(), "No readable documents found. Make sure they are clear and text-based.");

    let pair = Ranker::default().rank_outcomes(vec![
        ExtractionOutcome::ok(DocumentId::new("/docs/a.txt"), ExtractedText::new("cat dog").unwrap()),
        ExtractionOutcome::ok(DocumentId::new("/docs/b.txt"), ExtractedText::new("cat dog").unwrap()),
    ]);
    assert_eq!(
        pair.to_string(),
        "Document Ranking (2 documents only):\n\n1. a.txt\n2. b.txt\n\nSimilarity Score: 1.00 (0 = different, 1 = identical)"
    );

    let ranked = Ranker::default().rank_outcomes(vec![
        ExtractionOutcome::ok(DocumentId::new("a"), ExtractedText::new("cat dog").unwrap()),
        ExtractionOutcome::ok(DocumentId::new("b"), ExtractedText::new("cat dog").unwrap()),
        ExtractionOutcome::ok(DocumentId::new("c"), ExtractedText::new("fish boat").unwrap()),
        ExtractionOutcome::failed(DocumentId::new("d.docx"), ExtractionError::UnsupportedFormat(".docx".into())),
    ]);
    let text = ranked.to_string();
    assert!(text.starts_with("Document Ranking Results:\n1. a\n    Score: 100/100\n    Similarity Avg: 0.50\n"));
    assert!(text.contains("\n3. c\n    Score: 0/100\n    Similarity Avg: 0.00\n"));
    assert!(text.ends_with("Skipped:\n - d.docx: Unsupported format: .docx"));
}

#[test]
fn report_serializes_to_json() {
    let report = Ranker::default().rank_outcomes(vec![ExtractionOutcome::ok(
        DocumentId::new("solo.txt"),
        ExtractedText::new("hello world hello").unwrap(),
    )]);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["result"]["result"], "single_document");
    assert_eq!(json["result"]["word_count"], 3);
}

#[tokio::test]
async fn pipeline_extracts_and_ranks_files_in_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("a.txt"), "cat dog").unwrap();
    fs::write(dir.join("b.txt"), "cat dog").unwrap();
    fs::write(dir.join("c.txt"), "fish boat").unwrap();
    fs::write(dir.join("d.txt"), "   ").unwrap();

    let pipeline = Pipeline::from_settings(&Default::default());
    let paths = ["a.txt", "b.txt", "c.txt", "d.txt"].iter().map(|n| dir.join(n)).collect();
    let mut progress = 0;
    let report = pipeline.run_with_progress(paths, |_| progress += 1).await;

    assert_eq!(progress, 4);
    let ranking = ranked(report.result);
    let names: Vec<&str> = ranking.entries.iter().map(|e| e.document_id.display_name()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].id.display_name(), "d.txt");
}
