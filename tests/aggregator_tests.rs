use pretty_assertions::assert_eq;
use session_heatmap::aggregator::{
    build_heatmap, build_heatmap_with, calculate_intervals, calculate_top_word, collect_speakers,
    is_stopword, summarize_cell,
};
use session_heatmap::parser::{PrecomputedMetrics, Segment, SegmentContent};
use session_heatmap::utils::error::AggregateError;

fn words_segment(speaker: &str, start: u64, end: u64, words: &[&str]) -> Segment {
    Segment {
        speaker: speaker.to_string(),
        start,
        end,
        content: SegmentContent::Words(words.iter().map(|w| w.to_string()).collect()),
        precomputed: PrecomputedMetrics::default(),
    }
}

fn text_segment(speaker: &str, start: u64, end: u64, text: &str) -> Segment {
    Segment {
        speaker: speaker.to_string(),
        start,
        end,
        content: SegmentContent::Text(text.to_string()),
        precomputed: PrecomputedMetrics::default(),
    }
}

#[test]
fn test_interval_count_matches_ceiling_and_is_never_zero() {
    let cases: &[(u64, usize)] = &[
        (1, 1),
        (29_999, 1),
        (30_000, 1),
        (30_001, 2),
        (95_000, 4),
    ];

    for &(end, expected) in cases {
        let segments = vec![words_segment("A", 0, end, &["word"])];
        let intervals = calculate_intervals(&segments).unwrap();
        assert_eq!(intervals.len(), expected, "end = {}", end);
        assert!(!intervals.is_empty());
    }
}

#[test]
fn test_empty_dataset_short_circuits() {
    assert!(matches!(
        calculate_intervals(&[]),
        Err(AggregateError::EmptyDataset)
    ));
    assert!(build_heatmap(&[]).is_err());
}

#[test]
fn test_spec_example_boundary_crossing_segment() {
    // One segment 0..40000 spans intervals [0, 30]; both cells get the
    // full contribution and normalize to 1.
    let segments = vec![words_segment("A", 0, 40_000, &["Hi", "there"])];

    let matrix = build_heatmap(&segments).unwrap();
    assert_eq!(matrix.intervals(), &[0, 30]);

    for interval_index in 0..2 {
        let cell = matrix.cell(0, interval_index).unwrap();
        assert_eq!(cell.count, 1);
        assert_eq!(cell.words.get("hi"), Some(&1));
        assert_eq!(cell.words.get("there"), Some(&1));
        assert_eq!(cell.intensity.count, 1.0);
    }
}

#[test]
fn test_count_added_to_every_overlapped_interval() {
    // 10000..100000 overlaps intervals 0..=3 (ceil(100000/30000) = 4,
    // clamped to the last index); 0..5000 overlaps 0..=1 (ceil = 1)
    let segments = vec![
        words_segment("A", 10_000, 100_000, &["long"]),
        words_segment("B", 0, 5_000, &["short"]),
    ];

    let matrix = build_heatmap(&segments).unwrap();
    assert_eq!(matrix.dimensions(), (2, 4));

    for interval_index in 0..4 {
        assert_eq!(matrix.cell(0, interval_index).unwrap().count, 1);
    }
    assert_eq!(matrix.cell(1, 0).unwrap().count, 1);
    assert_eq!(matrix.cell(1, 1).unwrap().count, 1);
    assert_eq!(matrix.cell(1, 2).unwrap().count, 0);
}

#[test]
fn test_unknown_speaker_leaves_other_cells_untouched() {
    let segments = vec![
        words_segment("A", 0, 10_000, &["hello"]),
        words_segment("Nobody", 0, 10_000, &["ignored"]),
        words_segment("B", 0, 10_000, &["world"]),
    ];

    let speakers = vec!["A".to_string(), "B".to_string()];
    let with_ghost = build_heatmap_with(&segments, speakers.clone(), vec![0]);
    let without_ghost =
        build_heatmap_with(&[segments[0].clone(), segments[2].clone()], speakers, vec![0]);

    assert_eq!(with_ghost, without_ghost);
}

#[test]
fn test_normalized_maximum_is_one_unless_degenerate() {
    let segments = vec![
        words_segment("A", 0, 10_000, &["one", "two", "three", "four"]),
        words_segment("B", 0, 10_000, &["five"]),
        words_segment("B", 35_000, 40_000, &["six", "seven"]),
    ];

    let matrix = build_heatmap(&segments).unwrap();

    let max_count = matrix
        .cells()
        .map(|c| c.intensity.count)
        .fold(0.0_f64, f64::max);
    let max_word_count = matrix
        .cells()
        .map(|c| c.intensity.word_count)
        .fold(0.0_f64, f64::max);
    assert_eq!(max_count, 1.0);
    assert_eq!(max_word_count, 1.0);

    // score/frequency/confidence were never supplied: degenerate
    // normalization leaves every cell at exactly zero, never NaN
    for cell in matrix.cells() {
        assert_eq!(cell.intensity.score, 0.0);
        assert_eq!(cell.intensity.frequency, 0.0);
        assert_eq!(cell.intensity.confidence, 0.0);
    }
}

#[test]
fn test_stopwords_never_appear_in_word_maps() {
    let segments = vec![
        text_segment("A", 0, 10_000, "I think that the therapy is helping me"),
        words_segment("B", 0, 10_000, &["The", "and", "breakthrough"]),
    ];

    let matrix = build_heatmap(&segments).unwrap();

    for cell in matrix.cells() {
        for word in cell.words.keys() {
            assert!(!is_stopword(word), "stopword '{}' leaked into a word map", word);
        }
    }

    let cell_a = matrix.cell(0, 0).unwrap();
    assert!(cell_a.words.contains_key("therapy"));
    assert!(cell_a.words.contains_key("helping"));
    assert!(!cell_a.words.contains_key("the"));

    let cell_b = matrix.cell(1, 0).unwrap();
    assert_eq!(cell_b.words.len(), 1);
    assert!(cell_b.words.contains_key("breakthrough"));
}

#[test]
fn test_full_pipeline_rerun_is_deterministic() {
    let segments = vec![
        text_segment("Therapist", 0, 45_000, "How did that make you feel"),
        words_segment("Client", 20_000, 90_000, &["It", "made", "me", "feel", "anxious"]),
        text_segment("Therapist", 91_000, 95_000, "Tell me more"),
    ];

    let first = build_heatmap(&segments).unwrap();
    let second = build_heatmap(&segments).unwrap();

    assert_eq!(first, second);
    assert_eq!(collect_speakers(&segments), vec!["Therapist", "Client"]);
}

#[test]
fn test_top_word_tie_resolution_is_deterministic() {
    // "therapy" and "feel" both reach 3 across the overlap range; the
    // fixed lexicographic iteration order picks "feel"
    let segments = vec![
        words_segment("A", 0, 10_000, &["therapy", "feel"]),
        words_segment("A", 11_000, 12_000, &["therapy", "feel"]),
        words_segment("A", 13_000, 14_000, &["therapy", "feel"]),
    ];

    let matrix = build_heatmap(&segments).unwrap();
    let cell = matrix.cell(0, 0).unwrap();

    assert_eq!(cell.words.get("therapy"), Some(&3));
    assert_eq!(cell.words.get("feel"), Some(&3));
    assert_eq!(calculate_top_word(cell), "feel");
}

#[test]
fn test_summary_reflects_cell_and_dataset() {
    let segments = vec![
        words_segment("A", 0, 20_000, &["calm", "calm", "focus"]),
        words_segment("B", 0, 20_000, &["noise"]),
    ];

    let matrix = build_heatmap(&segments).unwrap();
    let cell = matrix.cell(0, 0).unwrap();
    let summary = summarize_cell(cell, Some(&segments));

    assert_eq!(summary.speaker, "A");
    assert_eq!(summary.time_range, "00:00:00 - 00:00:30");
    assert_eq!(summary.count, 1);
    assert_eq!(summary.percentage, "50.00%");
    assert_eq!(summary.total_words, 3);
    assert_eq!(summary.unique_words, 2);
    assert_eq!(summary.top_word, "calm");
}
