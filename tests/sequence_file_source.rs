use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use ranktrials::example_apps::run_format_sequences;
use ranktrials::{Example, FormatConfig, FormatError, OutputMode, SequenceFileSource};

fn asset(local: &str) -> String {
    format!("AA001{local}")
}

fn rank2_timestep(selection_order_flipped: bool) -> serde_json::Value {
    // The file stores references out of declared order when flipped; the
    // formatter must recover the declared order either way.
    let (first, second) = if selection_order_flipped {
        (("content:reference_1", "3"), ("content:reference_0", "5"))
    } else {
        (("content:reference_0", "5"), ("content:reference_1", "3"))
    };
    json!({
        "kind": "rank:2rank1",
        "response_time_ms": 1450.0,
        "interactions": [
            { "kind": "content:query", "detail": asset("A1") },
            { "kind": first.0, "detail": asset(first.1) },
            { "kind": second.0, "detail": asset(second.1) },
            { "kind": "behavior:rank_0", "detail": asset("3") }
        ]
    })
}

fn feedback_timestep() -> serde_json::Value {
    json!({
        "kind": "questionnaire:feedback",
        "response_time_ms": 500.0,
        "interactions": []
    })
}

fn write_sequence_file(
    dir: &Path,
    name: &str,
    sequence_id: &str,
    timesteps: Vec<serde_json::Value>,
) {
    let payload = json!({
        "version": "1.0.0",
        "data": [{
            "anonymous_id": "subject-1",
            "grade": 95.0,
            "sequence_id": sequence_id,
            "sequence": timesteps
        }]
    });
    fs::write(dir.join(name), serde_json::to_string_pretty(&payload).unwrap()).unwrap();
}

fn fixture_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_sequence_file(
        dir.path(),
        "seq_000001.json",
        "seq_000001",
        vec![rank2_timestep(false), feedback_timestep()],
    );
    write_sequence_file(
        dir.path(),
        "seq_000002.json",
        "seq_000002",
        vec![rank2_timestep(true), rank2_timestep(false)],
    );
    // Not a sequence file; must be ignored.
    fs::write(dir.path().join("stimuli.txt"), "local_id|filepath\n1|a.png\n").unwrap();
    dir
}

#[test]
fn sequence_mode_emits_one_padded_example_per_file() {
    let dir = fixture_dir();
    let config = FormatConfig {
        mode: OutputMode::Sequence,
        max_timestep: 6,
    };
    let source = SequenceFileSource::new(dir.path(), config);
    let examples = source.format_dir().unwrap();
    assert_eq!(examples.len(), 2);
    assert_eq!(examples[0].0, "seq_000001");
    assert_eq!(examples[1].0, "seq_000002");
    match &examples[0].1 {
        Example::Sequence(example) => {
            assert_eq!(example.anonymous_id.len(), 6);
            assert_eq!(example.given2rank1_stimulus_set.len(), 6);
            assert_eq!(example.given8rank2_outcome.len(), 6);
            // One real timestep (the feedback one contributes nothing).
            assert_eq!(example.given2rank1_sample_weight[0], 0.95);
            assert!(example.given2rank1_sample_weight[1..]
                .iter()
                .all(|&w| w == 0.0));
        }
        Example::Timestep(_) => panic!("expected sequence examples"),
    }
}

#[test]
fn flattened_mode_emits_per_timestep_records_with_composite_ids() {
    let dir = fixture_dir();
    let config = FormatConfig {
        mode: OutputMode::Flattened,
        max_timestep: 120,
    };
    let source = SequenceFileSource::new(dir.path(), config);
    let examples = source.format_dir().unwrap();
    let ids: Vec<&str> = examples.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["seq_000001/0", "seq_000002/0", "seq_000002/1"]);
    match &examples[1].1 {
        Example::Timestep(timestep) => {
            // Declared order wins even though the file listed references flipped.
            assert_eq!(timestep.given2rank1_stimulus_set, vec![361, 5, 3]);
            assert_eq!(timestep.given2rank1_outcome, vec![0.0, 1.0]);
            assert_eq!(timestep.given2rank1_response_time_ms, 1450.0);
            assert_eq!(timestep.anonymous_id, "subject-1");
        }
        Example::Sequence(_) => panic!("expected timestep examples"),
    }
}

#[test]
fn parallel_formatting_matches_sequential_output() {
    let dir = fixture_dir();
    let config = FormatConfig {
        mode: OutputMode::Flattened,
        max_timestep: 120,
    };
    let source = SequenceFileSource::new(dir.path(), config);
    let sequential = source.format_dir().unwrap();
    let parallel = source.format_dir_parallel().unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn malformed_files_fail_that_file_with_context() {
    let dir = fixture_dir();
    fs::write(dir.path().join("seq_000003.json"), "{ not json").unwrap();
    let source = SequenceFileSource::new(dir.path(), FormatConfig::default());

    let err = source.format_dir().unwrap_err();
    assert!(matches!(err, FormatError::Json { .. }));

    // Per-file formatting lets the caller skip the bad file.
    let good: Vec<_> = source
        .sequence_files()
        .into_iter()
        .filter_map(|path| source.format_file(&path).ok())
        .flatten()
        .collect();
    assert_eq!(good.len(), 2);
}

#[test]
fn unknown_timestep_kinds_are_fatal_for_the_file() {
    let dir = TempDir::new().unwrap();
    write_sequence_file(
        dir.path(),
        "seq_000009.json",
        "seq_000009",
        vec![json!({
            "kind": "rank:4rank1",
            "response_time_ms": 0.0,
            "interactions": []
        })],
    );
    let source = SequenceFileSource::new(dir.path(), FormatConfig::default());
    let err = source.format_dir().unwrap_err();
    assert!(matches!(
        err,
        FormatError::UnrecognizedTimestepKind(kind) if kind == "rank:4rank1"
    ));
}

#[test]
fn format_sequences_runner_reports_aggregate_counts() {
    let dir = fixture_dir();
    let args = [
        dir.path().display().to_string(),
        "--mode".to_string(),
        "flattened".to_string(),
        "--parallel".to_string(),
    ];
    let summary = run_format_sequences(args.into_iter()).unwrap().unwrap();
    assert_eq!(summary.files, 2);
    assert_eq!(summary.examples, 3);
}
