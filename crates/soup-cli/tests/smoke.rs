use std::fs;

use soup_cli::config::ReplayConfig;
use soup_cli::replay::ReplayRunner;
use tempfile::tempdir;

fn load_config(output_dir: &std::path::Path) -> ReplayConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
tricks:
  - name: "climb"
    lead: "3H"
    plays: ["4H", "pass", "5D", "10H", "KH", "pass", "pass", "pass"]
  - name: "full_house"
    lead: "KH KS KD JH JS"
    plays: ["pass", "pass", "pass"]
  - name: "unfinished"
    lead: "7C 7D"
    plays: ["8S 8H", "pass"]
  - name: "bad_follow"
    lead: "9H"
    plays: ["9C 9D"]
outputs:
  jsonl: "{jsonl}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("{run_id}").join("tricks.jsonl").display(),
    );

    let mut cfg: ReplayConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

#[test]
fn replay_writes_one_row_per_trick() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path());
    let outputs = config.resolved_outputs();
    assert!(outputs.jsonl.ends_with("test_smoke/tricks.jsonl"));

    let summary = ReplayRunner::new(config, outputs).run().expect("replay completes");
    assert_eq!(summary.tricks_replayed, 4);
    assert_eq!(summary.finalized, 2);
    assert_eq!(summary.open, 1);
    assert_eq!(summary.rejected, 1);

    let jsonl = fs::read_to_string(&summary.jsonl_path).expect("jsonl readable");
    let rows: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect();
    assert_eq!(rows.len(), 4);

    assert_eq!(rows[0]["run_id"], "test_smoke");
    assert_eq!(rows[0]["name"], "climb");
    assert_eq!(rows[0]["status"], "finalized");
    assert_eq!(rows[0]["points"], 25);
    assert_eq!(rows[0]["snapshot"]["winning_index"], 5);

    assert_eq!(rows[1]["status"], "finalized");
    assert_eq!(rows[1]["points"], 30);
    assert_eq!(rows[1]["plays"][0]["shape"], "full_houses");

    assert_eq!(rows[2]["status"], "open");
    assert!(rows[2].get("snapshot").is_none());

    assert_eq!(rows[3]["status"], "rejected");
    assert_eq!(rows[3]["plays"].as_array().map(Vec::len), Some(1));
    assert!(
        rows[3]["error"]
            .as_str()
            .is_some_and(|msg| msg.contains("cannot follow"))
    );
}

#[test]
fn rerun_overwrites_previous_rows() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path());
    let outputs = config.resolved_outputs();

    let runner = ReplayRunner::new(config, outputs);
    let first = runner.run().expect("first run");
    let second = runner.run().expect("second run");
    let first_len = fs::read_to_string(&first.jsonl_path).expect("read").lines().count();
    let second_len = fs::read_to_string(&second.jsonl_path).expect("read").lines().count();
    assert_eq!(first_len, 4);
    assert_eq!(second_len, 4);
}
