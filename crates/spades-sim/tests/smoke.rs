use std::fs;
use std::path::Path;

use spades_core::analysis::NilRule;
use spades_core::deal::SpadeConstraint;
use spades_core::tally::{ExposureGrid, ExposureKey, NilGrid};
use spades_sim::config::SimulationConfig;
use spades_sim::runner::{ExposureRunner, NilRunner, RunOptions, exposure_keys};
use tempfile::tempdir;

fn load_config(state_dir: &Path) -> SimulationConfig {
    let yaml = format!(
        r#"
iterations: 25
seed: 4242
threads: 2
state:
  exposure: "{exposure}"
  nil: "{nil}"
  nil_forced: "{forced}"
logging:
  enable_structured: false
"#,
        exposure = state_dir.join("spades.json").display(),
        nil = state_dir.join("spades_nil.json").display(),
        forced = state_dir.join("spades_nil_force.json").display(),
    );

    let mut cfg: SimulationConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

fn options(cfg: &SimulationConfig, show_only: bool) -> RunOptions {
    RunOptions {
        iterations: cfg.iterations,
        seed: cfg.seed,
        threads: cfg.threads,
        show_only,
    }
}

#[test]
fn exposure_runs_accumulate_across_invocations() {
    let dir = tempdir().expect("temp dir");
    let cfg = load_config(dir.path());
    let path = &cfg.state.exposure;

    let mut out = Vec::new();
    ExposureRunner::new(options(&cfg, false), path)
        .run(&mut out)
        .expect("first run");
    let text = String::from_utf8(out).expect("utf8");
    assert!(text.starts_with("Running 25 iterations and combining with 0 previously run:"));
    assert_eq!(text.lines().count(), 1 + exposure_keys().len());

    let first = ExposureGrid::from_json(&fs::read_to_string(path).expect("state written"))
        .expect("state decodes");
    assert_eq!(first.len(), exposure_keys().len());

    let (second, summary) = ExposureRunner::new(options(&cfg, false), path)
        .run(&mut Vec::new())
        .expect("second run");
    assert_eq!(summary.trials_run, 25 * exposure_keys().len() as u64);
    for key in exposure_keys() {
        let before = first.get(&key).expect("cell").iterations;
        let after = second.get(&key).expect("cell").iterations;
        assert_eq!(after, before + 25, "{key:?}");
    }

    let mut shown = Vec::new();
    let (after_show, summary) = ExposureRunner::new(options(&cfg, true), path)
        .run(&mut shown)
        .expect("show only");
    assert_eq!(summary.trials_run, 0);
    assert_eq!(after_show, second);
    let shown = String::from_utf8(shown).expect("utf8");
    assert!(shown.starts_with("Ran 50 iterations:"));
    assert!(shown.contains("Dealt  1 hearts. Dealt ** spades."));
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = || {
        let dir = tempdir().expect("temp dir");
        let cfg = load_config(dir.path());
        ExposureRunner::new(options(&cfg, false), &cfg.state.exposure)
            .run(&mut Vec::new())
            .expect("run")
            .0
    };
    let a = run();
    let b = run();
    assert_eq!(a, b);
    assert!(
        a.get(&ExposureKey::new(1, SpadeConstraint::Free))
            .is_some_and(|tally| tally.iterations == 25)
    );
}

#[test]
fn nil_rules_keep_separate_state() {
    let dir = tempdir().expect("temp dir");
    let cfg = load_config(dir.path());

    for rule in [NilRule::Standard, NilRule::OpponentsForced] {
        let mut out = Vec::new();
        NilRunner::new(options(&cfg, false), rule, cfg.state.nil_path(rule))
            .only("JH,QH")
            .expect("known combo")
            .run(&mut out)
            .expect("nil run");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("25 iters, JH,QH is covered"));
    }

    let standard = NilGrid::from_json(&fs::read_to_string(&cfg.state.nil).expect("nil state"))
        .expect("decodes");
    let forced =
        NilGrid::from_json(&fs::read_to_string(&cfg.state.nil_forced).expect("forced state"))
            .expect("decodes");
    assert_eq!(standard.iterations("JH,QH"), 25);
    assert_eq!(forced.iterations("JH,QH"), 25);
    // Opponents' cards only ever add covers.
    assert!(forced.get("JH,QH").expect("cell").covered >= standard.get("JH,QH").expect("cell").covered);
}

#[test]
fn nil_show_only_reports_unsimulated_combos() {
    let dir = tempdir().expect("temp dir");
    let cfg = load_config(dir.path());

    let mut out = Vec::new();
    let (grid, summary) = NilRunner::new(options(&cfg, true), NilRule::Standard, &cfg.state.nil)
        .run(&mut out)
        .expect("show only");
    assert!(grid.is_empty());
    assert_eq!(summary.trials_run, 0);
    assert!(!cfg.state.nil.exists());

    let text = String::from_utf8(out).expect("utf8");
    assert_eq!(text.lines().count(), 178);
    assert!(text.lines().all(|line| line.ends_with("has not been simulated")));
}

#[test]
fn unknown_combo_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let cfg = load_config(dir.path());
    let result = NilRunner::new(options(&cfg, false), NilRule::Standard, &cfg.state.nil).only("2H,3H");
    assert!(result.is_err());
}
