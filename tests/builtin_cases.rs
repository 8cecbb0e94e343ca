use ordbench::{
    clock::MonotonicClock, config::DiscoveryConfig, report, timer::Timer, BenchError, Candidate,
    Registry, Runner,
};

#[test]
fn every_builtin_case_runs_on_its_candidates() {
    let registry = Registry::builtin();
    let marker = DiscoveryConfig::default().baseline_skip_marker;
    for name in registry.discover("time") {
        let case = registry.lookup(&name).expect("discovered case resolves");
        for candidate in Candidate::ALL {
            let result = case.run(candidate);
            if candidate.is_baseline() && name.contains(&marker) {
                assert!(
                    matches!(result, Err(BenchError::MissingCapability { .. })),
                    "{name} should need positional operations"
                );
            } else {
                assert!(result.is_ok(), "{name} failed on {candidate}: {result:?}");
            }
        }
    }
}

#[test]
fn quick_run_over_builtin_registry() {
    let registry = Registry::builtin();
    let timer = Timer::new(MonotonicClock::new(), 1, 1).expect("valid timing");
    let runner = Runner::new(&registry, timer, DiscoveryConfig::default(), Vec::new())
        .expect("valid discovery");
    let mut out = Vec::new();
    let table = runner.execute(&mut out).expect("builtin run succeeds");

    assert_eq!(table.len(), registry.discover("time").len());
    for (label, row) in table.iter() {
        let inapplicable = label.contains("nodict");
        assert_eq!(row.get(Candidate::Dict).is_none(), inapplicable, "{label}");
        assert!(row.get(Candidate::OrderedDict).is_some_and(|s| s >= 0.0));
        assert!(row.get(Candidate::KeyListDict).is_some_and(|s| s >= 0.0));
    }

    let output = String::from_utf8(out).expect("utf8 output");
    let header = report::header();
    assert_eq!(output.lines().filter(|line| *line == header).count(), 2);
}
