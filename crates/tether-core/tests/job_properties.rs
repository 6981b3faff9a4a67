use std::collections::{BTreeSet, HashMap};

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use tether_core::domain::{Job, JobState};
use tether_core::ports::FixedClock;

#[derive(Debug, Clone, Copy)]
enum Transition {
    Enqueue,
    Start,
    Finish,
    Fail,
}

fn transition() -> impl Strategy<Value = Transition> {
    prop_oneof![
        Just(Transition::Enqueue),
        Just(Transition::Start),
        Just(Transition::Finish),
        Just(Transition::Fail),
    ]
}

fn apply(job: &mut Job, t: Transition, second: u32) {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, second % 60).unwrap());
    match t {
        Transition::Enqueue => job.enqueue(),
        Transition::Start => job.start(&clock),
        Transition::Finish => job.finish(&clock),
        Transition::Fail => job.fail(&clock),
    }
}

// Strategy for an acyclic graph: job_i may only depend on job_0..job_{i-1}.
fn dag_strategy(max_jobs: usize) -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1..=max_jobs).prop_flat_map(|n| {
        proptest::collection::vec(proptest::collection::vec(any::<usize>(), 0..4), n).prop_map(
            |raw| {
                raw.into_iter()
                    .enumerate()
                    .map(|(i, deps)| {
                        if i == 0 {
                            return Vec::new();
                        }
                        let unique: BTreeSet<usize> = deps.into_iter().map(|d| d % i).collect();
                        unique.into_iter().collect()
                    })
                    .collect()
            },
        )
    })
}

fn build(deps: &[Vec<usize>], reverse_edges: bool) -> HashMap<String, Job> {
    deps.iter()
        .enumerate()
        .map(|(i, ds)| {
            let mut names: Vec<String> = ds.iter().map(|d| format!("job_{d}")).collect();
            if reverse_edges {
                names.reverse();
            }
            let name = format!("job_{i}");
            (name.clone(), Job::new(name).with_incoming(names))
        })
        .collect()
}

/// Reference closure computed directly on indices.
fn closure(deps: &[Vec<usize>], i: usize) -> BTreeSet<String> {
    let mut seen = BTreeSet::new();
    let mut stack = deps[i].clone();
    while let Some(d) = stack.pop() {
        if seen.insert(d) {
            stack.extend(deps[d].iter().copied());
        }
    }
    seen.into_iter().map(|d| format!("job_{d}")).collect()
}

proptest! {
    #[test]
    fn flags_stay_consistent_under_any_transition_sequence(
        steps in proptest::collection::vec((transition(), 0u32..60), 0..40)
    ) {
        let mut job = Job::new("j");
        for (t, sec) in steps {
            apply(&mut job, t, sec);

            let flags = job.state().flags();
            prop_assert!(!(flags.running && flags.enqueued));
            prop_assert!(!flags.failed || flags.finished);
            prop_assert!(!flags.finished || (!flags.running && !flags.enqueued));
            prop_assert_eq!(job.finished_at().is_some(), job.is_finished());
            prop_assert_eq!(job.failed_at().is_some(), job.is_failed());

            if matches!(t, Transition::Enqueue) {
                prop_assert_eq!(job.state(), JobState::Enqueued);
                prop_assert!(job.started_at().is_none());
            }

            let back = Job::from_record(job.to_record()).unwrap();
            prop_assert_eq!(&back, &job);
        }
    }

    #[test]
    fn resolution_matches_reference_closure(deps in dag_strategy(12)) {
        let graph = build(&deps, false);
        for i in 0..deps.len() {
            let job = &graph[&format!("job_{i}")];
            let resolved = job.dependencies(&graph).unwrap();

            let names: BTreeSet<String> = resolved.iter().map(|j| j.name().to_string()).collect();
            prop_assert_eq!(names.len(), resolved.len());
            prop_assert_eq!(names, closure(&deps, i));
        }
    }

    #[test]
    fn resolution_ignores_edge_order(deps in dag_strategy(12)) {
        let forward = build(&deps, false);
        let reversed = build(&deps, true);
        for i in 0..deps.len() {
            let name = format!("job_{i}");
            let f: BTreeSet<String> = forward[&name]
                .dependencies(&forward)
                .unwrap()
                .iter()
                .map(|j| j.name().to_string())
                .collect();
            let r: BTreeSet<String> = reversed[&name]
                .dependencies(&reversed)
                .unwrap()
                .iter()
                .map(|j| j.name().to_string())
                .collect();
            prop_assert_eq!(f, r);
        }
    }
}
