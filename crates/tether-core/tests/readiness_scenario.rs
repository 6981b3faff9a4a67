use chrono::{TimeZone, Utc};
use tether_core::domain::{Job, JobError, JobRecord, WorkflowId};
use tether_core::impls::Workflow;
use tether_core::ports::{FixedClock, JobGraph};
use ulid::Ulid;

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0).unwrap())
}

fn two_step() -> Workflow {
    let mut wf = Workflow::new(WorkflowId::from_ulid(Ulid::new()));
    wf.insert(Job::new("A").with_outgoing(["B"])).unwrap();
    wf.insert(Job::new("B").with_incoming(["A"])).unwrap();
    wf
}

#[test]
fn b_becomes_startable_once_a_finishes() {
    let mut wf = two_step();

    assert_eq!(wf.find_job("A").unwrap().can_be_started(&wf), Ok(true));

    wf.find_job_mut("A").unwrap().enqueue();
    assert_eq!(wf.find_job("B").unwrap().can_be_started(&wf), Ok(false));

    wf.find_job_mut("A").unwrap().start(&clock());
    assert_eq!(wf.find_job("B").unwrap().can_be_started(&wf), Ok(false));

    wf.find_job_mut("A").unwrap().finish(&clock());
    assert_eq!(wf.find_job("B").unwrap().can_be_started(&wf), Ok(true));
}

#[test]
fn failed_predecessor_blocks_until_it_is_rerun() {
    let mut wf = two_step();
    {
        let a = wf.find_job_mut("A").unwrap();
        a.enqueue();
        a.start(&clock());
        a.fail(&clock());
    }

    for _ in 0..3 {
        assert_eq!(wf.find_job("B").unwrap().can_be_started(&wf), Ok(false));
    }

    // only an explicit re-run of A unblocks B
    {
        let a = wf.find_job_mut("A").unwrap();
        a.enqueue();
        assert!(a.failed_at().is_none());
        a.start(&clock());
        a.finish(&clock());
    }
    assert_eq!(wf.find_job("B").unwrap().can_be_started(&wf), Ok(true));
}

#[test]
fn state_survives_a_persist_and_reload() {
    let mut wf = two_step();
    {
        let a = wf.find_job_mut("A").unwrap();
        a.enqueue();
        a.start(&clock());
        a.finish(&clock());
    }

    let text = serde_json::to_string(&wf.to_records()).unwrap();
    let records: Vec<JobRecord> = serde_json::from_str(&text).unwrap();
    let reloaded = Workflow::from_records(wf.id(), records).unwrap();

    assert_eq!(reloaded, wf);
    assert_eq!(reloaded.find_job("B").unwrap().can_be_started(&reloaded), Ok(true));
}

#[test]
fn logger_is_only_available_while_running() {
    let mut wf = two_step();
    assert!(matches!(
        wf.find_job("A").unwrap().logger(),
        Err(JobError::InvalidState { .. })
    ));

    let a = wf.find_job_mut("A").unwrap();
    a.enqueue();
    a.start(&clock());
    let logger = a.logger().expect("running job has a logger");
    logger.info("working");

    a.finish(&clock());
    assert!(a.logger().is_err());
}
