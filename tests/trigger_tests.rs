//! End-to-end behaviour of trigger calls.

use hookfsm::builder::StateMachineBuilder;
use hookfsm::core::{AuditLog, Stateful, Status, StatusCode};
use hookfsm::engine::{HookError, HookStage, StateMachine, TriggerError};
use hookfsm::status_enum;
use std::sync::{Arc, Mutex};
use std::thread;

const A: StatusCode = StatusCode::new(1);
const B: StatusCode = StatusCode::new(2);
const C: StatusCode = StatusCode::new(3);

type Trace = Arc<Mutex<Vec<String>>>;

/// Entity carrying its own hook trace.
#[derive(Default)]
struct Job {
    status: Status,
    trace: Vec<String>,
}

impl Stateful for Job {
    fn status(&self) -> StatusCode {
        self.status.status()
    }

    fn set_status(&mut self, code: StatusCode) {
        self.status.set_status(code)
    }
}

fn log(label: &'static str) -> impl Fn(&mut Job) -> Result<(), HookError> + Send + Sync + 'static {
    move |job: &mut Job| -> Result<(), HookError> {
        job.trace.push(label.to_string());
        Ok(())
    }
}

fn fail(message: &'static str) -> impl Fn(&mut Job) -> Result<(), HookError> + Send + Sync + 'static {
    move |_: &mut Job| -> Result<(), HookError> { Err(message.into()) }
}

fn job_at(status: StatusCode) -> Job {
    Job {
        status: Status::new(status),
        trace: Vec::new(),
    }
}

#[test]
fn successful_hop_runs_hooks_in_order() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    builder.state(A).exit(log("exitA"));
    builder.state(B).enter(log("enterB"));
    builder
        .event("go")
        .to(B)
        .from([A])
        .before(log("before"))
        .after(log("after"));
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    machine.trigger("go", &mut job, &[]).unwrap();

    assert_eq!(job.status(), B);
    assert_eq!(job.trace, vec!["exitA", "before", "enterB", "after"]);
}

#[test]
fn multiple_hooks_per_stage_keep_registration_order() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    builder.state(A).exit(log("exit1")).exit(log("exit2"));
    builder.state(B).enter(log("enter1")).enter(log("enter2"));
    builder
        .event("go")
        .to(B)
        .before(log("before1"))
        .before(log("before2"))
        .after(log("after1"))
        .after(log("after2"));
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    machine.trigger("go", &mut job, &[]).unwrap();

    assert_eq!(
        job.trace,
        vec!["exit1", "exit2", "before1", "before2", "enter1", "enter2", "after1", "after2"]
    );
}

#[test]
fn enter_hook_sees_new_status() {
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);

    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    builder.state(B).enter(move |job: &mut Job| {
        *sink.lock().unwrap() = Some(job.status());
        Ok(())
    });
    builder.event("go").to(B);
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    machine.trigger("go", &mut job, &[]).unwrap();

    assert_eq!(*seen.lock().unwrap(), Some(B));
}

#[test]
fn failing_enter_hook_rolls_back() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    builder.state(B).enter(log("enterB")).enter(fail("disk full"));
    builder.event("go").to(B).after(log("after"));
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    let err = machine.trigger("go", &mut job, &[]).unwrap_err();

    assert_eq!(err.to_string(), "disk full");
    assert_eq!(err.hook_stage(), Some(HookStage::Enter));
    assert_eq!(job.status(), A);
    // side effects of hooks that already ran stay
    assert_eq!(job.trace, vec!["enterB"]);
}

#[test]
fn failing_after_hook_rolls_back() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    builder.event("go").to(B).after(fail("audit offline"));
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    let err = machine.trigger("go", &mut job, &[]).unwrap_err();

    assert_eq!(err.hook_stage(), Some(HookStage::After));
    assert_eq!(job.status(), A);
}

#[test]
fn failing_exit_hook_stops_before_anything_else() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    builder.state(A).exit(fail("locked"));
    builder.state(B).enter(log("enterB"));
    builder.event("go").to(B).before(log("before"));
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    let err = machine.trigger("go", &mut job, &[]).unwrap_err();

    assert_eq!(err.hook_stage(), Some(HookStage::Exit));
    assert_eq!(job.status(), A);
    assert!(job.trace.is_empty());
}

#[test]
fn failing_before_hook_leaves_status() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    builder.state(A).exit(log("exitA"));
    builder.state(B).enter(log("enterB"));
    builder.event("go").to(B).before(fail("not ready"));
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    let err = machine.trigger("go", &mut job, &[]).unwrap_err();

    assert_eq!(err.hook_stage(), Some(HookStage::Before));
    assert_eq!(job.status(), A);
    assert_eq!(job.trace, vec!["exitA"]);
}

#[test]
fn unregistered_event_fails_from_any_status() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    builder.event("go").to(B);
    let machine = builder.build().unwrap();

    for start in [StatusCode::NIL, A, B, C] {
        let mut job = job_at(start);
        let err = machine.trigger("missing", &mut job, &[]).unwrap_err();
        assert!(matches!(err, TriggerError::NoSuchEvent { .. }));

        let err = machine.trigger_chained("missing", &mut job, &[]).unwrap_err();
        assert!(matches!(err, TriggerError::NoSuchEvent { .. }));
    }
}

#[test]
fn sentinel_moves_to_initial_before_matching() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(B);
    builder.event("finish").to(C).from([B]);
    let machine = builder.build().unwrap();

    let mut job = Job::default();
    machine.trigger("finish", &mut job, &[]).unwrap();

    assert_eq!(job.status(), C);
}

#[test]
fn two_wildcards_are_ambiguous() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    {
        let mut go = builder.event("go");
        go.to(B);
        go.to(C);
    }
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    let err = machine.trigger("go", &mut job, &[]).unwrap_err();

    assert_eq!(err.to_string(), "failed to [go] from state [1]: ambiguous transitions");
    assert_eq!(job.status(), A);
}

#[test]
fn two_explicit_origins_are_ambiguous() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    {
        let mut go = builder.event("go");
        go.to(B).from([A]);
        go.to(C).from([A, B]);
    }
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    let err = machine.trigger("go", &mut job, &[]).unwrap_err();
    assert!(matches!(err, TriggerError::AmbiguousTransitions { .. }));
    assert_eq!(job.status(), A);

    // only one of them admits B
    let mut job = job_at(B);
    machine.trigger("go", &mut job, &[]).unwrap();
    assert_eq!(job.status(), C);
}

#[test]
fn excluded_origin_has_no_match() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    {
        let mut go = builder.event("go");
        go.to(B).from([A]);
        go.to(A).from([B]);
    }
    let machine = builder.build().unwrap();

    let mut job = job_at(C);
    let err = machine.trigger("go", &mut job, &[]).unwrap_err();

    assert_eq!(err.to_string(), "failed to [go] from state [3]: no matched transition");
    assert_eq!(job.status(), C);
}

#[test]
fn error_messages_use_entity_display_name() {
    status_enum! {
        enum Phase {
            Open = 1,
            Closed = 2,
        }
    }

    struct Ticket(StatusCode);

    impl Stateful for Ticket {
        fn status(&self) -> StatusCode {
            self.0
        }

        fn set_status(&mut self, code: StatusCode) {
            self.0 = code;
        }

        fn status_name(&self) -> String {
            Phase::display_name(self.0)
        }
    }

    let mut builder = StateMachineBuilder::<Ticket>::new().initial(Phase::Open);
    builder.event("close").to(Phase::Closed).from([Phase::Open]);
    let machine = builder.build().unwrap();

    let mut ticket = Ticket(StatusCode::NIL);
    machine.trigger("close", &mut ticket, &[]).unwrap();

    let err = machine.trigger("close", &mut ticket, &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to [close] from state [Closed]: no matched transition"
    );

    let err = machine.trigger("reopen", &mut ticket, &[]).unwrap_err();
    assert_eq!(err.to_string(), "failed to [reopen] from state [Closed]: no such event");
}

fn advance_machine() -> StateMachine<Job> {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    builder.states([A, B, C]);
    {
        let mut advance = builder.event("advance");
        advance.to(B).continuable();
        advance.to(C).from([B]).continuable();
    }
    builder.build().unwrap()
}

#[test]
fn chained_trigger_runs_through_continuable_hops() {
    let machine = advance_machine();

    let mut job = job_at(A);
    machine.trigger_chained("advance", &mut job, &[]).unwrap();
    assert_eq!(job.status(), C);
}

#[test]
fn single_trigger_takes_one_hop() {
    let machine = advance_machine();

    let mut job = job_at(A);
    machine.trigger("advance", &mut job, &[]).unwrap();
    assert_eq!(job.status(), B);
}

#[test]
fn chain_stops_after_non_continuable_transition() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    {
        let mut advance = builder.event("advance");
        advance.to(B).from([A]);
        advance.to(C).from([B]);
    }
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    machine.trigger_chained("advance", &mut job, &[]).unwrap();
    assert_eq!(job.status(), B);
}

#[test]
fn chained_self_loop_takes_one_hop() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    builder.state(A).enter(log("enterA"));
    builder.event("refresh").to(A).continuable();
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    machine.trigger_chained("refresh", &mut job, &[]).unwrap();

    assert_eq!(job.status(), A);
    assert_eq!(job.trace, vec!["enterA"]);
}

#[test]
fn chain_failure_keeps_completed_hops() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    builder.state(C).enter(fail("no capacity"));
    {
        let mut advance = builder.event("advance");
        advance.to(B).from([A]).continuable();
        advance.to(C).from([B]);
    }
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    let err = machine.trigger_chained("advance", &mut job, &[]).unwrap_err();

    assert_eq!(err.to_string(), "no capacity");
    assert_eq!(job.status(), B);
}

#[test]
fn chain_into_dead_end_has_no_match() {
    let audit = Arc::new(AuditLog::new());
    let mut builder = StateMachineBuilder::<Job>::new()
        .initial(A)
        .audit(audit.clone());
    builder.event("advance").to(B).from([A]).continuable();
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    let err = machine.trigger_chained("advance", &mut job, &[]).unwrap_err();

    assert_eq!(
        err.to_string(),
        "failed to [advance] from state [2]: no matched transition"
    );
    assert_eq!(job.status(), B);
    assert_eq!(audit.path(), vec![A, B]);
}

#[test]
fn chain_ends_quietly_when_only_visited_destinations_remain() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    {
        let mut advance = builder.event("advance");
        advance.to(B).from([A]).continuable();
        advance.to(A).from([B]).continuable();
    }
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    machine.trigger_chained("advance", &mut job, &[]).unwrap();

    assert_eq!(job.status(), B);
}

#[test]
fn chained_ambiguity_on_continuation_is_an_error() {
    const D: StatusCode = StatusCode::new(4);

    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    {
        let mut advance = builder.event("advance");
        advance.to(B).from([A]).continuable();
        advance.to(C).from([B]);
        advance.to(D).from([B]);
    }
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    let err = machine.trigger_chained("advance", &mut job, &[]).unwrap_err();

    assert!(matches!(err, TriggerError::AmbiguousTransitions { .. }));
    assert_eq!(job.status(), B);
}

#[test]
fn re_registered_event_uses_latest_definition() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    builder.event("go").to(B).before(log("old"));
    builder.event("go").to(C).before(log("new"));
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    machine.trigger("go", &mut job, &[]).unwrap();

    assert_eq!(job.status(), C);
    assert_eq!(job.trace, vec!["new"]);
}

#[test]
fn re_registered_state_uses_latest_hooks() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    builder.state(B).enter(log("old"));
    builder.state(B).enter(log("new"));
    builder.event("go").to(B);
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    machine.trigger("go", &mut job, &[]).unwrap();

    assert_eq!(job.trace, vec!["new"]);
}

#[test]
fn unregistered_destination_has_no_hooks() {
    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    builder.event("go").to(C);
    let machine = builder.build().unwrap();

    let mut job = job_at(A);
    machine.trigger("go", &mut job, &[]).unwrap();

    assert_eq!(job.status(), C);
    assert!(!machine.has_state(C));
}

#[test]
fn audit_log_records_notes_and_skips_failures() {
    let audit = Arc::new(AuditLog::new());
    let mut builder = StateMachineBuilder::<Job>::new()
        .initial(A)
        .audit(audit.clone());
    builder.event("go").to(B).from([A]);
    builder.event("break").to(C).from([B]).after(fail("refused"));
    let machine = builder.build().unwrap();

    let mut job = Job::default();
    machine
        .trigger("go", &mut job, &["requested by ops", "ticket-42"])
        .unwrap();
    machine.trigger("break", &mut job, &["ignored"]).unwrap_err();

    let entries = audit.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event.as_str(), "go");
    assert_eq!(entries[0].from, A);
    assert_eq!(entries[0].to, B);
    assert_eq!(entries[0].notes, vec!["requested by ops", "ticket-42"]);
}

#[test]
fn shared_machine_drives_entities_on_many_threads() {
    let trace: Trace = Arc::default();
    let shared = Arc::clone(&trace);

    let mut builder = StateMachineBuilder::<Job>::new().initial(A);
    builder.state(C).enter(move |_: &mut Job| {
        shared.lock().unwrap().push("done".to_string());
        Ok(())
    });
    {
        let mut advance = builder.event("advance");
        advance.to(B).from([A]).continuable();
        advance.to(C).from([B]);
    }
    let machine = Arc::new(builder.build().unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let machine = Arc::clone(&machine);
            thread::spawn(move || {
                let mut job = Job::default();
                machine.trigger_chained("advance", &mut job, &[]).unwrap();
                job.status()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), C);
    }
    assert_eq!(trace.lock().unwrap().len(), 8);
}
