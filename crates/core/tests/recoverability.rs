//! End-to-end recoverability classification of hand-written schedules.
mod common;

use txsched_core::recoverability::{check_recoverable, Justification};
use txsched_core::{check, classify, reads_from, Operation, Recoverability, TransactionId};

#[test]
fn running_example_is_aca_but_not_strict() {
    let s = schedule![
        r2(x), r1(y), w3(x), w2(x), r3(y), w3(y), w2(y), w2(z), a2, r1(z), w1(z), c1, w3(z), c3
    ];

    // Every read either precedes all writes of its object or would read
    // from the aborted t2.
    assert!(reads_from(&s).is_empty());

    let classification = classify(&s);
    let levels: Vec<_> = classification.verdicts.iter().map(|v| v.level).collect();
    assert_eq!(
        levels,
        vec![Recoverability::Strict, Recoverability::AvoidsCascadingAborts]
    );

    let strict = &classification.verdicts[0];
    assert!(!strict.holds);
    assert_eq!(
        strict.trace,
        vec![Justification::WriteOverlapped {
            write: Operation::write(3, "x"),
            access: Operation::write(2, "x"),
            end: Some(Operation::commit(3)),
        }]
    );

    assert_eq!(
        classification.strongest(),
        Some(Recoverability::AvoidsCascadingAborts)
    );
    assert!(classification.is_recoverable());
    assert!(check(&s, Recoverability::Recoverable).holds);
}

#[test]
fn serial_schedule_is_in_every_class() {
    let s = schedule![r1(x), w1(x), c1, r2(x), w2(x), c2];

    for level in Recoverability::ALL {
        let verdict = check(&s, level);
        assert!(verdict.holds, "{level} should hold");
        assert!(verdict.trace.iter().all(|step| !step.is_violation()));
    }

    let rf = reads_from(&s);
    assert_eq!(rf.len(), 1);
    assert_eq!(rf[0].reader, TransactionId(2));
    assert_eq!(rf[0].writer, TransactionId(1));
    assert_eq!(rf[0].position, 3);
}

#[test]
fn reader_committing_first_is_not_recoverable() {
    let s = schedule![w1(x), r2(x), c2, c1];

    let classification = classify(&s);
    assert_eq!(classification.verdicts.len(), 3);
    assert!(classification.verdicts.iter().all(|v| !v.holds));
    assert!(!classification.is_recoverable());

    let rc = check_recoverable(&s);
    assert_eq!(
        rc.violation().map(ToString::to_string),
        Some("t2 reads x from t1: t1 does not commit before t2. NON-RC.".to_string())
    );
}

#[test]
fn aborted_writer_leaves_read_unattributed() {
    let s = schedule![w1(x), r2(x), c2, a1];

    assert!(reads_from(&s).is_empty());
    assert!(!check(&s, Recoverability::Strict).holds);
    assert!(check(&s, Recoverability::AvoidsCascadingAborts).holds);
    assert!(check(&s, Recoverability::Recoverable).holds);
}

#[test]
fn dirty_read_with_late_commit_is_rc_only() {
    // t2 reads t1's uncommitted x but commits after t1.
    let s = schedule![w1(x), r2(x), c1, c2];

    let classification = classify(&s);
    assert_eq!(classification.strongest(), Some(Recoverability::Recoverable));
    assert!(matches!(
        classification.verdicts[1].violation(),
        Some(Justification::DirtyRead(_))
    ));
}
