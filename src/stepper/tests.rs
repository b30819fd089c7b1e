//! Tests for the stepper state container

use super::{BackBehavior, Stepper, ValidationError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Map = HashMap<String, String>;

fn map(pairs: &[(&str, &str)]) -> Map {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_new_stepper_starts_on_step_zero() {
    let stepper: Stepper<Map> = Stepper::new(3);
    assert_eq!(stepper.step(), Some(0));
    assert_eq!(stepper.step_count(), 3);
    assert!(stepper.value().is_none());
    assert!(stepper.is_first_step());
    assert!(!stepper.is_last_step());
}

#[test]
#[should_panic(expected = "step_count must be at least 1")]
fn test_zero_steps_is_rejected() {
    let _: Stepper<Map> = Stepper::new(0);
}

#[test]
fn test_initial_value_is_kept() {
    let stepper = Stepper::new(2).with_value(map(&[("seed", "1")]));
    assert_eq!(stepper.value(), Some(&map(&[("seed", "1")])));
}

#[test]
fn test_plain_advance_and_retreat_clamp() {
    let mut stepper: Stepper<Map> = Stepper::new(3);

    stepper.retreat();
    assert_eq!(stepper.step(), Some(0));

    stepper.advance();
    stepper.advance();
    assert_eq!(stepper.step(), Some(2));
    assert!(stepper.is_last_step());

    stepper.advance();
    assert_eq!(stepper.step(), Some(2));

    stepper.retreat();
    assert_eq!(stepper.step(), Some(1));
}

#[test]
fn test_step_stays_in_range_under_arbitrary_navigation() {
    // Any interleaving of advance/retreat keeps the index in [0, count-1].
    for count in 1..=4 {
        let mut stepper: Stepper<Map> = Stepper::new(count);
        let moves = [1, 1, -1, 1, 1, 1, -1, -1, -1, -1, 1];
        for m in moves {
            if m > 0 {
                stepper.advance();
            } else {
                stepper.retreat();
            }
            let step = stepper.step().unwrap();
            assert!(step < count, "step {step} out of range for count {count}");
        }
    }
}

#[test]
fn test_current_title_and_missing_titles_render_blank() {
    let mut stepper: Stepper<Map> = Stepper::new(3).with_titles(["First", "Second"]);
    assert_eq!(stepper.current_title(), "First");

    stepper.advance();
    assert_eq!(stepper.current_title(), "Second");

    // Titles list is shorter than the step count.
    stepper.advance();
    assert_eq!(stepper.current_title(), "");
}

#[test]
fn test_frozen_stepper_ignores_navigation() {
    let mut stepper: Stepper<Map> = Stepper::new(3);
    stepper.freeze();
    assert_eq!(stepper.step(), None);
    assert_eq!(stepper.current_title(), "");

    stepper.advance();
    stepper.retreat();
    assert_eq!(stepper.step(), None);
}

#[tokio::test]
async fn test_advance_commits_transition_value() {
    let mut stepper: Stepper<Map> = Stepper::new(3);

    stepper
        .advance_with(|_| async { Ok(Some(map(&[("contractType", "fixed-rate")]))) })
        .await
        .unwrap();

    assert_eq!(stepper.step(), Some(1));
    assert_eq!(stepper.value(), Some(&map(&[("contractType", "fixed-rate")])));
}

#[tokio::test]
async fn test_rejected_transition_leaves_state_untouched() {
    let mut stepper: Stepper<Map> = Stepper::new(3);
    stepper
        .advance_with(|_| async { Ok(Some(map(&[("contractType", "fixed-rate")]))) })
        .await
        .unwrap();

    let result = stepper
        .advance_with(|_| async { Err(ValidationError::message("invalid")) })
        .await;

    assert!(result.is_err());
    assert_eq!(stepper.step(), Some(1));
    assert_eq!(stepper.value(), Some(&map(&[("contractType", "fixed-rate")])));

    // Back-navigation still works after a failed advance.
    stepper.retreat();
    assert_eq!(stepper.step(), Some(0));
}

#[tokio::test]
async fn test_merge_is_the_transitions_responsibility() {
    let mut stepper = Stepper::new(3).with_value(map(&[("b", "2")]));

    stepper
        .advance_with(|prior| async move {
            let mut next = prior.unwrap_or_default();
            next.insert("a".to_string(), "1".to_string());
            Ok(Some(next))
        })
        .await
        .unwrap();

    assert_eq!(stepper.value(), Some(&map(&[("a", "1"), ("b", "2")])));
}

#[tokio::test]
async fn test_advance_on_last_step_clamps_index_but_still_commits() {
    let mut stepper: Stepper<Map> = Stepper::new(1);
    assert!(stepper.is_last_step());

    for round in 0..3 {
        let label = round.to_string();
        stepper
            .advance_with(move |_| async move { Ok(Some(map(&[("round", label.as_str())]))) })
            .await
            .unwrap();
        assert_eq!(stepper.step(), Some(0));
    }
    assert_eq!(stepper.value(), Some(&map(&[("round", "2")])));
}

#[tokio::test]
async fn test_transition_receives_snapshot_of_current_value() {
    let mut stepper = Stepper::new(2).with_value(map(&[("seed", "1")]));

    stepper
        .advance_with(|prior| async move {
            assert_eq!(prior, Some(map(&[("seed", "1")])));
            Ok(prior)
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_transition_may_suspend_before_committing() {
    let mut stepper: Stepper<Map> = Stepper::new(2);

    stepper
        .advance_with(|prior| async move {
            tokio::task::yield_now().await;
            Ok(prior)
        })
        .await
        .unwrap();

    assert_eq!(stepper.step(), Some(1));
}

#[tokio::test]
async fn test_retreat_discards_transition_result_by_default() {
    let mut stepper = Stepper::new(3).with_value(map(&[("kept", "yes")]));
    stepper.advance();

    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);
    stepper
        .retreat_with(move |_| async move {
            flag.store(true, Ordering::SeqCst);
            Ok(Some(map(&[("kept", "no")])))
        })
        .await
        .unwrap();

    // Transition ran for its side effects but did not merge.
    assert!(ran.load(Ordering::SeqCst));
    assert_eq!(stepper.step(), Some(0));
    assert_eq!(stepper.value(), Some(&map(&[("kept", "yes")])));
}

#[tokio::test]
async fn test_retreat_ignores_rejection_by_default() {
    let mut stepper: Stepper<Map> = Stepper::new(3);
    stepper.advance();

    stepper
        .retreat_with(|_| async { Err(ValidationError::message("ignored")) })
        .await
        .unwrap();
    assert_eq!(stepper.step(), Some(0));
}

#[tokio::test]
async fn test_retreat_commit_behavior_mirrors_advance() {
    let mut stepper = Stepper::new(3)
        .with_value(map(&[("a", "1")]))
        .with_back_behavior(BackBehavior::Commit);
    stepper.advance();

    // Rejection aborts back-navigation.
    let result = stepper
        .retreat_with(|_| async { Err(ValidationError::message("invalid")) })
        .await;
    assert!(result.is_err());
    assert_eq!(stepper.step(), Some(1));
    assert_eq!(stepper.value(), Some(&map(&[("a", "1")])));

    // Success commits the returned value.
    stepper
        .retreat_with(|prior| async move {
            let mut next = prior.unwrap_or_default();
            next.insert("b".to_string(), "2".to_string());
            Ok(Some(next))
        })
        .await
        .unwrap();
    assert_eq!(stepper.step(), Some(0));
    assert_eq!(stepper.value(), Some(&map(&[("a", "1"), ("b", "2")])));
}

#[tokio::test]
async fn test_field_errors_propagate_unchanged() {
    let mut stepper: Stepper<Map> = Stepper::new(2);

    let err = stepper
        .advance_with(|_| async {
            Err(ValidationError::field(
                "job_title",
                "Job title must be at least 2 characters.",
            ))
        })
        .await
        .unwrap_err();

    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].field, "job_title");
    assert_eq!(
        err.errors[0].message,
        "Job title must be at least 2 characters."
    );
}

#[tokio::test]
async fn test_into_value_yields_accumulated_aggregate() {
    let mut stepper: Stepper<Map> = Stepper::new(2);
    stepper
        .advance_with(|_| async { Ok(Some(map(&[("done", "true")]))) })
        .await
        .unwrap();

    assert_eq!(stepper.into_value(), Some(map(&[("done", "true")])));
}
