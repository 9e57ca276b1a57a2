//! Teardown races and source faults.
//!
//! A source may keep calling the handler after `dispose`; those values must
//! never reach state or trigger a paint. Source errors surface unchanged.

use std::error::Error;

use obind_core::Props;
use obind_harness::{
    Harness, LateDelivery, RecordingComponent, ScriptedSource, SourceError, init_test_logging,
};
use obind_runtime::{
    BindingConfig, BindingError, BindingOptions, Lifecycle, LifecyclePolicy, StateArgs,
};
use pretty_assertions::assert_eq;

fn latest(value: Option<&u32>, _args: StateArgs<'_>) -> Props {
    Props::new().with("latest", value.copied().unwrap_or(0))
}

type LatestFn = fn(Option<&u32>, StateArgs<'_>) -> Props;

fn harness(source: ScriptedSource<u32>) -> Harness<ScriptedSource<u32>, LatestFn> {
    Harness::new(
        RecordingComponent::new("Latest"),
        BindingConfig::new(move |_: &Props| source, latest as LatestFn),
        Props::new(),
    )
}

#[test]
fn emissions_after_dispose_are_discarded() {
    init_test_logging();
    let source = ScriptedSource::new().with_late_delivery(LateDelivery::Continue);
    let feed = source.clone();
    let mut harness = harness(source);
    harness.mount().unwrap();

    feed.push(1);
    harness.flush();
    harness.unmount().unwrap();

    assert!(feed.push(2), "source keeps delivering after dispose");
    assert!(feed.push(3));
    assert_eq!(harness.flush(), 0);
    assert_eq!(harness.render_count(), 2);
    assert_eq!(harness.binding().state(), Props::new().with("latest", 1));
    assert_eq!(harness.binding().emission_count(), 1);
    assert_eq!(harness.binding().discarded_count(), 2);
}

#[test]
fn update_queued_before_unmount_is_never_painted() {
    let source = ScriptedSource::new();
    let feed = source.clone();
    let mut harness = harness(source);
    harness.mount().unwrap();

    feed.push(1);
    assert_eq!(harness.pending_updates(), 1);
    harness.unmount().unwrap();

    assert_eq!(harness.pending_updates(), 0);
    assert_eq!(harness.flush(), 0);
    assert_eq!(harness.render_count(), 1);

    harness.rerender_with(Props::new().with("parent", true));
    assert_eq!(harness.render_count(), 1);
}

#[test]
fn emissions_before_mount_are_discarded() {
    let source = ScriptedSource::new();
    let feed = source.clone();
    let harness = harness(source);
    assert!(!feed.push(9));
    assert_eq!(harness.binding().lifecycle(), Lifecycle::Initial);
    assert_eq!(harness.binding().state(), Props::new().with("latest", 0));
}

#[test]
fn late_emission_logging_can_be_disabled() {
    let source = ScriptedSource::new().with_late_delivery(LateDelivery::Continue);
    let feed = source.clone();
    let mut harness = Harness::with_options(
        RecordingComponent::new("Quiet"),
        BindingConfig::new(move |_: &Props| source, latest as LatestFn),
        Props::new(),
        BindingOptions::default().with_log_discarded(false),
    );
    harness.mount().unwrap();
    harness.unmount().unwrap();
    feed.push(4);
    assert_eq!(harness.binding().discarded_count(), 1);
    assert!(!harness.binding().options().log_discarded);
}

#[test]
fn subscribe_fault_propagates_and_tears_down() {
    let source = ScriptedSource::new();
    source.fail_subscribe(true);
    let probe = source.clone();
    let mut harness = harness(source);

    let err = harness.mount().unwrap_err();
    assert!(matches!(err, BindingError::Source(SourceError::SubscribeRefused)));
    assert!(err.source().is_some());
    assert_eq!(harness.binding().lifecycle(), Lifecycle::TornDown);
    assert_eq!(probe.subscribe_count(), 0);

    harness.unmount().unwrap_err();
    assert_eq!(probe.dispose_count(), 0);
}

#[test]
fn dispose_fault_propagates_after_teardown() {
    let source = ScriptedSource::new().with_late_delivery(LateDelivery::Continue);
    source.fail_dispose(true);
    let feed = source.clone();
    let mut harness = harness(source);
    harness.mount().unwrap();

    let err = harness.unmount().unwrap_err();
    assert_eq!(err.into_source(), Some(SourceError::DisposeFailed));
    assert_eq!(harness.binding().lifecycle(), Lifecycle::TornDown);
    assert_eq!(feed.dispose_count(), 1);

    feed.push(8);
    assert_eq!(harness.flush(), 0);
}

#[test]
fn dropping_mounted_binding_disposes_once() {
    let source = ScriptedSource::new();
    let probe = source.clone();
    let mut harness = harness(source);
    harness.mount().unwrap();
    drop(harness);
    assert_eq!(probe.subscribe_count(), 1);
    assert_eq!(probe.dispose_count(), 1);
}

#[test]
fn dropping_with_failing_dispose_does_not_panic() {
    init_test_logging();
    let source = ScriptedSource::new();
    source.fail_dispose(true);
    let probe = source.clone();
    let mut harness = harness(source);
    harness.mount().unwrap();
    drop(harness);
    assert_eq!(probe.dispose_count(), 1);
}

#[test]
fn dropping_unmounted_binding_does_not_dispose_again() {
    let source = ScriptedSource::new();
    let probe = source.clone();
    let mut harness = harness(source);
    harness.mount().unwrap();
    harness.unmount().unwrap();
    drop(harness);
    assert_eq!(probe.dispose_count(), 1);
}

#[test]
fn lenient_policy_tolerates_double_unmount() {
    let source = ScriptedSource::new();
    let probe = source.clone();
    let mut harness = Harness::with_options(
        RecordingComponent::new("Lenient"),
        BindingConfig::new(move |_: &Props| source, latest as LatestFn),
        Props::new(),
        BindingOptions::default().with_lifecycle_policy(LifecyclePolicy::Lenient),
    );
    harness.mount().unwrap();
    harness.unmount().unwrap();
    harness.unmount().unwrap();
    assert_eq!(probe.dispose_count(), 1);
}

#[test]
fn strict_policy_rejects_remount() {
    let source = ScriptedSource::new();
    let probe = source.clone();
    let mut harness = harness(source);
    harness.mount().unwrap();
    assert!(matches!(harness.mount(), Err(BindingError::Lifecycle(_))));
    assert_eq!(probe.subscribe_count(), 1);
}
