use super::*;
use std::sync::mpsc;
use std::time::{Duration, Instant};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn throttle_fires_immediately_on_first_call() {
    let mut throttle = Throttle::new(|value: u32| value * 2, ms(100));
    assert_eq!(throttle.call(4), Some(8));
}

#[test]
fn throttle_drops_calls_inside_the_interval() {
    let mut throttle = Throttle::new(|value: u32| value, ms(100));
    let base = Instant::now();
    assert_eq!(throttle.call_at(base, 1), Some(1));
    assert_eq!(throttle.call_at(base + ms(50), 2), None);
    assert_eq!(throttle.call_at(base + ms(110), 3), Some(3));
}

#[test]
fn throttle_allows_execution_exactly_at_the_interval() {
    let mut throttle = Throttle::new(|value: u32| value, ms(100));
    let base = Instant::now();
    assert_eq!(throttle.call_at(base, 1), Some(1));
    assert_eq!(throttle.call_at(base + ms(100), 2), Some(2));
}

#[test]
fn throttle_measures_from_last_execution_not_last_attempt() {
    let mut throttle = Throttle::new(|value: u32| value, ms(100));
    let base = Instant::now();
    assert_eq!(throttle.call_at(base, 1), Some(1));
    // A dropped attempt must not push the window forward.
    assert_eq!(throttle.call_at(base + ms(90), 2), None);
    assert_eq!(throttle.call_at(base + ms(120), 3), Some(3));
}

#[test]
fn debounce_runs_once_with_the_newest_value() {
    let (tx, rx) = mpsc::channel();
    let debouncer = Debouncer::new(
        move |value: u64| {
            let _ = tx.send(value);
        },
        ms(100),
    );

    let start = Instant::now();
    debouncer.call(0);
    std::thread::sleep(ms(30));
    debouncer.call(30);
    std::thread::sleep(ms(30));
    debouncer.call(60);

    let value = rx
        .recv_timeout(Duration::from_secs(2))
        .expect("debounced callback should fire after the quiet period");
    assert_eq!(value, 60);
    // Last call landed at >=60ms, so the single firing cannot precede 160ms.
    assert!(start.elapsed() >= ms(150), "fired too early: {:?}", start.elapsed());
    assert!(
        rx.recv_timeout(ms(250)).is_err(),
        "callback must fire exactly once per quiet period"
    );
}

#[test]
fn debounce_fires_again_after_each_quiet_period() {
    let (tx, rx) = mpsc::channel();
    let debouncer = Debouncer::new(
        move |value: u32| {
            let _ = tx.send(value);
        },
        ms(40),
    );

    debouncer.call(1);
    assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(1));
    debouncer.call(2);
    assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(2));
}

#[test]
fn debounce_cancel_suppresses_the_pending_call() {
    let (tx, rx) = mpsc::channel();
    let debouncer = Debouncer::new(
        move |value: u32| {
            let _ = tx.send(value);
        },
        ms(80),
    );

    debouncer.call(1);
    debouncer.cancel();
    assert!(
        rx.recv_timeout(ms(300)).is_err(),
        "cancelled call must not fire"
    );

    // The worker stays usable after a cancel.
    debouncer.call(2);
    assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(2));
}

#[test]
fn debounce_drop_cancels_pending_work_deterministically() {
    let (tx, rx) = mpsc::channel();
    let debouncer = Debouncer::new(
        move |value: u32| {
            let _ = tx.send(value);
        },
        ms(100),
    );

    debouncer.call(7);
    drop(debouncer);
    // Drop joins the worker, so nothing can fire afterwards.
    assert!(rx.recv_timeout(ms(250)).is_err());
}
