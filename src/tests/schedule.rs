use super::ThrottleDebounce;

#[test]
fn test_first_event_runs_on_leading_edge() {
    let mut schedule = ThrottleDebounce::new(100);
    assert!(schedule.on_event(0));
    assert!(!schedule.is_armed());
}

#[test]
fn test_event_inside_window_arms_trailing_run() {
    let mut schedule = ThrottleDebounce::new(100);
    assert!(schedule.on_event(0));
    assert!(!schedule.on_event(10));
    assert!(schedule.is_armed());

    assert!(!schedule.poll(50), "deadline is one window after the event");
    assert!(schedule.poll(110));
    assert!(!schedule.poll(111), "a deadline fires exactly once");
}

#[test]
fn test_rapid_burst_runs_leading_plus_one_trailing() {
    let mut schedule = ThrottleDebounce::new(100);
    let mut runs = 0;

    for t in 0..50 {
        if schedule.on_event(t) {
            runs += 1;
        }
    }
    assert_eq!(runs, 1, "only the first event runs on the leading edge");

    // Silence. The trailing deadline is one window after the last event.
    assert!(!schedule.poll(148));
    assert!(schedule.poll(149));
    runs += 1;
    for t in 150..400 {
        assert!(!schedule.poll(t));
    }
    assert_eq!(runs, 2);
}

#[test]
fn test_every_event_rearms_the_pending_deadline() {
    let mut schedule = ThrottleDebounce::new(100);
    schedule.on_event(0);
    schedule.on_event(10);
    schedule.on_event(90);
    assert!(!schedule.poll(110), "the earlier deadline was cancelled");
    assert!(schedule.poll(190));
}

#[test]
fn test_cancel_drops_pending_run() {
    let mut schedule = ThrottleDebounce::new(100);
    schedule.on_event(0);
    schedule.on_event(10);
    schedule.cancel();
    assert!(!schedule.is_armed());
    assert!(!schedule.poll(1000));
}

#[test]
fn test_quiet_period_restores_leading_edge() {
    let mut schedule = ThrottleDebounce::new(100);
    assert!(schedule.on_event(0));
    assert!(schedule.on_event(200));
}

#[test]
fn test_force_arms_immediate_run() {
    let mut schedule = ThrottleDebounce::new(100);
    schedule.force(7);
    assert!(schedule.poll(7));
    assert!(!schedule.poll(8));
}
