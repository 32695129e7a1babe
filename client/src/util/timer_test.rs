use super::*;

#[test]
fn starts_paused_at_full_focus() {
    let timer = StudyTimer::default();
    assert_eq!(timer.phase, Phase::Focus);
    assert_eq!(timer.remaining, FOCUS_SECS);
    assert!(!timer.running);
    assert!(timer.progress().abs() < f64::EPSILON);
}

#[test]
fn tick_only_counts_while_running() {
    let mut timer = StudyTimer::default();
    assert!(!timer.tick());
    assert_eq!(timer.remaining, FOCUS_SECS);

    timer.toggle();
    assert!(!timer.tick());
    assert_eq!(timer.remaining, FOCUS_SECS - 1);

    timer.toggle();
    timer.tick();
    assert_eq!(timer.remaining, FOCUS_SECS - 1);
}

#[test]
fn finishing_focus_switches_to_paused_break() {
    let mut timer = StudyTimer { remaining: 2, running: true, ..StudyTimer::default() };
    assert!(!timer.tick());
    assert!(timer.tick());
    assert_eq!(timer.phase, Phase::Break);
    assert_eq!(timer.remaining, BREAK_SECS);
    assert!(!timer.running);
    assert_eq!(timer.completed_focus, 1);
}

#[test]
fn finishing_break_returns_to_focus_without_counting() {
    let mut timer = StudyTimer { remaining: 1, running: true, ..StudyTimer::new(Phase::Break) };
    assert!(timer.tick());
    assert_eq!(timer.phase, Phase::Focus);
    assert_eq!(timer.completed_focus, 0);
}

#[test]
fn reset_and_switch_pause_at_full_duration() {
    let mut timer = StudyTimer { remaining: 10, running: true, ..StudyTimer::default() };
    timer.reset();
    assert_eq!(timer.remaining, FOCUS_SECS);
    assert!(!timer.running);

    timer.toggle();
    timer.switch_to(Phase::Break);
    assert_eq!(timer.remaining, BREAK_SECS);
    assert!(!timer.running);
}

#[test]
fn clock_formatting() {
    assert_eq!(format_clock(FOCUS_SECS), "25:00");
    assert_eq!(format_clock(61), "01:01");
    assert_eq!(format_clock(0), "00:00");
}
