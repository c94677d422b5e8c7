// End-to-end fasting scenarios driven through the public controller with a
// simulated clock, so hours of fasting run in microseconds.

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone};
use fastdial::{
    clock::ManualClock,
    controller::{ControllerSettings, FastController},
    preset::{FastingConfiguration, FastingPreset},
};

fn local(day: u32, h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
    // A fixed +03:00 zone keeps wall-clock expectations independent of the host
    FixedOffset::east_opt(3 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 11, day, h, m, s)
        .unwrap()
}

fn controller_at(
    start: DateTime<FixedOffset>,
) -> (
    FastController<ManualClock<FixedOffset>>,
    ManualClock<FixedOffset>,
) {
    let clock = ManualClock::new(start);
    let mut controller = FastController::new(clock.clone(), ControllerSettings::default());
    controller.attach();
    (controller, clock)
}

#[test]
fn twelve_twelve_from_nine_am() {
    let mut fasting = FastingConfiguration::default();
    fasting.select(FastingPreset::TwelveTwelve);

    let (mut controller, clock) = controller_at(local(23, 9, 0, 0));
    controller.start(fasting.duration_hours()).unwrap();

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.end_time, Some(local(23, 21, 0, 0)));
    assert_eq!(snapshot.start_angle, 135.0);
    assert_eq!(snapshot.elapsed_fraction, 0.0);

    clock.set(local(23, 15, 0, 0));
    controller.poll();
    assert!((controller.snapshot().elapsed_fraction - 0.5).abs() < 1e-9);

    clock.set(local(23, 21, 0, 1));
    controller.poll();
    let done = controller.snapshot();
    assert_eq!(done.elapsed_fraction, 1.0);
    assert!(!done.is_active);
    // Natural completion keeps the arc where it started
    assert_eq!(done.start_angle, 135.0);
}

#[test]
fn sixteen_eight_across_midnight() {
    let (mut controller, clock) = controller_at(local(23, 23, 30, 0));
    controller.start(FastingPreset::SixteenEight.hours()).unwrap();

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.start_angle, 352.5);
    assert_eq!(snapshot.end_time, Some(local(24, 15, 30, 0)));

    clock.set(local(24, 0, 0, 0));
    controller.poll();
    let after_midnight = controller.snapshot();
    assert!(after_midnight.is_active);
    assert_eq!(after_midnight.clock.hour_angle, 0.0);
    assert!((after_midnight.elapsed_fraction - 0.5 / 16.0).abs() < 1e-9);
}

#[test]
fn progress_is_monotonic_second_by_second() {
    let (mut controller, clock) = controller_at(local(23, 6, 0, 0));
    controller.start(12).unwrap();

    let mut previous = 0.0;
    for _ in 0..600 {
        clock.advance(TimeDelta::seconds(1));
        controller.poll();
        let fraction = controller.snapshot().elapsed_fraction;
        assert!(fraction >= previous);
        previous = fraction;
    }
    assert!((previous - 600.0 / (12.0 * 3600.0)).abs() < 1e-9);
}

#[test]
fn stop_resets_regardless_of_progress() {
    for hours_in in [0, 1, 7, 15] {
        let (mut controller, clock) = controller_at(local(23, 20, 0, 0));
        controller.start(16).unwrap();
        clock.advance(TimeDelta::hours(hours_in) + TimeDelta::minutes(17));
        controller.poll();

        assert!(controller.stop());
        let snapshot = controller.snapshot();
        assert!(!snapshot.is_active);
        assert_eq!(snapshot.elapsed_fraction, 0.0);
        assert_eq!(snapshot.start_angle, 0.0);
    }
}

#[test]
fn stop_twice_is_harmless() {
    let (mut controller, _) = controller_at(local(23, 20, 0, 0));
    controller.start(18).unwrap();
    assert!(controller.stop());
    assert!(!controller.stop());
    assert_eq!(controller.snapshot().elapsed_fraction, 0.0);
}

#[test]
fn long_gap_between_polls_completes_once() {
    let (mut controller, clock) = controller_at(local(23, 8, 0, 0));
    let updates = controller.subscribe();
    controller.start(20).unwrap();

    clock.advance(TimeDelta::days(2));
    assert!(controller.poll());
    assert!(!controller.is_ticking());

    let last = updates.try_iter().last().unwrap();
    assert!(last.is_complete());
    assert_eq!(last.remaining_secs, 0);
}

#[test]
fn clearing_policy_resets_arc_on_completion() {
    let clock = ManualClock::new(local(23, 9, 0, 0));
    let settings = ControllerSettings {
        clear_arc_on_completion: true,
        ..ControllerSettings::default()
    };
    let mut controller = FastController::new(clock.clone(), settings);
    controller.start(12).unwrap();

    clock.advance(TimeDelta::hours(13));
    controller.poll();
    let snapshot = controller.snapshot();
    assert!(!snapshot.is_active);
    assert_eq!(snapshot.elapsed_fraction, 0.0);
    assert_eq!(snapshot.start_angle, 0.0);
}
