//! Property-based test suite for the session timing invariants.

use proptest::prelude::*;

use crate::config::SessionConfig;
use crate::phase::Phase;
use crate::session::SessionMachine;

fn arb_config() -> impl Strategy<Value = SessionConfig> {
    (
        0.5f32..12.0,
        0.0f32..12.0,
        0.5f32..12.0,
        0.0f32..12.0,
        10.0f32..120.0,
    )
        .prop_map(|(inhale, hold_in, exhale, hold_out, total)| SessionConfig {
            inhale_sec: inhale,
            hold_in_sec: hold_in,
            exhale_sec: exhale,
            hold_out_sec: hold_out,
            total_session_sec: total,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn snapshot_fields_stay_in_bounds(
        config in arb_config(),
        steps in prop::collection::vec(1_000i64..500_000, 1..200),
    ) {
        let mut machine = SessionMachine::new(config).unwrap();
        machine.start(0);

        let mut now = 0i64;
        for step in steps {
            now += step;
            machine.update(now);
            let snap = machine.snapshot();

            prop_assert!(snap.session_remaining_sec >= 0.0);
            prop_assert!(snap.session_remaining_sec <= config.total_session_sec);
            prop_assert!(snap.phase_remaining_sec >= 0.0);
            prop_assert!(
                snap.phase_remaining_sec <= config.phase_duration(snap.phase),
                "phase_remaining {} exceeds duration of {:?}",
                snap.phase_remaining_sec,
                snap.phase
            );
            prop_assert!((0.0..=1.0).contains(&snap.cycle_progress));
            prop_assert!((0.0..=1.0).contains(&snap.total_progress));
            prop_assert!((0.0..=1.0).contains(&machine.cycle_phase_norm()));
        }
    }

    #[test]
    fn phase_order_is_never_violated(
        config in arb_config(),
        steps in prop::collection::vec(1_000i64..3_000_000, 1..300),
    ) {
        let mut machine = SessionMachine::new(config).unwrap();
        machine.start(0);

        let mut now = 0i64;
        let mut prev = machine.snapshot().phase;
        for step in steps {
            now += step;
            let res = machine.update(now);
            if res.completed.is_some() {
                break;
            }
            let phase = machine.snapshot().phase;
            if phase != prev {
                // a tick may cross several phases only through zero-length
                // holds; observable order still follows the fixed cycle
                let mut expect = prev.next();
                while expect != phase
                    && config.phase_duration(expect) == 0.0
                {
                    expect = expect.next();
                }
                prop_assert_eq!(phase, expect, "jumped from {:?}", prev);
                prev = phase;
            }
        }
    }

    #[test]
    fn session_completes_exactly_once(
        config in arb_config(),
        step_us in 50_000i64..2_000_000,
    ) {
        let mut machine = SessionMachine::new(config).unwrap();
        machine.start(0);

        // enough ticks to run well past the session length
        let ticks = (config.total_session_sec as i64 * 1_000_000 / step_us) + 10;
        let mut completions = 0u32;
        let mut now = 0i64;
        for _ in 0..ticks {
            now += step_us;
            let res = machine.update(now);
            if let Some(finished) = res.completed {
                completions += 1;
                prop_assert_eq!(finished.session_remaining_sec, 0.0);
                prop_assert!(!finished.running);
            }
        }
        prop_assert_eq!(completions, 1);
        prop_assert!(!machine.snapshot().running);
    }

    #[test]
    fn clock_regressions_never_add_time(
        config in arb_config(),
        forward in 1_000i64..1_000_000,
        backward in 1i64..10_000_000,
    ) {
        let mut machine = SessionMachine::new(config).unwrap();
        machine.start(0);

        machine.update(forward);
        let before = machine.snapshot().session_remaining_sec;

        // time travel backwards: delta must clamp to zero
        machine.update(forward - backward);
        let after = machine.snapshot().session_remaining_sec;

        prop_assert!(after <= before);
        prop_assert!(after <= config.total_session_sec);
    }

    #[test]
    fn pause_resume_preserves_position(
        config in arb_config(),
        run_us in 100_000i64..5_000_000,
        gap_us in 0i64..60_000_000,
    ) {
        let mut machine = SessionMachine::new(config).unwrap();
        machine.start(0);
        machine.update(run_us);

        let before = machine.snapshot();
        machine.pause();
        machine.start(run_us + gap_us);
        let after = machine.snapshot();

        prop_assert_eq!(after.phase, before.phase);
        prop_assert_eq!(after.phase_remaining_sec, before.phase_remaining_sec);
        prop_assert_eq!(after.cycle_progress, before.cycle_progress);
        prop_assert_eq!(after.session_remaining_sec, before.session_remaining_sec);
    }
}
