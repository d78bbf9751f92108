//! Property tests over arbitrary time-sample sequences.

use proptest::prelude::*;

use lessonplay_core::{
    BoundaryTracker, Event, PlaySession, QuestionBank, SimulatedPlayer, ZoomController,
};

proptest! {
    /// However playback is stepped, a checkpoint triggers at most once:
    /// the gate blocks re-evaluation while open, and resolved ids stay in
    /// the answered set.
    #[test]
    fn checkpoint_triggers_at_most_once(steps in prop::collection::vec(0.01f64..0.8, 1..400)) {
        let mut session = PlaySession::new(
            QuestionBank::sample(),
            SimulatedPlayer::with_duration(70.0),
        );
        session.toggle_playback();

        let mut now_ms: u64 = 0;
        let mut trigger_counts: std::collections::HashMap<String, usize> =
            std::collections::HashMap::new();

        for dt in steps {
            now_ms += (dt * 1000.0) as u64;
            session.player_mut().advance(dt);
            for event in session.tick(now_ms) {
                if let Event::CheckpointTriggered { checkpoint_id, .. } = event {
                    *trigger_counts.entry(checkpoint_id).or_insert(0) += 1;
                }
            }
            // Answer correctly so playback can reach later checkpoints.
            let pending = session
                .question()
                .filter(|q| !q.feedback_visible)
                .and_then(|q| q.checkpoint.correct_option().map(|o| o.id.clone()));
            if let Some(correct) = pending {
                session.select_option(&correct);
                session.submit(now_ms);
            }
        }

        for (id, count) in trigger_counts {
            prop_assert!(count <= 1, "checkpoint {id} triggered {count} times");
        }
    }

    /// For forward-moving samples, the tracker accepts at most one sample
    /// per integer second.
    #[test]
    fn tracker_accepts_one_sample_per_second(steps in prop::collection::vec(0.0f64..0.9, 1..300)) {
        let mut tracker = BoundaryTracker::new();
        let mut time = 0.0;
        let mut accepted_seconds = Vec::new();

        for dt in steps {
            time += dt;
            if tracker.observe(time) {
                accepted_seconds.push(time.floor() as u64);
            }
        }

        let mut deduped = accepted_seconds.clone();
        deduped.dedup();
        prop_assert_eq!(&accepted_seconds, &deduped);
        prop_assert!(accepted_seconds.windows(2).all(|w| w[0] < w[1]));
    }

    /// Sweeping the clock densely, zoom is active exactly inside the
    /// window: any step shorter than the entry band lands a sample in it.
    #[test]
    fn zoom_matches_window_under_dense_sampling(step in 0.01f64..0.45) {
        let mut zoom = ZoomController::new();
        let mut time = 0.0;
        while time < 25.0 {
            zoom.observe(time);
            let expected = (15.0..20.0).contains(&time);
            prop_assert_eq!(
                zoom.is_active(),
                expected,
                "at t={} active={} expected={}",
                time,
                zoom.is_active(),
                expected
            );
            time += step;
        }
    }
}
