//! Integration tests for nudge-sim.

use nudge_behavior::{
    AlwaysAccept, BehaviorResult, HistoryWeighted, LessStubborn, ResponseModel, ResponseQuery,
    Stubborn,
};
use nudge_core::{
    Chronometer, CoreError, DayState, Outcome, QuietHours, RecencyState, ResponseDistribution,
    SimClock, SimConfig, SimRng, SkipRule, TimeState,
};
use nudge_survey::{BehaviorRecord, BehaviorTable};

use crate::{
    AlwaysSend, NeverSend, NoopObserver, NotificationAgent, NotificationHistory, SimBuilder,
    SimError, SimObserver, TraceEntry, TraceSummary,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Ticks `config` yields per simulated week, summed day by day from the
/// chronometer.  The untraced day-0 midnight start must fall in quiet hours.
fn week_ticks(config: &SimConfig) -> usize {
    assert!(config.quiet_hours.contains(0), "midnight start would be traced");
    let chrono = Chronometer::new(config.quiet_hours.to_skip_rule()).unwrap();
    (0..7)
        .map(|day| chrono.active_ticks_per_day(config.step_width_minutes, day).unwrap())
        .sum()
}

fn test_config(weeks: u32) -> SimConfig {
    SimConfig { simulation_weeks: weeks, ..SimConfig::default() }
}

/// Returns an all-zero distribution on Tuesdays.
struct BrokenOnTuesday;

impl ResponseModel for BrokenOnTuesday {
    fn response_distribution(
        &self,
        query: &ResponseQuery,
        _rng: &mut SimRng,
    ) -> BehaviorResult<ResponseDistribution> {
        if query.day_of_week == 1 {
            Ok(ResponseDistribution::new(0.0, 0.0))
        } else {
            Ok(ResponseDistribution::ALWAYS_ACCEPT)
        }
    }
}

/// Unnormalized weights; the loop must normalize before use.
struct Unnormalized;

impl ResponseModel for Unnormalized {
    fn response_distribution(
        &self,
        _query: &ResponseQuery,
        _rng: &mut SimRng,
    ) -> BehaviorResult<ResponseDistribution> {
        Ok(ResponseDistribution::new(3.0, 1.0))
    }
}

/// Sends every tick and records what it was shown and paid.
#[derive(Default)]
struct RecordingAgent {
    seen:    Vec<(TimeState, DayState, RecencyState)>,
    rewards: Vec<i32>,
}

impl NotificationAgent for RecordingAgent {
    fn get_action(&mut self, time: TimeState, day: DayState, recency: RecencyState) -> bool {
        self.seen.push((time, day, recency));
        true
    }

    fn feed_reward(&mut self, reward: i32) {
        self.rewards.push(reward);
    }
}

#[derive(Default)]
struct CountingObserver {
    ticks:  usize,
    ended:  Option<(SimClock, usize)>,
}

impl SimObserver for CountingObserver {
    fn on_tick(&mut self, _entry: &TraceEntry) {
        self.ticks += 1;
    }

    fn on_sim_end(&mut self, final_clock: SimClock, ticks: usize) {
        self.ended = Some((final_clock, ticks));
    }
}

fn stubborn_trace(seed: u64) -> Vec<TraceEntry> {
    let config = SimConfig { seed, ..test_config(1) };
    let mut rng = SimRng::new(config.seed);
    let model = LessStubborn::new(config.deviation_probability, &mut rng).unwrap();
    let mut sim = SimBuilder::new(config, model, AlwaysSend).rng(rng).build().unwrap();
    sim.run(&mut NoopObserver).unwrap();
    sim.into_trace()
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(test_config(1), AlwaysAccept, AlwaysSend).build().unwrap();
        assert!(sim.trace().is_empty());
        assert!(!sim.is_done());
        assert_eq!(sim.chronometer.clock(), SimClock::START);
        assert_eq!(sim.history.last_sent(), None);
    }

    #[test]
    fn zero_weeks_is_config_error() {
        let err = SimBuilder::new(test_config(0), AlwaysAccept, AlwaysSend)
            .build()
            .err()
            .unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn step_not_dividing_day_is_config_error() {
        let config = SimConfig { step_width_minutes: 7, ..test_config(1) };
        let err = SimBuilder::new(config, AlwaysAccept, AlwaysSend).build().err().unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn skip_everything_rule_is_config_error() {
        let err = SimBuilder::new(test_config(1), AlwaysAccept, AlwaysSend)
            .skip_rule(SkipRule::new(|_, _| true))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Core(CoreError::Config(_))));
    }

    #[test]
    fn seed_history_at_origin_marks_midnight_send() {
        let config = SimConfig { seed_history_at_origin: true, ..test_config(1) };
        let sim = SimBuilder::new(config, AlwaysAccept, NeverSend).build().unwrap();
        assert_eq!(sim.history.last_sent(), Some(SimClock::START));
    }
}

// ── Full runs ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn always_accept_always_send_one_week() {
        let mut sim = SimBuilder::new(test_config(1), AlwaysAccept, AlwaysSend).build().unwrap();
        let trace = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(trace.len(), week_ticks(&test_config(1)));
        assert!(trace.iter().all(|e| e.decision));
        assert!(trace.iter().all(|e| e.outcome == Some(Outcome::Accept)));
        assert!(trace.iter().all(|e| e.reward == 3));
        assert!(trace.iter().all(|e| e.prob_accept == 1.0 && e.prob_ignore == 0.0));
        assert!(sim.is_done());
    }

    #[test]
    fn first_and_last_ticks_bracket_the_week() {
        let mut sim = SimBuilder::new(test_config(1), AlwaysAccept, AlwaysSend).build().unwrap();
        let trace = sim.run(&mut NoopObserver).unwrap();

        let first = &trace[0];
        assert_eq!((first.days_elapsed, first.hour, first.minute, first.day_of_week), (0, 8, 0, 0));
        let last = trace.last().unwrap();
        assert_eq!((last.days_elapsed, last.hour, last.minute, last.day_of_week), (6, 22, 50, 6));
    }

    #[test]
    fn trace_length_follows_step_and_quiet_hours() {
        let config = SimConfig {
            step_width_minutes: 30,
            quiet_hours: QuietHours { start_hour: 22, end_hour: 6 },
            ..test_config(2)
        };
        let expected = 2 * week_ticks(&config);
        // 16 open hours × 2 ticks × 7 days × 2 weeks.
        assert_eq!(expected, 448);

        let mut sim = SimBuilder::new(config, AlwaysAccept, NeverSend).build().unwrap();
        let trace = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(trace.len(), expected);
        assert!(trace.iter().all(|e| (6..22).contains(&e.hour) && e.minute % 30 == 0));
    }

    #[test]
    fn no_tick_falls_in_quiet_hours() {
        let mut sim = SimBuilder::new(test_config(1), AlwaysAccept, NeverSend).build().unwrap();
        let trace = sim.run(&mut NoopObserver).unwrap();
        assert!(trace.iter().all(|e| (8..23).contains(&e.hour)));
    }

    #[test]
    fn ticks_are_strictly_increasing() {
        let mut sim = SimBuilder::new(test_config(2), AlwaysAccept, NeverSend).build().unwrap();
        let trace = sim.run(&mut NoopObserver).unwrap();
        let key = |e: &TraceEntry| (e.days_elapsed, e.hour, e.minute);
        assert!(trace.windows(2).all(|w| key(&w[0]) < key(&w[1])));
        assert_eq!(trace.len(), 2 * week_ticks(&test_config(1)));
    }

    #[test]
    fn never_send_earns_nothing() {
        let mut sim = SimBuilder::new(test_config(1), AlwaysAccept, NeverSend).build().unwrap();
        let trace = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(trace.len(), week_ticks(&test_config(1)));
        assert!(trace.iter().all(|e| !e.decision && e.outcome.is_none() && e.reward == 0));
        assert!(trace.iter().all(|e| e.minutes_since_last.is_none()));
        assert!(trace.iter().all(|e| e.state.recency == RecencyState::Long));
        assert_eq!(sim.history.last_sent(), None);
    }

    #[test]
    fn recency_tracks_last_send() {
        let mut sim = SimBuilder::new(test_config(1), AlwaysAccept, AlwaysSend).build().unwrap();
        let trace = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(trace[0].minutes_since_last, None);
        assert_eq!(trace[1].minutes_since_last, Some(10));
        // Day 1 08:00 follows the day-0 22:50 send across the quiet night.
        let day1 = week_ticks(&test_config(1)) / 7;
        assert_eq!((trace[day1].days_elapsed, trace[day1].hour), (1, 8));
        assert_eq!(trace[day1].minutes_since_last, Some(9 * 60 + 10));
        assert_eq!(trace[day1].state.recency, RecencyState::Long);
        assert_eq!(trace[91].state.recency, RecencyState::Within1Hour);
    }

    #[test]
    fn agent_sees_long_only_at_each_morning() {
        let mut sim = SimBuilder::new(test_config(1), AlwaysAccept, RecordingAgent::default())
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();

        let agent = &sim.agent;
        assert_eq!(agent.seen.len(), week_ticks(&test_config(1)));
        let long = agent.seen.iter().filter(|s| s.2 == RecencyState::Long).count();
        assert_eq!(long, 7);
        assert_eq!(agent.seen[0], (TimeState::Morning, DayState::Monday, RecencyState::Long));
    }

    #[test]
    fn agent_is_fed_every_trace_reward() {
        let mut sim = SimBuilder::new(test_config(1), Unnormalized, RecordingAgent::default())
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();

        let traced: Vec<i32> = sim.trace().iter().map(|e| e.reward).collect();
        assert_eq!(sim.agent.rewards, traced);
    }

    #[test]
    fn distribution_is_normalized_before_use() {
        let mut sim = SimBuilder::new(test_config(1), Unnormalized, NeverSend).build().unwrap();
        let trace = sim.run(&mut NoopObserver).unwrap();
        assert!(trace.iter().all(|e| e.prob_accept == 0.75 && e.prob_ignore == 0.25));
    }

    #[test]
    fn seed_history_at_origin_shifts_first_recency() {
        let config = SimConfig { seed_history_at_origin: true, ..test_config(1) };
        let mut sim = SimBuilder::new(config, AlwaysAccept, NeverSend).build().unwrap();
        let trace = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(trace[0].minutes_since_last, Some(8 * 60));
        assert_eq!(trace[1].minutes_since_last, Some(8 * 60 + 10));
    }

    #[test]
    fn custom_skip_rule_replaces_quiet_hours() {
        let config = SimConfig { step_width_minutes: 60, ..test_config(1) };
        let mut sim = SimBuilder::new(config, AlwaysAccept, NeverSend)
            .skip_rule(SkipRule::never())
            .build()
            .unwrap();
        let trace = sim.run(&mut NoopObserver).unwrap();

        // Every hour of the week except day-0 midnight, which is the start
        // position and never traced.
        assert_eq!(trace.len(), 24 * 7 - 1);
        assert_eq!((trace[0].hour, trace[0].minute), (1, 0));
    }

    #[test]
    fn observer_sees_every_tick_and_the_end() {
        let mut sim = SimBuilder::new(test_config(1), AlwaysAccept, AlwaysSend).build().unwrap();
        let mut obs = CountingObserver::default();
        sim.run(&mut obs).unwrap();

        assert_eq!(obs.ticks, week_ticks(&test_config(1)));
        let (final_clock, ticks) = obs.ended.unwrap();
        assert_eq!(ticks, week_ticks(&test_config(1)));
        assert_eq!((final_clock.days_elapsed, final_clock.hour), (7, 8));
    }

    #[test]
    fn run_after_done_is_a_no_op() {
        let mut sim = SimBuilder::new(test_config(1), AlwaysAccept, AlwaysSend).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        let again = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(again.len(), week_ticks(&test_config(1)));
    }
}

// ── Incremental stepping ──────────────────────────────────────────────────────

#[cfg(test)]
mod run_ticks_tests {
    use super::*;

    #[test]
    fn run_ticks_then_run_matches_full_run() {
        let mut stepped = SimBuilder::new(test_config(1), AlwaysAccept, AlwaysSend).build().unwrap();
        let mut obs = CountingObserver::default();
        assert_eq!(stepped.run_ticks(5, &mut obs).unwrap(), 5);
        assert_eq!(obs.ticks, 5);
        assert!(obs.ended.is_none());
        assert_eq!(stepped.trace().len(), 5);
        assert!(!stepped.is_done());

        stepped.run(&mut NoopObserver).unwrap();

        let mut full = SimBuilder::new(test_config(1), AlwaysAccept, AlwaysSend).build().unwrap();
        full.run(&mut NoopObserver).unwrap();
        assert_eq!(stepped.trace(), full.trace());
    }

    #[test]
    fn run_ticks_stops_at_end_day() {
        let mut sim = SimBuilder::new(test_config(1), AlwaysAccept, NeverSend).build().unwrap();
        let ran = sim.run_ticks(week_ticks(&test_config(1)) + 100, &mut NoopObserver).unwrap();
        assert_eq!(ran, week_ticks(&test_config(1)));
        assert!(sim.is_done());
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn zero_distribution_aborts_and_keeps_partial_trace() {
        let mut sim = SimBuilder::new(test_config(1), BrokenOnTuesday, AlwaysSend).build().unwrap();
        let err = sim.run(&mut NoopObserver).unwrap_err();

        assert!(err.is_distribution());
        assert!(matches!(err, SimError::Core(CoreError::Distribution { .. })));
        // All of Monday made it in; nothing from Tuesday.
        let monday = Chronometer::new(SkipRule::default()).unwrap().active_ticks_per_day(10, 0);
        assert_eq!(sim.trace().len(), monday.unwrap());
        assert!(sim.trace().iter().all(|e| e.day_of_week == 0));
    }

    #[test]
    fn error_kind_helpers_see_through_behavior_errors() {
        let err = SimError::Behavior(CoreError::Lookup("day 9".into()).into());
        assert!(err.is_lookup());
        assert!(!err.is_distribution());
        assert!(err.core().is_some());
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism_tests {
    use super::*;

    #[test]
    fn same_seed_same_trace() {
        assert_eq!(stubborn_trace(7), stubborn_trace(7));
    }

    #[test]
    fn different_seed_different_trace() {
        assert_ne!(stubborn_trace(7), stubborn_trace(8));
    }

    #[test]
    fn stubborn_user_answers_by_state() {
        let config = test_config(1);
        let mut rng = SimRng::new(config.seed);
        let model = Stubborn::new(&mut rng);
        let plan = model.plan().clone();
        let mut sim = SimBuilder::new(config, model, AlwaysSend).rng(rng).build().unwrap();
        let trace = sim.run(&mut NoopObserver).unwrap();

        for e in trace {
            let expected = if plan.will_accept(e.state) { Outcome::Accept } else { Outcome::Ignore };
            assert_eq!(e.outcome, Some(expected));
        }
    }
}

// ── History-weighted user ─────────────────────────────────────────────────────

#[cfg(test)]
mod history_model_tests {
    use super::*;

    #[test]
    fn observed_state_answers_from_records_and_others_fall_back() {
        // Monday morning, long since last: one accepting respondent.
        let record = BehaviorRecord::new(9, 15, 0, 1_000, Outcome::Accept).unwrap();
        let model = HistoryWeighted::new(BehaviorTable::from_records([record]));
        let mut sim = SimBuilder::new(test_config(1), model, AlwaysSend).build().unwrap();
        let trace = sim.run(&mut NoopObserver).unwrap();

        // Monday 08:00, nothing sent yet.
        assert_eq!(trace[0].prob_accept, 1.0);
        assert_eq!(trace[0].outcome, Some(Outcome::Accept));

        // Monday 08:10 is within the hour: empty bucket, panel fallback.
        let expected = 0.1 / 0.9;
        assert!((trace[1].prob_accept - expected).abs() < 1e-12);
        assert!(trace.iter().all(|e| (e.prob_accept + e.prob_ignore - 1.0).abs() < 1e-12));
    }
}

// ── NotificationHistory ───────────────────────────────────────────────────────

#[cfg(test)]
mod notification_history_tests {
    use super::*;

    #[test]
    fn never_has_no_recency() {
        let h = NotificationHistory::never();
        assert_eq!(h.minutes_since(&SimClock::new(3, 10, 0, 3).unwrap()), None);
    }

    #[test]
    fn minutes_since_spans_days() {
        let mut h = NotificationHistory::never();
        h.record(SimClock::new(0, 22, 50, 0).unwrap());
        let now = SimClock::new(2, 8, 0, 2).unwrap();
        assert_eq!(h.minutes_since(&now), Some(1440 + 9 * 60 + 10));
    }
}

// ── TraceSummary ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod summary_tests {
    use super::*;

    #[test]
    fn counts_sends_outcomes_and_reward() {
        let mut sim = SimBuilder::new(test_config(1), AlwaysAccept, AlwaysSend).build().unwrap();
        let summary = TraceSummary::from_entries(sim.run(&mut NoopObserver).unwrap());

        assert_eq!(summary.ticks, week_ticks(&test_config(1)));
        assert_eq!(summary.sends, week_ticks(&test_config(1)));
        assert_eq!(summary.accepts, week_ticks(&test_config(1)));
        assert_eq!(summary.ignores, 0);
        assert_eq!(summary.total_reward, 3 * week_ticks(&test_config(1)) as i64);
        assert_eq!(summary.accept_rate(), 1.0);
    }

    #[test]
    fn empty_trace_summary() {
        let summary = TraceSummary::from_entries(&[]);
        assert_eq!(summary, TraceSummary::default());
        assert_eq!(summary.accept_rate(), 0.0);
    }
}
