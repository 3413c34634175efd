//! The `Sim` struct and its tick loop.

use nudge_behavior::{ResponseModel, ResponseQuery};
use nudge_core::{Chronometer, SimClock, SimConfig, SimRng};

use crate::{
    NotificationAgent, NotificationHistory, SimObserver, SimResult, TraceEntry, TraceSummary,
    NEVER_SENT_MINUTES,
};

/// The main simulation runner.
///
/// `Sim<M, A>` owns the clock, the simulated user `M`, the agent `A` and the
/// growing trace.  Each tick:
///
/// 1. **Advance** the chronometer; stop once the end day is reached.
/// 2. **Query** the model with the clock and minutes since the last send,
///    then normalize the answer.
/// 3. **Decide**: classify the state and ask the agent whether to send.
/// 4. **Respond**: if sent, draw the outcome and remember the send time.
/// 5. **Reward** the agent and append a [`TraceEntry`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: ResponseModel, A: NotificationAgent> {
    /// Run configuration (step, weeks, rewards, …).
    pub config: SimConfig,

    /// Skipping clock.  Its position is the last tick processed.
    pub chronometer: Chronometer,

    /// The simulated user.
    pub model: M,

    /// The policy under test.  Still owned here after the run so callers can
    /// inspect what it learned.
    pub agent: A,

    /// The single random stream for the run.
    pub rng: SimRng,

    /// Last sent notification.
    pub history: NotificationHistory,

    trace: Vec<TraceEntry>,
    done:  bool,
}

impl<M: ResponseModel, A: NotificationAgent> Sim<M, A> {
    pub(crate) fn from_parts(
        config:      SimConfig,
        chronometer: Chronometer,
        model:       M,
        agent:       A,
        rng:         SimRng,
        history:     NotificationHistory,
    ) -> Self {
        Self { config, chronometer, model, agent, rng, history, trace: Vec::new(), done: false }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until `days_elapsed` reaches `simulation_weeks * 7` and return the
    /// full trace.
    ///
    /// Calls observer hooks for every tick.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    /// On error the run stops at the failing tick; the entries before it
    /// remain available through [`trace`][Self::trace].
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<&[TraceEntry]> {
        tracing::info!(
            model = self.model.name(),
            end_day = self.config.end_day(),
            step = self.config.step_width_minutes,
            "simulation started"
        );

        while let Some(entry) = self.step()? {
            observer.on_tick(entry);
        }

        let ticks = self.trace.len();
        observer.on_sim_end(self.chronometer.clock(), ticks);
        let totals = TraceSummary::from_entries(&self.trace);
        tracing::info!(
            ticks,
            sends = totals.sends,
            total_reward = totals.total_reward,
            "simulation finished"
        );
        Ok(&self.trace)
    }

    /// Run at most `n` ticks from the current position.  Returns how many
    /// ticks were actually traced (fewer than `n` only when the end day was
    /// reached).
    ///
    /// Useful for tests and incremental stepping.  Does not call
    /// `on_sim_end`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: usize, observer: &mut O) -> SimResult<usize> {
        let mut ran = 0;
        while ran < n {
            match self.step()? {
                Some(entry) => observer.on_tick(entry),
                None        => break,
            }
            ran += 1;
        }
        Ok(ran)
    }

    /// `true` once the clock has passed the end day.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Entries traced so far, in tick order.
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    pub fn into_trace(self) -> Vec<TraceEntry> {
        self.trace
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Advance one tick.  `Ok(None)` once the end day is reached.
    fn step(&mut self) -> SimResult<Option<&TraceEntry>> {
        if self.done {
            return Ok(None);
        }

        let now = self.chronometer.advance(self.config.step_width_minutes)?;
        if now.days_elapsed >= self.config.end_day() {
            self.done = true;
            return Ok(None);
        }

        let entry = self.process_tick(now)?;
        self.trace.push(entry);
        Ok(self.trace.last())
    }

    fn process_tick(&mut self, now: SimClock) -> SimResult<TraceEntry> {
        tracing::debug!(clock = %now, "tick");

        let since = self.history.minutes_since(&now);
        let query = ResponseQuery::at(&now, since.unwrap_or(NEVER_SENT_MINUTES));

        let dist = self
            .model
            .response_distribution(&query, &mut self.rng)?
            .normalized()?;

        let state = query.state_key()?;
        let decision = self.agent.get_action(state.time, state.day, state.recency);

        let outcome = if decision {
            let outcome = dist.sample(&mut self.rng)?;
            self.history.record(now);
            tracing::trace!(clock = %now, %state, %outcome, "notification sent");
            Some(outcome)
        } else {
            None
        };

        let reward = self.config.rewards.reward(outcome);
        self.agent.feed_reward(reward);

        Ok(TraceEntry {
            days_elapsed:       now.days_elapsed,
            hour:               now.hour,
            minute:             now.minute,
            day_of_week:        now.day_of_week,
            minutes_since_last: since,
            state,
            prob_accept:        dist.accept,
            prob_ignore:        dist.ignore,
            decision,
            outcome,
            reward,
        })
    }
}
