use crate::grid::Canvas;
use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

/// Tick cadence while replaying explored cells.
pub const VISIT_INTERVAL: Duration = Duration::from_millis(10);
/// Tick cadence while replaying the final path.
pub const PATH_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTiming {
    pub visit: Duration,
    pub path: Duration,
}

impl PlaybackTiming {
    /// No delay between ticks.
    pub const fn instant() -> Self {
        PlaybackTiming {
            visit: Duration::ZERO,
            path: Duration::ZERO,
        }
    }
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        PlaybackTiming {
            visit: VISIT_INTERVAL,
            path: PATH_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Visiting,
    Pathing,
}

/// What a single playback tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Visited(usize),
    /// The visit queue drained and playback moved on to the path.
    EnteredPath,
    Traveled(usize),
    /// The path queue drained and playback went idle.
    Finished,
}

/// Two-phase replay of a search: every explored cell first, then the path
/// from start to target.
///
/// Steps are appended while the search runs and consumed front to back
/// during playback. Playback is cooperative: each [`tick`](Self::tick)
/// performs one transition and the caller decides when the next one runs,
/// using [`interval`](Self::interval) as the cadence.
#[derive(Debug, Clone, Default)]
pub struct AnimationPlan {
    visit_plan: VecDeque<usize>,
    path_plan: VecDeque<usize>,
    phase: Phase,
    // set once the visit queue has drained
    path_started: bool,
    timing: PlaybackTiming,
}

impl AnimationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timing(timing: PlaybackTiming) -> Self {
        AnimationPlan {
            timing,
            ..Self::default()
        }
    }

    pub fn set_timing(&mut self, timing: PlaybackTiming) {
        self.timing = timing;
    }

    pub fn timing(&self) -> PlaybackTiming {
        self.timing
    }

    pub fn push_visit_step(&mut self, index: usize) {
        self.visit_plan.push_back(index);
    }

    pub fn push_path_step(&mut self, index: usize) {
        self.path_plan.push_back(index);
    }

    /// Visit steps not yet played.
    pub fn visit_steps(&self) -> usize {
        self.visit_plan.len()
    }

    /// Path steps not yet played.
    pub fn path_steps(&self) -> usize {
        self.path_plan.len()
    }

    pub fn visit_order(&self) -> impl Iterator<Item = usize> + '_ {
        self.visit_plan.iter().copied()
    }

    pub fn path_order(&self) -> impl Iterator<Item = usize> + '_ {
        self.path_plan.iter().copied()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Starts playback from the visit phase. A playback already in progress
    /// is cancelled first; steps it did not deliver are kept. Once the path
    /// phase has been entered, playback resumes there instead.
    pub fn run(&mut self) {
        if self.is_playing() {
            log::debug!(
                "restarting playback with {} visit and {} path steps left",
                self.visit_steps(),
                self.path_steps()
            );
        }
        self.phase = if self.path_started && self.visit_plan.is_empty() {
            Phase::Pathing
        } else {
            Phase::Visiting
        };
    }

    /// Pauses playback. Pending steps stay queued for the next [`run`](Self::run).
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Cancels playback and drops every pending step.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.path_started = false;
        self.visit_plan.clear();
        self.path_plan.clear();
    }

    /// Delay before the next tick, or `None` when idle.
    pub fn interval(&self) -> Option<Duration> {
        match self.phase {
            Phase::Idle => None,
            Phase::Visiting => Some(self.timing.visit),
            Phase::Pathing => Some(self.timing.path),
        }
    }

    /// Performs one playback transition against `canvas`.
    pub fn tick<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> Option<Tick> {
        match self.phase {
            Phase::Idle => None,
            Phase::Visiting => match self.visit_plan.pop_front() {
                Some(index) => {
                    canvas.visit(index);
                    Some(Tick::Visited(index))
                }
                None => {
                    self.phase = Phase::Pathing;
                    self.path_started = true;
                    Some(Tick::EnteredPath)
                }
            },
            Phase::Pathing => match self.path_plan.pop_front() {
                Some(index) => {
                    canvas.travel(index);
                    Some(Tick::Traveled(index))
                }
                None => {
                    self.phase = Phase::Idle;
                    Some(Tick::Finished)
                }
            },
        }
    }

    /// Runs playback to completion, sleeping [`interval`](Self::interval)
    /// before every tick and handing each tick to `on_frame`.
    ///
    /// Returning `ControlFlow::Break` from `on_frame` stops playback with
    /// the remaining steps intact. Returns `true` if playback finished.
    pub fn play<C, F>(&mut self, canvas: &mut C, mut on_frame: F) -> bool
    where
        C: Canvas + ?Sized,
        F: FnMut(&C, Tick) -> ControlFlow<()>,
    {
        self.run();
        while let Some(interval) = self.interval() {
            if !interval.is_zero() {
                thread::sleep(interval);
            }
            let Some(tick) = self.tick(canvas) else {
                break;
            };
            if on_frame(&*canvas, tick).is_break() {
                self.stop();
                return false;
            }
            if tick == Tick::Finished {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<(char, usize)>,
    }

    impl Canvas for Recorder {
        fn visit(&mut self, index: usize) {
            self.events.push(('v', index));
        }

        fn travel(&mut self, index: usize) {
            self.events.push(('p', index));
        }
    }

    fn plan(visits: &[usize], path: &[usize]) -> AnimationPlan {
        let mut plan = AnimationPlan::with_timing(PlaybackTiming::instant());
        visits.iter().for_each(|&i| plan.push_visit_step(i));
        path.iter().for_each(|&i| plan.push_path_step(i));
        plan
    }

    #[test]
    fn visit_phase_drains_before_path_phase() {
        let mut plan = plan(&[0, 1, 2], &[0, 2]);
        let mut canvas = Recorder::default();
        assert!(plan.play(&mut canvas, |_, _| ControlFlow::Continue(())));
        assert_eq!(
            canvas.events,
            vec![('v', 0), ('v', 1), ('v', 2), ('p', 0), ('p', 2)]
        );
        assert_eq!(plan.phase(), Phase::Idle);
        assert_eq!(plan.visit_steps(), 0);
        assert_eq!(plan.path_steps(), 0);
    }

    #[test]
    fn tick_sequence_and_intervals() {
        let mut plan = AnimationPlan::new();
        plan.push_visit_step(4);
        plan.push_path_step(4);
        let mut canvas = Recorder::default();

        assert_eq!(plan.interval(), None);
        assert_eq!(plan.tick(&mut canvas), None);

        plan.run();
        assert_eq!(plan.interval(), Some(VISIT_INTERVAL));
        assert_eq!(plan.tick(&mut canvas), Some(Tick::Visited(4)));
        assert_eq!(plan.tick(&mut canvas), Some(Tick::EnteredPath));
        assert_eq!(plan.interval(), Some(PATH_INTERVAL));
        assert_eq!(plan.tick(&mut canvas), Some(Tick::Traveled(4)));
        assert_eq!(plan.tick(&mut canvas), Some(Tick::Finished));
        assert!(!plan.is_playing());
        assert_eq!(plan.tick(&mut canvas), None);
    }

    #[test]
    fn stop_pauses_and_run_resumes() {
        let mut plan = plan(&[0, 1, 2], &[0]);
        let mut canvas = Recorder::default();
        plan.run();
        plan.tick(&mut canvas);
        plan.stop();
        assert_eq!(plan.tick(&mut canvas), None);
        assert_eq!(plan.visit_steps(), 2);
        assert_eq!(plan.path_steps(), 1);

        plan.run();
        assert_eq!(plan.tick(&mut canvas), Some(Tick::Visited(1)));
    }

    #[test]
    fn run_while_playing_restarts_without_duplicating() {
        let mut plan = plan(&[0, 1], &[1]);
        let mut canvas = Recorder::default();
        plan.run();
        plan.tick(&mut canvas);
        plan.run();
        assert!(plan.play(&mut canvas, |_, _| ControlFlow::Continue(())));
        assert_eq!(canvas.events, vec![('v', 0), ('v', 1), ('p', 1)]);
    }

    #[test]
    fn run_during_path_phase_resumes_the_path() {
        let mut plan = plan(&[0], &[0, 1]);
        let mut canvas = Recorder::default();
        let mut ticks = Vec::new();
        plan.run();
        for _ in 0..3 {
            ticks.extend(plan.tick(&mut canvas));
        }
        plan.run();
        assert_eq!(plan.phase(), Phase::Pathing);
        while let Some(tick) = plan.tick(&mut canvas) {
            ticks.push(tick);
        }
        assert_eq!(
            ticks,
            vec![
                Tick::Visited(0),
                Tick::EnteredPath,
                Tick::Traveled(0),
                Tick::Traveled(1),
                Tick::Finished,
            ]
        );
    }

    #[test]
    fn stop_in_path_phase_then_run_skips_the_visit_phase() {
        let mut plan = plan(&[0], &[0, 1]);
        let mut canvas = Recorder::default();
        plan.run();
        plan.tick(&mut canvas);
        plan.tick(&mut canvas);
        plan.stop();
        plan.run();
        assert_eq!(plan.phase(), Phase::Pathing);
        assert_eq!(plan.tick(&mut canvas), Some(Tick::Traveled(0)));

        plan.reset();
        plan.push_visit_step(3);
        plan.run();
        assert_eq!(plan.phase(), Phase::Visiting);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut plan = plan(&[0, 1], &[1]);
        plan.run();
        plan.reset();
        let once = (plan.phase(), plan.visit_steps(), plan.path_steps());
        plan.reset();
        assert_eq!((plan.phase(), plan.visit_steps(), plan.path_steps()), once);
        assert_eq!(once, (Phase::Idle, 0, 0));
    }

    #[test]
    fn play_can_be_cancelled_by_the_frame_callback() {
        let mut plan = plan(&[0, 1, 2, 3], &[3]);
        let mut canvas = Recorder::default();
        let mut frames = 0;
        let finished = plan.play(&mut canvas, |_, _| {
            frames += 1;
            if frames == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert!(!finished);
        assert!(!plan.is_playing());
        assert_eq!(plan.visit_steps(), 2);
        assert_eq!(plan.path_steps(), 1);
    }

    #[test]
    fn empty_path_still_plays_through() {
        let mut plan = plan(&[5, 6], &[]);
        let mut canvas = Recorder::default();
        assert!(plan.play(&mut canvas, |_, _| ControlFlow::Continue(())));
        assert_eq!(canvas.events, vec![('v', 5), ('v', 6)]);
    }
}
