//! Time-based interpolation of record fields
//!
//! A [`Tween`] snapshots the current values of some fields of a record when it
//! is created, then on every frame writes `start + (end - start) * eased`
//! back into the record. The clock starts on the first frame the tween runs,
//! not when it is created.
//!
//! Tweens never cancel each other. A [`Tweener`] steps its tweens in start
//! order, so when two tweens drive the same field the newest one's value is
//! the one left in the record at the end of a frame.

use std::marker::PhantomData;
use std::time::Duration;

use crate::easing::{Easing, EasingFn};

/// A numeric field of an animatable record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A record whose numeric fields can be driven by a tween
pub trait Animatable {
    fn get(&self, axis: Axis) -> f64;
    fn set(&mut self, axis: Axis, value: f64);
}

/// Whether a tween still has frames to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenState {
    Running,
    Finished,
}

#[derive(Debug, Clone, Copy)]
struct Track {
    axis: Axis,
    start: f64,
    end: f64,
}

/// A single time-bounded interpolation over fields of a `T`
#[derive(Debug, Clone)]
pub struct Tween<T> {
    tracks: Vec<Track>,
    duration: Duration,
    ease: EasingFn,
    started_at: Option<Duration>,
    _target: PhantomData<fn(&mut T)>,
}

impl<T: Animatable> Tween<T> {
    /// Build a tween from the current state of `target` towards `destination`
    pub fn to(target: &T, destination: &[(Axis, f64)], duration: Duration, ease: Easing) -> Self {
        Self::with_fn(target, destination, duration, ease.function())
    }

    /// Same as [`Tween::to`] with an arbitrary easing function
    pub fn with_fn(
        target: &T,
        destination: &[(Axis, f64)],
        duration: Duration,
        ease: EasingFn,
    ) -> Self {
        let tracks = destination
            .iter()
            .map(|&(axis, end)| Track {
                axis,
                start: target.get(axis),
                end,
            })
            .collect();

        Self {
            tracks,
            duration,
            ease,
            started_at: None,
            _target: PhantomData,
        }
    }

    /// Normalized linear progress at `now`, in [0, 1]
    ///
    /// Before the first step the tween has not started and reports 0.
    pub fn progress(&self, now: Duration) -> f32 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }

    /// Write the interpolated values for time `now` into `target`
    pub fn step(&mut self, target: &mut T, now: Duration) -> TweenState {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        let progress = self.progress(now);
        let eased = f64::from((self.ease)(progress));

        for track in &self.tracks {
            let value = if progress >= 1.0 {
                track.end
            } else {
                track.start + (track.end - track.start) * eased
            };
            target.set(track.axis, value);
        }

        if progress >= 1.0 {
            TweenState::Finished
        } else {
            TweenState::Running
        }
    }
}

/// Runs every active tween for one record
#[derive(Debug)]
pub struct Tweener<T> {
    active: Vec<Tween<T>>,
}

impl<T: Animatable> Tweener<T> {
    pub fn new() -> Self {
        Self { active: Vec::new() }
    }

    pub fn start(&mut self, tween: Tween<T>) {
        tracing::debug!(
            tracks = tween.tracks.len(),
            duration_ms = tween.duration.as_millis() as u64,
            running = self.active.len(),
            "tween started"
        );
        self.active.push(tween);
    }

    /// Step all active tweens in start order and drop the finished ones
    pub fn tick(&mut self, target: &mut T, now: Duration) {
        let before = self.active.len();
        self.active
            .retain_mut(|tween| tween.step(target, now) == TweenState::Running);

        let finished = before - self.active.len();
        if finished > 0 {
            tracing::debug!(finished, running = self.active.len(), "tweens completed");
        }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl<T: Animatable> Default for Tweener<T> {
    fn default() -> Self {
        Self::new()
    }
}
