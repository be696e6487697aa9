use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::counter::{CounterAnimation, Frame};
use crate::surface::ElementId;

/// In-flight counter animations, at most one per element.
///
/// Starting an animation on an element that already has one cancels the
/// old one. Each [`tick`](Animator::tick) samples every in-flight animation
/// and drops the ones that have reached their target.
#[derive(Debug, Clone)]
pub struct Animator {
    duration: Duration,
    in_flight: BTreeMap<ElementId, CounterAnimation>,
}

impl Animator {
    /// Creates an empty registry whose animations last `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            in_flight: BTreeMap::new(),
        }
    }

    /// The window used for newly started animations.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Starts animating `id` from `from` to `to`.
    ///
    /// Returns the animation that was cancelled to make room, if any.
    pub fn start(
        &mut self,
        id: ElementId,
        from: i64,
        to: i64,
        now: Instant,
    ) -> Option<CounterAnimation> {
        let animation = CounterAnimation::new(from, to, self.duration, now);
        let previous = self.in_flight.insert(id.clone(), animation);
        match &previous {
            Some(old) => tracing::debug!(
                element = %id,
                cancelled_target = old.target(),
                from,
                to,
                "counter animation superseded"
            ),
            None => tracing::trace!(element = %id, from, to, "counter animation started"),
        }
        previous
    }

    /// Cancels the animation on `id`, leaving whatever frame was last shown.
    pub fn cancel(&mut self, id: &ElementId) -> Option<CounterAnimation> {
        self.in_flight.remove(id)
    }

    /// Cancels every in-flight animation.
    pub fn cancel_all(&mut self) {
        self.in_flight.clear();
    }

    /// Returns the in-flight animation for `id`.
    pub fn get(&self, id: &ElementId) -> Option<&CounterAnimation> {
        self.in_flight.get(id)
    }

    /// True if `id` currently has an animation in flight.
    pub fn is_animating(&self, id: &ElementId) -> bool {
        self.in_flight.contains_key(id)
    }

    /// Number of in-flight animations.
    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    /// True when nothing is animating.
    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Samples every in-flight animation at `now`.
    ///
    /// Frames come back ordered by element id. Animations whose frame is
    /// final are removed after being reported.
    pub fn tick(&mut self, now: Instant) -> Vec<(ElementId, Frame)> {
        let frames: Vec<(ElementId, Frame)> = self
            .in_flight
            .iter()
            .map(|(id, animation)| (id.clone(), animation.sample(now)))
            .collect();
        self.in_flight
            .retain(|id, _| !frames.iter().any(|(done_id, f)| f.done && done_id == id));
        frames
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(super::DEFAULT_ANIMATION_DURATION)
    }
}
