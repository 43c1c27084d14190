//! Pose input plumbing
//!
//! The pose estimator runs on its own schedule. It publishes the latest
//! sample per player slot into a [`PoseFeed`]; the simulation copies a
//! snapshot at the start of every tick and never waits for fresh data.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::sim::{PoseSample, TickInput};

/// Latest pose sample per slot, shared between an inference thread and the
/// simulation loop
#[derive(Debug, Clone, Default)]
pub struct PoseFeed {
    latest: Arc<Mutex<[Option<PoseSample>; 2]>>,
}

impl PoseFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both slots at once
    pub fn publish(&self, samples: [Option<PoseSample>; 2]) {
        *self.lock() = samples;
    }

    /// Route a raw list of detected poses to slots, then publish
    pub fn publish_poses(&self, poses: &[PoseSample], field_width: f32) {
        self.publish(assign_poses(poses, field_width));
    }

    /// Copy of the most recent samples
    pub fn snapshot(&self) -> [Option<PoseSample>; 2] {
        *self.lock()
    }

    /// Tick input built from the current snapshot
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            samples: self.snapshot(),
            reset: false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, [Option<PoseSample>; 2]> {
        // The guarded value is plain data, so a panicked writer can't leave
        // it half-written
        self.latest.lock().unwrap_or_else(|poisoned| {
            log::warn!("Pose feed lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

/// Assign detected poses to player slots by horizontal position
///
/// Poses are sorted left to right. The left-most goes to player one if it
/// is on the left half; the next goes to player two if it is on the right
/// half. A lone pose on the right half belongs to player two. Anything
/// else leaves the slot empty.
pub fn assign_poses(poses: &[PoseSample], field_width: f32) -> [Option<PoseSample>; 2] {
    let mut sorted = poses.to_vec();
    sorted.sort_by(|a, b| a.position.x.total_cmp(&b.position.x));

    let mid = field_width / 2.0;
    let mut slots = [None, None];

    if let Some(&first) = sorted.first() {
        if first.position.x < mid {
            slots[0] = Some(first);
        } else if sorted.len() == 1 {
            slots[1] = Some(first);
        }
    }
    if let Some(&second) = sorted.get(1) {
        if second.position.x >= mid {
            slots[1] = Some(second);
        }
    }

    slots
}
