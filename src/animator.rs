//! Sprite animation
//!
//! An [`Animator`] holds a set of named [`Animation`]s plus the one currently
//! playing. Frame advancement is time-based and happens when the current tile
//! is requested, so paused entities simply stop asking.

use crate::render::TileRef;

/// A single animation: a run of atlas tiles played at a fixed cadence.
#[derive(Debug, Clone)]
pub struct Animation {
    pub name: String,
    pub frames: Vec<TileRef>,
    /// Seconds each frame stays on screen.
    pub frame_duration: f64,
    pub looping: bool,
    /// Index of the frame currently shown; `None` before the first tick.
    current_frame: Option<usize>,
    /// Time the current frame was entered.
    change_at: Option<f64>,
}

impl Animation {
    pub fn new(name: &str, frames: Vec<TileRef>, frame_duration: f64, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frames,
            frame_duration,
            looping,
            current_frame: None,
            change_at: None,
        }
    }

    /// Reset playback to the start.
    pub fn reset(&mut self) {
        self.current_frame = None;
        self.change_at = None;
    }

    /// Tile to draw at time `now`, advancing the frame when due.
    ///
    /// A finished non-looping animation parks past its last frame and yields
    /// `None` from then on; a looping one wraps back to frame 0.
    pub fn current_tile(&mut self, now: f64) -> Option<TileRef> {
        let due = match (self.current_frame, self.change_at) {
            (None, _) | (_, None) => true,
            (Some(_), Some(at)) => now - at >= self.frame_duration,
        };

        if due {
            let next = self.current_frame.map_or(0, |i| i + 1);
            self.change_at = Some(now);

            if next >= self.frames.len() {
                if self.looping {
                    self.current_frame = Some(0);
                } else {
                    // Park past the end so the animation stays finished.
                    self.current_frame = Some(next);
                    return None;
                }
            } else {
                self.current_frame = Some(next);
            }
        }

        self.current_frame.and_then(|i| self.frames.get(i).copied())
    }
}

/// Animation set for one entity.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    /// Animation templates; playback state lives in `current`.
    pub animations: Vec<Animation>,
    current: Option<Animation>,
}

impl Animator {
    pub fn new(animations: Vec<Animation>) -> Self {
        Self {
            animations,
            current: None,
        }
    }

    /// Switch to the named animation.
    ///
    /// Re-playing the animation that is already active is a no-op unless
    /// `reset_if_current` is set. Unknown names are ignored.
    pub fn play(&mut self, name: &str, reset_if_current: bool) {
        let already_current = self.current.as_ref().is_some_and(|a| a.name == name);
        if already_current && !reset_if_current {
            return;
        }
        if let Some(template) = self.animations.iter().find(|a| a.name == name) {
            let mut animation = template.clone();
            animation.reset();
            self.current = Some(animation);
        }
    }

    /// Name of the animation currently playing, if any.
    pub fn current_name(&self) -> Option<&str> {
        self.current.as_ref().map(|a| a.name.as_str())
    }

    /// Tile to draw at time `now`. `None` when nothing plays or the current
    /// non-looping animation has finished.
    pub fn current_tile(&mut self, now: f64) -> Option<TileRef> {
        self.current.as_mut()?.current_tile(now)
    }
}
