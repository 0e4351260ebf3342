//! Sprite-sheet keyframe animation component.
//!
//! An [`Animation`] owns an ordered list of [`Keyframe`]s and advances through
//! them on the fixed simulation timestep, while the renderer samples it any
//! number of times per frame with a `[0, 1]` blend factor. Frame index,
//! opacity and scale are all [`Interpolated`](crate::interpolated::Interpolated)
//! quantities, so a slow render still sees smooth motion and a fast render
//! never sees the simulation mid-write.
//!
//! Definitions are parsed from JSON records (see
//! [`AnimationStore`](crate::resources::animationstore::AnimationStore)).
//! Missing or malformed data degrades to a degenerate static keyframe; it is
//! never an error.

use std::collections::BTreeSet;
use std::sync::Arc;

use bevy_ecs::prelude::Component;
use log::warn;
use raylib::prelude::{Rectangle, Vector2};
use serde::Deserialize;
use serde_json::Value;

use crate::interpolated::Interpolated;
use crate::resources::worldtime::TIMESTEP_MS;

/// Raw frame record as authored in the animation JSON.
///
/// Every field is optional; [`Keyframe::from_record`] applies the resolution
/// rules. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
struct FrameRecord {
    /// Texture key of the sheet this frame draws from.
    tex: Option<String>,
    /// Cell within the sheet.
    rect: Option<[f32; 4]>,
    /// Pivot point in cell-local pixels.
    origin: Option<[f32; 2]>,
    /// Attachment ("head") point in cell-local pixels.
    head: Option<[f32; 2]>,
    /// Hit-test rectangle corners.
    lt: Option<[f32; 2]>,
    rb: Option<[f32; 2]>,
    /// Hold duration in milliseconds.
    delay: Option<i64>,
    /// Opacity hints: value at frame start / frame end, 0..255.
    a0: Option<i64>,
    a1: Option<i64>,
    /// Scale hints: percent at frame start / frame end.
    z0: Option<i64>,
    z1: Option<i64>,
}

fn point(p: Option<[f32; 2]>) -> Vector2 {
    let [x, y] = p.unwrap_or([0.0, 0.0]);
    Vector2 { x, y }
}

fn cell_rect(r: Option<[f32; 4]>) -> Rectangle {
    let [x, y, width, height] = r.unwrap_or([0.0; 4]);
    Rectangle {
        x,
        y,
        width,
        height,
    }
}

fn corner_rect(lt: Option<[f32; 2]>, rb: Option<[f32; 2]>) -> Rectangle {
    let lt = point(lt);
    let rb = point(rb);
    Rectangle {
        x: lt.x,
        y: lt.y,
        width: rb.x - lt.x,
        height: rb.y - lt.y,
    }
}

fn clamp_u8(v: i64) -> u8 {
    v.clamp(0, u8::MAX as i64) as u8
}

fn clamp_u16(v: i64) -> u16 {
    v.clamp(0, u16::MAX as i64) as u16
}

/// One still image of an animation plus its timing and modifier ranges.
///
/// Immutable after construction; all derived ranges are resolved exactly once
/// here and shared read-only between every [`Animation`] cloned from the same
/// definition.
#[derive(Debug, Clone)]
pub struct Keyframe {
    tex_key: Option<Arc<str>>,
    region: Rectangle,
    origin: Vector2,
    head: Vector2,
    bounds: Rectangle,
    hold_ms: u16,
    opacity_range: (u8, u8),
    scale_range: (u16, u16),
}

impl Default for Keyframe {
    /// The degenerate keyframe: zero-size, zero-duration, fully transparent.
    fn default() -> Self {
        Keyframe {
            tex_key: None,
            region: Rectangle {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            },
            origin: Vector2 { x: 0.0, y: 0.0 },
            head: Vector2 { x: 0.0, y: 0.0 },
            bounds: Rectangle {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            },
            hold_ms: 0,
            opacity_range: (0, 0),
            scale_range: (0, 0),
        }
    }
}

impl Keyframe {
    /// Build a keyframe from a JSON frame record.
    ///
    /// Construction is total: absent optional keys take their defaults, and a
    /// record that does not decode at all is treated as empty. A raw `delay`
    /// of 0 is normalized to 100 ms. Opacity resolves from the `a0`/`a1`
    /// hints (both used as-is; a lone hint mirrors the other endpoint around
    /// 255; neither means fully opaque), scale from `z0`/`z1` with a 100%
    /// baseline.
    pub fn from_record(src: &Value) -> Self {
        let record: FrameRecord = match serde_json::from_value(src.clone()) {
            Ok(record) => record,
            Err(e) => {
                warn!("malformed frame record, using defaults: {}", e);
                FrameRecord::default()
            }
        };

        let mut hold_ms = clamp_u16(record.delay.unwrap_or(0));
        if hold_ms == 0 {
            hold_ms = 100;
        }

        let opacity_range = match (record.a0, record.a1) {
            (Some(a0), Some(a1)) => (clamp_u8(a0), clamp_u8(a1)),
            (Some(a0), None) => {
                let a0 = clamp_u8(a0);
                (a0, 255 - a0)
            }
            (None, Some(a1)) => {
                let a1 = clamp_u8(a1);
                (255 - a1, a1)
            }
            (None, None) => (255, 255),
        };

        let scale_range = match (record.z0, record.z1) {
            (Some(z0), Some(z1)) => (clamp_u16(z0), clamp_u16(z1)),
            (Some(z0), None) => (clamp_u16(z0), 0),
            (None, Some(z1)) => (100, clamp_u16(z1)),
            (None, None) => (100, 100),
        };

        Keyframe {
            tex_key: record.tex.map(Into::into),
            region: cell_rect(record.rect),
            origin: point(record.origin),
            head: point(record.head),
            bounds: corner_rect(record.lt, record.rb),
            hold_ms,
            opacity_range,
            scale_range,
        }
    }

    /// Texture key of the sheet this frame draws from, if any.
    pub fn tex_key(&self) -> Option<&str> {
        self.tex_key.as_deref()
    }

    /// Source cell within the sheet.
    pub fn region(&self) -> Rectangle {
        self.region
    }

    /// Pivot point in cell-local pixels.
    pub fn origin(&self) -> Vector2 {
        self.origin
    }

    /// Cell size in pixels.
    pub fn dimensions(&self) -> Vector2 {
        Vector2 {
            x: self.region.width,
            y: self.region.height,
        }
    }

    /// Attachment point in cell-local pixels.
    pub fn head(&self) -> Vector2 {
        self.head
    }

    /// Hit-test rectangle in cell-local pixels.
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Display duration in milliseconds.
    pub fn hold_ms(&self) -> u16 {
        self.hold_ms
    }

    /// Opacity at frame start and end, 0..255.
    pub fn opacity_range(&self) -> (u8, u8) {
        self.opacity_range
    }

    /// Scale percent at frame start and end.
    pub fn scale_range(&self) -> (u16, u16) {
        self.scale_range
    }

    /// Opacity change over `timestep` milliseconds of holding this frame.
    pub fn opacity_step(&self, timestep: u16) -> f32 {
        if self.hold_ms == 0 {
            return 0.0;
        }
        timestep as f32 * (self.opacity_range.1 as f32 - self.opacity_range.0 as f32)
            / self.hold_ms as f32
    }

    /// Scale change (percent) over `timestep` milliseconds of holding this frame.
    pub fn scale_step(&self, timestep: u16) -> f32 {
        if self.hold_ms == 0 {
            return 0.0;
        }
        timestep as f32 * (self.scale_range.1 as f32 - self.scale_range.0 as f32)
            / self.hold_ms as f32
    }
}

/// What to draw right now: a keyframe plus its interpolated modifiers.
#[derive(Debug, Clone, Copy)]
pub struct FrameSample<'a> {
    pub keyframe: &'a Keyframe,
    /// Interpolated opacity, normalized to 0..1.
    pub opacity: f32,
    /// Interpolated uniform scale factor, 1.0 = authored size.
    pub scale: f32,
}

impl FrameSample<'_> {
    /// True when the modifiers would not change the drawn image. The render
    /// pass skips tint/scale compositing entirely in that case.
    pub fn is_neutral(&self) -> bool {
        self.opacity == 1.0 && self.scale == 1.0
    }
}

fn flag(node: &Value, key: &str) -> bool {
    match node.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(v) => v.as_i64().unwrap_or(0) != 0,
        None => false,
    }
}

fn is_image(node: &Value) -> bool {
    node.get("tex").is_some()
}

/// Playback state for one sprite animation.
///
/// Each instance is owned by exactly one entity. Cloning shares the immutable
/// keyframe data and copies the playback state, which is how one
/// [`AnimationStore`](crate::resources::animationstore::AnimationStore)
/// definition fans out to many entities.
///
/// [`update`](Animation::update) is called once per fixed simulation tick and
/// returns whether the sequence completed a loop this tick;
/// [`sample`](Animation::sample) is a pure read the renderer may call any
/// number of times between ticks.
#[derive(Debug, Clone, Component)]
pub struct Animation {
    frames: Arc<[Keyframe]>,
    multi_frame: bool,
    zigzag: bool,
    frame: Interpolated<i16>,
    opacity: Interpolated<f32>,
    scale: Interpolated<f32>,
    remaining_ms: u16,
    step: i16,
}

impl Default for Animation {
    /// A static animation holding a single degenerate keyframe.
    fn default() -> Self {
        Animation::from_frames(Vec::new(), false)
    }
}

impl Animation {
    /// Build an animation from a JSON node.
    ///
    /// An image node (one with a `tex` key) becomes a single-frame static
    /// animation. A container node contributes one frame per child whose key
    /// parses as a non-negative integer and whose value is an image node, in
    /// ascending numeric order. Anything else yields the degenerate fallback.
    /// `zigzag` is read as a bool or nonzero integer, default off.
    pub fn from_value(src: &Value) -> Self {
        let mut frames: Vec<Keyframe> = Vec::new();
        if is_image(src) {
            frames.push(Keyframe::from_record(src));
        } else if let Some(children) = src.as_object() {
            let mut ids: BTreeSet<i16> = BTreeSet::new();
            for (name, child) in children {
                if is_image(child) {
                    if let Ok(id) = name.parse::<i16>() {
                        if id >= 0 {
                            ids.insert(id);
                        }
                    }
                }
            }
            for id in &ids {
                frames.push(Keyframe::from_record(&children[&id.to_string()]));
            }
        }

        if frames.is_empty() {
            warn!("animation source has no frames, using a degenerate keyframe");
        }

        Self::from_frames(frames, flag(src, "zigzag"))
    }

    /// Build an animation from already-constructed keyframes.
    ///
    /// An empty list falls back to a single degenerate keyframe, so the frame
    /// sequence is never empty.
    pub fn from_frames(frames: Vec<Keyframe>, zigzag: bool) -> Self {
        let mut frames = frames;
        if frames.is_empty() {
            frames.push(Keyframe::default());
        }
        let multi_frame = frames.len() > 1;

        let mut animation = Animation {
            frames: frames.into(),
            multi_frame,
            zigzag,
            frame: Interpolated::new(0),
            opacity: Interpolated::new(0.0),
            scale: Interpolated::new(0.0),
            remaining_ms: 0,
            step: 1,
        };
        animation.reset();
        animation
    }

    /// Restart playback from the first keyframe, forward.
    pub fn reset(&mut self) {
        let hold_ms = self.frames[0].hold_ms();
        let opacity = self.frames[0].opacity_range().0 as f32;
        let scale = self.frames[0].scale_range().0 as f32;

        self.frame.force_set(0);
        self.opacity.force_set(opacity);
        self.scale.force_set(scale);
        self.remaining_ms = hold_ms;
        self.step = 1;
    }

    /// Advance one fixed simulation tick ([`TIMESTEP_MS`]).
    pub fn update(&mut self) -> bool {
        self.update_by(TIMESTEP_MS)
    }

    /// Advance by an explicit timestep in milliseconds.
    ///
    /// Returns true when the sequence finished a loop this tick: for plain
    /// playback that is the wrap from the last frame back to the first, for
    /// zigzag it is the bounce off frame zero. Static (single-keyframe)
    /// animations never advance and always return false.
    pub fn update_by(&mut self, timestep: u16) -> bool {
        if !self.multi_frame {
            return false;
        }

        // The pending index is the authoritative playhead; the committed one
        // trails it by at most one tick for render blending.
        let playhead = self.frame.pending();
        let held = &self.frames[playhead as usize];
        let opacity_step = held.opacity_step(timestep);
        let scale_step = held.scale_step(timestep);

        self.opacity.shift(opacity_step);
        if self.opacity.pending() < 0.0 {
            self.opacity.force_set(0.0);
        } else if self.opacity.pending() > 255.0 {
            self.opacity.force_set(255.0);
        }

        self.scale.shift(scale_step);
        if self.scale.pending() < 0.0 {
            self.scale.force_set(0.0);
        }

        if timestep < self.remaining_ms {
            self.frame.commit();
            self.remaining_ms -= timestep;
            return false;
        }

        let last = (self.frames.len() - 1) as i16;
        let (next, ended) = if self.zigzag {
            if self.step == 1 && playhead == last {
                self.step = -1;
                (playhead + self.step, false)
            } else if self.step == -1 && playhead == 0 {
                self.step = 1;
                (playhead + self.step, true)
            } else {
                (playhead + self.step, false)
            }
        } else if playhead == last {
            (0, true)
        } else {
            (playhead + 1, false)
        };

        let overshoot = timestep - self.remaining_ms;
        let threshold = overshoot as f32 / timestep as f32;
        self.frame.retarget(next, threshold);

        let entered = &self.frames[next as usize];
        let hold_ms = entered.hold_ms();
        let opacity = entered.opacity_range().0 as f32;
        let scale = entered.scale_range().0 as f32;

        // Carry the overshoot into the new frame's budget; a frame shorter
        // than the overshoot keeps its full hold (one transition per tick).
        self.remaining_ms = if hold_ms >= overshoot {
            hold_ms - overshoot
        } else {
            hold_ms
        };

        // Modifiers restart at the new frame's authored start values instead
        // of gliding on from wherever the previous frame left them.
        self.opacity.force_set(opacity);
        self.scale.force_set(scale);

        ended
    }

    /// Frame, opacity and scale to present for a render blend factor.
    ///
    /// Pure read; safe to call repeatedly between ticks.
    pub fn sample(&self, alpha: f32) -> FrameSample<'_> {
        FrameSample {
            keyframe: &self.frames[self.frame.get(alpha) as usize],
            opacity: self.opacity.get(alpha) / 255.0,
            scale: self.scale.get(alpha) / 100.0,
        }
    }

    /// The keyframe as of the last completed tick.
    ///
    /// Logical queries (hit-testing, attachment) go through this, never the
    /// blended frame the renderer shows.
    pub fn keyframe(&self) -> &Keyframe {
        &self.frames[self.frame.committed() as usize]
    }

    /// Committed frame index.
    pub fn frame_index(&self) -> i16 {
        self.frame.committed()
    }

    /// Milliseconds left before the playhead's keyframe advances.
    pub fn remaining_ms(&self) -> u16 {
        self.remaining_ms
    }

    /// Number of keyframes in the sequence. Always at least 1.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Pixel origin of the committed keyframe.
    pub fn origin(&self) -> Vector2 {
        self.keyframe().origin()
    }

    /// Pixel size of the committed keyframe.
    pub fn dimensions(&self) -> Vector2 {
        self.keyframe().dimensions()
    }

    /// Attachment point of the committed keyframe.
    pub fn head(&self) -> Vector2 {
        self.keyframe().head()
    }

    /// Hit-test rectangle of the committed keyframe.
    pub fn bounds(&self) -> Rectangle {
        self.keyframe().bounds()
    }

    /// Hold duration of a frame, or 0 when the index is out of range.
    pub fn delay_of(&self, frame_id: i16) -> u16 {
        if frame_id < 0 {
            return 0;
        }
        self.frames
            .get(frame_id as usize)
            .map(Keyframe::hold_ms)
            .unwrap_or(0)
    }

    /// Total hold duration of the frames strictly before `frame_id`.
    pub fn delay_until(&self, frame_id: i16) -> u16 {
        let end = (frame_id.max(0) as usize).min(self.frames.len());
        self.frames[..end]
            .iter()
            .map(Keyframe::hold_ms)
            .fold(0u16, u16::saturating_add)
    }
}
