//! Camera2D - pan/zoom transform for the network scene
//!
//! The transform maps scene coordinates to screen coordinates as
//! `screen = viewport.min + (x, y) + scene * k`, so the identity transform
//! shows the scene exactly as laid out (the layout is centered on the
//! viewport center).
//!
//! # EGUI-RULES Compliance
//! - Camera state is UI-only (not dataset data)
//! - No callbacks - state is polled each frame
//! - Call `update(dt)` at start of frame, then use transforms for rendering

use super::animation::{lerp, Tween};
use egui::{Pos2, Rect, Vec2};
use serde::Deserialize;

/// Zoom behaviour settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Duration of the animated reset, seconds
    pub reset_duration: f32,
    /// Scroll points to zoom exponent
    pub scroll_sensitivity: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.3,
            max_scale: 3.0,
            reset_duration: 0.75,
            scroll_sensitivity: 0.002,
        }
    }
}

// =============================================================================
// ZOOM TRANSFORM
// =============================================================================

/// Affine pan/zoom transform: translate by `(x, y)` then scale by `k`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub x: f32,
    pub y: f32,
    pub k: f32,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform {
        x: 0.0,
        y: 0.0,
        k: 1.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Scene point -> viewport-relative point
    pub fn apply(&self, point: Pos2) -> Pos2 {
        Pos2::new(self.x + point.x * self.k, self.y + point.y * self.k)
    }

    /// Viewport-relative point -> scene point
    pub fn invert(&self, point: Pos2) -> Pos2 {
        Pos2::new((point.x - self.x) / self.k, (point.y - self.y) / self.k)
    }

    /// Interpolate towards `to`
    pub fn lerp(&self, to: &ZoomTransform, t: f32) -> ZoomTransform {
        ZoomTransform {
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
            k: lerp(self.k, to.k, t),
        }
    }
}

// =============================================================================
// CAMERA
// =============================================================================

#[derive(Debug, Clone)]
struct ResetAnimation {
    from: ZoomTransform,
    tween: Tween,
}

/// 2D camera over the network scene
#[derive(Debug, Clone)]
pub struct Camera2D {
    transform: ZoomTransform,
    reset: Option<ResetAnimation>,
    pub config: ZoomConfig,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl Camera2D {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            transform: ZoomTransform::IDENTITY,
            reset: None,
            config,
        }
    }

    /// Current transform
    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    pub fn zoom(&self) -> f32 {
        self.transform.k
    }

    // =========================================================================
    // ANIMATION UPDATE
    // =========================================================================

    /// Advance the reset animation. Returns true while animating.
    pub fn update(&mut self, dt: f32) -> bool {
        let Some(anim) = self.reset.as_mut() else {
            return false;
        };
        anim.tween.tick(dt);
        let t = anim.tween.value();
        self.transform = anim.from.lerp(&ZoomTransform::IDENTITY, t);
        if anim.tween.is_finished() {
            self.transform = ZoomTransform::IDENTITY;
            self.reset = None;
            return false;
        }
        true
    }

    pub fn is_animating(&self) -> bool {
        self.reset.is_some()
    }

    // =========================================================================
    // CAMERA CONTROLS
    // =========================================================================

    /// Pan by a screen-space delta. Cancels a running reset.
    pub fn pan(&mut self, screen_delta: Vec2) {
        self.reset = None;
        self.transform.x += screen_delta.x;
        self.transform.y += screen_delta.y;
    }

    /// Zoom by `factor`, keeping the scene point under `screen_pos` fixed.
    /// Scale is clamped to the configured bounds.
    pub fn zoom_at(&mut self, factor: f32, screen_pos: Pos2, screen_rect: Rect) {
        self.reset = None;
        let old_k = self.transform.k;
        let new_k = (old_k * factor).clamp(self.config.min_scale, self.config.max_scale);
        if (new_k - old_k).abs() < f32::EPSILON {
            return;
        }

        let local = (screen_pos - screen_rect.min).to_pos2();
        let anchor = self.transform.invert(local);
        self.transform.k = new_k;
        self.transform.x = local.x - anchor.x * new_k;
        self.transform.y = local.y - anchor.y * new_k;
    }

    /// Animate back to identity over the configured duration
    pub fn reset_animated(&mut self) {
        if self.transform.is_identity() {
            self.reset = None;
            return;
        }
        self.reset = Some(ResetAnimation {
            from: self.transform,
            tween: Tween::new(self.config.reset_duration),
        });
    }

    /// Jump to identity (used when the scene is rebuilt)
    pub fn snap_identity(&mut self) {
        self.reset = None;
        self.transform = ZoomTransform::IDENTITY;
    }

    // =========================================================================
    // COORDINATE TRANSFORMS
    // =========================================================================

    /// Transform scene position to screen position
    pub fn world_to_screen(&self, world_pos: Pos2, screen_rect: Rect) -> Pos2 {
        screen_rect.min + self.transform.apply(world_pos).to_vec2()
    }

    /// Transform screen position to scene position
    pub fn screen_to_world(&self, screen_pos: Pos2, screen_rect: Rect) -> Pos2 {
        self.transform
            .invert((screen_pos - screen_rect.min).to_pos2())
    }
}
