//! Property adapters for a sprite-like struct.
//!
//! Each adapter stores its strongly typed sprite handle inside the reader and
//! writer closures; the operation's target id is only used for filtering.

use std::cell::RefCell;
use std::rc::Rc;

use tweenline_core::{Lerp, OperationKind, PropertyOperation, TargetId, TweenSpec};

pub const MOVE: OperationKind = OperationKind::Named("move");
pub const FADE: OperationKind = OperationKind::Named("fade");

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteState {
    pub position: [f32; 2],
    pub opacity: f32,
}

/// Shared handle to a sprite's animatable state.
#[derive(Debug, Clone)]
pub struct Sprite {
    state: Rc<RefCell<SpriteState>>,
}

impl Sprite {
    pub fn new(position: [f32; 2], opacity: f32) -> Self {
        Self {
            state: Rc::new(RefCell::new(SpriteState { position, opacity })),
        }
    }

    pub fn id(&self) -> TargetId {
        TargetId::of_rc(&self.state)
    }

    pub fn snapshot(&self) -> SpriteState {
        *self.state.borrow()
    }

    pub fn position(&self) -> [f32; 2] {
        self.state.borrow().position
    }

    pub fn opacity(&self) -> f32 {
        self.state.borrow().opacity
    }

    pub fn set_position(&self, position: [f32; 2]) {
        self.state.borrow_mut().position = position;
    }

    /// Tween the position to an absolute point.
    pub fn move_to(&self, to: [f32; 2], spec: TweenSpec) -> PropertyOperation<[f32; 2]> {
        let (read, write) = (self.clone(), self.clone());
        PropertyOperation::lerp(
            move || read.position(),
            move |position| write.set_position(position),
            to,
            spec,
        )
        .with_kind(MOVE)
        .with_target(self.id())
    }

    /// Tween the position by an offset from wherever the sprite is when the
    /// operation starts.
    pub fn move_by(&self, offset: [f32; 2], spec: TweenSpec) -> PropertyOperation<[f32; 2]> {
        let (read, write) = (self.clone(), self.clone());
        PropertyOperation::relative(
            move || read.position(),
            move |position| write.set_position(position),
            |from: &[f32; 2], to: &[f32; 2], t| from.lerp(to, t),
            move |start: &[f32; 2]| [start[0] + offset[0], start[1] + offset[1]],
            spec,
        )
        .with_kind(MOVE)
        .with_target(self.id())
    }

    /// Tween opacity, clamped to `[0, 1]` so overshooting curves stay valid.
    pub fn fade_to(&self, opacity: f32, spec: TweenSpec) -> PropertyOperation<f32> {
        let (read, write) = (self.clone(), self.clone());
        PropertyOperation::new(
            move || read.opacity(),
            move |value: f32| write.state.borrow_mut().opacity = value.clamp(0.0, 1.0),
            |from: &f32, to: &f32, t| from + (to - from) * t,
            opacity,
            spec,
        )
        .with_kind(FADE)
        .with_target(self.id())
    }
}
