pub mod sprite;

use tweenline_core::{Easing, Executor, Filter, LambdaOperation, OperationRef, Sequence, TweenSpec};

use crate::sprite::Sprite;

pub const FRAME_TIME: f32 = 1.0 / 60.0;

/// Frames the demo may run before giving up on reaching idle.
pub const MAX_FRAMES: u32 = 60 * 30;

/// Choreography: fade in, glide right, then hop up relative to wherever the
/// glide ended. The fade-out is queued behind that intro sequence, so it
/// begins as soon as the hop is handed over. A pulse runs alongside.
pub fn choreograph(executor: &Executor, sprite: &Sprite) -> OperationRef {
    let intro = Sequence::new()
        .then(OperationRef::new(
            sprite.fade_to(1.0, TweenSpec::tween(0.4, Easing::OutQuad)),
        ))
        .then(OperationRef::new(sprite.move_to(
            [120.0, 0.0],
            TweenSpec::tween(0.8, Easing::InOutCubic),
        )))
        .then(OperationRef::new(sprite.move_by(
            [0.0, -40.0],
            TweenSpec::tween(0.5, Easing::OutBounce).with_delay(0.1),
        )));

    let finale = Sequence::new()
        .then(OperationRef::new(intro))
        .then(OperationRef::new(
            sprite.fade_to(0.0, TweenSpec::tween(0.3, Easing::InBack)),
        ))
        .then(OperationRef::new(LambdaOperation::once(|| {
            log::info!("choreography finished");
        })));

    let finale = OperationRef::new(finale);
    executor.add(&finale);

    let id = sprite.id();
    executor.add(OperationRef::new(LambdaOperation::over(
        TweenSpec::tween(1.5, Easing::InOutSine),
        move |t| log::debug!("pulse on {id:?}: {t:.2}"),
    )));
    finale
}

/// Drive `executor` with a fixed frame clock until it is idle, reporting the
/// sprite every `report_every` frames. Returns the number of frames run.
pub fn run(executor: &Executor, sprite: &Sprite, report_every: u32) -> u32 {
    let mut frame = 0;
    while !executor.is_empty() && frame < MAX_FRAMES {
        executor.tick(FRAME_TIME);
        frame += 1;
        if report_every > 0 && frame % report_every == 0 {
            let state = sprite.snapshot();
            log::info!(
                "frame {frame:4}: position ({:7.2}, {:7.2}) opacity {:.2} [{} active]",
                state.position[0],
                state.position[1],
                state.opacity,
                executor.len()
            );
        }
    }
    if !executor.is_empty() {
        log::warn!("gave up after {frame} frames with {} operations left", executor.len());
    }
    frame
}

/// Cancel every move on `sprite`, wherever it is queued.
pub fn cancel_moves(executor: &Executor, sprite: &Sprite) -> usize {
    let moves = Filter::for_kind(sprite::MOVE).with_target(sprite.id());
    executor.remove_all_matching_recursive(&moves)
}

#[cfg(test)]
#[path = "tests/demo_tests.rs"]
mod tests;
