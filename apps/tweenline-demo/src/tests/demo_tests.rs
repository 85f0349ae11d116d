use super::*;

use tweenline_testing::{assert_close, ExecutorTestRule};

#[test]
fn choreography_ends_faded_out_at_the_hop_position() {
    let _ = env_logger::try_init();
    let executor = Executor::labeled("demo");
    let sprite = Sprite::new([0.0, 0.0], 0.0);
    choreograph(&executor, &sprite);

    let frames = run(&executor, &sprite, 0);
    assert!(frames < MAX_FRAMES, "demo never went idle");
    assert!(executor.is_empty());
    assert_eq!(sprite.position(), [120.0, -40.0]);
    assert_eq!(sprite.opacity(), 0.0);
}

#[test]
fn cancelling_moves_reaches_into_the_nested_intro() {
    let executor = Executor::new();
    let sprite = Sprite::new([5.0, 5.0], 0.0);
    choreograph(&executor, &sprite);

    assert_eq!(cancel_moves(&executor, &sprite), 2);
    run(&executor, &sprite, 0);
    assert_eq!(sprite.position(), [5.0, 5.0]);
}

#[test]
fn fade_clamps_overshooting_curves() {
    let sprite = Sprite::new([0.0, 0.0], 1.0);
    let mut rule = ExecutorTestRule::new().with_frame_time(0.05);
    rule.add(OperationRef::new(
        sprite.fade_to(0.0, TweenSpec::tween(1.0, Easing::InBack)),
    ));
    for _ in 0..5 {
        rule.advance_frame();
        assert!(sprite.opacity() <= 1.0);
    }
    rule.pump_until_idle();
    assert_close(sprite.opacity(), 0.0);
}

#[test]
fn adapters_carry_kind_and_target() {
    let sprite = Sprite::new([0.0, 0.0], 0.0);
    let other = Sprite::new([0.0, 0.0], 0.0);
    let executor = Executor::new();
    executor.add(OperationRef::new(sprite.move_to([1.0, 1.0], TweenSpec::default())));
    executor.add(OperationRef::new(sprite.fade_to(1.0, TweenSpec::default())));
    executor.add(OperationRef::new(other.move_to([1.0, 1.0], TweenSpec::default())));

    assert_eq!(cancel_moves(&executor, &sprite), 1);
    assert_eq!(executor.remove_matching(&Filter::for_kind(sprite::FADE)), 1);
    assert_eq!(executor.operations()[0].target(), Some(other.id()));
}
