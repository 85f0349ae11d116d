use tweenline_core::Executor;
use tweenline_demo::sprite::Sprite;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Tweenline Demo ===");
    println!("A sprite fades in, glides, hops and fades out on a 60 Hz clock.");
    println!("Set RUST_LOG=debug to see sequence hand-overs and the pulse.");
    println!();

    let executor = Executor::shared();
    let sprite = Sprite::new([0.0, 0.0], 0.0);
    tweenline_demo::choreograph(&executor, &sprite);

    let frames = tweenline_demo::run(&executor, &sprite, 15);
    let state = sprite.snapshot();
    println!();
    println!(
        "Done after {frames} frames: position ({:.2}, {:.2}), opacity {:.2}",
        state.position[0], state.position[1], state.opacity
    );
    Executor::reset_shared();
}
