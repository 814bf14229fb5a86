use super::*;

use crate::AnimationDriver;
use spot_core::Runtime;
use std::cell::Cell;

const FRAME_NANOS: u64 = 16_666_667;

fn run_frames(runtime: &Runtime, time: &mut u64, max_frames: usize) -> usize {
    let mut frames = 0;
    while runtime.needs_frame() && frames < max_frames {
        *time += FRAME_NANOS;
        runtime.drain_frame_callbacks(*time);
        frames += 1;
    }
    frames
}

#[test]
fn tween_interpolates_over_time() {
    let runtime = Runtime::default();
    let anim = Animatable::new(0.0f32, runtime.handle());
    let mut time = 0;

    anim.animate_to(1.0, AnimationType::Tween(AnimationSpec::linear(100)));
    assert!(anim.is_running());
    assert_eq!(anim.value(), 0.0);

    let mut saw_midpoint = false;
    for _ in 0..32 {
        if !runtime.needs_frame() {
            break;
        }
        time += FRAME_NANOS;
        runtime.drain_frame_callbacks(time);
        let value = anim.value();
        if value > 0.0 && value < 1.0 {
            saw_midpoint = true;
        }
    }

    assert!(saw_midpoint, "animation should report intermediate values");
    assert_eq!(anim.value(), 1.0);
    assert!(!anim.is_running());
    assert!(!runtime.needs_frame());
}

#[test]
fn tween_respects_delay() {
    let runtime = Runtime::default();
    let anim = Animatable::new(0.0f32, runtime.handle());
    let mut time = 0;

    anim.animate_to(
        10.0,
        AnimationType::Tween(AnimationSpec::linear(50).with_delay(100)),
    );
    // Origin frame plus five more stays under the 100ms delay.
    for _ in 0..6 {
        time += FRAME_NANOS;
        runtime.drain_frame_callbacks(time);
    }
    assert_eq!(anim.value(), 0.0);

    run_frames(&runtime, &mut time, 32);
    assert_eq!(anim.value(), 10.0);
}

#[test]
fn spring_settles_on_target() {
    let runtime = Runtime::default();
    let anim = Animatable::new(-40.0f32, runtime.handle());
    let mut time = 0;

    anim.animate_to(0.0, AnimationType::Spring(SpringSpec::new(0.75, 400.0)));
    let frames = run_frames(&runtime, &mut time, 600);

    assert!(frames < 600, "spring should settle");
    assert_eq!(anim.value(), 0.0);
    assert!(!anim.is_running());
}

#[test]
fn spring_to_current_value_lands_immediately() {
    let runtime = Runtime::default();
    let anim = Animatable::new(0.0f32, runtime.handle());
    let mut time = 0;

    anim.animate_to(0.0, AnimationType::Spring(SpringSpec::default()));
    let frames = run_frames(&runtime, &mut time, 10);

    assert_eq!(frames, 2, "origin frame then settle");
    assert_eq!(anim.value(), 0.0);
}

#[test]
fn end_listener_runs_once_on_completion() {
    let runtime = Runtime::default();
    let mut anim = Animatable::new(0.0f32, runtime.handle());
    let ended = Rc::new(Cell::new(0));
    let mut time = 0;

    {
        let ended = Rc::clone(&ended);
        AnimationDriver::animate_to(
            &mut anim,
            5.0,
            AnimationType::Tween(AnimationSpec::linear(32)),
            Some(Box::new(move || ended.set(ended.get() + 1))),
        );
    }
    run_frames(&runtime, &mut time, 16);

    assert_eq!(ended.get(), 1);
    assert_eq!(AnimationDriver::value(&anim), 5.0);
}

#[test]
fn interrupted_animation_drops_end_listener() {
    let runtime = Runtime::default();
    let anim = Animatable::new(0.0f32, runtime.handle());
    let ended = Rc::new(Cell::new(false));
    let mut time = 0;

    {
        let ended = Rc::clone(&ended);
        anim.animate_to_then(
            5.0,
            AnimationType::Tween(AnimationSpec::linear(200)),
            Some(Box::new(move || ended.set(true))),
        );
    }
    time += FRAME_NANOS;
    runtime.drain_frame_callbacks(time);
    anim.snap_to(2.0);
    run_frames(&runtime, &mut time, 32);

    assert!(!ended.get());
    assert_eq!(anim.value(), 2.0);
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn end_listener_may_restart_the_same_animatable() {
    let runtime = Runtime::default();
    let anim = Animatable::new(0.0f32, runtime.handle());
    let mut time = 0;

    {
        let again = anim.clone();
        anim.animate_to_then(
            1.0,
            AnimationType::Tween(AnimationSpec::linear(32)),
            Some(Box::new(move || {
                again.animate_to(0.0, AnimationType::Tween(AnimationSpec::linear(32)))
            })),
        );
    }
    run_frames(&runtime, &mut time, 32);

    assert_eq!(anim.value(), 0.0);
    assert!(!anim.is_running());
}

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::Linear.transform(0.0), 0.0);
    assert_eq!(Easing::Linear.transform(0.5), 0.5);
    assert_eq!(Easing::Linear.transform(1.0), 1.0);
}

#[test]
fn easing_bounds_are_correct() {
    let easings = [
        Easing::Linear,
        Easing::FastOutSlowIn,
        Easing::FastOutLinearIn,
    ];

    for easing in easings {
        assert!(easing.transform(0.0).abs() < 0.01, "start ~0 for {easing:?}");
        assert!((easing.transform(1.0) - 1.0).abs() < 0.01, "end ~1 for {easing:?}");
        let mid = easing.transform(0.5);
        assert!(mid > 0.0 && mid < 1.0, "midpoint inside (0, 1) for {easing:?}");
    }
}

#[test]
fn animation_spec_default_has_reasonable_values() {
    let spec = AnimationSpec::default();
    assert_eq!(spec.duration_millis, 300);
    assert_eq!(spec.easing, Easing::FastOutSlowIn);
    assert_eq!(spec.delay_millis, 0);
}

#[test]
fn spring_presets_differ_where_expected() {
    assert_eq!(SpringSpec::default().damping_ratio, 1.0);
    assert!(SpringSpec::bouncy().damping_ratio < 1.0);
    assert!(SpringSpec::stiff().stiffness > SpringSpec::default().stiffness);
}
