// Host-side tests for the uniform bridge and GPU uniform packing.

use torus_core::*;

#[test]
fn time_is_always_written() {
    let bridge = UniformBridge::new(FrequencyPolicy::HoldLast);
    let mut u = UniformSet::default();
    bridge.update(&mut u, 1.25, None);
    assert_eq!(u.time, 1.25);
    bridge.update(&mut u, 2.5, Some(10.0));
    assert_eq!(u.time, 2.5);
}

#[test]
fn hold_last_keeps_previous_amplitude() {
    let bridge = UniformBridge::new(FrequencyPolicy::HoldLast);
    let mut u = UniformSet::default();
    bridge.update(&mut u, 0.0, None);
    assert_eq!(u.frequency, 0.0);
    bridge.update(&mut u, 0.1, Some(64.0));
    bridge.update(&mut u, 0.2, None);
    assert_eq!(u.frequency, 64.0);
}

#[test]
fn reset_to_zero_drops_amplitude() {
    let bridge = UniformBridge::new(FrequencyPolicy::ResetToZero);
    let mut u = UniformSet::default();
    bridge.update(&mut u, 0.1, Some(64.0));
    assert_eq!(u.frequency, 64.0);
    bridge.update(&mut u, 0.2, None);
    assert_eq!(u.frequency, 0.0);
}

#[test]
fn bridge_never_touches_colors() {
    let bridge = UniformBridge::default();
    let mut u = UniformSet::default();
    u.set_color(ColorChannel::Blue, 0.2);
    bridge.update(&mut u, 3.0, Some(1.0));
    assert_eq!(u.color(), [1.0, 1.0, 0.2]);
}

#[test]
fn uniform_block_layout_is_stable() {
    // two mat4 + six scalars + two pad floats
    assert_eq!(std::mem::size_of::<UniformBlock>(), 160);
}

#[test]
fn uniform_block_carries_scale_and_signals() {
    let mut u = UniformSet::default();
    u.time = 4.0;
    u.frequency = 12.0;
    let block = UniformBlock::pack(&u, &Camera::default(), 0.5);
    assert_eq!(block.time, 4.0);
    assert_eq!(block.frequency, 12.0);
    assert_eq!(block.displacement_divisor, FREQUENCY_DISPLACEMENT_DIVISOR);
    assert_eq!(block.model[0][0], 0.5);
    assert_eq!(block.model[1][1], 0.5);
    assert_eq!(block.model[2][2], 0.5);
    assert_eq!(block.model[3][3], 1.0);
}
