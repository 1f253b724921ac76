//! Integration Tests für Capture und Mapping
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen Mock-Ausgänge

use rc_core::{
    Actuation, Actuator, CaptureOutcome, ChannelArena, ChannelId, IndicatorOutput,
    IntensityOutput, OutputError, PowerState, RcConfig, RgbOutput, SampleCell, brightness_level,
    hue_to_rgb,
};
use rgb::RGB8;

// ============================================================================
// Mock Outputs
// ============================================================================

#[derive(Default)]
pub struct MockIndicator {
    pub last_state: Option<PowerState>,
    pub write_count: usize,
}

impl IndicatorOutput for MockIndicator {
    fn set_state(&mut self, state: PowerState) -> Result<(), OutputError> {
        self.last_state = Some(state);
        self.write_count += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockIntensity {
    pub last_level: Option<u8>,
    pub write_count: usize,
    pub fail_next_write: bool,
}

impl IntensityOutput for MockIntensity {
    fn set_intensity(&mut self, level: u8) -> Result<(), OutputError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(OutputError::WriteFailed);
        }

        self.last_level = Some(level);
        self.write_count += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockRgbWriter {
    pub last_color: Option<RGB8>,
    pub write_count: usize,
}

impl RgbOutput for MockRgbWriter {
    fn write(&mut self, color: RGB8) -> Result<(), OutputError> {
        self.last_color = Some(color);
        self.write_count += 1;
        Ok(())
    }
}

type MockActuator = Actuator<MockIndicator, MockIntensity, MockRgbWriter>;

fn mock_actuator() -> MockActuator {
    Actuator::new(
        MockIndicator::default(),
        MockIntensity::default(),
        MockRgbWriter::default(),
        RcConfig::DEFAULT,
    )
}

/// Simuliert einen vollständigen Puls (steigende + fallende Flanke)
fn pulse(arena: &ChannelArena, id: ChannelId, start_us: u32, width_us: u32) -> CaptureOutcome {
    arena.on_edge(id, true, start_us);
    arena.on_edge(id, false, start_us.wrapping_add(width_us))
}

// ============================================================================
// Tests: Mapping-Eigenschaften
// ============================================================================

#[test]
fn test_brightness_matches_rounded_affine_map() {
    let config = RcConfig::DEFAULT;
    for width in 1000..=2000u32 {
        let expected = ((width - 1000) * 255 + 500) / 1000;
        assert_eq!(u32::from(brightness_level(width, &config)), expected, "width {width}");
    }
}

#[test]
fn test_brightness_outside_range_hits_boundaries() {
    let config = RcConfig::DEFAULT;
    for width in [0, 1, 500, 999] {
        assert_eq!(brightness_level(width, &config), 0);
    }
    for width in [2001, 2500, 10_000, u32::MAX] {
        assert_eq!(brightness_level(width, &config), 255);
    }
}

#[test]
fn test_hue_wheel_is_continuous() {
    let mut previous = hue_to_rgb(0);
    for hue in 1..=255u8 {
        let rgb = hue_to_rgb(hue);
        assert!(previous.r.abs_diff(rgb.r) <= 3, "red jump at {hue}");
        assert!(previous.g.abs_diff(rgb.g) <= 3, "green jump at {hue}");
        assert!(previous.b.abs_diff(rgb.b) <= 3, "blue jump at {hue}");
        previous = rgb;
    }
}

#[test]
fn test_hue_segment_boundaries() {
    assert_eq!(hue_to_rgb(84), RGB8 { r: 3, g: 252, b: 0 });
    assert_eq!(hue_to_rgb(85), RGB8 { r: 0, g: 255, b: 0 });
    assert_eq!(hue_to_rgb(169), RGB8 { r: 0, g: 3, b: 252 });
    assert_eq!(hue_to_rgb(170), RGB8 { r: 0, g: 0, b: 255 });
}

#[test]
fn test_power_threshold_exact_boundary() {
    let mut actuator = mock_actuator();

    actuator.apply(ChannelId::Power, 1500);
    assert_eq!(actuator.outputs().0.last_state, Some(PowerState::On));

    actuator.apply(ChannelId::Power, 1499);
    assert_eq!(actuator.outputs().0.last_state, Some(PowerState::Off));
}

#[test]
fn test_mapping_is_idempotent() {
    let mut actuator = mock_actuator();

    for id in ChannelId::ALL {
        let first = actuator.apply(id, 1730);
        let second = actuator.apply(id, 1730);
        assert_eq!(first, second);
    }
    assert_eq!(actuator.outputs().1.write_count, 2);
    assert_eq!(actuator.outputs().2.write_count, 2);
}

// ============================================================================
// Tests: Capture-Übergabe
// ============================================================================

#[test]
fn test_guarded_channels_keep_first_unconsumed_sample() {
    for id in [ChannelId::Color, ChannelId::Brightness] {
        let arena = ChannelArena::new(1500);

        assert_eq!(pulse(&arena, id, 1000, 1200), CaptureOutcome::Published(1200));
        assert_eq!(pulse(&arena, id, 21_000, 1800), CaptureOutcome::Dropped);
        assert_eq!(pulse(&arena, id, 41_000, 1900), CaptureOutcome::Dropped);

        let sample = arena.channel(id).sample();
        assert_eq!(sample.peek(), 1200);
        assert_eq!(sample.try_consume(), Some(1200));

        // Nach dem Quittieren wird wieder angenommen
        assert_eq!(pulse(&arena, id, 61_000, 1600), CaptureOutcome::Published(1600));
    }
}

#[test]
fn test_power_channel_keeps_latest_sample() {
    let arena = ChannelArena::new(1500);
    pulse(&arena, ChannelId::Power, 1000, 1200);
    pulse(&arena, ChannelId::Power, 21_000, 1800);

    assert_eq!(arena.channel(ChannelId::Power).sample().try_consume(), Some(1800));
}

#[test]
fn test_no_signal_keeps_neutral_default() {
    let arena = ChannelArena::new(1500);
    let mut actuator = mock_actuator();

    for _ in 0..10 {
        assert!(actuator.poll(&arena).is_empty());
    }
    for id in ChannelId::ALL {
        assert_eq!(arena.channel(id).sample().peek(), 1500);
    }
}

// ============================================================================
// Tests: End-to-End
// ============================================================================

#[test]
fn test_brightness_end_to_end() {
    let arena = ChannelArena::new(1500);
    let mut actuator = mock_actuator();

    arena.on_edge(ChannelId::Brightness, true, 1000);
    arena.on_edge(ChannelId::Brightness, false, 2500);

    let report = actuator.poll(&arena);
    let entry = report.get(ChannelId::Brightness).unwrap();
    assert_eq!(entry.pulse_width_us, 1500);
    assert_eq!(entry.actuation, Actuation::Brightness(128));
    assert_eq!(actuator.outputs().1.last_level, Some(128));
}

#[test]
fn test_color_end_to_end() {
    let arena = ChannelArena::new(1500);
    let mut actuator = mock_actuator();

    pulse(&arena, ChannelId::Color, 5000, 1000);
    let report = actuator.poll(&arena);
    assert_eq!(
        report.get(ChannelId::Color).unwrap().actuation,
        Actuation::Color {
            hue: 0,
            rgb: RGB8 { r: 255, g: 0, b: 0 }
        }
    );

    pulse(&arena, ChannelId::Color, 25_000, 2000);
    actuator.poll(&arena);
    assert_eq!(
        actuator.outputs().2.last_color,
        Some(RGB8 { r: 255, g: 0, b: 0 })
    );
}

#[test]
fn test_power_end_to_end() {
    let arena = ChannelArena::new(1500);
    let mut actuator = mock_actuator();

    pulse(&arena, ChannelId::Power, 100, 1500);
    actuator.poll(&arena);
    assert_eq!(actuator.outputs().0.last_state, Some(PowerState::On));

    pulse(&arena, ChannelId::Power, 20_100, 900);
    actuator.poll(&arena);
    assert_eq!(actuator.outputs().0.last_state, Some(PowerState::Off));
}

#[test]
fn test_all_channels_in_one_cycle() {
    let arena = ChannelArena::new(1500);
    let mut actuator = mock_actuator();

    pulse(&arena, ChannelId::Power, 0x10, 1900);
    pulse(&arena, ChannelId::Color, 0x20, 1500);
    pulse(&arena, ChannelId::Brightness, 0x30, 2200);

    let report = actuator.poll(&arena);
    let order: Vec<ChannelId> = report.iter().map(|r| r.channel).collect();
    assert_eq!(order, ChannelId::ALL.to_vec());

    let (power, brightness, color) = actuator.outputs();
    assert_eq!(power.last_state, Some(PowerState::On));
    assert_eq!(brightness.last_level, Some(255));
    assert_eq!(color.last_color, Some(hue_to_rgb(128)));
}

#[test]
fn test_failed_write_does_not_block_later_cycles() {
    let arena = ChannelArena::new(1500);
    let mut actuator = Actuator::new(
        MockIndicator::default(),
        MockIntensity {
            fail_next_write: true,
            ..MockIntensity::default()
        },
        MockRgbWriter::default(),
        RcConfig::DEFAULT,
    );

    pulse(&arena, ChannelId::Brightness, 100, 2000);
    let report = actuator.poll(&arena);
    assert_eq!(
        report.get(ChannelId::Brightness).unwrap().write,
        Err(OutputError::WriteFailed)
    );
    // Sample wurde trotzdem quittiert
    assert!(!arena.channel(ChannelId::Brightness).sample().is_ready());

    pulse(&arena, ChannelId::Brightness, 20_100, 1000);
    let report = actuator.poll(&arena);
    assert_eq!(report.get(ChannelId::Brightness).unwrap().write, Ok(()));
    assert_eq!(actuator.outputs().1.last_level, Some(0));
}

#[test]
fn test_apply_defaults_drives_center_values() {
    let mut actuator = mock_actuator();
    let report = actuator.apply_defaults();

    assert_eq!(report.iter().count(), 3);
    let (power, brightness, color) = actuator.into_outputs();
    assert_eq!(power.last_state, Some(PowerState::On));
    assert_eq!(brightness.last_level, Some(128));
    assert_eq!(color.last_color, Some(hue_to_rgb(128)));
}

// ============================================================================
// Tests: Nebenläufigkeit (Producer-Thread statt Interrupt)
// ============================================================================

#[test]
fn test_sample_cell_hand_off_across_threads() {
    use std::sync::atomic::{AtomicBool, Ordering};

    const SAMPLES: u32 = 200_000;

    let cell = SampleCell::new(0);
    let producer_done = AtomicBool::new(false);

    let (accepted, consumed) = std::thread::scope(|s| {
        let producer = s.spawn(|| {
            let mut accepted = 0u32;
            for value in 1..=SAMPLES {
                if cell.try_publish(value) {
                    accepted += 1;
                }
            }
            producer_done.store(true, Ordering::Release);
            accepted
        });

        let mut consumed = Vec::new();
        loop {
            let done = producer_done.load(Ordering::Acquire);
            if let Some(value) = cell.try_consume() {
                consumed.push(value);
            } else if done {
                break;
            }
        }

        (producer.join().unwrap(), consumed)
    });

    assert_eq!(consumed.len() as u32, accepted);
    assert!(consumed.windows(2).all(|w| w[0] < w[1]));
    assert!(consumed.iter().all(|v| (1..=SAMPLES).contains(v)));
}

#[test]
fn test_arena_capture_and_poll_across_threads() {
    use std::sync::atomic::{AtomicBool, Ordering};

    let arena = ChannelArena::new(1500);
    let producer_done = AtomicBool::new(false);
    let mut actuator = mock_actuator();

    let levels = std::thread::scope(|s| {
        s.spawn(|| {
            let mut now = 1u32;
            for i in 0..50_000u32 {
                let width = 1000 + (i % 1001);
                pulse(&arena, ChannelId::Brightness, now, width);
                now = now.wrapping_add(20_000);
            }
            producer_done.store(true, Ordering::Release);
        });

        let mut levels = Vec::new();
        loop {
            let done = producer_done.load(Ordering::Acquire);
            let report = actuator.poll(&arena);
            match report.get(ChannelId::Brightness) {
                Some(entry) => {
                    assert!((1000..=2000).contains(&entry.pulse_width_us));
                    levels.push(entry.actuation);
                }
                None if done => break,
                None => {}
            }
        }
        levels
    });

    assert!(!levels.is_empty());
    assert_eq!(actuator.outputs().1.write_count, levels.len());
}
