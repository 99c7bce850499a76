//! Decaying visual sequences for repeated elements.
//!
//! Every repeated element gets a smaller font, lower opacity and a smaller
//! scale than the one before it, linearly, down to a floor. When a color
//! gradient is given, each element also samples the gradient at its position
//! in the sequence shifted by the current animation phase.

use crate::color::Rgb;
use crate::phase::Phase;
use serde::Serialize;

pub use crate::color::interpolate_gradient;

/// Font size of the first element, in rem.
pub const STARTING_FONT_SIZE: f64 = 4.0;

/// Never shrink below this fraction of the starting values.
pub const DEFAULT_MIN_THRESHOLD: f64 = 0.2;

/// Glow radius of the first element, in pixels.
pub const GLOW_BASE_RADIUS: f64 = 20.0;

/// How much the glow radius shrinks per element.
pub const GLOW_RADIUS_STEP: f64 = 2.0;

/// Alpha applied to the glow color.
pub const GLOW_ALPHA: f32 = 0.5;

/// Parameters for a decay sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecayConfig {
    repeat_count: usize,
    min_threshold: f64,
}

impl DecayConfig {
    /// Build a config. A zero repeat count is bumped to one.
    pub fn new(repeat_count: usize) -> Self {
        Self { repeat_count: repeat_count.max(1), min_threshold: DEFAULT_MIN_THRESHOLD }
    }

    /// Use a different floor. Values outside of `(0, 1]` fall back to the default.
    pub fn with_min_threshold(mut self, min_threshold: f64) -> Self {
        self.min_threshold =
            if min_threshold > 0.0 && min_threshold <= 1.0 { min_threshold } else { DEFAULT_MIN_THRESHOLD };
        self
    }

    pub fn repeat_count(&self) -> usize {
        self.repeat_count
    }

    pub fn min_threshold(&self) -> f64 {
        self.min_threshold
    }

    pub fn ending_font_size(&self) -> f64 {
        STARTING_FONT_SIZE * self.min_threshold
    }
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self::new(3)
    }
}

/// A colored glow around an element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Glow {
    /// Blur radius in pixels. This goes negative past the tenth element.
    pub radius: f64,
    pub color: Rgb,
    pub alpha: f32,
}

/// The visual parameters of a single repeated element.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub index: usize,
    /// Font size in rem.
    pub font_size: f64,
    pub opacity: f64,
    pub scale: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glow: Option<Glow>,
}

/// Compute the frames for every repeated element.
///
/// An empty `color_stops` slice behaves like no stops at all.
pub fn compute_decay_sequence(config: &DecayConfig, color_stops: Option<&[Rgb]>, phase: Phase) -> Vec<RenderFrame> {
    let threshold = config.min_threshold;
    let ending_font_size = config.ending_font_size();
    let steps = config.repeat_count.saturating_sub(1).max(1) as f64;

    let font_size_decrement = (STARTING_FONT_SIZE - ending_font_size) / steps;
    let opacity_decrement = (1.0 - threshold) / steps;
    let scale_decrement = (1.0 - threshold) / steps;

    (0..config.repeat_count)
        .map(|index| {
            let position = index as f64;
            let t = position / steps;
            let color = color_stops.and_then(|stops| interpolate_gradient(stops, (t + phase.value()).rem_euclid(1.0)));
            let glow = color.map(|color| Glow {
                radius: GLOW_BASE_RADIUS - GLOW_RADIUS_STEP * position,
                color,
                alpha: GLOW_ALPHA,
            });
            RenderFrame {
                index,
                font_size: (STARTING_FONT_SIZE - position * font_size_decrement).max(ending_font_size),
                opacity: (1.0 - position * opacity_decrement).max(threshold),
                scale: (1.0 - position * scale_decrement).max(threshold),
                color,
                glow,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    fn approx(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    fn assert_all_approx(actual: impl Iterator<Item = f64>, expected: &[f64]) {
        let actual: Vec<_> = actual.collect();
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!(approx(*a, *e), "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn three_elements() {
        let frames = compute_decay_sequence(&DecayConfig::new(3), None, Phase::ZERO);
        assert_all_approx(frames.iter().map(|f| f.font_size), &[4.0, 2.4, 0.8]);
        assert_all_approx(frames.iter().map(|f| f.opacity), &[1.0, 0.6, 0.2]);
        assert_all_approx(frames.iter().map(|f| f.scale), &[1.0, 0.6, 0.2]);
        assert!(frames.iter().all(|f| f.color.is_none() && f.glow.is_none()));
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(5)]
    #[case(20)]
    #[case(57)]
    fn frame_count_and_bounds(#[case] count: usize) {
        let config = DecayConfig::new(count);
        let frames = compute_decay_sequence(&config, None, Phase::ZERO);
        assert_eq!(frames.len(), count);

        let first = &frames[0];
        assert_eq!((first.font_size, first.opacity, first.scale), (STARTING_FONT_SIZE, 1.0, 1.0));

        for frame in &frames {
            assert!(frame.font_size >= config.ending_font_size());
            assert!(frame.opacity >= config.min_threshold());
            assert!(frame.scale >= config.min_threshold());
        }
        for pair in frames.windows(2) {
            assert!(pair[1].font_size <= pair[0].font_size);
            assert!(pair[1].opacity <= pair[0].opacity);
            assert!(pair[1].scale <= pair[0].scale);
        }
        if count > 1 {
            let last = frames.last().unwrap();
            assert!(approx(last.font_size, config.ending_font_size()));
            assert!(approx(last.opacity, config.min_threshold()));
            assert!(approx(last.scale, config.min_threshold()));
        }
    }

    #[test]
    fn last_frame_reaches_floor_for_every_count() {
        let stops = crate::mood::Mood::Fire.stops();
        for count in 2..=200 {
            let config = DecayConfig::new(count);
            let frames = compute_decay_sequence(&config, stops, Phase::new(0.999));
            assert_eq!(frames.len(), count);
            let last = frames.last().unwrap();
            assert!(approx(last.font_size, 0.8), "count {count}: {}", last.font_size);
            assert!(approx(last.opacity, 0.2), "count {count}: {}", last.opacity);
            assert!(approx(last.scale, 0.2), "count {count}: {}", last.scale);
            assert!(frames.iter().all(|f| f.color.is_some()));
        }
    }

    #[test]
    fn zero_count_becomes_one() {
        let frames = compute_decay_sequence(&DecayConfig::new(0), None, Phase::ZERO);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].font_size, STARTING_FONT_SIZE);
    }

    #[test]
    fn custom_threshold() {
        let config = DecayConfig::new(2).with_min_threshold(0.5);
        let frames = compute_decay_sequence(&config, None, Phase::ZERO);
        assert_all_approx(frames.iter().map(|f| f.font_size), &[4.0, 2.0]);
        assert_all_approx(frames.iter().map(|f| f.opacity), &[1.0, 0.5]);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(1.5)]
    fn invalid_threshold_uses_default(#[case] threshold: f64) {
        assert_eq!(DecayConfig::new(3).with_min_threshold(threshold).min_threshold(), DEFAULT_MIN_THRESHOLD);
    }

    #[test]
    fn colors_follow_gradient() {
        let stops = [RED, BLUE];
        let frames = compute_decay_sequence(&DecayConfig::new(3), Some(&stops), Phase::ZERO);
        let colors: Vec<_> = frames.iter().map(|f| f.color).collect();
        // the last element wraps around to position 0
        assert_eq!(colors, vec![Some(RED), Some(Rgb::new(128, 0, 128)), Some(RED)]);
    }

    #[test]
    fn phase_shifts_colors() {
        let stops = [RED, BLUE];
        let frames = compute_decay_sequence(&DecayConfig::new(1), Some(&stops), Phase::new(0.5));
        assert_eq!(frames[0].color, Some(Rgb::new(128, 0, 128)));
    }

    #[test]
    fn glow_is_not_floored() {
        let stops = [RED];
        let frames = compute_decay_sequence(&DecayConfig::new(12), Some(&stops), Phase::ZERO);
        let radii: Vec<_> = frames.iter().map(|f| f.glow.unwrap().radius).collect();
        assert_eq!(radii[0], 20.0);
        assert_eq!(radii[10], 0.0);
        assert_eq!(radii[11], -2.0);
        assert!(frames.iter().all(|f| f.glow.unwrap().color == RED));
    }

    #[test]
    fn empty_stops_disable_color() {
        let frames = compute_decay_sequence(&DecayConfig::new(2), Some(&[]), Phase::ZERO);
        assert!(frames.iter().all(|f| f.color.is_none() && f.glow.is_none()));
    }

    #[test]
    fn deterministic() {
        let stops = [RED, BLUE];
        let config = DecayConfig::new(7);
        let phase = Phase::new(0.37);
        assert_eq!(
            compute_decay_sequence(&config, Some(&stops), phase),
            compute_decay_sequence(&config, Some(&stops), phase)
        );
    }
}
