//! Normalized least-mean-squares (NLMS) adaptive filter.
//!
//! Estimates the echo path between a far-end reference signal and a near-end
//! capture signal, one sample at a time. The filter output is the error
//! signal `e = near - y`, i.e. the near-end sample with the estimated echo
//! removed.
//!
//! Two processing paths are provided: floating point and Q15 fixed point.
//! The path is selected at construction; both sample-domain entry points
//! work in either mode, converting at the boundary when needed.

use derive_more::Debug;

use crate::audio_util::{float_to_s16, s16_to_float};
use crate::fixed_point::Q15;

#[derive(Debug)]
enum Taps {
    Float {
        #[debug(skip)]
        weights: Vec<f32>,
        #[debug(skip)]
        history: Vec<f32>,
    },
    Fixed {
        #[debug(skip)]
        weights: Vec<Q15>,
        #[debug(skip)]
        history: Vec<Q15>,
    },
}

/// Sample-domain NLMS adaptive filter with float and Q15 paths.
#[derive(Debug)]
pub struct NlmsFilter {
    taps: Taps,
    step_size: f32,
    regularization: f32,
    position: usize,
}

impl NlmsFilter {
    /// Creates a filter with `length` taps.
    ///
    /// `step_size` is the NLMS adaptation constant (mu) and
    /// `regularization` the power floor (delta) that keeps the normalized
    /// step bounded on silent input.
    pub fn new(length: usize, step_size: f32, regularization: f32, use_fixed_point: bool) -> Self {
        debug_assert!(length > 0);
        let taps = if use_fixed_point {
            Taps::Fixed {
                weights: vec![Q15::default(); length],
                history: vec![Q15::default(); length],
            }
        } else {
            Taps::Float {
                weights: vec![0.0; length],
                history: vec![0.0; length],
            }
        };
        Self {
            taps,
            step_size,
            regularization,
            position: 0,
        }
    }

    /// The number of filter taps.
    pub fn length(&self) -> usize {
        match &self.taps {
            Taps::Float { weights, .. } => weights.len(),
            Taps::Fixed { weights, .. } => weights.len(),
        }
    }

    /// Processes one sample pair in the float domain \[-1.0, 1.0\].
    ///
    /// `adapt` gates the coefficient update; the echo estimate is subtracted
    /// either way.
    pub fn process_f32(&mut self, far_end: f32, near_end: f32, adapt: bool) -> f32 {
        let step_size = self.step_size;
        let regularization = self.regularization;
        match &mut self.taps {
            Taps::Float { weights, history } => filter_sample_f32(
                weights,
                history,
                &mut self.position,
                step_size,
                regularization,
                far_end,
                near_end,
                adapt,
            ),
            Taps::Fixed { weights, history } => {
                let e = filter_sample_q15(
                    weights,
                    history,
                    &mut self.position,
                    step_size,
                    regularization,
                    float_to_s16(far_end),
                    float_to_s16(near_end),
                    adapt,
                );
                s16_to_float(e)
            }
        }
    }

    /// Processes one sample pair in the S16 domain.
    pub fn process_i16(&mut self, far_end: i16, near_end: i16, adapt: bool) -> i16 {
        let step_size = self.step_size;
        let regularization = self.regularization;
        match &mut self.taps {
            Taps::Fixed { weights, history } => filter_sample_q15(
                weights,
                history,
                &mut self.position,
                step_size,
                regularization,
                far_end,
                near_end,
                adapt,
            ),
            Taps::Float { weights, history } => {
                let e = filter_sample_f32(
                    weights,
                    history,
                    &mut self.position,
                    step_size,
                    regularization,
                    s16_to_float(far_end),
                    s16_to_float(near_end),
                    adapt,
                );
                float_to_s16(e)
            }
        }
    }

    /// L2 norm of the filter coefficients, for monitoring convergence and
    /// divergence.
    pub fn coeff_norm(&self) -> f32 {
        let sum: f32 = match &self.taps {
            Taps::Float { weights, .. } => weights.iter().map(|w| w * w).sum(),
            Taps::Fixed { weights, .. } => weights
                .iter()
                .map(|w| {
                    let v = w.to_f32();
                    v * v
                })
                .sum(),
        };
        sum.sqrt()
    }

    /// Zeroes the coefficients and the delay line.
    pub fn reset(&mut self) {
        match &mut self.taps {
            Taps::Float { weights, history } => {
                weights.fill(0.0);
                history.fill(0.0);
            }
            Taps::Fixed { weights, history } => {
                weights.fill(Q15::default());
                history.fill(Q15::default());
            }
        }
        self.position = 0;
    }
}

// ---------------------------------------------------------------------------
// Free functions — the per-sample NLMS recursions
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn filter_sample_f32(
    weights: &mut [f32],
    history: &mut [f32],
    position: &mut usize,
    step_size: f32,
    regularization: f32,
    far_end: f32,
    near_end: f32,
    adapt: bool,
) -> f32 {
    let len = weights.len();
    history[*position] = far_end;

    let mut y = 0.0f32;
    for (i, w) in weights.iter().enumerate() {
        y += w * history[(*position + i) % len];
    }

    // Error signal: the echo-cancelled output.
    let e = near_end - y;

    let mut power = regularization;
    for &x in history.iter() {
        power += x * x;
    }

    if adapt {
        let step = step_size / power * e;
        for (i, w) in weights.iter_mut().enumerate() {
            *w += step * history[(*position + i) % len];
        }
    }

    *position = (*position + 1) % len;
    e
}

#[allow(clippy::too_many_arguments)]
fn filter_sample_q15(
    weights: &mut [Q15],
    history: &mut [Q15],
    position: &mut usize,
    step_size: f32,
    regularization: f32,
    far_end: i16,
    near_end: i16,
    adapt: bool,
) -> i16 {
    let len = weights.len();
    let near = Q15::from_raw(near_end);
    history[*position] = Q15::from_raw(far_end);

    // Dot product in a wide accumulator (a full-scale delay line against
    // full-scale weights exceeds 32 bits), rescaled to Q15 at the end.
    let mut acc: i64 = 0;
    for (i, w) in weights.iter().enumerate() {
        let x = history[(*position + i) % len];
        acc += i64::from(x.raw()) * i64::from(w.raw());
    }
    let y = Q15::from_raw((acc >> 15).clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16);

    let e = near - y;

    let mut power_acc = (regularization * 32768.0 * 32768.0) as i64;
    for &x in history.iter() {
        let x = i64::from(x.raw());
        power_acc += (x * x) >> 15;
    }
    let power = power_acc as f32 / (32768.0 * 32768.0);

    if adapt {
        // The quantized step saturates at the Q15 limit for very quiet input.
        let step = Q15::from_f32(step_size / power);
        for (i, w) in weights.iter_mut().enumerate() {
            let x = history[(*position + i) % len];
            *w = *w + x * e * step;
        }
    }

    *position = (*position + 1) % len;
    e.raw()
}
