//! Audio sample format conversions.
//!
//! # Format conventions
//!
//! | Name  | Type  | Range              |
//! |-------|-------|--------------------|
//! | S16   | `i16` | \[-32768, 32767\]  |
//! | Float | `f32` | \[-1.0, 1.0\]      |

const S16_TO_FLOAT_SCALING: f32 = 1.0 / 32768.0;

/// Convert a single S16 sample to Float \[-1.0, 1.0\].
#[inline]
pub fn s16_to_float(v: i16) -> f32 {
    f32::from(v) * S16_TO_FLOAT_SCALING
}

/// Convert a single Float \[-1.0, 1.0\] sample to S16, rounding to nearest.
#[inline]
pub fn float_to_s16(v: f32) -> i16 {
    let v = (v * 32768.0).clamp(-32768.0, 32767.0);
    (v + f32::copysign(0.5, v)) as i16
}

/// Convert a slice of S16 samples to Float into `dest`.
///
/// # Panics
///
/// Panics if `src` and `dest` have different lengths.
pub fn s16_to_float_slice(src: &[i16], dest: &mut [f32]) {
    assert_eq!(src.len(), dest.len(), "slice length mismatch");
    for (d, &s) in dest.iter_mut().zip(src) {
        *d = s16_to_float(s);
    }
}

/// Convert a slice of Float samples to S16 into `dest`.
///
/// # Panics
///
/// Panics if `src` and `dest` have different lengths.
pub fn float_to_s16_slice(src: &[f32], dest: &mut [i16]) {
    assert_eq!(src.len(), dest.len(), "slice length mismatch");
    for (d, &s) in dest.iter_mut().zip(src) {
        *d = float_to_s16(s);
    }
}

/// Deinterleave multi-channel audio into per-channel buffers.
///
/// `interleaved` holds `num_channels` samples per frame; each entry of
/// `deinterleaved` receives one channel's samples.
pub fn deinterleave<T: Copy>(
    interleaved: &[T],
    deinterleaved: &mut [Vec<T>],
    samples_per_channel: usize,
    num_channels: usize,
) {
    assert_eq!(
        interleaved.len(),
        samples_per_channel * num_channels,
        "interleaved length mismatch"
    );
    assert_eq!(deinterleaved.len(), num_channels, "channel count mismatch");

    for (ch, channel_buf) in deinterleaved.iter_mut().enumerate() {
        assert!(
            channel_buf.len() >= samples_per_channel,
            "channel {ch} buffer too short"
        );
        let mut idx = ch;
        for slot in channel_buf.iter_mut().take(samples_per_channel) {
            *slot = interleaved[idx];
            idx += num_channels;
        }
    }
}

/// Interleave per-channel buffers into a single interleaved buffer.
pub fn interleave<T: Copy>(
    deinterleaved: &[&[T]],
    interleaved: &mut [T],
    samples_per_channel: usize,
    num_channels: usize,
) {
    assert_eq!(
        interleaved.len(),
        samples_per_channel * num_channels,
        "interleaved length mismatch"
    );
    assert_eq!(deinterleaved.len(), num_channels, "channel count mismatch");

    for (ch, channel_buf) in deinterleaved.iter().enumerate() {
        assert!(
            channel_buf.len() >= samples_per_channel,
            "channel {ch} buffer too short"
        );
        let mut idx = ch;
        for j in 0..samples_per_channel {
            interleaved[idx] = channel_buf[j];
            idx += num_channels;
        }
    }
}
