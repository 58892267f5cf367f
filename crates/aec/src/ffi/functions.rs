//! Exported `extern "C"` functions for the echo canceller C API.
//!
//! # Symbol prefix
//!
//! All public symbols use the `aec_` prefix.

use std::ptr;
use std::slice;

use crate::EchoCanceller;
use crate::config::Config;
use crate::echo_canceller::Error;

use super::panic_guard::{ffi_guard, ffi_guard_ptr};
use super::types::{AecConfig, AecEchoCanceller, AecError, AecStats};

fn map_process_error(err: Error) -> AecError {
    match err {
        Error::BufferSizeMismatch => AecError::BadBufferLength,
        _ => AecError::InvalidConfig,
    }
}

// ─── Version ─────────────────────────────────────────────────────────

/// Returns a pointer to a static null-terminated version string.
///
/// The returned pointer is valid for the lifetime of the process.
#[unsafe(no_mangle)]
pub extern "C" fn aec_version() -> *const std::ffi::c_char {
    // Safety: the byte string is a static literal with a trailing NUL.
    c"0.1.0".as_ptr()
}

// ─── Lifecycle ───────────────────────────────────────────────────────

/// Returns a default-initialized configuration.
#[unsafe(no_mangle)]
pub extern "C" fn aec_config_default() -> AecConfig {
    AecConfig::from_rust(&Config::default())
}

/// Creates an echo canceller with default configuration.
///
/// Returns `NULL` on allocation failure or internal error. The caller owns
/// the returned pointer and must free it with [`aec_destroy()`].
#[unsafe(no_mangle)]
pub extern "C" fn aec_create() -> *mut AecEchoCanceller {
    aec_create_with_config(aec_config_default())
}

/// Creates an echo canceller with the given configuration.
///
/// Returns `NULL` when the configuration is rejected or on internal error.
/// The caller owns the returned pointer and must free it with
/// [`aec_destroy()`].
#[unsafe(no_mangle)]
pub extern "C" fn aec_create_with_config(config: AecConfig) -> *mut AecEchoCanceller {
    ffi_guard_ptr! {
        match EchoCanceller::builder().config(config.to_rust()).build() {
            Ok(inner) => Box::into_raw(Box::new(AecEchoCanceller { inner })),
            Err(err) => {
                tracing::error!(%err, "rejected echo canceller configuration");
                ptr::null_mut()
            }
        }
    }
}

/// Creates an echo canceller with default configuration and the given
/// adaptive filter length.
///
/// Returns `NULL` when the length is rejected (zero) or on internal error.
#[unsafe(no_mangle)]
pub extern "C" fn aec_create_with_filter_length(filter_length: u32) -> *mut AecEchoCanceller {
    let mut config = aec_config_default();
    config.filter_length = filter_length;
    aec_create_with_config(config)
}

/// Destroys an echo canceller and frees its memory.
///
/// Passing `NULL` is a safe no-op. After this call the pointer is invalid.
#[unsafe(no_mangle)]
pub extern "C" fn aec_destroy(handle: *mut AecEchoCanceller) {
    if !handle.is_null() {
        // Safety: we created this pointer via Box::into_raw in aec_create*,
        // and the caller guarantees single ownership.
        let _ = unsafe { Box::from_raw(handle) };
    }
}

// ─── Processing ──────────────────────────────────────────────────────

/// Processes one frame of interleaved i16 audio.
///
/// `num_samples` counts total samples across channels; all three buffers
/// must hold `num_samples` values. The echo estimate of `far_end` is
/// subtracted from `near_end` and written to `output`.
#[unsafe(no_mangle)]
pub extern "C" fn aec_process(
    handle: *mut AecEchoCanceller,
    far_end: *const i16,
    near_end: *const i16,
    output: *mut i16,
    num_samples: usize,
) -> AecError {
    ffi_guard! {
        if handle.is_null() || far_end.is_null() || near_end.is_null() || output.is_null() {
            return AecError::NullPointer;
        }
        // Safety: the caller guarantees the handle is valid and unaliased,
        // and that each buffer points to num_samples readable (writable for
        // output) i16 values.
        let handle = unsafe { &mut *handle };
        let far = unsafe { slice::from_raw_parts(far_end, num_samples) };
        let near = unsafe { slice::from_raw_parts(near_end, num_samples) };
        let out = unsafe { slice::from_raw_parts_mut(output, num_samples) };
        match handle.inner.process(far, near, out) {
            Ok(()) => AecError::None,
            Err(err) => map_process_error(err),
        }
    }
}

/// Resets all filter and detector state and the statistics.
#[unsafe(no_mangle)]
pub extern "C" fn aec_reset(handle: *mut AecEchoCanceller) -> AecError {
    ffi_guard! {
        if handle.is_null() {
            return AecError::NullPointer;
        }
        // Safety: the caller guarantees the pointer is valid and not aliased.
        let handle = unsafe { &mut *handle };
        handle.inner.reset();
        AecError::None
    }
}

// ─── Introspection ───────────────────────────────────────────────────

/// Retrieves current statistics.
///
/// Returns `AecError::NullPointer` if `handle` or `stats_out` is null.
#[unsafe(no_mangle)]
pub extern "C" fn aec_get_stats(
    handle: *const AecEchoCanceller,
    stats_out: *mut AecStats,
) -> AecError {
    ffi_guard! {
        if handle.is_null() || stats_out.is_null() {
            return AecError::NullPointer;
        }
        // Safety: the caller guarantees the pointers are valid.
        let handle = unsafe { &*handle };
        let stats = AecStats::from_rust(&handle.inner.stats());
        unsafe { ptr::write(stats_out, stats) };
        AecError::None
    }
}

/// Retrieves the configuration the instance was built with.
///
/// Returns `AecError::NullPointer` if `handle` or `config_out` is null.
#[unsafe(no_mangle)]
pub extern "C" fn aec_get_config(
    handle: *const AecEchoCanceller,
    config_out: *mut AecConfig,
) -> AecError {
    ffi_guard! {
        if handle.is_null() || config_out.is_null() {
            return AecError::NullPointer;
        }
        // Safety: the caller guarantees the pointers are valid.
        let handle = unsafe { &*handle };
        let config = AecConfig::from_rust(handle.inner.config());
        unsafe { ptr::write(config_out, config) };
        AecError::None
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_non_null() {
        let ptr = aec_version();
        assert!(!ptr.is_null());
        // Safety: aec_version returns a static NUL-terminated string.
        let cstr = unsafe { std::ffi::CStr::from_ptr(ptr) };
        assert_eq!(cstr.to_str().unwrap(), "0.1.0");
    }

    #[test]
    fn create_and_destroy() {
        let handle = aec_create();
        assert!(!handle.is_null());
        aec_destroy(handle);
    }

    #[test]
    fn destroy_null_is_safe() {
        aec_destroy(ptr::null_mut());
    }

    #[test]
    fn create_with_invalid_config_returns_null() {
        let mut config = aec_config_default();
        config.filter_length = 0;
        assert!(aec_create_with_config(config).is_null());

        assert!(aec_create_with_filter_length(0).is_null());
    }

    #[test]
    fn create_with_filter_length_applies_length() {
        let handle = aec_create_with_filter_length(512);
        assert!(!handle.is_null());

        let mut config_out = aec_config_default();
        assert_eq!(aec_get_config(handle, &mut config_out), AecError::None);
        assert_eq!(config_out.filter_length, 512);

        aec_destroy(handle);
    }

    #[test]
    fn process_cancels_echo() {
        let handle = aec_create_with_filter_length(256);
        assert!(!handle.is_null());

        let far = [1000i16; 256];
        let near = [2000i16; 256];
        let mut out = [0i16; 256];
        for _ in 0..5 {
            let err = aec_process(handle, far.as_ptr(), near.as_ptr(), out.as_mut_ptr(), 256);
            assert_eq!(err, AecError::None);
        }
        assert_ne!(&out[..], &near[..]);

        let mut stats = AecStats {
            has_erle_db: false,
            erle_db: 0.0,
            has_latency_ms: false,
            latency_ms: 0.0,
        };
        assert_eq!(aec_get_stats(handle, &mut stats), AecError::None);
        assert!(stats.has_erle_db);
        assert!(stats.has_latency_ms);

        aec_destroy(handle);
    }

    #[test]
    fn process_null_returns_error() {
        let far = [0i16; 16];
        let mut out = [0i16; 16];
        let err = aec_process(
            ptr::null_mut(),
            far.as_ptr(),
            far.as_ptr(),
            out.as_mut_ptr(),
            16,
        );
        assert_eq!(err, AecError::NullPointer);

        let handle = aec_create();
        let err = aec_process(handle, ptr::null(), far.as_ptr(), out.as_mut_ptr(), 16);
        assert_eq!(err, AecError::NullPointer);
        aec_destroy(handle);
    }

    #[test]
    fn process_bad_length_returns_error() {
        let mut config = aec_config_default();
        config.num_channels = 2;
        config.filter_length = 128;
        let handle = aec_create_with_config(config);
        assert!(!handle.is_null());

        // 15 samples is not divisible by 2 channels.
        let far = [0i16; 15];
        let near = [0i16; 15];
        let mut out = [0i16; 15];
        let err = aec_process(handle, far.as_ptr(), near.as_ptr(), out.as_mut_ptr(), 15);
        assert_eq!(err, AecError::BadBufferLength);

        aec_destroy(handle);
    }

    #[test]
    fn reset_clears_stats() {
        let handle = aec_create_with_filter_length(128);
        let far = [1000i16; 128];
        let near = [2000i16; 128];
        let mut out = [0i16; 128];
        aec_process(handle, far.as_ptr(), near.as_ptr(), out.as_mut_ptr(), 128);

        assert_eq!(aec_reset(handle), AecError::None);

        let mut stats = AecStats {
            has_erle_db: true,
            erle_db: 1.0,
            has_latency_ms: true,
            latency_ms: 1.0,
        };
        assert_eq!(aec_get_stats(handle, &mut stats), AecError::None);
        assert!(!stats.has_erle_db);
        assert!(!stats.has_latency_ms);

        aec_destroy(handle);
    }

    #[test]
    fn get_config_null_returns_error() {
        assert_eq!(
            aec_get_config(ptr::null(), ptr::null_mut()),
            AecError::NullPointer
        );
        assert_eq!(
            aec_get_stats(ptr::null(), ptr::null_mut()),
            AecError::NullPointer
        );
    }

    #[test]
    fn config_default_matches_rust_default() {
        let c_config = aec_config_default();
        let roundtrip = c_config.to_rust();
        assert_eq!(roundtrip, Config::default());
    }
}
