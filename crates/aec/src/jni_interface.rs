//! JNI entry points for the Android binding class.
//!
//! Exports the two native methods declared by `com.example.aec.AecWrapper`:
//!
//! ```java
//! public class AecWrapper {
//!     static { System.loadLibrary("aec"); }
//!     public native void init(int filterLength);
//!     public native void process(short[] farEnd, short[] nearEnd, short[] output);
//! }
//! ```
//!
//! The wrapper class carries no handle, so the engine lives in a
//! process-wide slot. A mutex serializes `init` and `process`; concurrent
//! callers block rather than race.

use std::sync::{Mutex, MutexGuard};

use jni::JNIEnv;
use jni::objects::{JObject, JShortArray};
use jni::sys::jint;

use crate::config::Config;
use crate::echo_canceller::EchoCanceller;

static INSTANCE: Mutex<Option<EchoCanceller>> = Mutex::new(None);

fn lock_instance() -> MutexGuard<'static, Option<EchoCanceller>> {
    match INSTANCE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// `AecWrapper.init(int filterLength)`.
///
/// Replaces the process-wide engine with one built from the default
/// configuration and the given filter length. A rejected length is logged
/// and leaves no engine installed.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_example_aec_AecWrapper_init(
    _env: JNIEnv<'_>,
    _this: JObject<'_>,
    filter_length: jint,
) {
    let config = Config {
        filter_length: filter_length.max(0) as usize,
        ..Config::default()
    };
    match EchoCanceller::builder().config(config).build() {
        Ok(aec) => *lock_instance() = Some(aec),
        Err(err) => {
            tracing::error!(%err, filter_length, "echo canceller init rejected");
            *lock_instance() = None;
        }
    }
}

/// `AecWrapper.process(short[] farEnd, short[] nearEnd, short[] output)`.
///
/// Frame length is taken from the far-end array. Called before `init`, or
/// with mismatched array lengths, this logs an error and leaves `output`
/// untouched.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_example_aec_AecWrapper_process(
    env: JNIEnv<'_>,
    _this: JObject<'_>,
    far_end: JShortArray<'_>,
    near_end: JShortArray<'_>,
    output: JShortArray<'_>,
) {
    let frame_size = match env.get_array_length(&far_end) {
        Ok(len) => len as usize,
        Err(err) => {
            tracing::error!(%err, "failed to read far-end array length");
            return;
        }
    };

    let mut far = vec![0i16; frame_size];
    let mut near = vec![0i16; frame_size];
    let mut out = vec![0i16; frame_size];
    if let Err(err) = env.get_short_array_region(&far_end, 0, &mut far) {
        tracing::error!(%err, "failed to read far-end samples");
        return;
    }
    if let Err(err) = env.get_short_array_region(&near_end, 0, &mut near) {
        tracing::error!(%err, "failed to read near-end samples");
        return;
    }

    {
        let mut guard = lock_instance();
        let Some(aec) = guard.as_mut() else {
            tracing::error!("process called before init");
            return;
        };
        if let Err(err) = aec.process(&far, &near, &mut out) {
            tracing::error!(%err, frame_size, "echo canceller rejected frame");
            return;
        }
    }

    if let Err(err) = env.set_short_array_region(&output, 0, &out) {
        tracing::error!(%err, "failed to write output samples");
    }
}
