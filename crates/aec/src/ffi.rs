//! C-compatible FFI layer for the echo canceller.
//!
//! This module exposes `extern "C"` functions and `#[repr(C)]` types that
//! allow C, C++, and other foreign runtimes to use the engine through an
//! opaque handle.
//!
//! # Symbol prefix
//!
//! - Functions: `aec_*`
//! - Types: `Aec*`
//!
//! # Thread safety
//!
//! **NOT thread-safe.** All calls on the same [`AecEchoCanceller`] handle
//! must be serialized by the caller.

pub mod types;

mod conversions;
pub mod functions;
mod panic_guard;
