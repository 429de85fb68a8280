//! sentinel-core: Platform-agnostic canvas fingerprinting detection core
//!
//! This crate contains the detection logic without any platform-specific
//! dependencies. It can be used in:
//! - Browsers (via a wasm-bindgen wrapper that patches canvas prototypes)
//! - Embedded browser engines (via direct host bindings)
//! - Test harnesses (via a fake host)
//!
//! The platform must provide an implementation of the [`CanvasHost`] trait:
//! the four native capability points (context acquisition, text drawing,
//! state save/restore, export-to-URL, pixel readback) plus the ancillary
//! operations the interceptor needs to route readbacks and emit markers.
//!
//! The [`Interceptor`] decorates a host transparently: every call delegates
//! to the native behavior and returns its result unchanged, while evidence
//! about text drawn and fill styles used accumulates per context. At export
//! time [`classify`] inspects the surface dimensions and the accumulated
//! evidence and decides whether the operation sequence looks like a
//! fingerprint-extraction probe; a flagged export produces a [`SignalMarker`]
//! handed back to the host for insertion into the document.

#![no_std]

extern crate alloc;

pub mod classify;
pub mod evidence;
pub mod host;
pub mod intercept;
pub mod marker;

// Re-export everything for easy access
pub use classify::{
    classify, Verdict, GLYPH_DIVERSITY_THRESHOLD, MIN_SURFACE_EDGE, STYLE_DIVERSITY_THRESHOLD,
};
pub use evidence::EvidenceRecorder;
pub use host::{CanvasHost, CONTEXT_2D};
pub use intercept::Interceptor;
pub use marker::{ScriptDescriptor, SignalMarker, CALLEE_ATTR, MARKER_CLASS, MARKER_TAG};
