//! The capability boundary between the detection core and the platform.
//!
//! `CanvasHost` names the native operations the interceptor observes and the
//! ancillary operations it needs to route readbacks and emit markers. Every
//! method that shadows a native capability must delegate to the *original*
//! native behavior - in a browser host that means functions captured before
//! any wrapper was installed, so nothing here can recurse into the wrappers.

use alloc::string::String;

use crate::marker::{ScriptDescriptor, SignalMarker};

/// Context kind string for 2D drawing contexts. Only contexts acquired with
/// this kind are observed; other kinds pass through unmodified.
pub const CONTEXT_2D: &str = "2d";

/// Platform capabilities the interceptor decorates.
///
/// `Surface` is a canvas element, `Context` a drawing context, `Pixels` a
/// readback buffer. `CallArgs` is the host-specific tail of arguments a
/// wrapped call arrived with, forwarded verbatim so delegation stays
/// transparent (a browser host passes the raw JS argument list). `Error` is
/// whatever the native layer throws; the interceptor propagates it unchanged.
pub trait CanvasHost {
    type Surface: Clone;
    type Context: Clone + PartialEq;
    type Pixels;
    type CallArgs;
    type Error;

    /// Acquire a drawing context of `kind` on `surface`, delegating to the
    /// native acquisition. `None` when the surface cannot produce that kind.
    fn acquire_context(
        &mut self,
        surface: &Self::Surface,
        kind: &str,
        args: &Self::CallArgs,
    ) -> Result<Option<Self::Context>, Self::Error>;

    /// Current width and height of a surface, in pixels.
    fn surface_size(&self, surface: &Self::Surface) -> (u32, u32);

    /// Create a new surface of the given dimensions that is not part of the
    /// document. Used to route pixel readbacks through the export path.
    fn create_detached_surface(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<Self::Surface, Self::Error>;

    /// Serialized fill style currently in effect on a context.
    fn fill_style(&self, context: &Self::Context) -> String;

    fn fill_text(&mut self, context: &Self::Context, args: &Self::CallArgs)
        -> Result<(), Self::Error>;

    fn stroke_text(
        &mut self,
        context: &Self::Context,
        args: &Self::CallArgs,
    ) -> Result<(), Self::Error>;

    fn save(&mut self, context: &Self::Context) -> Result<(), Self::Error>;

    fn restore(&mut self, context: &Self::Context) -> Result<(), Self::Error>;

    /// Export a surface to a data URL via the native export.
    fn export_url(
        &mut self,
        surface: &Self::Surface,
        args: &Self::CallArgs,
    ) -> Result<String, Self::Error>;

    /// Native pixel readback on a context.
    fn read_pixels(
        &mut self,
        context: &Self::Context,
        args: &Self::CallArgs,
    ) -> Result<Self::Pixels, Self::Error>;

    /// Dimensions of a readback buffer.
    fn pixel_size(&self, pixels: &Self::Pixels) -> (u32, u32);

    /// Write a readback buffer onto a context at the origin.
    fn write_pixels(
        &mut self,
        context: &Self::Context,
        pixels: &Self::Pixels,
    ) -> Result<(), Self::Error>;

    /// An empty argument tail, for calls the interceptor originates itself.
    fn no_args(&self) -> Self::CallArgs;

    /// Identity of the script element executing right now, if any.
    fn current_script(&self) -> Option<ScriptDescriptor>;

    /// Insert a marker into the document. Returns false when insertion is
    /// impossible (no document body yet); must never fail loudly.
    fn append_marker(&mut self, marker: &SignalMarker) -> bool;
}
