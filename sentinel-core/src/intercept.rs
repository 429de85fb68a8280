//! The interceptor: a transparent decorator over a [`CanvasHost`].
//!
//! Every wrapped operation delegates to the native behavior and returns its
//! result unchanged; observation is a pure side effect. Evidence is recorded
//! *before* delegating draw and state calls, so a throwing native call still
//! leaves its evidence behind, and the error crosses the wrapper untouched.
//!
//! Exports classify *after* delegating: the native URL is produced first,
//! then the surface's 2D context is re-acquired through the same wrapped
//! acquisition path so the same recorder instance is observed. Pixel
//! readbacks reroute through a detached surface into the same internal
//! export-classification function - deliberately not through the public
//! wrapped export entry point, which would be one bug away from re-entry.
//!
//! Classification never alters observable page behavior: inspection failures
//! are swallowed (and logged at debug), verdicts never change return values.

use alloc::string::String;
use alloc::vec::Vec;

use crate::classify::{classify, Verdict};
use crate::evidence::EvidenceRecorder;
use crate::host::{CanvasHost, CONTEXT_2D};
use crate::marker::SignalMarker;

struct ContextEntry<C> {
    context: C,
    // allocated on the first evidence-mutating call, not on acquisition
    recorder: Option<EvidenceRecorder>,
}

/// Decorating interceptor around a platform host.
///
/// Owns the side table of per-context evidence recorders, keyed by context
/// identity. Contexts acquired outside the wrapped acquisition path (for
/// example before installation) are delegated untouched and never recorded.
pub struct Interceptor<H: CanvasHost> {
    host: H,
    contexts: Vec<ContextEntry<H::Context>>,
    markers_emitted: usize,
}

impl<H: CanvasHost> Interceptor<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            contexts: Vec::new(),
            markers_emitted: 0,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Number of 2D contexts acquired through the wrapped path.
    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    /// Markers successfully inserted so far.
    pub fn markers_emitted(&self) -> usize {
        self.markers_emitted
    }

    /// Evidence accumulated on a context, if the context is tracked and has
    /// seen at least one evidence-mutating call.
    pub fn evidence(&self, context: &H::Context) -> Option<&EvidenceRecorder> {
        self.entry_index(context)
            .and_then(|i| self.contexts[i].recorder.as_ref())
    }

    /// Wrapped context acquisition. 2D contexts are registered in the side
    /// table; other kinds are returned unmodified and never observed.
    pub fn acquire_context(
        &mut self,
        surface: &H::Surface,
        kind: &str,
        args: &H::CallArgs,
    ) -> Result<Option<H::Context>, H::Error> {
        let context = self.host.acquire_context(surface, kind, args)?;
        if kind == CONTEXT_2D {
            if let Some(context) = &context {
                if self.entry_index(context).is_none() {
                    self.contexts.push(ContextEntry {
                        context: context.clone(),
                        recorder: None,
                    });
                }
            }
        }
        Ok(context)
    }

    /// Wrapped fillText: record the drawn string and the fill style about to
    /// be used, then delegate.
    pub fn fill_text(
        &mut self,
        context: &H::Context,
        text: &str,
        args: &H::CallArgs,
    ) -> Result<(), H::Error> {
        self.record_text_draw(context, text);
        self.host.fill_text(context, args)
    }

    /// Wrapped strokeText: same evidence as fillText.
    pub fn stroke_text(
        &mut self,
        context: &H::Context,
        text: &str,
        args: &H::CallArgs,
    ) -> Result<(), H::Error> {
        self.record_text_draw(context, text);
        self.host.stroke_text(context, args)
    }

    /// Wrapped save: latch the state-isolation flag, then delegate.
    pub fn save(&mut self, context: &H::Context) -> Result<(), H::Error> {
        self.mark_forbidden(context);
        self.host.save(context)
    }

    /// Wrapped restore: latch the state-isolation flag, then delegate.
    pub fn restore(&mut self, context: &H::Context) -> Result<(), H::Error> {
        self.mark_forbidden(context);
        self.host.restore(context)
    }

    /// Wrapped export. The native URL is returned regardless of verdict.
    pub fn export_to_url(
        &mut self,
        surface: &H::Surface,
        args: &H::CallArgs,
    ) -> Result<String, H::Error> {
        self.export_and_classify(surface, args)
    }

    /// Wrapped pixel readback. The native buffer is returned unchanged; a
    /// copy of it is routed through a detached surface so readback-based
    /// extraction hits the same classifier as direct export.
    pub fn read_pixels(
        &mut self,
        context: &H::Context,
        args: &H::CallArgs,
    ) -> Result<H::Pixels, H::Error> {
        let pixels = self.host.read_pixels(context, args)?;
        if self.reroute_readback(context, &pixels).is_err() {
            log::debug!("readback rerouting failed, returning native buffer");
        }
        Ok(pixels)
    }

    fn entry_index(&self, context: &H::Context) -> Option<usize> {
        self.contexts.iter().position(|e| &e.context == context)
    }

    fn record_text_draw(&mut self, context: &H::Context, text: &str) {
        let style = self.host.fill_style(context);
        if let Some(i) = self.entry_index(context) {
            self.contexts[i]
                .recorder
                .get_or_insert_with(EvidenceRecorder::default)
                .record_text_draw(text, style);
        }
    }

    fn mark_forbidden(&mut self, context: &H::Context) {
        if let Some(i) = self.entry_index(context) {
            self.contexts[i]
                .recorder
                .get_or_insert_with(EvidenceRecorder::default)
                .mark_forbidden();
        }
    }

    /// Shared export path: native export first, inspection second. Both the
    /// public export wrapper and readback rerouting land here.
    fn export_and_classify(
        &mut self,
        surface: &H::Surface,
        args: &H::CallArgs,
    ) -> Result<String, H::Error> {
        let url = self.host.export_url(surface, args)?;
        self.inspect_export(surface, &url);
        Ok(url)
    }

    fn inspect_export(&mut self, surface: &H::Surface, url: &str) {
        let probe_args = self.host.no_args();
        let context = match self.acquire_context(surface, CONTEXT_2D, &probe_args) {
            Ok(Some(context)) => context,
            Ok(None) => return,
            Err(_) => {
                log::debug!("context re-acquisition failed during export inspection");
                return;
            }
        };

        let (width, height) = self.host.surface_size(surface);
        let verdict = match self.evidence(&context) {
            Some(evidence) => classify(width, height, evidence),
            None => classify(width, height, &EvidenceRecorder::default()),
        };
        if verdict != Verdict::Flag {
            return;
        }

        log::debug!("flagged {}x{} canvas export", width, height);
        let marker = SignalMarker::new(url, self.host.current_script());
        if self.host.append_marker(&marker) {
            self.markers_emitted += 1;
        } else {
            log::debug!("signal marker dropped, document not ready");
        }
    }

    fn reroute_readback(
        &mut self,
        source: &H::Context,
        pixels: &H::Pixels,
    ) -> Result<(), H::Error> {
        let (width, height) = self.host.pixel_size(pixels);
        let surface = self.host.create_detached_surface(width, height)?;
        let probe_args = self.host.no_args();
        let copy = match self.acquire_context(&surface, CONTEXT_2D, &probe_args)? {
            Some(copy) => copy,
            None => return Ok(()),
        };

        // carry the source context's evidence over so the shared export path
        // sees the draws that produced these pixels
        if let Some(snapshot) = self.evidence(source).cloned() {
            if let Some(i) = self.entry_index(&copy) {
                self.contexts[i].recorder = Some(snapshot);
            }
        }

        self.host.write_pixels(&copy, pixels)?;
        let _ = self.export_and_classify(&surface, &probe_args)?;
        Ok(())
    }
}
