//! The tamper-evident side-channel signal emitted on a flag verdict.
//!
//! A marker is a passive, invisible image element carrying the flagged
//! export's data URL and the identity of the script that triggered it,
//! tagged with a fixed class token so an external collector can discover it.
//! Markers are created fresh per flagged export and never deduplicated.

use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Element tag used for markers.
pub const MARKER_TAG: &str = "img";

/// Class token the external collector discovers markers by.
pub const MARKER_CLASS: &str = "canvas_img_crawler";

/// Attribute carrying the serialized invoking-script identity.
pub const CALLEE_ATTR: &str = "data-callee";

/// Description of the script element executing at export time.
///
/// Serialized into the marker's identity attribute. `src` is the script's
/// source attribute as written (absent for inline scripts), `id` its element
/// id when non-empty, `text_len` the length of its inline text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptDescriptor {
    pub src: Option<String>,
    pub id: Option<String>,
    pub text_len: usize,
}

/// One flagged export, ready for insertion into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalMarker {
    image_url: String,
    callee: String,
}

impl SignalMarker {
    /// Build a marker for a flagged export. `script` is the invoking script
    /// element at export time, or `None` when the export is not attributable
    /// to a script (the callee attribute then holds the literal `null`).
    pub fn new(image_url: &str, script: Option<ScriptDescriptor>) -> Self {
        let callee = script
            .as_ref()
            .and_then(|s| serde_json::to_string(s).ok())
            .unwrap_or_else(|| String::from("null"));
        Self {
            image_url: String::from(image_url),
            callee,
        }
    }

    /// The exported data URL, verbatim.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Serialized invoking-script identity, or `null`.
    pub fn callee(&self) -> &str {
        &self.callee
    }
}
