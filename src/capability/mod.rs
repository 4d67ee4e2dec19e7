//! Optional backend capabilities.
//!
//! This module provides:
//! - Detector implementations (`detect`)
//! - The memoizing probe (`probe`)
//! - The built-in backend set used by the pipeline catalog

pub mod detect;
pub mod probe;

use serde::{Deserialize, Serialize};

pub use detect::{AnyOf, DetectError, Detector, EnvFlag, Fixed, FnDetector, LibraryDetector};
pub use probe::{Availability, CapabilityProbe};

use crate::config::RegistryConfig;

pub const TORCH: &str = "torch";
pub const TRANSFORMERS: &str = "transformers";
pub const LIBROSA: &str = "librosa";
pub const NOTE_SEQ: &str = "note_seq";
pub const ONNX: &str = "onnx";
pub const K_DIFFUSION: &str = "k_diffusion";
pub const FLAX: &str = "flax";

/// A named optional backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub name: String,
    /// How to make the capability available
    pub hint: Option<String>,
}

impl Capability {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// (name, shared library stem, root directory variable, hint)
const BUILTIN: &[(&str, Option<&str>, Option<&str>, &str)] = &[
    (TORCH, Some("torch"), Some("LIBTORCH"), "Install libtorch and point LIBTORCH at it"),
    (
        TRANSFORMERS,
        Some("tokenizers"),
        Some("TOKENIZERS_LIB_DIR"),
        "Install the tokenizers runtime library",
    ),
    (LIBROSA, None, None, "Enable the audio feature backend"),
    (NOTE_SEQ, None, None, "Enable the note sequence backend"),
    (
        ONNX,
        Some("onnxruntime"),
        Some("ORT_LIB_LOCATION"),
        "Install onnxruntime and point ORT_LIB_LOCATION at it",
    ),
    (K_DIFFUSION, None, None, "Enable the k-diffusion sampler backend"),
    (
        FLAX,
        Some("xla_extension"),
        Some("XLA_EXTENSION_DIR"),
        "Install the XLA extension and point XLA_EXTENSION_DIR at it",
    ),
];

/// Environment switch that marks a capability present, e.g. `USE_TORCH=1`.
pub fn use_var(name: &str) -> String {
    format!("USE_{}", name.to_ascii_uppercase())
}

/// Probe over the built-in backend set, with configuration overrides applied.
pub fn builtin_probe(config: &RegistryConfig) -> CapabilityProbe {
    let mut probe = CapabilityProbe::new();

    for (name, stem, dir_var, hint) in BUILTIN {
        let mut detectors: Vec<Box<dyn Detector>> = vec![Box::new(EnvFlag::new(use_var(name)))];
        if let Some(stem) = stem {
            let mut library = LibraryDetector::new(*stem);
            if let Some(var) = dir_var {
                library = library.with_dir_var(*var);
            }
            detectors.push(Box::new(library));
        }

        let hint = format!("{} (or set {}=1)", hint, use_var(name));
        probe.register(Capability::new(*name).with_hint(hint), Box::new(AnyOf(detectors)));
    }

    probe.with_overrides(config)
}
