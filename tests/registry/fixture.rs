use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pipeline_registry::{
    member, Capability, CapabilityProbe, Contribution, DetectError, Detector, LazyNamespace,
    Members, Provider, ProviderError, ProviderSet, SymbolTable,
};

/// Value every test provider hands out: the symbol name it was built for.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FakePipeline(pub(crate) String);

/// Provider that counts loads, can fail its first attempts, and can stall
/// to widen race windows.
pub(crate) struct CountingProvider {
    symbols: Vec<String>,
    loads: Arc<AtomicUsize>,
    failures_left: AtomicUsize,
    delay: Option<Duration>,
}

impl CountingProvider {
    pub(crate) fn new(symbols: &[&str]) -> Self {
        Self {
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            loads: Arc::new(AtomicUsize::new(0)),
            failures_left: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub(crate) fn failing_first(self, attempts: usize) -> Self {
        self.failures_left.store(attempts, Ordering::SeqCst);
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn loads(&self) -> Arc<AtomicUsize> {
        self.loads.clone()
    }
}

#[async_trait]
impl Provider for CountingProvider {
    async fn load(&self, group: &str) -> Result<Members, ProviderError> {
        self.loads.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let should_fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(format!("group '{}' failed to initialize", group).into());
        }

        Ok(self
            .symbols
            .iter()
            .map(|name| (name.clone(), member(FakePipeline(name.clone()))))
            .collect())
    }
}

/// Detector that counts how often it runs.
pub(crate) struct CountingDetector {
    answer: bool,
    probes: Arc<AtomicUsize>,
}

impl CountingDetector {
    pub(crate) fn new(answer: bool) -> (Self, Arc<AtomicUsize>) {
        let probes = Arc::new(AtomicUsize::new(0));
        (
            Self {
                answer,
                probes: probes.clone(),
            },
            probes,
        )
    }
}

impl Detector for CountingDetector {
    fn detect(&self) -> Result<bool, DetectError> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer)
    }
}

pub(crate) fn count(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}

/// Small three-group namespace:
/// - `ddim`: `DDIMPipeline` (torch), `DDIMScheduler` (none)
/// - `audio`: `AudioLDMPipeline` (torch + librosa)
/// - `onnx_utils`: `OnnxRuntimeModel` (onnx)
pub(crate) struct Harness {
    pub(crate) namespace: Arc<LazyNamespace>,
    pub(crate) ddim_loads: Arc<AtomicUsize>,
    pub(crate) audio_loads: Arc<AtomicUsize>,
    pub(crate) onnx_loads: Arc<AtomicUsize>,
    pub(crate) librosa_probes: Arc<AtomicUsize>,
}

pub(crate) struct HarnessOptions {
    pub(crate) torch: bool,
    pub(crate) librosa: bool,
    pub(crate) onnx: bool,
    pub(crate) ddim_delay: Option<Duration>,
    pub(crate) ddim_failures: usize,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            torch: true,
            librosa: false,
            onnx: true,
            ddim_delay: None,
            ddim_failures: 0,
        }
    }
}

pub(crate) fn table() -> SymbolTable {
    SymbolTable::builder()
        .contribute(Contribution::new("ddim", ["DDIMPipeline"], ["torch"]))
        .contribute(Contribution::new("audio", ["AudioLDMPipeline"], ["torch", "librosa"]))
        .contribute(Contribution::new("onnx_utils", ["OnnxRuntimeModel"], ["onnx"]))
        .contribute(Contribution::new("ddim", ["DDIMScheduler"], Vec::<String>::new()))
        .build()
        .expect("fixture table is valid")
}

pub(crate) fn harness(options: HarnessOptions) -> Harness {
    let (librosa, librosa_probes) = CountingDetector::new(options.librosa);
    let probe = CapabilityProbe::new()
        .with_capability(
            Capability::new("torch").with_hint("install libtorch"),
            pipeline_registry::Fixed(options.torch),
        )
        .with_capability(Capability::new("librosa").with_hint("enable audio features"), librosa)
        .with_capability(Capability::new("onnx"), pipeline_registry::Fixed(options.onnx));

    let mut ddim = CountingProvider::new(&["DDIMPipeline", "DDIMScheduler"])
        .failing_first(options.ddim_failures);
    if let Some(delay) = options.ddim_delay {
        ddim = ddim.with_delay(delay);
    }
    let audio = CountingProvider::new(&["AudioLDMPipeline"]);
    let onnx = CountingProvider::new(&["OnnxRuntimeModel"]);

    let ddim_loads = ddim.loads();
    let audio_loads = audio.loads();
    let onnx_loads = onnx.loads();

    let providers = ProviderSet::new()
        .with("ddim", ddim)
        .with("audio", audio)
        .with("onnx_utils", onnx);

    Harness {
        namespace: Arc::new(LazyNamespace::new(table(), Arc::new(probe), providers)),
        ddim_loads,
        audio_loads,
        onnx_loads,
        librosa_probes,
    }
}
