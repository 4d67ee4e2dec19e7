use std::sync::Arc;

use pipeline_registry::{
    builtin_probe, Availability, LazyNamespace, ProviderSet, RegistryConfig, SymbolTableBuilder,
};

use crate::fixture::{count, CountingProvider};

fn all_disabled() -> RegistryConfig {
    RegistryConfig {
        disabled: ["torch", "transformers", "librosa", "note_seq", "onnx", "k_diffusion", "flax"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_without_backends_everything_is_listed_and_gated() {
    let namespace = LazyNamespace::with_catalog(ProviderSet::new(), &all_disabled())
        .await
        .unwrap();

    assert!(namespace.len() > 100);
    assert_eq!(namespace.resolved_count(), 0);

    let partition = namespace.partition();
    assert!(partition.live.is_empty());
    assert_eq!(partition.gated.len(), namespace.len());

    let symbol = namespace.resolve("StableDiffusionKDiffusionPipeline").await.unwrap();
    let message = symbol.value().unwrap_err().to_string();
    for cap in ["torch", "transformers", "k_diffusion"] {
        assert!(message.contains(cap), "{message} should mention {cap}");
    }
}

#[tokio::test]
async fn test_probe_on_init_evaluates_every_capability() {
    let config = RegistryConfig {
        enabled: vec!["torch".to_string()],
        ..all_disabled()
    };
    let table = SymbolTableBuilder::with_catalog().build().unwrap();
    let probe = Arc::new(builtin_probe(&config));
    let namespace = LazyNamespace::bootstrap(table, probe, ProviderSet::new(), &config)
        .await
        .unwrap();

    for cap in ["torch", "transformers", "librosa", "note_seq", "onnx", "k_diffusion", "flax"] {
        assert_ne!(namespace.probe().availability(cap), Availability::Unknown, "{cap}");
    }
    // disabled wins over enabled
    assert_eq!(namespace.probe().availability("torch"), Availability::Unavailable);
}

#[tokio::test]
async fn test_lazy_probe_when_probe_on_init_is_off() {
    let config = RegistryConfig {
        probe_on_init: false,
        ..Default::default()
    };
    let table = SymbolTableBuilder::with_catalog().build().unwrap();
    let probe = Arc::new(builtin_probe(&config));
    let namespace = LazyNamespace::bootstrap(table, probe, ProviderSet::new(), &config)
        .await
        .unwrap();

    assert_eq!(namespace.probe().availability("flax"), Availability::Unknown);
}

#[tokio::test]
async fn test_eager_mode_loads_every_live_group() {
    let config = RegistryConfig {
        eager: true,
        enabled: vec!["onnx".to_string()],
        disabled: ["torch", "transformers", "librosa", "note_seq", "k_diffusion", "flax"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        ..Default::default()
    };

    let provider = CountingProvider::new(&["OnnxRuntimeModel"]);
    let loads = provider.loads();
    let providers = ProviderSet::new().with("onnx_utils", provider);
    let namespace = LazyNamespace::with_catalog(providers, &config)
        .await
        .unwrap();

    assert_eq!(namespace.resolved_count(), namespace.len());
    assert!(namespace.is_group_loaded("onnx_utils"));
    assert_eq!(count(&loads), 1);
    assert!(namespace.resolve("OnnxRuntimeModel").await.unwrap().is_live());
}

#[tokio::test]
async fn test_eager_mode_surfaces_load_failures() {
    let config = RegistryConfig {
        eager: true,
        enabled: vec!["onnx".to_string()],
        ..all_disabled()
    };
    let config = RegistryConfig {
        disabled: config.disabled.into_iter().filter(|c| c != "onnx").collect(),
        ..config
    };

    let result = LazyNamespace::with_catalog(ProviderSet::new(), &config).await;
    assert!(matches!(
        result,
        Err(pipeline_registry::Error::NoProvider { ref group }) if group == "onnx_utils"
    ));
}
