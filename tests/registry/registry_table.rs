use std::sync::Arc;

use pipeline_registry::{
    CapabilityProbe, Contribution, Error, LazyNamespace, ProviderSet, RegistryConfig, SymbolTable,
    SymbolTableBuilder,
};

use crate::fixture::{count, CountingProvider};

#[tokio::test]
async fn test_extended_group_resolves_union() {
    let table = SymbolTable::builder()
        .contribute(Contribution::new(
            "stable_diffusion",
            ["StableDiffusionPipeline"],
            Vec::<String>::new(),
        ))
        .contribute(Contribution::new(
            "stable_diffusion",
            ["StableDiffusionImg2ImgPipeline", "StableDiffusionInpaintPipeline"],
            Vec::<String>::new(),
        ))
        .build()
        .unwrap();

    let group = table.group("stable_diffusion").unwrap();
    assert_eq!(group.symbols.len(), 3);

    let provider = CountingProvider::new(&[
        "StableDiffusionPipeline",
        "StableDiffusionImg2ImgPipeline",
        "StableDiffusionInpaintPipeline",
    ]);
    let loads = provider.loads();
    let namespace = LazyNamespace::new(
        table,
        Arc::new(CapabilityProbe::new()),
        ProviderSet::new().with("stable_diffusion", provider),
    );

    for name in namespace.list_names() {
        assert!(namespace.resolve(name).await.unwrap().is_live());
    }
    assert_eq!(count(&loads), 1);
}

#[test]
fn test_overlapping_contributions_fail_at_construction() {
    let result = SymbolTable::builder()
        .contribute(Contribution::new(
            "controlnet",
            ["StableDiffusionControlNetPipeline"],
            ["torch"],
        ))
        .contribute(Contribution::new(
            "controlnet",
            ["FlaxStableDiffusionControlNetPipeline", "StableDiffusionControlNetPipeline"],
            ["flax"],
        ))
        .build();

    assert!(matches!(
        result,
        Err(Error::DuplicateSymbol { ref name, .. }) if name == "StableDiffusionControlNetPipeline"
    ));
}

#[tokio::test]
async fn test_config_contribution_clashing_with_catalog() {
    let config = RegistryConfig::from_json(
        r#"{"contributions": [{"group": "custom", "symbols": ["DDIMPipeline"]}]}"#,
    )
    .unwrap();

    let result = LazyNamespace::with_catalog(ProviderSet::new(), &config).await;
    assert!(matches!(result, Err(Error::DuplicateSymbol { .. })));
}

#[tokio::test]
async fn test_config_contribution_extends_catalog() {
    let config = RegistryConfig {
        disabled: vec!["torch".to_string()],
        contributions: vec![Contribution::new("custom", ["MyPipeline"], Vec::<String>::new())],
        ..Default::default()
    };

    let provider = CountingProvider::new(&["MyPipeline"]);
    let providers = ProviderSet::new().with("custom", provider);
    let namespace = LazyNamespace::with_catalog(providers, &config)
        .await
        .unwrap();

    assert!(namespace.contains("MyPipeline"));
    assert_eq!(
        namespace.len(),
        SymbolTableBuilder::with_catalog().build().unwrap().len() + 1
    );
    assert!(namespace.resolve("MyPipeline").await.unwrap().is_live());
    assert!(namespace.resolve("DDIMPipeline").await.unwrap().is_gated());
}
