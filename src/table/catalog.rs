//! Built-in pipeline catalog.
//!
//! Every public pipeline symbol, its group, and the backends it needs.
//! Several groups are extended by more than one contribution, one per
//! backend combination.

use crate::capability::{FLAX, K_DIFFUSION, LIBROSA, NOTE_SEQ, ONNX, TORCH, TRANSFORMERS};
use crate::table::Contribution;

/// Contribution with static data.
#[derive(Debug, Clone, Copy)]
pub struct StaticContribution {
    pub group: &'static str,
    pub symbols: &'static [&'static str],
    pub requires: &'static [&'static str],
}

impl From<&StaticContribution> for Contribution {
    fn from(c: &StaticContribution) -> Self {
        Contribution::new(c.group, c.symbols.iter().copied(), c.requires.iter().copied())
    }
}

/// Owned copies of the catalog, ready for [`SymbolTableBuilder`](super::SymbolTableBuilder).
pub fn contributions() -> impl Iterator<Item = Contribution> {
    CONTRIBUTIONS.iter().map(Contribution::from)
}

pub const CONTRIBUTIONS: &[StaticContribution] = &[
    StaticContribution {
        group: "auto_pipeline",
        symbols: &[
            "AutoPipelineForImage2Image",
            "AutoPipelineForInpainting",
            "AutoPipelineForText2Image",
        ],
        requires: &[TORCH],
    },
    StaticContribution {
        group: "consistency_models",
        symbols: &["ConsistencyModelPipeline"],
        requires: &[TORCH],
    },
    StaticContribution {
        group: "dance_diffusion",
        symbols: &["DanceDiffusionPipeline"],
        requires: &[TORCH],
    },
    StaticContribution {
        group: "ddim",
        symbols: &["DDIMPipeline"],
        requires: &[TORCH],
    },
    StaticContribution {
        group: "ddpm",
        symbols: &["DDPMPipeline"],
        requires: &[TORCH],
    },
    StaticContribution {
        group: "dit",
        symbols: &["DiTPipeline"],
        requires: &[TORCH],
    },
    StaticContribution {
        group: "latent_diffusion",
        symbols: &["LDMSuperResolutionPipeline"],
        requires: &[TORCH],
    },
    StaticContribution {
        group: "pipeline_utils",
        symbols: &[
            "AudioPipelineOutput",
            "DiffusionPipeline",
            "ImagePipelineOutput",
        ],
        requires: &[TORCH],
    },
    StaticContribution {
        group: "deprecated",
        symbols: &[
            "PNDMPipeline",
            "LDMPipeline",
            "RePaintPipeline",
            "ScoreSdeVePipeline",
            "KarrasVePipeline",
        ],
        requires: &[TORCH],
    },
    StaticContribution {
        group: "deprecated",
        symbols: &["AudioDiffusionPipeline", "Mel"],
        requires: &[TORCH, LIBROSA],
    },
    StaticContribution {
        group: "deprecated",
        symbols: &["MidiProcessor", "SpectrogramDiffusionPipeline"],
        requires: &[TRANSFORMERS, TORCH, NOTE_SEQ],
    },
    StaticContribution {
        group: "deprecated",
        symbols: &[
            "VQDiffusionPipeline",
            "AltDiffusionPipeline",
            "AltDiffusionImg2ImgPipeline",
            "CycleDiffusionPipeline",
            "StableDiffusionInpaintPipelineLegacy",
            "StableDiffusionPix2PixZeroPipeline",
            "StableDiffusionParadigmsPipeline",
            "StableDiffusionModelEditingPipeline",
            "VersatileDiffusionDualGuidedPipeline",
            "VersatileDiffusionImageVariationPipeline",
            "VersatileDiffusionPipeline",
            "VersatileDiffusionTextToImagePipeline",
        ],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "animatediff",
        symbols: &["AnimateDiffPipeline"],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "audioldm",
        symbols: &["AudioLDMPipeline"],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "audioldm2",
        symbols: &[
            "AudioLDM2Pipeline",
            "AudioLDM2ProjectionModel",
            "AudioLDM2UNet2DConditionModel",
        ],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "blip_diffusion",
        symbols: &["BlipDiffusionPipeline"],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "controlnet",
        symbols: &[
            "BlipDiffusionControlNetPipeline",
            "StableDiffusionControlNetImg2ImgPipeline",
            "StableDiffusionControlNetInpaintPipeline",
            "StableDiffusionControlNetPipeline",
            "StableDiffusionXLControlNetImg2ImgPipeline",
            "StableDiffusionXLControlNetInpaintPipeline",
            "StableDiffusionXLControlNetPipeline",
        ],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "controlnet_xs",
        symbols: &[
            "StableDiffusionControlNetXSPipeline",
            "StableDiffusionXLControlNetXSPipeline",
        ],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "deepfloyd_if",
        symbols: &[
            "IFImg2ImgPipeline",
            "IFImg2ImgSuperResolutionPipeline",
            "IFInpaintingPipeline",
            "IFInpaintingSuperResolutionPipeline",
            "IFPipeline",
            "IFSuperResolutionPipeline",
        ],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "kandinsky",
        symbols: &[
            "KandinskyCombinedPipeline",
            "KandinskyImg2ImgCombinedPipeline",
            "KandinskyImg2ImgPipeline",
            "KandinskyInpaintCombinedPipeline",
            "KandinskyInpaintPipeline",
            "KandinskyPipeline",
            "KandinskyPriorPipeline",
        ],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "kandinsky2_2",
        symbols: &[
            "KandinskyV22CombinedPipeline",
            "KandinskyV22ControlnetImg2ImgPipeline",
            "KandinskyV22ControlnetPipeline",
            "KandinskyV22Img2ImgCombinedPipeline",
            "KandinskyV22Img2ImgPipeline",
            "KandinskyV22InpaintCombinedPipeline",
            "KandinskyV22InpaintPipeline",
            "KandinskyV22Pipeline",
            "KandinskyV22PriorEmb2EmbPipeline",
            "KandinskyV22PriorPipeline",
        ],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "kandinsky3",
        symbols: &["Kandinsky3Img2ImgPipeline", "Kandinsky3Pipeline"],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "latent_consistency_models",
        symbols: &[
            "LatentConsistencyModelImg2ImgPipeline",
            "LatentConsistencyModelPipeline",
        ],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "latent_diffusion",
        symbols: &["LDMTextToImagePipeline"],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "musicldm",
        symbols: &["MusicLDMPipeline"],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "paint_by_example",
        symbols: &["PaintByExamplePipeline"],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "pixart_alpha",
        symbols: &["PixArtAlphaPipeline"],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "semantic_stable_diffusion",
        symbols: &["SemanticStableDiffusionPipeline"],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "shap_e",
        symbols: &["ShapEImg2ImgPipeline", "ShapEPipeline"],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "stable_diffusion",
        symbols: &[
            "CLIPImageProjection",
            "StableDiffusionAttendAndExcitePipeline",
            "StableDiffusionDepth2ImgPipeline",
            "StableDiffusionGLIGENPipeline",
            "StableDiffusionGLIGENTextImagePipeline",
            "StableDiffusionImageVariationPipeline",
            "StableDiffusionImg2ImgPipeline",
            "StableDiffusionInpaintPipeline",
            "StableDiffusionInstructPix2PixPipeline",
            "StableDiffusionLatentUpscalePipeline",
            "StableDiffusionLDM3DPipeline",
            "StableDiffusionPanoramaPipeline",
            "StableDiffusionPipeline",
            "StableDiffusionSAGPipeline",
            "StableDiffusionUpscalePipeline",
            "StableUnCLIPImg2ImgPipeline",
            "StableUnCLIPPipeline",
        ],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "stable_diffusion_safe",
        symbols: &["StableDiffusionPipelineSafe"],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "stable_video_diffusion",
        symbols: &["StableVideoDiffusionPipeline"],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "stable_diffusion_xl",
        symbols: &[
            "StableDiffusionXLImg2ImgPipeline",
            "StableDiffusionXLInpaintPipeline",
            "StableDiffusionXLInstructPix2PixPipeline",
            "StableDiffusionXLPipeline",
        ],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "stable_diffusion_diffedit",
        symbols: &["StableDiffusionDiffEditPipeline"],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "t2i_adapter",
        symbols: &[
            "StableDiffusionAdapterPipeline",
            "StableDiffusionXLAdapterPipeline",
        ],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "text_to_video_synthesis",
        symbols: &[
            "TextToVideoSDPipeline",
            "TextToVideoZeroPipeline",
            "TextToVideoZeroSDXLPipeline",
            "VideoToVideoSDPipeline",
        ],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "unclip",
        symbols: &["UnCLIPImageVariationPipeline", "UnCLIPPipeline"],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "unidiffuser",
        symbols: &[
            "ImageTextPipelineOutput",
            "UniDiffuserModel",
            "UniDiffuserPipeline",
            "UniDiffuserTextDecoder",
        ],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "wuerstchen",
        symbols: &[
            "WuerstchenCombinedPipeline",
            "WuerstchenDecoderPipeline",
            "WuerstchenPriorPipeline",
        ],
        requires: &[TORCH, TRANSFORMERS],
    },
    StaticContribution {
        group: "onnx_utils",
        symbols: &["OnnxRuntimeModel"],
        requires: &[ONNX],
    },
    StaticContribution {
        group: "stable_diffusion",
        symbols: &[
            "OnnxStableDiffusionImg2ImgPipeline",
            "OnnxStableDiffusionInpaintPipeline",
            "OnnxStableDiffusionPipeline",
            "OnnxStableDiffusionUpscalePipeline",
            "StableDiffusionOnnxPipeline",
        ],
        requires: &[TORCH, TRANSFORMERS, ONNX],
    },
    StaticContribution {
        group: "stable_diffusion",
        symbols: &["StableDiffusionKDiffusionPipeline"],
        requires: &[TORCH, TRANSFORMERS, K_DIFFUSION],
    },
    StaticContribution {
        group: "pipeline_flax_utils",
        symbols: &["FlaxDiffusionPipeline"],
        requires: &[FLAX],
    },
    StaticContribution {
        group: "controlnet",
        symbols: &["FlaxStableDiffusionControlNetPipeline"],
        requires: &[FLAX, TRANSFORMERS],
    },
    StaticContribution {
        group: "stable_diffusion",
        symbols: &[
            "FlaxStableDiffusionImg2ImgPipeline",
            "FlaxStableDiffusionInpaintPipeline",
            "FlaxStableDiffusionPipeline",
        ],
        requires: &[FLAX, TRANSFORMERS],
    },
    StaticContribution {
        group: "stable_diffusion_xl",
        symbols: &["FlaxStableDiffusionXLPipeline"],
        requires: &[FLAX, TRANSFORMERS],
    },
];
