//! Brand analysis data models.
//!
//! The wire shape of `BrandAnalysis` is the contract consumed by every
//! report/visualization client, so the serde renames here must stay in
//! sync with [`crate::schema`].

use serde::{Deserialize, Serialize};

/// Maximum accepted video size: 200 MiB.
///
/// Enforced before any byte reaches the blob store.
pub const MAX_VIDEO_BYTES: u64 = 200 * 1024 * 1024;

/// An uploaded video on its way through the pipeline.
///
/// Created on upload, persisted once, then referenced by URI for every
/// subsequent operation. The URI never changes after persistence.
#[derive(Debug, Clone)]
pub struct VideoAsset {
    /// Raw video bytes as received from the caller.
    pub bytes: Vec<u8>,
    /// Size declared by the caller (bytes).
    pub size_bytes: u64,
    /// Original filename, used for object naming.
    pub filename: String,
    /// Storage URI, assigned exactly once after persistence.
    pub uri: Option<String>,
}

impl VideoAsset {
    /// Create a new, not-yet-persisted asset.
    pub fn new(bytes: Vec<u8>, size_bytes: u64, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            size_bytes,
            filename: filename.into(),
            uri: None,
        }
    }

    /// Whether the declared size is within the accepted upper bound.
    pub fn within_limit(&self) -> bool {
        self.size_bytes <= MAX_VIDEO_BYTES
    }
}

/// The validated result of one video analysis run.
///
/// Constructed exactly once per run by [`crate::validate::validate`] and
/// immutable thereafter. Consumers borrow it read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrandAnalysis {
    /// Reference to the analyzed video.
    pub video_url: String,

    /// Main themes covered by the creator, in relevance order.
    #[serde(rename = "temas_abordados")]
    pub themes: Vec<String>,

    /// Content style descriptor (e.g. humorous, informative).
    #[serde(rename = "estilo_conteudo")]
    pub content_style: String,

    /// Estimated audience profile.
    #[serde(rename = "publico_alvo_estimado")]
    pub audience: AudienceProfile,

    /// Description of audience engagement with the content.
    #[serde(rename = "engajamento")]
    pub engagement: String,

    /// Values promoted by the creator and the overall tone.
    #[serde(rename = "valores_e_tom")]
    pub values_tone: ValuesTone,

    /// Main platforms where the creator is active.
    #[serde(rename = "plataformas_principais")]
    pub platforms: Vec<String>,

    /// Prior brand collaborations, or a statement that there are none.
    #[serde(rename = "colaboracoes_anteriores")]
    pub prior_collaborations: String,

    /// Market niches most relevant to the creator.
    #[serde(rename = "nichos_de_mercado")]
    pub market_niches: Vec<String>,

    /// Brand categories that match the creator, in relevance order.
    #[serde(rename = "marcas_match")]
    pub brand_matches: Vec<BrandMatch>,

    /// Recommended collaboration formats.
    #[serde(rename = "tipos_de_colaboracao")]
    pub collaboration_types: Vec<String>,

    /// Considerations about the creator's image for brand fit.
    #[serde(rename = "consideracoes_imagem_marca")]
    pub brand_image_notes: String,
}

/// Estimated audience demographics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudienceProfile {
    /// Estimated age range (e.g. "18-24").
    #[serde(rename = "faixa_etaria")]
    pub age_range: String,

    /// Predominant gender skew (e.g. masculine, feminine, mixed).
    #[serde(rename = "genero")]
    pub gender: String,

    /// Main audience interests.
    #[serde(rename = "interesses")]
    pub interests: Vec<String>,

    /// Predominant audience geography.
    #[serde(rename = "localizacao_geografica")]
    pub geography: String,
}

/// Values promoted by the creator plus the overall tone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValuesTone {
    /// Values the creator appears to promote.
    #[serde(rename = "valores")]
    pub values: Vec<String>,

    /// Overall content tone (e.g. formal, informal).
    #[serde(rename = "tom")]
    pub tone: String,
}

/// One brand category matched to the creator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrandMatch {
    /// Brand category (e.g. "vegan beauty products").
    #[serde(rename = "tipo_marca")]
    pub brand_type: String,

    /// Concrete example brands in this category.
    #[serde(rename = "exemplos")]
    pub examples: Vec<String>,

    /// Why this category matches the creator. Never empty in a valid record.
    #[serde(rename = "justificativa")]
    pub justification: String,
}

impl BrandMatch {
    /// Whether the justification carries actual content.
    pub fn is_justified(&self) -> bool {
        !self.justification.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_asset_within_limit() {
        let asset = VideoAsset::new(vec![0u8; 16], 16, "clip.mp4");
        assert!(asset.within_limit());
        assert!(asset.uri.is_none());

        let oversize = VideoAsset::new(Vec::new(), MAX_VIDEO_BYTES + 1, "big.mp4");
        assert!(!oversize.within_limit());
    }

    #[test]
    fn test_limit_is_exactly_200_mib() {
        assert_eq!(MAX_VIDEO_BYTES, 209_715_200);
    }

    #[test]
    fn test_brand_match_justification_check() {
        let justified = BrandMatch {
            brand_type: "moda feminina".to_string(),
            examples: vec!["Farm".to_string()],
            justification: "Audience overlap with the category".to_string(),
        };
        assert!(justified.is_justified());

        let blank = BrandMatch {
            justification: "   ".to_string(),
            ..justified.clone()
        };
        assert!(!blank.is_justified());
    }

    #[test]
    fn test_wire_field_names() {
        let analysis = BrandAnalysis {
            video_url: "gs://bucket/uploads/clip.mp4".to_string(),
            themes: vec!["moda".to_string()],
            content_style: "informal".to_string(),
            audience: AudienceProfile {
                age_range: "18-24".to_string(),
                gender: "misto".to_string(),
                interests: vec!["moda".to_string()],
                geography: "Brasil".to_string(),
            },
            engagement: "alto".to_string(),
            values_tone: ValuesTone {
                values: vec!["autenticidade".to_string()],
                tone: "informal".to_string(),
            },
            platforms: vec!["Instagram".to_string()],
            prior_collaborations: "Nenhuma".to_string(),
            market_niches: vec!["moda".to_string()],
            brand_matches: vec![BrandMatch {
                brand_type: "moda feminina".to_string(),
                examples: vec!["Farm".to_string()],
                justification: "forte afinidade".to_string(),
            }],
            collaboration_types: vec!["post patrocinado".to_string()],
            brand_image_notes: "imagem positiva".to_string(),
        };

        let value = serde_json::to_value(&analysis).unwrap();
        let obj = value.as_object().unwrap();

        for key in [
            "video_url",
            "temas_abordados",
            "estilo_conteudo",
            "publico_alvo_estimado",
            "engajamento",
            "valores_e_tom",
            "plataformas_principais",
            "colaboracoes_anteriores",
            "nichos_de_mercado",
            "marcas_match",
            "tipos_de_colaboracao",
            "consideracoes_imagem_marca",
        ] {
            assert!(obj.contains_key(key), "missing wire field {key}");
        }

        let audience = obj["publico_alvo_estimado"].as_object().unwrap();
        assert!(audience.contains_key("faixa_etaria"));
        assert!(audience.contains_key("localizacao_geografica"));

        let matched = obj["marcas_match"][0].as_object().unwrap();
        assert!(matched.contains_key("tipo_marca"));
        assert!(matched.contains_key("exemplos"));
        assert!(matched.contains_key("justificativa"));
    }

    #[test]
    fn test_roundtrip() {
        let json = r#"{
            "video_url": "gs://b/uploads/v.mp4",
            "temas_abordados": ["moda", "lifestyle"],
            "estilo_conteudo": "informal",
            "publico_alvo_estimado": {
                "faixa_etaria": "18-24",
                "genero": "feminino",
                "interesses": ["moda"],
                "localizacao_geografica": "Brasil"
            },
            "engajamento": "alto engajamento em comentarios",
            "valores_e_tom": {"valores": ["autenticidade"], "tom": "informal"},
            "plataformas_principais": ["Instagram", "TikTok"],
            "colaboracoes_anteriores": "Nenhuma",
            "nichos_de_mercado": ["moda"],
            "marcas_match": [{
                "tipo_marca": "moda feminina",
                "exemplos": ["Farm", "Renner"],
                "justificativa": "afinidade com o publico"
            }],
            "tipos_de_colaboracao": ["post patrocinado"],
            "consideracoes_imagem_marca": "imagem consistente"
        }"#;

        let analysis: BrandAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.themes, vec!["moda", "lifestyle"]);
        assert_eq!(analysis.audience.age_range, "18-24");

        let reserialized = serde_json::to_string(&analysis).unwrap();
        let reparsed: BrandAnalysis = serde_json::from_str(&reserialized).unwrap();
        assert_eq!(analysis, reparsed);
    }
}
