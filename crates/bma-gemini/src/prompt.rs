//! The brand-compatibility prompt template.
//!
//! A versioned, static text asset. The enumerated dimensions must match
//! the schema contract's top-level field set exactly; the test at the
//! bottom diff-checks the two so prompt coverage and schema shape cannot
//! drift apart.

/// Bump when the instruction text changes in a way that affects output.
pub const PROMPT_VERSION: &str = "2025-08-01";

/// Placeholder replaced by the stored video's URI.
const VIDEO_URI_SLOT: &str = "{video_uri}";

/// The instruction set sent with every analysis request.
pub const PROMPT_TEMPLATE: &str = "\
You are a brand-partnership analyst. Watch the attached creator video \
({video_uri}) and produce a brand-compatibility assessment as a single \
JSON object. Base every inference on what is actually visible or audible \
in the video; when the video gives no signal for a dimension, give your \
best estimate from the content's overall profile rather than leaving the \
field out.

Fill in every one of the following fields:
- video_url: the exact URI of the analyzed video, unchanged.
- temas_abordados: the main themes the creator covers, most prominent first.
- estilo_conteudo: the creator's content style (e.g. humorous, informative, educational).
- publico_alvo_estimado: the estimated audience, with faixa_etaria (age range), \
genero (predominant gender), interesses (main interests), and \
localizacao_geografica (predominant geography).
- engajamento: how the audience engages with this content.
- valores_e_tom: valores (values the creator promotes) and tom (overall tone).
- plataformas_principais: the platforms where this content and creator fit best.
- colaboracoes_anteriores: visible or mentioned prior brand collaborations, \
or 'Nenhuma' if there are none.
- nichos_de_mercado: the market niches with the highest relevance for the creator.
- marcas_match: brand categories that would be a strong match, each with \
tipo_marca, exemplos (concrete example brands), and justificativa (why the \
category fits this creator).
- tipos_de_colaboracao: the collaboration formats most likely to work.
- consideracoes_imagem_marca: considerations about the creator's image that a \
brand should weigh before partnering.

Respond with the JSON object only.
";

/// The dimensions the template promises to cover, in schema order.
pub const PROMPT_DIMENSIONS: &[&str] = &[
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
];

/// Substitute the video reference into the template.
pub fn render_prompt(video_uri: &str) -> String {
    PROMPT_TEMPLATE.replace(VIDEO_URI_SLOT, video_uri)
}
