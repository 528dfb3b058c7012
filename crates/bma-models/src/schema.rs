//! Canonical schema contract for the model's JSON output.
//!
//! There is exactly one definition of the required output shape: the
//! [`CONTRACT`] table below. The Gemini-side `responseSchema` constraint
//! ([`response_schema`]) and the parser-side walk in [`crate::validate`]
//! are both derived from it, so the two consumers cannot drift.

use serde_json::{json, Value};

/// The shape a single field may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A JSON string.
    Text,
    /// An array of JSON strings.
    TextArray,
    /// A nested object with its own field specs.
    Object(&'static [FieldSpec]),
    /// An array of nested objects.
    ObjectArray(&'static [FieldSpec]),
}

/// Declarative spec for one field of the output schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name of the field.
    pub name: &'static str,
    /// Expected shape.
    pub kind: FieldKind,
    /// Whether the field must be present and non-null.
    pub required: bool,
    /// Description passed to the model to steer generation.
    pub description: &'static str,
}

const AUDIENCE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "faixa_etaria",
        kind: FieldKind::Text,
        required: true,
        description: "Estimated age range of the audience.",
    },
    FieldSpec {
        name: "genero",
        kind: FieldKind::Text,
        required: true,
        description: "Predominant audience gender (e.g. masculine, feminine, mixed).",
    },
    FieldSpec {
        name: "interesses",
        kind: FieldKind::TextArray,
        required: true,
        description: "Main interests of the audience.",
    },
    FieldSpec {
        name: "localizacao_geografica",
        kind: FieldKind::Text,
        required: true,
        description: "Predominant audience geography.",
    },
];

const VALUES_TONE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "valores",
        kind: FieldKind::TextArray,
        required: true,
        description: "Values the creator appears to promote.",
    },
    FieldSpec {
        name: "tom",
        kind: FieldKind::Text,
        required: true,
        description: "Overall tone of the content (e.g. formal, informal).",
    },
];

const BRAND_MATCH_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "tipo_marca",
        kind: FieldKind::Text,
        required: true,
        description: "Brand category (e.g. women's fashion, vegan beauty products).",
    },
    FieldSpec {
        name: "exemplos",
        kind: FieldKind::TextArray,
        required: true,
        description: "Concrete example brands in this category.",
    },
    FieldSpec {
        name: "justificativa",
        kind: FieldKind::Text,
        required: true,
        description: "Why this category matches the creator.",
    },
];

/// The canonical output contract, one entry per top-level field.
pub const CONTRACT: &[FieldSpec] = &[
    FieldSpec {
        name: "video_url",
        kind: FieldKind::Text,
        required: true,
        description: "URI of the analyzed video.",
    },
    FieldSpec {
        name: "temas_abordados",
        kind: FieldKind::TextArray,
        required: true,
        description: "Main themes covered by the creator in the video.",
    },
    FieldSpec {
        name: "estilo_conteudo",
        kind: FieldKind::Text,
        required: true,
        description: "Style of the creator's content (e.g. humorous, informative).",
    },
    FieldSpec {
        name: "publico_alvo_estimado",
        kind: FieldKind::Object(AUDIENCE_FIELDS),
        required: true,
        description: "Estimated audience profile of the creator.",
    },
    FieldSpec {
        name: "engajamento",
        kind: FieldKind::Text,
        required: true,
        description: "Description of audience engagement with the content.",
    },
    FieldSpec {
        name: "valores_e_tom",
        kind: FieldKind::Object(VALUES_TONE_FIELDS),
        required: true,
        description: "Values and tone of the creator's content.",
    },
    FieldSpec {
        name: "plataformas_principais",
        kind: FieldKind::TextArray,
        required: true,
        description: "Main platforms where the creator is active.",
    },
    FieldSpec {
        name: "colaboracoes_anteriores",
        kind: FieldKind::Text,
        required: true,
        description: "Prior brand collaborations, or 'Nenhuma' if there are none.",
    },
    FieldSpec {
        name: "nichos_de_mercado",
        kind: FieldKind::TextArray,
        required: true,
        description: "Market niches most relevant to the creator.",
    },
    FieldSpec {
        name: "marcas_match",
        kind: FieldKind::ObjectArray(BRAND_MATCH_FIELDS),
        required: true,
        description: "Brand categories that would be a good match for the creator.",
    },
    FieldSpec {
        name: "tipos_de_colaboracao",
        kind: FieldKind::TextArray,
        required: true,
        description: "Most effective collaboration formats for the creator.",
    },
    FieldSpec {
        name: "consideracoes_imagem_marca",
        kind: FieldKind::Text,
        required: true,
        description: "Considerations about the creator's image for a positive brand match.",
    },
];

/// Names of the top-level fields, in contract order.
pub fn top_level_fields() -> Vec<&'static str> {
    CONTRACT.iter().map(|f| f.name).collect()
}

/// Render the contract as a Gemini `responseSchema` document.
///
/// Gemini's schema dialect uses uppercase type names and per-object
/// `required` lists.
pub fn response_schema() -> Value {
    object_schema(CONTRACT)
}

fn object_schema(fields: &[FieldSpec]) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();

    for field in fields {
        properties.insert(field.name.to_string(), field_schema(field));
        if field.required {
            required.push(Value::String(field.name.to_string()));
        }
    }

    json!({
        "type": "OBJECT",
        "properties": Value::Object(properties),
        "required": Value::Array(required),
    })
}

fn field_schema(field: &FieldSpec) -> Value {
    let mut schema = match field.kind {
        FieldKind::Text => json!({ "type": "STRING" }),
        FieldKind::TextArray => json!({
            "type": "ARRAY",
            "items": { "type": "STRING" },
        }),
        FieldKind::Object(fields) => object_schema(fields),
        FieldKind::ObjectArray(fields) => json!({
            "type": "ARRAY",
            "items": object_schema(fields),
        }),
    };

    schema.as_object_mut().expect("schema is always an object").insert(
        "description".to_string(),
        Value::String(field.description.to_string()),
    );
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_has_twelve_top_level_fields() {
        assert_eq!(CONTRACT.len(), 12);
        assert!(CONTRACT.iter().all(|f| f.required));
    }

    #[test]
    fn test_response_schema_marks_all_fields_required() {
        let schema = response_schema();
        assert_eq!(schema["type"], "OBJECT");

        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, top_level_fields());
    }

    #[test]
    fn test_response_schema_nested_objects() {
        let schema = response_schema();

        let audience = &schema["properties"]["publico_alvo_estimado"];
        assert_eq!(audience["type"], "OBJECT");
        let audience_required = audience["required"].as_array().unwrap();
        assert_eq!(audience_required.len(), 4);

        let matches = &schema["properties"]["marcas_match"];
        assert_eq!(matches["type"], "ARRAY");
        assert_eq!(matches["items"]["type"], "OBJECT");
        assert_eq!(
            matches["items"]["properties"]["justificativa"]["type"],
            "STRING"
        );
    }

    #[test]
    fn test_response_schema_array_fields() {
        let schema = response_schema();
        for name in [
            "temas_abordados",
            "plataformas_principais",
            "nichos_de_mercado",
            "tipos_de_colaboracao",
        ] {
            let field = &schema["properties"][name];
            assert_eq!(field["type"], "ARRAY", "{name} should be an array");
            assert_eq!(field["items"]["type"], "STRING");
        }
    }

    #[test]
    fn test_every_field_carries_a_description() {
        fn assert_described(fields: &[FieldSpec]) {
            for f in fields {
                assert!(!f.description.is_empty(), "{} lacks a description", f.name);
                match f.kind {
                    FieldKind::Object(nested) | FieldKind::ObjectArray(nested) => {
                        assert_described(nested)
                    }
                    _ => {}
                }
            }
        }
        assert_described(CONTRACT);
    }
}
