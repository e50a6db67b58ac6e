use recyclens_core::VisionLabel;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Object-detection scores are discounted so label-detection scores win
/// ties; the factor matches the upstream services' observed behavior.
pub const OBJECT_SCORE_DISCOUNT: f32 = 0.9;

/// The raw label shapes returned by upstream services: Clarifai-style
/// `{name, value}` concepts, Google-style `{description, score}`
/// annotations, and nameless fragments some providers emit.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLabel {
    Concept {
        name: String,
        #[serde(default)]
        value: Option<f32>,
    },
    Annotation {
        description: String,
        #[serde(default)]
        score: Option<f32>,
    },
    Unnamed {
        #[serde(default)]
        value: Option<f32>,
        #[serde(default)]
        score: Option<f32>,
    },
}

impl RawLabel {
    pub fn concept(name: Option<String>, value: Option<f32>) -> Self {
        match name {
            Some(name) => RawLabel::Concept { name, value },
            None => RawLabel::Unnamed { value, score: None },
        }
    }

    pub fn annotation(description: Option<String>, score: Option<f32>) -> Self {
        match description {
            Some(description) => RawLabel::Annotation { description, score },
            None => RawLabel::Unnamed { value: None, score },
        }
    }

    fn into_canonical(self) -> VisionLabel {
        match self {
            RawLabel::Concept { name, value } => VisionLabel::new(name, value.unwrap_or(0.0)),
            RawLabel::Annotation { description, score } => {
                VisionLabel::new(description, score.unwrap_or(0.0))
            }
            RawLabel::Unnamed { value, score } => {
                VisionLabel::new("", value.or(score).unwrap_or(0.0))
            }
        }
    }
}

/// Map raw labels to canonical form, dedupe case-insensitively keeping the
/// highest confidence (first seen wins ties), and sort descending by
/// confidence.
pub fn normalize(raw: Vec<RawLabel>) -> Vec<VisionLabel> {
    let mut out: Vec<VisionLabel> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for label in raw {
        let label = label.into_canonical();
        let key = label.name.to_lowercase();
        match seen.get(&key) {
            Some(&idx) => {
                if label.confidence > out[idx].confidence {
                    out[idx].confidence = label.confidence;
                }
            }
            None => {
                seen.insert(key, out.len());
                out.push(label);
            }
        }
    }

    // Stable sort preserves first-seen order on equal confidence.
    out.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    out
}

/// Normalize object-detection output, applying the fixed discount.
pub fn normalize_objects(raw: Vec<RawLabel>) -> Vec<VisionLabel> {
    let mut labels = normalize(raw);
    for label in &mut labels {
        label.confidence *= OBJECT_SCORE_DISCOUNT;
    }
    labels
}
