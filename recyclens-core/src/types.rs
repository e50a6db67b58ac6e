use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single detected label in canonical form. Confidence is the raw provider
/// score in [0,1]; adapters never rescale it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionLabel {
    pub name: String,
    pub confidence: f32,
}

impl VisionLabel {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// Normalized output of one vision-provider call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionBundle {
    pub labels: Vec<VisionLabel>,
    pub objects: Vec<VisionLabel>,
    pub ocr_texts: Vec<String>,
    pub web_entities: Vec<VisionLabel>,
    pub provider_used: String,
    pub error: Option<String>,
}

impl DetectionBundle {
    /// A bundle with no labels, objects or web entities counts as empty even
    /// when OCR text is present; the fallback chain moves on.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.objects.is_empty() && self.web_entities.is_empty()
    }

    /// All detected text combined into one lowercased set of candidate
    /// strings: label descriptions, object names and web-entity text.
    pub fn all_label_texts(&self) -> Vec<String> {
        self.labels
            .iter()
            .chain(self.objects.iter())
            .chain(self.web_entities.iter())
            .map(|l| l.name.to_lowercase())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinType {
    Recycling,
    Trash,
    Compost,
    Special,
}

impl BinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinType::Recycling => "recycling",
            BinType::Trash => "trash",
            BinType::Compost => "compost",
            BinType::Special => "special",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "recycling" => Some(BinType::Recycling),
            "trash" => Some(BinType::Trash),
            "compost" => Some(BinType::Compost),
            "special" => Some(BinType::Special),
            _ => None,
        }
    }
}

/// Curbside bin color used by the interpretation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinColor {
    Blue,
    Green,
    Black,
    Special,
}

impl BinColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinColor::Blue => "Blue",
            BinColor::Green => "Green",
            BinColor::Black => "Black",
            BinColor::Special => "Special",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blue" => Some(BinColor::Blue),
            "green" => Some(BinColor::Green),
            "black" => Some(BinColor::Black),
            "special" => Some(BinColor::Special),
            _ => None,
        }
    }
}

/// One disposal rule from the reference catalog. Loaded once, shared
/// read-only across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecyclableItemRecord {
    pub name: String,
    pub category: String,
    pub is_recyclable: bool,
    pub bin_type: BinType,
    pub special_instructions: String,
    pub contamination_notes: String,
    pub material_codes: Vec<String>,
    pub known_labels: Vec<String>,
    pub similar_item_names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Direct,
    Category,
    Material,
    Fuzzy,
    None,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Direct => "direct",
            MatchMethod::Category => "category",
            MatchMethod::Material => "material",
            MatchMethod::Fuzzy => "fuzzy",
            MatchMethod::None => "none",
        }
    }
}

/// One ranked match produced by the matching engine. Confidence is on a
/// 0-100 scale, unlike provider label scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub item_name: String,
    pub confidence: f32,
    pub is_recyclable: bool,
    pub bin_type: BinType,
    pub category: String,
    pub special_instructions: String,
    pub contamination_notes: String,
    pub alternative_disposal: Option<String>,
    pub matched_labels: Vec<String>,
    pub match_method: MatchMethod,
}

/// Disposal guidance produced by the interpretation chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interpretation {
    pub item_name: String,
    pub is_recyclable: bool,
    pub bin_color: BinColor,
    pub disposal_method: String,
    #[serde(default)]
    pub preparation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposal_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposal_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposal_phone: Option<String>,
    pub confidence: f32,
}

/// Daily API usage snapshot attached to responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageInfo {
    pub daily_limit: u32,
    pub daily_used: u32,
    pub remaining: u32,
    pub reset_time: DateTime<Utc>,
}

/// Which upstream services ultimately answered the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesUsed {
    pub vision: String,
    pub interpreter: String,
}

/// The identified item merged from interpretation plus label-derived
/// material detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifiedItem {
    pub name: String,
    pub is_recyclable: bool,
    pub bin_color: BinColor,
    pub disposal_method: String,
    pub preparation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    pub category: String,
    pub material: String,
}

/// Full response assembled for one identification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<IdentifiedItem>,
    pub matches: Vec<MatchResult>,
    pub unidentified_objects: Vec<String>,
    pub recyclable: bool,
    pub confidence: f32,
    pub vision_labels: Vec<VisionLabel>,
    pub processing_time_ms: u64,
    pub services: ServicesUsed,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
