use crate::limiter::DailyQuotaDecision;
use recyclens_core::{
    BinColor, DetectionBundle, IdentifiedItem, IdentifyResponse, Interpretation, MatchResult,
    ServicesUsed, UsageInfo, VisionLabel,
};

/// How many detected labels are echoed back on the response.
const RESPONSE_LABEL_COUNT: usize = 5;

/// Coarse material classification from the combined label text.
pub fn detect_material(labels: &[VisionLabel]) -> String {
    let text = labels
        .iter()
        .map(|l| l.name.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    if text.contains("plastic") {
        "Plastic".to_string()
    } else if text.contains("glass") {
        "Glass".to_string()
    } else if text.contains("metal") || text.contains("aluminum") {
        "Metal".to_string()
    } else if text.contains("paper") || text.contains("cardboard") {
        "Paper".to_string()
    } else if text.contains("organic") || text.contains("food") {
        "Organic".to_string()
    } else if text.contains("electronic") {
        "Electronics".to_string()
    } else {
        "Mixed/Unknown".to_string()
    }
}

pub fn usage_info(daily: &DailyQuotaDecision, daily_limit: u32) -> UsageInfo {
    UsageInfo {
        daily_limit,
        daily_used: daily.used,
        remaining: daily.remaining,
        reset_time: daily.reset_time,
    }
}

/// Merge interpretation, matches and usage metadata into the response shape.
pub fn assemble(
    bundle: &DetectionBundle,
    matches: Vec<MatchResult>,
    unidentified: Vec<String>,
    interpretation: Interpretation,
    interpreter_name: String,
    usage: UsageInfo,
    processing_time_ms: u64,
) -> IdentifyResponse {
    let category = if interpretation.is_recyclable {
        "recyclable".to_string()
    } else if interpretation.bin_color == BinColor::Special {
        "hazardous".to_string()
    } else {
        "trash".to_string()
    };

    let item = IdentifiedItem {
        name: interpretation.item_name,
        is_recyclable: interpretation.is_recyclable,
        bin_color: interpretation.bin_color,
        disposal_method: interpretation.disposal_method,
        preparation: interpretation.preparation,
        special_instructions: interpretation.special_instructions,
        category,
        material: detect_material(&bundle.labels),
    };

    IdentifyResponse {
        success: true,
        recyclable: item.is_recyclable,
        confidence: interpretation.confidence,
        item: Some(item),
        matches,
        unidentified_objects: unidentified,
        vision_labels: bundle
            .labels
            .iter()
            .take(RESPONSE_LABEL_COUNT)
            .cloned()
            .collect(),
        processing_time_ms,
        services: ServicesUsed {
            vision: bundle.provider_used.clone(),
            interpreter: interpreter_name,
        },
        usage: Some(usage),
        error: None,
    }
}

/// Terminal response when no vision provider could label the image. Still a
/// structured payload, never a hard error.
pub fn could_not_identify(
    attempted_providers: String,
    usage: UsageInfo,
    processing_time_ms: u64,
) -> IdentifyResponse {
    IdentifyResponse {
        success: false,
        item: None,
        matches: Vec::new(),
        unidentified_objects: Vec::new(),
        recyclable: false,
        confidence: 0.0,
        vision_labels: Vec::new(),
        processing_time_ms,
        services: ServicesUsed {
            vision: attempted_providers,
            interpreter: "none".to_string(),
        },
        usage: Some(usage),
        error: Some("Could not identify item in image".to_string()),
    }
}
