use recyclens_core::{
    BinType, Catalog, DetectionBundle, MatchMethod, MatchResult, RecyclableItemRecord,
};
use recyclens_vision::ocr::{lookup_material_code, MaterialCodeExtractor};
use tracing::debug;

const DIRECT_SIMILARITY_THRESHOLD: f64 = 0.8;
const CONTAINMENT_SCORE: f64 = 0.9;
const HIGH_CONFIDENCE_BREAK: f32 = 90.0;
const CATEGORY_GATE: f32 = 70.0;
const CATEGORY_OVERLAP_SCORE: f64 = 0.6;
const MATERIAL_CODE_CONFIDENCE: f32 = 75.0;
const FUZZY_THRESHOLD: f64 = 0.4;
const FUZZY_CAP: f32 = 50.0;
const MAX_RESULTS: usize = 3;

/// Category keyword table for stage-2 inference. Iteration order is the
/// tie-break: when two categories score equally, the first declared wins.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Plastic", &["plastic", "bottle", "container", "cup", "packaging"]),
    ("Paper", &["paper", "cardboard", "newspaper", "magazine", "box"]),
    ("Metal", &["metal", "aluminum", "steel", "tin", "can"]),
    ("Glass", &["glass", "bottle", "jar", "container"]),
    ("Hazardous", &["battery", "paint", "chemical", "oil", "bulb"]),
    ("E-Waste", &["electronic", "computer", "phone", "device", "circuit"]),
    ("Organic", &["food", "compost", "yard waste", "organic"]),
    ("Textile", &["clothing", "fabric", "textile", "clothes"]),
];

/// Normalized edit-distance similarity on [0,1], case-insensitive.
fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a == b {
        return 1.0;
    }
    strsim::normalized_levenshtein(&a, &b)
}

/// Compare detected label texts against one item's known labels. A pair
/// matches above the similarity threshold, or on substring containment
/// which is scored at a fixed 0.9 regardless of length difference.
fn find_direct_match(vision_labels: &[String], item_labels: &[String]) -> Option<f64> {
    let mut max_score: f64 = 0.0;
    let mut found = false;

    for v_label in vision_labels {
        for i_label in item_labels {
            let score = similarity(v_label, i_label);
            if score > DIRECT_SIMILARITY_THRESHOLD {
                found = true;
                max_score = max_score.max(score);
            }

            let v = v_label.to_lowercase();
            let i = i_label.to_lowercase();
            if v.contains(&i) || i.contains(&v) {
                found = true;
                max_score = max_score.max(CONTAINMENT_SCORE);
            }
        }
    }

    found.then_some(max_score)
}

/// Pick the category whose keyword table overlaps the labels most. Strict
/// greater-than keeps ties on the first-declared category.
fn infer_category(vision_labels: &[String]) -> Option<&'static str> {
    let mut best: Option<(&'static str, usize)> = None;

    for (category, keywords) in CATEGORY_KEYWORDS {
        let mut score = 0;
        for label in vision_labels {
            for keyword in *keywords {
                if label.contains(keyword) {
                    score += 1;
                }
            }
        }
        if score > 0 && best.map_or(true, |(_, s)| score > s) {
            best = Some((category, score));
        }
    }

    best.map(|(category, _)| category)
}

/// Suggested disposal route for items that cannot go in the recycling bin.
pub fn alternative_disposal(item: &RecyclableItemRecord) -> Option<String> {
    if item.is_recyclable {
        return None;
    }
    if item.bin_type == BinType::Special {
        return Some(item.special_instructions.clone());
    }
    if item.category == "Organic" {
        return Some("Consider composting if you have a compost bin".to_string());
    }
    if item.category == "Textile" {
        return Some("Donate to charity or textile recycling program".to_string());
    }
    if item.name.to_lowercase().contains("plastic bag") {
        return Some("Take to grocery store plastic bag recycling bin".to_string());
    }
    Some("Place in regular trash".to_string())
}

/// Required terminal state when every stage comes up empty.
pub fn unknown_item() -> MatchResult {
    MatchResult {
        item_name: "Unknown Item".to_string(),
        confidence: 0.0,
        is_recyclable: false,
        bin_type: BinType::Trash,
        category: "Unknown".to_string(),
        special_instructions: "Could not identify this item. When in doubt, throw it out."
            .to_string(),
        contamination_notes: String::new(),
        alternative_disposal: None,
        matched_labels: Vec::new(),
        match_method: MatchMethod::None,
    }
}

/// Labels and object names that no match accounted for, case-insensitive,
/// deduplicated in first-seen order.
pub fn unidentified_objects(bundle: &DetectionBundle, matches: &[MatchResult]) -> Vec<String> {
    let identified: Vec<String> = matches
        .iter()
        .flat_map(|m| m.matched_labels.iter().map(|l| l.to_lowercase()))
        .collect();

    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for label in bundle.labels.iter().chain(bundle.objects.iter()) {
        let lower = label.name.to_lowercase();
        if !identified.contains(&lower) && !seen.contains(&lower) {
            seen.push(lower);
            out.push(label.name.clone());
        }
    }
    out
}

/// The staged label-matching engine. Holds the compiled resin-code
/// extractor; everything else is per-call.
pub struct MatchEngine {
    extractor: MaterialCodeExtractor,
}

impl MatchEngine {
    pub fn new() -> Self {
        Self {
            extractor: MaterialCodeExtractor::new(),
        }
    }

    /// Resolve a detection bundle against the catalog: direct label match,
    /// category inference, material-code lookup, then fuzzy fallback. Each
    /// catalog item appears at most once across stages; the result is the
    /// top 3 by confidence, ties kept in insertion (catalog) order.
    pub fn find_matches(&self, bundle: &DetectionBundle, catalog: &Catalog) -> Vec<MatchResult> {
        let mut matches: Vec<MatchResult> = Vec::new();
        let mut processed: Vec<String> = Vec::new();

        let all_labels = bundle.all_label_texts();

        // Stage 1: direct matching. First item over the high-confidence bar
        // wins and stops the scan, so catalog order is part of the contract.
        debug!(labels = all_labels.len(), "stage 1: direct matching");
        for item in catalog.items() {
            let item_labels: Vec<String> =
                item.known_labels.iter().map(|l| l.to_lowercase()).collect();

            if let Some(score) = find_direct_match(&all_labels, &item_labels) {
                if processed.contains(&item.name) {
                    continue;
                }
                let confidence = ((score * 100.0) as f32).min(100.0);
                matches.push(self.build_match(
                    item,
                    confidence,
                    item.is_recyclable,
                    item.bin_type,
                    &all_labels,
                    MatchMethod::Direct,
                ));
                processed.push(item.name.clone());

                if confidence > HIGH_CONFIDENCE_BREAK {
                    debug!(item = %item.name, confidence, "high confidence direct match");
                    break;
                }
            }
        }

        // Stage 2: category inference, only without a confident stage-1 hit.
        if matches.is_empty() || matches[0].confidence < CATEGORY_GATE {
            debug!("stage 2: category inference");
            if let Some(category) = infer_category(&all_labels) {
                for item in catalog.items() {
                    if item.category != category || processed.contains(&item.name) {
                        continue;
                    }

                    let mut keywords = vec![item.name.to_lowercase()];
                    keywords.extend(item.similar_item_names.iter().map(|s| s.to_lowercase()));

                    let mut score: f64 = 0.0;
                    for keyword in &keywords {
                        for label in &all_labels {
                            if label.contains(keyword) || keyword.contains(label) {
                                score = score.max(CATEGORY_OVERLAP_SCORE);
                            }
                        }
                    }

                    if score > 0.0 {
                        let confidence = ((score * 100.0) as f32).min(CATEGORY_GATE);
                        matches.push(self.build_match(
                            item,
                            confidence,
                            item.is_recyclable,
                            item.bin_type,
                            &all_labels,
                            MatchMethod::Category,
                        ));
                        processed.push(item.name.clone());
                    }
                }
            }
        }

        // Stage 3: resin codes from OCR text. Fixed confidence; the code
        // table decides recyclability, not the catalog record. One item per
        // detected code.
        if !bundle.ocr_texts.is_empty() {
            debug!("stage 3: material code detection");
            for code in self.extractor.extract(&bundle.ocr_texts) {
                if let Some((table_code, recyclable, bin_type)) = lookup_material_code(&code) {
                    for item in catalog.items() {
                        if !item.material_codes.iter().any(|c| c == table_code)
                            || processed.contains(&item.name)
                        {
                            continue;
                        }
                        matches.push(self.build_match(
                            item,
                            MATERIAL_CODE_CONFIDENCE,
                            recyclable,
                            bin_type,
                            &all_labels,
                            MatchMethod::Material,
                        ));
                        processed.push(item.name.clone());
                        break;
                    }
                }
            }
        }

        // Stage 4: fuzzy fallback against item names, last resort only.
        if matches.is_empty() {
            debug!("stage 4: fuzzy matching");
            for item in catalog.items() {
                let item_name = item.name.to_lowercase();
                let best = all_labels
                    .iter()
                    .map(|label| similarity(&item_name, label))
                    .fold(0.0_f64, f64::max);

                if best > FUZZY_THRESHOLD && !processed.contains(&item.name) {
                    let confidence = ((best * 100.0) as f32).min(FUZZY_CAP);
                    matches.push(self.build_match(
                        item,
                        confidence,
                        item.is_recyclable,
                        item.bin_type,
                        &all_labels,
                        MatchMethod::Fuzzy,
                    ));
                    processed.push(item.name.clone());
                }
            }
        }

        matches.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(MAX_RESULTS);
        matches
    }

    fn build_match(
        &self,
        item: &RecyclableItemRecord,
        confidence: f32,
        is_recyclable: bool,
        bin_type: BinType,
        all_labels: &[String],
        match_method: MatchMethod,
    ) -> MatchResult {
        MatchResult {
            item_name: item.name.clone(),
            confidence,
            is_recyclable,
            bin_type,
            category: item.category.clone(),
            special_instructions: item.special_instructions.clone(),
            contamination_notes: item.contamination_notes.clone(),
            alternative_disposal: alternative_disposal(item),
            matched_labels: all_labels.to_vec(),
            match_method,
        }
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new()
    }
}
