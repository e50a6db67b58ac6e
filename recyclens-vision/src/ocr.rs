use recyclens_core::BinType;
use regex::Regex;

/// Resin-code disposal table. Order matters nowhere here; each code maps to
/// exactly one rule.
pub const MATERIAL_CODE_TABLE: &[(&str, bool, BinType)] = &[
    ("PETE 1", true, BinType::Recycling),
    ("HDPE 2", true, BinType::Recycling),
    ("PVC 3", false, BinType::Trash),
    ("LDPE 4", false, BinType::Special), // store drop-off
    ("PP 5", true, BinType::Recycling),
    ("PS 6", false, BinType::Trash),
    ("OTHER 7", false, BinType::Trash),
];

/// Look up the disposal rule whose compacted code (e.g. "PETE1") appears in
/// the detected text.
pub fn lookup_material_code(code_text: &str) -> Option<(&'static str, bool, BinType)> {
    let upper = code_text.to_uppercase();
    MATERIAL_CODE_TABLE
        .iter()
        .find(|(code, _, _)| upper.contains(&code.replace(' ', "")) || upper.contains(*code))
        .copied()
}

/// Extracts plastic resin codes from OCR word lists.
pub struct MaterialCodeExtractor {
    patterns: Vec<Regex>,
}

impl MaterialCodeExtractor {
    pub fn new() -> Self {
        let patterns = [
            r"(?i)PETE?\s*#?\s*1",
            r"(?i)HDPE\s*#?\s*2",
            r"(?i)PVC\s*#?\s*3",
            r"(?i)LDPE\s*#?\s*4",
            r"(?i)PP\s*#?\s*5",
            r"(?i)PS\s*#?\s*6",
            r"(?i)OTHER\s*#?\s*7",
            r"#\s*[1-7]",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid regex pattern"))
        .collect();
        Self { patterns }
    }

    /// Returns the OCR fragments that look like resin codes, deduplicated in
    /// first-seen order. Stamps are often OCR'd as separate tokens ("PETE",
    /// "1"), so the joined text is scanned as well.
    pub fn extract(&self, texts: &[String]) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        for text in texts {
            if self.patterns.iter().any(|p| p.is_match(text))
                && !codes.iter().any(|c| c == text)
            {
                codes.push(text.clone());
            }
        }

        let joined = texts.join(" ");
        for pattern in &self.patterns {
            if let Some(m) = pattern.find(&joined) {
                let code = m.as_str().to_string();
                if !codes.iter().any(|c| c == &code) {
                    codes.push(code);
                }
            }
        }
        codes
    }
}

impl Default for MaterialCodeExtractor {
    fn default() -> Self {
        Self::new()
    }
}
