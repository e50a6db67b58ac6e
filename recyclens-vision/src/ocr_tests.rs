#[cfg(test)]
mod ocr_tests {
    use crate::ocr::{lookup_material_code, MaterialCodeExtractor};
    use recyclens_core::BinType;

    fn texts(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_extracts_joined_code() {
        let extractor = MaterialCodeExtractor::new();
        let codes = extractor.extract(&texts(&["HDPE 2", "RECYCLE"]));
        assert!(codes.iter().any(|c| c.contains("HDPE")));
    }

    #[test]
    fn test_extracts_split_tokens() {
        // Resin stamps often OCR as separate words.
        let extractor = MaterialCodeExtractor::new();
        let codes = extractor.extract(&texts(&["PETE", "1"]));
        assert!(!codes.is_empty());
        assert!(codes.iter().any(|c| c.to_uppercase().contains("PETE")));
    }

    #[test]
    fn test_extracts_hash_number() {
        let extractor = MaterialCodeExtractor::new();
        let codes = extractor.extract(&texts(&["# 5"]));
        assert!(!codes.is_empty());
    }

    #[test]
    fn test_no_codes_in_plain_text() {
        let extractor = MaterialCodeExtractor::new();
        let codes = extractor.extract(&texts(&["DASANI", "WATER", "RECYCLE"]));
        assert!(codes.is_empty());
    }

    #[test]
    fn test_deduplicates() {
        let extractor = MaterialCodeExtractor::new();
        let codes = extractor.extract(&texts(&["PP 5", "PP 5"]));
        assert_eq!(codes.len(), 1);
    }

    #[test]
    fn test_lookup_known_codes() {
        let (code, recyclable, bin) = lookup_material_code("PETE 1").expect("known code");
        assert_eq!(code, "PETE 1");
        assert!(recyclable);
        assert_eq!(bin, BinType::Recycling);

        let (_, recyclable, bin) = lookup_material_code("pvc3").expect("compact form");
        assert!(!recyclable);
        assert_eq!(bin, BinType::Trash);

        let (_, _, bin) = lookup_material_code("LDPE 4").expect("store drop-off code");
        assert_eq!(bin, BinType::Special);
    }

    #[test]
    fn test_lookup_unknown_code() {
        assert!(lookup_material_code("ABS 9").is_none());
    }
}
