#[cfg(test)]
mod matcher_tests {
    use crate::matcher::{alternative_disposal, unidentified_objects, unknown_item, MatchEngine};
    use recyclens_core::{
        BinType, Catalog, DetectionBundle, MatchMethod, RecyclableItemRecord, VisionLabel,
    };

    fn record(
        name: &str,
        category: &str,
        is_recyclable: bool,
        bin_type: BinType,
        known_labels: &[&str],
        similar: &[&str],
        codes: &[&str],
    ) -> RecyclableItemRecord {
        RecyclableItemRecord {
            name: name.to_string(),
            category: category.to_string(),
            is_recyclable,
            bin_type,
            special_instructions: String::new(),
            contamination_notes: String::new(),
            material_codes: codes.iter().map(|s| s.to_string()).collect(),
            known_labels: known_labels.iter().map(|s| s.to_string()).collect(),
            similar_item_names: similar.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn bundle_with_labels(names: &[&str]) -> DetectionBundle {
        DetectionBundle {
            labels: names.iter().map(|n| VisionLabel::new(*n, 0.9)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_exact_label_yields_direct_match_at_100() {
        let engine = MatchEngine::new();
        let catalog = Catalog::default();
        let bundle = bundle_with_labels(&["plastic bottle"]);

        let matches = engine.find_matches(&bundle, &catalog);
        assert_eq!(matches[0].item_name, "Plastic Bottle (#1 or #2)");
        assert_eq!(matches[0].confidence, 100.0);
        assert!(matches[0].is_recyclable);
        assert_eq!(matches[0].bin_type, BinType::Recycling);
        assert_eq!(matches[0].match_method, MatchMethod::Direct);
    }

    #[test]
    fn test_unrelated_labels_produce_no_matches() {
        let engine = MatchEngine::new();
        let catalog = Catalog::default();
        let bundle = bundle_with_labels(&["zzqx frobnicator", "xylophone quark"]);

        let matches = engine.find_matches(&bundle, &catalog);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_matching_is_idempotent() {
        let engine = MatchEngine::new();
        let catalog = Catalog::default();
        let bundle = bundle_with_labels(&["aluminum can", "beverage"]);

        let first = engine.find_matches(&bundle, &catalog);
        let second = engine.find_matches(&bundle, &catalog);

        let names = |ms: &[recyclens_core::MatchResult]| {
            ms.iter()
                .map(|m| (m.item_name.clone(), m.confidence))
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn test_high_confidence_direct_match_stops_catalog_scan() {
        let engine = MatchEngine::new();
        let catalog = Catalog::new(vec![
            record("First", "Plastic", true, BinType::Recycling, &["plastic bottle"], &[], &[]),
            record("Second", "Plastic", true, BinType::Recycling, &["plastic bottle"], &[], &[]),
        ]);
        let bundle = bundle_with_labels(&["plastic bottle"]);

        let matches = engine.find_matches(&bundle, &catalog);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].item_name, "First");
    }

    #[test]
    fn test_containment_scores_fixed_090() {
        let engine = MatchEngine::new();
        let catalog = Catalog::new(vec![record(
            "Box",
            "Paper",
            true,
            BinType::Recycling,
            &["cardboard box"],
            &[],
            &[],
        )]);
        // "box" is contained in "cardboard box" but far below the
        // similarity threshold, so the fixed containment score applies.
        let bundle = bundle_with_labels(&["box"]);

        let matches = engine.find_matches(&bundle, &catalog);
        assert_eq!(matches[0].confidence, 90.0);
        assert_eq!(matches[0].match_method, MatchMethod::Direct);
    }

    #[test]
    fn test_results_truncate_to_top_three_in_catalog_order() {
        let engine = MatchEngine::new();
        let items: Vec<_> = ["A", "B", "C", "D"]
            .iter()
            .map(|n| record(n, "Paper", true, BinType::Recycling, &["cardboard box"], &[], &[]))
            .collect();
        let catalog = Catalog::new(items);
        // Containment gives every item exactly 90, below the early-exit
        // bar, so all four are scored and ties keep catalog order.
        let bundle = bundle_with_labels(&["box"]);

        let matches = engine.find_matches(&bundle, &catalog);
        assert_eq!(matches.len(), 3);
        let names: Vec<_> = matches.iter().map(|m| m.item_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_category_inference_with_first_declared_tie_break() {
        let engine = MatchEngine::new();
        let catalog = Catalog::new(vec![
            record("Plastic Thing", "Plastic", true, BinType::Recycling, &[], &["bottle"], &[]),
            record("Glass Thing", "Glass", true, BinType::Recycling, &[], &["bottle"], &[]),
        ]);
        // "bottle" scores 1 for both Plastic and Glass; Plastic is declared
        // first and wins the tie.
        let bundle = bundle_with_labels(&["bottle"]);

        let matches = engine.find_matches(&bundle, &catalog);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].item_name, "Plastic Thing");
        assert_eq!(matches[0].match_method, MatchMethod::Category);
        assert_eq!(matches[0].confidence, 60.0);
    }

    #[test]
    fn test_ocr_resin_code_fires_stage_three() {
        let engine = MatchEngine::new();
        let catalog = Catalog::default();
        let bundle = DetectionBundle {
            ocr_texts: vec!["PETE".to_string(), "1".to_string()],
            ..Default::default()
        };

        let matches = engine.find_matches(&bundle, &catalog);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].item_name, "Plastic Bottle (#1 or #2)");
        assert_eq!(matches[0].confidence, 75.0);
        assert!(matches[0].is_recyclable);
        assert_eq!(matches[0].bin_type, BinType::Recycling);
        assert_eq!(matches[0].match_method, MatchMethod::Material);
    }

    #[test]
    fn test_item_matched_directly_is_not_readded_by_material_stage() {
        let engine = MatchEngine::new();
        let catalog = Catalog::default();
        let bundle = DetectionBundle {
            labels: vec![VisionLabel::new("plastic bottle", 0.95)],
            ocr_texts: vec!["PETE 1".to_string()],
            ..Default::default()
        };

        let matches = engine.find_matches(&bundle, &catalog);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_method, MatchMethod::Direct);
    }

    #[test]
    fn test_fuzzy_fallback_caps_confidence_at_50() {
        let engine = MatchEngine::new();
        let catalog = Catalog::new(vec![record(
            "Wooden Pallet",
            "Wood",
            false,
            BinType::Trash,
            &["zzz-token"],
            &[],
            &[],
        )]);
        let bundle = bundle_with_labels(&["wooden mallet"]);

        let matches = engine.find_matches(&bundle, &catalog);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].item_name, "Wooden Pallet");
        assert_eq!(matches[0].match_method, MatchMethod::Fuzzy);
        assert_eq!(matches[0].confidence, 50.0);
    }

    #[test]
    fn test_fuzzy_stage_skipped_when_earlier_stage_matched() {
        let engine = MatchEngine::new();
        let catalog = Catalog::default();
        let bundle = DetectionBundle {
            labels: vec![VisionLabel::new("battery", 0.9)],
            ..Default::default()
        };

        let matches = engine.find_matches(&bundle, &catalog);
        assert!(matches.iter().all(|m| m.match_method != MatchMethod::Fuzzy));
        assert_eq!(matches[0].item_name, "Battery");
    }

    #[test]
    fn test_unknown_item_sentinel_shape() {
        let sentinel = unknown_item();
        assert_eq!(sentinel.item_name, "Unknown Item");
        assert_eq!(sentinel.confidence, 0.0);
        assert!(!sentinel.is_recyclable);
        assert_eq!(sentinel.bin_type, BinType::Trash);
        assert_eq!(sentinel.match_method, MatchMethod::None);
    }

    #[test]
    fn test_unidentified_objects_empty_when_matches_cover_labels() {
        let engine = MatchEngine::new();
        let catalog = Catalog::default();
        let bundle = bundle_with_labels(&["plastic bottle", "table"]);

        let matches = engine.find_matches(&bundle, &catalog);
        // Every match records the full label set, so nothing is left over.
        assert!(unidentified_objects(&bundle, &matches).is_empty());
    }

    #[test]
    fn test_unidentified_objects_lists_labels_when_nothing_matched() {
        let bundle = DetectionBundle {
            labels: vec![
                VisionLabel::new("Gadget", 0.9),
                VisionLabel::new("gadget", 0.8),
            ],
            objects: vec![VisionLabel::new("Widget", 0.7)],
            ..Default::default()
        };

        let unidentified = unidentified_objects(&bundle, &[unknown_item()]);
        assert_eq!(unidentified, vec!["Gadget", "Widget"]);
    }

    #[test]
    fn test_alternative_disposal_routes() {
        let recyclable = record("Can", "Metal", true, BinType::Recycling, &[], &[], &[]);
        assert!(alternative_disposal(&recyclable).is_none());

        let mut special = record("Battery", "Hazardous", false, BinType::Special, &[], &[], &[]);
        special.special_instructions = "Take to hazardous waste center".to_string();
        assert_eq!(
            alternative_disposal(&special).as_deref(),
            Some("Take to hazardous waste center")
        );

        let organic = record("Food Waste", "Organic", false, BinType::Compost, &[], &[], &[]);
        assert_eq!(
            alternative_disposal(&organic).as_deref(),
            Some("Consider composting if you have a compost bin")
        );

        let textile = record("Clothing", "Textile", false, BinType::Trash, &[], &[], &[]);
        assert_eq!(
            alternative_disposal(&textile).as_deref(),
            Some("Donate to charity or textile recycling program")
        );

        let bag = record("Plastic Bag", "Plastic", false, BinType::Trash, &[], &[], &[]);
        assert_eq!(
            alternative_disposal(&bag).as_deref(),
            Some("Take to grocery store plastic bag recycling bin")
        );

        let other = record("Diaper", "Mixed", false, BinType::Trash, &[], &[], &[]);
        assert_eq!(
            alternative_disposal(&other).as_deref(),
            Some("Place in regular trash")
        );
    }
}
