#[cfg(test)]
mod normalize_tests {
    use crate::normalize::{normalize, normalize_objects, RawLabel, OBJECT_SCORE_DISCOUNT};

    fn concept(name: &str, value: f32) -> RawLabel {
        RawLabel::concept(Some(name.to_string()), Some(value))
    }

    fn annotation(description: &str, score: f32) -> RawLabel {
        RawLabel::annotation(Some(description.to_string()), Some(score))
    }

    #[test]
    fn test_both_shapes_map_to_canonical() {
        let labels = normalize(vec![concept("bottle", 0.9), annotation("can", 0.8)]);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].name, "bottle");
        assert_eq!(labels[0].confidence, 0.9);
        assert_eq!(labels[1].name, "can");
        assert_eq!(labels[1].confidence, 0.8);
    }

    #[test]
    fn test_missing_fields_default() {
        let labels = normalize(vec![
            RawLabel::concept(None, None),
            RawLabel::annotation(None, Some(0.5)),
        ]);
        // Both normalize to the empty name and dedupe to one entry.
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].name, "");
        assert_eq!(labels[0].confidence, 0.5);
    }

    #[test]
    fn test_dedupe_case_insensitive_keeps_highest() {
        let labels = normalize(vec![
            concept("Plastic Bottle", 0.7),
            concept("plastic bottle", 0.95),
            concept("PLASTIC BOTTLE", 0.6),
        ]);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].name, "Plastic Bottle"); // first-seen casing
        assert_eq!(labels[0].confidence, 0.95);
    }

    #[test]
    fn test_dedupe_equal_confidence_first_seen_wins() {
        let labels = normalize(vec![concept("Bottle", 0.8), concept("bottle", 0.8)]);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].name, "Bottle");
    }

    #[test]
    fn test_sorted_descending_by_confidence() {
        let labels = normalize(vec![
            concept("low", 0.2),
            concept("high", 0.9),
            concept("mid", 0.5),
        ]);
        let names: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_stable_order_on_confidence_ties() {
        let labels = normalize(vec![
            concept("first", 0.5),
            concept("second", 0.5),
            concept("third", 0.5),
        ]);
        let names: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_object_scores_discounted() {
        let labels = normalize_objects(vec![concept("Bottle", 1.0)]);
        assert_eq!(labels.len(), 1);
        assert!((labels[0].confidence - OBJECT_SCORE_DISCOUNT).abs() < 1e-6);
    }

    #[test]
    fn test_deserialize_both_wire_shapes() {
        let concept: RawLabel = serde_json::from_str(r#"{"name":"bottle","value":0.9}"#)
            .expect("concept shape should deserialize");
        let annotation: RawLabel =
            serde_json::from_str(r#"{"description":"bottle","score":0.9}"#)
                .expect("annotation shape should deserialize");
        let labels = normalize(vec![concept, annotation]);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].name, "bottle");
    }
}
