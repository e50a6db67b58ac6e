#[cfg(test)]
mod rules_tests {
    use crate::rules::RuleInterpreter;
    use recyclens_core::{BinColor, VisionLabel};

    fn labels(names: &[&str]) -> Vec<VisionLabel> {
        names.iter().map(|n| VisionLabel::new(*n, 0.9)).collect()
    }

    #[test]
    fn test_plastic_bottle_goes_to_blue_bin() {
        let rules = RuleInterpreter::new();
        let result = rules.interpret(&labels(&["Plastic Bottle", "beverage"]));

        assert_eq!(result.item_name, "Plastic Bottle");
        assert!(result.is_recyclable);
        assert_eq!(result.bin_color, BinColor::Blue);
        assert_eq!(result.preparation, "Rinse clean and remove cap");
        assert!((result.confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_aluminum_can_goes_to_blue_bin() {
        let rules = RuleInterpreter::new();
        let result = rules.interpret(&labels(&["soda can"]));

        assert_eq!(result.item_name, "Aluminum Can");
        assert!(result.is_recyclable);
        assert_eq!(result.bin_color, BinColor::Blue);
    }

    #[test]
    fn test_food_waste_goes_to_green_bin() {
        let rules = RuleInterpreter::new();
        let result = rules.interpret(&labels(&["food waste", "banana peel"]));

        assert_eq!(result.item_name, "Food Waste");
        assert!(!result.is_recyclable);
        assert_eq!(result.bin_color, BinColor::Green);
    }

    #[test]
    fn test_styrofoam_goes_to_black_bin() {
        let rules = RuleInterpreter::new();
        let result = rules.interpret(&labels(&["styrofoam", "packaging"]));

        assert_eq!(result.item_name, "Styrofoam");
        assert!(!result.is_recyclable);
        assert_eq!(result.bin_color, BinColor::Black);
        assert_eq!(result.disposal_method, "Place in regular trash");
    }

    #[test]
    fn test_battery_carries_facility_metadata() {
        let rules = RuleInterpreter::new();
        let result = rules.interpret(&labels(&["battery", "metal"]));

        assert_eq!(result.item_name, "Battery");
        assert_eq!(result.bin_color, BinColor::Special);
        assert_eq!(
            result.special_instructions.as_deref(),
            Some("Do not put in regular trash or recycling")
        );
        assert!(result
            .disposal_location
            .as_deref()
            .unwrap()
            .contains("Hazardous Waste"));
        assert!(result.disposal_address.is_some());
        assert!(result.disposal_phone.is_some());
    }

    #[test]
    fn test_recyclable_patterns_win_over_trash_patterns() {
        // "plastic bottle" matches before "plastic bag" because the
        // recyclable table is checked first.
        let rules = RuleInterpreter::new();
        let result = rules.interpret(&labels(&["plastic bottle", "plastic bag"]));

        assert_eq!(result.item_name, "Plastic Bottle");
        assert!(result.is_recyclable);
    }

    #[test]
    fn test_unmatched_labels_default_to_black_bin() {
        let rules = RuleInterpreter::new();
        let result = rules.interpret(&labels(&["mystery gadget", "widget"]));

        assert_eq!(result.item_name, "mystery gadget");
        assert!(!result.is_recyclable);
        assert_eq!(result.bin_color, BinColor::Black);
        assert_eq!(
            result.disposal_method,
            "When in doubt, throw it out (regular trash)"
        );
        assert!((result.confidence - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_labels_yield_unknown_item() {
        let rules = RuleInterpreter::new();
        let result = rules.interpret(&[]);

        assert_eq!(result.item_name, "Unknown Item");
        assert_eq!(result.bin_color, BinColor::Black);
    }
}
