pub mod catalog;
pub mod config;
pub mod error;
pub mod types;


pub use catalog::Catalog;
pub use config::{EngineConfig, RateLimitConfig, RetryConfig};
pub use error::{Error, Result};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_type_round_trip() {
        assert_eq!(BinType::from_str("recycling"), Some(BinType::Recycling));
        assert_eq!(BinType::from_str("TRASH"), Some(BinType::Trash));
        assert_eq!(BinType::from_str("compost"), Some(BinType::Compost));
        assert_eq!(BinType::from_str("special"), Some(BinType::Special));
        assert_eq!(BinType::from_str("landfill"), None);
        assert_eq!(BinType::Recycling.as_str(), "recycling");
    }

    #[test]
    fn test_bin_color_from_str() {
        assert_eq!(BinColor::from_str("Blue"), Some(BinColor::Blue));
        assert_eq!(BinColor::from_str("green"), Some(BinColor::Green));
        assert_eq!(BinColor::from_str("purple"), None);
    }

    #[test]
    fn test_bundle_is_empty_ignores_ocr() {
        let bundle = DetectionBundle {
            ocr_texts: vec!["PETE".to_string()],
            ..Default::default()
        };
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_all_label_texts_combines_and_lowercases() {
        let bundle = DetectionBundle {
            labels: vec![VisionLabel::new("Plastic Bottle", 0.95)],
            objects: vec![VisionLabel::new("Bottle", 0.93)],
            web_entities: vec![VisionLabel::new("PET bottle", 0.78)],
            ..Default::default()
        };
        let texts = bundle.all_label_texts();
        assert_eq!(texts, vec!["plastic bottle", "bottle", "pet bottle"]);
    }

    #[test]
    fn test_engine_config_default() {
        let config = EngineConfig::default();
        assert_eq!(config.max_image_bytes, 4 * 1024 * 1024);
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.daily_quota, 1000);
        assert_eq!(config.retry.max_attempts, 2);
    }
}
