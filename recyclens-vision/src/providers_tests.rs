#[cfg(test)]
mod providers_tests {
    use crate::error::VisionError;
    use crate::image::ImagePayload;
    use crate::providers::adapter::VisionProvider;
    use crate::providers::clarifai::ClarifaiProvider;
    use crate::providers::google::GoogleVisionProvider;
    use crate::providers::openai::OpenAiVisionProvider;

    #[test]
    fn test_google_provider_creation() {
        let provider = GoogleVisionProvider::new();
        assert_eq!(provider.name(), "google");
        assert!(!provider.is_configured());
    }

    #[test]
    fn test_google_provider_with_key() {
        let provider = GoogleVisionProvider::with_api_key("test-key".to_string());
        assert!(provider.is_configured());
    }

    #[test]
    fn test_openai_provider_creation() {
        let provider = OpenAiVisionProvider::new();
        assert_eq!(provider.name(), "openai");
        assert!(!provider.is_configured());
    }

    #[test]
    fn test_openai_provider_with_key() {
        let provider = OpenAiVisionProvider::with_api_key("sk-test123".to_string());
        assert!(provider.is_configured());
    }

    #[test]
    fn test_clarifai_provider_creation() {
        let provider = ClarifaiProvider::new();
        assert_eq!(provider.name(), "clarifai");
        assert!(!provider.is_configured());
    }

    #[test]
    fn test_clarifai_provider_with_key() {
        let provider = ClarifaiProvider::with_api_key("test-pat".to_string());
        assert!(provider.is_configured());
    }

    #[test]
    fn test_set_api_key() {
        let mut provider = GoogleVisionProvider::new();
        assert!(!provider.is_configured());
        provider.set_api_key("test-key".to_string());
        assert!(provider.is_configured());
    }

    #[tokio::test]
    async fn test_analyze_without_key_is_unconfigured() {
        let image = ImagePayload::new("aGVsbG8=");

        let result = GoogleVisionProvider::new().analyze(&image).await;
        assert!(matches!(result.unwrap_err(), VisionError::Unconfigured(_)));

        let result = OpenAiVisionProvider::new().analyze(&image).await;
        assert!(matches!(result.unwrap_err(), VisionError::Unconfigured(_)));

        let result = ClarifaiProvider::new().analyze(&image).await;
        assert!(matches!(result.unwrap_err(), VisionError::Unconfigured(_)));
    }
}
