#[cfg(test)]
mod image_tests {
    use crate::error::VisionError;
    use crate::image::ImagePayload;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    const MAX_BYTES: usize = 4 * 1024 * 1024;

    fn png_payload() -> ImagePayload {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0u8; 16]);
        ImagePayload::new(STANDARD.encode(&bytes))
    }

    #[test]
    fn test_valid_png_accepted() {
        assert!(png_payload().validate(MAX_BYTES).is_ok());
    }

    #[test]
    fn test_valid_jpeg_accepted() {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
        bytes.extend_from_slice(&[0u8; 16]);
        let payload = ImagePayload::new(STANDARD.encode(&bytes));
        assert!(payload.validate(MAX_BYTES).is_ok());
    }

    #[test]
    fn test_data_url_prefix_stripped() {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0u8; 16]);
        let payload = ImagePayload::new(format!(
            "data:image/png;base64,{}",
            STANDARD.encode(&bytes)
        ));
        assert!(payload.validate(MAX_BYTES).is_ok());
        assert!(!payload.base64().starts_with("data:"));
    }

    #[test]
    fn test_empty_payload_rejected() {
        let err = ImagePayload::new("").validate(MAX_BYTES).unwrap_err();
        assert!(matches!(err, VisionError::InvalidImage(_)));
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let err = ImagePayload::new("!!!not-base64!!!")
            .validate(MAX_BYTES)
            .unwrap_err();
        assert!(matches!(err, VisionError::InvalidImage(_)));
    }

    #[test]
    fn test_oversized_image_rejected() {
        let mut bytes = vec![0x89, b'P', b'N', b'G'];
        bytes.extend_from_slice(&vec![0u8; 64]);
        let payload = ImagePayload::new(STANDARD.encode(&bytes));
        let err = payload.validate(32).unwrap_err();
        assert!(matches!(err, VisionError::InvalidImage(_)));
    }

    #[test]
    fn test_unknown_magic_bytes_rejected() {
        let bytes = vec![0x00; 32];
        let payload = ImagePayload::new(STANDARD.encode(&bytes));
        let err = payload.validate(MAX_BYTES).unwrap_err();
        assert!(matches!(err, VisionError::InvalidImage(_)));
    }

    #[test]
    fn test_webp_accepted() {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&[0u8; 4]);
        bytes.extend_from_slice(b"WEBP");
        bytes.extend_from_slice(&[0u8; 8]);
        let payload = ImagePayload::new(STANDARD.encode(&bytes));
        assert!(payload.validate(MAX_BYTES).is_ok());
    }
}
