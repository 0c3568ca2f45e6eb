use base64::prelude::*;
use serde::{Deserialize, Serialize};

/// How [SignContent::data] is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentFormat {
    /// Base64 of a precomputed digest.
    Digest,
    /// Base64 of the whole document.
    BinaryBase64,
    /// The raw text itself.
    Text,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureType {
    Signature,
    #[default]
    XadesBaselineLtaEnveloping,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

/// Type of QLTPS evidence report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    Simple,
    Detailed,
}

/// Placement of a visible signature in a PDF.
///
/// `image_x_axis` and `image_y_axis` are the upper-left corner of the
/// signature area relative to the page origin. `page_number` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignaturePosition {
    pub image_height: u32,
    pub image_width: u32,
    pub image_x_axis: u32,
    pub image_y_axis: u32,
    pub page_number: u32,
}

/// A single document (or digest, or text) to be signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignContent {
    /// Text shown to the signer in the mobile application.
    pub confirm_text: String,
    pub content_format: ContentFormat,
    pub data: String,
    pub file_name: String,
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,
    #[serde(default)]
    pub pades_visual_signature: bool,
    #[serde(default)]
    pub signature_position: Option<SignaturePosition>,
    #[serde(default)]
    pub signature_type: SignatureType,
    /// Keep the signed content for ten years instead of seven days.
    #[serde(default)]
    pub to_be_archived: bool,
}

impl SignContent {
    fn new(
        confirm_text: impl Into<String>,
        file_name: impl Into<String>,
        content_format: ContentFormat,
        data: String,
    ) -> Self {
        Self {
            confirm_text: confirm_text.into(),
            content_format,
            data,
            file_name: file_name.into(),
            hash_algorithm: HashAlgorithm::default(),
            pades_visual_signature: false,
            signature_position: None,
            signature_type: SignatureType::default(),
            to_be_archived: false,
        }
    }

    /// Sign a plain text.
    pub fn text(
        confirm_text: impl Into<String>,
        file_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(confirm_text, file_name, ContentFormat::Text, text.into())
    }

    /// Sign a whole document. The bytes are base64 encoded.
    pub fn binary(
        confirm_text: impl Into<String>,
        file_name: impl Into<String>,
        document: impl AsRef<[u8]>,
    ) -> Self {
        Self::new(
            confirm_text,
            file_name,
            ContentFormat::BinaryBase64,
            BASE64_STANDARD.encode(document),
        )
    }

    /// Sign a digest computed by the caller with `algorithm`. The digest is base64 encoded.
    pub fn digest(
        confirm_text: impl Into<String>,
        file_name: impl Into<String>,
        digest: impl AsRef<[u8]>,
        algorithm: HashAlgorithm,
    ) -> Self {
        let mut content = Self::new(
            confirm_text,
            file_name,
            ContentFormat::Digest,
            BASE64_STANDARD.encode(digest),
        );
        content.hash_algorithm = algorithm;
        content
    }

    pub fn with_signature_type(mut self, signature_type: SignatureType) -> Self {
        self.signature_type = signature_type;
        self
    }

    pub fn with_hash_algorithm(mut self, hash_algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = hash_algorithm;
        self
    }

    /// Add a visible PAdES signature at `position`.
    pub fn with_visual_signature(mut self, position: SignaturePosition) -> Self {
        self.pades_visual_signature = true;
        self.signature_position = Some(position);
        self
    }

    pub fn archived(mut self) -> Self {
        self.to_be_archived = true;
        self
    }
}
