//! Live adapter for the Gemini `generateContent` API.

use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::StudioError;
use crate::input::SourceImage;
use crate::ports::image_editor::{
    EditFuture, EditRequest, GeneratedImage, ImageEditor, ImageResponse,
};
use crate::ports::style_describer::{DescribeFuture, StyleDescriber};
use crate::prompt::STYLE_ANALYSIS_INSTRUCTION;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Longest slice of a response body quoted in error messages.
const MAX_BODY_IN_ERROR: usize = 500;

/// Live Gemini client that serves both the describe and edit calls.
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self { client: Client::new(), api_key }
    }

    /// POST a `generateContent` body and parse the response.
    async fn generate_content(&self, model: &str, body: &Value) -> Result<ParsedResponse, StudioError> {
        let url = format!("{GEMINI_API_BASE}/{model}:generateContent");
        tracing::debug!(%url, "calling Gemini");

        let response =
            self.client.post(&url).header("x-goog-api-key", &self.api_key).json(body).send().await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(StudioError::Api { status: status.as_u16(), message: response_text });
        }

        let parsed: GeminiResponse = serde_json::from_str(&response_text).map_err(|e| {
            StudioError::Api { status: 200, message: format!("Failed to parse response: {e}") }
        })?;

        Ok(ParsedResponse { body: response_text, parsed })
    }
}

struct ParsedResponse {
    body: String,
    parsed: GeminiResponse,
}

impl ParsedResponse {
    fn parts(&self) -> impl Iterator<Item = &GeminiPart> {
        self.parsed
            .candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|content| content.parts.iter())
    }

    fn text(&self) -> String {
        self.parts()
            .filter_map(|p| p.text.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn truncated_body(&self) -> String {
        if self.body.len() > MAX_BODY_IN_ERROR {
            let mut end = MAX_BODY_IN_ERROR;
            while !self.body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &self.body[..end])
        } else {
            self.body.clone()
        }
    }
}

fn inline_image_part(image: &SourceImage) -> Value {
    serde_json::json!({
        "inlineData": {
            "mimeType": image.mime_type,
            "data": image.base64(),
        }
    })
}

/// Request body for the style description call.
fn describe_body(image: &SourceImage) -> Value {
    serde_json::json!({
        "contents": [{
            "parts": [
                inline_image_part(image),
                {"text": STYLE_ANALYSIS_INSTRUCTION}
            ]
        }]
    })
}

/// Request body for the product edit call.
fn edit_body(request: &EditRequest) -> Value {
    serde_json::json!({
        "contents": [{
            "parts": [
                inline_image_part(&request.product),
                {"text": request.prompt}
            ]
        }],
        "generationConfig": {
            "responseModalities": ["IMAGE", "TEXT"],
            "imageConfig": {
                "aspectRatio": request.aspect_ratio,
                "imageSize": request.size,
            }
        }
    })
}

impl StyleDescriber for GeminiClient {
    fn describe(&self, image: &SourceImage, model: &str) -> DescribeFuture<'_> {
        let body = describe_body(image);
        let model = model.to_string();
        Box::pin(async move {
            let response = self.generate_content(&model, &body).await?;
            let text = response.text();
            if text.is_empty() {
                return Err(StudioError::Api {
                    status: 200,
                    message: format!("No description in response. Body: {}", response.truncated_body()),
                });
            }
            Ok(text)
        })
    }
}

impl ImageEditor for GeminiClient {
    fn edit(&self, request: &EditRequest) -> EditFuture<'_> {
        let body = edit_body(request);
        let model = request.model.clone();
        Box::pin(async move {
            let response = self.generate_content(&model, &body).await?;

            let mut images = Vec::new();
            for part in response.parts() {
                if let Some(ref inline) = part.inline_data {
                    if !inline.mime_type.starts_with("image/") {
                        continue;
                    }
                    let data = base64::engine::general_purpose::STANDARD
                        .decode(&inline.data)
                        .map_err(|e| StudioError::Api {
                            status: 200,
                            message: format!("Failed to decode base64: {e}"),
                        })?;
                    images.push(GeneratedImage { data, mime_type: inline.mime_type.clone() });
                }
            }

            if images.is_empty() {
                // The model sometimes answers with text only (e.g. a refusal).
                let text = response.text();
                let detail = if text.is_empty() { response.truncated_body() } else { text };
                return Err(StudioError::Api {
                    status: 200,
                    message: format!("No images in response: {detail}"),
                });
            }

            Ok(ImageResponse { images })
        })
    }
}

// --- Gemini API response types ---

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    inline_data: Option<GeminiInlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> SourceImage {
        SourceImage { file_name: "mug.png".into(), data: vec![1, 2, 3], mime_type: "image/png".into() }
    }

    fn parse(body: &str) -> ParsedResponse {
        ParsedResponse { body: body.to_string(), parsed: serde_json::from_str(body).unwrap() }
    }

    #[test]
    fn edit_body_carries_image_prompt_and_config() {
        let request = EditRequest {
            model: "gemini-2.5-flash-image".into(),
            prompt: "a mug on marble".into(),
            product: product(),
            aspect_ratio: "16:9".into(),
            size: "2K".into(),
        };
        let body = edit_body(&request);
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "AQID");
        assert_eq!(parts[1]["text"], "a mug on marble");
        assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "16:9");
        assert_eq!(body["generationConfig"]["imageConfig"]["imageSize"], "2K");
        assert_eq!(body["generationConfig"]["responseModalities"][0], "IMAGE");
    }

    #[test]
    fn describe_body_sends_instruction() {
        let body = describe_body(&product());
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["data"], "AQID");
        assert_eq!(parts[1]["text"], STYLE_ANALYSIS_INSTRUCTION);
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn text_joins_non_empty_parts() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":" Warm wood. "},{"text":""},{"text":"Soft light."}]}}]}"#,
        );
        assert_eq!(response.text(), "Warm wood.\nSoft light.");
    }

    #[test]
    fn missing_content_is_tolerated() {
        let response = parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        assert_eq!(response.parts().count(), 0);
        assert!(response.text().is_empty());
    }

    #[test]
    fn truncated_body_limits_length() {
        let long = format!(r#"{{"candidates":[],"pad":"{}"}}"#, "x".repeat(800));
        let response = parse(&long);
        let truncated = response.truncated_body();
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.len(), MAX_BODY_IN_ERROR + 3);
    }
}
