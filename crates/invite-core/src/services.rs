//! Prompts, request bodies and response handling for the hosted
//! generative-AI service. The HTTP call itself sits behind
//! [`GenerativeTransport`] so everything here runs off the browser.

use crate::error::ServiceError;
use crate::guest::GuestInfo;
use serde::Deserialize;
use serde_json::{json, Value};

pub const STORY_MODEL: &str = "gemini-3-flash-preview";
pub const GROUNDING_MODEL: &str = "gemini-2.5-flash";

pub const STORY_EMPTY: &str = "Love is the ultimate heuristic.";
pub const STORY_UNAVAILABLE: &str = "Our story is being re-indexed. Please check back soon.";
pub const STORY_PLACEHOLDER: &str = "Calculating the optimal narrative path for two engineers...";
pub const RSVP_ACK_EMPTY: &str = "RSVP Received. Synchronizing data...";
pub const RSVP_ACK_UNAVAILABLE: &str = "RSVP Received. Neural link stable.";
pub const VENUE_UNAVAILABLE: &str =
    "Unable to retrieve real-time venue intelligence. Please use the static address below.";

const COUPLE: &str = "Muhammad Danial Siddiqui and Noor Fatima Memon";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoryStyle {
    #[default]
    Classic,
    Tech,
    Poetic,
    SciFi,
}

impl StoryStyle {
    pub const ALL: [StoryStyle; 4] = [
        StoryStyle::Classic,
        StoryStyle::Tech,
        StoryStyle::Poetic,
        StoryStyle::SciFi,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            StoryStyle::Classic => "classic",
            StoryStyle::Tech => "tech",
            StoryStyle::Poetic => "poetic",
            StoryStyle::SciFi => "sci-fi",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.tag() == tag)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VenueIntel {
    pub description: String,
    pub maps_uri: Option<String>,
}

/// What the story panel shows: the placeholder until the first story lands,
/// afterwards the latest story, kept on screen while a restyle is in flight.
#[derive(Debug, Default)]
pub struct StoryView {
    text: Option<String>,
    latest: u64,
    loading: bool,
}

impl StoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request; the returned ticket must be handed back to `finish`.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.loading = true;
        self.latest
    }

    /// Accept `text` if `ticket` is still the newest request.
    pub fn finish(&mut self, ticket: u64, text: String) -> bool {
        if ticket != self.latest {
            return false;
        }
        self.text = Some(text);
        self.loading = false;
        true
    }

    /// Invalidate every outstanding ticket.
    pub fn cancel(&mut self) {
        self.latest += 1;
        self.loading = false;
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or(STORY_PLACEHOLDER)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// One `generateContent` round trip. Implementations return the raw JSON
/// response body.
#[allow(async_fn_in_trait)]
pub trait GenerativeTransport {
    async fn generate(&self, model: &str, body: &Value) -> Result<String, ServiceError>;
}

// ---------------------------------------------------------------------------
// request bodies

pub fn story_request(style: StoryStyle) -> Value {
    let prompt = format!(
        "Rewrite the romantic story of two AI engineers, {COUPLE}, who are getting married in February 2026. \
         They met during an AI hackathon. Danial was working on computer vision and Noor was working on LLMs. \
         They bonded over fine-tuning models and coffee. Write it in a {} style. \
         Keep it under 150 words. Focus on the merging of their lives like a successful model merge.",
        style.tag()
    );
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": { "temperature": 0.8, "topP": 0.9 }
    })
}

pub fn rsvp_request(guest: &GuestInfo) -> Value {
    let prompt = format!(
        "Generate a short, warm, and tech-witty wedding RSVP acknowledgment for a guest named {} who is {}. \
         Their message to us was: \"{}\". \
         We are two AI engineers, {COUPLE} getting married in Feb 2026. Keep it under 50 words.",
        guest.name,
        if guest.attending { "attending" } else { "not attending" },
        guest.message
    );
    json!({ "contents": [{ "parts": [{ "text": prompt }] }] })
}

pub fn venue_request(venue: &str, near: Option<GeoPoint>) -> Value {
    let prompt = format!(
        "Where is {venue}? Provide an elegant description and details for a wedding invitation."
    );
    let mut body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "tools": [{ "googleMaps": {} }]
    });
    if let Some(p) = near {
        body["toolConfig"] = json!({
            "retrievalConfig": {
                "latLng": { "latitude": p.latitude, "longitude": p.longitude }
            }
        });
    }
    body
}

pub fn face_search_request(jpeg_base64: &str, labels: &[&str]) -> Value {
    let listed = serde_json::to_string(labels).unwrap_or_else(|_| "[]".to_string());
    let prompt = format!(
        "Look at this person's face. We want to find which wedding event galleries they are likely in. \
         The available galleries are: {listed}. \
         Please analyze the person's expression and style in the image, then return a JSON array containing \
         the titles of the most relevant 2 or 3 event galleries where this person might be appearing \
         (e.g., formal events vs celebratory ones). \
         Respond ONLY with a JSON array of strings."
    );
    json!({
        "contents": [{
            "parts": [
                { "inlineData": { "mimeType": "image/jpeg", "data": jpeg_base64 } },
                { "text": prompt }
            ]
        }],
        "generationConfig": { "responseMimeType": "application/json" }
    })
}

// ---------------------------------------------------------------------------
// responses

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub maps: Option<MapsSource>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MapsSource {
    #[serde(default)]
    pub uri: Option<String>,
}

impl GenerateResponse {
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Concatenated text parts of the first candidate; `None` when empty.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }

    pub fn maps_uri(&self) -> Option<String> {
        self.candidates
            .first()?
            .grounding_metadata
            .as_ref()?
            .grounding_chunks
            .iter()
            .find_map(|c| c.maps.as_ref()?.uri.clone())
    }
}

/// Titles the model returned, restricted to `labels`, in model order, no repeats.
pub fn known_labels(model_text: &str, labels: &[&str]) -> Result<Vec<String>, ServiceError> {
    let returned: Vec<String> = serde_json::from_str(model_text.trim())?;
    let mut out: Vec<String> = Vec::new();
    for title in returned {
        if labels.contains(&title.as_str()) && !out.contains(&title) {
            out.push(title);
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------

pub struct InvitationAi<T> {
    transport: T,
}

impl<T: GenerativeTransport> InvitationAi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call(&self, model: &str, body: &Value) -> Result<GenerateResponse, ServiceError> {
        let raw = self.transport.generate(model, body).await?;
        GenerateResponse::parse(&raw)
    }

    /// Never fails; the placeholder texts stand in for errors.
    pub async fn story(&self, style: StoryStyle) -> String {
        match self.call(STORY_MODEL, &story_request(style)).await {
            Ok(resp) => resp.text().unwrap_or_else(|| STORY_EMPTY.to_string()),
            Err(e) => {
                log::error!("[ai] story generation failed: {}", e);
                STORY_UNAVAILABLE.to_string()
            }
        }
    }

    pub async fn rsvp_acknowledgment(&self, guest: &GuestInfo) -> String {
        match self.call(STORY_MODEL, &rsvp_request(guest)).await {
            Ok(resp) => resp.text().unwrap_or_else(|| RSVP_ACK_EMPTY.to_string()),
            Err(e) => {
                log::error!("[ai] rsvp acknowledgment failed: {}", e);
                RSVP_ACK_UNAVAILABLE.to_string()
            }
        }
    }

    pub async fn venue(&self, venue: &str, near: Option<GeoPoint>) -> Result<VenueIntel, ServiceError> {
        let resp = self
            .call(GROUNDING_MODEL, &venue_request(venue, near))
            .await
            .map_err(|e| {
                log::error!("[ai] venue grounding failed: {}", e);
                e
            })?;
        let description = resp.text().ok_or(ServiceError::Empty)?;
        Ok(VenueIntel {
            description,
            maps_uri: resp.maps_uri(),
        })
    }

    /// Gallery titles likely to contain the pictured guest. Empty on any failure.
    pub async fn face_search(&self, jpeg_base64: &str, labels: &[&str]) -> Vec<String> {
        let result = async {
            let resp = self
                .call(STORY_MODEL, &face_search_request(jpeg_base64, labels))
                .await?;
            match resp.text() {
                Some(text) => known_labels(&text, labels),
                None => Ok(Vec::new()),
            }
        }
        .await;
        result.unwrap_or_else(|e| {
            log::error!("[ai] face search failed: {}", e);
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounding_uri_comes_from_first_maps_chunk() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"A hall"}]},
            "groundingMetadata":{"groundingChunks":[{"web":{}},{"maps":{"uri":"https://maps.example/a"}},
            {"maps":{"uri":"https://maps.example/b"}}]}}]}"#;
        let resp = GenerateResponse::parse(raw).unwrap();
        assert_eq!(resp.text().as_deref(), Some("A hall"));
        assert_eq!(resp.maps_uri().as_deref(), Some("https://maps.example/a"));
    }

    #[test]
    fn venue_body_carries_location_only_when_known() {
        assert!(venue_request("Hall", None).get("toolConfig").is_none());
        let body = venue_request(
            "Hall",
            Some(GeoPoint {
                latitude: 24.9,
                longitude: 67.2,
            }),
        );
        assert_eq!(body["toolConfig"]["retrievalConfig"]["latLng"]["latitude"], 24.9);
    }
}
