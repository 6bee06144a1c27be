// Generative-AI boundary against a scripted transport.

use futures::executor::block_on;
use invite_core::guest::GuestInfo;
use invite_core::itinerary::gallery_titles;
use invite_core::services::*;
use invite_core::ServiceError;
use serde_json::{json, Value};
use std::cell::RefCell;

/// Replays one canned outcome per call and records what was sent.
#[derive(Default)]
struct Scripted {
    replies: RefCell<Vec<Result<String, ServiceError>>>,
    sent: RefCell<Vec<(String, Value)>>,
}

impl Scripted {
    fn replying(reply: Result<String, ServiceError>) -> Self {
        let s = Self::default();
        s.replies.borrow_mut().push(reply);
        s
    }
}

impl GenerativeTransport for Scripted {
    async fn generate(&self, model: &str, body: &Value) -> Result<String, ServiceError> {
        self.sent.borrow_mut().push((model.to_string(), body.clone()));
        self.replies.borrow_mut().pop().unwrap_or(Err(ServiceError::Empty))
    }
}

fn text_reply(text: &str) -> Result<String, ServiceError> {
    Ok(json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }).to_string())
}

#[test]
fn story_returns_model_text_with_style() {
    let ai = InvitationAi::new(Scripted::replying(text_reply("Two models merged.")));
    assert_eq!(block_on(ai.story(StoryStyle::SciFi)), "Two models merged.");

    let sent = ai.transport().sent.borrow();
    assert_eq!(sent[0].0, STORY_MODEL);
    let prompt = sent[0].1["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Write it in a sci-fi style."));
    assert_eq!(sent[0].1["generationConfig"]["temperature"], 0.8);
}

#[test]
fn story_falls_back_on_empty_and_failure() {
    let ai = InvitationAi::new(Scripted::replying(Ok(json!({ "candidates": [] }).to_string())));
    assert_eq!(block_on(ai.story(StoryStyle::Classic)), STORY_EMPTY);

    let ai = InvitationAi::new(Scripted::replying(Err(ServiceError::Status(503))));
    assert_eq!(block_on(ai.story(StoryStyle::Poetic)), STORY_UNAVAILABLE);

    let ai = InvitationAi::new(Scripted::replying(Ok("<html>".to_string())));
    assert_eq!(block_on(ai.story(StoryStyle::Tech)), STORY_UNAVAILABLE);
}

#[test]
fn rsvp_acknowledgment_mentions_guest() {
    let guest = GuestInfo {
        name: "Hina".into(),
        attending: false,
        message: "Congrats!".into(),
        ..GuestInfo::default()
    };
    let ai = InvitationAi::new(Scripted::replying(text_reply("Thanks Hina")));
    assert_eq!(block_on(ai.rsvp_acknowledgment(&guest)), "Thanks Hina");
    let sent = ai.transport().sent.borrow();
    let prompt = sent[0].1["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("named Hina who is not attending"));
    assert!(prompt.contains("\"Congrats!\""));

    let ai = InvitationAi::new(Scripted::replying(Ok("{}".to_string())));
    assert_eq!(block_on(ai.rsvp_acknowledgment(&guest)), RSVP_ACK_EMPTY);
    let ai = InvitationAi::new(Scripted::replying(Err(ServiceError::Transport("offline".into()))));
    assert_eq!(block_on(ai.rsvp_acknowledgment(&guest)), RSVP_ACK_UNAVAILABLE);
}

#[test]
fn venue_returns_description_and_maps_uri() {
    let reply = json!({
        "candidates": [{
            "content": { "parts": [{ "text": "A garden hall." }] },
            "groundingMetadata": { "groundingChunks": [
                { "web": { "uri": "https://example.com" } },
                { "maps": { "uri": "https://maps.google.com/?cid=1" } }
            ]}
        }]
    })
    .to_string();
    let ai = InvitationAi::new(Scripted::replying(Ok(reply)));
    let near = GeoPoint {
        latitude: 24.9,
        longitude: 67.2,
    };
    let intel = block_on(ai.venue("Celebration Venue", Some(near))).unwrap();
    assert_eq!(intel.description, "A garden hall.");
    assert_eq!(intel.maps_uri.as_deref(), Some("https://maps.google.com/?cid=1"));

    let sent = ai.transport().sent.borrow();
    assert_eq!(sent[0].0, GROUNDING_MODEL);
    assert_eq!(sent[0].1["tools"][0], json!({ "googleMaps": {} }));
    assert_eq!(sent[0].1["toolConfig"]["retrievalConfig"]["latLng"]["longitude"], 67.2);
}

#[test]
fn venue_failure_is_an_error() {
    let ai = InvitationAi::new(Scripted::replying(Err(ServiceError::Status(500))));
    assert!(matches!(
        block_on(ai.venue("Hall", None)),
        Err(ServiceError::Status(500))
    ));
}

#[test]
fn face_search_keeps_only_known_galleries() {
    let labels = gallery_titles();
    let ai = InvitationAi::new(Scripted::replying(text_reply(
        r#"["Mehndi", "Beach Party", "Walima", "Mehndi"]"#,
    )));
    assert_eq!(
        block_on(ai.face_search("AAAA", &labels)),
        vec!["Mehndi".to_string(), "Walima".to_string()]
    );

    let sent = ai.transport().sent.borrow();
    let parts = &sent[0].1["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(parts[0]["inlineData"]["data"], "AAAA");
    assert_eq!(sent[0].1["generationConfig"]["responseMimeType"], "application/json");
}

#[test]
fn face_search_failures_yield_empty() {
    let labels = gallery_titles();
    for reply in [
        text_reply("not json at all"),
        text_reply(r#"{"titles": ["Mehndi"]}"#),
        Ok(json!({ "candidates": [] }).to_string()),
        Err(ServiceError::Transport("offline".into())),
    ] {
        let ai = InvitationAi::new(Scripted::replying(reply));
        assert!(block_on(ai.face_search("AAAA", &labels)).is_empty());
    }
}

#[test]
fn style_tags_round_trip() {
    for style in StoryStyle::ALL {
        assert_eq!(StoryStyle::from_tag(style.tag()), Some(style));
    }
    assert_eq!(StoryStyle::from_tag("haiku"), None);
}

#[test]
fn placeholder_shows_only_before_the_first_story() {
    let mut view = StoryView::new();
    assert_eq!(view.text(), STORY_PLACEHOLDER);

    let first = view.begin();
    assert_eq!(view.text(), STORY_PLACEHOLDER);
    assert!(view.finish(first, "Two engineers met at a hackathon.".into()));
    assert!(!view.is_loading());

    // a restyle keeps the previous story visible while it loads
    let second = view.begin();
    assert!(view.is_loading());
    assert_eq!(view.text(), "Two engineers met at a hackathon.");
    assert!(view.finish(second, "Once upon a compile...".into()));
    assert_eq!(view.text(), "Once upon a compile...");
}

#[test]
fn only_the_newest_story_request_lands() {
    let mut view = StoryView::new();
    let stale = view.begin();
    let fresh = view.begin();
    assert!(!view.finish(stale, "old".into()));
    assert!(view.is_loading());
    assert!(view.finish(fresh, "new".into()));

    let pending = view.begin();
    view.cancel();
    assert!(!view.finish(pending, "after unmount".into()));
    assert_eq!(view.text(), "new");
}
