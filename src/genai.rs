//! Generative content provider
//!
//! Thin client for the hosted image/text model behind the court backdrop
//! and the (dormant) goal-insight call. Failure policy is uniform: catch,
//! log, return a sentinel. Nothing here may ever stall or crash the game
//! loop; every fetch carries an abort timer so a hung request cannot pin
//! the loading indicator.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, HtmlImageElement, Request, RequestInit, Response};

use crate::consts::GENAI_TIMEOUT_MS;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const TEXT_MODEL: &str = "gemini-2.5-flash";

/// Shown in place of an insight when the provider fails
const INSIGHT_FALLBACK: &str = "The coaching assistant could not be reached right now.";

/// Single-slot backdrop state, written once by the fire-and-forget fetch
/// task and read by the renderer every frame.
#[derive(Debug, Clone)]
pub enum Backdrop {
    /// Fetch in flight; the loading indicator is shown
    Pending,
    /// Decoded court image ready to draw
    Ready(HtmlImageElement),
    /// Generation failed or was skipped; flat fallback color forever
    Absent,
}

// --- Request/response bodies -------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidatePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

// --- Public calls ------------------------------------------------------------

/// Ask the image model for a court backdrop. Returns a `data:` URL, or
/// `None` on any failure (missing key, network error, timeout, no image
/// in the response). Never propagates an error.
pub async fn generate_backdrop(prompt: &str) -> Option<String> {
    let Some(key) = api_key() else {
        log::warn!("no generative API key configured; using flat backdrop");
        return None;
    };

    let body = GenerateRequest {
        contents: vec![Content {
            parts: vec![Part { text: prompt }],
        }],
        generation_config: Some(GenerationConfig {
            temperature: None,
            top_p: None,
            image_config: Some(ImageConfig {
                aspect_ratio: "4:3",
            }),
        }),
    };

    match post_generate(&key, IMAGE_MODEL, &body).await {
        Ok(response) => {
            let url = first_inline_image(&response);
            if url.is_none() {
                log::warn!("image model returned no inline image data");
            }
            url
        }
        Err(err) => {
            log::error!("backdrop generation failed: {err:?}");
            None
        }
    }
}

/// Ask the text model for a short insight about a goal. Part of the
/// collaborator contract but not invoked from the playable flow; a future
/// insight panel in the goal modal would call it.
pub async fn goal_insight(goal: &str, context: &str) -> String {
    let Some(key) = api_key() else {
        return INSIGHT_FALLBACK.to_string();
    };

    let prompt = format!(
        "I am studying the winning play \"{goal}\". Context: {context}. \
         Give me a short, focused insight (at most 3 sentences) on how this \
         play helps a team win. Answer in plain, energetic language."
    );
    let body = GenerateRequest {
        contents: vec![Content {
            parts: vec![Part { text: &prompt }],
        }],
        generation_config: Some(GenerationConfig {
            temperature: Some(0.7),
            top_p: Some(0.95),
            image_config: None,
        }),
    };

    match post_generate(&key, TEXT_MODEL, &body).await {
        Ok(response) => first_text(&response).unwrap_or_else(|| INSIGHT_FALLBACK.to_string()),
        Err(err) => {
            log::error!("insight request failed: {err:?}");
            INSIGHT_FALLBACK.to_string()
        }
    }
}

/// Load and decode an image from a URL (data URLs included)
pub async fn decode_image(url: &str) -> Option<HtmlImageElement> {
    let img = HtmlImageElement::new().ok()?;
    img.set_src(url);
    match JsFuture::from(img.decode()).await {
        Ok(_) => Some(img),
        Err(err) => {
            log::error!("backdrop decode failed: {err:?}");
            None
        }
    }
}

// --- Internals ---------------------------------------------------------------

/// API key from a well-known page global; absent means skip the call
fn api_key() -> Option<String> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(window.as_ref(), &JsValue::from_str("COURT_RUNNER_API_KEY"))
        .ok()?
        .as_string()
        .filter(|key| !key.is_empty())
}

/// POST a generateContent request, aborting after [`GENAI_TIMEOUT_MS`]
async fn post_generate(
    key: &str,
    model: &str,
    body: &GenerateRequest<'_>,
) -> Result<GenerateResponse, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let json = serde_json::to_string(body).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let controller = AbortController::new()?;
    let headers = Headers::new()?;
    headers.append("Content-Type", "application/json")?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&JsValue::from(headers));
    init.set_body(&JsValue::from_str(&json));
    init.set_signal(Some(&controller.signal()));

    let url = format!("{API_BASE}/{model}:generateContent?key={key}");
    let request = Request::new_with_str_and_init(&url, &init)?;

    // Abort timer: a stalled fetch resolves as an error instead of hanging
    let abort = Closure::once_into_js(move || controller.abort());
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        abort.unchecked_ref(),
        GENAI_TIMEOUT_MS,
    )?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "provider returned HTTP {}",
            response.status()
        )));
    }

    let text = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("non-text response body"))?;
    serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// First inline image part across all candidates, as a data URL
fn first_inline_image(response: &GenerateResponse) -> Option<String> {
    response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|c| c.parts.iter())
        .find_map(|part| part.inline_data.as_ref())
        .map(|inline| format!("data:{};base64,{}", inline.mime_type, inline.data))
}

/// First text part across all candidates
fn first_text(response: &GenerateResponse) -> Option<String> {
    response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|c| c.parts.iter())
        .find_map(|part| part.text.clone())
        .filter(|text| !text.is_empty())
}
