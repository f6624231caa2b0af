//! YouTube caption backend.
//!
//! Reads the caption track list out of the watch page's player response and
//! fetches tracks from their `baseUrl` in the `json3` timed-text format.

use super::{CaptionFragment, CaptionProvider, CaptionTrack};
use crate::error::{Result, VidseekError};
use crate::search::watch_url;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Endpoint used for direct (listing-free) caption fetches.
const TIMEDTEXT_URL: &str = "https://www.youtube.com/api/timedtext";

/// Timeout for a single caption request.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Caption backend that talks to youtube.com.
pub struct YoutubeCaptions {
    client: reqwest::Client,
}

impl YoutubeCaptions {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| VidseekError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// GET a URL and return its body, treating non-success statuses as errors.
    async fn get_text(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(VidseekError::Captions(format!(
                "request returned status {}",
                status.as_u16()
            )));
        }

        Ok(resp.text().await?)
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<CaptionFragment>> {
        let body = self.get_text(url).await?;
        parse_json3(&body)
    }
}

#[async_trait]
impl CaptionProvider for YoutubeCaptions {
    #[instrument(skip(self))]
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>> {
        let html = self.get_text(&watch_url(video_id)).await?;
        let tracks = parse_caption_tracks(&html)?;
        debug!("Found {} caption tracks", tracks.len());
        Ok(tracks)
    }

    async fn fetch(&self, track: &CaptionTrack) -> Result<Vec<CaptionFragment>> {
        let url = with_params(&track.base_url, &[("fmt", "json3")])?;
        self.fetch_url(&url).await
    }

    async fn translate(&self, track: &CaptionTrack, target_lang: &str) -> Result<Vec<CaptionFragment>> {
        if !track.translatable {
            return Err(VidseekError::Captions(format!(
                "track '{}' cannot be translated",
                track.language_code
            )));
        }
        let url = with_params(&track.base_url, &[("fmt", "json3"), ("tlang", target_lang)])?;
        self.fetch_url(&url).await
    }

    #[instrument(skip(self))]
    async fn fetch_direct(&self, video_id: &str, languages: &[&str]) -> Result<Vec<CaptionFragment>> {
        let mut last_error = None;

        for &lang in languages {
            let url = with_params(TIMEDTEXT_URL, &[("v", video_id), ("lang", lang), ("fmt", "json3")])?;
            match self.fetch_url(&url).await {
                Ok(fragments) if !fragments.is_empty() => return Ok(fragments),
                Ok(_) => debug!("No {} captions from direct fetch", lang),
                Err(e) => {
                    debug!("Direct fetch for {} failed: {}", lang, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            VidseekError::Captions(format!("no captions for languages {:?}", languages))
        }))
    }
}

/// Return `base` with `params` set, replacing any existing values for the same keys.
fn with_params(base: &str, params: &[(&str, &str)]) -> Result<String> {
    let mut url = Url::parse(base)
        .map_err(|e| VidseekError::Captions(format!("invalid caption URL {}: {}", base, e)))?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !params.iter().any(|(p, _)| *p == &**k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .extend_pairs(params.iter().copied());

    Ok(url.into())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<RawTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    name: Option<serde_json::Value>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    is_translatable: bool,
}

/// Extract the caption tracks from a watch page.
fn parse_caption_tracks(html: &str) -> Result<Vec<CaptionTrack>> {
    let (_, after) = html.split_once("\"captions\":").ok_or_else(|| {
        VidseekError::Captions("captions are disabled or unavailable for this video".to_string())
    })?;

    let captions_json = after
        .split_once(",\"videoDetails")
        .map(|(json, _)| json)
        .unwrap_or(after)
        .replace('\n', "");

    let captions: serde_json::Value = serde_json::from_str(&captions_json)
        .map_err(|e| VidseekError::Captions(format!("unreadable caption metadata: {}", e)))?;

    let renderer: TracklistRenderer =
        serde_json::from_value(captions["playerCaptionsTracklistRenderer"].clone())
            .map_err(|e| VidseekError::Captions(format!("unreadable caption track list: {}", e)))?;

    if renderer.caption_tracks.is_empty() {
        return Err(VidseekError::Captions("video has no caption tracks".to_string()));
    }

    let tracks = renderer
        .caption_tracks
        .into_iter()
        .map(|raw| {
            let language = raw
                .name
                .as_ref()
                .and_then(track_name)
                .unwrap_or_else(|| raw.language_code.clone());

            CaptionTrack {
                generated: raw.kind.as_deref() == Some("asr"),
                translatable: raw.is_translatable,
                language,
                language_code: raw.language_code,
                base_url: raw.base_url,
            }
        })
        .collect();

    Ok(tracks)
}

/// Track names arrive either as `{"simpleText": ..}` or `{"runs": [{"text": ..}]}`.
fn track_name(name: &serde_json::Value) -> Option<String> {
    name["simpleText"]
        .as_str()
        .or_else(|| name["runs"][0]["text"].as_str())
        .map(|s| s.to_string())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Json3 {
    events: Vec<Json3Event>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Json3Event {
    segs: Vec<Json3Seg>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Json3Seg {
    utf8: String,
}

/// Parse a `json3` timed-text document into one fragment per event.
fn parse_json3(body: &str) -> Result<Vec<CaptionFragment>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let doc: Json3 = serde_json::from_str(body)
        .map_err(|e| VidseekError::Captions(format!("unreadable caption document: {}", e)))?;

    Ok(doc
        .events
        .into_iter()
        .filter(|event| !event.segs.is_empty())
        .map(|event| {
            let text: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            CaptionFragment::new(text)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATCH_PAGE: &str = r#"<html><script>var ytInitialPlayerResponse = {"playabilityStatus":{"status":"OK"},"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abcdefghijk&lang=en&fmt=srv3","name":{"simpleText":"English"},"languageCode":"en","isTranslatable":true},{"baseUrl":"https://www.youtube.com/api/timedtext?v=abcdefghijk&lang=de&kind=asr","name":{"runs":[{"text":"German (auto-generated)"}]},"languageCode":"de","kind":"asr","isTranslatable":false}]}},"videoDetails":{"videoId":"abcdefghijk"}};</script></html>"#;

    #[test]
    fn test_parse_caption_tracks() {
        let tracks = parse_caption_tracks(WATCH_PAGE).unwrap();
        assert_eq!(tracks.len(), 2);

        assert_eq!(tracks[0].language_code, "en");
        assert_eq!(tracks[0].language, "English");
        assert!(!tracks[0].generated);
        assert!(tracks[0].translatable);
        assert_eq!(
            tracks[0].base_url,
            "https://www.youtube.com/api/timedtext?v=abcdefghijk&lang=en&fmt=srv3"
        );

        assert_eq!(tracks[1].language, "German (auto-generated)");
        assert!(tracks[1].generated);
        assert!(!tracks[1].translatable);
    }

    #[test]
    fn test_parse_page_without_captions() {
        let err = parse_caption_tracks("<html>no player here</html>").unwrap_err();
        assert!(matches!(err, VidseekError::Captions(_)));
    }

    #[test]
    fn test_with_params_replaces_existing() {
        let url = with_params(
            "https://www.youtube.com/api/timedtext?v=abc&lang=en&fmt=srv3",
            &[("fmt", "json3"), ("tlang", "en")],
        )
        .unwrap();
        assert_eq!(
            url,
            "https://www.youtube.com/api/timedtext?v=abc&lang=en&fmt=json3&tlang=en"
        );
    }

    #[test]
    fn test_parse_json3() {
        let body = r#"{
            "wireMagic": "pb3",
            "events": [
                { "tStartMs": 0, "dDurationMs": 2000, "id": 1 },
                { "tStartMs": 0, "dDurationMs": 2000, "segs": [{ "utf8": "Let's look" }, { "utf8": " at problem 5" }] },
                { "tStartMs": 2000, "segs": [{ "utf8": "\n" }] },
                { "tStartMs": 4000, "segs": [{ "utf8": "Turbo the snail" }] }
            ]
        }"#;

        let fragments = parse_json3(body).unwrap();
        let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["Let's look at problem 5", "\n", "Turbo the snail"]);
    }

    #[test]
    fn test_parse_json3_empty_body() {
        assert!(parse_json3("").unwrap().is_empty());
        assert!(parse_json3("not json").is_err());
    }
}
