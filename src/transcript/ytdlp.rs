//! yt-dlp backed transcript provider.
//!
//! Lists caption tracks from yt-dlp's info JSON (`subtitles` holds manual
//! tracks, `automatic_captions` holds generated ones) and fetches track
//! payloads in YouTube's json3 format.

use super::{Track, TrackKind, TrackList, TranscriptLine, TranscriptProvider};
use crate::error::{OppsumError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Transcript provider backed by yt-dlp and YouTube's caption endpoints.
pub struct YtDlpTranscriptProvider {
    http: reqwest::Client,
}

impl YtDlpTranscriptProvider {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Run yt-dlp and return the parsed info JSON for a video.
    async fn fetch_info_json(&self, video_id: &str) -> Result<serde_json::Value> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);

        let output = tokio::process::Command::new("yt-dlp")
            .args([
                "--dump-json",
                "--no-download",
                "--no-warnings",
                "--ignore-errors",
                &url,
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    OppsumError::ToolNotFound("yt-dlp".to_string())
                } else {
                    OppsumError::Transcript(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OppsumError::VideoNotFound(format!(
                "Video {} not found or unavailable: {}",
                video_id, stderr
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&json_str)
            .map_err(|e| OppsumError::Transcript(format!("Failed to parse yt-dlp output: {}", e)))
    }
}

impl Default for YtDlpTranscriptProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptProvider for YtDlpTranscriptProvider {
    async fn list_tracks(&self, video_id: &str) -> Result<TrackList> {
        let info = self.fetch_info_json(video_id).await?;
        let tracks = parse_track_list(&info);

        if tracks.is_empty() {
            // No caption data of any kind means captions are turned off
            return Err(OppsumError::TranscriptsDisabled(video_id.to_string()));
        }

        Ok(tracks)
    }

    async fn fetch_track(&self, track: &Track) -> Result<Vec<TranscriptLine>> {
        debug!("Fetching {} caption track ({:?})", track.language, track.kind);

        let body = self
            .http
            .get(&track.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_json3(&body)
    }
}

/// Extract the track list from yt-dlp's info JSON.
fn parse_track_list(info: &serde_json::Value) -> TrackList {
    let mut tracks = Vec::new();
    collect_tracks(&info["subtitles"], TrackKind::Manual, &mut tracks);
    collect_tracks(&info["automatic_captions"], TrackKind::Generated, &mut tracks);
    TrackList::new(tracks)
}

fn collect_tracks(map: &serde_json::Value, kind: TrackKind, out: &mut Vec<Track>) {
    let Some(map) = map.as_object() else {
        return;
    };

    for (language, formats) in map {
        let Some(formats) = formats.as_array() else {
            continue;
        };

        // Prefer the json3 format; fall back to the first listed format
        let format = formats
            .iter()
            .find(|f| f["ext"].as_str() == Some("json3"))
            .or_else(|| formats.first());

        if let Some(url) = format.and_then(|f| f["url"].as_str()) {
            out.push(Track {
                language: language.clone(),
                kind,
                url: url.to_string(),
            });
        }
    }
}

#[derive(Deserialize)]
struct Json3Body {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Deserialize)]
struct Json3Event {
    #[serde(rename = "tStartMs", default)]
    t_start_ms: f64,
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Parse a json3 caption payload into timed lines.
fn parse_json3(body: &str) -> Result<Vec<TranscriptLine>> {
    let parsed: Json3Body = serde_json::from_str(body)
        .map_err(|e| OppsumError::Transcript(format!("Failed to parse caption payload: {}", e)))?;

    let lines = parsed
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            let text = text.trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(TranscriptLine {
                start: event.t_start_ms / 1000.0,
                text,
            })
        })
        .collect();

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_track_list() {
        let info = serde_json::json!({
            "subtitles": {
                "en": [
                    { "ext": "vtt", "url": "https://example.com/en.vtt" },
                    { "ext": "json3", "url": "https://example.com/en.json3" }
                ]
            },
            "automatic_captions": {
                "en": [
                    { "ext": "json3", "url": "https://example.com/auto-en.json3" }
                ],
                "de": [
                    { "ext": "json3", "url": "https://example.com/auto-de.json3" }
                ]
            }
        });

        let tracks = parse_track_list(&info);
        let languages = vec!["en".to_string()];

        let manual = tracks.find_manual(&languages).unwrap();
        assert_eq!(manual.url, "https://example.com/en.json3");

        let generated = tracks.find_generated(&languages).unwrap();
        assert_eq!(generated.url, "https://example.com/auto-en.json3");
    }

    #[test]
    fn test_parse_track_list_empty() {
        let info = serde_json::json!({ "subtitles": {}, "automatic_captions": {} });
        assert!(parse_track_list(&info).is_empty());

        let info = serde_json::json!({});
        assert!(parse_track_list(&info).is_empty());
    }

    #[test]
    fn test_parse_json3() {
        let body = r#"{
            "events": [
                { "tStartMs": 0, "segs": [{ "utf8": "Hello " }, { "utf8": "world" }] },
                { "tStartMs": 1500, "segs": [{ "utf8": "\n" }] },
                { "tStartMs": 3000, "segs": [{ "utf8": "Goodbye" }] }
            ]
        }"#;

        let lines = parse_json3(body).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Hello world");
        assert_eq!(lines[0].start, 0.0);
        assert_eq!(lines[1].text, "Goodbye");
        assert_eq!(lines[1].start, 3.0);
    }

    #[test]
    fn test_parse_json3_invalid() {
        assert!(parse_json3("not json").is_err());
    }
}
