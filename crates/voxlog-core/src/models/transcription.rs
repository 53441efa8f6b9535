use serde::Deserialize;

/// Result of one upload: the backend's transcription and analysis, returned
/// verbatim.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionOutcome {
    /// Full transcript text.
    #[serde(default)]
    pub transcription: String,
    /// Free-form analysis written by the backend's language model.
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub record_id: Option<i64>,
}

/// One past transcription record from `/transcribe/history`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(default)]
    pub original_file_name: String,
    /// Backend timestamp, kept verbatim and parsed only for display.
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub transcription_preview: Option<String>,
    #[serde(default)]
    pub analysis_preview: Option<String>,
    /// Source audio length in minutes, when the backend reports it.
    #[serde(default)]
    pub duration: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upload_outcome() {
        let json = r#"{
            "transcription": "The quarterly results show strong growth.",
            "analysis": "Sentiment: positive\nSummary: Growth across segments.",
            "recordId": 101
        }"#;
        let outcome: TranscriptionOutcome = serde_json::from_str(json).unwrap();
        assert_eq!(
            outcome.transcription,
            "The quarterly results show strong growth."
        );
        assert_eq!(outcome.record_id, Some(101));
    }

    #[test]
    fn parses_history_records() {
        let json = r#"[
            {"id": 101, "originalFileName": "Q1_Earnings_Call.mp3",
             "createdDate": "2024-10-25T10:00:00",
             "transcriptionPreview": "The quarterly results show strong growth...",
             "analysisPreview": "Positive sentiment score 92%", "duration": 32},
            {"id": 102, "originalFileName": "Client_Meeting_Notes.wav",
             "createdDate": "2024-10-24T15:30:00Z"}
        ]"#;
        let entries: Vec<HistoryEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].duration, Some(32));
        assert_eq!(entries[1].original_file_name, "Client_Meeting_Notes.wav");
        assert_eq!(entries[1].transcription_preview, None);
        assert_eq!(entries[1].duration, None);
    }
}
