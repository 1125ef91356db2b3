//! Prompt builders for transcription, the four analyses, and chat.
//!
//! Pure functions: deterministic text out, no network, no state. Each
//! analysis prompt embeds the literal JSON structure the model must follow;
//! those literals are kept in sync with the serde models by test.

use debrief_core::models::Meeting;

const SUMMARY_SCHEMA: &str = r#"{
  "overview": "2-3 sentence summary of what the meeting was about",
  "duration": "estimated duration if mentioned, otherwise null",
  "participants": ["names or roles of people mentioned"],
  "keyPoints": [
    {"title": "short heading", "description": "what was discussed", "importance": "high|medium|low"}
  ],
  "decisions": [
    {"decision": "what was decided", "rationale": "why", "responsible": "who carries it out"}
  ],
  "insights": ["notable observations"],
  "outcomes": ["concrete results of the meeting"],
  "nextSteps": ["agreed follow-up actions"]
}"#;

const TASKS_SCHEMA: &str = r#"{
  "tasks": [
    {
      "id": 1,
      "description": "specific actionable task",
      "assignee": "person responsible, or Unassigned",
      "deadline": "date or timeframe, or Not specified",
      "priority": "high|medium|low",
      "status": "pending",
      "context": "where in the discussion this came up",
      "dependencies": ["other tasks this depends on"]
    }
  ],
  "followUps": ["items to revisit that are not yet concrete tasks"]
}"#;

const IMPROVEMENTS_SCHEMA: &str = r#"{
  "effectivenessScore": 7,
  "rationale": "why the meeting earned this score",
  "strengths": [
    {"area": "what went well", "description": "details"}
  ],
  "improvementAreas": {
    "structure": ["suggestions about agenda and flow"],
    "communication": ["suggestions about how people communicated"],
    "participation": ["suggestions about who spoke and who did not"],
    "timeManagement": ["suggestions about pacing"],
    "decisionMaking": ["suggestions about how decisions were reached"]
  },
  "recommendations": [
    {"priority": "high|medium|low", "recommendation": "concrete change", "expectedImpact": "what it would improve"}
  ],
  "bestPractices": ["practices worth keeping"]
}"#;

const FACT_CHECK_SCHEMA: &str = r#"{
  "transcriptionQuality": {"rating": "excellent|good|fair|poor", "score": 85, "issues": ["transcription problems noticed"]},
  "potentialErrors": [
    {"text": "suspect passage", "suggestion": "likely intended text", "confidence": "high|medium|low", "category": "terminology|name|number|other"}
  ],
  "factualClaims": [
    {"claim": "verifiable statement made", "speaker": "who said it", "verificationStatus": "verified|unverified|disputed", "correction": "correction if wrong", "source": "basis for the verdict"}
  ],
  "inconsistencies": [
    {"issue": "statements that contradict each other", "location": "where in the discussion", "severity": "high|medium|low"}
  ],
  "dataPoints": [
    {"type": "number|date|metric", "value": "the figure", "context": "what it refers to", "verification": "consistent|needs-review"}
  ],
  "technicalTerms": [
    {"term": "term used", "usage": "how it was used", "correct": true, "definition": "correct meaning"}
  ],
  "recommendations": ["suggested follow-up checks"]
}"#;

/// Prompt for the initial audio-to-text call. Sent alongside the audio blob.
pub fn transcription_prompt() -> String {
    r#"You are an expert transcriber. Transcribe this meeting recording completely and accurately.

Label each distinct speaker as "Speaker 1", "Speaker 2", and so on, keeping labels consistent throughout. Include all spoken content.

Respond in English with the transcription text only, no commentary or headers."#
        .to_string()
}

/// Prompt for the structured meeting summary.
pub fn summary_prompt(transcription: &str) -> String {
    format!(
        r#"You are an expert meeting analyst. Analyze the following meeting transcription and produce a structured summary.

Meeting transcription:
{transcription}

Respond ONLY with valid JSON matching this exact structure, no markdown fences, no extra text:
{SUMMARY_SCHEMA}

All text values must be in English."#
    )
}

/// Prompt for task extraction.
///
/// The derived counters (totals, priority and assignment counts) are
/// deliberately absent from the requested structure; they are recomputed
/// from the task list after decoding.
pub fn tasks_prompt(transcription: &str) -> String {
    format!(
        r#"You are an expert at extracting action items from meetings. Analyze the following meeting transcription and identify every actionable task.

Meeting transcription:
{transcription}

Use "Unassigned" when nobody was named as responsible and "Not specified" when no deadline was given. Number tasks sequentially from 1. New tasks always have status "pending".

Respond ONLY with valid JSON matching this exact structure, no markdown fences, no extra text:
{TASKS_SCHEMA}

All text values must be in English."#
    )
}

/// Prompt for the meeting-effectiveness assessment.
pub fn improvements_prompt(transcription: &str) -> String {
    format!(
        r#"You are an expert meeting facilitator. Assess how effective the following meeting was and how it could be improved.

Meeting transcription:
{transcription}

Score effectiveness from 0 to 10. Sort every suggestion into exactly one of the five improvement areas.

Respond ONLY with valid JSON matching this exact structure, no markdown fences, no extra text:
{IMPROVEMENTS_SCHEMA}

All text values must be in English."#
    )
}

/// Prompt for the fact-check analysis.
pub fn fact_check_prompt(transcription: &str) -> String {
    format!(
        r#"You are an expert fact checker and editor. Review the following meeting transcription for transcription quality, factual claims, inconsistencies, and misused terminology.

Meeting transcription:
{transcription}

Respond ONLY with valid JSON matching this exact structure, no markdown fences, no extra text:
{FACT_CHECK_SCHEMA}

All text values must be in English."#
    )
}

/// Context preamble for chat questions about one stored meeting.
///
/// Carries the transcription, the summary overview, and the extracted tasks;
/// the remaining analyses are omitted to keep the prompt compact.
pub fn meeting_context(meeting: &Meeting) -> String {
    let tasks = if meeting.tasks.tasks.is_empty() {
        "No tasks were extracted from this meeting.".to_string()
    } else {
        meeting
            .tasks
            .tasks
            .iter()
            .map(|t| format!("- [{}] {} ({})", t.priority, t.description, t.assignee))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"You are answering questions about a specific recorded meeting.

Meeting file: {filename}
Processed: {timestamp}

Transcription:
{transcription}

Summary:
{overview}

Tasks:
{tasks}"#,
        filename = meeting.filename,
        timestamp = meeting.timestamp.format("%Y-%m-%d %H:%M UTC"),
        transcription = meeting.transcription,
        overview = meeting.summary.overview,
    )
}

/// Chat prompt: optional meeting context followed by the user question.
pub fn chat_prompt(question: &str, context: Option<&str>) -> String {
    match context {
        Some(context) => format!(
            r#"{context}

User question: {question}

Answer the question based on the meeting above. Be helpful and concise. Respond in English."#
        ),
        None => format!(
            r#"You are a helpful assistant for a meeting analysis tool.

User question: {question}

Be helpful and concise. Respond in English."#
        ),
    }
}
