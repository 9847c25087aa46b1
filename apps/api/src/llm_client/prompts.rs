// Prompt constants for the optimize flow. The system prompt carries the
// scoring rubric; the schema hint is embedded in the prompt because the
// backend has no structured-output mode we can rely on.

/// System prompt for the ATS resume-coach task.
pub const OPTIMIZE_SYSTEM: &str = r#"You are an ATS-focused resume coach.

TASK:
Compare the RESUME to the JOB DESCRIPTION and return ONLY a JSON object that matches the provided schema.

SCORING RUBRIC (0-100):
- 40 pts: Keyword & skill match (tools, frameworks, domain terms)
- 20 pts: Evidence & impact (metrics, outcomes, ownership)
- 15 pts: Role alignment (seniority, responsibilities, scope)
- 15 pts: Clarity & ATS readability (concise, skimmable, no fluff)
- 10 pts: Differentiators (leadership, collaboration, projects, certifications)

RULES:
- Be specific. Avoid generic advice unless directly supported.
- First, silently extract a list of key skills/keywords from the JOB DESCRIPTION.
- Then choose missingKeywords ONLY from that extracted list.
- missingKeywords: include 5-10 items MAX. Each must appear in the JOB DESCRIPTION and be absent/weak in the RESUME.
- rewrittenBullets: return 3-5 improved bullets, ATS-friendly, quantified when possible.
- Headline: 1 line, role + core strengths (no emojis).
- Summary: 3-5 sentences max. Mention the most relevant stack and achievements.

OUTPUT:
Return ONLY valid JSON. No markdown. No extra text."#;

/// JSON schema hint embedded in the prompt. Mirrors the shape enforced by
/// the schema validator; keep the two in sync.
pub const RESULT_SCHEMA_HINT: &str = r#"{
  "type": "object",
  "additionalProperties": false,
  "required": ["score", "missingKeywords", "headline", "summary", "rewrittenBullets"],
  "properties": {
    "score": { "type": "integer", "minimum": 0, "maximum": 100 },
    "missingKeywords": {
      "type": "array",
      "items": {
        "type": "object",
        "additionalProperties": false,
        "required": ["keyword", "whyItMatters"],
        "properties": {
          "keyword": { "type": "string" },
          "whyItMatters": { "type": "string" }
        }
      }
    },
    "headline": { "type": "string" },
    "summary": { "type": "string" },
    "rewrittenBullets": {
      "type": "array",
      "items": {
        "type": "object",
        "additionalProperties": false,
        "required": ["original", "improved"],
        "properties": {
          "original": { "type": "string" },
          "improved": { "type": "string" }
        }
      }
    }
  }
}"#;

/// Builds the user prompt from the two input documents.
pub fn build_optimize_prompt(resume: &str, job_description: &str) -> String {
    format!("RESUME:\n{resume}\n\nJOB DESCRIPTION:\n{job_description}")
}
