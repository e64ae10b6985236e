// Prompt constants for AI skill extraction.

/// Role preamble; `JSON_ONLY_SYSTEM` is appended when the request is built.
pub const SKILL_EXTRACT_SYSTEM: &str =
    "You are an expert resume analyzer. Extract skills and organize them into a structured skill tree.";

/// Extraction prompt template. Replace `{resume_text}` before sending.
pub const SKILL_EXTRACT_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and extract every skill it demonstrates.

Resume:
{resume_text}

Identify:
1. Technical skills (programming languages, frameworks, tools, databases, cloud platforms)
2. Soft skills (communication, leadership, mentoring, ...)
3. Domain expertise (machine learning, web development, fintech, ...)
4. Certifications and qualifications
5. Proficiency levels, only where the resume states or clearly implies them

Return a JSON object with this EXACT schema:
{
  "skills": {
    "technical": {
      "programming_languages": ["Python"],
      "frameworks": ["Django"],
      "tools": ["Docker"],
      "databases": ["PostgreSQL"],
      "cloud_platforms": ["AWS"]
    },
    "soft_skills": ["Mentoring"],
    "domains": ["Distributed Systems"],
    "certifications": ["AWS Certified Solutions Architect"]
  },
  "experience_levels": {
    "Python": "expert"
  }
}

Rules:
- Every skill item is either a plain string or {"name": "...", "confidence": 0.0-1.0}.
  Use the object form only when you are unsure the resume supports the skill.
- Always include all four keys under "skills"; use [] when a category has nothing.
- experience_levels values must be one of: beginner, intermediate, advanced, expert.
- Do NOT invent skills that the resume does not support."#;
