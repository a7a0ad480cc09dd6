// Prompt builders for interview question and answer generation.
// Inputs are embedded verbatim; no escaping or truncation happens here.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Substituted for the job description section when none was provided.
pub const NO_JOB_DESCRIPTION: &str = "No job description provided.";

/// Builds the question-set prompt.
///
/// The category sizes are guidance for the model only; the response is not
/// checked against them.
pub fn build_question_prompt(resume_text: &str, job_description: Option<&str>) -> String {
    let job_section = match job_description.filter(|jd| !jd.trim().is_empty()) {
        Some(jd) => format!("JOB DESCRIPTION:\n---\n{jd}\n---"),
        None => NO_JOB_DESCRIPTION.to_string(),
    };

    format!(
        r#"You are an expert technical interviewer and career coach. Generate interview questions that help a candidate prepare for internship and early-career interviews, based on the resume and job description below. Aim for at least 25 questions in total.

RESUME:
---
{resume_text}
---

{job_section}

GUIDELINES:
- Relevance: prefer questions tied to skills, technologies and experience that appear in BOTH the resume and the job description. Without a job description, focus on the resume.
- Depth and breadth: cover fundamentals through practical application.
- Realism: phrase questions the way real interviewers for technical roles do.
- Progression: mix screening-level and deep-dive questions.
- Clarity: every question must be unambiguous.

CATEGORIES:
1. "technical" (8-10 questions): languages, frameworks and tools from the resume; data structures and algorithms applied to the candidate's work; database concepts; intern-scale system design; debugging approach.
2. "project_specific" (6-8 questions): specific projects on the resume: challenges overcome, personal contribution, collaboration, testing, what they would do differently.
3. "behavioral" (6-8 questions): situations answerable with the STAR method: learning quickly, team conflict, unclear requirements, mistakes and lessons. If a job description is present, tie some questions to the skills it asks for.
4. "scenario_based" (4-6 questions): hypothetical tasks and incidents: first steps on a new feature, diagnosing a slow application, responding to a broken deployment.

OUTPUT FORMAT:
{JSON_ONLY_INSTRUCTION}
The object must have exactly these four keys, each mapping to an array of question strings:
{{
  "technical": ["..."],
  "behavioral": ["..."],
  "project_specific": ["..."],
  "scenario_based": ["..."]
}}"#
    )
}

/// Builds the model-answer prompt for a single interview question.
pub fn build_answer_prompt(question: &str) -> String {
    format!(
        r#"You are an expert interviewer, career coach and industry professional.
A candidate has been asked the following interview question:
---
Question: "{question}"
---

Write a model answer the candidate could adapt:
- Open with a direct answer in one or two sentences.
- For behavioral or situational questions, structure the answer with the STAR method (Situation, Task, Action, Result).
- For technical questions, explain the concept precisely, then give a short concrete example.
- Finish with the two or three key points an interviewer listens for in a strong answer.

Keep it concise and practical. Respond in plain text."#
    )
}
