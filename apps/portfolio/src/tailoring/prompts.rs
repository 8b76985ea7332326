/// Resume tailoring instruction. Replace `{mime_type}` and `{job_description}`
/// before sending; the resume itself travels as inline data next to it.
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"The attached document ({mime_type}) is a candidate's current resume.

Rewrite the resume so it is tailored to the job description below.

RULES:
1. Use ONLY facts present in the attached resume. Never invent employers, titles, dates, degrees, metrics or skills.
2. Reorder and rephrase content so the most relevant experience and skills for this role come first.
3. Mirror the job description's terminology where the resume genuinely supports it; do not keyword-stuff.
4. Keep every section the original resume has (summary, experience, education, skills, awards, ...).
5. Keep bullets concise: one line each where possible, starting with a strong verb.
6. Return the complete tailored resume as plain text, ready to paste into a document.

JOB DESCRIPTION:
{job_description}"#;

pub fn build_tailor_prompt(mime_type: &str, job_description: &str) -> String {
    TAILOR_PROMPT_TEMPLATE
        .replace("{mime_type}", mime_type)
        .replace("{job_description}", job_description.trim())
}
