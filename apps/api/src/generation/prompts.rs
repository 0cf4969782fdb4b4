// All LLM prompt constants for the Generation module.

/// System prompt for roadmap generation — enforces JSON-only output.
pub const ROADMAP_SYSTEM: &str =
    "You are an expert strategist and mentor who designs structured, \
    actionable, personalized learning roadmaps. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Roadmap generation prompt template.
/// Replace `{goal}` and `{current_skills}` before sending.
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"A user wants to achieve a goal. Generate a personalized, step-by-step roadmap that takes their current skills and background into account.

Return a JSON object with this EXACT schema (no extra fields):
{
  "roadmap": [
    {
      "title": "Master the Fundamentals",
      "duration": "2 Weeks",
      "description": "Build a solid base before moving on to harder material.",
      "icon": "BookOpen",
      "subTasks": [
        {"title": "Work through an introductory course end to end"}
      ],
      "focusTechniques": [
        "Timebox research on new topics to 1 hour"
      ],
      "resources": [
        {"title": "Official documentation", "url": "https://example.com/docs"}
      ]
    }
  ]
}

Rules for the roadmap:

- Produce 3 to 5 distinct steps, ordered from foundational to advanced, tailored to what the user already knows. Skip material their current skills already cover.
- "title": clear and concise.
- "duration": a realistic estimate such as "2 Weeks" or "1 Month".
- "description": one short, encouraging sentence about the step.
- "icon": EXACTLY one of "BookOpen", "Target", "ListTodo", "BrainCircuit", "Layers", "Palette", "PenTool", "Milestone", "Flag", "ClipboardCheck", "TrendingUp", "Rocket".
- "subTasks": 4 to 6 specific, concrete actions the user can check off.
- "focusTechniques": 2 to 3 productivity or learning techniques tailored to the step, e.g. "Timebox research on new topics to 1 hour".
- "resources": 2 to 3 real, high-quality, publicly available resources with valid URLs.

USER GOAL:
{goal}

CURRENT SKILLS AND BACKGROUND:
{current_skills}"#;

/// System prompt for step advice — enforces JSON-only output.
pub const ADVICE_SYSTEM: &str =
    "You are an expert mentor who gives personalized, encouraging advice \
    to people working through a learning roadmap. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Step advice prompt template.
/// Replace `{roadmap_step}`, `{user_skills}` and `{goal}` before sending.
pub const ADVICE_PROMPT_TEMPLATE: &str = r#"A user is working on one step of their learning roadmap and wants personalized advice for it.

Return a JSON object with this EXACT schema (no extra fields):
{
  "advice": "One succinct paragraph of personalized advice.",
  "focusTechniques": [
    "Practice retrieval instead of rereading"
  ]
}

Rules for the advice:

- "advice": a single succinct paragraph tailored to the user's skills and ultimate goal. Cover the psychological side of the step as well as the technical side, and weave encouragement in naturally rather than bolting it on.
- "focusTechniques": 2 to 3 short, practical techniques for staying focused on this specific step.

CURRENT ROADMAP STEP:
{roadmap_step}

USER SKILLS:
{user_skills}

ULTIMATE GOAL:
{goal}"#;
