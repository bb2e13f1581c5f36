use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use secrecy::ExposeSecret;

use crate::{
    config::Config,
    constants::prompts::{difficulty_guidance, explanation_style_guidance, SYSTEM_PROMPT},
    errors::{AppError, AppResult},
    models::{domain::Question, dto::request::GenerateTestRequest},
    services::distribution::TypeDistribution,
};

/// Calls the hosted chat-completion API (DeepSeek by default, any
/// OpenAI-compatible endpoint via `AI_BASE_URL`) and parses its JSON response
/// into validated question records.
pub struct GeneratorService {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl GeneratorService {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.ai_api_key.expose_secret())
            .with_api_base(&config.ai_base_url);

        Self {
            client: Client::with_config(openai_config),
            model: config.ai_model.clone(),
            max_tokens: config.ai_max_tokens,
            temperature: config.ai_temperature,
        }
    }

    pub async fn generate_questions(
        &self,
        request: &GenerateTestRequest,
        distribution: &TypeDistribution,
    ) -> AppResult<Vec<Question>> {
        let prompt = build_generation_prompt(request, distribution);

        log::info!(
            "Generating {} questions with model {} for course: {}",
            request.num_questions,
            self.model,
            request.working_title
        );

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_PROMPT)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self.client.chat().create(chat_request).await?;

        if let Some(usage) = &response.usage {
            log::debug!("AI response received, tokens used: {}", usage.total_tokens);
        }

        let response_text = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or_else(|| {
                AppError::GenerationError("AI provider returned an empty response".to_string())
            })?;

        let questions = parse_questions(response_text)?;
        validate_questions(&questions)?;

        log::info!("Successfully validated {} questions", questions.len());
        Ok(questions)
    }
}

pub fn build_generation_prompt(
    request: &GenerateTestRequest,
    distribution: &TypeDistribution,
) -> String {
    let objectives = request
        .learning_objectives
        .iter()
        .map(|obj| format!("- {}", obj))
        .collect::<Vec<_>>()
        .join("\n");

    let scenario_requirement = if request
        .question_formats
        .iter()
        .any(|f| f == "scenario-based")
    {
        "at least 2 scenario-based questions"
    } else {
        "practical application questions"
    };

    format!(
        r#"{system}

COURSE DETAILS:
- Course Title: {working_title}
- Practice Test: {test_title}
- Category: {category}
- Target Audience: {audience}
- Prerequisites: {requirements}
- Difficulty Level: {difficulty}

LEARNING OBJECTIVES:
{objectives}

TASK:
Generate exactly {count} practice test questions for "{test_title}".
All questions should be specifically focused on the topics and concepts covered in this particular practice test section.

DIFFICULTY GUIDANCE:
{difficulty_guidance}

EXPLANATION STYLE:
{style_guidance}

QUESTION TYPE DISTRIBUTION:
{distribution}

REQUIREMENTS:
1. Each question MUST directly relate to one or more of the learning objectives
2. Ensure good variety across all learning objectives
3. Questions should be clear, unambiguous, and professionally written
4. For multiple_choice: provide exactly 4 answer options with ONE correct answer
5. For multiple_select: provide 4-6 options with 2-3 correct answers
6. For true_false: provide a clear statement with explanation for both true/false cases
7. Avoid trick questions or overly obvious answers
8. Include {scenario_requirement}
9. Wrong answers should be plausible but clearly incorrect
10. Explanations should help learners understand WHY the answer is correct

OUTPUT FORMAT:
Return a JSON array of question objects with this EXACT structure for Udemy CSV format:
[
  {{
    "question": "The full question text",
    "question_type": "multiple-choice|multi-select",
    "answers": [
      {{"text": "Answer option 1", "explanation": "Why this is correct/incorrect", "is_correct": false}},
      {{"text": "Answer option 2", "explanation": "Why this is correct/incorrect", "is_correct": true}}
    ],
    "overall_explanation": "Overall explanation of the correct answer(s)",
    "domain": "{category}"
  }}
]

IMPORTANT NOTES:
- For multiple-choice: exactly 4-6 answer options, ONLY ONE with is_correct=true
- For multi-select: 4-6 answer options, 2-3 with is_correct=true
- For true/false: convert to multiple-choice with 2 options (TRUE and FALSE)
- Each answer option MUST have its own explanation (why it's correct or incorrect)
- overall_explanation should explain the correct answer(s) comprehensively
- Use "multiple-choice" not "multiple_choice", use "multi-select" not "multiple_select"

CRITICAL: Return ONLY the JSON array, no other text or markdown formatting."#,
        system = SYSTEM_PROMPT,
        working_title = request.working_title,
        test_title = request.practice_test_title,
        category = request.category,
        audience = request.target_audience,
        requirements = request.requirements,
        difficulty = request.difficulty_level,
        objectives = objectives,
        count = request.num_questions,
        difficulty_guidance = difficulty_guidance(&request.difficulty_level),
        style_guidance = explanation_style_guidance(&request.explanation_style),
        distribution = distribution.to_prompt_json(),
        scenario_requirement = scenario_requirement,
    )
}

/// Strips markdown code fences the model sometimes wraps around the JSON
/// array, then deserializes it.
fn parse_questions(response_text: &str) -> AppResult<Vec<Question>> {
    let trimmed = response_text.trim();
    let without_fences = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(|rest| rest.trim_end_matches("```"))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str(without_fences)
        .map_err(|e| AppError::GenerationError(format!("Failed to parse AI response: {}", e)))
}

/// Fail-fast shape validation at the generation boundary. The CSV encoder is
/// a total function over the question model and performs no checks of its own,
/// so malformed records must be rejected here.
fn validate_questions(questions: &[Question]) -> AppResult<()> {
    for (index, question) in questions.iter().enumerate() {
        if question.question.trim().is_empty() {
            return Err(AppError::GenerationError(format!(
                "Question {} has empty question text",
                index + 1
            )));
        }
        if question.answers.len() < 2 || question.answers.len() > 6 {
            return Err(AppError::GenerationError(format!(
                "Question {} has {} answer options, expected 2 to 6",
                index + 1,
                question.answers.len()
            )));
        }
        if !question.answers.iter().any(|a| a.is_correct) {
            return Err(AppError::GenerationError(format!(
                "Question {} has no correct answer marked",
                index + 1
            )));
        }
    }
    Ok(())
}
