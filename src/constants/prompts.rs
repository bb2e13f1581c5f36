pub const SYSTEM_PROMPT: &str = "You are an expert educational content creator specializing in creating high-quality Udemy practice test questions.";

/// AI prompt guidance for the requested explanation style. Unknown styles
/// fall back to beginner-friendly.
pub fn explanation_style_guidance(style: &str) -> &'static str {
    match style {
        "technical" => {
            "Use precise technical terminology and assume familiarity with domain concepts."
        }
        "very-detailed" => {
            "Provide comprehensive, in-depth explanations with multiple examples and edge cases."
        }
        "short-concise" => {
            "Keep explanations brief and to-the-point, 1-2 sentences maximum."
        }
        "fun-casual" => {
            "Use a conversational, friendly tone with occasional humor and relatable analogies."
        }
        "academic" => {
            "Use formal academic language with proper citations of best practices and industry standards."
        }
        _ => {
            "Use simple language, avoid jargon, and explain concepts step-by-step as if teaching a complete beginner."
        }
    }
}

/// AI prompt guidance for the requested difficulty level. Unknown levels fall
/// back to beginner.
pub fn difficulty_guidance(level: &str) -> &'static str {
    match level {
        "intermediate" => {
            "Create questions for learners with basic knowledge. Include questions about practical application, common use cases, and some problem-solving."
        }
        "advanced" => {
            "Create challenging questions for experienced learners. Include complex scenarios, edge cases, troubleshooting, and optimization topics."
        }
        "mixed" => {
            "Create a balanced mix of beginner (30%), intermediate (50%), and advanced (20%) questions to test learners at all levels."
        }
        _ => {
            "Create questions suitable for complete beginners. Focus on fundamental concepts, basic terminology, and simple application scenarios."
        }
    }
}
