use async_trait::async_trait;

use crate::api_connection::connection::ApiConnectionError;
use crate::api_connection::endpoints::{ChatCompletionRequest, ChatMessage, Provider};
use crate::meal_plan::DietCategory;
use crate::preferences::MenuPreferences;

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

const TABLE_FORMAT_INSTRUCTION: &str = "Always output a clean markdown table with columns: Day, Breakfast, Lunch, Dinner, Snacks. Include approximate calories for each meal.";

#[derive(Debug, Clone, PartialEq)]
pub struct MenuRequest {
    pub diet: DietCategory,
    pub preferences: MenuPreferences,
}

/// Anything that can turn a menu request into markdown-table text.
#[async_trait]
pub trait MenuGenerator: Send + Sync {
    async fn generate(&self, request: &MenuRequest) -> Result<String, ApiConnectionError>;
}

pub fn system_prompt(diet: DietCategory) -> String {
    let expertise = match diet {
        DietCategory::LiverCentric => "You are a nutrition expert specializing in liver-friendly Mediterranean diets for NAFLD (Non-Alcoholic Fatty Liver Disease). Focus on foods that support liver health, reduce inflammation, and promote liver detoxification.",
        DietCategory::LowSugar => "You are a nutrition expert specializing in diabetic-friendly and low-glycemic diets. Focus on blood sugar management, insulin sensitivity, and metabolic health. Emphasize foods with low glycemic index and stable blood sugar response.",
        DietCategory::Vegetarian => "You are a nutrition expert specializing in balanced vegetarian diets. Focus on plant-based protein sources, complete amino acid profiles, and nutrient density. Ensure adequate B12, iron, and omega-3 fatty acids.",
    };
    format!("{} {}", expertise, TABLE_FORMAT_INSTRUCTION)
}

pub fn diet_focus(diet: DietCategory) -> &'static str {
    match diet {
        DietCategory::LiverCentric => "Mediterranean diet principles and liver health",
        DietCategory::LowSugar => "low-glycemic foods and blood sugar management",
        DietCategory::Vegetarian => "plant-based nutrition and protein balance",
    }
}

pub fn build_prompt(request: &MenuRequest) -> String {
    let prefs = &request.preferences;
    let mut prompt = format!(
        "Create a {} {} diet menu, include {}, strictly avoid {}, focus on {}. Focus on {}.",
        prefs.duration.label(),
        request.diet.label().to_lowercase(),
        prefs.likes,
        prefs.dislikes,
        prefs.meal_focus.label(),
        diet_focus(request.diet),
    );
    if !prefs.diet_notes.trim().is_empty() {
        prompt.push_str(" Additional notes: ");
        prompt.push_str(prefs.diet_notes.trim());
    }
    prompt
}

pub struct GroqMenuGenerator {
    provider: Provider,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl GroqMenuGenerator {
    pub fn new(provider: Provider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: Some(0.7),
            max_tokens: Some(4096),
        }
    }

    pub fn chat_request(&self, request: &MenuRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt(request.diet)),
                ChatMessage::user(build_prompt(request)),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl MenuGenerator for GroqMenuGenerator {
    async fn generate(&self, request: &MenuRequest) -> Result<String, ApiConnectionError> {
        tracing::info!(diet = %request.diet, model = %self.model, "generating menu");
        let response = self
            .provider
            .call_chat_completion(self.chat_request(request))
            .await?;
        Ok(response.first_content()?.to_string())
    }
}
