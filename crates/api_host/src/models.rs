//! Entity records and mutation payloads shared across adapters and stores.

use serde::{Deserialize, Serialize};

/// A saved recipe as returned by the recipe endpoints.
///
/// List responses omit the heavyweight columns (`ingredients`,
/// `instructions`, `tips`), so everything beyond `id` and `title` decodes
/// through a default when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Server-assigned identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short description shown on cards.
    #[serde(default)]
    pub description: String,
    /// Preparation time, free-form (for example `"15 minutes"`).
    #[serde(default)]
    pub prep_time: String,
    /// Cooking time, free-form.
    #[serde(default)]
    pub cook_time: String,
    /// Number of servings the recipe yields.
    #[serde(default)]
    pub servings: u32,
    /// Difficulty label (for example `"Easy"`, `"Medium"`).
    #[serde(default)]
    pub difficulty: String,
    /// Ingredient lines; absent in list responses.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Instruction steps; absent in list responses.
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Optional illustration URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Cuisine tags used for search and display.
    #[serde(default)]
    pub cuisine_tags: Vec<String>,
    /// Optional free-form tips.
    #[serde(default)]
    pub tips: Option<String>,
    /// Server creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: String,
}

/// A cookbook as returned by the cookbook endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookbook {
    /// Server-assigned identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Author byline printed on the cover.
    #[serde(default)]
    pub author: String,
    /// Cover background color (CSS color string).
    #[serde(default)]
    pub cover_color: String,
    /// Optional cover photo URL.
    #[serde(default)]
    pub cover_photo_url: Option<String>,
    /// Cover layout style token.
    #[serde(default)]
    pub cover_style: String,
    /// Server creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: String,
    /// Number of recipes in the cookbook; display-only, absent on some
    /// responses.
    #[serde(default)]
    pub recipe_count: Option<u32>,
}

/// Payload for `POST /api/recipes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    /// Display title.
    pub title: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Preparation time, free-form.
    #[serde(default)]
    pub prep_time: String,
    /// Cooking time, free-form.
    #[serde(default)]
    pub cook_time: String,
    /// Number of servings.
    #[serde(default)]
    pub servings: u32,
    /// Difficulty label.
    #[serde(default)]
    pub difficulty: String,
    /// Ingredient lines.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Instruction steps.
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Optional illustration URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Cuisine tags.
    #[serde(default)]
    pub cuisine_tags: Vec<String>,
    /// Optional free-form tips.
    #[serde(default)]
    pub tips: Option<String>,
}

/// Partial-entity payload for `PUT /api/recipes/<id>`.
///
/// `title` is required by the endpoint; every other field is applied only
/// when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipePatch {
    /// Replacement title (required by the endpoint).
    pub title: String,
    /// Replacement description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement preparation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    /// Replacement cooking time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    /// Replacement servings count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    /// Replacement difficulty label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Replacement ingredient lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    /// Replacement instruction steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
    /// Replacement illustration URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Replacement cuisine tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine_tags: Option<Vec<String>>,
    /// Replacement tips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
}

/// Payload for `POST /api/cookbooks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCookbook {
    /// Display title.
    pub title: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional author byline; the server fills a default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Optional cover background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_color: Option<String>,
    /// Optional cover photo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo_url: Option<String>,
    /// Optional cover layout style token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_style: Option<String>,
}

/// Partial-entity payload for `PUT /api/cookbooks/<id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookbookPatch {
    /// Replacement title (required by the endpoint).
    pub title: String,
    /// Replacement description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement author byline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Replacement cover background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_color: Option<String>,
    /// Replacement cover photo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo_url: Option<String>,
    /// Replacement cover layout style token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_style: Option<String>,
}
