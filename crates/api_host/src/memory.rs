//! In-memory API adapters for offline development and baseline tests.
//!
//! These adapters reproduce the list semantics of the real endpoints
//! (newest-first ordering, offset/limit paging, server-side search) over an
//! `Rc<RefCell<..>>` table, so the stores can run end-to-end without a
//! backend.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::{
    api::{ApiFuture, CookbookApi, RecipeApi},
    error::ApiError,
    models::{Cookbook, CookbookPatch, NewCookbook, Recipe, RecipeDraft, RecipePatch},
    page::{ListQuery, Page, PageInfo},
};

fn not_found(resource: &str, id: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        message: format!("{resource} {id} not found"),
    }
}

fn paginate<T: Clone>(matching: Vec<&T>, query: &ListQuery) -> Page<T> {
    let total = matching.len() as u64;
    let offset = query.offset as usize;
    let items: Vec<T> = matching
        .into_iter()
        .skip(offset)
        .take(query.limit as usize)
        .cloned()
        .collect();
    let has_more = (offset + query.limit as usize) < total as usize;
    Page {
        items,
        pagination: PageInfo { total, has_more },
    }
}

/// In-memory recipe backend keyed by id, newest first.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecipeApi {
    rows: Rc<RefCell<Vec<Recipe>>>,
    next_id: Rc<Cell<u64>>,
}

impl MemoryRecipeApi {
    /// Creates a backend seeded with `rows` (already in newest-first order).
    pub fn seeded(rows: Vec<Recipe>) -> Self {
        Self {
            rows: Rc::new(RefCell::new(rows)),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    fn matches(recipe: &Recipe, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        recipe.title.to_lowercase().contains(&needle)
            || recipe.description.to_lowercase().contains(&needle)
            || recipe
                .cuisine_tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(&needle))
    }

    fn fresh_id(&self) -> String {
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        format!("recipe-{n}")
    }
}

impl RecipeApi for MemoryRecipeApi {
    fn list<'a>(&'a self, query: &'a ListQuery) -> ApiFuture<'a, Result<Page<Recipe>, ApiError>> {
        Box::pin(async move {
            let rows = self.rows.borrow();
            let matching: Vec<&Recipe> = match query.search.as_deref() {
                Some(term) if !term.is_empty() => {
                    rows.iter().filter(|r| Self::matches(r, term)).collect()
                }
                _ => rows.iter().collect(),
            };
            Ok(paginate(matching, query))
        })
    }

    fn create<'a>(&'a self, draft: &'a RecipeDraft) -> ApiFuture<'a, Result<Recipe, ApiError>> {
        Box::pin(async move {
            let recipe = Recipe {
                id: self.fresh_id(),
                title: draft.title.clone(),
                description: draft.description.clone(),
                prep_time: draft.prep_time.clone(),
                cook_time: draft.cook_time.clone(),
                servings: draft.servings,
                difficulty: draft.difficulty.clone(),
                ingredients: draft.ingredients.clone(),
                instructions: draft.instructions.clone(),
                image_url: draft.image_url.clone(),
                cuisine_tags: draft.cuisine_tags.clone(),
                tips: draft.tips.clone(),
                created_at: String::new(),
            };
            self.rows.borrow_mut().insert(0, recipe.clone());
            Ok(recipe)
        })
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        patch: &'a RecipePatch,
    ) -> ApiFuture<'a, Result<Recipe, ApiError>> {
        Box::pin(async move {
            let mut rows = self.rows.borrow_mut();
            let Some(recipe) = rows.iter_mut().find(|r| r.id == id) else {
                return Err(not_found("recipe", id));
            };
            recipe.title = patch.title.clone();
            if let Some(description) = &patch.description {
                recipe.description = description.clone();
            }
            if let Some(prep_time) = &patch.prep_time {
                recipe.prep_time = prep_time.clone();
            }
            if let Some(cook_time) = &patch.cook_time {
                recipe.cook_time = cook_time.clone();
            }
            if let Some(servings) = patch.servings {
                recipe.servings = servings;
            }
            if let Some(difficulty) = &patch.difficulty {
                recipe.difficulty = difficulty.clone();
            }
            if let Some(ingredients) = &patch.ingredients {
                recipe.ingredients = ingredients.clone();
            }
            if let Some(instructions) = &patch.instructions {
                recipe.instructions = instructions.clone();
            }
            if let Some(image_url) = &patch.image_url {
                recipe.image_url = Some(image_url.clone());
            }
            if let Some(cuisine_tags) = &patch.cuisine_tags {
                recipe.cuisine_tags = cuisine_tags.clone();
            }
            if let Some(tips) = &patch.tips {
                recipe.tips = Some(tips.clone());
            }
            Ok(recipe.clone())
        })
    }

    fn delete<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let mut rows = self.rows.borrow_mut();
            let before = rows.len();
            rows.retain(|r| r.id != id);
            if rows.len() == before {
                return Err(not_found("recipe", id));
            }
            Ok(())
        })
    }
}

/// In-memory cookbook backend keyed by id, newest first.
#[derive(Debug, Clone, Default)]
pub struct MemoryCookbookApi {
    rows: Rc<RefCell<Vec<Cookbook>>>,
    next_id: Rc<Cell<u64>>,
}

impl MemoryCookbookApi {
    /// Creates a backend seeded with `rows` (already in newest-first order).
    pub fn seeded(rows: Vec<Cookbook>) -> Self {
        Self {
            rows: Rc::new(RefCell::new(rows)),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    fn fresh_id(&self) -> String {
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        format!("cookbook-{n}")
    }
}

impl CookbookApi for MemoryCookbookApi {
    fn list<'a>(&'a self, query: &'a ListQuery) -> ApiFuture<'a, Result<Page<Cookbook>, ApiError>> {
        Box::pin(async move {
            let rows = self.rows.borrow();
            Ok(paginate(rows.iter().collect(), query))
        })
    }

    fn create<'a>(&'a self, draft: &'a NewCookbook) -> ApiFuture<'a, Result<Cookbook, ApiError>> {
        Box::pin(async move {
            let cookbook = Cookbook {
                id: self.fresh_id(),
                title: draft.title.clone(),
                description: draft.description.clone(),
                author: draft
                    .author
                    .clone()
                    .unwrap_or_else(|| "Anonymous Chef".to_string()),
                cover_color: draft
                    .cover_color
                    .clone()
                    .unwrap_or_else(|| "#8B4513".to_string()),
                cover_photo_url: draft.cover_photo_url.clone(),
                cover_style: draft
                    .cover_style
                    .clone()
                    .unwrap_or_else(|| "classic".to_string()),
                created_at: String::new(),
                recipe_count: Some(0),
            };
            self.rows.borrow_mut().insert(0, cookbook.clone());
            Ok(cookbook)
        })
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        patch: &'a CookbookPatch,
    ) -> ApiFuture<'a, Result<Cookbook, ApiError>> {
        Box::pin(async move {
            let mut rows = self.rows.borrow_mut();
            let Some(cookbook) = rows.iter_mut().find(|c| c.id == id) else {
                return Err(not_found("cookbook", id));
            };
            cookbook.title = patch.title.clone();
            if let Some(description) = &patch.description {
                cookbook.description = Some(description.clone());
            }
            if let Some(author) = &patch.author {
                cookbook.author = author.clone();
            }
            if let Some(cover_color) = &patch.cover_color {
                cookbook.cover_color = cover_color.clone();
            }
            if let Some(cover_photo_url) = &patch.cover_photo_url {
                cookbook.cover_photo_url = Some(cover_photo_url.clone());
            }
            if let Some(cover_style) = &patch.cover_style {
                cookbook.cover_style = cover_style.clone();
            }
            Ok(cookbook.clone())
        })
    }

    fn delete<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let mut rows = self.rows.borrow_mut();
            let before = rows.len();
            rows.retain(|c| c.id != id);
            if rows.len() == before {
                return Err(not_found("cookbook", id));
            }
            Ok(())
        })
    }
}
