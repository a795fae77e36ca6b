//! Scripted API doubles and fixtures shared by the store tests.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use api_host::{
    ApiError, ApiFuture, Cookbook, CookbookApi, CookbookPatch, ListQuery, NewCookbook, Page,
    PageInfo, Recipe, RecipeApi, RecipeDraft, RecipePatch,
};
use futures::channel::oneshot;

/// One scripted response: either resolved immediately or parked on a channel
/// the test completes later, to observe mid-flight state.
pub(crate) enum Scripted<T> {
    Ready(Result<T, ApiError>),
    Wait(oneshot::Receiver<Result<T, ApiError>>),
}

type Script<T> = Rc<RefCell<VecDeque<Scripted<T>>>>;

fn respond<T: 'static>(
    script: &Script<T>,
    op: &'static str,
) -> ApiFuture<'static, Result<T, ApiError>> {
    let next = script.borrow_mut().pop_front();
    Box::pin(async move {
        match next {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Wait(rx)) => rx.await.unwrap_or_else(|_| {
                Err(ApiError::Transport("scripted response dropped".to_string()))
            }),
            None => Err(ApiError::Transport(format!("unexpected {op} request"))),
        }
    })
}

pub(crate) fn status(code: u16, message: &str) -> ApiError {
    ApiError::Status {
        status: code,
        message: message.to_string(),
    }
}

pub(crate) fn recipe(id: &str) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: format!("Recipe {id}"),
        ..Recipe::default()
    }
}

pub(crate) fn cookbook(id: &str) -> Cookbook {
    Cookbook {
        id: id.to_string(),
        title: format!("Cookbook {id}"),
        ..Cookbook::default()
    }
}

pub(crate) fn recipe_page(ids: &[&str], has_more: bool, total: u64) -> Page<Recipe> {
    Page {
        items: ids.iter().map(|id| recipe(id)).collect(),
        pagination: PageInfo { total, has_more },
    }
}

pub(crate) fn cookbook_page(ids: &[&str], has_more: bool, total: u64) -> Page<Cookbook> {
    Page {
        items: ids.iter().map(|id| cookbook(id)).collect(),
        pagination: PageInfo { total, has_more },
    }
}

/// Recipe API double driven by per-operation response scripts.
#[derive(Default)]
pub(crate) struct ScriptedRecipeApi {
    pub(crate) list_calls: Rc<RefCell<Vec<ListQuery>>>,
    pub(crate) delete_calls: Rc<RefCell<Vec<String>>>,
    list_script: Script<Page<Recipe>>,
    create_script: Script<Recipe>,
    update_script: Script<Recipe>,
    delete_script: Script<()>,
}

impl ScriptedRecipeApi {
    pub(crate) fn expect_list(&self, result: Result<Page<Recipe>, ApiError>) {
        self.list_script.borrow_mut().push_back(Scripted::Ready(result));
    }

    pub(crate) fn expect_list_pending(&self) -> oneshot::Sender<Result<Page<Recipe>, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.list_script.borrow_mut().push_back(Scripted::Wait(rx));
        tx
    }

    pub(crate) fn expect_create(&self, result: Result<Recipe, ApiError>) {
        self.create_script
            .borrow_mut()
            .push_back(Scripted::Ready(result));
    }

    pub(crate) fn expect_update(&self, result: Result<Recipe, ApiError>) {
        self.update_script
            .borrow_mut()
            .push_back(Scripted::Ready(result));
    }

    pub(crate) fn expect_delete(&self, result: Result<(), ApiError>) {
        self.delete_script
            .borrow_mut()
            .push_back(Scripted::Ready(result));
    }

    pub(crate) fn expect_delete_pending(&self) -> oneshot::Sender<Result<(), ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.delete_script.borrow_mut().push_back(Scripted::Wait(rx));
        tx
    }

    pub(crate) fn list_call_count(&self) -> usize {
        self.list_calls.borrow().len()
    }
}

impl RecipeApi for ScriptedRecipeApi {
    fn list<'a>(&'a self, query: &'a ListQuery) -> ApiFuture<'a, Result<Page<Recipe>, ApiError>> {
        self.list_calls.borrow_mut().push(query.clone());
        respond(&self.list_script, "list")
    }

    fn create<'a>(&'a self, _draft: &'a RecipeDraft) -> ApiFuture<'a, Result<Recipe, ApiError>> {
        respond(&self.create_script, "create")
    }

    fn update<'a>(
        &'a self,
        _id: &'a str,
        _patch: &'a RecipePatch,
    ) -> ApiFuture<'a, Result<Recipe, ApiError>> {
        respond(&self.update_script, "update")
    }

    fn delete<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Result<(), ApiError>> {
        self.delete_calls.borrow_mut().push(id.to_string());
        respond(&self.delete_script, "delete")
    }
}

/// Cookbook API double driven by per-operation response scripts.
#[derive(Default)]
pub(crate) struct ScriptedCookbookApi {
    pub(crate) list_calls: Rc<RefCell<Vec<ListQuery>>>,
    pub(crate) delete_calls: Rc<RefCell<Vec<String>>>,
    list_script: Script<Page<Cookbook>>,
    create_script: Script<Cookbook>,
    update_script: Script<Cookbook>,
    delete_script: Script<()>,
}

impl ScriptedCookbookApi {
    pub(crate) fn expect_list(&self, result: Result<Page<Cookbook>, ApiError>) {
        self.list_script.borrow_mut().push_back(Scripted::Ready(result));
    }

    pub(crate) fn expect_create(&self, result: Result<Cookbook, ApiError>) {
        self.create_script
            .borrow_mut()
            .push_back(Scripted::Ready(result));
    }

    pub(crate) fn expect_update(&self, result: Result<Cookbook, ApiError>) {
        self.update_script
            .borrow_mut()
            .push_back(Scripted::Ready(result));
    }

    pub(crate) fn expect_delete(&self, result: Result<(), ApiError>) {
        self.delete_script
            .borrow_mut()
            .push_back(Scripted::Ready(result));
    }

    pub(crate) fn list_call_count(&self) -> usize {
        self.list_calls.borrow().len()
    }
}

impl CookbookApi for ScriptedCookbookApi {
    fn list<'a>(&'a self, query: &'a ListQuery) -> ApiFuture<'a, Result<Page<Cookbook>, ApiError>> {
        self.list_calls.borrow_mut().push(query.clone());
        respond(&self.list_script, "list")
    }

    fn create<'a>(&'a self, _draft: &'a NewCookbook) -> ApiFuture<'a, Result<Cookbook, ApiError>> {
        respond(&self.create_script, "create")
    }

    fn update<'a>(
        &'a self,
        _id: &'a str,
        _patch: &'a CookbookPatch,
    ) -> ApiFuture<'a, Result<Cookbook, ApiError>> {
        respond(&self.update_script, "update")
    }

    fn delete<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Result<(), ApiError>> {
        self.delete_calls.borrow_mut().push(id.to_string());
        respond(&self.delete_script, "delete")
    }
}
