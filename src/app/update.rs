use crate::app::Model;
use crate::app::model::{CodeOutput, InputMode};
use crate::diff::find_first_modified;
use crate::document::Document;
use crate::nav::{self, Key};
use crate::search::{Direction, search, search_next, search_prev};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// A key for the slide/chunk state machine
    Navigate(Key),

    // Search
    /// Enter search input mode
    StartSearch,
    /// Append a character to the query
    SearchInput(char),
    /// Delete the last query character
    SearchBackspace,
    /// Run the typed query forward from the current slide
    SearchSubmit,
    /// Leave search mode without searching
    SearchCancel,
    /// Repeat the last search forward
    SearchNext,
    /// Repeat the last search backward
    SearchPrev,

    // Code
    /// Run the last visible code block
    ExecuteCode,
    /// Copy the last visible code block to the clipboard
    YankCode,
    /// Output (or error text) of a finished code run
    CodeResult(Result<String, String>),
    /// Hide the code output
    ClearOutput,

    // File watching
    /// The watched file has new contents
    FileChanged(String),

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Navigate(key) => {
            if model.document.is_empty() {
                return model;
            }
            let previous = model.nav.slide;
            model.nav = nav::advance(model.nav, key);
            model.nav = model.nav.settle(model.document.chunk_count(model.nav.slide));
            if model.nav.slide != previous {
                model.code_output = None;
            }
            tracing::debug!(slide = model.nav.slide, chunk = ?model.nav.chunk, "navigated");
        }

        Message::StartSearch => {
            model.mode = InputMode::Search;
            model.search_input.clear();
        }
        Message::SearchInput(ch) => model.search_input.push(ch),
        Message::SearchBackspace => {
            model.search_input.pop();
        }
        Message::SearchCancel => {
            model.mode = InputMode::Normal;
            model.search_input.clear();
        }
        Message::SearchSubmit => {
            model.mode = InputMode::Normal;
            let query = std::mem::take(&mut model.search_input);
            if !query.is_empty() {
                let result = search(
                    model.document.slides(),
                    &query,
                    model.nav.slide,
                    Direction::Forward,
                );
                jump_to_hit(&mut model, result.index(), &query);
                model.last_search = Some(query);
            }
        }
        Message::SearchNext => {
            if let Some(query) = model.last_search.clone() {
                let result = search_next(model.document.slides(), &query, model.nav.slide);
                jump_to_hit(&mut model, result.index(), &query);
            }
        }
        Message::SearchPrev => {
            if let Some(query) = model.last_search.clone() {
                let result = search_prev(model.document.slides(), &query, model.nav.slide);
                jump_to_hit(&mut model, result.index(), &query);
            }
        }

        Message::ExecuteCode => {
            if model.visible_code_block().is_some() {
                model.code_running = true;
            }
        }
        Message::CodeResult(result) => {
            model.code_running = false;
            model.code_output = Some(match result {
                Ok(text) => CodeOutput {
                    text,
                    is_error: false,
                },
                Err(err) => CodeOutput {
                    text: format!("Error: {err}"),
                    is_error: true,
                },
            });
        }
        Message::ClearOutput => model.code_output = None,
        // YankCode: handled in effects
        Message::YankCode => {}

        Message::FileChanged(contents) => {
            let document = Document::parse(&contents);
            let jump_to = find_first_modified(Some(&model.document), &document);
            tracing::info!(slides = document.slide_count(), ?jump_to, "reloaded deck");
            model.replace_document(document, jump_to);
        }

        Message::Resize(width, height) => model.size = (width, height),

        Message::Quit => model.should_quit = true,
    }
    model
}

fn jump_to_hit(model: &mut Model, hit: Option<usize>, query: &str) {
    tracing::debug!(query, ?hit, "search");
    if let Some(slide) = hit {
        model.jump_to_slide(slide);
    }
}
