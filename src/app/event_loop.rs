use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::document::Document;
use crate::render::Theme;
use crate::watcher::{DEBOUNCE, FileWatcher};

use super::{effects, input};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        let document = Document::parse(&self.source);
        let fallback_theme = Theme::resolve(None, self.theme);
        let theme = Theme::resolve(document.metadata().theme.as_deref(), Some(fallback_theme));
        tracing::info!(slides = document.slide_count(), ?theme, "starting presentation");

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - deck requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(document, theme, (size.width, size.height))
            .with_fallback_theme(fallback_theme);
        let (tx, rx) = mpsc::channel();
        if let Some(path) = &self.watch_path
            && let Err(err) = FileWatcher::spawn(path, DEBOUNCE, tx.clone())
        {
            tracing::warn!(%err, "file watching disabled");
            model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
        }

        let result = Self::event_loop(&mut terminal, &mut model, &tx, &rx);
        ratatui::restore();
        result
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        tx: &Sender<Message>,
        rx: &Receiver<Message>,
    ) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            // Watcher and code runner results
            while let Ok(msg) = rx.try_recv() {
                dispatch(model, msg, tx);
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }

            if event::poll(POLL_INTERVAL)? {
                if let Some(msg) = input::handle_event(&event::read()?, model) {
                    dispatch(model, msg, tx);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = input::handle_event(&event::read()?, model) {
                        dispatch(model, msg, tx);
                        needs_render = true;
                    }
                }
            }
        }
        Ok(())
    }
}

pub(super) fn dispatch(model: &mut Model, msg: Message, tx: &Sender<Message>) {
    let side_msg = msg.clone();
    *model = update(std::mem::take(model), msg);
    effects::handle_message_side_effects(model, &side_msg, tx);
}
