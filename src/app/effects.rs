use std::io::{Write, stdout};
use std::sync::mpsc::Sender;
use std::thread;

use base64::Engine;

use crate::app::{Message, Model, ToastLevel};
use crate::code::{self, CodeBlock};

pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message, tx: &Sender<Message>) {
    match msg {
        Message::ExecuteCode => {
            if let Some(block) = model.visible_code_block() {
                spawn_code_run(block, tx.clone());
            }
        }
        Message::YankCode => yank_code(model),
        Message::CodeResult(Err(err)) => {
            tracing::warn!(%err, "code block failed");
        }
        _ => {}
    }
}

/// Run `block` on its own thread and post the outcome back into the loop.
fn spawn_code_run(block: CodeBlock, tx: Sender<Message>) {
    thread::spawn(move || {
        let result = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| format!("starting runtime: {err}"))
            .and_then(|runtime| {
                runtime
                    .block_on(code::execute(&block))
                    .map_err(|err| err.to_string())
            });
        // The loop may already be gone
        let _ = tx.send(Message::CodeResult(result));
    });
}

fn yank_code(model: &mut Model) {
    let Some(block) = model.visible_code_block() else {
        return;
    };
    match copy_to_clipboard_osc52(&block.code) {
        Ok(()) => model.show_toast(ToastLevel::Info, "Copied code block"),
        Err(err) => {
            tracing::warn!(%err, "clipboard write failed");
            model.show_toast(ToastLevel::Error, format!("Copy failed: {err}"));
        }
    }
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
