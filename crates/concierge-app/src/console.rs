//! Terminal harness for the session controller.
//!
//! Drives the full chat loop (name prompt, in-band commands, relay calls,
//! transcript delivery) against the in-process relay, with a stdin/stdout
//! surface standing in for the widget. Preferences persist to a small JSON
//! file in the data directory so name and toggles survive restarts, the
//! same way the widget uses durable browser storage.

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use concierge_core::config::ConciergeConfig;
use concierge_core::error::Result;
use concierge_core::types::{Message, Sender};
use concierge_session::relay::{MessageRelay, TranscriptSink};
use concierge_session::voice::VoiceProfile;
use concierge_session::{ChatController, SessionPhase, Surface};

/// Stdin/stdout implementation of the widget surface.
pub struct ConsoleSurface {
    store_path: PathBuf,
    store: HashMap<String, String>,
    printed: usize,
}

impl ConsoleSurface {
    pub fn new(store_path: PathBuf) -> Self {
        let store = std::fs::read_to_string(&store_path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Self {
            store_path,
            store,
            printed: 0,
        }
    }

    fn save_store(&self) {
        if let Ok(content) = serde_json::to_string_pretty(&self.store) {
            if let Err(e) = std::fs::write(&self.store_path, content) {
                tracing::warn!(error = %e, "Failed to save console preferences");
            }
        }
    }
}

impl Surface for ConsoleSurface {
    fn render(&mut self, messages: &[Message]) {
        // A shrinking snapshot means the view was reset.
        if messages.len() < self.printed {
            println!("----");
            self.printed = 0;
        }
        for message in &messages[self.printed..] {
            match message.sender {
                Sender::User => println!("{}: {}", message.name, message.text),
                Sender::Bot => println!("[bot] {}", message.text),
            }
        }
        self.printed = messages.len();
    }

    fn prompt_name(&mut self, prompt: &str, placeholder: &str, prefill: &str) {
        println!("{}", prompt);
        if prefill.is_empty() {
            println!("({})", placeholder);
        } else {
            println!("(current: {})", prefill);
        }
    }

    fn alert(&mut self, text: &str) {
        println!("! {}", text);
    }

    fn confirm(&mut self, question: &str) -> bool {
        print!("{} [y/N] ", question);
        let _ = std::io::stdout().flush();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        answer.trim().eq_ignore_ascii_case("y")
    }

    fn set_input_enabled(&mut self, _enabled: bool) {
        // The read loop already serializes input.
    }

    fn set_send_label(&mut self, _label: &str) {}

    fn set_live_agent_indicator(&mut self, active: bool) {
        tracing::debug!(active, "Live agent indicator");
    }

    fn set_minimized(&mut self, minimized: bool) {
        tracing::debug!(minimized, "Minimized presentation");
    }

    fn voices(&self) -> Vec<VoiceProfile> {
        Vec::new()
    }

    fn speak(&mut self, _voice: Option<&str>, text: &str) {
        tracing::debug!(chars = text.len(), "Speech requested (no synthesizer on console)");
    }

    fn cancel_speech(&mut self) {}

    fn persist(&mut self, key: &str, value: &str) {
        self.store.insert(key.to_string(), value.to_string());
        self.save_store();
    }

    fn read_persisted(&self, key: &str) -> Option<String> {
        self.store.get(key).cloned()
    }
}

/// Run the interactive chat loop until the session ends or stdin closes.
pub async fn run_chat(
    config: ConciergeConfig,
    relay: Arc<dyn MessageRelay>,
    transcripts: Arc<dyn TranscriptSink>,
    data_dir: &Path,
) -> Result<()> {
    let surface = ConsoleSurface::new(data_dir.join("console_prefs.json"));
    let mut controller = ChatController::new(
        surface,
        relay,
        transcripts,
        config.widget.clone(),
        config.templates.clone(),
    );

    println!("=== {} ===", config.widget.header_text);
    println!("Commands: /name <new name>, /rename, /agent, /speech, /min, /end, /quit");
    controller.bootstrap();

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        if controller.session().phase == SessionPhase::Ended {
            break;
        }
        print!("> ");
        std::io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim().to_string();
        if input.is_empty() {
            continue;
        }

        let phase = controller.session().phase;
        match phase {
            SessionPhase::AwaitingName => {
                // Rejection already produced an alert; just re-read.
                let _ = controller.submit_name(&input);
            }
            SessionPhase::Active => match input.as_str() {
                "/quit" => break,
                "/end" => controller.end_chat().await,
                "/agent" => controller.toggle_live_agent(),
                "/speech" => controller.toggle_speech(),
                "/min" => controller.toggle_minimize(),
                "/rename" => controller.begin_name_change(),
                _ => controller.submit_message(&input).await,
            },
            SessionPhase::Ended => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_surface_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console_prefs.json");

        let mut surface = ConsoleSurface::new(path.clone());
        surface.persist("concierge_display_name", "Ann");

        let reloaded = ConsoleSurface::new(path);
        assert_eq!(
            reloaded.read_persisted("concierge_display_name").as_deref(),
            Some("Ann")
        );
    }

    #[test]
    fn test_console_surface_missing_store_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let surface = ConsoleSurface::new(dir.path().join("console_prefs.json"));
        assert!(surface.read_persisted("anything").is_none());
    }

    #[test]
    fn test_console_surface_corrupt_store_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console_prefs.json");
        std::fs::write(&path, "not json").unwrap();
        let surface = ConsoleSurface::new(path);
        assert!(surface.read_persisted("anything").is_none());
    }

    #[test]
    fn test_render_tracks_printed_count_and_resets() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = ConsoleSurface::new(dir.path().join("console_prefs.json"));

        let first = vec![Message::user("Ann", "Hello"), Message::bot("Hi")];
        surface.render(&first);
        assert_eq!(surface.printed, 2);

        // Cleared view: printed count resets with the snapshot.
        let reset = vec![Message::bot("Chat ended. Thank you!")];
        surface.render(&reset);
        assert_eq!(surface.printed, 1);
    }
}
