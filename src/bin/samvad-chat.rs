//! Interactive terminal chat for the multilingual backend.
//!
//! This binary provides a REPL interface for exchanging messages with a
//! samvad backend, with optional voice input/output and persisted display
//! preferences.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage against the default local backend
//! samvad-chat
//!
//! # Point at a different backend
//! samvad-chat --endpoint https://chat.example.com/chat
//!
//! # Start in Hindi and keep the language across sessions
//! samvad-chat --lang hi --persist-language
//!
//! # Disable colors (useful for piping output)
//! samvad-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/clear` - Clear the transcript
//! - `/export [dir]` - Save the transcript as a text file
//! - `/lang <en|hi|mr>` - Change the conversation language
//! - `/speak` - Speak the last bot reply aloud
//! - `/listen` - Capture one spoken utterance and send it
//! - `/dark` - Toggle the dark theme
//! - `/quit` - Exit the application

use std::path::PathBuf;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use samvad::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, WELCOME_NOTICE, help_text, parse_command,
};
use samvad::prefs::{PreferenceStore, Preferences};
use samvad::speech::{VoiceInputBridge, VoiceOutputBridge};
use samvad::{BackendClient, Error, Language, PlainTextRenderer, Renderer, Theme};

/// Main entry point for the samvad-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("samvad-chat [OPTIONS]");
    let explicit_lang = args.lang.as_deref().and_then(|s| s.parse::<Language>().ok());
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    // Preferences load before first paint so the theme is right from the
    // very first line of output.
    let store = config
        .prefs_path
        .clone()
        .or_else(PreferenceStore::default_path)
        .map(|path| PreferenceStore::new(path).with_language_persistence(config.persist_language));
    let mut load_warning = None;
    let mut prefs = match &store {
        Some(store) => store.load().unwrap_or_else(|err| {
            load_warning = Some(format!("Could not read preferences: {err}"));
            Preferences::default()
        }),
        None => Preferences::default(),
    };
    if let Some(language) = explicit_lang {
        prefs.language = language;
    }

    let mut renderer = PlainTextRenderer::with_color(use_color);
    if prefs.dark_mode {
        renderer.set_theme(Theme::Dark);
    }
    if let Some(warning) = load_warning {
        renderer.print_info(&warning);
    }

    let client = BackendClient::new(config.endpoint.clone())?;
    let persist_language = config.persist_language;
    let export_dir = config.export_dir.clone();
    let mut session = ChatSession::new(client, config);
    session.set_language(prefs.language);

    // No speech engine ships with the CLI build; both bridges report
    // "not supported" until an embedder wires platform engines in.
    let mut voice_input = VoiceInputBridge::unavailable();
    let mut voice_output = VoiceOutputBridge::unavailable();

    println!("samvad chat (language: {})", session.language().name());
    println!("Type /help for commands, /quit to exit\n");
    session.announce(WELCOME_NOTICE, &mut renderer);

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Clear => {
                            session.clear();
                            renderer.print_info("Transcript cleared.");
                        }
                        ChatCommand::Export(dir) => {
                            let dir = dir.map(PathBuf::from).unwrap_or_else(|| export_dir.clone());
                            match session.export_to(&dir) {
                                Ok(path) => renderer.print_info(&format!(
                                    "Transcript saved to {}",
                                    path.display()
                                )),
                                Err(err) => renderer
                                    .print_error(&format!("Failed to export transcript: {err}")),
                            }
                        }
                        ChatCommand::Speak => {
                            let reply = session.last_bot_reply().map(String::from);
                            match voice_output
                                .speak_reply(reply.as_deref(), session.language())
                                .await
                            {
                                Ok(true) => {}
                                Ok(false) => renderer.print_info("Nothing to speak yet."),
                                Err(err) => print_voice_notice(&mut renderer, err),
                            }
                        }
                        ChatCommand::Listen => {
                            renderer.set_listening(true);
                            let captured = voice_input.capture(session.language()).await;
                            renderer.set_listening(false);
                            match captured {
                                Ok(spoken) => {
                                    // Recognized text goes through the same
                                    // send path as typed text.
                                    if let Err(err) = session.send(&spoken, &mut renderer).await {
                                        renderer.print_error(&err.to_string());
                                    }
                                }
                                Err(err) => print_voice_notice(&mut renderer, err),
                            }
                        }
                        ChatCommand::Lang(code) => match code.parse::<Language>() {
                            Ok(language) => {
                                session.set_language(language);
                                prefs.language = language;
                                if persist_language
                                    && let Some(store) = &store
                                    && let Err(err) = store.save(&prefs)
                                {
                                    renderer.print_error(&format!(
                                        "Failed to save preferences: {err}"
                                    ));
                                }
                                renderer.print_info(&format!(
                                    "Language set to {} ({})",
                                    language.name(),
                                    language
                                ));
                            }
                            Err(err) => renderer.print_error(&err.to_string()),
                        },
                        ChatCommand::Dark => {
                            prefs.dark_mode = !prefs.dark_mode;
                            renderer.set_theme(if prefs.dark_mode {
                                Theme::Dark
                            } else {
                                Theme::Light
                            });
                            if let Some(store) = &store
                                && let Err(err) = store.save(&prefs)
                            {
                                renderer
                                    .print_error(&format!("Failed to save preferences: {err}"));
                            }
                            renderer.print_info(if prefs.dark_mode {
                                "Dark theme on."
                            } else {
                                "Dark theme off."
                            });
                        }
                        ChatCommand::Stats => {
                            print_stats(&session);
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the backend
                if let Err(e) = session.send(line, &mut renderer).await {
                    renderer.print_error(&e.to_string());
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

/// Absent capabilities are a notice at the point of use, not an error; the
/// rest of the UI keeps working.
fn print_voice_notice(renderer: &mut PlainTextRenderer, err: Error) {
    if err.is_capability() || err.is_busy() {
        renderer.print_info(&err.to_string());
    } else {
        renderer.print_error(&err.to_string());
    }
}

fn print_stats(session: &ChatSession<BackendClient>) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!(
        "      Endpoint: {}",
        stats.endpoint.as_deref().unwrap_or("(default)")
    );
    println!(
        "      Language: {} ({})",
        stats.language.name(),
        stats.language
    );
    println!("      Messages: {}", stats.message_count);
    println!("      Exchanges: {}", stats.exchange_count);
    println!(
        "      Last reply: {}",
        if stats.has_last_reply {
            "available"
        } else {
            "(none)"
        }
    );
}
