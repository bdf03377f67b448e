use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use vocab_trainer::trainer::voices::load_voices;
use vocab_trainer::trainer::{Trainer, TrainerConfig, VoiceDescriptor};
use vocab_trainer::{SessionObserver, SpeechOutput, Utterance};

/// Prints utterances instead of playing them.
struct ConsoleSpeech;

impl SpeechOutput for ConsoleSpeech {
    fn cancel(&mut self) {
        log::trace!("cancel");
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), Box<dyn std::error::Error>> {
        let voice = utterance
            .voice
            .as_ref()
            .map(VoiceDescriptor::label)
            .unwrap_or_else(|| "default voice".to_string());
        println!(
            "  (speaking {:?} in {} at {:.2}x with {voice})",
            utterance.text, utterance.language, utterance.rate
        );
        Ok(())
    }
}

struct TerminalView;

impl SessionObserver for TerminalView {
    fn word_changed(&mut self, text: &str, revealed: bool) {
        if revealed {
            println!("  >> {text}");
        } else {
            println!("  [{text}]");
        }
    }

    fn status_changed(&mut self, status: &str) {
        println!("  {status}");
    }

    fn deck_completed(&mut self, words: &[String]) {
        println!("  Vocabulary:");
        for (i, word) in words.iter().enumerate() {
            println!("    {}. {word}", i + 1);
        }
    }

    fn voices_changed(&mut self, voices: &[VoiceDescriptor], selected: Option<&str>) {
        if voices.is_empty() {
            println!("  Voices: default voice only");
            return;
        }
        println!("  Voices:");
        for voice in voices {
            let marker = if Some(voice.id()) == selected { '*' } else { ' ' };
            println!("   {marker} {} [{}]", voice.label(), voice.id());
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let words_path = PathBuf::from(args.next().unwrap_or_else(|| "data/vocabulary.txt".into()));
    let voices_path = PathBuf::from(args.next().unwrap_or_else(|| "data/voices.json".into()));
    let config = match args.next() {
        Some(path) => TrainerConfig::load(&PathBuf::from(path))?,
        None => TrainerConfig::default(),
    };

    let mut trainer = Trainer::new(Some(ConsoleSpeech), TerminalView, config);
    trainer.load_words_from(&words_path);
    match load_voices(&voices_path) {
        Ok(voices) => trainer.voices_changed(&voices),
        Err(e) => {
            log::warn!("{e}");
            trainer.voices_changed(&[VoiceDescriptor::new("Default", "fr-FR")]);
        }
    }

    println!("Commands: [n]ext, [p]revious, [r]eveal, [s]peak again, [v]oice <id>, [q]uit");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" | "n" => trainer.next(),
            "p" => trainer.previous(),
            "r" => trainer.reveal(),
            "s" => trainer.repeat(),
            "v" => {
                let id = arg.trim();
                trainer.select_voice((!id.is_empty()).then_some(id));
                let label = trainer
                    .catalog()
                    .selected()
                    .map(VoiceDescriptor::label)
                    .unwrap_or_else(|| "default voice".to_string());
                println!("  Voice: {label}");
            }
            "q" => break,
            other => println!("  Unknown command {other:?}"),
        }
    }

    Ok(())
}
