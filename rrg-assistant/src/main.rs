use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rrg_utils::session::{AktionsartSession, LogicalStructureSession};
use rrg_utils::diagnostics;
use rrg_utils::{Aktionsart, Language, parse_dynamicity};

mod console;
mod dispatch;
mod flows;

use console::Console;

#[derive(Parser, Debug)]
#[command(version, about = "Identifies the aktionsart of a clause and builds its RRG logical structure", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Language of the questionnaire (es, en)
    #[arg(short, long, global = true, value_parser = parse_language)]
    language: Option<Language>,

    /// Pause between diagnostic tests, in milliseconds
    #[arg(long, global = true, default_value_t = 500)]
    pause_ms: u64,

    /// Do not clear the console between sections
    #[arg(long, global = true)]
    no_clear: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Identify the aktionsart of a clause
    Aktionsart,
    /// Build the logical structure of a clause
    LogicalStructure {
        /// Category label, e.g. "logro causativo"
        aktionsart: Option<String>,
        /// The clause being analysed
        clause: Option<String>,
        /// dinamico or no_dinamico
        dynamicity: Option<String>,
    },
}

fn parse_language(code: &str) -> Result<Language, String> {
    Language::from_iso_639_1(code).ok_or_else(|| format!("unsupported language {code:?}"))
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub language: Language,
    pub pause: Duration,
    pub clear: bool,
}

impl Settings {
    fn from_args(args: &Args) -> Self {
        Self {
            language: args.language.unwrap_or_default(),
            pause: Duration::from_millis(args.pause_ms),
            clear: !args.no_clear,
        }
    }

    /// Flags a child process needs to behave like its parent.
    pub fn forwarded_flags(&self) -> Vec<String> {
        let mut flags = vec![
            "--language".to_string(),
            self.language.iso_639_1().to_string(),
            "--pause-ms".to_string(),
            self.pause.as_millis().to_string(),
        ];
        if !self.clear {
            flags.push("--no-clear".to_string());
        }
        flags
    }

    fn with_language(&self, language: Language) -> Self {
        Self {
            language,
            ..self.clone()
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let settings = Settings::from_args(&args);
    let stdin = std::io::stdin();
    let mut console = Console::new(stdin.lock(), std::io::stdout(), settings.pause, settings.clear);

    match args.command {
        None => menu(&mut console, &settings),
        Some(Commands::Aktionsart) => aktionsart(&mut console, &settings),
        Some(Commands::LogicalStructure {
            aktionsart,
            clause,
            dynamicity,
        }) => {
            let aktionsart = aktionsart
                .as_deref()
                .map(Aktionsart::from_label)
                .transpose()
                .context("invalid aktionsart argument")?;
            let dynamic = dynamicity
                .as_deref()
                .map(parse_dynamicity)
                .transpose()
                .context("invalid dynamicity argument")?;
            let session =
                LogicalStructureSession::with_known(settings.language, aktionsart, clause, dynamic);
            logical_structure(&mut console, session)
        }
    }
}

fn menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    settings: &Settings,
) -> anyhow::Result<()> {
    loop {
        console.clear()?;
        let (title, structure, exit, question) = match settings.language {
            Language::Spanish => (
                "ASISTENTE RRG",
                "Obtener la estructura lógica de un aktionsart conocido",
                "Salir",
                "Elige una opción (1-4):",
            ),
            Language::English => (
                "RRG ASSISTANT",
                "Build the logical structure for a known aktionsart",
                "Exit",
                "Choose an option (1-4):",
            ),
        };
        console.say(format!("=== {title} ==="))?;
        console.say("1. Identificar el aktionsart (español)")?;
        console.say(format!("2. {structure}"))?;
        console.say("3. Identify the aktionsart (English)")?;
        console.say(format!("4. {exit}"))?;
        console.say(question)?;

        let Some(choice) = console.read_line()? else {
            return Ok(());
        };
        let result = match choice.trim() {
            "1" => dispatch::run_child(&dispatch::aktionsart_args(
                &settings.with_language(Language::Spanish),
            )),
            "2" => dispatch::run_child(&dispatch::logical_structure_args(settings, None)),
            "3" => dispatch::run_child(&dispatch::aktionsart_args(
                &settings.with_language(Language::English),
            )),
            "4" => return Ok(()),
            other => {
                log::debug!("rejected menu choice {other:?}");
                console.say(diagnostics::invalid_menu_option(settings.language))?;
                console.pause();
                continue;
            }
        };
        if let Err(error) = result {
            log::error!("{error:#}");
            console.say(format!("Error: {error:#}"))?;
            console.pause();
        }
    }
}

fn aktionsart<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    settings: &Settings,
) -> anyhow::Result<()> {
    loop {
        console.clear()?;
        let Some(session) = flows::run(console, AktionsartSession::new(settings.language))? else {
            return Ok(());
        };
        if let Some(handoff) = session.handoff() {
            let args = dispatch::logical_structure_args(settings, Some(&handoff));
            if let Err(error) = dispatch::run_child(&args) {
                log::error!("{error:#}");
                console.say(format!("Error: {error:#}"))?;
            }
        }
        let another = diagnostics::another_predicate(settings.language);
        match flows::ask_yes_no(console, &another, settings.language)? {
            Some(true) => continue,
            Some(false) | None => return Ok(()),
        }
    }
}

fn logical_structure<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: LogicalStructureSession,
) -> anyhow::Result<()> {
    let language = session.language;
    console.clear()?;
    let Some(session) = flows::run(console, session)? else {
        return Ok(());
    };
    if let Some(structure) = session.structure() {
        flows::announce_structure(console, &structure, language)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_over_arguments_parse() {
        let args = Args::try_parse_from([
            "rrg-assistant",
            "--language",
            "es",
            "logical-structure",
            "logro causativo",
            "Juan rompió el jarrón",
            "no_dinamico",
        ])
        .unwrap();
        assert_eq!(args.language, Some(Language::Spanish));
        assert_eq!(args.pause_ms, 500);
        match args.command {
            Some(Commands::LogicalStructure {
                aktionsart,
                clause,
                dynamicity,
            }) => {
                assert_eq!(aktionsart.as_deref(), Some("logro causativo"));
                assert_eq!(clause.as_deref(), Some("Juan rompió el jarrón"));
                assert_eq!(dynamicity.as_deref(), Some("no_dinamico"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["rrg-assistant", "aktionsart", "--language", "en", "--no-clear"])
                .unwrap();
        let settings = Settings::from_args(&args);
        assert_eq!(settings.language, Language::English);
        assert!(!settings.clear);
        assert!(Args::try_parse_from(["rrg-assistant", "--language", "fr"]).is_err());
    }

    #[test]
    fn test_menu_exits() {
        let settings = Settings {
            language: Language::Spanish,
            pause: Duration::ZERO,
            clear: false,
        };
        let mut console = Console::new(
            std::io::Cursor::new("9\n4\n".to_string()),
            Vec::new(),
            Duration::ZERO,
            false,
        );
        menu(&mut console, &settings).unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output.matches("=== ASISTENTE RRG ===").count(), 2);
        assert!(output.contains("Opción no válida. Por favor, intenta de nuevo."));
    }

    #[test]
    fn test_aktionsart_classifies_until_declined() {
        let settings = Settings {
            language: Language::Spanish,
            pause: Duration::ZERO,
            clear: false,
        };
        let script = [
            "María sabe inglés",
            "0",
            "n",
            "n",
            "s",
            "Pedro tiene un libro",
            "0",
            "n",
            "n",
            "tal vez",
            "n",
        ]
        .join("\n");
        let mut console = Console::new(
            std::io::Cursor::new(script),
            Vec::new(),
            Duration::ZERO,
            false,
        );
        aktionsart(&mut console, &settings).unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("El aktionsart del predicado de «María sabe inglés» es ESTADO."));
        assert!(output.contains("El aktionsart del predicado de «Pedro tiene un libro» es ESTADO."));
        assert_eq!(
            output
                .matches("¿Quieres identificar el aktionsart de otro predicado?")
                .count(),
            3
        );
    }
}
