mod card_pane;
mod cli;
mod runtime;
mod ui;

use std::fs::File;

use chordmaster_audio::SynthHandle;
use chordmaster_core::{app_config_dir, Catalog, CatalogError, Config, FlashcardShell};
use chordmaster_types::{NotePlayer, SilentPlayer};

use runtime::AppRuntime;
use ui::{keybindings, RatatuiBackend, StatusLevel};

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = app_config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("chordmaster.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path)
        .or_else(|_| File::create(std::env::temp_dir().join("chordmaster.log")))
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("chordmaster: logging disabled, cannot create log file: {e}");
            return;
        }
    };

    if let Err(e) = WriteLogger::init(log_level, simplelog::Config::default(), log_file) {
        eprintln!("chordmaster: logging disabled: {e}");
        return;
    }

    log::info!("chordmaster starting (log level: {:?})", log_level);
}

fn load_catalog(path: Option<&std::path::Path>) -> Result<Catalog, CatalogError> {
    match path {
        Some(path) => {
            log::info!("loading catalog {}", path.display());
            Catalog::load(path)
        }
        None => Catalog::embedded(),
    }
}

/// The synth, or a silent stand-in plus a warning if there is no audio.
fn open_player(muted: bool, volume: f32) -> (Box<dyn NotePlayer>, &'static str, Option<String>) {
    if muted {
        return (Box::new(SilentPlayer), "muted", None);
    }
    match SynthHandle::new(volume) {
        Ok(synth) => (Box::new(synth), "audio", None),
        Err(e) => {
            log::warn!("{}; continuing without sound", e);
            (
                Box::new(SilentPlayer),
                "no audio",
                Some(format!("{e}; continuing without sound")),
            )
        }
    }
}

fn main() -> std::io::Result<()> {
    let args = match cli::parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("chordmaster: {e}\n\n{}", cli::USAGE);
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    init_logging(args.verbose);
    let config = Config::load();

    let catalog = match load_catalog(args.catalog_path(&config)) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("chordmaster: {e}");
            std::process::exit(1);
        }
    };

    if args.list {
        for entry in catalog.entries() {
            println!("{:<8} {}", entry.chord.name, entry.chord.keys.join(" "));
        }
        return Ok(());
    }

    let shell = FlashcardShell::new(catalog, args.shell_options(&config));
    let (player, audio_label, warning) = open_player(args.muted(&config), config.volume());
    let keymap = keybindings::load_keybindings();

    let mut runtime = AppRuntime::new(shell, player, keymap, audio_label);
    match warning {
        Some(warning) => runtime.status(warning, StatusLevel::Warning),
        None if audio_label == "muted" => runtime.status("audio muted", StatusLevel::Info),
        None => {}
    }

    let mut backend = RatatuiBackend::new()?;
    backend.start()?;

    let result = runtime.run(&mut backend);

    backend.stop()?;
    // Dropping the runtime joins the audio thread.
    drop(runtime);
    result
}
