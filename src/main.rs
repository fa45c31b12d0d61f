//! dmx - dmenu-driven selection tools

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use dmx::app::config::{ClipArgs, FilesArgs, MenuArgs, TodoArgs};
use dmx::app::{init_tracing, ClipAction, Cli, Command, ConfigFile, MenuAction};
use dmx::core::Dmenu;
use dmx::integrate::{
    choose_path, clip, exit_code, menu, todo, write_value, ClipStore, MenuOptions, OutputTarget,
    OutputTemplate, SystemClipboard, TodoList,
};
use dmx::tree::MenuDocument;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too
            let code = if e.use_stderr() {
                exit_code::ERROR
            } else {
                exit_code::SUCCESS
            };
            e.print().ok();
            return ExitCode::from(code as u8);
        }
    };

    init_tracing(cli.verbose);
    let config = ConfigFile::load(&cli.config);

    match run(cli.command, &config) {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code::ERROR as u8)
        }
    }
}

fn run(command: Command, config: &ConfigFile) -> anyhow::Result<()> {
    let picker = Dmenu::new(config.picker.clone());
    match command {
        Command::Menu(args) => run_menu(&args, config, &picker),
        Command::Files(args) => run_files(&args, &picker),
        Command::Clip(args) => run_clip(&args, config, &picker),
        Command::Todo(args) => run_todo(&args, config, &picker),
    }
}

fn run_menu(args: &MenuArgs, config: &ConfigFile, picker: &Dmenu) -> anyhow::Result<()> {
    let action = args.action();
    let new_item = match action {
        MenuAction::Add => Some(args.new_item()?),
        _ => None,
    };

    let mut doc = MenuDocument::load(&args.data_file)
        .with_context(|| format!("Failed to load menu {}", args.data_file.display()))?;
    let options = MenuOptions {
        prompt: args.prompt.clone(),
        separator: args
            .separator
            .clone()
            .unwrap_or_else(|| config.menu.separator.clone()),
        hidden_marker: config.menu.hidden_marker,
        show_hidden: args.hidden,
    };

    match (action, new_item) {
        (MenuAction::Add, Some(item)) => {
            menu::add(&mut doc, picker, &options, item)?;
        }
        (MenuAction::Expunge, _) => {
            menu::expunge(&mut doc, picker, &options)?;
        }
        _ => {
            if let Some(entry) = menu::browse(&doc, picker, &options)? {
                write_value(&entry.value, &args.template(), &args.target())
                    .context("Failed to write output")?;
            }
        }
    }
    Ok(())
}

fn run_files(args: &FilesArgs, picker: &Dmenu) -> anyhow::Result<()> {
    if let Some(path) = choose_path(&args.dir, picker, args.options())? {
        let template = OutputTemplate::new(args.format.as_str());
        write_value(&path.to_string_lossy(), &template, &OutputTarget::Stdout)
            .context("Failed to write output")?;
    }
    Ok(())
}

fn run_clip(args: &ClipArgs, config: &ConfigFile, picker: &Dmenu) -> anyhow::Result<()> {
    let dir = args.dir.clone().unwrap_or_else(|| config.clip.dir.clone());
    let store = ClipStore::open(dir, config.clip.max_preview)?;

    match args.action() {
        ClipAction::Save => {
            let mut clipboard = SystemClipboard::new()?;
            clip::save_selection(&store, &mut clipboard)?;
        }
        ClipAction::Recall => {
            let mut clipboard = SystemClipboard::new()?;
            clip::recall(&store, picker, &mut clipboard)?;
        }
        ClipAction::Expunge => {
            clip::expunge(&store, picker)?;
        }
        ClipAction::Purge => {
            let removed = store.purge()?;
            info!(removed, "clips purged");
        }
    }
    Ok(())
}

fn run_todo(args: &TodoArgs, config: &ConfigFile, picker: &Dmenu) -> anyhow::Result<()> {
    let todo_config = &config.todo;
    let mut list = TodoList::open(&todo_config.dir)?;

    if let Some(title) = args.title() {
        todo::add(&mut list, &title, &todo_config.editor, &mut io::stdin().lock())
            .context("Failed to add item")?;
    } else if args.expunge {
        todo::expunge(&mut list, picker)?;
    } else if let Some(item) = list.choose(picker)? {
        if args.pretty {
            todo::pretty(&list, &item, todo_config)?;
        } else {
            todo::show(&list, &item, &mut io::stdout().lock())?;
        }
    }

    if args.tidy {
        let removed = list.tidy()?;
        info!(removed, "item directory tidied");
    }
    Ok(())
}
