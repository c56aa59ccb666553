use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;

use lilac::keymap::Keymap;
use lilac::Editor;

mod cli;

use cli::CliArgs;

fn main() -> Result<()> {
    lilac::tracing::init();

    let startup = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    let source = match &startup.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read script from stdin")?;
            buf
        }
    };
    let commands = cli::parse_script(&source)?;

    let mut editor = Editor::new(startup.editor, &startup.initial_content)
        .with_keymap(Keymap::with_bindings(startup.keymap))
        .on_error(|e| eprintln!("error: {}", e));
    editor.mount();

    for plugin in startup.plugins {
        // Already reported through on_error
        let _ = editor.install_plugin(plugin);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for command in &commands {
        cli::run_command(&mut editor, command, &mut out)?;
        editor.flush_deferred();
    }
    out.flush()?;

    editor.unmount();
    Ok(())
}
