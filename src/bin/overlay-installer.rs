use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use jetson_overlay::adapter::{self, Command};
use jetson_overlay::Registry;

fn usage(registry: &Registry) -> String {
    format!(
        "Usage:\n  overlay-installer list\n  overlay-installer <board> get-options\n  overlay-installer <board> install [--request <path.json|path.toml>]\n\nboards: {}",
        registry.names().join(", ")
    )
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let registry = Registry::builtin();

    match args.as_slice() {
        [list] if list == "list" => {
            for name in registry.names() {
                println!("{name}");
            }
            Ok(())
        }
        [board, command] => run(&registry, board, command, None),
        [board, command, flag, path] if flag == "--request" => {
            run(&registry, board, command, Some(Path::new(path)))
        }
        _ => bail!(usage(&registry)),
    }
}

fn run(registry: &Registry, board: &str, command: &str, request: Option<&Path>) -> Result<()> {
    let overlay = registry
        .get(board)
        .with_context(|| usage(registry))?;
    let command = Command::parse(command)?;

    eprintln!("[overlay:{board}] {command}");
    match (command, request) {
        (Command::Install, Some(path)) => {
            let request = adapter::load_request(path)?;
            adapter::run_install(overlay, &request, io::stdout().lock())?;
        }
        (Command::GetOptions, Some(_)) => {
            bail!("--request is only accepted by 'install'")
        }
        (_, None) => adapter::execute(overlay, command, io::stdin().lock(), io::stdout().lock())?,
    }
    eprintln!("[overlay:{board}] {command} done");
    Ok(())
}
