use std::fs;
use std::path::Path;

use clap_complete::Shell;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("man") => generate_man_page(),
        Some("completions") => generate_completions(),
        Some(other) => {
            eprintln!("unknown xtask command: {other}");
            eprintln!("available commands: man, completions");
            std::process::exit(1);
        }
        None => {
            eprintln!("usage: cargo xtask <command>");
            eprintln!("available commands: man, completions");
            std::process::exit(1);
        }
    }
}

fn generate_man_page() {
    let out_dir = Path::new("man");
    fs::create_dir_all(out_dir).expect("failed to create man/ directory");

    let cmd = agentfetch::cli::command();
    render_man_page(&cmd, "fetch-cli", out_dir);
    println!("Generated man page in {}", out_dir.display());
}

fn generate_completions() {
    let out_dir = Path::new("completions");
    fs::create_dir_all(out_dir).expect("failed to create completions/ directory");

    let mut cmd = agentfetch::cli::command();
    for shell in [
        Shell::Bash,
        Shell::Zsh,
        Shell::Fish,
        Shell::PowerShell,
        Shell::Elvish,
    ] {
        render_completions(shell, &mut cmd, out_dir);
    }
    println!("Generated completions in {}", out_dir.display());
}

fn render_man_page(cmd: &clap::Command, name: &str, out_dir: &Path) {
    let path = out_dir.join(format!("{name}.1"));
    let man = clap_mangen::Man::new(cmd.clone());
    let mut buf = Vec::new();
    man.render(&mut buf)
        .unwrap_or_else(|e| panic!("failed to render man page for {name}: {e}"));
    fs::write(&path, buf).unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    println!("  {}", path.display());
}

fn render_completions(shell: Shell, cmd: &mut clap::Command, out_dir: &Path) {
    let path = clap_complete::generate_to(shell, cmd, "fetch-cli", out_dir)
        .unwrap_or_else(|e| panic!("failed to generate {shell} completions: {e}"));
    println!("  {}", path.display());
}
