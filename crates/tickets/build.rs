// Man pages and shell completions, written under $OUT_DIR for packaging.

use std::fs;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::Shell;

// Pulls in only clap types, so it builds without the rest of the crate.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let Some(out_dir) = std::env::var_os("OUT_DIR") else {
        panic!("OUT_DIR is set by cargo for build scripts");
    };
    let out_dir = Path::new(&out_dir);

    let man_dir = out_dir.join("man");
    let completion_dir = out_dir.join("completions");
    for dir in [&man_dir, &completion_dir] {
        fs::create_dir_all(dir)
            .unwrap_or_else(|e| panic!("cannot create {}: {e}", dir.display()));
    }

    let root = cli::Cli::command();
    write_man_pages(&root, &man_dir);

    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        let mut cmd = root.clone();
        clap_complete::generate_to(shell, &mut cmd, "tickets", &completion_dir)
            .unwrap_or_else(|e| panic!("cannot write {shell} completions: {e}"));
    }
}

/// One page per visible command, `tickets-config-set.1` style for nesting.
fn write_man_pages(root: &clap::Command, dir: &Path) {
    let mut pending = vec![root.clone()];

    while let Some(cmd) = pending.pop() {
        let name = cmd.get_name().to_owned();
        for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
            pending.push(sub.clone().name(format!("{name}-{}", sub.get_name())));
        }

        let mut page = Vec::new();
        clap_mangen::Man::new(cmd)
            .render(&mut page)
            .unwrap_or_else(|e| panic!("cannot render man page {name}: {e}"));

        let path = dir.join(format!("{name}.1"));
        fs::write(&path, page).unwrap_or_else(|e| panic!("cannot write {}: {e}", path.display()));
    }
}
