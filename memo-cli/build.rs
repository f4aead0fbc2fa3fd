use clap::{Arg, ArgAction, ArgGroup, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
fn selection_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("page")
                .help("Path to the HTML page")
                .required(true)
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(Arg::new("start").long("start").value_name("N"))
        .arg(Arg::new("end").long("end").value_name("M"))
        .arg(Arg::new("find").long("find").value_name("TEXT"))
        .arg(Arg::new("all").long("all").action(ArgAction::SetTrue))
        .group(ArgGroup::new("selection").args(["start", "find", "all"]))
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("memo-clip")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Clip web page selections to notes, keeping their formatting")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-rules")
                .long("list-rules")
                .help("List the tag conversion rules")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an HTML fragment to markup")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("detect").long("detect").action(ArgAction::SetTrue)),
        )
        .subcommand(selection_args(
            Command::new("capture").about("Capture a selection made on an HTML page"),
        ))
        .subcommand(selection_args(
            Command::new("clip")
                .about("Clip a selection into a note, falling back to plain text")
                .arg(Arg::new("url").long("url").value_hint(ValueHint::Url))
                .arg(Arg::new("title").long("title"))
                .arg(Arg::new("selection-text").long("selection-text")),
        ))
        .subcommand(Command::new("host").about("Serve capture requests as a native messaging host"));

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "memo-clip", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "memo-clip", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "memo-clip", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
