// Command-line interface for memo-clip
//
// This binary exposes the clipping pipeline outside a browser: converting HTML fragments to markup,
// capturing a selection made on a saved page, running the full clip flow with its plain-text
// fallback, and serving capture requests as a native messaging host.
//
// The core capabilities use the memo-clip crate; this crate only reads files, parses arguments and
// prints results.
//
// Usage:
//  memo-clip convert <input|->  [--detect]                         - HTML fragment to markup
//  memo-clip capture <page> (--start N --end M | --find T | --all)  - Capture result as JSON
//  memo-clip clip <page> --url U --title T (selection args)         - Clipped note as JSON
//  memo-clip host                                                   - Native messaging loop on stdin/stdout
//  memo-clip --list-rules                                           - Print the tag rule table
//
// Extra Parameters:
//
// Configuration keys can be overridden with --extra-<parameter-name> [value].
// The CLI layer strips the "extra-" prefix and applies the value over the loaded configuration.
// Example:
//  memo-clip convert note.html --extra-list-numbering sequential --extra-escape-text

use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command, ValueHint};
use memo_clip::convert::rule_table;
use memo_clip::detect::explain;
use memo_clip::dom::parse::parse_fragment;
use memo_clip::relay::{host, ClipRequest, ClipSettings, Clipper, LocalChannel, SelectionSpec};
use memo_clip::{
    capture, normalize, ConvertOptions, Converter, ListNumbering, Page, PageSelection,
    SelectionSnapshot, SelectionSource, TextOffsets,
};
use memo_config::{ClipConfig, Loader};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            // A following arg that is not a flag is this key's value
            let has_value = if i + 1 < args.len() {
                !args[i + 1].starts_with('-')
            } else {
                false
            };

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn selection_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("start")
                .long("start")
                .value_name("N")
                .help("First selected char, counted in the page body's text")
                .value_parser(clap::value_parser!(usize))
                .requires("end"),
        )
        .arg(
            Arg::new("end")
                .long("end")
                .value_name("M")
                .help("One past the last selected char")
                .value_parser(clap::value_parser!(usize))
                .requires("start"),
        )
        .arg(
            Arg::new("find")
                .long("find")
                .value_name("TEXT")
                .help("Select the first occurrence of TEXT"),
        )
        .arg(
            Arg::new("all")
                .long("all")
                .help("Select the whole body")
                .action(ArgAction::SetTrue),
        )
        .group(
            ArgGroup::new("selection")
                .args(["start", "find", "all"])
                .required(true),
        )
}

fn build_cli() -> Command {
    Command::new("memo-clip")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Clip web page selections to notes, keeping their formatting")
        .long_about(
            "memo-clip turns HTML selections into lightweight markup notes.\n\n\
            Commands:\n  \
            - convert: HTML fragment to markup\n  \
            - capture: capture a selection made on a saved page\n  \
            - clip:    run the full clip flow with its plain-text fallback\n  \
            - host:    serve capture requests as a native messaging host\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override configuration keys.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            memo-clip convert snippet.html                        # Markup to stdout\n  \
            memo-clip capture page.html --find 'some words'       # Capture result JSON\n  \
            memo-clip convert - --extra-list-numbering sequential # Read stdin, number lists",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .help("Path to a memo-clip.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more to stderr (-v debug, -vv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an HTML fragment to markup")
                .arg(
                    Arg::new("input")
                        .help("Input file path, or '-' for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("detect")
                        .long("detect")
                        .help("Print JSON with the formatting verdict alongside the markup")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(selection_args(
            Command::new("capture")
                .about("Capture a selection made on an HTML page")
                .arg(
                    Arg::new("page")
                        .help("Path to the HTML page")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        ))
        .subcommand(selection_args(
            Command::new("clip")
                .about("Clip a selection into a note, falling back to plain text")
                .arg(
                    Arg::new("page")
                        .help("Path to the HTML page")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("url")
                        .long("url")
                        .help("URL the page was loaded from")
                        .required(true)
                        .value_hint(ValueHint::Url),
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .help("Page title (defaults to the page's <title>)"),
                )
                .arg(
                    Arg::new("selection-text")
                        .long("selection-text")
                        .value_name("TEXT")
                        .help("Plain selection text used for the fallback (defaults to the selection's text)"),
                ),
        ))
        .subcommand(
            Command::new("host")
                .about("Serve capture requests as a native messaging host on stdin/stdout"),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);
    let matches = build_cli().get_matches_from(&cleaned_args);

    if matches.get_flag("list-rules") {
        handle_list_rules_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    init_logging(&config, matches.get_count("verbose"));

    for key in extra_params.keys() {
        warn!("ignoring unknown option --extra-{key}");
    }

    let options = ConvertOptions::from(&config.convert);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_convert_command(input, sub_matches.get_flag("detect"), &options);
        }
        Some(("capture", sub_matches)) => {
            let page = sub_matches
                .get_one::<String>("page")
                .expect("page is required");
            handle_capture_command(page, &selection_spec(sub_matches), &options);
        }
        Some(("clip", sub_matches)) => {
            let page = sub_matches
                .get_one::<String>("page")
                .expect("page is required");
            let url = sub_matches
                .get_one::<String>("url")
                .expect("url is required");
            let clip_args = ClipArgs {
                page,
                url,
                title: sub_matches.get_one::<String>("title").map(|s| s.as_str()),
                selection_text: sub_matches
                    .get_one::<String>("selection-text")
                    .map(|s| s.as_str()),
            };
            let settings = ClipSettings::from(&config.capture);
            handle_clip_command(&clip_args, &selection_spec(sub_matches), settings, &options);
        }
        Some(("host", _)) => {
            handle_host_command(&options);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the convert command
fn handle_convert_command(input: &str, detect: bool, options: &ConvertOptions) {
    let source = read_input(input);
    let fragment = parse_fragment(&source);
    let markup = normalize(&Converter::new(options.clone()).convert(&fragment));

    if !detect {
        println!("{markup}");
        return;
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Verdict<'a> {
        has_formatting: bool,
        evidence: Option<memo_clip::detect::Evidence>,
        markup: &'a str,
    }

    let evidence = explain(&SelectionSnapshot::from_fragment(fragment));
    print_json(&Verdict {
        has_formatting: evidence.is_some(),
        evidence,
        markup: &markup,
    });
}

/// Handle the capture command
fn handle_capture_command(path: &str, spec: &SelectionSpec, options: &ConvertOptions) {
    let page = read_page(path);
    let selection = spec.resolve(&page).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let result = capture(&PageSelection::new(&page, &selection), options);
    print_json(&result);
}

struct ClipArgs<'a> {
    page: &'a str,
    url: &'a str,
    title: Option<&'a str>,
    selection_text: Option<&'a str>,
}

/// Handle the clip command
fn handle_clip_command(
    args: &ClipArgs,
    spec: &SelectionSpec,
    settings: ClipSettings,
    options: &ConvertOptions,
) {
    let page = read_page(args.page);
    let selection = spec.resolve(&page).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let selection_text = match args.selection_text {
        Some(text) => text.to_string(),
        None => PageSelection::new(&page, &selection)
            .snapshot(0)
            .map(|snapshot| snapshot.plain_text)
            .unwrap_or_default(),
    };
    let request = ClipRequest {
        url: args.url.to_string(),
        title: args
            .title
            .or(page.title())
            .unwrap_or_default()
            .to_string(),
        selection_text,
    };
    debug!(url = %request.url, "clipping");

    let channel = LocalChannel::new(page, selection).with_options(options.clone());
    let note = Clipper::new(channel, settings).clip(&request);
    print_json(&note);
}

/// Handle the host command
fn handle_host_command(options: &ConvertOptions) {
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = host::serve(&mut stdin.lock(), &mut stdout.lock(), options) {
        eprintln!("Native host error: {e}");
        std::process::exit(1);
    }
}

/// Handle the list-rules command
fn handle_list_rules_command() {
    println!("Tag rules:\n");
    for (tag, rule) in rule_table() {
        println!("  {tag:<12}{rule}");
    }
    println!("\nAny other tag passes its content through.");
}

fn selection_spec(matches: &ArgMatches) -> SelectionSpec {
    if matches.get_flag("all") {
        return SelectionSpec::All { all: true };
    }
    if let Some(find) = matches.get_one::<String>("find") {
        return SelectionSpec::Find { find: find.clone() };
    }
    match (
        matches.get_one::<usize>("start"),
        matches.get_one::<usize>("end"),
    ) {
        (Some(start), Some(end)) => SelectionSpec::Offsets(TextOffsets::new(*start, *end)),
        _ => {
            eprintln!("Error: a selection needs --start and --end, --find or --all");
            std::process::exit(1);
        }
    }
}

fn read_input(input: &str) -> String {
    if input == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {e}");
                std::process::exit(1);
            });
        return source;
    }
    fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    })
}

fn read_page(path: &str) -> Page {
    let source = read_input(path);
    Page::parse(&source).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        }
    }
}

/// Log to stderr; stdout carries results and, in host mode, protocol frames
fn init_logging(config: &ClipConfig, verbosity: u8) {
    let level = match verbosity {
        0 => config.log.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();
}

fn load_cli_config(explicit_path: Option<&str>) -> ClipConfig {
    let loader = Loader::new().with_optional_file("memo-clip.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut ClipConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["list-numbering", "numbering"]) {
        config.convert.list_numbering = match raw.to_lowercase().as_str() {
            "literal" => ListNumbering::Literal,
            "sequential" => ListNumbering::Sequential,
            other => {
                eprintln!("Invalid list numbering '{other}' (expected literal or sequential)");
                std::process::exit(1);
            }
        };
    }
    if let Some(raw) = take_override(extra_params, &["escape-text", "escape"]) {
        config.convert.escape_text = parse_bool_arg("escape-text", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["extended-styles"]) {
        config.convert.extended_styles = parse_bool_arg("extended-styles", &raw);
    }

    if let Some(raw) = take_override(extra_params, &["preserve-formatting"]) {
        config.capture.preserve_formatting = parse_bool_arg("preserve-formatting", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["plain"]) {
        if parse_bool_arg("plain", &raw) {
            config.capture.preserve_formatting = false;
        }
    }
    if let Some(raw) = take_override(extra_params, &["timeout-ms", "response-timeout-ms"]) {
        config.capture.response_timeout_ms = raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid timeout '{raw}' for --extra-timeout-ms");
            std::process::exit(1);
        });
    }

    if let Some(level) = take_override(extra_params, &["log-level"]) {
        config.log.level = level;
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
