use std::{env, fs, io, path::Path, process};

use ambit::{
    runtime::{Registry, run_program},
    syntax::Scanner,
};

fn main() {
    let mut args: Vec<String> = env::args().collect();
    let debug = args.iter().any(|arg| arg == "--debug");
    let json = args.iter().any(|arg| arg == "--json");
    if debug {
        args.retain(|arg| arg != "--debug");
    }
    if json {
        args.retain(|arg| arg != "--json");
    }

    if args.len() < 2 {
        print_help();
        process::exit(1);
    }

    if is_amb_file(&args[1]) {
        process::exit(run_file(&args[1], debug));
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => print_help(),
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: ambit run <file.amb> [--debug]");
                process::exit(1);
            }
            process::exit(run_file(&args[2], debug));
        }
        "directives" => {
            if args.len() < 3 {
                eprintln!("Usage: ambit directives <file.amb> [--json]");
                process::exit(1);
            }
            process::exit(show_directives(&args[2], json, debug));
        }
        other => {
            eprintln!("Unknown command: {}", other);
            process::exit(1);
        }
    }
}

fn print_help() {
    println!(
        "\
Ambit CLI

Usage:
  ambit <file.amb>
  ambit run <file.amb>
  ambit directives <file.amb> [--json]

Flags:
  --debug      Show diagnostic details with source positions
  --json       Emit the directive list as JSON (directives command)
  -h, --help   Show this help message
"
    );
}

fn is_amb_file(path: &str) -> bool {
    Path::new(path).extension().and_then(|ext| ext.to_str()) == Some("amb")
}

fn run_file(path: &str, debug: bool) -> i32 {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error reading {}: {}", path, err);
            return 1;
        }
    };

    let directives = match Scanner::new(&source).scan() {
        Ok(directives) => directives,
        Err(err) => {
            eprintln!("{}", err.diagnostic().render(debug));
            return 1;
        }
    };
    if directives.is_empty() {
        // an empty program is a failed run
        eprintln!("Error: no directives in {}", path);
        return 1;
    }

    let mut registry = Registry::new();
    for err in run_program(&directives, &mut registry) {
        eprintln!("{}", err.diagnostic().render(debug));
    }

    let stdout = io::stdout();
    let mut sink = stdout.lock();
    if let Err(err) = registry.drain(&mut sink) {
        eprintln!("Error writing output: {}", err);
        return 1;
    }
    0
}

fn show_directives(path: &str, json: bool, debug: bool) -> i32 {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error reading {}: {}", path, err);
            return 1;
        }
    };

    let directives = match Scanner::new(&source).scan() {
        Ok(directives) => directives,
        Err(err) => {
            eprintln!("{}", err.diagnostic().render(debug));
            return 1;
        }
    };

    if json {
        match serde_json::to_string_pretty(&directives) {
            Ok(rendered) => println!("{}", rendered),
            Err(err) => {
                eprintln!("Error serializing directives: {}", err);
                return 1;
            }
        }
        return 0;
    }

    println!("Directives from {}:", path);
    for (index, directive) in directives.iter().enumerate() {
        let position = directive.position();
        println!(
            "{:>3} {:>4}:{:<3} {}",
            index, position.line, position.column, directive
        );
    }
    0
}
