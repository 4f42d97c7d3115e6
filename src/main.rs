//! Monkey CLI and REPL
//!
//! Usage:
//!   monkey run <file.monkey>   - Execute a Monkey file
//!   monkey repl                - Start interactive REPL
//!   monkey help                - Show help message

use std::env;
use std::fs;
use std::process;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use monkey::{Environment, ParseErrors, Value, VERSION};

const MONKEY_FACE: &str = r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        run_repl();
        return;
    }

    match args[1].as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("{}: missing file argument", "error".red());
                eprintln!("Usage: monkey run <file.monkey>");
                process::exit(1);
            }
            run_file(&args[2]);
        }
        "repl" => run_repl(),
        "help" | "--help" | "-h" => print_help(),
        "version" | "--version" | "-v" => println!("Monkey {}", VERSION),
        _ => {
            if args[1].ends_with(".monkey") {
                run_file(&args[1]);
            } else {
                eprintln!("{}: unknown command '{}'", "error".red(), args[1]);
                print_help();
                process::exit(1);
            }
        }
    }
}

fn print_help() {
    println!("{}", "Monkey".cyan().bold());
    println!("A tree-walking interpreter for the Monkey language");
    println!("{} {}\n", "Version".cyan(), VERSION);
    println!("{}", "USAGE:".yellow());
    println!("  monkey run <file.monkey>   Execute a Monkey file");
    println!("  monkey repl                Start interactive REPL");
    println!("  monkey help                Show this help message");
    println!("  monkey version             Show version\n");
    println!("{}", "LANGUAGE FEATURES:".yellow());
    println!("  let x = 10;                         Binding");
    println!("  let add = fn(a, b) {{ a + b }};       Function literal");
    println!("  if (x > 5) {{ 1 }} else {{ 2 }}          Conditional expression");
    println!("  [1, 2, 3][0]                        Arrays");
    println!("  {{\"key\": \"value\"}}[\"key\"]            Hashes");
    println!("  len, first, last, rest, push, puts  Builtins");
}

fn print_parse_errors(errors: &ParseErrors) {
    eprint!("{}", MONKEY_FACE.yellow());
    eprintln!("{}", "Whoops! We ran into some monkey business here!".red());
    eprintln!("{}", "parser errors:".red());
    for err in &errors.0 {
        eprintln!("\t{}", err.to_string().red());
    }
}

fn print_value(value: &Value) {
    match value {
        Value::Null => {}
        Value::Error(_) => eprintln!("{}", value.to_string().red()),
        _ => println!("{} {}", "=>".dimmed(), value.to_string().cyan()),
    }
}

fn run_file(path: &str) {
    let source = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("{}: cannot read file '{}': {}", "error".red(), path, e);
            process::exit(1);
        }
    };

    let env = Environment::new();
    match monkey::run(&source, &env) {
        Ok(value) => {
            print_value(&value);
            if value.is_error() {
                process::exit(1);
            }
        }
        Err(errors) => {
            print_parse_errors(&errors.with_source(&source));
            process::exit(1);
        }
    }
}

fn run_repl() {
    println!("{} {} - {}",
        "Monkey".cyan().bold(),
        VERSION.cyan(),
        "Feel free to type in commands".dimmed()
    );
    println!("Type {} to exit, {} for help\n",
        "exit".yellow(),
        "help".yellow()
    );

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("{}: cannot start REPL: {}", "error".red(), err);
            process::exit(1);
        }
    };

    // Bindings persist across REPL lines
    let mut env = Environment::new();

    loop {
        match rl.readline(&format!("{} ", ">>".green().bold())) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match line {
                    "exit" | "quit" => {
                        println!("{}", "Goodbye!".cyan());
                        break;
                    }
                    "help" => {
                        print_repl_help();
                        continue;
                    }
                    "clear" => {
                        env = Environment::new();
                        println!("{}", "Bindings cleared.".dimmed());
                        continue;
                    }
                    _ => {}
                }

                match monkey::run(line, &env) {
                    Ok(value) => print_value(&value),
                    Err(errors) => print_parse_errors(&errors.with_source(line)),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".cyan());
                break;
            }
            Err(err) => {
                eprintln!("{}: {:?}", "error".red(), err);
                break;
            }
        }
    }
}

fn print_repl_help() {
    println!("{}", "REPL Commands:".yellow());
    println!("  exit, quit   Exit the REPL");
    println!("  clear        Drop all bindings");
    println!("  help         Show this help\n");
    println!("{}", "Language Examples:".yellow());
    println!("  let x = 10;");
    println!("  let double = fn(n) {{ n * 2 }};");
    println!("  double(x)");
    println!("  let h = {{\"one\": 1}}; h[\"one\"]");
}
