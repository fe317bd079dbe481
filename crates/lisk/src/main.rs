use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use lisk_core::Value;
use lisk_eval::Interpreter;

#[derive(Parser)]
#[command(name = "lisk", about = "lisk: a small Scheme-like language")]
struct Cli {
    /// Script to run; its result is printed and the process exits
    file: Option<String>,

    /// Arguments exposed to the script as the `args` list
    #[arg(trailing_var_arg = true)]
    args: Vec<String>,

    /// Evaluate an expression and exit
    #[arg(short, long)]
    eval: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    let interpreter = Interpreter::new();

    if let Some(expr) = &cli.eval {
        eval_and_print(&interpreter, expr);
        return;
    }

    if let Some(file) = &cli.file {
        run_script(&interpreter, file, &cli.args);
        return;
    }

    repl(interpreter);
}

fn eval_and_print(interpreter: &Interpreter, input: &str) {
    match interpreter.eval_str(input) {
        Ok(val) => println!("{val}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Seed `args` with the trailing command-line words, then drive the whole
/// script through the evaluator's own `load` form.
fn run_script(interpreter: &Interpreter, file: &str, script_args: &[String]) {
    let args: Vec<Value> = script_args.iter().map(|a| Value::string(a)).collect();
    interpreter.define("args", Value::list(args));
    let program = Value::list(vec![Value::symbol("load"), Value::string(file)]);
    match interpreter.eval(&program) {
        Ok(val) => println!("{val}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn repl(interpreter: Interpreter) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("failed to start line editor: {e}");
            std::process::exit(1);
        }
    };
    let history_path = dirs_path().join("history.txt");
    let _ = rl.load_history(&history_path);

    let mut buffer = String::new();
    let mut in_multiline = false;

    loop {
        let prompt = if in_multiline { "  ... " } else { "lisk> " };
        match rl.readline(prompt) {
            Ok(line) => {
                if !in_multiline && line.trim() == "quit" {
                    break;
                }

                if in_multiline {
                    buffer.push('\n');
                    buffer.push_str(&line);
                } else {
                    buffer = line;
                }

                if !is_balanced(&buffer) {
                    in_multiline = true;
                    continue;
                }

                in_multiline = false;
                let input = buffer.trim().to_string();
                buffer.clear();

                if input.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&input);
                // Errors abort the expression, not the session.
                match interpreter.eval_str(&input) {
                    Ok(val) => println!("{val}"),
                    Err(e) => eprintln!("{e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                if in_multiline {
                    buffer.clear();
                    in_multiline = false;
                    println!("^C");
                    continue;
                }
                break;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{e}");
                break;
            }
        }
    }

    let _ = std::fs::create_dir_all(dirs_path());
    let _ = rl.save_history(&history_path);
}

fn is_balanced(input: &str) -> bool {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape = false;
    for ch in input.chars() {
        if escape {
            escape = false;
            continue;
        }
        if ch == '\\' && in_string {
            escape = true;
            continue;
        }
        if ch == '"' {
            in_string = !in_string;
            continue;
        }
        if in_string {
            continue;
        }
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
    }
    depth <= 0 && !in_string
}

fn dirs_path() -> std::path::PathBuf {
    std::env::var("HOME")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
        .join(".lisk")
}
