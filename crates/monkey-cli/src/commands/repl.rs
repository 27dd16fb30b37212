//! REPL command implementation

use anyhow::Result;
use monkey_runtime::ReplCore;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = ">> ";

/// What the loop does after handling one line
#[derive(Debug, PartialEq)]
enum LineOutcome {
    /// Print this text (already newline-terminated) and keep reading
    Output(String),
    /// Nothing to print
    Silent,
    Quit,
}

/// Run the interactive REPL
///
/// Uses the rustyline line editor. If `no_history` is true, history is
/// neither loaded nor saved.
pub fn run(no_history: bool, config: &crate::config::Config) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut repl = ReplCore::new();

    let history_path = config.history_path();
    if !no_history {
        if let Some(ref path) = history_path {
            let _ = rl.load_history(path); // Missing file on first run
        }
    }

    println!("Monkey v{} REPL", monkey_runtime::VERSION);
    println!("Type Monkey code to evaluate it, :help for commands, :quit to exit");
    println!();

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }

                match handle_line(&mut repl, &line) {
                    LineOutcome::Output(text) => print!("{}", text),
                    LineOutcome::Silent => {}
                    LineOutcome::Quit => {
                        println!("Goodbye!");
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                println!("^C");
                println!("Use :quit or :q to exit");
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if !no_history {
        if let Some(path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.save_history(&path);
        }
    }

    Ok(())
}

/// Handle one line of input: a `:command` or Monkey source
fn handle_line(repl: &mut ReplCore, line: &str) -> LineOutcome {
    let trimmed = line.trim();

    match trimmed {
        "" => return LineOutcome::Silent,
        ":quit" | ":q" => return LineOutcome::Quit,
        ":help" | ":h" => return LineOutcome::Output(help_text(repl)),
        ":reset" => {
            repl.reset();
            return LineOutcome::Output("REPL state reset\n".to_string());
        }
        ":vars" => return LineOutcome::Output(vars_text(repl)),
        _ => {}
    }

    if let Some(source) = trimmed.strip_prefix(":tokens") {
        let mut output = String::new();
        for token in repl.tokens(source.trim()) {
            output.push_str(&format!("{}\n", token));
        }
        return LineOutcome::Output(output);
    }

    if trimmed.starts_with(':') {
        return LineOutcome::Output(format!(
            "Unknown command: {} (type :help for a list)\n",
            trimmed
        ));
    }

    let result = repl.eval_line(line);

    if !result.diagnostics.is_empty() {
        let mut output = String::new();
        for diag in result.diagnostics {
            output.push_str(&diag.with_file("<repl>").to_human_string());
        }
        return LineOutcome::Output(output);
    }

    match result.value {
        Some(value) => LineOutcome::Output(format!("{}\n", value.inspect())),
        None => LineOutcome::Silent,
    }
}

fn help_text(repl: &ReplCore) -> String {
    let builtins = format!("Builtins: {}", repl.builtin_names().join(", "));
    [
        "Monkey REPL Commands:",
        "  :quit, :q         Exit the REPL",
        "  :reset            Clear all bindings",
        "  :help, :h         Show this help message",
        "  :tokens <src>     Show the tokens of a snippet",
        "  :vars             List bindings",
        "",
        "Type any Monkey expression or statement to evaluate it.",
        "Examples:",
        "  >> let add = fn(a, b) { a + b };",
        "  >> add(1, 2)",
        "  >> len(push([1, 2], 3))",
        "",
        builtins.as_str(),
        "",
    ]
    .join("\n")
}

fn vars_text(repl: &ReplCore) -> String {
    let bindings = repl.variables();
    if bindings.is_empty() {
        return "No variables defined.\n".to_string();
    }

    let mut output = format!("{:<16} {:<10} {}\n", "name", "type", "value");
    output.push_str(&format!("{}\n", "-".repeat(40)));
    for (name, value) in bindings {
        output.push_str(&format!(
            "{:<16} {:<10} {}\n",
            name,
            value.type_name(),
            value.inspect()
        ));
    }
    output
}
