use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use champis_calc::calculator::{
    AngleUnit, Calculator, CalculatorResult, ExpressionBuffer, copy_result, copy_to_clipboard,
    evaluate_buffer,
};
use champis_calc::config::Config;
use champis_calc::display::{Theme, render_buffer, render_entry, render_error};
use champis_calc::formulas::Formula;
use champis_calc::fraction::decimal_to_fraction;
use champis_calc::history::History;

#[derive(Parser, Debug)]
#[command(name = "champis-calc", version, about = "Scientific calculator with geometry formulas")]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Evaluate trigonometric functions in degrees
    #[arg(long, global = true, conflicts_with = "radians")]
    degrees: bool,

    /// Evaluate trigonometric functions in radians
    #[arg(long, global = true)]
    radians: bool,

    /// Copy the result to the clipboard
    #[arg(long, global = true)]
    copy: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate an expression, e.g. `sin(30) * 2`
    Eval {
        #[arg(required = true, allow_hyphen_values = true)]
        expression: Vec<String>,
    },
    /// Convert a decimal number to a fraction
    Fraction {
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Relative accuracy, strictly between 0 and 1
        #[arg(long)]
        accuracy: Option<f64>,
    },
    /// Run a formula; use `_` for a blank argument
    Formula {
        name: Formula,
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List the available formulas and their arguments
    Formulas,
    /// Show or clear the saved history
    History {
        #[arg(long)]
        clear: bool,
    },
    /// Interactive calculator (the default)
    Repl,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.degrees {
        config.calculator.angle_unit = AngleUnit::Degrees;
    } else if cli.radians {
        config.calculator.angle_unit = AngleUnit::Radians;
    }

    let mut theme = Theme::from_config(&config.display).context("invalid [display] section")?;
    if !io::stdout().is_terminal() {
        theme = theme.plain();
    }
    colored::control::set_override(theme.styled);

    let history_path = config.history_path();
    let history = match &history_path {
        Some(path) => History::load(path).unwrap_or_else(|err| {
            warn!(%err, "ignoring unreadable history");
            History::new()
        }),
        None => History::new(),
    };
    let mut calculator = Calculator::new(&config.calculator, history);

    match cli.command.unwrap_or(Command::Repl) {
        Command::Eval { expression } => {
            let expression = expression.join(" ");
            calculator.append(&expression)?;
            if let Some(result) = calculator.calculate() {
                print_result(&result, &calculator, &theme);
                if cli.copy {
                    copy_result(&result)?;
                }
                if !result.is_success() {
                    save_history(&calculator, history_path.as_ref());
                    std::process::exit(1);
                }
            }
        }
        Command::Fraction { value, accuracy } => {
            let accuracy = accuracy.unwrap_or(config.calculator.fraction_accuracy);
            let buffer = ExpressionBuffer::parse(&value)?;
            let result = evaluate_buffer(&buffer, calculator.angle_unit());
            let Some(number) = result.value() else {
                bail!("cannot evaluate `{}`: {}", value, result.result_text);
            };
            let fraction = decimal_to_fraction(number, accuracy)?;
            println!("{}", fraction);
            if cli.copy {
                copy_to_clipboard(&fraction.to_string())?;
            }
        }
        Command::Formula { name, args } => {
            let args: Vec<&str> = args
                .iter()
                .map(|arg| if arg == "_" { "" } else { arg.as_str() })
                .collect();
            let outcome = calculator.calculate_formula(name, &args);
            save_history(&calculator, history_path.as_ref());
            let outcome = outcome?;
            println!("{}", outcome);
            if cli.copy {
                copy_to_clipboard(&outcome.to_string())?;
            }
            return Ok(());
        }
        Command::Formulas => {
            for formula in Formula::ALL {
                println!(
                    "{:<34} {} [{}]",
                    formula.id(),
                    formula.name(),
                    formula.arguments().join(", ")
                );
            }
            return Ok(());
        }
        Command::History { clear } => {
            if clear {
                calculator.delete_history();
                info!("history cleared");
            } else {
                print_history(&calculator, &theme);
            }
        }
        Command::Repl => run_repl(&mut calculator, &theme)?,
    }

    save_history(&calculator, history_path.as_ref());
    Ok(())
}

fn print_result(result: &CalculatorResult, calculator: &Calculator, theme: &Theme) {
    if result.is_success() {
        println!("{}", result.display());
    } else {
        println!("{}", render_error(calculator.error_message(), theme));
        eprintln!("{}", result.result_text);
    }
}

fn print_history(calculator: &Calculator, theme: &Theme) {
    for entry in calculator.history().entries() {
        println!(
            "{}\n",
            render_entry(&entry.expression, &entry.result, entry.success, theme)
        );
    }
}

fn save_history(calculator: &Calculator, path: Option<&PathBuf>) {
    if let Some(path) = path
        && let Err(err) = calculator.history().save(path)
    {
        warn!(%err, "failed to save history");
    }
}

const REPL_HELP: &str = "\
Type an expression and press enter to evaluate it.
A line starting with +, *, /, ^, × or ÷ continues from the last result.
A leading - starts a new, negative expression; write +-5 to subtract.

  :deg / :rad / :unit    set or toggle the angle unit
  :ans                   start over from the latest result
  :back                  delete the last token
  :clear                 clear the display
  :history               show the history
  :delete-history        clear the history
  :formula NAME a, b, …  run a formula (leave blanks empty)
  :formulas              list formulas
  :quit                  exit";

fn run_repl(calculator: &mut Calculator, theme: &Theme) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("angle unit: {:?}  (:help for commands)", calculator.angle_unit());

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix(':') {
            if !run_command(calculator, theme, command) {
                break;
            }
            continue;
        }

        if !continues_previous(line) {
            calculator.clear();
        }

        if let Err(err) = calculator.append(line) {
            println!("{}", render_error(&err.to_string(), theme));
            continue;
        }
        evaluate_and_print(calculator, theme);
    }

    Ok(())
}

/// A leading binary operator keeps the previous result as the left operand.
/// `-` is left out because it usually starts a negative number.
fn continues_previous(line: &str) -> bool {
    line.starts_with(['+', '*', '/', '^', '×', '÷'])
}

fn evaluate_and_print(calculator: &mut Calculator, theme: &Theme) {
    if let Some(result) = calculator.calculate() {
        if let Some(expression) = calculator.latest_expression() {
            print!("{} = ", render_buffer(expression, theme));
        }
        print_result(&result, calculator, theme);
    }
}

/// Returns `false` when the REPL should exit.
fn run_command(calculator: &mut Calculator, theme: &Theme, command: &str) -> bool {
    let (name, rest) = command
        .split_once(char::is_whitespace)
        .unwrap_or((command, ""));

    match name {
        "q" | "quit" | "exit" => return false,
        "h" | "help" => println!("{}", REPL_HELP),
        "deg" => calculator.set_angle_unit(AngleUnit::Degrees),
        "rad" => calculator.set_angle_unit(AngleUnit::Radians),
        "unit" => println!("angle unit: {:?}", calculator.toggle_angle_unit()),
        "ans" => {
            calculator.recall_latest_result();
            println!("{}", render_buffer(calculator.buffer(), theme));
        }
        "back" => {
            calculator.backspace();
            println!("{}", render_buffer(calculator.buffer(), theme));
        }
        "clear" => calculator.clear(),
        "history" => print_history(calculator, theme),
        "delete-history" => calculator.delete_history(),
        "formulas" => {
            for formula in Formula::ALL {
                println!("{} [{}]", formula.id(), formula.arguments().join(", "));
            }
        }
        "formula" => {
            let (formula, args) = rest.trim().split_once(char::is_whitespace).unwrap_or((rest.trim(), ""));
            match formula.parse::<Formula>() {
                Ok(formula) => {
                    let args: Vec<&str> = if args.trim().is_empty() {
                        Vec::new()
                    } else {
                        args.split(',').collect()
                    };
                    match calculator.calculate_formula(formula, &args) {
                        Ok(outcome) => println!("{}", outcome),
                        Err(err) => println!("{}", render_error(&err.to_string(), theme)),
                    }
                }
                Err(err) => println!("{}", render_error(&err, theme)),
            }
        }
        other => println!(
            "{}",
            render_error(&format!("unknown command `:{}`", other), theme)
        ),
    }

    true
}
