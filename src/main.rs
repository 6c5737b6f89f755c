use clap::Parser;
use macro_calc::Session;
use tracing::Level;

const USAGE: &str = "\
Hi, this is a smart calculator.
You can use +, -, *, /, ^, ln(), sin(), cos()
Please separate decimals with '.' and call every function with ()
Results are stored as x0, x1, ...; use <name>=<expression> to pick a name
Pi and E are predefined
Macros are defined with $<name>(<parameter>)=<replacement>
Type \"help\" for this text, \"reset\" to forget everything and \"q\" to exit";

/// Console calculator with variables and text macros.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Log more details to stderr (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Handle these requests in order and exit instead of reading stdin.
    expressions: Vec<String>,
}

fn reply(session: &mut Session, line: &str) {
    match session.handle(line) {
        Ok(result) => println!("{result}"),
        Err(e) => println!("Error, {}", e.to_string()),
    }
}

fn main() {
    use std::io::Write;

    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut session = Session::new();

    if !args.expressions.is_empty() {
        for expression in &args.expressions {
            reply(&mut session, expression);
        }
        return;
    }

    println!("{USAGE}");
    print!("> ");
    std::io::stdout().flush().ok();

    for line in std::io::stdin().lines() {
        let Ok(line) = line else {
            break;
        };

        match line.trim() {
            "" => {},
            "q" => break,
            "help" => println!("{USAGE}"),
            "reset" => {
                session.reset();
                println!("all variables and macros cleared");
            },
            request => reply(&mut session, request),
        }

        print!("> ");
        std::io::stdout().flush().ok();
    }
}
