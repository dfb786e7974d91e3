use {
    anyhow::Context,
    argh::FromArgs,
    culpa::throws,
    miette::{MietteHandlerOpts, NamedSource, Report},
    spartie::{ScanError, Token, TokenType},
    std::{io::Read, process::ExitCode},
    tabular::{Row, Table},
    tracing_subscriber::EnvFilter,
};

const APP_NAME: &str = env!("CARGO_PKG_NAME");
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// sysexits(3)
const EX_USAGE: u8 = 64;
const EX_DATAERR: u8 = 65;
const EX_NOINPUT: u8 = 66;

/// Scan a spartie script and print its tokens.
#[derive(FromArgs)]
struct Args {
    /// print version information
    #[argh(switch, short = 'v')]
    version: bool,

    /// log scanner progress to stderr
    #[argh(switch)]
    verbose: bool,

    /// render scan errors with a source snippet
    #[argh(switch)]
    pretty: bool,

    /// script file, stdin when omitted
    #[argh(positional)]
    script: Vec<String>,
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    if args.version {
        println!("{} {}", APP_NAME, APP_VERSION);
        return ExitCode::SUCCESS;
    }

    init_logging(args.verbose);

    if args.script.len() > 1 {
        eprintln!("Usage: {} [script file]", APP_NAME);
        return ExitCode::from(EX_USAGE);
    }

    let script = args.script.first().map(String::as_str);
    let source = match read_source(script) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("{:#}", error);
            return ExitCode::from(EX_NOINPUT);
        }
    };

    match spartie::scan(&source) {
        Ok(tokens) => {
            print_tokens(&tokens);
            ExitCode::SUCCESS
        }
        Err(error) => {
            report(error, script.unwrap_or("<stdin>"), &source, args.pretty);
            ExitCode::from(EX_DATAERR)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    // Only fails if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[throws(anyhow::Error)]
fn read_source(script: Option<&str>) -> String {
    match script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Could not read from file {}", path))?,
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Could not read from stdin")?;
            source
        }
    }
}

fn print_tokens(tokens: &[Token]) {
    //                          line type lexeme
    let mut table = Table::new("{:>}  {:<}  {:<}");
    let mut previous_line = None;
    for token in tokens {
        let line = if previous_line == Some(token.line()) {
            "|".into()
        } else {
            format!("{}", token.line())
        };
        previous_line = Some(token.line());

        let lexeme = match token.kind {
            TokenType::String => format!("\"{}\"", token.lexeme.escape_debug()),
            _ => token.lexeme.to_string(),
        };
        table.add_row(
            Row::new()
                .with_cell(line)
                .with_cell(token.kind)
                .with_cell(lexeme),
        );
    }
    print!("{}", table);
}

fn report(error: ScanError, name: &str, source: &str, pretty: bool) {
    eprintln!("Error occurred on line {} : {}", error.line(), error);

    if pretty {
        let _ = miette::set_hook(Box::new(|_| {
            Box::new(
                MietteHandlerOpts::new()
                    .unicode(true)
                    .color(false)
                    .context_lines(3)
                    .build(),
            )
        }));
        let report = Report::new(error).with_source_code(NamedSource::new(name, source.to_string()));
        eprintln!("{:?}", report);
    }
}
