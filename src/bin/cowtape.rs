use clap::Parser;
use cowtape::{
    config::InterpreterConfig, fingerprint::Fingerprint, programs::Builtin, CowResult, Error,
    Interpreter,
};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Run COW programs", long_about = None)]
struct Cli {
    /// Path to a COW source file
    #[arg(required_unless_present = "builtin", conflicts_with = "builtin")]
    program: Option<PathBuf>,

    /// Run a bundled program instead (checksum, greeting, card-color, reverse)
    #[arg(short, long)]
    builtin: Option<Builtin>,

    /// Input text
    #[arg(short, long, default_value = "", conflicts_with = "input_file")]
    input: String,

    /// Read input text from a file
    #[arg(long)]
    input_file: Option<PathBuf>,

    /// Path to an interpreter config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wrap the pointer and cells instead of failing, also over --config
    #[arg(long)]
    permissive: bool,

    /// Step budget, 0 disables it
    #[arg(long)]
    max_steps: Option<u64>,

    /// List the program's instructions instead of running it
    #[arg(long)]
    tokens: bool,

    /// Print the card fingerprint derived from the output
    #[arg(long)]
    fingerprint: bool,

    /// Enable debug mode
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> CowResult<InterpreterConfig> {
    let mut config = match &cli.config {
        Some(path) => InterpreterConfig::from_file(path)?,
        None => InterpreterConfig::default(),
    };
    if cli.permissive {
        config = config.with_wraparound();
    }
    if let Some(max_steps) = cli.max_steps {
        config.max_steps = (max_steps > 0).then_some(max_steps);
    }
    Ok(config)
}

fn load_source(cli: &Cli) -> CowResult<String> {
    match (&cli.builtin, &cli.program) {
        (Some(builtin), _) => Ok(builtin.source().to_string()),
        (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
        (None, None) => Err(Error::config("no program given")),
    }
}

fn print_tokens(interpreter: &Interpreter, source: &str) -> CowResult<()> {
    let compiled = interpreter.compile(source)?;
    for (index, token, span) in compiled.program().iter() {
        let classic = token.brainfuck().map(String::from).unwrap_or_default();
        let target = compiled
            .jumps()
            .target(index)
            .map(|t| format!("-> {}", t))
            .unwrap_or_default();
        println!(
            "{:>6}  {}  {:>2}  {:1}  {}:{}  {}",
            index,
            token,
            token.code(),
            classic,
            span.line,
            span.column,
            target
        );
    }
    Ok(())
}

fn run(cli: &Cli) -> CowResult<()> {
    let config = load_config(cli)?;
    info!("config loaded.");
    debug!("config: {:?}", config);

    let interpreter = Interpreter::new(config)?;
    let source = load_source(cli)?;

    if cli.tokens {
        return print_tokens(&interpreter, &source);
    }

    let input = match &cli.input_file {
        Some(path) => std::fs::read_to_string(path)?,
        None => cli.input.clone(),
    };

    let output = interpreter.run(&source, &input)?;

    if cli.fingerprint {
        match Fingerprint::from_output(&output) {
            Some(fp) => println!(
                "byte: {}, hue: {}, face: {}, color: {}",
                fp.byte,
                fp.hue,
                fp.face,
                fp.css()
            ),
            None => println!("no output, default color: {}", Fingerprint::default().css()),
        }
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
