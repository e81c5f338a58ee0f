use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use miette::{bail, IntoDiagnostic, NamedSource, Report, Result};

use nsb8::output::{self, file_message, message, MsgColor};
use nsb8::session;
use nsb8::{format_report, Air, AsmParser, Exit, RunState};

/// nsb8 is a tiny assembler and emulator for an 8008-flavoured 8-bit machine.
#[derive(Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Quickly provide a `.asm` file to run
    path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run text `.asm` or binary `.bin` file and print the machine report
    Run {
        /// `.asm` or `.bin` file to run
        name: PathBuf,
        /// Produce minimal output, suited for blackbox tests
        #[arg(short, long)]
        minimal: bool,
        /// Maximum number of instructions to execute before giving up
        #[arg(short, long)]
        cycles: Option<u64>,
    },
    /// Create binary `.bin` image to run later
    Compile {
        /// `.asm` file to compile
        name: PathBuf,
        /// Destination to output `.bin` file
        dest: Option<PathBuf>,
    },
    /// Check a `.asm` file without running or outputting binary
    Check {
        /// File to check
        name: PathBuf,
        /// Print the assembled listing
        #[arg(short, long)]
        listing: bool,
    },
    /// Handle a single host command string: `new`, `cont`, `run` or raw code
    Eval {
        /// Command text, passed as one argument
        text: Option<String>,
        /// Maximum number of instructions to execute before giving up
        #[arg(short, long)]
        cycles: Option<u64>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    nsb8::env::init();

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new() //
                .context_lines(nsb8::DIAGNOSTIC_CONTEXT_LINES)
                .build(),
        )
    }))?;

    match args.command {
        Some(Command::Run {
            name,
            minimal,
            cycles,
        }) => {
            output::set_minimal(minimal);
            run(&name, cycles)
        }
        Some(Command::Compile { name, dest }) => {
            file_message(MsgColor::Green, "Assembling", &name);
            let air = assemble_file(&name)?;
            let program = air.emit();

            let out_file_name = dest.unwrap_or_else(|| name.with_extension("bin"));
            fs::write(&out_file_name, program.bytes()).into_diagnostic()?;

            message(MsgColor::Green, "Finished", &program.status());
            file_message(MsgColor::Green, "Saved", &out_file_name);
            Ok(())
        }
        Some(Command::Check { name, listing }) => {
            file_message(MsgColor::Green, "Checking", &name);
            let air = assemble_file(&name)?;
            if listing {
                print_listing(&air);
            }
            message(MsgColor::Green, "Success", "no errors found!");
            Ok(())
        }
        Some(Command::Eval { text, cycles }) => {
            let limit = cycles.unwrap_or_else(nsb8::env::max_cycles);
            println!("{}", session::respond(text.as_deref(), limit));
            Ok(())
        }
        None => {
            if let Some(path) = args.path {
                run(&path, None)
            } else {
                println!("\n~ nsb8 v{VERSION} ~");
                println!("{}", LOGO.truecolor(255, 183, 197).bold());
                println!("{SHORT_INFO}");
                Ok(())
            }
        }
    }
}

fn run(name: &Path, cycles: Option<u64>) -> Result<()> {
    let limit = cycles.unwrap_or_else(nsb8::env::max_cycles);
    let (status, image) = match name.extension().and_then(|ext| ext.to_str()) {
        Some("bin") => {
            file_message(MsgColor::Green, "Loading", name);
            let image = fs::read(name).into_diagnostic()?;
            let status = format!("Loaded image. Program size: {} bytes.", image.len());
            (status, image)
        }
        Some("asm") => {
            file_message(MsgColor::Green, "Assembling", name);
            let program = assemble_file(name)?.emit();
            (program.status(), program.into_bytes())
        }
        Some(_) => bail!("File has unknown extension. Exiting..."),
        None => bail!("File has no extension. Exiting..."),
    };

    message(MsgColor::Green, "Running", "emitted binary");
    let mut state = RunState::from_image(&image);
    let exit = state.run(limit);
    println!("{}", format_report(&format!("{status}\n{}", exit.status()), &state));

    match exit {
        Exit::Halted => file_message(MsgColor::Green, "Completed", name),
        Exit::CycleLimit => message(
            MsgColor::Red,
            "Stopped",
            &format!("cycle limit of {limit} reached"),
        ),
    }
    Ok(())
}

/// Return assembly intermediate representation of source file for further processing
fn assemble_file(name: &Path) -> Result<Air> {
    let src = fs::read_to_string(name).into_diagnostic()?;
    let parsed = AsmParser::new(&src).parse();
    parsed.map_err(|e| {
        let src = NamedSource::new(name.display().to_string(), src);
        Report::new(e).with_source_code(src)
    })
}

fn print_listing(air: &Air) {
    let mut addr = 0;
    for stmt in air {
        let mut bytes = Vec::with_capacity(stmt.size());
        stmt.emit(&mut bytes);
        let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02X}")).collect();
        println!("{addr:04X}  {:<9} {stmt}", hex.join(" "));
        addr += bytes.len();
    }
}

const LOGO: &str = r#"
                 __    ____
   ____  _____  / /_  ( __ )
  / __ \/ ___/ / __ \/ __  |
 / / / (__  ) / /_/ / /_/ /
/_/ /_/____/ /_.___/\____/ "#;

const SHORT_INFO: &str = r"
Welcome to nsb8, an assembler and emulator for a tiny 8-bit machine.
Please use `-h` or `--help` to access the usage instructions and documentation.
";

const VERSION: &str = env!("CARGO_PKG_VERSION");
