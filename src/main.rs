#![deny(clippy::unwrap_used)]

use clap::Parser;
use log::{info, LevelFilter};
use polygon_shared::error::ImportErrors;
use simple_logger::SimpleLogger;
use std::fs::File;
use std::io::BufWriter;

use crate::input::file_input;
use crate::utils::{display_state_update, send_error_message, show_error_message};
use polygon_shared::messages::Message;

mod input;
mod utils;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(help = "The polygon file to import")]
    input: Option<String>,
    #[arg(short = 'f', help = "Sets the format, defaults to detection by file extension")]
    format: Option<String>,
    #[arg(short = 'c', conflicts_with = "input", help = "Sets a step configuration file to use instead of a direct input")]
    config: Option<String>,
    #[arg(short = 'o', help = "Sets the output file for the mesh JSON")]
    output: Option<String>,
    #[arg(short = 'v', action = clap::ArgAction::Count, conflicts_with = "message", help = "Sets the level of verbosity")]
    verbose: u8,
    #[arg(short = 'm', help = "Use the Message System (useful for interprocess communication)")]
    message: bool,
}

fn main() {
    let args: Args = Args::parse();

    let send_messages = args.message;

    if !send_messages {
        // Vary the output based on how many times the user used the "verbose" flag
        // (i.e. 'myprog -v -v -v' or 'myprog -vvv' vs 'myprog -v'

        SimpleLogger::new()
            .with_level(match args.verbose {
                0 => LevelFilter::Error,
                1 => LevelFilter::Warn,
                2 => LevelFilter::Info,
                3 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            })
            .init()
            .expect("Only Logger Setup");
    }

    display_state_update("Loading Input", send_messages);

    let mesh = handle_err_or_return(
        file_input(args.config.as_deref(), args.format.as_deref(), args.input),
        send_messages,
    );

    if !send_messages {
        info!(
            "Imported {} points and {} triangles",
            mesh.points.len(),
            mesh.triangles.len()
        );
    }

    display_state_update("Outputting Mesh", send_messages);

    if let Some(file_path) = &args.output {
        // Output to file
        let file = handle_err_or_return(
            File::create(file_path).map_err(|err| ImportErrors::IoFailure {
                filepath: file_path.to_string(),
                message: err.to_string(),
            }),
            send_messages,
        );
        handle_err_or_return(
            serde_json::to_writer(BufWriter::new(file), &mesh).map_err(|err| {
                ImportErrors::IoFailure {
                    filepath: file_path.to_string(),
                    message: err.to_string(),
                }
            }),
            send_messages,
        );
    } else if send_messages {
        // Output as message
        let message = Message::Mesh(mesh);
        bincode::serialize_into(BufWriter::new(std::io::stdout()), &message)
            .expect("Write Limit should not be hit");
    } else {
        // Output to stdout
        let stdout = std::io::stdout();
        let stdio_lock = stdout.lock();
        serde_json::to_writer(BufWriter::new(stdio_lock), &mesh)
            .expect("Writing to STDOUT shouldn't fail");
        println!();
    }
}

fn handle_err_or_return<T>(res: Result<T, ImportErrors>, send_message: bool) -> T {
    match res {
        Ok(data) => data,
        Err(import_error) => {
            if send_message {
                send_error_message(import_error);
            } else {
                show_error_message(import_error);
            }
            std::process::exit(-1);
        }
    }
}
