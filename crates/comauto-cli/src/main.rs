//! comauto CLI - Office automation and conversion tool

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{ArgAction, Parser, Subcommand};
use comauto::address::{column_letter_to_number, column_number_to_letters, parse_absolute_address};
use comauto::convert::{from_ole_date, to_ole_date};
use comauto::Rgb;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "comauto")]
#[command(author, version, about = "Late-bound Office automation and conversion tool")]
struct Cli {
    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert column letters to 1-based column numbers
    Column {
        /// Column letters, e.g. A, AA, XFD
        #[arg(required = true)]
        letters: Vec<String>,
    },

    /// Convert 1-based column numbers to column letters
    Letters {
        #[arg(required = true)]
        numbers: Vec<u32>,
    },

    /// Parse absolute cell addresses such as $C$5
    Address {
        #[arg(required = true)]
        addresses: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Convert a #RRGGBB color to an OLE_COLOR value
    OleColor {
        /// Hex color, with or without the leading '#'
        hex: String,
    },

    /// Convert between calendar dates and OLE Automation date serials
    OleDate {
        /// Date as YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS
        #[arg(required_unless_present = "serial", conflicts_with = "serial")]
        date: Option<String>,

        /// Serial to convert back to a date
        #[arg(long, allow_negative_numbers = true)]
        serial: Option<f64>,
    },

    /// List the objects in the Running Object Table
    #[cfg(windows)]
    Rot {
        #[arg(long)]
        json: bool,
    },

    /// Start a ProgID and list the members its type information describes
    #[cfg(windows)]
    Members {
        /// e.g. Excel.Application
        prog_id: String,

        #[arg(long)]
        json: bool,
    },

    /// Build a styled table in a throwaway Word document
    #[cfg(windows)]
    WordDemo {
        /// Show the Word window while the demo runs
        #[arg(long)]
        visible: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Column { letters } => {
            for (text, number) in column_numbers(&letters)? {
                println!("{text} = {number}");
            }
            Ok(())
        }
        Commands::Letters { numbers } => {
            for number in numbers {
                let letters = column_number_to_letters(number)
                    .with_context(|| format!("Cannot convert column {number}"))?;
                println!("{number} = {letters}");
            }
            Ok(())
        }
        Commands::Address { addresses, json } => show_addresses(&addresses, json),
        Commands::OleColor { hex } => {
            let color = Rgb::from_hex(&hex).with_context(|| format!("Invalid color '{hex}'"))?;
            let ole = color.to_ole();
            println!("{color} = {ole} (0x{ole:06X})");
            Ok(())
        }
        Commands::OleDate { date, serial } => ole_date(date.as_deref(), serial),
        #[cfg(windows)]
        Commands::Rot { json } => windows_cmd::show_rot(json),
        #[cfg(windows)]
        Commands::Members { prog_id, json } => windows_cmd::show_members(&prog_id, json),
        #[cfg(windows)]
        Commands::WordDemo { visible } => windows_cmd::word_demo(visible),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn column_numbers(letters: &[String]) -> Result<Vec<(String, u32)>> {
    letters
        .iter()
        .map(|text| {
            let number = column_letter_to_number(text)
                .with_context(|| format!("Invalid column '{text}'"))?;
            Ok((text.to_uppercase(), number))
        })
        .collect()
}

#[derive(Debug, PartialEq, Serialize)]
struct ParsedAddress {
    address: String,
    row: u32,
    column: u32,
}

fn parse_addresses(addresses: &[String]) -> Result<Vec<ParsedAddress>> {
    addresses
        .iter()
        .map(|address| {
            let coord = parse_absolute_address(address)
                .with_context(|| format!("'{address}' is not an absolute address like $C$5"))?;
            Ok(ParsedAddress {
                address: address.clone(),
                row: coord.row,
                column: coord.column,
            })
        })
        .collect()
}

fn show_addresses(addresses: &[String], json: bool) -> Result<()> {
    let parsed = parse_addresses(addresses)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        for p in parsed {
            println!("{}: row {}, column {}", p.address, p.row, p.column);
        }
    }
    Ok(())
}

/// Accepts `YYYY-MM-DD` (midnight) or `YYYY-MM-DDTHH:MM:SS`
fn parse_date_arg(text: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{text}', expected YYYY-MM-DD[THH:MM:SS]"))?;
    date.and_hms_opt(0, 0, 0)
        .with_context(|| format!("Invalid date '{text}'"))
}

fn ole_date(date: Option<&str>, serial: Option<f64>) -> Result<()> {
    match (date, serial) {
        (_, Some(serial)) => {
            let dt = from_ole_date(serial)?;
            println!("{serial} = {}", dt.format("%Y-%m-%dT%H:%M:%S%.3f"));
        }
        (Some(text), None) => {
            let dt = parse_date_arg(text)?;
            let serial = to_ole_date(dt).with_context(|| format!("Cannot convert '{text}'"))?;
            println!("{text} = {serial}");
        }
        (None, None) => bail!("Either a date or --serial is required"),
    }
    Ok(())
}

#[cfg(windows)]
mod windows_cmd {
    use anyhow::{Context, Result};
    use comauto::prelude::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct RotEntry {
        display_name: String,
        type_name: Option<String>,
    }

    pub fn show_rot(json: bool) -> Result<()> {
        let _com = Apartment::initialize_sta().context("COM initialization failed")?;
        let entries: Vec<RotEntry> = comauto::rot::running_objects()
            .into_iter()
            .map(|obj| RotEntry {
                display_name: obj.display_name,
                type_name: obj.type_name,
            })
            .collect();

        if json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        } else {
            for entry in &entries {
                let kind = entry.type_name.as_deref().unwrap_or("-");
                println!("{:<20} {}", kind, entry.display_name);
            }
            eprintln!("{} running object(s)", entries.len());
        }
        Ok(())
    }

    pub fn show_members(prog_id: &str, json: bool) -> Result<()> {
        let _com = Apartment::initialize_sta().context("COM initialization failed")?;
        let app = Dispatch::create_application(prog_id, &AutomationConfig::default())
            .with_context(|| format!("Failed to start '{prog_id}'"))?;

        let mut invoker = Invoker::new();
        invoker.track(&app);
        let members = comauto::typeinfo::list_members(&app);

        if json {
            println!("{}", serde_json::to_string_pretty(&members)?);
        } else {
            for line in members.callable_lines() {
                println!("{line}");
            }
        }

        // Office servers keep running until told to quit
        if invoker.property_exists(&app, "Quit") {
            if let Err(e) = invoker.call_method(&app, "Quit", &[]) {
                log::warn!("{prog_id}.Quit failed: {e}");
            }
        }
        invoker.release_all();
        Ok(())
    }

    pub fn word_demo(visible: bool) -> Result<()> {
        let _com = Apartment::initialize_sta().context("COM initialization failed")?;
        let config = AutomationConfig::default().visible(visible);
        comauto::word::insert_table_demo(&config).context("Word table demo failed")?;
        eprintln!("Word table demo finished");
        Ok(())
    }
}
