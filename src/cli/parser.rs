use crate::export::{ExportFormat, ExportTable};
use clap::{Parser, Subcommand};

/// Command-line interface definition for gatesheet
/// Turns access-control gate exports into a monthly attendance timesheet
#[derive(Parser)]
#[command(
    name = "gatesheet",
    version = env!("CARGO_PKG_VERSION"),
    about = "Turn access-control gate exports into an employee x day attendance timesheet",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the folder scanned for gate exports
    #[arg(global = true, long = "folder", value_name = "DIR")]
    pub folder: Option<String>,

    /// Override the report workbook written by `render`
    #[arg(global = true, long = "report", value_name = "FILE")]
    pub report: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// List gate exports not yet processed
    Pending,

    /// Process every pending export: import, extract, aggregate, render
    Process {
        #[arg(long = "json", help = "Print the batch report as JSON")]
        json: bool,
    },

    /// Import one export into the raw dataset
    Import {
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Build the event table from the raw dataset
    Extract,

    /// Build the timesheet matrix from the event table
    Aggregate,

    /// Extract and aggregate again from the stored raw dataset
    Rebuild,

    /// Write the styled report workbook
    Render,

    /// Print the timesheet in the terminal
    Show {
        #[arg(long = "events", help = "Show the event table instead")]
        events: bool,
    },

    /// Export a dataset to CSV or JSON
    Export {
        #[arg(long, value_enum, default_value = "timesheet")]
        table: ExportTable,

        #[arg(long, value_enum)]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Overwrite the file without asking")]
        force: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
