use chrono::Local;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use trackboard::{Dataset, StreamCategory};

#[derive(Parser, Debug)]
#[command(name = "trackboard")]
#[command(author, version, about = "Explore music streaming exports with an interactive local dashboard")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// CSV export to summarize (optional in GUI mode)
    path: Option<PathBuf>,

    /// Launch GUI file picker (auto-enabled when double-clicked)
    #[arg(long)]
    gui: bool,

    /// Output report file (.csv, .json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for auto-generated reports
    #[arg(long, default_value = "trackboard-reports")]
    report_dir: PathBuf,

    /// Don't auto-generate CSV report
    #[arg(long)]
    no_report: bool,

    /// Don't prompt to open report
    #[arg(long)]
    no_open: bool,

    /// Show the full key/mode table
    #[arg(short, long)]
    verbose: bool,

    /// Only show summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive dashboard
    Serve {
        /// CSV export to explore
        path: PathBuf,

        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,
    },
}

fn main() {
    let args = Args::parse();

    // Handle subcommands first
    if let Some(cmd) = args.command {
        match cmd {
            Command::Serve { path, port } => {
                if let Err(e) = trackboard::serve::start(port, path) {
                    eprintln!("Server error: {}", e);
                    std::process::exit(1);
                }
                return;
            }
        }
    }

    // Determine if we should use GUI mode
    // With GUI feature: launch GUI if --gui flag OR no path provided
    // This makes double-click behavior "just work"
    #[cfg(feature = "gui")]
    let use_gui = args.gui || args.path.is_none();

    #[cfg(not(feature = "gui"))]
    let use_gui = false;

    // Handle GUI mode
    #[cfg(feature = "gui")]
    let path = if use_gui {
        match pick_path_gui() {
            Some(p) => p,
            None => {
                // User cancelled - show message and exit
                eprintln!("No CSV file selected.");
                std::process::exit(0);
            }
        }
    } else {
        // Path was provided via CLI
        args.path.clone().unwrap()
    };

    #[cfg(not(feature = "gui"))]
    let path = if let Some(p) = args.path.clone() {
        p
    } else {
        eprintln!("Usage: trackboard <CSV>");
        eprintln!("Run 'trackboard --help' for more options.");
        eprintln!("Note: GUI mode not available in this build.");
        std::process::exit(1);
    };

    let dataset = match Dataset::load(&path) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Failed to load {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };

    if !args.quiet {
        print_summary(&dataset, args.verbose);
    }

    // Determine report path
    let report_path = if let Some(ref output) = args.output {
        Some(output.clone())
    } else if !args.no_report {
        // Auto-generate report
        std::fs::create_dir_all(&args.report_dir).ok();
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("trackboard_report_{}.csv", timestamp);
        Some(args.report_dir.join(filename))
    } else {
        None
    };

    // Generate report
    if let Some(ref output_path) = report_path {
        if let Err(e) = trackboard::report::generate(output_path, &dataset) {
            eprintln!("Failed to write report: {}", e);
            std::process::exit(1);
        }
        if !args.quiet {
            eprintln!("\n\x1b[32mReport saved: {}\x1b[0m", output_path.display());
        }

        // Open report
        if !args.no_open {
            if use_gui {
                // In GUI mode, auto-open the report (no prompt)
                let _ = open::that(output_path);
            } else if !args.quiet {
                // In terminal mode, ask first
                eprint!("\nOpen report? [Y/n] ");
                io::stderr().flush().ok();

                let mut input = String::new();
                if io::stdin().read_line(&mut input).is_ok() {
                    let input = input.trim().to_lowercase();
                    if input.is_empty() || input == "y" || input == "yes" {
                        if let Err(e) = open::that(output_path) {
                            eprintln!("Failed to open report: {}", e);
                        }
                    }
                }
            }
        }
    }

    if !args.quiet {
        eprintln!("\n\x1b[90mDone.\x1b[0m");
    }
}

fn print_summary(dataset: &Dataset, verbose: bool) {
    eprintln!("\x1b[1mTrackboard - Streaming Data Summary\x1b[0m");
    eprintln!("{}", "─".repeat(70));

    eprintln!("Tracks loaded: {}", dataset.len());
    if dataset.load_stats.rows_dropped > 0 {
        eprintln!(
            "\x1b[33mWARN\x1b[0m  {} of {} row(s) dropped (unparseable stream count)",
            dataset.load_stats.rows_dropped, dataset.load_stats.rows_read
        );
    }

    let c = &dataset.cutoffs;
    eprintln!(
        "Stream cutoffs: p10={:.0}  p33={:.0}  p66={:.0}  max={:.0}",
        c.p10, c.p33, c.p66, c.max
    );

    let counts = dataset.category_counts();
    eprintln!("\n\x1b[1mPopularity terciles:\x1b[0m");
    for (category, count) in StreamCategory::ALL.iter().zip(counts) {
        eprintln!("  {:<16} {}", category.label(), count);
    }

    // Key/mode table, loudest first
    let mut rows: Vec<_> = dataset.key_mode.iter().collect();
    rows.sort_by(|a, b| b.total_streams.cmp(&a.total_streams));
    let shown = if verbose { rows.len() } else { rows.len().min(10) };

    eprintln!("\n\x1b[1mKey/mode distribution:\x1b[0m");
    eprintln!("  {:<5} {:<7} {:>15} {:>6}", "KEY", "MODE", "STREAMS", "SONGS");
    for row in &rows[..shown] {
        eprintln!(
            "  {:<5} {:<7} {:>15} {:>6}",
            row.key, row.mode, row.total_streams, row.song_count
        );
    }
    if shown < rows.len() {
        eprintln!("  ... {} more (use --verbose for all)", rows.len() - shown);
    }
}

#[cfg(feature = "gui")]
fn pick_path_gui() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select streaming export to explore")
        .add_filter("CSV files", &["csv"])
        .pick_file()
}
