use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use scr_rs::models::SIZE_CHOICES;
use scr_rs::{Client, Selection, filter, scatter, storage, table};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "scr",
    version,
    about = "Fetch, filter & visualize country research rankings"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the feed and print the top-N table (and optionally save or plot).
    Top(TopArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct TopArgs {
    /// Result-set size (3, 5, 10 or 20).
    #[arg(short, long, default_value_t = SIZE_CHOICES[0])]
    size: u32,
    /// Restrict to a single year (YYYY). Omit to match all years.
    #[arg(short, long)]
    year: Option<i32>,
    /// Restrict to a region by name. Omit to match all regions.
    #[arg(short, long)]
    region: Option<String>,
    /// Reverse the displayed order (bottom of the top-N).
    #[arg(long, default_value_t = false)]
    flop: bool,
    /// Save the filtered rows to a file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Write the latest-year scatter chart to the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the plot (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the plot (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Print latest-year average documents/citations to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_mean(x: f64) -> String {
    // Format up to 4 decimals, then trim trailing zeros and trailing dot.
    let s = format!("{:.4}", x);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Top(args) => cmd_top(args),
    }
}

fn cmd_top(args: TopArgs) -> Result<()> {
    if !SIZE_CHOICES.contains(&args.size) {
        anyhow::bail!("invalid --size, expected one of 3, 5, 10, 20");
    }

    let client = Client::default();
    let records = client.fetch()?;

    let sel = Selection {
        size: args.size,
        year: args.year,
        region: args.region,
        flop: args.flop,
    };
    let matched = filter::filter(&records, &sel);
    let rows = table::layout(&matched, sel.size);

    print_table(&rows);

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        let owned: Vec<scr_rs::Record> = matched.iter().map(|r| (*r).clone()).collect();
        match fmt.as_str() {
            "csv" => storage::save_csv(&owned, path)?,
            "json" => storage::save_json(&owned, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", owned.len(), path.display());
    }

    if let Some(plot_path) = args.plot.as_ref() {
        scatter::plot_scatter(&records, plot_path, args.width, args.height)?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }

    if args.stats {
        let scene = scatter::Scene::build(&records)?;
        println!(
            "{}  avg documents={} avg citations={}",
            scene.year,
            fmt_mean(scene.avg_documents),
            fmt_mean(scene.avg_citations)
        );
    }

    Ok(())
}

const COL_WIDTHS: [usize; 6] = [24, 26, 5, 10, 10, 8];

fn print_table(rows: &[table::Row]) {
    let header: Vec<String> = table::HEADERS
        .iter()
        .zip(COL_WIDTHS)
        .map(|(h, w)| format!("{h:<w$}"))
        .collect();
    println!("{}", header.join(" "));
    for row in rows.iter().filter(|r| r.visible) {
        let line: Vec<String> = row
            .cells
            .iter()
            .zip(COL_WIDTHS)
            .map(|(c, w)| {
                if c.numeric {
                    format!("{:>w$}", c.text)
                } else {
                    format!("{:<w$}", c.text)
                }
            })
            .collect();
        println!("{}", line.join(" "));
    }
}
