use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use fv_app::{
    AppError, AppResult, FvConfig, JsonSegmentFile, MemorySink, describe_layer, export_network,
    label_segments,
};
use fv_schedule::{PipeSchedule, SeriesMode};

#[derive(Parser)]
#[command(name = "fv-cli")]
#[command(about = "Fjernvarme CLI - district heating pipe schedule and network tool", long_about = None)]
struct Cli {
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Pipe type catalog directory (overrides the config file)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Endpoint adjacency tolerance in drawing units
    #[arg(long, global = true)]
    tolerance: Option<f64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the loaded pipe type tables
    Types,
    /// Classify layer names and show their dimensions
    Classify {
        /// Layer names, e.g. FJV-FREM-DN100
        #[arg(required = true)]
        layers: Vec<String>,
        /// Drawn constant width in metres
        #[arg(short, long)]
        width: Option<f64>,
    },
    /// Compute size labels for a segment file
    Label {
        /// JSON array of segment records
        segments: PathBuf,
        /// Fail segments whose series cannot be determined
        #[arg(long)]
        hard_fail: bool,
        /// Output JSON file for the labels (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build the pipe network and export it as Graphviz DOT
    Graph {
        /// JSON array of segment records
        segments: PathBuf,
        /// Output DOT file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Types => cmd_types(&config),
        Commands::Classify { layers, width } => cmd_classify(&config, &layers, width),
        Commands::Label {
            segments,
            hard_fail,
            output,
        } => cmd_label(&config, &segments, hard_fail, output.as_deref()),
        Commands::Graph { segments, output } => cmd_graph(&config, &segments, output.as_deref()),
    }
}

fn resolve_config(cli: &Cli) -> AppResult<FvConfig> {
    let mut config = match (&cli.config, &cli.catalog) {
        (Some(path), _) => FvConfig::load(path)?,
        (None, Some(catalog)) => FvConfig::new(catalog),
        (None, None) => {
            return Err(AppError::Config(
                "either --config or --catalog is required".to_string(),
            ));
        }
    };
    if let Some(catalog) = &cli.catalog {
        config.catalog_dir = catalog.clone();
    }
    if let Some(tolerance) = cli.tolerance {
        config.tolerance = tolerance;
    }
    config.validate()?;
    Ok(config)
}

fn load_schedule(config: &FvConfig) -> AppResult<PipeSchedule> {
    let schedule = config.load_schedule()?;
    tracing::debug!(catalog = %config.catalog_dir.display(), "catalog loaded");
    Ok(schedule)
}

fn cmd_types(config: &FvConfig) -> AppResult<()> {
    let schedule = load_schedule(config)?;
    let types = schedule.catalog().list_pipe_types();
    println!("Pipe types in {}:", config.catalog_dir.display());
    for line in types {
        println!("  {}", line);
    }
    Ok(())
}

fn cmd_classify(config: &FvConfig, layers: &[String], width: Option<f64>) -> AppResult<()> {
    let schedule = load_schedule(config)?;
    for layer in layers {
        let report = match describe_layer(&schedule, layer, width) {
            Ok(report) => report,
            Err(err @ AppError::Schedule(_)) if !err.is_configuration() => {
                println!("✗ {}: {}", layer, err);
                continue;
            }
            Err(err) => return Err(err),
        };

        let d = &report.descriptor;
        println!("{} -> {}", layer, d);
        println!("  System: {:?}, role: {:?}, DN {}", d.system, d.flow_role, d.dn);
        println!("  Outer diameter: {} mm", report.outer_diameter_mm);
        if let Some(dims) = &report.dimensions {
            println!("  Series: {}", dims.series);
            println!("  Casing diameter: {} mm", dims.casing_diameter_mm);
            println!("  Min elastic radius: {} m", dims.min_elastic_radius_m);
            println!("  Bent pipe min radius: {:.2} m", dims.bend_min_radius_m);
            println!("  Standard length: {} m", dims.std_length_m);
            println!("  In-situ bent: {}", dims.in_situ_bent);
            if dims.label.is_empty() {
                println!("  Label: (unresolved)");
            } else {
                println!("  Label: {}", dims.label);
            }
        }
    }
    Ok(())
}

fn cmd_label(config: &FvConfig, segments: &Path, hard_fail: bool, output: Option<&Path>) -> AppResult<()> {
    let schedule = load_schedule(config)?;
    let mode = if hard_fail {
        SeriesMode::HardFail
    } else {
        config.series_mode()
    };

    let mut sink = MemorySink::new();
    let report = label_segments(&schedule, &JsonSegmentFile::new(segments), &mut sink, mode)?;

    let labels: std::collections::BTreeMap<String, &String> = sink
        .labels()
        .iter()
        .map(|(id, label)| (id.to_string(), label))
        .collect();
    let json = serde_json::to_string_pretty(&labels)
        .map_err(|e| AppError::InvalidInput(format!("Failed to serialize labels: {}", e)))?;

    if let Some(path) = output {
        std::fs::write(path, json)?;
        println!("✓ Wrote {} labels to {}", report.labelled, path.display());
    } else {
        println!("{}", json);
    }

    if !report.issues.is_empty() {
        eprintln!("{} of {} segments not labelled:", report.issues.len(), report.total());
        for issue in &report.issues {
            eprintln!("  {} [{}]: {}", issue.segment, issue.layer, issue.message);
        }
    }
    Ok(())
}

fn cmd_graph(config: &FvConfig, segments: &Path, output: Option<&Path>) -> AppResult<()> {
    let schedule = load_schedule(config)?;
    let export = export_network(&schedule, &JsonSegmentFile::new(segments), config)?;

    if let Some(path) = output {
        std::fs::write(path, &export.dot)?;
        println!("✓ Exported {} trees to {}", export.trees, path.display());
    } else {
        print!("{}", export.dot);
    }

    if export.cross_links > 0 {
        eprintln!("  Cross links resolved: {}", export.cross_links);
    }
    if export.truncated > 0 {
        eprintln!("  Trees truncated by traversal budget: {}", export.truncated);
    }
    for failure in &export.failures {
        eprintln!("✗ Group {}: {}", failure.group, failure.message);
    }
    Ok(())
}
