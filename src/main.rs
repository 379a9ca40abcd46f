use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;
use subnet_calculator::config::{Settings, DEFAULT_LOG_CONFIG};
use subnet_calculator::output::{plan_print, plan_summary, write_plan_json};
use subnet_calculator::{plan_from_pairs, process_event_file};

/// Calculate subnet CIDRs for a VPC across availability zones
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// log4rs configuration file, stderr logging is used when it is missing
    #[arg(long, default_value = DEFAULT_LOG_CONFIG)]
    log_config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan subnets for a VPC network
    Plan {
        /// VPC network, e.g. 10.113.0.0/22
        #[arg(long)]
        vpc: String,
        /// Subnet request, repeat for each label
        #[arg(long = "subnet", value_name = "LABEL=PREFIX")]
        subnets: Vec<String>,
        /// Zones per label [default: SUBNET_CALC_AZS or 3]
        #[arg(long)]
        azs: Option<usize>,
        /// Label placed in the last three /28s [default: SUBNET_CALC_TAIL_LABEL or TGW]
        #[arg(long)]
        tail_label: Option<String>,
        /// Place every label with the normal allocator
        #[arg(long, conflicts_with = "tail_label")]
        no_tail: bool,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        /// Add rows for unused space (csv only)
        #[arg(long)]
        show_gaps: bool,
    },
    /// Process a CloudFormation custom resource event file
    Event {
        /// SNS notification or custom resource request JSON
        #[arg(long)]
        file: String,
        /// Print the response instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Csv,
    Json,
    Summary,
}

fn init_logging(config_path: &str) -> Result<(), Box<dyn Error>> {
    if Path::new(config_path).exists() {
        log4rs::init_file(config_path, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {config_path}: {e}"))?;
        return Ok(());
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_logging(&args.log_config)?;
    log::info!("#Start main()");

    let settings = Settings::from_env();

    match args.command {
        Command::Plan {
            vpc,
            subnets,
            azs,
            tail_label,
            no_tail,
            format,
            show_gaps,
        } => {
            let azs = azs.unwrap_or(settings.azs);
            let tail_label = if no_tail {
                None
            } else {
                tail_label.or(settings.tail_label)
            };
            let (vpc, plan) = plan_from_pairs(&vpc, &subnets, azs, tail_label.as_deref())?;
            match format {
                Format::Csv => plan_print(&vpc, &plan, show_gaps)?,
                Format::Json => write_plan_json(&mut std::io::stdout().lock(), &plan)?,
                Format::Summary => {
                    for line in plan_summary(&plan, tail_label.as_deref()) {
                        println!("{line}");
                    }
                }
            }
        }
        Command::Event { file, dry_run } => {
            let response = process_event_file(&file, &settings, dry_run).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
