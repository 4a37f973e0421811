mod output;

use std::net::SocketAddr;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use pulseboard::api::{self, build_http_client};
use pulseboard::config::{self, PulseConfig, DEFAULT_HOST, DEFAULT_PORT};
use pulseboard::dashboard::views::RegionPanel;
use pulseboard::dashboard::{metro_fallback, state_fallback, Dashboard, SampleData, Section};
use pulseboard::models::{rank_by_interest, AppState, FetchResult, Resolution};
use pulseboard::routes::build_router;

#[derive(Parser)]
#[command(
    name = "pulse",
    author,
    version,
    about = "Voice of the Patient Pulseboard",
    long_about = r#"Pulseboard: patient-voice dashboard data from the command line.

Shows the dashboard sections (sample feedback, telehealth visit trends, topic
mentions) and the two live lookups: OpenFDA adverse events and
search interest by region. Live lookups degrade to placeholder data when the
upstream service is throttling or unavailable.

Examples:
  1) List sections:
      pulse sections
  2) Show one section:
      pulse show care-access-map
  3) Serve every section as JSON:
      pulse serve --port 8501
"#,
    after_help = "Use `pulse <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List dashboard sections
    Sections,
    /// Render one section
    #[command(about = "Render one dashboard section", long_about = "Render a section by slug (see `pulse sections`). Live sections call the remote services inline.")]
    Show {
        slug: String,
        /// Print the JSON payload instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Look up adverse-event reports for a drug
    #[command(about = "Look up OpenFDA adverse-event reports", long_about = "Query the OpenFDA drug event endpoint once for the given drug and print the reported reactions.")]
    DrugEvents {
        #[arg(long)]
        drug: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Look up search interest by region
    #[command(about = "Look up search interest by region", long_about = "Query the trends service for a keyword at state or metro resolution. Failures fall back to placeholder rows with a banner explaining why.")]
    RegionInterest {
        #[arg(long)]
        keyword: Option<String>,
        /// state or metro
        #[arg(long, default_value = "state")]
        resolution: String,
        /// Only show the top N rows
        #[arg(long)]
        top: Option<usize>,
    },
    /// Serve sections as JSON over HTTP
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Validate configuration
    #[command(about = "Validate configuration", long_about = "Print the resolved configuration and check it. With --ping, also try both remote services once.")]
    CheckConfig {
        #[arg(long)]
        ping: bool,
    },
}

fn build_dashboard(config: &PulseConfig) -> Dashboard {
    let client = match build_http_client(config.http_timeout()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(%e, "Failed to create HTTP client");
            eprintln!("{}: {}", yansi::Paint::red("Failed to create HTTP client"), e);
            process::exit(1);
        }
    };
    Dashboard::new(config, client, SampleData::load())
}

async fn start_server(state: AppState, host: &str, port: u16) {
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };
    let app = build_router(state);
    tracing::info!(%addr, "Starting Pulseboard server");
    println!("{} {}", yansi::Paint::new("Dashboard API running on").green(), yansi::Paint::new(format!("http://{}/api/sections", addr)).cyan());
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!("{}: {}\n{}", yansi::Paint::new(format!("Failed to bind to {}", addr)).red(), e, yansi::Paint::new("Please stop any process using this port, or start the server with a different --port value.").yellow());
            process::exit(1);
        }
    }
}

/// Problems that make a configuration unusable.
fn config_problems(config: &PulseConfig) -> Vec<String> {
    let mut problems = Vec::new();
    for (key, url) in [
        ("OPENFDA_BASE_URL", &config.openfda_base_url),
        ("TRENDS_BASE_URL", &config.trends_base_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            problems.push(format!("{} must start with http:// or https:// (got '{}')", key, url));
        }
    }
    if config.event_limit == 0 {
        problems.push("PULSE_EVENT_LIMIT must be greater than zero".to_string());
    }
    if config.http_timeout_secs == 0 {
        problems.push("HTTP_TIMEOUT_SECS must be greater than zero".to_string());
    }
    problems
}

fn describe<T>(result: &FetchResult<T>) -> String {
    match result {
        FetchResult::Success(_) => yansi::Paint::new("ok").green().to_string(),
        FetchResult::RateLimited => yansi::Paint::new("rate limited").yellow().to_string(),
        FetchResult::Unavailable(reason) => yansi::Paint::new(format!("unavailable ({})", reason)).red().to_string(),
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // CLI parsing
    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::set_silent(true);
    }

    config::load_env_file(cli.env_file.as_deref());
    let config = PulseConfig::from_env();

    // No subcommand: serve on the defaults
    let command = cli.command.unwrap_or(Commands::Serve {
        host: DEFAULT_HOST.to_string(),
        port: DEFAULT_PORT,
    });

    match command {
        Commands::Sections => {
            println!("{}", yansi::Paint::new("slug\ttitle\tlive").bold().underline());
            for s in Section::all() {
                println!("{}\t{}\t{}", s.slug(), s.title(), if s.is_live() { "yes" } else { "no" });
            }
        }
        Commands::Show { slug, json } => {
            let section = match slug.parse::<Section>() {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{} (try `pulse sections`)", yansi::Paint::new(e).red());
                    process::exit(1);
                }
            };
            if json {
                // Keep stdout clean for the JSON document
                api::set_silent(true);
            }
            let dashboard = build_dashboard(&config);
            let page = dashboard.render(section).await;
            if json {
                match serde_json::to_string_pretty(&page) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("{}: {}", yansi::Paint::new("Failed to serialize section").red(), e);
                        process::exit(1);
                    }
                }
            } else {
                output::print_page(&page);
            }
        }
        Commands::DrugEvents { drug, limit } => {
            let dashboard = build_dashboard(&config);
            let drug = drug.unwrap_or_else(|| config.drug.clone());
            let limit = limit.unwrap_or(config.event_limit);
            match dashboard.adverse_events(&drug, limit).await {
                FetchResult::Success(reports) => output::print_reports(&reports),
                FetchResult::RateLimited => {
                    eprintln!("{}", yansi::Paint::new("API limit reached or unavailable.").red());
                    process::exit(1);
                }
                FetchResult::Unavailable(reason) => {
                    eprintln!("{} {}", yansi::Paint::new("API limit reached or unavailable.").red(), yansi::Paint::new(reason).dim());
                    process::exit(1);
                }
            }
        }
        Commands::RegionInterest { keyword, resolution, top } => {
            let resolution = match resolution.parse::<Resolution>() {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("{}", yansi::Paint::new(e).red());
                    process::exit(1);
                }
            };
            let dashboard = build_dashboard(&config);
            let keyword = keyword.unwrap_or_else(|| config.keyword.clone());
            let result = dashboard.region_interest(&keyword, resolution).await;
            let mut panel = match resolution {
                Resolution::State => {
                    let latest = dashboard.samples().latest_visits();
                    RegionPanel::from_result(result, || state_fallback(latest))
                }
                Resolution::Metro => RegionPanel::from_result(result, metro_fallback),
            };
            if let Some(n) = top {
                panel.rows = rank_by_interest(&panel.rows, n);
            }
            output::print_region_panel(&format!("Interest in '{}' by {}", keyword, resolution), &panel);
        }
        Commands::Serve { host, port } => {
            let dashboard = build_dashboard(&config);
            let state = AppState::new(config, dashboard);
            start_server(state, &host, port).await;
        }
        Commands::CheckConfig { ping } => {
            println!("OPENFDA_BASE_URL  = {}", config.openfda_base_url);
            println!("TRENDS_BASE_URL   = {}", config.trends_base_url);
            println!("TRENDS_GEO        = {}", config.trends_geo);
            println!("PULSE_DRUG        = {}", config.drug);
            println!("PULSE_KEYWORD     = {}", config.keyword);
            println!("PULSE_EVENT_LIMIT = {}", config.event_limit);
            println!("HTTP_TIMEOUT_SECS = {}", config.http_timeout_secs);

            let problems = config_problems(&config);
            if !problems.is_empty() {
                for p in &problems {
                    eprintln!("{}", yansi::Paint::new(p).red());
                }
                process::exit(1);
            }

            if ping {
                api::set_silent(true);
                let dashboard = build_dashboard(&config);
                let events = dashboard.adverse_events(&config.drug, 1).await;
                let interest = dashboard.region_interest(&config.keyword, Resolution::State).await;
                println!("OpenFDA: {}", describe(&events));
                println!("Trends:  {}", describe(&interest));
            }
            println!("{}", yansi::Paint::new("Configuration looks valid").green());
        }
    }
}
