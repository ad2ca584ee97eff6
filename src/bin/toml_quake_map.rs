use clap::Parser;
use quake_map::core::composer::compose_session;
use quake_map::core::ConfigProvider;
use quake_map::utils::error::ErrorSeverity;
use quake_map::utils::{logger, validation::Validate};
use quake_map::{LocalStorage, MapEngine, MapSession, QuakeMapPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-quake-map")]
#[command(about = "Earthquake map generator driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "quake-map.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the output directory from config
    #[arg(long)]
    output_path: Option<String>,

    /// Dry run - show the composed map without fetching any data
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based quake-map");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(path) = args.output_path {
        tracing::info!("🔧 Output path overridden to: {}", path);
        config.output.path = path;
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No data will be fetched");
        display_session_summary(&config, &compose_session(&config));
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = QuakeMapPipeline::new(storage, config);
    let engine = MapEngine::new(pipeline);
    tracing::info!("📁 Output directory: {}", engine.pipeline().config().output_path());

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Map generated successfully!");
            println!("📁 Open {} in a browser", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Map generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_session_summary(config: &TomlConfig, session: &MapSession) {
    let view = session.view();
    println!("📋 Map Summary:");
    println!("   Variant: {:?}", config.variant());
    println!(
        "   Center: {}, {} (zoom {})",
        view.center.lat, view.center.lng, view.zoom
    );
    println!("   Earthquakes: {}", config.earthquakes_url());
    if config.variant().includes_plates() {
        println!("   Plates: {}", config.plates_url());
    }
    println!("   Output: {}", config.output_path());

    if let Some(active) = session.active_base_layer() {
        println!("   Active base layer: {}", active.name);
    }

    println!("🗺️  Base layers:");
    for layer in session.base_layers() {
        println!("   - {}", layer.name);
    }

    println!("🧩 Overlays:");
    for overlay in session.overlays() {
        let state = if overlay.visible { "shown" } else { "hidden" };
        println!("   - {} ({})", overlay.name, state);
    }

    if let Some(control) = session.layer_control() {
        println!(
            "🎛️  Layer control: {} base / {} overlays",
            control.base_layers.len(),
            control.overlays.len()
        );
    }

    if let Some(legend) = session.legend() {
        let labels: Vec<&str> = legend.rows.iter().map(|r| r.label.as_str()).collect();
        println!("🎨 Legend: {} [{}]", legend.title, labels.join(", "));
    }
}
