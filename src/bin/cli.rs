use clap::{Parser, Subcommand};
use std::path::PathBuf;
use video_seo_engine::{EngineConfig, SeoEngine, NO_DATA};

#[derive(Parser)]
#[command(name = "seo-engine-cli")]
#[command(about = "Video SEO keyword ranking CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank keywords by SEO opportunity
    Rank {
        /// Keywords to score
        #[arg(required = true)]
        keywords: Vec<String>,

        /// Videos sampled per keyword
        #[arg(short, long)]
        max_results: Option<u32>,
    },

    /// Show statistics for a video URL
    Analyze {
        /// Watch or share URL
        url: String,
    },

    /// Transcribe an .mp4, extract keywords and rank them
    Process {
        /// Path to the video
        video: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "video_seo_engine=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let engine = SeoEngine::new(EngineConfig::from_env()).await?;

    match cli.command {
        Commands::Rank { keywords, max_results } => {
            println!("🔍 Ranking {} keywords", keywords.len());

            let report = engine.rank_keywords(&keywords, max_results).await;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report.rankings)?);
            } else if report.rankings.is_empty() {
                println!("\n❌ No rankings (is YOUTUBE_API_KEY set?)");
            } else {
                println!("\n📋 Rankings:");
                for entry in &report.rankings {
                    println!("   {}", entry.display());
                }
            }
        }

        Commands::Analyze { url } => {
            let analytics = engine.analyze(&url).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&analytics)?);
            } else {
                let na = || NO_DATA.to_string();
                println!("\n📊 {}", analytics.title.clone().unwrap_or_else(na));
                println!("   Views: {}", analytics.views.map(|v| v.to_string()).unwrap_or_else(na));
                println!("   Likes: {}", analytics.likes.map(|v| v.to_string()).unwrap_or_else(na));
                println!("   Comments: {}", analytics.comments.map(|v| v.to_string()).unwrap_or_else(na));
                println!("   Published: {}", analytics.published.clone().unwrap_or_else(na));
            }
        }

        Commands::Process { video } => {
            println!("🎥 Processing {}", video.display());

            let report = engine.process_video(&video).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("\n🔑 Keywords: {}", report.keywords.join(", "));
                println!("\n📝 Description:\n   {}", report.seo_description);
                println!("\n📋 Rankings:");
                for entry in &report.rankings {
                    println!("   {}", entry.display());
                }
                println!("\n   Latency: {:.2}ms", report.latency_ms);
            }
        }
    }

    Ok(())
}
