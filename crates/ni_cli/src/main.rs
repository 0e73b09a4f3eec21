use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use ni_core::query::answer;
use ni_core::state::{Status, View};
use ni_core::{CompanyName, Language};
use ni_inference::{create_providers, AnalysisPipeline, Config, ProviderKind, SearchSession};
use ni_web::{create_app, AppState};
use tracing::info;

mod logging;
mod render;

#[derive(Parser, Debug)]
#[command(author, version, about = "News sentiment analysis for a company", long_about = None)]
pub struct Cli {
    #[arg(long, help = "Provider to use. Available providers: mock (default), http")]
    provider: Option<ProviderKind>,
    #[arg(long, help = "News/sentiment backend URL for the http provider")]
    backend_url: Option<String>,
    #[arg(long, help = "Speech synthesis backend URL for the http provider")]
    tts_url: Option<String>,
    #[arg(long, help = "Simulated latency of the mock provider in milliseconds")]
    latency_ms: Option<u64>,
    #[arg(long, help = "Narration language: hi (default), en")]
    language: Option<Language>,
    #[arg(long, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Analyze news sentiment for a company
    Analyze {
        company: String,
        /// Which tab to print: articles, chart or query
        #[arg(long, default_value = "articles")]
        view: View,
        /// Print the raw analysis result as JSON
        #[arg(long)]
        json: bool,
        /// Skip the narration step
        #[arg(long)]
        no_audio: bool,
    },
    /// Ask a question about a company's news analysis
    Query {
        company: String,
        question: String,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: String,
    },
}

impl Cli {
    fn config(&self) -> anyhow::Result<Config> {
        self.apply_overrides(Config::from_env()?)
    }

    /// Flags win over the environment; validation runs on the merged result.
    fn apply_overrides(&self, mut config: Config) -> anyhow::Result<Config> {
        if let Some(provider) = self.provider {
            config.provider = provider;
        }
        if let Some(url) = &self.backend_url {
            config.backend_url = Some(url.clone());
        }
        if let Some(url) = &self.tts_url {
            config.narration_url = Some(url.clone());
        }
        if let Some(ms) = self.latency_ms {
            config = config.with_latency(Duration::from_millis(ms));
        }
        if let Some(language) = self.language {
            config.language = language;
        }
        config.validate()?;
        Ok(config)
    }
}

async fn analyze(pipeline: AnalysisPipeline, company: &str, view: View, json: bool, no_audio: bool) -> anyhow::Result<()> {
    let (company, result) = if no_audio {
        let company = CompanyName::parse(company)?;
        let result = pipeline.fetch(&company).await?;
        (company, result)
    } else {
        let session = SearchSession::new(pipeline);
        session.submit(company).await?;
        info!("⏳ Analyzing news for {}...", company.trim());
        session.wait().await;

        let state = session.snapshot().await;
        if let Some(notice) = &state.notice {
            eprintln!("{}", render::notice(notice));
        }
        match (state.status, state.result, state.company_name) {
            (Status::Ready, Some(result), Some(company)) => (company, result),
            _ => bail!("analysis for {} did not complete", company.trim()),
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    println!("{}", render::summary_card(company.as_str(), &result));
    println!("{}", render::view(&result, view));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    let config = cli.config()?;
    info!("⚙️ Using {} provider", config.provider);
    let language = config.language;
    let providers = create_providers(Some(config))?;
    let pipeline = AnalysisPipeline::new(providers, language);

    match cli.command {
        Commands::Analyze { company, view, json, no_audio } => {
            analyze(pipeline, &company, view, json, no_audio).await?;
        }
        Commands::Query { company, question } => {
            let company = CompanyName::parse(&company)?;
            let result = pipeline.fetch(&company).await?;
            println!("{}", answer(&result, &question).answer);
        }
        Commands::Serve { addr } => {
            let app = create_app(AppState::new(pipeline)).await;
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {}", addr))?;
            info!("🌐 Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from([
            "ni", "--latency-ms", "0", "--language", "en", "analyze", "Acme", "--view", "chart",
        ]);
        assert_eq!(cli.latency_ms, Some(0));
        assert_eq!(cli.language, Some(Language::English));
        match cli.command {
            Commands::Analyze { company, view, json, no_audio } => {
                assert_eq!(company, "Acme");
                assert_eq!(view, View::Chart);
                assert!(!json);
                assert!(!no_audio);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_flags_complete_env_config() {
        let env = Config::from_lookup(|key| match key {
            "NI_PROVIDER" => Some("http".to_string()),
            "NI_BACKEND_URL" => Some("not a url".to_string()),
            _ => None,
        })
        .unwrap();
        let cli = Cli::parse_from([
            "ni",
            "--backend-url",
            "http://localhost:9000",
            "--tts-url",
            "http://localhost:9001",
            "serve",
        ]);
        let config = cli.apply_overrides(env.clone()).unwrap();
        assert_eq!(config.provider, ProviderKind::Http);
        assert_eq!(config.backend_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.narration_url.as_deref(), Some("http://localhost:9001"));

        let bare = Cli::parse_from(["ni", "serve"]);
        assert!(bare.apply_overrides(env).is_err());
    }

    #[test]
    fn test_rejects_unknown_provider() {
        assert!(Cli::try_parse_from(["ni", "--provider", "ollama", "serve"]).is_err());
    }

    #[tokio::test]
    async fn test_analyze_with_mock() {
        let config = Config::default().with_latency(Duration::ZERO);
        let pipeline = AnalysisPipeline::new(create_providers(Some(config)).unwrap(), Language::English);
        analyze(pipeline, "Acme", View::Chart, false, false).await.unwrap();
    }

    #[tokio::test]
    async fn test_analyze_blank_company() {
        let config = Config::default().with_latency(Duration::ZERO);
        let pipeline = AnalysisPipeline::new(create_providers(Some(config)).unwrap(), Language::English);
        assert!(analyze(pipeline, " ", View::Articles, true, true).await.is_err());
    }
}
