use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use picture2pass_core::consts::{
    DEFAULT_GROUNDING_PROMPT, DEFAULT_LAYOUT_PROMPT, DEFAULT_MAX_PICTURES_PER_PAGE,
};
use picture2pass_core::inference::dots::DotsClient;
use picture2pass_core::parse::parser::{PageParser, ParserConfig};

#[derive(Parser)]
#[command(name = "process")]
#[command(about = "Two-pass layout OCR with hierarchical picture-text merging")]
struct Args {
    #[arg(help = "Input image or rasterized PDF page")]
    image: PathBuf,

    #[arg(long, default_value = DEFAULT_LAYOUT_PROMPT)]
    layout_prompt: String,

    #[arg(long, default_value = DEFAULT_GROUNDING_PROMPT)]
    grounding_prompt: String,

    #[arg(
        long,
        default_value_t = DEFAULT_MAX_PICTURES_PER_PAGE,
        help = "Hard cap on grounding passes for one page"
    )]
    max_pictures_per_page: usize,

    #[arg(long, help = "Keep duplicate picture-text fragments")]
    no_dedup: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    info!("Processing {}", args.image.display());

    let client = DotsClient::from_env()?;
    let config = ParserConfig {
        layout_prompt: args.layout_prompt,
        grounding_prompt: args.grounding_prompt,
        max_pictures_per_page: args.max_pictures_per_page,
        dedup: !args.no_dedup,
        ..Default::default()
    };
    let parser = PageParser::new(client.clone(), client, config);

    let document = parser.process_page(&args.image).await?;
    println!("{}", serde_json::to_string(&document)?);

    Ok(())
}
