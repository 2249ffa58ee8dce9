use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = lexa_bot::Args::parse();
	lexa_bot::run(args).await
}
