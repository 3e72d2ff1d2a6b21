use anyhow::Result;
use clap::{ColorChoice, Parser};
use svg_icon::{
    cli::{self, Cli, Commands},
    config::IconConfig,
    logger,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = IconConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { args } => cli::build::build_components(&config, args).map(|_| ()),
        Commands::Sprite { args } => cli::sprite::run_sprite(&config, args),
        Commands::Inline { args } => {
            println!("{}", cli::inspect::inline_json(&config, args)?);
            Ok(())
        }
        Commands::Render { args } => {
            println!("{}", cli::inspect::render_markup(&config, args)?);
            Ok(())
        }
        Commands::Id { args } => {
            println!("{}", cli::inspect::identity_line(&config, args)?);
            Ok(())
        }
    }
}
