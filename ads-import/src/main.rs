use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

mod campaign;
mod error;
mod sheet;

use campaign::{ConvertOptions, Preset, DEFAULT_BASE_URL};

/// Turns the marketing team's campaign template into Google Ads Editor
/// import files.
#[derive(Parser, Debug)]
#[command(name = "ads-import", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one template with an explicit landing URL and replacements
    Convert {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, env = "ADS_IMPORT_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,
        /// Text substitution applied to every cell, as OLD=NEW (repeatable)
        #[arg(long = "replace", value_parser = parse_replacement)]
        replacements: Vec<(String, String)>,
    },
    /// Generate one import file per city preset
    Presets {
        input: PathBuf,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Presets to build; all of them when omitted
        #[arg(long = "preset", value_enum)]
        presets: Vec<Preset>,
    },
}

fn parse_replacement(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((old, new)) if !old.is_empty() => Ok((old.to_string(), new.to_string())),
        _ => Err(format!("expected OLD=NEW, got {:?}", raw)),
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Convert { input, output, base_url, replacements } => {
            let options = ConvertOptions { base_url, replacements };
            let written = campaign::convert_file(&input, &output, &options)
                .with_context(|| format!("failed to convert {}", input.display()))?;
            println!("Generated {} with {} ads", output.display(), written);
        }
        Command::Presets { input, out_dir, presets } => {
            let presets = if presets.is_empty() { Preset::ALL.to_vec() } else { presets };
            for preset in presets {
                tracing::info!("Generating {} campaign...", preset.name());
                let output = out_dir.join(preset.output_file_name());
                let written = campaign::convert_file(&input, &output, &preset.options())
                    .with_context(|| format!("failed to build {} preset", preset.name()))?;
                println!("Generated {} with {} ads", output.display(), written);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run(Cli::parse().command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacement_pairs_parse() {
        assert_eq!(
            parse_replacement("Алматы=Ташкент"),
            Ok(("Алматы".to_string(), "Ташкент".to_string()))
        );
        assert_eq!(parse_replacement("a=b=c"), Ok(("a".to_string(), "b=c".to_string())));
        assert!(parse_replacement("novalue").is_err());
        assert!(parse_replacement("=x").is_err());
    }

    #[test]
    fn presets_command_writes_every_city() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("template.csv");
        std::fs::write(&input, "Campaign,Headline 1,Ссылка\nДолги Алматы,Помощь,\n").unwrap();

        run(Command::Presets {
            input,
            out_dir: dir.path().to_path_buf(),
            presets: Vec::new(),
        })
        .unwrap();

        let almaty = std::fs::read_to_string(dir.path().join("google_ads_almaty.csv")).unwrap();
        let tashkent = std::fs::read_to_string(dir.path().join("google_ads_tashkent.csv")).unwrap();
        assert!(almaty.contains("Долги Алматы;"));
        assert!(tashkent.contains("Долги Ташкент;"));
        assert!(tashkent.contains("https://uz.henrybonnar.com/?utm_source=google"));
    }

    #[test]
    fn cli_parses_repeated_replacements() {
        let cli = Cli::try_parse_from([
            "ads-import", "convert", "in.csv", "out.csv",
            "--base-url", "https://example.kz/",
            "--replace", "a=b", "--replace", "c=d",
        ])
        .unwrap();
        match cli.command {
            Command::Convert { base_url, replacements, .. } => {
                assert_eq!(base_url, "https://example.kz/");
                assert_eq!(replacements.len(), 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
