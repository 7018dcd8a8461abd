//! `settings`: effective configuration and the config file.

use std::io::Write;
use std::path::PathBuf;

use comfy_table::Cell;
use tracing::info;

use super::{Context, Outcome};
use crate::cli::SettingsCommands;
use crate::config::{AppConfig, OutputFormat};
use crate::error::{AppError, AppResult};
use crate::render;

pub fn run(action: SettingsCommands, ctx: &Context, out: &mut impl Write) -> AppResult<Outcome> {
    match action {
        SettingsCommands::Show => show(ctx, out)?,
        SettingsCommands::Init { force } => init(ctx, force, out)?,
    }
    Ok(Outcome::Done)
}

fn config_path(ctx: &Context) -> AppResult<PathBuf> {
    ctx.config_path
        .clone()
        .or_else(AppConfig::default_config_path)
        .ok_or_else(|| AppError::config("Could not determine config directory"))
}

fn show(ctx: &Context, out: &mut impl Write) -> AppResult<()> {
    let config = &ctx.config;
    let display = |path: Option<PathBuf>| {
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    let rows = [
        ("config_file", display(config_path(ctx).ok())),
        (
            "database_path",
            display(
                config
                    .database
                    .path
                    .clone()
                    .or_else(AppConfig::default_database_path),
            ),
        ),
        ("fuel_price", render::amount(config.defaults.fuel_price)),
        (
            "electricity_price",
            render::amount(config.defaults.electricity_price),
        ),
        ("output_format", config.output.format.to_string()),
    ];

    match config.output.format {
        OutputFormat::Table => {
            let mut table = render::new_table();
            table.set_header(vec!["Setting", "Value"]);
            for (key, value) in rows {
                table.add_row(vec![Cell::new(key), Cell::new(value)]);
            }
            writeln!(out, "{table}")?;
        }
        OutputFormat::Json => render::write_json(out, config)?,
        OutputFormat::Csv => {
            writeln!(out, "setting,value")?;
            for (key, value) in rows {
                writeln!(out, "{key},{}", render::csv_field(&value))?;
            }
        }
    }
    Ok(())
}

fn init(ctx: &Context, force: bool, out: &mut impl Write) -> AppResult<()> {
    let path = config_path(ctx)?;

    if path.exists() && !force {
        return Err(AppError::invalid_input(format!(
            "Config file already exists: {}. Use --force to overwrite",
            path.display()
        )));
    }

    let written = ctx.config.save(Some(&path))?;
    info!(path = %written.display(), "Config file written");
    writeln!(out, "Wrote {}", written.display())?;
    Ok(())
}
