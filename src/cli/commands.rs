// ABOUTME: Implementation of individual CLI commands
// ABOUTME: Handles rendering, listing, checking templates, and the built-in pages

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

use super::args::Args;
use super::config::AppConfig;
use crate::handlers::Pages;
use crate::render::{RenderEngine, StaticDefaults, TemplateData};
use crate::template::TemplateStore;

/// Build the rendering engine described by `config`
pub fn build_engine(config: &AppConfig, use_cache: bool) -> RenderEngine {
    RenderEngine::new(&config.templates, use_cache)
        .with_defaults(StaticDefaults::new(config.defaults.clone()))
}

/// Render a single template
pub fn render_template(
    name: String,
    vars: Vec<String>,
    data: Option<PathBuf>,
    output: Option<PathBuf>,
    no_cache: bool,
    config: &AppConfig,
) -> Result<()> {
    let mut payload = match data {
        Some(path) => {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Cannot read payload {}", path.display()))?;
            serde_json::from_str::<TemplateData>(&contents)
                .with_context(|| format!("Invalid payload in {}", path.display()))?
        }
        None => TemplateData::new(),
    };
    payload.extend_strings(Args::parse_variables(&vars)?);

    let engine = build_engine(config, config.use_cache && !no_cache);

    let written = match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Cannot create {}", path.display()))?;
            let mut sink = BufWriter::new(file);
            engine.try_render(&mut sink, &name, &payload)?
        }
        None => {
            let stdout = io::stdout();
            let mut sink = stdout.lock();
            engine.try_render(&mut sink, &name, &payload)?
        }
    };

    info!("Rendered {} ({} bytes)", name, written);
    Ok(())
}

/// Print every page template name found in the templates directory
pub fn list_templates(config: &AppConfig) -> Result<()> {
    let store = TemplateStore::from_config(&config.templates);
    let names = store.discover_page_fragments()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for name in names {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

/// Compile every page template with its layouts
pub fn check_templates(config: &AppConfig) -> Result<()> {
    let store = TemplateStore::from_config(&config.templates);
    let compiled = store
        .compile_all()
        .with_context(|| format!("Templates in {} do not compile", store.location()))?;

    let mut names: Vec<_> = compiled.keys().collect();
    names.sort();

    for name in &names {
        let layouts = compiled[*name].layouts();
        if layouts.is_empty() {
            println!("✓ {}", name);
        } else {
            println!("✓ {} (layouts: {})", name, layouts.join(", "));
        }
    }
    println!("{} template(s) compiled", names.len());
    Ok(())
}

/// Render the home and about pages to stdout
pub fn render_pages(config: &AppConfig) -> Result<()> {
    let engine = build_engine(config, config.use_cache);
    let pages = Pages::new(&engine);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    pages.home(&mut out);
    writeln!(out)?;
    pages.about(&mut out);
    writeln!(out)?;
    Ok(())
}
