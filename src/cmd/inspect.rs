use std::path::Path;

use anyhow::{Context, Result};

use embedres::view::Presentation;
use embedres::{ContentFeed, EmbedConfig, Resolver};

use super::output::{print_resolution, truncate_text};

pub fn cmd_inspect(config: &EmbedConfig, file: &Path, slug: &str, json: bool) -> Result<()> {
    let feed = ContentFeed::load(file)
        .with_context(|| format!("failed to load content feed {}", file.display()))?;

    let Some(item) = feed.find(slug) else {
        anyhow::bail!(
            "No item with slug or id {slug:?} in {} ({} items)",
            file.display(),
            feed.len()
        );
    };

    let resolver = Resolver::from_config(config);
    let presentation = Presentation::build(&resolver, item, &config.content.placeholder_poster);

    if json {
        println!("{}", serde_json::to_string_pretty(&presentation)?);
        return Ok(());
    }

    println!("🎬 {}", presentation.title);
    if let Some(excerpt) = item.excerpt.as_deref() {
        println!("   {}", truncate_text(excerpt, 80));
    }
    println!("   Identity: {}", presentation.identity);
    println!("   Poster:   {}", presentation.poster_url);
    if !item.tags.is_empty() {
        println!("   Tags:     {}", item.tags.join(", "));
    }
    println!();
    print_resolution(&presentation.resolved, &presentation.render_mode);

    let paragraphs = item.body_paragraphs();
    if !paragraphs.is_empty() {
        println!("\n📄 Body: {} paragraphs", paragraphs.len());
    }

    Ok(())
}
