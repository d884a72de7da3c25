use anyhow::Result;
use serde::Serialize;

use embedres::{select_render_mode, EmbedConfig, EmbedDescriptor, RenderMode, ResolvedEmbed, Resolver};

use super::output::print_resolution;

#[derive(Serialize)]
struct ResolveReport<'a> {
    descriptor: Option<&'a EmbedDescriptor>,
    resolved: &'a ResolvedEmbed,
    render_mode: &'a RenderMode,
}

/// Build a descriptor from mutually exclusive CLI flags.
pub fn descriptor_from_args(
    player_url: Option<String>,
    iframe: Option<String>,
    bvid: Option<String>,
    page: Option<u32>,
) -> Option<EmbedDescriptor> {
    if let Some(id) = bvid {
        return Some(EmbedDescriptor::bilibili(id, page));
    }
    if let Some(url) = player_url {
        return Some(EmbedDescriptor::player_url(url));
    }
    iframe.map(EmbedDescriptor::iframe)
}

pub fn cmd_resolve(
    config: &EmbedConfig,
    descriptor: Option<&EmbedDescriptor>,
    src: Option<&str>,
    json: bool,
) -> Result<()> {
    let resolver = Resolver::from_config(config);
    let resolved = resolver.normalize(descriptor, src);
    let render_mode = select_render_mode(&resolved, src);

    if json {
        let report = ResolveReport {
            descriptor,
            resolved: &resolved,
            render_mode: &render_mode,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_resolution(&resolved, &render_mode);
    Ok(())
}
