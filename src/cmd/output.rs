use embedres::{RenderMode, ResolvedEmbed};

pub fn print_resolution(resolved: &ResolvedEmbed, render_mode: &RenderMode) {
    match resolved {
        ResolvedEmbed::Embeddable {
            player_url,
            page_url,
        } => {
            println!("✅ Embeddable");
            println!("   Player: {player_url}");
            println!("   Page:   {}", page_url.as_deref().unwrap_or("-"));
        }
        ResolvedEmbed::Unresolved => {
            println!("❌ Unresolved");
        }
    }

    match render_mode {
        RenderMode::UseIframe(src) => println!("   Render: iframe {src}"),
        RenderMode::UseNativeMedia(src) => println!("   Render: native {src}"),
        RenderMode::NoPlayableSource => println!("   Render: no playable source"),
    }
}

pub fn truncate_text(text: &str, max_len: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
