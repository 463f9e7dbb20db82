//! Build design tokens from the styling configuration

use anyhow::Result;

use crate::tokens::{TokenBuilder, TokenSummary};
use crate::Site;

/// Run the token build and print what it produced
pub fn run(site: &Site) -> Result<TokenSummary> {
    let summary = TokenBuilder::for_site(site).build()?;
    print!("{}", report(&summary));
    Ok(summary)
}

fn report(summary: &TokenSummary) -> String {
    let mut out = String::from("Design tokens generated successfully!\n");
    if summary.groups.is_empty() {
        out.push_str("No extended theme groups found\n");
    } else {
        out.push_str(&format!("Generated groups: {}\n", summary.groups.join(", ")));
    }

    for (label, count) in [
        ("Colors", summary.colors),
        ("Spacing", summary.spacing),
        ("Font sizes", summary.font_sizes),
    ] {
        if let Some(count) = count {
            out.push_str(&format!("  {}: {}\n", label, count));
        }
    }

    out.push_str(&format!(
        "{} tokens written to {} files\n",
        summary.token_count,
        summary.written.len()
    ));
    out
}
