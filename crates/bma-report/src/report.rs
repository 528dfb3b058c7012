//! Markdown report rendering.

use std::fmt::Write;

use bma_models::BrandAnalysis;

/// Render the shareable report for one analysis.
pub fn render_markdown(analysis: &BrandAnalysis) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail; unwraps via the macro are safe.
    let _ = writeln!(out, "# Brand Compatibility Analysis Report\n");
    let _ = writeln!(out, "Video: `{}`\n", analysis.video_url);

    let _ = writeln!(out, "## Content Overview\n");
    let _ = writeln!(out, "**Style:** {}\n", analysis.content_style);
    let _ = writeln!(out, "**Main themes:**\n");
    for theme in &analysis.themes {
        let _ = writeln!(out, "- {theme}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Values & Tone\n");
    let _ = writeln!(out, "**Values:**\n");
    for value in &analysis.values_tone.values {
        let _ = writeln!(out, "- {value}");
    }
    let _ = writeln!(out, "\n**Tone:** {}\n", analysis.values_tone.tone);

    let _ = writeln!(out, "## Audience\n");
    let _ = writeln!(out, "| | |");
    let _ = writeln!(out, "|---|---|");
    let _ = writeln!(out, "| Age range | {} |", analysis.audience.age_range);
    let _ = writeln!(out, "| Gender | {} |", analysis.audience.gender);
    let _ = writeln!(out, "| Location | {} |", analysis.audience.geography);
    let _ = writeln!(out, "\n**Interests:**\n");
    for interest in &analysis.audience.interests {
        let _ = writeln!(out, "- {interest}");
    }
    let _ = writeln!(out, "\n**Engagement:** {}\n", analysis.engagement);

    let _ = writeln!(out, "## Platforms & Collaborations\n");
    let _ = writeln!(out, "**Main platforms:**\n");
    for platform in &analysis.platforms {
        let _ = writeln!(out, "- {platform}");
    }
    let _ = writeln!(
        out,
        "\n**Previous collaborations:** {}\n",
        analysis.prior_collaborations
    );

    let _ = writeln!(out, "## Market Niches\n");
    for niche in &analysis.market_niches {
        let _ = writeln!(out, "- {niche}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Brand Matches\n");
    for brand_match in &analysis.brand_matches {
        let _ = writeln!(out, "### {}\n", brand_match.brand_type);
        let _ = writeln!(out, "**Examples:**\n");
        for example in &brand_match.examples {
            let _ = writeln!(out, "- {example}");
        }
        let _ = writeln!(out, "\n**Justification:** {}\n", brand_match.justification);
    }

    let _ = writeln!(out, "## Recommended Collaboration Types\n");
    for kind in &analysis.collaboration_types {
        let _ = writeln!(out, "- {kind}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Brand Image Considerations\n");
    let _ = writeln!(out, "{}", analysis.brand_image_notes);

    out
}
