use crate::portfolio::{distinct_technologies, PortfolioData};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Render the system context the completion model answers from.
///
/// The document is the grounding contract: it enumerates every project,
/// post, and profile fact the model may reference, and the response
/// guidelines forbid answering from anything else. Deterministic for a
/// given snapshot.
#[must_use]
pub fn build_context(data: &PortfolioData) -> String {
    let profile = &data.profile;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "You are the portfolio assistant for {name}'s website. You help visitors \
         learn about {name}'s work, skills, experience, and background.",
        name = profile.name
    );
    out.push('\n');
    out.push_str(
        "IMPORTANT: Base ALL your answers on the portfolio data provided below. \
         Do not make up projects, blog posts, or personal details that are not listed.\n\n",
    );

    let _ = writeln!(out, "=== ABOUT {} ===\n", profile.name.to_uppercase());
    let _ = writeln!(out, "Name: {}", profile.name);
    let _ = writeln!(out, "Title: {}", profile.title);
    let _ = writeln!(out, "Location: {}", profile.location);
    let _ = writeln!(out, "Experience: {}", profile.experience);
    let _ = writeln!(out, "Specialization: {}", profile.specialization);
    let _ = writeln!(out, "Passion: {}", profile.passion);
    let _ = writeln!(out, "\nBackground:\n{}", profile.background);
    let _ = writeln!(out, "\nCareer Journey:\n{}", profile.career_journey);
    let _ = writeln!(out, "\nEducation: {}", profile.education);
    let _ = writeln!(out, "\nInterests: {}", profile.interests.join(", "));
    out.push_str("\nKey Achievements:\n");
    for achievement in &profile.achievements {
        let _ = writeln!(out, "- {achievement}");
    }

    out.push_str("\n=== PORTFOLIO DATA ===\n\n");

    let _ = writeln!(out, "PROJECTS ({} total):", data.projects.len());
    for (index, project) in data.projects.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", index + 1, project.title);
        let _ = writeln!(out, "   - Slug: {}", project.slug);
        let _ = writeln!(out, "   - Description: {}", project.description);
        let _ = writeln!(
            out,
            "   - Technologies: {}",
            join_or(&project.technologies, "Not specified")
        );
        let _ = writeln!(
            out,
            "   - Date: {}",
            format_date(project.project_date.or(project.created_at))
        );
        let _ = writeln!(
            out,
            "   - GitHub: {}",
            project.github_url.as_deref().unwrap_or("Not available")
        );
        let _ = writeln!(
            out,
            "   - Live Demo: {}",
            project.live_demo_url.as_deref().unwrap_or("Not available")
        );
    }

    let _ = writeln!(out, "\nBLOG POSTS ({} total):", data.blog_posts.len());
    for (index, post) in data.blog_posts.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", index + 1, post.title);
        let _ = writeln!(out, "   - Slug: {}", post.slug);
        let _ = writeln!(out, "   - Excerpt: {}", post.excerpt);
        let _ = writeln!(out, "   - Tags: {}", join_or(&post.tags, "No tags"));
        let _ = writeln!(out, "   - Published: {}", format_date(post.published_at));
        let _ = writeln!(out, "   - Read Time: {} minutes", post.read_time_minutes);
    }

    if let Some(about) = &data.about {
        let _ = writeln!(out, "\nABOUT PAGE:\n{}", about.body);
    }

    out.push_str("\n=== RESPONSE GUIDELINES ===\n\n");
    out.push_str(
        "1. ONLY discuss projects, blog posts, and personal information listed above\n",
    );
    let _ = writeln!(
        out,
        "2. When asked about {name}, use the personal information in the ABOUT section",
        name = profile.name
    );
    out.push_str(
        "3. When asked about projects, reference the actual titles and descriptions from the data\n\
         4. For blog posts, mention actual titles, tags, and topics covered\n\
         5. If asked about something not in the data, say \"I don't have information about that \
         in the current portfolio\"\n\
         6. When suggesting projects or posts, only mention ones that exist in the data above\n\
         7. Use the actual technology stacks, dates, and descriptions provided\n",
    );

    let technologies = distinct_technologies(&data.projects);
    if !technologies.is_empty() {
        let _ = writeln!(
            out,
            "\nSKILLS INFERRED FROM PROJECTS:\n{name} has experience with: {}",
            technologies.join(", "),
            name = profile.name
        );
    }

    out.push_str("\nCONTACT & SERVICES:\n");
    let _ = writeln!(
        out,
        "- Available for: {}",
        join_or(&profile.contact.available_for, "inquiries")
    );
    out.push_str("- Contact through the portfolio's contact form\n");

    out
}

fn join_or(values: &[String], fallback: &str) -> String {
    if values.is_empty() {
        fallback.to_string()
    } else {
        values.join(", ")
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(
        || "Not specified".to_string(),
        |date| date.format("%Y-%m-%d").to_string(),
    )
}
