use crate::portfolio::{distinct_technologies, PortfolioData};
use std::fmt::Write;

/// Deterministic templated answers used when no completion model is
/// configured or the completion call fails.
///
/// Keyword families are checked in order against the lowercased message;
/// the first match wins. Every template draws only on the supplied
/// snapshot, so an empty portfolio can never produce an invented title.
#[must_use]
pub fn fallback_response(message: &str, data: &PortfolioData) -> String {
    let needle = message.to_lowercase();
    let profile = &data.profile;
    let name = &profile.name;
    let about_name = format!("about {}", name.to_lowercase());

    if contains_any(&needle, &["who is", "who are you"]) || needle.contains(&about_name) {
        let mut out = format!(
            "{name} is a {title} with {experience} of experience specializing in \
             {specialization}.\n\n{background}\n\nKey achievements include:\n",
            title = profile.title,
            experience = profile.experience,
            specialization = profile.specialization,
            background = profile.background,
        );
        for achievement in &profile.achievements {
            let _ = writeln!(out, "- {achievement}");
        }
        let _ = write!(
            out,
            "\n{name} is passionate about {passion} and is always interested in new \
             opportunities and collaborations!",
            passion = profile.passion
        );
        return out;
    }

    if contains_any(&needle, &["background", "experience", "career"]) {
        let mut out = format!(
            "{name}'s background: {journey}\n\nEducation: {education}",
            journey = profile.career_journey,
            education = profile.education,
        );
        let technologies = distinct_technologies(&data.projects);
        if !technologies.is_empty() {
            let preview: Vec<_> = technologies.iter().take(5).cloned().collect();
            let _ = write!(
                out,
                "\n\nWith expertise in technologies like {}, {name} brings strong \
                 technical skills to every project.",
                preview.join(", ")
            );
        }
        return out;
    }

    if contains_any(&needle, &["interest", "passion", "what do you like"]) {
        let mut out = format!("{name} is passionate about {}. Current interests include:\n\n", profile.passion);
        for interest in &profile.interests {
            let _ = writeln!(out, "- {interest}");
        }
        return out;
    }

    if contains_any(&needle, &["project", "built", "portfolio work"]) {
        if data.projects.is_empty() {
            return format!(
                "{name} has worked on several exciting projects, but I don't have \
                 detailed project information available right now. Please check back \
                 later or reach out through the contact form."
            );
        }
        let titles: Vec<_> = data
            .projects
            .iter()
            .map(|project| project.title.clone())
            .collect();
        return format!(
            "I can tell you about {name}'s projects! There are {count} projects \
             including: {titles}. Which one would you like to know more about?",
            count = data.projects.len(),
            titles = titles.join(", "),
        );
    }

    if contains_any(&needle, &["blog", "post", "article"]) {
        if data.blog_posts.is_empty() {
            return format!(
                "{name} writes about web development and technology. Check out the \
                 blog section for the latest articles!"
            );
        }
        let titles: Vec<_> = data
            .blog_posts
            .iter()
            .take(3)
            .map(|post| post.title.clone())
            .collect();
        return format!(
            "{name} has written {count} blog posts! Recent topics include: {titles}. \
             Would you like to know more about any of them?",
            count = data.blog_posts.len(),
            titles = titles.join(", "),
        );
    }

    if contains_any(&needle, &["technology", "tech", "skill"]) {
        let technologies = distinct_technologies(&data.projects);
        if technologies.is_empty() {
            return format!(
                "{name} specializes in {}. Check out the projects section to see the \
                 stack in use!",
                profile.specialization
            );
        }
        let preview: Vec<_> = technologies.iter().take(8).cloned().collect();
        return format!(
            "Based on {name}'s projects, the tech stack includes: {}. Always learning \
             new technologies too!",
            preview.join(", ")
        );
    }

    if contains_any(&needle, &["contact", "hire", "reach you"]) {
        return format!(
            "{name} would love to hear from you! The best way to reach out is through \
             the contact form on this site. Available for: {}.",
            data.profile.contact.available_for.join(", ")
        );
    }

    format!(
        "I'm {name}'s portfolio assistant! I can tell you about {name}'s background, \
         {projects} projects, {posts} blog posts, and skills. Explore the site for \
         details, or ask me something specific.",
        projects = data.projects.len(),
        posts = data.blog_posts.len(),
    )
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_content::{Profile, Project};

    fn data_with_projects(titles: &[&str]) -> PortfolioData {
        PortfolioData {
            profile: Profile::default(),
            projects: titles
                .iter()
                .map(|title| Project {
                    title: (*title).to_string(),
                    slug: title.to_lowercase(),
                    technologies: vec!["Rust".to_string()],
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn project_answer_names_real_projects() {
        let data = data_with_projects(&["Storefront", "Weather Board"]);
        let answer = fallback_response("Tell me about your projects", &data);
        assert!(answer.contains("Storefront"));
        assert!(answer.contains("Weather Board"));
    }

    #[test]
    fn empty_portfolio_never_invents_a_title() {
        let data = data_with_projects(&[]);
        let answer = fallback_response("Tell me about your projects", &data);
        assert!(answer.contains("check back later"));
        // The only proper noun allowed is the owner's name.
        assert!(!answer.contains("Storefront"));
    }

    #[test]
    fn who_is_answer_uses_the_profile() {
        let data = data_with_projects(&[]);
        let answer = fallback_response("Who is Yves?", &data);
        assert!(answer.contains(&data.profile.title));
        assert!(answer.contains(&data.profile.specialization));
    }

    #[test]
    fn technology_answer_lists_project_stack() {
        let data = data_with_projects(&["Storefront"]);
        let answer = fallback_response("What technologies do you use?", &data);
        assert!(answer.contains("Rust"));
    }

    #[test]
    fn unmatched_input_gets_capability_summary() {
        let data = data_with_projects(&["Storefront"]);
        let answer = fallback_response("zzz unrelated", &data);
        assert!(answer.contains("portfolio assistant"));
        assert!(answer.contains('1'));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let data = data_with_projects(&["Storefront"]);
        let answer = fallback_response("TELL ME ABOUT YOUR PROJECTS", &data);
        assert!(answer.contains("Storefront"));
    }
}
