use crate::portfolio::{distinct_technologies, PortfolioData};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Upper bound on the number of suggestions offered.
pub const MAX_SUGGESTIONS: usize = 5;

/// Technologies eligible for sampling: the first distinct values across
/// projects, capped before the draw.
const TECH_SAMPLE_POOL: usize = 5;

/// Example questions shown before portfolio data has loaded.
#[must_use]
pub fn default_suggestions() -> Vec<String> {
    vec![
        "Tell me about your projects".to_string(),
        "What blog posts have you written?".to_string(),
        "What technologies do you use?".to_string(),
        "How can I contact you?".to_string(),
        "Show me your recent work".to_string(),
    ]
}

/// Derive up to [`MAX_SUGGESTIONS`] example questions from the portfolio:
/// one random project, one random blog post, one random technology, then
/// fixed generic prompts.
///
/// The seed is explicit so callers control reproducibility; pass a varying
/// seed for engagement variety, a fixed one in tests.
#[must_use]
pub fn suggestions(data: &PortfolioData, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::new();

    if let Some(project) = data.projects.choose(&mut rng) {
        out.push(format!("Tell me about {}", project.title));
    }
    if let Some(post) = data.blog_posts.choose(&mut rng) {
        out.push(format!("What's \"{}\" about?", post.title));
    }
    let technologies = distinct_technologies(&data.projects);
    let pool = &technologies[..technologies.len().min(TECH_SAMPLE_POOL)];
    if let Some(technology) = pool.choose(&mut rng) {
        out.push(format!("How do you use {technology}?"));
    }

    out.push(format!("Who is {}?", data.profile.name));
    out.push("What's your background?".to_string());
    out.push("What services do you offer?".to_string());

    out.truncate(MAX_SUGGESTIONS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_content::{BlogPost, Profile, Project};

    fn sample_data() -> PortfolioData {
        PortfolioData {
            profile: Profile::default(),
            projects: (1..=3)
                .map(|index| Project {
                    title: format!("Project {index}"),
                    slug: format!("project-{index}"),
                    technologies: vec![format!("Tech{index}"), "Rust".to_string()],
                    ..Default::default()
                })
                .collect(),
            blog_posts: (1..=2)
                .map(|index| BlogPost {
                    title: format!("Post {index}"),
                    slug: format!("post-{index}"),
                    ..Default::default()
                })
                .collect(),
            about: None,
        }
    }

    #[test]
    fn deterministic_for_a_fixed_seed() {
        let data = sample_data();
        assert_eq!(suggestions(&data, 7), suggestions(&data, 7));
    }

    #[test]
    fn capped_and_drawn_from_the_allowed_pool() {
        let data = sample_data();
        for seed in 0..20 {
            let derived = suggestions(&data, seed);
            assert_eq!(derived.len(), MAX_SUGGESTIONS);

            let project_pool: Vec<String> = data
                .projects
                .iter()
                .map(|project| format!("Tell me about {}", project.title))
                .collect();
            assert!(project_pool.contains(&derived[0]), "seed {seed}: {derived:?}");

            let post_pool: Vec<String> = data
                .blog_posts
                .iter()
                .map(|post| format!("What's \"{}\" about?", post.title))
                .collect();
            assert!(post_pool.contains(&derived[1]), "seed {seed}: {derived:?}");
        }
    }

    #[test]
    fn empty_portfolio_falls_back_to_generic_prompts() {
        let data = PortfolioData {
            profile: Profile::default(),
            ..Default::default()
        };
        let derived = suggestions(&data, 0);
        assert_eq!(
            derived,
            vec![
                format!("Who is {}?", data.profile.name),
                "What's your background?".to_string(),
                "What services do you offer?".to_string(),
            ]
        );
    }
}
