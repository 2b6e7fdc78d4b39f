use serde::{Deserialize, Serialize};

/// How visitors can reach the site owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactPreferences {
    pub email: String,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub available_for: Vec<String>,
}

impl Default for ContactPreferences {
    fn default() -> Self {
        Self {
            email: "hello@example.com".to_string(),
            linkedin: None,
            github: None,
            available_for: vec![
                "Freelance Projects".to_string(),
                "Full-time Positions".to_string(),
                "Consulting".to_string(),
                "Collaboration".to_string(),
            ],
        }
    }
}

/// The site owner's profile, consumed by the assistant context builder and
/// the fallback responder. Ships with placeholder values; deployments load
/// their own via [`Profile::from_json_str`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub location: String,
    pub experience: String,
    pub specialization: String,
    pub passion: String,
    pub background: String,
    pub career_journey: String,
    pub education: String,
    pub interests: Vec<String>,
    pub achievements: Vec<String>,
    pub services: Vec<String>,
    pub contact: ContactPreferences,
}

impl Profile {
    /// Load a profile override from a JSON document. Absent fields keep
    /// their defaults.
    pub fn from_json_str(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Yves".to_string(),
            title: "Full-Stack Developer".to_string(),
            location: "Kigali, Rwanda".to_string(),
            experience: "5+ years".to_string(),
            specialization: "Modern Web Development".to_string(),
            passion: "Building innovative, user-centric applications".to_string(),
            background: "A full-stack developer focused on modern, responsive \
                         web applications, combining frontend and backend work \
                         into scalable solutions with strong user experiences."
                .to_string(),
            career_journey: "Started as a frontend developer and expanded into \
                             full-stack work, with an emphasis on clean code, \
                             performance, and intuitive interfaces."
                .to_string(),
            education: "Bachelor's Degree in Computer Science".to_string(),
            interests: vec![
                "Web Development".to_string(),
                "UI/UX Design".to_string(),
                "Performance Optimization".to_string(),
                "AI Integration".to_string(),
                "Open Source Contributions".to_string(),
            ],
            achievements: vec![
                "Built multiple full-stack applications".to_string(),
                "Expertise in modern JavaScript frameworks".to_string(),
                "Strong background in responsive design".to_string(),
                "Experience with AI/ML integration".to_string(),
                "Contributed to open source projects".to_string(),
            ],
            services: vec![
                "Custom Web Application Development".to_string(),
                "Frontend Development".to_string(),
                "Backend Development".to_string(),
                "API Development & Integration".to_string(),
                "Performance Optimization".to_string(),
                "UI/UX Consulting".to_string(),
            ],
            contact: ContactPreferences::default(),
        }
    }
}
