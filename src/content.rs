use serde::Deserialize;

const EMBEDDED_SITE_CONTENT: &str = include_str!("../content/site.json");

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SiteContent {
    pub profile: Profile,
    pub about: About,
    pub skills: Skills,
    pub projects: Projects,
    pub blog: Blog,
    pub contact: ContactDetails,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    #[serde(default)]
    pub tagline: Vec<String>,
    pub subtitle: String,
    pub resume_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct About {
    pub intro: String,
    #[serde(default)]
    pub journey: Vec<String>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Education {
    pub degree: String,
    pub field: String,
    pub institution: String,
    pub status: String,
    #[serde(default = "default_accent")]
    pub accent: String,
}

fn default_accent() -> String {
    "purple".to_string()
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Skills {
    pub intro: String,
    #[serde(default)]
    pub categories: Vec<SkillCategory>,
    #[serde(default)]
    pub extra: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SkillCategory {
    pub title: String,
    pub icon: String,
    pub gradient: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Skill {
    pub name: String,
    pub icon: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Projects {
    pub intro: String,
    pub github_profile: String,
    #[serde(default)]
    pub items: Vec<Project>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub github: String,
    pub demo: String,
    pub status: String,
    pub category: String,
}

impl Project {
    pub fn status_class(&self) -> &'static str {
        status_badge_class(&self.status)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Blog {
    pub intro: String,
    pub placeholder_title: String,
    pub placeholder_body: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ContactDetails {
    pub heading: String,
    pub intro: String,
    pub email: String,
    pub location: String,
    pub availability: String,
    pub footer: String,
    pub footer_note: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    pub glyph: String,
    #[serde(default)]
    pub in_hero: bool,
    #[serde(default)]
    pub in_contact: bool,
}

impl SiteContent {
    pub fn embedded() -> Result<Self, serde_json::Error> {
        Self::from_json(EMBEDDED_SITE_CONTENT)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn hero_socials(&self) -> impl Iterator<Item = &SocialLink> {
        self.socials.iter().filter(|social| social.in_hero)
    }

    pub fn contact_socials(&self) -> impl Iterator<Item = &SocialLink> {
        self.socials.iter().filter(|social| social.in_contact)
    }
}

pub fn status_badge_class(status: &str) -> &'static str {
    match status {
        "Live" => "badge-live",
        "Completed" => "badge-completed",
        "Beta" => "badge-beta",
        "In Development" => "badge-in-development",
        "Coming Soon" => "badge-coming-soon",
        _ => "badge-planning",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_parses() {
        let content = SiteContent::embedded().expect("embedded site content should parse");

        assert_eq!(content.profile.name, "Khaled Tahoon");
        assert_eq!(content.profile.tagline.len(), 3);
        assert_eq!(content.about.education.len(), 2);
        assert_eq!(content.skills.categories.len(), 5);
        assert_eq!(content.projects.items.len(), 1);
        assert_eq!(content.projects.items[0].status_class(), "badge-completed");
    }

    #[test]
    fn socials_split_between_hero_and_contact() {
        let content = SiteContent::embedded().expect("embedded site content should parse");

        let hero: Vec<&str> = content.hero_socials().map(|s| s.name.as_str()).collect();
        let contact: Vec<&str> = content.contact_socials().map(|s| s.name.as_str()).collect();

        assert_eq!(hero, vec!["GitHub", "LinkedIn", "Email"]);
        assert_eq!(contact, vec!["GitHub", "LinkedIn", "WhatsApp"]);
    }

    #[test]
    fn status_badges_cover_known_states() {
        assert_eq!(status_badge_class("Live"), "badge-live");
        assert_eq!(status_badge_class("Beta"), "badge-beta");
        assert_eq!(status_badge_class("In Development"), "badge-in-development");
        assert_eq!(status_badge_class("Coming Soon"), "badge-coming-soon");
        assert_eq!(status_badge_class("Planning"), "badge-planning");
        assert_eq!(status_badge_class("Archived"), "badge-planning");
    }

    #[test]
    fn malformed_content_is_an_error() {
        assert!(SiteContent::from_json("{\"profile\": 3}").is_err());
    }

    #[test]
    fn missing_education_accent_defaults_to_purple() {
        let education: Education = serde_json::from_str(
            r#"{"degree":"BSc","field":"CS","institution":"UTM","status":"Done"}"#,
        )
        .expect("education entry should parse");

        assert_eq!(education.accent, "purple");
    }
}
