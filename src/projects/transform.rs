// Enrichment of raw repository details into project records.
// Pure and deterministic: no IO, no clock.

use crate::config::RegistryEntry;
use crate::github::RepoDetails;

use super::record::{FALLBACK_IMAGE, ProjectRecord};

/// Topic that marks a repository as featured.
pub const FEATURED_TOPIC: &str = "featured";

/// Shown when a repository has no description.
pub const PLACEHOLDER_DESCRIPTION: &str = "No description available.";

const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

/// Build a project record from repository details, its languages, and its worklist entry.
pub fn transform(details: &RepoDetails, languages: Vec<String>, entry: &RegistryEntry) -> ProjectRecord {
    let image_path = entry.image_path().trim_start_matches('/').to_string();

    ProjectRecord {
        title: display_title(&details.name),
        description: details
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(PLACEHOLDER_DESCRIPTION)
            .to_string(),
        tags: details.topics.clone(),
        repo_url: details.html_url.clone(),
        image: image_url(&details.full_name, &details.default_branch, &image_path),
        fallback_image: FALLBACK_IMAGE.to_string(),
        featured: entry.featured || details.topics.iter().any(|t| t == FEATURED_TOPIC),
        languages,
        image_path,
    }
}

/// Repository name with word separators turned into spaces.
pub fn display_title(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '-' | '_' | '/' | '\\' => ' ',
            _ => c,
        })
        .collect()
}

/// Raw-content URL for a file in the repository's default branch.
pub fn image_url(full_name: &str, default_branch: &str, image_path: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        RAW_CONTENT_BASE, full_name, default_branch, image_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(name: &str, topics: &[&str], description: Option<&str>) -> RepoDetails {
        RepoDetails {
            name: name.to_string(),
            full_name: format!("mel-cell/{}", name),
            description: description.map(str::to_string),
            topics: topics.iter().map(|t| t.to_string()).collect(),
            default_branch: "main".to_string(),
            html_url: format!("https://github.com/mel-cell/{}", name),
            stargazers_count: 0,
        }
    }

    #[test]
    fn test_title_replaces_separators() {
        assert_eq!(display_title("mellow-movie_TMDb-api"), "mellow movie TMDb api");
        assert_eq!(display_title("Toko_Thrift-laravel"), "Toko Thrift laravel");
        assert_eq!(display_title("docktop"), "docktop");
    }

    #[test]
    fn test_description_fallback() {
        let entry = RegistryEntry::new("mel-cell/coralwind");
        let none = transform(&details("coralwind", &[], None), Vec::new(), &entry);
        let empty = transform(&details("coralwind", &[], Some("")), Vec::new(), &entry);
        let blank = transform(&details("coralwind", &[], Some("   ")), Vec::new(), &entry);
        let real = transform(&details("coralwind", &[], Some("Weather app")), Vec::new(), &entry);

        assert_eq!(none.description, PLACEHOLDER_DESCRIPTION);
        assert_eq!(empty.description, PLACEHOLDER_DESCRIPTION);
        assert_eq!(blank.description, PLACEHOLDER_DESCRIPTION);
        assert_eq!(real.description, "Weather app");
    }

    #[test]
    fn test_image_url_default_path() {
        let record = transform(
            &details("coralwind", &[], None),
            Vec::new(),
            &RegistryEntry::new("mel-cell/coralwind"),
        );
        assert_eq!(
            record.image,
            "https://raw.githubusercontent.com/mel-cell/coralwind/main/image.png"
        );
        assert_eq!(record.image_path, "image.png");
        assert_eq!(record.fallback_image, FALLBACK_IMAGE);
        assert!(reqwest::Url::parse(&record.image).is_ok());
    }

    #[test]
    fn test_image_path_override() {
        let mut street = details("StreetAI", &[], None);
        street.full_name = "terarush/StreetAI".to_string();
        street.default_branch = "master".to_string();
        let entry = RegistryEntry {
            id: "terarush/StreetAI".to_string(),
            image_path: Some("demo/image.png".to_string()),
            featured: false,
        };

        let record = transform(&street, Vec::new(), &entry);
        assert_eq!(
            record.image,
            "https://raw.githubusercontent.com/terarush/StreetAI/master/demo/image.png"
        );
        assert_eq!(record.image_path, "demo/image.png");
    }

    #[test]
    fn test_featured_from_topic() {
        let entry = RegistryEntry::new("mel-cell/coralwind");
        let featured = transform(&details("coralwind", &["web", "featured"], None), Vec::new(), &entry);
        let plain = transform(&details("coralwind", &["web"], None), Vec::new(), &entry);
        assert!(featured.featured);
        assert!(!plain.featured);
    }

    #[test]
    fn test_featured_from_entry() {
        let entry = RegistryEntry {
            id: "mel-cell/docktop".to_string(),
            image_path: None,
            featured: true,
        };
        let record = transform(&details("docktop", &[], None), Vec::new(), &entry);
        assert!(record.featured);
    }

    #[test]
    fn test_tags_and_languages_verbatim() {
        let record = transform(
            &details("docktop", &["tui", "docker", "go"], None),
            vec!["Go".to_string(), "Makefile".to_string()],
            &RegistryEntry::new("mel-cell/docktop"),
        );
        assert_eq!(record.tags, vec!["tui", "docker", "go"]);
        assert_eq!(record.languages, vec!["Go", "Makefile"]);
        assert_eq!(record.repo_url, "https://github.com/mel-cell/docktop");
    }

    #[test]
    fn test_transform_is_deterministic() {
        let input = details("replas-banksampah", &["php"], Some("Waste bank"));
        let entry = RegistryEntry::new("mel-cell/replas-banksampah");
        let first = transform(&input, vec!["PHP".to_string()], &entry);
        let second = transform(&input, vec!["PHP".to_string()], &entry);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }
}
