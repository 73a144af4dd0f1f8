//! Per-result presentation data: tier, tooltip, and copyable install commands.

use shared::domain::Manifest;

use crate::{classifier::Tier, registry::OfficialRegistry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView<'a> {
    pub manifest: &'a Manifest,
    pub tier: Tier,
    pub bucket_name: String,
}

impl<'a> ResultView<'a> {
    pub fn new(manifest: &'a Manifest, registry: &OfficialRegistry, popularity_threshold: u32) -> Self {
        let location = manifest.metadata.repository.as_str();
        let tier = registry.classify(
            location,
            manifest.metadata.repository_stars,
            popularity_threshold,
        );
        let bucket_name = registry
            .official_name(location)
            .map(str::to_string)
            .unwrap_or_else(|| bucket_name_from_location(location));

        Self {
            manifest,
            tier,
            bucket_name,
        }
    }

    pub fn color(&self) -> &'static str {
        self.tier.color()
    }

    pub fn tooltip(&self) -> String {
        self.tier.tooltip(self.manifest.metadata.repository_stars)
    }

    /// Official buckets are known to scoop by name alone.
    pub fn bucket_add_command(&self) -> String {
        match self.tier {
            Tier::Official => format!("scoop bucket add {}", self.bucket_name),
            Tier::PopularCommunity | Tier::Community => format!(
                "scoop bucket add {} {}",
                self.bucket_name, self.manifest.metadata.repository
            ),
        }
    }

    pub fn install_command(&self) -> String {
        format!("scoop install {}/{}", self.bucket_name, self.manifest.name)
    }
}

fn bucket_name_from_location(location: &str) -> String {
    let trimmed = location.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    trimmed
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(trimmed)
        .to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use shared::domain::ManifestMetadata;

    use super::*;

    fn manifest(name: &str, repository: &str, stars: u32) -> Manifest {
        Manifest {
            id: format!("{name}-id"),
            name: name.into(),
            version: Some("1.0".into()),
            description: None,
            homepage: None,
            license: None,
            metadata: ManifestMetadata {
                repository: repository.into(),
                repository_stars: stars,
                ..ManifestMetadata::default()
            },
        }
    }

    fn registry() -> OfficialRegistry {
        OfficialRegistry::from_catalog(BTreeMap::from([(
            "main".to_string(),
            "https://github.com/ScoopInstaller/Main".to_string(),
        )]))
    }

    #[test]
    fn official_result_uses_registry_name() {
        let manifest = manifest("7zip", "https://github.com/ScoopInstaller/Main", 80);
        let view = ResultView::new(&manifest, &registry(), 50);
        assert_eq!(view.tier, Tier::Official);
        assert_eq!(view.bucket_name, "main");
        assert_eq!(view.bucket_add_command(), "scoop bucket add main");
        assert_eq!(view.install_command(), "scoop install main/7zip");
        assert_eq!(view.tooltip(), "Official bucket (80 stars)");
    }

    #[test]
    fn community_result_derives_name_from_location() {
        let manifest = manifest("tool", "https://github.com/someone/my-bucket.git/", 50);
        let view = ResultView::new(&manifest, &registry(), 50);
        assert_eq!(view.tier, Tier::PopularCommunity);
        assert_eq!(view.bucket_name, "my-bucket");
        assert_eq!(
            view.bucket_add_command(),
            "scoop bucket add my-bucket https://github.com/someone/my-bucket.git/"
        );
        assert_eq!(view.install_command(), "scoop install my-bucket/tool");
    }

    #[test]
    fn empty_registry_demotes_everything_to_community() {
        let manifest = manifest("7zip", "https://github.com/ScoopInstaller/Main", 10);
        let view = ResultView::new(&manifest, &OfficialRegistry::default(), 50);
        assert_eq!(view.tier, Tier::Community);
        assert_eq!(view.color(), "#CCCCCC");
        assert_eq!(view.bucket_name, "Main");
    }
}
