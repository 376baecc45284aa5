use crate::domain::{Describe, Tag, Version};
use crate::error::Result;
use crate::git::Repository;
use crate::overrides::OverrideStore;
use crate::template::TemplateContext;

/// Everything known about the current version
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub describe: Describe,
    pub tag: Tag,
    /// User-declared next version for this tag, if any
    pub override_version: Option<Version>,
}

impl Resolution {
    /// The override when present, otherwise the tag's version
    pub fn effective(&self) -> &Version {
        self.override_version.as_ref().unwrap_or(&self.tag.version)
    }

    pub fn is_overridden(&self) -> bool {
        self.override_version.is_some()
    }

    /// Token values for template rendering
    ///
    /// Absent prerelease/build metadata render as empty strings.
    pub fn context(&self) -> TemplateContext {
        let version = self.effective();
        let mut context = TemplateContext::new();

        context.insert("version", version.to_string());
        context.insert("major", version.major.to_string());
        context.insert("minor", version.minor.to_string());
        context.insert("patch", version.patch.to_string());
        context.insert("prerelease", version.prerelease.clone().unwrap_or_default());
        context.insert("build", version.build.clone().unwrap_or_default());
        context.insert("tag", self.tag.name.clone());
        context.insert("tag_version", self.tag.version.to_string());
        context.insert("commits", self.describe.distance.to_string());
        context.insert("hash", self.describe.hash.clone());
        context.insert("dirty", self.describe.dirty.to_string());

        context
    }
}

/// Resolves the effective version from a repository and the override store
pub struct VersionResolver<'a, R: Repository> {
    repo: &'a R,
    overrides: &'a OverrideStore,
}

impl<'a, R: Repository> VersionResolver<'a, R> {
    /// Create a new version resolver
    pub fn new(repo: &'a R, overrides: &'a OverrideStore) -> Self {
        VersionResolver { repo, overrides }
    }

    /// Describe HEAD, parse the tag and look up its override
    pub fn resolve(&self) -> Result<Resolution> {
        let describe = self.repo.describe()?;
        let tag = Tag::parse(&describe.tag)?;
        let override_version = self.overrides.get(&tag.name)?;

        tracing::debug!(
            tag = %tag,
            distance = describe.distance,
            overridden = override_version.is_some(),
            "resolved version"
        );

        Ok(Resolution {
            describe,
            tag,
            override_version,
        })
    }
}
