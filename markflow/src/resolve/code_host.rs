//! Code-host repository resolution.

use tracing::debug;

use crate::config::ResolverConfig;
use crate::errors::MarkflowError;
use crate::links::extract_path;
use crate::models::Content;
use crate::services::CodeHostApi;

const TRUNCATION_MARKER: &str = "… [README truncated]";

/// Parses `owner/repo` out of a code-host URL path.
///
/// Returns `None` for paths that do not name a repository.
#[must_use]
pub fn parse_owner_repo(url: &str) -> Option<(String, String)> {
    let path = extract_path(url);
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let repo = segments.next()?.trim_end_matches(".git");
    if owner.is_empty() || repo.is_empty() {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}

/// Truncates a README to the configured character budget, appending an
/// explicit marker when content was dropped.
fn truncate_readme(readme: &str, max_chars: usize) -> String {
    if readme.chars().count() <= max_chars {
        return readme.to_string();
    }
    let mut excerpt: String = readme.chars().take(max_chars).collect();
    excerpt.push_str(TRUNCATION_MARKER);
    excerpt
}

/// Resolves a repository link to metadata plus a README excerpt.
///
/// API failures propagate to the caller; there is no fallback for this
/// kind. The pipeline records the failure and the link keeps null content.
pub async fn resolve(
    api: &dyn CodeHostApi,
    url: &str,
    config: &ResolverConfig,
) -> Result<Option<Content>, MarkflowError> {
    let Some((owner, repo)) = parse_owner_repo(url) else {
        debug!(url = %url, "code-host url does not name a repository");
        return Ok(None);
    };

    let info = api.get_repo(&owner, &repo).await?;
    let readme_excerpt = api
        .get_readme(&owner, &repo)
        .await?
        .map(|readme| truncate_readme(&readme, config.readme_max_chars));

    Ok(Some(Content::CodeHost {
        name: info.name,
        full_name: info.full_name,
        description: info.description,
        stars: info.stars,
        language: info.language,
        topics: info.topics,
        readme_excerpt,
    }))
}
