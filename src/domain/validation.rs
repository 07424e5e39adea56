//! Field checks shared by the store's value types.

use url::Url;

use super::error::DomainError;

pub(crate) fn non_empty(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Accepts only absolute `http` or `https` URLs with a host.
pub(crate) fn absolute_url(field: &str, value: &str) -> Result<(), DomainError> {
    non_empty(field, value)?;
    let parsed = Url::parse(value)
        .map_err(|err| DomainError::validation(field, format!("not an absolute URL: {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(DomainError::validation(
            field,
            format!("unsupported scheme `{}`", parsed.scheme()),
        ));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(DomainError::validation(field, "URL has no host"));
    }
    Ok(())
}

pub(crate) fn owner_repo(field: &str, value: &str) -> Result<(), DomainError> {
    let valid = value.split_once('/').is_some_and(|(owner, repo)| {
        is_repo_segment(owner) && is_repo_segment(repo)
    });
    if !valid {
        return Err(DomainError::validation(
            field,
            format!("expected `owner/repo`, got `{value}`"),
        ));
    }
    Ok(())
}

fn is_repo_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_values() {
        let err = non_empty("siteInfo.title", "   ").expect_err("blank rejected");
        assert_eq!(err.field(), "siteInfo.title");
    }

    #[test]
    fn absolute_url_requires_http_scheme_and_host() {
        assert!(absolute_url("url", "https://dmitripavlutin.com").is_ok());
        assert!(absolute_url("url", "/relative/path").is_err());
        assert!(absolute_url("url", "mailto:someone@example.com").is_err());
        assert!(absolute_url("url", "ftp://example.com").is_err());
    }

    #[test]
    fn owner_repo_requires_exactly_two_segments() {
        assert!(owner_repo("repo", "panzerdp/dmitripavlutin.com").is_ok());
        assert!(owner_repo("repo", "panzerdp").is_err());
        assert!(owner_repo("repo", "panzerdp/").is_err());
        assert!(owner_repo("repo", "a/b/c").is_err());
    }
}
