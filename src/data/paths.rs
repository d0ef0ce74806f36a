use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Expand the user's input into the list of files to load.
///
/// * containing `*` → recursive glob, every match in walker order
/// * otherwise      → comma-separated literal paths, whitespace trimmed
///
/// Literal paths are returned verbatim; existence is checked by the loader.
pub fn resolve_paths(input: &str) -> Result<Vec<String>, PathError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    if input.contains('*') {
        return expand_glob(input.trim());
    }

    Ok(input.split(',').map(|p| p.trim().to_string()).collect())
}

fn expand_glob(pattern: &str) -> Result<Vec<String>, PathError> {
    let entries = glob::glob(pattern).map_err(|source| PathError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path.to_string_lossy().into_owned()),
            Err(e) => log::warn!("Skipping unreadable path: {e}"),
        }
    }
    log::debug!("Pattern '{pattern}' matched {} path(s)", paths.len());
    Ok(paths)
}
