//! Shared path manipulation utilities.

use std::env;
use std::path::{Component, Path, PathBuf};

/// Expand `~`, `$VAR`, `${VAR}` and `%VAR%` references in a configured path.
///
/// Unknown variables expand to the empty string, matching shell behavior.
/// `%USERPROFILE%` falls back to `$HOME` so Windows-style defaults resolve
/// on other platforms too.
#[must_use]
pub fn expand_path(raw: &str) -> PathBuf {
    expand_path_with(raw, |name| env::var(name).ok())
}

/// [`expand_path`] with an injectable variable lookup.
pub fn expand_path_with<F>(raw: &str, mut lookup: F) -> PathBuf
where
    F: FnMut(&str) -> Option<String>,
{
    let mut resolve = |name: &str| {
        lookup(name)
            .or_else(|| (name == "USERPROFILE").then(|| lookup("HOME")).flatten())
            .unwrap_or_default()
    };

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    if let Some(tail) = rest.strip_prefix('~')
        && (tail.is_empty() || tail.starts_with('/') || tail.starts_with('\\'))
    {
        out.push_str(&resolve("HOME"));
        rest = tail;
    }

    let mut chars = rest.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '%' => {
                let after = &rest[idx + 1..];
                if let Some(end) = after.find('%')
                    && end > 0
                    && after[..end].chars().all(is_var_char)
                {
                    out.push_str(&resolve(&after[..end]));
                    // Skip the name and the closing '%'.
                    for _ in 0..=after[..end].chars().count() {
                        chars.next();
                    }
                } else {
                    out.push('%');
                }
            }
            '$' => {
                let after = &rest[idx + 1..];
                if let Some(braced) = after.strip_prefix('{')
                    && let Some(end) = braced.find('}')
                {
                    out.push_str(&resolve(&braced[..end]));
                    for _ in 0..braced[..end].chars().count() + 2 {
                        chars.next();
                    }
                } else {
                    let name: String = after.chars().take_while(|c| is_var_char(*c)).collect();
                    if name.is_empty() {
                        out.push('$');
                    } else {
                        out.push_str(&resolve(&name));
                        for _ in 0..name.chars().count() {
                            chars.next();
                        }
                    }
                }
            }
            _ => out.push(ch),
        }
    }
    PathBuf::from(out)
}

fn is_var_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Resolve a path to an absolute, normalized path.
///
/// If `fs::canonicalize` succeeds (path exists), it is used to resolve symlinks
/// and normalize components.
///
/// If it fails (e.g. path does not exist), the path is made absolute relative
/// to CWD and `..`/`.` components are resolved syntactically.
pub fn resolve_absolute_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    };

    if let Ok(canonical) = std::fs::canonicalize(&absolute) {
        return canonical;
    }

    normalize_syntactic(&absolute)
}

fn normalize_syntactic(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(..) | Component::RootDir | Component::Normal(_) => {
                components.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                }
            }
        }
    }
    components.into_iter().collect()
}
