//! Include/exclude gate applied to module identifiers before classification.
//!
//! Follows the conventions bundler plugins use for their `include`/`exclude`
//! options:
//! - identifiers containing a NUL byte (virtual modules) never pass
//! - exclude patterns take precedence over include patterns
//! - with no include patterns everything that is not excluded passes
//! - relative globs are resolved against a base directory
//! - `*` does not cross `/`, and globs match dot files

use crate::error::ImageModuleError;
use crate::options::FilterPattern;
use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum Matcher {
    Glob(GlobMatcher),
    Regex(Regex),
}

impl Matcher {
    fn compile(pattern: &FilterPattern, base: &str) -> Result<Self, ImageModuleError> {
        match pattern {
            FilterPattern::Regex(re) => Ok(Matcher::Regex(re.clone())),
            FilterPattern::Glob(glob) => {
                let resolved = resolve_glob(glob, base);
                let glob = GlobBuilder::new(&resolved)
                    .literal_separator(true)
                    .build()
                    .map_err(|source| ImageModuleError::InvalidPattern {
                        pattern: glob.clone(),
                        source,
                    })?;
                Ok(Matcher::Glob(glob.compile_matcher()))
            }
        }
    }

    fn is_match(&self, id: &str) -> bool {
        match self {
            Matcher::Glob(glob) => glob.is_match(id),
            Matcher::Regex(re) => re.is_match(id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageFilter {
    include: Vec<Matcher>,
    exclude: Vec<Matcher>,
}

impl ImageFilter {
    /// Compiles a filter whose relative globs resolve against the current directory.
    pub fn new(
        include: &[FilterPattern],
        exclude: &[FilterPattern],
    ) -> Result<Self, ImageModuleError> {
        let cwd = working_dir_base(std::env::current_dir())?;
        Self::with_base(include, exclude, &cwd)
    }

    pub fn with_base(
        include: &[FilterPattern],
        exclude: &[FilterPattern],
        base: &Path,
    ) -> Result<Self, ImageModuleError> {
        let base = normalize_path(&base.to_string_lossy());
        let compile = |patterns: &[FilterPattern]| {
            patterns
                .iter()
                .map(|p| Matcher::compile(p, &base))
                .collect::<Result<Vec<_>, _>>()
        };
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Returns true if the identifier should be handled.
    pub fn accepts(&self, id: &str) -> bool {
        if id.contains('\0') {
            return false;
        }
        let id = normalize_path(id);
        if self.exclude.iter().any(|m| m.is_match(&id)) {
            return false;
        }
        if self.include.iter().any(|m| m.is_match(&id)) {
            return true;
        }
        self.include.is_empty()
    }
}

fn working_dir_base(cwd: std::io::Result<PathBuf>) -> Result<PathBuf, ImageModuleError> {
    cwd.map_err(ImageModuleError::WorkingDirectory)
}

/// Converts Windows separators to `/`.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

fn resolve_glob(glob: &str, base: &str) -> String {
    let glob = normalize_path(glob);
    if glob.starts_with("**") || glob.starts_with('/') || Path::new(&glob).is_absolute() {
        return glob;
    }
    join_posix(&escape_glob(base), &glob)
}

/// Escapes glob metacharacters so a literal path only matches itself.
fn escape_glob(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '*' | '?' | '[' | ']' | '{' | '}' => {
                escaped.push('[');
                escaped.push(c);
                escaped.push(']');
            }
            c => escaped.push(c),
        }
    }
    escaped
}

/// Joins two `/` separated paths, collapsing `.` and `..` segments.
fn join_posix(base: &str, rel: &str) -> String {
    let absolute = base.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(rel.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            s => segments.push(s),
        }
    }
    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(include: &[&str], exclude: &[&str]) -> ImageFilter {
        let include: Vec<FilterPattern> = include.iter().map(|p| (*p).into()).collect();
        let exclude: Vec<FilterPattern> = exclude.iter().map(|p| (*p).into()).collect();
        ImageFilter::with_base(&include, &exclude, Path::new("/project")).unwrap()
    }

    #[test]
    fn test_no_patterns_accepts_everything_but_nul() {
        let f = filter(&[], &[]);
        assert!(f.accepts("/project/src/a.png"));
        assert!(f.accepts("anything"));
        assert!(!f.accepts("\0virtual:a.png"));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let f = filter(&["**/*.png"], &["**/icons/**"]);
        assert!(f.accepts("/project/src/a.png"));
        assert!(!f.accepts("/project/src/icons/a.png"));
        assert!(!f.accepts("/project/src/a.jpg"));
    }

    #[test]
    fn test_relative_globs_resolve_against_base() {
        let f = filter(&["src/**/*.png"], &[]);
        assert!(f.accepts("/project/src/img/a.png"));
        assert!(!f.accepts("/other/src/img/a.png"));

        let f = filter(&["./assets/*.svg"], &[]);
        assert!(f.accepts("/project/assets/logo.svg"));

        let f = filter(&["../shared/*.gif"], &[]);
        assert!(f.accepts("/shared/a.gif"));
    }

    #[test]
    fn test_star_does_not_cross_separator() {
        let f = filter(&["/project/*.png"], &[]);
        assert!(f.accepts("/project/a.png"));
        assert!(!f.accepts("/project/nested/a.png"));
    }

    #[test]
    fn test_dot_files_match() {
        let f = filter(&[], &["**/*.png"]);
        assert!(!f.accepts("/project/.cache/a.png"));
    }

    #[test]
    fn test_backslashes_are_normalized() {
        let f = filter(&[], &["**/icons/**"]);
        assert!(!f.accepts("C:\\project\\icons\\a.png"));
    }

    #[test]
    fn test_regex_pattern() {
        let include = vec![FilterPattern::Regex(Regex::new(r"\.svg$").unwrap())];
        let f = ImageFilter::with_base(&include, &[], Path::new("/project")).unwrap();
        assert!(f.accepts("/anywhere/logo.svg"));
        assert!(!f.accepts("/anywhere/logo.png"));
    }

    #[test]
    fn test_base_with_glob_metacharacters_is_literal() {
        let include: Vec<FilterPattern> = vec!["*.png".into()];
        let f = ImageFilter::with_base(&include, &[], Path::new("/work/[draft]")).unwrap();
        assert!(f.accepts("/work/[draft]/a.png"));
        assert!(!f.accepts("/work/d/a.png"));
    }

    #[test]
    fn test_invalid_glob_is_an_error() {
        let include: Vec<FilterPattern> = vec!["**/[a.png".into()];
        let err = ImageFilter::with_base(&include, &[], Path::new("/project")).unwrap_err();
        assert!(matches!(err, ImageModuleError::InvalidPattern { .. }));
    }

    #[test]
    fn test_unknown_working_dir_is_an_error() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "cwd removed");
        let err = working_dir_base(Err(missing)).unwrap_err();
        assert!(matches!(err, ImageModuleError::WorkingDirectory(_)));
        assert!(err.to_string().contains("cwd removed"));

        let base = working_dir_base(Ok(PathBuf::from("/project"))).unwrap();
        assert_eq!(base, PathBuf::from("/project"));
    }

    #[test]
    fn test_join_posix() {
        assert_eq!(join_posix("/a/b", "c/d"), "/a/b/c/d");
        assert_eq!(join_posix("/a/b", "../c"), "/a/c");
        assert_eq!(join_posix("/a/b", "./c"), "/a/b/c");
        assert_eq!(join_posix("a", "../../c"), "../c");
    }
}
