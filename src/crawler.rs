//! Path crawler: lazy, finite enumeration of eligible metadata files.
//!
//! Per-root rules: a nonexistent path is skipped; a directory is either
//! walked recursively (filtering by the profile's filename convention) or
//! scanned flat with the glob filter; a single file is yielded when it
//! matches the convention. Every candidate is re-checked through the
//! parser; ineligible candidates are skipped silently (counted) and
//! enumeration continues. Exhaustion is the iterator's `None`, never a
//! panic past the boundary.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::parser::MetadataParser;
use crate::profile::SensorProfile;
use crate::types::{CrawlOpts, ItemDescriptor};

enum RootState {
    Walk(walkdir::IntoIter),
    List(std::vec::IntoIter<PathBuf>),
}

pub struct Crawler {
    parser: MetadataParser,
    roots: VecDeque<PathBuf>,
    current: Option<RootState>,
    recurse: bool,
    filter: String,
    skipped: usize,
}

impl Crawler {
    pub fn new(profile: SensorProfile, opts: &CrawlOpts) -> Self {
        let filter = match opts.filter.as_deref() {
            None | Some("") => profile.data_source_filter.to_string(),
            Some(f) => f.to_string(),
        };
        let parser = match opts.cache_capacity {
            Some(cap) => MetadataParser::with_cache_capacity(profile, cap),
            None => MetadataParser::new(profile),
        };
        Crawler {
            parser,
            roots: opts.paths.iter().cloned().collect(),
            current: None,
            recurse: opts.recurse,
            filter,
            skipped: 0,
        }
    }

    /// Candidates skipped so far (wrong family, missing product type,
    /// unparsable document).
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn profile(&self) -> &SensorProfile {
        self.parser.profile()
    }

    /// Next path that matches the enumeration rules, across all roots.
    fn next_candidate(&mut self) -> Option<PathBuf> {
        loop {
            if let Some(state) = self.current.as_mut() {
                match state {
                    RootState::Walk(iter) => {
                        for entry in iter.by_ref() {
                            match entry {
                                Ok(entry) => {
                                    if !entry.file_type().is_file() {
                                        continue;
                                    }
                                    let name = entry.file_name().to_string_lossy();
                                    if self.parser.profile().convention.matches(&name) {
                                        return Some(entry.into_path());
                                    }
                                }
                                Err(e) => debug!("walk error: {e}"),
                            }
                        }
                    }
                    RootState::List(iter) => {
                        if let Some(path) = iter.next() {
                            return Some(path);
                        }
                    }
                }
                self.current = None;
            }

            let root = self.roots.pop_front()?;
            if !root.exists() {
                debug!("{}: does not exist, skipping root", root.display());
                continue;
            }
            if root.is_dir() {
                self.current = Some(if self.recurse {
                    RootState::Walk(walkdir::WalkDir::new(root).into_iter())
                } else {
                    RootState::List(glob_dir(&root, &self.filter).into_iter())
                });
            } else {
                let name = root.file_name().map(|n| n.to_string_lossy().into_owned());
                match name {
                    Some(n) if self.parser.profile().convention.matches(&n) => {
                        self.current = Some(RootState::List(vec![root].into_iter()));
                    }
                    _ => debug!(
                        "{}: not a {} metadata file, skipping root",
                        root.display(),
                        self.parser.profile().name
                    ),
                }
            }
        }
    }

    /// Eligibility re-check and descriptor assembly for one candidate.
    /// `None` means skip and continue.
    fn descriptor_for(&mut self, path: &Path) -> Option<ItemDescriptor> {
        let doc = self.parser.parse_or_none(path)?;
        if !self.parser.is_target(&doc) {
            debug!(
                "{}: not a {} product, skipping",
                path.display(),
                self.parser.profile().name
            );
            return None;
        }
        let Some(tag) = self.parser.tag(&doc) else {
            debug!("{}: no routing tag, skipping", path.display());
            return None;
        };
        let Some(product_name) = self.parser.product_name(&doc) else {
            debug!("{}: no product type, skipping", path.display());
            return None;
        };
        Some(ItemDescriptor {
            path: path.to_path_buf(),
            display_name: file_name_of(path),
            tag,
            group_name: group_name_of(path),
            product_name,
        })
    }
}

impl Iterator for Crawler {
    type Item = ItemDescriptor;

    fn next(&mut self) -> Option<ItemDescriptor> {
        while let Some(path) = self.next_candidate() {
            match self.descriptor_for(&path) {
                Some(descriptor) => return Some(descriptor),
                None => self.skipped += 1,
            }
        }
        None
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Name of the dataset directory holding the metadata file.
fn group_name_of(path: &Path) -> String {
    path.parent()
        .and_then(|dir| dir.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Non-recursive glob inside one directory: files whose name matches
/// `pattern`, in name order for deterministic enumeration.
fn glob_dir(dir: &Path, pattern: &str) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("{}: cannot list directory: {}", dir.display(), e);
            return Vec::new();
        }
    };
    let mut matches: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|e| glob_match(pattern, &e.file_name().to_string_lossy()))
        .map(|e| e.path())
        .collect();
    matches.sort();
    matches
}

/// Glob pattern matching for filename filters (supports `*` and `?`).
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let mut pattern_chars = pattern.chars().peekable();
    let mut text_chars = text.chars().peekable();

    while let Some(&p) = pattern_chars.peek() {
        match p {
            '*' => {
                pattern_chars.next();
                if pattern_chars.peek().is_none() {
                    return true; // trailing * matches everything
                }
                // Try to match the rest of the pattern at every suffix.
                while text_chars.peek().is_some() {
                    if glob_match(
                        &pattern_chars.clone().collect::<String>(),
                        &text_chars.clone().collect::<String>(),
                    ) {
                        return true;
                    }
                    text_chars.next();
                }
                return false;
            }
            '?' => {
                pattern_chars.next();
                if text_chars.next().is_none() {
                    return false;
                }
            }
            _ => {
                pattern_chars.next();
                if text_chars.next() != Some(p) {
                    return false;
                }
            }
        }
    }

    text_chars.peek().is_none()
}
