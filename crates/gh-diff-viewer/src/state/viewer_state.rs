//! Main state for the diff viewer.

use super::{DeferredTasks, ExpansionState};
use crate::action::DiffAction;
use crate::event::DiffEvent;
use crate::highlight::{tokenize_or_plain, Highlighter, Language, SyntectHighlighter};
use crate::model::{
    build_file_tree, ChangedFile, DirectoryNode, FlatTreeEntry, ParsedDiff, TokenizedHunks,
};
use crate::parser::parse_changed_file;
use crate::render::{DiffTotals, FileBody, FileHeader, FileView, ViewType, ViewerSnapshot};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Inputs that invalidate a file's memoized parse and tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKey {
    filename: String,
    previous_filename: Option<String>,
    patch: Option<String>,
}

impl FileKey {
    pub fn of(file: &ChangedFile) -> Self {
        Self {
            filename: file.filename.clone(),
            previous_filename: file.previous_filename.clone(),
            patch: file.patch.clone(),
        }
    }
}

#[derive(Debug, Clone)]
enum Materialized {
    Parsed(Arc<ParsedDiff>),
    Unparseable,
}

#[derive(Debug, Clone)]
struct CachedFile {
    parsed: Materialized,
    tokens: Option<Arc<TokenizedHunks>>,
}

/// Viewer session for one pull request's file list.
///
/// Owns the immutable file list, the tree built from it, expansion state and
/// the per-file parse/token memo. Parsing happens when a file expands;
/// tokenization is queued and only applied by [`DiffViewerState::run_deferred`],
/// so a plain rendering is always available first.
pub struct DiffViewerState {
    files: Vec<ChangedFile>,
    keys: Vec<FileKey>,
    tree: DirectoryNode,
    expansion: ExpansionState,
    view_type: ViewType,
    /// Latest generation handed out by `begin_load`.
    generation: u64,
    /// Generation of the file list currently shown.
    loaded_generation: u64,
    selected_file: Option<usize>,
    cache: HashMap<FileKey, CachedFile>,
    tasks: DeferredTasks<FileKey, TokenizedHunks>,
    highlighter: &'static dyn Highlighter,
}

impl std::fmt::Debug for DiffViewerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiffViewerState")
            .field("files", &self.files.len())
            .field("expanded", &self.expansion.expanded_count())
            .field("view_type", &self.view_type)
            .field("generation", &self.generation)
            .field("cached", &self.cache.len())
            .field("tasks", &self.tasks)
            .finish()
    }
}

impl Default for DiffViewerState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffViewerState {
    /// Create an empty viewer using the shared syntect highlighter.
    pub fn new() -> Self {
        Self::with_highlighter(SyntectHighlighter::shared())
    }

    /// Create an empty viewer with a custom highlighter.
    pub fn with_highlighter(highlighter: &'static dyn Highlighter) -> Self {
        Self {
            files: Vec::new(),
            keys: Vec::new(),
            tree: DirectoryNode::default(),
            expansion: ExpansionState::new(),
            view_type: ViewType::default(),
            generation: 0,
            loaded_generation: 0,
            selected_file: None,
            cache: HashMap::new(),
            tasks: DeferredTasks::new(),
            highlighter,
        }
    }

    /// Set the initial layout.
    pub fn with_view_type(mut self, view_type: ViewType) -> Self {
        self.view_type = view_type;
        self
    }

    // === Loading ===

    /// Tag a new file-list request. Only the latest tag may be applied.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Apply a fetched file list if `generation` is still the latest.
    ///
    /// Returns `false` (and changes nothing) for a stale response.
    pub fn apply_files(&mut self, generation: u64, files: Vec<ChangedFile>) -> bool {
        if generation != self.generation {
            log::debug!(
                "Discarding stale file list (generation {}, latest {})",
                generation,
                self.generation
            );
            return false;
        }

        self.replace_files(files);
        self.loaded_generation = generation;
        true
    }

    /// Load a file list immediately.
    pub fn load_files(&mut self, files: Vec<ChangedFile>) -> u64 {
        let generation = self.begin_load();
        self.apply_files(generation, files);
        generation
    }

    fn replace_files(&mut self, files: Vec<ChangedFile>) {
        let keys: Vec<FileKey> = files.iter().map(FileKey::of).collect();
        let live: HashSet<&FileKey> = keys.iter().collect();

        let cancelled = self.tasks.cancel_unless(|key| live.contains(key));
        self.cache.retain(|key, _| live.contains(key));
        if cancelled > 0 {
            log::debug!("Cancelled {} pending tokenizations", cancelled);
        }

        self.tree = build_file_tree(&files);
        self.expansion = ExpansionState::with_auto_expand(&files);
        self.files = files;
        self.keys = keys;
        self.selected_file = None;

        let expanded: Vec<usize> = self.expansion.expanded_files().collect();
        log::debug!(
            "Loaded {} files, auto-expanded {}",
            self.files.len(),
            expanded.len()
        );
        for index in expanded {
            self.materialize(index);
        }
    }

    // === Materialization ===

    /// Parse the file's patch (memoized) and queue its tokenization.
    fn materialize(&mut self, index: usize) {
        let (Some(file), Some(key)) = (self.files.get(index), self.keys.get(index)) else {
            return;
        };
        let language = Language::from_filename(&file.filename);

        if let Some(cached) = self.cache.get(key) {
            if let (Materialized::Parsed(parsed), None) = (&cached.parsed, &cached.tokens) {
                if !self.tasks.is_pending(key) {
                    let parsed = parsed.clone();
                    let key = key.clone();
                    self.schedule_tokenization(key, parsed, language);
                }
            }
            return;
        }

        let outcome = match parse_changed_file(file) {
            None => return,
            Some(Ok(parsed)) => Materialized::Parsed(Arc::new(parsed)),
            Some(Err(e)) => {
                log::warn!("Failed to parse patch for {}: {}", file.filename, e);
                Materialized::Unparseable
            }
        };

        let key = key.clone();
        if let Materialized::Parsed(parsed) = &outcome {
            self.schedule_tokenization(key.clone(), parsed.clone(), language);
        }
        self.cache.insert(
            key,
            CachedFile {
                parsed: outcome,
                tokens: None,
            },
        );
    }

    fn schedule_tokenization(&mut self, key: FileKey, parsed: Arc<ParsedDiff>, language: Language) {
        let highlighter = self.highlighter;
        self.tasks.submit(key, move || {
            tokenize_or_plain(highlighter, &parsed.hunks, language)
        });
    }

    /// Run queued tokenizations and apply the results that are still current.
    ///
    /// Returns the number of files whose tokens were applied.
    pub fn run_deferred(&mut self) -> usize {
        let mut applied = 0;
        for (key, tokens) in self.tasks.run_pending() {
            if let Some(cached) = self.cache.get_mut(&key) {
                cached.tokens = Some(Arc::new(tokens));
                applied += 1;
            }
        }
        applied
    }

    /// Number of tokenizations waiting to run.
    pub fn pending_tokenizations(&self) -> usize {
        self.tasks.pending_count()
    }

    // === Actions ===

    /// Handle an action and return the resulting events.
    pub fn handle_action(&mut self, action: DiffAction) -> Vec<DiffEvent> {
        match action {
            DiffAction::ToggleFile(index) => {
                if index >= self.files.len() {
                    return Vec::new();
                }
                if self.expansion.toggle(index) {
                    self.materialize(index);
                    vec![DiffEvent::FileExpanded { file_index: index }]
                } else {
                    vec![DiffEvent::FileCollapsed { file_index: index }]
                }
            }
            DiffAction::ExpandFile(index) => self.expand_file(index).into_iter().collect(),
            DiffAction::CollapseFile(index) => {
                if self.expansion.collapse(index) {
                    vec![DiffEvent::FileCollapsed { file_index: index }]
                } else {
                    Vec::new()
                }
            }
            DiffAction::ExpandAllFiles => {
                for index in self.expansion.expand_all(self.files.len()) {
                    self.materialize(index);
                }
                vec![DiffEvent::ExpansionChanged {
                    expanded_count: self.expansion.expanded_count(),
                }]
            }
            DiffAction::CollapseAllFiles => {
                self.expansion.collapse_all();
                vec![DiffEvent::ExpansionChanged { expanded_count: 0 }]
            }
            DiffAction::SelectFile(index) => {
                let Some(file_path) = self.files.get(index).map(|f| f.filename.clone()) else {
                    return Vec::new();
                };
                let mut events: Vec<DiffEvent> = self.expand_file(index).into_iter().collect();
                self.selected_file = Some(index);
                events.push(DiffEvent::ScrollToFile {
                    file_path,
                    file_index: index,
                });
                events
            }
            DiffAction::ToggleDirectory(path) => {
                if path.is_empty() || self.tree.find_directory(&path).is_none() {
                    return Vec::new();
                }
                let expanded = self.expansion.toggle_dir(&path);
                vec![DiffEvent::DirectoryToggled { path, expanded }]
            }
            DiffAction::ExpandAllDirectories => {
                self.expansion.expand_dirs(self.tree.directory_paths());
                vec![DiffEvent::TreeChanged]
            }
            DiffAction::CollapseAllDirectories => {
                self.expansion.collapse_all_dirs();
                vec![DiffEvent::TreeChanged]
            }
            DiffAction::SetViewType(view_type) => {
                if view_type == self.view_type {
                    return Vec::new();
                }
                self.view_type = view_type;
                vec![DiffEvent::ViewTypeChanged(view_type)]
            }
        }
    }

    fn expand_file(&mut self, index: usize) -> Option<DiffEvent> {
        if index >= self.files.len() || !self.expansion.expand(index) {
            return None;
        }
        self.materialize(index);
        Some(DiffEvent::FileExpanded { file_index: index })
    }

    // === Rendering ===

    /// Render one file with the current layout.
    pub fn file_view(&self, index: usize) -> Option<FileView> {
        let file = self.files.get(index)?;
        let expanded = self.expansion.is_expanded(index);
        let header = FileHeader::new(index, file, expanded);

        let body = if !expanded {
            FileBody::Collapsed
        } else {
            match file.patch.as_deref().filter(|p| !p.is_empty()) {
                None => FileBody::placeholder(file.status),
                Some(patch) => match self.keys.get(index).and_then(|k| self.cache.get(k)) {
                    Some(CachedFile {
                        parsed: Materialized::Parsed(parsed),
                        tokens,
                    }) => FileBody::from_parsed(parsed, tokens.as_deref(), self.view_type),
                    Some(CachedFile {
                        parsed: Materialized::Unparseable,
                        ..
                    }) => FileBody::Raw {
                        patch: patch.to_string(),
                    },
                    // Not materialized through an action; render without memoizing.
                    None => match parse_changed_file(file) {
                        Some(Ok(parsed)) => FileBody::from_parsed(&parsed, None, self.view_type),
                        _ => FileBody::Raw {
                            patch: patch.to_string(),
                        },
                    },
                },
            }
        };

        Some(FileView { header, body })
    }

    /// Render every file in flat-list order.
    pub fn file_views(&self) -> Vec<FileView> {
        (0..self.files.len())
            .filter_map(|index| self.file_view(index))
            .collect()
    }

    /// Flattened tree honouring the directory expand set.
    pub fn flat_tree(&self) -> Vec<FlatTreeEntry> {
        self.tree.flatten(self.expansion.expanded_dirs())
    }

    pub fn totals(&self) -> DiffTotals {
        DiffTotals::from_files(&self.files)
    }

    /// Everything the browser needs to draw the current state.
    pub fn snapshot(&self) -> ViewerSnapshot {
        ViewerSnapshot {
            generation: self.loaded_generation,
            view_type: self.view_type,
            totals: self.totals(),
            tree: self.flat_tree(),
            files: self.file_views(),
        }
    }

    // === Accessors ===

    pub fn files(&self) -> &[ChangedFile] {
        &self.files
    }

    pub fn tree(&self) -> &DirectoryNode {
        &self.tree
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selected_file(&self) -> Option<usize> {
        self.selected_file
    }

    /// Whether tokens have been applied for the file at `index`.
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.keys
            .get(index)
            .and_then(|key| self.cache.get(key))
            .is_some_and(|cached| cached.tokens.is_some())
    }
}
