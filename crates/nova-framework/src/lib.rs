//! Framework analyzer abstraction.
//!
//! Framework analyzers (Errai, ...) layer framework-specific knowledge on top
//! of the core class model: they query a [`Database`] for classes, hierarchy
//! and project resources, and report diagnostics.

pub mod annotations;
pub mod cache;
pub mod hierarchy;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use nova_hir::framework::ClassData;
use nova_types::{ClassId, Diagnostic, FileId, ProjectId};

pub use annotations::{find_annotated, generic_type_arguments, is_annotated, AnnotatedElement};
pub use cache::{CacheProvider, ElementCache};
pub use hierarchy::{
    all_methods, declared_supertypes, is_assignable, is_subtype, supertypes_of, top_level_class,
    MethodRef, JAVA_LANG_OBJECT,
};

/// Query interface used by framework analyzers.
///
/// In real Nova this is backed by the incremental database. For unit tests we
/// provide a small in-memory implementation.
pub trait Database {
    fn class(&self, class: ClassId) -> Option<&ClassData>;
    /// Shared handle to the class declaration. Caches key on this handle and
    /// only ever hold it weakly.
    fn class_element(&self, class: ClassId) -> Option<Arc<ClassData>>;
    fn project_of_class(&self, class: ClassId) -> Option<ProjectId>;
    fn classes(&self, project: ProjectId) -> Vec<ClassId>;
    /// Resolve a fully qualified class name visible from `project`.
    fn resolve_class(&self, project: ProjectId, name: &str) -> Option<ClassId>;

    fn files(&self, project: ProjectId) -> Vec<FileId>;
    fn file_path(&self, file: FileId) -> Option<&Path>;
    fn file_text(&self, file: FileId) -> Option<&str>;

    fn has_class_on_classpath_prefix(&self, project: ProjectId, prefix: &str) -> bool;

    /// Monotonic counter bumped on every change to the database contents.
    fn revision(&self) -> u64;
}

#[derive(Debug)]
struct FileEntry {
    project: ProjectId,
    path: PathBuf,
    text: String,
}

/// Simple in-memory database for unit tests and examples.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    next_project: u32,
    next_class: u32,
    next_file: u32,
    revision: u64,
    class_data: HashMap<ClassId, Arc<ClassData>>,
    class_project: HashMap<ClassId, ProjectId>,
    class_names: HashMap<(ProjectId, String), ClassId>,
    files: HashMap<FileId, FileEntry>,
    classpath_classes: HashMap<ProjectId, HashSet<String>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_project(&mut self) -> ProjectId {
        let id = ProjectId::new(self.next_project);
        self.next_project += 1;
        self.revision += 1;
        id
    }

    pub fn add_classpath_class(&mut self, project: ProjectId, binary_name: &str) {
        self.classpath_classes
            .entry(project)
            .or_default()
            .insert(binary_name.replace('/', "."));
        self.revision += 1;
    }

    /// Adds a class; a later class with the same name shadows the earlier one.
    pub fn add_class(&mut self, project: ProjectId, class: ClassData) -> ClassId {
        let id = ClassId::new(self.next_class);
        self.next_class += 1;
        self.class_project.insert(id, project);
        self.class_names.insert((project, class.name.clone()), id);
        self.class_data.insert(id, Arc::new(class));
        self.revision += 1;
        id
    }

    /// Replaces the declaration of `id`. The previous element handle is
    /// released, so caches keyed on it drop their entries.
    pub fn update_class(&mut self, id: ClassId, class: ClassData) {
        let Some(project) = self.class_project.get(&id).copied() else {
            tracing::debug!(class = id.to_raw(), "update_class called with unknown ClassId");
            return;
        };
        if let Some(previous) = self.class_data.get(&id) {
            if previous.name != class.name {
                self.class_names.remove(&(project, previous.name.clone()));
            }
        }
        self.class_names.insert((project, class.name.clone()), id);
        self.class_data.insert(id, Arc::new(class));
        self.revision += 1;
    }

    pub fn add_file(
        &mut self,
        project: ProjectId,
        path: impl Into<PathBuf>,
        text: impl Into<String>,
    ) -> FileId {
        let id = FileId::new(self.next_file);
        self.next_file += 1;
        self.files.insert(
            id,
            FileEntry {
                project,
                path: path.into(),
                text: text.into(),
            },
        );
        self.revision += 1;
        id
    }

    pub fn set_file_text(&mut self, file: FileId, text: impl Into<String>) {
        if let Some(entry) = self.files.get_mut(&file) {
            entry.text = text.into();
            self.revision += 1;
        }
    }
}

impl Database for MemoryDatabase {
    fn class(&self, class: ClassId) -> Option<&ClassData> {
        self.class_data.get(&class).map(Arc::as_ref)
    }

    fn class_element(&self, class: ClassId) -> Option<Arc<ClassData>> {
        self.class_data.get(&class).cloned()
    }

    fn project_of_class(&self, class: ClassId) -> Option<ProjectId> {
        self.class_project.get(&class).copied()
    }

    fn classes(&self, project: ProjectId) -> Vec<ClassId> {
        let mut out: Vec<ClassId> = self
            .class_project
            .iter()
            .filter(|(_, p)| **p == project)
            .map(|(id, _)| *id)
            .collect();
        out.sort();
        out
    }

    fn resolve_class(&self, project: ProjectId, name: &str) -> Option<ClassId> {
        self.class_names.get(&(project, name.to_string())).copied()
    }

    fn files(&self, project: ProjectId) -> Vec<FileId> {
        let mut out: Vec<FileId> = self
            .files
            .iter()
            .filter(|(_, entry)| entry.project == project)
            .map(|(id, _)| *id)
            .collect();
        out.sort();
        out
    }

    fn file_path(&self, file: FileId) -> Option<&Path> {
        self.files.get(&file).map(|entry| entry.path.as_path())
    }

    fn file_text(&self, file: FileId) -> Option<&str> {
        self.files.get(&file).map(|entry| entry.text.as_str())
    }

    fn has_class_on_classpath_prefix(&self, project: ProjectId, prefix: &str) -> bool {
        let prefix = prefix.replace('/', ".");
        let on_classpath = self
            .classpath_classes
            .get(&project)
            .is_some_and(|classes| classes.iter().any(|name| name.starts_with(&prefix)));
        on_classpath
            || self
                .class_names
                .keys()
                .any(|(p, name)| *p == project && name.starts_with(&prefix))
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

/// Extension point for framework analyzers.
pub trait FrameworkAnalyzer: Send + Sync {
    fn applies_to(&self, db: &dyn Database, project: ProjectId) -> bool;
    fn diagnostics(&self, db: &dyn Database, class: ClassId) -> Vec<Diagnostic>;
}

#[derive(Default)]
pub struct AnalyzerRegistry {
    analyzers: Vec<Box<dyn FrameworkAnalyzer>>,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, analyzer: Box<dyn FrameworkAnalyzer>) {
        self.analyzers.push(analyzer);
    }

    pub fn framework_diagnostics(&self, db: &dyn Database, class: ClassId) -> Vec<Diagnostic> {
        let Some(project) = db.project_of_class(class) else {
            return Vec::new();
        };
        self.analyzers
            .iter()
            .filter(|a| a.applies_to(db, project))
            .flat_map(|a| a.diagnostics(db, class))
            .collect()
    }
}
