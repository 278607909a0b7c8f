use std::collections::HashSet;

use nova_framework::Database;
use nova_types::ProjectId;

use crate::config::ErraiConfig;

/// Fully qualified names of the types a project declares bindable through
/// configuration rather than `@Bindable`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindableTypes {
    names: HashSet<String>,
}

impl BindableTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut types = Self::new();
        types.extend(names);
        types
    }

    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name: String = name.into();
            let name = name.trim();
            if !name.is_empty() {
                self.names.insert(name.to_string());
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Union of the whitespace separated `errai.ui.bindableTypes` values of
/// every `ErraiApp.properties` file in `project`, plus
/// [`ErraiConfig::extra_bindable_types`].
pub fn configured_bindable_types(
    db: &dyn Database,
    project: ProjectId,
    config: &ErraiConfig,
) -> BindableTypes {
    let mut types = BindableTypes::from_names(config.extra_bindable_types.iter().cloned());

    for file in db.files(project) {
        let is_config_file = db
            .file_path(file)
            .and_then(|path| path.file_name())
            .is_some_and(|name| name.to_str() == Some(config.properties_file_name.as_str()));
        if !is_config_file {
            continue;
        }
        let Some(text) = db.file_text(file) else {
            tracing::debug!(file = file.to_raw(), "configuration file has no text; skipping");
            continue;
        };

        let parsed = nova_properties::parse(text);
        for entry in parsed.by_key(&config.bindable_types_key) {
            types.extend(entry.value.split_whitespace());
        }
    }

    types
}
