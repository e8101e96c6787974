use std::path::Path;

use dlg_core::DialogueError;
use dlg_store::{DialogueStore, StoreOptions};

pub(crate) fn store_options(seed: Option<u32>) -> StoreOptions {
    StoreOptions { random_seed: seed }
}

/// Loads an existing dialogue file into a fresh store.
pub(crate) fn load_store(path: &Path, seed: Option<u32>) -> Result<DialogueStore, DialogueError> {
    if !path.exists() {
        return Err(DialogueError::new(
            "CLI_FILE_NOT_FOUND",
            format!("Dialogue file does not exist: {}", path.display()),
        ));
    }
    let mut store = DialogueStore::new(store_options(seed));
    store.import_from_file(path)?;
    Ok(store)
}

/// Editors start from the file when it exists and from an empty dialogue otherwise.
pub(crate) fn open_store(path: &Path, seed: Option<u32>) -> Result<DialogueStore, DialogueError> {
    if path.exists() {
        return load_store(path, seed);
    }
    log::info!("{} not found, starting empty", path.display());
    Ok(DialogueStore::new(store_options(seed)))
}

pub(crate) fn create_store_file(
    path: &Path,
    force: bool,
    seed: Option<u32>,
) -> Result<DialogueStore, DialogueError> {
    if path.exists() && !force {
        return Err(DialogueError::new(
            "CLI_FILE_EXISTS",
            format!(
                "Refusing to overwrite {} (pass --force to replace it).",
                path.display()
            ),
        ));
    }
    let store = DialogueStore::new(store_options(seed));
    store.export_to_file(path)?;
    Ok(store)
}

#[cfg(test)]
mod document_tests {
    use super::*;
    use crate::cli_test_support::*;

    #[test]
    fn load_store_requires_existing_file() {
        let error = load_store(&temp_path("missing.json"), Some(1)).expect_err("missing");
        assert_eq!(error.code, "CLI_FILE_NOT_FOUND");
    }

    #[test]
    fn open_store_starts_empty_without_file() {
        let store = open_store(&temp_path("fresh.json"), Some(1)).expect("open should pass");
        assert!(store.dialogue().lines.is_empty());
    }

    #[test]
    fn create_store_file_refuses_to_overwrite_without_force() {
        let path = temp_path("created.json");
        create_store_file(&path, false, Some(1)).expect("first create");
        let error = create_store_file(&path, false, Some(1)).expect_err("second create");
        assert_eq!(error.code, "CLI_FILE_EXISTS");
        create_store_file(&path, true, Some(1)).expect("forced create");

        let loaded = load_store(&path, Some(1)).expect("created file should load");
        assert!(loaded.dialogue().lines.is_empty());
    }
}
