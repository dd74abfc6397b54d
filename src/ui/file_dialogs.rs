use std::path::{Path, PathBuf};

use fltk::dialog::{FileDialogType, NativeFileChooser};

/// Ask for a workspace folder. Returns `None` when the dialog is cancelled.
pub fn native_folder_dialog(start_dir: Option<&Path>) -> Option<PathBuf> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseDir);
    nfc.set_title("Open Folder");
    if let Some(dir) = start_dir {
        let _ = nfc.set_directory(&dir);
    }
    nfc.show();
    let folder = nfc.filename();
    if folder.as_os_str().is_empty() {
        None
    } else {
        Some(folder)
    }
}
