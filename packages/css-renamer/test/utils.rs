//! Stylesheet Renaming Test Utils

#![allow(dead_code)]

use css_renamer::{
    rename_stylesheet, ClassRenamingOptions, RenameOutput, RenamingMap, StylesheetRenamer,
    VariableRenamingOptions,
};
use std::sync::{Arc, Mutex};

pub const INPUT: &str = ".container, .full-height .image.full-width {}";

pub const KEYFRAMES: &str = "@-webkit-keyframes rotate {
  from { transform: rotate(0deg); }
  to { transform: rotate(360deg); }
}

@keyframes fade {
  from{opacity: 0}
  0.1% {opacity: 0.1}
  90% {opacity: 0.9}
  to{opacity: 1}
}";

pub fn rename_classes(css: &str, options: ClassRenamingOptions) -> RenameOutput {
    let mut renamer = StylesheetRenamer::new().with_classes(options).unwrap();
    rename_stylesheet(css, &mut renamer).unwrap()
}

pub fn rename_variables(css: &str, options: VariableRenamingOptions) -> RenameOutput {
    let mut renamer = StylesheetRenamer::new().with_variables(options).unwrap();
    rename_stylesheet(css, &mut renamer).unwrap()
}

/// A callback that stores every map it is handed.
pub fn capture_maps() -> (
    Box<dyn FnMut(&RenamingMap) + Send>,
    Arc<Mutex<Vec<RenamingMap>>>,
) {
    let maps = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&maps);
    let callback = Box::new(move |map: &RenamingMap| sink.lock().unwrap().push(map.clone()));
    (callback, maps)
}

pub fn entries(map: &RenamingMap) -> Vec<(&str, &str)> {
    map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}
