use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A named set of test files, reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestGroup {
    pub name: String,
    pub files: Vec<PathBuf>,
}

/// Turn `[NAME=]PATH` arguments into ordered groups.
///
/// A directory adds its regular files, sorted by name, to group NAME or to a
/// group named after the directory. A plain file joins group NAME or the group
/// of its parent directory. Groups appear in order of first mention.
pub fn discover<S: AsRef<str>>(args: &[S]) -> io::Result<Vec<TestGroup>> {
    let mut groups: Vec<TestGroup> = Vec::new();

    for arg in args {
        let (name, path) = split_arg(arg.as_ref());
        let path = Path::new(path);

        let (default_name, files) = if path.is_dir() {
            (path.display().to_string(), list_files(path)?)
        } else if path.is_file() {
            let parent = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            (parent.display().to_string(), vec![path.to_path_buf()])
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("test path '{}' does not exist", path.display()),
            ));
        };

        let name = name.map(str::to_owned).unwrap_or(default_name);
        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.files.extend(files),
            None => groups.push(TestGroup { name, files }),
        }
    }

    Ok(groups)
}

/// An argument that names an existing path, or whose text before `=` looks
/// like a path, is taken whole.
fn split_arg(arg: &str) -> (Option<&str>, &str) {
    if Path::new(arg).exists() {
        return (None, arg);
    }
    match arg.split_once('=') {
        Some((name, path)) if !name.is_empty() && !name.contains(['/', '\\']) => {
            (Some(name), path)
        }
        _ => (None, arg),
    }
}

fn list_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
