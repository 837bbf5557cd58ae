use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use log::info;
use rand::Rng;
use serde::{Serialize, de::DeserializeOwned};

use crate::tree::{error::PersistError, search_tree::SearchTree, snapshot::TreeSnapshot};

/// File extension appended to every tree artifact name.
pub const TREE_FILE_EXTENSION: &str = "json";

/// Synthesize an artifact name from the current time and a 3-digit suffix,
/// e.g. `1760601600_042`.
pub fn generated_tree_name() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);
    format!("{secs}_{suffix:03}")
}

/// Path of the artifact called `name` inside `dir`.
pub fn tree_path(dir: impl AsRef<Path>, name: &str) -> PathBuf {
    dir.as_ref().join(format!("{name}.{TREE_FILE_EXTENSION}"))
}

/// Serialize the whole tree to `<dir>/<name>.json`.
/// Without a name one is generated. Returns the path written.
pub fn save_tree<S>(
    tree: &SearchTree<S>,
    dir: impl AsRef<Path>,
    name: Option<&str>,
) -> Result<PathBuf, PersistError>
where
    S: Clone + Serialize,
{
    let name = match name {
        Some(name) => name.to_string(),
        None => generated_tree_name(),
    };
    let path = tree_path(dir, &name);

    let file = File::create(&path).map_err(|source| PersistError::Create {
        path: path.clone(),
        source,
    })?;
    write_snapshot(file, &tree.snapshot(), &path)?;

    info!(
        "saved search tree with {} nodes to {}",
        tree.node_count(),
        path.display()
    );
    Ok(path)
}

/// Encode `snapshot` as JSON into `sink`. Failures of the sink itself are
/// reported as [`PersistError::Write`], serialization failures as
/// [`PersistError::Encode`].
pub(crate) fn write_snapshot<W, S>(
    sink: W,
    snapshot: &TreeSnapshot<S>,
    path: &Path,
) -> Result<(), PersistError>
where
    W: Write,
    S: Serialize,
{
    let write_error = |source: io::Error| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(sink);
    serde_json::to_writer(&mut writer, snapshot).map_err(|err| {
        if err.is_io() {
            write_error(io::Error::from(err))
        } else {
            PersistError::Encode(err)
        }
    })?;
    writer.flush().map_err(write_error)
}

/// Read a tree written by [`save_tree`].
pub fn load_tree<S>(path: impl AsRef<Path>) -> Result<SearchTree<S>, PersistError>
where
    S: DeserializeOwned,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PersistError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let snapshot: TreeSnapshot<S> =
        serde_json::from_reader(BufReader::new(file)).map_err(PersistError::Decode)?;
    let tree = SearchTree::from_snapshot(snapshot)?;

    info!(
        "loaded search tree with {} nodes from {}",
        tree.node_count(),
        path.display()
    );
    Ok(tree)
}
