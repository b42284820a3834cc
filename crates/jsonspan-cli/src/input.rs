//! Input files joined into one line stream.

use std::{
    collections::VecDeque,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use flate2::read::MultiGzDecoder;
use jsonspan::{ChunkSource, LineSource};
use log::debug;

const STDIN: &str = "-";

type Reader = Box<dyn BufRead>;

/// Opens `path` for reading. `-` is standard input; a `.gz` suffix is
/// decompressed on the fly.
pub fn open(path: &Path) -> io::Result<Reader> {
    if path.as_os_str() == STDIN {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Lines of every input in order, as if the files were concatenated.
///
/// Files are opened lazily, one at a time. Errors name the file they came
/// from.
pub struct Inputs {
    pending: VecDeque<PathBuf>,
    current: Option<(PathBuf, LineSource<Reader>)>,
}

impl Inputs {
    /// Reads `paths`, or standard input when `paths` is empty.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        let mut pending = VecDeque::from(paths);
        if pending.is_empty() {
            pending.push_back(PathBuf::from(STDIN));
        }
        Self {
            pending,
            current: None,
        }
    }
}

fn with_path(path: &Path, err: &io::Error) -> io::Error {
    io::Error::new(err.kind(), format!("{}: {err}", path.display()))
}

impl ChunkSource for Inputs {
    type Chunk = String;
    type Error = io::Error;

    fn next_chunk(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some((path, lines)) = &mut self.current {
                match lines.next_chunk() {
                    Ok(Some(line)) => return Ok(Some(line)),
                    Ok(None) => {
                        debug!("{}: {} lines", path.display(), lines.lines_read());
                        self.current = None;
                    }
                    Err(err) => return Err(with_path(path, &err)),
                }
            }
            let Some(path) = self.pending.pop_front() else {
                return Ok(None);
            };
            let reader = open(&path).map_err(|err| with_path(&path, &err))?;
            self.current = Some((path, LineSource::new(reader)));
        }
    }
}
