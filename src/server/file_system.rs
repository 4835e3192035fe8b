use std::fmt;
use std::fs;
use std::io;
use std::io::Read;

pub const CHUNK_SIZE: usize = 512;

const MAX_NAME_LEN: usize = 63;

/// A file pulled fully into memory for one response. Nothing is cached
/// across requests.
pub struct File {
    pub name: String,
    pub contents: Vec<u8>,
    pub size: usize
}

#[derive(Debug)]
pub enum FileError {
    NotFound,
    Read(io::Error)
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FileError::NotFound => write!(f, "File not found"),
            FileError::Read(ref e) => write!(f, "Error reading file:{}", e)
        }
    }
}

/// Loads the file at `path` in CHUNK_SIZE pieces until EOF. Any open
/// failure counts as NotFound, permission problems included. An empty
/// file is a success with size 0.
pub fn read_file(path: &str) -> Result<File, FileError> {
    let mut handle = match fs::File::open(path) {
        Ok(handle) => handle,
        Err(_) => return Err(FileError::NotFound)
    };

    let mut contents: Vec<u8> = Vec::with_capacity(CHUNK_SIZE);
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        match handle.read(&mut chunk) {
            Ok(0) => break,
            Ok(count) => contents.extend_from_slice(&chunk[..count]),
            Err(e) => return Err(FileError::Read(e))
        }
    }

    let size = contents.len();
    Ok(File {
        name: path.chars().take(MAX_NAME_LEN).collect(),
        contents,
        size
    })
}
