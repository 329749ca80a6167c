pub mod config;
pub mod ytdlp;

use log::error;
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("{0}")]
    IOError(#[from] std::io::Error),
}

pub fn is_command_available<C: AsRef<str>>(command: C) -> bool {
    let command = command.as_ref();

    // Explicit paths are checked directly instead of walking PATH.
    let path = std::path::Path::new(command);
    if path.components().count() > 1 {
        return path.is_file();
    }

    let system_path = match env::var_os("PATH") {
        Some(list) => list,
        None => {
            error!("System path was not accessible? dependencies cannot be located!");
            return false;
        }
    };

    env::split_paths(&system_path).any(|mut dir| {
        dir.push(command);
        if cfg!(windows) {
            let mut path_with_ext = dir.clone();
            path_with_ext.set_extension("exe");
            if path_with_ext.is_file() {
                return true;
            }
        }
        dir.is_file()
    })
}
