use crate::utils::SpawnError;
use log::{debug, warn};
use std::{
    io::Read,
    process::{Child, Output, Stdio},
    thread,
};

pub struct YtDlp {
    pub executable: String,
    pub args: Vec<String>,
}

impl YtDlp {
    pub fn new() -> Self {
        debug!("Initializing new yt-dlp instance.");
        Self {
            executable: "yt-dlp".to_string(),
            args: vec![],
        }
    }

    pub fn with_executable<S: Into<String>>(executable: S) -> Self {
        Self {
            executable: executable.into(),
            ..Self::new()
        }
    }
}

#[derive(Default, Debug)]
pub struct YtDlpArgs {
    pub url: String,
    pub quiet: bool,
    pub no_warnings: bool,
    pub flat_playlist: bool,
    pub force_generic_extractor: bool,
    pub ignore_errors: bool,
    pub dump_single_json: bool,
}

impl YtDlpArgs {
    fn to_args(&self) -> Vec<String> {
        let mut temp_args = vec![];

        if self.quiet {
            temp_args.push(String::from("--quiet"));
        }

        if self.no_warnings {
            temp_args.push(String::from("--no-warnings"));
        }

        if self.flat_playlist {
            temp_args.push(String::from("--flat-playlist"));
        }

        if self.force_generic_extractor {
            temp_args.push(String::from("--force-generic-extractor"));
        }

        if self.ignore_errors {
            temp_args.push(String::from("--ignore-errors"));
        }

        if self.dump_single_json {
            temp_args.push(String::from("--dump-single-json"));
        }

        temp_args.push(String::from("--"));
        temp_args.push(self.url.clone());

        temp_args
    }
}

/// A running yt-dlp process.
///
/// The child is killed and reaped when the session is dropped before it
/// exited, including when [`YtDlpSession::finish`] fails halfway.
pub struct YtDlpSession {
    child: Child,
}

impl YtDlpSession {
    pub fn new(child: Child) -> Self {
        Self { child }
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    pub fn finish(mut self) -> Result<Output, SpawnError> {
        // stderr is drained on its own thread so a chatty yt-dlp cannot
        // block on a full pipe while stdout is read.
        let stderr_reader = self.child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut buffer = vec![];
                stderr.read_to_end(&mut buffer).map(|_| buffer)
            })
        });

        let mut stdout = vec![];
        if let Some(mut pipe) = self.child.stdout.take() {
            pipe.read_to_end(&mut stdout)?;
        }

        let stderr = match stderr_reader {
            Some(handle) => handle
                .join()
                .map_err(|_| std::io::Error::other("stderr reader panicked"))??,
            None => vec![],
        };

        let status = self.child.wait()?;

        Ok(Output {
            status,
            stdout,
            stderr,
        })
    }
}

impl Drop for YtDlpSession {
    fn drop(&mut self) {
        if let Ok(Some(_)) = self.child.try_wait() {
            return;
        }

        debug!("Releasing unfinished yt-dlp process {}", self.child.id());
        if let Err(e) = self.child.kill() {
            warn!("Failed to kill yt-dlp process: {}", e);
        }
        if let Err(e) = self.child.wait() {
            warn!("Failed to reap yt-dlp process: {}", e);
        }
    }
}

pub trait YtDlpSpawn {
    fn spawn(&mut self, args: &YtDlpArgs) -> Result<YtDlpSession, SpawnError>;
}

impl YtDlpSpawn for YtDlp {
    fn spawn(&mut self, args: &YtDlpArgs) -> Result<YtDlpSession, SpawnError> {
        let mut temp_args = self.args.clone();
        temp_args.extend(args.to_args());

        debug!(
            "Executing command: {} {}",
            self.executable,
            temp_args.join(" ")
        );

        let child = std::process::Command::new(&self.executable)
            .args(temp_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let session = YtDlpSession::new(child);
        debug!("Spawned yt-dlp process {}", session.id());
        Ok(session)
    }
}
