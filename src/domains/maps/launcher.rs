//! Opening generated pages and running the external GeoJSON viewer.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, ChildStderr, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::error::{MapError, MapResult};

/// How long `run_viewer` waits before assuming the viewer has taken over.
pub const VIEWER_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of running the viewer command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerOutcome {
    /// Exited with status 0.
    Displayed,
    /// Exited with a failure status; holds its stderr.
    Failed(String),
    /// Still running at the deadline. It is left running and reaped when it exits.
    TimedOut,
}

impl ViewerOutcome {
    pub fn message(&self, command: &str) -> String {
        match self {
            Self::Displayed => "GeoJSON displayed in browser successfully.".to_string(),
            Self::Failed(stderr) => format!("Error running {}: {}", command, stderr.trim()),
            Self::TimedOut => "GeoJSON display initiated (browser may have opened).".to_string(),
        }
    }
}

fn browser_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}

/// Wait for `child` on a background thread so it never lingers as a zombie.
fn reap(mut child: Child, program: String) -> JoinHandle<io::Result<ExitStatus>> {
    thread::spawn(move || {
        let status = child.wait();
        match &status {
            Ok(status) => debug!("{} exited with {}", program, status),
            Err(e) => warn!("Could not wait for {}: {}", program, e),
        }
        status
    })
}

/// Collect a child's stderr on a helper thread so a chatty child cannot fill the pipe.
fn drain(pipe: Option<ChildStderr>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut stderr = String::new();
        if let Some(mut pipe) = pipe {
            if let Err(e) = pipe.read_to_string(&mut stderr) {
                warn!("Could not read viewer stderr: {}", e);
            }
        }
        stderr
    })
}

/// Open `path` with the platform's default handler without waiting for it.
pub fn open_in_browser(path: &Path) -> MapResult<()> {
    let mut command = browser_command(path);
    let program = command.get_program().to_string_lossy().into_owned();

    let child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| MapError::Launch {
            command: program.clone(),
            source,
        })?;

    info!("Opened {} with {}", path.display(), program);
    reap(child, program);
    Ok(())
}

/// Run `command <path>` and wait up to `timeout` for it to finish.
pub fn run_viewer(command: &str, path: &Path, timeout: Duration) -> MapResult<ViewerOutcome> {
    let mut child = Command::new(command)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| MapError::Launch {
            command: command.to_string(),
            source,
        })?;

    let stderr = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    loop {
        let status = match child.try_wait() {
            Ok(status) => status,
            Err(source) => {
                reap(child, command.to_string());
                return Err(MapError::Launch {
                    command: command.to_string(),
                    source,
                });
            }
        };

        if let Some(status) = status {
            if status.success() {
                debug!("{} exited successfully", command);
                return Ok(ViewerOutcome::Displayed);
            }
            let stderr = stderr.join().unwrap_or_default();
            warn!("{} exited with {}", command, status);
            return Ok(ViewerOutcome::Failed(stderr));
        }

        if Instant::now() >= deadline {
            info!("{} still running after {:?}", command, timeout);
            reap(child, command.to_string());
            return Ok(ViewerOutcome::TimedOut);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_success() {
        let outcome = run_viewer("true", Path::new("map.geojson"), VIEWER_TIMEOUT).unwrap();
        assert_eq!(outcome, ViewerOutcome::Displayed);
        assert_eq!(
            outcome.message("geojsonio"),
            "GeoJSON displayed in browser successfully."
        );
    }

    #[test]
    fn test_viewer_failure_reports_stderr() {
        let outcome = run_viewer("ls", Path::new("/no/such/file.geojson"), VIEWER_TIMEOUT).unwrap();
        match outcome {
            ViewerOutcome::Failed(stderr) => assert!(!stderr.is_empty()),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_viewer_timeout() {
        let outcome = run_viewer("sleep", Path::new("5"), Duration::from_millis(200)).unwrap();
        assert_eq!(outcome, ViewerOutcome::TimedOut);
    }

    /// Zombie children of this process whose command name is `name`.
    fn zombies_named(name: &str) -> usize {
        let me = std::process::id().to_string();
        std::fs::read_dir("/proc")
            .into_iter()
            .flatten()
            .flatten()
            .filter_map(|entry| std::fs::read_to_string(entry.path().join("stat")).ok())
            .filter(|stat| {
                // pid (comm) state ppid ...
                let Some((head, tail)) = stat.rsplit_once(')') else {
                    return false;
                };
                let fields: Vec<&str> = tail.split_whitespace().collect();
                head.ends_with(&format!("({}", name))
                    && fields.first() == Some(&"Z")
                    && fields.get(1) == Some(&me.as_str())
            })
            .count()
    }

    #[test]
    fn test_timed_out_viewer_is_reaped() {
        if !Path::new("/proc/self/stat").exists() {
            return;
        }
        let outcome = run_viewer("sleep", Path::new("0.3"), Duration::from_millis(50)).unwrap();
        assert_eq!(outcome, ViewerOutcome::TimedOut);

        thread::sleep(Duration::from_millis(1500));
        assert_eq!(zombies_named("sleep"), 0);
    }

    #[test]
    fn test_reap_collects_exit_status() {
        let child = Command::new("true").spawn().unwrap();
        let status = reap(child, "true".to_string()).join().unwrap().unwrap();
        assert!(status.success());
    }

    #[test]
    fn test_noisy_viewer_failure_is_not_a_timeout() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("noisy.sh");
        std::fs::write(
            &script,
            "head -c 200000 /dev/zero | tr '\\0' x >&2\nexit 1\n",
        )
        .unwrap();

        let outcome = run_viewer("sh", &script, Duration::from_secs(5)).unwrap();
        match outcome {
            ViewerOutcome::Failed(stderr) => assert_eq!(stderr.len(), 200_000),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_viewer_command() {
        let result = run_viewer(
            "definitely-not-a-geojson-viewer",
            Path::new("x.geojson"),
            VIEWER_TIMEOUT,
        );
        assert!(matches!(result, Err(MapError::Launch { .. })));
    }
}
