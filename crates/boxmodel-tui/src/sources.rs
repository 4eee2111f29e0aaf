//! Handlers the terminal launcher queries: executables on `PATH` and a web
//! search fallback.

use boxmodel_core::engine::{Handler, MatchSink};
use boxmodel_types::ResultItem;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use tracing::{debug, warn};

/// Matches sent per handler and query
const MATCH_LIMIT: usize = 50;

/// Matches handed to the sink at once
const BATCH_SIZE: usize = 10;

/// Spawn a process fully detached from the terminal
fn spawn_silent(program: &str, args: &[&str]) {
    let result = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Err(e) = result {
        warn!("Failed to spawn {program}: {e}");
    }
}

/// Start `program` and write `text` to its stdin. Stdin is closed before
/// returning so the child sees EOF.
fn pipe_to(program: &str, args: &[&str], text: &str) -> io::Result<Child> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    Ok(child)
}

/// Copy text to clipboard using wl-copy or xclip fallback
fn copy_to_clipboard(text: &str) {
    let result = Command::new("wl-copy")
        .arg(text)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if result.is_ok() {
        return;
    }

    if let Err(e) = pipe_to("xclip", &["-selection", "clipboard"], text) {
        warn!("Failed to copy to clipboard: {e}");
    }
}

/// Executables found in the `PATH` directories
pub struct PathHandler {
    /// Name to full path; the first directory listing a name wins
    programs: Vec<(String, PathBuf)>,
}

impl PathHandler {
    pub fn from_env() -> Self {
        let path = std::env::var_os("PATH").unwrap_or_default();
        Self::scan(std::env::split_paths(&path))
    }

    pub fn scan(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut programs = BTreeMap::new();
        for dir in dirs {
            let Ok(entries) = std::fs::read_dir(&dir) else {
                debug!("Skipping unreadable PATH entry {}", dir.display());
                continue;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if !is_executable(&path) {
                    continue;
                }
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    programs.entry(name.to_string()).or_insert(path);
                }
            }
        }
        debug!("Found {} executables", programs.len());
        Self {
            programs: programs.into_iter().collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.programs.len()
    }

    /// Best fuzzy matches of `command` among the program names
    fn search(&self, command: &str) -> Vec<&(String, PathBuf)> {
        let pattern = Pattern::parse(command, CaseMatching::Smart, Normalization::Smart);
        let mut matcher = Matcher::new(Config::DEFAULT);
        let mut buf = Vec::new();

        let mut scored: Vec<_> = self
            .programs
            .iter()
            .filter_map(|program| {
                let haystack = Utf32Str::new(&program.0, &mut buf);
                let mut score = pattern.score(haystack, &mut matcher)?;
                if program.0 == command {
                    score = score.saturating_add(1000);
                } else if program.0.starts_with(command) {
                    score = score.saturating_add(500);
                }
                Some((score, program))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.0.len().cmp(&b.1.0.len())));
        scored.truncate(MATCH_LIMIT);
        scored.into_iter().map(|(_, program)| program).collect()
    }
}

fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path)
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

/// Split query text into the command word and the rest, which is kept
/// verbatim as arguments
fn split_command(query: &str) -> (&str, &str) {
    let query = query.trim_start();
    match query.find(char::is_whitespace) {
        Some(index) => query.split_at(index),
        None => (query, ""),
    }
}

impl Handler for PathHandler {
    fn id(&self) -> &str {
        "path"
    }

    fn handle(&self, query: &str, sink: &MatchSink) {
        let (command, args) = split_command(query);
        if command.is_empty() {
            return;
        }

        let items: Vec<ResultItem> = self
            .search(command)
            .into_iter()
            .map(|(name, path)| {
                ResultItem::new(format!("{name}{args}"), format!("{name}{args}"))
                    .with_subtext(path.display().to_string())
                    .with_completion(format!("{name} "))
                    .with_action("run", "Run")
                    .with_action("copy-path", "Copy path")
            })
            .collect();

        for batch in items.chunks(BATCH_SIZE) {
            if !sink.add(batch.to_vec()) {
                debug!("Query for {command:?} canceled");
                return;
            }
        }
    }

    fn activate(&self, item: &ResultItem, action: usize) {
        match action {
            0 => {
                let mut words = item.id.split_whitespace();
                let Some(program) = words.next() else {
                    return;
                };
                let args: Vec<&str> = words.collect();
                debug!("Running {program} {args:?}");
                spawn_silent(program, &args);
            }
            1 => {
                if let Some(path) = &item.subtext {
                    copy_to_clipboard(path);
                }
            }
            _ => warn!("Unknown action {action} for {}", item.id),
        }
    }
}

/// Offers a web search for any text
pub struct WebSearchHandler {
    base_url: String,
}

impl WebSearchHandler {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, query: &str) -> String {
        format!("{}{}", self.base_url, urlencoding::encode(query.trim()))
    }
}

impl Handler for WebSearchHandler {
    fn id(&self) -> &str {
        "web"
    }

    fn handle(&self, _query: &str, _sink: &MatchSink) {}

    fn fallbacks(&self, query: &str) -> Vec<ResultItem> {
        let text = if query.trim().is_empty() {
            "Search the web".to_string()
        } else {
            format!("Search the web for \"{}\"", query.trim())
        };
        vec![
            ResultItem::new("web-search", text)
                .with_subtext(self.url(query))
                .with_action("open", "Open in browser")
                .with_action("copy-url", "Copy URL"),
        ]
    }

    fn activate(&self, item: &ResultItem, action: usize) {
        let Some(url) = &item.subtext else {
            return;
        };
        match action {
            0 => spawn_silent("xdg-open", &[url]),
            1 => copy_to_clipboard(url),
            _ => warn!("Unknown action {action} for {}", item.id),
        }
    }
}
