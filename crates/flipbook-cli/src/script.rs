//! Parsing for `--script` steps and `--pages` ranges

use anyhow::{Context, Result, anyhow, bail};
use flipbook_core::Key;
use flipbook_runtime::ViewerCommand;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

/// One step of a scripted viewing session
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Next,
    Previous,
    First,
    Last,
    GoTo(usize),
    /// Press at 0, drag to `dx`, release
    Drag(f32),
    Key(Key),
    Thumbnails,
    Wait(Duration),
}

impl Step {
    pub fn commands(&self) -> Vec<ViewerCommand> {
        match self {
            Step::Next => vec![ViewerCommand::Next],
            Step::Previous => vec![ViewerCommand::Previous],
            Step::First => vec![ViewerCommand::First],
            Step::Last => vec![ViewerCommand::Last],
            Step::GoTo(page) => vec![ViewerCommand::GoTo { page: *page }],
            Step::Drag(dx) => vec![
                ViewerCommand::PointerDown { x: 0.0 },
                ViewerCommand::PointerMove { x: *dx },
                ViewerCommand::PointerUp { x: *dx },
            ],
            Step::Key(key) => vec![ViewerCommand::Key { key: *key }],
            Step::Thumbnails => vec![ViewerCommand::RequestThumbnails { pages: None }],
            Step::Wait(_) => Vec::new(),
        }
    }
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (s, None),
        };

        let step = match (name.to_ascii_lowercase().as_str(), arg) {
            ("next", None) => Step::Next,
            ("prev" | "previous", None) => Step::Previous,
            ("first", None) => Step::First,
            ("last", None) => Step::Last,
            ("thumbs" | "thumbnails", None) => Step::Thumbnails,
            ("goto", Some(page)) => Step::GoTo(
                page.parse()
                    .with_context(|| format!("Invalid page '{}' in '{}'", page, s))?,
            ),
            ("drag", Some(dx)) => {
                let dx: f32 = dx
                    .parse()
                    .with_context(|| format!("Invalid drag distance '{}' in '{}'", dx, s))?;
                if !dx.is_finite() {
                    bail!("Drag distance must be finite in '{}'", s);
                }
                Step::Drag(dx)
            }
            ("key", Some(key)) => Step::Key(parse_key(key)?),
            ("wait", Some(ms)) => Step::Wait(Duration::from_millis(
                ms.parse()
                    .with_context(|| format!("Invalid wait '{}' in '{}'", ms, s))?,
            )),
            _ => bail!("Unknown script step '{}'", s),
        };
        Ok(step)
    }
}

fn parse_key(name: &str) -> Result<Key> {
    let key = match name.to_ascii_lowercase().as_str() {
        "left" => Key::Left,
        "right" => Key::Right,
        "home" => Key::Home,
        "end" => Key::End,
        "escape" | "esc" => Key::Escape,
        "plus" | "+" => Key::Plus,
        "minus" | "-" => Key::Minus,
        "f" => Key::F,
        other => bail!("Unknown key '{}'", other),
    };
    Ok(key)
}

/// Parse a comma separated script like `next,goto:5,drag:-80`
pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    script
        .split(',')
        .filter(|step| !step.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Parse `n` or `a-b` (1-indexed, inclusive) and check it against `total`
pub fn parse_page_range(text: &str, total: usize) -> Result<RangeInclusive<usize>> {
    let text = text.trim();
    let (start, end) = match text.split_once('-') {
        Some((start, end)) => (start.trim(), end.trim()),
        None => (text, text),
    };

    let start: usize = start
        .parse()
        .map_err(|_| anyhow!("Invalid page range '{}'", text))?;
    let end: usize = end
        .parse()
        .map_err(|_| anyhow!("Invalid page range '{}'", text))?;

    if start == 0 || start > end {
        bail!("Invalid page range '{}'", text);
    }
    if end > total {
        bail!(
            "Page range '{}' is outside the document (1-{})",
            text,
            total
        );
    }
    Ok(start..=end)
}
