//! Line-oriented drawing scripts replayed through the controller.
//!
//! ```text
//! # 8x8 heart
//! size 8 8
//! color #ff2d55
//! drag 1,1 2,1 5,1 6,1
//! click 3 2
//! save
//! wait
//! show
//! ```

use crate::app::{Action, App, NoticeLevel};
use crate::editor::{Color, DrawMode, Grid, PRIMARY_BUTTON};
use crate::runtime::Runtime;
use crate::{Error, Result};
use std::io::{BufRead, Write};

#[derive(Debug)]
pub enum Step {
    Actions(Vec<Action>),
    /// Print the grid
    Show,
    /// Print the gallery list
    Gallery,
    /// Block until every outstanding effect has completed
    Wait,
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<Step>> {
    let err = |message: String| Error::ScriptError { line: line_no, message };
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let cmd = words.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let num = |i: usize| -> Result<u32> {
        let raw = args.get(i).ok_or_else(|| err(format!("{} expects more arguments", cmd)))?;
        raw.parse().map_err(|_| err(format!("not a number: {:?}", raw)))
    };
    let one = |a: Action| -> Result<Option<Step>> { Ok(Some(Step::Actions(vec![a]))) };

    match cmd.as_str() {
        "size" => one(Action::Resize { width: num(0)?, height: num(1)? }),
        "width" => one(Action::SetWidth(num(0)?)),
        "height" => one(Action::SetHeight(num(0)?)),
        "color" => {
            let raw = args.first().ok_or_else(|| err("color expects a value".into()))?;
            let c: Color = raw.parse().map_err(|e: Error| err(e.to_string()))?;
            one(Action::SetColor(c))
        }
        "paint" => one(Action::SetMode(DrawMode::Paint)),
        "erase" => one(Action::SetMode(DrawMode::Erase)),
        "click" => one(Action::PointerDown { x: num(0)?, y: num(1)? }),
        "drag" => {
            let mut actions = Vec::with_capacity(args.len());
            for (i, pair) in args.iter().enumerate() {
                let (x, y) = pair
                    .split_once(',')
                    .and_then(|(x, y)| Some((x.parse().ok()?, y.parse().ok()?)))
                    .ok_or_else(|| err(format!("expected X,Y, got {:?}", pair)))?;
                actions.push(if i == 0 {
                    Action::PointerDown { x, y }
                } else {
                    Action::PointerEnter { x, y, buttons: PRIMARY_BUTTON }
                });
            }
            Ok(Some(Step::Actions(actions)))
        }
        "clear" => one(Action::Clear),
        "download" => one(Action::Download),
        "save" => one(Action::Save),
        "refresh" => one(Action::Refresh),
        "delete" => {
            let raw = args.first().ok_or_else(|| err("delete expects an id".into()))?;
            let id = raw.parse().map_err(|_| err(format!("not an id: {:?}", raw)))?;
            one(Action::Delete(id))
        }
        "show" => Ok(Some(Step::Show)),
        "gallery" => Ok(Some(Step::Gallery)),
        "wait" => Ok(Some(Step::Wait)),
        other => Err(err(format!("unknown command {:?}", other))),
    }
}

/// Text picture of the grid: `.` empty, `#` colored
pub fn render_grid(grid: &Grid) -> String {
    let mut s = String::with_capacity(((grid.width() + 1) * grid.height()) as usize);
    for row in grid.rows() {
        s.extend(row.iter().map(|c| if c.is_some() { '#' } else { '.' }));
        s.push('\n');
    }
    s
}

/// Replay a script, writing grid dumps and notices to `out`. The gallery is
/// loaded before the first line runs, and outstanding effects are drained
/// before returning.
pub fn run<R: BufRead, W: Write>(input: R, app: &mut App, rt: &mut Runtime, out: &mut W) -> Result<()> {
    rt.dispatch(app, Action::Init);
    rt.run_until_idle(app);
    flush_notices(app, out)?;

    for (i, line) in input.lines().enumerate() {
        let line = line?;
        let Some(step) = parse_line(i + 1, &line)? else {
            continue;
        };
        match step {
            Step::Actions(actions) => {
                for a in actions {
                    rt.dispatch(app, a);
                }
            }
            Step::Show => {
                writeln!(
                    out,
                    "{}x{} color {} mode {:?}",
                    app.editor.width(),
                    app.editor.height(),
                    app.editor.color(),
                    app.editor.mode()
                )?;
                write!(out, "{}", render_grid(app.editor.grid()))?;
            }
            Step::Gallery => {
                for a in app.gallery.items() {
                    writeln!(out, "#{} {}x{} {} {}", a.id, a.width, a.height, a.created_at, a.url)?;
                }
            }
            Step::Wait => rt.run_until_idle(app),
        }
        flush_notices(app, out)?;
    }
    rt.run_until_idle(app);
    flush_notices(app, out)
}

fn flush_notices<W: Write>(app: &mut App, out: &mut W) -> Result<()> {
    for n in app.take_notices() {
        let tag = match n.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        writeln!(out, "[{}] {}", tag, n.text)?;
    }
    Ok(())
}
