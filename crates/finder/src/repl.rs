use anyhow::Result;
use locator::{
    Clue, Config, DirectionBucket, DistanceBucket, Session, SessionState,
    clue::{direction_labels, distance_labels},
    geometry::CandidateSet,
    hunt::{checked_center, checked_facing},
    save_session,
};
use log::error;
use std::io::{BufRead, Write};

const HELP: &str = "\
commands:
  clue <x> <y> <facing> <direction> <distance>
      direction/distance by index, or as phrases split by '/':
      clue 1000 1000 90 backwards / fairly close by
  undo      go back one step
  reset     start over (undo brings the old result back)
  show      current state
  save      write outputs to the configured directory
  buckets   list direction and distance phrases
  help
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Clue(Clue),
    Undo,
    Reset,
    Show,
    Save,
    Buckets,
    Help,
    Quit,
    Nothing,
}

/// Parse one input line. Errors are messages for the user, the session
/// never sees malformed input.
pub fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let line = line.trim();
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match head.to_ascii_lowercase().as_str() {
        "" => Ok(Command::Nothing),
        "clue" | "c" => parse_clue(rest).map(Command::Clue),
        "undo" | "u" => Ok(Command::Undo),
        "reset" | "r" => Ok(Command::Reset),
        "show" | "s" => Ok(Command::Show),
        "save" => Ok(Command::Save),
        "buckets" | "b" => Ok(Command::Buckets),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}', try 'help'")),
    }
}

fn parse_clue(args: &str) -> std::result::Result<Clue, String> {
    let mut it = args.split_whitespace();
    let mut next_num = |name: &str| -> std::result::Result<f64, String> {
        let tok = it.next().ok_or_else(|| format!("missing {name}"))?;
        tok.parse::<f64>()
            .map_err(|_| format!("{name} is not a number: '{tok}'"))
    };
    let x = next_num("x")?;
    let y = next_num("y")?;
    let facing = next_num("facing")?;
    let rest: Vec<&str> = it.collect();

    if x.fract() != 0.0 || y.fract() != 0.0 {
        return Err("coordinates must be whole numbers".to_string());
    }
    let center = checked_center(x as i64, y as i64).map_err(|e| e.to_string())?;
    let facing = checked_facing(facing).map_err(|e| e.to_string())?;

    let joined = rest.join(" ");
    let (direction, distance) = match joined.split_once('/') {
        Some((d, r)) => (d.trim().to_string(), r.trim().to_string()),
        None if rest.len() == 2 => (rest[0].to_string(), rest[1].to_string()),
        None => {
            return Err(
                "expected <direction> <distance>, use '/' between phrases".to_string(),
            );
        }
    };

    let direction = DirectionBucket::parse(&direction).map_err(|e| e.to_string())?;
    let distance = DistanceBucket::parse(&distance).map_err(|e| e.to_string())?;
    Ok(Clue::new(center, direction, distance, facing))
}

fn describe<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    match (session.state(), session.current()) {
        (SessionState::Empty, _) | (_, None) => writeln!(out, "no clues yet"),
        (_, Some(c)) if c.is_empty() => writeln!(
            out,
            "no location matches all {} clues",
            session.regions().len()
        ),
        (_, Some(c)) => describe_set(out, c, session.regions().len()),
    }
}

fn describe_set<W: Write>(out: &mut W, c: &CandidateSet, clues: usize) -> std::io::Result<()> {
    write!(out, "{} candidates after {} clue(s)", c.len(), clues)?;
    if let (Some(e), Some(m)) = (c.bounding_extent(), c.centroid()) {
        write!(
            out,
            ", x {}..={} y {}..={}, centroid {}",
            e.min_x, e.max_x, e.min_y, e.max_y, m
        )?;
    }
    writeln!(out)
}

pub fn write_buckets<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "directions:")?;
    for (i, label) in direction_labels().iter().enumerate() {
        writeln!(out, "  {i}: {label}")?;
    }
    writeln!(out, "distances:")?;
    for (i, label) in distance_labels().iter().enumerate() {
        writeln!(out, "  {i}: {label}")?;
    }
    Ok(())
}

/// Read commands until EOF or `quit`
pub fn run_repl<R: BufRead, W: Write>(
    input: R,
    mut out: W,
    session: &mut Session,
    config: &Config,
) -> Result<()> {
    writeln!(out, "type 'help' for commands")?;
    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(c) => c,
            Err(msg) => {
                writeln!(out, "error: {msg}")?;
                continue;
            }
        };

        match command {
            Command::Nothing => {}
            Command::Clue(clue) => {
                session.submit_clue(&clue);
                describe(&mut out, session)?;
            }
            Command::Undo => {
                session.undo();
                describe(&mut out, session)?;
            }
            Command::Reset => {
                session.reset();
                describe(&mut out, session)?;
            }
            Command::Show => describe(&mut out, session)?,
            Command::Save => match save_session(session, config) {
                Ok(paths) => {
                    for p in paths {
                        writeln!(out, "wrote {}", p.display())?;
                    }
                }
                Err(e) => {
                    error!("save failed: {e}");
                    writeln!(out, "error: {e}")?;
                }
            },
            Command::Buckets => write_buckets(&mut out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
        out.flush()?;
    }
    Ok(())
}
