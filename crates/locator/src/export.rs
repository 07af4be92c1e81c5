use crate::clue::ClueRegion;
use crate::config::Config;
use crate::constants::CSV_HEADER;
use crate::error::{LocatorError, Result};
use crate::geometry::{CandidateSet, Coordinate, Extent};
use crate::render::export_png;
use crate::session::{Session, SessionState};
use chrono::Local;
use csv::WriterBuilder;
use log::info;
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// `candidates_<local time>`, shared by every file of one save
pub fn timestamped_stem() -> String {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("candidates_{timestamp}")
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| LocatorError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| LocatorError::CreateFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(BufWriter::new(file))
}

/// `x,y` rows in candidate order
pub fn write_candidates_csv<W: Write>(candidates: &CandidateSet, writer: W) -> Result<()> {
    #[allow(unused_mut)]
    let mut builder = WriterBuilder::new();
    #[cfg(windows)]
    {
        use csv::Terminator;
        builder = builder.terminator(Terminator::CRLF);
    }

    let mut wtr = builder.from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for p in candidates {
        wtr.write_record([p.x.to_string(), p.y.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_candidates_csv(
    candidates: &CandidateSet,
    output_dir: &Path,
    stem: &str,
) -> Result<PathBuf> {
    ensure_dir(output_dir)?;
    let file_path = output_dir.join(format!("{stem}.csv"));
    write_candidates_csv(candidates, create_file(&file_path)?)?;
    Ok(file_path)
}

/// Overview of a session, written next to the CSV
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub generated_at: String,
    pub state: String,
    pub clue_count: usize,
    /// `None` before the first clue, `Some(0)` for contradictory clues
    pub candidate_count: Option<usize>,
    pub extent: Option<Extent>,
    pub centroid: Option<Coordinate>,
    pub clues: Vec<ClueRegion>,
}

impl Summary {
    pub fn from_session(session: &Session) -> Self {
        let candidates = session.current();
        let state = match session.state() {
            SessionState::Empty => "empty",
            SessionState::Seeded => "seeded",
            SessionState::Narrowed => "narrowed",
        };
        Self {
            generated_at: Local::now().to_rfc3339(),
            state: state.to_string(),
            clue_count: session.regions().len(),
            candidate_count: candidates.map(CandidateSet::len),
            extent: candidates.and_then(CandidateSet::bounding_extent),
            centroid: candidates.and_then(CandidateSet::centroid),
            clues: session.regions().to_vec(),
        }
    }
}

pub fn export_summary_json(summary: &Summary, output_dir: &Path, stem: &str) -> Result<PathBuf> {
    ensure_dir(output_dir)?;
    let file_path = output_dir.join(format!("{stem}.json"));
    let mut writer = create_file(&file_path)?;
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.flush()?;
    Ok(file_path)
}

/// Write every output enabled in `config.output`, returning the paths written
pub fn save_session(session: &Session, config: &Config) -> Result<Vec<PathBuf>> {
    let dir = config.output.dir.as_path();
    let stem = timestamped_stem();
    let mut written = Vec::new();

    if config.output.write_csv
        && let Some(candidates) = session.current()
    {
        written.push(export_candidates_csv(candidates, dir, &stem)?);
    }
    if config.output.write_png {
        written.push(export_png(session, &config.render, dir, &stem)?);
    }
    if config.output.write_summary {
        written.push(export_summary_json(&Summary::from_session(session), dir, &stem)?);
    }

    for path in &written {
        info!("wrote {}", path.display());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Wedge;
    use tempfile::TempDir;

    fn small_set() -> CandidateSet {
        [(3, 4), (1, 2)].into_iter().map(Coordinate::from).collect()
    }

    #[test]
    fn test_csv_content_format() {
        let mut buf = Vec::new();
        write_candidates_csv(&small_set(), &mut buf).unwrap();
        let content = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["x,y", "3,4", "1,2"]);
    }

    #[test]
    fn test_export_empty_set_writes_header_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = export_candidates_csv(&CandidateSet::new(), temp_dir.path(), "empty").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().collect::<Vec<_>>(), vec!["x,y"]);
    }

    #[test]
    fn test_export_creates_nested_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("a").join("b");
        let stem = timestamped_stem();
        let path = export_candidates_csv(&small_set(), &dir, &stem).unwrap();
        assert!(path.exists());
        assert!(stem.starts_with("candidates_"));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("csv"));
    }

    #[test]
    fn test_invalid_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("occupied");
        std::fs::write(&file, "x").unwrap();
        // a regular file where the directory should go
        let result = export_candidates_csv(&small_set(), &file.join("sub"), "c");
        assert!(matches!(result, Err(LocatorError::CreateDir { .. })));
    }

    #[test]
    fn test_save_session_honours_switches() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.output.dir = temp_dir.path().to_path_buf();
        config.output.write_png = false;
        config.render.size_px = 64;

        // nothing computed yet: no CSV, summary only
        let written = save_session(&Session::new(), &config).unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].to_string_lossy().ends_with(".json"));

        let mut session = Session::new();
        session.submit_region(ClueRegion::new(
            Coordinate::new(10, 10),
            0,
            3,
            Wedge::new(0.0, 180.0),
        ));
        config.output.write_png = true;
        let written = save_session(&session, &config).unwrap();
        assert_eq!(written.len(), 3);
        assert!(written.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_summary_of_empty_session() {
        let summary = Summary::from_session(&Session::new());
        assert_eq!(summary.state, "empty");
        assert_eq!(summary.candidate_count, None);
        assert!(summary.clues.is_empty());
    }

    #[test]
    fn test_summary_json_roundtrip_fields() {
        let mut session = Session::new();
        session.submit_region(ClueRegion::new(
            Coordinate::new(100, 100),
            0,
            5,
            Wedge::new(0.0, 90.0),
        ));
        let summary = Summary::from_session(&session);
        assert_eq!(summary.state, "seeded");
        assert_eq!(summary.clue_count, 1);

        let temp_dir = TempDir::new().unwrap();
        let path = export_summary_json(&summary, temp_dir.path(), "s").unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["state"], "seeded");
        assert_eq!(
            value["candidate_count"].as_u64(),
            Some(session.current().unwrap().len() as u64)
        );
        assert_eq!(value["clues"][0]["max_radius"], 5);
        assert_eq!(value["clues"][0]["wedge"]["max_deg"], 90.0);
    }
}
